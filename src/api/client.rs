//! Account API client

use std::time::Duration;

use reqwest::{RequestBuilder, Url};
use serde::de::DeserializeOwned;
use tracing::{debug, warn};

use super::types::{
    LoginRequest, LoginResponse, MessageResponse, OperationReceipt, OperationRequest,
    PasswordUpdate, ProfileUpdate, ProfileUpdateResponse,
};
use crate::error::ApiError;
use crate::session::UserProfile;

const REQUEST_TIMEOUT: Duration = Duration::from_secs(30);

#[derive(Clone)]
pub struct AccountClient {
    http: reqwest::Client,
    base_url: Url,
    token: Option<String>,
}

impl AccountClient {
    pub fn new(base_url: &str, token: Option<String>) -> Result<Self, ApiError> {
        // `Url::join` drops the last segment unless the base ends with '/'
        let normalized = if base_url.ends_with('/') {
            base_url.to_string()
        } else {
            format!("{base_url}/")
        };
        let base_url = Url::parse(&normalized).map_err(|e| ApiError::BaseUrl(format!("{base_url}: {e}")))?;

        let http = reqwest::Client::builder()
            .timeout(REQUEST_TIMEOUT)
            .user_agent(concat!("momo-wallet/", env!("CARGO_PKG_VERSION")))
            .build()?;

        Ok(Self { http, base_url, token })
    }

    pub fn with_token(mut self, token: impl Into<String>) -> Self {
        self.token = Some(token.into());
        self
    }

    pub fn without_token(mut self) -> Self {
        self.token = None;
        self
    }

    pub fn has_token(&self) -> bool {
        self.token.is_some()
    }

    pub fn endpoint(&self, path: &str) -> Result<Url, ApiError> {
        self.base_url
            .join(path.trim_start_matches('/'))
            .map_err(|e| ApiError::BaseUrl(e.to_string()))
    }

    fn authorized(&self, builder: RequestBuilder) -> Result<RequestBuilder, ApiError> {
        let token = self.token.as_deref().ok_or(ApiError::MissingToken)?;
        Ok(builder.bearer_auth(token))
    }

    async fn send<T: DeserializeOwned>(&self, builder: RequestBuilder) -> Result<T, ApiError> {
        let response = builder.header("Accept", "application/json").send().await?;
        let status = response.status();
        debug!(status = status.as_u16(), url = %response.url(), "account api response");

        if status.is_success() {
            return Ok(response.json::<T>().await?);
        }

        let body = response.text().await.unwrap_or_default();
        let error = ApiError::from_body(status.as_u16(), &body);
        warn!(status = status.as_u16(), "account api error: {error}");
        Err(error)
    }

    /// `POST /login`; the returned token is not stored on this client.
    pub async fn login(&self, phone: &str, password: &str) -> Result<LoginResponse, ApiError> {
        let body = LoginRequest {
            phone: phone.to_string(),
            password: password.to_string(),
        };
        let request = self.http.post(self.endpoint("login")?).json(&body);
        self.send(request).await
    }

    pub async fn get_profile(&self) -> Result<UserProfile, ApiError> {
        let request = self.authorized(self.http.get(self.endpoint("profile")?))?;
        self.send(request).await
    }

    pub async fn update_profile(&self, update: &ProfileUpdate) -> Result<ProfileUpdateResponse, ApiError> {
        let request = self.authorized(self.http.put(self.endpoint("profile")?))?.json(update);
        self.send(request).await
    }

    pub async fn update_password(&self, old_password: &str, new_password: &str) -> Result<MessageResponse, ApiError> {
        let body = PasswordUpdate {
            old_password: old_password.to_string(),
            new_password: new_password.to_string(),
        };
        let request = self.authorized(self.http.post(self.endpoint("password-update")?))?.json(&body);
        self.send(request).await
    }

    /// `POST /deposit` or `POST /withdraw`
    pub async fn submit_operation(&self, operation: &OperationRequest) -> Result<OperationReceipt, ApiError> {
        let request = self.authorized(self.http.post(self.endpoint(operation.path())?))?.json(operation);
        self.send(request).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn endpoints_keep_base_path() {
        let client = AccountClient::new("https://wallet.example.com/api/v1", None).unwrap();
        assert_eq!(client.endpoint("profile").unwrap().as_str(), "https://wallet.example.com/api/v1/profile");
        assert_eq!(
            client.endpoint("/password-update").unwrap().as_str(),
            "https://wallet.example.com/api/v1/password-update"
        );
    }

    #[test]
    fn invalid_base_url_is_rejected() {
        assert!(matches!(AccountClient::new("not a url", None), Err(ApiError::BaseUrl(_))));
    }

    #[tokio::test]
    async fn authenticated_calls_need_a_token() {
        let client = AccountClient::new("http://127.0.0.1:9/api", None).unwrap();
        assert!(!client.has_token());
        assert!(matches!(client.get_profile().await, Err(ApiError::MissingToken)));
        assert!(matches!(
            client.update_password("old-secret", "new-secret").await,
            Err(ApiError::MissingToken)
        ));
    }
}
