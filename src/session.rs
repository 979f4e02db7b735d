use serde::{Deserialize, Serialize};

/// Wallet account as returned by `GET /profile`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct UserProfile {
    pub id: u64,
    pub name: String,
    #[serde(default)]
    pub email: Option<String>,
    pub phone: String,
    #[serde(default)]
    pub is_verified: bool,
    /// Decimal string, as the API sends it
    #[serde(default)]
    pub balance: Option<String>,
    #[serde(default)]
    pub created_at: Option<String>,
}

/// Extra rights a screen may demand on top of being logged in.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Capability {
    /// Identity checks passed; required for anything that moves money out.
    Verified,
}

/// Authentication state. Owned by the shell, read by the session gate.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Session {
    pub user: Option<UserProfile>,
    pub is_authenticated: bool,
}

impl Session {
    pub fn anonymous() -> Self {
        Self::default()
    }

    pub fn authenticated(user: UserProfile) -> Self {
        Self {
            user: Some(user),
            is_authenticated: true,
        }
    }

    pub fn has_capability(&self, capability: Capability) -> bool {
        if !self.is_authenticated {
            return false;
        }
        match capability {
            Capability::Verified => self.user.as_ref().is_some_and(|u| u.is_verified),
        }
    }

    pub fn display_name(&self) -> &str {
        self.user.as_ref().map(|u| u.name.as_str()).unwrap_or("Guest")
    }
}

#[cfg(test)]
pub(crate) fn test_profile(is_verified: bool) -> UserProfile {
    UserProfile {
        id: 7,
        name: "Ama Mensah".to_string(),
        email: Some("ama@example.com".to_string()),
        phone: "+233201234567".to_string(),
        is_verified,
        balance: Some("150.00".to_string()),
        created_at: None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn anonymous_session_has_no_capabilities() {
        let session = Session::anonymous();
        assert!(!session.is_authenticated);
        assert!(!session.has_capability(Capability::Verified));
        assert_eq!(session.display_name(), "Guest");
    }

    #[test]
    fn verified_flag_maps_to_capability() {
        assert!(Session::authenticated(test_profile(true)).has_capability(Capability::Verified));
        assert!(!Session::authenticated(test_profile(false)).has_capability(Capability::Verified));
    }

    #[test]
    fn profile_tolerates_missing_optional_fields() {
        let json = r#"{"id":1,"name":"Kofi","phone":"+233240000000"}"#;
        let profile: UserProfile = serde_json::from_str(json).unwrap();
        assert!(!profile.is_verified);
        assert_eq!(profile.email, None);
    }
}
