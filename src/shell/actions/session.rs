use std::time::Instant;

use tracing::{info, warn};

use crate::api::LoginResponse;
use crate::nav::ScreenId;
use crate::session::Session;
use crate::shell::{poll_task, spawn_task, App, LoginField, LoginForm, PendingTasks, TaskPoll};

/// HTTP status the API answers with once a token is revoked or expired.
pub(super) const UNAUTHORIZED: u16 = 401;

impl App {
    /// Leave the splash once its timer ran out and any startup profile fetch
    /// has settled.
    pub fn finish_splash(&mut self, now: Instant) {
        let Some(splash) = &self.shell.splash else {
            return;
        };
        if !splash.is_done(now) || self.tasks.profile.is_some() {
            return;
        }

        self.shell.splash = None;
        if self.shell.session.is_authenticated {
            self.shell.nav.reset_to(ScreenId::Dashboard);
        }
    }

    pub fn submit_login(&mut self) {
        if self.tasks.login.is_some() {
            return;
        }

        let form = &mut self.shell.login_form;
        form.errors.clear();

        let phone = form.phone.trim().to_string();
        if phone.is_empty() {
            form.errors.push(("phone".to_string(), "Phone number is required".to_string()));
        }
        if form.password.is_empty() {
            form.errors.push(("password".to_string(), "Password is required".to_string()));
        }
        if !form.errors.is_empty() {
            form.focused = if phone.is_empty() { LoginField::Phone } else { LoginField::Password };
            return;
        }

        let password = form.password.clone();
        let client = self.client.clone();
        self.tasks.login = Some(spawn_task(async move { client.login(&phone, &password).await }));
        self.shell.status_message = Some("Signing in...".to_string());
    }

    pub fn poll_login(&mut self) {
        match poll_task(&mut self.tasks.login) {
            TaskPoll::Pending => {}
            TaskPoll::Ready(Ok(response)) => self.sign_in(response),
            TaskPoll::Ready(Err(e)) => {
                warn!("login failed: {e}");
                let form = &mut self.shell.login_form;
                form.password.clear();
                form.errors = e.field_errors();
                self.shell.status_message = None;
                self.shell.notices.error(e.to_string());
            }
            TaskPoll::Lost => {
                self.shell.status_message = None;
                self.shell.notices.error("Sign-in was interrupted, try again");
            }
        }
    }

    fn sign_in(&mut self, response: LoginResponse) {
        let LoginResponse { token, user } = response;
        info!(user_id = user.id, verified = user.is_verified, "signed in");

        self.client = self.client.clone().with_token(token.clone());
        self.shell.config.record_login(token);
        self.persist_config();

        self.shell.login_form = LoginForm::default();
        self.shell.status_message = None;
        self.shell.session = Session::authenticated(user);
        self.shell.nav.reset_to(ScreenId::Dashboard);

        let greeting = format!("Welcome, {}", self.shell.session.display_name());
        self.shell.notices.success(greeting);
    }

    pub fn spawn_profile_fetch(&mut self) {
        if self.tasks.profile.is_some() {
            return;
        }
        let client = self.client.clone();
        self.tasks.profile = Some(spawn_task(async move { client.get_profile().await }));
    }

    /// User-requested refresh of the account.
    pub fn refresh_profile(&mut self) {
        self.spawn_profile_fetch();
        self.shell.status_message = Some("Refreshing account...".to_string());
    }

    pub fn poll_profile(&mut self) {
        match poll_task(&mut self.tasks.profile) {
            TaskPoll::Pending => {}
            TaskPoll::Ready(Ok(user)) => {
                let was_verified = self.shell.session.user.as_ref().is_some_and(|u| u.is_verified);
                if user.is_verified && !was_verified && self.shell.session.is_authenticated {
                    self.shell.notices.success("Your account is verified");
                }
                info!(user_id = user.id, "profile loaded");
                self.shell.session = Session::authenticated(user);
                self.shell.status_message = None;
            }
            TaskPoll::Ready(Err(e)) if e.status() == Some(UNAUTHORIZED) => {
                warn!("token rejected: {e}");
                self.end_session("Your session expired. Sign in again.");
            }
            TaskPoll::Ready(Err(e)) => {
                warn!("profile fetch failed: {e}");
                self.shell.status_message = None;
                self.shell.notices.error(format!("Could not load your account: {e}"));
            }
            TaskPoll::Lost => {
                self.shell.status_message = None;
            }
        }
    }

    pub fn logout(&mut self) {
        info!("signed out");
        self.end_session("Signed out");
    }

    /// Drop the token and every in-flight request, back to the landing screen.
    pub fn end_session(&mut self, message: &str) {
        self.tasks = PendingTasks::default();
        self.client = self.client.clone().without_token();
        self.shell.config.clear_login();
        self.persist_config();

        self.shell.session = Session::anonymous();
        self.shell.modal = None;
        self.shell.modal_error = None;
        self.shell.last_receipt = None;
        self.shell.status_message = None;
        if self.shell.splash.is_none() {
            self.shell.nav.reset_to(ScreenId::Landing);
        }
        self.shell.notices.info(message);
    }

    fn persist_config(&mut self) {
        let Some(path) = &self.config_path else {
            return;
        };
        if let Err(e) = self.shell.config.save_to(path) {
            warn!("failed to save config: {e:#}");
            self.shell.notices.error("Could not save your session");
        }
    }
}
