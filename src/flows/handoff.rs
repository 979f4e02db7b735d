//! Confirm -> external action -> resume.
//!
//! One flow instance lives exactly as long as its modal. Opening it fires a
//! single automatic attempt (dial the USSD code, or open the payment link);
//! the auto-attempt token is armed on open and consumed by the first
//! attempt, so redrawing the modal never repeats it. The user can retry,
//! copy the payload, continue, or close.
//!
//! `Attempted` only means the platform accepted the request. Whether a call
//! was placed or a payment finished cannot be observed from here.

use std::time::{Duration, Instant};

use reqwest::Url;
use tracing::{debug, info, warn};

use crate::error::HandoffError;
use crate::flows::notice::Notices;
use crate::platform::{tel_uri, ExternalActions};

/// How long the "copied" indicator stays on after a clipboard write.
pub const COPIED_RESET: Duration = Duration::from_secs(2);

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HandoffKind {
    Dial,
    Redirect,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HandoffStatus {
    Idle,
    Pending,
    Attempted,
    Completed,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HandoffOutcome {
    Continue,
    Cancel,
}

#[derive(Debug, Clone, PartialEq, Eq)]
enum HandoffAction {
    Dial(String),
    /// `link` is kept as received; `Url` normalizes it.
    Redirect { link: String, url: Url },
}

#[derive(Debug, Default)]
struct AttemptToken {
    armed: bool,
}

impl AttemptToken {
    fn arm(&mut self) {
        self.armed = true;
    }

    fn take(&mut self) -> bool {
        std::mem::take(&mut self.armed)
    }
}

#[derive(Debug)]
pub struct ActionHandoffFlow {
    action: HandoffAction,
    status: HandoffStatus,
    auto_attempt: AttemptToken,
    attempts: u32,
    copied_until: Option<Instant>,
}

impl ActionHandoffFlow {
    /// Flow that dials a USSD code such as `*123#`.
    pub fn dial(code: impl Into<String>) -> Result<Self, HandoffError> {
        let code = code.into().trim().to_string();
        if code.is_empty() {
            return Err(HandoffError::EmptyCode);
        }
        Ok(Self::with_action(HandoffAction::Dial(code)))
    }

    /// Flow that opens an absolute http(s) payment link.
    pub fn redirect(link: &str) -> Result<Self, HandoffError> {
        let link = link.trim();
        let url = Url::parse(link).map_err(|_| HandoffError::InvalidUrl(link.to_string()))?;
        if !matches!(url.scheme(), "http" | "https") {
            return Err(HandoffError::InvalidUrl(link.to_string()));
        }
        Ok(Self::with_action(HandoffAction::Redirect {
            link: link.to_string(),
            url,
        }))
    }

    fn with_action(action: HandoffAction) -> Self {
        Self {
            action,
            status: HandoffStatus::Idle,
            auto_attempt: AttemptToken::default(),
            attempts: 0,
            copied_until: None,
        }
    }

    pub fn kind(&self) -> HandoffKind {
        match self.action {
            HandoffAction::Dial(_) => HandoffKind::Dial,
            HandoffAction::Redirect { .. } => HandoffKind::Redirect,
        }
    }

    /// The USSD code or the link, as the user would type it.
    pub fn payload(&self) -> &str {
        match &self.action {
            HandoffAction::Dial(code) => code,
            HandoffAction::Redirect { link, .. } => link,
        }
    }

    pub fn status(&self) -> HandoffStatus {
        self.status
    }

    pub fn attempts(&self) -> u32 {
        self.attempts
    }

    /// Label for the attempt button.
    pub fn attempt_label(&self) -> &'static str {
        match (self.kind(), self.attempts) {
            (HandoffKind::Dial, 0) => "Dial",
            (HandoffKind::Dial, _) => "Retry dial",
            (HandoffKind::Redirect, 0) => "Open link",
            (HandoffKind::Redirect, _) => "Reopen link",
        }
    }

    /// `Idle -> Pending`, then the single automatic attempt. Opening an
    /// instance that is already open does nothing.
    pub fn open<P>(&mut self, platform: &mut P, notices: &mut Notices)
    where
        P: ExternalActions + ?Sized,
    {
        if self.status != HandoffStatus::Idle {
            debug!(status = ?self.status, "handoff already open");
            return;
        }
        self.status = HandoffStatus::Pending;
        self.auto_attempt.arm();
        self.on_render(platform, notices);
    }

    /// Called on every redraw of the modal; fires the automatic attempt only
    /// if its token is still armed.
    pub fn on_render<P>(&mut self, platform: &mut P, notices: &mut Notices)
    where
        P: ExternalActions + ?Sized,
    {
        if self.auto_attempt.take() {
            self.attempt(platform, notices);
        }
    }

    /// Explicit user retry of the external action.
    pub fn retry<P>(&mut self, platform: &mut P, notices: &mut Notices) -> bool
    where
        P: ExternalActions + ?Sized,
    {
        match self.status {
            HandoffStatus::Pending | HandoffStatus::Attempted => self.attempt(platform, notices),
            HandoffStatus::Idle | HandoffStatus::Completed => false,
        }
    }

    fn attempt<P>(&mut self, platform: &mut P, notices: &mut Notices) -> bool
    where
        P: ExternalActions + ?Sized,
    {
        let result = match &self.action {
            HandoffAction::Dial(code) => platform.activate_tel(&tel_uri(code)),
            HandoffAction::Redirect { url, .. } => platform.open_external(url),
        };

        match result {
            Ok(()) => {
                self.attempts += 1;
                self.status = HandoffStatus::Attempted;
                info!(kind = ?self.kind(), attempts = self.attempts, "external action requested");
                true
            }
            Err(e) => {
                warn!(kind = ?self.kind(), "external action failed: {e}");
                notices.error(format!("{e}. Copy it and continue manually."));
                false
            }
        }
    }

    /// Copy the payload as a fallback. Leaves the main state untouched.
    pub fn copy<P>(&mut self, clipboard: &mut P, notices: &mut Notices, now: Instant) -> bool
    where
        P: ExternalActions + ?Sized,
    {
        match clipboard.write_clipboard(self.payload()) {
            Ok(()) => {
                self.copied_until = Some(now + COPIED_RESET);
                true
            }
            Err(e) => {
                warn!("clipboard write failed: {e}");
                notices.error(e.to_string());
                false
            }
        }
    }

    pub fn is_copied(&self, now: Instant) -> bool {
        self.copied_until.is_some_and(|until| now < until)
    }

    /// User confirmed they are done outside the app.
    pub fn proceed(mut self) -> HandoffOutcome {
        self.status = HandoffStatus::Completed;
        debug!(kind = ?self.kind(), attempts = self.attempts, "handoff completed");
        HandoffOutcome::Continue
    }

    /// Dialog dismissed without continuing. The state is discarded.
    pub fn close(self) -> HandoffOutcome {
        debug!(kind = ?self.kind(), status = ?self.status, "handoff cancelled");
        HandoffOutcome::Cancel
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::PlatformError;

    #[derive(Default)]
    struct FakePlatform {
        dialed: Vec<String>,
        opened: Vec<String>,
        clipboard: Option<String>,
        fail_actions: bool,
        fail_clipboard: bool,
    }

    impl ExternalActions for FakePlatform {
        fn activate_tel(&mut self, uri: &str) -> Result<(), PlatformError> {
            if self.fail_actions {
                return Err(PlatformError::Dialer("no dialer".to_string()));
            }
            self.dialed.push(uri.to_string());
            Ok(())
        }

        fn open_external(&mut self, url: &Url) -> Result<(), PlatformError> {
            if self.fail_actions {
                return Err(PlatformError::Browser("no browser".to_string()));
            }
            self.opened.push(url.to_string());
            Ok(())
        }

        fn write_clipboard(&mut self, text: &str) -> Result<(), PlatformError> {
            if self.fail_clipboard {
                return Err(PlatformError::Clipboard("denied".to_string()));
            }
            self.clipboard = Some(text.to_string());
            Ok(())
        }
    }

    #[test]
    fn open_dials_exactly_once_across_renders() {
        let mut platform = FakePlatform::default();
        let mut notices = Notices::new();
        let mut flow = ActionHandoffFlow::dial("*123#").unwrap();
        assert_eq!(flow.status(), HandoffStatus::Idle);

        flow.open(&mut platform, &mut notices);
        for _ in 0..5 {
            flow.on_render(&mut platform, &mut notices);
        }
        flow.open(&mut platform, &mut notices);

        assert_eq!(platform.dialed, vec!["tel:*123#".to_string()]);
        assert_eq!(flow.status(), HandoffStatus::Attempted);
        assert_eq!(flow.attempt_label(), "Retry dial");
    }

    #[test]
    fn retry_repeats_the_request() {
        let mut platform = FakePlatform::default();
        let mut notices = Notices::new();
        let mut flow = ActionHandoffFlow::redirect("https://pay.example.com/checkout/42").unwrap();

        flow.open(&mut platform, &mut notices);
        assert!(flow.retry(&mut platform, &mut notices));

        assert_eq!(platform.opened.len(), 2);
        assert_eq!(flow.attempts(), 2);
        assert_eq!(flow.kind(), HandoffKind::Redirect);
    }

    #[test]
    fn retry_before_open_does_nothing() {
        let mut platform = FakePlatform::default();
        let mut flow = ActionHandoffFlow::dial("*144#").unwrap();
        assert!(!flow.retry(&mut platform, &mut Notices::new()));
        assert!(platform.dialed.is_empty());
    }

    #[test]
    fn failed_attempt_keeps_state_and_raises_notice() {
        let mut platform = FakePlatform { fail_actions: true, ..Default::default() };
        let mut notices = Notices::new();
        let mut flow = ActionHandoffFlow::dial("*123#").unwrap();

        flow.open(&mut platform, &mut notices);
        assert_eq!(flow.status(), HandoffStatus::Pending);
        assert_eq!(notices.len(), 1);

        // the token is spent even though the attempt failed
        flow.on_render(&mut platform, &mut notices);
        assert_eq!(notices.len(), 1);

        platform.fail_actions = false;
        assert!(flow.retry(&mut platform, &mut notices));
        assert_eq!(flow.status(), HandoffStatus::Attempted);
    }

    #[test]
    fn copy_flag_reverts_after_two_seconds() {
        let mut platform = FakePlatform::default();
        let mut notices = Notices::new();
        let mut flow = ActionHandoffFlow::dial("*123#").unwrap();
        flow.open(&mut platform, &mut notices);

        let now = Instant::now();
        assert!(flow.copy(&mut platform, &mut notices, now));
        assert_eq!(platform.clipboard.as_deref(), Some("*123#"));

        // unrelated transition in between
        flow.retry(&mut platform, &mut notices);

        assert!(flow.is_copied(now + Duration::from_millis(1999)));
        assert!(!flow.is_copied(now + COPIED_RESET));
        assert_eq!(flow.status(), HandoffStatus::Attempted);
    }

    #[test]
    fn clipboard_failure_is_a_notice() {
        let mut platform = FakePlatform { fail_clipboard: true, ..Default::default() };
        let mut notices = Notices::new();
        let mut flow = ActionHandoffFlow::dial("*123#").unwrap();

        let now = Instant::now();
        assert!(!flow.copy(&mut platform, &mut notices, now));
        assert!(!flow.is_copied(now));
        assert_eq!(notices.len(), 1);
    }

    #[test]
    fn outcomes() {
        let mut platform = FakePlatform::default();
        let mut notices = Notices::new();
        let mut flow = ActionHandoffFlow::dial("*123#").unwrap();
        flow.open(&mut platform, &mut notices);
        assert_eq!(flow.proceed(), HandoffOutcome::Continue);

        let flow = ActionHandoffFlow::dial("*123#").unwrap();
        assert_eq!(flow.close(), HandoffOutcome::Cancel);
    }

    #[test]
    fn rejects_bad_payloads() {
        assert_eq!(ActionHandoffFlow::dial("  ").unwrap_err(), HandoffError::EmptyCode);
        assert!(matches!(
            ActionHandoffFlow::redirect("/checkout/42"),
            Err(HandoffError::InvalidUrl(_))
        ));
        assert!(matches!(
            ActionHandoffFlow::redirect("javascript:alert(1)"),
            Err(HandoffError::InvalidUrl(_))
        ));
    }

    #[test]
    fn copied_link_matches_what_the_server_sent() {
        let mut platform = FakePlatform::default();
        let mut notices = Notices::new();
        let mut flow = ActionHandoffFlow::redirect(" https://pay.example.com ").unwrap();

        assert_eq!(flow.payload(), "https://pay.example.com");
        assert!(flow.copy(&mut platform, &mut notices, Instant::now()));
        assert_eq!(platform.clipboard.as_deref(), Some("https://pay.example.com"));

        flow.open(&mut platform, &mut notices);
        assert_eq!(platform.opened, vec!["https://pay.example.com/".to_string()]);
    }
}
