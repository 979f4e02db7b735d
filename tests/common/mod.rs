#![allow(dead_code)]

use std::cell::RefCell;
use std::rc::Rc;

use momo_wallet::error::PlatformError;
use momo_wallet::platform::ExternalActions;
use momo_wallet::session::{Session, UserProfile};
use reqwest::Url;

pub fn profile(is_verified: bool) -> UserProfile {
    UserProfile {
        id: 42,
        name: "Kwame Boateng".to_string(),
        email: None,
        phone: "+233244000111".to_string(),
        is_verified,
        balance: Some("80.50".to_string()),
        created_at: Some("2024-03-01T09:00:00Z".to_string()),
    }
}

pub fn signed_in(is_verified: bool) -> Session {
    Session::authenticated(profile(is_verified))
}

/// What the fake platform was asked to do.
#[derive(Debug, Default)]
pub struct PlatformLog {
    pub dialed: Vec<String>,
    pub opened: Vec<String>,
    pub clipboard: Option<String>,
}

/// Records requests instead of touching the OS. Clones share one log.
#[derive(Clone, Default)]
pub struct RecordingPlatform {
    pub log: Rc<RefCell<PlatformLog>>,
}

impl ExternalActions for RecordingPlatform {
    fn activate_tel(&mut self, uri: &str) -> Result<(), PlatformError> {
        self.log.borrow_mut().dialed.push(uri.to_string());
        Ok(())
    }

    fn open_external(&mut self, url: &Url) -> Result<(), PlatformError> {
        self.log.borrow_mut().opened.push(url.to_string());
        Ok(())
    }

    fn write_clipboard(&mut self, text: &str) -> Result<(), PlatformError> {
        self.log.borrow_mut().clipboard = Some(text.to_string());
        Ok(())
    }
}
