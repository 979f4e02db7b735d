//! Hand-offs to the operating environment: dialer, browser, clipboard.
//!
//! None of these report whether the user actually placed the call or
//! finished paying; a successful return only means the request was handed
//! to the platform.

use std::process::{Command, Stdio};
use std::thread;

use arboard::Clipboard;
use reqwest::Url;
use tracing::{debug, warn};

use crate::error::PlatformError;

pub trait ExternalActions {
    /// Hand a `tel:` URI to whatever handles telephone links.
    fn activate_tel(&mut self, uri: &str) -> Result<(), PlatformError>;

    /// Open `url` in a new browsing context that has no reference back to us.
    fn open_external(&mut self, url: &Url) -> Result<(), PlatformError>;

    fn write_clipboard(&mut self, text: &str) -> Result<(), PlatformError>;
}

/// `tel:` URI for a USSD code, e.g. `*123#` -> `tel:*123#`.
pub fn tel_uri(code: &str) -> String {
    format!("tel:{}", code.trim())
}

/// Program that passes a URI to its registered handler on this OS.
fn uri_opener() -> &'static str {
    if cfg!(target_os = "macos") {
        "open"
    } else if cfg!(target_os = "windows") {
        "explorer.exe"
    } else {
        "xdg-open"
    }
}

/// Desktop implementation used by the terminal shell.
#[derive(Default)]
pub struct DesktopPlatform {
    clipboard: Option<Clipboard>,
}

impl DesktopPlatform {
    pub fn new() -> Self {
        Self::default()
    }

    fn clipboard(&mut self) -> Result<&mut Clipboard, PlatformError> {
        if self.clipboard.is_none() {
            let clipboard = Clipboard::new().map_err(|e| PlatformError::Clipboard(e.to_string()))?;
            self.clipboard = Some(clipboard);
        }
        self.clipboard
            .as_mut()
            .ok_or_else(|| PlatformError::Clipboard("clipboard unavailable".to_string()))
    }
}

impl ExternalActions for DesktopPlatform {
    fn activate_tel(&mut self, uri: &str) -> Result<(), PlatformError> {
        let opener = uri_opener();
        let mut child = Command::new(opener)
            .arg(uri)
            .stdin(Stdio::null())
            .stdout(Stdio::null())
            .stderr(Stdio::null())
            .spawn()
            .map_err(|e| PlatformError::Dialer(format!("{opener}: {e}")))?;
        debug!(opener, uri, "telephone link handed to platform");

        // reap the opener so it does not linger as a zombie
        thread::spawn(move || match child.wait() {
            Ok(status) if !status.success() => debug!(opener, %status, "opener exited with failure"),
            Ok(_) => {}
            Err(e) => warn!(opener, "failed to wait for opener: {e}"),
        });
        Ok(())
    }

    fn open_external(&mut self, url: &Url) -> Result<(), PlatformError> {
        webbrowser::open(url.as_str()).map_err(|e| PlatformError::Browser(e.to_string()))?;
        debug!(%url, "payment link handed to browser");
        Ok(())
    }

    fn write_clipboard(&mut self, text: &str) -> Result<(), PlatformError> {
        self.clipboard()?
            .set_text(text.to_string())
            .map_err(|e| PlatformError::Clipboard(e.to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn tel_uri_keeps_ussd_symbols() {
        assert_eq!(tel_uri("*123#"), "tel:*123#");
        assert_eq!(tel_uri(" *144*2*1# "), "tel:*144*2*1#");
    }

    #[test]
    #[cfg(target_os = "linux")]
    fn linux_uses_xdg_open_only() {
        assert_eq!(uri_opener(), "xdg-open");
    }

    #[test]
    #[cfg(target_os = "macos")]
    fn macos_uses_open() {
        assert_eq!(uri_opener(), "open");
    }
}
