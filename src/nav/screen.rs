use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::NavError;
use crate::session::Capability;

/// Every screen the wallet can show.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum ScreenId {
    Splash,
    Landing,
    Login,
    Dashboard,
    Deposit,
    Withdraw,
    Recharge,
    Transfer,
    History,
    Settings,
    Profile,
    PermissionDenied,
}

/// What a session must have to reach a screen.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Requirement {
    Public,
    Authenticated,
    /// Authenticated and holding the capability
    Capability(Capability),
}

impl ScreenId {
    pub const ALL: [ScreenId; 12] = [
        ScreenId::Splash,
        ScreenId::Landing,
        ScreenId::Login,
        ScreenId::Dashboard,
        ScreenId::Deposit,
        ScreenId::Withdraw,
        ScreenId::Recharge,
        ScreenId::Transfer,
        ScreenId::History,
        ScreenId::Settings,
        ScreenId::Profile,
        ScreenId::PermissionDenied,
    ];

    /// Entries of the side menu, in display order.
    pub const MENU: [ScreenId; 8] = [
        ScreenId::Dashboard,
        ScreenId::Deposit,
        ScreenId::Withdraw,
        ScreenId::Recharge,
        ScreenId::Transfer,
        ScreenId::History,
        ScreenId::Profile,
        ScreenId::Settings,
    ];

    /// The protected-screen table. Adding a variant without deciding its
    /// requirement does not compile.
    pub const fn requirement(self) -> Requirement {
        match self {
            ScreenId::Splash
            | ScreenId::Landing
            | ScreenId::Login
            | ScreenId::PermissionDenied => Requirement::Public,
            ScreenId::Dashboard
            | ScreenId::Deposit
            | ScreenId::Recharge
            | ScreenId::History
            | ScreenId::Settings
            | ScreenId::Profile => Requirement::Authenticated,
            ScreenId::Withdraw | ScreenId::Transfer => Requirement::Capability(Capability::Verified),
        }
    }

    pub const fn as_str(self) -> &'static str {
        match self {
            ScreenId::Splash => "splash",
            ScreenId::Landing => "landing",
            ScreenId::Login => "login",
            ScreenId::Dashboard => "dashboard",
            ScreenId::Deposit => "deposit",
            ScreenId::Withdraw => "withdraw",
            ScreenId::Recharge => "recharge",
            ScreenId::Transfer => "transfer",
            ScreenId::History => "history",
            ScreenId::Settings => "settings",
            ScreenId::Profile => "profile",
            ScreenId::PermissionDenied => "permission-denied",
        }
    }

    pub const fn title(self) -> &'static str {
        match self {
            ScreenId::Splash => "LOADING",
            ScreenId::Landing => "WELCOME",
            ScreenId::Login => "SIGN IN",
            ScreenId::Dashboard => "DASHBOARD",
            ScreenId::Deposit => "DEPOSIT",
            ScreenId::Withdraw => "WITHDRAW",
            ScreenId::Recharge => "RECHARGE",
            ScreenId::Transfer => "TRANSFER",
            ScreenId::History => "HISTORY",
            ScreenId::Settings => "SETTINGS",
            ScreenId::Profile => "PROFILE",
            ScreenId::PermissionDenied => "ACCESS DENIED",
        }
    }
}

impl fmt::Display for ScreenId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ScreenId {
    type Err = NavError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        ScreenId::ALL
            .into_iter()
            .find(|screen| screen.as_str() == s)
            .ok_or_else(|| NavError::UnknownScreen(s.to_string()))
    }
}
