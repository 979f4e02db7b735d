//! Terminal client for a mobile-money wallet.
//!
//! The navigation core ([`nav`]) and the dialog flows ([`flows`]) are plain
//! state machines with no terminal or network dependency; [`shell`] wires
//! them to ratatui and the account API.

pub mod api;
pub mod config;
pub mod error;
pub mod flows;
pub mod icons;
pub mod logging;
pub mod nav;
pub mod platform;
pub mod session;
pub mod shell;
pub mod theme;
