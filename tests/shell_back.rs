//! Drives the shell through key events without a terminal.

mod common;

use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};
use momo_wallet::api::AccountClient;
use momo_wallet::config::WalletConfig;
use momo_wallet::nav::{DispatchOutcome, ScreenId};
use momo_wallet::shell::{App, Modal};

use common::{signed_in, RecordingPlatform};

fn press(app: &mut App, code: KeyCode) {
    app.handle_key_event(KeyEvent::new(code, KeyModifiers::NONE));
}

fn type_text(app: &mut App, text: &str) {
    for c in text.chars() {
        press(app, KeyCode::Char(c));
    }
}

// One App per process: it claims the back listener.
#[test]
fn esc_closes_overlays_then_walks_history() {
    let platform = RecordingPlatform::default();
    let client = AccountClient::new("http://127.0.0.1:9/api", None).unwrap();
    let mut app = App::new(WalletConfig::default(), None, client, Box::new(platform.clone())).unwrap();

    // splash swallows input
    press(&mut app, KeyCode::Enter);
    assert_eq!(app.shell.current(), ScreenId::Landing);
    app.shell.splash = None;

    // at the root there is nothing to go back to
    assert_eq!(app.emit_back(), DispatchOutcome::Ignored);
    assert!(app.shell.status_message.is_some());

    app.shell.session = signed_in(true);
    press(&mut app, KeyCode::Char('d'));
    assert_eq!(app.shell.nav.stack(), &[ScreenId::Landing, ScreenId::Dashboard]);

    // the side menu takes the first back press
    press(&mut app, KeyCode::Char('m'));
    assert!(app.shell.menu.open);
    assert_eq!(app.bridge.len(), 1);
    assert!(matches!(app.emit_back(), DispatchOutcome::Handled(_)));
    assert!(!app.shell.menu.open);
    assert!(app.bridge.is_empty());
    assert_eq!(app.shell.current(), ScreenId::Dashboard);

    // menu navigation closes the menu
    press(&mut app, KeyCode::Char('m'));
    press(&mut app, KeyCode::Down);
    press(&mut app, KeyCode::Enter);
    assert_eq!(app.shell.current(), ScreenId::Deposit);
    assert!(!app.shell.menu.open);
    assert!(app.bridge.is_empty());

    press(&mut app, KeyCode::Esc);
    assert_eq!(app.shell.current(), ScreenId::Dashboard);

    // recharge: one dial on open, copy as fallback
    press(&mut app, KeyCode::Char('r'));
    type_text(&mut app, "*123#");
    press(&mut app, KeyCode::Enter);
    assert!(matches!(app.shell.modal, Some(Modal::Handoff(_))));
    for _ in 0..3 {
        app.tick(std::time::Instant::now());
    }
    press(&mut app, KeyCode::Char('c'));
    {
        let log = platform.log.borrow();
        assert_eq!(log.dialed, vec!["tel:*123#".to_string()]);
        assert_eq!(log.clipboard.as_deref(), Some("*123#"));
    }

    // the dialog goes first, then the screen
    press(&mut app, KeyCode::Esc);
    assert!(app.shell.modal.is_none());
    assert!(app.bridge.is_empty());
    assert_eq!(app.shell.current(), ScreenId::Recharge);

    press(&mut app, KeyCode::Esc);
    assert_eq!(app.shell.current(), ScreenId::Dashboard);
    press(&mut app, KeyCode::Esc);
    assert_eq!(app.shell.current(), ScreenId::Landing);
    assert_eq!(app.emit_back(), DispatchOutcome::Ignored);
}
