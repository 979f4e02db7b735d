mod common;

use std::time::{Duration, Instant};

use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};
use momo_wallet::api::AccountClient;
use momo_wallet::config::WalletConfig;
use momo_wallet::nav::{DispatchOutcome, ScreenId};
use momo_wallet::shell::{App, Modal};

use common::{signed_in, RecordingPlatform};

fn press(app: &mut App, code: KeyCode) {
    app.handle_key_event(KeyEvent::new(code, KeyModifiers::NONE));
}

fn confirm_processing(app: &App) -> Option<bool> {
    match &app.shell.modal {
        Some(Modal::Confirm(flow)) => Some(flow.is_processing()),
        _ => None,
    }
}

// Nothing listens on the discard port, so the request fails fast.
#[tokio::test]
async fn back_is_refused_while_a_confirmed_deposit_is_in_flight() {
    let client = AccountClient::new("http://127.0.0.1:9/api", None)
        .unwrap()
        .with_token("test-token");
    let mut app = App::new(WalletConfig::default(), None, client, Box::new(RecordingPlatform::default())).unwrap();
    app.shell.splash = None;
    app.shell.session = signed_in(true);

    app.shell.go(ScreenId::Dashboard);
    press(&mut app, KeyCode::Char('d'));
    assert_eq!(app.shell.current(), ScreenId::Deposit);

    // amount, then an empty phone falls back to the account's number
    for c in "12.5".chars() {
        press(&mut app, KeyCode::Char(c));
    }
    press(&mut app, KeyCode::Enter);
    assert_eq!(confirm_processing(&app), Some(false));

    press(&mut app, KeyCode::Enter);
    assert_eq!(confirm_processing(&app), Some(true));

    // locked: neither back nor a second confirm does anything
    assert!(matches!(app.emit_back(), DispatchOutcome::HandlerFailed(_)));
    press(&mut app, KeyCode::Char('y'));
    press(&mut app, KeyCode::Char('n'));
    assert_eq!(confirm_processing(&app), Some(true));
    assert_eq!(app.shell.current(), ScreenId::Deposit);

    let deadline = Instant::now() + Duration::from_secs(20);
    while app.tasks.operation.is_some() && Instant::now() < deadline {
        tokio::time::sleep(Duration::from_millis(20)).await;
        app.tick(Instant::now());
    }

    // the failure is shown in the dialog, which is usable again
    assert_eq!(confirm_processing(&app), Some(false));
    assert!(app.shell.modal_error.is_some());

    assert!(matches!(app.emit_back(), DispatchOutcome::Handled(_)));
    assert!(app.shell.modal.is_none());
    assert!(app.bridge.is_empty());
    assert_eq!(app.shell.current(), ScreenId::Deposit);
}
