mod common;

use std::time::{Duration, Instant};

use momo_wallet::flows::{
    ActionHandoffFlow, ConfirmationFlow, HandoffOutcome, HandoffStatus, Notices, OperationType, COPIED_RESET,
};
use momo_wallet::nav::{
    DispatchOutcome, HardwareBackBridge, HistoryFallback, NavigationController, ScreenId, TransitionKind,
};
use momo_wallet::session::Session;

use common::{signed_in, RecordingPlatform};

#[test]
fn withdraw_while_signed_out_lands_on_login() {
    let mut nav = NavigationController::new(ScreenId::Landing);
    let transitions = nav.subscribe();

    let stack = nav.navigate(ScreenId::Withdraw, &Session::anonymous()).to_vec();

    assert_eq!(stack, vec![ScreenId::Landing, ScreenId::Login]);
    let transition = transitions.try_recv().unwrap();
    assert_eq!(transition.kind, TransitionKind::Redirect);
    assert_eq!(nav.last_rejection().map(|r| r.target), Some(ScreenId::Withdraw));
}

#[test]
fn unverified_account_is_sent_to_permission_denied() {
    let mut nav = NavigationController::new(ScreenId::Landing);
    let session = signed_in(false);

    nav.navigate(ScreenId::Dashboard, &session);
    nav.navigate(ScreenId::Transfer, &session);
    assert_eq!(nav.current(), ScreenId::PermissionDenied);

    // back returns to where the user came from
    nav.back();
    assert_eq!(nav.current(), ScreenId::Dashboard);

    nav.navigate(ScreenId::Transfer, &signed_in(true));
    assert_eq!(nav.current(), ScreenId::Transfer);
}

#[test]
fn ussd_code_is_dialed_once_and_copied() {
    let platform = RecordingPlatform::default();
    let mut actions = platform.clone();
    let mut notices = Notices::new();

    let mut flow = ActionHandoffFlow::dial("*123#").unwrap();
    flow.open(&mut actions, &mut notices);
    // a few redraws of the open dialog
    for _ in 0..3 {
        flow.on_render(&mut actions, &mut notices);
    }

    let now = Instant::now();
    assert!(flow.copy(&mut actions, &mut notices, now));

    {
        let log = platform.log.borrow();
        assert_eq!(log.dialed, vec!["tel:*123#".to_string()]);
        assert_eq!(log.clipboard.as_deref(), Some("*123#"));
    }
    assert!(flow.is_copied(now + Duration::from_millis(500)));
    assert!(!flow.is_copied(now + COPIED_RESET + Duration::from_millis(1)));
    assert_eq!(flow.status(), HandoffStatus::Attempted);
    assert!(notices.is_empty());

    assert_eq!(flow.proceed(), HandoffOutcome::Continue);
}

#[test]
fn payment_link_opens_in_browser() {
    let platform = RecordingPlatform::default();
    let mut actions = platform.clone();
    let mut notices = Notices::new();

    let mut flow = ActionHandoffFlow::redirect("https://pay.example.com/checkout?ref=A1").unwrap();
    flow.open(&mut actions, &mut notices);

    assert_eq!(platform.log.borrow().opened, vec!["https://pay.example.com/checkout?ref=A1".to_string()]);
    assert!(platform.log.borrow().dialed.is_empty());
    assert_eq!(flow.attempt_label(), "Reopen link");
}

#[test]
fn second_confirm_while_processing_does_nothing() {
    let mut flow = ConfirmationFlow::new(OperationType::Deposit, "25.00", "+233244000111", None);

    let first = flow.confirm();
    let second = flow.confirm();

    assert!(first.is_some());
    assert!(second.is_none());
    assert!(!flow.actions_enabled());
    assert_eq!(first.map(|r| r.path()), Some("deposit"));
}

/// Stands in for the shell: a navigation stack plus an overlay flag.
struct Screen {
    nav: NavigationController,
    session: Session,
    menu_open: bool,
}

impl HistoryFallback for Screen {
    fn has_history(&self) -> bool {
        self.nav.can_go_back()
    }

    fn history_back(&mut self) {
        self.nav.back();
    }
}

#[test]
fn back_presses_close_overlays_before_leaving_screens() {
    let mut screen = Screen {
        nav: NavigationController::new(ScreenId::Landing),
        session: signed_in(true),
        menu_open: false,
    };
    let session = screen.session.clone();
    screen.nav.navigate(ScreenId::Dashboard, &session);
    screen.nav.navigate(ScreenId::Deposit, &session);

    let mut bridge = HardwareBackBridge::<Screen>::new();

    // a page-level handler, then the menu covering it
    let page = bridge.register(|s: &mut Screen| {
        s.nav.reset_to(ScreenId::Dashboard);
        Ok(())
    });
    screen.menu_open = true;
    let menu = bridge.register(|s: &mut Screen| {
        s.menu_open = false;
        Ok(())
    });

    assert_eq!(bridge.emit(&mut screen), DispatchOutcome::Handled(menu));
    assert!(!screen.menu_open);
    assert_eq!(screen.nav.current(), ScreenId::Deposit);

    bridge.unregister(menu);
    assert_eq!(bridge.emit(&mut screen), DispatchOutcome::Handled(page));
    assert_eq!(screen.nav.stack(), &[ScreenId::Landing, ScreenId::Dashboard]);

    bridge.unregister(page);
    assert_eq!(bridge.emit(&mut screen), DispatchOutcome::HistoryBack);
    assert_eq!(bridge.emit(&mut screen), DispatchOutcome::Ignored);
    assert_eq!(screen.nav.stack(), &[ScreenId::Landing]);
}

#[test]
fn failing_handler_is_contained() {
    let mut screen = Screen {
        nav: NavigationController::new(ScreenId::Landing),
        session: Session::anonymous(),
        menu_open: false,
    };
    let session = screen.session.clone();
    screen.nav.navigate(ScreenId::Login, &session);

    let mut bridge = HardwareBackBridge::<Screen>::new();
    let busy = bridge.register(|_: &mut Screen| anyhow::bail!("request in flight"));

    assert_eq!(bridge.emit(&mut screen), DispatchOutcome::HandlerFailed(busy));
    // nothing moved
    assert_eq!(screen.nav.current(), ScreenId::Login);
}
