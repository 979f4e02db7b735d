//! Screen stack owned by the shell.
//!
//! Every screen and the side menu go through [`NavigationController`]; the
//! stack is never empty and its first entry (the root) is never popped.

use std::sync::mpsc::{channel, Receiver, Sender};

use tracing::{debug, warn};

use crate::nav::gate::{Decision, SessionGate};
use crate::nav::screen::ScreenId;
use crate::session::Session;

/// A change of the current screen, broadcast to subscribers.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Transition {
    pub from: ScreenId,
    pub to: ScreenId,
    pub kind: TransitionKind,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TransitionKind {
    Push,
    Redirect,
    Back,
    Reset,
}

/// The last navigation request the gate turned down.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Rejection {
    pub target: ScreenId,
    pub decision: Decision,
}

pub struct NavigationController {
    stack: Vec<ScreenId>,
    gate: SessionGate,
    subscribers: Vec<Sender<Transition>>,
    last_rejection: Option<Rejection>,
}

impl NavigationController {
    pub fn new(root: ScreenId) -> Self {
        Self::with_gate(root, SessionGate)
    }

    pub fn with_gate(root: ScreenId, gate: SessionGate) -> Self {
        Self {
            stack: vec![root],
            gate,
            subscribers: Vec::new(),
            last_rejection: None,
        }
    }

    pub fn stack(&self) -> &[ScreenId] {
        &self.stack
    }

    pub fn root(&self) -> ScreenId {
        self.stack[0]
    }

    pub fn current(&self) -> ScreenId {
        self.stack[self.stack.len() - 1]
    }

    pub fn depth(&self) -> usize {
        self.stack.len()
    }

    pub fn can_go_back(&self) -> bool {
        self.stack.len() > 1
    }

    pub fn last_rejection(&self) -> Option<Rejection> {
        self.last_rejection
    }

    /// Receive every successful transition from now on.
    pub fn subscribe(&mut self) -> Receiver<Transition> {
        let (tx, rx) = channel();
        self.subscribers.push(tx);
        rx
    }

    /// Push `target`, or the gate's redirect screen when it is not reachable.
    pub fn navigate(&mut self, target: ScreenId, session: &Session) -> &[ScreenId] {
        let decision = self.gate.authorize(target, session);

        let (screen, kind) = match decision.redirect() {
            None => (target, TransitionKind::Push),
            Some(redirect) => {
                warn!(screen = %target, redirect = %redirect, "navigation denied");
                self.last_rejection = Some(Rejection { target, decision });
                (redirect, TransitionKind::Redirect)
            }
        };

        if screen != self.current() {
            let from = self.current();
            self.stack.push(screen);
            self.notify(Transition { from, to: screen, kind });
        }
        &self.stack
    }

    /// String-keyed entry point. Unknown ids leave the stack untouched.
    pub fn navigate_named(&mut self, target: &str, session: &Session) -> &[ScreenId] {
        match target.parse::<ScreenId>() {
            Ok(screen) => self.navigate(screen, session),
            Err(e) => {
                warn!("{e}, ignoring navigation request");
                &self.stack[..]
            }
        }
    }

    /// Pop the current screen. At the root this does nothing.
    pub fn back(&mut self) -> &[ScreenId] {
        if self.can_go_back() {
            let from = self.current();
            self.stack.pop();
            let to = self.current();
            self.notify(Transition { from, to, kind: TransitionKind::Back });
        }
        &self.stack
    }

    /// Drop everything above the root and show `target` on top of it.
    pub fn reset_to(&mut self, target: ScreenId) -> &[ScreenId] {
        let from = self.current();
        self.stack.truncate(1);
        if target != self.root() {
            self.stack.push(target);
        }
        self.last_rejection = None;
        self.notify(Transition { from, to: target, kind: TransitionKind::Reset });
        &self.stack
    }

    fn notify(&mut self, transition: Transition) {
        debug!(from = %transition.from, to = %transition.to, kind = ?transition.kind, "screen transition");
        self.subscribers.retain(|tx| tx.send(transition).is_ok());
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::session::test_profile;

    fn signed_in() -> Session {
        Session::authenticated(test_profile(true))
    }

    #[test]
    fn starts_at_root() {
        let nav = NavigationController::new(ScreenId::Landing);
        assert_eq!(nav.stack(), &[ScreenId::Landing]);
        assert!(!nav.can_go_back());
    }

    #[test]
    fn navigate_pushes_reachable_screen() {
        let mut nav = NavigationController::new(ScreenId::Landing);
        let session = signed_in();
        nav.navigate(ScreenId::Dashboard, &session);
        let stack = nav.navigate(ScreenId::Deposit, &session);
        assert_eq!(stack, &[ScreenId::Landing, ScreenId::Dashboard, ScreenId::Deposit]);
    }

    #[test]
    fn navigating_to_current_screen_is_idempotent() {
        let mut nav = NavigationController::new(ScreenId::Landing);
        let session = signed_in();
        let rx = nav.subscribe();

        nav.navigate(ScreenId::History, &session);
        nav.navigate(ScreenId::History, &session);

        assert_eq!(nav.stack(), &[ScreenId::Landing, ScreenId::History]);
        assert_eq!(rx.try_iter().count(), 1);
    }

    #[test]
    fn denied_navigation_pushes_redirect_and_records_target() {
        let mut nav = NavigationController::new(ScreenId::Landing);
        let stack = nav.navigate(ScreenId::Withdraw, &Session::anonymous());
        assert_eq!(stack, &[ScreenId::Landing, ScreenId::Login]);

        let rejection = nav.last_rejection().unwrap();
        assert_eq!(rejection.target, ScreenId::Withdraw);
        assert_eq!(rejection.decision, Decision::DenyToLogin);
    }

    #[test]
    fn unknown_named_target_is_a_noop() {
        let mut nav = NavigationController::new(ScreenId::Landing);
        let rx = nav.subscribe();
        let stack = nav.navigate_named("crypto-swap", &signed_in()).to_vec();
        assert_eq!(stack, vec![ScreenId::Landing]);
        assert!(rx.try_recv().is_err());

        nav.navigate_named("history", &signed_in());
        assert_eq!(nav.current(), ScreenId::History);
    }

    #[test]
    fn back_at_root_is_a_noop() {
        let mut nav = NavigationController::new(ScreenId::Landing);
        let rx = nav.subscribe();
        assert_eq!(nav.back(), &[ScreenId::Landing]);
        assert!(rx.try_recv().is_err());
    }

    #[test]
    fn reset_keeps_only_root_and_target() {
        let mut nav = NavigationController::new(ScreenId::Landing);
        let session = signed_in();
        for screen in [ScreenId::Dashboard, ScreenId::Settings, ScreenId::Profile] {
            nav.navigate(screen, &session);
        }

        assert_eq!(nav.reset_to(ScreenId::Dashboard), &[ScreenId::Landing, ScreenId::Dashboard]);
        assert_eq!(nav.reset_to(ScreenId::Landing), &[ScreenId::Landing]);
    }

    #[test]
    fn subscribers_see_transitions_and_dropped_ones_are_pruned() {
        let mut nav = NavigationController::new(ScreenId::Landing);
        let session = signed_in();
        let rx = nav.subscribe();
        let dropped = nav.subscribe();
        drop(dropped);

        nav.navigate(ScreenId::Dashboard, &session);
        nav.back();

        let seen: Vec<_> = rx.try_iter().collect();
        assert_eq!(seen.len(), 2);
        assert_eq!(seen[0].kind, TransitionKind::Push);
        assert_eq!(seen[1], Transition {
            from: ScreenId::Dashboard,
            to: ScreenId::Landing,
            kind: TransitionKind::Back,
        });
        assert_eq!(nav.subscribers.len(), 1);
    }
}
