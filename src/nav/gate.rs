use crate::nav::screen::{Requirement, ScreenId};
use crate::session::Session;

/// Outcome of a reachability check.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Decision {
    Allow,
    DenyToPermissionDenied,
    DenyToLogin,
}

impl Decision {
    /// Screen shown instead of the requested one, if denied.
    pub fn redirect(self) -> Option<ScreenId> {
        match self {
            Decision::Allow => None,
            Decision::DenyToPermissionDenied => Some(ScreenId::PermissionDenied),
            Decision::DenyToLogin => Some(ScreenId::Login),
        }
    }

    pub fn is_allowed(self) -> bool {
        self == Decision::Allow
    }
}

/// Pure reachability check over the static screen table.
#[derive(Debug, Clone, Copy, Default)]
pub struct SessionGate;

impl SessionGate {
    pub fn authorize(&self, target: ScreenId, session: &Session) -> Decision {
        match target.requirement() {
            Requirement::Public => Decision::Allow,
            _ if !session.is_authenticated => Decision::DenyToLogin,
            Requirement::Authenticated => Decision::Allow,
            Requirement::Capability(capability) => {
                if session.has_capability(capability) {
                    Decision::Allow
                } else {
                    Decision::DenyToPermissionDenied
                }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::session::test_profile;

    #[test]
    fn public_screens_are_always_allowed() {
        let gate = SessionGate;
        for screen in [ScreenId::Landing, ScreenId::Login, ScreenId::PermissionDenied] {
            assert_eq!(gate.authorize(screen, &Session::anonymous()), Decision::Allow);
        }
    }

    #[test]
    fn protected_screens_never_allow_anonymous() {
        let gate = SessionGate;
        let anonymous = Session::anonymous();
        for screen in ScreenId::ALL {
            if screen.requirement() != Requirement::Public {
                assert_eq!(gate.authorize(screen, &anonymous), Decision::DenyToLogin, "{screen}");
            }
        }
    }

    #[test]
    fn missing_capability_routes_to_permission_denied() {
        let gate = SessionGate;
        let unverified = Session::authenticated(test_profile(false));

        assert_eq!(gate.authorize(ScreenId::Deposit, &unverified), Decision::Allow);
        let decision = gate.authorize(ScreenId::Withdraw, &unverified);
        assert_eq!(decision, Decision::DenyToPermissionDenied);
        assert_eq!(decision.redirect(), Some(ScreenId::PermissionDenied));

        let verified = Session::authenticated(test_profile(true));
        assert!(gate.authorize(ScreenId::Withdraw, &verified).is_allowed());
    }

    #[test]
    fn flag_without_profile_still_gets_plain_screens() {
        let session = Session { user: None, is_authenticated: true };
        assert_eq!(SessionGate.authorize(ScreenId::History, &session), Decision::Allow);
        assert_eq!(
            SessionGate.authorize(ScreenId::Transfer, &session),
            Decision::DenyToPermissionDenied
        );
    }
}
