//! Hardware back bridge.
//!
//! The platform back signal (in the terminal shell: `Esc`) is routed through
//! [`HardwareBackBridge::dispatch`]. Handlers form an ordered stack: the most
//! recently registered one receives the signal, and each is removed by the
//! id it was registered under. With nothing registered the bridge falls
//! back to history, and only when there is history to go back to.

use std::panic::{catch_unwind, AssertUnwindSafe};
use std::sync::atomic::{AtomicBool, Ordering};

use tracing::{debug, warn};

use crate::error::NavError;
use crate::nav::controller::NavigationController;

/// History the bridge falls back to when no handler is registered.
pub trait HistoryFallback {
    fn has_history(&self) -> bool;
    fn history_back(&mut self);
}

impl HistoryFallback for NavigationController {
    fn has_history(&self) -> bool {
        self.can_go_back()
    }

    fn history_back(&mut self) {
        self.back();
    }
}

pub type BackHandler<C> = Box<dyn FnMut(&mut C) -> anyhow::Result<()>>;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct SubscriptionId(u64);

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DispatchOutcome {
    Handled(SubscriptionId),
    /// The handler errored or panicked; nothing else was done.
    HandlerFailed(SubscriptionId),
    HistoryBack,
    Ignored,
}

pub struct HardwareBackBridge<C> {
    handlers: Vec<(SubscriptionId, BackHandler<C>)>,
    next_id: u64,
}

impl<C> Default for HardwareBackBridge<C> {
    fn default() -> Self {
        Self {
            handlers: Vec::new(),
            next_id: 1,
        }
    }
}

impl<C: HistoryFallback> HardwareBackBridge<C> {
    pub fn new() -> Self {
        Self::default()
    }

    /// Put `handler` on top; it receives back signals until unregistered or
    /// covered by a newer registration.
    #[must_use = "keep the id to unregister the handler"]
    pub fn register<F>(&mut self, handler: F) -> SubscriptionId
    where
        F: FnMut(&mut C) -> anyhow::Result<()> + 'static,
    {
        let id = SubscriptionId(self.next_id);
        self.next_id += 1;
        self.handlers.push((id, Box::new(handler)));
        debug!(id = id.0, depth = self.handlers.len(), "back handler registered");
        id
    }

    /// Remove one subscription. Unknown or already removed ids are ignored.
    pub fn unregister(&mut self, id: SubscriptionId) {
        self.handlers.retain(|(handler_id, _)| *handler_id != id);
    }

    pub fn clear(&mut self) {
        self.handlers.clear();
    }

    pub fn is_registered(&self, id: SubscriptionId) -> bool {
        self.handlers.iter().any(|(handler_id, _)| *handler_id == id)
    }

    pub fn len(&self) -> usize {
        self.handlers.len()
    }

    pub fn is_empty(&self) -> bool {
        self.handlers.is_empty()
    }

    pub fn dispatch(&mut self, ctx: &mut C) -> DispatchOutcome {
        let Some((id, handler)) = self.handlers.last_mut() else {
            if ctx.has_history() {
                ctx.history_back();
                return DispatchOutcome::HistoryBack;
            }
            return DispatchOutcome::Ignored;
        };
        let id = *id;

        match catch_unwind(AssertUnwindSafe(|| handler(ctx))) {
            Ok(Ok(())) => DispatchOutcome::Handled(id),
            Ok(Err(e)) => {
                warn!(id = id.0, "back handler failed: {e:#}");
                DispatchOutcome::HandlerFailed(id)
            }
            Err(_) => {
                warn!(id = id.0, "back handler panicked");
                DispatchOutcome::HandlerFailed(id)
            }
        }
    }

    /// Synthetic back signal, for wrappers that produce their own gesture.
    pub fn emit(&mut self, ctx: &mut C) -> DispatchOutcome {
        self.dispatch(ctx)
    }
}

static LISTENER_ATTACHED: AtomicBool = AtomicBool::new(false);

/// Proof that the platform back listener was attached. Only one per process.
#[derive(Debug)]
pub struct BackSignal {
    _attached: (),
}

impl BackSignal {
    pub fn attach() -> Result<Self, NavError> {
        if LISTENER_ATTACHED.swap(true, Ordering::SeqCst) {
            return Err(NavError::ListenerAttached);
        }
        Ok(Self { _attached: () })
    }
}
