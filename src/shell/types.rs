use std::path::PathBuf;
use std::sync::mpsc::Receiver;
use std::time::{Duration, Instant};

use tokio::sync::oneshot;

use crate::api::{AccountClient, LoginResponse, OperationReceipt};
use crate::config::WalletConfig;
use crate::error::ApiError;
use crate::flows::{ActionHandoffFlow, ConfirmationFlow, Notices, OperationType};
use crate::nav::{BackSignal, HardwareBackBridge, HistoryFallback, NavigationController, ScreenId, SubscriptionId, Transition};
use crate::platform::ExternalActions;
use crate::session::{Session, UserProfile};

/// How long the splash progress bar runs.
pub const SPLASH_DURATION: Duration = Duration::from_millis(1500);

pub struct Splash {
    pub started: Instant,
}

impl Splash {
    pub fn new(now: Instant) -> Self {
        Self { started: now }
    }

    /// 0.0 ..= 1.0
    pub fn progress(&self, now: Instant) -> f64 {
        let elapsed = now.saturating_duration_since(self.started).as_secs_f64();
        (elapsed / SPLASH_DURATION.as_secs_f64()).min(1.0)
    }

    pub fn is_done(&self, now: Instant) -> bool {
        self.progress(now) >= 1.0
    }
}

#[derive(Debug, Default)]
pub struct SideMenu {
    pub open: bool,
    pub selected: usize,
}

/// At most one dialog is open at a time.
#[derive(Debug)]
pub enum Modal {
    Handoff(ActionHandoffFlow),
    Confirm(ConfirmationFlow),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LoginField {
    Phone,
    Password,
}

#[derive(Debug)]
pub struct LoginForm {
    pub phone: String,
    pub password: String,
    pub focused: LoginField,
    pub errors: Vec<(String, String)>,
}

impl Default for LoginForm {
    fn default() -> Self {
        Self {
            phone: String::new(),
            password: String::new(),
            focused: LoginField::Phone,
            errors: Vec::new(),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MoneyField {
    Amount,
    Phone,
    Network,
}

/// Deposit / withdraw form.
#[derive(Debug)]
pub struct MoneyForm {
    pub amount: String,
    pub phone: String,
    pub network_index: usize,
    pub focused: MoneyField,
}

impl Default for MoneyForm {
    fn default() -> Self {
        Self {
            amount: String::new(),
            phone: String::new(),
            network_index: 0,
            focused: MoneyField::Amount,
        }
    }
}

/// Results of spawned API calls, polled once per frame.
#[derive(Default)]
pub struct PendingTasks {
    pub login: Option<oneshot::Receiver<Result<LoginResponse, ApiError>>>,
    pub profile: Option<oneshot::Receiver<Result<UserProfile, ApiError>>>,
    pub operation: Option<oneshot::Receiver<Result<OperationReceipt, ApiError>>>,
}

/// Back-handler subscriptions owned by open overlays.
#[derive(Debug, Default)]
pub struct OverlaySubscriptions {
    pub menu: Option<SubscriptionId>,
    pub modal: Option<SubscriptionId>,
}

/// Everything the screens read and the back handlers may touch.
pub struct Shell {
    pub nav: NavigationController,
    pub session: Session,
    pub config: WalletConfig,
    pub notices: Notices,
    pub menu: SideMenu,
    pub modal: Option<Modal>,
    pub modal_error: Option<String>,
    pub splash: Option<Splash>,
    pub login_form: LoginForm,
    pub money_form: MoneyForm,
    pub recharge_code: String,
    pub last_receipt: Option<OperationReceipt>,
    pub status_message: Option<String>,
    pub should_quit: bool,
    pub transitions: Receiver<Transition>,
    pub animation_frame: u8,
}

impl Shell {
    pub fn new(config: WalletConfig, now: Instant) -> Self {
        let mut nav = NavigationController::new(ScreenId::Landing);
        let transitions = nav.subscribe();

        Self {
            nav,
            session: Session::anonymous(),
            config,
            notices: Notices::new(),
            menu: SideMenu::default(),
            modal: None,
            modal_error: None,
            splash: Some(Splash::new(now)),
            login_form: LoginForm::default(),
            money_form: MoneyForm::default(),
            recharge_code: String::new(),
            last_receipt: None,
            status_message: None,
            should_quit: false,
            transitions,
            animation_frame: 0,
        }
    }

    pub fn current(&self) -> ScreenId {
        self.nav.current()
    }

    /// Navigate with the current session.
    pub fn go(&mut self, target: ScreenId) {
        self.nav.navigate(target, &self.session);
    }

    /// Operation behind the money form on the current screen.
    pub fn money_operation(&self) -> Option<OperationType> {
        match self.current() {
            ScreenId::Deposit => Some(OperationType::Deposit),
            ScreenId::Withdraw => Some(OperationType::Withdrawal),
            _ => None,
        }
    }

    /// Apply transition side effects: the side menu never survives one.
    pub fn drain_transitions(&mut self) {
        for transition in self.transitions.try_iter() {
            self.menu.open = false;
            if transition.from != transition.to {
                self.status_message = None;
            }
        }
    }
}

impl HistoryFallback for Shell {
    fn has_history(&self) -> bool {
        self.nav.can_go_back()
    }

    fn history_back(&mut self) {
        self.nav.back();
    }
}

pub struct App {
    pub shell: Shell,
    pub bridge: HardwareBackBridge<Shell>,
    pub platform: Box<dyn ExternalActions>,
    pub client: AccountClient,
    /// Where session changes are persisted; `None` keeps them in memory
    pub config_path: Option<PathBuf>,
    pub tasks: PendingTasks,
    pub subscriptions: OverlaySubscriptions,
    pub back_signal: BackSignal,
}
