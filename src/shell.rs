mod actions;
mod types;
mod ui;

pub use types::*;

use anyhow::Result;
use crossterm::{
    event::{self, Event, KeyCode, KeyEvent, KeyEventKind, KeyModifiers},
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use ratatui::{backend::CrosstermBackend, Terminal};
use std::future::Future;
use std::io;
use std::panic::{self, AssertUnwindSafe};
use std::path::PathBuf;
use std::time::{Duration, Instant};
use tokio::sync::oneshot;
use tracing::{debug, error, info, warn};

use crate::api::AccountClient;
use crate::config::WalletConfig;
use crate::nav::{BackSignal, DispatchOutcome, HardwareBackBridge};
use crate::platform::ExternalActions;

/// Redraw interval when no input arrives (animations, timers, task polling)
const FRAME_INTERVAL: Duration = Duration::from_millis(100);

/// Result of polling a spawned task.
pub(crate) enum TaskPoll<T> {
    Pending,
    Ready(T),
    /// The task went away without answering
    Lost,
}

pub(crate) fn poll_task<T>(slot: &mut Option<oneshot::Receiver<T>>) -> TaskPoll<T> {
    let Some(rx) = slot.as_mut() else {
        return TaskPoll::Pending;
    };
    match rx.try_recv() {
        Ok(value) => {
            *slot = None;
            TaskPoll::Ready(value)
        }
        Err(oneshot::error::TryRecvError::Empty) => TaskPoll::Pending,
        Err(oneshot::error::TryRecvError::Closed) => {
            *slot = None;
            TaskPoll::Lost
        }
    }
}

/// Run `future` on the runtime and hand back a receiver for its output.
pub(crate) fn spawn_task<F>(future: F) -> oneshot::Receiver<F::Output>
where
    F: Future + Send + 'static,
    F::Output: Send + 'static,
{
    let (tx, rx) = oneshot::channel();
    tokio::spawn(async move {
        let _ = tx.send(future.await);
    });
    rx
}

/// Run `f` with panic messages sent to the log instead of stderr, which
/// would draw over the alternate screen. The previous hook is restored
/// before returning.
pub(crate) fn with_panics_logged<R>(f: impl FnOnce() -> R) -> std::thread::Result<R> {
    let original_hook = panic::take_hook();
    panic::set_hook(Box::new(|panic_info| {
        error!("panic: {panic_info}");
    }));

    let result = panic::catch_unwind(AssertUnwindSafe(f));
    panic::set_hook(original_hook);
    result
}

impl App {
    pub fn new(
        config: WalletConfig,
        config_path: Option<PathBuf>,
        client: AccountClient,
        platform: Box<dyn ExternalActions>,
    ) -> Result<Self> {
        let back_signal = BackSignal::attach()?;
        let now = Instant::now();

        let mut app = Self {
            shell: Shell::new(config, now),
            bridge: HardwareBackBridge::new(),
            platform,
            client,
            config_path,
            tasks: PendingTasks::default(),
            subscriptions: OverlaySubscriptions::default(),
            back_signal,
        };

        if app.client.has_token() {
            app.spawn_profile_fetch();
        }

        Ok(app)
    }

    pub fn run(&mut self) -> Result<()> {
        // Setup terminal
        enable_raw_mode()?;
        let mut stdout = io::stdout();
        execute!(stdout, EnterAlternateScreen)?;
        let backend = CrosstermBackend::new(stdout);
        let mut terminal = Terminal::new(backend)?;

        info!("shell started");
        let res = with_panics_logged(|| self.run_app(&mut terminal));

        // Restore terminal
        disable_raw_mode()?;
        execute!(terminal.backend_mut(), LeaveAlternateScreen)?;
        terminal.show_cursor()?;

        let res = match res {
            Ok(res) => res,
            Err(payload) => panic::resume_unwind(payload),
        };

        if let Err(e) = &res {
            warn!("shell stopped with error: {e:#}");
        }
        info!("shell stopped");
        res
    }

    fn run_app(&mut self, terminal: &mut Terminal<CrosstermBackend<io::Stdout>>) -> Result<()> {
        loop {
            let now = Instant::now();
            self.tick(now);

            terminal.draw(|f| self.shell.ui(f, now))?;

            if self.shell.should_quit {
                return Ok(());
            }

            if !event::poll(FRAME_INTERVAL)? {
                continue;
            }

            if let Event::Key(key) = event::read()? {
                // Windows reports both Press and Release
                if key.kind == KeyEventKind::Press {
                    self.handle_key_event(key);
                }
            }
        }
    }

    /// Per-frame housekeeping, run before every draw.
    pub fn tick(&mut self, now: Instant) {
        self.shell.animation_frame = self.shell.animation_frame.wrapping_add(1);

        self.poll_tasks();
        self.finish_splash(now);

        if let Some(Modal::Handoff(flow)) = &mut self.shell.modal {
            flow.on_render(self.platform.as_mut(), &mut self.shell.notices);
        }

        self.shell.notices.prune(now);
        self.settle();
    }

    fn poll_tasks(&mut self) {
        self.poll_login();
        self.poll_profile();
        self.poll_operation();
    }

    pub fn handle_key_event(&mut self, key: KeyEvent) {
        if key.modifiers.contains(KeyModifiers::CONTROL) && key.code == KeyCode::Char('c') {
            self.shell.should_quit = true;
            return;
        }

        if key.code == KeyCode::Esc {
            self.emit_back();
            return;
        }

        if self.shell.splash.is_some() {
            return;
        }

        if self.shell.modal.is_some() {
            self.handle_modal_key(key.code);
        } else if self.shell.menu.open {
            self.handle_menu_key(key.code);
        } else {
            self.handle_screen_key(key.code);
        }

        self.settle();
    }

    /// Route a back signal through the bridge.
    pub fn emit_back(&mut self) -> DispatchOutcome {
        let outcome = self.bridge.emit(&mut self.shell);
        debug!(?outcome, screen = %self.shell.current(), "back signal");

        match outcome {
            DispatchOutcome::Ignored => {
                self.shell.status_message = Some("Already at the start. Press q to quit.".to_string());
            }
            DispatchOutcome::HandlerFailed(_) => {
                self.shell.status_message = Some("Please wait for the current request to finish.".to_string());
            }
            DispatchOutcome::Handled(_) | DispatchOutcome::HistoryBack => {}
        }

        self.settle();
        outcome
    }

    /// Apply transition side effects and keep overlay back handlers in step
    /// with what is open.
    fn settle(&mut self) {
        self.shell.drain_transitions();

        match (self.shell.menu.open, self.subscriptions.menu) {
            (true, None) => {
                let id = self.bridge.register(|shell: &mut Shell| {
                    shell.menu.open = false;
                    Ok(())
                });
                self.subscriptions.menu = Some(id);
            }
            (false, Some(id)) => {
                self.bridge.unregister(id);
                self.subscriptions.menu = None;
            }
            _ => {}
        }

        match (self.shell.modal.is_some(), self.subscriptions.modal) {
            (true, None) => {
                let id = self.bridge.register(Shell::dismiss_modal);
                self.subscriptions.modal = Some(id);
            }
            (false, Some(id)) => {
                self.bridge.unregister(id);
                self.subscriptions.modal = None;
            }
            _ => {}
        }
    }
}
