pub mod session;
mod state;
pub mod timer;

use std::time::{Duration, Instant};

use crate::journals::JournalMapping;
use crate::presenter::{LoginView, TimerView};
pub use session::Session;
pub use state::*;
use timer::TimerModel;

const TICK_INTERVAL: Duration = Duration::from_secs(1);

pub enum Screen {
    Login(LoginView),
    Timer(TimerView),
}

/// Modal shown above the current screen. Keys go to the overlay until it is dismissed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Overlay {
    Notice(Notice),
    ConfirmReset,
}

pub struct App {
    pub running: bool,
    pub screen: Screen,
    pub overlay: Option<Overlay>,
    pub status_message: Option<String>,
    semesters: Vec<String>,
    next_tick: Option<Instant>,
}

impl App {
    pub fn new(journals: JournalMapping, semesters: Vec<String>) -> Self {
        Self {
            running: true,
            screen: Screen::Login(LoginView::new(journals)),
            overlay: None,
            status_message: None,
            semesters,
            next_tick: None,
        }
    }

    pub fn quit(&mut self) {
        self.running = false;
    }

    pub fn set_status(&mut self, message: impl Into<String>) {
        self.status_message = Some(message.into());
    }

    pub fn clear_status(&mut self) {
        self.status_message = None;
    }

    pub fn notify(&mut self, notice: Notice) {
        self.overlay = Some(Overlay::Notice(notice));
    }

    pub fn dismiss_overlay(&mut self) {
        self.overlay = None;
    }

    pub fn login_view_mut(&mut self) -> Option<&mut LoginView> {
        match &mut self.screen {
            Screen::Login(view) => Some(view),
            Screen::Timer(_) => None,
        }
    }

    pub fn timer_view(&self) -> Option<&TimerView> {
        match &self.screen {
            Screen::Timer(view) => Some(view),
            Screen::Login(_) => None,
        }
    }

    pub fn timer_view_mut(&mut self) -> Option<&mut TimerView> {
        match &mut self.screen {
            Screen::Timer(view) => Some(view),
            Screen::Login(_) => None,
        }
    }

    /// Replace the login screen with the timer screen for `session`. Its controls are empty
    /// until the view is synced.
    pub fn enter_timer(&mut self, session: Session) {
        let model = TimerModel::new(session, self.semesters.clone());
        self.screen = Screen::Timer(TimerView::new(model));
        self.next_tick = None;
        self.clear_status();
    }

    pub fn start_timer(&mut self) {
        if let Some(view) = self.timer_view_mut() {
            view.start_timer();
            self.next_tick = Some(Instant::now() + TICK_INTERVAL);
        }
    }

    pub fn pause_timer(&mut self) {
        if let Some(view) = self.timer_view_mut() {
            view.pause_timer();
        }
        self.next_tick = None;
    }

    /// Deliver every whole-second tick due by `now`.
    pub fn advance_clock(&mut self, now: Instant) {
        let Some(mut due) = self.next_tick else {
            return;
        };
        let Screen::Timer(view) = &mut self.screen else {
            return;
        };
        while now >= due {
            view.tick();
            due += TICK_INTERVAL;
        }
        self.next_tick = Some(due);
    }
}
