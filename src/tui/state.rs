//! UI state and its reducer
//!
//! All screen, modal and selection state lives in one [`UiState`] value.
//! Key presses are turned into [`Action`]s and folded in by [`reduce`],
//! which never does I/O: anything that needs storage, the PIN hash or the
//! advisor comes back as an [`Effect`] for the app loop to run, and its
//! outcome is fed back in as another action.

use crate::advisor::AdviceResponse;
use crate::crypto::{SecureString, PIN_LENGTH};
use crate::models::{BudgetScope, MonthRef};

/// Top-level screen
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Screen {
    /// PIN pad; nothing else is reachable
    Locked,
    /// Monthly summary
    Summary,
}

/// Overlay shown above the summary
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Modal {
    None,
    Help,
    /// Waiting for y/n before cleaning the shown month
    ConfirmClean(MonthRef),
    Advice(AdviceResponse),
    Message(String),
}

/// Which budget tree the summary table shows
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TreeTab {
    Permanent,
    Temporary,
}

impl TreeTab {
    pub fn scope(self) -> BudgetScope {
        match self {
            Self::Permanent => BudgetScope::Permanent,
            Self::Temporary => BudgetScope::Temporary,
        }
    }

    fn toggled(self) -> Self {
        match self {
            Self::Permanent => Self::Temporary,
            Self::Temporary => Self::Permanent,
        }
    }
}

/// Everything that can change the UI
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Action {
    PinDigit(char),
    PinBackspace,
    PinSubmit,
    Unlocked,
    UnlockFailed(String),
    PrevMonth,
    NextMonth,
    ThisMonth,
    ToggleTab,
    SelectUp,
    SelectDown,
    /// Number of rows now in the table, after data changed
    RowsChanged(usize),
    OpenHelp,
    RequestClean,
    Confirm,
    Cancel,
    RequestAdvice,
    AdviceReady(AdviceResponse),
    Export,
    Notify(String),
    Quit,
}

/// Work the app loop has to do on behalf of the reducer
#[derive(Debug)]
pub enum Effect {
    VerifyPin(SecureString),
    CleanMonth(MonthRef),
    RequestAdvice(MonthRef),
    /// Write the current-month CSV report
    Export,
}

/// The whole UI state
#[derive(Debug)]
pub struct UiState {
    pub screen: Screen,
    pub modal: Modal,
    pub month: MonthRef,
    pub tab: TreeTab,
    pub selected: usize,
    pub rows: usize,
    pub pin_input: SecureString,
    pub status: Option<String>,
    pub should_quit: bool,
}

impl UiState {
    /// Start locked when a PIN is set, on the summary otherwise
    pub fn new(locked: bool, month: MonthRef) -> Self {
        Self {
            screen: if locked { Screen::Locked } else { Screen::Summary },
            modal: Modal::None,
            month,
            tab: TreeTab::Permanent,
            selected: 0,
            rows: 0,
            pin_input: SecureString::default(),
            status: None,
            should_quit: false,
        }
    }

    pub fn has_modal(&self) -> bool {
        self.modal != Modal::None
    }
}

fn reduce_locked(state: &mut UiState, action: Action) -> Option<Effect> {
    match action {
        Action::PinDigit(c) if c.is_ascii_digit() && state.pin_input.len() < PIN_LENGTH => {
            state.pin_input.push(c);
            None
        }
        Action::PinBackspace => {
            state.pin_input.pop();
            None
        }
        Action::PinSubmit if state.pin_input.len() == PIN_LENGTH => {
            let entered = std::mem::take(&mut state.pin_input);
            Some(Effect::VerifyPin(entered))
        }
        Action::Unlocked => {
            state.screen = Screen::Summary;
            state.status = None;
            None
        }
        Action::UnlockFailed(message) => {
            state.pin_input.clear();
            state.status = Some(message);
            None
        }
        Action::Quit => {
            state.should_quit = true;
            None
        }
        _ => None,
    }
}

fn reduce_modal(state: &mut UiState, action: Action) -> Option<Effect> {
    let cleaning = match state.modal {
        Modal::ConfirmClean(month) => Some(month),
        _ => None,
    };

    match action {
        Action::Confirm => {
            state.modal = Modal::None;
            cleaning.map(Effect::CleanMonth)
        }
        Action::Cancel => {
            state.modal = Modal::None;
            None
        }
        Action::AdviceReady(advice) => {
            state.status = None;
            state.modal = Modal::Advice(advice);
            None
        }
        Action::Notify(message) => {
            state.modal = Modal::Message(message);
            None
        }
        Action::RowsChanged(rows) => {
            set_rows(state, rows);
            None
        }
        Action::Quit => {
            state.should_quit = true;
            None
        }
        _ => None,
    }
}

fn set_rows(state: &mut UiState, rows: usize) {
    state.rows = rows;
    state.selected = state.selected.min(rows.saturating_sub(1));
}

fn change_month(state: &mut UiState, month: MonthRef) {
    state.month = month;
    state.selected = 0;
    state.status = None;
}

/// Apply `action` to `state`, returning any work it asks for
pub fn reduce(state: &mut UiState, action: Action) -> Option<Effect> {
    if state.screen == Screen::Locked {
        return reduce_locked(state, action);
    }
    if state.has_modal() {
        return reduce_modal(state, action);
    }

    match action {
        Action::PrevMonth => change_month(state, state.month.prev()),
        Action::NextMonth => change_month(state, state.month.next()),
        Action::ThisMonth => change_month(state, MonthRef::current()),
        Action::ToggleTab => {
            state.tab = state.tab.toggled();
            state.selected = 0;
        }
        Action::SelectUp => state.selected = state.selected.saturating_sub(1),
        Action::SelectDown => {
            if state.selected + 1 < state.rows {
                state.selected += 1;
            }
        }
        Action::RowsChanged(rows) => set_rows(state, rows),
        Action::OpenHelp => state.modal = Modal::Help,
        Action::RequestClean => state.modal = Modal::ConfirmClean(state.month),
        Action::RequestAdvice => {
            state.status = Some("Asking the advisor...".into());
            return Some(Effect::RequestAdvice(state.month));
        }
        Action::AdviceReady(advice) => {
            state.status = None;
            state.modal = Modal::Advice(advice);
        }
        Action::Export => return Some(Effect::Export),
        Action::Notify(message) => state.status = Some(message),
        Action::Quit => state.should_quit = true,
        Action::PinDigit(_)
        | Action::PinBackspace
        | Action::PinSubmit
        | Action::Unlocked
        | Action::UnlockFailed(_)
        | Action::Confirm
        | Action::Cancel => {}
    }
    None
}
