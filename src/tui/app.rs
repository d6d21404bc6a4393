//! Application state for the TUI
//!
//! The App owns the reducer state and a live copy of the data. Storage
//! pushes a snapshot after every write; [`App::on_tick`] folds pending
//! snapshots in, so the summary follows changes without reloading.

use std::sync::mpsc;
use std::thread;

use chrono::Local;

use crate::advisor::{request_advice, AdviceResponse, CommandProvider};
use crate::config::settings::Settings;
use crate::crypto::unlock;
use crate::display::format_clean_report;
use crate::error::HearthResult;
use crate::export::{export_to_dir, ExportWindow};
use crate::models::{CategoryRollup, MonthRef};
use crate::services::{monthly_overview, CleanerService, MonthlyOverview};
use crate::storage::Storage;
use crate::sync::{LiveState, Subscription};

use super::state::{reduce, Action, Effect, TreeTab, UiState};

/// Main application state
pub struct App<'a> {
    pub storage: &'a Storage,
    pub settings: &'a Settings,
    pub state: UiState,
    pub live: LiveState,
    subscription: Subscription,
    pending_advice: Option<mpsc::Receiver<HearthResult<AdviceResponse>>>,
}

impl<'a> App<'a> {
    pub fn new(storage: &'a Storage, settings: &'a Settings) -> HearthResult<Self> {
        let subscription = storage.subscribe();
        let live = storage.snapshot()?;

        let mut app = Self {
            storage,
            settings,
            state: UiState::new(settings.has_pin(), MonthRef::current()),
            live,
            subscription,
            pending_advice: None,
        };
        app.refresh_rows();
        Ok(app)
    }

    /// Overview of the month on screen
    pub fn overview(&self) -> MonthlyOverview {
        monthly_overview(&self.live, self.state.month)
    }

    /// Roll-ups of the tab on screen
    pub fn rollups(overview: &MonthlyOverview, tab: TreeTab) -> &[CategoryRollup] {
        match tab {
            TreeTab::Permanent => &overview.permanent,
            TreeTab::Temporary => &overview.temporary,
        }
    }

    /// Rows the summary table shows: one per category plus one per line
    fn table_rows(&self) -> usize {
        let overview = self.overview();
        Self::rollups(&overview, self.state.tab)
            .iter()
            .map(|r| 1 + r.lines.len())
            .sum()
    }

    fn refresh_rows(&mut self) {
        let rows = self.table_rows();
        if rows != self.state.rows {
            self.dispatch(Action::RowsChanged(rows));
        }
    }

    /// Fold an action into the state and run whatever it asks for
    pub fn dispatch(&mut self, action: Action) {
        let mut next = Some(action);
        while let Some(action) = next.take() {
            let month_before = (self.state.month, self.state.tab);
            next = reduce(&mut self.state, action).and_then(|effect| self.run(effect));
            if month_before != (self.state.month, self.state.tab) && next.is_none() {
                let rows = self.table_rows();
                next = Some(Action::RowsChanged(rows));
            }
        }
    }

    /// Apply pushed snapshots and finished advice requests
    pub fn on_tick(&mut self) {
        if self.subscription.drain_into(&mut self.live) > 0 {
            self.refresh_rows();
        }

        let finished = self
            .pending_advice
            .as_ref()
            .and_then(|rx| rx.try_recv().ok());
        if let Some(result) = finished {
            self.pending_advice = None;
            self.dispatch(match result {
                Ok(advice) => Action::AdviceReady(advice),
                Err(e) => Action::Notify(format!("Could not get advice: {}", e)),
            });
        }
    }

    fn run(&mut self, effect: Effect) -> Option<Action> {
        match effect {
            Effect::VerifyPin(pin) => match unlock(self.settings.pin_hash.as_deref(), Some(pin.as_str())) {
                Ok(()) => Some(Action::Unlocked),
                Err(e) => Some(Action::UnlockFailed(e.to_string())),
            },

            Effect::CleanMonth(month) => {
                let service = CleanerService::new(self.storage, self.settings.effective_batch_size());
                let result = service
                    .plan(month.first_day(), month.last_day())
                    .and_then(|plan| service.execute(&plan, true));
                Some(Action::Notify(match result {
                    Ok(report) => format_clean_report(&report).trim_end().to_string(),
                    Err(e) => format!("Clean failed: {}", e),
                }))
            }

            Effect::RequestAdvice(month) => {
                let Some(command) = self.settings.advisor_command.clone() else {
                    return Some(Action::Notify(
                        "No advisor configured (advisor_command in settings)".into(),
                    ));
                };
                if self.pending_advice.is_some() {
                    return None;
                }

                let lines: Vec<_> = monthly_overview(&self.live, month).lines().cloned().collect();
                let (sender, receiver) = mpsc::channel();
                thread::spawn(move || {
                    let result = request_advice(&CommandProvider::new(command), &lines);
                    let _ = sender.send(result);
                });
                self.pending_advice = Some(receiver);
                None
            }

            Effect::Export => {
                let today = Local::now().date_naive();
                let dir = std::path::Path::new(".");
                Some(Action::Notify(
                    match export_to_dir(&self.live, self.settings, ExportWindow::CurrentMonth, today, dir) {
                        Ok((path, _)) => format!("Exported {}", path.display()),
                        Err(e) => format!("Export failed: {}", e),
                    },
                ))
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::paths::HearthPaths;
    use crate::models::{Money, SubcategoryKey};
    use crate::services::CategoryService;
    use crate::tui::state::Screen;
    use tempfile::TempDir;

    fn create_test_storage() -> (TempDir, Storage) {
        let temp_dir = TempDir::new().unwrap();
        let paths = HearthPaths::with_base_dir(temp_dir.path().to_path_buf());
        let storage = Storage::new(paths).unwrap();
        storage.load_all().unwrap();
        (temp_dir, storage)
    }

    #[test]
    fn test_live_updates_reach_the_table() {
        let (_temp_dir, storage) = create_test_storage();
        let settings = Settings::default();
        let mut app = App::new(&storage, &settings).unwrap();
        assert_eq!(app.state.rows, 0);

        let service = CategoryService::new(&storage);
        let key = SubcategoryKey::new("Hogar", "Luz");
        service.add_subcategory(crate::models::BudgetScope::Permanent, &key).unwrap();
        service.set_budget(&key, Money::from_units(30000)).unwrap();

        app.on_tick();
        assert_eq!(app.state.rows, 2);
        let budgeted: i64 = app.overview().lines().map(|l| l.budgeted.units()).sum();
        assert_eq!(budgeted, 30000);
    }

    #[test]
    fn test_pin_unlocks() {
        let (_temp_dir, storage) = create_test_storage();
        let mut settings = Settings::default();
        settings.pin_hash = Some(crate::crypto::hash_pin("0420").unwrap());
        let mut app = App::new(&storage, &settings).unwrap();
        assert_eq!(app.state.screen, Screen::Locked);

        for c in "1111".chars() {
            app.dispatch(Action::PinDigit(c));
        }
        app.dispatch(Action::PinSubmit);
        assert_eq!(app.state.screen, Screen::Locked);
        assert!(app.state.status.is_some());

        for c in "0420".chars() {
            app.dispatch(Action::PinDigit(c));
        }
        app.dispatch(Action::PinSubmit);
        assert_eq!(app.state.screen, Screen::Summary);
    }

    #[test]
    fn test_advice_without_advisor_notifies() {
        let (_temp_dir, storage) = create_test_storage();
        let settings = Settings::default();
        let mut app = App::new(&storage, &settings).unwrap();

        app.dispatch(Action::RequestAdvice);
        assert!(app.state.status.as_deref().unwrap_or("").contains("No advisor"));
    }
}
