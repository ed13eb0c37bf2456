use super::{format_duration, parse_manual_field, SelectList};
use crate::app::timer::{SubmitOutcome, TimerModel, TimerState};
use crate::app::{EntryTab, TextInput, TimerField};
use crate::remote::{CallError, RemoteCall};

#[derive(Debug, Clone)]
pub struct TimerForm {
    pub categories: SelectList,
    pub semesters: SelectList,
    pub hours: TextInput,
    pub minutes: TextInput,
    pub seconds: TextInput,
    pub duration: String,
    pub start_enabled: bool,
    pub tab: EntryTab,
    pub focus: TimerField,
}

impl Default for TimerForm {
    fn default() -> Self {
        Self {
            categories: SelectList::default(),
            semesters: SelectList::default(),
            hours: TextInput::new(),
            minutes: TextInput::new(),
            seconds: TextInput::new(),
            duration: format_duration(std::time::Duration::ZERO),
            start_enabled: true,
            tab: EntryTab::Timer,
            focus: TimerField::Category,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ManualField {
    Hours,
    Minutes,
    Seconds,
}

#[derive(Debug, Clone)]
pub struct TimerView {
    pub model: TimerModel,
    pub form: TimerForm,
}

impl TimerView {
    pub fn new(model: TimerModel) -> Self {
        Self {
            model,
            form: TimerForm::default(),
        }
    }

    /// Fill every control from the model. Categories are fetched here.
    pub async fn sync<C: RemoteCall + ?Sized>(&mut self, caller: &mut C) -> Result<(), CallError> {
        self.set_categories(caller).await?;
        self.form.semesters.clear();
        self.form.semesters.add_items(self.model.semesters());
        self.form
            .semesters
            .set_current_index(self.model.semester_index());
        self.write_manual_values();
        self.set_duration_field();
        Ok(())
    }

    pub fn is_running(&self) -> bool {
        self.model.state() == TimerState::Running
    }

    pub fn start_timer(&mut self) {
        self.model.start();
        self.form.start_enabled = false;
    }

    pub fn pause_timer(&mut self) {
        self.model.pause();
        self.form.start_enabled = true;
    }

    pub async fn set_categories<C: RemoteCall + ?Sized>(
        &mut self,
        caller: &mut C,
    ) -> Result<(), CallError> {
        self.model.set_categories(caller).await?;
        self.form.categories.clear();
        self.form.categories.add_items(self.model.categories());
        Ok(())
    }

    pub fn set_semester_index(&mut self, index: usize) {
        self.model.set_semester_index(index);
        self.form.semesters.set_current_index(index);
    }

    pub fn set_category_index(&mut self, index: usize) {
        self.model.set_category_index(index);
        self.form.categories.set_current_index(index);
    }

    pub fn set_manual_hours(&mut self, text: &str) -> bool {
        self.set_manual(ManualField::Hours, text)
    }

    pub fn set_manual_minutes(&mut self, text: &str) -> bool {
        self.set_manual(ManualField::Minutes, text)
    }

    pub fn set_manual_seconds(&mut self, text: &str) -> bool {
        self.set_manual(ManualField::Seconds, text)
    }

    /// Store edited field text. Empty text stores 0 and stays empty on screen; otherwise the
    /// field shows the parsed number. Text that does not parse leaves model and field as they
    /// were and returns false.
    pub fn set_manual(&mut self, field: ManualField, text: &str) -> bool {
        let Some(value) = parse_manual_field(text) else {
            return false;
        };
        match field {
            ManualField::Hours => self.model.set_manual_hours(value),
            ManualField::Minutes => self.model.set_manual_minutes(value),
            ManualField::Seconds => self.model.set_manual_seconds(value),
        }
        let shown = if text.is_empty() {
            String::new()
        } else {
            value.to_string()
        };
        self.manual_input_mut(field).set(&shown);
        true
    }

    pub fn manual_input(&self, field: ManualField) -> &TextInput {
        match field {
            ManualField::Hours => &self.form.hours,
            ManualField::Minutes => &self.form.minutes,
            ManualField::Seconds => &self.form.seconds,
        }
    }

    fn manual_input_mut(&mut self, field: ManualField) -> &mut TextInput {
        match field {
            ManualField::Hours => &mut self.form.hours,
            ManualField::Minutes => &mut self.form.minutes,
            ManualField::Seconds => &mut self.form.seconds,
        }
    }

    /// Write the stored manual values into their fields, zeros included.
    pub fn write_manual_values(&mut self) {
        let values = [
            (ManualField::Hours, self.model.manual_hours()),
            (ManualField::Minutes, self.model.manual_minutes()),
            (ManualField::Seconds, self.model.manual_seconds()),
        ];
        for (field, value) in values {
            self.set_manual(field, &value.to_string());
        }
    }

    #[cfg(test)]
    pub fn increment_duration(&mut self, seconds: u64) {
        self.model.increment_duration(seconds);
        self.set_duration_field();
    }

    pub fn tick(&mut self) {
        if self.model.tick() {
            self.set_duration_field();
        }
    }

    pub fn set_duration_field(&mut self) {
        self.form.duration = format_duration(self.model.duration());
    }

    /// Submit from the visible tab.
    pub async fn submit<C: RemoteCall + ?Sized>(
        &self,
        caller: &mut C,
    ) -> Result<SubmitOutcome, CallError> {
        self.model
            .submit(self.form.tab == EntryTab::Manual, caller)
            .await
    }

    pub fn reset_timer(&mut self) {
        self.model.reset_duration();
        self.set_duration_field();
    }

    pub fn toggle_tab(&mut self) {
        self.form.tab = self.form.tab.toggle();
        if self.form.tab == EntryTab::Timer && self.form.focus.is_manual() {
            self.form.focus = TimerField::Category;
        }
    }
}

impl ManualField {
    pub fn for_focus(field: TimerField) -> Option<Self> {
        match field {
            TimerField::Hours => Some(ManualField::Hours),
            TimerField::Minutes => Some(ManualField::Minutes),
            TimerField::Seconds => Some(ManualField::Seconds),
            TimerField::Category | TimerField::Semester => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::app::session::Session;
    use crate::remote::testing::ScriptedCall;
    use crate::remote::{CallOutcome, RemoteReply};
    use sheets::AppendReceipt;
    use std::time::Duration;

    fn view() -> TimerView {
        TimerView::new(TimerModel::new(
            Session {
                journal: "Law Review".to_string(),
                sheet_id: "abc123".to_string(),
                name: "Vincent".to_string(),
            },
            Vec::new(),
        ))
    }

    fn categories(list: &[&str]) -> ScriptedCall {
        ScriptedCall::returning([CallOutcome::Success(RemoteReply::Categories(
            list.iter().map(|s| s.to_string()).collect(),
        ))])
    }

    #[tokio::test]
    async fn sync_fills_every_control() {
        let mut view = view();
        view.sync(&mut categories(&["testing"])).await.unwrap();

        assert_eq!(view.form.categories.items(), ["", "testing"]);
        assert_eq!(view.form.semesters.items(), ["Fall", "Spring"]);
        assert_eq!(view.form.hours.as_str(), "0");
        assert_eq!(view.form.minutes.as_str(), "0");
        assert_eq!(view.form.seconds.as_str(), "0");
        assert_eq!(view.form.duration, "00:00:00");
    }

    #[tokio::test]
    async fn failed_category_fetch_empties_the_list() {
        let mut view = view();
        view.sync(&mut categories(&["testing"])).await.unwrap();

        view.set_categories(&mut ScriptedCall::returning([CallOutcome::Error]))
            .await
            .unwrap();

        assert!(view.form.categories.is_empty());
    }

    #[test]
    fn start_and_pause_toggle_start_control() {
        let mut view = view();
        view.start_timer();
        assert!(!view.form.start_enabled);
        assert!(view.is_running());

        view.pause_timer();
        assert!(view.form.start_enabled);
        assert!(!view.is_running());
    }

    #[test]
    fn duration_field_follows_increments_and_reset() {
        let mut view = view();
        view.increment_duration(3661);
        assert_eq!(view.form.duration, "01:01:01");

        view.reset_timer();
        assert_eq!(view.form.duration, "00:00:00");
    }

    #[test]
    fn tick_updates_field_only_while_running() {
        let mut view = view();
        view.tick();
        assert_eq!(view.form.duration, "00:00:00");

        view.start_timer();
        view.tick();
        assert_eq!(view.form.duration, "00:00:01");
    }

    #[test]
    fn empty_manual_input_stores_zero_and_shows_nothing() {
        let mut view = view();
        assert!(view.set_manual_hours("5"));
        assert_eq!(view.model.manual_hours(), 5);
        assert_eq!(view.form.hours.as_str(), "5");

        assert!(view.set_manual_hours(""));
        assert_eq!(view.model.manual_hours(), 0);
        assert_eq!(view.form.hours.as_str(), "");
    }

    #[test]
    fn manual_input_is_normalized() {
        let mut view = view();
        assert!(view.set_manual_minutes("007"));
        assert_eq!(view.form.minutes.as_str(), "7");
        assert_eq!(view.model.manual_minutes(), 7);
    }

    #[test]
    fn unparsable_manual_input_is_refused() {
        let mut view = view();
        view.set_manual_seconds("12");
        assert!(!view.set_manual_seconds("12x"));
        assert_eq!(view.form.seconds.as_str(), "12");
        assert_eq!(view.model.manual_seconds(), 12);
    }

    #[tokio::test]
    async fn submit_uses_the_visible_tab() {
        let mut view = view();
        view.sync(&mut categories(&["testing"])).await.unwrap();
        view.set_category_index(1);
        view.increment_duration(30);
        view.set_manual_minutes("61");

        let mut caller = ScriptedCall::returning([CallOutcome::Success(RemoteReply::Receipt(
            AppendReceipt::default(),
        ))]);
        let outcome = view.submit(&mut caller).await.unwrap();
        assert!(outcome.is_written());

        view.toggle_tab();
        let mut caller = ScriptedCall::new();
        let outcome = view.submit(&mut caller).await.unwrap();
        assert_eq!(
            outcome.error().map(|e| e.to_string()),
            Some("Minutes must be between 0 and 60".to_string())
        );
        assert!(caller.ops.is_empty());
        assert_eq!(view.model.duration(), Duration::from_secs(30));
    }

    #[test]
    fn leaving_manual_tab_moves_focus_off_manual_fields() {
        let mut view = view();
        view.toggle_tab();
        view.form.focus = TimerField::Minutes;
        view.toggle_tab();
        assert_eq!(view.form.tab, EntryTab::Timer);
        assert_eq!(view.form.focus, TimerField::Category);
    }
}
