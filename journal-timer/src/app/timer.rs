use std::time::Duration;

use thiserror::Error;

use super::session::Session;
use crate::remote::{CallError, CallOutcome, CallStatus, RemoteCall, RemoteOp, RemoteReply};

pub const DEFAULT_SEMESTERS: [&str; 2] = ["Fall", "Spring"];

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TimerState {
    Idle,
    Running,
    Paused,
}

/// Why a submission was refused before anything was sent.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum SubmitRejection {
    #[error("Name not chosen")]
    NameNotChosen,
    #[error("Category not chosen")]
    CategoryNotChosen,
    #[error("Minutes must be between 0 and 60")]
    MinutesOutOfRange,
    #[error("Seconds must be between 0 and 60")]
    SecondsOutOfRange,
    #[error("No time recorded")]
    NoTimeRecorded,
}

/// Result of one submit: either the status of the append call, or the reason it was never
/// made.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SubmitOutcome {
    Called(CallStatus),
    Rejected(SubmitRejection),
}

impl SubmitOutcome {
    pub fn status(&self) -> Option<CallStatus> {
        match self {
            SubmitOutcome::Called(status) => Some(*status),
            SubmitOutcome::Rejected(_) => None,
        }
    }

    pub fn error(&self) -> Option<SubmitRejection> {
        match self {
            SubmitOutcome::Called(_) => None,
            SubmitOutcome::Rejected(rejection) => Some(*rejection),
        }
    }

    /// Only a successful call means the row was written.
    pub fn is_written(&self) -> bool {
        self.status() == Some(CallStatus::Success)
    }
}

/// Duration capture and submission for one logged-in session.
#[derive(Debug, Clone)]
pub struct TimerModel {
    session: Session,
    state: TimerState,
    duration: Duration,
    manual_hours: u64,
    manual_minutes: u64,
    manual_seconds: u64,
    semesters: Vec<String>,
    semester_index: usize,
    categories: Vec<String>,
    category_index: usize,
}

impl TimerModel {
    /// An empty semester list falls back to [`DEFAULT_SEMESTERS`].
    pub fn new(session: Session, semesters: Vec<String>) -> Self {
        let semesters = if semesters.is_empty() {
            DEFAULT_SEMESTERS.iter().map(|s| s.to_string()).collect()
        } else {
            semesters
        };
        Self {
            session,
            state: TimerState::Idle,
            duration: Duration::ZERO,
            manual_hours: 0,
            manual_minutes: 0,
            manual_seconds: 0,
            semesters,
            semester_index: 0,
            categories: Vec::new(),
            category_index: 0,
        }
    }

    pub fn journal(&self) -> &str {
        &self.session.journal
    }

    #[cfg(test)]
    pub fn sheet_id(&self) -> &str {
        &self.session.sheet_id
    }

    pub fn name(&self) -> Option<&str> {
        Some(self.session.name.as_str()).filter(|name| !name.is_empty())
    }

    pub fn state(&self) -> TimerState {
        self.state
    }

    pub fn duration(&self) -> Duration {
        self.duration
    }

    pub fn start(&mut self) {
        self.state = TimerState::Running;
    }

    pub fn pause(&mut self) {
        if self.state == TimerState::Running {
            self.state = TimerState::Paused;
        }
    }

    pub fn increment_duration(&mut self, seconds: u64) {
        self.duration = self.duration.saturating_add(Duration::from_secs(seconds));
    }

    /// One clock tick; counts only while running. Returns whether the duration changed.
    pub fn tick(&mut self) -> bool {
        if self.state != TimerState::Running {
            return false;
        }
        self.increment_duration(1);
        true
    }

    /// Zero the timer and return to idle. Manual fields are left alone.
    pub fn reset_duration(&mut self) {
        self.duration = Duration::ZERO;
        self.state = TimerState::Idle;
    }

    pub fn manual_hours(&self) -> u64 {
        self.manual_hours
    }

    pub fn manual_minutes(&self) -> u64 {
        self.manual_minutes
    }

    pub fn manual_seconds(&self) -> u64 {
        self.manual_seconds
    }

    pub fn set_manual_hours(&mut self, hours: u64) {
        self.manual_hours = hours;
    }

    pub fn set_manual_minutes(&mut self, minutes: u64) {
        self.manual_minutes = minutes;
    }

    pub fn set_manual_seconds(&mut self, seconds: u64) {
        self.manual_seconds = seconds;
    }

    pub fn manual_duration(&self) -> Duration {
        let total = self
            .manual_hours
            .saturating_mul(3600)
            .saturating_add(self.manual_minutes.saturating_mul(60))
            .saturating_add(self.manual_seconds);
        Duration::from_secs(total)
    }

    pub fn semesters(&self) -> &[String] {
        &self.semesters
    }

    pub fn semester_index(&self) -> usize {
        self.semester_index
    }

    pub fn semester(&self) -> &str {
        self.semesters
            .get(self.semester_index)
            .or_else(|| self.semesters.first())
            .map(String::as_str)
            .unwrap_or_default()
    }

    pub fn set_semester_index(&mut self, index: usize) {
        self.semester_index = index;
    }

    pub fn categories(&self) -> &[String] {
        &self.categories
    }

    pub fn category(&self) -> Option<&str> {
        if self.category_index == 0 {
            return None;
        }
        self.categories.get(self.category_index).map(String::as_str)
    }

    pub fn set_category_index(&mut self, index: usize) {
        self.category_index = index;
    }

    /// Load the journal's categories. A failed or canceled fetch leaves nothing selectable,
    /// not even the empty entry.
    pub async fn set_categories<C: RemoteCall + ?Sized>(
        &mut self,
        caller: &mut C,
    ) -> Result<(), CallError> {
        let op = RemoteOp::FetchCategories {
            sheet_id: self.session.sheet_id.clone(),
        };
        self.category_index = 0;
        self.categories = match caller.call(op).await? {
            CallOutcome::Success(RemoteReply::Categories(fetched)) => {
                std::iter::once(String::new()).chain(fetched).collect()
            }
            _ => Vec::new(),
        };
        Ok(())
    }

    /// Validate and append one submission row.
    ///
    /// Checks run in order and stop at the first failure: name, category, manual minutes and
    /// seconds (manual entry only, 60 is allowed), then a non-zero duration.
    pub async fn submit<C: RemoteCall + ?Sized>(
        &self,
        manual: bool,
        caller: &mut C,
    ) -> Result<SubmitOutcome, CallError> {
        let op = match self.validate(manual) {
            Ok(op) => op,
            Err(rejection) => {
                tracing::debug!(%rejection, manual, "submission rejected");
                return Ok(SubmitOutcome::Rejected(rejection));
            }
        };

        let status = caller.call(op).await?.status();
        tracing::info!(?status, manual, "submission finished");
        Ok(SubmitOutcome::Called(status))
    }

    fn validate(&self, manual: bool) -> Result<RemoteOp, SubmitRejection> {
        let name = self.name().ok_or(SubmitRejection::NameNotChosen)?;
        let category = self.category().ok_or(SubmitRejection::CategoryNotChosen)?;

        let duration = if manual {
            if self.manual_minutes > 60 {
                return Err(SubmitRejection::MinutesOutOfRange);
            }
            if self.manual_seconds > 60 {
                return Err(SubmitRejection::SecondsOutOfRange);
            }
            self.manual_duration()
        } else {
            self.duration
        };

        if duration.is_zero() {
            return Err(SubmitRejection::NoTimeRecorded);
        }

        Ok(RemoteOp::AppendTime {
            sheet_id: self.session.sheet_id.clone(),
            name: name.to_string(),
            semester: self.semester().to_string(),
            duration,
            category: category.to_string(),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::remote::testing::ScriptedCall;
    use sheets::AppendReceipt;

    fn session(name: &str) -> Session {
        Session {
            journal: "Law Review".to_string(),
            sheet_id: "abc123".to_string(),
            name: name.to_string(),
        }
    }

    fn model() -> TimerModel {
        TimerModel::new(session("Vincent"), Vec::new())
    }

    async fn model_with_categories() -> TimerModel {
        let mut model = model();
        let mut caller = ScriptedCall::returning([CallOutcome::Success(
            RemoteReply::Categories(vec!["testing".to_string()]),
        )]);
        model.set_categories(&mut caller).await.unwrap();
        model
    }

    fn receipt() -> CallOutcome {
        CallOutcome::Success(RemoteReply::Receipt(AppendReceipt::default()))
    }

    async fn submit(model: &TimerModel, manual: bool) -> SubmitOutcome {
        let mut caller = ScriptedCall::returning([receipt()]);
        model.submit(manual, &mut caller).await.unwrap()
    }

    #[test]
    fn increments_accumulate() {
        let mut model = model();
        for (a, b) in [(0, 0), (1, 2), (59, 1), (3600, 86_400)] {
            model.reset_duration();
            model.increment_duration(a);
            model.increment_duration(b);
            assert_eq!(model.duration(), Duration::from_secs(a + b));
        }
    }

    #[test]
    fn reset_zeroes_duration_and_keeps_manual_fields() {
        let mut model = model();
        model.start();
        model.increment_duration(42);
        model.set_manual_minutes(5);

        model.reset_duration();

        assert_eq!(model.duration(), Duration::ZERO);
        assert_eq!(model.state(), TimerState::Idle);
        assert_eq!(model.manual_minutes(), 5);
    }

    #[test]
    fn ticks_count_only_while_running() {
        let mut model = model();
        assert!(!model.tick());

        model.start();
        assert!(model.tick());
        assert!(model.tick());

        model.pause();
        assert_eq!(model.state(), TimerState::Paused);
        assert!(!model.tick());
        assert_eq!(model.duration(), Duration::from_secs(2));
    }

    #[test]
    fn pause_from_idle_stays_idle() {
        let mut model = model();
        model.pause();
        assert_eq!(model.state(), TimerState::Idle);
    }

    #[test]
    fn semesters_default_and_select() {
        let mut model = model();
        assert_eq!(model.semesters(), ["Fall", "Spring"]);
        assert_eq!(model.semester(), "Fall");
        model.set_semester_index(1);
        assert_eq!(model.semester(), "Spring");
    }

    #[test]
    fn manual_duration_is_not_normalized() {
        let mut model = model();
        model.set_manual_hours(1);
        model.set_manual_minutes(75);
        model.set_manual_seconds(5);
        assert_eq!(model.manual_duration(), Duration::from_secs(3600 + 75 * 60 + 5));
    }

    #[tokio::test]
    async fn set_categories_prepends_sentinel() {
        let mut model = model();
        let mut caller = ScriptedCall::returning([CallOutcome::Success(
            RemoteReply::Categories(vec!["x".to_string(), "y".to_string()]),
        )]);

        model.set_categories(&mut caller).await.unwrap();

        assert_eq!(
            caller.ops,
            vec![RemoteOp::FetchCategories {
                sheet_id: "abc123".to_string()
            }]
        );
        assert_eq!(model.categories(), ["", "x", "y"]);
        assert_eq!(model.category(), None);
        model.set_category_index(2);
        assert_eq!(model.category(), Some("y"));
    }

    #[tokio::test]
    async fn failed_categories_leave_nothing_selectable() {
        let mut model = model_with_categories().await;
        let mut caller = ScriptedCall::returning([CallOutcome::Error]);

        model.set_categories(&mut caller).await.unwrap();

        assert!(model.categories().is_empty());
        model.set_category_index(1);
        assert_eq!(model.category(), None);
    }

    #[tokio::test]
    async fn submit_without_name() {
        let model = TimerModel::new(session(""), Vec::new());
        assert_eq!(
            submit(&model, false).await,
            SubmitOutcome::Rejected(SubmitRejection::NameNotChosen)
        );
    }

    #[tokio::test]
    async fn submit_without_category_even_with_time() {
        let mut model = model_with_categories().await;
        model.increment_duration(30);
        model.set_manual_minutes(10);

        let outcome = submit(&model, false).await;
        assert_eq!(
            outcome,
            SubmitOutcome::Rejected(SubmitRejection::CategoryNotChosen)
        );
        assert_eq!(outcome.error().unwrap().to_string(), "Category not chosen");
        assert_eq!(outcome.status(), None);
    }

    #[tokio::test]
    async fn manual_minutes_checked_before_seconds_and_duration() {
        let mut model = model_with_categories().await;
        model.set_category_index(1);
        model.set_manual_minutes(61);
        model.set_manual_seconds(99);

        let outcome = submit(&model, true).await;
        assert_eq!(
            outcome,
            SubmitOutcome::Rejected(SubmitRejection::MinutesOutOfRange)
        );
        assert_eq!(
            outcome.error().unwrap().to_string(),
            "Minutes must be between 0 and 60"
        );
    }

    #[tokio::test]
    async fn manual_seconds_out_of_range() {
        let mut model = model_with_categories().await;
        model.set_category_index(1);
        model.set_manual_seconds(61);
        assert_eq!(
            submit(&model, true).await,
            SubmitOutcome::Rejected(SubmitRejection::SecondsOutOfRange)
        );
    }

    #[tokio::test]
    async fn manual_range_is_ignored_for_timer_submissions() {
        let mut model = model_with_categories().await;
        model.set_category_index(1);
        model.set_manual_minutes(61);
        model.increment_duration(5);
        assert!(submit(&model, false).await.is_written());
    }

    #[tokio::test]
    async fn sixty_is_accepted() {
        let mut model = model_with_categories().await;
        model.set_category_index(1);
        model.set_manual_minutes(60);
        model.set_manual_seconds(60);

        let mut caller = ScriptedCall::returning([receipt()]);
        let outcome = model.submit(true, &mut caller).await.unwrap();

        assert_eq!(outcome, SubmitOutcome::Called(CallStatus::Success));
        assert_eq!(
            caller.ops,
            vec![RemoteOp::AppendTime {
                sheet_id: "abc123".to_string(),
                name: "Vincent".to_string(),
                semester: "Fall".to_string(),
                duration: Duration::from_secs(3660),
                category: "testing".to_string(),
            }]
        );
    }

    #[tokio::test]
    async fn zero_time_is_rejected_without_a_call() {
        let mut model = model_with_categories().await;
        model.set_category_index(1);

        let mut caller = ScriptedCall::new();
        for manual in [false, true] {
            assert_eq!(
                model.submit(manual, &mut caller).await.unwrap(),
                SubmitOutcome::Rejected(SubmitRejection::NoTimeRecorded)
            );
        }
        assert!(caller.ops.is_empty());
    }

    #[tokio::test]
    async fn timer_submission_uses_accumulated_duration_and_semester() {
        let mut model = model_with_categories().await;
        model.set_category_index(1);
        model.set_semester_index(1);
        model.increment_duration(90);
        model.set_manual_hours(7);

        let mut caller = ScriptedCall::returning([receipt()]);
        model.submit(false, &mut caller).await.unwrap();

        assert!(matches!(
            &caller.ops[..],
            [RemoteOp::AppendTime { semester, duration, .. }]
                if semester == "Spring" && *duration == Duration::from_secs(90)
        ));
    }

    #[tokio::test]
    async fn call_status_is_passed_through() {
        let mut model = model_with_categories().await;
        model.set_category_index(1);
        model.increment_duration(1);

        for (outcome, status) in [
            (CallOutcome::Error, CallStatus::Error),
            (CallOutcome::Canceled, CallStatus::Canceled),
        ] {
            let mut caller = ScriptedCall::returning([outcome]);
            let submitted = model.submit(false, &mut caller).await.unwrap();
            assert_eq!(submitted, SubmitOutcome::Called(status));
            assert!(!submitted.is_written());
        }
    }
}
