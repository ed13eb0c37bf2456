#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LoginField {
    Journal,
    Name,
    Pin,
}

impl LoginField {
    pub fn next(self) -> Self {
        match self {
            LoginField::Journal => LoginField::Name,
            LoginField::Name => LoginField::Pin,
            LoginField::Pin => LoginField::Journal,
        }
    }

    pub fn previous(self) -> Self {
        match self {
            LoginField::Journal => LoginField::Pin,
            LoginField::Name => LoginField::Journal,
            LoginField::Pin => LoginField::Name,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EntryTab {
    Timer,
    Manual,
}

impl EntryTab {
    pub fn toggle(self) -> Self {
        match self {
            EntryTab::Timer => EntryTab::Manual,
            EntryTab::Manual => EntryTab::Timer,
        }
    }

    pub fn index(self) -> usize {
        match self {
            EntryTab::Timer => 0,
            EntryTab::Manual => 1,
        }
    }
}

/// Focusable boxes on the timer screen. The manual fields are only reachable on the Manual tab.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TimerField {
    Category,
    Semester,
    Hours,
    Minutes,
    Seconds,
}

impl TimerField {
    pub fn next(self, tab: EntryTab) -> Self {
        match (self, tab) {
            (TimerField::Category, _) => TimerField::Semester,
            (TimerField::Semester, EntryTab::Manual) => TimerField::Hours,
            (TimerField::Semester, EntryTab::Timer) => TimerField::Category,
            (TimerField::Hours, _) => TimerField::Minutes,
            (TimerField::Minutes, _) => TimerField::Seconds,
            (TimerField::Seconds, _) => TimerField::Category,
        }
    }

    pub fn previous(self, tab: EntryTab) -> Self {
        match (self, tab) {
            (TimerField::Category, EntryTab::Manual) => TimerField::Seconds,
            (TimerField::Category, EntryTab::Timer) => TimerField::Semester,
            (TimerField::Semester, _) => TimerField::Category,
            (TimerField::Hours, _) => TimerField::Semester,
            (TimerField::Minutes, _) => TimerField::Hours,
            (TimerField::Seconds, _) => TimerField::Minutes,
        }
    }

    pub fn is_manual(self) -> bool {
        matches!(
            self,
            TimerField::Hours | TimerField::Minutes | TimerField::Seconds
        )
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NoticeKind {
    Info,
    Error,
}

/// Blocking message box; dismissed with Enter or Esc.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Notice {
    pub kind: NoticeKind,
    pub title: String,
    pub message: String,
}

impl Notice {
    pub fn info(title: &str, message: impl Into<String>) -> Self {
        Self {
            kind: NoticeKind::Info,
            title: title.to_string(),
            message: message.into(),
        }
    }

    pub fn error(title: &str, message: impl Into<String>) -> Self {
        Self {
            kind: NoticeKind::Error,
            title: title.to_string(),
            message: message.into(),
        }
    }
}

/// A single-line text input with the cursor kept at the end.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct TextInput {
    pub value: String,
}

impl TextInput {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(&mut self, c: char) {
        self.value.push(c);
    }

    pub fn backspace(&mut self) {
        self.value.pop();
    }

    #[cfg(test)]
    pub fn clear(&mut self) {
        self.value.clear();
    }

    pub fn set(&mut self, s: &str) {
        self.value.clear();
        self.value.push_str(s);
    }

    pub fn as_str(&self) -> &str {
        &self.value
    }

    pub fn len(&self) -> usize {
        self.value.chars().count()
    }

    #[cfg(test)]
    pub fn is_empty(&self) -> bool {
        self.value.is_empty()
    }
}
