use sheets::NameMapping;

use crate::journals::JournalMapping;
use crate::remote::{CallError, CallOutcome, RemoteCall, RemoteOp, RemoteReply};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SessionState {
    Unauthenticated,
    NamesLoaded,
    Authenticated,
}

/// What a successful login hands to the timer screen.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Session {
    pub journal: String,
    pub sheet_id: String,
    pub name: String,
}

/// Login state: journal/name selection, the entered pin, and the mappings they are checked
/// against. Index 0 of `journals` and `names` is the empty "nothing chosen" entry.
#[derive(Debug, Clone)]
pub struct SessionModel {
    journal_mapping: JournalMapping,
    journals: Vec<String>,
    journal_index: usize,
    name_mapping: NameMapping,
    names: Vec<String>,
    name_index: usize,
    pin: String,
    authenticated: bool,
}

impl SessionModel {
    pub fn new(journal_mapping: JournalMapping) -> Self {
        let journals = std::iter::once(String::new())
            .chain(journal_mapping.journals().map(str::to_string))
            .collect();
        Self {
            journal_mapping,
            journals,
            journal_index: 0,
            name_mapping: NameMapping::new(),
            names: Vec::new(),
            name_index: 0,
            pin: String::new(),
            authenticated: false,
        }
    }

    pub fn state(&self) -> SessionState {
        if self.authenticated {
            SessionState::Authenticated
        } else if !self.name_mapping.is_empty() {
            SessionState::NamesLoaded
        } else {
            SessionState::Unauthenticated
        }
    }

    pub fn journals(&self) -> &[String] {
        &self.journals
    }

    pub fn names(&self) -> &[String] {
        &self.names
    }

    #[cfg(test)]
    pub fn name_index(&self) -> usize {
        self.name_index
    }

    pub fn journal(&self) -> Option<&str> {
        selected(&self.journals, self.journal_index)
    }

    pub fn name(&self) -> Option<&str> {
        selected(&self.names, self.name_index)
    }

    pub fn sheet_id(&self) -> Option<&str> {
        self.journal_mapping.sheet_id(self.journal()?)
    }

    pub fn pin(&self) -> &str {
        &self.pin
    }

    /// Select a journal and reload the names that may log into it.
    pub async fn set_journal<C: RemoteCall + ?Sized>(
        &mut self,
        index: usize,
        caller: &mut C,
    ) -> Result<(), CallError> {
        self.journal_index = index;
        self.refresh_names(caller).await
    }

    /// Fetch `name -> pin` for the selected journal. Anything short of a successful fetch
    /// leaves no names to choose from.
    pub async fn refresh_names<C: RemoteCall + ?Sized>(
        &mut self,
        caller: &mut C,
    ) -> Result<(), CallError> {
        self.name_index = 0;

        if let Some(sheet_id) = self.sheet_id().map(str::to_string) {
            let outcome = caller.call(RemoteOp::FetchNames { sheet_id }).await?;
            if let CallOutcome::Success(RemoteReply::Names(mapping)) = outcome {
                self.names = std::iter::once(String::new())
                    .chain(mapping.names().map(str::to_string))
                    .collect();
                self.name_mapping = mapping;
                return Ok(());
            }
        }

        self.name_mapping = NameMapping::new();
        self.names = Vec::new();
        Ok(())
    }

    pub fn set_name_index(&mut self, index: usize) {
        self.name_index = index;
    }

    pub fn set_pin(&mut self, pin: impl Into<String>) {
        self.pin = pin.into();
    }

    /// True when a name is chosen and the pin matches it exactly.
    pub fn login(&self) -> bool {
        match self.name() {
            None => false,
            Some(name) => self.name_mapping.pin(name) == Some(self.pin.as_str()),
        }
    }

    /// Consume a successful login into the session for the timer screen.
    pub fn authenticate(&mut self) -> Option<Session> {
        if !self.login() {
            return None;
        }
        let session = Session {
            journal: self.journal()?.to_string(),
            sheet_id: self.sheet_id()?.to_string(),
            name: self.name()?.to_string(),
        };
        self.authenticated = true;
        tracing::info!(journal = %session.journal, name = %session.name, "logged in");
        Some(session)
    }
}

/// Index 0 is the sentinel and never resolves to a value.
fn selected(items: &[String], index: usize) -> Option<&str> {
    if index == 0 {
        return None;
    }
    items.get(index).map(String::as_str)
}
