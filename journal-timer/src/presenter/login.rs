use super::SelectList;
use crate::app::session::{Session, SessionModel};
use crate::app::{LoginField, TextInput};
use crate::journals::JournalMapping;
use crate::remote::{CallError, RemoteCall};

#[derive(Debug, Clone)]
pub struct LoginForm {
    pub journals: SelectList,
    pub names: SelectList,
    pub pin: TextInput,
    pub focus: LoginField,
}

#[derive(Debug, Clone)]
pub struct LoginView {
    pub model: SessionModel,
    pub form: LoginForm,
}

impl LoginView {
    pub fn new(journal_mapping: JournalMapping) -> Self {
        let model = SessionModel::new(journal_mapping);
        let mut journals = SelectList::default();
        journals.add_items(model.journals());
        Self {
            model,
            form: LoginForm {
                journals,
                names: SelectList::default(),
                pin: TextInput::new(),
                focus: LoginField::Journal,
            },
        }
    }

    pub async fn set_journal_index<C: RemoteCall + ?Sized>(
        &mut self,
        index: usize,
        caller: &mut C,
    ) -> Result<(), CallError> {
        self.form.journals.set_current_index(index);
        self.model.set_journal(index, caller).await?;
        self.set_names();
        Ok(())
    }

    /// The name list is only filled while a journal is chosen.
    pub fn set_names(&mut self) {
        self.form.names.clear();
        if self.model.journal().is_some() {
            self.form.names.add_items(self.model.names());
        }
    }

    pub fn set_name_index(&mut self, index: usize) {
        self.model.set_name_index(index);
        self.form.names.set_current_index(index);
    }

    pub fn push_pin_char(&mut self, c: char) {
        self.form.pin.insert(c);
        self.model.set_pin(self.form.pin.as_str());
    }

    pub fn pop_pin_char(&mut self) {
        self.form.pin.backspace();
        self.model.set_pin(self.form.pin.as_str());
    }

    /// A failed attempt clears the pin in both the model and the field.
    pub fn login(&mut self) -> Option<Session> {
        if let Some(session) = self.model.authenticate() {
            return Some(session);
        }
        tracing::info!(name = ?self.model.name(), "login refused");
        self.model.set_pin("");
        self.form.pin.set(self.model.pin());
        None
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::remote::testing::ScriptedCall;
    use crate::remote::{CallOutcome, RemoteReply};

    fn view() -> LoginView {
        LoginView::new(
            [("Law Review", "abc123"), ("Journal of Law", "def456")]
                .into_iter()
                .collect(),
        )
    }

    async fn view_with_names() -> LoginView {
        let mut view = view();
        let mut caller = ScriptedCall::returning([CallOutcome::Success(RemoteReply::Names(
            [("a", "1"), ("b", "2")].into_iter().collect(),
        ))]);
        view.set_journal_index(1, &mut caller).await.unwrap();
        view
    }

    #[test]
    fn journal_list_mirrors_model() {
        let view = view();
        assert_eq!(view.form.journals.items(), ["", "Law Review", "Journal of Law"]);
        assert!(view.form.names.is_empty());
    }

    #[tokio::test]
    async fn selecting_journal_fills_names() {
        let view = view_with_names().await;
        assert_eq!(view.form.journals.current_index(), 1);
        assert_eq!(view.form.names.items(), ["", "a", "b"]);
    }

    #[tokio::test]
    async fn deselecting_journal_empties_names() {
        let mut view = view_with_names().await;
        view.set_journal_index(0, &mut ScriptedCall::new())
            .await
            .unwrap();
        assert!(view.form.names.is_empty());
    }

    #[tokio::test]
    async fn typed_pin_logs_in() {
        let mut view = view_with_names().await;
        view.set_name_index(1);
        view.push_pin_char('1');

        let session = view.login().unwrap();
        assert_eq!(session.name, "a");
        assert_eq!(session.sheet_id, "abc123");
    }

    #[tokio::test]
    async fn wrong_pin_is_cleared() {
        let mut view = view_with_names().await;
        view.set_name_index(1);
        view.push_pin_char('2');
        view.push_pin_char('2');
        view.pop_pin_char();

        assert_eq!(view.login(), None);
        assert_eq!(view.model.pin(), "");
        assert!(view.form.pin.is_empty());
    }
}
