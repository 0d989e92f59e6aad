//! The contact form.
//!
//! Submission is simulated: a valid form is logged and cleared, nothing is
//! sent anywhere.

/// An input of the contact form, in tab order.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub enum ContactField {
    #[default]
    Name,
    Email,
    Subject,
    Message,
}

impl ContactField {
    pub const ALL: [Self; 4] = [Self::Name, Self::Email, Self::Subject, Self::Message];

    /// Locale key of the field label.
    pub const fn label_key(self) -> &'static str {
        match self {
            Self::Name => "contact.form.name",
            Self::Email => "contact.form.email",
            Self::Subject => "contact.form.subject",
            Self::Message => "contact.form.message",
        }
    }

    #[must_use]
    pub const fn next(self) -> Self {
        match self {
            Self::Name => Self::Email,
            Self::Email => Self::Subject,
            Self::Subject => Self::Message,
            Self::Message => Self::Name,
        }
    }

    #[must_use]
    pub const fn prev(self) -> Self {
        match self {
            Self::Name => Self::Message,
            Self::Email => Self::Name,
            Self::Subject => Self::Email,
            Self::Message => Self::Subject,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum FormError {
    #[error("required fields are empty: {0:?}")]
    MissingFields(Vec<ContactField>),
    #[error("email address is not valid")]
    InvalidEmail,
}

impl FormError {
    /// Locale key of the message shown to the user.
    pub const fn message_key(&self) -> &'static str {
        match self {
            Self::MissingFields(_) => "contact.form.required",
            Self::InvalidEmail => "contact.form.invalidEmail",
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ContactForm {
    pub name: String,
    pub email: String,
    pub subject: String,
    pub message: String,
    pub focus: ContactField,
}

impl ContactForm {
    pub fn value(&self, field: ContactField) -> &str {
        match field {
            ContactField::Name => &self.name,
            ContactField::Email => &self.email,
            ContactField::Subject => &self.subject,
            ContactField::Message => &self.message,
        }
    }

    fn value_mut(&mut self, field: ContactField) -> &mut String {
        match field {
            ContactField::Name => &mut self.name,
            ContactField::Email => &mut self.email,
            ContactField::Subject => &mut self.subject,
            ContactField::Message => &mut self.message,
        }
    }

    /// Type into the focused field.
    pub fn insert_char(&mut self, ch: char) {
        let field = self.focus;
        self.value_mut(field).push(ch);
    }

    pub fn backspace(&mut self) {
        let field = self.focus;
        self.value_mut(field).pop();
    }

    pub fn focus_next(&mut self) {
        self.focus = self.focus.next();
    }

    pub fn focus_prev(&mut self) {
        self.focus = self.focus.prev();
    }

    pub fn is_empty(&self) -> bool {
        ContactField::ALL
            .iter()
            .all(|field| self.value(*field).is_empty())
    }

    pub fn validate(&self) -> Result<(), FormError> {
        let missing: Vec<_> = ContactField::ALL
            .into_iter()
            .filter(|field| self.value(*field).trim().is_empty())
            .collect();
        if !missing.is_empty() {
            return Err(FormError::MissingFields(missing));
        }
        if !is_valid_email(self.email.trim()) {
            return Err(FormError::InvalidEmail);
        }
        Ok(())
    }

    /// Validate and, on success, clear every field and return focus to the
    /// first one. A rejected form keeps its contents.
    pub fn submit(&mut self) -> Result<(), FormError> {
        self.validate()?;
        tracing::info!(
            subject = %self.subject.trim(),
            "contact form submitted"
        );
        *self = Self::default();
        Ok(())
    }
}

/// An `@` with something on both sides.
fn is_valid_email(email: &str) -> bool {
    email
        .split_once('@')
        .is_some_and(|(local, domain)| !local.is_empty() && !domain.is_empty())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn filled() -> ContactForm {
        ContactForm {
            name: "Ada".into(),
            email: "ada@example.com".into(),
            subject: "Hello".into(),
            message: "Tell me more".into(),
            focus: ContactField::Message,
        }
    }

    #[test]
    fn test_valid_form_submits_and_clears() {
        let mut form = filled();
        assert_eq!(form.submit(), Ok(()));
        assert!(form.is_empty());
        assert_eq!(form.focus, ContactField::Name);
    }

    #[test]
    fn test_missing_fields_are_reported_and_kept() {
        let mut form = filled();
        form.subject = "   ".into();
        form.message.clear();
        let err = form.submit().unwrap_err();
        assert_eq!(
            err,
            FormError::MissingFields(vec![ContactField::Subject, ContactField::Message])
        );
        assert_eq!(err.message_key(), "contact.form.required");
        assert_eq!(form.name, "Ada");
    }

    #[test]
    fn test_email_needs_both_sides_of_at() {
        for email in ["ada", "@example.com", "ada@", "@"] {
            let mut form = filled();
            form.email = email.into();
            assert_eq!(form.validate(), Err(FormError::InvalidEmail), "{email}");
        }
        let mut form = filled();
        form.email = "a@b".into();
        assert_eq!(form.validate(), Ok(()));
    }

    #[test]
    fn test_typing_goes_to_focused_field() {
        let mut form = ContactForm::default();
        form.insert_char('A');
        form.focus_next();
        form.insert_char('x');
        form.insert_char('y');
        form.backspace();
        assert_eq!(form.name, "A");
        assert_eq!(form.email, "x");
    }

    #[test]
    fn test_focus_cycles() {
        let mut field = ContactField::Name;
        for _ in 0..ContactField::ALL.len() {
            field = field.next();
        }
        assert_eq!(field, ContactField::Name);
        assert_eq!(ContactField::Name.prev(), ContactField::Message);
    }
}
