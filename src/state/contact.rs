//! Contact form shown in a modal on the photographer page.
//! Messages are not delivered anywhere; a valid submission is logged.

/// Form fields plus the two buttons, in tab order
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ContactField {
    FirstName,
    LastName,
    Email,
    Message,
    Submit,
    Close,
}

impl ContactField {
    pub const TAB_ORDER: [ContactField; 6] = [
        ContactField::FirstName,
        ContactField::LastName,
        ContactField::Email,
        ContactField::Message,
        ContactField::Submit,
        ContactField::Close,
    ];

    pub fn label(&self) -> &'static str {
        match self {
            ContactField::FirstName => "First name",
            ContactField::LastName => "Last name",
            ContactField::Email => "Email",
            ContactField::Message => "Your message",
            ContactField::Submit => "Send",
            ContactField::Close => "Close",
        }
    }
}

/// Why a field was rejected
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FieldError {
    Required,
    InvalidEmail,
}

impl FieldError {
    pub fn message(&self) -> &'static str {
        match self {
            FieldError::Required => "This field is required",
            FieldError::InvalidEmail => "Please enter a valid email address",
        }
    }
}

/// Current content of the contact form
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ContactForm {
    pub first_name: String,
    pub last_name: String,
    pub email: String,
    pub message: String,
    /// Errors from the last submission attempt
    pub errors: Vec<(ContactField, FieldError)>,
}

impl ContactForm {
    pub fn new() -> Self {
        Self::default()
    }

    /// Replace the text of an input field. Buttons have no text and are ignored.
    pub fn set(&mut self, field: ContactField, value: String) {
        match field {
            ContactField::FirstName => self.first_name = value,
            ContactField::LastName => self.last_name = value,
            ContactField::Email => self.email = value,
            ContactField::Message => self.message = value,
            ContactField::Submit | ContactField::Close => return,
        }
        // Editing a field clears its stale error
        self.errors.retain(|(f, _)| *f != field);
    }

    pub fn value(&self, field: ContactField) -> &str {
        match field {
            ContactField::FirstName => &self.first_name,
            ContactField::LastName => &self.last_name,
            ContactField::Email => &self.email,
            ContactField::Message => &self.message,
            ContactField::Submit | ContactField::Close => "",
        }
    }

    pub fn error(&self, field: ContactField) -> Option<FieldError> {
        self.errors
            .iter()
            .find(|(f, _)| *f == field)
            .map(|(_, e)| *e)
    }

    /// Check every field. Returns the list of problems, empty when the form can be sent.
    pub fn validate(&self) -> Vec<(ContactField, FieldError)> {
        let mut errors = Vec::new();

        for field in [
            ContactField::FirstName,
            ContactField::LastName,
            ContactField::Email,
            ContactField::Message,
        ] {
            if self.value(field).trim().is_empty() {
                errors.push((field, FieldError::Required));
            }
        }

        if !self.email.trim().is_empty() && !looks_like_email(self.email.trim()) {
            errors.push((ContactField::Email, FieldError::InvalidEmail));
        }

        errors
    }

    /// Validate and, on success, log the submission and clear the form
    pub fn submit(&mut self, photographer: &str) -> bool {
        self.errors = self.validate();
        if !self.errors.is_empty() {
            tracing::debug!(errors = self.errors.len(), "Contact form rejected");
            return false;
        }

        tracing::info!(
            photographer,
            first_name = %self.first_name.trim(),
            last_name = %self.last_name.trim(),
            email = %self.email.trim(),
            message = %self.message.trim(),
            "Contact form submitted"
        );
        *self = Self::default();
        true
    }
}

/// `local@domain.tld` with no whitespace
fn looks_like_email(email: &str) -> bool {
    if email.chars().any(char::is_whitespace) {
        return false;
    }
    let Some((local, domain)) = email.split_once('@') else {
        return false;
    };
    if local.is_empty() || domain.contains('@') {
        return false;
    }
    match domain.rsplit_once('.') {
        Some((host, tld)) => !host.is_empty() && !tld.is_empty(),
        None => false,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn filled() -> ContactForm {
        let mut form = ContactForm::new();
        form.set(ContactField::FirstName, "Ada".to_string());
        form.set(ContactField::LastName, "Lovelace".to_string());
        form.set(ContactField::Email, "ada@example.org".to_string());
        form.set(ContactField::Message, "Are you available in May?".to_string());
        form
    }

    #[test]
    fn test_empty_form_requires_every_field() {
        let errors = ContactForm::new().validate();
        assert_eq!(errors.len(), 4);
        assert!(errors.iter().all(|(_, e)| *e == FieldError::Required));
    }

    #[test]
    fn test_email_shape() {
        assert!(looks_like_email("ada@example.org"));
        assert!(!looks_like_email("ada@example"));
        assert!(!looks_like_email("@example.org"));
        assert!(!looks_like_email("ada example@x.org"));
        assert!(!looks_like_email("a@b@c.org"));
    }

    #[test]
    fn test_submit_clears_valid_form() {
        let mut form = filled();
        assert!(form.submit("Mimi Keel"));
        assert_eq!(form, ContactForm::default());
    }

    #[test]
    fn test_submit_keeps_invalid_form() {
        let mut form = filled();
        form.set(ContactField::Email, "nope".to_string());
        assert!(!form.submit("Mimi Keel"));
        assert_eq!(form.error(ContactField::Email), Some(FieldError::InvalidEmail));
        assert_eq!(form.first_name, "Ada");

        // Fixing the field drops its error
        form.set(ContactField::Email, "ada@example.org".to_string());
        assert_eq!(form.error(ContactField::Email), None);
    }

    #[test]
    fn test_buttons_have_no_value() {
        let mut form = filled();
        form.set(ContactField::Submit, "ignored".to_string());
        assert_eq!(form.value(ContactField::Submit), "");
    }
}
