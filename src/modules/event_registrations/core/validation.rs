use crate::modules::event_registrations::core::model::RegistrationInput;
use crate::shared::infrastructure::notifier::Notification;

#[derive(Debug, Clone, Copy, thiserror::Error, PartialEq, Eq)]
pub enum ValidationError {
    #[error("Please fill in all required fields")]
    MissingFields,

    #[error("Please enter a valid email address")]
    InvalidEmail,
}

impl ValidationError {
    pub fn title(self) -> &'static str {
        match self {
            ValidationError::MissingFields => "Missing fields",
            ValidationError::InvalidEmail => "Invalid Email",
        }
    }

    pub fn notification(self) -> Notification {
        Notification::destructive(self.title(), self.to_string())
    }
}

/// A field is missing only when it is empty; whitespace counts as filled in.
///
/// The form itself checks for missing fields before the email. Here a typed
/// but malformed email wins, so an email without `@` is always reported as
/// `InvalidEmail`. An empty email is reported as missing.
pub fn validate(input: &RegistrationInput) -> Result<(), ValidationError> {
    let email = &input.email;
    if !email.is_empty() && !email.contains('@') {
        return Err(ValidationError::InvalidEmail);
    }
    let required = [
        &input.full_name,
        &input.college,
        &input.email,
        &input.phone,
    ];
    if required.iter().any(|field| field.is_empty()) {
        return Err(ValidationError::MissingFields);
    }
    Ok(())
}
