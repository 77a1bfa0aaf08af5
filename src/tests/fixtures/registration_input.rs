// Shared test fixture for the attendee input.
// Seeded from json/registration_input.json, the same shape the HTTP shell accepts.

use crate::modules::event_registrations::core::model::RegistrationInput;

const REGISTRATION_INPUT_JSON: &str = include_str!("json/registration_input.json");

pub struct RegistrationInputBuilder {
    inner: RegistrationInput,
}

impl Default for RegistrationInputBuilder {
    fn default() -> Self {
        Self::new()
    }
}

#[allow(dead_code)]
impl RegistrationInputBuilder {
    pub fn new() -> Self {
        let inner: RegistrationInput = serde_json::from_str(REGISTRATION_INPUT_JSON).unwrap();
        Self { inner }
    }

    pub fn full_name(mut self, v: impl Into<String>) -> Self {
        self.inner.full_name = v.into();
        self
    }

    pub fn college(mut self, v: impl Into<String>) -> Self {
        self.inner.college = v.into();
        self
    }

    pub fn email(mut self, v: impl Into<String>) -> Self {
        self.inner.email = v.into();
        self
    }

    pub fn phone(mut self, v: impl Into<String>) -> Self {
        self.inner.phone = v.into();
        self
    }

    pub fn build(self) -> RegistrationInput {
        self.inner
    }
}

#[cfg(test)]
mod registration_input_builder_tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    fn default_delegates_to_new_and_parses_json() {
        let built = RegistrationInputBuilder::default().build();
        assert_eq!(built.full_name, "Jane Doe");
        assert_eq!(built.college, "MIT");
        assert_eq!(built.email, "jane@mit.edu");
        assert_eq!(built.phone, "555-1234");
    }

    #[rstest]
    fn setters_override_all_fields_and_build_returns_inner() {
        let custom = RegistrationInputBuilder::new()
            .full_name("John Roe")
            .college("Stanford")
            .email("john@stanford.edu")
            .phone("+91 98765 43210")
            .build();

        assert_eq!(
            custom,
            RegistrationInput {
                full_name: "John Roe".into(),
                college: "Stanford".into(),
                email: "john@stanford.edu".into(),
                phone: "+91 98765 43210".into(),
            }
        );
    }
}
