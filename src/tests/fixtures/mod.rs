pub mod event_reference;
pub mod registration_input;
