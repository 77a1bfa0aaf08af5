use crate::shared::core::primitives::Amount;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;
use uuid::Uuid;

/// Attendee fields as typed into the registration form.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RegistrationInput {
    pub full_name: String,
    pub college: String,
    pub email: String,
    pub phone: String,
}

/// The event being registered for. Owned by the caller; the flows only read it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EventReference {
    pub id: String,
    pub title: String,
    pub price: Amount,
}

impl EventReference {
    pub fn is_free(&self) -> bool {
        self.price.is_zero()
    }

    pub fn fee_label(&self) -> String {
        if self.is_free() {
            "Free Event".to_string()
        } else {
            format!("Fee: {}", self.price)
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PaymentStatus {
    Paid,
    Free,
}

impl PaymentStatus {
    pub fn of(receipt: Option<&PaymentReceipt>) -> Self {
        match receipt {
            Some(_) => PaymentStatus::Paid,
            None => PaymentStatus::Free,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RegistrationRecord {
    pub full_name: String,
    pub college: String,
    pub email: String,
    pub phone: String,
    pub event_id: String,
    pub payment_status: PaymentStatus,
    pub registration_date: DateTime<Utc>,
}

impl RegistrationRecord {
    pub fn new(
        input: RegistrationInput,
        event_id: impl Into<String>,
        payment_status: PaymentStatus,
        registration_date: DateTime<Utc>,
    ) -> Self {
        Self {
            full_name: input.full_name,
            college: input.college,
            email: input.email,
            phone: input.phone,
            event_id: event_id.into(),
            payment_status,
            registration_date,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PaymentRequest {
    pub amount: Amount,
    pub title: String,
}

impl PaymentRequest {
    /// `None` for free events: there is nothing to charge.
    pub fn new(amount: Amount, title: impl Into<String>) -> Option<Self> {
        if amount.is_zero() {
            return None;
        }
        Some(Self {
            amount,
            title: title.into(),
        })
    }

    pub fn for_event(event: &EventReference) -> Option<Self> {
        Self::new(event.price, format!("Registration: {}", event.title))
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PaymentMethod {
    Card,
    Wallet,
}

impl PaymentMethod {
    pub const ALL: [PaymentMethod; 2] = [PaymentMethod::Card, PaymentMethod::Wallet];

    pub fn label(self) -> &'static str {
        match self {
            PaymentMethod::Card => "Pay with Card",
            PaymentMethod::Wallet => "Pay with UPI",
        }
    }
}

impl fmt::Display for PaymentMethod {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PaymentMethod::Card => f.write_str("card"),
            PaymentMethod::Wallet => f.write_str("wallet"),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PaymentReceipt {
    pub reference: Uuid,
    pub amount: Amount,
    pub method: PaymentMethod,
    pub paid_at: DateTime<Utc>,
}
