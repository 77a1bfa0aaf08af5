use crate::modules::event_registrations::core::model::{
    EventReference, PaymentMethod, PaymentReceipt, PaymentRequest, RegistrationInput,
    RegistrationRecord,
};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "state", rename_all = "snake_case")]
pub enum RegistrationState {
    /// `paid` holds the receipt of a charge whose submission failed, so a
    /// resubmit goes straight to finalization instead of charging again.
    Editing {
        draft: RegistrationInput,
        #[serde(default, skip_serializing_if = "Option::is_none")]
        paid: Option<PaymentReceipt>,
    },
    AwaitingPayment {
        draft: RegistrationInput,
        request: PaymentRequest,
    },
    Submitting {
        draft: RegistrationInput,
        #[serde(default, skip_serializing_if = "Option::is_none")]
        paid: Option<PaymentReceipt>,
    },
    Closed {
        outcome: ClosedOutcome,
    },
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum ClosedOutcome {
    Registered { record: RegistrationRecord },
    Dismissed,
}

impl Default for RegistrationState {
    fn default() -> Self {
        RegistrationState::editing(RegistrationInput::default())
    }
}

impl RegistrationState {
    pub fn editing(draft: RegistrationInput) -> Self {
        RegistrationState::Editing { draft, paid: None }
    }

    pub fn is_closed(&self) -> bool {
        matches!(self, RegistrationState::Closed { .. })
    }

    pub fn draft(&self) -> Option<&RegistrationInput> {
        match self {
            RegistrationState::Editing { draft, .. }
            | RegistrationState::AwaitingPayment { draft, .. }
            | RegistrationState::Submitting { draft, .. } => Some(draft),
            RegistrationState::Closed { .. } => None,
        }
    }

    pub fn submit_label(&self, event: &EventReference) -> &'static str {
        match self {
            RegistrationState::Submitting { .. } => "Processing...",
            RegistrationState::Editing { paid: Some(_), .. } => "Confirm Registration",
            _ if event.is_free() => "Confirm Registration",
            _ => "Proceed to Payment",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(tag = "state", rename_all = "snake_case")]
pub enum PaymentState {
    #[default]
    Idle,
    Processing {
        method: PaymentMethod,
    },
    Succeeded {
        receipt: PaymentReceipt,
    },
}
