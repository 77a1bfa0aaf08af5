use crate::modules::event_registrations::core::model::{PaymentMethod, PaymentReceipt};

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PaymentCommand {
    Choose { method: PaymentMethod },
    Complete { receipt: PaymentReceipt },
    Fail { reason: String },
    Cancel,
}
