use crate::modules::event_registrations::core::events::{PaymentEvent, RegistrationEvent};
use crate::modules::event_registrations::core::state::{
    ClosedOutcome, PaymentState, RegistrationState,
};

pub fn evolve_registration(state: RegistrationState, event: RegistrationEvent) -> RegistrationState {
    match (state, event) {
        (RegistrationState::Editing { paid, .. }, RegistrationEvent::DraftEdited { draft }) => {
            RegistrationState::Editing { draft, paid }
        }
        (
            RegistrationState::Editing { draft, .. },
            RegistrationEvent::PaymentRequested { request },
        ) => RegistrationState::AwaitingPayment { draft, request },
        (
            RegistrationState::Editing { draft, .. }
            | RegistrationState::AwaitingPayment { draft, .. },
            RegistrationEvent::SubmissionStarted { paid },
        ) => RegistrationState::Submitting { draft, paid },
        (RegistrationState::AwaitingPayment { draft, .. }, RegistrationEvent::PaymentAbandoned) => {
            RegistrationState::editing(draft)
        }
        (
            RegistrationState::Submitting { draft, paid },
            RegistrationEvent::SubmissionFailed { .. },
        ) => RegistrationState::Editing { draft, paid },
        (RegistrationState::Submitting { .. }, RegistrationEvent::RegistrationCompleted { record }) => {
            RegistrationState::Closed {
                outcome: ClosedOutcome::Registered { record },
            }
        }
        (state @ RegistrationState::Closed { .. }, RegistrationEvent::Dismissed) => state,
        (_, RegistrationEvent::Dismissed) => RegistrationState::Closed {
            outcome: ClosedOutcome::Dismissed,
        },
        (state, _) => state,
    }
}

pub fn evolve_payment(state: PaymentState, event: PaymentEvent) -> PaymentState {
    match (state, event) {
        (PaymentState::Idle, PaymentEvent::ProcessingStarted { method }) => {
            PaymentState::Processing { method }
        }
        (PaymentState::Processing { .. }, PaymentEvent::PaymentSucceeded { receipt }) => {
            PaymentState::Succeeded { receipt }
        }
        (
            PaymentState::Processing { .. },
            PaymentEvent::PaymentFailed { .. } | PaymentEvent::ProcessingCancelled,
        ) => PaymentState::Idle,
        (state, _) => state,
    }
}

#[cfg(test)]
mod registration_evolve_tests {
    use super::*;
    use crate::modules::event_registrations::core::model::{
        PaymentMethod, PaymentReceipt, PaymentRequest, PaymentStatus, RegistrationRecord,
    };
    use crate::shared::core::primitives::Amount;
    use crate::tests::fixtures::registration_input::RegistrationInputBuilder;
    use chrono::Utc;
    use rstest::{fixture, rstest};

    #[fixture]
    fn editing() -> RegistrationState {
        RegistrationState::editing(RegistrationInputBuilder::new().build())
    }

    #[fixture]
    fn request() -> PaymentRequest {
        PaymentRequest::new(Amount::new(500), "Registration: Summit").unwrap()
    }

    #[rstest]
    fn it_should_keep_the_draft_when_payment_is_abandoned(
        editing: RegistrationState,
        request: PaymentRequest,
    ) {
        let awaiting = evolve_registration(
            editing.clone(),
            RegistrationEvent::PaymentRequested { request },
        );
        assert!(matches!(awaiting, RegistrationState::AwaitingPayment { .. }));
        let back = evolve_registration(awaiting, RegistrationEvent::PaymentAbandoned);
        assert_eq!(back, editing);
    }

    #[rstest]
    fn it_should_return_to_editing_when_the_submission_fails(editing: RegistrationState) {
        let submitting = evolve_registration(
            editing.clone(),
            RegistrationEvent::SubmissionStarted { paid: None },
        );
        let next = evolve_registration(
            submitting,
            RegistrationEvent::SubmissionFailed {
                reason: "offline".into(),
            },
        );
        assert_eq!(next, editing);
    }

    #[rstest]
    fn it_should_keep_the_receipt_when_a_paid_submission_fails(editing: RegistrationState) {
        let receipt = PaymentReceipt {
            reference: uuid::Uuid::now_v7(),
            amount: Amount::new(500),
            method: PaymentMethod::Wallet,
            paid_at: Utc::now(),
        };
        let submitting = evolve_registration(
            editing,
            RegistrationEvent::SubmissionStarted {
                paid: Some(receipt.clone()),
            },
        );
        let failed = evolve_registration(
            submitting,
            RegistrationEvent::SubmissionFailed {
                reason: "offline".into(),
            },
        );
        let edited = evolve_registration(
            failed,
            RegistrationEvent::DraftEdited {
                draft: RegistrationInputBuilder::new().phone("555-9999").build(),
            },
        );
        assert_eq!(
            edited,
            RegistrationState::Editing {
                draft: RegistrationInputBuilder::new().phone("555-9999").build(),
                paid: Some(receipt),
            }
        );
    }

    #[rstest]
    fn it_should_close_with_the_record_once_completed(editing: RegistrationState) {
        let submitting = evolve_registration(
            editing,
            RegistrationEvent::SubmissionStarted { paid: None },
        );
        let record = RegistrationRecord::new(
            RegistrationInputBuilder::new().build(),
            "e1",
            PaymentStatus::Free,
            Utc::now(),
        );
        let closed = evolve_registration(
            submitting,
            RegistrationEvent::RegistrationCompleted {
                record: record.clone(),
            },
        );
        assert_eq!(
            closed,
            RegistrationState::Closed {
                outcome: ClosedOutcome::Registered { record }
            }
        );
    }

    #[rstest]
    fn it_should_not_reopen_a_closed_dialog(editing: RegistrationState) {
        let closed = evolve_registration(editing, RegistrationEvent::Dismissed);
        let next = evolve_registration(
            closed.clone(),
            RegistrationEvent::DraftEdited {
                draft: RegistrationInputBuilder::new().full_name("Other").build(),
            },
        );
        assert_eq!(next, closed);
    }

    #[rstest]
    fn it_should_go_back_to_idle_when_a_charge_is_cancelled() {
        let processing = evolve_payment(
            PaymentState::Idle,
            PaymentEvent::ProcessingStarted {
                method: PaymentMethod::Card,
            },
        );
        assert_eq!(
            processing,
            PaymentState::Processing {
                method: PaymentMethod::Card
            }
        );
        assert_eq!(
            evolve_payment(processing, PaymentEvent::ProcessingCancelled),
            PaymentState::Idle
        );
    }
}
