use axum::{
    Json,
    extract::{Path, State, rejection::JsonRejection},
    http::StatusCode,
    response::{IntoResponse, Response},
};
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use uuid::Uuid;

use crate::modules::event_registrations::core::model::{
    EventReference, PaymentMethod, PaymentRequest, RegistrationInput, RegistrationRecord,
};
use crate::modules::event_registrations::core::ports::GatewayError;
use crate::modules::event_registrations::core::state::{PaymentState, RegistrationState};
use crate::modules::event_registrations::use_cases::flow_error::FlowError;
use crate::modules::event_registrations::use_cases::register_for_event::handler::{
    RegistrationFlow, SubmitOutcome,
};
use crate::shell::state::{AppState, Dialog};

#[derive(Deserialize)]
pub struct OpenDialogBody {
    pub event: EventReference,
}

#[derive(Serialize)]
pub struct PaymentMethodView {
    pub method: PaymentMethod,
    pub label: &'static str,
}

#[derive(Serialize)]
pub struct PaymentView {
    pub request: PaymentRequest,
    pub methods: Vec<PaymentMethodView>,
    pub state: PaymentState,
}

#[derive(Serialize)]
pub struct DialogView {
    pub dialog_id: Uuid,
    pub event: EventReference,
    pub fee_label: String,
    pub submit_label: &'static str,
    pub is_open: bool,
    pub state: RegistrationState,
    pub payment: Option<PaymentView>,
}

#[derive(Serialize)]
pub struct DialogResponse {
    pub dialog: DialogView,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub record: Option<RegistrationRecord>,
}

#[derive(Serialize)]
struct ErrorBody {
    title: Option<&'static str>,
    error: String,
}

pub async fn dialog_view(dialog_id: Uuid, dialog: &Dialog) -> DialogView {
    let state = dialog.state().await;
    let payment = match (dialog.payment_request().await, dialog.payment_state().await) {
        (Some(request), Some(state)) => Some(PaymentView {
            request,
            methods: PaymentMethod::ALL
                .into_iter()
                .map(|method| PaymentMethodView {
                    method,
                    label: method.label(),
                })
                .collect(),
            state,
        }),
        _ => None,
    };
    DialogView {
        dialog_id,
        event: dialog.event().clone(),
        fee_label: dialog.event().fee_label(),
        submit_label: state.submit_label(dialog.event()),
        is_open: !state.is_closed(),
        state,
        payment,
    }
}

pub fn flow_error_response(error: FlowError) -> Response {
    let status = match &error {
        FlowError::Registration(_) if error.validation().is_some() => {
            StatusCode::UNPROCESSABLE_ENTITY
        }
        FlowError::Gateway(GatewayError::Declined(_)) => StatusCode::PAYMENT_REQUIRED,
        FlowError::Gateway(GatewayError::Network(_)) => StatusCode::BAD_GATEWAY,
        FlowError::Registration(_) | FlowError::Payment(_) | FlowError::Cancelled => {
            StatusCode::CONFLICT
        }
    };
    let body = ErrorBody {
        title: error.validation().map(|reason| reason.title()),
        error: error.to_string(),
    };
    (status, Json(body)).into_response()
}

pub async fn find_dialog(state: &AppState, dialog_id: Uuid) -> Result<Arc<Dialog>, Response> {
    state
        .dialogs
        .get(dialog_id)
        .await
        .ok_or_else(|| StatusCode::NOT_FOUND.into_response())
}

/// Drops a registered dialog from the registry, so the attendee's details do
/// not outlive the dialog.
pub async fn release_dialog(state: &AppState, dialog_id: Uuid) {
    if state.dialogs.remove(dialog_id).await.is_some() {
        tracing::debug!(%dialog_id, "registration dialog released");
    }
}

pub async fn open(
    State(state): State<AppState>,
    body: Result<Json<OpenDialogBody>, JsonRejection>,
) -> impl IntoResponse {
    let Json(body) = match body {
        Ok(b) => b,
        Err(_) => return StatusCode::UNPROCESSABLE_ENTITY.into_response(),
    };

    let registrations = state.registrations.clone();
    let dialog = Arc::new(RegistrationFlow::open(
        body.event,
        state.registration_gateway.clone(),
        state.payment_gateway.clone(),
        state.notifier.clone(),
        move |record| registrations.record(record),
    ));
    let dialog_id = state.dialogs.insert(dialog.clone()).await;
    tracing::info!(%dialog_id, event_id = %dialog.event().id, "registration dialog opened");

    let view = dialog_view(dialog_id, &dialog).await;
    (
        StatusCode::CREATED,
        Json(DialogResponse {
            dialog: view,
            record: None,
        }),
    )
        .into_response()
}

pub async fn show(State(state): State<AppState>, Path(dialog_id): Path<Uuid>) -> Response {
    let dialog = match find_dialog(&state, dialog_id).await {
        Ok(dialog) => dialog,
        Err(response) => return response,
    };
    Json(DialogResponse {
        dialog: dialog_view(dialog_id, &dialog).await,
        record: None,
    })
    .into_response()
}

pub async fn edit(
    State(state): State<AppState>,
    Path(dialog_id): Path<Uuid>,
    body: Result<Json<RegistrationInput>, JsonRejection>,
) -> Response {
    let Json(draft) = match body {
        Ok(b) => b,
        Err(_) => return StatusCode::UNPROCESSABLE_ENTITY.into_response(),
    };
    let dialog = match find_dialog(&state, dialog_id).await {
        Ok(dialog) => dialog,
        Err(response) => return response,
    };
    match dialog.edit(draft).await {
        Ok(()) => Json(DialogResponse {
            dialog: dialog_view(dialog_id, &dialog).await,
            record: None,
        })
        .into_response(),
        Err(error) => flow_error_response(error),
    }
}

pub async fn submit(State(state): State<AppState>, Path(dialog_id): Path<Uuid>) -> Response {
    let dialog = match find_dialog(&state, dialog_id).await {
        Ok(dialog) => dialog,
        Err(response) => return response,
    };
    match dialog.submit().await {
        Ok(outcome) => {
            let record = match outcome {
                SubmitOutcome::Registered(record) => Some(record),
                SubmitOutcome::PaymentRequired(_) => None,
            };
            let view = dialog_view(dialog_id, &dialog).await;
            if record.is_some() {
                release_dialog(&state, dialog_id).await;
            }
            Json(DialogResponse {
                dialog: view,
                record,
            })
            .into_response()
        }
        Err(error) => flow_error_response(error),
    }
}

pub async fn dismiss(State(state): State<AppState>, Path(dialog_id): Path<Uuid>) -> Response {
    let Some(dialog) = state.dialogs.remove(dialog_id).await else {
        return StatusCode::NOT_FOUND.into_response();
    };
    match dialog.dismiss().await {
        Ok(()) => StatusCode::NO_CONTENT.into_response(),
        Err(error) => flow_error_response(error),
    }
}
