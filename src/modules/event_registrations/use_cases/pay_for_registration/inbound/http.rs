use axum::{
    Json,
    extract::{Path, State, rejection::JsonRejection},
    http::StatusCode,
    response::{IntoResponse, Response},
};
use serde::Deserialize;
use uuid::Uuid;

use crate::modules::event_registrations::core::model::PaymentMethod;
use crate::modules::event_registrations::use_cases::register_for_event::inbound::http::{
    DialogResponse, dialog_view, find_dialog, flow_error_response, release_dialog,
};
use crate::shell::state::AppState;

#[derive(Deserialize)]
pub struct ChoosePaymentBody {
    pub method: PaymentMethod,
}

pub async fn choose(
    State(state): State<AppState>,
    Path(dialog_id): Path<Uuid>,
    body: Result<Json<ChoosePaymentBody>, JsonRejection>,
) -> Response {
    let Json(body) = match body {
        Ok(b) => b,
        Err(_) => return StatusCode::UNPROCESSABLE_ENTITY.into_response(),
    };
    let dialog = match find_dialog(&state, dialog_id).await {
        Ok(dialog) => dialog,
        Err(response) => return response,
    };
    match dialog.choose_payment(body.method).await {
        Ok(record) => {
            let view = dialog_view(dialog_id, &dialog).await;
            release_dialog(&state, dialog_id).await;
            Json(DialogResponse {
                dialog: view,
                record: Some(record),
            })
            .into_response()
        }
        Err(error) => flow_error_response(error),
    }
}

pub async fn cancel(State(state): State<AppState>, Path(dialog_id): Path<Uuid>) -> Response {
    let dialog = match find_dialog(&state, dialog_id).await {
        Ok(dialog) => dialog,
        Err(response) => return response,
    };
    match dialog.cancel_payment().await {
        Ok(()) => Json(DialogResponse {
            dialog: dialog_view(dialog_id, &dialog).await,
            record: None,
        })
        .into_response(),
        Err(error) => flow_error_response(error),
    }
}
