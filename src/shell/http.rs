use axum::{
    Router,
    routing::{get, post, put},
};
use tower_http::cors::CorsLayer;
use tower_http::trace::TraceLayer;

use crate::modules::event_registrations::use_cases::list_registrations::inbound::http as list_http;
use crate::modules::event_registrations::use_cases::pay_for_registration::inbound::http as payment_http;
use crate::modules::event_registrations::use_cases::register_for_event::inbound::http as register_http;
use crate::shell::state::AppState;

pub fn router(state: AppState) -> Router {
    Router::new()
        .route("/registration-dialogs", post(register_http::open))
        .route(
            "/registration-dialogs/{id}",
            get(register_http::show).delete(register_http::dismiss),
        )
        .route("/registration-dialogs/{id}/draft", put(register_http::edit))
        .route("/registration-dialogs/{id}/submit", post(register_http::submit))
        .route(
            "/registration-dialogs/{id}/payment",
            post(payment_http::choose).delete(payment_http::cancel),
        )
        .route("/registrations", get(list_http::handle))
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::permissive())
        .with_state(state)
}
