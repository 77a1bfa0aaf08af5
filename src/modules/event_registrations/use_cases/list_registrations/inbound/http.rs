use axum::{
    Json,
    extract::{Query, State},
    http::StatusCode,
    response::IntoResponse,
};
use serde::Deserialize;

use crate::shell::state::AppState;

#[derive(Deserialize)]
pub struct ListRegistrationsParams {
    pub event_id: Option<String>,
    pub offset: Option<u64>,
    pub limit: Option<u64>,
}

pub async fn handle(
    State(state): State<AppState>,
    Query(params): Query<ListRegistrationsParams>,
) -> impl IntoResponse {
    match state
        .queries
        .list_registrations(
            params.event_id.as_deref(),
            params.offset.unwrap_or(0),
            params.limit.unwrap_or(20),
        )
        .await
    {
        Ok(records) => Json(records).into_response(),
        Err(error) => {
            tracing::error!(%error, "listing registrations failed");
            StatusCode::INTERNAL_SERVER_ERROR.into_response()
        }
    }
}

#[cfg(test)]
mod list_registrations_http_inbound_tests {
    use axum::{
        Router,
        body::Body,
        http::{Request, StatusCode},
        routing::get,
    };
    use chrono::Utc;
    use http_body_util::BodyExt;
    use tower::ServiceExt;

    use crate::modules::event_registrations::core::model::{PaymentStatus, RegistrationRecord};
    use crate::shell::config::AppConfig;
    use crate::shell::state::AppState;
    use crate::tests::fixtures::registration_input::RegistrationInputBuilder;

    use super::handle;

    fn app(state: AppState) -> Router {
        Router::new()
            .route("/registrations", get(handle))
            .with_state(state)
    }

    #[tokio::test]
    async fn it_should_return_200_with_empty_list_when_no_one_registered() {
        let response = app(AppState::new(&AppConfig::default()))
            .oneshot(Request::get("/registrations").body(Body::empty()).unwrap())
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::OK);
        let bytes = response.into_body().collect().await.unwrap().to_bytes();
        let json: serde_json::Value = serde_json::from_slice(&bytes).unwrap();
        assert_eq!(json, serde_json::json!([]));
    }

    #[tokio::test]
    async fn it_should_filter_by_event() {
        let state = AppState::new(&AppConfig::default());
        for event_id in ["e1", "e2"] {
            state.registrations.record(RegistrationRecord::new(
                RegistrationInputBuilder::new().build(),
                event_id,
                PaymentStatus::Free,
                Utc::now(),
            ));
        }

        let response = app(state)
            .oneshot(
                Request::get("/registrations?event_id=e2")
                    .body(Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::OK);
        let bytes = response.into_body().collect().await.unwrap().to_bytes();
        let json: serde_json::Value = serde_json::from_slice(&bytes).unwrap();
        assert_eq!(json.as_array().unwrap().len(), 1);
        assert_eq!(json[0]["eventId"], "e2");
    }

    #[tokio::test]
    async fn it_should_return_400_when_the_limit_is_not_a_number() {
        let response = app(AppState::new(&AppConfig::default()))
            .oneshot(
                Request::get("/registrations?limit=many")
                    .body(Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    }
}
