/**
 * Competition HTTP Handlers
 *
 * Thin axum handlers over the orchestrator. `check_answer` holds the
 * request open across the inter-round delay, mirroring the flow it drives:
 * the caller's response returns once the follow-up question (or the round
 * error) has been broadcast.
 */
use std::sync::Arc;

use axum::{
    extract::{Query, State},
    http::StatusCode,
    Json,
};
use serde::Deserialize;
use uuid::Uuid;

use crate::backend::competition::orchestrator::CompetitionOrchestrator;
use crate::backend::error::BackendError;

/// Query parameters for `GET /competitions/start`.
#[derive(Debug, Deserialize)]
pub struct StartRoundQuery {
    pub room_id: i32,
}

/// Request body for `PATCH /competitions/check_answer`.
#[derive(Debug, Deserialize)]
pub struct CheckAnswerRequest {
    pub telegram_id: i64,
    pub room_id: i32,
    pub word_for_translate_id: Uuid,
    pub user_word_id: Uuid,
}

/// Handle `GET /competitions/start`.
pub async fn start_round(
    State(orchestrator): State<Arc<CompetitionOrchestrator>>,
    Query(query): Query<StartRoundQuery>,
) -> Result<StatusCode, BackendError> {
    orchestrator.start(query.room_id).await?;
    Ok(StatusCode::OK)
}

/// Handle `PATCH /competitions/check_answer`.
pub async fn check_answer(
    State(orchestrator): State<Arc<CompetitionOrchestrator>>,
    Json(body): Json<CheckAnswerRequest>,
) -> Result<StatusCode, BackendError> {
    orchestrator
        .check_answer(
            body.room_id,
            body.telegram_id,
            body.word_for_translate_id,
            body.user_word_id,
        )
        .await?;
    Ok(StatusCode::OK)
}
