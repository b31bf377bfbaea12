//! HTTP routes.

use axum::{
    extract::{Path, State},
    http::StatusCode,
    routing::{get, post, put},
    Json, Router,
};
use std::sync::Arc;
use uuid::Uuid;

use sheetforge_domain::{CharacterDraftId, DomainError};
use sheetforge_shared::{
    AllocationRequest, AllocationResponse, CharacterSheetResponse, CompletenessResponse,
    CreateCharacterRequest, ErrorCode, ErrorResponse, GenerateRequest, ProfessionDetail,
    ProfessionSummary, SkillEntryData, SlotInputRequest, SlotUpdateResponse, TotalsData,
};

use crate::app::App;
use crate::use_cases::CharacterCreationError;

/// Create all HTTP routes.
pub fn routes() -> Router<Arc<App>> {
    Router::new()
        .route("/", get(health))
        .route("/api/health", get(health))
        .route("/api/professions", get(list_professions))
        .route("/api/professions/{id}", get(get_profession))
        .route("/api/characters", post(create_character))
        .route(
            "/api/characters/{id}",
            get(get_character).delete(delete_character),
        )
        .route("/api/characters/{id}/generate", post(generate_character))
        .route("/api/characters/{id}/slots/{index}", put(set_slot_input))
        .route("/api/characters/{id}/allocations", put(set_allocation))
        .route("/api/characters/{id}/completeness", get(get_completeness))
}

async fn health() -> &'static str {
    "OK"
}

// =============================================================================
// Professions
// =============================================================================

async fn list_professions(State(app): State<Arc<App>>) -> Json<Vec<ProfessionSummary>> {
    let professions = app.use_cases.character_creation.list_professions();
    Json(
        professions
            .iter()
            .map(|p| ProfessionSummary::from(p.as_ref()))
            .collect(),
    )
}

async fn get_profession(
    State(app): State<Arc<App>>,
    Path(id): Path<String>,
) -> Result<Json<ProfessionDetail>, ApiError> {
    let profession = app.use_cases.character_creation.describe_profession(&id)?;
    Ok(Json(ProfessionDetail::from(profession.as_ref())))
}

// =============================================================================
// Characters
// =============================================================================

async fn create_character(
    State(app): State<Arc<App>>,
    Json(request): Json<CreateCharacterRequest>,
) -> Result<(StatusCode, Json<CharacterSheetResponse>), ApiError> {
    let draft = app
        .use_cases
        .character_creation
        .create_draft(request.profession.as_deref())
        .await?;
    Ok((StatusCode::CREATED, Json(CharacterSheetResponse::from(&draft))))
}

async fn get_character(
    State(app): State<Arc<App>>,
    Path(id): Path<Uuid>,
) -> Result<Json<CharacterSheetResponse>, ApiError> {
    let draft = app
        .use_cases
        .character_creation
        .get_sheet(CharacterDraftId::from_uuid(id))
        .await?;
    Ok(Json(CharacterSheetResponse::from(&draft)))
}

async fn delete_character(
    State(app): State<Arc<App>>,
    Path(id): Path<Uuid>,
) -> Result<StatusCode, ApiError> {
    app.use_cases
        .character_creation
        .discard(CharacterDraftId::from_uuid(id))
        .await?;
    Ok(StatusCode::NO_CONTENT)
}

async fn generate_character(
    State(app): State<Arc<App>>,
    Path(id): Path<Uuid>,
    Json(request): Json<GenerateRequest>,
) -> Result<Json<CharacterSheetResponse>, ApiError> {
    let draft = app
        .use_cases
        .character_creation
        .generate(
            CharacterDraftId::from_uuid(id),
            request.profession.as_deref(),
        )
        .await?;
    Ok(Json(CharacterSheetResponse::from(&draft)))
}

async fn set_slot_input(
    State(app): State<Arc<App>>,
    Path((id, index)): Path<(Uuid, usize)>,
    Json(request): Json<SlotInputRequest>,
) -> Result<Json<SlotUpdateResponse>, ApiError> {
    let update = app
        .use_cases
        .character_creation
        .set_slot_input(CharacterDraftId::from_uuid(id), index, request.into())
        .await?;
    Ok(Json(SlotUpdateResponse {
        skills: update.skills.iter().map(SkillEntryData::from).collect(),
        offered: update.offered,
    }))
}

/// 200 when committed or ignored, 422 when refused; the body carries the
/// totals either way.
async fn set_allocation(
    State(app): State<Arc<App>>,
    Path(id): Path<Uuid>,
    Json(request): Json<AllocationRequest>,
) -> Result<(StatusCode, Json<AllocationResponse>), ApiError> {
    let result = app
        .use_cases
        .character_creation
        .set_allocation(
            CharacterDraftId::from_uuid(id),
            request.target.into(),
            request.points,
        )
        .await?;

    let status = if result.rejection.is_some() {
        StatusCode::UNPROCESSABLE_ENTITY
    } else {
        StatusCode::OK
    };
    Ok((
        status,
        Json(AllocationResponse {
            accepted: result.is_accepted(),
            rejection: result.rejection.map(|r| r.to_string()),
            totals: result.totals.map(TotalsData::from),
        }),
    ))
}

async fn get_completeness(
    State(app): State<Arc<App>>,
    Path(id): Path<Uuid>,
) -> Result<Json<CompletenessResponse>, ApiError> {
    let result = app
        .use_cases
        .character_creation
        .check_complete(CharacterDraftId::from_uuid(id))
        .await?;
    Ok(Json(CompletenessResponse {
        complete: result.complete,
        incomplete_slots: result.incomplete_slots,
    }))
}

// =============================================================================
// Errors
// =============================================================================

#[derive(Debug)]
pub enum ApiError {
    NotFound(String),
    BadRequest(String),
    Conflict(String),
    Unprocessable(String),
    Unavailable(String),
}

impl axum::response::IntoResponse for ApiError {
    fn into_response(self) -> axum::response::Response {
        let (status, body) = match self {
            ApiError::NotFound(msg) => (
                StatusCode::NOT_FOUND,
                ErrorResponse::new(ErrorCode::NotFound, msg),
            ),
            ApiError::BadRequest(msg) => (
                StatusCode::BAD_REQUEST,
                ErrorResponse::new(ErrorCode::BadRequest, msg),
            ),
            ApiError::Conflict(msg) => (
                StatusCode::CONFLICT,
                ErrorResponse::new(ErrorCode::Conflict, msg),
            ),
            ApiError::Unprocessable(msg) => (
                StatusCode::UNPROCESSABLE_ENTITY,
                ErrorResponse::new(ErrorCode::Rejected, msg),
            ),
            ApiError::Unavailable(msg) => {
                tracing::warn!(error = %msg, "Service unavailable");
                (
                    StatusCode::SERVICE_UNAVAILABLE,
                    ErrorResponse::new(ErrorCode::Unavailable, msg),
                )
            }
        };
        (status, Json(body)).into_response()
    }
}

impl From<CharacterCreationError> for ApiError {
    fn from(e: CharacterCreationError) -> Self {
        let msg = e.to_string();
        match e {
            CharacterCreationError::DraftNotFound(_) => ApiError::NotFound(msg),
            CharacterCreationError::ProfessionRequired => ApiError::BadRequest(msg),
            CharacterCreationError::DraftLimitReached(_) => ApiError::Unavailable(msg),
            CharacterCreationError::Domain(domain) => match domain {
                DomainError::UnknownProfession(_) => ApiError::NotFound(msg),
                DomainError::InvalidAllocation(_) => ApiError::Unprocessable(msg),
                DomainError::NotGenerated => ApiError::Conflict(msg),
                DomainError::Validation(_)
                | DomainError::InvalidSlotInput { .. }
                | DomainError::OptionUnavailable { .. }
                | DomainError::SlotOutOfRange { .. }
                | DomainError::UnknownSkill(_)
                | DomainError::AmbiguousSkill { .. }
                | DomainError::IncompleteSlots(_)
                | DomainError::Parse(_) => ApiError::BadRequest(msg),
            },
        }
    }
}
