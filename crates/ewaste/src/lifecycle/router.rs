use std::sync::Arc;

use axum::async_trait;
use axum::extract::{FromRequestParts, Path, State};
use axum::http::request::Parts;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::routing::{get, post, put};
use axum::{Json, Router};
use serde::Deserialize;
use serde_json::json;

use super::collections::CollectionService;
use super::dashboard::DashboardService;
use super::domain::{CollectionStatus, DonationStatus, Principal, PrincipalId, RecordId, Role};
use super::donations::DonationService;
use super::service::LifecycleError;
use super::views::{CollectionView, DashboardView, DonationView, PrincipalDirectory};

/// Request headers carrying the principal resolved by the identity layer in
/// front of this service.
pub const PRINCIPAL_ID_HEADER: &str = "x-principal-id";
pub const PRINCIPAL_ROLE_HEADER: &str = "x-principal-role";

/// Shared state behind the lifecycle routes.
#[derive(Clone)]
pub struct LifecycleState {
    pub collections: Arc<CollectionService>,
    pub donations: Arc<DonationService>,
    pub dashboard: Arc<DashboardService>,
    pub directory: Arc<dyn PrincipalDirectory>,
}

#[async_trait]
impl<S> FromRequestParts<S> for Principal
where
    S: Send + Sync,
{
    type Rejection = Response;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        let id = parts
            .headers
            .get(PRINCIPAL_ID_HEADER)
            .and_then(|value| value.to_str().ok())
            .map(str::trim)
            .filter(|value| !value.is_empty());
        let role = parts
            .headers
            .get(PRINCIPAL_ROLE_HEADER)
            .and_then(|value| value.to_str().ok())
            .and_then(Role::parse);

        match (id, role) {
            (Some(id), Some(role)) => Ok(Principal {
                id: PrincipalId(id.to_string()),
                role,
            }),
            _ => Err((
                StatusCode::UNAUTHORIZED,
                Json(json!({ "error": "missing or invalid principal headers" })),
            )
                .into_response()),
        }
    }
}

impl IntoResponse for LifecycleError {
    fn into_response(self) -> Response {
        match self {
            LifecycleError::Validation(errors) => (
                StatusCode::BAD_REQUEST,
                Json(json!({ "errors": errors.violations() })),
            )
                .into_response(),
            LifecycleError::NotFound => (
                StatusCode::NOT_FOUND,
                Json(json!({ "error": "record not found" })),
            )
                .into_response(),
            LifecycleError::Forbidden => (
                StatusCode::FORBIDDEN,
                Json(json!({ "error": "access denied" })),
            )
                .into_response(),
            LifecycleError::Conflict(reason) => {
                (StatusCode::CONFLICT, Json(json!({ "error": reason }))).into_response()
            }
            LifecycleError::Storage(_) => (
                StatusCode::INTERNAL_SERVER_ERROR,
                Json(json!({ "error": "internal storage failure" })),
            )
                .into_response(),
        }
    }
}

#[derive(Debug, Deserialize)]
pub struct CollectionStatusRequest {
    pub status: CollectionStatus,
    #[serde(default)]
    pub notes: Option<String>,
}

#[derive(Debug, Deserialize)]
pub struct DonationStatusRequest {
    pub status: DonationStatus,
    #[serde(default)]
    pub notes: Option<String>,
}

/// Router exposing the lifecycle core under `/api/v1`.
pub fn lifecycle_router(state: LifecycleState) -> Router {
    Router::new()
        .route(
            "/api/v1/collections",
            post(create_collection).get(list_collections),
        )
        .route(
            "/api/v1/collections/:id",
            get(get_collection).delete(cancel_collection),
        )
        .route(
            "/api/v1/collections/:id/status",
            put(update_collection_status),
        )
        .route("/api/v1/donations", post(create_donation).get(list_donations))
        .route(
            "/api/v1/donations/:id",
            get(get_donation).delete(cancel_donation),
        )
        .route("/api/v1/donations/:id/reserve", put(reserve_donation))
        .route("/api/v1/donations/:id/status", put(update_donation_status))
        .route("/api/v1/dashboard", get(dashboard))
        .with_state(state)
}

async fn create_collection(
    State(state): State<LifecycleState>,
    principal: Principal,
    Json(draft): Json<super::draft::CollectionDraft>,
) -> Result<Response, LifecycleError> {
    let record = state.collections.create(&principal, &draft)?;
    let view = CollectionView::build(&record, state.directory.as_ref());
    Ok((StatusCode::CREATED, Json(view)).into_response())
}

async fn list_collections(
    State(state): State<LifecycleState>,
    principal: Principal,
) -> Result<Json<Vec<CollectionView>>, LifecycleError> {
    let records = state.collections.list(&principal)?;
    let views = records
        .iter()
        .map(|record| CollectionView::build(record, state.directory.as_ref()))
        .collect();
    Ok(Json(views))
}

async fn get_collection(
    State(state): State<LifecycleState>,
    principal: Principal,
    Path(id): Path<String>,
) -> Result<Json<CollectionView>, LifecycleError> {
    let record = state.collections.get(&principal, &RecordId(id))?;
    Ok(Json(CollectionView::build(&record, state.directory.as_ref())))
}

async fn update_collection_status(
    State(state): State<LifecycleState>,
    principal: Principal,
    Path(id): Path<String>,
    Json(request): Json<CollectionStatusRequest>,
) -> Result<Json<CollectionView>, LifecycleError> {
    let record = state.collections.transition_status(
        &principal,
        &RecordId(id),
        request.status,
        request.notes,
    )?;
    Ok(Json(CollectionView::build(&record, state.directory.as_ref())))
}

async fn cancel_collection(
    State(state): State<LifecycleState>,
    principal: Principal,
    Path(id): Path<String>,
) -> Result<Json<CollectionView>, LifecycleError> {
    let record = state.collections.cancel(&principal, &RecordId(id))?;
    Ok(Json(CollectionView::build(&record, state.directory.as_ref())))
}

async fn create_donation(
    State(state): State<LifecycleState>,
    principal: Principal,
    Json(draft): Json<super::draft::DonationDraft>,
) -> Result<Response, LifecycleError> {
    let record = state.donations.create(&principal, &draft)?;
    let view = DonationView::build(&record, state.directory.as_ref());
    Ok((StatusCode::CREATED, Json(view)).into_response())
}

async fn list_donations(
    State(state): State<LifecycleState>,
    principal: Principal,
) -> Result<Json<Vec<DonationView>>, LifecycleError> {
    let records = state.donations.list(&principal)?;
    let views = records
        .iter()
        .map(|record| DonationView::build(record, state.directory.as_ref()))
        .collect();
    Ok(Json(views))
}

async fn get_donation(
    State(state): State<LifecycleState>,
    principal: Principal,
    Path(id): Path<String>,
) -> Result<Json<DonationView>, LifecycleError> {
    let record = state.donations.get(&principal, &RecordId(id))?;
    Ok(Json(DonationView::build(&record, state.directory.as_ref())))
}

async fn reserve_donation(
    State(state): State<LifecycleState>,
    principal: Principal,
    Path(id): Path<String>,
) -> Result<Json<DonationView>, LifecycleError> {
    let record = state.donations.reserve(&principal, &RecordId(id))?;
    Ok(Json(DonationView::build(&record, state.directory.as_ref())))
}

async fn update_donation_status(
    State(state): State<LifecycleState>,
    principal: Principal,
    Path(id): Path<String>,
    Json(request): Json<DonationStatusRequest>,
) -> Result<Json<DonationView>, LifecycleError> {
    let record = state.donations.transition_status(
        &principal,
        &RecordId(id),
        request.status,
        request.notes,
    )?;
    Ok(Json(DonationView::build(&record, state.directory.as_ref())))
}

async fn cancel_donation(
    State(state): State<LifecycleState>,
    principal: Principal,
    Path(id): Path<String>,
) -> Result<Json<DonationView>, LifecycleError> {
    let record = state.donations.cancel(&principal, &RecordId(id))?;
    Ok(Json(DonationView::build(&record, state.directory.as_ref())))
}

async fn dashboard(
    State(state): State<LifecycleState>,
    principal: Principal,
) -> Result<Json<DashboardView>, LifecycleError> {
    let summary = state.dashboard.summarize(&principal)?;
    Ok(Json(DashboardView::build(&summary, state.directory.as_ref())))
}
