use axum::{
	Json, Router,
	extract::State,
	http::StatusCode,
	response::{IntoResponse, Response},
	routing::{get, post},
};
use serde::{Deserialize, Serialize};

use nutri_service::{Error as ServiceError, ResolveRequest, ResolveResponse, VocabularyReport};
use nutri_storage::GraphStatistics;

use crate::state::AppState;

#[derive(Debug, Deserialize)]
pub struct AdviseRequest {
	pub query: String,
}

#[derive(Debug, Serialize)]
pub struct AdviseResponse {
	pub answer: String,
}

#[derive(Debug, Serialize)]
struct ErrorBody {
	error_code: String,
	message: String,
	fields: Option<Vec<String>>,
}

#[derive(Debug)]
pub struct ApiError {
	status: StatusCode,
	error_code: String,
	message: String,
	fields: Option<Vec<String>>,
}
impl ApiError {
	fn new(
		status: StatusCode,
		error_code: impl Into<String>,
		message: impl Into<String>,
		fields: Option<Vec<String>>,
	) -> Self {
		Self { status, error_code: error_code.into(), message: message.into(), fields }
	}
}
impl From<ServiceError> for ApiError {
	fn from(err: ServiceError) -> Self {
		match err {
			ServiceError::InvalidRequest { message } => ApiError::new(
				StatusCode::UNPROCESSABLE_ENTITY,
				"INVALID_REQUEST",
				message,
				Some(vec!["$.query".to_string()]),
			),
			ServiceError::StoreUnavailable { message } =>
				ApiError::new(StatusCode::SERVICE_UNAVAILABLE, "STORE_UNAVAILABLE", message, None),
			ServiceError::Storage { message } =>
				ApiError::new(StatusCode::INTERNAL_SERVER_ERROR, "STORAGE_ERROR", message, None),
		}
	}
}
impl IntoResponse for ApiError {
	fn into_response(self) -> Response {
		let body =
			ErrorBody { error_code: self.error_code, message: self.message, fields: self.fields };

		(self.status, Json(body)).into_response()
	}
}

pub fn router(state: AppState) -> Router {
	Router::new()
		.route("/health", get(health))
		.route("/v1/nutrition/resolve", post(resolve))
		.route("/v1/nutrition/advise", post(advise))
		.with_state(state)
}

pub fn admin_router(state: AppState) -> Router {
	Router::new()
		.route("/v1/admin/vocabulary/refresh", post(refresh_vocabulary))
		.route("/v1/admin/graph/stats", get(graph_stats))
		.with_state(state)
}

async fn health() -> StatusCode {
	StatusCode::OK
}

async fn resolve(
	State(state): State<AppState>,
	Json(payload): Json<ResolveRequest>,
) -> Result<Json<ResolveResponse>, ApiError> {
	let response = state.service.resolve(payload).await?;

	Ok(Json(response))
}

/// Always answers 200; failures are already folded into the text.
async fn advise(
	State(state): State<AppState>,
	Json(payload): Json<AdviseRequest>,
) -> Json<AdviseResponse> {
	let answer = state.service.advise(&payload.query).await;

	Json(AdviseResponse { answer })
}

async fn refresh_vocabulary(
	State(state): State<AppState>,
) -> Result<Json<VocabularyReport>, ApiError> {
	let report = state.service.refresh_vocabulary().await?;

	Ok(Json(report))
}

async fn graph_stats(State(state): State<AppState>) -> Result<Json<GraphStatistics>, ApiError> {
	let stats = state.service.statistics().await?;

	Ok(Json(stats))
}
