use crate::dtos::{BreedResponse, CreateBreedRequest, RiskAnalysisParams, RiskAnalysisResponse};
use crate::handlers::extract::ValidatedJson;
use crate::services::{assess_risk, record_error, register_breed, ServiceError};
use crate::startup::AppState;
use axum::{
    extract::{rejection::QueryRejection, Query, State},
    http::StatusCode,
    response::IntoResponse,
    Json,
};
use service_core::error::AppError;

fn service_failure(err: ServiceError) -> AppError {
    record_error(err.kind());
    AppError::from(err)
}

/// `POST /breeds`: register a breed with its diseases.
pub async fn create_breed(
    State(state): State<AppState>,
    ValidatedJson(req): ValidatedJson<CreateBreedRequest>,
) -> Result<impl IntoResponse, AppError> {
    let store = state.db.begin().await.map_err(service_failure)?;

    let created = register_breed(&store, req.into())
        .await
        .map_err(service_failure)?;

    store.commit().await.map_err(service_failure)?;

    Ok((StatusCode::CREATED, Json(BreedResponse::from(created))))
}

/// `GET /breeds/risk_analysis?breed_name=`
pub async fn risk_analysis(
    State(state): State<AppState>,
    params: Result<Query<RiskAnalysisParams>, QueryRejection>,
) -> Result<impl IntoResponse, AppError> {
    let Query(params) =
        params.map_err(|e| AppError::BadRequest(anyhow::anyhow!("{}", e.body_text())))?;

    let store = state.db.begin().await.map_err(service_failure)?;

    let assessment = assess_risk(&store, &params.breed_name)
        .await
        .map_err(service_failure)?;

    store.commit().await.map_err(service_failure)?;

    let analysis = assessment.with_care_plan(&state.care_plans).await;

    Ok(Json(RiskAnalysisResponse::from(analysis)))
}
