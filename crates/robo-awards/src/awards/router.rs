use std::sync::Arc;

use axum::{
    extract::State,
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::post,
    Router,
};
use serde::{Deserialize, Serialize};
use serde_json::json;

use super::aggregate::EligibilityReport;
use super::batch::{evaluate_batch, DivisionJob, DivisionKey};
use super::domain::{AwardCategory, DivisionDataset};
use super::engine::EligibilityEngine;

#[derive(Debug, Deserialize)]
pub struct EligibilityRequest {
    pub dataset: DivisionDataset,
    #[serde(default)]
    pub category: Option<AwardCategory>,
}

#[derive(Debug, Serialize)]
pub struct EligibilityResponse {
    pub reports: Vec<EligibilityReport>,
}

#[derive(Debug, Deserialize)]
pub struct BatchEligibilityRequest {
    pub datasets: Vec<DivisionDataset>,
}

#[derive(Debug, Serialize)]
pub struct BatchEntryView {
    pub key: DivisionKey,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub report: Option<EligibilityReport>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

/// Router builder exposing the eligibility engine over JSON.
pub fn eligibility_router(engine: Arc<EligibilityEngine>) -> Router {
    Router::new()
        .route("/api/v1/eligibility", post(evaluate_handler))
        .route("/api/v1/eligibility/batch", post(batch_handler))
        .with_state(engine)
}

pub(crate) async fn evaluate_handler(
    State(engine): State<Arc<EligibilityEngine>>,
    axum::Json(request): axum::Json<EligibilityRequest>,
) -> Response {
    let EligibilityRequest { dataset, category } = request;

    let evaluated = tokio::task::spawn_blocking(move || match category {
        Some(category) => vec![engine.evaluate_category(&dataset, category)],
        None => engine.evaluate(&dataset),
    })
    .await;

    match evaluated {
        Ok(reports) => {
            (StatusCode::OK, axum::Json(EligibilityResponse { reports })).into_response()
        }
        Err(err) => {
            let payload = json!({ "error": format!("evaluation did not complete: {err}") });
            (StatusCode::INTERNAL_SERVER_ERROR, axum::Json(payload)).into_response()
        }
    }
}

pub(crate) async fn batch_handler(
    State(engine): State<Arc<EligibilityEngine>>,
    axum::Json(request): axum::Json<BatchEligibilityRequest>,
) -> Response {
    if request.datasets.is_empty() {
        let payload = json!({ "error": "batch request must include at least one dataset" });
        return (StatusCode::UNPROCESSABLE_ENTITY, axum::Json(payload)).into_response();
    }

    let jobs: Vec<DivisionJob> = request
        .datasets
        .into_iter()
        .flat_map(|dataset| DivisionJob::for_dataset(Arc::new(dataset)))
        .collect();

    if let Some(key) = DivisionJob::duplicate_key(&jobs) {
        let payload = json!({
            "error": format!("batch request lists {key} more than once"),
            "key": key,
        });
        return (StatusCode::UNPROCESSABLE_ENTITY, axum::Json(payload)).into_response();
    }

    let entries: Vec<BatchEntryView> = evaluate_batch(engine, jobs)
        .await
        .into_iter()
        .map(|outcome| match outcome.result {
            Ok(report) => BatchEntryView {
                key: outcome.key,
                report: Some(report),
                error: None,
            },
            Err(err) => BatchEntryView {
                key: outcome.key,
                report: None,
                error: Some(err.to_string()),
            },
        })
        .collect();

    (StatusCode::OK, axum::Json(json!({ "outcomes": entries }))).into_response()
}
