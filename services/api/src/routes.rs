use crate::infra::{parse_grade, AppState};
use axum::extract::Path;
use axum::http::{header, StatusCode};
use axum::response::{IntoResponse, Response};
use axum::Extension;
use axum::Json;
use chrono::{DateTime, Utc};
use robo_awards::awards::router::EligibilityResponse;
use robo_awards::awards::{
    eligibility_router, AwardCategory, CacheKey, DivisionRef, EligibilityEngine, GradeBand,
    ProgramCategory, TeamId,
};
use robo_awards::error::AppError;
use robo_awards::imports::DatasetImporter;
use serde::{Deserialize, Serialize};
use serde_json::json;
use std::io::Cursor;
use std::sync::Arc;

#[derive(Debug, Deserialize)]
pub(crate) struct CsvEligibilityRequest {
    #[serde(default)]
    pub(crate) program: Option<ProgramCategory>,
    #[serde(default)]
    pub(crate) division: Option<DivisionRef>,
    #[serde(default)]
    pub(crate) awards: Vec<String>,
    #[serde(default)]
    pub(crate) category: Option<AwardCategory>,
    pub(crate) teams_csv: String,
    pub(crate) rankings_csv: String,
    pub(crate) skills_csv: String,
}

#[derive(Debug, Serialize)]
pub(crate) struct WorldSkillsEntryView {
    pub(crate) program: ProgramCategory,
    pub(crate) grade: GradeBand,
    pub(crate) team_id: TeamId,
    pub(crate) team_number: String,
    pub(crate) rank: u32,
    pub(crate) programming_score: u32,
    pub(crate) driver_score: u32,
    pub(crate) combined_score: u32,
    pub(crate) refreshed_at: DateTime<Utc>,
}

pub(crate) fn with_application_routes(engine: Arc<EligibilityEngine>) -> axum::Router {
    eligibility_router(engine)
        .route("/health", axum::routing::get(healthcheck))
        .route("/ready", axum::routing::get(readiness_endpoint))
        .route("/metrics", axum::routing::get(metrics_endpoint))
        .route(
            "/api/v1/eligibility/csv",
            axum::routing::post(csv_eligibility_endpoint),
        )
        .route(
            "/api/v1/world-skills/:grade/:team_id",
            axum::routing::get(world_skills_endpoint),
        )
}

pub(crate) async fn healthcheck() -> Json<serde_json::Value> {
    Json(json!({ "status": "ok" }))
}

pub(crate) async fn readiness_endpoint(Extension(state): Extension<AppState>) -> impl IntoResponse {
    let ready = state.readiness.load(std::sync::atomic::Ordering::Relaxed);
    let status = if ready {
        StatusCode::OK
    } else {
        StatusCode::SERVICE_UNAVAILABLE
    };

    let payload = if ready {
        json!({ "status": "ready" })
    } else {
        json!({ "status": "initializing" })
    };

    (status, Json(payload))
}

pub(crate) async fn metrics_endpoint(Extension(state): Extension<AppState>) -> impl IntoResponse {
    (
        StatusCode::OK,
        [(header::CONTENT_TYPE, "text/plain; version=0.0.4")],
        state.metrics.render(),
    )
}

pub(crate) async fn csv_eligibility_endpoint(
    Extension(state): Extension<AppState>,
    Json(payload): Json<CsvEligibilityRequest>,
) -> Result<Json<EligibilityResponse>, AppError> {
    let CsvEligibilityRequest {
        program,
        division,
        awards,
        category,
        teams_csv,
        rankings_csv,
        skills_csv,
    } = payload;

    let program = program.unwrap_or(state.program);
    let engine = state.engine.clone();

    let reports = tokio::task::spawn_blocking(move || -> Result<_, AppError> {
        let dataset = DatasetImporter::new(program)
            .with_division(division.unwrap_or_default())
            .with_awards(awards)
            .import_readers(
                Cursor::new(teams_csv.into_bytes()),
                Cursor::new(rankings_csv.into_bytes()),
                Cursor::new(skills_csv.into_bytes()),
            )?;

        Ok(match category {
            Some(category) => vec![engine.evaluate_category(&dataset, category)],
            None => engine.evaluate(&dataset),
        })
    })
    .await??;

    Ok(Json(EligibilityResponse { reports }))
}

pub(crate) async fn world_skills_endpoint(
    Extension(state): Extension<AppState>,
    Path((grade, team_id)): Path<(String, u32)>,
) -> Result<Response, AppError> {
    let key = CacheKey::new(state.program, parse_grade(&grade));
    let team_id = TeamId(team_id);

    let cache = state
        .world_skills
        .read()
        .unwrap_or_else(|poisoned| poisoned.into_inner());
    let snapshot = cache.snapshot(key)?;

    let Some(entry) = snapshot.get(team_id) else {
        let payload = json!({ "error": format!("team {team_id} has no world skills entry") });
        return Ok((StatusCode::NOT_FOUND, Json(payload)).into_response());
    };

    let view = WorldSkillsEntryView {
        program: key.program,
        grade: key.grade,
        team_id,
        team_number: entry.team.number.clone(),
        rank: entry.rank,
        programming_score: entry.programming.score,
        driver_score: entry.driver.score,
        combined_score: entry.combined_score(),
        refreshed_at: snapshot.refreshed_at,
    };

    Ok((StatusCode::OK, Json(view)).into_response())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::infra::FileWorldSkillsSource;
    use axum::body::Body;
    use axum::http::Request;
    use metrics_exporter_prometheus::PrometheusBuilder;
    use robo_awards::awards::{ChallengeScore, SkillsRanking, TeamRef, WorldSkillsCache};
    use std::collections::HashMap;
    use std::sync::atomic::AtomicBool;
    use tower::ServiceExt;

    fn app_state(ready: bool) -> AppState {
        let mut cache = WorldSkillsCache::new();
        let source = FileWorldSkillsSource::new(
            ProgramCategory::V5rc,
            HashMap::from([(
                GradeBand::HighSchool,
                vec![
                    SkillsRanking::new(
                        TeamRef::new(TeamId(77), "77H"),
                        4,
                        ChallengeScore::new(55, 3),
                        ChallengeScore::new(90, 3),
                    ),
                    SkillsRanking::new(
                        TeamRef::new(TeamId(88), "88X"),
                        9,
                        ChallengeScore::new(u32::MAX, 1),
                        ChallengeScore::new(10, 1),
                    ),
                ],
            )]),
        );
        cache
            .refresh(ProgramCategory::V5rc, &source)
            .expect("fixture refresh");

        let world_skills = cache.shared();
        AppState {
            readiness: Arc::new(AtomicBool::new(ready)),
            metrics: Arc::new(PrometheusBuilder::new().build_recorder().handle()),
            engine: Arc::new(EligibilityEngine::default().with_world_skills(world_skills.clone())),
            world_skills,
            program: ProgramCategory::V5rc,
        }
    }

    fn app(state: AppState) -> axum::Router {
        with_application_routes(state.engine.clone()).layer(Extension(state))
    }

    async fn read_json_body(response: Response) -> serde_json::Value {
        let body = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .expect("body readable");
        serde_json::from_slice(&body).expect("json body")
    }

    fn csv_request(awards: Vec<String>) -> CsvEligibilityRequest {
        let mut teams = String::from("Team ID,Number,Grade\n");
        let mut rankings = String::from("Team ID,Number,Rank\n");
        let mut skills = String::from("Team ID,Number,Rank,Programming Score,");
        skills.push_str("Programming Attempts,Driver Score,Driver Attempts\n");
        for id in 1..=4 {
            teams.push_str(&format!("{id},{id}C,High School\n"));
            rankings.push_str(&format!("{id},{id}C,{id}\n"));
            skills.push_str(&format!("{id},{id}C,{id},{},1,{},1\n", 50 - id, 80 - id));
        }

        CsvEligibilityRequest {
            program: None,
            division: None,
            awards,
            category: Some(AwardCategory::AllAround),
            teams_csv: teams,
            rankings_csv: rankings,
            skills_csv: skills,
        }
    }

    #[tokio::test]
    async fn readiness_reflects_startup_state() {
        let response = app(app_state(false))
            .oneshot(Request::get("/ready").body(Body::empty()).unwrap())
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::SERVICE_UNAVAILABLE);

        let response = app(app_state(true))
            .oneshot(Request::get("/ready").body(Body::empty()).unwrap())
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::OK);
    }

    #[tokio::test]
    async fn healthcheck_reports_ok() {
        let Json(body) = healthcheck().await;
        assert_eq!(body["status"], "ok");
    }

    #[tokio::test]
    async fn csv_endpoint_evaluates_uploaded_exports() {
        let Json(body) = csv_eligibility_endpoint(
            Extension(app_state(true)),
            Json(csv_request(vec!["All-Around Champion".to_string()])),
        )
        .await
        .expect("csv evaluates");

        assert_eq!(body.reports.len(), 1);
        let report = &body.reports[0];
        assert!(report.award_offered);
        let eligible: Vec<u32> = report.eligible.iter().map(|team| team.id.0).collect();
        assert_eq!(eligible, vec![1, 2]);
        assert_eq!(
            report.reasons(TeamId(3)),
            [
                "Qualifier Ranking: 3 (cutoff: 2)".to_string(),
                "Skills Ranking: 3 (cutoff: 2)".to_string(),
            ]
        );
    }

    #[tokio::test]
    async fn csv_endpoint_rejects_malformed_rows() {
        let mut request = csv_request(Vec::new());
        request.rankings_csv = "Team ID,Number,Rank\nabc,1C,1\n".to_string();

        let err = csv_eligibility_endpoint(Extension(app_state(true)), Json(request))
            .await
            .expect_err("bad team id");

        assert_eq!(err.into_response().status(), StatusCode::BAD_REQUEST);
    }

    #[tokio::test]
    async fn world_skills_lookup_returns_cached_entry() {
        let response = app(app_state(true))
            .oneshot(
                Request::get("/api/v1/world-skills/high_school/77")
                    .body(Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::OK);
        let body = read_json_body(response).await;
        assert_eq!(body["rank"], 4);
        assert_eq!(body["combined_score"], 145);
        assert_eq!(body["grade"], "high_school");
    }

    #[tokio::test]
    async fn world_skills_combined_score_saturates_on_oversized_exports() {
        let response = app(app_state(true))
            .oneshot(
                Request::get("/api/v1/world-skills/high_school/88")
                    .body(Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::OK);
        let body = read_json_body(response).await;
        assert_eq!(body["combined_score"], u64::from(u32::MAX));
    }

    #[tokio::test]
    async fn world_skills_lookup_distinguishes_missing_team_and_partition() {
        let response = app(app_state(true))
            .oneshot(
                Request::get("/api/v1/world-skills/middle-school/77")
                    .body(Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap();
        // refresh stores an empty snapshot for grades the export omits
        assert_eq!(response.status(), StatusCode::NOT_FOUND);

        let response = app(app_state(true))
            .oneshot(
                Request::get("/api/v1/world-skills/college/77")
                    .body(Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::NOT_FOUND);
        let body = read_json_body(response).await;
        assert!(body["error"]
            .as_str()
            .is_some_and(|message| message.contains("have not been loaded")));
    }

    #[tokio::test]
    async fn engine_routes_are_mounted() {
        let dataset = json!({ "dataset": { "teams": [], "rankings": [], "skills": [] } });
        let response = app(app_state(true))
            .oneshot(
                Request::post("/api/v1/eligibility")
                    .header(header::CONTENT_TYPE, "application/json")
                    .body(Body::from(serde_json::to_vec(&dataset).unwrap()))
                    .unwrap(),
            )
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::OK);
        let body = read_json_body(response).await;
        assert_eq!(body["reports"].as_array().map(Vec::len), Some(2));
    }
}
