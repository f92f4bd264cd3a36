//! HTTP route handlers.

use std::path::Path;

use askama::Template;
use axum::body::Bytes;
use axum::{
    Json, Router,
    extract::State,
    http::{HeaderMap, StatusCode, header},
    response::{Html, IntoResponse, Response},
    routing::{get, post},
};
use chrono::Local;
use serde::de::DeserializeOwned;
use tower_http::cors::CorsLayer;
use tower_http::services::ServeDir;
use tower_http::trace::TraceLayer;
use tracing::{error, warn};

use crate::domain::GeoPoint;
use crate::triage::{
    Rankable, RecommendRequest, WaitTimeSource, nearby_facilities, rank_facilities, rank_nearby,
};

use super::dto::*;
use super::state::AppState;
use super::templates::*;

const MISSING_FACILITIES: &str = "Missing or empty \"hospitals\" array in request body";
const INVALID_SEVERITY: &str = "\"severity\" must be 1 (low), 2 (moderate), or 3 (severe)";
const INVALID_LOCATION: &str = "latitude and longitude are required numbers";

/// Create the application router.
///
/// `static_dir` is the path to the static assets directory.
pub fn create_router(state: AppState, static_dir: impl AsRef<Path>) -> Router {
    Router::new()
        .route("/", get(index_page))
        .route("/health", get(health))
        .route("/hospitals", post(nearby))
        .route("/waittimes", post(wait_times))
        .route("/rank", post(rank))
        .route("/recommend", post(recommend_facilities))
        .nest_service("/static", ServeDir::new(static_dir.as_ref()))
        .layer(CorsLayer::permissive())
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

/// Health check endpoint.
async fn health() -> &'static str {
    "ok"
}

/// Index page with the recommendation form.
async fn index_page() -> impl IntoResponse {
    Html(
        IndexTemplate
            .render()
            .unwrap_or_else(|e| format!("Template error: {}", e)),
    )
}

/// Check if request accepts HTML.
fn accepts_html(headers: &HeaderMap) -> bool {
    headers
        .get(header::ACCEPT)
        .and_then(|v| v.to_str().ok())
        .is_some_and(|accept| accept.contains("text/html"))
}

/// Parse a JSON body, treating an empty body as `{}`.
///
/// Parsed manually so the body can be logged on failure.
fn parse_body<T: DeserializeOwned + Default>(body: &Bytes) -> Result<T, AppError> {
    if body.iter().all(u8::is_ascii_whitespace) {
        return Ok(T::default());
    }

    serde_json::from_slice(body).map_err(|e| {
        warn!(body = %String::from_utf8_lossy(body), "JSON parse error: {e}");
        AppError::BadRequest {
            message: format!("Invalid JSON: {e}"),
        }
    })
}

/// Validate a latitude/longitude pair from loose JSON values.
fn parse_location(
    latitude: Option<&serde_json::Value>,
    longitude: Option<&serde_json::Value>,
) -> Result<GeoPoint, AppError> {
    let bad_request = |message: String| AppError::BadRequest { message };

    let (Some(lat), Some(lng)) = (number_value(latitude), number_value(longitude)) else {
        return Err(bad_request(INVALID_LOCATION.to_string()));
    };

    GeoPoint::new(lat, lng).map_err(|e| bad_request(e.to_string()))
}

/// Look up the facilities nearest to a point.
async fn nearby(State(state): State<AppState>, body: Bytes) -> Result<Response, AppError> {
    let req: NearbyRequest = parse_body(&body)?;
    let origin = parse_location(req.latitude.as_ref(), req.longitude.as_ref())?;

    let facilities = state.registry.facilities().await;
    let nearby = nearby_facilities(facilities, origin, state.config.max_nearby);

    let results: Vec<NearbyFacilityResult> =
        nearby.iter().map(NearbyFacilityResult::from_facility).collect();

    Ok(Json(ApiResponse::ok(results)).into_response())
}

/// Attach estimated wait times to client-supplied facilities.
async fn wait_times(State(state): State<AppState>, body: Bytes) -> Result<Response, AppError> {
    let req: WaitTimesRequest = parse_body(&body)?;

    let facilities = req
        .facilities
        .filter(|f| !f.is_empty())
        .ok_or_else(|| AppError::BadRequest {
            message: MISSING_FACILITIES.to_string(),
        })?;

    if facilities.iter().any(|f| f.valid_name().is_none()) {
        return Err(AppError::BadRequest {
            message: "Each hospital must have a \"name\" field".to_string(),
        });
    }

    let names = facilities.iter().filter_map(FacilityPayload::valid_name);
    let snapshot = state
        .wait_times
        .snapshot(names, Local::now().naive_local())
        .await;

    let results: Vec<FacilityPayload> = facilities
        .into_iter()
        .map(|mut f| {
            let wait = snapshot.wait_time(f.valid_name().unwrap_or_default());
            f.wait_time = Some(wait.minutes.into());
            f.wait_time_estimated = Some(wait.estimated);
            f
        })
        .collect();

    Ok(Json(ApiResponse::ok(results)).into_response())
}

/// Rank client-supplied facilities by severity.
async fn rank(body: Bytes) -> Result<Response, AppError> {
    let req: RankRequest = parse_body(&body)?;

    let facilities = req
        .facilities
        .filter(|f| !f.is_empty())
        .ok_or_else(|| AppError::BadRequest {
            message: MISSING_FACILITIES.to_string(),
        })?;

    let severity = severity_value(req.severity.as_ref()).ok_or_else(|| AppError::BadRequest {
        message: INVALID_SEVERITY.to_string(),
    })?;

    let complete = facilities.iter().all(|f| {
        f.valid_name().is_some() && f.travel_minutes().is_some() && f.wait_minutes().is_some()
    });
    if !complete {
        return Err(AppError::BadRequest {
            message: "Each hospital must have \"name\", \"travelTime\", and \"waitTime\""
                .to_string(),
        });
    }

    let top3: Vec<RankedFacilityResult> = rank_facilities(facilities, severity)
        .into_iter()
        .map(RankedFacilityResult::from)
        .collect();

    Ok(Json(ApiResponse::ok(RankResponse { top3 })).into_response())
}

/// Rank registry facilities near a point for a severity.
async fn recommend_facilities(
    State(state): State<AppState>,
    headers: HeaderMap,
    body: Bytes,
) -> Result<Response, AppError> {
    let req: RecommendHttpRequest = parse_body(&body)?;
    let origin = parse_location(req.latitude.as_ref(), req.longitude.as_ref())?;
    let severity = severity_value(req.severity.as_ref()).ok_or_else(|| AppError::BadRequest {
        message: INVALID_SEVERITY.to_string(),
    })?;

    let facilities = state.registry.facilities().await;
    let nearby = nearby_facilities(facilities, origin, state.config.max_nearby);
    let waits = state.wait_times.snapshot_now(&nearby).await;

    let request = RecommendRequest { origin, severity };
    let recommendation = rank_nearby(nearby, &request, &waits, &state.config);

    // Return HTML or JSON based on Accept header
    if accepts_html(&headers) {
        let template = RankedListTemplate {
            facilities: recommendation
                .ranked
                .iter()
                .map(RankedFacilityView::from_ranked)
                .collect(),
            severity_label: severity.label().to_string(),
        };
        let html = template.render().map_err(|e| AppError::Internal {
            message: format!("Template error: {}", e),
        })?;

        Ok(Html(html).into_response())
    } else {
        let top3: Vec<RecommendedFacilityResult> = recommendation
            .ranked
            .iter()
            .map(RecommendedFacilityResult::from_ranked)
            .collect();

        Ok(Json(ApiResponse::ok(RankResponse { top3 })).into_response())
    }
}

/// Application error type.
#[derive(Debug)]
pub enum AppError {
    BadRequest { message: String },
    Internal { message: String },
}

impl IntoResponse for AppError {
    fn into_response(self) -> axum::response::Response {
        let (status, message) = match self {
            AppError::BadRequest { message } => {
                warn!(status = 400, "{message}");
                (StatusCode::BAD_REQUEST, message)
            }
            AppError::Internal { message } => {
                error!(status = 500, "{message}");
                (StatusCode::INTERNAL_SERVER_ERROR, message)
            }
        };

        let body = Json(ErrorResponse { error: message });
        (status, body).into_response()
    }
}
