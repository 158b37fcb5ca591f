//! HTTP route handlers.

use askama::Template;
use axum::body::Bytes;
use axum::{
    Json, Router,
    extract::{Query, State, rejection::QueryRejection},
    http::{HeaderMap, StatusCode, header},
    response::{Html, IntoResponse, Response},
    routing::{get, post},
};
use tower_http::trace::TraceLayer;
use tracing::{error, warn};

use crate::domain::{Location, TravelQuery};
use crate::intent::IntentError;
use crate::recommend::{RecommendError, Recommender};

use super::dto::*;
use super::state::AppState;
use super::templates::*;

/// Default number of location suggestions.
const DEFAULT_SUGGESTIONS: usize = 5;

/// Create the application router.
pub fn create_router(state: AppState) -> Router {
    Router::new()
        .route("/", get(index_page))
        .route("/health", get(health))
        .route("/about", get(about_page))
        .route("/api/locations", get(list_locations))
        .route("/api/locations/search", get(search_locations))
        .route("/recommend", get(recommend_page))
        .route("/api/recommend", post(recommend_api))
        .route("/chat", get(chat_page))
        .route("/api/chat", post(chat_api))
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

/// Health check endpoint.
async fn health() -> &'static str {
    "ok"
}

/// Index page with the recommendation form.
async fn index_page(State(state): State<AppState>) -> impl IntoResponse {
    Html(
        IndexTemplate {
            origins: location_names(state.catalog.origins()),
            destinations: location_names(state.catalog.destinations()),
            priorities: PriorityView::all(),
        }
        .render()
        .unwrap_or_else(|e| format!("Template error: {}", e)),
    )
}

/// About page.
async fn about_page(State(state): State<AppState>) -> impl IntoResponse {
    Html(
        AboutTemplate {
            option_count: state.catalog.len(),
            location_count: state.catalog.locations().len(),
            threshold: state.resolver.config().threshold,
            extractor: state.intent.name(),
        }
        .render()
        .unwrap_or_else(|e| format!("Template error: {}", e)),
    )
}

/// List every origin and destination.
async fn list_locations(State(state): State<AppState>) -> Json<LocationsResponse> {
    Json(LocationsResponse {
        origins: location_names(state.catalog.origins()),
        destinations: location_names(state.catalog.destinations()),
    })
}

fn location_names(locations: &[Location]) -> Vec<String> {
    locations.iter().map(ToString::to_string).collect()
}

/// Suggest locations for partial input.
async fn search_locations(
    State(state): State<AppState>,
    query: Result<Query<LocationSearchRequest>, QueryRejection>,
) -> Result<Json<LocationSearchResponse>, AppError> {
    let Query(req) = query?;
    let limit = req.limit.unwrap_or(DEFAULT_SUGGESTIONS).min(50);

    let matches = match req.side {
        Some(Side::Origin) => state.resolver.search(&req.q, state.catalog.origins(), limit),
        Some(Side::Destination) => {
            state
                .resolver
                .search(&req.q, state.catalog.destinations(), limit)
        }
        None => state
            .resolver
            .search(&req.q, &state.catalog.locations(), limit),
    };

    Ok(Json(LocationSearchResponse {
        locations: matches.into_iter().map(LocationSuggestion::from).collect(),
    }))
}

/// Check if request accepts HTML.
fn accepts_html(headers: &HeaderMap) -> bool {
    headers
        .get(header::ACCEPT)
        .and_then(|v| v.to_str().ok())
        .is_some_and(|accept| accept.contains("text/html"))
}

/// Render a template, mapping failures to an internal error.
fn render(template: &impl Template) -> Result<Response, AppError> {
    let html = template.render().map_err(|e| AppError::Internal {
        message: format!("Template error: {}", e),
    })?;
    Ok(Html(html).into_response())
}

/// Recommend from query-string parameters.
async fn recommend_page(
    State(state): State<AppState>,
    headers: HeaderMap,
    query: Result<Query<RecommendParams>, QueryRejection>,
) -> Result<Response, AppError> {
    let html = accepts_html(&headers);
    let query: TravelQuery = match query {
        Ok(Query(params)) => params.into(),
        Err(e) if html => return Ok(AppError::from(e).into_html()),
        Err(e) => return Err(e.into()),
    };

    let result = Recommender::new(&state.catalog, &state.resolver).recommend(&query);

    // Return HTML or JSON based on Accept header
    match (result, html) {
        (Ok(rec), true) => render(&RecommendationTemplate {
            view: RecommendationView::from_recommendation(&rec),
        }),
        (Ok(rec), false) => {
            Ok(Json(RecommendationResponse::from_recommendation(&rec)).into_response())
        }
        (Err(e), true) => Ok(AppError::from(e).into_html()),
        (Err(e), false) => Err(e.into()),
    }
}

/// Recommend from a JSON `{origin, destination, priority}` body.
async fn recommend_api(
    State(state): State<AppState>,
    body: Bytes,
) -> Result<Json<RecommendationResponse>, AppError> {
    // Parse JSON manually so malformed bodies are a 400 with our error shape
    let query: TravelQuery = serde_json::from_slice(&body).map_err(|e| {
        warn!(body = %String::from_utf8_lossy(&body), "invalid recommend body");
        AppError::BadRequest {
            message: format!("Invalid JSON: {e}"),
        }
    })?;

    let rec = Recommender::new(&state.catalog, &state.resolver).recommend(&query)?;
    Ok(Json(RecommendationResponse::from_recommendation(&rec)))
}

/// Answer a chat message with a JSON recommendation.
async fn chat_api(
    State(state): State<AppState>,
    body: Bytes,
) -> Result<Json<ChatResponse>, AppError> {
    let req: ChatRequest = serde_json::from_slice(&body).map_err(|e| AppError::BadRequest {
        message: format!("Invalid JSON: {e}"),
    })?;
    let message = req.message.trim();
    if message.is_empty() {
        return Err(AppError::BadRequest {
            message: "message must not be empty".to_string(),
        });
    }

    let intent = state.intent.extract(message).await?;
    let rec = Recommender::new(&state.catalog, &state.resolver).recommend(&intent)?;
    let explanation = state.intent.explain(&intent, &rec).await;

    Ok(Json(ChatResponse {
        intent,
        extractor: state.intent.name(),
        reply: RecommendationView::from_recommendation(&rec).summary(),
        explanation,
        recommendation: RecommendationResponse::from_recommendation(&rec),
    }))
}

/// Answer a chat message with an HTML fragment.
async fn chat_page(
    State(state): State<AppState>,
    query: Result<Query<ChatRequest>, QueryRejection>,
) -> Response {
    match chat_fragment(&state, query).await {
        Ok(response) => response,
        Err(e) => e.into_html(),
    }
}

async fn chat_fragment(
    state: &AppState,
    query: Result<Query<ChatRequest>, QueryRejection>,
) -> Result<Response, AppError> {
    let Query(req) = query?;
    let message = req.message.trim();
    if message.is_empty() {
        return Err(AppError::BadRequest {
            message: "message must not be empty".to_string(),
        });
    }

    let intent = state.intent.extract(message).await?;
    let rec = Recommender::new(&state.catalog, &state.resolver).recommend(&intent)?;
    let explanation = state.intent.explain(&intent, &rec).await;

    render(&ChatResultTemplate {
        message: message.to_string(),
        intent,
        view: RecommendationView::from_recommendation(&rec),
        explanation,
    })
}

/// Application error type.
#[derive(Debug)]
pub enum AppError {
    BadRequest { message: String },
    Recommend(RecommendError),
    Intent(IntentError),
    Internal { message: String },
}

impl AppError {
    fn status(&self) -> StatusCode {
        match self {
            AppError::BadRequest { .. } => StatusCode::BAD_REQUEST,
            AppError::Recommend(RecommendError::NoRouteData { .. }) => StatusCode::NOT_FOUND,
            AppError::Recommend(_) => StatusCode::UNPROCESSABLE_ENTITY,
            AppError::Intent(e) if e.is_upstream() => StatusCode::BAD_GATEWAY,
            AppError::Intent(_) => StatusCode::UNPROCESSABLE_ENTITY,
            AppError::Internal { .. } => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    fn reason(&self) -> &'static str {
        match self {
            AppError::BadRequest { .. } => "bad_request",
            AppError::Recommend(e) => e.reason(),
            AppError::Intent(e) if e.is_upstream() => "intent_unavailable",
            AppError::Intent(_) => "incomplete_intent",
            AppError::Internal { .. } => "internal",
        }
    }

    fn hint(&self) -> Option<&'static str> {
        match self {
            AppError::Recommend(e) => Some(e.hint()),
            AppError::Intent(e) if e.is_upstream() => {
                Some("The assistant is unavailable; use the form instead.")
            }
            AppError::Intent(_) => Some("Mention both places and what matters most to you."),
            _ => None,
        }
    }

    fn title(&self) -> &'static str {
        match self {
            AppError::BadRequest { .. } => "Bad request",
            AppError::Recommend(RecommendError::UnresolvedLocation { .. }) => "Unknown location",
            AppError::Recommend(RecommendError::NoRouteData { .. }) => "No travel options",
            AppError::Recommend(RecommendError::UnknownPriority(_)) => "Unknown priority",
            AppError::Intent(e) if e.is_upstream() => "Assistant unavailable",
            AppError::Intent(_) => "Didn't catch that",
            AppError::Internal { .. } => "Something went wrong",
        }
    }

    fn message(&self) -> String {
        match self {
            AppError::BadRequest { message } | AppError::Internal { message } => message.clone(),
            AppError::Recommend(e) => e.to_string(),
            AppError::Intent(e) => e.to_string(),
        }
    }

    fn log(&self, status: StatusCode) {
        if status.is_server_error() {
            error!(%status, reason = self.reason(), message = %self.message(), "request failed");
        } else {
            warn!(%status, reason = self.reason(), message = %self.message(), "request rejected");
        }
    }

    /// Render as an error fragment for the browser.
    fn into_html(self) -> Response {
        let status = self.status();
        self.log(status);

        let template = ErrorTemplate {
            title: self.title().to_string(),
            message: self.message(),
            details: self.hint().map(str::to_string),
        };
        let html = template
            .render()
            .unwrap_or_else(|e| format!("Template error: {}", e));
        (status, Html(html)).into_response()
    }
}

impl From<RecommendError> for AppError {
    fn from(e: RecommendError) -> Self {
        AppError::Recommend(e)
    }
}

impl From<IntentError> for AppError {
    fn from(e: IntentError) -> Self {
        AppError::Intent(e)
    }
}

impl From<QueryRejection> for AppError {
    fn from(e: QueryRejection) -> Self {
        AppError::BadRequest {
            message: e.body_text(),
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> axum::response::Response {
        let status = self.status();
        self.log(status);

        let mut body = ErrorResponse::new(self.reason(), self.message());
        if let Some(hint) = self.hint() {
            body = body.with_hint(hint);
        }
        (status, Json(body)).into_response()
    }
}
