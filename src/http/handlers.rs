//! HTTP request handlers for the Crispy UI.

use std::sync::Arc;

use axum::extract::{RawQuery, State};
use axum::http::StatusCode;
use axum::response::Html;
use axum::Json;
use serde::Serialize;

use super::page::{self, Body, Page};
use super::params::{self, SearchParams};
use super::AppState;
use crate::results::{present, FilterSelection, Presentation, ResultsView, CRAVING_MESSAGE};
use crate::search::check_query;

/// Build the axum router with all routes
pub(super) fn router(state: Arc<AppState>) -> axum::Router {
    use axum::routing::get;
    use tower_http::cors::CorsLayer;
    use tower_http::trace::TraceLayer;

    axum::Router::new()
        .route("/", get(index))
        .route("/api/search", get(api_search))
        .route("/health", get(health))
        .layer(CorsLayer::permissive())
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

/// Error response body
#[derive(Serialize)]
struct ErrorBody {
    error: String,
}

fn bad_request(error: String) -> (StatusCode, Json<ErrorBody>) {
    (StatusCode::BAD_REQUEST, Json(ErrorBody { error }))
}

/// Outcome of one full search interaction.
enum Outcome {
    Failed(String),
    Craving,
    Results(ResultsView),
}

/// Query, present and resolve images for one request.
async fn evaluate(state: &AppState, query: &str, params: &SearchParams) -> Outcome {
    let raw = match state.client.search(query).await {
        Ok(raw) => raw,
        Err(e) => {
            tracing::error!("Search failed: {}", e);
            return Outcome::Failed(e.to_string());
        }
    };

    match present(&raw, &params.selection, state.config.display.columns) {
        Presentation::Craving => Outcome::Craving,
        Presentation::Results(mut view) => {
            if state.config.display.fetch_images {
                state.images.resolve_grid(&mut view.rows).await;
            }
            Outcome::Results(view)
        }
    }
}

// -- / --

fn render_page(
    state: &AppState,
    query: Option<&str>,
    selection: &FilterSelection,
    body: Body<'_>,
) -> Html<String> {
    let display = &state.config.display;
    Html(page::render(&Page {
        query,
        selection,
        body,
        columns: display.columns,
        image_width: display.image_width,
    }))
}

async fn index(State(state): State<Arc<AppState>>, RawQuery(raw): RawQuery) -> Html<String> {
    let params = match params::parse(raw.as_deref()) {
        Ok(p) => p,
        Err(e) => {
            let query = params::query_text(raw.as_deref());
            let selection = FilterSelection::default();
            return render_page(&state, query.as_deref(), &selection, Body::Error(&e));
        }
    };

    let Some(query) = params.q.as_deref() else {
        return render_page(&state, None, &params.selection, Body::Landing);
    };
    if let Err(e) = check_query(query) {
        return render_page(&state, Some(query), &params.selection, Body::Error(&e));
    }

    match evaluate(&state, query, &params).await {
        Outcome::Failed(message) => {
            render_page(&state, Some(query), &params.selection, Body::Error(&message))
        }
        Outcome::Craving => render_page(&state, Some(query), &params.selection, Body::Craving),
        Outcome::Results(view) => {
            render_page(&state, Some(query), &params.selection, Body::Results(&view))
        }
    }
}

// -- /api/search --

#[derive(Serialize)]
#[serde(untagged)]
enum ApiResponse {
    Results {
        query: String,
        #[serde(flatten)]
        view: ResultsView,
    },
    Empty {
        status: &'static str,
        message: &'static str,
    },
}

async fn api_search(
    State(state): State<Arc<AppState>>,
    RawQuery(raw): RawQuery,
) -> Result<Json<ApiResponse>, (StatusCode, Json<ErrorBody>)> {
    let params = params::parse(raw.as_deref()).map_err(bad_request)?;
    let query = params
        .q
        .clone()
        .ok_or_else(|| bad_request("missing query parameter 'q'".into()))?;
    check_query(&query).map_err(bad_request)?;

    match evaluate(&state, &query, &params).await {
        Outcome::Failed(error) => Err((StatusCode::BAD_GATEWAY, Json(ErrorBody { error }))),
        Outcome::Craving => Ok(Json(ApiResponse::Empty {
            status: "empty",
            message: CRAVING_MESSAGE,
        })),
        Outcome::Results(view) => Ok(Json(ApiResponse::Results { query, view })),
    }
}

// -- /health --

#[derive(Serialize)]
struct HealthResponse {
    status: &'static str,
}

async fn health() -> Json<HealthResponse> {
    Json(HealthResponse { status: "ok" })
}
