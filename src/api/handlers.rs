use axum::{
    extract::{Path, Query, State},
    http::{header, HeaderMap, HeaderValue, StatusCode},
    response::{Html, IntoResponse},
    Extension, Json,
};
use serde::Deserialize;
use serde_json::{json, Value};

use crate::error::{AppError, AppResult};
use crate::middleware::request_id::RequestId;
use crate::models::{
    CategoryInfo, RecommendationsResponse, SearchParams, SearchType, DEFAULT_CATEGORY,
    DEFAULT_TAG_NAME,
};
use crate::services::CategoryRegistry;

use super::AppState;

// Request types

/// Query string of `GET /api/recommendations`; every field is optional
#[derive(Debug, Default, Deserialize)]
pub struct RecommendationQuery {
    pub category: Option<String>,
    pub page: Option<String>,
    pub search_type: Option<String>,
    pub session_id: Option<String>,
    pub query: Option<String>,
    pub tag_name: Option<String>,
}

fn non_empty(value: Option<String>) -> Option<String> {
    value.filter(|v| !v.trim().is_empty())
}

impl RecommendationQuery {
    /// Applies defaults; a page that is not a positive integer is rejected
    pub fn into_params(self) -> AppResult<SearchParams> {
        let page = match non_empty(self.page) {
            None => 1,
            Some(raw) => raw
                .trim()
                .parse::<u32>()
                .ok()
                .filter(|page| *page >= 1)
                .ok_or_else(|| {
                    AppError::InvalidInput(format!("page must be a positive integer, got '{}'", raw))
                })?,
        };

        Ok(SearchParams {
            category: non_empty(self.category).unwrap_or_else(|| DEFAULT_CATEGORY.to_string()),
            page,
            search_type: self
                .search_type
                .as_deref()
                .map(SearchType::parse)
                .unwrap_or_default(),
            query: self.query,
            session_id: non_empty(self.session_id),
            tag_name: self.tag_name.unwrap_or_else(|| DEFAULT_TAG_NAME.to_string()),
        })
    }
}

fn set_cookie_header(value: String) -> AppResult<HeaderValue> {
    HeaderValue::from_str(&value)
        .map_err(|e| AppError::Internal(format!("Invalid session cookie: {}", e)))
}

fn escape_html(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    for ch in text.chars() {
        match ch {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#x27;"),
            other => out.push(other),
        }
    }
    out
}

// Handlers

/// Health check endpoint
pub async fn health_check() -> (StatusCode, Json<Value>) {
    (StatusCode::OK, Json(json!({ "status": "healthy" })))
}

/// List the recommendation categories
pub async fn get_categories(
    Extension(request_id): Extension<RequestId>,
) -> AppResult<Json<Vec<CategoryInfo>>> {
    let categories = CategoryRegistry::global().categories();

    tracing::info!(
        request_id = %request_id,
        count = categories.len(),
        "Serving categories"
    );

    Ok(Json(categories))
}

/// Issue a session id, or return the one already bound to this client
pub async fn create_session(
    State(state): State<AppState>,
    Extension(request_id): Extension<RequestId>,
    headers: HeaderMap,
    body: Option<Json<Value>>,
) -> AppResult<impl IntoResponse> {
    let existing = state.session_cookie.session_id(&headers);
    let (session, created) = state.sessions.get_or_create(existing).await;
    let data = body.map(|Json(data)| data).unwrap_or(Value::Null);

    tracing::info!(
        request_id = %request_id,
        session_id = %session.id,
        created,
        data = %data,
        "Session requested"
    );

    let cookie = set_cookie_header(state.session_cookie.set_cookie(&session.id))?;

    Ok((
        [(header::SET_COOKIE, cookie)],
        Json(json!({ "session_id": session.id })),
    ))
}

/// Accept session details from the client. Nothing beyond the id is kept.
pub async fn update_session(
    Extension(request_id): Extension<RequestId>,
    body: Option<Json<Value>>,
) -> AppResult<Json<Value>> {
    let data = body.map(|Json(data)| data).unwrap_or(Value::Null);

    let session_id = match data.get("session_id") {
        Some(Value::String(id)) if !id.trim().is_empty() => id.clone(),
        Some(Value::Number(id)) => id.to_string(),
        _ => return Err(AppError::InvalidInput("Session ID is required".to_string())),
    };

    tracing::info!(
        request_id = %request_id,
        session_id = %session_id,
        data = %data,
        "Updating session"
    );

    Ok(Json(json!({ "status": "success", "session_id": session_id })))
}

/// Forget the client's session
pub async fn reset_session(
    State(state): State<AppState>,
    Extension(request_id): Extension<RequestId>,
    headers: HeaderMap,
) -> AppResult<impl IntoResponse> {
    let removed = match state.session_cookie.session_id(&headers) {
        Some(id) => state.sessions.remove(&id).await,
        None => None,
    };

    tracing::info!(
        request_id = %request_id,
        session_id = ?removed.as_ref().map(|session| session.id),
        "Session reset"
    );

    let cookie = set_cookie_header(state.session_cookie.clear_cookie())?;

    Ok((
        [(header::SET_COOKIE, cookie)],
        Json(json!({ "status": "success", "message": "Session has been reset" })),
    ))
}

/// Paginated recommendations for a category and query.
///
/// Upstream failures still answer 200, with an empty feed and `error_message`.
pub async fn get_recommendations(
    State(state): State<AppState>,
    Extension(request_id): Extension<RequestId>,
    headers: HeaderMap,
    Query(query): Query<RecommendationQuery>,
) -> AppResult<Json<RecommendationsResponse>> {
    let mut params = query.into_params()?;

    if params.session_id.is_none() {
        if let Some(id) = state.session_cookie.session_id(&headers) {
            if state.sessions.get(&id).await.is_some() {
                params.session_id = Some(id.to_string());
            }
        }
    }

    tracing::info!(
        request_id = %request_id,
        category = %params.category,
        page = params.page,
        search_type = ?params.search_type,
        provider = state.router.provider_name(),
        "Processing recommendation request"
    );

    let page = params.page;
    let outcome = state.router.route(params).await;

    tracing::info!(
        request_id = %request_id,
        results = outcome.items.len(),
        has_next = outcome.has_next,
        failed = outcome.error.is_some(),
        "Recommendation request completed"
    );

    Ok(Json(RecommendationsResponse::new(outcome, page)))
}

/// Placeholder page for browsing a tag
pub async fn tag_placeholder(Path(tag_id): Path<String>) -> Html<String> {
    let tag_id = escape_html(&tag_id);
    Html(format!(
        "<h1>Searching for items with Tag ID: {}</h1>\
         <p>This page would show all recommendations associated with this tag.</p>",
        tag_id
    ))
}
