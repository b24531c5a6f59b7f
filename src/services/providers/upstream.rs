/// Client for the external recommendation API
///
/// API Flow:
/// 1. First page: POST /recommendations → creates the recommendation session
///    upstream and returns the first page
/// 2. Later pages: GET /recommendations/{session_id}/details?...&page=N
///
/// Both responses are wrapped in an envelope carrying its own `status_code`;
/// only HTTP 200 with an embedded 200 counts as success.
use crate::{
    error::{AppError, AppResult},
    models::{PageRequest, RawEntity, RecommendationPage, SearchType},
    services::providers::RecommendationProvider,
};
use reqwest::{Client as HttpClient, StatusCode, Url};
use serde::Deserialize;
use serde_json::{json, Value};

/// How much of each response body goes into the logs
const LOG_PREVIEW_CHARS: usize = 300;

/// Leading characters of a response body, for logging
fn preview(body: &str) -> String {
    body.chars().take(LOG_PREVIEW_CHARS).collect()
}

#[derive(Debug, Deserialize)]
struct ApiEnvelope {
    #[serde(default)]
    status_code: Option<i64>,
    #[serde(default)]
    recommendations: Option<ApiFeed>,
}

#[derive(Debug, Default, Deserialize)]
struct ApiFeed {
    #[serde(default)]
    recommendations: Vec<RawEntity>,
    #[serde(default)]
    has_next_page: bool,
}

#[derive(Clone)]
pub struct UpstreamProvider {
    http_client: HttpClient,
    api_url: String,
}

impl UpstreamProvider {
    pub fn new(api_url: impl Into<String>) -> Self {
        Self {
            http_client: HttpClient::new(),
            api_url: api_url.into().trim_end_matches('/').to_string(),
        }
    }

    /// Body of the session-creating request
    fn create_body(request: &PageRequest) -> Value {
        let mut body = json!({
            "session_id": request.session_id,
            "selected_category": request.category.value(),
        });
        body[request.search_type.query_field()] = json!(request.query);
        body["is_tags_only"] = json!(request.search_type == SearchType::Tag);
        body
    }

    fn details_url(&self, session_id: &str) -> AppResult<Url> {
        let mut url = Url::parse(&self.api_url)
            .map_err(|e| AppError::Internal(format!("Invalid API base URL: {}", e)))?;
        url.path_segments_mut()
            .map_err(|_| AppError::Internal("API base URL cannot carry a path".to_string()))?
            .pop_if_empty()
            .extend(["recommendations", session_id, "details"]);
        Ok(url)
    }

    /// GET request for a later page, with its query string applied
    fn details_request(&self, request: &PageRequest) -> AppResult<reqwest::Request> {
        let session_id = request.session_id.as_deref().ok_or_else(|| {
            AppError::InvalidInput(
                "session_id is required to continue a recommendation session".to_string(),
            )
        })?;

        let url = self.details_url(session_id)?;
        let query = request.query.as_deref().unwrap_or_default();
        let page = request.page.to_string();

        let built = self
            .http_client
            .get(url)
            .query(&[
                ("recommendation_category", request.category.value()),
                (request.search_type.query_field(), query),
                ("page", page.as_str()),
            ])
            .build()?;
        Ok(built)
    }

    async fn create(&self, request: &PageRequest) -> AppResult<RecommendationPage> {
        let url = format!("{}/recommendations", self.api_url);
        let body = Self::create_body(request);

        tracing::info!(url = %url, body = %body, "Creating recommendation session upstream");

        let response = self.http_client.post(&url).json(&body).send().await?;
        self.read_page(response).await
    }

    async fn continue_session(&self, request: &PageRequest) -> AppResult<RecommendationPage> {
        let built = self.details_request(request)?;

        tracing::info!(
            url = %built.url(),
            category = %request.category,
            page = request.page,
            "Fetching next recommendation page upstream"
        );

        let response = self.http_client.execute(built).await?;
        self.read_page(response).await
    }

    async fn read_page(&self, response: reqwest::Response) -> AppResult<RecommendationPage> {
        let status = response.status();
        let failure = response.error_for_status_ref().err();
        let body = response.text().await?;

        tracing::info!(status = %status, body = %preview(&body), "Upstream response");

        if let Some(e) = failure {
            return Err(e.into());
        }

        if status != StatusCode::OK {
            return Err(AppError::UpstreamFormat(format!(
                "expected HTTP 200, got {}",
                status
            )));
        }

        let envelope: ApiEnvelope = serde_json::from_str(&body)
            .map_err(|e| AppError::UpstreamFormat(format!("malformed envelope: {}", e)))?;

        match envelope.status_code {
            Some(200) => {}
            Some(code) => {
                return Err(AppError::UpstreamFormat(format!(
                    "embedded status_code {}",
                    code
                )))
            }
            None => {
                return Err(AppError::UpstreamFormat(
                    "response is missing status_code".to_string(),
                ))
            }
        }

        let feed = envelope.recommendations.unwrap_or_default();

        tracing::info!(
            results = feed.recommendations.len(),
            has_next = feed.has_next_page,
            provider = "upstream",
            "Recommendation page fetched"
        );

        Ok(RecommendationPage {
            entities: feed.recommendations,
            has_next: feed.has_next_page,
        })
    }
}

#[async_trait::async_trait]
impl RecommendationProvider for UpstreamProvider {
    async fn fetch_page(&self, request: &PageRequest) -> AppResult<RecommendationPage> {
        if request.page <= 1 {
            self.create(request).await
        } else {
            self.continue_session(request).await
        }
    }

    fn name(&self) -> &'static str {
        "upstream"
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::Category;

    fn request(search_type: SearchType, query: &str, page: u32) -> PageRequest {
        PageRequest {
            session_id: Some("5f0e7a34-0d55-4c55-9f35-2b8f3e1f6a10".to_string()),
            category: Category::Books,
            query: Some(query.to_string()),
            search_type,
            page,
        }
    }

    #[test]
    fn test_create_body_for_message_search() {
        let body = UpstreamProvider::create_body(&request(SearchType::Message, "like Gatsby", 1));
        assert_eq!(
            body,
            json!({
                "session_id": "5f0e7a34-0d55-4c55-9f35-2b8f3e1f6a10",
                "selected_category": "Books",
                "user_message": "like Gatsby",
                "is_tags_only": false
            })
        );
    }

    #[test]
    fn test_create_body_for_tag_search() {
        let body = UpstreamProvider::create_body(&request(SearchType::Tag, "tag-book-classic", 1));
        assert_eq!(body["selected_tag_id"], "tag-book-classic");
        assert_eq!(body["is_tags_only"], true);
        assert!(body.get("user_message").is_none());
    }

    #[test]
    fn test_details_url() {
        let provider = UpstreamProvider::new("http://localhost:5000/");
        let url = provider.details_url("abc-123").unwrap();
        assert_eq!(url.as_str(), "http://localhost:5000/recommendations/abc-123/details");
    }

    #[test]
    fn test_details_url_escapes_session_id() {
        let provider = UpstreamProvider::new("http://localhost:5000");
        let url = provider.details_url("a/b").unwrap();
        assert_eq!(url.as_str(), "http://localhost:5000/recommendations/a%2Fb/details");
    }

    #[test]
    fn test_details_request_carries_search_and_page() {
        let provider = UpstreamProvider::new("http://localhost:5000");
        let built = provider
            .details_request(&request(SearchType::Tag, "tag-book-classic", 3))
            .unwrap();
        assert_eq!(built.method(), reqwest::Method::GET);
        assert_eq!(
            built.url().as_str(),
            "http://localhost:5000/recommendations/5f0e7a34-0d55-4c55-9f35-2b8f3e1f6a10/details\
             ?recommendation_category=Books&selected_tag_id=tag-book-classic&page=3"
        );
    }

    #[test]
    fn test_preview_truncates_on_char_boundaries() {
        let body = "é".repeat(LOG_PREVIEW_CHARS + 10);
        assert_eq!(preview(&body).chars().count(), LOG_PREVIEW_CHARS);
        assert_eq!(preview("short"), "short");
    }

    #[tokio::test]
    async fn test_continue_without_session_id_is_invalid_input() {
        let provider = UpstreamProvider::new("http://localhost:5000");
        let mut req = request(SearchType::Message, "more", 2);
        req.session_id = None;

        let result = provider.fetch_page(&req).await;
        assert!(matches!(result, Err(AppError::InvalidInput(_))));
    }
}
