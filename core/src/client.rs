//! Stateless HTTP request builder and response parser for the NYT API.
//!
//! # Design
//! `NytClient` holds only its `ApiConfig` and carries no mutable state between
//! calls. Each endpoint is split into a `build_*` method that produces an
//! `HttpRequest` and a `parse_*` method that consumes an `HttpResponse`.
//! `search_articles` / `list_tags` glue the two together over any
//! `Transport`.

use serde::de::DeserializeOwned;

use crate::config::{ApiConfig, ARTICLE_SEARCH_PATH, TIMES_TAGS_PATH};
use crate::error::ApiError;
use crate::http::{HttpRequest, HttpResponse};
use crate::query;
use crate::tags::{parse_suggestions, ListTagsRequest, ListTagsResponse};
use crate::transport::Transport;
use crate::types::{SearchArticlesRequest, SearchArticlesResponse};

/// Synchronous, stateless client for the Article Search and TimesTags APIs.
#[derive(Debug, Clone)]
pub struct NytClient {
    config: ApiConfig,
}

impl NytClient {
    pub fn new(config: ApiConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &ApiConfig {
        &self.config
    }

    pub fn build_search_articles(
        &self,
        request: &SearchArticlesRequest,
    ) -> Result<HttpRequest, ApiError> {
        let api_key = self.config.require_api_key()?;
        let params = query::article_search_params(request, api_key);
        let url = query::encode_url(&self.config.endpoint(ARTICLE_SEARCH_PATH), &params)?;
        Ok(get(url.into()))
    }

    pub fn build_list_tags(&self, request: &ListTagsRequest) -> Result<HttpRequest, ApiError> {
        request.validate()?;
        let api_key = self.config.require_api_key()?;
        let params = query::list_tags_params(request, api_key);
        let url = query::encode_url(&self.config.endpoint(TIMES_TAGS_PATH), &params)?;
        Ok(get(url.into()))
    }

    pub fn parse_search_articles(
        &self,
        response: HttpResponse,
    ) -> Result<SearchArticlesResponse, ApiError> {
        check_status(&response)?;
        decode(&response.body)
    }

    /// Decode a suggest response: `["<query>", ["<suggestion>", ...], ...]`.
    ///
    /// Suggestions that do not parse are logged and dropped.
    pub fn parse_list_tags(&self, response: HttpResponse) -> Result<ListTagsResponse, ApiError> {
        check_status(&response)?;
        let envelope: Vec<serde_json::Value> = decode(&response.body)?;
        let raw = envelope.into_iter().nth(1).ok_or_else(|| {
            ApiError::DeserializationError("expected suggestions at index 1".to_string())
        })?;
        let suggestions: Vec<String> = serde_json::from_value(raw)
            .map_err(|e| ApiError::DeserializationError(e.to_string()))?;

        let tags = parse_suggestions(&suggestions);
        tracing::debug!(
            received = suggestions.len(),
            parsed = tags.len(),
            "decoded tag suggestions"
        );
        Ok(ListTagsResponse { tags })
    }

    pub fn search_articles<T: Transport + ?Sized>(
        &self,
        transport: &T,
        request: &SearchArticlesRequest,
    ) -> Result<SearchArticlesResponse, ApiError> {
        let req = self.build_search_articles(request)?;
        self.parse_search_articles(execute(transport, &req)?)
    }

    pub fn list_tags<T: Transport + ?Sized>(
        &self,
        transport: &T,
        request: &ListTagsRequest,
    ) -> Result<ListTagsResponse, ApiError> {
        let req = self.build_list_tags(request)?;
        self.parse_list_tags(execute(transport, &req)?)
    }
}

fn get(url: String) -> HttpRequest {
    HttpRequest {
        url,
        headers: vec![("accept".to_string(), "application/json".to_string())],
    }
}

fn execute<T: Transport + ?Sized>(
    transport: &T,
    request: &HttpRequest,
) -> Result<HttpResponse, ApiError> {
    tracing::debug!(url = %query::redact_api_key(&request.url), "GET");
    let response = transport.execute(request)?;
    tracing::debug!(status = response.status, bytes = response.body.len(), "response");
    Ok(response)
}

/// Any 2xx is success; everything else carries status and body back.
fn check_status(response: &HttpResponse) -> Result<(), ApiError> {
    if response.is_success() {
        return Ok(());
    }
    Err(ApiError::HttpError {
        status: response.status,
        body: response.body.clone(),
    })
}

fn decode<T: DeserializeOwned>(body: &str) -> Result<T, ApiError> {
    serde_json::from_str(body).map_err(|e| ApiError::DeserializationError(e.to_string()))
}
