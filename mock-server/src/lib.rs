//! In-process stand-in for the NYT Article Search and TimesTags endpoints.
//!
//! Serves a small fixed corpus so the client crate can be exercised over real
//! HTTP without a network key.

use std::{collections::HashMap, sync::Arc};

use axum::{
    extract::{Query, State},
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::get,
    Json, Router,
};
use serde_json::{json, Value};
use tokio::net::TcpListener;

pub const ARTICLE_SEARCH_PATH: &str = "/svc/search/v2/articlesearch.json";
pub const TIMES_TAGS_PATH: &str = "/svc/suggest/v1/timestags";
pub const DEFAULT_API_KEY: &str = "test-key";

const PAGE_SIZE: usize = 10;

/// Raw suggestions the tag endpoint draws from. One entry is deliberately
/// malformed so clients see the real API's occasional junk.
pub const SUGGESTIONS: &[&str] = &[
    "Cork (Ireland) (Geo)",
    "Cork, County (Ireland) (Geo)",
    "Cork Examiner (Org)",
    "Corker, Bob (Per)",
    "Corkscrews (Des)",
    "Cork Street [sic]",
    "Corked (Ttl)",
];

#[derive(Clone)]
struct AppState {
    api_key: Arc<str>,
    docs: Arc<Vec<Value>>,
}

type Params = Query<HashMap<String, String>>;

pub fn app() -> Router {
    app_with_key(DEFAULT_API_KEY)
}

pub fn app_with_key(api_key: &str) -> Router {
    let state = AppState {
        api_key: Arc::from(api_key),
        docs: Arc::new(fixture_docs()),
    };
    Router::new()
        .route(ARTICLE_SEARCH_PATH, get(search_articles))
        .route(TIMES_TAGS_PATH, get(list_tags))
        .with_state(state)
}

pub async fn run(listener: TcpListener) -> Result<(), std::io::Error> {
    run_with_key(listener, DEFAULT_API_KEY).await
}

pub async fn run_with_key(listener: TcpListener, api_key: &str) -> Result<(), std::io::Error> {
    axum::serve(listener, app_with_key(api_key)).await
}

fn unauthorized() -> Response {
    (
        StatusCode::UNAUTHORIZED,
        Json(json!({"fault": {"faultstring": "Invalid ApiKey"}})),
    )
        .into_response()
}

fn authorized(state: &AppState, params: &HashMap<String, String>) -> bool {
    params.get("api-key").map(String::as_str) == Some(&*state.api_key)
}

async fn search_articles(State(state): State<AppState>, Query(params): Params) -> Response {
    if !authorized(&state, &params) {
        return unauthorized();
    }
    tracing::info!(q = params.get("q").map(String::as_str).unwrap_or(""), "article search");

    let q = params.get("q").map(|s| s.to_lowercase()).unwrap_or_default();
    let matching: Vec<&Value> = state
        .docs
        .iter()
        .filter(|doc| {
            q.is_empty()
                || ["snippet", "lead_paragraph"]
                    .iter()
                    .filter_map(|f| doc[*f].as_str())
                    .chain(doc["headline"]["main"].as_str())
                    .any(|text| text.to_lowercase().contains(&q))
        })
        .collect();

    let page: usize = params.get("page").and_then(|p| p.parse().ok()).unwrap_or(0);
    let offset = page * PAGE_SIZE;
    let docs: Vec<&Value> = matching.iter().skip(offset).take(PAGE_SIZE).copied().collect();

    let mut facets = serde_json::Map::new();
    if params.get("facet").map(String::as_str) == Some("true") {
        let fields = params.get("facet_fields").map(String::as_str).unwrap_or("");
        for field in fields.split(',').filter(|f| !f.is_empty()) {
            let mut counts: Vec<(String, u64)> = Vec::new();
            for doc in &matching {
                if let Some(term) = doc[field].as_str() {
                    match counts.iter_mut().find(|(t, _)| t == term) {
                        Some((_, n)) => *n += 1,
                        None => counts.push((term.to_string(), 1)),
                    }
                }
            }
            let terms: Vec<Value> = counts
                .into_iter()
                .map(|(term, count)| json!({"term": term, "count": count}))
                .collect();
            facets.insert(field.to_string(), json!({ "terms": terms }));
        }
    }

    Json(json!({
        "status": "OK",
        "copyright": "Copyright (c) 2019 The New York Times Company. All Rights Reserved.",
        "response": {
            "docs": docs,
            "meta": {"hits": matching.len(), "offset": offset, "time": 3},
            "facets": facets,
        }
    }))
    .into_response()
}

async fn list_tags(State(state): State<AppState>, Query(params): Params) -> Response {
    if !authorized(&state, &params) {
        return unauthorized();
    }
    let query = params.get("query").cloned().unwrap_or_default();
    tracing::info!(%query, "tag suggest");

    let needle = query.to_lowercase();
    let filter = params.get("filter");
    let max = params
        .get("max")
        .and_then(|m| m.parse::<usize>().ok())
        .unwrap_or(usize::MAX);

    let suggestions: Vec<&str> = SUGGESTIONS
        .iter()
        .copied()
        .filter(|s| s.to_lowercase().contains(&needle))
        .filter(|s| filter.map_or(true, |f| s.ends_with(f.as_str())))
        .take(max)
        .collect();

    (StatusCode::OK, Json(json!([query, suggestions]))).into_response()
}

fn fixture_docs() -> Vec<Value> {
    vec![
        json!({
            "web_url": "https://www.nytimes.com/2018/12/03/world/europe/cork-ireland-housing.html",
            "snippet": "Cork is growing faster than its housing stock.",
            "lead_paragraph": "CORK, Ireland — Rents in Ireland's second city have doubled.",
            "blog": {},
            "source": "The New York Times",
            "multimedia": [{
                "rank": 0,
                "subtype": "xlarge",
                "caption": null,
                "credit": null,
                "type": "image",
                "url": "images/2018/12/03/world/03cork/03cork-articleLarge.jpg",
                "height": 400,
                "width": 600,
                "legacy": {"xlarge": "images/2018/12/03/world/03cork/03cork-articleLarge.jpg"},
                "subType": "xlarge",
                "crop_name": "articleLarge"
            }],
            "headline": {
                "main": "In Cork, a Housing Squeeze",
                "kicker": null,
                "content_kicker": null,
                "print_headline": "Cork Feels the Squeeze",
                "name": null,
                "seo": null,
                "sub": null
            },
            "keywords": [
                {"name": "glocations", "value": "Cork (Ireland)", "rank": 1, "major": "N"}
            ],
            "pub_date": "2018-12-03T10:00:05+0000",
            "document_type": "article",
            "news_desk": "Foreign",
            "section_name": "World",
            "byline": {
                "original": "By Jane Doe",
                "person": [{
                    "firstname": "Jane",
                    "middlename": null,
                    "lastname": "Doe",
                    "qualifier": null,
                    "title": null,
                    "role": "reported",
                    "organization": "",
                    "rank": 1
                }],
                "organization": null
            },
            "type_of_material": "News",
            "_id": "nyt://article/6b9a2c4e-0001",
            "word_count": 1204,
            "score": 0.0
        }),
        json!({
            "web_url": "https://www.nytimes.com/2018/12/15/opinion/climate-ireland.html",
            "snippet": "Ireland's climate targets are slipping.",
            "lead_paragraph": "The government promised much and delivered little.",
            "source": "The New York Times",
            "multimedia": [],
            "headline": {"main": "Ireland Is Missing Its Climate Goals", "kicker": "Opinion"},
            "keywords": [],
            "pub_date": "2018-12-15T08:30:00+0000",
            "document_type": "article",
            "section_name": "Opinion",
            "byline": {"original": "By The Editorial Board", "person": [], "organization": "The Editorial Board"},
            "type_of_material": "Editorial",
            "_id": "nyt://article/6b9a2c4e-0002",
            "word_count": 640,
            "score": 0.0
        }),
        json!({
            "web_url": "https://www.nytimes.com/2018/12/28/sports/hurling-cork.html",
            "snippet": "Cork's hurlers look ahead to a new season.",
            "lead_paragraph": "",
            "source": "International New York Times",
            "multimedia": [],
            "headline": {"main": "Cork Hurlers Regroup", "kicker": null},
            "keywords": [],
            "pub_date": "2018-12-28T19:12:44+0000",
            "document_type": "article",
            "section_name": "Sports",
            "byline": {"original": null, "person": [], "organization": null},
            "type_of_material": "News",
            "_id": "nyt://article/6b9a2c4e-0003",
            "word_count": 512,
            "score": 0.0
        }),
    ]
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn fixture_docs_have_ids() {
        for doc in fixture_docs() {
            assert!(doc["_id"].as_str().unwrap().starts_with("nyt://article/"));
        }
    }

    #[test]
    fn authorization_requires_exact_key() {
        let state = AppState {
            api_key: Arc::from("k"),
            docs: Arc::new(Vec::new()),
        };
        let mut params = HashMap::new();
        assert!(!authorized(&state, &params));
        params.insert("api-key".to_string(), "K".to_string());
        assert!(!authorized(&state, &params));
        params.insert("api-key".to_string(), "k".to_string());
        assert!(authorized(&state, &params));
    }
}
