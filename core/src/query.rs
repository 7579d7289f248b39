//! Query-string construction for both endpoints.
//!
//! Parameter order is fixed so built URLs are deterministic. Values go
//! through `application/x-www-form-urlencoded` serialization.

use url::Url;

use crate::error::ApiError;
use crate::tags::ListTagsRequest;
use crate::types::SearchArticlesRequest;

pub const API_KEY_PARAM: &str = "api-key";

const DATE_FORMAT: &str = "%Y%m%d";

pub fn encode_bool(value: bool) -> &'static str {
    if value {
        "true"
    } else {
        "false"
    }
}

pub fn decode_bool(raw: &str) -> Option<bool> {
    match raw {
        "true" => Some(true),
        "false" => Some(false),
        _ => None,
    }
}

/// Article Search parameters: the core set always (even when empty),
/// `page` and `sort` only when set.
pub(crate) fn article_search_params(
    request: &SearchArticlesRequest,
    api_key: &str,
) -> Vec<(&'static str, String)> {
    let date = |d: Option<chrono::NaiveDate>| {
        d.map(|d| d.format(DATE_FORMAT).to_string())
            .unwrap_or_default()
    };
    let facet_fields = request
        .facet_fields
        .iter()
        .map(|f| f.as_str())
        .collect::<Vec<_>>()
        .join(",");

    let mut params = vec![
        ("begin_date", date(request.begin_date)),
        ("end_date", date(request.end_date)),
        ("facet", encode_bool(request.facet).to_string()),
        ("facet_fields", facet_fields),
        ("facet_filter", encode_bool(request.facet_filter).to_string()),
        ("fl", request.field_list.join(",")),
        ("fq", request.filter_query.clone()),
        ("q", request.query.clone()),
    ];
    if request.page > 0 {
        params.push(("page", request.page.to_string()));
    }
    if let Some(sort) = request.sort {
        params.push(("sort", sort.as_str().to_string()));
    }
    params.push((API_KEY_PARAM, api_key.to_string()));
    params
}

/// Suggest parameters; `filter` and `max` only when set.
pub(crate) fn list_tags_params(
    request: &ListTagsRequest,
    api_key: &str,
) -> Vec<(&'static str, String)> {
    let mut params = vec![("query", request.query.clone())];
    if let Some(filter) = request.filter {
        params.push(("filter", format!("({})", filter.code())));
    }
    if let Some(max) = request.max.filter(|m| *m > 0) {
        params.push(("max", max.to_string()));
    }
    params.push((API_KEY_PARAM, api_key.to_string()));
    params
}

pub(crate) fn encode_url(endpoint: &str, params: &[(&str, String)]) -> Result<Url, ApiError> {
    let mut url = Url::parse(endpoint)?;
    url.query_pairs_mut()
        .clear()
        .extend_pairs(params.iter().map(|(k, v)| (*k, v.as_str())));
    Ok(url)
}

/// Replace the `api-key` value so a URL can be logged.
pub fn redact_api_key(url: &str) -> String {
    let Ok(mut parsed) = Url::parse(url) else {
        return url.to_string();
    };
    let pairs: Vec<(String, String)> = parsed
        .query_pairs()
        .map(|(k, v)| {
            let v = if k == API_KEY_PARAM {
                "***".to_string()
            } else {
                v.into_owned()
            };
            (k.into_owned(), v)
        })
        .collect();
    parsed.query_pairs_mut().clear().extend_pairs(pairs);
    parsed.to_string()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::tags::TagType;
    use crate::types::{FacetField, Sort};
    use chrono::NaiveDate;

    fn names(url: &Url) -> Vec<String> {
        url.query_pairs().map(|(k, _)| k.into_owned()).collect()
    }

    #[test]
    fn bool_literals_round_trip() {
        for value in [true, false] {
            assert_eq!(decode_bool(encode_bool(value)), Some(value));
        }
        assert_eq!(decode_bool("TRUE"), None);
    }

    #[test]
    fn article_search_emits_every_parameter_once() {
        let request = SearchArticlesRequest {
            begin_date: NaiveDate::from_ymd_opt(2018, 12, 1),
            end_date: NaiveDate::from_ymd_opt(2019, 1, 1),
            facet: true,
            facet_fields: vec![FacetField::DayOfWeek, FacetField::Source],
            facet_filter: true,
            field_list: vec!["headline".to_string(), "web_url".to_string()],
            filter_query: r#"source:("The New York Times")"#.to_string(),
            page: 2,
            query: "climate change".to_string(),
            sort: Some(Sort::Newest),
        };
        let params = article_search_params(&request, "secret");
        let url = encode_url("https://api.example.com/search", &params).unwrap();

        let mut got = names(&url);
        got.sort();
        let mut want: Vec<String> = [
            "begin_date", "end_date", "facet", "facet_fields", "facet_filter", "fl", "fq", "q",
            "page", "sort", "api-key",
        ]
        .iter()
        .map(|s| s.to_string())
        .collect();
        want.sort();
        assert_eq!(got, want);

        let pairs: std::collections::HashMap<_, _> = url.query_pairs().into_owned().collect();
        assert_eq!(pairs["begin_date"], "20181201");
        assert_eq!(pairs["end_date"], "20190101");
        assert_eq!(pairs["facet"], "true");
        assert_eq!(pairs["facet_fields"], "day_of_week,source");
        assert_eq!(pairs["fl"], "headline,web_url");
        assert_eq!(pairs["fq"], r#"source:("The New York Times")"#);
        assert_eq!(pairs["sort"], "newest");
        assert_eq!(pairs["api-key"], "secret");

        let raw = url.as_str();
        assert!(raw.contains("q=climate+change"), "{raw}");
        assert!(raw.contains("fq=source%3A%28%22The+New+York+Times%22%29"), "{raw}");
    }

    #[test]
    fn article_search_keeps_empty_values() {
        let params = article_search_params(&SearchArticlesRequest::default(), "k");
        let url = encode_url("https://api.example.com/search", &params).unwrap();
        let pairs: std::collections::HashMap<_, _> = url.query_pairs().into_owned().collect();
        assert_eq!(pairs.len(), 9);
        assert_eq!(pairs["begin_date"], "");
        assert_eq!(pairs["q"], "");
        assert_eq!(pairs["facet"], "false");
        assert!(!pairs.contains_key("sort"));
        assert!(!pairs.contains_key("page"));
        assert!(url.as_str().ends_with("&q=&api-key=k"), "{url}");
    }

    #[test]
    fn list_tags_omits_unset_optionals() {
        let params = list_tags_params(&ListTagsRequest::new("cork"), "k");
        let url = encode_url("https://api.example.com/tags", &params).unwrap();
        assert_eq!(names(&url), vec!["query", "api-key"]);

        let params = list_tags_params(&ListTagsRequest::new("cork").with_max(0), "k");
        assert!(params.iter().all(|(k, _)| *k != "max"));
    }

    #[test]
    fn list_tags_wraps_filter_in_parentheses() {
        let request = ListTagsRequest::new("cork")
            .with_filter(TagType::GeographicLocation)
            .with_max(10);
        let params = list_tags_params(&request, "k");
        let url = encode_url("https://api.example.com/tags", &params).unwrap();
        assert_eq!(names(&url), vec!["query", "filter", "max", "api-key"]);
        assert!(url.as_str().contains("filter=%28Geo%29"));
        assert!(url.as_str().contains("max=10"));
    }

    #[test]
    fn redaction_hides_only_the_key() {
        let redacted = redact_api_key("https://api.example.com/tags?query=cork&api-key=secret");
        assert_eq!(redacted, "https://api.example.com/tags?query=cork&api-key=***");
    }
}
