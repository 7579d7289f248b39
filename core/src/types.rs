//! Article Search request and response types.
//!
//! # Design
//! Response structs mirror the JSON the API returns. Fields the API fills in
//! inconsistently (kickers, qualifiers, byline organizations, crop names) are
//! `Option<LooseValue>` so callers see whether they got text, structure, or
//! nothing, instead of an untyped `serde_json::Value`.

use std::collections::HashMap;
use std::fmt;

use chrono::{DateTime, FixedOffset, NaiveDate};
use serde::{Deserialize, Serialize};

/// Facet dimensions the search endpoint can aggregate over.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FacetField {
    DayOfWeek,
    DocumentType,
    Ingredients,
    NewsDesk,
    PubMonth,
    PubYear,
    SectionName,
    Source,
    SubsectionName,
    TypeOfMaterial,
}

impl FacetField {
    pub fn as_str(self) -> &'static str {
        match self {
            FacetField::DayOfWeek => "day_of_week",
            FacetField::DocumentType => "document_type",
            FacetField::Ingredients => "ingredients",
            FacetField::NewsDesk => "news_desk",
            FacetField::PubMonth => "pub_month",
            FacetField::PubYear => "pub_year",
            FacetField::SectionName => "section_name",
            FacetField::Source => "source",
            FacetField::SubsectionName => "subsection_name",
            FacetField::TypeOfMaterial => "type_of_material",
        }
    }
}

impl fmt::Display for FacetField {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl std::str::FromStr for FacetField {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        serde_json::from_value(serde_json::Value::String(s.to_string()))
            .map_err(|_| format!("unknown facet field '{s}'"))
    }
}

/// Result ordering.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Sort {
    Newest,
    Oldest,
    Relevance,
}

impl Sort {
    pub fn as_str(self) -> &'static str {
        match self {
            Sort::Newest => "newest",
            Sort::Oldest => "oldest",
            Sort::Relevance => "relevance",
        }
    }
}

impl std::str::FromStr for Sort {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "newest" => Ok(Sort::Newest),
            "oldest" => Ok(Sort::Oldest),
            "relevance" => Ok(Sort::Relevance),
            other => Err(format!("unknown sort order '{other}'")),
        }
    }
}

/// Parameters for one Article Search call.
///
/// Every field except `page` and `sort` is sent, including empty ones; the
/// endpoint treats empty values as "unset". `page` and `sort` go out only
/// when set.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct SearchArticlesRequest {
    pub begin_date: Option<NaiveDate>,
    pub end_date: Option<NaiveDate>,
    pub facet: bool,
    pub facet_fields: Vec<FacetField>,
    pub facet_filter: bool,
    pub field_list: Vec<String>,
    /// Lucene filter query, passed through as-is.
    pub filter_query: String,
    /// Zero-based page; each page holds 10 docs.
    pub page: u32,
    pub query: String,
    pub sort: Option<Sort>,
}

/// A JSON field whose shape the API does not keep stable.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum LooseValue {
    Text(String),
    Structured(serde_json::Value),
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SearchArticlesResponse {
    pub status: String,
    #[serde(default)]
    pub copyright: String,
    pub response: SearchResults,
}

impl SearchArticlesResponse {
    /// True when hits extend past the docs returned so far.
    pub fn has_more(&self) -> bool {
        let seen = self
            .response
            .meta
            .offset
            .saturating_add(self.response.docs.len() as u64);
        self.response.meta.hits > seen
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SearchResults {
    #[serde(default)]
    pub docs: Vec<Doc>,
    pub meta: Meta,
    #[serde(default)]
    pub facets: HashMap<String, Terms>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Meta {
    pub hits: u64,
    pub offset: u64,
    #[serde(default)]
    pub time: u64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Doc {
    #[serde(default)]
    pub web_url: String,
    #[serde(default)]
    pub snippet: String,
    #[serde(default)]
    pub lead_paragraph: String,
    #[serde(default)]
    pub blog: Option<LooseValue>,
    #[serde(default)]
    pub source: String,
    #[serde(default)]
    pub multimedia: Vec<Multimedia>,
    #[serde(default)]
    pub headline: Headline,
    #[serde(default)]
    pub keywords: Vec<Keyword>,
    #[serde(default)]
    pub pub_date: String,
    #[serde(default)]
    pub document_type: String,
    #[serde(default)]
    pub byline: Byline,
    #[serde(default)]
    pub type_of_material: String,
    #[serde(rename = "_id")]
    pub id: String,
    #[serde(default)]
    pub word_count: i64,
    #[serde(default)]
    pub score: f64,
}

impl Doc {
    /// `pub_date` as a timestamp; the API uses `2018-12-31T23:50:17+0000`.
    pub fn published_at(&self) -> Option<DateTime<FixedOffset>> {
        DateTime::parse_from_str(&self.pub_date, "%Y-%m-%dT%H:%M:%S%z")
            .or_else(|_| DateTime::parse_from_rfc3339(&self.pub_date))
            .ok()
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Multimedia {
    #[serde(default)]
    pub rank: i64,
    #[serde(default)]
    pub subtype: String,
    #[serde(default)]
    pub caption: Option<String>,
    #[serde(default)]
    pub credit: Option<String>,
    #[serde(default, rename = "type")]
    pub media_type: String,
    #[serde(default)]
    pub url: String,
    #[serde(default)]
    pub height: u32,
    #[serde(default)]
    pub width: u32,
    #[serde(default)]
    pub legacy: Option<LooseValue>,
    #[serde(default, rename = "subType")]
    pub sub_type: Option<String>,
    #[serde(default)]
    pub crop_name: Option<LooseValue>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Headline {
    #[serde(default)]
    pub main: String,
    #[serde(default)]
    pub kicker: Option<LooseValue>,
    #[serde(default)]
    pub content_kicker: Option<LooseValue>,
    #[serde(default)]
    pub print_headline: Option<LooseValue>,
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub seo: Option<LooseValue>,
    #[serde(default)]
    pub sub: Option<LooseValue>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Keyword {
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub value: String,
    #[serde(default)]
    pub rank: i64,
    #[serde(default)]
    pub major: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Byline {
    #[serde(default)]
    pub original: Option<String>,
    #[serde(default)]
    pub person: Vec<Person>,
    #[serde(default)]
    pub organization: Option<LooseValue>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Person {
    #[serde(default)]
    pub firstname: Option<String>,
    #[serde(default)]
    pub middlename: Option<String>,
    #[serde(default)]
    pub lastname: Option<String>,
    #[serde(default)]
    pub qualifier: Option<LooseValue>,
    #[serde(default)]
    pub title: Option<LooseValue>,
    #[serde(default)]
    pub role: String,
    #[serde(default)]
    pub organization: String,
    #[serde(default)]
    pub rank: i64,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Terms {
    #[serde(default)]
    pub terms: Vec<Term>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Term {
    pub term: String,
    pub count: u64,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn loose_value_distinguishes_shapes() {
        let headline: Headline = serde_json::from_str(
            r#"{"main":"M","kicker":"K","content_kicker":null,"print_headline":{"a":1}}"#,
        )
        .unwrap();
        assert_eq!(headline.kicker, Some(LooseValue::Text("K".to_string())));
        assert_eq!(headline.content_kicker, None);
        assert!(matches!(headline.print_headline, Some(LooseValue::Structured(_))));
        assert_eq!(headline.seo, None);
    }

    #[test]
    fn published_at_parses_api_offset_format() {
        let doc: Doc = serde_json::from_str(
            r#"{"_id":"nyt://article/1","pub_date":"2018-12-31T23:50:17+0000"}"#,
        )
        .unwrap();
        let ts = doc.published_at().unwrap();
        assert_eq!(ts.date_naive(), NaiveDate::from_ymd_opt(2018, 12, 31).unwrap());
    }

    #[test]
    fn facet_field_parses_wire_names() {
        assert_eq!("day_of_week".parse::<FacetField>().unwrap(), FacetField::DayOfWeek);
        assert!("weekday".parse::<FacetField>().is_err());
    }

    #[test]
    fn has_more_compares_hits_with_offset_and_page() {
        let body = r#"{"status":"OK","response":{"docs":[{"_id":"a"}],"meta":{"hits":11,"offset":10}}}"#;
        let resp: SearchArticlesResponse = serde_json::from_str(body).unwrap();
        assert!(!resp.has_more());

        let body = r#"{"status":"OK","response":{"docs":[{"_id":"a"}],"meta":{"hits":12,"offset":10}}}"#;
        let resp: SearchArticlesResponse = serde_json::from_str(body).unwrap();
        assert!(resp.has_more());
    }

    #[test]
    fn has_more_saturates_on_huge_offset() {
        let body = r#"{"status":"OK","response":{"docs":[{"_id":"a"}],"meta":{"hits":18446744073709551615,"offset":18446744073709551615}}}"#;
        let resp: SearchArticlesResponse = serde_json::from_str(body).unwrap();
        assert!(!resp.has_more());
    }
}
