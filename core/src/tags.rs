//! TimesTags suggestion types and the suggestion-string parser.
//!
//! # Grammar
//! A suggestion looks like `<value> (<Code>)`, where `Code` is one of the
//! five case-sensitive tokens `Des`, `Geo`, `Org`, `Per`, `Ttl`. Only the
//! last parenthesised segment is the type code; earlier ones belong to the
//! value, so `"Cork (Ireland) (Geo)"` has the value `"Cork (Ireland)"`.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::{ApiError, TagParseError};

/// The closed set of tag categories returned by the suggest endpoint.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum TagType {
    #[serde(rename = "Des")]
    Descriptor,
    #[serde(rename = "Geo")]
    GeographicLocation,
    #[serde(rename = "Org")]
    Organization,
    #[serde(rename = "Per")]
    Person,
    #[serde(rename = "Ttl")]
    Title,
}

impl TagType {
    pub const ALL: [TagType; 5] = [
        TagType::Descriptor,
        TagType::GeographicLocation,
        TagType::Organization,
        TagType::Person,
        TagType::Title,
    ];

    /// The three-letter code used on the wire.
    pub fn code(self) -> &'static str {
        match self {
            TagType::Descriptor => "Des",
            TagType::GeographicLocation => "Geo",
            TagType::Organization => "Org",
            TagType::Person => "Per",
            TagType::Title => "Ttl",
        }
    }

    /// Exact, case-sensitive lookup of a wire code.
    pub fn from_code(code: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|t| t.code() == code)
    }
}

impl fmt::Display for TagType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.code())
    }
}

/// Lenient parsing for user input (CLI flags, config): accepts the wire code
/// or a descriptive name in any case. The suggestion parser does not use this.
impl FromStr for TagType {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "des" | "descriptor" => Ok(TagType::Descriptor),
            "geo" | "geographic" | "location" => Ok(TagType::GeographicLocation),
            "org" | "organization" | "organisation" => Ok(TagType::Organization),
            "per" | "person" => Ok(TagType::Person),
            "ttl" | "title" => Ok(TagType::Title),
            other => Err(format!("unknown tag type '{other}'")),
        }
    }
}

/// A categorized suggestion term.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Tag {
    #[serde(rename = "type")]
    pub tag_type: TagType,
    pub value: String,
}

impl Tag {
    /// Decompose a person tag (`"Last, First"`) into its name parts.
    ///
    /// Splits at the first comma; everything after it is the first name(s).
    pub fn person(&self) -> Result<PersonTag, ApiError> {
        if self.tag_type != TagType::Person {
            return Err(ApiError::IncorrectTagType {
                expected: TagType::Person,
            });
        }
        let (last, first) =
            self.value
                .split_once(',')
                .ok_or_else(|| ApiError::MalformedPersonTag {
                    value: self.value.clone(),
                })?;
        Ok(PersonTag {
            first_names: first.trim().to_string(),
            last_name: last.trim().to_string(),
        })
    }
}

impl FromStr for Tag {
    type Err = TagParseError;

    fn from_str(raw: &str) -> Result<Self, Self::Err> {
        let inner = raw
            .trim_end()
            .strip_suffix(')')
            .ok_or(TagParseError::MissingTypeCode)?;
        let open = inner.rfind('(').ok_or(TagParseError::MissingTypeCode)?;

        let code = &inner[open + 1..];
        let tag_type = TagType::from_code(code)
            .ok_or_else(|| TagParseError::UnknownTypeCode(code.to_string()))?;

        let prefix = &inner[..open];
        if !prefix.ends_with(char::is_whitespace) {
            return Err(TagParseError::MissingSeparator);
        }
        let value = prefix.trim();
        if value.is_empty() {
            return Err(TagParseError::EmptyValue);
        }

        Ok(Tag {
            tag_type,
            value: value.to_string(),
        })
    }
}

/// Name parts of a person tag.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PersonTag {
    pub first_names: String,
    pub last_name: String,
}

/// Parse a batch of raw suggestions, dropping (and logging) malformed ones.
pub fn parse_suggestions<S: AsRef<str>>(raw: &[S]) -> Vec<Tag> {
    raw.iter()
        .filter_map(|s| {
            let s = s.as_ref();
            match s.parse::<Tag>() {
                Ok(tag) => Some(tag),
                Err(e) => {
                    tracing::warn!(suggestion = %s, error = %e, "could not parse tag");
                    None
                }
            }
        })
        .collect()
}

/// Parameters for one call to the suggest endpoint.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ListTagsRequest {
    pub query: String,
    /// Restrict suggestions to one tag type.
    pub filter: Option<TagType>,
    /// Result cap; `None` and `Some(0)` leave the server default.
    pub max: Option<u32>,
}

impl ListTagsRequest {
    pub fn new(query: impl Into<String>) -> Self {
        Self {
            query: query.into(),
            ..Self::default()
        }
    }

    pub fn with_filter(mut self, filter: TagType) -> Self {
        self.filter = Some(filter);
        self
    }

    pub fn with_max(mut self, max: u32) -> Self {
        self.max = Some(max);
        self
    }

    pub(crate) fn validate(&self) -> Result<(), ApiError> {
        if self.query.is_empty() {
            return Err(ApiError::QueryRequired);
        }
        Ok(())
    }
}

/// Tags decoded from a suggest response.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ListTagsResponse {
    pub tags: Vec<Tag>,
}

impl ListTagsResponse {
    /// Person decompositions of every well-formed person tag.
    pub fn people(&self) -> Vec<PersonTag> {
        self.tags
            .iter()
            .filter(|t| t.tag_type == TagType::Person)
            .filter_map(|t| t.person().ok())
            .collect()
    }
}
