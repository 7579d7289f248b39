//! Error types for the NYT API client.
//!
//! # Design
//! Validation failures (`QueryRequired`) are raised before a request is ever
//! built. Transport failures, non-2xx statuses and undecodable bodies each get
//! their own variant so callers can tell "the network failed" from "the server
//! said no" from "the server answered in a shape we do not understand."
//!
//! Per-suggestion tag parse failures are not `ApiError`s: they are reported as
//! `TagParseError`, logged, and the offending entry is dropped.

use thiserror::Error;

use crate::tags::TagType;

/// Errors returned by `NytClient` and the transports.
#[derive(Error, Debug)]
pub enum ApiError {
    /// A tag suggestion request was built with an empty query.
    #[error("a query must be provided")]
    QueryRequired,

    /// A typed view was requested on a tag of the wrong type.
    #[error("incorrect tag type - must be '{expected}'")]
    IncorrectTagType { expected: TagType },

    /// A person tag value has no comma separating last and first names.
    #[error("malformed person tag '{value}': expected 'Last, First'")]
    MalformedPersonTag { value: String },

    /// No API key was configured.
    #[error("an API key must be provided (set NYT_API_KEY)")]
    MissingApiKey,

    /// The configured base URL could not be joined with an endpoint path.
    #[error("invalid endpoint URL: {0}")]
    InvalidUrl(#[from] url::ParseError),

    /// The request never produced an HTTP response.
    #[error("transport failed: {0}")]
    Transport(String),

    /// The server returned a non-2xx status.
    #[error("HTTP {status}: {body}")]
    HttpError { status: u16, body: String },

    /// The response body could not be deserialized into the expected type.
    #[error("deserialization failed: {0}")]
    DeserializationError(String),
}

/// Why a single raw suggestion string could not be parsed into a `Tag`.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum TagParseError {
    #[error("no trailing parenthesised type code")]
    MissingTypeCode,

    #[error("unknown tag type code '{0}'")]
    UnknownTypeCode(String),

    #[error("no whitespace between value and type code")]
    MissingSeparator,

    #[error("empty tag value")]
    EmptyValue,
}
