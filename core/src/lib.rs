//! Synchronous client core for the New York Times Article Search and
//! TimesTags APIs.
//!
//! # Overview
//! Builds `HttpRequest` values and parses `HttpResponse` values without
//! touching the network (host-does-IO pattern). A `Transport` executes the
//! round-trip; `UreqTransport` is the blocking default and `BlockingClient`
//! bundles the two.
//!
//! # Design
//! - `NytClient` is stateless; it holds only its `ApiConfig`.
//! - Each endpoint is split into `build_*` and `parse_*`, so the I/O boundary
//!   is explicit and both halves are testable in isolation.
//! - Tag suggestions are parsed by a small explicit grammar (`tags`);
//!   malformed entries are logged and skipped rather than failing the batch.

pub mod blocking;
pub mod client;
pub mod config;
pub mod error;
pub mod http;
pub mod query;
pub mod tags;
pub mod transport;
pub mod types;

pub use blocking::BlockingClient;
pub use client::NytClient;
pub use config::ApiConfig;
pub use error::{ApiError, TagParseError};
pub use http::{HttpRequest, HttpResponse};
pub use tags::{ListTagsRequest, ListTagsResponse, PersonTag, Tag, TagType};
pub use transport::{Transport, UreqTransport};
pub use types::{
    Byline, Doc, FacetField, Headline, Keyword, LooseValue, Meta, Multimedia, Person,
    SearchArticlesRequest, SearchArticlesResponse, SearchResults, Sort, Term, Terms,
};
