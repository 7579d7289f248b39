//! One-call convenience over `NytClient` plus a `Transport`.

use crate::client::NytClient;
use crate::config::ApiConfig;
use crate::error::ApiError;
use crate::tags::{ListTagsRequest, ListTagsResponse};
use crate::transport::{Transport, UreqTransport};
use crate::types::{SearchArticlesRequest, SearchArticlesResponse};

/// A `NytClient` bundled with the transport that executes its requests.
///
/// Holds no call-scoped state; share it across threads when `T` allows.
#[derive(Debug, Clone)]
pub struct BlockingClient<T = UreqTransport> {
    client: NytClient,
    transport: T,
}

impl BlockingClient<UreqTransport> {
    pub fn new(config: ApiConfig) -> Self {
        let transport = UreqTransport::new(&config);
        Self::with_transport(config, transport)
    }
}

impl<T: Transport> BlockingClient<T> {
    pub fn with_transport(config: ApiConfig, transport: T) -> Self {
        Self {
            client: NytClient::new(config),
            transport,
        }
    }

    pub fn core(&self) -> &NytClient {
        &self.client
    }

    pub fn search_articles(
        &self,
        request: &SearchArticlesRequest,
    ) -> Result<SearchArticlesResponse, ApiError> {
        self.client.search_articles(&self.transport, request)
    }

    pub fn list_tags(&self, request: &ListTagsRequest) -> Result<ListTagsResponse, ApiError> {
        self.client.list_tags(&self.transport, request)
    }
}
