//! Remote record gateway seam.
//!
//! The hosted backend is an opaque SDK; this module defines the contract the
//! rest of the crate programs against. [`RecordGateway`] mirrors the SDK
//! surface one-to-one (`fetchRecords`, `createRecord`, `updateRecord`,
//! `deleteRecord`), [`types`] holds the wire shapes, and
//! [`InMemoryGateway`](memory::InMemoryGateway) provides a deterministic
//! implementation for tests and local development.
//!
//! Per the concurrency model there is no batching, no retry, no client-side
//! cache, and no cancellation or timeout: a call that never resolves leaves
//! its caller suspended.

pub mod config;
pub mod memory;
pub mod types;

use async_trait::async_trait;

use crate::error::GatewayError;
use types::{
    DeleteRequest, DeleteResponse, FetchResponse, QueryParams, WriteRequest, WriteResponse,
};

pub use config::GatewayConfig;
pub use memory::InMemoryGateway;

/// The hosted record backend, one method per SDK entry point.
///
/// Implementations perform exactly one round trip per call. Errors at this
/// layer mean the round trip itself failed; a completed round trip that
/// signals failure does so inside [`WriteResponse`]/[`DeleteResponse`] and is
/// interpreted by the entity services.
#[async_trait]
pub trait RecordGateway: Send + Sync {
    /// Fetches records from `collection` with projection, filtering,
    /// ordering, and paging.
    async fn fetch_records(
        &self,
        collection: &str,
        params: QueryParams,
    ) -> Result<FetchResponse, GatewayError>;

    /// Creates the records in the request, returning one result per record.
    async fn create_record(
        &self,
        collection: &str,
        request: WriteRequest,
    ) -> Result<WriteResponse, GatewayError>;

    /// Updates the records in the request (matched by their `Id` field),
    /// returning one result per record.
    async fn update_record(
        &self,
        collection: &str,
        request: WriteRequest,
    ) -> Result<WriteResponse, GatewayError>;

    /// Deletes the records named in the request.
    async fn delete_record(
        &self,
        collection: &str,
        request: DeleteRequest,
    ) -> Result<DeleteResponse, GatewayError>;
}
