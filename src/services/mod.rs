//! Entity services: typed CRUD over the record gateway.
//!
//! Each service translates UI intents into exactly one gateway round trip
//! (statistics are documented as two), projects writes through the typed
//! draft/patch types, and normalizes outcomes into [`crate::Error`]:
//! missing required input fails with [`Error::Validation`] before any
//! remote call, a completed round trip without a success indicator becomes
//! [`Error::Operation`] carrying the gateway message, and transport
//! failures surface as [`Error::Network`].

mod task;
mod workflow;

pub use task::{TaskListOptions, TaskService};
pub use workflow::{WorkflowListOptions, WorkflowService};

use serde_json::{Map, Value};

use crate::error::Error;
use crate::gateway::types::WriteResponse;

/// Unwraps the first per-record result of a write response.
///
/// A missing or unsuccessful result becomes [`Error::Operation`] with the
/// gateway's message when present, else `fallback`.
pub(crate) fn first_write_result(
    collection: &str,
    response: WriteResponse,
    fallback: &str,
) -> Result<Map<String, Value>, Error> {
    match response.results.into_iter().next() {
        Some(result) if result.success => result.data.ok_or_else(|| Error::Operation {
            collection: collection.to_string(),
            message: "gateway returned no record".to_string(),
        }),
        Some(result) => Err(Error::Operation {
            collection: collection.to_string(),
            message: result.message.unwrap_or_else(|| fallback.to_string()),
        }),
        None => Err(Error::Operation {
            collection: collection.to_string(),
            message: fallback.to_string(),
        }),
    }
}
