//! Workflow entity service.

use std::sync::Arc;

use serde_json::json;
use tracing::{debug, error};

use crate::error::{Error, Result};
use crate::gateway::types::{OrderBy, PagingInfo, QueryParams, WhereClause, WriteRequest};
use crate::gateway::RecordGateway;
use crate::schema::RecordSchema;
use crate::services::first_write_result;
use crate::types::{Workflow, WorkflowDraft};

const COUNT_LIMIT: usize = 1000;

/// Search and filter options for [`WorkflowService::list`].
#[derive(Debug, Clone, Default)]
pub struct WorkflowListOptions {
    /// Case-insensitive substring match on the name. Empty means no search.
    pub search_term: String,
    /// Restrict to active workflows.
    pub active_only: bool,
}

/// Read and create operations on the workflow collection. The dashboard
/// never edits workflows inline, so there is no update surface here.
#[derive(Clone)]
pub struct WorkflowService {
    gateway: Arc<dyn RecordGateway>,
}

impl WorkflowService {
    /// Creates a service over the given gateway.
    pub fn new(gateway: Arc<dyn RecordGateway>) -> Self {
        Self { gateway }
    }

    /// Fetches workflows matching `options`, most recently modified first.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Network`] when the round trip fails.
    pub async fn list(&self, options: &WorkflowListOptions) -> Result<Vec<Workflow>> {
        let mut filters = Vec::new();
        if !options.search_term.is_empty() {
            filters.push(WhereClause::contains("Name", &options.search_term));
        }
        if options.active_only {
            filters.push(WhereClause::exact_match("active", json!(true)));
        }

        let params = QueryParams {
            fields: Workflow::all_fields()
                .iter()
                .map(ToString::to_string)
                .collect(),
            filters,
            order_by: vec![OrderBy::desc("ModifiedOn")],
            paging_info: Some(PagingInfo::default()),
        };
        debug!(collection = Workflow::COLLECTION, ?options, "fetching workflows");

        let response = self
            .gateway
            .fetch_records(Workflow::COLLECTION, params)
            .await
            .map_err(|err| {
                error!(error = %err, "failed to fetch workflows");
                Error::Network(err)
            })?;

        Ok(response
            .data
            .iter()
            .filter_map(Workflow::from_record)
            .collect())
    }

    /// Counts active workflows via an id-only projection.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Network`] when the round trip fails.
    pub async fn active_count(&self) -> Result<usize> {
        let params = QueryParams {
            fields: vec!["Id".to_string()],
            filters: vec![WhereClause::exact_match("active", json!(true))],
            paging_info: Some(PagingInfo {
                limit: COUNT_LIMIT,
                offset: 0,
            }),
            ..QueryParams::default()
        };

        let response = self
            .gateway
            .fetch_records(Workflow::COLLECTION, params)
            .await?;
        Ok(response.data.len())
    }

    /// Creates a workflow from `draft`.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Network`] when the round trip fails and
    /// [`Error::Operation`] when the gateway result lacks a success
    /// indicator.
    pub async fn create(&self, draft: WorkflowDraft) -> Result<Workflow> {
        let response = self
            .gateway
            .create_record(
                Workflow::COLLECTION,
                WriteRequest::single(draft.into_record()),
            )
            .await?;

        let record =
            first_write_result(Workflow::COLLECTION, response, "failed to create workflow")?;
        Workflow::from_record(&record).ok_or_else(|| Error::Operation {
            collection: Workflow::COLLECTION.to_string(),
            message: "gateway returned a malformed record".to_string(),
        })
    }
}

impl std::fmt::Debug for WorkflowService {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("WorkflowService").finish_non_exhaustive()
    }
}
