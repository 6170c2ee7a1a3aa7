//! Query handlers for the Statistics context.

use handtag_core::error::DomainError;
use handtag_tagging::application::event_store::EventStore;
use serde::Serialize;
use tracing::{debug, instrument};
use uuid::Uuid;

use crate::domain::scope::{Scope, filter_by_scope};
use crate::domain::summary::{Summary, summarize};

/// Summary of one match over one scope.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct MatchSummary {
    /// The summarized match.
    pub match_id: Uuid,
    /// The period range covered.
    pub scope: Scope,
    #[serde(flatten)]
    pub summary: Summary,
}

/// Loads the current log of a match and summarizes the part in `scope`.
///
/// # Errors
///
/// Returns `DomainError::MatchNotFound` if the match does not exist, or a
/// storage error.
#[instrument(skip(store))]
pub async fn summarize_match(
    store: &EventStore,
    match_id: Uuid,
    scope: Scope,
) -> Result<MatchSummary, DomainError> {
    let events = store.list(match_id).await?;
    let scoped = filter_by_scope(&events, scope);
    debug!(total = events.len(), scoped = scoped.len(), "summarizing");
    Ok(MatchSummary {
        match_id,
        scope,
        summary: summarize(&scoped),
    })
}
