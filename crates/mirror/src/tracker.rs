//! The issue-tracker port.
//!
//! [`IssueTracker`] is the only way the domain reaches the remote service.
//! The `linear` crate supplies the production implementation; tests supply
//! in-memory fakes.

use async_trait::async_trait;
use thiserror::Error;
use tracing::debug;

use crate::{CollectionId, Issue, IssueId, IssuePage};

/// Maximum number of issues requested per page.
pub const ISSUE_PAGE_SIZE: u32 = 100;

/// Failures reported by an [`IssueTracker`] implementation.
///
/// Every variant is fatal for the call that produced it. There is no retry
/// or back-off.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum TrackerError {
    /// The tracker answered with a non-success HTTP status.
    #[error("Tracker HTTP {status}: {body}")]
    Http {
        /// HTTP status code.
        status: u16,
        /// Raw response body.
        body: String,
    },

    /// The response carried a non-empty GraphQL `errors` list, or the
    /// mutation reported that it did not succeed.
    #[error("Tracker API error: {errors}")]
    Api {
        /// Serialized error payload as returned by the tracker.
        errors: String,
    },

    /// The request never produced a response (connection, TLS, DNS).
    #[error("Tracker transport error: {message}")]
    Transport {
        /// Description of the transport failure.
        message: String,
    },

    /// The response body could not be decoded into the expected shape.
    #[error("Tracker response could not be decoded: {message}")]
    Decode {
        /// Description of the decoding failure.
        message: String,
    },
}

/// Read and write access to issues in the remote tracker.
#[async_trait]
pub trait IssueTracker: Send + Sync {
    /// Fetches one page of at most [`ISSUE_PAGE_SIZE`] issues belonging to
    /// `collection`, starting after `after` (or from the beginning when
    /// `None`).
    async fn fetch_issue_page(
        &self,
        collection: &CollectionId,
        after: Option<&str>,
    ) -> Result<IssuePage, TrackerError>;

    /// Replaces the description of `issue` with `description`.
    async fn update_issue_description(
        &self,
        issue: &IssueId,
        description: &str,
    ) -> Result<(), TrackerError>;

    /// Fetches every issue in `collection`, following page cursors until the
    /// tracker reports no further pages.
    ///
    /// Issues are returned in arrival order.
    async fn list_issues(&self, collection: &CollectionId) -> Result<Vec<Issue>, TrackerError> {
        let mut issues = Vec::new();
        let mut after: Option<String> = None;
        loop {
            let page = self.fetch_issue_page(collection, after.as_deref()).await?;
            debug!(
                %collection,
                count = page.issues.len(),
                has_next_page = page.has_next_page,
                "Fetched issue page"
            );
            issues.extend(page.issues);
            if !page.has_next_page {
                break;
            }
            match page.end_cursor {
                Some(cursor) => after = Some(cursor),
                None => {
                    return Err(TrackerError::Decode {
                        message: "page reports more results but carries no end cursor".to_string(),
                    })
                }
            }
        }
        Ok(issues)
    }
}
