//! Linear infrastructure adapter for docs-mirror.
//!
//! Implements the [`mirror::IssueTracker`] trait against Linear's GraphQL
//! API: one paginated issue query and one description-update mutation.
//!
//! ## Architectural Layer
//!
//! **Infrastructure.** HTTP transport, request framing, and response
//! decoding live here. The [`mirror`] crate sees only
//! [`mirror::IssueTracker`] and [`mirror::TrackerError`].
//!
//! ## Failure Model
//!
//! A non-success HTTP status and a non-empty GraphQL `errors` list are both
//! fatal for the call and carry the raw payload. There is no retry, back-off,
//! or token refresh; the API key is sent verbatim in the `Authorization`
//! header.

mod client;
mod queries;

pub use client::{LinearClient, LinearConfig, DEFAULT_ENDPOINT};
