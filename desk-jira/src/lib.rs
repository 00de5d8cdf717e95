//! Desk Jira - Jira Cloud REST client for the Desk services.
//!
//! This crate provides:
//! - Authenticated issue creation and lookup (API v3)
//! - Minimal Atlassian Document Format construction for descriptions
//! - Compact issue projection for agent-facing replies
//! - A uniform result type that never propagates transport faults

#![warn(clippy::all)]
#![allow(clippy::pedantic)]

pub mod client;
pub mod document;
pub mod issue;

pub use client::{JiraClient, TicketResult};
pub use document::AdfDocument;
pub use issue::{CompactIssue, Issue, IssueFields};
