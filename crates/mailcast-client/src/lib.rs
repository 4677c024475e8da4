#![forbid(unsafe_code)]
#![deny(
    warnings,
    dead_code,
    unused,
    unused_imports,
    unused_must_use,
    unreachable_pub,
    clippy::all,
    clippy::pedantic,
    clippy::nursery,
    rustdoc::broken_intra_doc_links,
    rustdoc::bare_urls,
    missing_docs
)]
#![allow(clippy::redundant_pub_crate, clippy::module_name_repetitions)]

//! Client-side controller for a bulk email campaign service.
//!
//! Wraps the service's REST API with the state machines the admin
//! dashboard needs: recipient selection, template preview, the two-phase
//! create-then-send submission, campaign tracking with derived metrics,
//! and retry/cancel actions.
//!
//! Layout:
//! - `client.rs`: authenticated HTTP client and response handling
//! - `session.rs`: admin identity and bearer token
//! - `selection.rs`: order-preserving recipient selection
//! - `templates.rs`: template listing and preview rendering
//! - `submit.rs`: two-phase campaign submission
//! - `tracker.rs`: campaign listing, metrics, and the detail view
//! - `actions.rs`: retry and cancel dispatch
//! - `mode.rs`: exclusive dashboard view mode
//! - `export.rs`: CSV export of recipient breakdowns
//! - `error.rs`: error taxonomy shared by all operations

pub mod actions;
pub mod client;
pub mod error;
pub mod export;
pub mod mode;
pub mod selection;
pub mod session;
pub mod submit;
pub mod templates;
pub mod tracker;

pub use actions::{ActionDispatcher, ActionOutcome};
pub use client::{MailcastClient, MailcastClientBuilder};
pub use error::{ClientError, Result};
pub use mode::UiMode;
pub use selection::RecipientSelection;
pub use session::Session;
pub use submit::{CampaignMetadata, CampaignSubmitter, SubmitOutcome};
pub use tracker::{CampaignFilters, DetailView};
