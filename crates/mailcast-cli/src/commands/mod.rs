//! Command handlers grouped by concern.

pub(crate) mod campaigns;
pub(crate) mod stats;
pub(crate) mod templates;
