//! Campaign submitter: two-phase create-then-send with a single-flight
//! guard.

use std::sync::atomic::{AtomicBool, Ordering};

use mailcast_api_models::{CreateCampaignRequest, CreateCampaignResponse};
use reqwest::Method;
use uuid::Uuid;

use crate::client::{HEADER_IDEMPOTENCY_KEY, MailcastClient};
use crate::error::{ClientError, Result};
use crate::selection::RecipientSelection;

/// Optional metadata attached to a new campaign. Missing fields fall back
/// to the dashboard's defaults.
#[derive(Debug, Clone, Default)]
pub struct CampaignMetadata {
    /// Free-text notes; defaults to a recipient-count summary.
    pub notes: Option<String>,
    /// String tags; defaults to `["bulk", "admin-sent"]`.
    pub tags: Option<Vec<String>>,
}

/// Result of a fully successful submit.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SubmitOutcome {
    /// Identifier of the created and dispatched campaign.
    pub campaign_id: String,
    /// Number of recipients the campaign targets.
    pub recipient_count: usize,
}

/// Drives the two-phase campaign submission.
///
/// The two network operations are sequential, not atomic: a failed create
/// aborts with nothing retained, while a failed send leaves the campaign
/// orphaned in `pending` and surfaces [`ClientError::SendFailed`] naming
/// it. The orphan is never deleted or retried automatically.
#[derive(Debug, Default)]
pub struct CampaignSubmitter {
    in_flight: AtomicBool,
}

impl CampaignSubmitter {
    /// Create an idle submitter.
    #[must_use]
    pub const fn new() -> Self {
        Self {
            in_flight: AtomicBool::new(false),
        }
    }

    /// True while a submit is outstanding.
    #[must_use]
    pub fn is_in_flight(&self) -> bool {
        self.in_flight.load(Ordering::SeqCst)
    }

    /// Create a campaign for the selected applications and trigger its
    /// dispatch.
    ///
    /// Preconditions (non-empty template id, non-empty selection) are
    /// checked locally; violations return a validation error without any
    /// network call. A second submit while one is in flight is rejected
    /// the same way. On overall success the selection is cleared and the
    /// outcome names the recipient count.
    ///
    /// # Errors
    ///
    /// Local precondition violations return [`ClientError::Validation`].
    /// A failed create aborts with the server's rejection. A failed send
    /// returns [`ClientError::SendFailed`] naming the campaign that now
    /// sits orphaned in `pending`.
    pub async fn submit(
        &self,
        client: &MailcastClient,
        template_id: &str,
        selection: &mut RecipientSelection,
        metadata: CampaignMetadata,
    ) -> Result<SubmitOutcome> {
        if template_id.trim().is_empty() || selection.is_empty() {
            return Err(ClientError::validation(
                "select a template and at least one application",
            ));
        }
        if self.in_flight.swap(true, Ordering::SeqCst) {
            return Err(ClientError::validation(
                "a campaign submit is already in flight",
            ));
        }
        let _guard = InFlightGuard {
            flag: &self.in_flight,
        };

        let recipient_count = selection.count();
        let request = CreateCampaignRequest {
            template_id: template_id.to_string(),
            application_ids: selection.ids().to_vec(),
            admin_id: client.session().admin_id().to_string(),
            admin_name: client.session().admin_name().to_string(),
            notes: metadata.notes.unwrap_or_else(|| {
                format!("Bulk email sent to {recipient_count} applications")
            }),
            tags: metadata
                .tags
                .unwrap_or_else(|| vec!["bulk".to_string(), "admin-sent".to_string()]),
        };

        let create_url = client.endpoint("/api/bulk-email/create")?;
        let created: CreateCampaignResponse = client
            .expect_json(
                client
                    .request(Method::POST, create_url)
                    .header(HEADER_IDEMPOTENCY_KEY, Uuid::new_v4().to_string())
                    .json(&request),
            )
            .await?;
        let campaign_id = created.bulk_email.email_id;

        let send_url = client.endpoint(&format!("/api/bulk-email/send/{campaign_id}"))?;
        if let Err(source) = client.expect_ok(client.request(Method::POST, send_url)).await {
            return Err(ClientError::SendFailed {
                campaign_id,
                source: Box::new(source),
            });
        }

        selection.clear();
        Ok(SubmitOutcome {
            campaign_id,
            recipient_count,
        })
    }
}

struct InFlightGuard<'a> {
    flag: &'a AtomicBool,
}

impl Drop for InFlightGuard<'_> {
    fn drop(&mut self) {
        self.flag.store(false, Ordering::SeqCst);
    }
}
