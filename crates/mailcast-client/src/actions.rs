//! Campaign actions: retry failed deliveries and cancel in-flight sends.
//!
//! Both actions are gated client-side (retry on the failure counter,
//! cancel on the lifecycle status) and deduplicated per campaign while a
//! request is outstanding, mirroring a disabled action button. The server
//! re-validates either way.

use std::collections::HashSet;
use std::sync::Mutex;

use mailcast_api_models::{Campaign, CampaignStatus};
use reqwest::Method;

use crate::client::MailcastClient;
use crate::error::{ClientError, Result};

/// What happened to a dispatched action.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ActionOutcome {
    /// The request was sent and acknowledged by the server.
    Dispatched,
    /// An action for this campaign was already outstanding; no request
    /// was made.
    AlreadyPending,
}

/// True when the campaign has failed deliveries to re-attempt.
#[must_use]
pub const fn can_retry(campaign: &Campaign) -> bool {
    campaign.statistics.failure_count > 0
}

/// True when the campaign's remaining deliveries can be cancelled.
#[must_use]
pub const fn can_cancel(campaign: &Campaign) -> bool {
    matches!(campaign.email_status, CampaignStatus::Sending)
}

/// Dispatches retry and cancel requests, at most one per campaign at a
/// time.
#[derive(Debug, Default)]
pub struct ActionDispatcher {
    pending: Mutex<HashSet<String>>,
}

impl ActionDispatcher {
    /// Create a dispatcher with no outstanding actions.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// True while an action for this campaign is outstanding.
    #[must_use]
    pub fn is_pending(&self, campaign_id: &str) -> bool {
        self.lock_pending().contains(campaign_id)
    }

    /// Re-dispatch the campaign's failed deliveries.
    ///
    /// Eligible only when the campaign counts at least one failed
    /// delivery; anything else is rejected locally. Already-successful
    /// deliveries are untouched by the server.
    ///
    /// # Errors
    ///
    /// Returns a validation error for an ineligible campaign (no request
    /// is made), otherwise any transport or server rejection.
    pub async fn retry(&self, client: &MailcastClient, campaign: &Campaign) -> Result<ActionOutcome> {
        if !can_retry(campaign) {
            return Err(ClientError::validation(
                "campaign has no failed deliveries to retry",
            ));
        }
        let url = client.endpoint(&format!("/api/bulk-email/{}/retry", campaign.email_id))?;
        self.dispatch(client, &campaign.email_id, Method::POST, url)
            .await
    }

    /// Stop the campaign's remaining deliveries.
    ///
    /// Only a `sending` campaign is eligible. Already-sent emails stay
    /// sent; cancellation is not a rollback.
    ///
    /// # Errors
    ///
    /// Returns a validation error for an ineligible campaign (no request
    /// is made), otherwise any transport or server rejection.
    pub async fn cancel(
        &self,
        client: &MailcastClient,
        campaign: &Campaign,
    ) -> Result<ActionOutcome> {
        if !can_cancel(campaign) {
            return Err(ClientError::validation(format!(
                "cannot cancel a {} campaign",
                campaign.email_status.as_str()
            )));
        }
        let url = client.endpoint(&format!("/api/bulk-email/{}/cancel", campaign.email_id))?;
        self.dispatch(client, &campaign.email_id, Method::PUT, url)
            .await
    }

    async fn dispatch(
        &self,
        client: &MailcastClient,
        campaign_id: &str,
        method: Method,
        url: url::Url,
    ) -> Result<ActionOutcome> {
        if !self.lock_pending().insert(campaign_id.to_string()) {
            return Ok(ActionOutcome::AlreadyPending);
        }
        let _guard = PendingGuard {
            pending: &self.pending,
            campaign_id,
        };
        client.expect_ok(client.request(method, url)).await?;
        Ok(ActionOutcome::Dispatched)
    }

    fn lock_pending(&self) -> std::sync::MutexGuard<'_, HashSet<String>> {
        // Guard holders never panic while locked; a poisoned lock still
        // carries usable state.
        self.pending
            .lock()
            .unwrap_or_else(std::sync::PoisonError::into_inner)
    }
}

struct PendingGuard<'a> {
    pending: &'a Mutex<HashSet<String>>,
    campaign_id: &'a str,
}

impl Drop for PendingGuard<'_> {
    fn drop(&mut self) {
        let mut pending = self
            .pending
            .lock()
            .unwrap_or_else(std::sync::PoisonError::into_inner);
        pending.remove(self.campaign_id);
    }
}
