//! Campaign tracker: pull-based listing, recipient breakdowns, derived
//! metrics, and the stale-detail guard.
//!
//! There is no push channel; every view transition or explicit refresh
//! re-fetches from the server. A `sending` campaign's displayed progress
//! can therefore go stale between refreshes, which is accepted.

use mailcast_api_models::{
    Campaign, CampaignListResponse, CampaignStats, CampaignStatus, OverviewStats,
    RecipientRecord, RecipientListResponse, RecipientStatus, StatsOverviewResponse,
};
use reqwest::Method;

use crate::client::MailcastClient;
use crate::error::Result;

/// Page size requested for campaign listings.
pub const CAMPAIGN_PAGE_LIMIT: u32 = 20;
const RECIPIENT_PAGE_LIMIT: u32 = 100;

/// Filters applied when listing campaigns.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CampaignFilters {
    /// Free-text search term.
    pub search: Option<String>,
    /// Lifecycle status filter.
    pub status: Option<CampaignStatus>,
    /// Template identifier filter.
    pub template_id: Option<String>,
}

/// Fetch one page of campaign summaries, newest-updated first.
///
/// # Errors
///
/// Returns an error when the request fails or the server rejects it.
pub async fn list(
    client: &MailcastClient,
    filters: &CampaignFilters,
    page: u32,
) -> Result<CampaignListResponse> {
    let mut url = client.endpoint("/api/bulk-email")?;
    {
        let mut pairs = url.query_pairs_mut();
        pairs.append_pair("page", &page.to_string());
        pairs.append_pair("limit", &CAMPAIGN_PAGE_LIMIT.to_string());
        if let Some(search) = &filters.search {
            pairs.append_pair("search", search);
        }
        if let Some(status) = filters.status {
            pairs.append_pair("status", status.as_str());
        }
        if let Some(template_id) = &filters.template_id {
            pairs.append_pair("templateId", template_id);
        }
    }
    client.expect_json(client.request(Method::GET, url)).await
}

/// Fetch the recipient-level breakdown of one campaign, optionally
/// narrowed by delivery status. Recipients are never embedded in the
/// campaign summaries.
///
/// # Errors
///
/// Returns an error when the request fails or the server rejects it.
pub async fn recipients(
    client: &MailcastClient,
    campaign_id: &str,
    status: Option<RecipientStatus>,
) -> Result<Vec<RecipientRecord>> {
    let mut url = client.endpoint(&format!("/api/bulk-email/{campaign_id}/recipients"))?;
    {
        let mut pairs = url.query_pairs_mut();
        pairs.append_pair("page", "1");
        pairs.append_pair("limit", &RECIPIENT_PAGE_LIMIT.to_string());
        if let Some(status) = status {
            pairs.append_pair("status", status.as_str());
        }
    }
    let response: RecipientListResponse =
        client.expect_json(client.request(Method::GET, url)).await?;
    Ok(response.recipients)
}

/// Fetch the aggregate dashboard counters.
///
/// # Errors
///
/// Returns an error when the request fails or the server rejects it.
pub async fn overview(client: &MailcastClient) -> Result<OverviewStats> {
    let url = client.endpoint("/api/bulk-email/stats/overview")?;
    let response: StatsOverviewResponse =
        client.expect_json(client.request(Method::GET, url)).await?;
    Ok(response.stats)
}

/// Delivery success rate as a rounded percentage in `[0, 100]`.
///
/// Defined as 0 when the campaign has no recipients; clamped so transient
/// counter mismatches while `sending` can never push it past 100.
#[must_use]
pub fn success_rate(stats: &CampaignStats) -> u8 {
    rate(stats.success_count, stats.total_recipients)
}

/// Aggregate success rate across all campaigns, same rounding rules as
/// [`success_rate`].
#[must_use]
pub fn overall_success_rate(stats: &OverviewStats) -> u8 {
    rate(stats.total_success, stats.total_recipients)
}

fn rate(part: u64, total: u64) -> u8 {
    if total == 0 {
        return 0;
    }
    let rounded = (part * 100 + total / 2) / total;
    u8::try_from(rounded.min(100)).unwrap_or(100)
}

/// Completion percentage for display.
///
/// Uses the server's `progress` object verbatim when present; otherwise
/// the campaign is treated as fully resolved. No partial-progress
/// estimate is synthesized client-side.
#[must_use]
pub fn progress_percentage(campaign: &Campaign) -> u8 {
    campaign
        .progress
        .map_or(100, |progress| progress.percentage.min(100))
}

/// Detail view keyed by campaign id.
///
/// Fetches across campaigns may resolve in any order, so a response is
/// applied only when its id still matches the currently open campaign;
/// anything else is dropped as stale.
#[derive(Debug, Clone, Default)]
pub struct DetailView {
    open_id: Option<String>,
    current: Option<Campaign>,
}

impl DetailView {
    /// Create a closed detail view.
    #[must_use]
    pub const fn new() -> Self {
        Self {
            open_id: None,
            current: None,
        }
    }

    /// Open the view for a campaign, discarding any previous detail.
    pub fn open(&mut self, campaign_id: impl Into<String>) {
        self.open_id = Some(campaign_id.into());
        self.current = None;
    }

    /// Close the view and drop its state.
    pub fn close(&mut self) {
        self.open_id = None;
        self.current = None;
    }

    /// Identifier of the currently open campaign, if any.
    #[must_use]
    pub fn open_id(&self) -> Option<&str> {
        self.open_id.as_deref()
    }

    /// Apply a fetched campaign snapshot. Returns `false` (and keeps the
    /// existing state) when the snapshot does not belong to the open
    /// campaign.
    pub fn apply(&mut self, campaign: Campaign) -> bool {
        if self.open_id.as_deref() != Some(campaign.email_id.as_str()) {
            return false;
        }
        self.current = Some(campaign);
        true
    }

    /// Apply the matching snapshot out of a freshly fetched listing.
    pub fn apply_from(&mut self, listing: &CampaignListResponse) -> bool {
        let Some(open_id) = self.open_id.as_deref() else {
            return false;
        };
        listing
            .bulk_emails
            .iter()
            .find(|campaign| campaign.email_id == open_id)
            .cloned()
            .is_some_and(|campaign| self.apply(campaign))
    }

    /// Currently applied snapshot, if one has been accepted.
    #[must_use]
    pub const fn current(&self) -> Option<&Campaign> {
        self.current.as_ref()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::session::Session;
    use httpmock::prelude::*;
    use mailcast_api_models::CampaignProgress;
    use serde_json::json;

    fn test_client(server: &MockServer) -> MailcastClient {
        MailcastClient::builder()
            .base_url(server.base_url().parse().expect("valid URL"))
            .session(Session::new("tok", "admin", "Admin User"))
            .build()
            .expect("client should build")
    }

    fn campaign(id: &str, status: CampaignStatus, stats: CampaignStats) -> Campaign {
        Campaign {
            email_id: id.to_string(),
            email_status: status,
            admin_id: Some("admin".into()),
            admin_name: Some("Admin User".into()),
            notes: None,
            tags: Vec::new(),
            template_used: None,
            statistics: stats,
            progress: None,
            timeline: Vec::new(),
            created_at: "2026-08-01T12:00:00Z".parse().expect("valid timestamp"),
            updated_at: None,
        }
    }

    #[tokio::test]
    async fn list_builds_filtered_query() {
        let server = MockServer::start_async().await;
        let mock = server.mock(|when, then| {
            when.method(GET)
                .path("/api/bulk-email")
                .query_param("page", "2")
                .query_param("limit", "20")
                .query_param("search", "august")
                .query_param("status", "sending")
                .query_param("templateId", "T1");
            then.status(200).json_body(json!({
                "bulkEmails": [],
                "pagination": {"current": 2, "pages": 5, "total": 93}
            }));
        });

        let client = test_client(&server);
        let filters = CampaignFilters {
            search: Some("august".into()),
            status: Some(CampaignStatus::Sending),
            template_id: Some("T1".into()),
        };
        let listing = list(&client, &filters, 2).await.expect("list should succeed");
        assert_eq!(listing.pagination.pages, 5);
        mock.assert();
    }

    #[tokio::test]
    async fn recipients_filters_by_status() {
        let server = MockServer::start_async().await;
        let mock = server.mock(|when, then| {
            when.method(GET)
                .path("/api/bulk-email/E2/recipients")
                .query_param("page", "1")
                .query_param("limit", "100")
                .query_param("status", "failed");
            then.status(200).json_body(json!({
                "recipients": [{
                    "applicationId": "A3",
                    "name": "Jo Doe",
                    "email": "jo@example.com",
                    "status": "failed",
                    "error": "mailbox full"
                }]
            }));
        });

        let client = test_client(&server);
        let records = recipients(&client, "E2", Some(RecipientStatus::Failed))
            .await
            .expect("recipients should succeed");
        assert_eq!(records.len(), 1);
        assert_eq!(records[0].error.as_deref(), Some("mailbox full"));
        mock.assert();
    }

    #[tokio::test]
    async fn overview_unwraps_stats_envelope() {
        let server = MockServer::start_async().await;
        server.mock(|when, then| {
            when.method(GET).path("/api/bulk-email/stats/overview");
            then.status(200).json_body(json!({
                "stats": {
                    "totalCampaigns": 12,
                    "totalRecipients": 240,
                    "totalSuccess": 180,
                    "totalFailures": 20
                }
            }));
        });

        let client = test_client(&server);
        let stats = overview(&client).await.expect("overview should succeed");
        assert_eq!(stats.total_campaigns, 12);
        assert_eq!(overall_success_rate(&stats), 75);
    }

    #[test]
    fn success_rate_is_zero_for_empty_campaigns() {
        assert_eq!(success_rate(&CampaignStats::default()), 0);
    }

    #[test]
    fn success_rate_rounds_and_stays_bounded() {
        let stats = CampaignStats {
            total_recipients: 3,
            success_count: 2,
            failure_count: 1,
            pending_count: 0,
        };
        assert_eq!(success_rate(&stats), 67);

        // Transient counter mismatches while sending must not overflow
        // the percentage.
        let inconsistent = CampaignStats {
            total_recipients: 10,
            success_count: 12,
            failure_count: 0,
            pending_count: 0,
        };
        assert_eq!(success_rate(&inconsistent), 100);
    }

    #[test]
    fn terminal_counters_reconcile_in_fixtures() {
        let stats = CampaignStats {
            total_recipients: 10,
            success_count: 7,
            failure_count: 3,
            pending_count: 0,
        };
        assert_eq!(
            stats.success_count + stats.failure_count + stats.pending_count,
            stats.total_recipients
        );
        assert_eq!(success_rate(&stats), 70);
    }

    #[test]
    fn progress_uses_server_value_or_full_resolution() {
        let mut sending = campaign(
            "E1",
            CampaignStatus::Sending,
            CampaignStats {
                total_recipients: 10,
                success_count: 4,
                failure_count: 0,
                pending_count: 6,
            },
        );
        sending.progress = Some(CampaignProgress {
            completed: 4,
            pending: 6,
            percentage: 40,
        });
        assert_eq!(progress_percentage(&sending), 40);

        let resolved = campaign("E2", CampaignStatus::Completed, CampaignStats::default());
        assert_eq!(progress_percentage(&resolved), 100);
    }

    #[test]
    fn detail_view_drops_stale_responses() {
        let mut view = DetailView::new();
        view.open("E2");

        // A late response for the previously open campaign is discarded.
        let stale = campaign("E1", CampaignStatus::Completed, CampaignStats::default());
        assert!(!view.apply(stale));
        assert!(view.current().is_none());

        let fresh = campaign("E2", CampaignStatus::Sending, CampaignStats::default());
        assert!(view.apply(fresh));
        assert_eq!(view.current().map(|c| c.email_id.as_str()), Some("E2"));

        view.close();
        assert!(view.current().is_none());
        assert!(view.open_id().is_none());
    }

    #[test]
    fn detail_view_reconciles_from_listing() {
        let mut view = DetailView::new();
        view.open("E2");

        let listing = CampaignListResponse {
            bulk_emails: vec![
                campaign("E1", CampaignStatus::Completed, CampaignStats::default()),
                campaign("E2", CampaignStatus::Sending, CampaignStats::default()),
            ],
            pagination: mailcast_api_models::Pagination::default(),
        };
        assert!(view.apply_from(&listing));
        assert_eq!(
            view.current().map(|c| c.email_status),
            Some(CampaignStatus::Sending)
        );

        let empty = CampaignListResponse::default();
        assert!(!view.apply_from(&empty));
        // The previous snapshot survives a listing that no longer
        // contains the campaign.
        assert!(view.current().is_some());
    }
}
