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
    clippy::cargo,
    clippy::nursery,
    rustdoc::broken_intra_doc_links,
    rustdoc::bare_urls,
    missing_docs
)]
//! Shared HTTP DTOs for the Mailcast campaign API.
//!
//! These types mirror the backend's `camelCase` JSON contract verbatim. The
//! controller and the CLI re-use them for request/response encoding so the
//! wire mapping stays a single source of truth. Every field the client
//! reads decodes to a defined default rather than relying on implicit
//! nulls.
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Error body returned by the API on non-2xx responses.
///
/// The backend is inconsistent about the field name, so both `message` and
/// `error` are accepted.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
pub struct ApiErrorBody {
    #[serde(skip_serializing_if = "Option::is_none")]
    /// Primary human-readable error message.
    pub message: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    /// Alternate error field used by some endpoints.
    pub error: Option<String>,
}

impl ApiErrorBody {
    /// Best-effort human-readable message, preferring `message` over
    /// `error`.
    #[must_use]
    pub fn detail(&self) -> Option<&str> {
        self.message.as_deref().or(self.error.as_deref())
    }
}

/// Server-driven lifecycle states of a bulk email campaign.
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "lowercase")]
pub enum CampaignStatus {
    /// Created but not yet dispatched. Also the state of an orphaned
    /// campaign whose send trigger failed.
    #[default]
    Pending,
    /// Dispatch in progress server-side.
    Sending,
    /// Every recipient resolved successfully.
    Completed,
    /// Every recipient attempt failed.
    Failed,
    /// Dispatch halted by an explicit cancel.
    Cancelled,
    /// Dispatch finished with a mix of successes and failures.
    Partial,
}

impl CampaignStatus {
    /// Stable lowercase label used in query strings and table output.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Pending => "pending",
            Self::Sending => "sending",
            Self::Completed => "completed",
            Self::Failed => "failed",
            Self::Cancelled => "cancelled",
            Self::Partial => "partial",
        }
    }

    /// True once no further server-automatic transition will occur.
    #[must_use]
    pub const fn is_terminal(self) -> bool {
        matches!(
            self,
            Self::Completed | Self::Failed | Self::Cancelled | Self::Partial
        )
    }
}

/// Aggregate delivery counters carried by a campaign snapshot.
///
/// `success + failure + pending == total` holds at terminal status; while
/// `sending`, transient mismatches are expected and tolerated.
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct CampaignStats {
    #[serde(default)]
    /// Number of recipients targeted by the campaign.
    pub total_recipients: u64,
    #[serde(default)]
    /// Recipients whose delivery succeeded.
    pub success_count: u64,
    #[serde(default)]
    /// Recipients whose delivery failed.
    pub failure_count: u64,
    #[serde(default)]
    /// Recipients not yet attempted or awaiting resolution.
    pub pending_count: u64,
}

/// Optional in-flight progress snapshot supplied by the server.
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct CampaignProgress {
    #[serde(default)]
    /// Recipients already resolved (sent or failed).
    pub completed: u64,
    #[serde(default)]
    /// Recipients still awaiting an attempt.
    pub pending: u64,
    #[serde(default)]
    /// Server-computed completion percentage, used verbatim.
    pub percentage: u8,
}

/// Denormalized template snapshot recorded on the campaign at creation.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct TemplateRef {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    /// Identifier of the template used.
    pub template_id: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    /// Template name at the time of use.
    pub template_name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    /// Template category at the time of use.
    pub template_category: Option<String>,
}

/// Single audit entry in a campaign's timeline.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct TimelineEvent {
    /// Action label, e.g. `created`, `send_started`, `retry_requested`.
    pub action: String,
    /// When the action occurred.
    pub timestamp: DateTime<Utc>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    /// Optional free-text detail for the entry.
    pub details: Option<String>,
}

/// Server-owned bulk email campaign resource.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Campaign {
    /// Opaque campaign identifier assigned at creation.
    pub email_id: String,
    #[serde(default)]
    /// Current lifecycle state.
    pub email_status: CampaignStatus,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    /// Identifier of the admin who created the campaign.
    pub admin_id: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    /// Display name of the admin who created the campaign.
    pub admin_name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    /// Free-text notes attached at creation.
    pub notes: Option<String>,
    #[serde(default)]
    /// String tags attached at creation.
    pub tags: Vec<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    /// Template snapshot recorded at creation.
    pub template_used: Option<TemplateRef>,
    #[serde(default)]
    /// Aggregate delivery counters.
    pub statistics: CampaignStats,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    /// In-flight progress when the server supplies one.
    pub progress: Option<CampaignProgress>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    /// Audit timeline, oldest first.
    pub timeline: Vec<TimelineEvent>,
    /// Creation timestamp.
    pub created_at: DateTime<Utc>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    /// Timestamp of the latest server-side update.
    pub updated_at: Option<DateTime<Utc>>,
}

/// Delivery states of a single recipient within a campaign.
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "lowercase")]
pub enum RecipientStatus {
    /// Delivery not yet attempted or re-queued by a retry.
    #[default]
    Pending,
    /// Email accepted for delivery.
    Sent,
    /// Delivery attempt failed.
    Failed,
}

impl RecipientStatus {
    /// Stable lowercase label used in query strings and table output.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Pending => "pending",
            Self::Sent => "sent",
            Self::Failed => "failed",
        }
    }
}

/// One application's delivery record within a campaign.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct RecipientRecord {
    /// Application identifier this record belongs to.
    pub application_id: String,
    #[serde(default)]
    /// Applicant name.
    pub name: String,
    #[serde(default)]
    /// Applicant email address.
    pub email: String,
    #[serde(default)]
    /// Current delivery status.
    pub status: RecipientStatus,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    /// When the email was accepted, if it was.
    pub sent_at: Option<DateTime<Utc>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    /// Delivery error message, if the attempt failed.
    pub error: Option<String>,
}

/// Categories a reusable email template can belong to.
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "lowercase")]
pub enum TemplateCategory {
    /// Acceptance / success notifications.
    Success,
    /// Interview scheduling.
    Interview,
    /// Rejection notices.
    Rejection,
    /// Uncategorized templates.
    #[default]
    General,
    /// Follow-up messages.
    Followup,
    /// Reminder messages.
    Reminder,
}

impl TemplateCategory {
    /// Stable lowercase label used in query strings and table output.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Success => "success",
            Self::Interview => "interview",
            Self::Rejection => "rejection",
            Self::General => "general",
            Self::Followup => "followup",
            Self::Reminder => "reminder",
        }
    }
}

/// Reusable subject/body pair with `{{variable}}` placeholders.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct Template {
    /// Stable template identifier.
    pub template_id: String,
    /// Human-friendly template name.
    pub name: String,
    #[serde(default)]
    /// Category the template belongs to.
    pub category: TemplateCategory,
    #[serde(default)]
    /// Subject line, may contain placeholders.
    pub subject: String,
    #[serde(default)]
    /// HTML body, may contain placeholders.
    pub html_content: String,
    #[serde(default)]
    /// Placeholder names the template expects.
    pub variables: Vec<String>,
    #[serde(default)]
    /// Whether the template is available for campaigns.
    pub is_active: bool,
    #[serde(default)]
    /// Whether the template is an unpublished draft.
    pub is_draft: bool,
    #[serde(default)]
    /// How many times the template has been used.
    pub usage_count: u64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    /// Creation timestamp when the server supplies one.
    pub created_at: Option<DateTime<Utc>>,
}

/// Sample recipient fields substituted into a template preview.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct RecipientSample {
    /// Applicant name.
    pub name: String,
    /// Application identifier.
    pub application_id: String,
    /// Applicant email address.
    pub email: String,
    /// Current application status label.
    pub status: String,
}

/// Request body for `POST /api/email-templates/preview`.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct PreviewRequest {
    /// Template to render.
    pub template_id: String,
    /// Recipient sample substituted into the placeholders.
    pub variables: RecipientSample,
}

/// Response body for `POST /api/email-templates/preview`.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct PreviewResponse {
    /// Fully rendered HTML with subject and body substituted. Variables
    /// the server could not resolve are left as-is.
    pub preview: String,
}

/// Request body for `POST /api/bulk-email/create`.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct CreateCampaignRequest {
    /// Template the campaign will send.
    pub template_id: String,
    /// Applications targeted by the campaign. Must be non-empty.
    pub application_ids: Vec<String>,
    /// Identifier of the acting admin.
    pub admin_id: String,
    /// Display name of the acting admin.
    pub admin_name: String,
    /// Free-text notes attached to the campaign.
    pub notes: String,
    /// String tags attached to the campaign.
    pub tags: Vec<String>,
}

/// Response body for `POST /api/bulk-email/create`.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct CreateCampaignResponse {
    /// The freshly created campaign, in `pending` state.
    pub bulk_email: Campaign,
}

/// Pagination block attached to list responses.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
pub struct Pagination {
    #[serde(default = "default_page")]
    /// Current page number, 1-based.
    pub current: u32,
    #[serde(default = "default_page")]
    /// Total number of pages.
    pub pages: u32,
    #[serde(default)]
    /// Total number of items across all pages.
    pub total: u64,
}

impl Default for Pagination {
    fn default() -> Self {
        Self {
            current: 1,
            pages: 1,
            total: 0,
        }
    }
}

const fn default_page() -> u32 {
    1
}

/// Response body for `GET /api/bulk-email`.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct CampaignListResponse {
    #[serde(default)]
    /// Campaign summaries, newest-updated first.
    pub bulk_emails: Vec<Campaign>,
    #[serde(default)]
    /// Pagination block for the listing.
    pub pagination: Pagination,
}

/// Response body for `GET /api/bulk-email/{emailId}/recipients`.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct RecipientListResponse {
    #[serde(default)]
    /// Recipient delivery records for the campaign.
    pub recipients: Vec<RecipientRecord>,
    #[serde(default)]
    /// Pagination block for the listing.
    pub pagination: Pagination,
}

/// Response body for `GET /api/email-templates`.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
pub struct TemplateListResponse {
    #[serde(default)]
    /// Templates matching the requested filter.
    pub templates: Vec<Template>,
}

/// Aggregate dashboard counters.
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct OverviewStats {
    #[serde(default)]
    /// Campaigns created, all time.
    pub total_campaigns: u64,
    #[serde(default)]
    /// Recipients targeted across all campaigns.
    pub total_recipients: u64,
    #[serde(default)]
    /// Deliveries that succeeded across all campaigns.
    pub total_success: u64,
    #[serde(default)]
    /// Deliveries that failed across all campaigns.
    pub total_failures: u64,
}

/// Response body for `GET /api/bulk-email/stats/overview`.
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize, PartialEq, Eq)]
pub struct StatsOverviewResponse {
    #[serde(default)]
    /// Aggregate dashboard counters.
    pub stats: OverviewStats,
}
