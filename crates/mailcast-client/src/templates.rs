//! Template resolver: lists available templates and renders previews
//! against a sample recipient.

use mailcast_api_models::{
    PreviewRequest, PreviewResponse, RecipientSample, Template, TemplateListResponse,
};
use reqwest::Method;

use crate::client::MailcastClient;
use crate::error::{ClientError, Result};

/// Filter applied when listing templates for campaign selection.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TemplateFilter {
    /// Server-side status filter (`active` by default).
    pub status: Option<String>,
    /// Page size requested from the server; the returned page is taken
    /// as the full candidate set.
    pub limit: u32,
}

impl Default for TemplateFilter {
    fn default() -> Self {
        Self {
            status: Some("active".to_string()),
            limit: 100,
        }
    }
}

/// Fetch the templates available for campaign selection.
///
/// # Errors
///
/// Returns an error when the request fails or the server rejects it.
pub async fn list(client: &MailcastClient, filter: &TemplateFilter) -> Result<Vec<Template>> {
    let mut url = client.endpoint("/api/email-templates")?;
    {
        let mut pairs = url.query_pairs_mut();
        pairs.append_pair("limit", &filter.limit.to_string());
        if let Some(status) = &filter.status {
            pairs.append_pair("status", status);
        }
    }

    let response: TemplateListResponse = client
        .expect_json(client.request(Method::GET, url))
        .await?;
    Ok(response.templates)
}

/// Render a template against a sample recipient.
///
/// Returns the fully rendered HTML string; `{{variables}}` the server
/// cannot resolve are left as-is. The result is never cached; callers
/// re-invoke on every template or sample change.
///
/// # Errors
///
/// Returns a validation error for a blank template id (no request is
/// made), otherwise any transport or server rejection.
pub async fn preview(
    client: &MailcastClient,
    template_id: &str,
    sample: &RecipientSample,
) -> Result<String> {
    if template_id.trim().is_empty() {
        return Err(ClientError::validation(
            "select a template before previewing",
        ));
    }

    let request = PreviewRequest {
        template_id: template_id.to_string(),
        variables: sample.clone(),
    };
    let url = client.endpoint("/api/email-templates/preview")?;
    let response: PreviewResponse = client
        .expect_json(client.request(Method::POST, url).json(&request))
        .await?;
    Ok(response.preview)
}
