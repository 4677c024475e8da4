//! Handlers for campaign submission, listing, inspection, and actions.

use anyhow::anyhow;
use mailcast_api_models::Campaign;
use mailcast_client::export::recipients_csv;
use mailcast_client::submit::{CampaignMetadata, CampaignSubmitter};
use mailcast_client::tracker::{self, CampaignFilters, DetailView};
use mailcast_client::{ActionDispatcher, ActionOutcome, ClientError, RecipientSelection};

use crate::cli::{
    CampaignListArgs, CampaignStatusArgs, CancelArgs, OutputFormat, RecipientsArgs, RetryArgs,
    SendArgs,
};
use crate::client::{AppContext, CliError, CliResult};
use crate::output::{render_campaign_detail, render_campaign_list, render_recipients};

pub(crate) async fn handle_send(ctx: &AppContext, args: SendArgs) -> CliResult<()> {
    if !args.yes {
        return Err(CliError::validation(
            "sending emails cannot be undone; re-run with --yes to confirm",
        ));
    }

    let mut selection = RecipientSelection::new();
    for id in &args.application_ids {
        if !selection.contains(id) {
            selection.toggle(id);
        }
    }

    let metadata = CampaignMetadata {
        notes: args.notes,
        tags: if args.tags.is_empty() {
            None
        } else {
            Some(args.tags)
        },
    };

    let submitter = CampaignSubmitter::new();
    let outcome = match submitter
        .submit(&ctx.client, &args.template, &mut selection, metadata)
        .await
    {
        Ok(outcome) => outcome,
        Err(ClientError::SendFailed {
            campaign_id,
            source,
        }) => {
            return Err(CliError::failure(anyhow!(
                "send trigger failed: {source}; campaign {campaign_id} remains pending \
                 (inspect it with `mailcast ls --status pending`)"
            )));
        }
        Err(err) => return Err(err.into()),
    };
    println!(
        "Campaign dispatched (id: {}, recipients: {})",
        outcome.campaign_id, outcome.recipient_count
    );
    Ok(())
}

pub(crate) async fn handle_campaign_list(
    ctx: &AppContext,
    args: CampaignListArgs,
    format: OutputFormat,
) -> CliResult<()> {
    let filters = CampaignFilters {
        search: args.search,
        status: args.status,
        template_id: args.template,
    };
    let listing = tracker::list(&ctx.client, &filters, args.page).await?;
    render_campaign_list(&listing, format)
}

pub(crate) async fn handle_campaign_status(
    ctx: &AppContext,
    args: CampaignStatusArgs,
    format: OutputFormat,
) -> CliResult<()> {
    let campaign = find_campaign(ctx, &args.id).await?;
    render_campaign_detail(&campaign, format)
}

pub(crate) async fn handle_recipients(
    ctx: &AppContext,
    args: RecipientsArgs,
    format: OutputFormat,
) -> CliResult<()> {
    let records = tracker::recipients(&ctx.client, &args.id, args.status).await?;
    if let Some(path) = &args.export {
        std::fs::write(path, recipients_csv(&records)).map_err(|err| {
            CliError::failure(anyhow!(
                "failed to write CSV to '{}': {err}",
                path.display()
            ))
        })?;
        println!("Exported {} recipients to {}", records.len(), path.display());
        return Ok(());
    }
    render_recipients(&records, format)
}

pub(crate) async fn handle_retry(ctx: &AppContext, args: RetryArgs) -> CliResult<()> {
    let campaign = find_campaign(ctx, &args.id).await?;
    let dispatcher = ActionDispatcher::new();
    match dispatcher.retry(&ctx.client, &campaign).await? {
        ActionOutcome::Dispatched => {
            println!("Retry requested (id: {})", campaign.email_id);
        }
        ActionOutcome::AlreadyPending => {
            println!("Retry already pending (id: {})", campaign.email_id);
        }
    }
    Ok(())
}

pub(crate) async fn handle_cancel(ctx: &AppContext, args: CancelArgs) -> CliResult<()> {
    if !args.yes {
        return Err(CliError::validation(
            "already-sent emails stay sent; re-run with --yes to confirm cancellation",
        ));
    }

    let campaign = find_campaign(ctx, &args.id).await?;
    let dispatcher = ActionDispatcher::new();
    match dispatcher.cancel(&ctx.client, &campaign).await? {
        ActionOutcome::Dispatched => {
            println!("Cancellation requested (id: {})", campaign.email_id);
        }
        ActionOutcome::AlreadyPending => {
            println!("Cancellation already pending (id: {})", campaign.email_id);
        }
    }
    Ok(())
}

/// Look up one campaign through the listing endpoint.
///
/// The API exposes no single-campaign fetch, so the identifier is passed
/// as the search term and the matching summary is reconciled out of the
/// result page.
async fn find_campaign(ctx: &AppContext, campaign_id: &str) -> CliResult<Campaign> {
    let filters = CampaignFilters {
        search: Some(campaign_id.to_string()),
        ..CampaignFilters::default()
    };
    let listing = tracker::list(&ctx.client, &filters, 1).await?;

    let mut view = DetailView::new();
    view.open(campaign_id);
    if !view.apply_from(&listing) {
        return Err(CliError::validation(format!(
            "campaign '{campaign_id}' not found"
        )));
    }
    view.current().cloned().ok_or_else(|| {
        CliError::validation(format!("campaign '{campaign_id}' not found"))
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use httpmock::prelude::*;
    use mailcast_client::{MailcastClient, Session};
    use serde_json::json;

    fn context(server: &MockServer) -> AppContext {
        AppContext {
            client: MailcastClient::builder()
                .base_url(server.base_url().parse().expect("valid URL"))
                .session(Session::new("tok", "admin", "Admin User"))
                .build()
                .expect("client should build"),
        }
    }

    fn listing_with(id: &str, status: &str, failures: u64) -> serde_json::Value {
        json!({
            "bulkEmails": [{
                "emailId": id,
                "emailStatus": status,
                "statistics": {
                    "totalRecipients": 4,
                    "successCount": 4 - failures,
                    "failureCount": failures,
                    "pendingCount": 0
                },
                "createdAt": "2026-08-01T12:00:00Z"
            }],
            "pagination": {"current": 1, "pages": 1, "total": 1}
        })
    }

    #[tokio::test]
    async fn send_requires_explicit_confirmation() {
        let server = MockServer::start_async().await;
        let create = server.mock(|when, then| {
            when.method(POST).path("/api/bulk-email/create");
            then.status(201);
        });

        let ctx = context(&server);
        let err = handle_send(
            &ctx,
            SendArgs {
                template: "T1".into(),
                application_ids: vec!["A1".into()],
                notes: None,
                tags: Vec::new(),
                yes: false,
            },
        )
        .await
        .expect_err("unconfirmed send should fail");
        assert!(matches!(err, CliError::Validation(_)));
        assert_eq!(create.calls(), 0);
    }

    #[tokio::test]
    async fn send_creates_and_dispatches() {
        let server = MockServer::start_async().await;
        let create = server.mock(|when, then| {
            when.method(POST).path("/api/bulk-email/create");
            then.status(201).json_body(json!({
                "bulkEmail": {
                    "emailId": "E1",
                    "emailStatus": "pending",
                    "createdAt": "2026-08-01T12:00:00Z"
                }
            }));
        });
        let send = server.mock(|when, then| {
            when.method(POST).path("/api/bulk-email/send/E1");
            then.status(200);
        });

        let ctx = context(&server);
        handle_send(
            &ctx,
            SendArgs {
                template: "T1".into(),
                application_ids: vec!["A1".into(), "A2".into(), "A1".into()],
                notes: Some("August follow-up".into()),
                tags: vec!["followup".into()],
                yes: true,
            },
        )
        .await
        .expect("confirmed send should succeed");
        create.assert();
        send.assert();
    }

    #[tokio::test]
    async fn send_failure_points_at_the_orphaned_campaign() {
        let server = MockServer::start_async().await;
        server.mock(|when, then| {
            when.method(POST).path("/api/bulk-email/create");
            then.status(201).json_body(json!({
                "bulkEmail": {
                    "emailId": "E9",
                    "emailStatus": "pending",
                    "createdAt": "2026-08-01T12:00:00Z"
                }
            }));
        });
        server.mock(|when, then| {
            when.method(POST).path("/api/bulk-email/send/E9");
            then.status(500).json_body(json!({"message": "SMTP down"}));
        });

        let ctx = context(&server);
        let err = handle_send(
            &ctx,
            SendArgs {
                template: "T1".into(),
                application_ids: vec!["A1".into()],
                notes: None,
                tags: Vec::new(),
                yes: true,
            },
        )
        .await
        .expect_err("send failure should surface");
        let message = err.display_message();
        assert!(message.contains("E9"));
        assert!(message.contains("--status pending"));
        assert_eq!(err.exit_code(), 3);
    }

    #[tokio::test]
    async fn retry_resolves_the_campaign_before_dispatching() {
        let server = MockServer::start_async().await;
        let list = server.mock(|when, then| {
            when.method(GET)
                .path("/api/bulk-email")
                .query_param("search", "E3");
            then.status(200).json_body(listing_with("E3", "partial", 2));
        });
        let retry = server.mock(|when, then| {
            when.method(POST).path("/api/bulk-email/E3/retry");
            then.status(200).json_body(json!({"message": "Retry started"}));
        });

        let ctx = context(&server);
        handle_retry(&ctx, RetryArgs { id: "E3".into() })
            .await
            .expect("retry should succeed");
        list.assert();
        retry.assert();
    }

    #[tokio::test]
    async fn retry_of_completed_campaign_fails_locally() {
        let server = MockServer::start_async().await;
        server.mock(|when, then| {
            when.method(GET).path("/api/bulk-email");
            then.status(200).json_body(listing_with("E1", "completed", 0));
        });
        let retry = server.mock(|when, then| {
            when.method(POST).path_includes("/retry");
            then.status(200);
        });

        let ctx = context(&server);
        let err = handle_retry(&ctx, RetryArgs { id: "E1".into() })
            .await
            .expect_err("completed campaigns have nothing to retry");
        assert!(matches!(err, CliError::Validation(_)));
        assert_eq!(retry.calls(), 0);
    }

    #[tokio::test]
    async fn cancel_requires_explicit_confirmation() {
        let server = MockServer::start_async().await;
        let cancel = server.mock(|when, then| {
            when.method(PUT).path_includes("/cancel");
            then.status(200);
        });

        let ctx = context(&server);
        let err = handle_cancel(
            &ctx,
            CancelArgs {
                id: "E2".into(),
                yes: false,
            },
        )
        .await
        .expect_err("unconfirmed cancel should fail");
        assert!(matches!(err, CliError::Validation(_)));
        assert_eq!(cancel.calls(), 0);
    }

    #[tokio::test]
    async fn cancel_dispatches_for_sending_campaigns() {
        let server = MockServer::start_async().await;
        server.mock(|when, then| {
            when.method(GET).path("/api/bulk-email");
            then.status(200).json_body(listing_with("E2", "sending", 0));
        });
        let cancel = server.mock(|when, then| {
            when.method(PUT).path("/api/bulk-email/E2/cancel");
            then.status(200).json_body(json!({"message": "Campaign cancelled"}));
        });

        let ctx = context(&server);
        handle_cancel(
            &ctx,
            CancelArgs {
                id: "E2".into(),
                yes: true,
            },
        )
        .await
        .expect("cancel should succeed");
        cancel.assert();
    }

    #[tokio::test]
    async fn status_reports_unknown_campaigns() {
        let server = MockServer::start_async().await;
        server.mock(|when, then| {
            when.method(GET).path("/api/bulk-email");
            then.status(200).json_body(json!({
                "bulkEmails": [],
                "pagination": {"current": 1, "pages": 1, "total": 0}
            }));
        });

        let ctx = context(&server);
        let err = handle_campaign_status(
            &ctx,
            CampaignStatusArgs { id: "E9".into() },
            OutputFormat::Table,
        )
        .await
        .expect_err("unknown campaign should fail");
        assert!(matches!(err, CliError::Validation(_)));
    }

    #[tokio::test]
    async fn recipients_filter_is_forwarded() {
        let server = MockServer::start_async().await;
        let mock = server.mock(|when, then| {
            when.method(GET)
                .path("/api/bulk-email/E2/recipients")
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

        let ctx = context(&server);
        let export = std::env::temp_dir().join("mailcast-e2-recipients.csv");
        handle_recipients(
            &ctx,
            RecipientsArgs {
                id: "E2".into(),
                status: Some(mailcast_api_models::RecipientStatus::Failed),
                export: Some(export.clone()),
            },
            OutputFormat::Table,
        )
        .await
        .expect("recipients should succeed");
        mock.assert();

        let csv = std::fs::read_to_string(&export).expect("export file should exist");
        assert!(csv.starts_with("Name,Email,Application ID,Status,Sent At,Error"));
        assert!(csv.contains("mailbox full"));
        let _ = std::fs::remove_file(&export);
    }
}
