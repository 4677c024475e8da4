//! Handlers for template listing and preview.

use mailcast_api_models::RecipientSample;
use mailcast_client::templates::{self, TemplateFilter};

use crate::cli::{OutputFormat, TemplateListArgs, TemplatePreviewArgs};
use crate::client::{AppContext, CliResult};
use crate::output::render_template_list;

pub(crate) async fn handle_template_list(
    ctx: &AppContext,
    args: TemplateListArgs,
    format: OutputFormat,
) -> CliResult<()> {
    let mut filter = TemplateFilter {
        limit: args.limit,
        ..TemplateFilter::default()
    };
    if args.status.is_some() {
        filter.status = args.status;
    }

    let templates = templates::list(&ctx.client, &filter).await?;
    render_template_list(&templates, format)
}

pub(crate) async fn handle_template_preview(
    ctx: &AppContext,
    args: TemplatePreviewArgs,
) -> CliResult<()> {
    let sample = RecipientSample {
        name: args.name,
        application_id: args.application_id,
        email: args.email,
        status: args.status,
    };
    let rendered = templates::preview(&ctx.client, &args.id, &sample).await?;
    println!("{rendered}");
    Ok(())
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

    #[tokio::test]
    async fn template_list_defaults_to_active_templates() {
        let server = MockServer::start_async().await;
        let mock = server.mock(|when, then| {
            when.method(GET)
                .path("/api/email-templates")
                .query_param("limit", "100")
                .query_param("status", "active");
            then.status(200).json_body(json!({"templates": []}));
        });

        let ctx = context(&server);
        let args = TemplateListArgs {
            status: None,
            limit: 100,
        };
        handle_template_list(&ctx, args, OutputFormat::Table)
            .await
            .expect("listing should succeed");
        mock.assert();
    }

    #[tokio::test]
    async fn template_preview_posts_sample_fields() {
        let server = MockServer::start_async().await;
        let mock = server.mock(|when, then| {
            when.method(POST)
                .path("/api/email-templates/preview")
                .json_body(json!({
                    "templateId": "T1",
                    "variables": {
                        "name": "Jane Doe",
                        "applicationId": "APP-0000",
                        "email": "jane@example.com",
                        "status": "submitted"
                    }
                }));
            then.status(200)
                .json_body(json!({"preview": "<p>Dear Jane Doe</p>"}));
        });

        let ctx = context(&server);
        let args = TemplatePreviewArgs {
            id: "T1".into(),
            name: "Jane Doe".into(),
            application_id: "APP-0000".into(),
            email: "jane@example.com".into(),
            status: "submitted".into(),
        };
        handle_template_preview(&ctx, args)
            .await
            .expect("preview should succeed");
        mock.assert();
    }
}
