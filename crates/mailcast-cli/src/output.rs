//! Output renderers and formatting helpers for CLI commands.

use anyhow::anyhow;
use mailcast_api_models::{
    Campaign, CampaignListResponse, OverviewStats, RecipientRecord, Template,
};
use mailcast_client::tracker::{overall_success_rate, progress_percentage, success_rate};

use crate::cli::OutputFormat;
use crate::client::{CliError, CliResult};

pub(crate) fn render_template_list(templates: &[Template], format: OutputFormat) -> CliResult<()> {
    match format {
        OutputFormat::Json => print_json(&templates)?,
        OutputFormat::Table => {
            println!("{:<24} {:<12} {:>6} NAME", "ID", "CATEGORY", "USED");
            for template in templates {
                println!(
                    "{:<24} {:<12} {:>6} {}",
                    template.template_id,
                    template.category.as_str(),
                    template.usage_count,
                    template.name
                );
            }
        }
    }
    Ok(())
}

pub(crate) fn render_campaign_list(
    list: &CampaignListResponse,
    format: OutputFormat,
) -> CliResult<()> {
    match format {
        OutputFormat::Json => print_json(list)?,
        OutputFormat::Table => {
            println!(
                "{:<24} {:<10} {:>5} {:>6} {:<20} UPDATED",
                "ID", "STATUS", "RATE", "SENT", "TEMPLATE"
            );
            for campaign in &list.bulk_emails {
                let stats = &campaign.statistics;
                let template = campaign
                    .template_used
                    .as_ref()
                    .and_then(|used| used.template_name.as_deref())
                    .unwrap_or("<unknown>");
                let updated = campaign.updated_at.unwrap_or(campaign.created_at);
                println!(
                    "{:<24} {:<10} {:>4}% {:>3}/{:<3} {:<20} {}",
                    campaign.email_id,
                    campaign.email_status.as_str(),
                    success_rate(stats),
                    stats.success_count,
                    stats.total_recipients,
                    template,
                    updated.to_rfc3339()
                );
            }
            let pagination = &list.pagination;
            println!(
                "page {} of {} ({} campaigns)",
                pagination.current, pagination.pages, pagination.total
            );
        }
    }
    Ok(())
}

pub(crate) fn render_campaign_detail(campaign: &Campaign, format: OutputFormat) -> CliResult<()> {
    match format {
        OutputFormat::Json => print_json(campaign)?,
        OutputFormat::Table => {
            println!("id: {}", campaign.email_id);
            println!("status: {}", campaign.email_status.as_str());
            if let Some(template) = &campaign.template_used {
                let name = template.template_name.as_deref().unwrap_or("<unknown>");
                println!("template: {name}");
            }
            if let Some(admin) = &campaign.admin_name {
                println!("sent by: {admin}");
            }
            let stats = &campaign.statistics;
            println!(
                "deliveries: {} sent, {} failed, {} pending of {} ({}% success)",
                stats.success_count,
                stats.failure_count,
                stats.pending_count,
                stats.total_recipients,
                success_rate(stats)
            );
            println!("progress: {}%", progress_percentage(campaign));
            if let Some(notes) = &campaign.notes {
                println!("notes: {notes}");
            }
            if !campaign.tags.is_empty() {
                println!("tags: {}", campaign.tags.join(", "));
            }
            println!("created: {}", campaign.created_at.to_rfc3339());
            if let Some(updated) = campaign.updated_at {
                println!("updated: {}", updated.to_rfc3339());
            }
            if !campaign.timeline.is_empty() {
                println!("timeline:");
                for event in &campaign.timeline {
                    let details = event.details.as_deref().unwrap_or("");
                    println!(
                        "  {} {:<16} {}",
                        event.timestamp.to_rfc3339(),
                        event.action,
                        details
                    );
                }
            }
        }
    }
    Ok(())
}

pub(crate) fn render_recipients(
    recipients: &[RecipientRecord],
    format: OutputFormat,
) -> CliResult<()> {
    match format {
        OutputFormat::Json => print_json(&recipients)?,
        OutputFormat::Table => {
            println!("{:<14} {:<8} {:<28} NAME", "APPLICATION", "STATUS", "EMAIL");
            for recipient in recipients {
                println!(
                    "{:<14} {:<8} {:<28} {}",
                    recipient.application_id,
                    recipient.status.as_str(),
                    recipient.email,
                    recipient.name
                );
                if let Some(error) = &recipient.error {
                    println!("{:<14} {:<8} error: {error}", "", "");
                }
            }
        }
    }
    Ok(())
}

pub(crate) fn render_overview(stats: &OverviewStats, format: OutputFormat) -> CliResult<()> {
    match format {
        OutputFormat::Json => print_json(stats)?,
        OutputFormat::Table => {
            println!("campaigns: {}", stats.total_campaigns);
            println!("recipients: {}", stats.total_recipients);
            println!("succeeded: {}", stats.total_success);
            println!("failed: {}", stats.total_failures);
            println!("success rate: {}%", overall_success_rate(stats));
        }
    }
    Ok(())
}

fn print_json<T: serde::Serialize>(value: &T) -> CliResult<()> {
    let text = serde_json::to_string_pretty(value)
        .map_err(|err| CliError::failure(anyhow!("failed to format JSON: {err}")))?;
    println!("{text}");
    Ok(())
}
