//! Command-line argument parsing and dispatch for the Mailcast CLI.

use std::path::PathBuf;
use std::time::Duration;

use clap::{Args, Parser, Subcommand, ValueEnum};
use mailcast_api_models::{CampaignStatus, RecipientStatus};
use mailcast_client::{MailcastClient, Session};
use reqwest::Url;
use tracing_subscriber::EnvFilter;
use uuid::Uuid;

use crate::client::{AppContext, CliError, CliResult, TelemetryEmitter, parse_url};
use crate::commands::{campaigns, stats, templates};

const DEFAULT_TIMEOUT_SECS: u64 = 10;
const DEFAULT_API_URL: &str = "http://127.0.0.1:4000";

/// Parses CLI arguments, executes the requested command, and handles
/// user-facing telemetry emission. Returns the process exit code.
pub async fn run() -> i32 {
    let cli = Cli::parse();
    let command_name = command_label(&cli.command);
    let trace_id = Uuid::new_v4().to_string();

    let _ = tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_env("MAILCAST_LOG"))
        .with_writer(std::io::stderr)
        .try_init();

    let telemetry = TelemetryEmitter::from_env();
    let result = dispatch(cli, &trace_id).await;

    let (exit_code, message, outcome) = match result {
        Ok(()) => (0, None, "success"),
        Err(err) => {
            let exit_code = err.exit_code();
            let message = err.display_message();
            eprintln!("error: {message}");
            (exit_code, Some(message), "error")
        }
    };

    if let Some(emitter) = &telemetry {
        emitter
            .emit(
                &trace_id,
                command_name,
                outcome,
                exit_code,
                message.as_deref(),
            )
            .await;
    }

    exit_code
}

async fn dispatch(cli: Cli, trace_id: &str) -> CliResult<()> {
    let token = cli
        .token
        .as_deref()
        .map(str::trim)
        .filter(|value| !value.is_empty())
        .ok_or_else(|| {
            CliError::validation(
                "authentication token is required (flag --token or MAILCAST_TOKEN)",
            )
        })?;

    let client = MailcastClient::builder()
        .base_url(cli.api_url)
        .timeout(Duration::from_secs(cli.timeout))
        .session(Session::new(token, cli.admin_id, cli.admin_name))
        .request_id(trace_id)
        .build()?;
    let ctx = AppContext { client };

    match cli.command {
        Command::Template(template) => match template {
            TemplateCommand::Ls(args) => templates::handle_template_list(&ctx, args, cli.output).await,
            TemplateCommand::Preview(args) => templates::handle_template_preview(&ctx, args).await,
        },
        Command::Send(args) => campaigns::handle_send(&ctx, args).await,
        Command::Ls(args) => campaigns::handle_campaign_list(&ctx, args, cli.output).await,
        Command::Status(args) => campaigns::handle_campaign_status(&ctx, args, cli.output).await,
        Command::Recipients(args) => campaigns::handle_recipients(&ctx, args, cli.output).await,
        Command::Retry(args) => campaigns::handle_retry(&ctx, args).await,
        Command::Cancel(args) => campaigns::handle_cancel(&ctx, args).await,
        Command::Stats => stats::handle_stats(&ctx, cli.output).await,
    }
}

#[derive(Parser)]
#[command(name = "mailcast", about = "Administrative CLI for Mailcast bulk email campaigns")]
pub(crate) struct Cli {
    #[arg(
        long,
        global = true,
        env = "MAILCAST_API_URL",
        value_parser = parse_url,
        default_value = DEFAULT_API_URL
    )]
    pub(crate) api_url: Url,
    #[arg(long, global = true, env = "MAILCAST_TOKEN")]
    pub(crate) token: Option<String>,
    #[arg(long, global = true, env = "MAILCAST_ADMIN_ID", default_value = "admin")]
    pub(crate) admin_id: String,
    #[arg(
        long,
        global = true,
        env = "MAILCAST_ADMIN_NAME",
        default_value = "Administrator"
    )]
    pub(crate) admin_name: String,
    #[arg(
        long,
        global = true,
        env = "MAILCAST_HTTP_TIMEOUT_SECS",
        default_value_t = DEFAULT_TIMEOUT_SECS
    )]
    pub(crate) timeout: u64,
    #[arg(long, global = true, value_enum, default_value_t = OutputFormat::Table)]
    pub(crate) output: OutputFormat,
    #[command(subcommand)]
    pub(crate) command: Command,
}

#[derive(Subcommand)]
pub(crate) enum Command {
    /// Inspect the email templates available for campaigns.
    #[command(subcommand)]
    Template(TemplateCommand),
    /// Create a campaign for the given applications and trigger its send.
    Send(SendArgs),
    /// List campaigns.
    Ls(CampaignListArgs),
    /// Show one campaign in detail.
    Status(CampaignStatusArgs),
    /// Show a campaign's recipient breakdown.
    Recipients(RecipientsArgs),
    /// Retry a campaign's failed deliveries.
    Retry(RetryArgs),
    /// Cancel an in-flight campaign's remaining deliveries.
    Cancel(CancelArgs),
    /// Show aggregate campaign statistics.
    Stats,
}

#[derive(Subcommand)]
pub(crate) enum TemplateCommand {
    Ls(TemplateListArgs),
    Preview(TemplatePreviewArgs),
}

#[derive(Args, Default)]
pub(crate) struct TemplateListArgs {
    #[arg(long, help = "Server-side status filter")]
    pub(crate) status: Option<String>,
    #[arg(long, default_value_t = 100)]
    pub(crate) limit: u32,
}

#[derive(Args)]
pub(crate) struct TemplatePreviewArgs {
    #[arg(help = "Template identifier")]
    pub(crate) id: String,
    #[arg(long, default_value = "Jane Doe", help = "Sample recipient name")]
    pub(crate) name: String,
    #[arg(
        long,
        default_value = "APP-0000",
        help = "Sample application identifier"
    )]
    pub(crate) application_id: String,
    #[arg(long, default_value = "jane@example.com", help = "Sample email address")]
    pub(crate) email: String,
    #[arg(long, default_value = "submitted", help = "Sample application status")]
    pub(crate) status: String,
}

#[derive(Args)]
pub(crate) struct SendArgs {
    #[arg(long, help = "Template identifier")]
    pub(crate) template: String,
    #[arg(
        long = "application-id",
        value_delimiter = ',',
        help = "Application identifiers to target"
    )]
    pub(crate) application_ids: Vec<String>,
    #[arg(long, help = "Free-text notes attached to the campaign")]
    pub(crate) notes: Option<String>,
    #[arg(long = "tag", help = "Tag attached to the campaign (repeatable)")]
    pub(crate) tags: Vec<String>,
    #[arg(long, help = "Confirm sending without prompting")]
    pub(crate) yes: bool,
}

#[derive(Args, Default)]
pub(crate) struct CampaignListArgs {
    #[arg(long, help = "Free-text search")]
    pub(crate) search: Option<String>,
    #[arg(long, value_parser = parse_campaign_status)]
    pub(crate) status: Option<CampaignStatus>,
    #[arg(long, help = "Filter by template identifier")]
    pub(crate) template: Option<String>,
    #[arg(long, default_value_t = 1)]
    pub(crate) page: u32,
}

#[derive(Args)]
pub(crate) struct CampaignStatusArgs {
    #[arg(help = "Campaign identifier")]
    pub(crate) id: String,
}

#[derive(Args)]
pub(crate) struct RecipientsArgs {
    #[arg(help = "Campaign identifier")]
    pub(crate) id: String,
    #[arg(long, value_parser = parse_recipient_status)]
    pub(crate) status: Option<RecipientStatus>,
    #[arg(long, help = "Write the breakdown to this file as CSV")]
    pub(crate) export: Option<PathBuf>,
}

#[derive(Args)]
pub(crate) struct RetryArgs {
    #[arg(help = "Campaign identifier")]
    pub(crate) id: String,
}

#[derive(Args)]
pub(crate) struct CancelArgs {
    #[arg(help = "Campaign identifier")]
    pub(crate) id: String,
    #[arg(long, help = "Confirm cancellation without prompting")]
    pub(crate) yes: bool,
}

#[derive(Copy, Clone, Debug, Default, ValueEnum)]
pub(crate) enum OutputFormat {
    #[default]
    Table,
    Json,
}

fn parse_campaign_status(input: &str) -> Result<CampaignStatus, String> {
    match input {
        "pending" => Ok(CampaignStatus::Pending),
        "sending" => Ok(CampaignStatus::Sending),
        "completed" => Ok(CampaignStatus::Completed),
        "failed" => Ok(CampaignStatus::Failed),
        "partial" => Ok(CampaignStatus::Partial),
        "cancelled" => Ok(CampaignStatus::Cancelled),
        other => Err(format!("unknown campaign status '{other}'")),
    }
}

fn parse_recipient_status(input: &str) -> Result<RecipientStatus, String> {
    match input {
        "pending" => Ok(RecipientStatus::Pending),
        "sent" => Ok(RecipientStatus::Sent),
        "failed" => Ok(RecipientStatus::Failed),
        other => Err(format!("unknown recipient status '{other}'")),
    }
}

const fn command_label(command: &Command) -> &'static str {
    match command {
        Command::Template(TemplateCommand::Ls(_)) => "template_ls",
        Command::Template(TemplateCommand::Preview(_)) => "template_preview",
        Command::Send(_) => "send",
        Command::Ls(_) => "ls",
        Command::Status(_) => "status",
        Command::Recipients(_) => "recipients",
        Command::Retry(_) => "retry",
        Command::Cancel(_) => "cancel",
        Command::Stats => "stats",
    }
}
