//! Daily news digest — binary entrypoint.
//! Loads config and credentials, runs the digest once, mails it, exits.

use std::path::PathBuf;
use std::process::ExitCode;

use anyhow::{Context, Result};
use chrono::NaiveDate;
use clap::Parser;
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

use news_digest::config::{Credentials, DigestConfig};
use news_digest::ingest::article::ArticleEnricher;
use news_digest::notify::{Deliver, EmailSender, StdoutSender};
use news_digest::pipeline::{build_digest, build_providers, http_client, send_digest};

#[derive(Debug, Parser)]
#[command(
    name = "news-digest",
    version,
    about = "Mail a ranked digest of today's headlines"
)]
struct Args {
    /// Config file (TOML or JSON). Falls back to $DIGEST_CONFIG_PATH, then config/digest.{toml,json}.
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Print the digest instead of mailing it. Credentials are not required.
    #[arg(long)]
    dry_run: bool,

    /// Report date (YYYY-MM-DD). Defaults to today, local time.
    #[arg(long)]
    date: Option<NaiveDate>,

    /// Emit logs as JSON lines.
    #[arg(long)]
    json_logs: bool,
}

fn init_tracing(json: bool) {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new("news_digest=info,warn"));

    if json {
        tracing_subscriber::registry()
            .with(filter)
            .with(fmt::layer().json().with_writer(std::io::stderr))
            .init();
    } else {
        tracing_subscriber::registry()
            .with(filter)
            .with(fmt::layer().compact().with_writer(std::io::stderr))
            .init();
    }
}

async fn run(args: Args) -> Result<()> {
    let cfg = DigestConfig::load(args.config.as_deref())?;
    tracing::debug!(target: "digest", ?cfg, "config loaded");

    // Credentials are checked before any network activity.
    let (sender, recipient): (Box<dyn Deliver>, String) = if args.dry_run {
        let recipient = cfg.recipient.clone().unwrap_or_else(|| "(dry run)".to_string());
        (Box::new(StdoutSender), recipient)
    } else {
        let creds = Credentials::from_env()?;
        let recipient = cfg.recipient.clone().unwrap_or_else(|| creds.user.clone());
        (Box::new(EmailSender::new(&cfg.smtp, &creds)?), recipient)
    };

    let client = http_client(&cfg)?;
    let providers = build_providers(&cfg, &client);
    let enricher = cfg
        .extended_summaries
        .then(|| ArticleEnricher::new(client.clone()));

    let date = args
        .date
        .unwrap_or_else(|| chrono::Local::now().date_naive());

    let digest = build_digest(&cfg, &providers, enricher.as_ref(), date).await;
    send_digest(&digest, sender.as_ref(), &recipient)
        .await
        .context("delivering digest")?;

    if args.dry_run {
        println!("✅ Dry run complete ({} stories).", digest.stories.len());
    } else {
        println!("✅ Email sent successfully!");
    }
    Ok(())
}

#[tokio::main]
async fn main() -> ExitCode {
    // Load .env in local/dev; no-op when absent.
    let _ = dotenvy::dotenv();

    let args = Args::parse();
    init_tracing(args.json_logs);

    println!("📡 Daily News Bot starting…");
    match run(args).await {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            tracing::error!(target: "digest", error = %format!("{e:#}"), "digest run failed");
            eprintln!("❌ {e:#}");
            ExitCode::FAILURE
        }
    }
}
