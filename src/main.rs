// file: src/main.rs
// description: commandline application entry point with command handling
// reference: application bootstrap and orchestration

use anyhow::{Context, Result};
use clap::{ArgAction, Parser, Subcommand};
use paper_digest::utils::{ServiceCheck, format_report};
use paper_digest::{
    ArxivClient, Config, DigestOrchestrator, DigestPipeline, HfSummarizer, PaperSource,
    SendWindow, Subscriber, SummaryStage, TextSummarizer, TopicSelector, mail, render, store,
};
use std::path::PathBuf;
use std::time::Instant;
use tracing::{info, warn};

#[derive(Parser)]
#[command(name = "paper_digest")]
#[command(version = "0.1.0")]
#[command(about = "Daily arXiv research-digest mailer", long_about = None)]
struct Cli {
    #[arg(
        short,
        long,
        value_name = "FILE",
        default_value = "config/default.toml"
    )]
    config: PathBuf,

    #[arg(long, default_value_t = true, action = ArgAction::Set)]
    color: bool,

    #[arg(short, long, action = ArgAction::SetTrue)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Run the daily digest job for every subscriber
    Run {
        /// Send even outside the configured daily window
        #[arg(long)]
        force: bool,

        /// Build digests but skip the actual sends
        #[arg(long)]
        dry_run: bool,
    },

    /// Build and print the digest for a single topic without sending
    Preview {
        /// Topic to search for
        topic: String,

        #[arg(short, long, value_name = "NUM")]
        top: Option<usize>,

        #[arg(short, long, value_name = "FILE")]
        output: Option<PathBuf>,
    },

    /// Manage the subscriber store
    Subscribers {
        #[command(subcommand)]
        action: SubscriberAction,
    },

    /// Check connectivity to the external services
    Verify,
}

#[derive(Subcommand)]
enum SubscriberAction {
    List,

    Upsert {
        email: String,

        #[arg(long = "topic", value_name = "TOPIC", required = true)]
        topics: Vec<String>,

        /// Send a confirmation email with a fresh digest
        #[arg(long)]
        confirm: bool,
    },

    Remove {
        email: String,
    },
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    paper_digest::utils::logging::init_logger(cli.color, cli.verbose);

    info!("Paper Digest");
    info!("Loading configuration from: {}", cli.config.display());

    let config = if cli.config.exists() {
        Config::load(Some(cli.config.as_path())).context("Failed to load configuration")?
    } else {
        warn!(
            "Config file {} not found, using default configuration",
            cli.config.display()
        );
        Config::load(None).unwrap_or_else(|e| {
            warn!("Falling back to built-in defaults: {}", e);
            Config::default_config()
        })
    };

    match cli.command {
        Commands::Run { force, dry_run } => {
            cmd_run(&config, force, dry_run).await?;
        }
        Commands::Preview { topic, top, output } => {
            cmd_preview(&config, &topic, top, output).await?;
        }
        Commands::Subscribers { action } => match action {
            SubscriberAction::List => cmd_subscribers_list(&config).await?,
            SubscriberAction::Upsert {
                email,
                topics,
                confirm,
            } => cmd_subscribers_upsert(&config, &email, topics, confirm).await?,
            SubscriberAction::Remove { email } => cmd_subscribers_remove(&config, &email).await?,
        },
        Commands::Verify => {
            cmd_verify(&config).await?;
        }
    }

    Ok(())
}

fn build_pipeline(config: &Config) -> Result<DigestPipeline<ArxivClient, HfSummarizer>> {
    let source = ArxivClient::new(&config.search).context("Failed to create search client")?;
    let summarizer =
        HfSummarizer::new(&config.summarizer).context("Failed to create summarizer client")?;

    Ok(DigestPipeline::new(
        TopicSelector::new(source, config.digest.clone()),
        SummaryStage::new(
            summarizer,
            config.summarizer.fallback_chars,
            config.summarizer.delay_ms,
        ),
    ))
}

async fn cmd_run(config: &Config, force: bool, dry_run: bool) -> Result<()> {
    let window = SendWindow::new(&config.schedule);

    if !force && !window.permits_now() {
        info!(
            "Outside the send window ({}). Exiting; use --force to override",
            window.describe()
        );
        return Ok(());
    }

    let pipeline = build_pipeline(config)?;
    let store = store::from_config(&config.store).context("Failed to create subscriber store")?;
    let mailer = mail::from_config(&config.mail).context("Failed to create mail transport")?;

    let orchestrator = DigestOrchestrator::new(config.clone(), pipeline, store, mailer);
    let stats = orchestrator.run(dry_run).await.context("Digest run failed")?;

    if stats.emails_failed > 0 || stats.topics_failed > 0 {
        warn!(
            "Run finished with failures: {} topic(s), {} email(s)",
            stats.topics_failed, stats.emails_failed
        );
    }

    Ok(())
}

async fn cmd_preview(
    config: &Config,
    topic: &str,
    top: Option<usize>,
    output: Option<PathBuf>,
) -> Result<()> {
    let top_n = top.unwrap_or(config.digest.papers_per_topic);
    info!("Previewing top {} paper(s) for {:?}", top_n, topic);

    let pipeline = build_pipeline(config)?;
    let papers = pipeline
        .top_for_topic(topic, top_n)
        .await
        .context("Pipeline failed")?;

    if papers.is_empty() {
        println!("No recent papers found for {:?}", topic);
        return Ok(());
    }

    let html = render::render_digest(&[(topic.to_string(), papers)]);

    match output {
        Some(path) => {
            std::fs::write(&path, &html)
                .with_context(|| format!("Failed to write {}", path.display()))?;
            println!(
                "{}",
                paper_digest::utils::logging::format_success(&format!(
                    "Preview written to {}",
                    path.display()
                ))
            );
        }
        None => println!("{}", html),
    }

    Ok(())
}

async fn cmd_subscribers_list(config: &Config) -> Result<()> {
    let store = store::from_config(&config.store).context("Failed to create subscriber store")?;
    let subscribers = store.list().await.context("Failed to list subscribers")?;

    if subscribers.is_empty() {
        println!("No subscribers.");
        return Ok(());
    }

    println!("{} subscriber(s):\n", subscribers.len());
    for subscriber in subscribers {
        println!("  {} -> {}", subscriber.email, subscriber.topics.join(", "));
    }

    Ok(())
}

async fn cmd_subscribers_upsert(
    config: &Config,
    email: &str,
    topics: Vec<String>,
    confirm: bool,
) -> Result<()> {
    let subscriber = Subscriber::new(email, topics).context("Invalid subscription")?;

    let store = store::from_config(&config.store).context("Failed to create subscriber store")?;
    store
        .upsert(&subscriber)
        .await
        .context("Failed to save subscription")?;

    println!(
        "{}",
        paper_digest::utils::logging::format_success(&format!(
            "Subscribed {} to {}",
            subscriber.email,
            subscriber.topics.join(", ")
        ))
    );

    if confirm {
        info!("Building confirmation digest for {}", subscriber.email);

        let pipeline = build_pipeline(config)?;
        let mut topic_papers = Vec::new();
        for topic in &subscriber.topics {
            let papers = pipeline
                .top_for_topic(topic, config.digest.papers_per_topic)
                .await
                .context("Pipeline failed while building confirmation")?;
            topic_papers.push((topic.clone(), papers));
        }

        let html = render::render_confirmation(&topic_papers);
        let mailer = mail::from_config(&config.mail).context("Failed to create mail transport")?;
        mailer
            .send(
                &subscriber.email,
                "✅ Subscription Confirmed — Daily Research Digest",
                &html,
            )
            .await
            .context("Failed to send confirmation email")?;

        println!(
            "{}",
            paper_digest::utils::logging::format_success(&format!(
                "Confirmation sent to {}",
                subscriber.email
            ))
        );
    }

    Ok(())
}

async fn cmd_subscribers_remove(config: &Config, email: &str) -> Result<()> {
    let store = store::from_config(&config.store).context("Failed to create subscriber store")?;
    store
        .delete(email)
        .await
        .context("Failed to remove subscription")?;

    println!(
        "{}",
        paper_digest::utils::logging::format_success(&format!("{} unsubscribed", email))
    );

    Ok(())
}

async fn cmd_verify(config: &Config) -> Result<()> {
    info!("Checking external services");
    let mut checks = Vec::new();

    // search service: a minimal real query
    let start = Instant::now();
    match ArxivClient::new(&config.search) {
        Ok(client) => match client.fetch("electron", 7, 1).await {
            Ok(_) => checks.push(ServiceCheck::ok("search", start.elapsed())),
            Err(e) => checks.push(ServiceCheck::failed(
                "search",
                e.to_string(),
                start.elapsed(),
            )),
        },
        Err(e) => checks.push(ServiceCheck::failed(
            "search",
            e.to_string(),
            start.elapsed(),
        )),
    }

    // summarizer: degraded on failure, because the pipeline has a local
    // fallback and still produces digests
    let start = Instant::now();
    match HfSummarizer::new(&config.summarizer) {
        Ok(client) => match client
            .summarize("This sentence exists only to check that the summarization endpoint responds.")
            .await
        {
            Ok(_) => checks.push(ServiceCheck::ok("summarizer", start.elapsed())),
            Err(e) => checks.push(ServiceCheck::degraded(
                "summarizer",
                e.to_string(),
                start.elapsed(),
            )),
        },
        Err(e) => checks.push(ServiceCheck::degraded(
            "summarizer",
            e.to_string(),
            start.elapsed(),
        )),
    }

    // subscriber store
    let start = Instant::now();
    match store::from_config(&config.store) {
        Ok(store) => match store.list().await {
            Ok(subscribers) => {
                info!("Store reachable with {} subscriber(s)", subscribers.len());
                checks.push(ServiceCheck::ok("store", start.elapsed()));
            }
            Err(e) => checks.push(ServiceCheck::failed("store", e.to_string(), start.elapsed())),
        },
        Err(e) => checks.push(ServiceCheck::failed("store", e.to_string(), start.elapsed())),
    }

    println!("{}", format_report(&checks));

    if checks.iter().all(|c| c.is_healthy()) {
        println!(
            "{}",
            paper_digest::utils::logging::format_success("All services reachable")
        );
    } else {
        println!(
            "{}",
            paper_digest::utils::logging::format_warning("Some services need attention")
        );
    }

    Ok(())
}
