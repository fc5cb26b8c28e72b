use std::sync::Arc;
use std::time::Duration;

use anyhow::anyhow;
use clap::Parser;
use tracing::info;

use pulse_core::{
    CalendarSource, Error, NewsSource, Publisher, Result, TextGenerator, UuidIds,
};
use pulse_feeds::{NewsDataClient, StaticCalendar, StaticNews, WeeklyCalendarClient};
use pulse_inference::{CohereClient, DummyGenerator};
use pulse_pipeline::{register_jobs, PipelineOrchestrator};
use pulse_publish::{DummyPublisher, XApiClient};
use pulse_scheduler::Scheduler;
use pulse_storage::ArticleStore;
use pulse_web::{create_app, AppState};

#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// Port for the HTTP API
    #[arg(long, default_value_t = 8000)]
    port: u16,
    /// News backend. Available: newsdata (default), dummy
    #[arg(long, default_value = "newsdata")]
    news: String,
    /// Generation backend. Available: cohere (default), dummy
    #[arg(long, default_value = "cohere")]
    generator: String,
    /// Publish backend. Available: x (default), dummy
    #[arg(long, default_value = "x")]
    publisher: String,
    /// Hours between content refreshes
    #[arg(long, default_value_t = 4)]
    refresh_hours: u64,
    /// Hours between calendar refreshes
    #[arg(long, default_value_t = 1)]
    calendar_hours: u64,
}

fn require_env(name: &str) -> Result<String> {
    std::env::var(name).map_err(|_| Error::External(anyhow!("{} is not set", name)))
}

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::fmt::init();
    let cli = Cli::parse();

    let news: Arc<dyn NewsSource> = match cli.news.as_str() {
        "newsdata" => Arc::new(NewsDataClient::new(require_env("NEWSDATA_API_KEY")?)?),
        "dummy" => Arc::new(StaticNews::sample()),
        other => return Err(Error::External(anyhow!("unknown news backend: {}", other))),
    };
    let calendar: Arc<dyn CalendarSource> = match cli.news.as_str() {
        "dummy" => Arc::new(StaticCalendar::sample()),
        _ => Arc::new(WeeklyCalendarClient::new()?),
    };
    info!("📰 News backends initialized (using {})", cli.news);

    let generator: Arc<dyn TextGenerator> = match cli.generator.as_str() {
        "cohere" => Arc::new(CohereClient::new(require_env("COHERE_API_KEY")?)?),
        "dummy" => Arc::new(DummyGenerator),
        other => {
            return Err(Error::External(anyhow!(
                "unknown generation backend: {}",
                other
            )))
        }
    };
    info!("🧠 Generation backend initialized (using {})", generator.name());

    let publisher: Arc<dyn Publisher> = match cli.publisher.as_str() {
        "x" => Arc::new(XApiClient::new(
            require_env("X_BEARER_TOKEN")?,
            require_env("X_USERNAME")?,
        )?),
        "dummy" => Arc::new(DummyPublisher::new()),
        other => {
            return Err(Error::External(anyhow!(
                "unknown publish backend: {}",
                other
            )))
        }
    };
    info!("📣 Publish backend initialized (using {})", publisher.name());

    let store = Arc::new(ArticleStore::new());
    let orchestrator = Arc::new(PipelineOrchestrator::new(
        news,
        calendar,
        generator,
        publisher,
        store.clone(),
        Arc::new(UuidIds),
    ));

    let mut scheduler = Scheduler::new();
    register_jobs(
        &mut scheduler,
        orchestrator.clone(),
        Duration::from_secs(cli.refresh_hours * 3600),
        Duration::from_secs(cli.calendar_hours * 3600),
    )?;
    info!(
        "⏰ Scheduler starting with jobs: {}",
        scheduler.job_ids().join(", ")
    );
    scheduler.start()?;

    let app = create_app(AppState {
        orchestrator,
        store,
    })
    .await;

    let addr = format!("0.0.0.0:{}", cli.port);
    let listener = tokio::net::TcpListener::bind(&addr)
        .await
        .map_err(|e| Error::External(anyhow!("failed to bind {}: {}", addr, e)))?;
    info!("🌐 Serving API on {}", addr);

    axum::serve(listener, app)
        .await
        .map_err(|e| Error::External(anyhow!("server error: {}", e)))?;

    Ok(())
}
