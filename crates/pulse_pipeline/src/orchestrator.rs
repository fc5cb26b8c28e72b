use std::sync::Arc;

use tracing::{info, warn};

use pulse_core::{
    market_now, parser, CalendarSource, IdProvider, NewsSource, PublishOutcome, Publisher, Result,
    SummaryKind, TextGenerator,
};
use pulse_storage::ArticleStore;

use crate::coordinator::PublishCoordinator;
use crate::prompts;

const NEWS_CATEGORY: &str = "business";
const DIGEST_HEADLINES: usize = 10;
const CALENDAR_CURRENCY: &str = "USD";

/// Wires the capabilities into the content-refresh, calendar-refresh and
/// publish-trigger workflows. Scheduled jobs and the request layer both call
/// these entry points; each external capability is invoked at most once per
/// invocation.
pub struct PipelineOrchestrator {
    news: Arc<dyn NewsSource>,
    calendar: Arc<dyn CalendarSource>,
    generator: Arc<dyn TextGenerator>,
    store: Arc<ArticleStore>,
    coordinator: PublishCoordinator,
    ids: Arc<dyn IdProvider>,
}

impl PipelineOrchestrator {
    pub fn new(
        news: Arc<dyn NewsSource>,
        calendar: Arc<dyn CalendarSource>,
        generator: Arc<dyn TextGenerator>,
        publisher: Arc<dyn Publisher>,
        store: Arc<ArticleStore>,
        ids: Arc<dyn IdProvider>,
    ) -> Self {
        let coordinator = PublishCoordinator::new(publisher, store.clone());
        Self {
            news,
            calendar,
            generator,
            store,
            coordinator,
            ids,
        }
    }

    /// One content-refresh cycle: fetch, generate, parse, admit. Any failure
    /// aborts this cycle only; existing history is never corrupted or
    /// shrunk by a failed refresh.
    pub async fn refresh_content(&self) -> Result<()> {
        let items = self.news.fetch(NEWS_CATEGORY).await?;
        info!("📰 Fetched {} news items", items.len());

        let prompt = prompts::article_prompt(&items);
        let raw = self
            .generator
            .generate(&prompt, &prompts::ARTICLE_OPTS)
            .await?;

        let article = match parser::parse(&raw, self.ids.next_id(), market_now()) {
            Ok(article) => article,
            Err(e) => {
                warn!("🗑️ Generated article failed to parse, keeping history: {}", e);
                return Err(e.into());
            }
        };

        info!("📚 Admitting article {} ({})", article.id, article.title);
        self.store.admit(article).await;
        Ok(())
    }

    /// Refresh the upcoming-events slot with this week's USD calendar rows.
    pub async fn refresh_calendar(&self) -> Result<()> {
        let events = self.calendar.fetch_this_week().await?;
        let total = events.len();
        let usd: Vec<_> = events
            .into_iter()
            .filter(|e| e.country == CALENDAR_CURRENCY)
            .collect();
        info!("🗓️ Keeping {} of {} calendar events", usd.len(), total);
        self.store.record_events(usd).await;
        Ok(())
    }

    /// Build a digest for the given cadence and attempt one publish. Fetch
    /// and generation failures never reach the publisher; nothing is posted
    /// and the last-publish slot is left alone.
    pub async fn trigger_publish(&self, kind: SummaryKind) -> PublishOutcome {
        info!("✍️ Triggering {} digest", kind);
        match self.build_digest(kind).await {
            Ok(text) => self.coordinator.publish(&text).await,
            Err(e) => {
                warn!("✍️ Could not build {} digest: {}", kind, e);
                PublishOutcome::Failed {
                    message: e.to_string(),
                }
            }
        }
    }

    async fn build_digest(&self, kind: SummaryKind) -> Result<String> {
        let items = self.news.fetch(NEWS_CATEGORY).await?;
        let headlines = items
            .iter()
            .take(DIGEST_HEADLINES)
            .map(|item| item.title.as_str())
            .collect::<Vec<_>>()
            .join("\n");
        let prompt = prompts::digest_prompt(kind, &headlines);
        self.generator.generate(&prompt, &prompts::DIGEST_OPTS).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use async_trait::async_trait;
    use pulse_core::{
        Error, GenerationOptions, LastPublishResult, NewsItem, SectionContent, SequentialIds,
    };
    use pulse_feeds::{StaticCalendar, StaticNews};
    use pulse_inference::DummyGenerator;
    use pulse_publish::{DummyPublisher, ScriptedOutcome};
    use std::sync::Mutex;

    struct FailingNews;

    #[async_trait]
    impl NewsSource for FailingNews {
        async fn fetch(&self, _category: &str) -> Result<Vec<NewsItem>> {
            Err(Error::Fetch("provider unreachable".to_string()))
        }
    }

    /// Returns unparseable prose and counts calls.
    struct JunkGenerator {
        calls: Mutex<u32>,
    }

    #[async_trait]
    impl TextGenerator for JunkGenerator {
        fn name(&self) -> &str {
            "Junk"
        }

        async fn generate(&self, _prompt: &str, _opts: &GenerationOptions) -> Result<String> {
            *self.calls.lock().unwrap() += 1;
            Ok("no markers in this text at all".to_string())
        }
    }

    /// Records the prompt it was handed.
    struct CapturingGenerator {
        prompts: Mutex<Vec<String>>,
    }

    #[async_trait]
    impl TextGenerator for CapturingGenerator {
        fn name(&self) -> &str {
            "Capturing"
        }

        async fn generate(&self, prompt: &str, _opts: &GenerationOptions) -> Result<String> {
            self.prompts.lock().unwrap().push(prompt.to_string());
            Ok("short digest".to_string())
        }
    }

    fn orchestrator_with(
        news: Arc<dyn NewsSource>,
        generator: Arc<dyn TextGenerator>,
        publisher: Arc<dyn Publisher>,
        store: Arc<ArticleStore>,
    ) -> PipelineOrchestrator {
        PipelineOrchestrator::new(
            news,
            Arc::new(StaticCalendar::sample()),
            generator,
            publisher,
            store,
            Arc::new(SequentialIds::default()),
        )
    }

    #[tokio::test]
    async fn refresh_content_admits_a_structured_article() {
        let store = Arc::new(ArticleStore::new());
        let orchestrator = orchestrator_with(
            Arc::new(StaticNews::sample()),
            Arc::new(DummyGenerator),
            Arc::new(DummyPublisher::new()),
            store.clone(),
        );

        orchestrator.refresh_content().await.unwrap();

        let snapshot = store.snapshot().await;
        assert_eq!(snapshot.len(), 1);
        assert_eq!(snapshot[0].id, "0");
        assert!(matches!(
            snapshot[0].section("Key Takeaways"),
            Some(SectionContent::List(_))
        ));
    }

    #[tokio::test]
    async fn parse_failure_leaves_history_unchanged() {
        let store = Arc::new(ArticleStore::new());
        let generator = Arc::new(JunkGenerator {
            calls: Mutex::new(0),
        });
        let orchestrator = orchestrator_with(
            Arc::new(StaticNews::sample()),
            generator.clone(),
            Arc::new(DummyPublisher::new()),
            store.clone(),
        );

        // Seed one good article, then fail a refresh.
        let seeded = orchestrator_with(
            Arc::new(StaticNews::sample()),
            Arc::new(DummyGenerator),
            Arc::new(DummyPublisher::new()),
            store.clone(),
        );
        seeded.refresh_content().await.unwrap();
        let before: Vec<String> = store.snapshot().await.iter().map(|a| a.id.clone()).collect();

        let err = orchestrator.refresh_content().await.unwrap_err();
        assert!(matches!(err, Error::Parse(_)));

        let after: Vec<String> = store.snapshot().await.iter().map(|a| a.id.clone()).collect();
        assert_eq!(before, after);
        assert_eq!(*generator.calls.lock().unwrap(), 1);
    }

    #[tokio::test]
    async fn fetch_failure_skips_generation_entirely() {
        let store = Arc::new(ArticleStore::new());
        let generator = Arc::new(JunkGenerator {
            calls: Mutex::new(0),
        });
        let orchestrator = orchestrator_with(
            Arc::new(FailingNews),
            generator.clone(),
            Arc::new(DummyPublisher::new()),
            store.clone(),
        );

        assert!(matches!(
            orchestrator.refresh_content().await,
            Err(Error::Fetch(_))
        ));
        assert_eq!(*generator.calls.lock().unwrap(), 0);
        assert!(store.snapshot().await.is_empty());
    }

    #[tokio::test]
    async fn trigger_publish_posts_once_and_records_success() {
        let store = Arc::new(ArticleStore::new());
        let publisher = Arc::new(DummyPublisher::new());
        let orchestrator = orchestrator_with(
            Arc::new(StaticNews::sample()),
            Arc::new(DummyGenerator),
            publisher.clone(),
            store.clone(),
        );

        let outcome = orchestrator.trigger_publish(SummaryKind::Daily).await;
        assert!(matches!(outcome, PublishOutcome::Success { .. }));
        assert_eq!(publisher.attempts(), 1);
        assert!(matches!(
            store.last_publish().await,
            Some(LastPublishResult::Success { .. })
        ));
    }

    #[tokio::test]
    async fn rate_limited_publish_surfaces_and_records_failure() {
        let store = Arc::new(ArticleStore::new());
        let publisher = Arc::new(DummyPublisher::scripted([ScriptedOutcome::RateLimit]));
        let orchestrator = orchestrator_with(
            Arc::new(StaticNews::sample()),
            Arc::new(DummyGenerator),
            publisher.clone(),
            store.clone(),
        );

        let outcome = orchestrator.trigger_publish(SummaryKind::Weekly).await;
        assert!(matches!(outcome, PublishOutcome::RateLimited));
        assert!(matches!(
            store.last_publish().await,
            Some(LastPublishResult::Failure { .. })
        ));
    }

    #[tokio::test]
    async fn digest_fetch_failure_never_reaches_the_publisher() {
        let store = Arc::new(ArticleStore::new());
        let publisher = Arc::new(DummyPublisher::new());
        let orchestrator = orchestrator_with(
            Arc::new(FailingNews),
            Arc::new(DummyGenerator),
            publisher.clone(),
            store.clone(),
        );

        let outcome = orchestrator.trigger_publish(SummaryKind::Daily).await;
        assert!(matches!(outcome, PublishOutcome::Failed { .. }));
        assert_eq!(publisher.attempts(), 0);
        assert!(store.last_publish().await.is_none());
    }

    #[tokio::test]
    async fn digest_prompt_carries_at_most_ten_headlines() {
        let items: Vec<NewsItem> = (0..15)
            .map(|i| NewsItem {
                title: format!("headline {}", i),
                description: String::new(),
            })
            .collect();
        let generator = Arc::new(CapturingGenerator {
            prompts: Mutex::new(Vec::new()),
        });
        let orchestrator = orchestrator_with(
            Arc::new(StaticNews::new(items)),
            generator.clone(),
            Arc::new(DummyPublisher::new()),
            Arc::new(ArticleStore::new()),
        );

        orchestrator.trigger_publish(SummaryKind::Monthly).await;

        let prompts = generator.prompts.lock().unwrap();
        let headline_lines = prompts[0]
            .lines()
            .filter(|line| line.starts_with("headline "))
            .count();
        assert_eq!(headline_lines, 10);
    }

    #[tokio::test]
    async fn refresh_calendar_keeps_only_usd_events() {
        let store = Arc::new(ArticleStore::new());
        let orchestrator = orchestrator_with(
            Arc::new(StaticNews::sample()),
            Arc::new(DummyGenerator),
            Arc::new(DummyPublisher::new()),
            store.clone(),
        );

        orchestrator.refresh_calendar().await.unwrap();

        let events = store.upcoming_events().await;
        assert!(!events.is_empty());
        assert!(events.iter().all(|e| e.country == "USD"));
    }
}
