//! The fixed job table, registered once at process startup.

use std::sync::Arc;
use std::time::Duration;

use chrono::Weekday;

use pulse_core::{Error, PublishOutcome, Result, SummaryKind};
use pulse_scheduler::{CalendarTrigger, Job, Scheduler, Trigger};

use crate::orchestrator::PipelineOrchestrator;

pub const CONTENT_REFRESH_JOB: &str = "content_refresh";
pub const CALENDAR_REFRESH_JOB: &str = "calendar_refresh";

/// Register the refresh jobs and the four digest jobs. Every job coalesces
/// missed firings and runs at most one instance at a time.
pub fn register_jobs(
    scheduler: &mut Scheduler,
    orchestrator: Arc<PipelineOrchestrator>,
    refresh_every: Duration,
    calendar_every: Duration,
) -> Result<()> {
    let o = orchestrator.clone();
    scheduler.register(Job::new(
        CONTENT_REFRESH_JOB,
        Trigger::Every(refresh_every),
        move || {
            let o = o.clone();
            Box::pin(async move { o.refresh_content().await })
        },
    ))?;

    let o = orchestrator.clone();
    scheduler.register(Job::new(
        CALENDAR_REFRESH_JOB,
        Trigger::Every(calendar_every),
        move || {
            let o = o.clone();
            Box::pin(async move { o.refresh_calendar().await })
        },
    ))?;

    let digests = [
        (
            "daily_morning",
            SummaryKind::Daily,
            Trigger::Calendar(CalendarTrigger::daily_at(8, 0)),
        ),
        (
            "weekly",
            SummaryKind::Weekly,
            Trigger::Calendar(CalendarTrigger::weekly_on(Weekday::Mon, 10, 0)),
        ),
        (
            "monthly",
            SummaryKind::Monthly,
            Trigger::Calendar(CalendarTrigger::monthly_on(1, 11, 0)),
        ),
        (
            "yearly",
            SummaryKind::Yearly,
            Trigger::Calendar(CalendarTrigger::yearly_on(1, 1, 12, 0)),
        ),
    ];

    for (id, kind, trigger) in digests {
        let o = orchestrator.clone();
        scheduler.register(Job::with_kind(id, trigger, kind, move |kind| {
            let o = o.clone();
            Box::pin(async move {
                // Rate limits and successes are fully handled inside the
                // workflow; only a failed build/post surfaces at the job
                // boundary.
                match o.trigger_publish(kind).await {
                    PublishOutcome::Failed { message } => Err(Error::Publisher(message)),
                    _ => Ok(()),
                }
            })
        }))?;
    }

    Ok(())
}
