use chrono::{DateTime, FixedOffset, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Market time zone used for every timestamp in the system (UTC+05:00, no DST).
pub fn market_tz() -> FixedOffset {
    FixedOffset::east_opt(5 * 3600).expect("static offset is valid")
}

/// Current time in the market time zone.
pub fn market_now() -> DateTime<FixedOffset> {
    Utc::now().with_timezone(&market_tz())
}

/// A generated article after parsing: title plus ordered named sections.
///
/// Immutable once built; a refreshed article is a new instance with a new id.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StructuredArticle {
    pub id: String,
    pub title: String,
    pub sections: Vec<Section>,
    pub created_at: DateTime<FixedOffset>,
}

impl StructuredArticle {
    pub fn section(&self, name: &str) -> Option<&SectionContent> {
        self.sections
            .iter()
            .find(|s| s.name == name)
            .map(|s| &s.content)
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Section {
    pub name: String,
    pub content: SectionContent,
}

/// Section body: prose, or an ordered list for takeaway-style sections.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum SectionContent {
    Text(String),
    List(Vec<String>),
}

/// One headline as returned by the news provider.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NewsItem {
    pub title: String,
    #[serde(default)]
    pub description: String,
}

/// One row of the weekly economic calendar feed.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CalendarEvent {
    pub title: String,
    pub country: String,
    pub date: String,
    #[serde(default)]
    pub impact: Option<String>,
    #[serde(default)]
    pub forecast: Option<String>,
    #[serde(default)]
    pub previous: Option<String>,
}

/// Digest cadence, used both by the job table and the request layer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SummaryKind {
    Daily,
    Weekly,
    Monthly,
    Yearly,
}

impl SummaryKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            SummaryKind::Daily => "daily",
            SummaryKind::Weekly => "weekly",
            SummaryKind::Monthly => "monthly",
            SummaryKind::Yearly => "yearly",
        }
    }
}

impl fmt::Display for SummaryKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for SummaryKind {
    type Err = String;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s {
            "daily" => Ok(SummaryKind::Daily),
            "weekly" => Ok(SummaryKind::Weekly),
            "monthly" => Ok(SummaryKind::Monthly),
            "yearly" => Ok(SummaryKind::Yearly),
            other => Err(format!("unknown summary kind: {}", other)),
        }
    }
}

/// What the last publish attempt left behind. Single slot, last write wins.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "status", rename_all = "lowercase")]
pub enum LastPublishResult {
    Success {
        id: String,
        text: String,
        url: String,
        timestamp: DateTime<FixedOffset>,
    },
    Failure {
        reason: String,
        timestamp: DateTime<FixedOffset>,
    },
}

/// Classified result of one external post attempt.
#[derive(Debug, Clone, Serialize)]
#[serde(tag = "result", rename_all = "snake_case")]
pub enum PublishOutcome {
    Success {
        id: String,
        url: String,
        text: String,
        timestamp: DateTime<FixedOffset>,
    },
    RateLimited,
    Failed {
        message: String,
    },
}

/// What the platform hands back for an accepted post.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PostReceipt {
    pub id: String,
    pub url: String,
}

#[derive(Debug, Clone, Copy, Serialize)]
pub struct GenerationOptions {
    pub temperature: f32,
    pub max_tokens: u32,
}

impl Default for GenerationOptions {
    fn default() -> Self {
        Self {
            temperature: 0.7,
            max_tokens: 4000,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn summary_kind_round_trips() {
        for kind in [
            SummaryKind::Daily,
            SummaryKind::Weekly,
            SummaryKind::Monthly,
            SummaryKind::Yearly,
        ] {
            assert_eq!(kind.as_str().parse::<SummaryKind>().unwrap(), kind);
        }
        assert!("hourly".parse::<SummaryKind>().is_err());
    }

    #[test]
    fn market_tz_is_fixed_plus_five() {
        assert_eq!(market_tz().local_minus_utc(), 5 * 3600);
    }
}
