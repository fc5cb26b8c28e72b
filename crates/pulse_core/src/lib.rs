pub mod error;
pub mod generate;
pub mod ids;
pub mod parser;
pub mod publish;
pub mod sources;
pub mod types;

pub use error::{Error, ParseError};
pub type Result<T> = std::result::Result<T, Error>;

pub use generate::TextGenerator;
pub use ids::{IdProvider, SequentialIds, UuidIds};
pub use publish::Publisher;
pub use sources::{CalendarSource, NewsSource};
pub use types::{
    market_now, market_tz, CalendarEvent, GenerationOptions, LastPublishResult, NewsItem,
    PostReceipt, PublishOutcome, Section, SectionContent, StructuredArticle, SummaryKind,
};
