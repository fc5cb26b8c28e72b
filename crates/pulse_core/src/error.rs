use thiserror::Error;

/// Ways generated prose can fail to yield a structured article.
#[derive(Error, Debug, PartialEq, Eq)]
pub enum ParseError {
    #[error("generated text has no title line")]
    MissingTitle,

    #[error("generated text has no body block")]
    MissingBody,
}

#[derive(Error, Debug)]
pub enum Error {
    #[error("fetch error: {0}")]
    Fetch(String),

    #[error("generation error: {0}")]
    Generation(String),

    #[error("parse error: {0}")]
    Parse(#[from] ParseError),

    #[error("publisher rate limit hit")]
    RateLimited,

    #[error("publisher error: {0}")]
    Publisher(String),

    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("job {id} failed: {source}")]
    Job {
        id: String,
        #[source]
        source: Box<Error>,
    },

    #[error("external error: {0}")]
    External(#[from] anyhow::Error),
}

impl Error {
    /// Wrap a handler failure with the job that raised it.
    pub fn in_job(self, id: &str) -> Self {
        Error::Job {
            id: id.to_string(),
            source: Box::new(self),
        }
    }
}

pub type Result<T> = std::result::Result<T, Error>;
