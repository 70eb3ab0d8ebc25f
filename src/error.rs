// src/error.rs

use thiserror::Error;

/// Failures the engine surfaces to its caller. Parsing-level problems never
/// show up here: malformed numeric cells degrade to zero and a missing data
/// table yields an empty dataset, both logged rather than propagated.
#[derive(Debug, Error)]
pub enum ScrapeError {
    /// The report page could not be fetched, or came back with a
    /// non-success status.
    #[error("source unavailable: {url}")]
    SourceUnavailable {
        url: String,
        #[source]
        source: reqwest::Error,
    },

    /// The caller asked for a report family with no registered adapter.
    #[error("unknown report family {code:?}; valid codes: {}", .valid.join(", "))]
    UnknownFamily {
        code: String,
        valid: Vec<&'static str>,
    },
}
