use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Error)]
pub enum MapError {
    #[error("fetch error: {0}")]
    Fetch(String),
    #[error("HTTP {0}")]
    Status(u16),
    #[error("parse error: {0}")]
    Parse(String),
    #[error("failed to load the maps library: {0}")]
    Import(String),
    #[error("map container #{0} not found")]
    Container(String),
    #[error("no city named \"{0}\"")]
    SearchMiss(String),
}

impl MapError {
    /// Fatal errors abort map initialization.
    pub fn is_fatal(&self) -> bool {
        !matches!(self, Self::SearchMiss(_))
    }
}

/// Where the controller reports problems it does not return to a caller.
pub trait DiagnosticSink {
    fn report(&self, error: &MapError);
}

/// Browser console sink.
pub struct ConsoleSink;

impl DiagnosticSink for ConsoleSink {
    fn report(&self, error: &MapError) {
        if error.is_fatal() {
            web_sys::console::error_1(&format!("Error initializing map: {error}").into());
        } else {
            web_sys::console::warn_1(&format!("Search: {error}").into());
        }
    }
}
