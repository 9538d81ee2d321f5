use serde::Serialize;
use std::io;
use std::path::PathBuf;

pub type Result<T> = std::result::Result<T, SearchError>;

#[derive(Debug)]
pub enum SearchError {
    Io(io::Error),
    InvalidRegex(regex::Error),
}

impl std::fmt::Display for SearchError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            SearchError::Io(e) => write!(f, "IO error: {}", e),
            SearchError::InvalidRegex(e) => write!(f, "Invalid regex: {}", e),
        }
    }
}

impl std::error::Error for SearchError {}

impl From<io::Error> for SearchError {
    fn from(e: io::Error) -> Self {
        SearchError::Io(e)
    }
}

impl From<regex::Error> for SearchError {
    fn from(e: regex::Error) -> Self {
        SearchError::InvalidRegex(e)
    }
}

/// A single occurrence inside a line of text.
///
/// `line` and `column` are 1-based; `column` counts chars, not bytes.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Match {
    pub line: usize,
    pub column: usize,
    pub matched_text: String,
    pub context_line: String,
}

impl Match {
    pub fn new(
        line: usize,
        column: usize,
        matched_text: impl Into<String>,
        context_line: impl Into<String>,
    ) -> Self {
        Self {
            line,
            column,
            matched_text: matched_text.into(),
            context_line: context_line.into(),
        }
    }
}

/// A match found while scanning the project tree.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SearchResult {
    pub file_path: PathBuf,
    pub relative_path: String,
    #[serde(flatten)]
    pub matched: Match,
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SearchQuery {
    pub term: String,
    pub case_sensitive: bool,
    pub use_regex: bool,
}

impl SearchQuery {
    pub fn new(term: impl Into<String>) -> Self {
        Self {
            term: term.into(),
            case_sensitive: false,
            use_regex: false,
        }
    }

    pub fn case_sensitive(mut self, yes: bool) -> Self {
        self.case_sensitive = yes;
        self
    }

    pub fn regex(mut self, yes: bool) -> Self {
        self.use_regex = yes;
        self
    }
}

#[derive(Debug, Clone)]
pub enum GlobalSearchMessage {
    Results {
        search_id: u64,
        results: Vec<SearchResult>,
    },
    Cancelled {
        search_id: u64,
    },
    Error {
        search_id: u64,
        message: String,
    },
}

impl GlobalSearchMessage {
    pub fn search_id(&self) -> u64 {
        match self {
            Self::Results { search_id, .. }
            | Self::Cancelled { search_id }
            | Self::Error { search_id, .. } => *search_id,
        }
    }
}
