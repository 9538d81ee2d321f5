//! Headless search core: fuzzy filter, document search/replace, file
//! introspection and project-wide search.

pub mod fuzzy;
pub mod search;
pub mod services;

pub use search::{PendingSearch, SearchSession};
pub use services::adapters::encoding::{detect, detect_bytes};
pub use services::adapters::search::SearchService;
pub use services::ports::{
    Encoding, FileInfo, FileProvider, IndentStyle, LineEnding, Match, SearchLimits, SearchQuery,
    SearchResult,
};
