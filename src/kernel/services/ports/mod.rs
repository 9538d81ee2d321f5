//! Service ports: traits + data contracts.

pub mod config;
pub mod encoding;
pub mod file;
pub mod search;
pub mod settings;

pub use config::SearchLimits;
pub use encoding::{Encoding, FileInfo, IndentStyle, LineEnding};
pub use file::{DirEntry, FileError, FileProvider, Result as FileResult};
pub use search::{GlobalSearchMessage, Match, SearchError, SearchQuery, SearchResult};
pub use settings::Settings;
