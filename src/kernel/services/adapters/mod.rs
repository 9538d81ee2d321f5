//! Service adapters: OS/runtime specific implementations (IO/async).

pub mod config;
pub mod dirs;
pub mod encoding;
pub mod file;
pub mod search;
pub mod settings;

pub use config::ConfigService;
pub use dirs::{ensure_log_dir, get_log_dir};
pub use file::LocalFileProvider;
pub use search::{
    enumerate, search_files, GlobalSearchService, GlobalSearchTask, SearchConfig, SearchService,
};
pub use settings::{ensure_settings_file, get_settings_path, load_settings, parse_settings};
