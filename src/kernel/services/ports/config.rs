use serde::{Deserialize, Serialize};
use std::time::Duration;

const DEFAULT_TEXT_EXTENSIONS: &[&str] = &[
    "txt", "md", "markdown", "rst", "rs", "toml", "lock", "json", "jsonc", "yaml", "yml", "xml",
    "html", "htm", "css", "scss", "sass", "less", "js", "jsx", "mjs", "cjs", "ts", "tsx", "vue",
    "svelte", "py", "pyi", "rb", "go", "java", "kt", "kts", "scala", "c", "h", "cc", "cpp", "cxx",
    "hpp", "hh", "cs", "swift", "m", "mm", "php", "pl", "lua", "sh", "bash", "zsh", "fish", "ps1",
    "bat", "sql", "graphql", "proto", "ini", "cfg", "conf", "env", "csv", "tsv", "log", "tex",
    "dockerfile", "makefile", "cmake", "gradle", "zig", "nim", "ex", "exs", "erl", "hs", "ml",
    "clj", "dart", "r", "jl", "vim", "el",
];

fn default_max_depth() -> usize {
    10
}

fn default_max_results() -> usize {
    100
}

fn default_max_results_per_file() -> usize {
    10
}

fn default_min_query_len() -> usize {
    2
}

fn default_debounce_ms() -> u64 {
    300
}

fn default_ignored_dirs() -> Vec<String> {
    vec!["node_modules".to_string()]
}

fn default_text_extensions() -> Vec<String> {
    DEFAULT_TEXT_EXTENSIONS
        .iter()
        .map(|ext| ext.to_string())
        .collect()
}

/// Bounds for project enumeration and multi-file search.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct SearchLimits {
    #[serde(default = "default_max_depth", alias = "maxDepth")]
    pub max_depth: usize,
    #[serde(default = "default_max_results", alias = "maxResults")]
    pub max_results: usize,
    #[serde(
        default = "default_max_results_per_file",
        alias = "maxResultsPerFile"
    )]
    pub max_results_per_file: usize,
    #[serde(default = "default_min_query_len", alias = "minQueryLen")]
    pub min_query_len: usize,
    #[serde(default = "default_debounce_ms", alias = "debounceMs")]
    pub debounce_ms: u64,
    #[serde(default = "default_ignored_dirs", alias = "ignoredDirs")]
    pub ignored_dirs: Vec<String>,
    #[serde(default = "default_text_extensions", alias = "textExtensions")]
    pub text_extensions: Vec<String>,
}

impl Default for SearchLimits {
    fn default() -> Self {
        Self {
            max_depth: default_max_depth(),
            max_results: default_max_results(),
            max_results_per_file: default_max_results_per_file(),
            min_query_len: default_min_query_len(),
            debounce_ms: default_debounce_ms(),
            ignored_dirs: default_ignored_dirs(),
            text_extensions: default_text_extensions(),
        }
    }
}

impl SearchLimits {
    pub fn debounce(&self) -> Duration {
        Duration::from_millis(self.debounce_ms)
    }

    pub fn is_ignored_dir(&self, name: &str) -> bool {
        self.ignored_dirs.iter().any(|dir| dir == name)
    }

    pub fn is_text_extension(&self, ext: &str) -> bool {
        self.text_extensions
            .iter()
            .any(|known| known.eq_ignore_ascii_case(ext))
    }

    /// Queries shorter than this are a no-op, measured in chars.
    pub fn query_long_enough(&self, query: &str) -> bool {
        query.chars().count() >= self.min_query_len
    }
}

#[cfg(test)]
#[path = "../../../../tests/unit/kernel/services/ports/config.rs"]
mod tests;
