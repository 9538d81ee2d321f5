//! 全局搜索服务
//!
//! - 枚举：经由 `FileProvider` 递归列目录，限制深度，跳过隐藏项和依赖缓存目录
//! - 搜索：逐文件逐行，大小写不敏感，每行只记录第一个匹配，受结果上限约束
//! - 异步：防抖延迟后在 blocking 线程执行，支持取消

use super::searcher::{char_column, SearchConfig};
use crate::kernel::services::adapters::encoding::{decode_text, detect_encoding};
use crate::kernel::services::ports::config::SearchLimits;
use crate::kernel::services::ports::encoding::Encoding;
use crate::kernel::services::ports::file::FileProvider;
use crate::kernel::services::ports::search::{GlobalSearchMessage, Match, SearchResult};
use std::path::{Path, PathBuf};
use std::sync::atomic::{AtomicBool, AtomicU64, Ordering};
use std::sync::mpsc::SyncSender;
use std::sync::{Arc, Mutex};

static GLOBAL_SEARCH_ID: AtomicU64 = AtomicU64::new(0);

pub(crate) fn next_global_search_id() -> u64 {
    GLOBAL_SEARCH_ID.fetch_add(1, Ordering::Relaxed)
}

pub struct GlobalSearchTask {
    id: u64,
    cancelled: Arc<AtomicBool>,
}

impl GlobalSearchTask {
    pub fn new() -> Self {
        Self {
            id: next_global_search_id(),
            cancelled: Arc::new(AtomicBool::new(false)),
        }
    }

    pub fn id(&self) -> u64 {
        self.id
    }

    pub fn cancel(&self) {
        self.cancelled.store(true, Ordering::Relaxed);
    }

    pub fn is_cancelled(&self) -> bool {
        self.cancelled.load(Ordering::Relaxed)
    }

    fn cancelled_flag(&self) -> Arc<AtomicBool> {
        self.cancelled.clone()
    }
}

impl Default for GlobalSearchTask {
    fn default() -> Self {
        Self::new()
    }
}

/// Candidate files under `root`, in listing order.
pub fn enumerate(provider: &dyn FileProvider, root: &Path, limits: &SearchLimits) -> Vec<PathBuf> {
    let mut files = Vec::new();
    walk_dir(provider, root, 0, limits, &mut files);
    files
}

fn walk_dir(
    provider: &dyn FileProvider,
    dir: &Path,
    depth: usize,
    limits: &SearchLimits,
    out: &mut Vec<PathBuf>,
) {
    let entries = match provider.read_dir(dir) {
        Ok(entries) => entries,
        Err(e) => {
            tracing::debug!(dir = %dir.display(), error = %e, "skip unreadable directory");
            return;
        }
    };

    for entry in entries {
        if entry.name.starts_with('.') || limits.is_ignored_dir(&entry.name) {
            continue;
        }
        if entry.is_dir {
            if depth < limits.max_depth {
                walk_dir(provider, &entry.path, depth + 1, limits, out);
            }
            continue;
        }
        if is_candidate(&entry.name, limits) {
            out.push(entry.path);
        }
    }
}

/// Known text extension, or any name with a dot in it. Files that turn out
/// not to be text are dropped when the read fails.
pub fn is_candidate(name: &str, limits: &SearchLimits) -> bool {
    let known = Path::new(name)
        .extension()
        .and_then(|ext| ext.to_str())
        .is_some_and(|ext| limits.is_text_extension(ext));
    known || name.contains('.')
}

/// Scan `candidates` for `query` (case-insensitive substring).
///
/// Files are decoded the same way the encoding detector reads them; only
/// read failures and binary buffers are skipped.
///
/// Only the first occurrence on each line is reported. Scanning stops once
/// a file contributes `max_results_per_file` results or the total reaches
/// `max_results`.
pub fn search_files(
    provider: &dyn FileProvider,
    root: &Path,
    query: &str,
    candidates: &[PathBuf],
    limits: &SearchLimits,
) -> Vec<SearchResult> {
    search_files_until(provider, root, query, candidates, limits, &AtomicBool::new(false))
}

fn search_files_until(
    provider: &dyn FileProvider,
    root: &Path,
    query: &str,
    candidates: &[PathBuf],
    limits: &SearchLimits,
    cancelled: &AtomicBool,
) -> Vec<SearchResult> {
    if !limits.query_long_enough(query) {
        return Vec::new();
    }

    let config = SearchConfig::literal(query, false);
    let mut results = Vec::new();
    let mut scratch = Vec::new();

    for path in candidates {
        if results.len() >= limits.max_results || cancelled.load(Ordering::Relaxed) {
            break;
        }

        let bytes = match provider.read_file_bytes(path) {
            Ok(bytes) => bytes,
            Err(e) => {
                tracing::trace!(path = %path.display(), error = %e, "skip unreadable file");
                continue;
            }
        };
        let encoding = detect_encoding(&bytes);
        if encoding == Encoding::Binary {
            tracing::trace!(path = %path.display(), "skip binary file");
            continue;
        }
        let content = decode_text(&bytes, encoding);

        let relative_path = relative_display(root, path);
        let mut per_file = 0usize;
        for (line_idx, raw_line) in content.split('\n').enumerate() {
            if per_file >= limits.max_results_per_file || results.len() >= limits.max_results {
                break;
            }
            let line = raw_line.strip_suffix('\r').unwrap_or(raw_line);
            let Some(range) = config.find_first(line, &mut scratch) else {
                continue;
            };

            results.push(SearchResult {
                file_path: path.clone(),
                relative_path: relative_path.clone(),
                matched: Match::new(
                    line_idx + 1,
                    char_column(line, range.start),
                    &line[range],
                    line,
                ),
            });
            per_file += 1;
        }
    }

    results
}

fn relative_display(root: &Path, path: &Path) -> String {
    let rel = path.strip_prefix(root).unwrap_or(path);
    rel.components()
        .map(|c| c.as_os_str().to_string_lossy())
        .collect::<Vec<_>>()
        .join("/")
}

pub struct GlobalSearchService {
    runtime: tokio::runtime::Handle,
    active: Mutex<Option<Arc<AtomicBool>>>,
}

impl GlobalSearchService {
    pub fn new(runtime: tokio::runtime::Handle) -> Self {
        Self {
            runtime,
            active: Mutex::new(None),
        }
    }

    /// Cancel the most recently armed search, if any.
    pub fn cancel_active(&self) -> bool {
        let Ok(mut active) = self.active.lock() else {
            return false;
        };
        match active.take() {
            Some(flag) => {
                flag.store(true, Ordering::Relaxed);
                true
            }
            None => false,
        }
    }

    fn replace_active(&self, flag: Arc<AtomicBool>) {
        match self.active.lock() {
            Ok(mut active) => {
                if let Some(previous) = active.replace(flag) {
                    previous.store(true, Ordering::Relaxed);
                }
            }
            Err(e) => tracing::warn!(error = %e, "global search state poisoned"),
        }
    }

    /// Wait out the debounce interval, then scan on a blocking worker.
    ///
    /// Arming a new search cancels the previous one, so only the latest
    /// query can publish `Results`. Cancelling the returned task before the
    /// delay elapses suppresses the scan; cancelling during the scan stops it
    /// between files.
    pub fn search_debounced(
        &self,
        provider: Arc<dyn FileProvider>,
        root: PathBuf,
        query: String,
        candidates: Arc<Vec<PathBuf>>,
        limits: SearchLimits,
        tx: SyncSender<GlobalSearchMessage>,
    ) -> GlobalSearchTask {
        let task = GlobalSearchTask::new();
        let search_id = task.id();
        let cancelled = task.cancelled_flag();
        self.replace_active(cancelled.clone());

        self.runtime.spawn(async move {
            tokio::time::sleep(limits.debounce()).await;
            if cancelled.load(Ordering::Relaxed) {
                let _ = tx.send(GlobalSearchMessage::Cancelled { search_id });
                return;
            }

            let cancelled_for_blocking = cancelled.clone();
            let result = tokio::task::spawn_blocking(move || {
                search_files_until(
                    provider.as_ref(),
                    &root,
                    &query,
                    &candidates,
                    &limits,
                    &cancelled_for_blocking,
                )
            })
            .await;

            let message = match result {
                _ if cancelled.load(Ordering::Relaxed) => {
                    GlobalSearchMessage::Cancelled { search_id }
                }
                Ok(results) => GlobalSearchMessage::Results { search_id, results },
                Err(e) => GlobalSearchMessage::Error {
                    search_id,
                    message: format!("Global search task failed: {}", e),
                },
            };
            let _ = tx.send(message);
        });

        task
    }
}

#[cfg(test)]
#[path = "../../../../../tests/unit/kernel/services/adapters/search/global.rs"]
mod tests;
