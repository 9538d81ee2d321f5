//! Project-wide search session: candidate cache, debounced query, results.
//!
//! The host's tick loop calls [`SearchSession::poll`]; there are no timers
//! of its own. Arming a new query replaces the pending search, so only
//! the most recent query can ever publish results.

use crate::kernel::services::adapters::search::global::next_global_search_id;
use crate::kernel::services::adapters::search::{enumerate, search_files};
use crate::kernel::services::ports::{FileProvider, SearchLimits, SearchResult};
use std::path::{Path, PathBuf};
use std::sync::Arc;
use std::time::Instant;

pub struct PendingSearch {
    id: u64,
    query: String,
    deadline: Instant,
}

impl PendingSearch {
    pub fn id(&self) -> u64 {
        self.id
    }

    pub fn query(&self) -> &str {
        &self.query
    }

    pub fn deadline(&self) -> Instant {
        self.deadline
    }
}

pub struct SearchSession {
    provider: Arc<dyn FileProvider>,
    root: PathBuf,
    limits: SearchLimits,
    candidates: Vec<PathBuf>,
    query: String,
    pending: Option<PendingSearch>,
    active_search_id: Option<u64>,
    results: Vec<SearchResult>,
    selected_index: usize,
}

impl SearchSession {
    pub fn new(provider: Arc<dyn FileProvider>, root: PathBuf, limits: SearchLimits) -> Self {
        Self {
            provider,
            root,
            limits,
            candidates: Vec::new(),
            query: String::new(),
            pending: None,
            active_search_id: None,
            results: Vec::new(),
            selected_index: 0,
        }
    }

    /// New session with the candidate cache already filled.
    pub fn open(provider: Arc<dyn FileProvider>, root: PathBuf, limits: SearchLimits) -> Self {
        let mut session = Self::new(provider, root, limits);
        session.refresh();
        session
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    pub fn limits(&self) -> &SearchLimits {
        &self.limits
    }

    pub fn query(&self) -> &str {
        &self.query
    }

    pub fn candidates(&self) -> &[PathBuf] {
        &self.candidates
    }

    pub fn results(&self) -> &[SearchResult] {
        &self.results
    }

    pub fn active_search_id(&self) -> Option<u64> {
        self.active_search_id
    }

    pub fn pending(&self) -> Option<&PendingSearch> {
        self.pending.as_ref()
    }

    pub fn is_pending(&self) -> bool {
        self.pending.is_some()
    }

    pub fn selected_index(&self) -> usize {
        self.selected_index
    }

    pub fn selected(&self) -> Option<&SearchResult> {
        self.results.get(self.selected_index)
    }

    /// Re-enumerate the project tree and replace the candidate cache.
    pub fn refresh(&mut self) -> usize {
        let started = Instant::now();
        self.candidates = enumerate(self.provider.as_ref(), &self.root, &self.limits);
        tracing::info!(
            root = %self.root.display(),
            files = self.candidates.len(),
            elapsed_ms = started.elapsed().as_millis() as u64,
            "search candidates refreshed"
        );
        self.candidates.len()
    }

    /// Record a new query typed at `now`.
    ///
    /// Short queries clear the results right away and arm nothing. Returns
    /// the id of the armed search, if any.
    pub fn set_query(&mut self, query: &str, now: Instant) -> Option<u64> {
        self.query = query.to_string();
        self.cancel_pending();

        if !self.limits.query_long_enough(query) {
            self.clear_results();
            return None;
        }

        let pending = PendingSearch {
            id: next_global_search_id(),
            query: query.to_string(),
            deadline: now + self.limits.debounce(),
        };
        let id = pending.id();
        self.pending = Some(pending);
        Some(id)
    }

    pub fn cancel_pending(&mut self) -> bool {
        self.pending.take().is_some()
    }

    /// Fire the pending search once its deadline has passed. Returns whether
    /// the results changed.
    pub fn poll(&mut self, now: Instant) -> bool {
        let Some(deadline) = self.pending.as_ref().map(|p| p.deadline) else {
            return false;
        };
        if now < deadline {
            return false;
        }
        let Some(pending) = self.pending.take() else {
            return false;
        };

        let overshoot = now.duration_since(deadline);
        if overshoot.as_millis() > 50 {
            tracing::debug!(
                overshoot_ms = overshoot.as_millis() as u64,
                "search debounce overshoot"
            );
        }

        let results = search_files(
            self.provider.as_ref(),
            &self.root,
            &pending.query,
            &self.candidates,
            &self.limits,
        );
        tracing::debug!(
            search_id = pending.id(),
            results = results.len(),
            "search finished"
        );

        self.active_search_id = Some(pending.id());
        self.results = results;
        self.selected_index = 0;
        true
    }

    /// Run whatever is pending immediately, ignoring the deadline.
    pub fn flush(&mut self) -> bool {
        match self.pending.as_ref().map(|p| p.deadline) {
            Some(deadline) => self.poll(deadline),
            None => false,
        }
    }

    pub fn move_selection(&mut self, delta: isize) -> bool {
        if self.results.is_empty() || delta == 0 {
            return false;
        }
        let len = self.results.len() as isize;
        let next = (self.selected_index as isize + delta).rem_euclid(len) as usize;
        if next == self.selected_index {
            return false;
        }
        self.selected_index = next;
        true
    }

    fn clear_results(&mut self) {
        self.results.clear();
        self.active_search_id = None;
        self.selected_index = 0;
    }
}

#[cfg(test)]
#[path = "../../tests/unit/kernel/search.rs"]
mod tests;
