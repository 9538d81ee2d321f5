//! 配置服务：管理搜索配置
//!
//! 提供统一的配置管理，支持运行时修改

use crate::kernel::services::ports::config::SearchLimits;
use crate::kernel::services::ports::settings::Settings;

pub struct ConfigService {
    search: SearchLimits,
}

impl ConfigService {
    pub fn new() -> Self {
        Self {
            search: SearchLimits::default(),
        }
    }

    pub fn with_search_limits(search: SearchLimits) -> Self {
        Self { search }
    }

    pub fn from_settings(settings: Settings) -> Self {
        Self::with_search_limits(settings.search)
    }

    pub fn search(&self) -> &SearchLimits {
        &self.search
    }

    pub fn search_mut(&mut self) -> &mut SearchLimits {
        &mut self.search
    }

    pub fn set_max_results(&mut self, max: usize) {
        self.search.max_results = max;
    }

    pub fn set_max_results_per_file(&mut self, max: usize) {
        self.search.max_results_per_file = max;
    }

    pub fn set_max_depth(&mut self, depth: usize) {
        self.search.max_depth = depth;
    }

    pub fn set_debounce_ms(&mut self, ms: u64) {
        self.search.debounce_ms = ms;
    }
}

impl Default for ConfigService {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
#[path = "../../../../tests/unit/kernel/services/adapters/config.rs"]
mod tests;
