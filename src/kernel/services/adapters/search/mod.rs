//! 搜索服务模块
//!
//! - SearchConfig: 编译好的行搜索器 (Literal: memchr / Regex: 显式 find_at 循环)
//! - SearchService: 单文档查找与替换 (编辑器内搜索)
//! - global: 项目文件枚举 + 多文件搜索，GlobalSearchService 负责防抖与取消

pub mod global;
mod searcher;
mod service;

pub use global::{enumerate, is_candidate, search_files, GlobalSearchService, GlobalSearchTask};
pub use searcher::{char_column, regex_ranges, SearchConfig};
pub use service::SearchService;
