//! 单文件搜索服务
//!
//! 用于编辑器内搜索/替换：查找全部匹配、替换单个匹配、全部替换。
//! 所有入口都不返回错误：非法正则等同于没有匹配。

use super::searcher::{char_column, SearchConfig};
use crate::kernel::services::ports::search::{Match, SearchQuery};
use regex::NoExpand;

#[derive(Debug, Default, Clone, Copy)]
pub struct SearchService;

impl SearchService {
    pub fn new() -> Self {
        Self
    }

    /// Every occurrence of the query, top-to-bottom then left-to-right.
    pub fn find_all(document: &str, query: &SearchQuery) -> Vec<Match> {
        let Some(config) = compile(query) else {
            return Vec::new();
        };

        let mut matches = Vec::new();
        for (line_idx, line) in document.split('\n').enumerate() {
            for range in config.find_all(line) {
                matches.push(Match::new(
                    line_idx + 1,
                    char_column(line, range.start),
                    &line[range.clone()],
                    line,
                ));
            }
        }
        matches
    }

    /// Replace only `matches[index]`, identified by its ordinal among the
    /// matches on the same line.
    pub fn replace_one(
        document: &str,
        matches: &[Match],
        index: usize,
        query: &SearchQuery,
        replacement: &str,
    ) -> String {
        let Some(target) = matches.get(index) else {
            return document.to_string();
        };
        let Some(config) = compile(query) else {
            return document.to_string();
        };

        let ordinal = matches[..index]
            .iter()
            .filter(|m| m.line == target.line)
            .count();

        let mut out = String::with_capacity(document.len() + replacement.len());
        for (line_idx, line) in document.split('\n').enumerate() {
            if line_idx > 0 {
                out.push('\n');
            }
            if line_idx + 1 != target.line {
                out.push_str(line);
                continue;
            }

            match config.find_all(line).into_iter().nth(ordinal) {
                Some(range) => {
                    out.push_str(&line[..range.start]);
                    out.push_str(replacement);
                    out.push_str(&line[range.end..]);
                }
                None => {
                    tracing::debug!(
                        line = target.line,
                        ordinal,
                        "replace target no longer present on line"
                    );
                    out.push_str(line);
                }
            }
        }
        out
    }

    /// One global substitution pass over the whole document.
    pub fn replace_all(document: &str, query: &SearchQuery, replacement: &str) -> String {
        let Some(config) = compile(query) else {
            return document.to_string();
        };
        match config {
            SearchConfig::Regex { regex } => regex
                .replace_all(document, NoExpand(replacement))
                .into_owned(),
            SearchConfig::Literal { .. } => document.to_string(),
        }
    }

    /// 光标之后的第一个匹配（循环）
    pub fn find_next(matches: &[Match], line: usize, column: usize) -> Option<usize> {
        if matches.is_empty() {
            return None;
        }
        matches
            .iter()
            .position(|m| (m.line, m.column) > (line, column))
            .or(Some(0))
    }

    /// 光标之前的最后一个匹配（循环）
    pub fn find_prev(matches: &[Match], line: usize, column: usize) -> Option<usize> {
        if matches.is_empty() {
            return None;
        }
        matches
            .iter()
            .rposition(|m| (m.line, m.column) < (line, column))
            .or(Some(matches.len() - 1))
    }
}

fn compile(query: &SearchQuery) -> Option<SearchConfig> {
    if query.term.is_empty() {
        return None;
    }
    match SearchConfig::from_query(query) {
        Ok(config) => Some(config),
        Err(e) => {
            tracing::debug!(error = %e, term = %query.term, "invalid search pattern");
            None
        }
    }
}

#[cfg(test)]
#[path = "../../../../../tests/unit/kernel/services/adapters/search/service.rs"]
mod tests;
