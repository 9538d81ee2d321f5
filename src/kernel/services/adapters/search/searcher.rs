//! 行搜索器
//!
//! - Literal 模式：memchr `Finder`，大小写不敏感时对 ASCII 小写化后查找；
//!   非 ASCII 行改走 Unicode 折叠的正则，与文档搜索结果一致
//! - Regex 模式：显式 `find_at` 循环，零长度匹配后前进一个字符

use crate::kernel::services::ports::search::{Result, SearchQuery};
use memchr::memmem::Finder;
use regex::{Regex, RegexBuilder};
use std::ops::Range;

/// 搜索配置，缓存编译好的搜索引擎
#[derive(Clone)]
pub enum SearchConfig {
    Literal {
        pattern: Vec<u8>,
        case_sensitive: bool,
        finder: Finder<'static>,
        /// Case-insensitive only: used on lines that are not pure ASCII.
        folded: Option<Regex>,
    },
    Regex {
        regex: Regex,
    },
}

impl SearchConfig {
    /// Substring search. Non-ASCII case-insensitive needles go through an
    /// escaped regex so Unicode case folding still applies. ASCII needles
    /// keep the memchr path for ASCII lines and fold through the regex
    /// otherwise (e.g. U+212A KELVIN SIGN matches `k`).
    pub fn literal(pattern: &str, case_sensitive: bool) -> Self {
        if !case_sensitive && !pattern.is_ascii() {
            if let Ok(regex) = build_regex(&regex::escape(pattern), false) {
                return Self::Regex { regex };
            }
        }

        let pattern_bytes = if case_sensitive {
            pattern.as_bytes().to_vec()
        } else {
            pattern.as_bytes().to_ascii_lowercase()
        };
        let finder = Finder::new(&pattern_bytes).into_owned();
        let folded = if case_sensitive || pattern.is_empty() {
            None
        } else {
            build_regex(&regex::escape(pattern), false).ok()
        };

        Self::Literal {
            pattern: pattern_bytes,
            case_sensitive,
            finder,
            folded,
        }
    }

    pub fn regex(pattern: &str, case_sensitive: bool) -> Result<Self> {
        let regex = build_regex(pattern, case_sensitive)?;
        Ok(Self::Regex { regex })
    }

    /// Document search always runs on the regex engine; literal terms are
    /// escaped first.
    pub fn from_query(query: &SearchQuery) -> Result<Self> {
        Self::regex(&pattern_source(query), query.case_sensitive)
    }

    pub fn is_regex(&self) -> bool {
        matches!(self, Self::Regex { .. })
    }

    pub fn pattern_len(&self) -> usize {
        match self {
            Self::Literal { pattern, .. } => pattern.len(),
            Self::Regex { .. } => 0, // Regex 长度不固定
        }
    }

    /// 行内第一个匹配的字节范围
    ///
    /// `scratch` is reused across lines to hold the lowercased haystack.
    pub fn find_first(&self, line: &str, scratch: &mut Vec<u8>) -> Option<Range<usize>> {
        match self {
            Self::Literal {
                pattern,
                case_sensitive,
                finder,
                folded,
            } => {
                if pattern.is_empty() {
                    return None;
                }
                if let Some(regex) = folded.as_ref().filter(|_| !line.is_ascii()) {
                    return regex.find(line).map(|m| m.range());
                }
                let start = if *case_sensitive {
                    finder.find(line.as_bytes())?
                } else {
                    scratch.clear();
                    scratch.extend(line.bytes().map(|b| b.to_ascii_lowercase()));
                    finder.find(scratch)?
                };
                Some(start..start + pattern.len())
            }
            Self::Regex { regex } => regex.find(line).map(|m| m.range()),
        }
    }

    /// 行内所有匹配，从左到右
    pub fn find_all(&self, line: &str) -> Vec<Range<usize>> {
        match self {
            Self::Literal { .. } => {
                let mut scratch = Vec::new();
                let mut ranges = Vec::new();
                let mut offset = 0usize;
                while offset < line.len() {
                    let Some(range) = self.find_first(&line[offset..], &mut scratch) else {
                        break;
                    };
                    ranges.push(offset + range.start..offset + range.end);
                    offset += range.end;
                }
                ranges
            }
            Self::Regex { regex } => regex_ranges(regex, line),
        }
    }
}

pub(super) fn pattern_source(query: &SearchQuery) -> String {
    if query.use_regex {
        query.term.clone()
    } else {
        regex::escape(&query.term)
    }
}

pub(super) fn build_regex(pattern: &str, case_sensitive: bool) -> Result<Regex> {
    let regex = RegexBuilder::new(pattern)
        .case_insensitive(!case_sensitive)
        .build()?;
    Ok(regex)
}

/// Global iteration over one line.
///
/// Every match is reported, including an empty match right after a
/// non-empty one. An empty match bumps the scan position by one char so the
/// loop always terminates.
pub fn regex_ranges(regex: &Regex, line: &str) -> Vec<Range<usize>> {
    let mut ranges = Vec::new();
    let mut pos = 0usize;

    while pos <= line.len() {
        let Some(m) = regex.find_at(line, pos) else {
            break;
        };
        ranges.push(m.range());
        pos = if m.end() > m.start() {
            m.end()
        } else {
            next_char_boundary(line, m.end())
        };
    }

    ranges
}

fn next_char_boundary(line: &str, at: usize) -> usize {
    line[at..]
        .chars()
        .next()
        .map_or(line.len() + 1, |ch| at + ch.len_utf8())
}

/// 1-based char column of a byte offset.
pub fn char_column(line: &str, byte_offset: usize) -> usize {
    line[..byte_offset].chars().count() + 1
}

#[cfg(test)]
#[path = "../../../../../tests/unit/kernel/services/adapters/search/searcher.rs"]
mod tests;
