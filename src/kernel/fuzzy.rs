//! Subsequence filter for command palette and file pickers.
//!
//! No scoring: callers keep their own order.

/// True when every char of `pattern` occurs in `text` in the same order,
/// ignoring case. An empty pattern matches everything.
pub fn matches(pattern: &str, text: &str) -> bool {
    let mut wanted = pattern.chars().flat_map(char::to_lowercase).peekable();
    if wanted.peek().is_none() {
        return true;
    }

    for ch in text.chars().flat_map(char::to_lowercase) {
        if wanted.peek() == Some(&ch) {
            wanted.next();
            if wanted.peek().is_none() {
                return true;
            }
        }
    }
    false
}

pub fn filter_indices<S: AsRef<str>>(pattern: &str, items: &[S]) -> Vec<usize> {
    let pattern = pattern.trim();
    if pattern.is_empty() {
        return (0..items.len()).collect();
    }

    let mut out = Vec::with_capacity(items.len());
    for (i, item) in items.iter().enumerate() {
        if matches(pattern, item.as_ref()) {
            out.push(i);
        }
    }
    out
}

#[cfg(test)]
#[path = "../../tests/unit/kernel/fuzzy.rs"]
mod tests;
