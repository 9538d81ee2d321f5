//! 文件编码 / 换行符 / 缩进检测
//!
//! `detect_bytes` is a pure function of the buffer. `detect` reads through the
//! file port and falls back to `FileInfo::default()` when the read fails.

use crate::kernel::services::ports::encoding::{Encoding, FileInfo, IndentStyle, LineEnding};
use crate::kernel::services::ports::file::FileProvider;
use std::borrow::Cow;
use std::path::Path;

const BINARY_SAMPLE_LEN: usize = 1024;
const BINARY_NUL_RATIO: f64 = 0.1;
const MAX_HISTOGRAM_INDENT: usize = 8;
const DEFAULT_INDENT_SIZE: u8 = 2;
const TAB_INDENT_SIZE: u8 = 4;

pub fn detect(provider: &dyn FileProvider, path: &Path) -> FileInfo {
    match provider.read_file_bytes(path) {
        Ok(bytes) => detect_bytes(&bytes),
        Err(e) => {
            tracing::debug!(path = %path.display(), error = %e, "file info fallback to default");
            FileInfo::default()
        }
    }
}

pub fn detect_bytes(bytes: &[u8]) -> FileInfo {
    let encoding = detect_encoding(bytes);
    let text = decode_text(bytes, encoding);
    let (indent_style, indent_size) = detect_indent(&text);

    FileInfo {
        encoding,
        line_ending: detect_line_ending(&text),
        has_bom: encoding.has_bom(),
        indent_style,
        indent_size,
    }
}

pub fn detect_encoding(bytes: &[u8]) -> Encoding {
    if bytes.starts_with(&[0xEF, 0xBB, 0xBF]) {
        return Encoding::Utf8Bom;
    }
    if bytes.starts_with(&[0xFE, 0xFF]) {
        return Encoding::Utf16Be;
    }
    if bytes.starts_with(&[0xFF, 0xFE]) {
        return Encoding::Utf16Le;
    }
    if bytes.starts_with(&[0x00, 0x00, 0xFE, 0xFF]) {
        return Encoding::Utf32Be;
    }

    let sample = &bytes[..bytes.len().min(BINARY_SAMPLE_LEN)];
    if !sample.is_empty() {
        let nul = memchr::memchr_iter(0, sample).count();
        if nul as f64 / sample.len() as f64 > BINARY_NUL_RATIO {
            return Encoding::Binary;
        }
    }

    let has_high = bytes.iter().any(|&b| b > 0x7F);
    if is_valid_utf8(bytes) {
        return if has_high {
            Encoding::Utf8
        } else {
            Encoding::Ascii
        };
    }
    if has_high {
        return Encoding::Latin1;
    }
    Encoding::Utf8
}

/// Structural UTF-8 check: lead byte class plus the right number of
/// `10xxxxxx` continuation bytes. Overlong forms and surrogates are not
/// rejected.
pub fn is_valid_utf8(bytes: &[u8]) -> bool {
    let mut i = 0usize;
    while i < bytes.len() {
        let lead = bytes[i];
        let continuation = if lead <= 0x7F {
            0
        } else if lead & 0xE0 == 0xC0 {
            1
        } else if lead & 0xF0 == 0xE0 {
            2
        } else if lead & 0xF8 == 0xF0 {
            3
        } else {
            return false;
        };

        for k in 1..=continuation {
            match bytes.get(i + k) {
                Some(b) if b & 0xC0 == 0x80 => {}
                _ => return false,
            }
        }
        i += continuation + 1;
    }
    true
}

/// Text view of `bytes` in the detected encoding, BOM stripped. Undecodable
/// sequences become U+FFFD.
pub(crate) fn decode_text(bytes: &[u8], encoding: Encoding) -> Cow<'_, str> {
    let body = &bytes[encoding.bom_len()..];
    match encoding {
        Encoding::Utf16Le => encoding_rs::UTF_16LE.decode_without_bom_handling(body).0,
        Encoding::Utf16Be => encoding_rs::UTF_16BE.decode_without_bom_handling(body).0,
        Encoding::Latin1 => encoding_rs::WINDOWS_1252
            .decode_without_bom_handling(body)
            .0,
        Encoding::Utf32Be => Cow::Owned(
            body.chunks_exact(4)
                .map(|unit| {
                    let code = u32::from_be_bytes([unit[0], unit[1], unit[2], unit[3]]);
                    char::from_u32(code).unwrap_or(char::REPLACEMENT_CHARACTER)
                })
                .collect(),
        ),
        _ => String::from_utf8_lossy(body),
    }
}

pub fn detect_line_ending(text: &str) -> LineEnding {
    let bytes = text.as_bytes();
    let mut crlf = 0usize;
    let mut cr = 0usize;
    let mut lf = 0usize;

    let mut i = 0usize;
    while i < bytes.len() {
        match bytes[i] {
            b'\r' if bytes.get(i + 1) == Some(&b'\n') => {
                crlf += 1;
                i += 1;
            }
            b'\r' => cr += 1,
            b'\n' => lf += 1,
            _ => {}
        }
        i += 1;
    }

    match (crlf > 0, cr > 0, lf > 0) {
        (false, false, false) => LineEnding::Lf,
        (true, false, false) => LineEnding::Crlf,
        (false, true, false) => LineEnding::Cr,
        (false, false, true) => LineEnding::Lf,
        _ => LineEnding::Mixed,
    }
}

/// Indent style and size from the leading whitespace of each content line.
///
/// Lines that are empty or whitespace-only carry no indentation signal and
/// are skipped, so trailing blanks left by an editor (`"    "` in a
/// tab-indented file) do not turn the result into `Mixed`.
pub fn detect_indent(text: &str) -> (IndentStyle, u8) {
    let mut tab_lines = 0usize;
    let mut space_lines = 0usize;
    let mut histogram = [0usize; MAX_HISTOGRAM_INDENT + 1];

    for line in text.split('\n') {
        let line = line.strip_suffix('\r').unwrap_or(line);
        if line.trim().is_empty() {
            continue;
        }

        let lead_len = line
            .bytes()
            .position(|b| b != b' ' && b != b'\t')
            .unwrap_or(line.len());
        let lead = &line.as_bytes()[..lead_len];
        if lead.is_empty() {
            continue;
        }

        let has_tab = lead.contains(&b'\t');
        let has_space = lead.contains(&b' ');
        match (has_tab, has_space) {
            (true, true) => {
                tab_lines += 1;
                space_lines += 1;
            }
            (true, false) => tab_lines += 1,
            (false, true) => {
                space_lines += 1;
                if lead.len() <= MAX_HISTOGRAM_INDENT {
                    histogram[lead.len()] += 1;
                }
            }
            (false, false) => {}
        }
    }

    match (tab_lines > 0, space_lines > 0) {
        (false, false) => (IndentStyle::None, DEFAULT_INDENT_SIZE),
        (true, false) => (IndentStyle::Tabs, TAB_INDENT_SIZE),
        (false, true) => (IndentStyle::Spaces, dominant_indent(&histogram)),
        (true, true) => (IndentStyle::Mixed, DEFAULT_INDENT_SIZE),
    }
}

fn dominant_indent(histogram: &[usize]) -> u8 {
    let mut best_size = 0usize;
    let mut best_count = 0usize;
    for (size, &count) in histogram.iter().enumerate().skip(1) {
        // 严格大于：并列时取较小的缩进
        if count > best_count {
            best_size = size;
            best_count = count;
        }
    }
    if best_count == 0 {
        return DEFAULT_INDENT_SIZE;
    }

    let size = if best_size > 4 && best_size % 4 == 0 {
        4
    } else if best_size > 4 && best_size % 2 == 0 {
        2
    } else {
        best_size
    };
    size as u8
}

#[cfg(test)]
#[path = "../../../../tests/unit/kernel/services/adapters/encoding.rs"]
mod tests;
