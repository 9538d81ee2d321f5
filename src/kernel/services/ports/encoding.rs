use serde::Serialize;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum Encoding {
    #[serde(rename = "utf-8")]
    Utf8,
    #[serde(rename = "utf-8-bom")]
    Utf8Bom,
    #[serde(rename = "utf-16-be")]
    Utf16Be,
    #[serde(rename = "utf-16-le")]
    Utf16Le,
    #[serde(rename = "utf-32-be")]
    Utf32Be,
    #[serde(rename = "ascii")]
    Ascii,
    #[serde(rename = "latin1")]
    Latin1,
    #[serde(rename = "binary")]
    Binary,
}

impl Encoding {
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Utf8 => "utf-8",
            Self::Utf8Bom => "utf-8-bom",
            Self::Utf16Be => "utf-16-be",
            Self::Utf16Le => "utf-16-le",
            Self::Utf32Be => "utf-32-be",
            Self::Ascii => "ascii",
            Self::Latin1 => "latin1",
            Self::Binary => "binary",
        }
    }

    pub const fn has_bom(self) -> bool {
        matches!(
            self,
            Self::Utf8Bom | Self::Utf16Be | Self::Utf16Le | Self::Utf32Be
        )
    }

    pub const fn bom_len(self) -> usize {
        match self {
            Self::Utf8Bom => 3,
            Self::Utf16Be | Self::Utf16Le => 2,
            Self::Utf32Be => 4,
            _ => 0,
        }
    }
}

impl std::fmt::Display for Encoding {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum LineEnding {
    #[serde(rename = "LF")]
    Lf,
    #[serde(rename = "CRLF")]
    Crlf,
    #[serde(rename = "CR")]
    Cr,
    Mixed,
}

impl LineEnding {
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Lf => "LF",
            Self::Crlf => "CRLF",
            Self::Cr => "CR",
            Self::Mixed => "Mixed",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum IndentStyle {
    Spaces,
    Tabs,
    Mixed,
    None,
}

impl IndentStyle {
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Spaces => "spaces",
            Self::Tabs => "tabs",
            Self::Mixed => "mixed",
            Self::None => "none",
        }
    }
}

/// What the detector learned about a file's bytes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct FileInfo {
    pub encoding: Encoding,
    pub line_ending: LineEnding,
    #[serde(rename = "hasBOM")]
    pub has_bom: bool,
    pub indent_style: IndentStyle,
    pub indent_size: u8,
}

impl Default for FileInfo {
    fn default() -> Self {
        Self {
            encoding: Encoding::Utf8,
            line_ending: LineEnding::Lf,
            has_bom: false,
            indent_style: IndentStyle::None,
            indent_size: 2,
        }
    }
}
