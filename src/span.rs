use std::fmt;
use std::str::FromStr;

use crate::error::Error;

/// The styling applied to an inline span
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SpanKind {
    Text,
    Bold,
    Italic,
    Code,
    Link,
    Image,
}

impl SpanKind {
    pub fn as_str(self) -> &'static str {
        match self {
            SpanKind::Text => "text",
            SpanKind::Bold => "bold",
            SpanKind::Italic => "italic",
            SpanKind::Code => "code",
            SpanKind::Link => "link",
            SpanKind::Image => "image",
        }
    }
}

impl fmt::Display for SpanKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for SpanKind {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "text" => Ok(SpanKind::Text),
            "bold" => Ok(SpanKind::Bold),
            "italic" => Ok(SpanKind::Italic),
            "code" => Ok(SpanKind::Code),
            "link" => Ok(SpanKind::Link),
            "image" => Ok(SpanKind::Image),
            other => Err(Error::UnknownSpanKind(other.to_string())),
        }
    }
}

/// Inline text fragment with formatting.
///
/// `url` is set for links and images only. The fields are private so the
/// constructors below are the only way to build one.
///
/// ```compile_fail
/// use leafmark::{Span, SpanKind};
///
/// let link = Span { kind: SpanKind::Link, text: "x".to_string(), url: None };
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Span {
    kind: SpanKind,
    text: String,
    url: Option<String>,
}

impl Span {
    fn styled(kind: SpanKind, text: impl Into<String>) -> Self {
        Self {
            kind,
            text: text.into(),
            url: None,
        }
    }

    pub fn text(text: impl Into<String>) -> Self {
        Self::styled(SpanKind::Text, text)
    }

    pub fn bold(text: impl Into<String>) -> Self {
        Self::styled(SpanKind::Bold, text)
    }

    pub fn italic(text: impl Into<String>) -> Self {
        Self::styled(SpanKind::Italic, text)
    }

    pub fn code(text: impl Into<String>) -> Self {
        Self::styled(SpanKind::Code, text)
    }

    pub fn link(text: impl Into<String>, url: impl Into<String>) -> Self {
        Self {
            kind: SpanKind::Link,
            text: text.into(),
            url: Some(url.into()),
        }
    }

    /// An image span; `alt` is carried in `text`.
    pub fn image(alt: impl Into<String>, url: impl Into<String>) -> Self {
        Self {
            kind: SpanKind::Image,
            text: alt.into(),
            url: Some(url.into()),
        }
    }

    pub fn kind(&self) -> SpanKind {
        self.kind
    }

    /// Span content; the alt text for images.
    pub fn content(&self) -> &str {
        &self.text
    }

    pub fn url(&self) -> Option<&str> {
        self.url.as_deref()
    }

    pub fn is_text(&self) -> bool {
        self.kind == SpanKind::Text
    }
}
