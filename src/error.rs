use std::path::PathBuf;

use thiserror::Error;

/// Errors raised while parsing markdown or rendering a node tree.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum Error {
    #[error("uneven delimiter {delimiter} in text: {text}")]
    DelimiterImbalance { delimiter: String, text: String },

    #[error("unknown span kind: {0}")]
    UnknownSpanKind(String),

    #[error("leaf node has no value")]
    MissingValue,

    #[error("parent node has no tag")]
    MissingTag,

    #[error("parent node has no children")]
    MissingChildren,

    #[error("unable to determine title, no h1 header")]
    NoTitleFound,
}

/// Errors raised while building a site on disk.
#[derive(Debug, Error)]
pub enum SiteError {
    #[error("I/O error at {path}: {source}")]
    Io {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("failed to convert {path}: {source}")]
    Markdown { path: PathBuf, source: Error },

    #[error("could not locate directory {0}")]
    MissingDirectory(PathBuf),

    #[error("could not find index.md in {0}")]
    MissingIndex(PathBuf),

    #[error("refusing to use {output} as output directory, it overlaps {overlaps}")]
    UnsafeOutput { output: PathBuf, overlaps: PathBuf },

    #[error("unsupported file type: {0}")]
    UnsupportedFile(PathBuf),
}

impl SiteError {
    pub(crate) fn io(path: impl Into<PathBuf>) -> impl FnOnce(std::io::Error) -> Self {
        let path = path.into();
        move |source| SiteError::Io { path, source }
    }
}
