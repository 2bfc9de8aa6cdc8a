mod block;
mod config;
mod error;
mod inline;
mod node;
pub mod site;
mod span;
mod title;

pub use block::{BlockType, ROOT_TAG, block_to_block_type, markdown_to_blocks, markdown_to_tree};
pub use config::{Config, ConfigError, PathsConfig, TemplateConfig};
pub use error::{Error, SiteError};
pub use inline::{span_to_leaf, text_to_leaves, text_to_spans};
pub use node::{Attributes, IMAGE_TAG, Node};
pub use span::{Span, SpanKind};
pub use title::extract_title;

/// Convert markdown straight to HTML.
pub fn markdown_to_html(markdown: &str) -> Result<String, Error> {
    markdown_to_tree(markdown)?.render()
}
