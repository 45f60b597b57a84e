//! Editor domain: documents, Markdown fences and code extraction.

mod document;
pub mod extract;
pub mod markdown;

pub use document::Document;
pub use extract::{extract_all_code, extract_code, Snippet, SnippetSource};
pub use markdown::{code_blocks, extension_of, is_markdown, CodeBlock, CodeBlocks};
