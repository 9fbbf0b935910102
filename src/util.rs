use anyhow::{Context, Result};
use std::fs;
use std::path::Path;
use tree_sitter::Node;

pub fn read_to_string(path: &Path) -> Result<String> {
    fs::read_to_string(path).with_context(|| format!("read {}", path.display()))
}

/// Verbatim source text covered by a node, byte-exact.
pub fn node_span<'a>(node: Node<'_>, source: &'a str) -> &'a str {
    source.get(node.start_byte()..node.end_byte()).unwrap_or("")
}

/// Trimmed node text, for identifiers.
pub fn node_text(node: Node<'_>, source: &str) -> String {
    node_span(node, source).trim().to_string()
}

/// 1-based line where a node starts.
pub fn start_line(node: Node<'_>) -> i64 {
    node.start_position().row as i64 + 1
}

/// Strip a single trailing line break, keeping the rest of the span intact.
pub fn trim_trailing_newline(text: &str) -> &str {
    text.strip_suffix('\n').unwrap_or(text)
}
