use crate::util;
use anyhow::{Context, Result};
use std::collections::BTreeMap;
use tree_sitter::{Node, Parser, Tree};

/// Package-level symbol scope: identifier -> line of its declaring node.
///
/// Ordered so the backfill pass iterates deterministically.
#[derive(Debug, Default)]
pub struct ScopeTable {
    entries: BTreeMap<String, i64>,
}

impl ScopeTable {
    pub fn insert(&mut self, name: String, line: i64) {
        self.entries.insert(name, line);
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, i64)> {
        self.entries.iter().map(|(name, line)| (name.as_str(), *line))
    }

    pub fn get(&self, name: &str) -> Option<i64> {
        self.entries.get(name).copied()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

pub struct ParsedFile {
    pub tree: Tree,
    pub scope: ScopeTable,
}

/// Parse one Go source file into a syntax tree plus its package-level scope.
pub fn parse_source(source: &str) -> Result<ParsedFile> {
    let mut parser = Parser::new();
    let language = tree_sitter_go::LANGUAGE;
    parser.set_language(&language.into())?;
    let tree = parser.parse(source, None).context("parse go source")?;
    let scope = build_scope(tree.root_node(), source);
    Ok(ParsedFile { tree, scope })
}

/// Collect package-scope identifiers: top-level functions, type specs, and
/// const/var specs. Methods are not package-scope identifiers.
fn build_scope(root: Node<'_>, source: &str) -> ScopeTable {
    let mut scope = ScopeTable::default();
    let mut cursor = root.walk();
    for child in root.named_children(&mut cursor) {
        match child.kind() {
            "function_declaration" => {
                if let Some(name_node) = child.child_by_field_name("name") {
                    let name = util::node_text(name_node, source);
                    if !name.is_empty() {
                        scope.insert(name, util::start_line(name_node));
                    }
                }
            }
            "type_declaration" | "const_declaration" | "var_declaration" => {
                collect_spec_names(child, source, &mut scope);
            }
            _ => {}
        }
    }
    scope
}

fn collect_spec_names(node: Node<'_>, source: &str, scope: &mut ScopeTable) {
    let mut cursor = node.walk();
    for spec in node.named_children(&mut cursor) {
        match spec.kind() {
            "type_spec" | "type_alias" => {
                if let Some(name_node) = spec.child_by_field_name("name") {
                    let name = util::node_text(name_node, source);
                    if !name.is_empty() {
                        scope.insert(name, util::start_line(spec));
                    }
                }
            }
            "const_spec" | "var_spec" => {
                let mut names = spec.walk();
                for name_node in spec.children_by_field_name("name", &mut names) {
                    let name = util::node_text(name_node, source);
                    if !name.is_empty() {
                        scope.insert(name, util::start_line(spec));
                    }
                }
            }
            _ => {}
        }
    }
}
