use crate::model::{Catalog, Declaration};
use crate::{parse, resolve, util, walker};
use anyhow::Result;
use std::collections::BTreeMap;
use std::path::Path;

/// Run the full pipeline over one file: read, parse, walk, resolve, sort.
pub fn extract_file(path: &Path) -> Result<Catalog> {
    let source = util::read_to_string(path)?;
    extract_source(&source)
}

/// Build a catalog from raw Go source. Declarations are keyed by line with
/// last write winning, then both resolver passes run over the map before it
/// flattens into the sorted catalog.
pub fn extract_source(source: &str) -> Result<Catalog> {
    let parsed = parse::parse_source(source)?;
    let decls = walker::walk(parsed.tree.root_node(), source);

    let mut by_line: BTreeMap<i64, Declaration> = BTreeMap::new();
    for decl in decls {
        by_line.insert(decl.line, decl);
    }

    let by_line = resolve::backfill_type_names(by_line, &parsed.scope);
    let by_line = resolve::resolve_method_names(by_line);

    let mut catalog = Catalog::new(by_line.into_values().collect());
    catalog.sort();
    Ok(catalog)
}
