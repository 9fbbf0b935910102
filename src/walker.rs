use crate::model::{DeclKind, Declaration, Receiver};
use crate::util;
use tree_sitter::Node;

/// Visit every top-level statement of a parsed file once and classify it
/// into zero or more declarations. Grouped const/var/type blocks fan out
/// into one entry per line; package and import clauses are skipped.
pub fn walk(root: Node<'_>, source: &str) -> Vec<Declaration> {
    let mut out = Vec::new();
    let mut cursor = root.walk();
    for child in root.named_children(&mut cursor) {
        inspect_node(child, source, &mut out);
    }
    out
}

fn inspect_node(node: Node<'_>, source: &str, out: &mut Vec<Declaration>) {
    let node = unwrap_statement(node);
    let line = util::start_line(node);
    let span = util::node_span(node, source);
    match node.kind() {
        "function_declaration" => out.push(function_decl(span, line)),
        "method_declaration" => out.push(method_decl(node, span, source, line)),
        "channel_type" => out.push(Declaration {
            line,
            signature: util::trim_trailing_newline(span).to_string(),
            kind: DeclKind::ChannelTypeExpression,
            name: None,
            receiver: None,
        }),
        "short_var_declaration" => out.push(headed_decl(
            span,
            line,
            DeclKind::LocalDeclarationStatement,
        )),
        "func_literal" => out.push(headed_decl(span, line, DeclKind::FunctionLiteral)),
        "function_type" => out.push(headed_decl(span, line, DeclKind::FunctionTypeExpression)),
        "struct_type" => out.push(struct_decl(span, line)),
        "type_declaration" | "const_declaration" | "var_declaration" => {
            grouped_decl(node, span, source, line, out);
        }
        "package_clause" | "import_declaration" | "comment" | "empty_statement" => {}
        other => {
            eprintln!("typelist: skipping unclassified {other} node at line {line}");
        }
    }
}

/// Statements at the top level wrap expressions; classification wants the
/// expression itself (channel types, function literals).
fn unwrap_statement(node: Node<'_>) -> Node<'_> {
    if node.kind() == "expression_statement"
        && let Some(inner) = node.named_child(0)
    {
        return inner;
    }
    node
}

/// Cut a declaration span just before its body block, then drop a single
/// trailing line break. The cut lands one byte before the `{\n`, which also
/// removes the space that precedes the brace.
fn header(span: &str) -> &str {
    let cut = match span.find("{\n") {
        Some(idx) => {
            let cut = idx.saturating_sub(1);
            if span.is_char_boundary(cut) { cut } else { idx }
        }
        None => span.len(),
    };
    util::trim_trailing_newline(&span[..cut])
}

fn headed_decl(span: &str, line: i64, kind: DeclKind) -> Declaration {
    Declaration {
        line,
        signature: header(span).to_string(),
        kind,
        name: None,
        receiver: None,
    }
}

fn function_decl(span: &str, line: i64) -> Declaration {
    let signature = header(span);
    let rest = signature.strip_prefix("func").unwrap_or(signature);
    let name = match rest.find('(') {
        Some(idx) => rest[..idx].trim(),
        None => rest.trim(),
    };
    Declaration {
        line,
        signature: signature.to_string(),
        kind: DeclKind::FunctionDeclaration,
        name: Some(name.to_string()),
        receiver: None,
    }
}

/// Methods carry their receiver clause; the display name is derived later by
/// the receiver resolver pass.
fn method_decl(node: Node<'_>, span: &str, source: &str, line: i64) -> Declaration {
    let receiver = node
        .child_by_field_name("receiver")
        .map(|recv| parse_receiver(util::node_span(recv, source)));
    Declaration {
        line,
        signature: header(span).to_string(),
        kind: DeclKind::MethodDeclaration,
        name: None,
        receiver,
    }
}

/// Split a raw receiver clause like `(s *Server)` into its parts. Assumes
/// the common `(alias [*]Type)` formatting; anything else degrades the same
/// way the signature prefix match does.
fn parse_receiver(raw: &str) -> Receiver {
    let pointer = raw.contains('*');
    let inner = raw.strip_prefix('(').unwrap_or(raw);
    let Some(sep) = inner.find(' ') else {
        return Receiver {
            type_name: inner.strip_suffix(')').unwrap_or(inner).to_string(),
            pointer,
            alias: String::new(),
        };
    };
    let alias = inner[..sep].to_string();
    let rest = &inner[sep + 1..];
    let rest = if pointer {
        rest.strip_prefix('*').unwrap_or(rest)
    } else {
        rest
    };
    Receiver {
        type_name: rest.strip_suffix(')').unwrap_or(rest).to_string(),
        pointer,
        alias,
    }
}

fn struct_decl(span: &str, line: i64) -> Declaration {
    // keep everything through the `struct` keyword, drop the field list
    let signature = match span.find("struct") {
        Some(idx) => &span[..idx + "struct".len()],
        None => span,
    };
    Declaration {
        line,
        signature: util::trim_trailing_newline(signature).to_string(),
        kind: DeclKind::StructTypeExpression,
        name: None,
        receiver: None,
    }
}

fn func_type_decl(span: &str, line: i64) -> Declaration {
    Declaration {
        line,
        signature: util::trim_trailing_newline(span).to_string(),
        kind: DeclKind::FunctionTypeExpression,
        name: None,
        receiver: None,
    }
}

/// Classify a const/var/type declaration from its raw text.
///
/// A single unparenthesized `type` spec keeps the struct/function-type kind
/// so the scope pass can backfill its name. Everything else is decided by
/// where the first `=` sits relative to the first line break: before it, a
/// single named entry; absent on a single spec, a type alias; otherwise a
/// genuine multi-line block that fans out one entry per line.
fn grouped_decl(node: Node<'_>, span: &str, source: &str, line: i64, out: &mut Vec<Declaration>) {
    if node.kind() == "type_declaration"
        && !is_parenthesized(node)
        && let Some(spec) = single_type_spec(node)
        && let Some(ty) = spec.child_by_field_name("type")
    {
        match ty.kind() {
            "struct_type" => {
                out.push(struct_decl(span, line));
                return;
            }
            "function_type" => {
                out.push(func_type_decl(span, line));
                return;
            }
            _ => {}
        }
    }

    let eq_idx = span.find('=');
    let br_idx = span.find('\n');
    match eq_idx {
        None if is_parenthesized(node) => fan_out(span, line, out),
        None => {
            if let Some(decl) = alias_decl(span, line) {
                out.push(decl);
            } else {
                eprintln!("typelist: skipping unclassified {} node at line {line}", node.kind());
            }
        }
        // a parenthesized group squeezed onto one line has no inner lines
        // to fan out, so it yields nothing
        Some(_) if br_idx.is_none() && is_parenthesized(node) => fan_out(span, line, out),
        Some(eq) if br_idx.is_none_or(|br| br > eq) => {
            if let Some(decl) = assigned_decl(span, eq, line) {
                out.push(decl);
            } else {
                eprintln!("typelist: skipping unclassified {} node at line {line}", node.kind());
            }
        }
        Some(_) => fan_out(span, line, out),
    }
}

/// `type Name T`, `var x T`: name is the second token. A function type as
/// the third token must keep the full span, since its clause may span lines.
fn alias_decl(span: &str, line: i64) -> Option<Declaration> {
    let mut tokens = span.split_whitespace();
    let keyword = tokens.next()?;
    let name = tokens.next()?;
    let ty = tokens.next().unwrap_or("");
    let signature = if ty.contains("func") {
        util::trim_trailing_newline(span).to_string()
    } else if ty.is_empty() {
        format!("{keyword} {name}")
    } else {
        format!("{keyword} {name} {ty}")
    };
    Some(Declaration {
        line,
        signature,
        kind: DeclKind::TypeAliasSpec,
        name: Some(name.to_string()),
        receiver: None,
    })
}

/// `var x = ...`, `const C = ...`: name is the identifier before the `=`.
fn assigned_decl(span: &str, eq_idx: usize, line: i64) -> Option<Declaration> {
    let head = &span[..eq_idx];
    let mut tokens = head.split_whitespace();
    let keyword = tokens.next()?;
    let name = tokens.next()?;
    Some(Declaration {
        line,
        signature: format!("{keyword} {name}"),
        kind: DeclKind::GroupedDeclarationEntry,
        name: Some(name.to_string()),
        receiver: None,
    })
}

/// One entry per non-blank, non-comment line strictly inside the block.
/// Line offsets follow raw positions, so skipped lines still advance the
/// offset and every entry lands on its real source line.
fn fan_out(span: &str, line: i64, out: &mut Vec<Declaration>) {
    let keyword = span.split_whitespace().next().unwrap_or("");
    for (offset, raw) in span.lines().enumerate() {
        if offset == 0 {
            continue;
        }
        let trimmed = raw.trim();
        if trimmed.is_empty() || trimmed == "(" || trimmed == ")" || trimmed.starts_with("//") {
            continue;
        }
        let name = raw.split('=').next().unwrap_or(raw).trim();
        if name.is_empty() || name.starts_with("//") {
            continue;
        }
        out.push(Declaration {
            line: line + offset as i64,
            signature: format!("{keyword} {name}"),
            kind: DeclKind::GroupedDeclarationEntry,
            name: Some(name.to_string()),
            receiver: None,
        });
    }
}

fn is_parenthesized(node: Node<'_>) -> bool {
    let mut cursor = node.walk();
    node.children(&mut cursor).any(|child| child.kind() == "(")
}

fn single_type_spec(node: Node<'_>) -> Option<Node<'_>> {
    let mut cursor = node.walk();
    let mut specs = node
        .named_children(&mut cursor)
        .filter(|child| matches!(child.kind(), "type_spec" | "type_alias"));
    let first = specs.next()?;
    if specs.next().is_some() { None } else { Some(first) }
}
