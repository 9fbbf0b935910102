use crate::model::{DeclKind, Declaration};
use crate::parse::ScopeTable;
use std::collections::BTreeMap;

/// Backfill names for struct/function-type declarations from the package
/// scope. Their signature rules drop the enclosing `type <Name>` clause, so
/// the name has to be recovered from the scope table by declaring line.
pub fn backfill_type_names(
    mut decls: BTreeMap<i64, Declaration>,
    scope: &ScopeTable,
) -> BTreeMap<i64, Declaration> {
    for (name, line) in scope.iter() {
        if let Some(decl) = decls.get_mut(&line)
            && decl.name.is_none()
            && matches!(
                decl.kind,
                DeclKind::StructTypeExpression | DeclKind::FunctionTypeExpression
            )
        {
            decl.name = Some(name.to_string());
        }
    }
    decls
}

/// Derive method display names by stripping the reconstructed receiver
/// clause from the signature and taking what remains up to the parameter
/// list. Relies on the source matching the `(alias [*]Type)` reconstruction
/// byte for byte; divergent formatting falls through with the prefix intact.
pub fn resolve_method_names(mut decls: BTreeMap<i64, Declaration>) -> BTreeMap<i64, Declaration> {
    for decl in decls.values_mut() {
        let Some(receiver) = &decl.receiver else {
            continue;
        };
        if decl.name.is_some() {
            continue;
        }
        let prefix = format!("func {receiver}");
        let rest = decl.signature.strip_prefix(&prefix).unwrap_or(&decl.signature);
        let name = match rest.find('(') {
            Some(idx) => rest[..idx].trim(),
            None => rest.trim(),
        };
        decl.name = Some(name.to_string());
    }
    decls
}

#[cfg(test)]
mod tests {
    use super::{backfill_type_names, resolve_method_names};
    use crate::model::{DeclKind, Declaration, Receiver};
    use crate::parse::ScopeTable;
    use std::collections::BTreeMap;

    fn decl(line: i64, signature: &str, kind: DeclKind) -> Declaration {
        Declaration {
            line,
            signature: signature.to_string(),
            kind,
            name: None,
            receiver: None,
        }
    }

    #[test]
    fn backfills_struct_and_func_type_names_only() {
        let mut decls = BTreeMap::new();
        decls.insert(3, decl(3, "type S struct", DeclKind::StructTypeExpression));
        decls.insert(
            5,
            decl(5, "type H func() error", DeclKind::FunctionTypeExpression),
        );
        decls.insert(7, decl(7, "func run()", DeclKind::FunctionDeclaration));

        let mut scope = ScopeTable::default();
        scope.insert("S".to_string(), 3);
        scope.insert("H".to_string(), 5);
        scope.insert("run".to_string(), 7);

        let decls = backfill_type_names(decls, &scope);
        assert_eq!(decls[&3].name.as_deref(), Some("S"));
        assert_eq!(decls[&5].name.as_deref(), Some("H"));
        // other kinds are left alone even when the scope knows them
        assert_eq!(decls[&7].name, None);
    }

    #[test]
    fn scope_entries_without_a_declaration_are_ignored() {
        let mut scope = ScopeTable::default();
        scope.insert("Ghost".to_string(), 42);
        let decls = backfill_type_names(BTreeMap::new(), &scope);
        assert!(decls.is_empty());
    }

    #[test]
    fn derives_method_name_from_signature() {
        let mut decls = BTreeMap::new();
        let mut method = decl(
            10,
            "func (s *Server) Handle(req Request) error",
            DeclKind::MethodDeclaration,
        );
        method.receiver = Some(Receiver {
            type_name: "Server".to_string(),
            pointer: true,
            alias: "s".to_string(),
        });
        decls.insert(10, method);

        let decls = resolve_method_names(decls);
        assert_eq!(decls[&10].name.as_deref(), Some("Handle"));
    }

    #[test]
    fn value_receiver_resolves_too() {
        let mut decls = BTreeMap::new();
        let mut method = decl(4, "func (s Server) Close()", DeclKind::MethodDeclaration);
        method.receiver = Some(Receiver {
            type_name: "Server".to_string(),
            pointer: false,
            alias: "s".to_string(),
        });
        decls.insert(4, method);

        let decls = resolve_method_names(decls);
        assert_eq!(decls[&4].name.as_deref(), Some("Close"));
    }

    #[test]
    fn existing_names_are_not_overwritten() {
        let mut decls = BTreeMap::new();
        let mut method = decl(4, "func (s Server) Close()", DeclKind::MethodDeclaration);
        method.receiver = Some(Receiver {
            type_name: "Server".to_string(),
            pointer: false,
            alias: "s".to_string(),
        });
        method.name = Some("Already".to_string());
        decls.insert(4, method);

        let decls = resolve_method_names(decls);
        assert_eq!(decls[&4].name.as_deref(), Some("Already"));
    }
}
