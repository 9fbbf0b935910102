use serde::Serialize;
use std::fmt;

/// Version reported by `-v` and embedded in every catalog.
pub const TOOL_VERSION: &str = env!("CARGO_PKG_VERSION");

/// One reported declaration: a line, a header excerpt, a kind, and the
/// optional name/receiver the resolver passes fill in.
#[derive(Debug, Serialize, Clone, PartialEq, Eq)]
pub struct Declaration {
    pub line: i64,
    pub signature: String,
    #[serde(rename = "type")]
    pub kind: DeclKind,
    pub name: Option<String>,
    pub receiver: Option<Receiver>,
}

/// The closed set of reportable declaration shapes.
#[derive(Debug, Serialize, Clone, Copy, PartialEq, Eq)]
pub enum DeclKind {
    FunctionDeclaration,
    MethodDeclaration,
    ChannelTypeExpression,
    LocalDeclarationStatement,
    FunctionLiteral,
    FunctionTypeExpression,
    StructTypeExpression,
    TypeAliasSpec,
    GroupedDeclarationEntry,
}

/// Binding between a method and the type it is declared against.
#[derive(Debug, Serialize, Clone, PartialEq, Eq)]
pub struct Receiver {
    pub type_name: String,
    pub pointer: bool,
    pub alias: String,
}

impl fmt::Display for Receiver {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.pointer {
            write!(f, "({} *{})", self.alias, self.type_name)
        } else {
            write!(f, "({} {})", self.alias, self.type_name)
        }
    }
}

/// The complete, versioned result set for one input file.
#[derive(Debug, Serialize)]
pub struct Catalog {
    pub version: String,
    pub objects: Vec<Declaration>,
}

impl Catalog {
    pub fn new(objects: Vec<Declaration>) -> Self {
        Catalog {
            version: TOOL_VERSION.to_string(),
            objects,
        }
    }

    /// Stable ascending sort by line.
    pub fn sort(&mut self) {
        self.objects.sort_by_key(|decl| decl.line);
    }
}
