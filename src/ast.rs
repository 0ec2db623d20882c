//! Thin wrapper around `tree_sitter::Node` giving the scorer the fields it
//! cares about instead of grammar-string matches scattered everywhere.

use std::sync::Arc;

use tree_sitter::{Node, Point};

/// The closed set of node kinds the scorer dispatches on. Everything else
/// is `Other` and is traversed transparently.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NodeKind {
    If,
    Else,
    Switch,
    TypeSwitch,
    Select,
    For,
    Range,
    FuncLit,
    Branch,
    Binary,
    Paren,
    Call,
    Other,
}

impl NodeKind {
    pub fn from_ts_kind(kind: &str) -> NodeKind {
        match kind {
            "if_statement" => NodeKind::If,
            "expression_switch_statement" => NodeKind::Switch,
            "type_switch_statement" => NodeKind::TypeSwitch,
            "select_statement" => NodeKind::Select,
            "for_statement" => {
                // tree-sitter-go folds plain for, for-with-clause, and
                // for-range into a single "for_statement" kind; the
                // range_clause child (if any) is what distinguishes range.
                NodeKind::For
            }
            "func_literal" => NodeKind::FuncLit,
            "break_statement" | "continue_statement" | "goto_statement"
            | "fallthrough_statement" => NodeKind::Branch,
            "binary_expression" => NodeKind::Binary,
            "parenthesized_expression" => NodeKind::Paren,
            "call_expression" => NodeKind::Call,
            _ => NodeKind::Other,
        }
    }
}

/// Returns the `range_clause` child of a `for_statement`, if this for-loop
/// is a range loop (`for k, v := range x { ... }`).
pub fn range_clause<'a>(for_stmt: Node<'a>) -> Option<Node<'a>> {
    let mut cursor = for_stmt.walk();
    for_stmt
        .children(&mut cursor)
        .find(|c| c.kind() == "range_clause")
}

/// Returns the `for_clause` child of a `for_statement`, if this for-loop
/// uses the three-part `init; cond; post` form. tree-sitter-go folds that
/// form's `InitStmt ";" Condition ";" PostStmt` production into a
/// `for_clause` node distinct from `for_statement` itself — the same
/// by-kind-not-by-field situation [`range_clause`] handles, since neither
/// clause node is addressable as a field of `for_statement` directly.
pub fn for_clause<'a>(for_stmt: Node<'a>) -> Option<Node<'a>> {
    let mut cursor = for_stmt.walk();
    for_stmt
        .children(&mut cursor)
        .find(|c| c.kind() == "for_clause")
}

/// A source position: (filename, line, column), 1-indexed to match the
/// original tool's `token.Position` rendering.
#[derive(Debug, Clone, PartialEq, Eq, serde::Serialize)]
pub struct Position {
    pub file: Arc<str>,
    pub line: usize,
    pub column: usize,
}

impl Position {
    pub fn new(file: Arc<str>, point: Point) -> Position {
        Position {
            file,
            line: point.row + 1,
            column: point.column + 1,
        }
    }
}

impl std::fmt::Display for Position {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}:{}:{}", self.file, self.line, self.column)
    }
}

/// A top-level function or method declaration, with the fields spec.md §3
/// names: an optional receiver, an identifier, an optional leading doc
/// comment, and a body block.
#[derive(Debug, Clone)]
pub struct FuncDecl<'a> {
    pub node: Node<'a>,
    pub receiver: Option<Node<'a>>,
    pub name: Node<'a>,
    pub doc: Option<String>,
    pub body: Option<Node<'a>>,
}

impl<'a> FuncDecl<'a> {
    /// Builds a `FuncDecl` from a `function_declaration` or
    /// `method_declaration` top-level node. Returns `None` if the node
    /// carries no name (a forward declaration with no identifier, which
    /// the subject language's grammar does not otherwise permit at this
    /// position but tree-sitter's error recovery can still produce).
    pub fn from_node(node: Node<'a>, src: &[u8]) -> Option<FuncDecl<'a>> {
        let name = node.child_by_field_name("name")?;
        let receiver = node.child_by_field_name("receiver").and_then(|params| {
            // The receiver is the first (and only) parameter_declaration
            // inside the receiver parameter_list.
            let mut cursor = params.walk();
            params
                .children(&mut cursor)
                .find(|c| c.kind() == "parameter_declaration")
                .and_then(|decl| decl.child_by_field_name("type"))
        });
        let body = node.child_by_field_name("body");
        let doc = leading_doc_comment(node, src);

        Some(FuncDecl {
            node,
            receiver,
            name,
            doc,
            body,
        })
    }
}

/// Walks preceding sibling `comment` nodes immediately above `node`,
/// concatenating contiguous ones into a single doc comment string (one
/// line per source line) the way `go/ast` attaches a `CommentGroup` to a
/// `FuncDecl.Doc`.
fn leading_doc_comment(node: Node, src: &[u8]) -> Option<String> {
    let mut lines = Vec::new();
    let mut cur = node.prev_sibling();
    while let Some(sib) = cur {
        if sib.kind() != "comment" {
            break;
        }
        if let Ok(text) = sib.utf8_text(src) {
            lines.push(text.to_string());
        }
        cur = sib.prev_sibling();
    }
    if lines.is_empty() {
        return None;
    }
    lines.reverse();
    Some(lines.join("\n"))
}
