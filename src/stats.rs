//! Collects one [`StatRecord`] per top-level function/method declaration.
//!
//! This is the glue between [`crate::parse`]'s file-level view and
//! [`crate::complexity::Scorer`]'s per-function scoring: it owns none of the
//! scoring logic itself, only the bookkeeping around it (receiver rendering,
//! the ignore directive, and assembling the final record).

use crate::ast::{FuncDecl, Position};
use crate::complexity::{Scorer, TraceEntry};

/// One scored function or method.
#[derive(Debug, Clone, serde::Serialize)]
pub struct StatRecord {
    pub pkg_name: String,
    pub func_name: String,
    pub complexity: u32,
    pub pos: Position,
    pub traces: Option<Vec<TraceEntry>>,
}

impl std::fmt::Display for StatRecord {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "{} {} {} {}",
            self.complexity, self.pkg_name, self.func_name, self.pos
        )
    }
}

/// Scores every (non-ignored) function declaration in `decls`, in source
/// order (spec.md §4.4: no sorting happens at this level).
pub fn collect_stats(
    pkg_name: &str,
    decls: &[FuncDecl],
    src: &[u8],
    file: std::sync::Arc<str>,
    include_trace: bool,
) -> Vec<StatRecord> {
    let mut out = Vec::with_capacity(decls.len());
    for decl in decls {
        if ignore_directive(decl.doc.as_deref()) {
            continue;
        }

        let name_text = decl.name.utf8_text(src).unwrap_or("");
        let scorer = Scorer::new(name_text, file.clone(), include_trace);
        let result = scorer.score_function(decl.body, src);

        out.push(StatRecord {
            pkg_name: pkg_name.to_string(),
            func_name: funcname(decl, src),
            complexity: result.complexity,
            pos: Position::new(file.clone(), decl.node.start_position()),
            traces: result.traces,
        });
    }
    out
}

/// spec.md §4.5: `"Name"` for a plain function, `"(Recv).Name"` for a
/// method. Grounded on `gocognit.go`'s `funcName`.
pub fn funcname(decl: &FuncDecl, src: &[u8]) -> String {
    let name_text = decl.name.utf8_text(src).unwrap_or("");
    match decl.receiver {
        Some(recv) => format!("({}).{}", render_receiver(recv, src), name_text),
        None => name_text.to_string(),
    }
}

/// Renders a receiver type node the way `recv.go`'s `recvString` renders an
/// `ast.Expr`: `"T"`, `"*T"`, `"T[U]"`, `"T[U, V]"`, or `"BADRECV"` for
/// anything else.
fn render_receiver(node: tree_sitter::Node, src: &[u8]) -> String {
    match node.kind() {
        "type_identifier" | "identifier" => node.utf8_text(src).unwrap_or("BADRECV").to_string(),
        "pointer_type" => match node.child_by_field_name("type") {
            Some(inner) => format!("*{}", render_receiver(inner, src)),
            None => "BADRECV".to_string(),
        },
        "generic_type" => {
            let base = node
                .child_by_field_name("type")
                .map(|n| render_receiver(n, src))
                .unwrap_or_else(|| "BADRECV".to_string());
            let args = node.child_by_field_name("type_arguments");
            match args {
                Some(args) => {
                    let mut cursor = args.walk();
                    let rendered: Vec<String> = args
                        .children(&mut cursor)
                        .filter(|c| c.is_named())
                        .map(|c| render_receiver(c, src))
                        .collect();
                    format!("{}[{}]", base, rendered.join(", "))
                }
                None => base,
            }
        }
        _ => "BADRECV".to_string(),
    }
}

/// spec.md §4.6: true iff any line of the leading doc comment is exactly
/// `//gocognit:ignore`, matching `gocognit.go`'s `parseDirective`.
pub fn ignore_directive(doc: Option<&str>) -> bool {
    match doc {
        Some(doc) => doc.lines().any(|line| line.trim() == "//gocognit:ignore"),
        None => false,
    }
}
