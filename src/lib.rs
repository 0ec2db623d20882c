//! Cognitive complexity scoring for Go source code.
//!
//! The scored core lives in [`complexity`] and [`stats`]; [`ast`] is the
//! shared node-shape vocabulary between them; [`parse`] is the host-side
//! tree-sitter adapter a runnable tool needs but the scoring rules
//! themselves never depend on.

pub mod ast;
pub mod complexity;
pub mod parse;
pub mod stats;

pub use complexity::{ScoreResult, Scorer, TraceEntry};
pub use parse::{parse_bytes, parse_file, ParsedFile};
pub use stats::{collect_stats, funcname, ignore_directive, StatRecord};
