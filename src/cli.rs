//! Output formatting and result filtering for the `congo` binary.
//!
//! Grounded on the original `formatter_text.go` / `formatter_json.go` /
//! `filter.go`. The filter keeps `filter.go`'s composable-predicate-chain
//! design but fixes an off-by-one in the original's `Apply` (it sliced with
//! `filtered[:numEntries-1]`, which drops the last match and panics when
//! nothing matches) — see DESIGN.md.

use std::io::Write;

use anyhow::Result;

use crate::stats::StatRecord;

/// One text line per stat, in the order given — a direct port of
/// `TextFormatter.Write`.
pub struct TextFormatter<W> {
    writer: W,
}

impl<W: Write> TextFormatter<W> {
    pub fn new(writer: W) -> Self {
        TextFormatter { writer }
    }

    pub fn write(&mut self, stats: &[StatRecord]) -> Result<()> {
        for stat in stats {
            writeln!(self.writer, "{stat}")?;
        }
        Ok(())
    }
}

/// A JSON array of stats, a direct port of `JsonFormatter.Format`.
pub struct JsonFormatter<W> {
    writer: W,
    pretty: bool,
}

impl<W: Write> JsonFormatter<W> {
    pub fn new(writer: W, pretty: bool) -> Self {
        JsonFormatter { writer, pretty }
    }

    pub fn write(&mut self, stats: &[StatRecord]) -> Result<()> {
        if self.pretty {
            serde_json::to_writer_pretty(&mut self.writer, stats)?;
        } else {
            serde_json::to_writer(&mut self.writer, stats)?;
        }
        writeln!(self.writer)?;
        Ok(())
    }
}

/// A predicate over `(stat, index-in-original-slice)`, matching
/// `filter.go`'s `FilterFunc`.
pub type FilterFunc<'a> = Box<dyn Fn(&StatRecord, usize) -> bool + 'a>;

/// A composable chain of filters: a stat survives only if every filter
/// keeps it, same short-circuit order as `Filter.Apply`'s inner loop.
#[derive(Default)]
pub struct Filter<'a> {
    filter_funcs: Vec<FilterFunc<'a>>,
}

impl<'a> Filter<'a> {
    pub fn new() -> Self {
        Filter::default()
    }

    pub fn add_filter(&mut self, f: impl Fn(&StatRecord, usize) -> bool + 'a) {
        self.filter_funcs.push(Box::new(f));
    }

    /// Returns every entry of `original` that every filter accepts. Unlike
    /// `filter.go`'s `Apply`, this keeps all matches (including the last
    /// one) instead of slicing off the final element.
    pub fn apply(&self, original: &[StatRecord]) -> Vec<StatRecord> {
        original
            .iter()
            .enumerate()
            .filter(|(i, stat)| self.filter_funcs.iter().all(|f| f(stat, *i)))
            .map(|(_, stat)| stat.clone())
            .collect()
    }
}

/// `over == 0` reproduces "no threshold": everything with `complexity > 0`
/// counts as interesting since 0 is the floor, same boundary
/// `cmd/gocognit/main.go`'s `-over` flag uses.
pub fn over_filter(over: u32) -> impl Fn(&StatRecord, usize) -> bool {
    move |stat, _| stat.complexity > over
}
