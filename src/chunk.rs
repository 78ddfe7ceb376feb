//! Line-by-line state machine that groups classified lines into blobs.
//!
//! A blob is either a named definition (function or struct, destined for its
//! own file) or unnamed loose text that stays in the aggregator. When a new
//! definition starts, trailing loose text of the blob being built (the doc
//! comment or blank line in front of the new definition) is peeled off and
//! moved to the new blob.
//!
//! Closing braces are only recognized at column 0 and there is no brace
//! counting: a `}` at column 0 inside a definition body ends the definition.

use crate::classify::{classify, Category};

/// A classified line, terminator included.
pub type Line<'a> = (Category<'a>, &'a str);

/// Contiguous run of source lines.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Blob<'a> {
    /// Definition name captured when the blob was opened; `None` for loose text.
    pub name: Option<&'a str>,
    pub lines: Vec<Line<'a>>,
}

impl<'a> Blob<'a> {
    fn new(name: Option<&'a str>, lines: Vec<Line<'a>>) -> Self {
        Self { name, lines }
    }

    /// The blob's lines joined verbatim.
    pub fn text(&self) -> String {
        self.lines.iter().map(|(_, line)| *line).collect()
    }
}

/// Index of the last doc comment or blank line in `lines`.
pub fn last_break(lines: &[Line<'_>]) -> Option<usize> {
    lines.iter().rposition(|(cat, line)| cat.is_break(line))
}

/// Split `lines` at its last break point into (kept, peeled).
///
/// Without a break point, or with one at index 0, nothing is kept and
/// everything is peeled.
pub fn split_at_break<'a>(mut lines: Vec<Line<'a>>) -> (Vec<Line<'a>>, Vec<Line<'a>>) {
    match last_break(&lines) {
        None | Some(0) => (Vec::new(), lines),
        Some(idx) => {
            let peeled = lines.split_off(idx);
            (lines, peeled)
        }
    }
}

#[derive(Default)]
struct Chunker<'a> {
    current: Vec<Line<'a>>,
    pending_name: Option<&'a str>,
    inside_definition: bool,
    blobs: Vec<Blob<'a>>,
}

impl<'a> Chunker<'a> {
    fn push(&mut self, line: &'a str) {
        let category = classify(line);
        self.current.push((category, line));

        match category {
            Category::Plain | Category::DocComment => {}
            Category::FunctionStart(name) | Category::StructStart(name) => {
                let (before, after) = split_at_break(std::mem::take(&mut self.current));
                self.blobs.push(Blob::new(self.pending_name, before));
                self.current = after;
                self.pending_name = Some(name);
                self.inside_definition = true;
            }
            Category::BlockEnd => {
                // Outside a definition a column-0 brace is ordinary text
                if self.inside_definition {
                    let lines = std::mem::take(&mut self.current);
                    self.blobs.push(Blob::new(self.pending_name.take(), lines));
                    self.inside_definition = false;
                }
            }
        }
    }

    fn finish(mut self) -> Vec<Blob<'a>> {
        self.blobs.push(Blob::new(self.pending_name, self.current));
        self.blobs
    }
}

/// Chunk a whole source file into blobs, in emission order.
///
/// Lines keep their terminators, so concatenating every blob's text
/// reproduces `source` exactly. Empty blobs are returned as emitted.
pub fn chunk(source: &str) -> Vec<Blob<'_>> {
    let mut chunker = Chunker::default();
    for line in source.split_inclusive('\n') {
        chunker.push(line);
    }
    chunker.finish()
}
