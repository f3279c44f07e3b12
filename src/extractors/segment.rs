// src/extractors/segment.rs
use crate::extractors::line::{ClassifiedLine, LineKind};

/// Lines captured for one code block: the directive line followed by its body.
///
/// `lines[0]` is always a directive that opens a block. Trailing blank lines
/// before the terminating dedent (or end of input) are not part of the block.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RawBlock<'a> {
    pub start: usize, // 0-based index of the directive line
    pub language: Option<&'a str>,
    pub lines: Vec<ClassifiedLine<'a>>,
}

impl<'a> RawBlock<'a> {
    /// Lines after the directive.
    pub fn body(&self) -> &[ClassifiedLine<'a>] {
        self.lines.get(1..).unwrap_or(&[])
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum ScanState {
    BeforeBlock,
    InBlock {
        // Fixed by the first non-blank body line.
        body_indent: Option<usize>,
        // Last non-blank line that belongs to the block.
        last: usize,
    },
    Terminated { last: usize },
}

/// Splits classified lines into raw blocks, one per selected directive, in document order.
pub fn segment<'a>(lines: &[ClassifiedLine<'a>]) -> Vec<RawBlock<'a>> {
    let openers: Vec<usize> = lines
        .iter()
        .enumerate()
        .filter(|(_, line)| line.opens_block())
        .map(|(pos, _)| pos)
        .collect();

    tracing::trace!("Found {} directive lines at positions {:?}", openers.len(), openers);

    openers
        .into_iter()
        .map(|pos| {
            let last = scan_block(lines, pos);
            let opener = &lines[pos];
            let language = match opener.kind {
                LineKind::Directive { language, .. } => language,
                _ => None,
            };
            RawBlock { start: opener.index, language, lines: lines[pos..=last].to_vec() }
        })
        .collect()
}

/// Walks forward from the directive at position `start` and returns the position
/// of the block's last line (the directive itself when the block has no body).
fn scan_block(lines: &[ClassifiedLine<'_>], start: usize) -> usize {
    let opener_indent = lines[start].indent;
    let mut state = ScanState::BeforeBlock;

    for (pos, line) in lines.iter().enumerate().skip(start) {
        state = match state {
            ScanState::BeforeBlock => ScanState::InBlock { body_indent: None, last: pos },
            ScanState::InBlock { .. } if line.blank => state,
            ScanState::InBlock { body_indent: None, last } => {
                // Body lines must sit deeper than the directive itself.
                if line.indent > opener_indent {
                    ScanState::InBlock { body_indent: Some(line.indent), last: pos }
                } else {
                    ScanState::Terminated { last }
                }
            }
            ScanState::InBlock { body_indent: Some(indent), last } => {
                if line.indent < indent {
                    ScanState::Terminated { last }
                } else {
                    ScanState::InBlock { body_indent: Some(indent), last: pos }
                }
            }
            ScanState::Terminated { .. } => break,
        };

        if let ScanState::Terminated { .. } = state {
            break;
        }
    }

    match state {
        ScanState::InBlock { last, .. } | ScanState::Terminated { last } => last,
        ScanState::BeforeBlock => start,
    }
}
