// src/extractors/assemble.rs
use crate::extractors::normalize::NormalizedBlock;

/// Joins blocks into the output layout:
///
/// ```text
/// Block 1:
/// <block 1 lines>
///
/// Block 2:
/// <block 2 lines>
/// ```
///
/// Labels are numbered from 1 in the order given. An empty block list gives an
/// empty string. `label_prefix` is prepended to every label (e.g. `"# "`).
pub fn assemble(blocks: &[NormalizedBlock], label_prefix: &str) -> String {
    let mut out = String::new();

    for (i, block) in blocks.iter().enumerate() {
        if i > 0 {
            out.push('\n'); // exactly one blank line between blocks
        }
        out.push_str(&format!("{}Block {}:\n", label_prefix, i + 1));
        for line in &block.lines {
            out.push_str(line);
            out.push('\n');
        }
    }

    collapse_trailing_blank_lines(out)
}

// The output never ends with two or more blank lines.
fn collapse_trailing_blank_lines(mut out: String) -> String {
    while out.ends_with("\n\n\n") {
        out.pop();
    }
    out
}
