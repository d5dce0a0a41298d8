//! Plain-text drawing of a tree, one node per line.

use std::fmt::Write;

use crate::code_table::CodeTable;
use crate::hufftree::{HuffNode, HuffmanTree};
use crate::Symbol;

const INTERNAL_MARK: &str = "🞄";

/// Printable name for a symbol; whitespace and control characters are
/// spelled out so every leaf label is visible on one line.
pub fn symbol_label(symbol: Symbol) -> String {
    match symbol {
        '\n' => "LF".to_string(),
        '\r' => "CR".to_string(),
        ' ' => "SP".to_string(),
        c if c.is_control() => c.escape_default().to_string(),
        c => c.to_string(),
    }
}

/// Draws `tree` depth first, left child before right:
///
/// ```text
/// ├── 🞄 (4)
/// │   ├── a (2, 0)
/// │   └── 🞄 (2)
/// │       ├── b (1, 10)
/// │       └── SP (1, 11)
/// ```
///
/// Leaves also show their code from `table` when it has one.
pub fn visualize(tree: &HuffmanTree, table: &CodeTable) -> String {
    let mut out = String::new();
    let mut stack: Vec<(&HuffNode, String, bool)> = vec![(tree.root(), String::new(), true)];

    while let Some((node, prefix, is_left)) = stack.pop() {
        let branch = if is_left { "├── " } else { "└── " };
        let _ = match node {
            HuffNode::Leaf { symbol, weight } => match table.get(*symbol) {
                Some(code) => writeln!(
                    out,
                    "{prefix}{branch}{} ({weight}, {code})",
                    symbol_label(*symbol)
                ),
                None => writeln!(out, "{prefix}{branch}{} ({weight})", symbol_label(*symbol)),
            },
            HuffNode::Internal { weight, .. } => {
                writeln!(out, "{prefix}{branch}{INTERNAL_MARK} ({weight})")
            }
        };

        if let Some((left, right)) = node.children() {
            let child_prefix = format!("{prefix}{}", if is_left { "│   " } else { "    " });
            stack.push((right, child_prefix.clone(), false));
            stack.push((left, child_prefix, true));
        }
    }

    out
}
