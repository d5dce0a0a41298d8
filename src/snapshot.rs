//! JSON form of a code table and its tree.
//!
//! ```json
//! {
//!   "codes": { "a": "0", "b": "10", "c": "11" },
//!   "tree": { "kind": "internal", "weight": 6, "left": { .. }, "right": { .. } }
//! }
//! ```
//!
//! Only the tree is read back; codes are re-derived from it.

use serde::{Deserialize, Serialize};

use crate::code_table::CodeTable;
use crate::error::Result;
use crate::hufftree::{HuffNode, HuffmanTree};

#[derive(Serialize)]
struct Snapshot<'a> {
    codes: &'a CodeTable,
    tree: &'a HuffmanTree,
}

#[derive(Deserialize)]
struct StoredSnapshot {
    tree: HuffNode,
}

pub fn to_json_pretty(table: &CodeTable, tree: &HuffmanTree) -> Result<String> {
    Ok(serde_json::to_string_pretty(&Snapshot { codes: table, tree })?)
}

/// Reads the tree of a snapshot and checks its weights and leaf symbols.
///
/// `serde_json` stops at 128 levels of nesting, so trees deeper than that
/// cannot be loaded this way.
pub fn load_tree(json: &str) -> Result<HuffmanTree> {
    let stored: StoredSnapshot = serde_json::from_str(json)?;
    HuffmanTree::from_root(stored.tree)
}

pub fn load(json: &str) -> Result<(CodeTable, HuffmanTree)> {
    let tree = load_tree(json)?;
    let table = tree.code_table()?;
    Ok((table, tree))
}
