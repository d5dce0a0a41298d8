use std::collections::HashMap;

use serde::{Serialize, Serializer};

use crate::bit_vec::BitVec;
use crate::error::{HuffmanError, Result};
use crate::hufftree::HuffNode;
use crate::Symbol;

/// Symbol to code mapping derived from a tree. `0` is a step to the left
/// child, `1` a step to the right.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CodeTable {
    codes: HashMap<Symbol, BitVec>,
}

/// Walks the tree from `root` and records the path to every leaf.
///
/// A tree that is a single leaf gets the code `0`: an empty code would give
/// the decoder nothing to consume.
pub fn derive(root: &HuffNode) -> Result<CodeTable> {
    let mut codes = HashMap::new();

    if let HuffNode::Leaf { symbol, .. } = root {
        codes.insert(*symbol, BitVec::from_iter([false]));
        return Ok(CodeTable { codes });
    }

    let mut stack = vec![(root, BitVec::new())];
    while let Some((node, path)) = stack.pop() {
        match node {
            HuffNode::Leaf { symbol, .. } => {
                if codes.insert(*symbol, path).is_some() {
                    return Err(HuffmanError::MalformedTree(format!(
                        "symbol {symbol:?} appears in more than one leaf"
                    )));
                }
            }
            HuffNode::Internal { left, right, .. } => {
                let mut right_path = path.clone();
                right_path.push_bit(true);
                let mut left_path = path;
                left_path.push_bit(false);

                stack.push((&**right, right_path));
                stack.push((&**left, left_path));
            }
        }
    }

    Ok(CodeTable { codes })
}

impl CodeTable {
    pub fn get(&self, symbol: Symbol) -> Option<&BitVec> {
        self.codes.get(&symbol)
    }

    pub fn code_len(&self, symbol: Symbol) -> Option<usize> {
        self.codes.get(&symbol).map(BitVec::len)
    }

    pub fn contains(&self, symbol: Symbol) -> bool {
        self.codes.contains_key(&symbol)
    }

    pub fn len(&self) -> usize {
        self.codes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.codes.is_empty()
    }

    /// Entries in no particular order.
    pub fn iter(&self) -> impl Iterator<Item = (Symbol, &BitVec)> + '_ {
        self.codes.iter().map(|(&symbol, code)| (symbol, code))
    }

    pub fn max_code_length(&self) -> usize {
        self.codes.values().map(BitVec::len).max().unwrap_or(0)
    }

    /// No code is a prefix of another.
    pub fn is_prefix_free(&self) -> bool {
        // after sorting, any prefix sits directly before one of its extensions
        let mut codes: Vec<String> = self.codes.values().map(BitVec::to_string).collect();
        codes.sort_unstable();
        codes.windows(2).all(|pair| !pair[1].starts_with(&pair[0]))
    }

    fn sorted(&self) -> Vec<(Symbol, &BitVec)> {
        let mut entries: Vec<_> = self.iter().collect();
        entries.sort_unstable_by_key(|&(symbol, _)| symbol);
        entries
    }
}

impl FromIterator<(Symbol, BitVec)> for CodeTable {
    fn from_iter<I: IntoIterator<Item = (Symbol, BitVec)>>(iter: I) -> Self {
        CodeTable {
            codes: iter.into_iter().collect(),
        }
    }
}

impl Serialize for CodeTable {
    fn serialize<S: Serializer>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error> {
        serializer.collect_map(self.sorted())
    }
}

#[cfg(test)]
mod test {
    use super::*;
    use crate::frequency::FrequencyTable;
    use crate::hufftree::HuffmanTree;

    fn code(bits: &str) -> BitVec {
        bits.parse().unwrap()
    }

    #[test]
    fn test_lone_leaf_gets_zero() {
        let table = derive(&HuffNode::new('x', 12)).unwrap();
        assert_eq!(table.len(), 1);
        assert_eq!(table.get('x'), Some(&code("0")));
    }

    #[test]
    fn test_two_symbols_get_one_bit_each() {
        let table = HuffmanTree::from_text("abb").unwrap().code_table().unwrap();
        assert_eq!(table.get('a'), Some(&code("0")));
        assert_eq!(table.get('b'), Some(&code("1")));
    }

    #[test]
    fn test_paths_follow_branches() {
        let root = HuffNode::merge(
            HuffNode::new('a', 5),
            HuffNode::merge(HuffNode::new('b', 2), HuffNode::new('c', 3)).unwrap(),
        )
        .unwrap();
        let table = derive(&root).unwrap();
        assert_eq!(table.get('a'), Some(&code("0")));
        assert_eq!(table.get('b'), Some(&code("10")));
        assert_eq!(table.get('c'), Some(&code("11")));
        assert_eq!(table.max_code_length(), 2);
        assert!(table.is_prefix_free());
    }

    #[test]
    fn test_duplicate_leaf_is_malformed() {
        let root = HuffNode::merge(HuffNode::new('a', 1), HuffNode::new('a', 1)).unwrap();
        assert!(matches!(derive(&root), Err(HuffmanError::MalformedTree(_))));
    }

    #[test]
    fn test_prefix_check_detects_clash() {
        let table: CodeTable = [('a', code("01")), ('b', code("011")), ('c', code("1"))]
            .into_iter()
            .collect();
        assert!(!table.is_prefix_free());
    }

    #[test]
    fn test_serializes_sorted_strings() {
        let freqs: FrequencyTable = [('b', 1), ('a', 2)].into_iter().collect();
        let table = HuffmanTree::from_frequencies(&freqs).unwrap().code_table().unwrap();
        let json = serde_json::to_string(&table).unwrap();
        assert_eq!(json, r#"{"a":"1","b":"0"}"#);
    }
}
