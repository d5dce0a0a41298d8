use std::collections::HashSet;

use serde::{Deserialize, Serialize};

use crate::code_table::{self, CodeTable};
use crate::error::{HuffmanError, Result};
use crate::frequency::FrequencyTable;
use crate::min_heap::PriorityQueue;
use crate::Symbol;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "lowercase")]
pub enum HuffNode {
    Leaf {
        symbol: Symbol,
        weight: u64,
    },
    Internal {
        weight: u64,
        left: Box<HuffNode>,
        right: Box<HuffNode>,
    },
}

impl HuffNode {
    pub fn new(symbol: Symbol, weight: u64) -> Self {
        HuffNode::Leaf { symbol, weight }
    }

    pub fn weight(&self) -> u64 {
        match self {
            HuffNode::Leaf { weight, .. } => *weight,
            HuffNode::Internal { weight, .. } => *weight,
        }
    }

    pub fn symbol(&self) -> Option<Symbol> {
        match self {
            HuffNode::Leaf { symbol, .. } => Some(*symbol),
            HuffNode::Internal { .. } => None,
        }
    }

    pub fn is_leaf(&self) -> bool {
        matches!(self, HuffNode::Leaf { .. })
    }

    pub fn children(&self) -> Option<(&HuffNode, &HuffNode)> {
        match self {
            HuffNode::Leaf { .. } => None,
            HuffNode::Internal { left, right, .. } => Some((&**left, &**right)),
        }
    }

    /// Joins two subtrees under a new internal node; `a` goes left.
    pub fn merge(a: Self, b: Self) -> Result<Self> {
        let weight = a
            .weight()
            .checked_add(b.weight())
            .ok_or(HuffmanError::Overflow)?;
        Ok(HuffNode::Internal {
            weight,
            left: Box::new(a),
            right: Box::new(b),
        })
    }
}

/// Depth-first, left-before-right walk yielding each node with its depth.
pub struct Preorder<'a> {
    stack: Vec<(&'a HuffNode, usize)>,
}

impl<'a> Iterator for Preorder<'a> {
    type Item = (&'a HuffNode, usize);

    fn next(&mut self) -> Option<Self::Item> {
        let (node, depth) = self.stack.pop()?;
        if let Some((left, right)) = node.children() {
            self.stack.push((right, depth + 1));
            self.stack.push((left, depth + 1));
        }
        Some((node, depth))
    }
}

/// A built Huffman tree. Always holds at least one leaf.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct HuffmanTree {
    root: HuffNode,
}

/// Builds the tree for `frequencies` together with its code table.
pub fn build(frequencies: &FrequencyTable) -> Result<(CodeTable, HuffmanTree)> {
    let tree = HuffmanTree::from_frequencies(frequencies)?;
    let table = tree.code_table()?;
    Ok((table, tree))
}

impl HuffmanTree {
    pub fn from_text(text: &str) -> Result<Self> {
        Self::from_frequencies(&FrequencyTable::from_text(text))
    }

    /// Seeds the queue with one leaf per symbol, in table order, and merges
    /// the two lightest items until one remains. Zero counts are kept and
    /// get a code like any other symbol.
    pub fn from_frequencies(frequencies: &FrequencyTable) -> Result<Self> {
        if frequencies.is_empty() {
            return Err(HuffmanError::EmptyInput);
        }
        let queue: PriorityQueue<HuffNode> = frequencies
            .iter()
            .map(|(symbol, count)| (HuffNode::new(symbol, count), count))
            .collect();
        Self::build_from_queue(queue)
    }

    fn build_from_queue(mut queue: PriorityQueue<HuffNode>) -> Result<Self> {
        loop {
            let (first, _) = queue.pop_min().ok_or(HuffmanError::EmptyInput)?;
            let Some((second, _)) = queue.pop_min() else {
                return Ok(HuffmanTree { root: first });
            };
            let merged = HuffNode::merge(first, second)?;
            let weight = merged.weight();
            queue.push(merged, weight);
        }
    }

    /// Adopts a tree built elsewhere (e.g. read back from a snapshot) after
    /// checking that weights add up and no symbol sits in two leaves.
    pub fn from_root(root: HuffNode) -> Result<Self> {
        let tree = HuffmanTree { root };
        let mut seen = HashSet::new();
        for (node, _) in tree.preorder() {
            match node {
                HuffNode::Leaf { symbol, .. } => {
                    if !seen.insert(*symbol) {
                        return Err(HuffmanError::MalformedTree(format!(
                            "symbol {symbol:?} appears in more than one leaf"
                        )));
                    }
                }
                HuffNode::Internal {
                    weight,
                    left,
                    right,
                } => {
                    if left.weight().checked_add(right.weight()) != Some(*weight) {
                        return Err(HuffmanError::MalformedTree(format!(
                            "internal weight {weight} is not {} + {}",
                            left.weight(),
                            right.weight()
                        )));
                    }
                }
            }
        }
        Ok(tree)
    }

    pub fn root(&self) -> &HuffNode {
        &self.root
    }

    /// Total weight of all leaves.
    pub fn weight(&self) -> u64 {
        self.root.weight()
    }

    pub fn preorder(&self) -> Preorder<'_> {
        Preorder {
            stack: vec![(&self.root, 0)],
        }
    }

    pub fn leaf_count(&self) -> usize {
        self.preorder().filter(|(node, _)| node.is_leaf()).count()
    }

    /// Length of the longest root-to-leaf path; 0 for a lone leaf.
    pub fn depth(&self) -> usize {
        self.preorder().map(|(_, depth)| depth).max().unwrap_or(0)
    }

    /// Leaf weights, left to right.
    pub fn frequencies(&self) -> FrequencyTable {
        self.preorder()
            .filter_map(|(node, _)| node.symbol().map(|symbol| (symbol, node.weight())))
            .collect()
    }

    pub fn is_weight_consistent(&self) -> bool {
        self.preorder().all(|(node, _)| match node.children() {
            Some((left, right)) => left.weight().checked_add(right.weight()) == Some(node.weight()),
            None => true,
        })
    }

    pub fn code_table(&self) -> Result<CodeTable> {
        code_table::derive(&self.root)
    }
}

impl Drop for HuffmanTree {
    // Unlinks nodes one at a time; the derived drop glue would recurse once
    // per level.
    fn drop(&mut self) {
        let root = std::mem::replace(&mut self.root, HuffNode::new('\0', 0));
        let mut stack = vec![root];
        while let Some(node) = stack.pop() {
            if let HuffNode::Internal { left, right, .. } = node {
                stack.push(*left);
                stack.push(*right);
            }
        }
    }
}
