//! Bit codes derived from leaf paths of a [`HuffmanTree`].

use crate::frequency::FrequencyTable;
use crate::huffman::{HuffmanTree, Node, NodeId};
use std::fmt;

/// A single codeword: `false` is a left branch, `true` a right branch.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Default)]
pub struct Code(Vec<bool>);

impl Code {
    pub fn bits(&self) -> impl Iterator<Item = bool> + '_ {
        self.0.iter().copied()
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn is_prefix_of(&self, other: &Code) -> bool {
        other.0.starts_with(&self.0)
    }
}

impl fmt::Display for Code {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for &bit in &self.0 {
            f.write_str(if bit { "1" } else { "0" })?;
        }
        Ok(())
    }
}

/// Codeword for every symbol present in a tree, indexed by byte value.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CodeTable {
    codes: Vec<Option<Code>>,
}

impl CodeTable {
    pub fn from_tree(tree: &HuffmanTree) -> Self {
        let mut codes = vec![None; 256];
        match *tree.node(tree.root()) {
            // No branch to record for a lone leaf; it is coded as a single 0.
            Node::Leaf { symbol, .. } => codes[symbol as usize] = Some(Code(vec![false])),
            Node::Internal { .. } => assign(tree, tree.root(), &mut Vec::new(), &mut codes),
        }
        Self { codes }
    }

    pub fn get(&self, symbol: u8) -> Option<&Code> {
        self.codes[symbol as usize].as_ref()
    }

    /// Present symbols and their codes in ascending symbol order.
    pub fn iter(&self) -> impl Iterator<Item = (u8, &Code)> + '_ {
        self.codes
            .iter()
            .enumerate()
            .filter_map(|(s, c)| c.as_ref().map(|c| (s as u8, c)))
    }

    pub fn len(&self) -> usize {
        self.iter().count()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    pub fn max_code_len(&self) -> usize {
        self.iter().map(|(_, c)| c.len()).max().unwrap_or(0)
    }

    /// Exact size of the encoded body in bits, or `None` if it overflows.
    pub fn encoded_bits(&self, freq: &FrequencyTable) -> Option<u64> {
        freq.symbols().try_fold(0u64, |acc, (symbol, count)| {
            let len = self.get(symbol)?.len() as u64;
            acc.checked_add(count.checked_mul(len)?)
        })
    }
}

fn assign(tree: &HuffmanTree, id: NodeId, path: &mut Vec<bool>, codes: &mut [Option<Code>]) {
    match *tree.node(id) {
        Node::Leaf { symbol, .. } => codes[symbol as usize] = Some(Code(path.clone())),
        Node::Internal { left, right, .. } => {
            path.push(false);
            assign(tree, left, path, codes);
            path.pop();
            path.push(true);
            assign(tree, right, path, codes);
            path.pop();
        }
    }
}

#[cfg(test)]
impl Code {
    /// Build a code from a string of `0` and `1`.
    pub(crate) fn from_bit_str(s: &str) -> Self {
        Code(s.chars().map(|c| c == '1').collect())
    }
}
