use crate::analysis;
use crate::bit_vec::BitVec;
use crate::code_table::CodeTable;
use crate::error::{HuffmanError, Result};
use crate::frequency::FrequencyTable;
use crate::hufftree::{HuffNode, HuffmanTree};
use crate::Symbol;

/// Concatenates the code of every symbol.
pub fn encode<I>(symbols: I, table: &CodeTable) -> Result<BitVec>
where
    I: IntoIterator<Item = Symbol>,
{
    let mut bit_vec = BitVec::new();
    for symbol in symbols {
        let code = table
            .get(symbol)
            .ok_or(HuffmanError::UnknownSymbol(symbol))?;
        bit_vec.extend_from(code);
    }
    Ok(bit_vec)
}

/// Walks the tree bit by bit, emitting a symbol at every leaf and starting
/// over from the root.
pub fn decode(bits: &BitVec, tree: &HuffmanTree) -> Result<Vec<Symbol>> {
    let root = tree.root();

    // single leaf: every code is the one bit `0`
    if let HuffNode::Leaf { symbol, .. } = root {
        return bits
            .iter()
            .enumerate()
            .map(|(position, bit)| {
                if bit {
                    Err(HuffmanError::InvalidPath { position })
                } else {
                    Ok(*symbol)
                }
            })
            .collect();
    }

    let mut result = Vec::new();
    let mut current_node = root;
    let mut mid_code = false;

    for (position, bit) in bits.iter().enumerate() {
        let next = match current_node {
            HuffNode::Internal { left, right, .. } => {
                if bit {
                    right
                } else {
                    left
                }
            }
            HuffNode::Leaf { .. } => return Err(HuffmanError::InvalidPath { position }),
        };

        match &**next {
            HuffNode::Leaf { symbol, .. } => {
                result.push(*symbol);
                current_node = root;
                mid_code = false;
            }
            internal => {
                current_node = internal;
                mid_code = true;
            }
        }
    }

    if mid_code {
        return Err(HuffmanError::TruncatedStream {
            consumed: bits.len(),
        });
    }

    Ok(result)
}

/// A tree paired with the code table derived from it.
#[derive(Debug, Clone)]
pub struct HuffmanCodec {
    tree: HuffmanTree,
    table: CodeTable,
}

impl HuffmanCodec {
    pub fn new(tree: HuffmanTree) -> Result<Self> {
        let table = tree.code_table()?;
        Ok(HuffmanCodec { tree, table })
    }

    pub fn from_frequencies(frequencies: &FrequencyTable) -> Result<Self> {
        Self::new(HuffmanTree::from_frequencies(frequencies)?)
    }

    pub fn from_text(text: &str) -> Result<Self> {
        Self::from_frequencies(&FrequencyTable::from_text(text))
    }

    pub fn tree(&self) -> &HuffmanTree {
        &self.tree
    }

    pub fn table(&self) -> &CodeTable {
        &self.table
    }

    pub fn encode<I>(&self, symbols: I) -> Result<BitVec>
    where
        I: IntoIterator<Item = Symbol>,
    {
        encode(symbols, &self.table)
    }

    pub fn encode_str(&self, text: &str) -> Result<BitVec> {
        encode(text.chars(), &self.table)
    }

    pub fn decode(&self, bits: &BitVec) -> Result<Vec<Symbol>> {
        decode(bits, &self.tree)
    }

    pub fn decode_to_string(&self, bits: &BitVec) -> Result<String> {
        Ok(self.decode(bits)?.into_iter().collect())
    }

    /// Encodes and decodes `text`, reporting whether it came back unchanged.
    pub fn verify(&self, text: &str) -> Result<bool> {
        let encoded = self.encode_str(text)?;
        Ok(self.decode_to_string(&encoded)? == text)
    }

    pub fn encoded_bit_length(&self, frequencies: &FrequencyTable) -> Result<u64> {
        analysis::encoded_bit_length(frequencies, &self.table)
    }
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn test_text_roundtrip() {
        let text = "Huffman encoding is a greedy algorithm that builds optimal prefix codes.\n";
        let codec = HuffmanCodec::from_text(text).unwrap();
        let encoded = codec.encode_str(text).unwrap();
        assert_eq!(codec.decode_to_string(&encoded).unwrap(), text);
        assert!(codec.verify(text).unwrap());
    }

    #[test]
    fn test_encode_concatenates_codes() {
        let codec = HuffmanCodec::from_text("abb").unwrap();
        let encoded = codec.encode_str("abba").unwrap();
        assert_eq!(encoded.to_string(), "0110");
    }

    #[test]
    fn test_unknown_symbol() {
        let codec = HuffmanCodec::from_text("abc").unwrap();
        let err = codec.encode_str("abd").unwrap_err();
        assert!(matches!(err, HuffmanError::UnknownSymbol('d')));
    }

    #[test]
    fn test_single_symbol_stream() {
        let codec = HuffmanCodec::from_text("x").unwrap();
        let encoded = codec.encode("xxx".chars()).unwrap();
        assert_eq!(encoded.to_string(), "000");
        assert_eq!(codec.decode(&encoded).unwrap(), vec!['x', 'x', 'x']);

        let bad: BitVec = "001".parse().unwrap();
        assert!(matches!(
            codec.decode(&bad),
            Err(HuffmanError::InvalidPath { position: 2 })
        ));
    }

    #[test]
    fn test_truncated_stream() {
        let freqs: FrequencyTable = [('a', 5), ('b', 2), ('c', 3)].into_iter().collect();
        let codec = HuffmanCodec::from_frequencies(&freqs).unwrap();
        let mut encoded = codec.encode_str("abcab").unwrap();
        let last_code_len = codec.table().code_len('b').unwrap();
        assert!(last_code_len > 1);
        encoded.pop_bit();
        let err = codec.decode(&encoded).unwrap_err();
        assert!(matches!(err, HuffmanError::TruncatedStream { .. }));
    }

    #[test]
    fn test_empty_stream_decodes_to_nothing() {
        let codec = HuffmanCodec::from_text("abc").unwrap();
        assert!(codec.decode(&BitVec::new()).unwrap().is_empty());
        assert!(codec.encode_str("").unwrap().is_empty());
    }

    #[test]
    fn test_zero_weight_symbol_still_encodes() {
        let mut freqs = FrequencyTable::from_text("aaaaabbc");
        freqs.extend_missing(&FrequencyTable::from_text("z"));
        let codec = HuffmanCodec::from_frequencies(&freqs).unwrap();
        let encoded = codec.encode_str("zaz").unwrap();
        assert_eq!(codec.decode_to_string(&encoded).unwrap(), "zaz");
    }
}
