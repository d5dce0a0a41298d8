//! # huffman_text
//!
//! Static Huffman coding for text: count symbols, build the optimal prefix
//! code, encode and decode, and measure how many bits a text would take.
//!
//! ## Quick Start
//!
//! ```rust
//! use huffman_text::{FrequencyTable, HuffmanCodec};
//!
//! let text = "abracadabra";
//! let codec = HuffmanCodec::from_text(text)?;
//!
//! let bits = codec.encode_str(text)?;
//! assert_eq!(codec.decode_to_string(&bits)?, text);
//!
//! let estimate = codec.encoded_bit_length(&FrequencyTable::from_text(text))?;
//! assert_eq!(estimate, bits.len() as u64);
//! # Ok::<(), huffman_text::HuffmanError>(())
//! ```
//!
//! The library does no I/O and writes no logs; the `huffstat` binary wraps
//! it with file handling and reporting.

pub mod analysis;
pub mod bit_vec;
pub mod code_table;
pub mod codec;
pub mod error;
pub mod frequency;
pub mod hufftree;
pub mod min_heap;
pub mod render;
pub mod snapshot;

/// One indivisible unit of input text.
pub type Symbol = char;

pub use analysis::{encoded_bit_length, Comparison};
pub use bit_vec::BitVec;
pub use code_table::CodeTable;
pub use codec::{decode, encode, HuffmanCodec};
pub use error::{HuffmanError, Result};
pub use frequency::FrequencyTable;
pub use hufftree::{build, HuffNode, HuffmanTree};
