//! # huffpack
//!
//! Lossless text compression with static Huffman coding.
//!
//! A compressed file is self-describing: a small header holds the code table
//! (symbol keys and their `0`/`1` codes), followed by the padding length and
//! the bit-packed payload.
//!
//! ```no_run
//! // Compress a file, then restore it
//! assert!(huffpack::encode("story.txt", "story.huff"));
//! assert!(huffpack::decode("story.huff", "story_.txt"));
//! ```
//!
//! In-memory use goes through [`compress`] and [`decompress`]:
//!
//! ```
//! let packed = huffpack::compress(b"aaaabbbccd")?.to_bytes()?;
//! assert_eq!(huffpack::decompress(&packed)?, b"aaaabbbccd");
//! # Ok::<(), huffpack::HuffError>(())
//! ```

pub mod bits;
pub mod code_table;
pub mod codec;
pub mod container;
pub mod error;
pub mod frequency;
pub mod report;
pub mod tree;

pub use code_table::{Code, CodeTable};
pub use codec::{compress, decode, decode_file, decompress, encode, encode_file};
pub use container::Container;
pub use error::HuffError;
pub use frequency::FrequencyMap;
pub use report::CodecReport;
pub use tree::{HuffNode, HuffmanTree};
