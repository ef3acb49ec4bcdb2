//! On-disk layout of a compressed file.
//!
//! ```text
//! offset  size       field
//! 0       1          table size N (1..=255)
//! 1       N          symbol keys, one byte each, in table order
//! 1+N     variable   N codes as ASCII '0'/'1', each terminated by '|'
//! ...     1          padding length P (0..=7)
//! ...     remaining  packed payload, P trailing zero bits
//! ```

use std::io::Write;

use tracing::debug;

use crate::bits::{self, PackedBits};
use crate::code_table::{Code, CodeTable};
use crate::error::{HuffError, Result};

pub const DELIMITER: u8 = b'|';

/// A parsed or freshly built compressed file.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Container {
    pub table: CodeTable,
    pub payload: PackedBits,
}

impl Container {
    pub fn new(table: CodeTable, payload: PackedBits) -> Self {
        Container { table, payload }
    }

    pub fn write_to<W: Write>(&self, writer: &mut W) -> Result<()> {
        writer.write_all(&[self.table.len() as u8])?;
        for (symbol, _) in self.table.iter() {
            writer.write_all(&[symbol])?;
        }
        for (_, code) in self.table.iter() {
            writer.write_all(&code.to_ascii())?;
            writer.write_all(&[DELIMITER])?;
        }
        writer.write_all(&self.payload.to_bytes())?;
        Ok(())
    }

    pub fn to_bytes(&self) -> Result<Vec<u8>> {
        let mut out = Vec::new();
        self.write_to(&mut out)?;
        Ok(out)
    }

    /// Splits `data` into code table and payload, validating the header.
    pub fn parse(data: &[u8]) -> Result<Self> {
        let (&size, rest) = data
            .split_first()
            .ok_or_else(|| HuffError::header("missing table size"))?;
        let size = size as usize;
        if size == 0 {
            return Err(HuffError::header("empty code table"));
        }
        if rest.len() < size {
            return Err(HuffError::header(format!(
                "table declares {size} keys but only {} bytes follow",
                rest.len()
            )));
        }
        let (keys, mut rest) = rest.split_at(size);

        let mut entries = Vec::with_capacity(size);
        for &key in keys {
            let end = rest.iter().position(|&b| b == DELIMITER).ok_or_else(|| {
                HuffError::header(format!(
                    "found {} of {size} code entries before the data ran out",
                    entries.len()
                ))
            })?;
            let code = Code::from_ascii(&rest[..end]).ok_or_else(|| {
                HuffError::header(format!("code for key {key:#04x} is not binary"))
            })?;
            entries.push((key, code));
            rest = &rest[end + 1..];
        }
        let table = CodeTable::from_entries(entries)?;

        let (&padding, payload) = rest
            .split_first()
            .ok_or_else(|| HuffError::header("missing padding field"))?;

        debug!(
            table_size = table.len(),
            padding,
            payload_bytes = payload.len(),
            "parsed container header"
        );
        Ok(Container {
            table,
            payload: PackedBits {
                padding,
                bytes: payload.to_vec(),
            },
        })
    }

    /// Strips the padding and resolves the bit stream back into symbols.
    pub fn decode_payload(&self) -> Result<Vec<u8>> {
        let stream = bits::unpack(&self.payload.bytes, self.payload.padding)?;
        decode_bits(&self.table, &stream)
    }
}

/// Greedy left-to-right match: grow a candidate one bit at a time until it is
/// a known code, emit that symbol and start over.
///
/// Leftover bits that never complete a code are an error, not dropped.
pub fn decode_bits(table: &CodeTable, stream: &[bool]) -> Result<Vec<u8>> {
    let lookup = table.decoding_map();
    let max_len = table.max_code_len();

    let mut out = Vec::new();
    let mut start = 0;
    for end in 1..=stream.len() {
        if let Some(&symbol) = lookup.get(&stream[start..end]) {
            out.push(symbol);
            start = end;
        } else if end - start >= max_len {
            return Err(HuffError::payload(format!(
                "no code matches the bits at offset {start}"
            )));
        }
    }
    if start != stream.len() {
        return Err(HuffError::payload(format!(
            "{} trailing bits do not form a code",
            stream.len() - start
        )));
    }
    Ok(out)
}
