use bitstream_io::{BigEndian, BitRead, BitReader, BitWrite, BitWriter};

use crate::code_table::CodeTable;
use crate::error::{HuffError, Result};

/// Zero bits needed to bring `bit_len` up to a byte boundary.
///
/// A stream that is already aligned needs 0, never 8.
pub fn padding_for(bit_len: usize) -> u8 {
    ((8 - bit_len % 8) % 8) as u8
}

/// A byte-aligned bit stream plus the number of trailing pad bits.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PackedBits {
    pub padding: u8,
    pub bytes: Vec<u8>,
}

impl PackedBits {
    /// Number of meaningful bits, padding excluded.
    pub fn bit_len(&self) -> usize {
        (self.bytes.len() * 8).saturating_sub(self.padding as usize)
    }

    /// Wire form: the padding field followed by the packed bytes.
    pub fn to_bytes(&self) -> Vec<u8> {
        let mut out = Vec::with_capacity(self.bytes.len() + 1);
        out.push(self.padding);
        out.extend_from_slice(&self.bytes);
        out
    }
}

fn pack_with<F>(fill: F) -> Result<PackedBits>
where
    F: FnOnce(&mut BitWriter<&mut Vec<u8>, BigEndian>) -> Result<usize>,
{
    let mut bytes = Vec::new();
    let bit_len = {
        let mut writer = BitWriter::endian(&mut bytes, BigEndian);
        let bit_len = fill(&mut writer)?;
        writer.byte_align()?;
        bit_len
    };
    Ok(PackedBits {
        padding: padding_for(bit_len),
        bytes,
    })
}

/// Packs a raw bit sequence, most significant bit first.
pub fn pack_bits(bits: &[bool]) -> Result<PackedBits> {
    pack_with(|writer| {
        for &bit in bits {
            writer.write_bit(bit)?;
        }
        Ok(bits.len())
    })
}

/// Concatenates the code of every byte of `data`, in order.
pub fn pack_symbols(table: &CodeTable, data: &[u8]) -> Result<PackedBits> {
    pack_with(|writer| {
        let mut bit_len = 0;
        for &symbol in data {
            let code = table.get(symbol).ok_or(HuffError::MissingCode(symbol))?;
            for &bit in code.bits() {
                writer.write_bit(bit)?;
            }
            bit_len += code.len();
        }
        Ok(bit_len)
    })
}

/// Reads `bytes` back into bits and strips `padding` trailing bits.
///
/// The padding must be at most 7, must fit inside the payload and must be
/// all zeros; anything else is a corrupted payload.
pub fn unpack(bytes: &[u8], padding: u8) -> Result<Vec<bool>> {
    if padding > 7 {
        return Err(HuffError::payload(format!("padding length {padding} exceeds 7")));
    }
    if padding > 0 && bytes.is_empty() {
        return Err(HuffError::payload(format!(
            "padding length {padding} declared for an empty payload"
        )));
    }

    let bit_len = bytes.len() * 8 - padding as usize;
    let mut reader = BitReader::endian(bytes, BigEndian);
    let mut bits = Vec::with_capacity(bit_len);
    for _ in 0..bit_len {
        bits.push(reader.read_bit()?);
    }
    for _ in 0..padding {
        if reader.read_bit()? {
            return Err(HuffError::payload("non-zero padding bit"));
        }
    }
    Ok(bits)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn bits(digits: &str) -> Vec<bool> {
        digits.chars().map(|c| c == '1').collect()
    }

    #[test]
    fn short_stream_is_padded() {
        let packed = pack_bits(&bits("101")).unwrap();
        assert_eq!(packed.padding, 5);
        assert_eq!(packed.bytes, vec![0b1010_0000]);
        assert_eq!(packed.bit_len(), 3);
        assert_eq!(unpack(&packed.bytes, packed.padding).unwrap(), bits("101"));
    }

    #[test]
    fn aligned_stream_needs_no_padding() {
        let packed = pack_bits(&bits("10101010")).unwrap();
        assert_eq!(packed.padding, 0);
        assert_eq!(packed.bytes, vec![0xAA]);
        assert_eq!(packed.to_bytes(), vec![0, 0xAA]);
    }

    #[test]
    fn padding_never_reaches_eight() {
        for len in 0..64 {
            let pad = padding_for(len);
            assert!(pad <= 7);
            assert_eq!((len + pad as usize) % 8, 0);
        }
    }

    #[test]
    fn spans_multiple_bytes() {
        let stream = bits("1111000011");
        let packed = pack_bits(&stream).unwrap();
        assert_eq!(packed.bytes, vec![0xF0, 0b1100_0000]);
        assert_eq!(packed.padding, 6);
        assert_eq!(unpack(&packed.bytes, packed.padding).unwrap(), stream);
    }

    #[test]
    fn rejects_oversized_padding() {
        assert!(matches!(unpack(&[0xFF], 8), Err(HuffError::CorruptedPayload(_))));
    }

    #[test]
    fn rejects_padding_without_payload() {
        assert!(matches!(unpack(&[], 3), Err(HuffError::CorruptedPayload(_))));
        assert_eq!(unpack(&[], 0).unwrap(), Vec::<bool>::new());
    }

    #[test]
    fn rejects_set_padding_bits() {
        assert!(matches!(unpack(&[0b1010_0001], 5), Err(HuffError::CorruptedPayload(_))));
    }
}
