use std::fs;
use std::io::{self, BufWriter, Write};
use std::path::Path;

use tempfile::NamedTempFile;
use tracing::{debug, info, warn};

use crate::bits;
use crate::code_table::CodeTable;
use crate::container::Container;
use crate::error::{HuffError, Result};
use crate::frequency::FrequencyMap;
use crate::report::{CodecReport, Operation};
use crate::tree::HuffmanTree;

/// Builds a container for `data`. Every table is fresh per call.
pub fn compress(data: &[u8]) -> Result<Container> {
    let freqs = FrequencyMap::count(data)?;
    let tree = HuffmanTree::from_frequencies(&freqs)?;
    let table = CodeTable::from_tree(&tree)?;
    let payload = bits::pack_symbols(&table, data)?;

    debug!(
        symbols = table.len(),
        bits = payload.bit_len(),
        padding = payload.padding,
        "packed payload"
    );
    Ok(Container::new(table, payload))
}

/// Parses a container and returns the original bytes.
pub fn decompress(data: &[u8]) -> Result<Vec<u8>> {
    Container::parse(data)?.decode_payload()
}

fn read_input(path: &Path) -> Result<Vec<u8>> {
    fs::read(path).map_err(|e| match e.kind() {
        io::ErrorKind::NotFound => HuffError::NotFound(path.to_path_buf()),
        _ => HuffError::Io(e),
    })
}

// Stage in a temp file next to the destination, then persist over it. The
// temp file is removed on drop if anything fails before that.
fn write_output<F>(path: &Path, fill: F) -> Result<()>
where
    F: FnOnce(&mut dyn Write) -> Result<()>,
{
    let dir = match path.parent() {
        Some(parent) if !parent.as_os_str().is_empty() => parent,
        _ => Path::new("."),
    };
    let mut staged = NamedTempFile::new_in(dir)?;
    {
        let mut writer = BufWriter::new(staged.as_file_mut());
        fill(&mut writer)?;
        writer.flush()?;
    }
    staged.persist(path).map_err(|e| HuffError::Io(e.error))?;
    Ok(())
}

/// Compresses the file at `input` into `output`.
pub fn encode_file(input: &Path, output: &Path) -> Result<CodecReport> {
    let data = read_input(input)?;
    let container = compress(&data)?;
    let bytes = container.to_bytes()?;
    write_output(output, |w| Ok(w.write_all(&bytes)?))?;

    let mut report = CodecReport::new(Operation::Encode, input, output);
    report.input_bytes = data.len();
    report.output_bytes = bytes.len();
    report.table_size = container.table.len();
    report.padding_bits = container.payload.padding;
    Ok(report)
}

/// Restores the file at `input`, written by `encode_file`, into `output`.
pub fn decode_file(input: &Path, output: &Path) -> Result<CodecReport> {
    let data = read_input(input)?;
    let container = Container::parse(&data)?;
    let decoded = container.decode_payload()?;
    write_output(output, |w| Ok(w.write_all(&decoded)?))?;

    let mut report = CodecReport::new(Operation::Decode, input, output);
    report.input_bytes = data.len();
    report.output_bytes = decoded.len();
    report.table_size = container.table.len();
    report.padding_bits = container.payload.padding;
    Ok(report)
}

fn succeeded(outcome: Result<CodecReport>, operation: Operation, input: &Path) -> bool {
    match outcome {
        Ok(report) => {
            info!(
                %operation,
                input = %report.input,
                output = %report.output,
                input_bytes = report.input_bytes,
                output_bytes = report.output_bytes,
                "done"
            );
            true
        }
        Err(e) => {
            warn!(%operation, input = %input.display(), error = %e, "failed");
            false
        }
    }
}

/// `encode_file` reduced to success or failure; the error is logged.
pub fn encode<P: AsRef<Path>, Q: AsRef<Path>>(input: P, output: Q) -> bool {
    let input = input.as_ref();
    succeeded(encode_file(input, output.as_ref()), Operation::Encode, input)
}

/// `decode_file` reduced to success or failure; the error is logged.
pub fn decode<P: AsRef<Path>, Q: AsRef<Path>>(input: P, output: Q) -> bool {
    let input = input.as_ref();
    succeeded(decode_file(input, output.as_ref()), Operation::Decode, input)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn round_trips_text() {
        let text = "Huffman coding assigns short codes to frequent symbols.\n".repeat(20);
        let packed = compress(text.as_bytes()).unwrap().to_bytes().unwrap();
        assert!(packed.len() < text.len());
        assert_eq!(decompress(&packed).unwrap(), text.into_bytes());
    }

    #[test]
    fn round_trips_multibyte_text() {
        let text = "naïve café — 日本語 ✓";
        let packed = compress(text.as_bytes()).unwrap().to_bytes().unwrap();
        assert_eq!(decompress(&packed).unwrap(), text.as_bytes().to_vec());
    }

    #[test]
    fn single_symbol_round_trip() {
        let data = vec![b'x'; 13];
        let container = compress(&data).unwrap();
        assert_eq!(container.table.len(), 1);
        assert_eq!(container.payload.padding, 3);
        let packed = container.to_bytes().unwrap();
        assert_eq!(decompress(&packed).unwrap(), data);
    }

    #[test]
    fn empty_input_fails() {
        assert!(matches!(compress(b""), Err(HuffError::EmptyInput)));
    }

    #[test]
    fn full_table_round_trip() {
        // 255 distinct bytes, the first 20 with Fibonacci weights so the
        // rare end of the tree gets long codes.
        let mut weights = vec![1usize; 255];
        let (mut a, mut b) = (1, 2);
        for w in weights.iter_mut().take(20) {
            *w = a;
            (a, b) = (b, a + b);
        }
        let data: Vec<u8> = (0..255u8)
            .zip(&weights)
            .flat_map(|(symbol, &count)| std::iter::repeat_n(symbol, count))
            .collect();

        let container = compress(&data).unwrap();
        assert_eq!(container.table.len(), 255);
        assert!(container.table.max_code_len() > 8);

        let packed = container.to_bytes().unwrap();
        assert_eq!(packed[0], 255);
        assert_eq!(decompress(&packed).unwrap(), data);
    }

    #[test]
    fn encoding_is_deterministic() {
        let data = b"abracadabra, abracadabra";
        let first = compress(data).unwrap().to_bytes().unwrap();
        let second = compress(data).unwrap().to_bytes().unwrap();
        assert_eq!(first, second);
    }
}
