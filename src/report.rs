use std::fmt;
use std::path::Path;

use chrono::Utc;
use serde::Serialize;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Operation {
    Encode,
    Decode,
}

impl fmt::Display for Operation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Operation::Encode => f.write_str("encode"),
            Operation::Decode => f.write_str("decode"),
        }
    }
}

/// Summary of one finished file operation.
#[derive(Debug, Clone, Serialize)]
pub struct CodecReport {
    pub timestamp: String,
    pub operation: Operation,
    pub input: String,
    pub output: String,
    pub input_bytes: usize,
    pub output_bytes: usize,
    pub table_size: usize,
    pub padding_bits: u8,
}

impl CodecReport {
    pub fn new(operation: Operation, input: &Path, output: &Path) -> Self {
        CodecReport {
            timestamp: Utc::now().to_rfc3339(),
            operation,
            input: input.display().to_string(),
            output: output.display().to_string(),
            input_bytes: 0,
            output_bytes: 0,
            table_size: 0,
            padding_bits: 0,
        }
    }

    /// Compressed size over plain size, whichever direction this ran.
    pub fn ratio(&self) -> f64 {
        let (packed, plain) = match self.operation {
            Operation::Encode => (self.output_bytes, self.input_bytes),
            Operation::Decode => (self.input_bytes, self.output_bytes),
        };
        if plain == 0 {
            return 0.0;
        }
        packed as f64 / plain as f64
    }

    pub fn to_json(&self) -> serde_json::Result<String> {
        serde_json::to_string(self)
    }
}

impl fmt::Display for CodecReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} {} ({}) -> {} ({}), {} codes, {:.1}% of original",
            self.operation,
            self.input,
            ByteSize(self.input_bytes),
            self.output,
            ByteSize(self.output_bytes),
            self.table_size,
            self.ratio() * 100.0
        )
    }
}

/// Byte count shown in binary units, two decimals.
struct ByteSize(usize);

impl fmt::Display for ByteSize {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        const SUFFIXES: [&str; 5] = ["B", "KB", "MB", "GB", "TB"];
        let mut scaled = self.0 as f64;
        let mut suffix = SUFFIXES[0];
        for &next in &SUFFIXES[1..] {
            if scaled < 1024.0 {
                break;
            }
            scaled /= 1024.0;
            suffix = next;
        }
        write!(f, "{scaled:.2} {suffix}")
    }
}
