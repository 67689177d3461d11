//! Program image loading
//!
//! An image is a text file with one byte per line, written in binary:
//!
//! ```text
//! # print8.ls8
//! 10000010 # LDI R0,8
//! 00000000
//! 00001000
//!
//! 00000001 # HLT
//! ```
//!
//! Blank lines and lines starting with `#` do not take up an address.

use std::fs;
use std::path::{Path, PathBuf};
use thiserror::Error;

/// Number of binary digits that make up one byte
const BYTE_DIGITS: usize = 8;

/// Errors raised while reading an image
#[derive(Error, Debug)]
pub enum ImageError {
    #[error("failed to read program image {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("line {line}: '{text}' is not a binary byte")]
    InvalidByte { line: usize, text: String },
}

/// Parsed program image
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct ProgramImage {
    bytes: Vec<u8>,
}

impl ProgramImage {
    /// Wrap raw bytes as an image
    pub fn from_bytes(bytes: Vec<u8>) -> Self {
        Self { bytes }
    }

    /// Parse image text
    pub fn parse(source: &str) -> Result<Self, ImageError> {
        let mut bytes = Vec::new();
        for (index, line) in source.lines().enumerate() {
            if let Some(byte) = parse_line(line, index + 1)? {
                bytes.push(byte);
            }
        }
        Ok(Self { bytes })
    }

    /// Read and parse an image file
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self, ImageError> {
        let path = path.as_ref();
        let source = fs::read_to_string(path).map_err(|source| ImageError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        let image = Self::parse(&source)?;
        tracing::debug!(path = %path.display(), len = image.len(), "loaded program image");
        Ok(image)
    }

    pub fn bytes(&self) -> &[u8] {
        &self.bytes
    }

    pub fn len(&self) -> usize {
        self.bytes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.bytes.is_empty()
    }
}

/// Parse one line; `Ok(None)` for blank and comment lines
fn parse_line(line: &str, line_number: usize) -> Result<Option<u8>, ImageError> {
    let code = match line.split_once('#') {
        Some((code, _comment)) => code,
        None => line,
    };
    let token = match code.split_whitespace().next() {
        Some(token) => token,
        None => return Ok(None),
    };

    let invalid = || ImageError::InvalidByte {
        line: line_number,
        text: token.to_string(),
    };

    let digits: String = token.chars().take(BYTE_DIGITS).collect();
    // from_str_radix would also accept a leading '+'
    if !digits.bytes().all(|b| b == b'0' || b == b'1') {
        return Err(invalid());
    }
    u8::from_str_radix(&digits, 2).map(Some).map_err(|_| invalid())
}
