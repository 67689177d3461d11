//! Disasm command - print a listing of a program image

use anyhow::Result;
use ls8_runtime::{disassemble, ProgramImage, MEMORY_SIZE};
use std::path::Path;

/// Print the disassembly of the image at `path` to stdout
pub fn run(path: &Path) -> Result<()> {
    let image = ProgramImage::from_file(path)?;
    if image.len() > MEMORY_SIZE {
        tracing::warn!(
            bytes = image.len(),
            "image is larger than memory and cannot be run"
        );
    }
    print!("{}", disassemble(&image));
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::NamedTempFile;

    #[test]
    fn test_disasm_valid_image() {
        let mut file = NamedTempFile::new().unwrap();
        writeln!(file, "10000010 # LDI R0,8").unwrap();
        writeln!(file, "00000000").unwrap();
        writeln!(file, "00001000").unwrap();
        writeln!(file, "00000001 # HLT").unwrap();
        assert!(run(file.path()).is_ok());
    }

    #[test]
    fn test_disasm_invalid_image() {
        let mut file = NamedTempFile::new().unwrap();
        writeln!(file, "hello").unwrap();
        assert!(run(file.path()).is_err());
    }
}
