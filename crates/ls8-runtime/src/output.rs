//! Output channel for PRN
//!
//! The CPU writes through a shared, swappable writer so embedders and tests
//! can capture program output instead of sending it to stdout.

use std::io::{self, Write};
use std::sync::{Arc, Mutex};

/// Shared output writer
pub type OutputWriter = Arc<Mutex<Box<dyn Write + Send>>>;

/// Writer that forwards to the process stdout
pub fn stdout_writer() -> OutputWriter {
    Arc::new(Mutex::new(Box::new(io::stdout())))
}

/// In-memory buffer that collects everything written to it
#[derive(Debug, Clone, Default)]
pub struct CaptureBuffer {
    inner: Arc<Mutex<Vec<u8>>>,
}

impl CaptureBuffer {
    /// Everything written so far, lossily decoded as UTF-8
    pub fn contents(&self) -> String {
        let buf = self.inner.lock().unwrap_or_else(|e| e.into_inner());
        String::from_utf8_lossy(&buf).into_owned()
    }
}

impl Write for CaptureBuffer {
    fn write(&mut self, data: &[u8]) -> io::Result<usize> {
        let mut buf = self.inner.lock().unwrap_or_else(|e| e.into_inner());
        buf.extend_from_slice(data);
        Ok(data.len())
    }

    fn flush(&mut self) -> io::Result<()> {
        Ok(())
    }
}

/// Writer backed by a [`CaptureBuffer`]; returns both halves
pub fn capture_writer() -> (OutputWriter, CaptureBuffer) {
    let buffer = CaptureBuffer::default();
    let writer: OutputWriter = Arc::new(Mutex::new(Box::new(buffer.clone())));
    (writer, buffer)
}
