//! Forward-only byte source with a bounded signature peek

use crate::error::DgnError;
use std::io::{self, ErrorKind, Read};

/// Wraps a reader so the 4-byte file signature can be examined without
/// consuming it, and counts every byte handed out.
///
/// The signature bytes go into a small pushback buffer on peek; subsequent
/// reads drain the pushback before touching the underlying reader, so the
/// element loop sees the stream from offset 0.
pub struct ByteSource<R> {
    inner: R,
    pushback: Vec<u8>,
    pushback_pos: usize,
    consumed: u64,
}

impl<R: Read> ByteSource<R> {
    /// Wrap a reader positioned at the start of a design-file stream
    pub fn new(inner: R) -> Self {
        Self {
            inner,
            pushback: Vec::new(),
            pushback_pos: 0,
            consumed: 0,
        }
    }

    /// Total bytes handed out so far
    pub fn consumed(&self) -> u64 {
        self.consumed
    }

    /// Read the first four bytes as a big-endian u32 without consuming them
    ///
    /// Only valid while the source is still at offset 0; calling it twice
    /// returns the same value. Peeking after reads have started is a usage
    /// error.
    pub fn peek_u32_be(&mut self) -> Result<u32, DgnError> {
        if self.pushback.is_empty() && self.consumed == 0 {
            let mut sig = [0u8; 4];
            self.inner
                .read_exact(&mut sig)
                .map_err(|e| read_failed(e, "file signature", 4))?;
            self.pushback.extend_from_slice(&sig);
        }
        if self.pushback_pos != 0 || self.pushback.len() < 4 {
            return Err(DgnError::InvalidStructure(
                "signature peek after reads have started".into(),
            ));
        }
        Ok(u32::from_be_bytes([
            self.pushback[0],
            self.pushback[1],
            self.pushback[2],
            self.pushback[3],
        ]))
    }

    /// Read one byte, mapping clean end-of-source to `None`
    pub fn read_byte(&mut self) -> Result<Option<u8>, DgnError> {
        let mut buf = [0u8; 1];
        match self.read_exact(&mut buf) {
            Ok(()) => Ok(Some(buf[0])),
            Err(e) if e.kind() == ErrorKind::UnexpectedEof => Ok(None),
            Err(e) => Err(e.into()),
        }
    }

    /// Read a little-endian u16, mapping end-of-source to `Truncated`
    pub fn read_u16_le(&mut self, context: &'static str) -> Result<u16, DgnError> {
        let mut buf = [0u8; 2];
        self.read_exact(&mut buf)
            .map_err(|e| read_failed(e, context, 2))?;
        Ok(u16::from_le_bytes(buf))
    }

    /// Read a little-endian u32, mapping end-of-source to `Truncated`
    pub fn read_u32_le(&mut self, context: &'static str) -> Result<u32, DgnError> {
        let mut buf = [0u8; 4];
        self.read_exact(&mut buf)
            .map_err(|e| read_failed(e, context, 4))?;
        Ok(u32::from_le_bytes(buf))
    }

    /// Fill `buf` exactly, mapping end-of-source to `Truncated`
    pub fn read_into(&mut self, buf: &mut [u8], context: &'static str) -> Result<(), DgnError> {
        let expected = buf.len();
        self.read_exact(buf)
            .map_err(|e| read_failed(e, context, expected))?;
        Ok(())
    }

    /// Discard exactly `count` bytes without returning them
    pub fn skip(&mut self, count: usize, context: &'static str) -> Result<(), DgnError> {
        let copied = io::copy(&mut self.by_ref().take(count as u64), &mut io::sink())?;
        if (copied as usize) < count {
            return Err(DgnError::Truncated {
                context,
                expected: count,
            });
        }
        Ok(())
    }
}

impl<R: Read> Read for ByteSource<R> {
    fn read(&mut self, buf: &mut [u8]) -> io::Result<usize> {
        if self.pushback_pos < self.pushback.len() {
            let remaining = &self.pushback[self.pushback_pos..];
            let n = remaining.len().min(buf.len());
            buf[..n].copy_from_slice(&remaining[..n]);
            self.pushback_pos += n;
            if self.pushback_pos == self.pushback.len() {
                self.pushback.clear();
                self.pushback_pos = 0;
            }
            self.consumed += n as u64;
            return Ok(n);
        }
        let n = self.inner.read(buf)?;
        self.consumed += n as u64;
        Ok(n)
    }
}

fn read_failed(err: io::Error, context: &'static str, expected: usize) -> DgnError {
    if err.kind() == ErrorKind::UnexpectedEof {
        DgnError::Truncated { context, expected }
    } else {
        err.into()
    }
}
