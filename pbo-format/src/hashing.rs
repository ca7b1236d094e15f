//! Hashing wrapper for computing a digest while data is written.

use std::io::{self, Write};

use digest::Digest;

/// A writer wrapper that computes a hash digest while data is written
/// through it.
///
/// The hash is updated as data passes through `write`.
pub(crate) struct HashingWriter<W, D> {
    inner: W,
    hasher: D,
    bytes_written: u64,
}

impl<W, D: Digest + Default> HashingWriter<W, D> {
    /// Create a new hashing writer wrapping the given writer.
    pub(crate) fn new(inner: W) -> Self {
        Self {
            inner,
            hasher: D::default(),
            bytes_written: 0,
        }
    }

    /// Get the total number of bytes written through this writer.
    pub(crate) fn bytes_written(&self) -> u64 {
        self.bytes_written
    }

    /// Finalize the digest and hand back the inner writer.
    pub(crate) fn finish(self) -> (W, Vec<u8>) {
        let Self { inner, hasher, .. } = self;
        (inner, hasher.finalize().to_vec())
    }
}

impl<W: Write, D: Digest> Write for HashingWriter<W, D> {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        let n = self.inner.write(buf)?;
        if n > 0 {
            self.hasher.update(&buf[..n]);
            self.bytes_written += n as u64;
        }
        Ok(n)
    }

    fn flush(&mut self) -> io::Result<()> {
        self.inner.flush()
    }
}
