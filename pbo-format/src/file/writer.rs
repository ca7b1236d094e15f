use std::fs::File;
use std::io::{BufWriter, Read, Write};
use std::path::{Path, PathBuf};
use std::time::{SystemTime, UNIX_EPOCH};

use sha1::Sha1;

use crate::catalog::Catalog;
use crate::entry::Entry;
use crate::error::{Error, Result};
use crate::hashing::HashingWriter;
use crate::ser::Serialize;

/// Write-side handle for assembling a new archive.
///
/// Entries accumulate in memory; nothing touches the filesystem until
/// [`finish`](PboWriter::finish) streams the header, the data region and
/// the trailing digest in catalog order.
#[derive(Debug)]
pub struct PboWriter {
    path: PathBuf,
    catalog: Catalog,
}

impl PboWriter {
    /// Start a new archive targeting `path`. The version entry is
    /// synthesized as record 0 with an empty extension list.
    pub fn create<P: AsRef<Path>>(path: P) -> PboWriter {
        let mut catalog = Catalog::default();
        catalog.push(Entry::version());

        PboWriter {
            path: path.as_ref().to_path_buf(),
            catalog,
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn catalog(&self) -> &Catalog {
        &self.catalog
    }

    /// Append one string to the version entry's extension list.
    pub fn add_extension<S: Into<String>>(&mut self, line: S) {
        self.catalog
            .get_mut(0)
            .and_then(|e| e.extension.as_mut())
            .expect("version entry present since create")
            .push(line.into());
    }

    /// Add a file entry from an in-memory buffer, stamped with the
    /// current time. See
    /// [`add_data_with_mtime`](PboWriter::add_data_with_mtime) for
    /// reproducible output.
    pub fn add_data<S: Into<String>>(&mut self, name: S, data: Vec<u8>) -> Result<()> {
        self.add_data_with_mtime(name, data, unix_now())
    }

    /// Add a file entry with an explicit modification timestamp.
    ///
    /// Duplicate names are accepted and written in order; readers resolve
    /// a name to its first occurrence.
    pub fn add_data_with_mtime<S: Into<String>>(
        &mut self,
        name: S,
        data: Vec<u8>,
        mtime: u32,
    ) -> Result<()> {
        let name = name.into();
        if u32::try_from(data.len()).is_err() {
            return Err(Error::TooLarge { name });
        }

        tracing::debug!(name = %name, size = data.len(), "queued entry");
        self.catalog.push(Entry::file(name, data, mtime));
        Ok(())
    }

    /// Add a file entry by draining a reader.
    pub fn add_reader<S: Into<String>, R: Read>(&mut self, name: S, reader: &mut R) -> Result<()> {
        let mut data = Vec::new();
        reader.read_to_end(&mut data)?;
        self.add_data_with_mtime(name, data, unix_now())
    }

    /// Add a file entry from a path, keeping the source's modification
    /// time when the platform reports one.
    pub fn add_path<S: Into<String>, P: AsRef<Path>>(&mut self, name: S, path: P) -> Result<()> {
        let path = path.as_ref();
        let data = std::fs::read(path)?;
        let mtime = path
            .metadata()
            .and_then(|m| m.modified())
            .ok()
            .and_then(|t| t.duration_since(UNIX_EPOCH).ok())
            .map(|d| d.as_secs() as u32)
            .unwrap_or_else(unix_now);

        self.add_data_with_mtime(name, data, mtime)
    }

    /// Write the archive: a header pass over every record, a data pass
    /// over the file payloads, then the digest of every byte written.
    ///
    /// Consumes the writer. The framing here is the exact inverse of the
    /// header parser. A failure mid-write leaves whatever bytes were
    /// already flushed to the target.
    pub fn finish(mut self) -> Result<()> {
        self.catalog.push(Entry::end_marker());

        let file = File::create(&self.path)?;
        let mut writer = HashingWriter::<_, Sha1>::new(BufWriter::new(file));

        for entry in self.catalog.entries() {
            entry.write(&mut writer)?;
        }
        let header_bytes = writer.bytes_written();

        for entry in self.catalog.entries() {
            if let Some(payload) = &entry.payload {
                writer.write_all(payload)?;
            }
        }

        tracing::debug!(
            header_bytes,
            data_bytes = writer.bytes_written() - header_bytes,
            entries = self.catalog.len(),
            "archive body written"
        );

        let (mut inner, digest) = writer.finish();
        inner.write_all(&digest)?;
        inner.flush()?;
        Ok(())
    }
}

fn unix_now() -> u32 {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|d| d.as_secs() as u32)
        .unwrap_or(0)
}
