use std::fs::File;
use std::io::{self, prelude::*, BufReader, SeekFrom};
use std::path::{Path, PathBuf};

use sha1::Sha1;

use crate::catalog::Catalog;
use crate::de::{read_cstring, DeserializeOwned};
use crate::entry::{Entry, Properties};
use crate::error::{Error, Result};
use crate::file::CHECKSUM_LEN;
use crate::hashing::HashingWriter;

/// Read-side handle to an existing archive.
///
/// `open` parses the whole header eagerly; payloads stay on disk and are
/// fetched on demand. Every extraction reopens the file and seeks, so the
/// handle keeps no descriptor between calls and the path may be reopened
/// by other processes in the meantime.
#[derive(Debug)]
pub struct PboReader {
    path: PathBuf,
    header_size: u64,
    catalog: Catalog,
}

impl PboReader {
    /// Open an archive and parse its header into a fresh catalog.
    ///
    /// On any parse failure the partially built catalog is dropped
    /// wholesale and no reader is returned.
    pub fn open<P: AsRef<Path>>(path: P) -> Result<PboReader> {
        let file = File::open(path.as_ref())?;
        let mut reader = BufReader::new(file);
        let (catalog, header_size) = parse_header(&mut reader)?;

        Ok(PboReader {
            path: path.as_ref().to_path_buf(),
            header_size,
            catalog,
        })
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Size of the header region in bytes. Payload offsets are relative
    /// to this boundary.
    pub fn header_size(&self) -> u64 {
        self.header_size
    }

    pub fn catalog(&self) -> &Catalog {
        &self.catalog
    }

    /// Header-extension strings of the version entry; empty when the
    /// archive carries none.
    pub fn extension(&self) -> &[String] {
        self.catalog
            .entries()
            .first()
            .and_then(|e| e.extension())
            .unwrap_or(&[])
    }

    /// Names of the file entries in record order. Restartable: every call
    /// yields a fresh iterator.
    pub fn file_names(&self) -> impl Iterator<Item = &str> {
        self.catalog.file_names()
    }

    /// Data size of the named entry, if present.
    pub fn file_size(&self, name: &str) -> Option<u32> {
        self.catalog.find(name).map(|e| e.data_size())
    }

    /// Read the named entry's payload into `buf`.
    ///
    /// Fails without touching `buf` when the payload does not fit.
    /// Returns the number of bytes read, always the entry's data size.
    pub fn read_file(&self, name: &str, buf: &mut [u8]) -> Result<usize> {
        let entry = self
            .catalog
            .find(name)
            .ok_or_else(|| Error::NotFound(name.into()))?;

        let size = entry.data_size() as usize;
        if size > buf.len() {
            return Err(Error::DoesNotFit {
                name: name.into(),
                size: entry.data_size(),
                capacity: buf.len(),
            });
        }

        let mut payload = self.open_payload(entry)?;
        payload.read_exact(&mut buf[..size])?;
        Ok(size)
    }

    /// Stream the named entry's payload into `dest`. Returns the number
    /// of bytes copied.
    pub fn copy_file<W: Write>(&self, name: &str, dest: &mut W) -> Result<u64> {
        let entry = self
            .catalog
            .find(name)
            .ok_or_else(|| Error::NotFound(name.into()))?;

        let mut payload = self.open_payload(entry)?;
        Ok(io::copy(&mut payload, dest)?)
    }

    /// Recompute the trailing digest over the archive body and compare it
    /// against the stored one.
    pub fn verify(&self) -> Result<()> {
        let file = File::open(&self.path)?;
        let len = file.metadata()?.len();
        if len < CHECKSUM_LEN as u64 {
            return Err(Error::TruncatedHeader);
        }

        let mut reader = BufReader::new(file);
        let mut hasher = HashingWriter::<_, Sha1>::new(io::sink());
        io::copy(
            &mut reader.by_ref().take(len - CHECKSUM_LEN as u64),
            &mut hasher,
        )?;
        let (_, computed) = hasher.finish();

        let mut expected = [0u8; CHECKSUM_LEN];
        reader.read_exact(&mut expected)?;

        if computed[..] != expected[..] {
            return Err(Error::ChecksumMismatch {
                expected: hex(&expected),
                computed: hex(&computed),
            });
        }
        Ok(())
    }

    fn open_payload(&self, entry: &Entry) -> Result<io::Take<File>> {
        let mut file = File::open(&self.path)?;
        file.seek(SeekFrom::Start(self.header_size + entry.file_offset()))?;
        Ok(file.take(u64::from(entry.data_size())))
    }
}

/// Parse the header grammar: records until the end-of-header marker, with
/// the version entry's extension strings hanging off record 0.
fn parse_header<R: BufRead + Seek>(reader: &mut R) -> Result<(Catalog, u64)> {
    let mut catalog = Catalog::default();
    let mut offset = 0u64;

    loop {
        let name = read_cstring(reader)?;
        let properties = Properties::deserialize_owned(reader)?;

        let first = catalog.is_empty();
        let done = name.is_empty() && !first;

        let extension = if name.is_empty() && first {
            let mut lines = Vec::new();
            loop {
                let line = read_cstring(reader)?;
                if line.is_empty() {
                    break;
                }
                lines.push(line);
            }
            Some(lines)
        } else {
            None
        };

        tracing::debug!(
            name = %name,
            size = properties.data_size,
            offset,
            "parsed header record"
        );

        catalog.push(Entry {
            name,
            properties,
            extension,
            file_offset: offset,
            payload: None,
        });
        offset += u64::from(properties.data_size);

        if done {
            break;
        }
    }

    let header_size = reader.stream_position()?;
    tracing::debug!(header_size, entries = catalog.len(), "header parsed");
    Ok((catalog, header_size))
}

fn hex(bytes: &[u8]) -> String {
    bytes.iter().map(|b| format!("{:02x}", b)).collect()
}
