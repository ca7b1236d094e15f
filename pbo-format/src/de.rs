use std::io::{self, BufRead, Read};

use byteorder::{LittleEndian, ReadBytesExt};

use crate::entry::{PackingMethod, Properties};
use crate::error::{Error, Result};

/// Longest name (or header-extension string) the format permits, NUL
/// terminator excluded.
pub(crate) const MAX_NAME_LEN: usize = 512;

pub(crate) trait DeserializeOwned: Sized {
    fn deserialize_owned<R: BufRead>(reader: &mut R) -> Result<Self>;
}

impl DeserializeOwned for Properties {
    fn deserialize_owned<R: BufRead>(reader: &mut R) -> Result<Self> {
        let mut fields = [0u32; 5];
        reader
            .read_u32_into::<LittleEndian>(&mut fields)
            .map_err(eof_is_truncation)?;

        Ok(Properties {
            packing_method: PackingMethod::from_id(fields[0]),
            original_size: fields[1],
            reserved: fields[2],
            timestamp: fields[3],
            data_size: fields[4],
        })
    }
}

/// Read one NUL-terminated string.
///
/// An empty result is legal: it denotes the version entry, the
/// end-of-header marker and the end of the extension list.
pub(crate) fn read_cstring<R: BufRead>(reader: &mut R) -> Result<String> {
    let mut buf = Vec::new();
    reader
        .take((MAX_NAME_LEN + 1) as u64)
        .read_until(0, &mut buf)?;

    match buf.last() {
        Some(0) => {
            buf.pop();
        }
        Some(_) if buf.len() > MAX_NAME_LEN => return Err(Error::NameTooLong),
        _ => return Err(Error::TruncatedHeader),
    }

    String::from_utf8(buf).map_err(Error::InvalidName)
}

fn eof_is_truncation(err: io::Error) -> Error {
    if err.kind() == io::ErrorKind::UnexpectedEof {
        Error::TruncatedHeader
    } else {
        Error::Io(err)
    }
}
