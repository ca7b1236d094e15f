use std::fmt;

pub mod constants {
    pub const METHOD_STORED: u32 = 0x0000_0000;
    /// ASCII "Vers", the tag of the synthetic version entry at record 0.
    pub const METHOD_VERSIONED: u32 = 0x5665_7273;
}

use self::constants::*;

/// Packing method tag carried in each property block.
///
/// The tag is recorded and written back verbatim; payloads are never
/// transformed.
#[derive(Clone, Copy, Eq, PartialEq)]
pub enum PackingMethod {
    Stored,
    Versioned,
    Unknown(u32),
}

impl Default for PackingMethod {
    fn default() -> Self {
        Self::Stored
    }
}

impl PackingMethod {
    pub const fn id(self) -> u32 {
        use PackingMethod::*;

        match self {
            Stored => METHOD_STORED,
            Versioned => METHOD_VERSIONED,
            Unknown(id) => id,
        }
    }

    pub const fn from_id(id: u32) -> Self {
        use PackingMethod::*;

        match id {
            METHOD_STORED => Stored,
            METHOD_VERSIONED => Versioned,
            id => Unknown(id),
        }
    }
}

impl fmt::Display for PackingMethod {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        use PackingMethod::*;

        let s = match self {
            Stored => "stored",
            Versioned => "version",
            Unknown(id) => return write!(f, "unknown({:#010x})", id),
        };

        write!(f, "{}", s)
    }
}

impl fmt::Debug for PackingMethod {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Display::fmt(self, f)
    }
}

/// The fixed block of five little-endian `u32` fields that follows every
/// entry name in the header.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Properties {
    pub packing_method: PackingMethod,
    pub original_size: u32,
    pub reserved: u32,
    pub timestamp: u32,
    pub data_size: u32,
}

/// One archive member: a named record in the header and, for file entries,
/// a payload in the data region.
///
/// Two bookkeeping records carry an empty name: the version entry (record
/// 0, holds the header-extension strings) and the end-of-header marker.
#[derive(Debug, Clone)]
pub struct Entry {
    pub(crate) name: String,
    pub(crate) properties: Properties,
    pub(crate) extension: Option<Vec<String>>,
    pub(crate) file_offset: u64,
    pub(crate) payload: Option<Vec<u8>>,
}

impl Entry {
    pub(crate) fn version() -> Entry {
        Entry {
            name: String::new(),
            properties: Properties {
                packing_method: PackingMethod::Versioned,
                ..Properties::default()
            },
            extension: Some(Vec::new()),
            file_offset: 0,
            payload: None,
        }
    }

    pub(crate) fn end_marker() -> Entry {
        Entry {
            name: String::new(),
            properties: Properties::default(),
            extension: None,
            file_offset: 0,
            payload: None,
        }
    }

    pub(crate) fn file(name: String, payload: Vec<u8>, timestamp: u32) -> Entry {
        let size = payload.len() as u32;
        Entry {
            name,
            properties: Properties {
                packing_method: PackingMethod::Stored,
                original_size: size,
                reserved: 0,
                timestamp,
                data_size: size,
            },
            extension: None,
            file_offset: 0,
            payload: Some(payload),
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn properties(&self) -> &Properties {
        &self.properties
    }

    /// Header-extension strings; carried only by the version entry.
    pub fn extension(&self) -> Option<&[String]> {
        self.extension.as_deref()
    }

    /// Payload offset relative to the end of the header. Meaningful only
    /// for entries parsed from an existing archive.
    pub fn file_offset(&self) -> u64 {
        self.file_offset
    }

    pub fn data_size(&self) -> u32 {
        self.properties.data_size
    }

    pub fn is_version(&self) -> bool {
        self.name.is_empty() && self.extension.is_some()
    }

    pub fn is_end_marker(&self) -> bool {
        self.name.is_empty() && self.extension.is_none()
    }
}
