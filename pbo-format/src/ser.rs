use std::io::{self, Write};

use byteorder::{LittleEndian, WriteBytesExt};

use crate::entry::{Entry, Properties};

pub(crate) trait Serialize {
    fn write<W: Write>(&self, writer: &mut W) -> io::Result<()>;
}

/// Write a string followed by its NUL terminator.
pub(crate) fn write_cstring<W: Write>(writer: &mut W, value: &str) -> io::Result<()> {
    writer.write_all(value.as_bytes())?;
    writer.write_all(&[0])
}

impl Serialize for Properties {
    fn write<W: Write>(&self, writer: &mut W) -> io::Result<()> {
        writer.write_u32::<LittleEndian>(self.packing_method.id())?;
        writer.write_u32::<LittleEndian>(self.original_size)?;
        writer.write_u32::<LittleEndian>(self.reserved)?;
        writer.write_u32::<LittleEndian>(self.timestamp)?;
        writer.write_u32::<LittleEndian>(self.data_size)
    }
}

impl Serialize for Entry {
    /// Header-pass framing: name, property block and, for the version
    /// entry, the extension strings with their empty-string terminator.
    fn write<W: Write>(&self, writer: &mut W) -> io::Result<()> {
        write_cstring(writer, &self.name)?;
        self.properties.write(writer)?;

        if let Some(extension) = &self.extension {
            for line in extension {
                write_cstring(writer, line)?;
            }
            write_cstring(writer, "")?;
        }

        Ok(())
    }
}
