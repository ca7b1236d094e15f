use std::path::PathBuf;

pub type Result<T> = std::result::Result<T, Error>;

#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error("cannot open archive `{}`", .path.display())]
    OpenArchive {
        path: PathBuf,
        #[source]
        source: pbo_format::Error,
    },

    #[error("cannot write archive `{}`", .path.display())]
    WriteArchive {
        path: PathBuf,
        #[source]
        source: pbo_format::Error,
    },

    #[error("cannot add `{}` to the archive", .path.display())]
    AddFile {
        path: PathBuf,
        #[source]
        source: pbo_format::Error,
    },

    #[error("cannot extract `{name}`")]
    ExtractFile {
        name: String,
        #[source]
        source: pbo_format::Error,
    },

    #[error("cannot create `{}`", .path.display())]
    CreateFile {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("cannot process directory entry")]
    ProcessDirEntry {
        #[source]
        source: walkdir::Error,
    },

    #[error("checksum validation failed")]
    Validate {
        #[source]
        source: pbo_format::Error,
    },
}
