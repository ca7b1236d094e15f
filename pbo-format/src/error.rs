use std::io;

pub type Result<T> = std::result::Result<T, Error>;

#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error("archive has no entry named `{0}`")]
    NotFound(String),

    #[error("entry `{name}` holds {size} bytes but the destination has room for {capacity}")]
    DoesNotFit {
        name: String,
        size: u32,
        capacity: usize,
    },

    #[error("entry `{name}` exceeds the 4 GiB size field")]
    TooLarge { name: String },

    #[error("entry name missing its NUL terminator within 512 bytes")]
    NameTooLong,

    #[error("archive ended before the end-of-header marker")]
    TruncatedHeader,

    #[error("entry name is not valid UTF-8")]
    InvalidName(#[source] std::string::FromUtf8Error),

    #[error("checksum mismatch: file carries {expected}, contents hash to {computed}")]
    ChecksumMismatch { expected: String, computed: String },

    #[error(transparent)]
    Io(#[from] io::Error),
}
