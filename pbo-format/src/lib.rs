mod catalog;
mod de;
mod entry;
mod error;
mod file;
mod hashing;
mod ser;

pub use catalog::Catalog;
pub use entry::{Entry, PackingMethod, Properties};
pub use error::{Error, Result};
pub use file::{PboReader, PboWriter};
