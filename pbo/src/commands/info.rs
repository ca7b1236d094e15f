use pbo_format::PboReader;

use crate::cli::InfoArgs;
use crate::error::{Error, Result};
use crate::util::size;

pub fn run(args: InfoArgs) -> Result<()> {
    let reader = PboReader::open(&args.archive).map_err(|source| Error::OpenArchive {
        path: args.archive.clone(),
        source,
    })?;

    let catalog = reader.catalog();
    let files = catalog.file_names().count();
    let data: u64 = catalog
        .entries()
        .iter()
        .map(|e| u64::from(e.data_size()))
        .sum();

    println!("Archive:      {}", reader.path().display());
    println!("Entries:      {} ({} files)", catalog.len(), files);
    println!("Header size:  {} bytes", reader.header_size());
    println!("Data size:    {}", size(data));

    let extension = reader.extension();
    if extension.is_empty() {
        println!("Extension:    (none)");
    } else {
        println!("Extension:");
        for line in extension {
            println!("  {}", line);
        }
    }

    Ok(())
}
