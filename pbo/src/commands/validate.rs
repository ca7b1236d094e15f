use pbo_format::PboReader;

use crate::cli::ValidateArgs;
use crate::error::{Error, Result};

pub fn run(args: ValidateArgs) -> Result<()> {
    let reader = PboReader::open(&args.archive).map_err(|source| Error::OpenArchive {
        path: args.archive.clone(),
        source,
    })?;

    reader
        .verify()
        .map_err(|source| Error::Validate { source })?;

    println!("{}: OK", args.archive.display());
    Ok(())
}
