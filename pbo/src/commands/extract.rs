use std::fs::{self, File};

use pbo_format::PboReader;

use crate::cli::ExtractArgs;
use crate::error::{Error, Result};
use crate::util::{is_safe_relative, to_native_path};

pub fn run(args: ExtractArgs) -> Result<()> {
    let reader = PboReader::open(&args.archive).map_err(|source| Error::OpenArchive {
        path: args.archive.clone(),
        source,
    })?;

    for name in reader.file_names() {
        let relative = to_native_path(name);
        if !is_safe_relative(&relative) {
            tracing::warn!(name, "skipping entry that would escape the destination");
            continue;
        }

        let dest = args.dest.join(&relative);
        if let Some(parent) = dest.parent() {
            fs::create_dir_all(parent).map_err(|source| Error::CreateFile {
                path: parent.to_path_buf(),
                source,
            })?;
        }

        let mut file = File::create(&dest).map_err(|source| Error::CreateFile {
            path: dest.clone(),
            source,
        })?;
        reader
            .copy_file(name, &mut file)
            .map_err(|source| Error::ExtractFile {
                name: name.to_string(),
                source,
            })?;

        tracing::debug!(name, dest = %dest.display(), "extracted");
    }

    Ok(())
}
