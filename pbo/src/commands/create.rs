use std::path::Path;

use pbo_format::PboWriter;
use walkdir::WalkDir;

use crate::cli::CreateArgs;
use crate::error::{Error, Result};
use crate::util::to_archive_name;

pub fn run(args: CreateArgs) -> Result<()> {
    let CreateArgs {
        archive,
        paths,
        extensions,
    } = args;

    let mut writer = PboWriter::create(&archive);

    for line in extensions {
        writer.add_extension(line);
    }

    for path in &paths {
        if path.is_dir() {
            add_tree(&mut writer, path)?;
        } else {
            add_one(&mut writer, path, &to_archive_name(path))?;
        }
    }

    writer.finish().map_err(|source| Error::WriteArchive {
        path: archive,
        source,
    })?;

    Ok(())
}

/// Archive every file under `root`, named relative to it.
fn add_tree(writer: &mut PboWriter, root: &Path) -> Result<()> {
    for entry in WalkDir::new(root).sort_by_file_name() {
        let entry = entry.map_err(|source| Error::ProcessDirEntry { source })?;
        if !entry.file_type().is_file() {
            continue;
        }

        let relative = entry.path().strip_prefix(root).unwrap_or_else(|_| entry.path());
        add_one(writer, entry.path(), &to_archive_name(relative))?;
    }
    Ok(())
}

fn add_one(writer: &mut PboWriter, source: &Path, name: &str) -> Result<()> {
    tracing::debug!(name, source = %source.display(), "adding");
    writer.add_path(name, source).map_err(|err| Error::AddFile {
        path: source.to_path_buf(),
        source: err,
    })
}
