use pbo_format::PboReader;

use crate::cli::ListArgs;
use crate::error::{Error, Result};
use crate::util::{size, time, to_native_path};

pub fn run(args: ListArgs) -> Result<()> {
    let reader = PboReader::open(&args.archive).map_err(|source| Error::OpenArchive {
        path: args.archive.clone(),
        source,
    })?;

    if args.long {
        list_long(&reader)
    } else {
        list_compact(&reader)
    }
}

fn list_compact(reader: &PboReader) -> Result<()> {
    println!("{:>12}  {:<20}  Path", "Size", "Modified");
    println!("{}", "-".repeat(60));

    let mut total = 0u64;
    let mut count = 0usize;
    for entry in reader.catalog().entries() {
        if entry.name().is_empty() {
            continue;
        }

        println!(
            "{:>12}  {:<20}  {}",
            size(entry.data_size().into()),
            time(entry.properties().timestamp),
            to_native_path(entry.name()).display(),
        );
        total += u64::from(entry.data_size());
        count += 1;
    }

    println!("{}", "-".repeat(60));
    println!("{} files, {}", count, size(total));
    Ok(())
}

/// Every header record, bookkeeping ones included, with the raw property
/// columns.
fn list_long(reader: &PboReader) -> Result<()> {
    println!(
        "{:<18}  {:>10}  {:>10}  {:>10}  {:<20}  Path",
        "Method", "Original", "Size", "Offset", "Modified"
    );
    println!("{}", "-".repeat(90));

    for entry in reader.catalog().entries() {
        let props = entry.properties();
        let label = if entry.is_version() {
            "<version>".to_string()
        } else if entry.is_end_marker() {
            "<end>".to_string()
        } else {
            to_native_path(entry.name()).display().to_string()
        };

        println!(
            "{:<18}  {:>10}  {:>10}  {:>10}  {:<20}  {}",
            props.packing_method.to_string(),
            props.original_size,
            props.data_size,
            entry.file_offset(),
            time(props.timestamp),
            label,
        );
    }

    Ok(())
}
