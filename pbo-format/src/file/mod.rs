pub mod reader;
pub mod writer;

pub use self::reader::PboReader;
pub use self::writer::PboWriter;

/// Width of the SHA-1 digest that terminates every archive.
pub(crate) const CHECKSUM_LEN: usize = 20;

#[cfg(test)]
mod tests {
    use std::fs;
    use std::io::Cursor;
    use std::path::{Path, PathBuf};

    use sha1::{Digest, Sha1};

    use crate::{Error, PboReader, PboWriter};

    const MTIME: u32 = 1_600_000_000;

    fn temp(name: &str) -> (tempfile::TempDir, PathBuf) {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join(name);
        (dir, path)
    }

    fn sample_archive(path: &Path) {
        let mut writer = PboWriter::create(path);
        writer.add_extension("prefix=demo");
        writer
            .add_data_with_mtime("a.txt", b"hi".to_vec(), MTIME)
            .unwrap();
        writer
            .add_data_with_mtime("b/c.bin", vec![0u8; 17], MTIME)
            .unwrap();
        writer.finish().unwrap();
    }

    #[test]
    fn round_trip_preserves_names_sizes_and_payloads() {
        let (_dir, path) = temp("roundtrip.pbo");
        sample_archive(&path);

        let reader = PboReader::open(&path).unwrap();
        assert_eq!(
            reader.file_names().collect::<Vec<_>>(),
            ["a.txt", "b/c.bin"]
        );
        // version entry + two files + end marker
        assert_eq!(reader.catalog().len(), 4);
        assert_eq!(reader.file_size("a.txt"), Some(2));
        assert_eq!(reader.file_size("b/c.bin"), Some(17));
        assert_eq!(reader.file_size("missing"), None);

        let mut buf = [0u8; 2];
        assert_eq!(reader.read_file("a.txt", &mut buf).unwrap(), 2);
        assert_eq!(&buf, b"hi");

        let mut sink = Vec::new();
        reader.copy_file("b/c.bin", &mut sink).unwrap();
        assert_eq!(sink, vec![0u8; 17]);
    }

    #[test]
    fn end_marker_is_unique_and_last() {
        let (_dir, path) = temp("marker.pbo");
        sample_archive(&path);

        let reader = PboReader::open(&path).unwrap();
        let entries = reader.catalog().entries();
        let markers = entries.iter().filter(|e| e.is_end_marker()).count();
        assert_eq!(markers, 1);
        assert!(entries.last().unwrap().is_end_marker());
        assert!(entries[0].is_version());
    }

    #[test]
    fn offsets_accumulate_earlier_data_sizes() {
        let (_dir, path) = temp("offsets.pbo");
        let mut writer = PboWriter::create(&path);
        for (name, len) in [("one", 2usize), ("two", 17), ("three", 5)] {
            writer
                .add_data_with_mtime(name, vec![b'x'; len], MTIME)
                .unwrap();
        }
        writer.finish().unwrap();

        let reader = PboReader::open(&path).unwrap();
        let mut expected = 0u64;
        for entry in reader.catalog().entries() {
            assert_eq!(entry.file_offset(), expected);
            expected += u64::from(entry.data_size());
        }
    }

    #[test]
    fn extension_strings_survive_a_round_trip() {
        let (_dir, path) = temp("extension.pbo");
        let mut writer = PboWriter::create(&path);
        writer.add_extension("prefix=x\\y");
        writer.add_extension("version=3");
        assert_eq!(
            writer.catalog().entries()[0].extension(),
            Some(["prefix=x\\y".to_string(), "version=3".to_string()].as_slice())
        );
        writer.finish().unwrap();

        let reader = PboReader::open(&path).unwrap();
        assert_eq!(reader.extension().to_vec(), ["prefix=x\\y", "version=3"]);
    }

    #[test]
    fn version_entry_framing_is_exact() {
        let (_dir, path) = temp("framing.pbo");
        let mut writer = PboWriter::create(&path);
        writer.add_extension("x");
        writer.add_extension("y");
        writer.finish().unwrap();

        let bytes = fs::read(&path).unwrap();
        // empty name, then the "Vers" tag little-endian
        assert_eq!(bytes[0], 0);
        assert_eq!(&bytes[1..5], b"sreV");
        // extension strings NUL-terminated, then the empty terminator
        assert_eq!(&bytes[21..26], b"x\0y\0\0");
    }

    #[test]
    fn trailing_digest_covers_every_preceding_byte() {
        let (_dir, path) = temp("digest.pbo");
        sample_archive(&path);

        let bytes = fs::read(&path).unwrap();
        let (body, trailer) = bytes.split_at(bytes.len() - 20);
        assert_eq!(trailer, Sha1::digest(body).as_slice());
    }

    #[test]
    fn identical_content_writes_identical_files() {
        let (_dir, path_a) = temp("a.pbo");
        let (_dir2, path_b) = temp("b.pbo");
        sample_archive(&path_a);
        sample_archive(&path_b);

        assert_eq!(fs::read(&path_a).unwrap(), fs::read(&path_b).unwrap());
    }

    #[test]
    fn header_without_version_entry_parses() {
        // Hand-built archive: two plain records, the end marker, then the
        // data region. No version entry, no trailing digest.
        let (_dir, path) = temp("plain.pbo");
        let mut bytes = Vec::new();
        bytes.extend_from_slice(b"a.txt\0");
        for field in [0u32, 2, 0, 0, 2] {
            bytes.extend_from_slice(&field.to_le_bytes());
        }
        bytes.extend_from_slice(b"b/c.bin\0");
        for field in [0u32, 17, 0, 0, 17] {
            bytes.extend_from_slice(&field.to_le_bytes());
        }
        bytes.extend_from_slice(&[0u8; 21]); // end marker
        bytes.extend_from_slice(b"hi");
        bytes.extend_from_slice(&[0u8; 17]);
        fs::write(&path, bytes).unwrap();

        let reader = PboReader::open(&path).unwrap();
        assert_eq!(reader.catalog().len(), 3);
        assert_eq!(reader.file_size("b/c.bin"), Some(17));
        assert_eq!(reader.file_size("missing"), None);

        let mut buf = [0u8; 2];
        reader.read_file("a.txt", &mut buf).unwrap();
        assert_eq!(&buf, b"hi");
    }

    #[test]
    fn undersized_destination_leaves_buffer_untouched() {
        let (_dir, path) = temp("toosmall.pbo");
        sample_archive(&path);

        let reader = PboReader::open(&path).unwrap();
        let mut buf = [0xAAu8; 5];
        match reader.read_file("b/c.bin", &mut buf) {
            Err(Error::DoesNotFit {
                name,
                size,
                capacity,
            }) => {
                assert_eq!(name, "b/c.bin");
                assert_eq!(size, 17);
                assert_eq!(capacity, 5);
            }
            other => panic!("expected DoesNotFit, got {:?}", other),
        }
        assert_eq!(buf, [0xAAu8; 5]);
    }

    #[test]
    fn missing_entry_is_not_found() {
        let (_dir, path) = temp("notfound.pbo");
        sample_archive(&path);

        let reader = PboReader::open(&path).unwrap();
        let mut buf = [0u8; 4];
        assert!(matches!(
            reader.read_file("missing", &mut buf),
            Err(Error::NotFound(_))
        ));
        assert!(matches!(
            reader.copy_file("", &mut Vec::new()),
            Err(Error::NotFound(_))
        ));
    }

    #[test]
    fn duplicate_names_resolve_to_the_first_payload() {
        let (_dir, path) = temp("dup.pbo");
        let mut writer = PboWriter::create(&path);
        writer
            .add_data_with_mtime("test.txt", b"one".to_vec(), MTIME)
            .unwrap();
        writer
            .add_data_with_mtime("test.txt", b"second".to_vec(), MTIME)
            .unwrap();
        writer.finish().unwrap();

        let reader = PboReader::open(&path).unwrap();
        assert_eq!(reader.file_size("test.txt"), Some(3));
        let mut sink = Vec::new();
        reader.copy_file("test.txt", &mut sink).unwrap();
        assert_eq!(sink, b"one");
    }

    #[test]
    fn reader_and_path_inputs_match_buffer_input() {
        let (dir, path) = temp("inputs.pbo");
        let source = dir.path().join("payload.bin");
        fs::write(&source, b"from disk").unwrap();

        let mut writer = PboWriter::create(&path);
        writer
            .add_reader("streamed", &mut Cursor::new(b"from reader".to_vec()))
            .unwrap();
        writer.add_path("ondisk", &source).unwrap();
        writer.finish().unwrap();

        let reader = PboReader::open(&path).unwrap();
        let mut sink = Vec::new();
        reader.copy_file("streamed", &mut sink).unwrap();
        assert_eq!(sink, b"from reader");
        sink.clear();
        reader.copy_file("ondisk", &mut sink).unwrap();
        assert_eq!(sink, b"from disk");
    }

    #[test]
    fn verify_accepts_pristine_and_rejects_corrupted() {
        let (_dir, path) = temp("verify.pbo");
        sample_archive(&path);

        let reader = PboReader::open(&path).unwrap();
        reader.verify().unwrap();

        let mut bytes = fs::read(&path).unwrap();
        let target = reader.header_size() as usize + 1;
        bytes[target] ^= 0xFF;
        fs::write(&path, bytes).unwrap();

        assert!(matches!(
            reader.verify(),
            Err(Error::ChecksumMismatch { .. })
        ));
    }

    #[test]
    fn unterminated_name_is_malformed() {
        let (_dir, path) = temp("noterm.pbo");
        fs::write(&path, vec![b'a'; 600]).unwrap();

        assert!(matches!(PboReader::open(&path), Err(Error::NameTooLong)));
    }

    #[test]
    fn truncated_record_is_malformed() {
        let (_dir, path) = temp("short.pbo");
        fs::write(&path, b"a.txt\0\x01\x02").unwrap();

        assert!(matches!(
            PboReader::open(&path),
            Err(Error::TruncatedHeader)
        ));
    }

    #[test]
    fn missing_end_marker_is_malformed() {
        let (_dir, path) = temp("nomarker.pbo");
        let mut bytes = Vec::new();
        bytes.extend_from_slice(b"a.txt\0");
        for field in [0u32, 2, 0, 0, 2] {
            bytes.extend_from_slice(&field.to_le_bytes());
        }
        fs::write(&path, bytes).unwrap();

        assert!(matches!(
            PboReader::open(&path),
            Err(Error::TruncatedHeader)
        ));
    }
}
