//! ZIP archive reading

use crate::Result;
use anyhow::Context;
use std::{
    fs::File,
    io::{BufReader, Read, Seek},
    path::Path,
};
use time::PrimitiveDateTime;
use zip::ZipArchive;

/// one record from the archive's central directory
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ArchiveEntry {
    /// normalized path, `/` separated, without a trailing slash
    pub name: String,
    pub size: u64,
    pub compressed_size: u64,
    pub modified: Option<PrimitiveDateTime>,
    pub mode: Option<u32>,
    pub is_dir: bool,
}

/// read all entry records of a ZIP archive on disk
pub fn read_entries(archive_path: &Path) -> Result<Vec<ArchiveEntry>> {
    let file = File::open(archive_path)
        .with_context(|| format!("failed to open archive file {}", archive_path.display()))?;
    read_entries_from(BufReader::new(file))
        .with_context(|| format!("failed to read ZIP archive from {}", archive_path.display()))
}

/// read all entry records from any seekable ZIP source
pub fn read_entries_from<R: Read + Seek>(reader: R) -> Result<Vec<ArchiveEntry>> {
    let mut archive = ZipArchive::new(reader)?;
    let mut entries = Vec::with_capacity(archive.len());

    for i in 0..archive.len() {
        // raw access skips decryption and decompression setup
        let file = archive.by_index_raw(i)?;
        let name = normalize_name(file.name());
        if name.is_empty() {
            continue;
        }

        entries.push(ArchiveEntry {
            name,
            size: file.size(),
            compressed_size: file.compressed_size(),
            modified: file
                .last_modified()
                .and_then(|dt| PrimitiveDateTime::try_from(dt).ok()),
            mode: file.unix_mode(),
            is_dir: file.is_dir(),
        });
    }

    Ok(entries)
}

/// normalize a stored entry name into a relative `/` separated path
pub fn normalize_name(raw: &str) -> String {
    raw.split('/')
        .filter(|part| !part.is_empty() && *part != ".")
        .collect::<Vec<_>>()
        .join("/")
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::{Cursor, Write};
    use time::macros::datetime;
    use time::Month;
    use zip::{write::SimpleFileOptions, ZipWriter};

    fn build_zip(files: &[(&str, &[u8])], options: SimpleFileOptions) -> Result<Vec<u8>> {
        let mut buf = Vec::new();
        {
            let mut zip = ZipWriter::new(Cursor::new(&mut buf));
            for (name, content) in files {
                if name.ends_with('/') {
                    zip.add_directory(*name, options)?;
                } else {
                    zip.start_file(*name, options)?;
                    zip.write_all(content)?;
                }
            }
            zip.finish()?;
        }
        Ok(buf)
    }

    #[test]
    fn test_normalize_name() {
        assert_eq!(normalize_name("a/b/c.txt"), "a/b/c.txt");
        assert_eq!(normalize_name("dir/"), "dir");
        assert_eq!(normalize_name("/abs/path"), "abs/path");
        assert_eq!(normalize_name("./rel//x"), "rel/x");
        assert_eq!(normalize_name("/"), "");
        assert_eq!(normalize_name("./"), "");
    }

    #[test]
    fn test_read_entries_from_memory() -> Result<()> {
        let stamp = zip::DateTime::from_date_and_time(2021, 3, 14, 15, 9, 26)
            .map_err(|e| anyhow::anyhow!("{e:?}"))?;
        let options = SimpleFileOptions::default()
            .compression_method(zip::CompressionMethod::Stored)
            .last_modified_time(stamp)
            .unix_permissions(0o755);
        let data = build_zip(
            &[("docs/", b""), ("docs/readme.txt", b"hello"), ("run.sh", b"#!/bin/sh\n")],
            options,
        )?;

        let entries = read_entries_from(Cursor::new(data))?;
        assert_eq!(entries.len(), 3);

        assert_eq!(entries[0].name, "docs");
        assert!(entries[0].is_dir);

        let readme = &entries[1];
        assert_eq!(readme.name, "docs/readme.txt");
        assert!(!readme.is_dir);
        assert_eq!(readme.size, 5);
        assert_eq!(readme.compressed_size, 5);

        let modified = readme.modified.expect("timestamp");
        assert_eq!(modified.year(), 2021);
        assert_eq!(modified.month(), Month::March);
        assert_eq!(modified.day(), 14);
        assert_eq!((modified.hour(), modified.minute()), (15, 9));
        assert_eq!(readme.modified, Some(datetime!(2021-03-14 15:09:26)));

        let mode = entries[2].mode.expect("unix mode");
        assert_eq!(mode & 0o777, 0o755);

        Ok(())
    }

    #[test]
    fn test_timestamps_are_wall_clock() -> Result<()> {
        let options = SimpleFileOptions::default()
            .compression_method(zip::CompressionMethod::Stored)
            .last_modified_time(zip::DateTime::default());
        let data = build_zip(&[("old.txt", b"x")], options)?;

        let entries = read_entries_from(Cursor::new(data))?;
        assert_eq!(entries[0].modified, Some(datetime!(1980-01-01 00:00:00)));

        Ok(())
    }

    #[test]
    fn test_read_entries_rejects_garbage() {
        let result = read_entries_from(Cursor::new(b"definitely not a zip".to_vec()));
        assert!(result.is_err());
    }

    #[test]
    fn test_read_entries_missing_file() {
        let err = read_entries(Path::new("/nonexistent/archive.zip")).unwrap_err();
        assert!(err.to_string().contains("failed to open archive file"));
    }
}
