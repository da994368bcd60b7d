//! Session persistence
//!
//! Serializes a result set to a file and restores it. Records travel as
//! a single JSON array; a recognized extension suffix selects a
//! compression wrapper around the stream:
//!
//! - `*.gz`  - gzip (flate2)
//! - `*.bz2` - bzip2
//! - anything else - uncompressed JSON text
//!
//! Load auto-detects the wrapper the same way. A failed load surfaces a
//! [`StoreError`] and yields nothing, so callers keep their in-memory
//! state untouched.

use crate::error::{StoreError, StoreResult};
use bzip2::read::BzDecoder;
use bzip2::write::BzEncoder;
use flate2::read::GzDecoder;
use flate2::write::GzEncoder;
use serde::de::DeserializeOwned;
use serde::Serialize;
use std::fs::File;
use std::io::{BufReader, BufWriter, Write};
use std::path::Path;

/// Compression wrapper inferred from the file extension
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Codec {
    Plain,
    Gzip,
    Bzip2,
}

fn codec_for(path: &Path) -> Codec {
    match path.extension().and_then(|ext| ext.to_str()) {
        Some("gz") => Codec::Gzip,
        Some("bz2") => Codec::Bzip2,
        _ => Codec::Plain,
    }
}

/// Encode the full record list to `path`
pub fn save<R: Serialize>(records: &[R], path: &Path) -> StoreResult<()> {
    let write_err = |source| StoreError::Write {
        path: path.to_path_buf(),
        source,
    };
    let encode_err = |source| StoreError::Encode {
        path: path.to_path_buf(),
        source,
    };

    let file = File::create(path).map_err(write_err)?;
    let writer = BufWriter::new(file);

    match codec_for(path) {
        Codec::Plain => {
            let mut writer = writer;
            serde_json::to_writer(&mut writer, records).map_err(encode_err)?;
            writer.flush().map_err(write_err)?;
        }
        Codec::Gzip => {
            let mut encoder = GzEncoder::new(writer, flate2::Compression::default());
            serde_json::to_writer(&mut encoder, records).map_err(encode_err)?;
            encoder.finish().map_err(write_err)?.flush().map_err(write_err)?;
        }
        Codec::Bzip2 => {
            let mut encoder = BzEncoder::new(writer, bzip2::Compression::default());
            serde_json::to_writer(&mut encoder, records).map_err(encode_err)?;
            encoder.finish().map_err(write_err)?.flush().map_err(write_err)?;
        }
    }

    Ok(())
}

/// Decode a full record list from `path`
pub fn load<R: DeserializeOwned>(path: &Path) -> StoreResult<Vec<R>> {
    let file = File::open(path).map_err(|source| StoreError::Read {
        path: path.to_path_buf(),
        source,
    })?;
    let reader = BufReader::new(file);

    let records = match codec_for(path) {
        Codec::Plain => serde_json::from_reader(reader),
        Codec::Gzip => serde_json::from_reader(GzDecoder::new(reader)),
        Codec::Bzip2 => serde_json::from_reader(BzDecoder::new(reader)),
    }
    .map_err(|source| StoreError::Decode {
        path: path.to_path_buf(),
        source,
    })?;

    Ok(records)
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde::Deserialize;
    use std::fs;
    use std::path::PathBuf;
    use tempfile::tempdir;

    #[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
    struct Sample {
        id: u32,
        name: String,
    }

    fn samples() -> Vec<Sample> {
        vec![
            Sample {
                id: 1,
                name: "alpha".into(),
            },
            Sample {
                id: 2,
                name: "beta".into(),
            },
        ]
    }

    #[test]
    fn test_codec_sniffing() {
        assert_eq!(codec_for(Path::new("out.json")), Codec::Plain);
        assert_eq!(codec_for(Path::new("out.json.gz")), Codec::Gzip);
        assert_eq!(codec_for(Path::new("out.json.bz2")), Codec::Bzip2);
        assert_eq!(codec_for(Path::new("out")), Codec::Plain);
    }

    #[test]
    fn test_round_trip_all_codecs() {
        let dir = tempdir().unwrap();
        let records = samples();

        for name in ["session.json", "session.json.gz", "session.json.bz2"] {
            let path = dir.path().join(name);
            save(&records, &path).unwrap();
            let restored: Vec<Sample> = load(&path).unwrap();
            assert_eq!(restored, records, "round trip failed for {name}");
        }
    }

    #[test]
    fn test_plain_output_is_readable_json() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("session.json");
        save(&samples(), &path).unwrap();

        let text = fs::read_to_string(&path).unwrap();
        assert!(text.starts_with('['));
        assert!(text.contains("alpha"));
    }

    #[test]
    fn test_compressed_output_is_not_plain_text() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("session.json.gz");
        save(&samples(), &path).unwrap();

        let bytes = fs::read(&path).unwrap();
        // gzip magic bytes
        assert_eq!(&bytes[..2], &[0x1f, 0x8b]);
    }

    #[test]
    fn test_load_missing_file() {
        let err = load::<Sample>(&PathBuf::from("/nonexistent/session.json")).unwrap_err();
        assert!(matches!(err, StoreError::Read { .. }));
    }

    #[test]
    fn test_load_schema_mismatch() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("session.json");
        fs::write(&path, "{\"not\": \"an array\"}").unwrap();

        let err = load::<Sample>(&path).unwrap_err();
        assert!(matches!(err, StoreError::Decode { .. }));
    }
}
