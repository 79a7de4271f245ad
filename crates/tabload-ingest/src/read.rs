//! Delimited file reading with encoding normalization.
//!
//! Files are decoded to UTF-8 before parsing. Bytes that are already valid
//! UTF-8 are used as-is; everything else is transcoded from the configured
//! fallback encoding (Windows-1252 by default, matching the usual origin of
//! exported .csv/.txt batches).

use std::io::Cursor;
use std::path::Path;

use encoding_rs::Encoding;
use polars::prelude::{CsvParseOptions, CsvReadOptions, DataFrame, SerReader};

use crate::error::{IngestError, Result};

/// Number of leading rows Polars inspects for schema inference.
pub const INFER_SCHEMA_ROWS: usize = 100;

/// Options controlling how a delimited file is read.
#[derive(Debug, Clone)]
pub struct ReadOptions {
    /// Field separator byte.
    pub separator: u8,
    /// Fallback encoding label for non-UTF-8 files (any WHATWG label).
    pub encoding: String,
    /// Rows used for dtype inference.
    pub infer_schema_length: usize,
}

impl Default for ReadOptions {
    fn default() -> Self {
        Self {
            separator: b',',
            encoding: "windows-1252".to_string(),
            infer_schema_length: INFER_SCHEMA_ROWS,
        }
    }
}

impl ReadOptions {
    /// Resolve the configured encoding label.
    pub fn resolve_encoding(&self) -> Result<&'static Encoding> {
        Encoding::for_label(self.encoding.as_bytes()).ok_or_else(|| IngestError::UnknownEncoding {
            label: self.encoding.clone(),
        })
    }
}

/// Reads raw file bytes, mapping not-found to a dedicated error variant.
fn read_bytes(path: &Path) -> Result<Vec<u8>> {
    std::fs::read(path).map_err(|e| {
        if e.kind() == std::io::ErrorKind::NotFound {
            IngestError::FileNotFound {
                path: path.to_path_buf(),
            }
        } else {
            IngestError::FileRead {
                path: path.to_path_buf(),
                source: e,
            }
        }
    })
}

/// Decodes file bytes to UTF-8 text.
///
/// UTF-16 files are rejected outright. Valid UTF-8 (with or without BOM)
/// passes through untouched; anything else is transcoded from the fallback
/// `encoding`.
fn decode_bytes(path: &Path, bytes: Vec<u8>, encoding: &'static Encoding) -> Result<String> {
    // UTF-16 BOMs
    if bytes.len() >= 2 {
        if bytes[0..2] == [0xFF, 0xFE] {
            return Err(IngestError::UnsupportedEncoding {
                path: path.to_path_buf(),
                encoding: "UTF-16 LE",
            });
        }
        if bytes[0..2] == [0xFE, 0xFF] {
            return Err(IngestError::UnsupportedEncoding {
                path: path.to_path_buf(),
                encoding: "UTF-16 BE",
            });
        }
    }

    match String::from_utf8(bytes) {
        Ok(text) => Ok(text.strip_prefix('\u{feff}').unwrap_or(&text).to_string()),
        Err(err) => {
            let bytes = err.into_bytes();
            let (text, actual, had_errors) = encoding.decode(&bytes);
            if had_errors {
                tracing::warn!(
                    path = %path.display(),
                    encoding = actual.name(),
                    "replacement characters produced while transcoding"
                );
            }
            tracing::debug!(
                path = %path.display(),
                encoding = actual.name(),
                "transcoded non-UTF-8 input"
            );
            Ok(text.into_owned())
        }
    }
}

/// Reads one delimited file into a DataFrame.
///
/// The file is decoded to UTF-8 first (see [`decode_bytes`]), then parsed
/// with Polars using the configured separator and a bounded schema-inference
/// prefix. A file with no data rows is an error.
pub fn read_table(path: &Path, options: &ReadOptions) -> Result<DataFrame> {
    // A bogus encoding label is a configuration error; reject it before
    // looking at the file, even if the bytes turn out to be valid UTF-8.
    let encoding = options.resolve_encoding()?;
    let bytes = read_bytes(path)?;
    let text = decode_bytes(path, bytes, encoding)?;

    if text.trim().is_empty() {
        return Err(IngestError::EmptyFile {
            path: path.to_path_buf(),
        });
    }

    let df = CsvReadOptions::default()
        .with_has_header(true)
        .with_infer_schema_length(Some(options.infer_schema_length))
        .with_parse_options(CsvParseOptions::default().with_separator(options.separator))
        .into_reader_with_file_handle(Cursor::new(text.into_bytes()))
        .finish()
        .map_err(|e| IngestError::Parse {
            path: path.to_path_buf(),
            message: e.to_string(),
        })?;

    if df.height() == 0 {
        return Err(IngestError::EmptyFile {
            path: path.to_path_buf(),
        });
    }

    Ok(df)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::NamedTempFile;

    fn create_temp_file(content: &[u8]) -> NamedTempFile {
        let mut file = NamedTempFile::new().unwrap();
        file.write_all(content).unwrap();
        file
    }

    #[test]
    fn reads_simple_csv() {
        let file = create_temp_file(b"a,b,c\n1,2,3\n4,5,6\n");
        let df = read_table(file.path(), &ReadOptions::default()).unwrap();

        assert_eq!(df.height(), 2);
        assert_eq!(df.width(), 3);
    }

    #[test]
    fn reads_custom_separator() {
        let file = create_temp_file(b"a|b\n1|2\n");
        let options = ReadOptions {
            separator: b'|',
            ..ReadOptions::default()
        };
        let df = read_table(file.path(), &options).unwrap();

        assert_eq!(df.width(), 2);
        assert_eq!(df.height(), 1);
    }

    #[test]
    fn strips_utf8_bom() {
        let file = create_temp_file("\u{feff}a,b\n1,2\n".as_bytes());
        let df = read_table(file.path(), &ReadOptions::default()).unwrap();

        assert_eq!(df.get_column_names()[0].as_str(), "a");
    }

    #[test]
    fn transcodes_windows_1252() {
        // 0xE9 is 'é' in Windows-1252 and invalid standalone UTF-8
        let file = create_temp_file(b"name\ncaf\xE9\n");
        let df = read_table(file.path(), &ReadOptions::default()).unwrap();

        let col = df.column("name").unwrap();
        let value = col.str().unwrap().get(0).unwrap();
        assert_eq!(value, "café");
    }

    #[test]
    fn rejects_utf16() {
        let file = create_temp_file(&[0xFF, 0xFE, 0x61, 0x00]);
        let result = read_table(file.path(), &ReadOptions::default());

        assert!(matches!(
            result,
            Err(IngestError::UnsupportedEncoding { .. })
        ));
    }

    #[test]
    fn rejects_unknown_encoding_label() {
        let file = create_temp_file(b"name\ncaf\xE9\n");
        let options = ReadOptions {
            encoding: "not-a-real-encoding".to_string(),
            ..ReadOptions::default()
        };
        let result = read_table(file.path(), &options);

        assert!(matches!(result, Err(IngestError::UnknownEncoding { .. })));
    }

    #[test]
    fn rejects_unknown_encoding_label_even_for_utf8_input() {
        let file = create_temp_file(b"a,b\n1,2\n");
        let options = ReadOptions {
            encoding: "not-a-real-encoding".to_string(),
            ..ReadOptions::default()
        };
        let result = read_table(file.path(), &options);

        assert!(matches!(result, Err(IngestError::UnknownEncoding { .. })));
    }

    #[test]
    fn empty_file_is_an_error() {
        let file = create_temp_file(b"");
        let result = read_table(file.path(), &ReadOptions::default());
        assert!(matches!(result, Err(IngestError::EmptyFile { .. })));
    }

    #[test]
    fn header_only_file_is_an_error() {
        let file = create_temp_file(b"a,b,c\n");
        let result = read_table(file.path(), &ReadOptions::default());
        assert!(matches!(result, Err(IngestError::EmptyFile { .. })));
    }

    #[test]
    fn missing_file_is_an_error() {
        let result = read_table(Path::new("/no/such/file.csv"), &ReadOptions::default());
        assert!(matches!(result, Err(IngestError::FileNotFound { .. })));
    }
}
