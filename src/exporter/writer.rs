//! Output file writing
//!
//! Renders the export map as pretty-printed JSON (4-space indent) and
//! writes it to the output path, overwriting any previous export. The
//! rendering is deterministic, so two runs against an unchanged collection
//! produce byte-for-byte identical files.

use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::Path;

use serde::Serialize;
use serde_json::Serializer;
use serde_json::ser::PrettyFormatter;
use tracing::debug;

use crate::error::{ExportError, Result};

use super::snapshot::ExportMap;

/// Render the export map as pretty-printed JSON
///
/// # Arguments
/// * `map` - Export map to render
///
/// # Returns
/// * `Result<String>` - Rendered JSON with a trailing newline
pub fn render_export(map: &ExportMap) -> Result<String> {
    let mut buf = Vec::new();
    let formatter = PrettyFormatter::with_indent(b"    ");
    let mut serializer = Serializer::with_formatter(&mut buf, formatter);

    map.serialize(&mut serializer)
        .map_err(|e| ExportError::Generic(format!("Failed to serialize export: {e}")))?;
    buf.push(b'\n');

    String::from_utf8(buf)
        .map_err(|e| ExportError::Generic(format!("Export is not valid UTF-8: {e}")))
}

/// Write the export map to the output file
///
/// Creates the file if absent and truncates it otherwise. A failure during
/// the write can leave a truncated file behind; nothing is retried.
///
/// # Arguments
/// * `map` - Export map to write
/// * `path` - Output file path
///
/// # Returns
/// * `Result<u64>` - Number of bytes written
pub fn write_export(map: &ExportMap, path: &Path) -> Result<u64> {
    let rendered = render_export(map)?;

    let file = File::create(path)?;
    let mut writer = BufWriter::new(file);
    writer.write_all(rendered.as_bytes())?;
    writer.flush()?;

    debug!(
        "Wrote {} entries ({} bytes) to {}",
        map.len(),
        rendered.len(),
        path.display()
    );

    Ok(rendered.len() as u64)
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::{Value, json};

    fn single_entry_map() -> ExportMap {
        let mut map = ExportMap::new();
        map.insert(
            "abc123".to_string(),
            json!({ "name": "quiz1", "score": 42 }),
        );
        map
    }

    #[test]
    fn test_empty_map_renders_empty_object() {
        let rendered = render_export(&ExportMap::new()).unwrap();
        assert_eq!(rendered, "{}\n");
    }

    #[test]
    fn test_single_document_rendering() {
        let rendered = render_export(&single_entry_map()).unwrap();
        assert_eq!(
            rendered,
            "{\n    \"abc123\": {\n        \"name\": \"quiz1\",\n        \"score\": 42\n    }\n}\n"
        );
    }

    #[test]
    fn test_rendering_is_idempotent() {
        let map = single_entry_map();
        assert_eq!(render_export(&map).unwrap(), render_export(&map).unwrap());
    }

    #[test]
    fn test_round_trip() {
        let mut map = ExportMap::new();
        map.insert("a".to_string(), json!({ "score": 1, "tags": ["x", "y"] }));
        map.insert("b".to_string(), json!({ "score": 2.5, "passed": false }));

        let rendered = render_export(&map).unwrap();
        let parsed: Value = serde_json::from_str(&rendered).unwrap();

        assert_eq!(parsed, Value::Object(map));
    }

    #[test]
    fn test_write_creates_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("export.json");

        let bytes = write_export(&single_entry_map(), &path).unwrap();

        let contents = std::fs::read_to_string(&path).unwrap();
        assert_eq!(bytes, contents.len() as u64);
        assert!(contents.contains("\"abc123\""));
    }

    #[test]
    fn test_write_overwrites_previous_export() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("export.json");
        std::fs::write(&path, "stale contents that are much longer than {}").unwrap();

        write_export(&ExportMap::new(), &path).unwrap();

        assert_eq!(std::fs::read_to_string(&path).unwrap(), "{}\n");
    }

    #[test]
    fn test_write_to_missing_directory_is_io_error() {
        let err = write_export(
            &ExportMap::new(),
            Path::new("/nonexistent/directory/export.json"),
        )
        .unwrap_err();
        assert!(matches!(err, ExportError::Io(_)));
    }
}
