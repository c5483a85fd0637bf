//! Reading and writing JSON documents on disk

use crate::error::{GeneratorError, Result};
use serde::Serialize;
use serde_json::ser::PrettyFormatter;
use serde_json::{Map, Value};
use std::fs;
use std::io::ErrorKind;
use std::path::Path;

/// Read a JSON object from `path`. A missing file reads as `{}`.
pub fn read_json_object(path: &Path) -> Result<Map<String, Value>> {
    let content = match fs::read_to_string(path) {
        Ok(content) => content,
        Err(e) if e.kind() == ErrorKind::NotFound => return Ok(Map::new()),
        Err(e) => return Err(GeneratorError::io(path, e)),
    };

    match serde_json::from_str(&content) {
        Ok(Value::Object(map)) => Ok(map),
        Ok(_) => Err(GeneratorError::NotAnObject {
            path: path.to_path_buf(),
        }),
        Err(source) => Err(GeneratorError::Json {
            path: path.to_path_buf(),
            source,
        }),
    }
}

/// Serialize with tab indentation and a trailing newline
pub fn to_tab_indented(value: &Value) -> serde_json::Result<Vec<u8>> {
    let mut buf = Vec::new();
    let mut serializer =
        serde_json::Serializer::with_formatter(&mut buf, PrettyFormatter::with_indent(b"\t"));
    value.serialize(&mut serializer)?;
    buf.push(b'\n');
    Ok(buf)
}

/// Write `value` to `path`, creating parent directories as needed
pub fn write_json(path: &Path, value: &Value) -> Result<()> {
    let bytes = to_tab_indented(value).map_err(|source| GeneratorError::Json {
        path: path.to_path_buf(),
        source,
    })?;

    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent).map_err(|e| GeneratorError::io(parent, e))?;
    }
    fs::write(path, bytes).map_err(|e| GeneratorError::io(path, e))?;

    tracing::debug!(path = %path.display(), "wrote JSON file");
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;
    use tempfile::TempDir;

    #[test]
    fn test_missing_file_reads_as_empty_object() {
        let dir = TempDir::new().unwrap();
        let map = read_json_object(&dir.path().join("package.json")).unwrap();
        assert!(map.is_empty());
    }

    #[test]
    fn test_tab_indentation() {
        let bytes = to_tab_indented(&json!({"name": "lib", "files": ["dist"]})).unwrap();
        assert_eq!(
            String::from_utf8(bytes).unwrap(),
            "{\n\t\"name\": \"lib\",\n\t\"files\": [\n\t\t\"dist\"\n\t]\n}\n"
        );
    }

    #[test]
    fn test_write_creates_parent_directories() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("config").join("settings.json");
        write_json(&path, &json!({"a": 1})).unwrap();
        assert_eq!(fs::read_to_string(&path).unwrap(), "{\n\t\"a\": 1\n}\n");
        assert_eq!(read_json_object(&path).unwrap()["a"], 1);
    }

    #[test]
    fn test_non_object_document_is_rejected() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("list.json");
        fs::write(&path, "[1, 2]").unwrap();
        let err = read_json_object(&path).unwrap_err();
        assert!(matches!(err, GeneratorError::NotAnObject { .. }));
    }

    #[test]
    fn test_invalid_json_names_the_file() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("broken.json");
        fs::write(&path, "{ \"a\": ").unwrap();
        let err = read_json_object(&path).unwrap_err();
        assert!(matches!(err, GeneratorError::Json { .. }));
        assert!(err.to_string().contains("broken.json"));
    }
}
