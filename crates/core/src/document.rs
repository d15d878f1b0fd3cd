//! Reading and writing documents (variable schemas, widget configs, widget
//! infos).
//!
//! Documents are JSON unless the file extension is `.yaml` or `.yml`.

use std::fs;
use std::path::Path;

use serde::Serialize;
use serde::de::DeserializeOwned;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum DocumentError {
    #[error("failed to read {0}: {1}")]
    Read(String, #[source] std::io::Error),

    #[error("failed to write {0}: {1}")]
    Write(String, #[source] std::io::Error),

    #[error("invalid JSON in {0}: {1}")]
    Json(String, #[source] serde_json::Error),

    #[error("invalid YAML in {0}: {1}")]
    Yaml(String, #[source] serde_yaml::Error),
}

fn is_yaml(path: &Path) -> bool {
    path.extension()
        .and_then(|e| e.to_str())
        .map(|e| e.eq_ignore_ascii_case("yaml") || e.eq_ignore_ascii_case("yml"))
        .unwrap_or(false)
}

pub fn read_document<T: DeserializeOwned>(path: &Path) -> Result<T, DocumentError> {
    let display = path.display().to_string();
    let text = fs::read_to_string(path).map_err(|e| DocumentError::Read(display.clone(), e))?;

    if is_yaml(path) {
        serde_yaml::from_str(&text).map_err(|e| DocumentError::Yaml(display, e))
    } else {
        serde_json::from_str(&text).map_err(|e| DocumentError::Json(display, e))
    }
}

/// Serialize `value` to `path`, pretty JSON or YAML by extension.
pub fn write_document<T: Serialize + ?Sized>(path: &Path, value: &T) -> Result<(), DocumentError> {
    let display = path.display().to_string();
    let text = if is_yaml(path) {
        serde_yaml::to_string(value).map_err(|e| DocumentError::Yaml(display.clone(), e))?
    } else {
        let mut s =
            serde_json::to_string_pretty(value).map_err(|e| DocumentError::Json(display.clone(), e))?;
        s.push('\n');
        s
    };
    fs::write(path, text).map_err(|e| DocumentError::Write(display, e))
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::BTreeMap;
    use tempfile::tempdir;

    #[test]
    fn test_reads_json_and_yaml() {
        let tmp = tempdir().unwrap();
        let json = tmp.path().join("doc.json");
        let yaml = tmp.path().join("doc.yml");
        fs::write(&json, r#"{"a": 1}"#).unwrap();
        fs::write(&yaml, "a: 1\n").unwrap();

        let from_json: BTreeMap<String, i64> = read_document(&json).unwrap();
        let from_yaml: BTreeMap<String, i64> = read_document(&yaml).unwrap();
        assert_eq!(from_json, from_yaml);
    }

    #[test]
    fn test_reports_parse_errors_with_path() {
        let tmp = tempdir().unwrap();
        let json = tmp.path().join("broken.json");
        fs::write(&json, "{").unwrap();

        let err = read_document::<BTreeMap<String, i64>>(&json).unwrap_err();
        assert!(matches!(err, DocumentError::Json(ref p, _) if p.ends_with("broken.json")));
    }

    #[test]
    fn test_write_then_read_yaml() {
        let tmp = tempdir().unwrap();
        let path = tmp.path().join("out.yaml");
        let doc = BTreeMap::from([("b".to_string(), 2i64), ("a".to_string(), 1)]);

        write_document(&path, &doc).unwrap();
        assert_eq!(fs::read_to_string(&path).unwrap(), "a: 1\nb: 2\n");
        assert_eq!(read_document::<BTreeMap<String, i64>>(&path).unwrap(), doc);
    }

    #[test]
    fn test_missing_file() {
        let tmp = tempdir().unwrap();
        let err = read_document::<BTreeMap<String, i64>>(&tmp.path().join("none.json")).unwrap_err();
        assert!(matches!(err, DocumentError::Read(_, _)));
    }
}
