//! Load
//! ---
//!
//! This defines the methods to read serialized forests
use std::fs::File;
use std::io::{BufReader, Read};
use std::path::Path;

use super::schema::ForestRecord;

/// Error conditions while reading a forest
#[derive(Debug, thiserror::Error)]
pub enum LoadError {
    /// Could not open or read the source
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// The source is not a valid JSON forest
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

/// Reads a JSON forest record from a reader
pub fn read_forest<R: Read>(reader: R) -> Result<ForestRecord, LoadError> {
    Ok(serde_json::from_reader(reader)?)
}

/// Given a file path, loads the JSON forest record it contains
pub fn read_forest_file<P: AsRef<Path>>(path: P) -> Result<ForestRecord, LoadError> {
    let f = File::open(path)?;
    read_forest(BufReader::new(f))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::schema::TreeNodeRecord;

    use std::io::Write;

    #[test]
    fn test_read_forest_file() {
        let mut f = tempfile::NamedTempFile::new().expect("should create temp file");
        write!(
            f,
            r#"{{"trees": [{{"feature": 0, "split_value": 1.5, "left": {{"leaf_value": 1}}, "right": {{"leaf_value": 2}}}}]}}"#
        )
        .expect("should write");

        let forest = read_forest_file(f.path()).expect("should load");
        assert_eq!(
            forest.trees,
            vec![TreeNodeRecord::split(0, 1.5, TreeNodeRecord::leaf(1.0), TreeNodeRecord::leaf(2.0))]
        );
    }

    #[test]
    fn test_read_errors() {
        match read_forest_file("/nonexistent/forest.json") {
            Err(LoadError::Io(_)) => (),
            other => panic!("expected Io error, got {:?}", other),
        }
        match read_forest(&b"{\"trees\": [1, 2]}"[..]) {
            Err(LoadError::Json(_)) => (),
            other => panic!("expected Json error, got {:?}", other),
        }
    }
}
