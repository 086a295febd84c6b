use std::collections::BTreeMap;
use std::fs;
use std::path::{Path, PathBuf};
use std::sync::Arc;

use thiserror::Error;

use crate::shared::occurrence::Occurrence;

use super::in_memory_annotations::{AnnotationTable, InMemoryAnnotations};

#[derive(Error, Debug)]
pub enum AnnotationError {
    #[error("failed to read annotations from {path}: {source}")]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("invalid annotations JSON: {0}")]
    Parse(#[from] serde_json::Error),
    #[error("frame key '{0}' is not a non-negative integer")]
    InvalidFrameKey(String),
}

type RawTable = BTreeMap<String, BTreeMap<String, Occurrence>>;

/// Loads `{ "<frame>": { "<objectId>": { x, y, w, h, isBlurOut } } }`.
pub struct JsonAnnotationLoader;

impl JsonAnnotationLoader {
    pub fn load(path: &Path) -> Result<InMemoryAnnotations, AnnotationError> {
        let json = fs::read_to_string(path).map_err(|source| AnnotationError::Read {
            path: path.to_path_buf(),
            source,
        })?;
        let annotations = Self::from_json_str(&json)?;
        log::info!(
            "Loaded {} occurrences across {} frames from {}",
            annotations.occurrence_count(),
            annotations.frame_count(),
            path.display()
        );
        Ok(annotations)
    }

    pub fn from_json_str(json: &str) -> Result<InMemoryAnnotations, AnnotationError> {
        let raw: RawTable = serde_json::from_str(json)?;
        let mut table = AnnotationTable::new();
        for (key, objects) in raw {
            let frame = key
                .trim()
                .parse::<usize>()
                .map_err(|_| AnnotationError::InvalidFrameKey(key.clone()))?;
            table.insert(frame, objects);
        }
        Ok(InMemoryAnnotations::new(Arc::new(table)))
    }
}
