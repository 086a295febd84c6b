use std::collections::BTreeMap;
use std::sync::Arc;

use crate::annotations::domain::annotation_provider::AnnotationProvider;
use crate::shared::occurrence::Occurrence;

/// Frame index → object id → occurrence.
pub type AnnotationTable = BTreeMap<usize, BTreeMap<String, Occurrence>>;

/// Serves occurrences from a shared, pre-loaded table.
#[derive(Clone, Debug, Default)]
pub struct InMemoryAnnotations {
    table: Arc<AnnotationTable>,
}

impl InMemoryAnnotations {
    pub fn new(table: Arc<AnnotationTable>) -> Self {
        Self { table }
    }

    pub fn frame_count(&self) -> usize {
        self.table.len()
    }

    pub fn occurrence_count(&self) -> usize {
        self.table.values().map(BTreeMap::len).sum()
    }
}

impl AnnotationProvider for InMemoryAnnotations {
    fn occurrences(&self, frame_index: usize) -> Vec<Occurrence> {
        self.table
            .get(&frame_index)
            .map(|objects| objects.values().copied().collect())
            .unwrap_or_default()
    }

    fn has_blur_out(&self, frame_index: usize) -> bool {
        self.table
            .get(&frame_index)
            .is_some_and(|objects| objects.values().any(|o| o.is_blur_out))
    }
}
