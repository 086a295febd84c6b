pub mod in_memory_annotations;
pub mod json_annotation_loader;
