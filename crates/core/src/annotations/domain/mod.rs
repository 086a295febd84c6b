pub mod annotation_provider;
