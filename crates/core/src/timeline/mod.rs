pub mod frame_index_resolver;
pub mod timeline_info;
