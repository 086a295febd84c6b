pub mod annotations;
pub mod blurring;
pub mod compositing;
pub mod pipeline;
pub mod shared;
pub mod timeline;
pub mod video;
