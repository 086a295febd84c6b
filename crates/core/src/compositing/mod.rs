pub mod censorship_compositor;
pub mod presentation;
pub mod region_compositor;
