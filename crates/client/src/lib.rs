pub mod api;
pub mod app;
pub mod audio;
pub mod config;
pub mod error;
pub mod input;
pub mod render;
