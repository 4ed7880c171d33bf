// snapsift - app/mod.rs
//
// Application layer: file access, configuration, and dispatch of core
// transformers. Dependencies: core layer.

pub mod config;
pub mod dispatch;
pub mod fs;
