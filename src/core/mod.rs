// snapsift - core/mod.rs
//
// Core transformer layer: pure (text) -> (result) functions.
// Must NOT perform file or network I/O; the app layer owns all of that.

pub mod clean;
pub mod export;
pub mod extract;
pub mod model;
