//! music2m3u library - shared modules for the `music2m3u` and `findit` binaries.

pub mod convert;
pub mod library;
pub mod m3u;
pub mod matcher;
pub mod models;
pub mod normalize;
pub mod paths;
pub mod playlist;
pub mod progress;
