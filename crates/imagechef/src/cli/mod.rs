//! Command handlers for the `imagechef` binary.

pub mod config;
pub mod gif;
pub mod interactive;
pub mod mp4;
pub mod process;
