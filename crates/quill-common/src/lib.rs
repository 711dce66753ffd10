//! Shared utilities for the Quill rendering engine.

pub mod warning;
