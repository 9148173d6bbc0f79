//! Core engine primitives
//!
//! Buffered file access shared by the format parsers and report writers.

pub mod io;
