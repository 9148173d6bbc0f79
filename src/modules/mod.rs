//! Bioinformatics modules built on the engines

pub mod seq;
pub mod io;
pub mod analysis;
