//! Speech synthesis engines and backends.
//!
//! This module contains the BVCU resource-resolution engine and the
//! synthesis backends it can drive.
//!
//! # Available Modules
//!
//! - `bvcu` - BVCU voice directory resolution and engine composition
//! - `espeak` - espeak-ng subprocess backend (espeak-ng required at runtime)

pub mod bvcu;
pub mod espeak;
