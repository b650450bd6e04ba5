//! Pixelsmith - image conversion toolkit
//!
//! Opens PNG and binary PNM files, re-renders them through the
//! `pixelsmith-core` pipeline and saves the result.
//! This library exposes modules for integration testing.

pub mod error;
pub mod models;
pub mod services;
