//! Shared library module for the arrowword app crate.
#![allow(missing_docs, clippy::missing_errors_doc, clippy::missing_panics_doc)]

pub mod app;
pub mod cli;
pub mod command;
pub mod driver;
pub mod highscores;
pub mod render;
pub mod version;
