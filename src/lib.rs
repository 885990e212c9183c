//! quaderno: a terminal administration console for a blog-post REST backend.
//!
//! The crate is layered top to bottom: `config` loads typed settings,
//! `domain` holds the post draft and its validation rules, `application`
//! owns the renderer-free view state machine and the gateway seam, `infra`
//! provides the HTTP adapter and telemetry, and `presentation` renders the
//! console screens and one-shot commands.

pub mod application;
pub mod config;
pub mod domain;
pub mod infra;
pub mod presentation;
