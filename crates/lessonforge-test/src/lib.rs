//! Shared test fixtures for LessonForge crates.
//!
//! This crate provides problem builders, an independent assignment checker
//! and backend doubles. It does NOT depend on `lessonforge-scoring` so that
//! crate can use it as a dev-dependency.
//!
//! - [`problems`] - Small timetabling problems with known properties
//! - [`verify`] - Hard rule check of a solved assignment
//! - [`backend`] - Counting and stub solver backends
//!
//! # Usage
//!
//! ```toml
//! [dev-dependencies]
//! lessonforge-test = { workspace = true }
//! ```

pub mod backend;
pub mod problems;
pub mod verify;

pub use backend::{CountingBackend, StubBackend};
pub use problems::slot;
pub use verify::{verify_assignment, Violation};
