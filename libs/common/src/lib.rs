//! Common library for the TaskFodge backend
//!
//! This crate provides shared infrastructure used by the TaskFodge services,
//! namely database connectivity and the typed database errors that the
//! service layers translate into HTTP responses.

pub mod database;
pub mod error;
