//! Task tracking REST API
//!
//! CRUD over tasks, users and roles built as a repository / service /
//! routing triad, with a single error pipeline rendering every failure as
//! one JSON envelope.

pub mod database;
pub mod error;
pub mod middleware;
pub mod models;
pub mod repositories;
pub mod routes;
pub mod security;
pub mod services;
pub mod state;
pub mod validation;
