//! vetrina: the content backend of a personal site.
//!
//! Posts with ordered mixed-media sections, a generated-page layer with
//! time-based revalidation, and best-effort view counting. Presentation is
//! somebody else's job: the HTTP surface returns materialized documents and
//! the chrome renders them.

pub mod application;
pub mod cache;
pub mod config;
pub mod domain;
pub mod infra;
