//! # Subrecon Common
//!
//! Types shared by every layer of the workspace: the run [`config`], the
//! [`error`] taxonomy, and the domain [`models`] (targets, subdomains,
//! validation records, reports).

pub mod config;
pub mod error;
pub mod log;
pub mod models;
