//! # Subrecon Core
//!
//! The aggregation-and-validation pipeline:
//!
//! 1. [`sources`] run the discovery tools and collect their raw output.
//! 2. [`aggregator`] canonicalizes, filters and deduplicates it, using the
//!    [`classifier`] to assign every hostname a level.
//! 3. [`validator`] resolves and probes every unique hostname with bounded
//!    concurrency.
//! 4. [`report`] orders the results, computes statistics and writes them out.
//!
//! [`recon::ReconService`] wires the stages together for one run.

pub mod aggregator;
pub mod classifier;
pub mod recon;
pub mod report;
pub mod shutdown;
pub mod sources;
pub mod validator;
