//! # Domain Models
//!
//! The data that flows through a reconnaissance run.
//!
//! ## Core Entities
//! * [`target::Domain`]: The validated target domain of a run.
//! * [`subdomain::Subdomain`]: A canonical, deduplicated hostname within the target.
//! * [`record::ValidationRecord`]: The DNS and HTTP outcome for one subdomain.
//! * [`report::RunReport`]: The final, ordered result of a run.
//!
//! ## Value Objects
//! * [`subdomain::Level`]: Depth of a hostname relative to the target.
//! * [`hostname`]: The canonical string form every raw hostname is reduced to.

pub mod hostname;
pub mod record;
pub mod report;
pub mod subdomain;
pub mod target;
