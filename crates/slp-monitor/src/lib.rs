//! Identity resolution and eligibility ranking for sustainable livelihood
//! program monitoring.
//!
//! Admin consoles for the program join caretakers and visit records to
//! associations by hand-entered names. This crate reconciles those loose
//! labels, aggregates site-visit history per project/association pair, and
//! derives a bounded performance score plus the renewal and livestock
//! expansion eligibility gates, exposed behind a thin axum delivery layer.

pub mod config;
pub mod error;
pub mod telemetry;
pub mod workflows;
