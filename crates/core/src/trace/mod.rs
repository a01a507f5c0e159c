//! Fire-and-forget telemetry.

mod report;

pub use report::{TraceReport, PILOT_SITENAME_ENV};
