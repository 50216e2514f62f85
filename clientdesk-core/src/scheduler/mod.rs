// src/scheduler/mod.rs
//
// Integration with the hosted scheduler that fires `/check-inactive-clients`.
// Cron evaluation happens on their side; we only register schedules and check
// the signatures on incoming calls.

pub mod qstash;
pub mod signature;

pub use qstash::{validate_cron, QstashClient, ScheduleInfo, ScheduleRegistry, ScheduleRequest};
pub use signature::SignatureVerifier;
