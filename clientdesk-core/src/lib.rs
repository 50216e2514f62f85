// src/lib.rs

pub mod db;
pub mod repositories;
pub mod scheduler;
pub mod services;
pub mod tasks;
pub mod test_utils;
pub mod utils;
pub mod web;

pub use db::Database;
pub use clientdesk_common::error::Error;
