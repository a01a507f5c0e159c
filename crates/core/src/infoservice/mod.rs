//! Site/queue metadata resolution.

mod service;
mod types;

pub use service::InfoService;
pub use types::{InfoServiceError, QueueData};
