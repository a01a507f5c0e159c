//! Transfer dispatch.
//!
//! The dispatcher selects one of two backend variants (standard or
//! event-service merge), assembles the fixed options bundle and invokes the
//! backend exactly once over the whole descriptor batch. Backends get
//! temporary write access to descriptor outcome fields for the duration of
//! that call; a hard backend failure is captured as a single global error
//! rather than propagated.

mod dispatcher;
mod es_merge;
mod fetch;
mod standard;
mod types;

pub use dispatcher::{dispatch, DispatchOutcome, TransferBackend, DISPATCH_ERROR_CODE};
pub use es_merge::EventServiceClient;
pub use standard::StandardClient;
pub use types::{Activity, TransferClient, TransferError, TransferOptions};
