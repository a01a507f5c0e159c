//! Test doubles for the transfer backend seam.

mod mock_transfer_client;

pub use mock_transfer_client::{MockTransferClient, RecordedTransfer};
