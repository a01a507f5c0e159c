//! File descriptor reconciliation.
//!
//! Turns the flat, comma-joined parallel lists describing a file batch into
//! typed per-file transfer descriptors:
//!
//! - `reconcile`: length-preserving per-element coercion with lenient failure
//!   handling (`None` sizes, raw flag tokens pass through).
//! - `builder`: positional zip of the reconciled sequences into [`FileSpec`]s.

mod builder;
mod reconcile;
mod types;

pub use builder::build_file_specs;
pub use reconcile::{coerce_flags, coerce_sizes, FileLists, RawFileLists};
pub use types::{FileSpec, FileType, FlagValue, StatusCode};
