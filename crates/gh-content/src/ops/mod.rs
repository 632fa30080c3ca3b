//! High-level content operations: blob read, blob write + commit, and pull
//! request creation.
//!
//! Each operation validates its inputs before touching the network, then runs
//! a chain of dependent API calls where every step consumes the previous
//! step's output. Any failure aborts the remainder and surfaces unchanged.

mod pulls;
mod read;
mod write;

pub use pulls::create_pull_request;
pub use read::read_blob;
pub use write::write_and_commit;

#[cfg(test)]
pub(crate) mod stub;
