//! Jobs domain - transcoding jobs read from the ledger
//!
//! Architecture:
//!   GraphQL → actions (normalize, derive url/live) → kernel traits (ledger RPC, HTTP probe)

pub mod actions;
pub mod data;
pub mod models;

// Re-export commonly used types
pub use data::{JobValue, VideoProfileData};
pub use models::{Job, JobDetails, JobKind, VideoProfile};
