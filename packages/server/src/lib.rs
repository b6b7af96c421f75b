// Job Graph - API Core
//
// Serves transcoding jobs from the ledger over GraphQL, decorated with the
// playlist URL of each stream and whether that stream is currently live.

pub mod config;
pub mod domains;
pub mod kernel;
pub mod server;

pub use config::*;
