//! Kernel module - server infrastructure and dependencies.

pub mod dead_jobs;
pub mod deps;
pub mod http_prober;
pub mod test_dependencies;
pub mod traits;

pub use dead_jobs::DeadJobCache;
pub use deps::{LedgerRpcAdapter, ServerDeps};
pub use http_prober::HttpStreamProber;
pub use test_dependencies::TestDependencies;
pub use traits::*;
