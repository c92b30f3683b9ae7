pub mod client_sync;
pub mod runner;
pub mod runtime_sweep;

pub use client_sync::ClientSyncJob;
pub use runner::JobRunner;
pub use runtime_sweep::RuntimeSweepJob;
