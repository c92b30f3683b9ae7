pub mod discovery;
pub mod registry;

pub use discovery::build_job_runner;
pub use registry::RegistryServices;
