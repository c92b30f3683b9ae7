//! Configuration for Kestrel DNS
//!
//! Structures are organized by concern:
//! - `root`: Main configuration, loading and CLI overrides
//! - `logging`: Logging settings
//! - `clients`: Persistent clients and runtime-client lifetime
//! - `discovery`: Passive client discovery (ARP, DHCP leases, reverse DNS)
//! - `access`: Allowed / disallowed client lists
//! - `errors`: Configuration errors

pub mod access;
pub mod clients;
pub mod discovery;
pub mod errors;
pub mod logging;
pub mod root;

pub use access::AccessConfig;
pub use clients::ClientsConfig;
pub use discovery::DiscoveryConfig;
pub use errors::ConfigError;
pub use logging::LoggingConfig;
pub use root::{CliOverrides, Config};
