//! Kestrel DNS Domain Layer
pub mod blocked_services;
pub mod client;
pub mod client_record;
pub mod client_store;
pub mod config;
pub mod errors;
pub mod identifier;
pub mod identity_index;
pub mod runtime_cache;
pub mod runtime_client;
pub mod schedule;

pub use blocked_services::{
    is_known_service, validate_service_ids, BlockedServicesConfig, SERVICE_CATALOG,
};
pub use client::{Client, SafeSearchConfig, SUPPORTED_TAGS};
pub use client_record::ClientRecord;
pub use client_store::ClientStore;
pub use config::{CliOverrides, Config, ConfigError};
pub use errors::DomainError;
pub use identifier::{ClientId, HardwareAddr, Identifier};
pub use identity_index::{IdentityIndex, IdentityKey};
pub use runtime_cache::{RuntimeClientCache, DEFAULT_RUNTIME_TTL};
pub use runtime_client::{ClientSource, Observation, RuntimeClient, WhoisInfo};
pub use schedule::{DayRange, WeeklySchedule, MINUTES_PER_DAY};
