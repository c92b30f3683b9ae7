pub mod access_policy;
pub mod arp_reader;
pub mod hostname_resolver;
pub mod lease_source;
pub mod whois_resolver;

pub use access_policy::{AccessDecision, AccessPolicy};
pub use arp_reader::{ArpReader, ArpTable};
pub use hostname_resolver::HostnameResolver;
pub use lease_source::{DhcpLease, LeaseSource};
pub use whois_resolver::WhoisResolver;
