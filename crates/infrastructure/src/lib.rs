//! Kestrel DNS Infrastructure Layer
//!
//! Adapters behind the application ports: kernel ARP table, DHCP lease
//! file, PTR lookups over UDP and the static access lists.
pub mod access;
pub mod system;
