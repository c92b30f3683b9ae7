pub mod arp_reader;
pub mod dhcp_leases;
pub mod hostname_resolver;

pub use arp_reader::LinuxArpReader;
pub use dhcp_leases::DnsmasqLeaseReader;
pub use hostname_resolver::PtrHostnameResolver;
