use async_trait::async_trait;
use kestrel_dns_application::ports::{DhcpLease, LeaseSource};
use kestrel_dns_domain::{DomainError, HardwareAddr};
use std::net::IpAddr;
use std::time::{SystemTime, UNIX_EPOCH};
use tokio::fs;
use tracing::{debug, warn};

/// Reads the lease database written by dnsmasq.
///
/// Each line is `<expiry> <hwaddr> <ip> <hostname> <client-id>`, where an
/// expiry of `0` means infinite and a hostname of `*` means none. IPv6
/// leases carry an IAID in the hardware column and are kept without a
/// hardware address.
pub struct DnsmasqLeaseReader {
    path: String,
}

impl DnsmasqLeaseReader {
    pub fn new(path: String) -> Self {
        Self { path }
    }

    fn parse(content: &str, now_secs: u64) -> Vec<DhcpLease> {
        let mut leases = Vec::new();

        for line in content.lines() {
            let fields: Vec<&str> = line.split_whitespace().collect();
            if fields.len() < 4 || fields[0] == "duid" {
                continue;
            }

            let expiry: u64 = match fields[0].parse() {
                Ok(expiry) => expiry,
                Err(_) => {
                    warn!(line, "Invalid expiry in lease file");
                    continue;
                }
            };
            if expiry != 0 && expiry <= now_secs {
                continue;
            }

            let addr: IpAddr = match fields[2].parse() {
                Ok(addr) => addr,
                Err(_) => {
                    warn!(ip = fields[2], "Invalid IP in lease file");
                    continue;
                }
            };

            let hardware = fields[1]
                .parse::<HardwareAddr>()
                .ok()
                .filter(|mac| !mac.is_zero());

            let hostname = Some(fields[3])
                .filter(|h| *h != "*" && !h.is_empty())
                .map(str::to_string);

            leases.push(DhcpLease {
                addr,
                hardware,
                hostname,
            });
        }

        leases
    }
}

#[async_trait]
impl LeaseSource for DnsmasqLeaseReader {
    async fn read_leases(&self) -> Result<Vec<DhcpLease>, DomainError> {
        let content = fs::read_to_string(&self.path)
            .await
            .map_err(|e| DomainError::IoError(format!("Failed to read lease file: {}", e)))?;

        let now_secs = SystemTime::now()
            .duration_since(UNIX_EPOCH)
            .map(|d| d.as_secs())
            .unwrap_or_default();

        let leases = Self::parse(&content, now_secs);
        debug!(path = %self.path, leases = leases.len(), "Lease file parsed");
        Ok(leases)
    }
}
