use async_trait::async_trait;
use kestrel_dns_application::ports::{ArpReader, ArpTable};
use kestrel_dns_domain::{DomainError, HardwareAddr};
use std::net::IpAddr;
use std::str::FromStr;
use tokio::fs;
use tracing::{debug, warn};

/// Flag bit for a resolved neighbour (ATF_COM).
const ATF_COM: u32 = 0x2;

/// Linux ARP cache reader (reads /proc/net/arp)
pub struct LinuxArpReader {
    arp_path: String,
}

impl LinuxArpReader {
    pub fn new() -> Self {
        Self {
            arp_path: "/proc/net/arp".to_string(),
        }
    }

    /// Create a new LinuxArpReader with a custom ARP file path (useful for testing)
    pub fn with_path(path: String) -> Self {
        Self { arp_path: path }
    }

    // Permanent entries read 0x6 (ATF_PERM | ATF_COM).
    fn is_complete(flags: &str) -> bool {
        let hex = flags.trim_start_matches("0x");
        u32::from_str_radix(hex, 16).is_ok_and(|bits| bits & ATF_COM != 0)
    }

    fn parse(content: &str) -> ArpTable {
        let mut arp_table = ArpTable::new();

        // IP address       HW type     Flags       HW address            Mask     Device
        // 192.168.1.1      0x1         0x2         aa:bb:cc:dd:ee:ff     *        eth0
        for line in content.lines().skip(1) {
            let fields: Vec<&str> = line.split_whitespace().collect();
            if fields.len() < 4 {
                continue;
            }

            let ip_str = fields[0];
            let flags = fields[2];
            let mac_str = fields[3];

            if !Self::is_complete(flags) {
                continue;
            }

            let mac = match HardwareAddr::from_str(mac_str) {
                Ok(mac) if !mac.is_zero() => mac,
                Ok(_) => continue,
                Err(_) => {
                    warn!(ip = ip_str, mac = mac_str, "Invalid MAC address format in ARP table");
                    continue;
                }
            };

            match IpAddr::from_str(ip_str) {
                Ok(ip) => {
                    arp_table.insert(ip, mac);
                }
                Err(e) => {
                    warn!(error = %e, ip = ip_str, "Invalid IP in ARP table");
                }
            }
        }

        arp_table
    }
}

impl Default for LinuxArpReader {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl ArpReader for LinuxArpReader {
    async fn read_arp_table(&self) -> Result<ArpTable, DomainError> {
        let content = fs::read_to_string(&self.arp_path)
            .await
            .map_err(|e| DomainError::IoError(format!("Failed to read ARP cache: {}", e)))?;

        let arp_table = Self::parse(&content);

        debug!(entries = arp_table.len(), "ARP table parsed");
        Ok(arp_table)
    }
}
