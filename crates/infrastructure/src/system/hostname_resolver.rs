use async_trait::async_trait;
use hickory_proto::op::{Message, MessageType, OpCode, Query, ResponseCode};
use hickory_proto::rr::{DNSClass, Name, RData, RecordType};
use hickory_proto::serialize::binary::{BinEncodable, BinEncoder};
use kestrel_dns_application::ports::HostnameResolver;
use kestrel_dns_domain::DomainError;
use std::net::{IpAddr, SocketAddr};
use std::str::FromStr;
use std::time::Duration;
use tokio::net::UdpSocket;
use tokio::time::timeout;
use tracing::debug;

const MAX_UDP_RESPONSE_SIZE: usize = 4096;

/// Resolves runtime client hostnames with PTR queries sent over UDP to a
/// single (usually local) DNS server.
pub struct PtrHostnameResolver {
    server: SocketAddr,
    timeout: Duration,
    private_only: bool,
}

impl PtrHostnameResolver {
    pub fn new(server: SocketAddr, timeout: Duration) -> Self {
        Self {
            server,
            timeout,
            private_only: true,
        }
    }

    /// Also look up public addresses (off by default).
    pub fn with_public_addresses(mut self, enabled: bool) -> Self {
        self.private_only = !enabled;
        self
    }

    pub fn ip_to_reverse_domain(ip: &IpAddr) -> String {
        match ip {
            IpAddr::V4(ipv4) => {
                let octets = ipv4.octets();
                format!(
                    "{}.{}.{}.{}.in-addr.arpa",
                    octets[3], octets[2], octets[1], octets[0]
                )
            }
            IpAddr::V6(ipv6) => {
                let mut nibbles = Vec::with_capacity(32);
                for byte in ipv6.octets().iter().rev() {
                    nibbles.push(format!("{:x}", byte & 0x0f));
                    nibbles.push(format!("{:x}", (byte >> 4) & 0x0f));
                }
                format!("{}.ip6.arpa", nibbles.join("."))
            }
        }
    }

    fn is_private_or_local(ip: &IpAddr) -> bool {
        match ip {
            IpAddr::V4(v4) => v4.is_private() || v4.is_link_local() || v4.is_loopback(),
            IpAddr::V6(v6) => {
                v6.is_loopback() || v6.is_unique_local() || v6.is_unicast_link_local()
            }
        }
    }

    fn build_query(reverse_domain: &str) -> Result<(u16, Vec<u8>), DomainError> {
        let name = Name::from_str(reverse_domain).map_err(|e| {
            DomainError::InvalidIdentifier(format!("Invalid reverse name '{}': {}", reverse_domain, e))
        })?;

        let mut query = Query::new();
        query.set_name(name);
        query.set_query_type(RecordType::PTR);
        query.set_query_class(DNSClass::IN);

        let id = fastrand::u16(..);
        let mut message = Message::new(id, MessageType::Query, OpCode::Query);
        message.set_recursion_desired(true);
        message.add_query(query);

        let mut buf = Vec::with_capacity(128);
        let mut encoder = BinEncoder::new(&mut buf);
        message.emit(&mut encoder).map_err(|e| {
            DomainError::IoError(format!("Failed to serialize PTR query: {}", e))
        })?;

        Ok((id, buf))
    }

    fn parse_response(id: u16, bytes: &[u8]) -> Result<Option<String>, DomainError> {
        let message = Message::from_vec(bytes)
            .map_err(|e| DomainError::IoError(format!("Malformed PTR response: {}", e)))?;

        if message.id() != id {
            return Err(DomainError::IoError(format!(
                "PTR response id {} does not match query id {}",
                message.id(),
                id
            )));
        }

        match message.response_code() {
            ResponseCode::NoError => {}
            ResponseCode::NXDomain => return Ok(None),
            rcode => {
                return Err(DomainError::IoError(format!("PTR lookup failed: {}", rcode)));
            }
        }

        for record in message.answers() {
            if let RData::PTR(ptr) = record.data() {
                let hostname = ptr.to_utf8();
                let hostname = hostname.trim_end_matches('.');
                if !hostname.is_empty() {
                    return Ok(Some(hostname.to_string()));
                }
            }
        }

        Ok(None)
    }

    async fn exchange(&self, query: &[u8]) -> Result<Vec<u8>, DomainError> {
        let bind_addr: SocketAddr = if self.server.is_ipv4() {
            SocketAddr::from(([0, 0, 0, 0], 0))
        } else {
            SocketAddr::from(([0u16; 8], 0))
        };

        let socket = UdpSocket::bind(bind_addr)
            .await
            .map_err(|e| DomainError::IoError(format!("Failed to bind UDP socket: {}", e)))?;
        socket
            .connect(self.server)
            .await
            .map_err(|e| DomainError::IoError(format!("Failed to reach {}: {}", self.server, e)))?;

        let io = async {
            socket.send(query).await?;
            let mut buf = vec![0u8; MAX_UDP_RESPONSE_SIZE];
            let len = socket.recv(&mut buf).await?;
            buf.truncate(len);
            Ok::<_, std::io::Error>(buf)
        };

        timeout(self.timeout, io)
            .await
            .map_err(|_| DomainError::IoError(format!("Timeout waiting for {}", self.server)))?
            .map_err(|e| DomainError::IoError(format!("UDP exchange with {} failed: {}", self.server, e)))
    }
}

#[async_trait]
impl HostnameResolver for PtrHostnameResolver {
    async fn resolve_hostname(&self, ip: IpAddr) -> Result<Option<String>, DomainError> {
        if self.private_only && !Self::is_private_or_local(&ip) {
            return Ok(None);
        }

        let reverse_domain = Self::ip_to_reverse_domain(&ip);
        debug!(ip = %ip, reverse_domain = %reverse_domain, server = %self.server, "Performing PTR lookup");

        let (id, query) = Self::build_query(&reverse_domain)?;
        let response = self.exchange(&query).await?;
        let hostname = Self::parse_response(id, &response)?;

        debug!(ip = %ip, hostname = ?hostname, "PTR lookup finished");
        Ok(hostname)
    }
}
