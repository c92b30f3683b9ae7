use async_trait::async_trait;
use kestrel_dns_domain::DomainError;
use std::net::IpAddr;

#[async_trait]
pub trait HostnameResolver: Send + Sync {
    /// Reverse lookup; `Ok(None)` when the address has no PTR record.
    async fn resolve_hostname(&self, ip: IpAddr) -> Result<Option<String>, DomainError>;
}
