use async_trait::async_trait;
use kestrel_dns_domain::{DomainError, WhoisInfo};
use std::net::IpAddr;

#[async_trait]
pub trait WhoisResolver: Send + Sync {
    async fn lookup(&self, ip: IpAddr) -> Result<WhoisInfo, DomainError>;
}
