use crate::DomainError;
use ipnetwork::IpNetwork;
use std::borrow::Borrow;
use std::fmt;
use std::net::IpAddr;
use std::str::FromStr;
use std::sync::Arc;

/// Maximum length of an opaque client id (it is carried as a DNS label).
pub const MAX_CLIENT_ID_LEN: usize = 64;

/// EUI-48 hardware address as reported by ARP or DHCP.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct HardwareAddr([u8; 6]);

impl HardwareAddr {
    pub const fn new(octets: [u8; 6]) -> Self {
        Self(octets)
    }

    pub fn octets(&self) -> [u8; 6] {
        self.0
    }

    pub fn is_zero(&self) -> bool {
        self.0 == [0; 6]
    }
}

impl FromStr for HardwareAddr {
    type Err = DomainError;

    /// Accepts `aa:bb:cc:dd:ee:ff` or `aa-bb-cc-dd-ee-ff`, any case.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let invalid = || DomainError::InvalidIdentifier(format!("invalid hardware address: {s}"));

        if s.len() != 17 {
            return Err(invalid());
        }

        let separator = if s.contains(':') {
            ':'
        } else if s.contains('-') {
            '-'
        } else {
            return Err(invalid());
        };

        let mut octets = [0u8; 6];
        let mut parts = s.split(separator);
        for octet in octets.iter_mut() {
            let part = parts.next().ok_or_else(invalid)?;
            if part.len() != 2 || !part.chars().all(|c| c.is_ascii_hexdigit()) {
                return Err(invalid());
            }
            *octet = u8::from_str_radix(part, 16).map_err(|_| invalid())?;
        }

        if parts.next().is_some() {
            return Err(invalid());
        }

        Ok(Self(octets))
    }
}

impl fmt::Display for HardwareAddr {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let o = self.0;
        write!(
            f,
            "{:02x}:{:02x}:{:02x}:{:02x}:{:02x}:{:02x}",
            o[0], o[1], o[2], o[3], o[4], o[5]
        )
    }
}

/// Opaque client id, e.g. the first label of a DoH/DoT server name.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ClientId(Arc<str>);

impl ClientId {
    pub fn parse(s: &str) -> Result<Self, DomainError> {
        if s.is_empty() {
            return Err(DomainError::InvalidIdentifier(
                "client id cannot be empty".to_string(),
            ));
        }

        if s.len() > MAX_CLIENT_ID_LEN {
            return Err(DomainError::InvalidIdentifier(format!(
                "client id {s:?} is longer than {MAX_CLIENT_ID_LEN} characters"
            )));
        }

        let valid = s
            .chars()
            .all(|c| c.is_ascii_lowercase() || c.is_ascii_digit() || c == '-');
        if !valid {
            return Err(DomainError::InvalidIdentifier(format!(
                "client id {s:?} may only contain lowercase letters, digits and hyphens"
            )));
        }

        Ok(Self(Arc::from(s)))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl Borrow<str> for ClientId {
    fn borrow(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for ClientId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// A key that binds a persistent client to the devices it covers.
///
/// Lookup precedence is `Exact > Hardware > ClientId > Range`, see
/// [`crate::IdentityIndex::lookup`].
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum Identifier {
    Exact(IpAddr),
    Range(IpNetwork),
    Hardware(HardwareAddr),
    ClientId(ClientId),
}

impl Identifier {
    /// Parses the textual form used in configuration and the control API.
    pub fn parse(s: &str) -> Result<Self, DomainError> {
        let s = s.trim();

        if let Ok(ip) = s.parse::<IpAddr>() {
            return Ok(Self::Exact(ip));
        }

        if s.contains('/') {
            return s.parse::<IpNetwork>().map(Self::Range).map_err(|e| {
                DomainError::InvalidIdentifier(format!("invalid CIDR {s}: {e}"))
            });
        }

        if let Ok(mac) = s.parse::<HardwareAddr>() {
            return Ok(Self::Hardware(mac));
        }

        ClientId::parse(s).map(Self::ClientId)
    }

    /// Whether at most one client may own this identifier.
    pub fn is_exclusive(&self) -> bool {
        !matches!(self, Self::Range(_))
    }
}

impl FromStr for Identifier {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

impl fmt::Display for Identifier {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Exact(ip) => write!(f, "{ip}"),
            Self::Range(net) => write!(f, "{net}"),
            Self::Hardware(mac) => write!(f, "{mac}"),
            Self::ClientId(id) => write!(f, "{id}"),
        }
    }
}
