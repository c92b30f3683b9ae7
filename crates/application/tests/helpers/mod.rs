#![allow(dead_code)]

mod mock_ports;

pub use mock_ports::*;

use kestrel_dns_domain::{Client, Identifier};

pub fn make_client(name: &str, ids: &[&str]) -> Client {
    Client::new(
        name,
        ids.iter().map(|s| Identifier::parse(s).unwrap()).collect(),
    )
}
