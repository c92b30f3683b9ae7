use kestrel_dns_application::ClientRegistry;
use kestrel_dns_domain::{DomainError, Observation};
use std::net::IpAddr;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use std::thread;
use std::time::{Duration, Instant};

mod helpers;
use helpers::make_client;

fn ip(s: &str) -> IpAddr {
    s.parse().unwrap()
}

#[test]
fn test_update_is_atomic_for_concurrent_readers() {
    // Arrange - one client alternating between two identifier sets
    let registry = Arc::new(ClientRegistry::default());
    registry
        .add(make_client("laptop", &["10.0.0.1", "10.0.0.2"]))
        .unwrap();
    let stop = Arc::new(AtomicBool::new(false));

    let readers: Vec<_> = (0..4)
        .map(|_| {
            let registry = Arc::clone(&registry);
            let stop = Arc::clone(&stop);
            thread::spawn(move || {
                let mut checks = 0u64;
                while !stop.load(Ordering::Relaxed) {
                    // The name never disappears mid-update.
                    let by_name = registry.get("laptop").expect("client vanished during update");
                    let ids: Vec<String> = by_name.ids.iter().map(|i| i.to_string()).collect();
                    let old = ids == ["10.0.0.1", "10.0.0.2"];
                    let new = ids == ["10.0.0.3", "10.0.0.4"];
                    assert!(old || new, "mixed identifier set {ids:?}");

                    // Whatever the index returns is a complete client owning that address.
                    for addr in ["10.0.0.1", "10.0.0.2", "10.0.0.3", "10.0.0.4"] {
                        if let Some(client) = registry.find_for_query(ip(addr), None) {
                            assert_eq!(&*client.name, "laptop");
                            assert!(client.ids.iter().any(|i| i.to_string() == addr));
                        }
                    }
                    checks += 1;
                }
                checks
            })
        })
        .collect();

    // Act
    for round in 0..500 {
        let ids: &[&str] = if round % 2 == 0 {
            &["10.0.0.3", "10.0.0.4"]
        } else {
            &["10.0.0.1", "10.0.0.2"]
        };
        registry.update("laptop", make_client("laptop", ids)).unwrap();
    }
    stop.store(true, Ordering::Relaxed);

    // Assert
    for reader in readers {
        reader.join().expect("reader panicked");
    }
    assert_eq!(registry.len(), 1);
}

#[test]
fn test_failed_add_leaves_registry_unchanged() {
    // Arrange
    let registry = ClientRegistry::default();
    registry.add(make_client("a", &["10.0.0.1", "a-phone"])).unwrap();

    // Act
    let err = registry
        .add(make_client("b", &["10.0.0.9", "a-phone"]))
        .unwrap_err();

    // Assert
    assert!(matches!(err, DomainError::DuplicateId { .. }));
    assert_eq!(registry.len(), 1);
    assert!(registry.find("10.0.0.9").is_none());
    assert!(registry.get("b").is_none());
}

#[test]
fn test_delete_falls_through_to_runtime_entry() {
    // Arrange
    let registry = ClientRegistry::default();
    let now = Instant::now();
    registry.add(make_client("printer", &["192.168.1.20"])).unwrap();
    let lease = Observation::dhcp(ip("192.168.1.20"), Some("printer".into()), None);
    assert!(!registry.observe_at(lease.clone(), now));

    // Act
    registry.del("printer").unwrap();
    let accepted = registry.observe_at(lease, now);

    // Assert
    assert!(accepted);
    assert!(registry.find_at("192.168.1.20", now).is_none());
    let rc = registry.find_runtime_at(ip("192.168.1.20"), now).unwrap();
    assert_eq!(rc.hostname.as_deref(), Some("printer"));
}

#[test]
fn test_runtime_entry_expires_after_ttl() {
    // Arrange
    let registry = ClientRegistry::new(Duration::from_secs(3600));
    let start = Instant::now();
    registry.observe_at(
        Observation::reverse_dns(ip("10.1.1.1"), "old.lan".into()),
        start,
    );

    // Act
    let later = start + Duration::from_secs(3601);

    // Assert
    assert!(registry.list_at(later).runtime.is_empty());
    assert_eq!(registry.sweep_expired_at(256, later), 1);
    assert_eq!(registry.runtime_len(), 0);
}

#[test]
fn test_list_is_sorted_snapshot() {
    // Arrange
    let registry = ClientRegistry::default();
    let now = Instant::now();
    registry.add(make_client("zulu", &["10.0.0.26"])).unwrap();
    registry.add(make_client("alpha", &["10.0.0.1"])).unwrap();
    for addr in ["10.0.5.9", "10.0.5.1", "10.0.0.26"] {
        registry.observe_at(Observation::reverse_dns(ip(addr), format!("h-{addr}")), now);
    }

    // Act
    let snapshot = registry.list_at(now);

    // Assert
    let names: Vec<_> = snapshot.clients.iter().map(|c| c.name.to_string()).collect();
    let addrs: Vec<_> = snapshot.runtime.iter().map(|r| r.addr.to_string()).collect();
    assert_eq!(names, vec!["alpha", "zulu"]);
    assert_eq!(addrs, vec!["10.0.5.1", "10.0.5.9"]);
}
