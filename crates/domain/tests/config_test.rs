use kestrel_dns_domain::{CliOverrides, Config, ConfigError};

const SAMPLE: &str = r#"
[logging]
level = "debug"

[clients]
runtime_ttl_secs = 1800

[[clients.persistent]]
name = "nas"
ids = ["192.168.1.2", "aa:bb:cc:00:00:02"]
tags = ["device_nas"]
use_global_settings = false
filtering_enabled = true

[[clients.persistent]]
name = "guests"
ids = ["192.168.50.0/24"]

[clients.persistent.blocked_services]
ids = ["tiktok"]

[clients.persistent.blocked_services.schedule]
time_zone = "Europe/Berlin"
sun = { start = 0, end = 600 }

[discovery]
dhcp_leases_path = "/var/lib/misc/dnsmasq.leases"
rdns_server = "192.168.1.1:53"

[access]
disallowed_clients = ["192.168.1.66"]
"#;

#[test]
fn test_defaults_are_valid() {
    let config = Config::default();

    assert!(config.validate().is_ok());
    assert_eq!(config.clients.runtime_ttl_secs, 3600);
    assert_eq!(config.discovery.arp_path, "/proc/net/arp");
    assert!(config.discovery.dhcp_leases_path.is_none());
}

#[test]
fn test_sample_config_parses() {
    let config = Config::from_toml(SAMPLE).unwrap();

    assert!(config.validate().is_ok());
    assert_eq!(config.logging.level, "debug");
    assert_eq!(config.clients.runtime_ttl_secs, 1800);
    assert_eq!(config.clients.sweep_interval_secs, 300);
    assert_eq!(config.clients.persistent.len(), 2);
    assert_eq!(config.access.disallowed_clients, vec!["192.168.1.66"]);

    let clients = config.persistent_clients().unwrap();
    assert_eq!(&*clients[0].name, "nas");
    assert!(clients[0].use_own_settings);
    assert_eq!(clients[1].blocked_services.ids, vec!["tiktok"]);
    assert_eq!(
        clients[1].blocked_services.schedule.time_zone(),
        chrono_tz::Europe::Berlin
    );
}

#[test]
fn test_overrides_win() {
    let mut config = Config::from_toml(SAMPLE).unwrap();
    config.apply_overrides(CliOverrides {
        log_level: Some("warn".to_string()),
        runtime_ttl_secs: Some(60),
        ..Default::default()
    });

    assert_eq!(config.logging.level, "warn");
    assert_eq!(config.clients.runtime_ttl_secs, 60);
}

#[test]
fn test_zero_interval_rejected() {
    let config = Config::from_toml("[clients]\nsweep_interval_secs = 0\n").unwrap();

    assert!(matches!(config.validate(), Err(ConfigError::Validation(_))));
}

#[test]
fn test_unknown_log_level_rejected() {
    let config = Config::from_toml("[logging]\nlevel = \"loud\"\n").unwrap();

    assert!(config.validate().is_err());
}

#[test]
fn test_invalid_persistent_client_reported_by_name() {
    let config = Config::from_toml(
        r#"
[[clients.persistent]]
name = "broken"
ids = ["10.0.0.1"]
tags = ["device_toaster"]
"#,
    )
    .unwrap();

    match config.persistent_clients() {
        Err(ConfigError::InvalidClient { name, .. }) => assert_eq!(name, "broken"),
        other => panic!("unexpected result: {other:?}"),
    }
}

#[test]
fn test_missing_file_reported() {
    let result = Config::load(Some("/nonexistent/kestrel-dns.toml"), CliOverrides::default());

    assert!(matches!(result, Err(ConfigError::FileRead { .. })));
}
