use chrono::Weekday;
use kestrel_dns_domain::{
    BlockedServicesConfig, Client, ClientRecord, DayRange, DomainError, Identifier,
    SafeSearchConfig, WeeklySchedule,
};

fn full_client() -> Client {
    let schedule = WeeklySchedule::empty()
        .with_time_zone(chrono_tz::Europe::Paris)
        .with_day(Weekday::Mon, DayRange::new(22 * 60, 23 * 60).unwrap())
        .with_day(Weekday::Sat, DayRange::new(0, 8 * 60).unwrap());

    let mut client = Client::new(
        "kids-room",
        vec![
            Identifier::parse("192.168.1.30").unwrap(),
            Identifier::parse("192.168.2.0/24").unwrap(),
            Identifier::parse("aa:bb:cc:dd:ee:01").unwrap(),
            Identifier::parse("kids-phone").unwrap(),
        ],
    );
    client.tags = vec!["device_phone".to_string(), "user_child".to_string()];
    client.upstreams = vec!["https://dns.example/dns-query".to_string()];
    client.use_own_settings = true;
    client.filtering_enabled = true;
    client.parental_enabled = true;
    client.safe_search = SafeSearchConfig::all_engines();
    client.use_own_blocked_services = true;
    client.blocked_services = BlockedServicesConfig::new(
        schedule,
        vec!["tiktok".to_string(), "youtube".to_string()],
    )
    .unwrap();
    client.ignore_query_log = true;
    client.upstreams_cache_enabled = true;
    client.upstreams_cache_size = 4096;
    client
}

#[test]
fn test_export_then_import_reproduces_client() {
    let client = full_client();

    let record = ClientRecord::from(&client);
    let restored = Client::try_from(record).unwrap();

    assert_eq!(restored, client);
}

#[test]
fn test_record_survives_json_round_trip() {
    let client = full_client();
    let json = serde_json::to_string(&ClientRecord::from(&client)).unwrap();

    let record: ClientRecord = serde_json::from_str(&json).unwrap();

    assert_eq!(Client::try_from(record).unwrap(), client);
}

#[test]
fn test_record_defaults_to_global_settings() {
    let record: ClientRecord =
        serde_json::from_str(r#"{"name":"printer","ids":["10.0.0.9"]}"#).unwrap();

    let client = Client::try_from(record).unwrap();

    assert!(!client.use_own_settings);
    assert!(!client.use_own_blocked_services);
    assert!(client.blocked_services.schedule.is_empty());
}

#[test]
fn test_record_with_bad_identifier_rejected() {
    let record: ClientRecord =
        serde_json::from_str(r#"{"name":"x","ids":["Not An Id"]}"#).unwrap();

    assert!(matches!(
        Client::try_from(record),
        Err(DomainError::InvalidIdentifier(_))
    ));
}

#[test]
fn test_record_with_invalid_schedule_rejected_at_parse() {
    let json = r#"{
        "name": "x",
        "ids": ["10.0.0.1"],
        "blocked_services": {"schedule": {"tue": {"start": 900, "end": 100}}, "ids": []}
    }"#;

    assert!(serde_json::from_str::<ClientRecord>(json).is_err());
}
