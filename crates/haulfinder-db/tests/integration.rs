//! Offline unit tests for haulfinder-db pool configuration.
//! These tests do not require a live database connection.

use std::net::{IpAddr, Ipv4Addr, SocketAddr};

use haulfinder_core::{AppConfig, Environment};
use haulfinder_db::{DbError, PoolConfig};

#[test]
fn pool_config_from_app_config_uses_core_values() {
    let app_config = AppConfig {
        database_url: "postgres://example".to_string(),
        env: Environment::Test,
        bind_addr: SocketAddr::new(IpAddr::V4(Ipv4Addr::LOCALHOST), 3000),
        log_level: "info".to_string(),
        db_max_connections: 42,
        db_min_connections: 7,
        db_acquire_timeout_secs: 9,
        geocoder_zip_base_url: "https://api.zippopotam.us".to_string(),
        geocoder_place_base_url: "https://nominatim.openstreetmap.org".to_string(),
        geocoder_timeout_secs: 10,
        geocoder_user_agent: "ua".to_string(),
        search_default_radius_miles: 50.0,
        search_max_page_size: 50,
        search_timeout_secs: 10,
    };

    let pool_config = PoolConfig::from_app_config(&app_config);
    assert_eq!(pool_config.max_connections, 42);
    assert_eq!(pool_config.min_connections, 7);
    assert_eq!(pool_config.acquire_timeout_secs, 9);
}

#[test]
fn pool_config_default_is_sane() {
    let pool_config = PoolConfig::default();
    assert_eq!(pool_config.max_connections, 10);
    assert_eq!(pool_config.min_connections, 1);
    assert_eq!(pool_config.acquire_timeout_secs, 10);
}

#[test]
fn corrupt_row_error_names_the_facility() {
    let err = DbError::CorruptRow {
        id: "f-9".to_string(),
        reason: "invalid location type: quarry".to_string(),
    };
    let message = err.to_string();
    assert!(message.contains("f-9"), "got: {message}");
    assert!(message.contains("quarry"), "got: {message}");
}
