use super::*;

#[test]
fn default_config_is_valid() {
    assert!(validate(&HubdeskConfig::default()).is_ok());
}

#[test]
fn empty_ports_rejected() {
    let mut config = HubdeskConfig::default();
    config.discovery.ports.clear();
    let err = validate(&config).unwrap_err().to_string();
    assert!(err.contains("discovery.ports must list at least one port"));
}

#[test]
fn duplicate_and_zero_ports_rejected() {
    let mut config = HubdeskConfig::default();
    config.discovery.ports = vec![5173, 0, 5173];
    let err = validate(&config).unwrap_err().to_string();
    assert!(err.contains("port 0"));
    assert!(err.contains("5173 more than once"));
}

#[test]
fn interval_longer_than_timeout_rejected() {
    let mut config = HubdeskConfig::default();
    config.discovery.wait_timeout_ms = 500;
    config.discovery.wait_interval_ms = 1000;
    let err = validate(&config).unwrap_err().to_string();
    assert!(err.contains("exceeds discovery.wait_timeout_ms"));
}

#[test]
fn max_retries_out_of_range() {
    let mut config = HubdeskConfig::default();
    config.main_window.max_retries = 0;
    let err = validate(&config).unwrap_err().to_string();
    assert!(err.contains("main_window.max_retries = 0 is out of range [1, 1000]"));
}

#[test]
fn errors_are_collected_together() {
    let mut config = HubdeskConfig::default();
    config.launch.env_var = String::new();
    config.floating_window.compact_height = 0;
    let err = validate(&config).unwrap_err().to_string();
    assert!(err.contains("launch.env_var must not be empty"));
    assert!(err.contains("floating_window.compact_height"));
    assert!(err.contains("; "));
}
