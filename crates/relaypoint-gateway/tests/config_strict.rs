#![allow(clippy::unwrap_used)]
#![allow(clippy::expect_used)]
#![allow(clippy::panic)]

use relaypoint_gateway::config;

#[test]
fn deny_unknown_fields_nested() {
    let bad = r#"
version: 1
gateway:
  listen: "0.0.0.0:5000"
  ping_intervall_ms: 20000 # typo should fail
"#;

    let err = config::load_from_str(bad).expect_err("must fail");
    assert_eq!(err.client_code().as_str(), "BAD_REQUEST");
}

#[test]
fn ok_minimal_config() {
    let ok = r#"
version: 1
"#;
    let cfg = config::load_from_str(ok).expect("must parse");
    assert_eq!(cfg.version, 1);
    assert_eq!(cfg.gateway.listen, "0.0.0.0:5000");
    assert!(cfg.gateway.allowed_origins.is_empty());
}

#[test]
fn reject_unknown_version() {
    let bad = r#"
version: 2
"#;
    let err = config::load_from_str(bad).expect_err("must fail");
    assert_eq!(err.client_code().as_str(), "UNSUPPORTED_VERSION");
}

#[test]
fn reject_idle_not_greater_than_ping() {
    let bad = r#"
version: 1
gateway:
  ping_interval_ms: 20000
  idle_timeout_ms: 20000
"#;
    let err = config::load_from_str(bad).expect_err("must fail");
    assert_eq!(err.client_code().as_str(), "BAD_REQUEST");
}

#[test]
fn origin_allowlist() {
    let ok = r#"
version: 1
gateway:
  allowed_origins: ["https://chat.example.com"]
"#;
    let cfg = config::load_from_str(ok).expect("must parse");
    assert!(cfg.gateway.origin_allowed(Some("https://chat.example.com")));
    assert!(!cfg.gateway.origin_allowed(Some("https://evil.example.com")));
    assert!(!cfg.gateway.origin_allowed(None));
}

#[test]
fn origin_wildcard_allows_all() {
    let ok = r#"
version: 1
gateway:
  allowed_origins: ["*"]
"#;
    let cfg = config::load_from_str(ok).expect("must parse");
    assert!(cfg.gateway.origin_allowed(Some("https://anything.example")));
    assert!(cfg.gateway.origin_allowed(None));
}
