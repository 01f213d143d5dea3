#![allow(clippy::unwrap_used)]
#![allow(clippy::expect_used)]
#![allow(clippy::panic)]

use hits_gateway::config;

#[test]
fn deny_unknown_fields_nested() {
    let bad = r#"
version: 1
gateway:
  listen: "0.0.0.0:8080"
preview:
  timeout: 10000 # typo should fail
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
    assert_eq!(cfg.gateway.listen, "0.0.0.0:8080");
    assert_eq!(cfg.preview.timeout_ms, 10000);
    assert_eq!(cfg.preview.max_urn_len, 250);
}

#[test]
fn full_config() {
    let ok = r#"
version: 1
gateway:
  listen: "127.0.0.1:9000"
preview:
  timeout_ms: 2500
  max_urn_len: 100
"#;
    let cfg = config::load_from_str(ok).expect("must parse");
    assert_eq!(cfg.gateway.listen, "127.0.0.1:9000");
    assert_eq!(cfg.preview.timeout().as_millis(), 2500);
    assert_eq!(cfg.preview.max_urn_len, 100);
}

#[test]
fn unsupported_version() {
    let err = config::load_from_str("version: 2\n").expect_err("must fail");
    assert_eq!(err.client_code().as_str(), "UNSUPPORTED_VERSION");
}

#[test]
fn out_of_range_values() {
    for bad in [
        "version: 1\npreview:\n  timeout_ms: 0\n",
        "version: 1\npreview:\n  max_urn_len: 0\n",
        "version: 1\ngateway:\n  listen: \"not-an-addr\"\n",
    ] {
        let err = config::load_from_str(bad).expect_err("must fail");
        assert_eq!(err.client_code().as_str(), "BAD_REQUEST", "{bad}");
    }
}

#[test]
fn missing_default_file_uses_defaults() {
    let cfg = config::load_or_default("definitely-missing-hits.yaml").expect("defaults");
    assert_eq!(cfg.preview.timeout_ms, 10000);
    assert!(config::load_from_file("definitely-missing-hits.yaml").is_err());
}
