use mkp_config::{load_layered_yaml_from_strings, report_unused_keys, Surface, UnusedKeyPolicy};

/// scenario_unused_keys_warn_or_fail
///
/// 1) Unused keys are detected under Warn without error.
/// 2) Unused keys fail under Fail.
/// 3) Each surface consumes only its own token key.
/// 4) Unused pointers are sorted.

const YAML: &str = r#"
api:
  base_url: "https://api.machinery.test/v1"
  timeout_secs: 15
  token_env:
    admin: "MKP_ADMIN_TOKEN"
    portal: "MKP_PORTAL_TOKEN"
storefront:
  theme: "dark"
  banner: "spring-sale"
"#;

#[test]
fn warn_policy_reports_without_error() {
    let loaded = load_layered_yaml_from_strings(&[YAML]).unwrap();
    let report =
        report_unused_keys(Surface::Admin, &loaded.config_json, UnusedKeyPolicy::Warn).unwrap();

    assert!(!report.is_clean());
    assert!(report
        .unused_leaf_pointers
        .contains(&"/storefront/theme".to_string()));
}

#[test]
fn fail_policy_errors_on_unused_keys() {
    let loaded = load_layered_yaml_from_strings(&[YAML]).unwrap();
    let err = report_unused_keys(Surface::Portal, &loaded.config_json, UnusedKeyPolicy::Fail)
        .unwrap_err();
    assert!(err.to_string().contains("CONFIG_UNUSED_KEYS"));
    assert!(err.to_string().contains("surface=PORTAL"));
}

#[test]
fn surfaces_consume_only_their_own_token_key() {
    let loaded = load_layered_yaml_from_strings(&[YAML]).unwrap();

    let admin =
        report_unused_keys(Surface::Admin, &loaded.config_json, UnusedKeyPolicy::Warn).unwrap();
    assert!(admin
        .unused_leaf_pointers
        .contains(&"/api/token_env/portal".to_string()));
    assert!(!admin
        .unused_leaf_pointers
        .contains(&"/api/token_env/admin".to_string()));

    let portal =
        report_unused_keys(Surface::Portal, &loaded.config_json, UnusedKeyPolicy::Warn).unwrap();
    assert!(portal
        .unused_leaf_pointers
        .contains(&"/api/token_env/admin".to_string()));
}

#[test]
fn unused_pointers_are_sorted() {
    let loaded = load_layered_yaml_from_strings(&[YAML]).unwrap();
    let report =
        report_unused_keys(Surface::Admin, &loaded.config_json, UnusedKeyPolicy::Warn).unwrap();

    assert_eq!(
        report.unused_leaf_pointers,
        vec![
            "/api/token_env/portal".to_string(),
            "/storefront/banner".to_string(),
            "/storefront/theme".to_string(),
        ]
    );
}

#[test]
fn minimal_admin_config_is_clean() {
    let yaml = r#"
api:
  base_url: "https://api.machinery.test/v1"
  token_env:
    admin: "MKP_ADMIN_TOKEN"
"#;
    let loaded = load_layered_yaml_from_strings(&[yaml]).unwrap();
    let report =
        report_unused_keys(Surface::Admin, &loaded.config_json, UnusedKeyPolicy::Fail).unwrap();
    assert!(report.is_clean());
}
