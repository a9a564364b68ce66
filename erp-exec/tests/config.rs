use erp_core::State;
use erp_exec::{ConfigError, ODataConfiguration, RpcConfiguration};
use secrecy::ExposeSecret;
use serde_json::json;

fn state(configuration: serde_json::Value) -> State {
    State::initial(json!({ "configuration": configuration })).unwrap()
}

#[test]
fn odata_configuration_accepts_numeric_api_version() {
    let config = ODataConfiguration::from_state(&state(json!({
        "resource": "https://h",
        "apiVersion": 9.2,
        "accessToken": "Bearer t"
    })))
    .unwrap();

    assert_eq!(config.api_version, "9.2");
    assert_eq!(config.access_token.expose_secret(), "Bearer t");
    assert!(!format!("{config:?}").contains("Bearer t"));
}

#[test]
fn odata_configuration_names_the_offending_key() {
    let err = ODataConfiguration::from_state(&state(json!({
        "resource": 1,
        "apiVersion": "1",
        "accessToken": "t"
    })))
    .unwrap_err();
    assert_eq!(
        err,
        ConfigError::Invalid {
            key: "resource",
            expected: "a string"
        }
    );

    let err = ODataConfiguration::from_state(&State::default()).unwrap_err();
    assert_eq!(err, ConfigError::NotAnObject);
}

#[test]
fn rpc_port_may_be_a_string_or_absent() {
    let base = json!({
        "hostUrl": "https://erp",
        "database": "db",
        "username": "u",
        "password": "p"
    });
    let config = RpcConfiguration::from_state(&state(base.clone())).unwrap();
    assert_eq!(config.port, None);

    let mut with_port = base.clone();
    with_port["port"] = json!("8069");
    assert_eq!(
        RpcConfiguration::from_state(&state(with_port)).unwrap().port,
        Some(8069)
    );

    let mut bad_port = base;
    bad_port["port"] = json!(70000);
    assert!(matches!(
        RpcConfiguration::from_state(&state(bad_port)),
        Err(ConfigError::Invalid { key: "port", .. })
    ));
}
