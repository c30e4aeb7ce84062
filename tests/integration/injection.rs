//! Rendering commands and parameter blocks from bound hosts.

use weft::engine::{DataInjector, Resolver};
use weft::{Error, Value};

use crate::fixtures::scenario;

#[test]
fn test_action_command_rendering() {
    let scenario = scenario();
    let injector = DataInjector::new(&scenario.hosts);
    let command = scenario.actions[2].attributes["command"].as_str().unwrap();

    assert_eq!(
        injector.inject(command).unwrap(),
        "curl -k https://10.0.0.5:443/health"
    );
}

#[test]
fn test_parameter_block_rendering_through_bound_hosts() {
    let scenario = scenario();
    let action = Resolver::new(&scenario.hosts).bind_hosts(scenario.actions[0].clone());

    // Inject against the action's own view of the inventory.
    let injector = DataInjector::new(&action.all_hosts);
    let options = injector.inject_value(&action.attributes["ansible_options"]).unwrap();

    let expected: Value =
        serde_json::from_str(r#"{"extra_vars": {"upstream": "10.0.1.9"}}"#).unwrap();
    assert_eq!(options, expected);
}

#[test]
fn test_execute_shell_steps_rendering() {
    let scenario = scenario();
    let injector = DataInjector::new(&scenario.hosts);
    let shell = injector.inject_value(&scenario.executes[0].attributes["shell"]).unwrap();

    let expected: Value =
        serde_json::from_str(r#"[{"command": "pytest --base-url http://10.0.0.6"}]"#).unwrap();
    assert_eq!(shell, expected);
}

#[test]
fn test_sequence_of_mappings() {
    let scenario = scenario();
    let injector = DataInjector::new(&scenario.hosts);
    assert_eq!(
        injector.inject("login { db01.credentials[0].user }").unwrap(),
        "login admin"
    );
}

#[test]
fn test_jsonpath_left_for_the_tool() {
    let scenario = scenario();
    let injector = DataInjector::new(&scenario.hosts);
    let text = "oc get pods -o jsonpath='{.items[0].status.podIP}' --server { web_1.ip_address[0] }";
    assert_eq!(
        injector.inject(text).unwrap(),
        "oc get pods -o jsonpath='{.items[0].status.podIP}' --server 10.0.0.6"
    );
}

#[test]
fn test_failure_names_the_offending_reference() {
    let scenario = scenario();
    let injector = DataInjector::new(&scenario.hosts);

    let err = injector.inject("{ web_0.metadata.ports.ssh }").unwrap_err();
    assert!(err.is_reference_error());
    assert!(err.to_string().contains("ssh"));

    let err = injector.inject("{ web_2.ip_address[0] }").unwrap_err();
    assert!(matches!(err, Error::NodeNotFound(ref n) if n == "web_2"));
}
