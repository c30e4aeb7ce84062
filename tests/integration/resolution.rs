//! Reference binding against the fixture inventory.

use weft::engine::{resolve_executes, resolve_hosts, Resolver};
use weft::scenario::{Action, Host, Reference};

use crate::fixtures::scenario;

fn bound_names(refs: &[Reference<Host>]) -> Vec<&str> {
    refs.iter().filter_map(Reference::bound).map(|h| h.name.as_str()).collect()
}

/// Given the wildcard reference
/// When resolved against any inventory
/// Then the selection and the full list are the inventory, in order
#[test]
fn test_wildcard_selection_equals_inventory() {
    let scenario = scenario();
    let refs = vec![Reference::from("all")];
    let targets = resolve_hosts(&scenario.hosts, &refs);

    let selected: Vec<Host> = targets.selected().into_iter().cloned().collect();
    assert_eq!(selected, scenario.hosts);
    assert_eq!(targets.all_hosts, scenario.hosts);
}

#[test]
fn test_group_reference_binds_counted_instances() {
    let scenario = scenario();
    let action = Resolver::new(&scenario.hosts).bind_hosts(scenario.actions[0].clone());

    assert_eq!(bound_names(&action.hosts), vec!["web_0", "web_1"]);
    assert_eq!(action.all_hosts.len(), 3);
    // The declared resource keeps its original references.
    assert_eq!(scenario.actions[0].hosts[0].name(), "web");
}

#[test]
fn test_previously_bound_base_resource_matches_instances() {
    let scenario = scenario();
    let mut action = Action::new("redeploy", &[]);
    action.hosts = vec![Reference::Bound(Host::new("web"))];

    let action = Resolver::new(&scenario.hosts).bind_hosts(action);
    assert_eq!(bound_names(&action.hosts), vec!["web_0", "web_1"]);
}

#[test]
fn test_resolving_twice_is_stable() {
    let scenario = scenario();
    let resolver = Resolver::new(&scenario.hosts);
    let once = resolver.bind_hosts(scenario.actions[1].clone());
    let twice = resolver.bind_hosts(once.clone());
    assert_eq!(once, twice);
}

#[test]
fn test_report_binds_execute_and_its_hosts() {
    let scenario = scenario();
    let report = resolve_executes(&scenario.executes, &scenario.hosts, scenario.reports[0].clone())
        .unwrap();

    let execute = report.executes[0].bound().expect("execute bound");
    assert_eq!(execute.name, "api_tests");
    assert_eq!(bound_names(&execute.hosts), vec!["web_0", "web_1"]);
}

/// Given a reference list where one name matches nothing
/// When resolved with logging enabled
/// Then the stray name is reported and logged at WARN
#[test]
fn test_unmatched_reference_is_logged() {
    let temp = tempfile::TempDir::new().unwrap();
    let log_path = temp.path().join("weft.log");
    weft::log::init_at(&log_path, true);

    let hosts = vec![Host::new("web01").with_groups(&["web"])];
    let refs = vec![Reference::from("web"), Reference::from("tpyo")];
    let targets = resolve_hosts(&hosts, &refs);

    assert_eq!(bound_names(&targets.hosts), vec!["web01"]);
    assert_eq!(targets.unmatched, vec!["tpyo"]);

    let log = std::fs::read_to_string(&log_path).unwrap();
    assert!(
        log.lines()
            .any(|l| l.contains("[WARN]") && l.contains("tpyo")),
        "missing WARN line in:\n{}",
        log
    );
}
