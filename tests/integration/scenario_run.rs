//! A full pass over the fixture scenario, as a runner would drive it.

use weft::config::Config;
use weft::engine::DataInjector;
use weft::pipeline::{sort_tasks, BoundResource, PipelineFactory, TaskKind};
use weft::scenario::STATUS_FAILED;
use weft::{FilterOptions, Scenario};

use crate::fixtures::scenario_file;

#[test]
fn test_full_run() {
    let (_dir, path) = scenario_file();
    let mut scenario = Scenario::load(&path).unwrap();
    let config = Config::default();
    let options = FilterOptions::default();

    let order = sort_tasks(&["cleanup", "orchestrate", "provision", "execute", "report"]).unwrap();
    assert_eq!(order, vec!["provision", "orchestrate", "execute", "report", "cleanup"]);

    // on_start notifications for provision fire once provision is recorded as started.
    scenario.state.record_passed("provision");
    let notify = PipelineFactory::get_pipeline("on_start")
        .build(&scenario, &options, &config)
        .unwrap();
    assert_eq!(notify.resource_names(), vec!["kickoff"]);

    let provision = PipelineFactory::get_pipeline("provision")
        .build(&scenario, &options, &config)
        .unwrap();
    assert_eq!(provision.resource_names(), vec!["web_0", "web_1", "db01"]);

    let orchestrate = PipelineFactory::get_pipeline("orchestrate")
        .build(&scenario, &options, &config)
        .unwrap();
    assert_eq!(
        orchestrate.resource_names(),
        vec!["install_nginx", "init_db", "smoke_check"]
    );

    // Render the smoke check through the hosts bound to it.
    let smoke = match &orchestrate.tasks[2].resource {
        BoundResource::Action(action) => action.clone(),
        other => panic!("expected action, got {:?}", other),
    };
    let command = smoke.attributes["command"].as_str().unwrap();
    assert_eq!(
        DataInjector::new(&smoke.all_hosts).inject(command).unwrap(),
        "curl -k https://10.0.0.5:443/health"
    );

    let report = PipelineFactory::get_pipeline("report")
        .build(&scenario, &options, &config)
        .unwrap();
    assert_eq!(report.task, TaskKind::Report);
    assert_eq!(report.resource_names(), vec!["junit_upload"]);

    let cleanup = PipelineFactory::get_pipeline("cleanup")
        .build(&scenario, &options, &config)
        .unwrap();
    assert_eq!(
        cleanup.resource_names(),
        vec!["init_db", "db01", "web_1", "web_0"]
    );
}

#[test]
fn test_rerun_resumes_from_failed_action() {
    let (_dir, path) = scenario_file();
    let mut scenario = Scenario::load(&path).unwrap();
    scenario.actions[1].status = STATUS_FAILED;

    let orchestrate = PipelineFactory::get_pipeline("orchestrate")
        .build(&scenario, &FilterOptions::default(), &Config::default())
        .unwrap();
    assert_eq!(orchestrate.resource_names(), vec!["init_db", "smoke_check"]);

    // Cleanup still covers the whole scenario.
    let cleanup = PipelineFactory::get_pipeline("cleanup")
        .build(&scenario, &FilterOptions::default(), &Config::default())
        .unwrap();
    assert_eq!(cleanup.resource_names()[0], "init_db");
}

#[test]
fn test_label_selection_across_pipelines() {
    let (_dir, path) = scenario_file();
    let scenario = Scenario::load(&path).unwrap();
    let config = Config::default();

    let data_only = FilterOptions::with_labels(&["data"]);
    let orchestrate = PipelineFactory::get_pipeline("orchestrate")
        .build(&scenario, &data_only, &config)
        .unwrap();
    assert_eq!(orchestrate.resource_names(), vec!["init_db"]);

    let skip_app = FilterOptions::with_skip_labels(&["app"]);
    let execute = PipelineFactory::get_pipeline("execute")
        .build(&scenario, &skip_app, &config)
        .unwrap();
    assert!(execute.tasks.is_empty());

    let validate = PipelineFactory::get_pipeline("validate")
        .build(&scenario, &skip_app, &config)
        .unwrap();
    // Reports and notifications carry no labels, so skip-labels keeps them.
    assert_eq!(
        validate.resource_names(),
        vec![
            "db01",
            "init_db",
            "junit_upload",
            "kickoff",
            "all_green",
            "page_oncall",
            "summary",
            "manual"
        ]
    );
}

#[test]
fn test_concurrency_follows_config() {
    let (_dir, path) = scenario_file();
    let scenario = Scenario::load(&path).unwrap();
    let mut config = Config::default();
    config.task_concurrency.execute = true;

    let execute = PipelineFactory::get_pipeline("execute")
        .build(&scenario, &FilterOptions::default(), &config)
        .unwrap();
    assert!(execute.tasks.iter().all(|t| t.concurrent));

    let orchestrate = PipelineFactory::get_pipeline("orchestrate")
        .build(&scenario, &FilterOptions::default(), &config)
        .unwrap();
    assert!(orchestrate.tasks.iter().all(|t| !t.concurrent));
}
