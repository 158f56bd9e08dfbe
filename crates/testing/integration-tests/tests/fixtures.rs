//! Runs every fixture under `tests/fixtures` through the driver

use integration_tests::{Expectation, Fixture, fixtures_root, load_fixtures};
use sj_driver::{CheckConfig, check_file, check_source};
use sj_resolve::{CheckError, CheckOptions, Program};

fn init_logging() {
    env_logger::builder().is_test(true).try_init().unwrap_or_default();
}

fn describe(outcome: &Result<Program, CheckError>) -> String {
    match outcome {
        Ok(_) => "success".to_owned(),
        Err(err) => format!("{} error: {err}", err.category()),
    }
}

fn mismatches(fixtures: &[Fixture]) -> Vec<String> {
    fixtures
        .iter()
        .filter_map(|fixture| {
            let outcome = check_source(&fixture.source, &CheckOptions::default());
            (!fixture.expectation.matches(&outcome)).then(|| {
                format!(
                    "{}: expected {:?}, got {}",
                    fixture.name(),
                    fixture.expectation,
                    describe(&outcome)
                )
            })
        })
        .collect()
}

#[test]
fn test_valid_fixtures() {
    init_logging();
    let fixtures = load_fixtures(&fixtures_root().join("valid"), true).unwrap();
    assert!(!fixtures.is_empty(), "no valid fixtures found");

    let failures = mismatches(&fixtures);
    assert!(failures.is_empty(), "{}", failures.join("\n"));
}

#[test]
fn test_invalid_fixtures() {
    init_logging();
    let fixtures = load_fixtures(&fixtures_root().join("invalid"), false).unwrap();
    assert!(!fixtures.is_empty(), "no invalid fixtures found");
    assert!(
        fixtures
            .iter()
            .all(|fixture| fixture.expectation != Expectation::Valid)
    );

    let failures = mismatches(&fixtures);
    assert!(failures.is_empty(), "{}", failures.join("\n"));
}

#[test]
fn test_fixtures_through_files() {
    init_logging();
    let config = CheckConfig::default();

    let valid = fixtures_root().join("valid").join("forward_calls.sjava");
    let program = check_file(&valid, &config).unwrap();
    let names: Vec<&str> = program.registry.names().collect();
    assert_eq!(names, vec!["main", "helper", "other"]);

    let invalid = fixtures_root().join("invalid").join("duplicate_global.sjava");
    let err = check_file(&invalid, &config).unwrap_err();
    assert_eq!(err.exit_status().code(), 1);
}

#[test]
fn test_checks_are_repeatable() {
    let fixtures = load_fixtures(&fixtures_root().join("invalid"), false).unwrap();
    for fixture in &fixtures {
        let first = check_source(&fixture.source, &CheckOptions::default()).map(|_| ());
        let second = check_source(&fixture.source, &CheckOptions::default()).map(|_| ());
        assert_eq!(first, second, "{}", fixture.name());
    }
}
