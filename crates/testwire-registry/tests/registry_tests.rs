// SPDX-License-Identifier: MIT OR Apache-2.0
//! Registry lookup and registration tests.

use testwire_events::{GroupInfo, ReportError, Reporter};
use testwire_registry::{RegistryError, ReporterRegistry};

/// Reporter that ignores every event.
struct NullReporter;

impl Reporter for NullReporter {}

// ── Builtins ───────────────────────────────────────────────────────

#[test]
fn builtins_include_teamcity() {
    let registry = ReporterRegistry::with_builtins();
    assert!(registry.contains("teamcity"));
    assert_eq!(
        registry.describe("teamcity"),
        Some("Reports test results as TeamCity service messages")
    );
}

#[test]
fn created_teamcity_reporter_wants_redirection() {
    let registry = ReporterRegistry::with_builtins();
    let reporter = registry.create("teamcity", Box::new(std::io::sink())).unwrap();
    assert!(reporter.preferences().redirect_stdout);
}

#[test]
fn created_reporter_is_usable_through_the_trait_object() {
    let registry = ReporterRegistry::with_builtins();
    let mut reporter = registry.create("teamcity", Box::new(std::io::sink())).unwrap();
    reporter.group_starting(&GroupInfo::new("Suite1")).unwrap();
}

// ── Lookup ─────────────────────────────────────────────────────────

#[test]
fn unknown_name_is_an_error() {
    let registry = ReporterRegistry::with_builtins();
    let err = registry
        .create("junit", Box::new(std::io::sink()))
        .map(|_| ())
        .unwrap_err();
    assert!(matches!(err, RegistryError::UnknownReporter(ref name) if name == "junit"));
    assert_eq!(err.to_string(), "no reporter registered under `junit`");
}

#[test]
fn empty_registry_contains_nothing() {
    let registry = ReporterRegistry::new();
    assert!(!registry.contains("teamcity"));
    assert!(registry.list().is_empty());
}

// ── Registration ───────────────────────────────────────────────────

#[test]
fn custom_registration_and_sorted_listing() {
    let mut registry = ReporterRegistry::with_builtins();
    registry.register("null", "Discards every event", |_out| Box::new(NullReporter));

    assert_eq!(registry.list(), vec!["null", "teamcity"]);
    assert_eq!(registry.describe("null"), Some("Discards every event"));
}

#[test]
fn reregistration_replaces_the_entry() {
    let mut registry = ReporterRegistry::new();
    registry.register("null", "first", |_out| Box::new(NullReporter));
    registry.register("null", "second", |_out| Box::new(NullReporter));
    assert_eq!(registry.describe("null"), Some("second"));
}

#[test]
fn default_hooks_no_op() {
    let mut reporter = NullReporter;
    let result: Result<(), ReportError> = reporter.no_matching_test_cases("*nothing*");
    assert!(result.is_ok());
}
