// SPDX-License-Identifier: MIT OR Apache-2.0
//! Full-run scenarios: a scripted event stream driven through a
//! registry-created reporter, asserting on the byte stream a CI parser
//! would see.

use std::io::{self, Write};
use std::sync::{Arc, Mutex};

use testwire::dispatch;
use testwire::events::{
    AssertionStats, ExpressionInfo, GroupInfo, GroupStats, LifecycleEvent, ResultKind, SectionInfo,
    SourceLocation, TestCaseInfo, TestCaseStats,
};
use testwire::registry::ReporterRegistry;

/// Writer the test keeps a handle to after lending it to the reporter.
#[derive(Clone, Default)]
struct SharedBuf(Arc<Mutex<Vec<u8>>>);

impl SharedBuf {
    fn contents(&self) -> String {
        String::from_utf8(self.0.lock().unwrap().clone()).unwrap()
    }
}

impl Write for SharedBuf {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        self.0.lock().unwrap().extend_from_slice(buf);
        Ok(buf.len())
    }

    fn flush(&mut self) -> io::Result<()> {
        Ok(())
    }
}

/// One group, a passing case with captured stdout, then a failing case.
fn scripted_run() -> Vec<LifecycleEvent> {
    vec![
        LifecycleEvent::GroupStarting {
            group: GroupInfo::new("Suite1"),
        },
        LifecycleEvent::TestCaseStarting {
            test_case: TestCaseInfo::new("History: starts empty"),
        },
        LifecycleEvent::SectionStarting {
            section: SectionInfo::new("History: starts empty")
                .at(SourceLocation::new("tests/history.rs", 12)),
        },
        LifecycleEvent::AssertionEnded {
            stats: AssertionStats::new(ResultKind::Ok),
        },
        LifecycleEvent::SectionEnded {
            section: SectionInfo::new("History: starts empty"),
        },
        LifecycleEvent::TestCaseEnded {
            stats: TestCaseStats {
                info: TestCaseInfo::new("History: starts empty"),
                stdout: "hello\n".to_string(),
                stderr: String::new(),
            },
        },
        LifecycleEvent::TestCaseStarting {
            test_case: TestCaseInfo::new("History: rejects overflow"),
        },
        LifecycleEvent::SectionStarting {
            section: SectionInfo::new("History: rejects overflow")
                .at(SourceLocation::new("tests/history.rs", 31)),
        },
        LifecycleEvent::AssertionEnded {
            stats: AssertionStats::new(ResultKind::ExpressionFailed)
                .with_expression(ExpressionInfo::new("len == 3", "4 == 3"))
                .with_location(SourceLocation::new("tests/history.rs", 35)),
        },
        LifecycleEvent::SectionEnded {
            section: SectionInfo::new("History: rejects overflow"),
        },
        LifecycleEvent::TestCaseEnded {
            stats: TestCaseStats::new(TestCaseInfo::new("History: rejects overflow")),
        },
        LifecycleEvent::GroupEnded {
            stats: GroupStats {
                info: GroupInfo::new("Suite1"),
            },
        },
    ]
}

fn run_events(events: &[LifecycleEvent]) -> String {
    let buf = SharedBuf::default();
    let registry = ReporterRegistry::with_builtins();
    let mut reporter = registry
        .create("teamcity", Box::new(buf.clone()))
        .unwrap();
    for event in events {
        dispatch(&mut *reporter, event).unwrap();
    }
    buf.contents()
}

// ── Scenarios ──────────────────────────────────────────────────────

#[test]
fn full_run_transcript() {
    let out = run_events(&scripted_run());

    // Suite bracketing.
    assert!(out.starts_with("##teamcity[testSuiteStarted name='Suite1']\n"));
    assert!(out.ends_with("##teamcity[testSuiteFinished name='Suite1']\n"));

    // Passing case: started, captured stdout, finished, no stderr.
    assert!(out.contains("##teamcity[testStarted name='History: starts empty']\n"));
    assert!(out.contains(
        "##teamcity[testStdOut name='History: starts empty' out='hello|n']\n"
    ));
    assert!(out.contains("##teamcity[testFinished name='History: starts empty']\n"));
    assert!(!out.contains("testStdErr"));

    // Failing case: one header, one failure line carrying the
    // expansion and the assertion's location.
    assert_eq!(out.matches(&"-".repeat(79)).count(), 2);
    assert!(out.contains("History: rejects overflow\n"));
    assert!(out.contains("tests/history.rs:31\n"));
    assert!(out.contains(
        "##teamcity[testFailed name='History: rejects overflow' \
         message='expression failed|n  len == 3|nwith expansion:|n  4 == 3|n|n\
         tests/history.rs:35|n---------------------------------------']\n"
    ));
}

#[test]
fn messages_are_ordered_and_line_oriented() {
    let out = run_events(&scripted_run());

    let positions: Vec<usize> = [
        "##teamcity[testSuiteStarted",
        "##teamcity[testStarted name='History: starts empty'",
        "##teamcity[testStdOut",
        "##teamcity[testFinished name='History: starts empty'",
        "##teamcity[testStarted name='History: rejects overflow'",
        "##teamcity[testFailed",
        "##teamcity[testFinished name='History: rejects overflow'",
        "##teamcity[testSuiteFinished",
    ]
    .iter()
    .map(|needle| out.find(needle).unwrap_or_else(|| panic!("missing {needle}")))
    .collect();

    assert!(positions.windows(2).all(|w| w[0] < w[1]), "{positions:?}");

    // Every protocol line is self-contained.
    for line in out.lines().filter(|l| l.starts_with("##teamcity[")) {
        assert!(line.ends_with(']'), "unterminated message: {line}");
    }
}

#[test]
fn captured_stream_replays_identically() {
    let events = scripted_run();
    let direct = run_events(&events);

    // Capture the stream as JSONL, the way a runner would persist it.
    let jsonl: String = events
        .iter()
        .map(|e| serde_json::to_string(e).unwrap() + "\n")
        .collect();

    let replayed: Vec<LifecycleEvent> = jsonl
        .lines()
        .map(|line| serde_json::from_str(line).unwrap())
        .collect();

    assert_eq!(run_events(&replayed), direct);
}

#[test]
fn benign_run_produces_no_failure_output() {
    let events = vec![
        LifecycleEvent::GroupStarting {
            group: GroupInfo::new("g"),
        },
        LifecycleEvent::TestCaseStarting {
            test_case: TestCaseInfo::new("quiet"),
        },
        LifecycleEvent::SectionStarting {
            section: SectionInfo::new("quiet"),
        },
        LifecycleEvent::AssertionEnded {
            stats: AssertionStats::new(ResultKind::Info).with_message("just context"),
        },
        LifecycleEvent::SectionEnded {
            section: SectionInfo::new("quiet"),
        },
        LifecycleEvent::TestCaseEnded {
            stats: TestCaseStats::new(TestCaseInfo::new("quiet")),
        },
        LifecycleEvent::GroupEnded {
            stats: GroupStats {
                info: GroupInfo::new("g"),
            },
        },
    ];

    let out = run_events(&events);
    assert!(!out.contains("testFailed"));
    assert!(!out.contains('-'));
}
