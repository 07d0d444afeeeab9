use editor_page::page::block::BlockName;
use editor_page::report::console::format_console_report;
use editor_page::report::junit::{escape_xml, generate_junit_xml};
use editor_page::report::report_model::SuiteReport;
use editor_page::scenario::scenario_model::{Assertion, AssertionResult, ScenarioResult};

// ============================================================================
// Helper builders
// ============================================================================

fn passing_result(name: &str) -> ScenarioResult {
    ScenarioResult {
        scenario_name: name.to_string(),
        passed: true,
        steps_run: 3,
        assertion_results: vec![AssertionResult {
            step_index: 2,
            assertion: Assertion::TitleEquals {
                expected: "Hello".into(),
            },
            passed: true,
            actual: Some("Hello".into()),
            message: None,
        }],
        error: None,
    }
}

fn failing_result(name: &str) -> ScenarioResult {
    ScenarioResult {
        scenario_name: name.to_string(),
        passed: false,
        steps_run: 4,
        assertion_results: vec![AssertionResult {
            step_index: 3,
            assertion: Assertion::BlockText {
                block: BlockName::Paragraph,
                position: 1,
                expected: "a".into(),
            },
            passed: false,
            actual: Some("b".into()),
            message: Some("Paragraph at row 1 has text 'b', expected 'a'".into()),
        }],
        error: None,
    }
}

fn erroring_result(name: &str) -> ScenarioResult {
    ScenarioResult {
        scenario_name: name.to_string(),
        passed: false,
        steps_run: 1,
        assertion_results: vec![],
        error: Some("Step 0 failed: No Block at position 3".into()),
    }
}

fn mixed_report() -> SuiteReport {
    SuiteReport::from_results(
        "Editor scenarios",
        "android",
        vec![
            passing_result("Split paragraph"),
            failing_result("Reorder blocks"),
            erroring_result("Remove <missing>"),
        ],
    )
}

// ============================================================================
// Report model
// ============================================================================

#[test]
fn report_counts_results() {
    let report = mixed_report();
    assert_eq!(report.total, 3);
    assert_eq!(report.passed, 1);
    assert_eq!(report.failed, 2);
    assert!(!report.all_passed());
    assert_eq!(report.duration_ms, None);
}

#[test]
fn empty_report_counts_as_passed() {
    let report = SuiteReport::from_results("Empty", "ios", vec![]);
    assert_eq!(report.total, 0);
    assert!(report.all_passed());
}

// ============================================================================
// Console
// ============================================================================

#[test]
fn console_report_lists_every_scenario() {
    let out = format_console_report(&mixed_report().with_duration(2500));

    assert!(out.starts_with("=== Editor scenarios (android) ==="));
    assert!(out.contains("\u{2713} PASS  Split paragraph (3 steps, 1 assertions)"));
    assert!(out.contains("\u{2717} FAIL  Reorder blocks (4 steps, 1 assertions)"));
    assert!(out.contains(
        "[FAIL] Step 3: BlockText \u{2014} Paragraph at row 1 has text 'b', expected 'a'"
    ));
    assert!(out.contains("[ERROR] Step 0 failed: No Block at position 3"));
    assert!(out.contains("=== Results: 1 passed, 2 failed (3 total) in 2.5s ==="));
}

#[test]
fn console_report_omits_duration_when_unknown() {
    let report = SuiteReport::from_results("Suite", "ios", vec![passing_result("ok")]);
    let out = format_console_report(&report);
    assert!(out.ends_with("=== Results: 1 passed, 0 failed (1 total) ===\n"));
}

// ============================================================================
// JUnit
// ============================================================================

#[test]
fn junit_has_suite_counts_and_platform_classname() {
    let xml = generate_junit_xml(&mixed_report().with_duration(1234));

    assert!(xml.starts_with("<?xml version=\"1.0\" encoding=\"UTF-8\"?>"));
    assert!(xml.contains(
        "<testsuite name=\"Editor scenarios\" tests=\"3\" failures=\"2\" time=\"1.234\">"
    ));
    assert!(xml.contains(
        "<testcase name=\"Split paragraph\" classname=\"editor-page.android\" />"
    ));
    assert!(xml.trim_end().ends_with("</testsuite>"));
}

#[test]
fn junit_distinguishes_assertion_failures_from_step_errors() {
    let xml = generate_junit_xml(&mixed_report());

    assert!(xml.contains("<failure message=\"1 assertion(s) failed\" type=\"AssertionFailure\">"));
    assert!(xml.contains("<failure message=\"execution error\" type=\"StepError\">"));
    assert!(xml.contains("Error: Step 0 failed: No Block at position 3"));
}

#[test]
fn junit_escapes_names_and_messages() {
    let xml = generate_junit_xml(&mixed_report());
    assert!(xml.contains("name=\"Remove &lt;missing&gt;\""));
    assert!(xml.contains("has text &apos;b&apos;, expected &apos;a&apos;"));
}

#[test]
fn escape_xml_handles_all_special_characters() {
    assert_eq!(
        escape_xml(r#"<a href="x">Tom & 'Jerry'</a>"#),
        "&lt;a href=&quot;x&quot;&gt;Tom &amp; &apos;Jerry&apos;&lt;/a&gt;"
    );
}
