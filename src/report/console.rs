use crate::report::report_model::SuiteReport;
use crate::scenario::scenario_model::Assertion;

/// Format a suite report for terminal output.
///
/// ```text
/// === Editor scenarios (ios) ===
///
/// ✓ PASS  Split paragraph (3 steps, 2 assertions)
/// ✗ FAIL  Reorder blocks (4 steps, 1 assertions)
///     [FAIL] Step 3: BlockText — Paragraph at row 1 has text 'b', expected 'a'
///
/// === Results: 1 passed, 1 failed (2 total) ===
/// ```
pub fn format_console_report(report: &SuiteReport) -> String {
    let mut out = String::new();

    out.push_str(&format!("=== {} ({}) ===\n\n", report.suite_name, report.platform));

    for result in &report.results {
        let marker = if result.passed {
            "\u{2713} PASS"
        } else {
            "\u{2717} FAIL"
        };

        out.push_str(&format!(
            "{}  {} ({} steps, {} assertions)\n",
            marker,
            result.scenario_name,
            result.steps_run,
            result.assertion_results.len()
        ));

        if let Some(ref error) = result.error {
            out.push_str(&format!("    [ERROR] {}\n", error));
        }

        for ar in result.assertion_results.iter().filter(|ar| !ar.passed) {
            out.push_str(&format!(
                "    [FAIL] Step {}: {} \u{2014} {}\n",
                ar.step_index,
                assertion_kind(&ar.assertion),
                ar.message.as_deref().unwrap_or("assertion failed")
            ));
        }
    }

    out.push_str(&format!(
        "\n=== Results: {} passed, {} failed ({} total)",
        report.passed, report.failed, report.total
    ));

    if let Some(ms) = report.duration_ms {
        out.push_str(&format!(" in {:.1}s", ms as f64 / 1000.0));
    }

    out.push_str(" ===\n");
    out
}

fn assertion_kind(assertion: &Assertion) -> &'static str {
    match assertion {
        Assertion::BlockText { .. } => "BlockText",
        Assertion::BlockPresent { .. } => "BlockPresent",
        Assertion::BlockAbsent { .. } => "BlockAbsent",
        Assertion::HtmlEquals { .. } => "HtmlEquals",
        Assertion::TitleEquals { .. } => "TitleEquals",
    }
}
