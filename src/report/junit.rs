use crate::report::report_model::SuiteReport;
use crate::scenario::scenario_model::ScenarioResult;

/// Generate a JUnit XML report for CI systems.
///
/// Scenarios become `<testcase>` elements classed by platform; failed
/// assertions and step errors are folded into a single `<failure>` body.
pub fn generate_junit_xml(report: &SuiteReport) -> String {
    let time_attr = report
        .duration_ms
        .map(|ms| format!(" time=\"{:.3}\"", ms as f64 / 1000.0))
        .unwrap_or_default();
    let classname = format!("editor-page.{}", report.platform);

    let mut cases = String::new();
    for result in &report.results {
        if result.passed {
            cases.push_str(&format!(
                "  <testcase name=\"{}\" classname=\"{}\" />\n",
                escape_xml(&result.scenario_name),
                escape_xml(&classname)
            ));
            continue;
        }

        let (message, body) = failure_details(result);
        cases.push_str(&format!(
            "  <testcase name=\"{name}\" classname=\"{class}\">\n    <failure message=\"{message}\" type=\"{kind}\">{body}</failure>\n  </testcase>\n",
            name = escape_xml(&result.scenario_name),
            class = escape_xml(&classname),
            message = escape_xml(&message),
            kind = if result.error.is_some() { "StepError" } else { "AssertionFailure" },
            body = escape_xml(&body),
        ));
    }

    format!(
        "<?xml version=\"1.0\" encoding=\"UTF-8\"?>\n<testsuite name=\"{name}\" tests=\"{tests}\" failures=\"{failures}\"{time}>\n{cases}</testsuite>\n",
        name = escape_xml(&report.suite_name),
        tests = report.total,
        failures = report.failed,
        time = time_attr,
        cases = cases,
    )
}

fn failure_details(result: &ScenarioResult) -> (String, String) {
    let mut lines: Vec<String> = result
        .assertion_results
        .iter()
        .filter(|ar| !ar.passed)
        .map(|ar| format!("Step {}: {}", ar.step_index, ar.message.as_deref().unwrap_or("assertion failed")))
        .collect();
    let failed_assertions = lines.len();

    if let Some(error) = &result.error {
        lines.push(format!("Error: {}", error));
    }

    let message = if failed_assertions > 0 {
        format!("{} assertion(s) failed", failed_assertions)
    } else {
        "execution error".to_string()
    };
    (message, lines.join("\n"))
}

pub fn escape_xml(s: &str) -> String {
    s.replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
        .replace('"', "&quot;")
        .replace('\'', "&apos;")
}
