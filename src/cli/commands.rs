use crate::cli::config::{AppConfig, DEFAULT_APPIUM_URL, build_capabilities, build_page_options};
use crate::driver::appium::AppiumSession;
use crate::driver::driver::AutomationDriver;
use crate::driver::simulator::SimulatedEditor;
use crate::locator::labels::{block_label, move_down_label, move_up_label};
use crate::locator::queries;
use crate::page::block::BlockName;
use crate::page::editor_page::EditorPage;
use crate::platform::platform::Platform;
use crate::platform::strategy::strategy_for;
use crate::report::console::format_console_report;
use crate::report::junit::generate_junit_xml;
use crate::report::report_model::SuiteReport;
use crate::scenario::runner::ScenarioRunner;
use crate::scenario::scenario_model::{Scenario, ScenarioResult};
use crate::trace::logger::TraceLogger;

// ============================================================================
// run subcommand
// ============================================================================

/// Run scenarios and return whether all passed.
pub fn cmd_run(
    scenario_path: &str,
    driver: &str,
    format: &str,
    output: Option<&str>,
    platform: Platform,
    appium_url: Option<&str>,
    trace_path: Option<&str>,
    config: &AppConfig,
    verbose: u8,
) -> Result<bool, Box<dyn std::error::Error>> {
    let scenarios = load_scenarios(scenario_path)?;

    if scenarios.is_empty() {
        eprintln!("No scenarios found at: {}", scenario_path);
        return Ok(true);
    }

    if verbose > 0 {
        eprintln!(
            "Running {} scenarios on {} via {}...",
            scenarios.len(),
            platform,
            driver
        );
    }

    let options = build_page_options(platform, config);
    let tracer = || match trace_path {
        Some(path) => TraceLogger::new(path),
        None => TraceLogger::disabled(),
    };
    let start = std::time::Instant::now();

    let results = match driver {
        "simulator" => {
            let mut results = Vec::new();
            for scenario in &scenarios {
                // Each scenario starts from an empty document.
                let editor = SimulatedEditor::new(platform);
                let mut page = EditorPage::with_options(editor, options.clone())?.with_tracer(tracer());
                results.extend(run_all(std::slice::from_ref(scenario), &mut page, verbose));
            }
            results
        }
        "appium" => {
            let url = appium_url.unwrap_or(DEFAULT_APPIUM_URL);
            let session = AppiumSession::start(url, build_capabilities(platform, config))?;
            if verbose > 1 {
                eprintln!("  Appium session {} on {}", session.session_id(), url);
            }
            let mut page = EditorPage::with_options(session, options)?.with_tracer(tracer());
            let results = run_all(&scenarios, &mut page, verbose);
            page.into_driver().quit()?;
            results
        }
        other => {
            return Err(format!("unknown driver '{}' (expected appium or simulator)", other).into());
        }
    };

    let duration = start.elapsed().as_millis();
    let report = SuiteReport::from_results("Editor scenarios", &platform.to_string(), results)
        .with_duration(duration);
    let all_passed = report.all_passed();

    let output_content = match format {
        "junit" => generate_junit_xml(&report),
        _ => format_console_report(&report),
    };

    match output {
        Some(path) => std::fs::write(path, &output_content)?,
        None => print!("{}", output_content),
    }

    Ok(all_passed)
}

fn run_all<D: AutomationDriver>(
    scenarios: &[Scenario],
    page: &mut EditorPage<D>,
    verbose: u8,
) -> Vec<ScenarioResult> {
    scenarios
        .iter()
        .map(|scenario| {
            if verbose > 0 {
                eprintln!("  Running: {}", scenario.name);
            }
            ScenarioRunner::run(scenario, page)
        })
        .collect()
}

/// Load scenarios from a single YAML file or a directory of YAML files.
pub fn load_scenarios(path: &str) -> Result<Vec<Scenario>, Box<dyn std::error::Error>> {
    let metadata = std::fs::metadata(path)?;
    if metadata.is_dir() {
        let mut scenarios = Vec::new();
        for entry in std::fs::read_dir(path)? {
            let p = entry?.path();
            if p.extension().is_some_and(|e| e == "yaml" || e == "yml") {
                let content = std::fs::read_to_string(&p)?;
                scenarios.push(serde_yaml::from_str::<Scenario>(&content)?);
            }
        }
        // Sort by name for deterministic order
        scenarios.sort_by(|a, b| a.name.cmp(&b.name));
        Ok(scenarios)
    } else {
        let content = std::fs::read_to_string(path)?;
        Ok(vec![serde_yaml::from_str(&content)?])
    }
}

// ============================================================================
// locators subcommand
// ============================================================================

/// Render the selectors the page object sends for a block row.
///
/// The text view is matched by the block's label as currently rendered, so
/// the printed value is the one sent for a block with no content yet.
pub fn cmd_locators(block: &str, position: u32, platform: Platform) -> Result<String, Box<dyn std::error::Error>> {
    let block_name: BlockName = block.parse()?;
    let strategy = strategy_for(platform);
    let strategy = strategy.as_ref();
    let empty_label = block_label(block_name.as_str(), position);

    let mut out = String::new();
    out.push_str(&format!("platform:   {}\n", platform));
    out.push_str(&format!("block:      {}\n", queries::block(strategy, block_name, position)));
    out.push_str(&format!(
        "text view:  {}\n",
        queries::text_view(strategy, &empty_label, strategy.text_view_class())
    ));
    out.push_str("            (label re-read at lookup; typed content is appended to it)\n");
    if position > 1 {
        out.push_str(&format!(
            "move up:    {}\n",
            queries::move_control(strategy, block_name, position, move_up_label(position))
        ));
    }
    out.push_str(&format!(
        "move down:  {}\n",
        queries::move_control(strategy, block_name, position, move_down_label(position))
    ));
    out.push_str(&format!("remove:     {}\n", queries::remove_control(strategy, position)));
    Ok(out)
}
