mod common;

use common::{page, page_with, paragraphs};
use editor_page::driver::simulator::SimulatedEditor;
use editor_page::page::block::BlockName;
use editor_page::platform::platform::Platform;
use editor_page::scenario::runner::ScenarioRunner;
use editor_page::scenario::scenario_model::{Assertion, Scenario, ScenarioStep};

fn parse(yaml: &str) -> Scenario {
    serde_yaml::from_str(yaml).unwrap()
}

// =========================================================================
// Scenario parsing
// =========================================================================

#[test]
fn parse_scenario_with_defaults() {
    let scenario = parse(
        r#"
name: "Reorder"
steps:
  - action: send_text
    block: paragraph
    position: 1
    text: "hi"
  - action: move_down
    position: 1
  - action: dismiss_keyboard
"#,
    );

    assert_eq!(scenario.name, "Reorder");
    assert_eq!(scenario.title, None);
    assert_eq!(
        scenario.steps,
        vec![
            ScenarioStep::SendText {
                block: BlockName::Paragraph,
                position: 1,
                text: "hi".into(),
                clear: true,
            },
            ScenarioStep::MoveDown {
                position: 1,
                block: BlockName::Any,
            },
            ScenarioStep::DismissKeyboard,
        ]
    );
}

#[test]
fn parse_assertions() {
    let scenario = parse(
        r#"
name: "Checks"
steps:
  - action: assert
    assertions:
      - type: block_text
        block: list
        position: 2
        expected: "a\nb"
      - type: block_absent
        block: heading
        position: 1
      - type: html_equals
        expected: "<p>x</p>"
"#,
    );

    let ScenarioStep::Assert { assertions } = &scenario.steps[0] else {
        panic!("expected an assert step");
    };
    assert_eq!(assertions.len(), 3);
    assert_eq!(
        assertions[0],
        Assertion::BlockText {
            block: BlockName::List,
            position: 2,
            expected: "a\nb".into(),
        }
    );
}

#[test]
fn unknown_action_is_rejected() {
    let result: Result<Scenario, _> = serde_yaml::from_str(
        r#"
name: "Bad"
steps:
  - action: shake_device
"#,
    );
    assert!(result.is_err());
}

// =========================================================================
// Runner
// =========================================================================

#[test]
fn full_scenario_passes_on_both_platforms() {
    let scenario = parse(
        r#"
name: "Write and reorder"
title: "My post"
steps:
  - action: add_block
    block: paragraph
  - action: send_text
    block: paragraph
    position: 1
    text: "first\nsecond"
  - action: move_up
    position: 2
    block: paragraph
  - action: dismiss_keyboard
  - action: assert
    assertions:
      - type: block_text
        block: paragraph
        position: 1
        expected: "second"
      - type: block_present
        block: paragraph
        position: 2
      - type: block_absent
        block: heading
        position: 1
      - type: title_equals
        expected: "My post"
      - type: html_equals
        expected: "<!-- wp:paragraph -->\n<p>second</p>\n<!-- /wp:paragraph -->\n\n<!-- wp:paragraph -->\n<p>first</p>\n<!-- /wp:paragraph -->"
"#,
    );

    for platform in [Platform::Android, Platform::Ios] {
        let mut page = page(platform, SimulatedEditor::new(platform));
        let result = ScenarioRunner::run(&scenario, &mut page);

        assert!(result.passed, "{}: {:?}", platform, result);
        assert_eq!(result.steps_run, 5);
        assert_eq!(result.assertion_results.len(), 5);
        assert!(result.error.is_none());
        assert!(!page.driver().keyboard_visible());
    }
}

#[test]
fn failing_step_stops_the_run() {
    let scenario = parse(
        r#"
name: "Bad move"
steps:
  - action: move_up
    position: 1
  - action: remove
    position: 1
"#,
    );

    let mut page = page_with(Platform::Ios, paragraphs(&["only"]));
    let result = ScenarioRunner::run(&scenario, &mut page);

    assert!(!result.passed);
    assert_eq!(result.steps_run, 1);
    assert_eq!(
        result.error.as_deref(),
        Some("Step 0 failed: Cannot move block up from row 1")
    );
    assert_eq!(page.driver().blocks().len(), 1);
}

#[test]
fn failed_assertion_does_not_stop_the_run() {
    let scenario = parse(
        r#"
name: "Wrong text"
steps:
  - action: assert
    assertions:
      - type: block_text
        block: paragraph
        position: 1
        expected: "wrong"
  - action: remove
    position: 1
    block: paragraph
"#,
    );

    let mut page = page_with(Platform::Android, paragraphs(&["only"]));
    let result = ScenarioRunner::run(&scenario, &mut page);

    assert!(!result.passed);
    assert_eq!(result.steps_run, 2);
    assert!(result.error.is_none());
    let failed = &result.assertion_results[0];
    assert_eq!(failed.actual.as_deref(), Some("only"));
    assert_eq!(
        failed.message.as_deref(),
        Some("Paragraph at row 1 has text 'only', expected 'wrong'")
    );
    assert!(page.driver().blocks().is_empty());
}

#[test]
fn text_into_a_non_text_block_is_a_step_error() {
    let scenario = parse(
        r#"
name: "Typing into an image"
steps:
  - action: send_text
    block: image
    position: 1
    text: "nope"
"#,
    );

    let mut page = page_with(Platform::Ios, paragraphs(&["x"]));
    let result = ScenarioRunner::run(&scenario, &mut page);

    assert_eq!(
        result.error.as_deref(),
        Some("Step 0 failed: Invalid configuration: Image blocks do not accept text")
    );
}

#[test]
fn image_steps_fill_media_and_caption() {
    let scenario = parse(
        r#"
name: "Image"
steps:
  - action: add_block
    block: image
  - action: select_image
    position: 2
  - action: choose_media_library
  - action: image_caption
    text: "Sunset"
"#,
    );

    let mut page = page_with(Platform::Ios, paragraphs(&["intro"]));
    let result = ScenarioRunner::run(&scenario, &mut page);

    assert!(result.passed, "{:?}", result);
    let image = &page.driver().blocks()[1];
    assert_eq!(image.name, BlockName::Image);
    assert!(image.media.is_some());
    assert_eq!(image.caption, "Sunset");
}

#[test]
fn html_mismatch_is_an_assertion_failure_with_actual_markup() {
    let scenario = parse(
        r#"
name: "HTML"
steps:
  - action: assert
    assertions:
      - type: html_equals
        expected: "<p>other</p>"
"#,
    );

    let mut page = page_with(Platform::Ios, paragraphs(&["x"]));
    let result = ScenarioRunner::run(&scenario, &mut page);

    assert!(!result.passed);
    assert!(result.error.is_none());
    let failed = &result.assertion_results[0];
    assert!(failed.actual.as_deref().unwrap().contains("<p>x</p>"));
}
