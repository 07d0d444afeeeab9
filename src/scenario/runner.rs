use crate::driver::driver::AutomationDriver;
use crate::page::block::BlockName;
use crate::page::editor_page::EditorPage;
use crate::page::error::PageError;
use crate::scenario::context::ScenarioContext;
use crate::scenario::scenario_model::{Assertion, AssertionResult, Scenario, ScenarioResult, ScenarioStep};

/// Executes a `Scenario` step by step against an editor page.
pub struct ScenarioRunner;

impl ScenarioRunner {
    /// Run a complete scenario. A failing step stops the run and is
    /// reported in `ScenarioResult::error`; failed assertions do not stop it.
    pub fn run<D: AutomationDriver>(scenario: &Scenario, page: &mut EditorPage<D>) -> ScenarioResult {
        let mut ctx = ScenarioContext::new();

        if let Some(title) = &scenario.title {
            if let Err(e) = page.set_title(title) {
                return ScenarioResult {
                    scenario_name: scenario.name.clone(),
                    passed: false,
                    steps_run: 0,
                    assertion_results: ctx.assertion_results,
                    error: Some(format!("Failed to set title: {}", e)),
                };
            }
        }

        for (i, step) in scenario.steps.iter().enumerate() {
            ctx.current_step = i;

            if let Err(e) = Self::execute_step(step, i, page, &mut ctx) {
                return ScenarioResult {
                    scenario_name: scenario.name.clone(),
                    passed: false,
                    steps_run: i + 1,
                    assertion_results: ctx.assertion_results,
                    error: Some(format!("Step {} failed: {}", i, e)),
                };
            }
        }

        ScenarioResult {
            scenario_name: scenario.name.clone(),
            passed: ctx.all_passed(),
            steps_run: scenario.steps.len(),
            assertion_results: ctx.assertion_results,
            error: None,
        }
    }

    fn execute_step<D: AutomationDriver>(
        step: &ScenarioStep,
        step_index: usize,
        page: &mut EditorPage<D>,
        ctx: &mut ScenarioContext,
    ) -> Result<(), PageError> {
        match step {
            ScenarioStep::AddBlock { block } => page.add_new_block(*block),

            ScenarioStep::SendText {
                block,
                position,
                text,
                clear,
            } => match block {
                BlockName::Paragraph => page.send_text_to_paragraph_block_at_position(*position, text, *clear),
                BlockName::List => page.send_text_to_list_block_at_position(*position, text),
                BlockName::Heading => page.send_text_to_heading_block_at_position(*position, text, *clear),
                other => Err(PageError::Config(format!("{} blocks do not accept text", other))),
            },

            ScenarioStep::MoveUp { position, block } => page.move_block_up_at_position(*position, *block),

            ScenarioStep::MoveDown { position, block } => page.move_block_down_at_position(*position, *block),

            ScenarioStep::Remove { position, block } => page.remove_block_at_position(*block, *position),

            ScenarioStep::DismissKeyboard => page.dismiss_keyboard(),

            ScenarioStep::OrderedList => page.click_ordered_list_toolbar_button(),

            ScenarioStep::SelectImage { position } => {
                let block = page
                    .get_block_at_position(BlockName::Image, *position, true)?
                    .ok_or(PageError::NoBlockAtPosition { position: *position })?;
                page.select_empty_image_block(&block)
            }

            ScenarioStep::ChooseMediaLibrary => page.choose_media_library(),

            ScenarioStep::ImageCaption { text, clear } => page.enter_caption_to_selected_image_block(text, *clear),

            ScenarioStep::SetHtml { html } => page.set_html_content_android(html),

            ScenarioStep::Assert { assertions } => {
                let results = assertions
                    .iter()
                    .map(|assertion| Self::evaluate_one(assertion, step_index, page))
                    .collect();
                ctx.record_assertions(results);
                Ok(())
            }
        }
    }

    fn evaluate_one<D: AutomationDriver>(
        assertion: &Assertion,
        step_index: usize,
        page: &mut EditorPage<D>,
    ) -> AssertionResult {
        let outcome = Self::check(assertion, page);
        let (passed, actual, message) = match outcome {
            Ok((passed, actual, failure)) => (passed, actual, if passed { None } else { Some(failure) }),
            Err(e) => (false, None, Some(format!("Failed to evaluate: {}", e))),
        };
        AssertionResult {
            step_index,
            assertion: assertion.clone(),
            passed,
            actual,
            message,
        }
    }

    /// (passed, actual value, message used when failed)
    fn check<D: AutomationDriver>(
        assertion: &Assertion,
        page: &mut EditorPage<D>,
    ) -> Result<(bool, Option<String>, String), PageError> {
        match assertion {
            Assertion::BlockText {
                block,
                position,
                expected,
            } => {
                let text = match block {
                    BlockName::Paragraph => page.get_text_for_paragraph_block_at_position(*position)?,
                    BlockName::List => page.get_text_for_list_block_at_position(*position)?,
                    BlockName::Heading => page.get_text_for_heading_block_at_position(*position)?,
                    other => return Err(PageError::Config(format!("{} blocks have no text", other))),
                };
                let passed = text == *expected;
                let message = format!("{} at row {} has text '{}', expected '{}'", block, position, text, expected);
                Ok((passed, Some(text), message))
            }

            Assertion::BlockPresent { block, position } => {
                let present = page.get_block_at_position(*block, *position, true)?.is_some();
                Ok((
                    present,
                    Some(present.to_string()),
                    format!("No {} block at row {}", block, position),
                ))
            }

            Assertion::BlockAbsent { block, position } => {
                let present = page.has_block_at_position(*position, *block)?;
                Ok((
                    !present,
                    Some(present.to_string()),
                    format!("{} block still present at row {}", block, position),
                ))
            }

            Assertion::HtmlEquals { expected } => match page.verify_html_content(expected) {
                Ok(()) => Ok((true, None, String::new())),
                Err(PageError::HtmlMismatch { actual, .. }) => {
                    Ok((false, Some(actual), "HTML content does not match".to_string()))
                }
                Err(e) => Err(e),
            },

            Assertion::TitleEquals { expected } => {
                let title = page.get_title_text()?;
                let passed = title == *expected;
                Ok((passed, Some(title.clone()), format!("Title is '{}', expected '{}'", title, expected)))
            }
        }
    }
}
