use std::time::Duration;

use crate::driver::driver::{AutomationDriver, Element, SwipeDirection};
use crate::locator::labels::{
    HTML_VIEW_CONTENT_ID, SWITCH_TO_HTML_ID, SWITCH_TO_VISUAL_ID, TITLE_MARKER, block_label,
    move_down_label, move_up_label, parse_row, remove_label,
};
use crate::locator::locator::{Locator, Matcher};
use crate::locator::queries;
use crate::page::block::{Block, BlockName};
use crate::page::error::PageError;
use crate::page::scroll::{ScrollDecision, ScrollPolicy, decide};
use crate::platform::platform::Platform;
use crate::platform::strategy::{PlatformStrategy, strategy_for};
use crate::trace::logger::TraceLogger;
use crate::trace::trace::TraceEvent;

/// Implicit wait applied to the driver when a page object is created.
pub const DEFAULT_IMPLICIT_WAIT_MS: u64 = 5000;

/// Construction-time settings for an `EditorPage`.
#[derive(Debug, Clone, PartialEq)]
pub struct PageOptions {
    pub platform: Platform,
    pub implicit_wait: Duration,
    /// Pause before checking keyboard visibility.
    pub keyboard_settle: Duration,
    /// Pause after typing into a field.
    pub type_settle: Duration,
    pub scroll: ScrollPolicy,
}

impl PageOptions {
    pub fn new(platform: Platform) -> Self {
        Self {
            platform,
            implicit_wait: Duration::from_millis(DEFAULT_IMPLICIT_WAIT_MS),
            keyboard_settle: Duration::from_millis(1000),
            type_settle: Duration::from_millis(1000),
            scroll: ScrollPolicy::default(),
        }
    }
}

/// Page object for the block editor screen.
///
/// Blocks are addressed by their 1-based render row. Rows are only
/// resolvable while rendered, so lookups can optionally scroll; every
/// scroll or swipe search is bounded by the page's `ScrollPolicy`.
pub struct EditorPage<D: AutomationDriver> {
    pub(crate) driver: D,
    pub(crate) strategy: Box<dyn PlatformStrategy>,
    pub(crate) options: PageOptions,
    pub(crate) tracer: TraceLogger,
}

impl<D: AutomationDriver> EditorPage<D> {
    pub fn new(driver: D, platform: Platform) -> Result<Self, PageError> {
        Self::with_options(driver, PageOptions::new(platform))
    }

    pub fn with_options(mut driver: D, options: PageOptions) -> Result<Self, PageError> {
        driver.set_implicit_wait(options.implicit_wait)?;
        Ok(EditorPage {
            driver,
            strategy: strategy_for(options.platform),
            options,
            tracer: TraceLogger::disabled(),
        })
    }

    pub fn with_tracer(mut self, tracer: TraceLogger) -> Self {
        self.tracer = tracer;
        self
    }

    pub fn platform(&self) -> Platform {
        self.strategy.platform()
    }

    pub fn options(&self) -> &PageOptions {
        &self.options
    }

    pub fn driver(&self) -> &D {
        &self.driver
    }

    pub fn driver_mut(&mut self) -> &mut D {
        &mut self.driver
    }

    pub fn into_driver(self) -> D {
        self.driver
    }

    // ========================================================================
    // Traced driver helpers
    // ========================================================================

    pub(crate) fn trace(&self, event: TraceEvent) {
        self.tracer.log(&event);
    }

    pub(crate) fn find_all(&mut self, operation: &str, locator: &Locator) -> Result<Vec<Element>, PageError> {
        let result = self.driver.find_elements(locator);
        let outcome = match &result {
            Ok(elements) => format!("found {}", elements.len()),
            Err(e) => format!("error: {}", e),
        };
        self.trace(
            TraceEvent::now(self.tracer.next_step(), operation)
                .with_locator(locator)
                .with_outcome(outcome),
        );
        result
    }

    pub(crate) fn find_one(&mut self, operation: &str, locator: &Locator) -> Result<Element, PageError> {
        self.find_all(operation, locator)?
            .into_iter()
            .next()
            .ok_or_else(|| PageError::not_found(locator, operation))
    }

    pub(crate) fn click_on(&mut self, operation: &str, locator: &Locator) -> Result<(), PageError> {
        let element = self.find_one(operation, locator)?;
        self.driver.click(&element)
    }

    pub(crate) fn swipe(&mut self, direction: SwipeDirection, within: Option<&Element>) -> Result<(), PageError> {
        self.driver.swipe(direction, within)?;
        self.driver.pause(self.options.scroll.settle);
        Ok(())
    }

    /// Clear (optionally) and type into an element, then let the view settle.
    pub(crate) fn type_string(&mut self, element: &Element, text: &str, clear: bool) -> Result<(), PageError> {
        if clear {
            self.driver.clear(element)?;
        }
        self.driver.send_keys(element, text)?;
        self.driver.pause(self.options.type_settle);
        Ok(())
    }

    pub(crate) fn label_of(&mut self, element: &Element) -> Result<Option<String>, PageError> {
        let key = self.strategy.attribute_key();
        self.driver.attribute(element, key)
    }

    pub(crate) fn attribute_matcher(&self, class: Option<&str>, matcher: Matcher) -> Locator {
        Locator::attribute(class, self.strategy.xpath_attribute(), matcher)
    }

    // ========================================================================
    // Block lookup
    // ========================================================================

    pub fn block_locator(&self, block_name: BlockName, position: u32) -> Locator {
        queries::block(self.strategy.as_ref(), block_name, position)
    }

    /// Resolve the block rendered at `position`.
    ///
    /// Returns the last match. With `autoscroll`, an unrendered row is
    /// searched for by swiping toward it; the search stops with `None` when
    /// the row lies above row 1 or inside the visible window under another
    /// block type, and fails with `NotFoundAfterScrolling` when the policy's
    /// attempts run out or a swipe leaves the window unchanged.
    pub fn get_block_at_position(
        &mut self,
        block_name: BlockName,
        position: u32,
        autoscroll: bool,
    ) -> Result<Option<Block>, PageError> {
        let locator = self.block_locator(block_name, position);
        let mut attempts = 0;
        let mut previous_window = None;

        loop {
            let elements = self.find_all("get_block_at_position", &locator)?;
            if let Some(element) = elements.last() {
                let label = self
                    .label_of(element)?
                    .unwrap_or_else(|| block_label(block_name.as_str(), position));
                return Ok(Some(Block::new(element.clone(), label)));
            }

            if !autoscroll {
                return Ok(None);
            }

            let Some(window) = self.visible_rows()? else {
                return Ok(None);
            };

            let direction = match decide(position, window.0, window.1) {
                ScrollDecision::Absent | ScrollDecision::Mismatch => return Ok(None),
                ScrollDecision::Swipe(direction) => direction,
            };

            if attempts >= self.options.scroll.max_attempts || previous_window == Some(window) {
                self.trace(
                    TraceEvent::now(self.tracer.next_step(), "get_block_at_position")
                        .with_locator(&locator)
                        .with_attempt(attempts)
                        .with_outcome("gave up"),
                );
                return Err(PageError::NotFoundAfterScrolling {
                    target: block_label(block_name.as_str(), position),
                    attempts,
                });
            }

            previous_window = Some(window);
            attempts += 1;
            self.trace(
                TraceEvent::now(self.tracer.next_step(), "scroll")
                    .with_attempt(attempts)
                    .with_detail(format!(
                        "{:?} toward row {} (visible {}..={})",
                        direction, position, window.0, window.1
                    )),
            );
            self.swipe(direction, None)?;
        }
    }

    /// Rows of the first and last rendered blocks, if both can be read.
    pub fn visible_rows(&mut self) -> Result<Option<(u32, u32)>, PageError> {
        let locator = queries::any_block(self.strategy.as_ref());
        let elements = self.find_all("visible_rows", &locator)?;
        let (Some(first), Some(last)) = (elements.first(), elements.last()) else {
            return Ok(None);
        };

        let first_row = self.label_of(first)?.as_deref().and_then(parse_row);
        let last_row = self.label_of(last)?.as_deref().and_then(parse_row);

        Ok(first_row.zip(last_row))
    }

    pub fn has_block_at_position(&mut self, position: u32, block_name: BlockName) -> Result<bool, PageError> {
        Ok(self
            .get_block_at_position(block_name, position, false)?
            .is_some())
    }

    pub(crate) fn require_block(&mut self, block_name: BlockName, position: u32) -> Result<Block, PageError> {
        self.get_block_at_position(block_name, position, false)?
            .ok_or(PageError::NoBlockAtPosition { position })
    }

    // ========================================================================
    // Reordering and removal
    // ========================================================================

    /// Click the block's move-up control. Row 1 cannot move up.
    pub fn move_block_up_at_position(&mut self, position: u32, block_name: BlockName) -> Result<(), PageError> {
        if !self.has_block_at_position(position, block_name)? {
            return Err(PageError::NoBlockAtPosition { position });
        }
        if position <= 1 {
            return Err(PageError::MoveOutOfBounds {
                position,
                direction: "up".into(),
            });
        }

        let locator = queries::move_control(self.strategy.as_ref(), block_name, position, move_up_label(position));
        self.click_on("move_block_up", &locator)
    }

    /// Click the block's move-down control. The last block renders none.
    pub fn move_block_down_at_position(&mut self, position: u32, block_name: BlockName) -> Result<(), PageError> {
        if !self.has_block_at_position(position, block_name)? {
            return Err(PageError::NoBlockAtPosition { position });
        }

        let locator = queries::move_control(self.strategy.as_ref(), block_name, position, move_down_label(position));
        let Some(button) = self.find_all("move_block_down", &locator)?.into_iter().next() else {
            return Err(PageError::MoveOutOfBounds {
                position,
                direction: "down".into(),
            });
        };
        self.driver.click(&button)
    }

    pub fn remove_block_at_position(&mut self, block_name: BlockName, position: u32) -> Result<(), PageError> {
        let block = self.require_block(block_name, position)?;

        let locator = queries::remove_control(self.strategy.as_ref(), position);

        if self.strategy.remove_control_needs_swipe() {
            let mut attempts = 0;
            while self.find_all("remove_block", &locator)?.is_empty() {
                if attempts >= self.options.scroll.max_attempts {
                    return Err(PageError::NotFoundAfterScrolling {
                        target: remove_label(position),
                        attempts,
                    });
                }
                attempts += 1;
                self.swipe(SwipeDirection::Up, Some(&block.element))?;
            }
        }

        self.click_on("remove_block", &locator)
    }

    // ========================================================================
    // Inserter
    // ========================================================================

    /// Open the inserter and pick `block_name`; the new block lands after
    /// the selected one.
    pub fn add_new_block(&mut self, block_name: BlockName) -> Result<(), PageError> {
        if block_name == BlockName::Any {
            return Err(PageError::Config("cannot insert a block of type Any".into()));
        }

        let add_button = Locator::accessibility_id(self.strategy.add_block_id());
        self.click_on("add_block", &add_button)?;

        let block_button = self.find_block_button(block_name)?;
        self.driver.click(&block_button)
    }

    fn find_block_button(&mut self, block_name: BlockName) -> Result<Element, PageError> {
        let locator = Locator::accessibility_id(block_name.as_str());
        if !self.strategy.inserter_needs_scroll() {
            return self.find_one("find_block_button", &locator);
        }

        let mut attempts = 0;
        loop {
            if let Some(button) = self.find_all("find_block_button", &locator)?.into_iter().next() {
                return Ok(button);
            }
            if attempts >= self.options.scroll.max_attempts {
                return Err(PageError::NotFoundAfterScrolling {
                    target: block_name.as_str().into(),
                    attempts,
                });
            }
            attempts += 1;
            self.swipe(SwipeDirection::Up, None)?;
        }
    }

    // ========================================================================
    // Title, HTML view, keyboard
    // ========================================================================

    pub fn get_title_element(&mut self, autoscroll: bool) -> Result<Option<Element>, PageError> {
        let locator = queries::title(self.strategy.as_ref());
        let mut attempts = 0;
        loop {
            let elements = self.find_all("get_title_element", &locator)?;
            if let Some(element) = elements.last() {
                return Ok(Some(element.clone()));
            }
            if !autoscroll {
                return Ok(None);
            }
            if attempts >= self.options.scroll.max_attempts {
                return Err(PageError::NotFoundAfterScrolling {
                    target: TITLE_MARKER.into(),
                    attempts,
                });
            }
            attempts += 1;
            self.swipe(SwipeDirection::Down, None)?;
        }
    }

    pub fn set_title(&mut self, title: &str) -> Result<(), PageError> {
        let element = self
            .get_title_element(true)?
            .ok_or_else(|| PageError::not_found(TITLE_MARKER, "set_title"))?;
        self.driver.click(&element)?;
        self.type_string(&element, title, true)
    }

    pub fn get_title_text(&mut self) -> Result<String, PageError> {
        let element = self
            .get_title_element(true)?
            .ok_or_else(|| PageError::not_found(TITLE_MARKER, "get_title_text"))?;
        self.driver.text(&element)
    }

    pub fn toggle_html_mode(&mut self, html: bool) -> Result<(), PageError> {
        let menu = Locator::accessibility_id(self.strategy.more_options_id());
        self.click_on("toggle_html_mode", &menu)?;

        let switch = if html { SWITCH_TO_HTML_ID } else { SWITCH_TO_VISUAL_ID };
        self.click_on("toggle_html_mode", &Locator::accessibility_id(switch))
    }

    pub fn get_text_view_for_html_view_content(&mut self) -> Result<Element, PageError> {
        self.find_one(
            "html_view_content",
            &Locator::accessibility_id(HTML_VIEW_CONTENT_ID),
        )
    }

    /// Compare the raw HTML view against `html`, ignoring case so that
    /// autocorrect capitalisation does not count as a difference. The
    /// visual view is restored before a mismatch or read error is reported.
    pub fn verify_html_content(&mut self, html: &str) -> Result<(), PageError> {
        self.toggle_html_mode(true)?;
        let read = self.read_html_view();
        let restored = self.toggle_html_mode(false);
        let actual = read?;
        restored?;

        if actual.to_lowercase() == html.to_lowercase() {
            Ok(())
        } else {
            Err(PageError::HtmlMismatch {
                expected: html.to_string(),
                actual,
            })
        }
    }

    /// Replace the document through the raw HTML view. Only Android's HTML
    /// view accepts direct text replacement.
    pub fn set_html_content_android(&mut self, html: &str) -> Result<(), PageError> {
        self.toggle_html_mode(true)?;
        let written = self
            .get_text_view_for_html_view_content()
            .and_then(|view| self.driver.set_text(&view, html));
        let restored = self.toggle_html_mode(false);
        written?;
        restored
    }

    fn read_html_view(&mut self) -> Result<String, PageError> {
        let view = self.get_text_view_for_html_view_content()?;
        self.driver.text(&view)
    }

    pub fn dismiss_keyboard(&mut self) -> Result<(), PageError> {
        self.driver.pause(self.options.keyboard_settle);
        if !self.driver.is_keyboard_shown()? {
            return Ok(());
        }
        self.trace(TraceEvent::now(self.tracer.next_step(), "dismiss_keyboard"));
        self.strategy.dismiss_keyboard(&mut self.driver)
    }

    // ========================================================================
    // Shared text-view plumbing for block sub-protocols
    // ========================================================================

    /// Text view of `class` inside the block, addressed by the block's
    /// current label (re-read, since typing changes it).
    pub(crate) fn text_view_in_block(&mut self, block: &Block, class: &str) -> Result<Element, PageError> {
        let locator = self.text_view_locator(block, class)?;
        self.find_one("text_view", &locator)
    }

    pub(crate) fn text_view_locator(&mut self, block: &Block, class: &str) -> Result<Locator, PageError> {
        let label = self
            .label_of(&block.element)?
            .unwrap_or_else(|| block.label.clone());
        Ok(queries::text_view(self.strategy.as_ref(), &label, class))
    }
}
