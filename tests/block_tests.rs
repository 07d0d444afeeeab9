mod common;

use std::time::Duration;

use common::{editor, page, page_with, paragraphs};
use editor_page::driver::driver::{AutomationDriver, Element, SwipeDirection};
use editor_page::driver::simulator::{SAMPLE_MEDIA_URL, SimBlock, SimulatedEditor};
use editor_page::locator::locator::Locator;
use editor_page::page::editor_page::EditorPage;
use editor_page::page::block::BlockName;
use editor_page::page::error::PageError;
use editor_page::platform::platform::Platform;

// =========================================================================
// Paragraph
// =========================================================================

#[test]
fn paragraph_text_with_newlines_spans_consecutive_blocks() {
    for platform in [Platform::Android, Platform::Ios] {
        let mut page = page_with(platform, paragraphs(&[""]));

        page.send_text_to_paragraph_block_at_position(1, "line1\nline2", true)
            .unwrap();

        assert_eq!(page.get_text_for_paragraph_block_at_position(1).unwrap(), "line1");
        assert_eq!(page.get_text_for_paragraph_block_at_position(2).unwrap(), "line2");
        assert_eq!(page.driver().blocks().len(), 2, "{}", platform);
    }
}

#[test]
fn paragraph_split_inserts_before_following_blocks() {
    let mut page = page_with(
        Platform::Ios,
        vec![
            SimBlock::new(BlockName::Paragraph, ""),
            SimBlock::new(BlockName::Heading, "End"),
        ],
    );

    page.send_text_to_paragraph_block_at_position(1, "a\nb\nc", true)
        .unwrap();

    let texts: Vec<&str> = page.driver().blocks().iter().map(|b| b.text.as_str()).collect();
    assert_eq!(texts, vec!["a", "b", "c", "End"]);
}

#[test]
fn typing_without_clear_appends() {
    let mut page = page_with(Platform::Android, paragraphs(&["Hello"]));

    page.send_text_to_paragraph_block_at_position(1, " world", false)
        .unwrap();

    assert_eq!(page.get_text_for_paragraph_block_at_position(1).unwrap(), "Hello world");
}

#[test]
fn paragraph_text_needs_a_paragraph_at_the_row() {
    let mut page = page_with(Platform::Ios, vec![SimBlock::new(BlockName::Heading, "h")]);

    let err = page
        .send_text_to_paragraph_block_at_position(1, "text", true)
        .unwrap_err();

    assert!(matches!(err, PageError::NoBlockAtPosition { position: 1 }));
}

// =========================================================================
// List
// =========================================================================

#[test]
fn list_text_is_appended_never_cleared() {
    let mut page = page_with(Platform::Ios, vec![SimBlock::new(BlockName::List, "first")]);

    page.send_text_to_list_block_at_position(1, "\nsecond").unwrap();

    assert_eq!(page.get_text_for_list_block_at_position(1).unwrap(), "first\nsecond");
    assert_eq!(page.driver().calls_matching("clear"), 0);
    assert_eq!(page.driver().blocks().len(), 1);
}

#[test]
fn ordered_toolbar_button_numbers_the_selected_list() {
    let mut page = page_with(Platform::Android, vec![SimBlock::new(BlockName::List, "")]);

    page.send_text_to_list_block_at_position(1, "one\ntwo").unwrap();
    page.click_ordered_list_toolbar_button().unwrap();

    let html = page.driver().to_html();
    assert!(html.contains("<ol><li>one</li><li>two</li></ol>"), "{}", html);
}

// =========================================================================
// Heading
// =========================================================================

#[test]
fn ios_empty_heading_is_static_text() {
    let mut page = page_with(Platform::Ios, vec![SimBlock::new(BlockName::Heading, "")]);
    let block = page
        .get_block_at_position(BlockName::Heading, 1, false)
        .unwrap()
        .unwrap();

    assert!(page.get_text_view_for_heading_block(&block, true).is_ok());
    assert!(matches!(
        page.get_text_view_for_heading_block(&block, false),
        Err(PageError::ElementNotFound { .. })
    ));
}

#[test]
fn heading_text_round_trips_across_the_empty_state() {
    for platform in [Platform::Android, Platform::Ios] {
        let mut page = page_with(platform, vec![SimBlock::new(BlockName::Heading, "")]);

        page.send_text_to_heading_block_at_position(1, "Chapter", true)
            .unwrap();

        assert_eq!(
            page.get_text_for_heading_block_at_position(1).unwrap(),
            "Chapter",
            "{}",
            platform
        );
    }
}

// =========================================================================
// Image and gallery
// =========================================================================

#[test]
fn image_gets_media_and_caption() {
    for platform in [Platform::Android, Platform::Ios] {
        let mut page = page_with(
            platform,
            vec![
                SimBlock::new(BlockName::Paragraph, "intro"),
                SimBlock::new(BlockName::Image, ""),
            ],
        );
        let block = page
            .get_block_at_position(BlockName::Image, 2, false)
            .unwrap()
            .unwrap();

        page.select_empty_image_block(&block).unwrap();
        page.choose_media_library().unwrap();
        page.enter_caption_to_selected_image_block("A caption", true)
            .unwrap();

        let image = &page.driver().blocks()[1];
        assert_eq!(image.media.as_deref(), Some(SAMPLE_MEDIA_URL), "{}", platform);
        assert_eq!(image.caption, "A caption", "{}", platform);
    }
}

#[test]
fn media_library_is_only_offered_after_selecting_an_empty_image() {
    let mut page = page_with(Platform::Ios, vec![SimBlock::new(BlockName::Image, "")]);

    assert!(matches!(
        page.choose_media_library(),
        Err(PageError::ElementNotFound { .. })
    ));
}

#[test]
fn gallery_removal_shifts_following_blocks_up() {
    let mut page = page_with(
        Platform::Android,
        vec![
            SimBlock::new(BlockName::Gallery, ""),
            SimBlock::new(BlockName::Paragraph, "after"),
        ],
    );

    page.remove_gallery_block_at_position(1).unwrap();

    assert!(!page.has_block_at_position(1, BlockName::Gallery).unwrap());
    assert!(page.has_block_at_position(1, BlockName::Paragraph).unwrap());
}

#[test]
fn image_removal_uses_image_locator() {
    let mut page = page_with(Platform::Ios, paragraphs(&["not an image"]));
    assert!(matches!(
        page.remove_image_block_at_position(1),
        Err(PageError::NoBlockAtPosition { position: 1 })
    ));
}

// =========================================================================
// HTML view
// =========================================================================

#[test]
fn html_verification_ignores_autocorrect_capitalisation() {
    let editor = editor(Platform::Ios, paragraphs(&[""])).with_autocapitalize(true);
    let mut page = page(Platform::Ios, editor);

    page.send_text_to_paragraph_block_at_position(1, "hello world", true)
        .unwrap();
    assert_eq!(page.get_text_for_paragraph_block_at_position(1).unwrap(), "Hello world");

    page.verify_html_content("<!-- wp:paragraph -->\n<p>hello world</p>\n<!-- /wp:paragraph -->")
        .unwrap();
    assert!(!page.driver().in_html_mode());
}

#[test]
fn html_mismatch_reports_both_sides_and_restores_visual_mode() {
    let mut page = page_with(Platform::Android, paragraphs(&["actual"]));

    let err = page.verify_html_content("<p>expected</p>").unwrap_err();

    match err {
        PageError::HtmlMismatch { expected, actual } => {
            assert_eq!(expected, "<p>expected</p>");
            assert!(actual.contains("<p>actual</p>"));
        }
        other => panic!("expected HtmlMismatch, got {:?}", other),
    }
    assert!(!page.driver().in_html_mode());
}

#[test]
fn html_content_can_be_replaced_through_the_raw_view() {
    let mut page = page_with(Platform::Android, paragraphs(&["old"]));

    page.set_html_content_android(
        "<!-- wp:heading -->\n<h2>Intro</h2>\n<!-- /wp:heading -->\n\n<!-- wp:paragraph -->\n<p>new text</p>\n<!-- /wp:paragraph -->",
    )
    .unwrap();

    assert_eq!(page.get_text_for_heading_block_at_position(1).unwrap(), "Intro");
    assert_eq!(page.get_text_for_paragraph_block_at_position(2).unwrap(), "new text");
}

#[test]
fn html_view_content_is_only_present_in_html_mode() {
    let mut page = page_with(Platform::Ios, paragraphs(&["x"]));
    assert!(page.get_text_view_for_html_view_content().is_err());

    page.toggle_html_mode(true).unwrap();
    assert!(page.get_text_view_for_html_view_content().is_ok());
    page.toggle_html_mode(false).unwrap();
    assert!(!page.driver().in_html_mode());
}

/// Simulated editor whose raw HTML view can be neither read nor written.
struct UnreadableHtmlView(SimulatedEditor);

impl UnreadableHtmlView {
    fn refuse(element: &Element, command: &str) -> Result<(), PageError> {
        if element.id == "html-view" {
            return Err(PageError::DriverProtocol {
                command: command.into(),
                error: "element not interactable".into(),
            });
        }
        Ok(())
    }
}

impl AutomationDriver for UnreadableHtmlView {
    fn set_implicit_wait(&mut self, timeout: Duration) -> Result<(), PageError> {
        self.0.set_implicit_wait(timeout)
    }

    fn find_elements(&mut self, locator: &Locator) -> Result<Vec<Element>, PageError> {
        self.0.find_elements(locator)
    }

    fn click(&mut self, element: &Element) -> Result<(), PageError> {
        self.0.click(element)
    }

    fn text(&mut self, element: &Element) -> Result<String, PageError> {
        Self::refuse(element, "text")?;
        self.0.text(element)
    }

    fn attribute(&mut self, element: &Element, key: &str) -> Result<Option<String>, PageError> {
        self.0.attribute(element, key)
    }

    fn clear(&mut self, element: &Element) -> Result<(), PageError> {
        Self::refuse(element, "clear")?;
        self.0.clear(element)
    }

    fn send_keys(&mut self, element: &Element, text: &str) -> Result<(), PageError> {
        Self::refuse(element, "send_keys")?;
        self.0.send_keys(element, text)
    }

    fn is_keyboard_shown(&mut self) -> Result<bool, PageError> {
        self.0.is_keyboard_shown()
    }

    fn hide_keyboard(&mut self) -> Result<(), PageError> {
        self.0.hide_keyboard()
    }

    fn swipe(&mut self, direction: SwipeDirection, within: Option<&Element>) -> Result<(), PageError> {
        self.0.swipe(direction, within)
    }

    fn pause(&mut self, duration: Duration) {
        self.0.pause(duration)
    }
}

#[test]
fn failed_html_read_still_restores_visual_mode() {
    let driver = UnreadableHtmlView(editor(Platform::Ios, paragraphs(&["x"])));
    let mut page = EditorPage::new(driver, Platform::Ios).unwrap();

    let err = page.verify_html_content("<p>x</p>").unwrap_err();

    assert!(matches!(err, PageError::DriverProtocol { .. }), "{:?}", err);
    assert!(!page.driver().0.in_html_mode());
}

#[test]
fn failed_html_write_still_restores_visual_mode() {
    let driver = UnreadableHtmlView(editor(Platform::Android, paragraphs(&["kept"])));
    let mut page = EditorPage::new(driver, Platform::Android).unwrap();

    let err = page.set_html_content_android("<p>lost</p>").unwrap_err();

    assert!(matches!(err, PageError::DriverProtocol { .. }), "{:?}", err);
    assert!(!page.driver().0.in_html_mode());
    assert_eq!(page.get_text_for_paragraph_block_at_position(1).unwrap(), "kept");
}
