use crate::driver::driver::AutomationDriver;
use crate::locator::labels::{IMAGE_CAPTION_PREFIX, MEDIA_LIBRARY_ID};
use crate::locator::locator::{Locator, Matcher};
use crate::page::block::{Block, BlockName};
use crate::page::editor_page::EditorPage;
use crate::page::error::PageError;

impl<D: AutomationDriver> EditorPage<D> {
    /// Tap an image block that has no media yet, opening the media options.
    pub fn select_empty_image_block(&mut self, block: &Block) -> Result<(), PageError> {
        let label = self
            .label_of(&block.element)?
            .unwrap_or_else(|| block.label.clone());
        self.click_on("select_image", &Locator::accessibility_id(label))
    }

    pub fn choose_media_library(&mut self) -> Result<(), PageError> {
        self.click_on("media_library", &Locator::accessibility_id(MEDIA_LIBRARY_ID))
    }

    pub fn enter_caption_to_selected_image_block(&mut self, caption: &str, clear: bool) -> Result<(), PageError> {
        let locator = self.attribute_matcher(
            self.strategy.button_class(),
            Matcher::StartsWith(IMAGE_CAPTION_PREFIX.to_string()),
        );
        let field = self.find_one("image_caption", &locator)?;
        self.driver.click(&field)?;
        self.type_string(&field, caption, clear)
    }

    pub fn remove_image_block_at_position(&mut self, position: u32) -> Result<(), PageError> {
        self.remove_block_at_position(BlockName::Image, position)
    }
}
