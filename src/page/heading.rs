use crate::driver::driver::{AutomationDriver, Element};
use crate::page::block::{Block, BlockName};
use crate::page::editor_page::EditorPage;
use crate::page::error::PageError;

impl<D: AutomationDriver> EditorPage<D> {
    /// iOS renders an empty heading as static text, not as a text view.
    pub fn get_text_view_for_heading_block(&mut self, block: &Block, empty: bool) -> Result<Element, PageError> {
        let class = if empty {
            self.strategy.empty_heading_class()
        } else {
            self.strategy.text_view_class()
        };
        self.text_view_in_block(block, class)
    }

    /// Heading text view in whichever state the heading is currently in.
    fn current_heading_text_view(&mut self, block: &Block) -> Result<Element, PageError> {
        let empty_class = self.strategy.empty_heading_class();
        let locator = self.text_view_locator(block, empty_class)?;
        match self.find_all("heading_text_view", &locator)?.into_iter().next() {
            Some(view) => Ok(view),
            None => self.get_text_view_for_heading_block(block, false),
        }
    }

    pub fn type_text_to_heading_block(&mut self, block: &Block, text: &str, clear: bool) -> Result<(), PageError> {
        let text_view = self.current_heading_text_view(block)?;
        self.type_string(&text_view, text, clear)
    }

    pub fn send_text_to_heading_block_at_position(
        &mut self,
        position: u32,
        text: &str,
        clear: bool,
    ) -> Result<(), PageError> {
        let block = self.require_block(BlockName::Heading, position)?;
        self.type_text_to_heading_block(&block, text, clear)
    }

    pub fn get_text_for_heading_block(&mut self, block: &Block) -> Result<String, PageError> {
        let text_view = self.current_heading_text_view(block)?;
        self.driver.text(&text_view)
    }

    pub fn get_text_for_heading_block_at_position(&mut self, position: u32) -> Result<String, PageError> {
        let block = self.require_block(BlockName::Heading, position)?;
        self.get_text_for_heading_block(&block)
    }
}
