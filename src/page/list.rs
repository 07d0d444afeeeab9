use crate::driver::driver::{AutomationDriver, Element};
use crate::locator::labels::ORDERED_LIST_ID;
use crate::locator::locator::Locator;
use crate::page::block::{Block, BlockName};
use crate::page::editor_page::EditorPage;
use crate::page::error::PageError;

impl<D: AutomationDriver> EditorPage<D> {
    pub fn get_text_view_for_list_block(&mut self, block: &Block) -> Result<Element, PageError> {
        let class = self.strategy.text_view_class();
        self.text_view_in_block(block, class)
    }

    /// Append `text` to the list. Never clears first: clearing a list view
    /// drops its bullet formatting. Newlines start new list items.
    pub fn send_text_to_list_block(&mut self, block: &Block, text: &str) -> Result<(), PageError> {
        let text_view = self.get_text_view_for_list_block(block)?;
        self.type_string(&text_view, text, false)
    }

    pub fn send_text_to_list_block_at_position(&mut self, position: u32, text: &str) -> Result<(), PageError> {
        let block = self.require_block(BlockName::List, position)?;
        self.send_text_to_list_block(&block, text)
    }

    pub fn get_text_for_list_block(&mut self, block: &Block) -> Result<String, PageError> {
        let text_view = self.get_text_view_for_list_block(block)?;
        self.driver.text(&text_view)
    }

    pub fn get_text_for_list_block_at_position(&mut self, position: u32) -> Result<String, PageError> {
        let block = self.require_block(BlockName::List, position)?;
        self.get_text_for_list_block(&block)
    }

    /// Toggle the selected list between bulleted and numbered.
    pub fn click_ordered_list_toolbar_button(&mut self) -> Result<(), PageError> {
        self.click_on("ordered_list", &Locator::accessibility_id(ORDERED_LIST_ID))
    }

    pub fn remove_list_block_at_position(&mut self, position: u32) -> Result<(), PageError> {
        self.remove_block_at_position(BlockName::List, position)
    }
}
