use crate::driver::driver::{AutomationDriver, Element};
use crate::page::block::{Block, BlockName};
use crate::page::editor_page::EditorPage;
use crate::page::error::PageError;

impl<D: AutomationDriver> EditorPage<D> {
    pub fn get_text_view_for_paragraph_block(&mut self, block: &Block) -> Result<Element, PageError> {
        let class = self.strategy.text_view_class();
        self.text_view_in_block(block, class)
    }

    pub fn type_text_to_paragraph_block(&mut self, block: &Block, text: &str, clear: bool) -> Result<(), PageError> {
        let text_view = self.get_text_view_for_paragraph_block(block)?;
        self.type_string(&text_view, text, clear)
    }

    /// Type `text` starting at the paragraph in row `position`.
    ///
    /// Each embedded newline splits the paragraph: the line before it goes
    /// into the current block, the newline creates the next block, and
    /// typing continues in row `position + 1`.
    pub fn send_text_to_paragraph_block_at_position(
        &mut self,
        position: u32,
        text: &str,
        clear: bool,
    ) -> Result<(), PageError> {
        let lines: Vec<&str> = text.split('\n').collect();
        for (offset, line) in lines.iter().enumerate() {
            let row = position + offset as u32;
            let block = self.require_block(BlockName::Paragraph, row)?;
            self.type_text_to_paragraph_block(&block, line, clear)?;
            if offset + 1 < lines.len() {
                self.type_text_to_paragraph_block(&block, "\n", false)?;
            }
        }
        Ok(())
    }

    pub fn get_text_for_paragraph_block(&mut self, block: &Block) -> Result<String, PageError> {
        let text_view = self.get_text_view_for_paragraph_block(block)?;
        self.driver.text(&text_view)
    }

    pub fn get_text_for_paragraph_block_at_position(&mut self, position: u32) -> Result<String, PageError> {
        let block = self.require_block(BlockName::Paragraph, position)?;
        self.get_text_for_paragraph_block(&block)
    }

    pub fn remove_paragraph_block_at_position(&mut self, position: u32) -> Result<(), PageError> {
        self.remove_block_at_position(BlockName::Paragraph, position)
    }
}
