use crate::driver::driver::AutomationDriver;
use crate::page::block::BlockName;
use crate::page::editor_page::EditorPage;
use crate::page::error::PageError;

impl<D: AutomationDriver> EditorPage<D> {
    pub fn remove_gallery_block_at_position(&mut self, position: u32) -> Result<(), PageError> {
        self.remove_block_at_position(BlockName::Gallery, position)
    }
}
