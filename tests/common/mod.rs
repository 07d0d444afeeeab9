#![allow(dead_code)]

use editor_page::driver::simulator::{SimBlock, SimulatedEditor};
use editor_page::page::block::BlockName;
use editor_page::page::editor_page::EditorPage;
use editor_page::platform::platform::Platform;

pub fn paragraphs(texts: &[&str]) -> Vec<SimBlock> {
    texts
        .iter()
        .map(|t| SimBlock::new(BlockName::Paragraph, t))
        .collect()
}

pub fn numbered_paragraphs(count: usize) -> Vec<SimBlock> {
    (1..=count)
        .map(|i| SimBlock::new(BlockName::Paragraph, &format!("p{}", i)))
        .collect()
}

pub fn editor(platform: Platform, blocks: Vec<SimBlock>) -> SimulatedEditor {
    SimulatedEditor::new(platform).with_blocks(blocks)
}

pub fn page(platform: Platform, editor: SimulatedEditor) -> EditorPage<SimulatedEditor> {
    EditorPage::new(editor, platform).unwrap()
}

pub fn page_with(platform: Platform, blocks: Vec<SimBlock>) -> EditorPage<SimulatedEditor> {
    page(platform, editor(platform, blocks))
}
