use std::time::Duration;

use once_cell::sync::Lazy;
use regex::Regex;

use crate::driver::driver::{AutomationDriver, Element, SwipeDirection};
use crate::locator::labels::{
    HIDE_KEYBOARD_ID, HTML_VIEW_CONTENT_ID, MEDIA_LIBRARY_ID, ORDERED_LIST_ID, SWITCH_TO_HTML_ID,
    SWITCH_TO_VISUAL_ID, block_label, caption_label, move_down_label, move_up_label, remove_label,
    title_label,
};
use crate::locator::locator::Locator;
use crate::page::block::BlockName;
use crate::page::error::PageError;
use crate::platform::platform::Platform;
use crate::platform::strategy::{PlatformStrategy, strategy_for};

/// Placeholder media URL assigned when an image is picked from the library.
pub const SAMPLE_MEDIA_URL: &str = "https://cldup.com/cXyG__fTLN.jpg";

/// Number of inserter entries visible at once when the inserter scrolls.
const INSERTER_WINDOW: usize = 3;

static EDITABLE_BLOCK_PATTERN: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"(?s)<!-- wp:(paragraph|heading)[^>]*-->\s*<(?:p|h\d)[^>]*>(.*?)</(?:p|h\d)>\s*<!-- /wp:(?:paragraph|heading) -->")
        .expect("editable block pattern is valid")
});

/// One block of the simulated document.
#[derive(Debug, Clone, PartialEq)]
pub struct SimBlock {
    pub name: BlockName,
    pub text: String,
    pub caption: String,
    pub media: Option<String>,
    pub ordered: bool,
}

impl SimBlock {
    pub fn new(name: BlockName, text: &str) -> Self {
        SimBlock {
            name,
            text: text.to_string(),
            caption: String::new(),
            media: None,
            ordered: false,
        }
    }

    pub fn to_html(&self) -> String {
        match self.name {
            BlockName::Paragraph | BlockName::Any => {
                format!("<!-- wp:paragraph -->\n<p>{}</p>\n<!-- /wp:paragraph -->", self.text)
            }
            BlockName::Heading => {
                format!("<!-- wp:heading -->\n<h2>{}</h2>\n<!-- /wp:heading -->", self.text)
            }
            BlockName::List => {
                let items: String = self
                    .text
                    .split('\n')
                    .map(|item| format!("<li>{}</li>", item))
                    .collect();
                if self.ordered {
                    format!(
                        "<!-- wp:list {{\"ordered\":true}} -->\n<ol>{}</ol>\n<!-- /wp:list -->",
                        items
                    )
                } else {
                    format!("<!-- wp:list -->\n<ul>{}</ul>\n<!-- /wp:list -->", items)
                }
            }
            BlockName::Image => {
                let caption = if self.caption.is_empty() {
                    String::new()
                } else {
                    format!("<figcaption>{}</figcaption>", self.caption)
                };
                format!(
                    "<!-- wp:image -->\n<figure class=\"wp-block-image\"><img src=\"{}\" alt=\"\"/>{}</figure>\n<!-- /wp:image -->",
                    self.media.as_deref().unwrap_or(""),
                    caption
                )
            }
            BlockName::Gallery => {
                "<!-- wp:gallery -->\n<figure class=\"wp-block-gallery\"></figure>\n<!-- /wp:gallery -->"
                    .to_string()
            }
            BlockName::More => "<!-- wp:more -->\n<!--more-->\n<!-- /wp:more -->".to_string(),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Role {
    Block,
    Content,
    Control,
    Chrome,
}

/// A rendered, currently visible UI node.
#[derive(Debug, Clone)]
struct Node {
    id: String,
    class: String,
    label: String,
    owner: Option<usize>,
    role: Role,
}

/// Deterministic in-memory editor implementing `AutomationDriver`.
///
/// Only blocks inside the viewport are rendered, so row-based lookups behave
/// like they do on a device: off-screen rows have to be scrolled into view.
/// The accessibility attribute and element classes follow the configured
/// platform, so a locator built for the other platform matches nothing.
#[derive(Debug)]
pub struct SimulatedEditor {
    strategy: Box<dyn PlatformStrategy>,
    blocks: Vec<SimBlock>,
    title: String,
    viewport_top: usize,
    viewport_rows: usize,
    scroll_step: usize,
    focused: Option<usize>,
    keyboard_shown: bool,
    html_mode: bool,
    html_buffer: String,
    html_edited: bool,
    menu_open: bool,
    inserter_open: bool,
    inserter_offset: usize,
    media_picker_open: bool,
    revealed_remove: Option<usize>,
    autocapitalize: bool,
    frozen_scroll: bool,
    implicit_wait: Option<Duration>,
    paused: Duration,
    calls: Vec<String>,
}

impl SimulatedEditor {
    pub fn new(platform: Platform) -> Self {
        SimulatedEditor {
            strategy: strategy_for(platform),
            blocks: Vec::new(),
            title: String::new(),
            viewport_top: 0,
            viewport_rows: 4,
            scroll_step: 2,
            focused: None,
            keyboard_shown: false,
            html_mode: false,
            html_buffer: String::new(),
            html_edited: false,
            menu_open: false,
            inserter_open: false,
            inserter_offset: 0,
            media_picker_open: false,
            revealed_remove: None,
            autocapitalize: false,
            frozen_scroll: false,
            implicit_wait: None,
            paused: Duration::ZERO,
            calls: Vec::new(),
        }
    }

    pub fn with_blocks(mut self, blocks: Vec<SimBlock>) -> Self {
        self.blocks = blocks;
        self
    }

    pub fn with_title(mut self, title: &str) -> Self {
        self.title = title.to_string();
        self
    }

    pub fn with_viewport(mut self, rows: usize, scroll_step: usize) -> Self {
        self.viewport_rows = rows.max(1);
        self.scroll_step = scroll_step.max(1);
        self
    }

    /// Capitalise the first letter typed into an empty field, like iOS autocorrect.
    pub fn with_autocapitalize(mut self, enabled: bool) -> Self {
        self.autocapitalize = enabled;
        self
    }

    /// Swipes are accepted but never move the viewport, scroll the inserter
    /// or reveal a block's remove control.
    pub fn with_frozen_scroll(mut self, frozen: bool) -> Self {
        self.frozen_scroll = frozen;
        self
    }

    /// Start scrolled down to `top`; call after `with_blocks`.
    pub fn with_viewport_top(mut self, top: usize) -> Self {
        self.viewport_top = top.min(self.max_top());
        self
    }

    pub fn with_keyboard_shown(mut self, shown: bool) -> Self {
        self.keyboard_shown = shown;
        self
    }

    pub fn blocks(&self) -> &[SimBlock] {
        &self.blocks
    }

    pub fn title(&self) -> &str {
        &self.title
    }

    pub fn viewport_top(&self) -> usize {
        self.viewport_top
    }

    pub fn keyboard_visible(&self) -> bool {
        self.keyboard_shown
    }

    pub fn in_html_mode(&self) -> bool {
        self.html_mode
    }

    pub fn implicit_wait(&self) -> Option<Duration> {
        self.implicit_wait
    }

    pub fn total_paused(&self) -> Duration {
        self.paused
    }

    /// Driver calls received so far, one line per call.
    pub fn calls(&self) -> &[String] {
        &self.calls
    }

    pub fn calls_matching(&self, prefix: &str) -> usize {
        self.calls.iter().filter(|c| c.starts_with(prefix)).count()
    }

    pub fn to_html(&self) -> String {
        self.blocks
            .iter()
            .map(|b| b.to_html())
            .collect::<Vec<_>>()
            .join("\n\n")
    }

    // ========================================================================
    // Rendering
    // ========================================================================

    fn visible_range(&self) -> std::ops::Range<usize> {
        let end = (self.viewport_top + self.viewport_rows).min(self.blocks.len());
        self.viewport_top.min(end)..end
    }

    fn max_top(&self) -> usize {
        self.blocks.len().saturating_sub(self.viewport_rows)
    }

    fn ensure_visible(&mut self, index: usize) {
        if index < self.viewport_top {
            self.viewport_top = index;
        } else if index >= self.viewport_top + self.viewport_rows {
            self.viewport_top = index + 1 - self.viewport_rows;
        }
    }

    fn container_class(&self) -> &'static str {
        if self.strategy.platform().is_android() {
            "android.view.ViewGroup"
        } else {
            "XCUIElementTypeOther"
        }
    }

    fn button_class(&self) -> &'static str {
        self.strategy
            .button_class()
            .unwrap_or("android.widget.Button")
    }

    fn node(&self, id: String, class: &str, label: String, owner: Option<usize>, role: Role) -> Node {
        Node {
            id,
            class: class.to_string(),
            label,
            owner,
            role,
        }
    }

    fn render(&self) -> Vec<Node> {
        let mut nodes = Vec::new();
        let button = self.button_class();
        let text_view = self.strategy.text_view_class();

        if self.html_mode {
            nodes.push(self.node(
                "html-view".into(),
                text_view,
                HTML_VIEW_CONTENT_ID.into(),
                None,
                Role::Chrome,
            ));
        } else {
            if self.viewport_top == 0 {
                nodes.push(self.node(
                    "title".into(),
                    text_view,
                    title_label(&self.title),
                    None,
                    Role::Chrome,
                ));
            }

            for index in self.visible_range() {
                let block = &self.blocks[index];
                let row = index as u32 + 1;
                let mut label = block_label(block.name.as_str(), row);
                if !block.text.is_empty() {
                    label = format!("{} {}", label, block.text.replace('\n', " "));
                }
                nodes.push(self.node(
                    format!("block:{}", index),
                    self.container_class(),
                    label,
                    Some(index),
                    Role::Block,
                ));

                if block.name.has_text() {
                    let class = if block.name == BlockName::Heading && block.text.is_empty() {
                        self.strategy.empty_heading_class()
                    } else {
                        text_view
                    };
                    nodes.push(self.node(
                        format!("text:{}", index),
                        class,
                        String::new(),
                        Some(index),
                        Role::Content,
                    ));
                }

                if row > 1 {
                    nodes.push(self.node(
                        format!("move-up:{}", index),
                        button,
                        move_up_label(row),
                        Some(index),
                        Role::Control,
                    ));
                }
                if index + 1 < self.blocks.len() {
                    nodes.push(self.node(
                        format!("move-down:{}", index),
                        button,
                        move_down_label(row),
                        Some(index),
                        Role::Control,
                    ));
                }

                let remove_visible = !self.strategy.remove_control_needs_swipe()
                    || self.revealed_remove == Some(index);
                if remove_visible {
                    nodes.push(self.node(
                        format!("remove:{}", index),
                        button,
                        remove_label(row),
                        None,
                        Role::Chrome,
                    ));
                }

                if block.name == BlockName::Image && self.focused == Some(index) {
                    nodes.push(self.node(
                        format!("caption:{}", index),
                        button,
                        caption_label(&block.caption),
                        None,
                        Role::Chrome,
                    ));
                }
            }

            nodes.push(self.node(
                "add-block".into(),
                button,
                self.strategy.add_block_id().into(),
                None,
                Role::Chrome,
            ));

            if let Some(index) = self.focused {
                if self.blocks.get(index).map(|b| b.name) == Some(BlockName::List) {
                    nodes.push(self.node(
                        "ordered".into(),
                        button,
                        ORDERED_LIST_ID.into(),
                        None,
                        Role::Chrome,
                    ));
                }
            }

            if self.inserter_open {
                let entries: Vec<BlockName> = if self.strategy.inserter_needs_scroll() {
                    BlockName::INSERTABLE
                        .iter()
                        .skip(self.inserter_offset)
                        .take(INSERTER_WINDOW)
                        .copied()
                        .collect()
                } else {
                    BlockName::INSERTABLE.to_vec()
                };
                for name in entries {
                    nodes.push(self.node(
                        format!("inserter:{}", name.as_str()),
                        button,
                        name.as_str().into(),
                        None,
                        Role::Chrome,
                    ));
                }
            }

            if self.media_picker_open {
                nodes.push(self.node(
                    "media-library".into(),
                    button,
                    MEDIA_LIBRARY_ID.into(),
                    None,
                    Role::Chrome,
                ));
            }
        }

        nodes.push(self.node(
            "more-options".into(),
            button,
            self.strategy.more_options_id().into(),
            None,
            Role::Chrome,
        ));

        if self.menu_open {
            let (id, label) = if self.html_mode {
                ("switch-visual", SWITCH_TO_VISUAL_ID)
            } else {
                ("switch-html", SWITCH_TO_HTML_ID)
            };
            nodes.push(self.node(id.into(), button, label.into(), None, Role::Chrome));
        }

        if self.keyboard_shown && !self.strategy.platform().is_android() {
            nodes.push(self.node(
                "hide-keyboard".into(),
                button,
                HIDE_KEYBOARD_ID.into(),
                None,
                Role::Chrome,
            ));
        }

        nodes
    }

    // ========================================================================
    // Locator evaluation
    // ========================================================================

    fn evaluate(&self, locator: &Locator, nodes: &[Node]) -> Vec<Node> {
        let attribute_ok = |attribute: &str| attribute == self.strategy.xpath_attribute();
        match locator {
            Locator::AccessibilityId { id } => nodes
                .iter()
                .filter(|n| n.label == *id)
                .cloned()
                .collect(),
            Locator::Attribute {
                class,
                attribute,
                matcher,
            } => {
                if !attribute_ok(attribute) {
                    return Vec::new();
                }
                nodes
                    .iter()
                    .filter(|n| class.as_deref().is_none_or(|c| c == n.class))
                    .filter(|n| matcher.matches(&n.label))
                    .cloned()
                    .collect()
            }
            Locator::Descendant { ancestor, class } => {
                let owners: Vec<usize> = self
                    .evaluate(ancestor, nodes)
                    .iter()
                    .filter(|n| n.role == Role::Block)
                    .filter_map(|n| n.owner)
                    .collect();
                nodes
                    .iter()
                    .filter(|n| n.role == Role::Content && n.class == *class)
                    .filter(|n| n.owner.is_some_and(|o| owners.contains(&o)))
                    .cloned()
                    .collect()
            }
            Locator::FollowingSibling {
                anchor,
                nested,
                attribute,
                matcher,
            } => {
                if !attribute_ok(attribute) || *nested != self.strategy.nested_block_controls() {
                    return Vec::new();
                }
                let owners: Vec<usize> = self
                    .evaluate(anchor, nodes)
                    .iter()
                    .filter(|n| n.role == Role::Block)
                    .filter_map(|n| n.owner)
                    .collect();
                nodes
                    .iter()
                    .filter(|n| n.role == Role::Control)
                    .filter(|n| n.owner.is_some_and(|o| owners.contains(&o)))
                    .filter(|n| matcher.matches(&n.label))
                    .cloned()
                    .collect()
            }
        }
    }

    /// Resolve an element id against the current render; stale ids fail.
    fn resolve(&self, element: &Element, command: &str) -> Result<Node, PageError> {
        self.render()
            .into_iter()
            .find(|n| n.id == element.id)
            .ok_or_else(|| PageError::DriverProtocol {
                command: command.into(),
                error: format!("stale element reference: {}", element.id),
            })
    }

    fn index_of(id: &str) -> Option<usize> {
        id.split_once(':').and_then(|(_, i)| i.parse().ok())
    }

    // ========================================================================
    // Document mutations
    // ========================================================================

    fn focus(&mut self, index: usize) {
        self.focused = Some(index);
        self.media_picker_open = false;
        if let Some(block) = self.blocks.get(index) {
            self.keyboard_shown = block.name.has_text();
            if block.name == BlockName::Image && block.media.is_none() {
                self.media_picker_open = true;
            }
        }
    }

    fn insert_block(&mut self, name: BlockName) {
        let index = match self.focused {
            Some(i) if i < self.blocks.len() => i + 1,
            _ => self.blocks.len(),
        };
        self.blocks.insert(index, SimBlock::new(name, ""));
        self.inserter_open = false;
        self.revealed_remove = None;
        self.ensure_visible(index);
        self.focus(index);
    }

    fn remove_block(&mut self, index: usize) {
        if index >= self.blocks.len() {
            return;
        }
        self.blocks.remove(index);
        self.revealed_remove = None;
        self.media_picker_open = false;
        self.focused = match self.focused {
            Some(f) if f == index => None,
            Some(f) if f > index => Some(f - 1),
            other => other,
        };
        self.viewport_top = self.viewport_top.min(self.max_top());
    }

    fn type_into_block(&mut self, mut index: usize, text: &str) {
        for ch in text.chars() {
            let name = self.blocks[index].name;
            if ch == '\n' && name != BlockName::List {
                self.blocks.insert(index + 1, SimBlock::new(BlockName::Paragraph, ""));
                index += 1;
                self.ensure_visible(index);
                self.focus(index);
                continue;
            }
            let target = &mut self.blocks[index].text;
            if target.is_empty() && self.autocapitalize {
                target.extend(ch.to_uppercase());
            } else {
                target.push(ch);
            }
        }
    }

    fn apply_html_edit(&mut self) {
        let blocks: Vec<SimBlock> = EDITABLE_BLOCK_PATTERN
            .captures_iter(&self.html_buffer)
            .map(|caps| {
                let name = if &caps[1] == "heading" {
                    BlockName::Heading
                } else {
                    BlockName::Paragraph
                };
                SimBlock::new(name, &caps[2])
            })
            .collect();
        self.blocks = blocks;
        self.focused = None;
        self.viewport_top = 0;
    }

    fn log(&mut self, entry: String) {
        self.calls.push(entry);
    }
}

impl AutomationDriver for SimulatedEditor {
    fn set_implicit_wait(&mut self, timeout: Duration) -> Result<(), PageError> {
        self.log(format!("set_implicit_wait {}", timeout.as_millis()));
        self.implicit_wait = Some(timeout);
        Ok(())
    }

    fn find_elements(&mut self, locator: &Locator) -> Result<Vec<Element>, PageError> {
        self.log(format!("find_elements {}", locator));
        let nodes = self.render();
        Ok(self
            .evaluate(locator, &nodes)
            .into_iter()
            .map(|n| Element::new(n.id))
            .collect())
    }

    fn click(&mut self, element: &Element) -> Result<(), PageError> {
        self.log(format!("click {}", element.id));
        self.resolve(element, "click")?;
        let index = Self::index_of(&element.id);

        match (element.id.split(':').next().unwrap_or(""), index) {
            ("block", Some(i)) | ("text", Some(i)) | ("caption", Some(i)) => {
                self.focus(i);
                if element.id.starts_with("caption") {
                    self.keyboard_shown = true;
                }
            }
            ("move-up", Some(i)) if i > 0 => {
                self.blocks.swap(i, i - 1);
                self.revealed_remove = None;
                self.focus(i - 1);
                self.ensure_visible(i - 1);
            }
            ("move-down", Some(i)) if i + 1 < self.blocks.len() => {
                self.blocks.swap(i, i + 1);
                self.revealed_remove = None;
                self.focus(i + 1);
                self.ensure_visible(i + 1);
            }
            ("remove", Some(i)) => self.remove_block(i),
            ("inserter", None) => {
                let name = element
                    .id
                    .split_once(':')
                    .and_then(|(_, n)| n.parse::<BlockName>().ok())
                    .unwrap_or(BlockName::Paragraph);
                self.insert_block(name);
            }
            ("add-block", _) => {
                self.inserter_open = true;
                self.inserter_offset = 0;
            }
            ("more-options", _) => self.menu_open = true,
            ("switch-html", _) => {
                self.menu_open = false;
                self.html_mode = true;
                self.html_buffer = self.to_html();
                self.html_edited = false;
            }
            ("switch-visual", _) => {
                self.menu_open = false;
                self.html_mode = false;
                if self.html_edited {
                    self.apply_html_edit();
                }
            }
            ("hide-keyboard", _) => self.keyboard_shown = false,
            ("media-library", _) => {
                self.media_picker_open = false;
                if let Some(block) = self.focused.and_then(|i| self.blocks.get_mut(i)) {
                    block.media = Some(SAMPLE_MEDIA_URL.to_string());
                }
            }
            ("ordered", _) => {
                if let Some(block) = self.focused.and_then(|i| self.blocks.get_mut(i)) {
                    block.ordered = !block.ordered;
                }
            }
            ("title", _) | ("html-view", _) => self.keyboard_shown = true,
            _ => {}
        }
        Ok(())
    }

    fn text(&mut self, element: &Element) -> Result<String, PageError> {
        self.log(format!("text {}", element.id));
        let node = self.resolve(element, "text")?;
        let index = Self::index_of(&element.id);
        let text = match (element.id.split(':').next().unwrap_or(""), index) {
            ("text", Some(i)) => self.blocks[i].text.clone(),
            ("caption", Some(i)) => self.blocks[i].caption.clone(),
            ("title", _) => self.title.clone(),
            ("html-view", _) => self.html_buffer.clone(),
            _ => node.label,
        };
        Ok(text)
    }

    fn attribute(&mut self, element: &Element, key: &str) -> Result<Option<String>, PageError> {
        self.log(format!("attribute {} {}", element.id, key));
        let node = self.resolve(element, "attribute")?;
        if key == self.strategy.attribute_key() {
            Ok(Some(node.label))
        } else {
            Ok(None)
        }
    }

    fn clear(&mut self, element: &Element) -> Result<(), PageError> {
        self.log(format!("clear {}", element.id));
        self.resolve(element, "clear")?;
        match (element.id.split(':').next().unwrap_or(""), Self::index_of(&element.id)) {
            ("text", Some(i)) => self.blocks[i].text.clear(),
            ("caption", Some(i)) => self.blocks[i].caption.clear(),
            ("title", _) => self.title.clear(),
            ("html-view", _) => {
                self.html_buffer.clear();
                self.html_edited = true;
            }
            _ => {}
        }
        Ok(())
    }

    fn send_keys(&mut self, element: &Element, text: &str) -> Result<(), PageError> {
        self.log(format!("send_keys {} {:?}", element.id, text));
        self.resolve(element, "send_keys")?;
        self.keyboard_shown = true;
        match (element.id.split(':').next().unwrap_or(""), Self::index_of(&element.id)) {
            ("text", Some(i)) => {
                self.focus(i);
                self.type_into_block(i, text);
            }
            ("caption", Some(i)) => self.blocks[i].caption.push_str(text),
            ("title", _) => self.title.push_str(text),
            ("html-view", _) => {
                self.html_buffer.push_str(text);
                self.html_edited = true;
            }
            _ => {
                return Err(PageError::DriverProtocol {
                    command: "send_keys".into(),
                    error: format!("element {} is not editable", element.id),
                });
            }
        }
        Ok(())
    }

    fn is_keyboard_shown(&mut self) -> Result<bool, PageError> {
        self.log("is_keyboard_shown".into());
        Ok(self.keyboard_shown)
    }

    fn hide_keyboard(&mut self) -> Result<(), PageError> {
        self.log("hide_keyboard".into());
        self.keyboard_shown = false;
        Ok(())
    }

    fn swipe(&mut self, direction: SwipeDirection, within: Option<&Element>) -> Result<(), PageError> {
        self.log(format!(
            "swipe {:?} {}",
            direction,
            within.map(|e| e.id.as_str()).unwrap_or("screen")
        ));

        if let Some(element) = within {
            let node = self.resolve(element, "swipe")?;
            if node.role == Role::Block && direction == SwipeDirection::Up && !self.frozen_scroll {
                self.revealed_remove = node.owner;
            }
            return Ok(());
        }

        if self.frozen_scroll {
            return Ok(());
        }

        if self.inserter_open && self.strategy.inserter_needs_scroll() {
            let max_offset = BlockName::INSERTABLE.len().saturating_sub(INSERTER_WINDOW);
            self.inserter_offset = match direction {
                SwipeDirection::Up => (self.inserter_offset + 1).min(max_offset),
                SwipeDirection::Down => self.inserter_offset.saturating_sub(1),
            };
            return Ok(());
        }

        self.viewport_top = match direction {
            SwipeDirection::Up => (self.viewport_top + self.scroll_step).min(self.max_top()),
            SwipeDirection::Down => self.viewport_top.saturating_sub(self.scroll_step),
        };
        self.revealed_remove = None;
        Ok(())
    }

    fn pause(&mut self, duration: Duration) {
        self.log(format!("pause {}", duration.as_millis()));
        self.paused += duration;
    }
}
