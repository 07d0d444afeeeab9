//! Page object for end-to-end tests of the mobile block editor.
//!
//! [`page::editor_page::EditorPage`] resolves blocks by their render row
//! through platform accessibility labels, and drives typing, reordering,
//! removal and the raw HTML view through any [`driver::driver::AutomationDriver`]:
//! a live Appium session or the in-memory [`driver::simulator::SimulatedEditor`].

pub mod cli;
pub mod driver;
pub mod locator;
pub mod page;
pub mod platform;
pub mod report;
pub mod scenario;
pub mod trace;
