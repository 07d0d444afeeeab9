pub mod labels;
pub mod locator;
pub mod queries;
