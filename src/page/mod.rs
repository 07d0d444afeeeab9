pub mod block;
pub mod editor_page;
pub mod error;
pub mod gallery;
pub mod heading;
pub mod image;
pub mod list;
pub mod paragraph;
pub mod scroll;
