pub mod platform;
pub mod strategy;
