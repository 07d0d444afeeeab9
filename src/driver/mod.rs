pub mod appium;
pub mod driver;
pub mod simulator;
