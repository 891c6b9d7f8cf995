pub mod app;
pub mod button;
pub mod driver;
pub mod theme;
pub mod window;
