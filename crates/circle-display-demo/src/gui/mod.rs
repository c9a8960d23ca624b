pub mod app;
pub mod canvas;
pub mod host;
pub mod theme;
