mod app;
mod effects;
pub mod logging;
mod render;

pub use app::run;
