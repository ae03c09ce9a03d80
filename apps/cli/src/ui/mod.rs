pub mod render;
pub mod theme;

pub use theme::{Icon, Theme};
