pub mod catalog;
pub mod config;
pub mod constants;
pub mod depth;
pub mod layout;
pub mod registry;
pub mod rotation;
pub mod scene;
pub mod texture;
pub mod theme;
pub mod viewport;
pub static BADGE_WGSL: &str = include_str!("../shaders/badge.wgsl");

pub use catalog::*;
pub use config::*;
pub use registry::*;
pub use rotation::*;
pub use scene::*;
pub use texture::*;
pub use theme::*;
pub use viewport::*;
