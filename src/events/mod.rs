pub mod pointer;
pub mod theme;

pub use pointer::wire_pointer_handlers;
pub use theme::wire_theme_observers;
