mod event;
mod scope;
mod screen;

pub use event::*;
pub use scope::*;
pub use screen::*;
