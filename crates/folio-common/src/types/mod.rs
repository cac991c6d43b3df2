mod history;
mod reference;

pub use history::*;
pub use reference::*;
