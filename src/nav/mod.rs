mod back;
mod controller;
mod gate;
mod screen;

pub use back::*;
pub use controller::*;
pub use gate::*;
pub use screen::*;
