mod confirm;
mod handoff;
mod notice;

pub use confirm::*;
pub use handoff::*;
pub use notice::*;
