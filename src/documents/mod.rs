mod game;
mod stats;

pub use game::*;
pub use stats::*;
