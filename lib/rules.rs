mod attacks;
mod legal;
mod moves;
mod perft;
mod terminal;

pub use attacks::*;
pub use legal::*;
pub use moves::*;
pub use perft::*;
pub use terminal::*;
