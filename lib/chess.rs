mod board;
mod castles;
mod color;
mod figure;
mod r#move;
mod piece;
mod power;
mod promotion;
mod role;
mod square;
mod status;

pub use board::*;
pub use castles::*;
pub use color::*;
pub use figure::*;
pub use piece::*;
pub use power::*;
pub use promotion::*;
pub use r#move::*;
pub use role::*;
pub use square::*;
pub use status::*;
