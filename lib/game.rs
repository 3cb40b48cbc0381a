mod dice;
mod mystery;
mod request;
mod session;
mod state;

pub use dice::*;
pub use mystery::*;
pub use request::*;
pub use session::*;
pub use state::*;
