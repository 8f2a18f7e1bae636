pub mod action;
pub mod mark;
pub mod outcome;
pub mod state;
pub mod status;

pub use action::*;
pub use mark::*;
pub use outcome::*;
pub use state::*;
pub use status::*;
