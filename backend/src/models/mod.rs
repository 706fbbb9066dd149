pub mod filter;
pub mod session;

pub use filter::*;
pub use session::*;
