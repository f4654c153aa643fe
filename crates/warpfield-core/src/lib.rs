pub mod color;
pub mod constants;
pub mod error;
pub mod parallax;
pub mod scheduler;
pub mod starfield;
pub mod surface;
pub mod wormhole;

pub use color::*;
pub use constants::*;
pub use error::*;
pub use parallax::*;
pub use scheduler::*;
pub use starfield::*;
pub use surface::*;
pub use wormhole::*;
