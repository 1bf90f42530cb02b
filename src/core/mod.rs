pub mod bolt;
pub mod constants;
pub mod plasma;
pub mod surface;
pub mod walker;

pub use bolt::*;
pub use plasma::*;
pub use surface::*;
pub use walker::*;
