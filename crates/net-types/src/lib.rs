pub mod bbox;
pub mod curve;
pub mod net;
pub mod params;
pub mod point;
pub mod vector;

pub use bbox::*;
pub use curve::*;
pub use net::*;
pub use params::*;
pub use point::*;
pub use vector::*;
