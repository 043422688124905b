pub mod offset;
pub mod prism_kernel;
pub mod recording_sink;
pub mod traits;
pub mod types;

pub use offset::offset_convex_polygon;
pub use prism_kernel::PrismKernel;
pub use recording_sink::RecordingSink;
pub use traits::*;
pub use types::*;
