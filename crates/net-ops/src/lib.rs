pub mod assemble;
pub mod bottom;
pub mod extent;
pub mod finger;
pub mod layout;
pub mod types;

pub use assemble::{
    assemble_box_net, assemble_net, assemble_prism_net, create_net, emit_net,
    validate_parameters, NetRequest,
};
pub use bottom::{box_bottom_panel, polygon_bottom_panel};
pub use extent::{extract_box_extent, extract_cross_section};
pub use finger::{generate_finger_joint, SeamMode, Teeth, Tooth, ToothDepth, MAX_TEETH};
pub use layout::{layout_box_panels, layout_polygon_panels, PanelStrip, StripSeam};
pub use types::*;
