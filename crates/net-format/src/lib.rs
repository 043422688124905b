pub mod errors;
pub mod job;
pub mod load;
pub mod metadata;
pub mod save;
pub mod svg;

pub use errors::{ExportError, LoadError};
pub use job::{load_job, run_job, NetJob, ShapeSpec, SolidSpec, JOB_FORMAT, JOB_VERSION};
pub use load::load_sheet;
pub use metadata::SheetMetadata;
pub use save::{save_sheet, NamedNet, NetSheet, FORMAT_VERSION, SHEET_FORMAT};
pub use svg::SvgSink;
