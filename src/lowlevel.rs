//! Low-level building blocks for custom pipelines.
//!
//! These expose the correlation kernel, template plans and mask resampling
//! used internally by [`crate::Recognizer`] and [`crate::TemplateSearcher`].

pub use crate::image::integral::IntegralTables;
#[cfg(feature = "rayon")]
pub use crate::kernel::rayon::zncc_binary_scan_par;
pub use crate::kernel::scalar::ZnccBinaryScalar;
pub use crate::kernel::{Kernel, Peak, ScanParams, SearchImage};
pub use crate::mask::resample::{resize_nearest, rotate_nearest, scale_nearest};
pub use crate::search::{AngleGrid, ScaleGrid};
pub use crate::shape::cost::{mask_difference, shape_cost, COST_ANGLES_DEG};
pub use crate::template::{TemplateLimits, TemplatePlan, TemplateVariant};
