//! CPU-side geometry: vertex layouts, growable batches and the primitive
//! builders that synthesize antialiasing as extra fade geometry.
//!
//! All builders emit triangle lists into a `GeometryBatch`. Positions are in
//! clip space (see `coords`), so a frame's batches can be uploaded as-is.

mod batch;
mod circle;
mod line;
mod outline;
mod recorder;
mod trig;
mod vertex;

pub use batch::{grow_target, BatchView, GeometryBatch};
pub use circle::add_filled_circle;
pub use line::add_line;
pub use outline::{add_polygon_outline, outline_min_sides};
pub use recorder::ShapeRecorder;
pub use trig::{SinCosValues, TrigTable};
pub use vertex::{CircleVertex, LineVertex};
