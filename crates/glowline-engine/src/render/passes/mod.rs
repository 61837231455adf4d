//! GPU passes: one pipeline and one vertex/index buffer pair per batch.

mod batch_pass;
mod circles;
mod common;
mod lines;

pub use batch_pass::BatchPass;
pub use circles::{create_circle_pass, CirclePass};
pub use common::ViewProjBinding;
pub use lines::{create_line_pass, LinePass};
