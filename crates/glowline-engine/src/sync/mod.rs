//! Frame pacing between the simulation thread and the render thread.
//!
//! The only cross-thread coordination point of the engine: the simulation asks
//! for a frame and waits; the render thread signals once the frame is presented.

mod frame_sync;

pub use frame_sync::{FrameCompleter, FrameScheduler, FrameSync, FrameSyncError, FrameTicket};
