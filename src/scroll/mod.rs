//! Constant-velocity scroll compositing.
//!
//! Images are stitched into a bounded ribbon and sampled one viewport window per frame.

pub mod axis;
pub mod compositor;
pub mod pacing;
pub mod ribbon;
