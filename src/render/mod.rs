//! Image compositing and parallel render dispatch
//!
//! This module contains the rendering pipeline:
//! - Layer stack flattening into single output images
//! - Fixed-size worker pool dispatch with failure aggregation

/// Layer stack flattening and PNG output
pub mod compositor;
/// Worker pool dispatch and per-job failure aggregation
pub mod dispatcher;

pub use compositor::RenderOptions;
pub use dispatcher::DispatchReport;
