//! Clip and engine trait seams.
//!
//! These traits give the filter crate a neutral home to depend on: the host
//! shim implements [`FrameSource`] for the input clip, the filter implements
//! it for its output clip, and the engine FFI crate implements
//! [`SuperResEngine`]. Tests substitute mocks at both seams.

use async_trait::async_trait;

use crate::error::Result;
use crate::types::{Frame, VideoInfo};

/// A clip: an ordered sequence of frames served on demand.
#[async_trait]
pub trait FrameSource: Send + Sync {
    /// Geometry and format of every frame this source produces.
    fn video_info(&self) -> VideoInfo;

    /// Produce frame `n`.
    async fn frame(&self, n: usize) -> Result<Frame>;
}

/// A super-resolution inference engine processing one frame per call.
///
/// `process` blocks the calling thread for the duration of the GPU
/// submission; callers bound concurrency externally (the filter's gate).
/// Output dimensions are input dimensions multiplied by [`scale`](Self::scale).
pub trait SuperResEngine: Send + Sync {
    /// Spatial upscale factor applied by the loaded model.
    fn scale(&self) -> u32;

    /// Run one upscale pass.
    fn process(&self, input: &Frame) -> Result<Frame>;
}
