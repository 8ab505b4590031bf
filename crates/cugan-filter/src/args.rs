//! Host argument resolution and validation.
//!
//! [`resolve`] is pure: it takes the argument set, the input clip geometry,
//! and a [`GpuTopology`] snapshot, and either produces fully-validated
//! parameters or the exact user-facing error text. Checks run in a fixed
//! order: ranges first, then the `list_gpu` short-circuit, then the no-op
//! passthrough.

use cugan_core::error::{FilterError, Result};
use cugan_core::types::{GpuTopology, VideoInfo};

use crate::models::{ModelVariant, Scale};

/// Raw host-supplied arguments; `None` means the host left it unset.
#[derive(Clone, Copy, Debug, Default)]
pub struct FilterArgs {
    /// Denoise level, -1 (conservative) to 3; 0 disables denoising.
    pub noise: Option<i32>,
    /// Upscale factor, 2 to 4.
    pub scale: Option<i32>,
    /// Engine tile size, minimum 32.
    pub tile_size: Option<i32>,
    /// Model variant index, 0 to 2.
    pub model: Option<i32>,
    /// Vulkan device index.
    pub gpu_id: Option<i32>,
    /// Concurrent GPU submissions, 1 to the device's compute queue count.
    pub gpu_thread: Option<i32>,
    /// Test-time augmentation.
    pub tta: Option<bool>,
    /// Return the device listing instead of filtering.
    pub list_gpu: Option<bool>,
}

/// Validated parameter set ready for engine construction.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct ResolvedParams {
    pub noise: i32,
    pub scale: Scale,
    pub tile_size: i32,
    pub model: ModelVariant,
    pub gpu_id: i32,
    pub gpu_thread: u32,
    pub tta: bool,
}

/// Outcome of argument resolution.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Resolution {
    /// Build the filter with these parameters.
    Filter(ResolvedParams),
    /// `list_gpu` set: annotate the input with the device listing.
    ListGpu,
    /// `noise=-1, scale=1`: return the input unchanged.
    Passthrough,
}

/// Apply defaults and validate every argument against the input clip and
/// the device topology.
pub fn resolve(args: &FilterArgs, info: &VideoInfo, topology: &GpuTopology) -> Result<Resolution> {
    if !info.is_rgb24() {
        return Err(FilterError::Format(
            "only 8-bit RGB formats supported".into(),
        ));
    }

    let noise = args.noise.unwrap_or(0);
    let scale = args.scale.unwrap_or(2);
    let tile_size = args.tile_size.unwrap_or_else(|| (info.width as i32).max(32));
    let model = args.model.unwrap_or(2);
    let gpu_id = args.gpu_id.unwrap_or(topology.default_index);
    let gpu_thread = args.gpu_thread.unwrap_or(2);
    let tta = args.tta.unwrap_or(false);

    if !(-1..=3).contains(&noise) {
        return Err(FilterError::Parameter(
            "noise must be between -1 and 3 (inclusive)".into(),
        ));
    }

    // The conservative-model/no-upscale pair bypasses inference entirely
    // and is exempt from the scale range below.
    let passthrough = noise == -1 && scale == 1;

    let scale = if passthrough {
        None
    } else {
        match Scale::from_factor(scale) {
            Some(s) => Some(s),
            None => {
                return Err(FilterError::Parameter(
                    "scale must be between 2 and 4 (inclusive)".into(),
                ))
            }
        }
    };

    if tile_size < 32 {
        return Err(FilterError::Parameter("tilesize must be at least 32".into()));
    }

    let model = ModelVariant::from_index(model).ok_or_else(|| {
        FilterError::Parameter("model must be between 0 and 2 (inclusive)".into())
    })?;

    if gpu_id < 0 || gpu_id >= topology.device_count() {
        return Err(FilterError::Parameter("invalid GPU device".into()));
    }
    let queue_count = topology
        .device(gpu_id)
        .map(|dev| dev.compute_queue_count)
        .unwrap_or(0);
    if gpu_thread < 1 || gpu_thread as u32 > queue_count {
        return Err(FilterError::Parameter(format!(
            "gpu_thread must be between 1 and {queue_count} (inclusive)"
        )));
    }

    if args.list_gpu.unwrap_or(false) {
        return Ok(Resolution::ListGpu);
    }

    match scale {
        None => Ok(Resolution::Passthrough),
        Some(scale) => Ok(Resolution::Filter(ResolvedParams {
            noise,
            scale,
            tile_size,
            model,
            gpu_id,
            gpu_thread: gpu_thread as u32,
            tta,
        })),
    }
}
