//! Safe wrapper around the Real-CUGAN engine handle.
//!
//! Lifecycle: [`RealCugan::create`] → [`load`](RealCugan::load) →
//! [`set_parameters`](RealCugan::set_parameters) → per-frame
//! [`SuperResEngine::process`] calls → destroy on drop.
//!
//! `process` is a single blocking call; the engine synchronizes its Vulkan
//! queue internally before returning, so the output buffer is fully written
//! when the call completes. Concurrent submissions from multiple frames are
//! bounded by the filter's gate, not here.

use std::ffi::CString;
use std::path::Path;

use tracing::debug;

use cugan_core::error::{FilterError, Result};
use cugan_core::source::SuperResEngine;
use cugan_core::types::Frame;

use crate::sys;

/// Owned engine instance bound to one Vulkan device.
pub struct RealCugan {
    handle: sys::RealCuganHandle,
    scale: u32,
}

// SAFETY: the engine serializes access to its handle internally; the adapter
// never hands out the raw pointer.
unsafe impl Send for RealCugan {}
unsafe impl Sync for RealCugan {}

impl RealCugan {
    /// Construct an engine on `gpu_id` with one internal worker thread.
    pub fn create(gpu_id: i32, tta: bool) -> Result<Self> {
        // SAFETY: gpu_id was validated against the device count.
        let handle = unsafe { sys::realcugan_create(gpu_id, tta as i32, 1) };
        if handle.is_null() {
            return Err(FilterError::Engine(format!(
                "failed to create engine on GPU {gpu_id}"
            )));
        }
        Ok(Self { handle, scale: 1 })
    }

    /// Load network topology and weights.
    pub fn load(&mut self, param_path: &Path, model_path: &Path) -> Result<()> {
        let param = path_cstring(param_path)?;
        let model = path_cstring(model_path)?;
        // SAFETY: handle is live; both paths are NUL-terminated UTF-8.
        let rc = unsafe { sys::realcugan_load(self.handle, param.as_ptr(), model.as_ptr()) };
        if rc != 0 {
            return Err(FilterError::Engine(format!(
                "engine failed to load {} (code {rc})",
                param_path.display()
            )));
        }
        debug!(param = %param_path.display(), "engine model loaded");
        Ok(())
    }

    /// Set per-clip inference parameters after a successful load.
    pub fn set_parameters(&mut self, noise: i32, scale: i32, tilesize: i32, prepadding: i32) {
        self.scale = scale as u32;
        // SAFETY: handle is live and loaded.
        unsafe { sys::realcugan_set_parameters(self.handle, noise, scale, tilesize, prepadding) };
    }
}

impl SuperResEngine for RealCugan {
    fn scale(&self) -> u32 {
        self.scale
    }

    fn process(&self, input: &Frame) -> Result<Frame> {
        let src = input.packed_rgb();
        let out_w = input.width() * self.scale;
        let out_h = input.height() * self.scale;
        let mut dst = vec![0u8; out_w as usize * out_h as usize * 3];

        // SAFETY: src holds width*height*3 packed bytes, dst holds the
        // scaled equivalent; the call blocks until the GPU work completes.
        let rc = unsafe {
            sys::realcugan_process(
                self.handle,
                src.as_ptr(),
                input.width() as i32,
                input.height() as i32,
                dst.as_mut_ptr(),
            )
        };
        if rc != 0 {
            return Err(FilterError::Engine(format!(
                "engine process failed (code {rc})"
            )));
        }

        Frame::new_packed(out_w, out_h, dst)
    }
}

impl Drop for RealCugan {
    fn drop(&mut self) {
        // SAFETY: handle is live exactly once; no process call can be in
        // flight because drop requires exclusive ownership.
        unsafe { sys::realcugan_destroy(self.handle) };
    }
}

fn path_cstring(path: &Path) -> Result<CString> {
    let utf8 = path
        .to_str()
        .ok_or_else(|| FilterError::Engine(format!("non-UTF-8 model path: {}", path.display())))?;
    CString::new(utf8)
        .map_err(|_| FilterError::Engine(format!("model path contains NUL: {}", path.display())))
}
