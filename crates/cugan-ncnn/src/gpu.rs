//! ncnn Vulkan instance lifecycle and device enumeration.
//!
//! The instance is shared process-wide: each filter retains it on
//! construction and the RAII [`GpuInstance`] guard releases it on drop,
//! destroying the instance when the last holder goes away. Failed
//! constructions roll their retain back simply by dropping the guard.

use std::ffi::CStr;

use tracing::{debug, info};

use cugan_core::error::{FilterError, Result};
use cugan_core::types::{GpuDeviceInfo, GpuTopology};

use crate::refcount::GPU_INSTANCES;
use crate::sys;

/// One holder of the shared ncnn Vulkan instance.
pub struct GpuInstance {
    _priv: (),
}

impl GpuInstance {
    /// Retain the shared instance, creating it on first use.
    pub fn acquire() -> Result<Self> {
        // SAFETY: no preconditions; repeated creation joins the existing
        // process-wide instance.
        let rc = unsafe { sys::ncnn_create_gpu_instance() };
        if rc != 0 {
            return Err(FilterError::Gpu("failed to create GPU instance".into()));
        }
        let holders = GPU_INSTANCES.retain();
        debug!(holders, "GPU instance retained");
        Ok(Self { _priv: () })
    }
}

impl Drop for GpuInstance {
    fn drop(&mut self) {
        if GPU_INSTANCES.release() {
            // SAFETY: last holder; engine handles never outlive the guard of
            // the filter that owns them.
            unsafe { sys::ncnn_destroy_gpu_instance() };
            info!("GPU instance destroyed");
        }
    }
}

/// Snapshot the visible Vulkan devices.
///
/// Requires a live [`GpuInstance`]; the returned data is plain values, so
/// validation against it needs no further FFI.
pub fn topology() -> Result<GpuTopology> {
    // SAFETY: instance is alive (caller holds a guard); index stays in range.
    let count = unsafe { sys::ncnn_get_gpu_count() };
    if count < 0 {
        return Err(FilterError::Gpu("failed to enumerate GPU devices".into()));
    }

    let mut devices = Vec::with_capacity(count as usize);
    for index in 0..count {
        let name = unsafe {
            let ptr = sys::ncnn_get_gpu_device_name(index);
            if ptr.is_null() {
                String::from("unknown device")
            } else {
                CStr::from_ptr(ptr).to_string_lossy().into_owned()
            }
        };
        let compute_queue_count = unsafe { sys::ncnn_get_gpu_compute_queue_count(index) };
        devices.push(GpuDeviceInfo {
            index,
            name,
            compute_queue_count,
        });
    }

    let default_index = unsafe { sys::ncnn_get_default_gpu_index() };
    debug!(count, default_index, "enumerated Vulkan devices");

    Ok(GpuTopology {
        devices,
        default_index,
    })
}
