//! Raw FFI bindings to the Real-CUGAN engine C shim (`librealcugan-c`).
//!
//! Covers only the subset the adapter needs: process-wide ncnn GPU instance
//! management, Vulkan device enumeration, and the engine object's
//! create/load/process/destroy entry points.
//!
//! # Linking
//!
//! `build.rs` emits `-l realcugan-c` (plus `ncnn` and the Vulkan loader)
//! when the `ncnn-runtime` feature is enabled. The shim directory is located
//! via the `REALCUGAN_LIB_DIR` env var.
//!
//! # Safety
//!
//! All functions here are `unsafe extern "C"`. The safe wrappers in
//! [`gpu`](crate::gpu) and [`engine`](crate::engine) enforce the invariants
//! documented per function.

#![allow(dead_code)]

use std::ffi::c_void;
use std::os::raw::{c_char, c_int, c_uint};

/// Opaque engine handle returned by [`realcugan_create`].
pub type RealCuganHandle = *mut c_void;

extern "C" {
    // ─── ncnn GPU instance ───────────────────────────────────────────────

    /// Create (or join) the process-wide ncnn Vulkan instance.
    /// Returns 0 on success.
    pub fn ncnn_create_gpu_instance() -> c_int;

    /// Destroy the process-wide instance. Callers must guarantee no engine
    /// handle outlives this call.
    pub fn ncnn_destroy_gpu_instance();

    /// Number of visible Vulkan devices.
    pub fn ncnn_get_gpu_count() -> c_int;

    /// Device index ncnn would pick by default.
    pub fn ncnn_get_default_gpu_index() -> c_int;

    /// Device name as a NUL-terminated string owned by the runtime.
    /// Valid while the GPU instance is alive.
    pub fn ncnn_get_gpu_device_name(index: c_int) -> *const c_char;

    /// Compute queue count of the device — the upper bound for concurrent
    /// submissions.
    pub fn ncnn_get_gpu_compute_queue_count(index: c_int) -> c_uint;

    // ─── Engine object ───────────────────────────────────────────────────

    /// Construct an engine bound to `gpu_id`. `tta` != 0 enables test-time
    /// augmentation. `num_threads` is the engine's internal worker count.
    /// Returns null on failure.
    pub fn realcugan_create(gpu_id: c_int, tta: c_int, num_threads: c_int) -> RealCuganHandle;

    /// Load network topology (`.param`) and weights (`.bin`) from UTF-8
    /// paths. Returns 0 on success.
    pub fn realcugan_load(
        handle: RealCuganHandle,
        param_path: *const c_char,
        model_path: *const c_char,
    ) -> c_int;

    /// Set per-clip inference parameters. Must be called after
    /// [`realcugan_load`] and before the first [`realcugan_process`].
    pub fn realcugan_set_parameters(
        handle: RealCuganHandle,
        noise: c_int,
        scale: c_int,
        tilesize: c_int,
        prepadding: c_int,
    );

    /// Upscale one packed-RGB frame. `out_rgb` must hold
    /// `(width * scale) * (height * scale) * 3` bytes. Blocks until the GPU
    /// submission completes. Returns 0 on success.
    pub fn realcugan_process(
        handle: RealCuganHandle,
        in_rgb: *const u8,
        width: c_int,
        height: c_int,
        out_rgb: *mut u8,
    ) -> c_int;

    /// Destroy the engine and release its device memory.
    pub fn realcugan_destroy(handle: RealCuganHandle);
}
