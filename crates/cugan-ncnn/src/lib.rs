#![doc = include_str!("../README.md")]

/// Safe engine handle: create → load → set_parameters → process, destroy on
/// drop.
#[cfg(feature = "ncnn-runtime")]
pub mod engine;
#[cfg(not(feature = "ncnn-runtime"))]
#[path = "engine_stub.rs"]
pub mod engine;

/// GPU instance refcounting and Vulkan device enumeration.
#[cfg(feature = "ncnn-runtime")]
pub mod gpu;
#[cfg(not(feature = "ncnn-runtime"))]
#[path = "gpu_stub.rs"]
pub mod gpu;

#[cfg_attr(not(feature = "ncnn-runtime"), allow(dead_code))]
mod refcount;

#[cfg(feature = "ncnn-runtime")]
pub mod sys;

pub use engine::RealCugan;
pub use gpu::{topology, GpuInstance};
