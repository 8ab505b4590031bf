#![doc = include_str!("../README.md")]

pub mod error;
pub mod source;
pub mod types;

pub use error::{FilterError, Result};
pub use source::{FrameSource, SuperResEngine};
pub use types::{Frame, GpuDeviceInfo, GpuTopology, VideoInfo};
