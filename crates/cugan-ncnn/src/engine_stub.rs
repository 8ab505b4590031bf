#![allow(missing_docs)]
//! Stub engine for builds without the ncnn runtime.

use std::path::Path;

use cugan_core::error::{FilterError, Result};
use cugan_core::source::SuperResEngine;
use cugan_core::types::Frame;

/// Stub Real-CUGAN engine (unavailable in this build).
pub struct RealCugan {
    scale: u32,
}

impl RealCugan {
    pub fn create(_gpu_id: i32, _tta: bool) -> Result<Self> {
        Err(runtime_disabled())
    }

    pub fn load(&mut self, _param_path: &Path, _model_path: &Path) -> Result<()> {
        Err(runtime_disabled())
    }

    pub fn set_parameters(&mut self, _noise: i32, scale: i32, _tilesize: i32, _prepadding: i32) {
        self.scale = scale as u32;
    }
}

impl SuperResEngine for RealCugan {
    fn scale(&self) -> u32 {
        self.scale
    }

    fn process(&self, _input: &Frame) -> Result<Frame> {
        Err(runtime_disabled())
    }
}

fn runtime_disabled() -> FilterError {
    FilterError::Engine(
        "cugan-ncnn built without `ncnn-runtime`; the GPU engine is unavailable".into(),
    )
}
