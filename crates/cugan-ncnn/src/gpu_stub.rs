#![allow(missing_docs)]
//! Stub GPU surface for builds without the ncnn runtime.

use cugan_core::error::{FilterError, Result};
use cugan_core::types::GpuTopology;

/// One holder of the shared ncnn Vulkan instance (unavailable in this build).
#[derive(Debug)]
pub struct GpuInstance {
    _priv: (),
}

impl GpuInstance {
    pub fn acquire() -> Result<Self> {
        Err(runtime_disabled())
    }
}

pub fn topology() -> Result<GpuTopology> {
    Err(runtime_disabled())
}

fn runtime_disabled() -> FilterError {
    FilterError::Gpu(
        "cugan-ncnn built without `ncnn-runtime`; the GPU engine is unavailable".into(),
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn stub_acquire_names_the_missing_feature() {
        let err = GpuInstance::acquire().expect_err("stub must fail");
        assert!(matches!(err, FilterError::Gpu(_)));
        assert!(err.to_string().contains("ncnn-runtime"));
    }

    #[test]
    fn stub_topology_fails() {
        assert!(topology().is_err());
    }
}
