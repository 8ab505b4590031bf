//! Model variant selection and on-disk weight path resolution.
//!
//! Weights live in a `models/` directory next to the installed plugin
//! binary, one subdirectory per variant, with filenames encoding scale and
//! noise level: `models/models-se/up2x-denoise3x.{param,bin}`.

use std::fs::File;
use std::path::{Path, PathBuf};

use cugan_core::error::{FilterError, Result};

/// Network variant, selected by the `model` argument.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ModelVariant {
    /// `models-nose` — no-denoise-only lightweight variant.
    Nose,
    /// `models-pro` — higher-quality variant with a reduced noise range.
    Pro,
    /// `models-se` — standard variant covering every noise level.
    Se,
}

impl ModelVariant {
    pub fn from_index(index: i32) -> Option<Self> {
        match index {
            0 => Some(Self::Nose),
            1 => Some(Self::Pro),
            2 => Some(Self::Se),
            _ => None,
        }
    }

    pub fn subdirectory(self) -> &'static str {
        match self {
            Self::Nose => "models-nose",
            Self::Pro => "models-pro",
            Self::Se => "models-se",
        }
    }
}

/// Upscale factor restricted to what the shipped weights support.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Scale {
    X2,
    X3,
    X4,
}

impl Scale {
    pub fn from_factor(factor: i32) -> Option<Self> {
        match factor {
            2 => Some(Self::X2),
            3 => Some(Self::X3),
            4 => Some(Self::X4),
            _ => None,
        }
    }

    pub fn factor(self) -> u32 {
        match self {
            Self::X2 => 2,
            Self::X3 => 3,
            Self::X4 => 4,
        }
    }

    /// Border padding the engine applies before tiling, fixed per scale by
    /// the shipped network topologies.
    pub fn prepadding(self) -> i32 {
        match self {
            Self::X2 => 18,
            Self::X3 => 14,
            Self::X4 => 19,
        }
    }
}

/// Topology (`.param`) and weight (`.bin`) paths for one configuration.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ModelPaths {
    pub param: PathBuf,
    pub bin: PathBuf,
}

/// File stem for a scale/noise combination, e.g. `up2x-denoise3x`.
pub fn model_stem(scale: Scale, noise: i32) -> String {
    let factor = scale.factor();
    match noise {
        -1 => format!("up{factor}x-conservative"),
        0 => format!("up{factor}x-no-denoise"),
        n => format!("up{factor}x-denoise{n}x"),
    }
}

/// Resolve both weight file paths under `models_root`.
pub fn model_paths(models_root: &Path, variant: ModelVariant, scale: Scale, noise: i32) -> ModelPaths {
    let dir = models_root.join(variant.subdirectory());
    let stem = model_stem(scale, noise);
    ModelPaths {
        param: dir.join(format!("{stem}.param")),
        bin: dir.join(format!("{stem}.bin")),
    }
}

/// Confirm the topology file exists by opening it. The engine re-opens both
/// files itself during load; this check exists to fail construction with a
/// precise path before any engine state is created.
pub fn verify(paths: &ModelPaths) -> Result<()> {
    File::open(&paths.param).map_err(|_| FilterError::ModelNotFound {
        path: paths.param.clone(),
    })?;
    Ok(())
}

/// The `models/` directory next to the installed plugin binary.
pub fn models_root() -> Result<PathBuf> {
    Ok(install_dir()?.join("models"))
}

#[cfg(unix)]
mod install {
    use std::ffi::{c_char, c_int, c_void, CStr};
    use std::path::{Path, PathBuf};

    use cugan_core::error::Result;

    #[repr(C)]
    struct DlInfo {
        dli_fname: *const c_char,
        dli_fbase: *mut c_void,
        dli_sname: *const c_char,
        dli_saddr: *mut c_void,
    }

    extern "C" {
        fn dladdr(addr: *const c_void, info: *mut DlInfo) -> c_int;
    }

    /// Directory containing whichever object (shared library or executable)
    /// this code was loaded from.
    pub(super) fn install_dir() -> Result<PathBuf> {
        let anchor = install_dir as *const c_void;
        let mut info = DlInfo {
            dli_fname: std::ptr::null(),
            dli_fbase: std::ptr::null_mut(),
            dli_sname: std::ptr::null(),
            dli_saddr: std::ptr::null_mut(),
        };
        // SAFETY: anchor points into this object; dladdr fills `info` on
        // success and leaves it untouched otherwise.
        let rc = unsafe { dladdr(anchor, &mut info) };
        if rc != 0 && !info.dli_fname.is_null() {
            // SAFETY: dli_fname is a valid C string on success.
            let fname = unsafe { CStr::from_ptr(info.dli_fname) }.to_string_lossy();
            if let Some(parent) = Path::new(fname.as_ref()).parent() {
                if !parent.as_os_str().is_empty() {
                    return Ok(parent.to_path_buf());
                }
            }
        }
        super::exe_dir()
    }
}

#[cfg(unix)]
use install::install_dir;

#[cfg(not(unix))]
fn install_dir() -> Result<PathBuf> {
    exe_dir()
}

fn exe_dir() -> Result<PathBuf> {
    let exe = std::env::current_exe()?;
    exe.parent()
        .map(Path::to_path_buf)
        .ok_or_else(|| FilterError::Engine("plugin binary has no parent directory".into()))
}

#[cfg(test)]
mod tests {
    use std::fs;
    use std::time::{SystemTime, UNIX_EPOCH};

    use super::*;

    fn unique_temp_dir(label: &str) -> PathBuf {
        let nanos = SystemTime::now()
            .duration_since(UNIX_EPOCH)
            .expect("clock")
            .as_nanos();
        let dir = std::env::temp_dir().join(format!(
            "cugan_models_{label}_{}_{}",
            std::process::id(),
            nanos
        ));
        fs::create_dir_all(&dir).expect("create temp dir");
        dir
    }

    #[test]
    fn variant_indices_match_host_argument() {
        assert_eq!(ModelVariant::from_index(0), Some(ModelVariant::Nose));
        assert_eq!(ModelVariant::from_index(1), Some(ModelVariant::Pro));
        assert_eq!(ModelVariant::from_index(2), Some(ModelVariant::Se));
        assert_eq!(ModelVariant::from_index(-1), None);
        assert_eq!(ModelVariant::from_index(3), None);
    }

    #[test]
    fn stems_encode_scale_and_noise() {
        assert_eq!(model_stem(Scale::X2, -1), "up2x-conservative");
        assert_eq!(model_stem(Scale::X3, 0), "up3x-no-denoise");
        assert_eq!(model_stem(Scale::X4, 3), "up4x-denoise3x");
        assert_eq!(model_stem(Scale::X2, 1), "up2x-denoise1x");
    }

    #[test]
    fn prepadding_follows_scale() {
        assert_eq!(Scale::X2.prepadding(), 18);
        assert_eq!(Scale::X3.prepadding(), 14);
        assert_eq!(Scale::X4.prepadding(), 19);
    }

    #[test]
    fn paths_use_variant_subdirectory() {
        let paths = model_paths(Path::new("/opt/plugin/models"), ModelVariant::Se, Scale::X2, 3);
        assert_eq!(
            paths.param,
            Path::new("/opt/plugin/models/models-se/up2x-denoise3x.param")
        );
        assert_eq!(
            paths.bin,
            Path::new("/opt/plugin/models/models-se/up2x-denoise3x.bin")
        );
    }

    #[test]
    fn missing_param_file_reports_its_path() {
        let root = unique_temp_dir("missing").join("models");
        let paths = model_paths(&root, ModelVariant::Pro, Scale::X3, 0);
        let err = verify(&paths).expect_err("must fail");
        match err {
            FilterError::ModelNotFound { path } => assert_eq!(path, paths.param),
            other => panic!("unexpected error: {other:?}"),
        }
    }

    #[test]
    fn present_param_file_verifies() {
        let root = unique_temp_dir("present").join("models");
        let dir = root.join("models-se");
        fs::create_dir_all(&dir).expect("create variant dir");
        fs::write(dir.join("up2x-no-denoise.param"), b"7767517\n").expect("write param");

        let paths = model_paths(&root, ModelVariant::Se, Scale::X2, 0);
        verify(&paths).expect("verify");
    }

    #[test]
    fn install_dir_resolves_to_a_directory() {
        let dir = install_dir().expect("install dir");
        assert!(dir.is_dir(), "not a directory: {}", dir.display());
    }
}
