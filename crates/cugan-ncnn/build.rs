#![allow(missing_docs)]
//! Build script — link the engine C shim when `ncnn-runtime` is enabled.
//!
//! Search path resolution:
//!   1. REALCUGAN_LIB_DIR env var
//!   2. ../third_party/realcugan relative to the workspace root
//!
//! The shim itself links ncnn and the Vulkan loader; transitive `-l` flags
//! are emitted here so the final artifact resolves them.

use std::env;
use std::path::PathBuf;

fn main() {
    println!("cargo:rerun-if-changed=build.rs");
    println!("cargo:rerun-if-env-changed=REALCUGAN_LIB_DIR");

    if env::var_os("CARGO_FEATURE_NCNN_RUNTIME").is_none() {
        return;
    }

    if let Some(dir) = resolve_lib_dir() {
        println!("cargo:rustc-link-search=native={}", dir.display());
    } else {
        println!(
            "cargo:warning=REALCUGAN_LIB_DIR is unset and no vendored \
             third_party/realcugan directory was found; relying on system \
             library paths for librealcugan-c"
        );
    }

    println!("cargo:rustc-link-lib=dylib=realcugan-c");
    println!("cargo:rustc-link-lib=dylib=ncnn");
    if cfg!(target_os = "windows") {
        println!("cargo:rustc-link-lib=dylib=vulkan-1");
    } else {
        println!("cargo:rustc-link-lib=dylib=vulkan");
    }
}

fn resolve_lib_dir() -> Option<PathBuf> {
    if let Ok(dir) = env::var("REALCUGAN_LIB_DIR") {
        return Some(PathBuf::from(dir));
    }

    let manifest_dir = PathBuf::from(env::var("CARGO_MANIFEST_DIR").ok()?);
    let workspace_root = manifest_dir.parent()?.parent()?;
    let vendored = workspace_root.join("third_party").join("realcugan");
    vendored.exists().then_some(vendored)
}
