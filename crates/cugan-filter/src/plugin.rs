//! Host registration surface.
//!
//! The host shim registers one filter under these constants and maps crate
//! errors onto the host's string-based error channel via [`host_error`].

use cugan_core::error::FilterError;

/// Name the filter registers under.
pub const FILTER_NAME: &str = "cugan";

/// Short description shown in the host's filter listing.
pub const FILTER_DESCRIPTION: &str = "Real-CUGAN ncnn Vulkan super-resolution";

/// Positional clip plus named arguments, in host signature syntax.
pub const ARGS_SIGNATURE: &str =
    "c[noise]i[scale]i[tilesize]i[model]i[gpu_id]i[gpu_thread]i[tta]b[list_gpu]b";

/// Render `err` the way the host expects: prefixed with the filter name.
pub fn host_error(err: &FilterError) -> String {
    format!("{FILTER_NAME}: {err}")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn host_error_carries_filter_prefix() {
        let err = FilterError::Parameter("noise must be between -1 and 3 (inclusive)".into());
        assert_eq!(
            host_error(&err),
            "cugan: noise must be between -1 and 3 (inclusive)"
        );
    }

    #[test]
    fn signature_names_every_argument() {
        for arg in [
            "noise", "scale", "tilesize", "model", "gpu_id", "gpu_thread", "tta", "list_gpu",
        ] {
            assert!(ARGS_SIGNATURE.contains(&format!("[{arg}]")), "{arg}");
        }
    }
}
