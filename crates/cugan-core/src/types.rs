//! Frame, clip, and GPU-device types shared across the adapter crates.
//!
//! Frames are host-side interleaved 8-bit RGB with an explicit row stride.
//! The engine consumes packed rows, so [`Frame::packed_rgb`] is the single
//! marshaling point between the two layouts: it borrows when the buffer is
//! already packed and copies row by row otherwise.

use std::borrow::Cow;
use std::fmt::Write as _;

use crate::error::{FilterError, Result};

/// Bytes per pixel for interleaved 8-bit RGB.
pub const RGB_BYTES_PER_PIXEL: usize = 3;

// ─── Video info ──────────────────────────────────────────────────────────

/// Geometry and sample format of a clip.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct VideoInfo {
    pub width: u32,
    pub height: u32,
    /// Interleaved color components per pixel.
    pub components: u32,
    pub bits_per_component: u32,
}

impl VideoInfo {
    /// 8-bit interleaved RGB — the only format the engine accepts.
    pub fn rgb24(width: u32, height: u32) -> Self {
        Self {
            width,
            height,
            components: 3,
            bits_per_component: 8,
        }
    }

    pub fn is_rgb24(&self) -> bool {
        self.components == 3 && self.bits_per_component == 8
    }

    /// The same format at `factor`× spatial resolution.
    pub fn scaled(&self, factor: u32) -> Self {
        Self {
            width: self.width * factor,
            height: self.height * factor,
            ..*self
        }
    }
}

// ─── Frame ───────────────────────────────────────────────────────────────

/// One interleaved 8-bit RGB frame with an explicit row stride.
///
/// `stride` is in bytes and may exceed `width * 3` when the host pads rows
/// for alignment. Construction validates that the buffer covers every row.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Frame {
    data: Vec<u8>,
    width: u32,
    height: u32,
    stride: usize,
}

impl Frame {
    /// Wrap a packed buffer (`stride == width * 3`).
    pub fn new_packed(width: u32, height: u32, data: Vec<u8>) -> Result<Self> {
        Self::with_stride(width, height, width as usize * RGB_BYTES_PER_PIXEL, data)
    }

    /// Wrap a buffer whose rows are `stride` bytes apart.
    pub fn with_stride(width: u32, height: u32, stride: usize, data: Vec<u8>) -> Result<Self> {
        let row_bytes = width as usize * RGB_BYTES_PER_PIXEL;
        if stride < row_bytes {
            return Err(FilterError::Format(format!(
                "stride {stride} shorter than row ({row_bytes} bytes)"
            )));
        }
        // The last row needs only its pixels, not the trailing padding.
        let need = match height {
            0 => 0,
            h => stride * (h as usize - 1) + row_bytes,
        };
        if data.len() < need {
            return Err(FilterError::BufferTooSmall {
                need,
                have: data.len(),
            });
        }
        Ok(Self {
            data,
            width,
            height,
            stride,
        })
    }

    pub fn width(&self) -> u32 {
        self.width
    }

    pub fn height(&self) -> u32 {
        self.height
    }

    pub fn stride(&self) -> usize {
        self.stride
    }

    pub fn is_packed(&self) -> bool {
        self.stride == self.width as usize * RGB_BYTES_PER_PIXEL
    }

    /// Pixel bytes of row `y`, excluding stride padding.
    pub fn row(&self, y: u32) -> &[u8] {
        let start = y as usize * self.stride;
        &self.data[start..start + self.width as usize * RGB_BYTES_PER_PIXEL]
    }

    /// The frame as one packed RGB buffer — borrowed when already packed,
    /// copied row by row otherwise.
    pub fn packed_rgb(&self) -> Cow<'_, [u8]> {
        let row_bytes = self.width as usize * RGB_BYTES_PER_PIXEL;
        if self.is_packed() && self.data.len() == row_bytes * self.height as usize {
            return Cow::Borrowed(&self.data);
        }
        let mut packed = Vec::with_capacity(row_bytes * self.height as usize);
        for y in 0..self.height {
            packed.extend_from_slice(self.row(y));
        }
        Cow::Owned(packed)
    }
}

// ─── GPU topology ────────────────────────────────────────────────────────

/// One Vulkan device as reported by the engine runtime.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct GpuDeviceInfo {
    pub index: i32,
    pub name: String,
    /// Upper bound for the `gpu_thread` argument on this device.
    pub compute_queue_count: u32,
}

/// Snapshot of the visible devices, taken once at filter construction so
/// argument validation stays a pure function.
#[derive(Clone, Debug, Default)]
pub struct GpuTopology {
    pub devices: Vec<GpuDeviceInfo>,
    pub default_index: i32,
}

impl GpuTopology {
    pub fn device_count(&self) -> i32 {
        self.devices.len() as i32
    }

    pub fn device(&self, index: i32) -> Option<&GpuDeviceInfo> {
        usize::try_from(index).ok().and_then(|i| self.devices.get(i))
    }

    /// Human-readable device listing for the `list_gpu` flag, one
    /// `index: name` entry per line.
    pub fn describe(&self) -> String {
        let mut out = String::new();
        for dev in &self.devices {
            let _ = writeln!(out, "{}: {}", dev.index, dev.name);
        }
        out
    }
}

// ─── Tests ───────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn video_info_scaling_keeps_format() {
        let info = VideoInfo::rgb24(640, 360);
        assert!(info.is_rgb24());
        let scaled = info.scaled(3);
        assert_eq!((scaled.width, scaled.height), (1920, 1080));
        assert!(scaled.is_rgb24());
    }

    #[test]
    fn packed_frame_borrows() {
        let frame = Frame::new_packed(2, 2, vec![7u8; 12]).expect("packed frame");
        assert!(frame.is_packed());
        assert!(matches!(frame.packed_rgb(), Cow::Borrowed(_)));
    }

    #[test]
    fn strided_frame_packs_rows() {
        // 2x2 frame, 8-byte stride: rows are [pixels.. pad pad].
        let mut data = vec![0u8; 8 * 2];
        data[..6].copy_from_slice(&[1, 2, 3, 4, 5, 6]);
        data[8..14].copy_from_slice(&[7, 8, 9, 10, 11, 12]);
        let frame = Frame::with_stride(2, 2, 8, data).expect("strided frame");
        assert!(!frame.is_packed());
        assert_eq!(frame.row(1), &[7, 8, 9, 10, 11, 12]);
        let packed = frame.packed_rgb();
        assert!(matches!(packed, Cow::Owned(_)));
        assert_eq!(&packed[..], &[1, 2, 3, 4, 5, 6, 7, 8, 9, 10, 11, 12]);
    }

    #[test]
    fn last_row_does_not_require_padding() {
        // Height 2, stride 8: need 8 + 6 = 14 bytes, not 16.
        assert!(Frame::with_stride(2, 2, 8, vec![0u8; 14]).is_ok());
        let err = Frame::with_stride(2, 2, 8, vec![0u8; 13]).unwrap_err();
        match err {
            FilterError::BufferTooSmall { need, have } => {
                assert_eq!(need, 14);
                assert_eq!(have, 13);
            }
            other => panic!("unexpected error: {other:?}"),
        }
    }

    #[test]
    fn stride_below_row_width_rejected() {
        assert!(Frame::with_stride(4, 1, 11, vec![0u8; 12]).is_err());
    }

    #[test]
    fn topology_describe_lists_one_device_per_line() {
        let topo = GpuTopology {
            devices: vec![
                GpuDeviceInfo {
                    index: 0,
                    name: "NVIDIA GeForce RTX 3060".into(),
                    compute_queue_count: 8,
                },
                GpuDeviceInfo {
                    index: 1,
                    name: "AMD Radeon RX 6600".into(),
                    compute_queue_count: 2,
                },
            ],
            default_index: 0,
        };
        assert_eq!(
            topo.describe(),
            "0: NVIDIA GeForce RTX 3060\n1: AMD Radeon RX 6600\n"
        );
        assert_eq!(topo.device(1).map(|d| d.compute_queue_count), Some(2));
        assert!(topo.device(-1).is_none());
        assert!(topo.device(2).is_none());
    }
}
