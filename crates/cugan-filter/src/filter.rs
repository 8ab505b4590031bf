//! Filter construction and the per-frame upscale path.
//!
//! [`create`] runs the whole construction sequence: acquire the shared GPU
//! instance, snapshot the device topology, resolve the host arguments, load
//! the model pair, and assemble a [`CuganFilter`]. The filter itself is a
//! [`FrameSource`] whose frames are the child's frames pushed through the
//! engine, with a semaphore bounding how many frames sit in the engine at
//! once.

use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;
use std::time::Instant;

use async_trait::async_trait;
use tokio::sync::Semaphore;
use tracing::info;

use cugan_core::error::{FilterError, Result};
use cugan_core::source::{FrameSource, SuperResEngine};
use cugan_core::types::{Frame, VideoInfo};
use cugan_ncnn::{topology, GpuInstance, RealCugan};

use crate::args::{self, FilterArgs, Resolution, ResolvedParams};
use crate::models;

// ─── Output ──────────────────────────────────────────────────────────────

/// What argument resolution turned the input clip into.
pub enum FilterOutput {
    /// The engine-backed upscaling clip.
    Upscaled(Arc<CuganFilter>),
    /// `noise=-1, scale=1`: nothing to do, the input clip passes through.
    Passthrough(Arc<dyn FrameSource>),
    /// `list_gpu=true`: the input clip plus the device listing to display.
    DeviceList {
        clip: Arc<dyn FrameSource>,
        listing: String,
    },
}

// ─── Metrics ─────────────────────────────────────────────────────────────

/// Atomic counters for engine activity, shared across frame requests.
#[derive(Debug)]
pub struct FilterMetrics {
    /// Total frames pushed through the engine.
    pub frames_processed: AtomicU64,
    /// Cumulative engine time in microseconds (for avg latency).
    pub total_process_us: AtomicU64,
    /// Peak single-frame engine time in microseconds.
    pub peak_process_us: AtomicU64,
}

impl FilterMetrics {
    pub const fn new() -> Self {
        Self {
            frames_processed: AtomicU64::new(0),
            total_process_us: AtomicU64::new(0),
            peak_process_us: AtomicU64::new(0),
        }
    }

    pub fn record(&self, elapsed_us: u64) {
        self.frames_processed.fetch_add(1, Ordering::Relaxed);
        self.total_process_us.fetch_add(elapsed_us, Ordering::Relaxed);
        self.peak_process_us.fetch_max(elapsed_us, Ordering::Relaxed);
    }

    pub fn snapshot(&self) -> FilterMetricsSnapshot {
        let frames = self.frames_processed.load(Ordering::Relaxed);
        let total = self.total_process_us.load(Ordering::Relaxed);
        let peak = self.peak_process_us.load(Ordering::Relaxed);
        FilterMetricsSnapshot {
            frames_processed: frames,
            avg_process_us: if frames > 0 { total / frames } else { 0 },
            peak_process_us: peak,
        }
    }
}

impl Default for FilterMetrics {
    fn default() -> Self {
        Self::new()
    }
}

/// Point-in-time copy of [`FilterMetrics`] for reporting.
#[derive(Clone, Debug)]
pub struct FilterMetricsSnapshot {
    pub frames_processed: u64,
    pub avg_process_us: u64,
    pub peak_process_us: u64,
}

// ─── Filter ──────────────────────────────────────────────────────────────

/// The upscaling clip: child frames pushed through the engine.
pub struct CuganFilter {
    child: Arc<dyn FrameSource>,
    /// Output geometry (child geometry times the engine scale).
    info: VideoInfo,
    /// Shared so each frame can move a handle onto the blocking pool.
    engine: Arc<dyn SuperResEngine>,
    /// Bounds concurrent `process` calls to the configured `gpu_thread`.
    gate: Semaphore,
    metrics: FilterMetrics,
    /// Keeps the shared ncnn Vulkan instance alive for the filter's lifetime.
    _gpu: Option<GpuInstance>,
}

impl CuganFilter {
    fn assemble(
        child: Arc<dyn FrameSource>,
        engine: Box<dyn SuperResEngine>,
        gpu_thread: u32,
        gpu: Option<GpuInstance>,
    ) -> Arc<Self> {
        let engine: Arc<dyn SuperResEngine> = Arc::from(engine);
        let info = child.video_info().scaled(engine.scale());
        Arc::new(Self {
            child,
            info,
            engine,
            gate: Semaphore::new(gpu_thread as usize),
            metrics: FilterMetrics::new(),
            _gpu: gpu,
        })
    }

    /// Build a filter around an arbitrary engine, without touching the GPU
    /// runtime. Mock engines plug in here.
    pub fn with_engine(
        child: Arc<dyn FrameSource>,
        engine: Box<dyn SuperResEngine>,
        gpu_thread: u32,
    ) -> Arc<Self> {
        Self::assemble(child, engine, gpu_thread, None)
    }

    pub fn metrics(&self) -> FilterMetricsSnapshot {
        self.metrics.snapshot()
    }
}

#[async_trait]
impl FrameSource for CuganFilter {
    fn video_info(&self) -> VideoInfo {
        self.info
    }

    async fn frame(&self, n: usize) -> Result<Frame> {
        let src = self.child.frame(n).await?;

        // Hold a permit for the whole engine call. `process` blocks, so it
        // runs on the blocking pool and the async workers stay free; the
        // semaphore is what caps GPU pressure.
        let _permit = self
            .gate
            .acquire()
            .await
            .map_err(|_| FilterError::Engine("concurrency gate closed".into()))?;

        let started = Instant::now();
        let engine = Arc::clone(&self.engine);
        let out = tokio::task::spawn_blocking(move || engine.process(&src))
            .await
            .map_err(|_| FilterError::Engine("engine worker terminated".into()))??;
        self.metrics.record(started.elapsed().as_micros() as u64);

        if (out.width(), out.height()) != (self.info.width, self.info.height) {
            return Err(FilterError::FrameGeometry {
                expected: (self.info.width, self.info.height),
                actual: (out.width(), out.height()),
            });
        }
        Ok(out)
    }
}

// ─── Construction ────────────────────────────────────────────────────────

/// Resolve `args` against `child` and build the corresponding output clip.
///
/// After the input-format check, the shared GPU instance is acquired before
/// argument validation so that device enumeration sees a live Vulkan
/// instance; any validation failure drops the guard again, releasing the
/// instance if this holder was the only one.
pub fn create(child: Arc<dyn FrameSource>, filter_args: &FilterArgs) -> Result<FilterOutput> {
    let info = child.video_info();
    if !info.is_rgb24() {
        return Err(FilterError::Format(
            "only 8-bit RGB formats supported".into(),
        ));
    }

    let guard = GpuInstance::acquire()?;
    let devices = topology()?;

    match args::resolve(filter_args, &info, &devices)? {
        Resolution::ListGpu => Ok(FilterOutput::DeviceList {
            clip: child,
            listing: devices.describe(),
        }),
        Resolution::Passthrough => Ok(FilterOutput::Passthrough(child)),
        Resolution::Filter(params) => {
            let engine = build_engine(&params)?;
            info!(
                width = info.width,
                height = info.height,
                scale = params.scale.factor(),
                noise = params.noise,
                tilesize = params.tile_size,
                model = params.model.subdirectory(),
                gpu_id = params.gpu_id,
                gpu_thread = params.gpu_thread,
                tta = params.tta,
                "cugan filter created"
            );
            Ok(FilterOutput::Upscaled(CuganFilter::assemble(
                child,
                Box::new(engine),
                params.gpu_thread,
                Some(guard),
            )))
        }
    }
}

/// Locate and load the model pair, then configure an engine around it.
fn build_engine(params: &ResolvedParams) -> Result<RealCugan> {
    let root = models::models_root()?;
    let paths = models::model_paths(&root, params.model, params.scale, params.noise);
    models::verify(&paths)?;

    let mut engine = RealCugan::create(params.gpu_id, params.tta)?;
    engine.load(&paths.param, &paths.bin)?;
    engine.set_parameters(
        params.noise,
        params.scale.factor() as i32,
        params.tile_size,
        params.scale.prepadding(),
    );
    Ok(engine)
}
