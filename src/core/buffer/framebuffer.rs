use super::view_params::ViewParams;
use crate::core::denoise::*;
use crate::core::error::*;
use crate::core::filmview::types::Float;
use crate::core::imageio::*;
use crate::core::session::*;
use crate::core::tempfiles::*;

use log::*;
use std::path::{Path, PathBuf};
use std::sync::{Arc, Mutex};

/// Pixel buffer mirroring the current state of a progressive rendering
/// session, plus the denoise pipeline that can replace its contents with
/// the output of an external denoiser.
///
/// Exclusively owned by the viewport session and driven from a single
/// thread: the host polls it once per display tick, rebuilding it whenever
/// `needs_replacement` reports the view has changed. At most one denoise
/// run is active at a time; callers must check `is_denoiser_active` before
/// starting another.
pub struct FrameBuffer {
    params: ViewParams,
    channel_count: usize,
    pixels: Vec<Float>,
    owner: OwnerId,
    ledger: Arc<Mutex<TempfileLedger>>,
    paths: DenoiserPaths,
    denoiser_exe: Option<PathBuf>,
    denoiser: Option<DenoiserProcess>,
    alpha: Option<Vec<Float>>,
    pub denoiser_result_cached: bool,
}

impl FrameBuffer {
    pub fn new(
        params: &ViewParams,
        config: &DenoiserConfig,
        ledger: &Arc<Mutex<TempfileLedger>>,
    ) -> Self {
        debug_assert!(params.width > 0 && params.height > 0);
        debug_assert!(params.pixel_size >= 1);

        let channel_count = if params.transparent { 4 } else { 3 };
        let owner = OwnerId::next();
        let paths = DenoiserPaths::new(&config.scratch_dir, owner);
        let denoiser_exe = find_denoiser(&config.executable, &config.search_dirs);

        FrameBuffer {
            params: params.clone(),
            channel_count,
            pixels: vec![0.0; params.width * params.height * channel_count],
            owner,
            ledger: Arc::clone(ledger),
            paths,
            denoiser_exe,
            denoiser: None,
            alpha: None,
            denoiser_result_cached: false,
        }
    }

    pub fn width(&self) -> usize {
        return self.params.width;
    }

    pub fn height(&self) -> usize {
        return self.params.height;
    }

    pub fn channel_count(&self) -> usize {
        return self.channel_count;
    }

    pub fn owner(&self) -> OwnerId {
        return self.owner;
    }

    pub fn params(&self) -> &ViewParams {
        return &self.params;
    }

    pub fn scratch_paths(&self) -> &DenoiserPaths {
        return &self.paths;
    }

    /// The draw boundary: always fully populated and channel-count
    /// consistent, `width * height * channel_count` floats.
    pub fn pixels(&self) -> &[Float] {
        return &self.pixels;
    }

    /// True iff any viewing parameter differs from the values this buffer
    /// was built for. Pure comparison; the host reacts by discarding this
    /// buffer and constructing a fresh one.
    pub fn needs_replacement(&self, current: &ViewParams) -> bool {
        if (self.params.width, self.params.height) != (current.width, current.height) {
            return true;
        }
        if self.params.transparent != current.transparent {
            return true;
        }
        if self.params.border != current.border {
            return true;
        }
        if (self.params.offset_x, self.params.offset_y) != (current.offset_x, current.offset_y) {
            return true;
        }
        if self.params.pixel_size != current.pixel_size {
            return true;
        }
        return false;
    }

    /// Copies the session's current image-pipeline output (RGB or RGBA,
    /// matching the transparency flag) straight into the pixel buffer.
    pub fn update(&mut self, session: &dyn RenderSession) -> Result<(), FilmViewError> {
        let output = if self.params.transparent {
            FilmOutput::RgbaImagePipeline
        } else {
            FilmOutput::RgbImagePipeline
        };
        return session.get_film_output(output, &mut self.pixels);
    }

    fn save_denoiser_aov(
        &self,
        session: &dyn RenderSession,
        output: FilmOutput,
        path: &Path,
    ) -> Result<(), FilmViewError> {
        debug_assert_eq!(output.num_channels(), 3);
        let mut data = vec![0.0; self.params.width * self.params.height * 3];
        session.get_film_output(output, &mut data)?;
        self.ledger.lock().unwrap().track(self.owner, path);
        return write_image_pfm(path, &data, self.params.width, self.params.height, 3);
    }

    /// Exports the noisy color, albedo and shading-normal AOVs and launches
    /// the external denoiser on them, without blocking.
    ///
    /// Fails with kind `ToolNotFound` (and no side effects) when the
    /// executable cannot be resolved. Starting a run while one is active is
    /// a caller error; check `is_denoiser_active` first.
    pub fn start_denoiser(&mut self, session: &dyn RenderSession) -> Result<(), FilmViewError> {
        debug_assert!(self.denoiser.is_none(), "denoise run already active");

        let exe = match &self.denoiser_exe {
            Some(exe) if exe.is_file() => exe.clone(),
            _ => {
                return Err(FilmViewError::tool_not_found(
                    "Denoiser binary not found. Download it from https://github.com/OpenImageDenoise/oidn/releases",
                ));
            }
        };

        // The denoiser works on color channels only; hold the current alpha
        // aside and composite it back in when the result is loaded.
        if self.params.transparent {
            let mut alpha = vec![0.0; self.params.width * self.params.height];
            session.get_film_output(FilmOutput::Alpha, &mut alpha)?;
            self.alpha = Some(alpha);
        }

        self.save_denoiser_aov(session, FilmOutput::RgbImagePipeline, &self.paths.noisy)?;
        self.save_denoiser_aov(session, FilmOutput::Albedo, &self.paths.albedo)?;
        self.save_denoiser_aov(session, FilmOutput::ShadingNormal, &self.paths.normal)?;
        self.ledger.lock().unwrap().track(self.owner, &self.paths.denoised);

        let process = DenoiserProcess::spawn(
            &exe,
            &self.paths.noisy,
            &self.paths.albedo,
            &self.paths.normal,
            &self.paths.denoised,
        )?;
        self.denoiser = Some(process);
        return Ok(());
    }

    pub fn is_denoiser_active(&self) -> bool {
        return self.denoiser.is_some();
    }

    /// Non-blocking poll of the running denoiser. Only meaningful while
    /// `is_denoiser_active` is true.
    pub fn is_denoiser_done(&mut self) -> bool {
        debug_assert!(self.denoiser.is_some(), "no denoise run is active");
        match &mut self.denoiser {
            Some(process) => {
                return process.poll_done();
            }
            None => {
                return true;
            }
        }
    }

    /// Ingests the denoiser's output file into the pixel buffer.
    ///
    /// The active-run handle is cleared first. An absent output file means
    /// the denoiser died without producing anything: scratch files are
    /// cleaned up and the call fails with kind `DenoiseFailed`, leaving the
    /// pixels untouched. On success the result is repaired to exactly
    /// `width * height * channel_count` values (grayscale replicated to
    /// RGB, the held-aside alpha appended when transparent, excess
    /// truncated, missing values zero-padded) and the scratch files are
    /// deleted.
    pub fn load_denoiser_result(&mut self) -> Result<(), FilmViewError> {
        self.denoiser = None;

        let image = match read_image_pfm(&self.paths.denoised) {
            Ok(image) => {
                self.ledger.lock().unwrap().delete_files(self.owner);
                image
            }
            Err(e) if e.kind == FilmViewErrorKind::NotFound => {
                self.ledger.lock().unwrap().delete_files(self.owner);
                return Err(FilmViewError::denoise_failed(
                    "Denoising failed, check the log for details",
                ));
            }
            Err(e) => {
                return Err(e);
            }
        };

        let n_pixels = self.params.width * self.params.height;

        let mut data = image.data;
        if image.channels == 1 {
            // Grayscale output; replicate to RGB.
            let mut rgb = vec![0.0; data.len() * 3];
            for i in 0..data.len() {
                rgb[3 * i + 0] = data[i];
                rgb[3 * i + 1] = data[i];
                rgb[3 * i + 2] = data[i];
            }
            data = rgb;
        }

        if data.len() != n_pixels * 3 {
            warn!(
                "Denoiser output has {} values, expected {}; resizing to fit",
                data.len(),
                n_pixels * 3
            );
            data.resize(n_pixels * 3, 0.0);
        }

        if self.channel_count == 4 {
            let mut alpha = self.alpha.take().unwrap_or_default();
            alpha.resize(n_pixels, 1.0);
            let mut rgba = vec![0.0; n_pixels * 4];
            for i in 0..n_pixels {
                rgba[4 * i + 0] = data[3 * i + 0];
                rgba[4 * i + 1] = data[3 * i + 1];
                rgba[4 * i + 2] = data[3 * i + 2];
                rgba[4 * i + 3] = alpha[i];
            }
            data = rgba;
        }

        debug_assert_eq!(data.len(), n_pixels * self.channel_count);
        self.pixels = data;
        self.denoiser_result_cached = true;
        return Ok(());
    }

    /// Cancels any in-flight denoise run and invalidates a cached result.
    ///
    /// Terminating the external process is the one blocking point in this
    /// subsystem: the wait is bounded by OS process-kill latency and
    /// guarantees no zombie is leaked. Scratch files tracked for this
    /// buffer are deleted so a cancelled run leaves nothing behind. Safe to
    /// call when no run is active.
    pub fn reset_denoiser(&mut self) {
        self.denoiser_result_cached = false;
        self.alpha = None;

        if let Some(process) = self.denoiser.take() {
            info!("Interrupting denoiser");
            process.terminate();
        }
        self.ledger.lock().unwrap().delete_files(self.owner);
    }
}

impl Drop for FrameBuffer {
    fn drop(&mut self) {
        // Release on every exit path, early replacement included: no
        // denoiser process or scratch file may outlive its buffer.
        self.reset_denoiser();
    }
}
