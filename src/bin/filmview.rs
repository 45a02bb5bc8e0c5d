use clap::*;

use filmview::core::buffer::*;
use filmview::core::denoise::*;
use filmview::core::error::*;
use filmview::core::filmview::types::Float;
use filmview::core::imageio::*;
use filmview::core::misc::ProgressReporter;
use filmview::core::session::*;
use filmview::core::tempfiles::*;

use std::env;
use std::path::{Path, PathBuf};
use std::process;
use std::sync::{Arc, Mutex};
use std::thread;
use std::time::Duration;

use log::*;

/// Denoise a rendered HDR image with an external OIDN-style denoiser,
/// driving the same preview pipeline a viewport host would.
#[derive(Debug, Parser)]
#[clap(author, about, version)]
struct CommandOptions {
    /// Input noisy HDR image (.pfm).
    #[arg(value_name = "noisy.pfm")]
    pub infile: PathBuf,

    /// Albedo AOV (.pfm). A constant mid-gray albedo is used when omitted.
    #[arg(long, value_name = "filename")]
    pub albedo: Option<PathBuf>,

    /// Shading-normal AOV (.pfm). A constant +Z normal is used when omitted.
    #[arg(long, value_name = "filename")]
    pub normal: Option<PathBuf>,

    /// Write the denoised image to the given filename (.pfm keeps floats,
    /// other extensions are tonemapped byte images).
    #[arg(short, long, value_name = "filename", default_value = "denoised.pfm")]
    pub outfile: PathBuf,

    /// Denoiser executable name or path.
    #[arg(long, value_name = "executable", default_value = "oidnDenoise")]
    pub denoiser: String,

    /// Extra directory to search for the denoiser executable, before PATH.
    #[arg(long, value_name = "dir")]
    pub searchdir: Vec<PathBuf>,

    /// Poll interval while waiting for the denoiser, in milliseconds.
    #[arg(long, value_name = "ms", default_value = "100")]
    pub poll_interval: u64,

    /// Suppress all text output other than error messages.
    #[arg(long, default_value = "false")]
    pub quiet: bool,
}

fn init_logger() {
    //default log level : warn
    let log_level = env::var("RUST_LOG").unwrap_or_else(|_| "warn".to_owned());
    env::set_var("RUST_LOG", log_level);

    env_logger::Builder::from_default_env()
        .format_target(false)
        .format_module_path(false)
        .init();
}

/// Render session backed by AOV files instead of a live renderer.
struct FileSession {
    width: usize,
    height: usize,
    noisy: Vec<Float>,
    albedo: Option<Vec<Float>>,
    normal: Option<Vec<Float>>,
}

impl FileSession {
    fn load(opts: &CommandOptions) -> Result<Self, FilmViewError> {
        let noisy = load_rgb_aov(&opts.infile, None)?;
        let resolution = (noisy.width, noisy.height);

        let albedo = match opts.albedo.as_ref() {
            Some(path) => Some(load_rgb_aov(path, Some(resolution))?.data),
            None => None,
        };
        let normal = match opts.normal.as_ref() {
            Some(path) => Some(load_rgb_aov(path, Some(resolution))?.data),
            None => None,
        };

        Ok(FileSession {
            width: noisy.width,
            height: noisy.height,
            noisy: noisy.data,
            albedo,
            normal,
        })
    }
}

fn load_rgb_aov(
    path: &Path,
    expected_resolution: Option<(usize, usize)>,
) -> Result<PfmImage, FilmViewError> {
    let image = read_image_pfm(path)?;
    if image.channels != 3 {
        let msg = format!(
            "Expected an RGB image in \"{}\", got {} channel(s)",
            path.display(),
            image.channels
        );
        return Err(FilmViewError::malformed(&msg));
    }
    if let Some((width, height)) = expected_resolution {
        if (image.width, image.height) != (width, height) {
            let msg = format!(
                "AOV \"{}\" is {}x{}, expected {}x{}",
                path.display(),
                image.width,
                image.height,
                width,
                height
            );
            return Err(FilmViewError::malformed(&msg));
        }
    }
    return Ok(image);
}

impl RenderSession for FileSession {
    fn get_film_output(
        &self,
        output: FilmOutput,
        buffer: &mut [Float],
    ) -> Result<(), FilmViewError> {
        match output {
            FilmOutput::RgbImagePipeline => {
                buffer.copy_from_slice(&self.noisy);
            }
            FilmOutput::Albedo => match self.albedo.as_ref() {
                Some(albedo) => buffer.copy_from_slice(albedo),
                None => buffer.fill(0.5),
            },
            FilmOutput::ShadingNormal => match self.normal.as_ref() {
                Some(normal) => buffer.copy_from_slice(normal),
                None => {
                    for i in 0..self.width * self.height {
                        buffer[3 * i + 0] = 0.0;
                        buffer[3 * i + 1] = 0.0;
                        buffer[3 * i + 2] = 1.0;
                    }
                }
            },
            FilmOutput::RgbaImagePipeline | FilmOutput::Alpha => {
                return Err(FilmViewError::io("Film output not available from files"));
            }
        }
        return Ok(());
    }
}

fn run(opts: &CommandOptions) -> i32 {
    let session = match FileSession::load(opts) {
        Ok(session) => session,
        Err(e) => {
            error!("{}", e);
            return -1;
        }
    };

    if !opts.quiet {
        let version = env!("CARGO_PKG_VERSION");
        println!(
            "filmview version {} [{}x{} input]",
            version, session.width, session.height
        );
    }

    let ledger = Arc::new(Mutex::new(TempfileLedger::new()));
    let params = ViewParams::new(session.width, session.height);
    let config = DenoiserConfig {
        executable: opts.denoiser.clone(),
        search_dirs: opts.searchdir.clone(),
        scratch_dir: env::temp_dir(),
    };
    let mut buffer = FrameBuffer::new(&params, &config, &ledger);

    if let Err(e) = buffer.update(&session) {
        error!("{}", e);
        return -1;
    }
    if let Err(e) = buffer.start_denoiser(&session) {
        error!("{}", e);
        return -1;
    }

    let mut reporter = if opts.quiet {
        None
    } else {
        Some(ProgressReporter::new("Denoising"))
    };
    while !buffer.is_denoiser_done() {
        if let Some(reporter) = reporter.as_mut() {
            reporter.update();
        }
        thread::sleep(Duration::from_millis(opts.poll_interval));
    }
    if let Some(reporter) = reporter.as_mut() {
        reporter.done();
    }

    if let Err(e) = buffer.load_denoiser_result() {
        error!("{}", e);
        return -1;
    }

    let outfile = opts.outfile.to_string_lossy();
    if let Err(e) = write_image(&outfile, buffer.pixels(), buffer.width(), buffer.height()) {
        error!("{}", e);
        return -1;
    }
    if !opts.quiet {
        println!("Wrote {}", outfile);
    }

    ledger.lock().unwrap().clear_all();
    return 0;
}

pub fn main() {
    let opts = CommandOptions::parse();
    init_logger();
    process::exit(run(&opts));
}
