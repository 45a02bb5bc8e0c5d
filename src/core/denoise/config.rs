use std::env;
use std::path::PathBuf;

/// Where to find the external denoiser and where to put its scratch files.
#[derive(Debug, Clone)]
pub struct DenoiserConfig {
    /// Executable name, or a path to it.
    pub executable: String,
    /// Directories searched before the environment `PATH`.
    pub search_dirs: Vec<PathBuf>,
    /// Directory for intermediate AOV files and the denoised output.
    pub scratch_dir: PathBuf,
}

impl Default for DenoiserConfig {
    fn default() -> Self {
        DenoiserConfig {
            executable: String::from("oidnDenoise"),
            search_dirs: Vec::new(),
            scratch_dir: env::temp_dir(),
        }
    }
}
