use crate::core::error::*;

use log::*;
use std::path::Path;
use std::process::{Child, Command};

/// Handle to a running external denoiser process.
///
/// Completion is detected only by polling `poll_done`; there is no exit
/// callback. The process runs fully detached from the caller's frame loop,
/// with stdout/stderr inherited so its diagnostics reach the host console.
pub struct DenoiserProcess {
    child: Child,
}

impl DenoiserProcess {
    /// Spawns `<executable> -hdr <noisy> -alb <albedo> -nrm <normal> -o <output>`
    /// without waiting for it.
    pub fn spawn(
        executable: &Path,
        noisy: &Path,
        albedo: &Path,
        normal: &Path,
        output: &Path,
    ) -> Result<Self, FilmViewError> {
        let child = Command::new(executable)
            .arg("-hdr")
            .arg(noisy)
            .arg("-alb")
            .arg(albedo)
            .arg("-nrm")
            .arg(normal)
            .arg("-o")
            .arg(output)
            .spawn()
            .map_err(|e| {
                FilmViewError::io(&format!(
                    "Unable to launch denoiser \"{}\": {}",
                    executable.display(),
                    e
                ))
            })?;
        info!(
            "Launched denoiser \"{}\" (pid {})",
            executable.display(),
            child.id()
        );
        return Ok(DenoiserProcess { child });
    }

    /// Non-blocking poll; true once the process has exited.
    pub fn poll_done(&mut self) -> bool {
        match self.child.try_wait() {
            Ok(Some(status)) => {
                if !status.success() {
                    warn!("Denoiser exited with status {}", status);
                }
                return true;
            }
            Ok(None) => {
                return false;
            }
            Err(e) => {
                warn!("Error polling denoiser process: {}", e);
                return true;
            }
        }
    }

    /// Kills the process and reaps it. Blocks until the OS confirms the
    /// exit so no zombie is left behind.
    pub fn terminate(mut self) {
        if let Err(e) = self.child.kill() {
            debug!("Denoiser kill: {}", e);
        }
        match self.child.wait() {
            Ok(status) => {
                debug!("Denoiser exited with status {}", status);
            }
            Err(e) => {
                warn!("Error waiting for denoiser to exit: {}", e);
            }
        }
    }
}
