use crate::core::tempfiles::OwnerId;

use std::env;
use std::path::{Path, PathBuf};

/// Scratch file locations for one buffer's denoise runs, one file per role,
/// named by the owning buffer's identity so concurrently live buffers never
/// collide.
#[derive(Debug, Clone)]
pub struct DenoiserPaths {
    pub noisy: PathBuf,
    pub albedo: PathBuf,
    pub normal: PathBuf,
    pub denoised: PathBuf,
}

impl DenoiserPaths {
    pub fn new(scratch_dir: &Path, owner: OwnerId) -> Self {
        let make = |name: &str| scratch_dir.join(format!("{}_{}.pfm", owner, name));
        DenoiserPaths {
            noisy: make("noisy"),
            albedo: make("albedo"),
            normal: make("normal"),
            denoised: make("denoised"),
        }
    }
}

/// Resolves the denoiser executable the way a shell would: an explicit path
/// is checked directly, a bare name is searched in `search_dirs` and then in
/// the environment `PATH`.
pub fn find_denoiser(executable: &str, search_dirs: &[PathBuf]) -> Option<PathBuf> {
    let direct = Path::new(executable);
    if direct.components().count() > 1 {
        if direct.is_file() {
            return Some(PathBuf::from(direct));
        }
        return None;
    }

    let mut dirs: Vec<PathBuf> = search_dirs.to_vec();
    if let Some(path_var) = env::var_os("PATH") {
        dirs.extend(env::split_paths(&path_var));
    }
    for dir in dirs {
        let candidate = dir.join(executable);
        if candidate.is_file() {
            return Some(candidate);
        }
        #[cfg(windows)]
        {
            let candidate = dir.join(format!("{}.exe", executable));
            if candidate.is_file() {
                return Some(candidate);
            }
        }
    }
    return None;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_001() {
        assert!(find_denoiser("no_such_denoiser_binary_42", &[]).is_none());
    }
}
