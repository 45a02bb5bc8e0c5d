use std::fmt;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FilmViewErrorKind {
    /// Scratch file could not be written or read.
    Io,
    /// The file does not exist. Distinct from `Malformed` because an absent
    /// denoiser output is the expected signal of a crashed denoiser run.
    NotFound,
    /// The file exists but could not be parsed.
    Malformed,
    /// The external denoiser executable could not be resolved.
    ToolNotFound,
    /// The denoiser ran but produced no usable output.
    DenoiseFailed,
}

#[derive(Debug, Clone)]
pub struct FilmViewError {
    pub kind: FilmViewErrorKind,
    pub message: String,
}

impl FilmViewError {
    pub fn new(kind: FilmViewErrorKind, message: &str) -> Self {
        FilmViewError {
            kind,
            message: String::from(message),
        }
    }

    pub fn io(message: &str) -> Self {
        return Self::new(FilmViewErrorKind::Io, message);
    }

    pub fn not_found(message: &str) -> Self {
        return Self::new(FilmViewErrorKind::NotFound, message);
    }

    pub fn malformed(message: &str) -> Self {
        return Self::new(FilmViewErrorKind::Malformed, message);
    }

    pub fn tool_not_found(message: &str) -> Self {
        return Self::new(FilmViewErrorKind::ToolNotFound, message);
    }

    pub fn denoise_failed(message: &str) -> Self {
        return Self::new(FilmViewErrorKind::DenoiseFailed, message);
    }
}

impl fmt::Display for FilmViewError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.message)
    }
}

impl std::error::Error for FilmViewError {}

impl From<std::io::Error> for FilmViewError {
    fn from(value: std::io::Error) -> Self {
        let msg = value.to_string();
        if value.kind() == std::io::ErrorKind::NotFound {
            return FilmViewError::not_found(&msg);
        }
        return FilmViewError::io(&msg);
    }
}
