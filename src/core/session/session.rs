use crate::core::error::FilmViewError;
use crate::core::filmview::types::Float;

/// Output channels the render session must be able to produce.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FilmOutput {
    /// Final tonemapped color, RGB.
    RgbImagePipeline,
    /// Final tonemapped color with alpha, RGBA.
    RgbaImagePipeline,
    Albedo,
    ShadingNormal,
    Alpha,
}

impl FilmOutput {
    pub fn num_channels(&self) -> usize {
        match self {
            FilmOutput::RgbImagePipeline => 3,
            FilmOutput::RgbaImagePipeline => 4,
            FilmOutput::Albedo => 3,
            FilmOutput::ShadingNormal => 3,
            FilmOutput::Alpha => 1,
        }
    }
}

/// Interface to the progressive rendering session that feeds the preview.
///
/// `get_film_output` writes the named channel into the caller-provided
/// buffer, which must hold exactly `width * height * num_channels` floats
/// for the session's current film size.
pub trait RenderSession {
    fn get_film_output(
        &self,
        output: FilmOutput,
        buffer: &mut [Float],
    ) -> Result<(), FilmViewError>;
}
