use filmview::core::buffer::*;
use filmview::core::denoise::DenoiserConfig;
use filmview::core::error::FilmViewError;
use filmview::core::session::*;
use filmview::core::tempfiles::TempfileLedger;

use std::path::PathBuf;
use std::sync::{Arc, Mutex};

struct MockSession {
    width: usize,
    height: usize,
}

fn output_base(output: FilmOutput) -> f32 {
    match output {
        FilmOutput::RgbImagePipeline => 0.125,
        FilmOutput::RgbaImagePipeline => 0.25,
        FilmOutput::Albedo => 0.375,
        FilmOutput::ShadingNormal => 0.5,
        FilmOutput::Alpha => 0.625,
    }
}

impl RenderSession for MockSession {
    fn get_film_output(
        &self,
        output: FilmOutput,
        buffer: &mut [f32],
    ) -> Result<(), FilmViewError> {
        assert_eq!(
            buffer.len(),
            self.width * self.height * output.num_channels()
        );
        let base = output_base(output);
        for (i, v) in buffer.iter_mut().enumerate() {
            *v = base + (i % 16) as f32 / 64.0;
        }
        return Ok(());
    }
}

fn expected_output(output: FilmOutput, n: usize) -> Vec<f32> {
    let base = output_base(output);
    return (0..n).map(|i| base + (i % 16) as f32 / 64.0).collect();
}

fn test_config(scratch_dir: PathBuf) -> DenoiserConfig {
    DenoiserConfig {
        executable: String::from("filmview_test_no_such_denoiser"),
        search_dirs: Vec::new(),
        scratch_dir,
    }
}

#[test]
fn fresh_buffer_pixel_length_matches_view() {
    let dir = tempfile::tempdir().unwrap();
    let ledger = Arc::new(Mutex::new(TempfileLedger::new()));

    for (width, height, transparent) in [(1, 1, false), (7, 3, true), (64, 32, false)] {
        let mut params = ViewParams::new(width, height);
        params.transparent = transparent;
        let buffer = FrameBuffer::new(&params, &test_config(dir.path().into()), &ledger);

        let channels = if transparent { 4 } else { 3 };
        assert_eq!(buffer.channel_count(), channels);
        assert_eq!(buffer.pixels().len(), width * height * channels);
    }
}

#[test]
fn needs_replacement_false_for_identical_params() {
    let dir = tempfile::tempdir().unwrap();
    let ledger = Arc::new(Mutex::new(TempfileLedger::new()));

    let params = ViewParams::new(32, 24);
    let buffer = FrameBuffer::new(&params, &test_config(dir.path().into()), &ledger);
    assert!(!buffer.needs_replacement(&params));
}

#[test]
fn needs_replacement_detects_each_field() {
    let dir = tempfile::tempdir().unwrap();
    let ledger = Arc::new(Mutex::new(TempfileLedger::new()));

    let params = ViewParams::new(32, 24);
    let buffer = FrameBuffer::new(&params, &test_config(dir.path().into()), &ledger);

    let mut resized = params.clone();
    resized.width = 33;
    assert!(buffer.needs_replacement(&resized));

    let mut transparent = params.clone();
    transparent.transparent = true;
    assert!(buffer.needs_replacement(&transparent));

    let mut bordered = params.clone();
    bordered.border = Border {
        min_x: 0.1,
        max_x: 0.9,
        min_y: 0.0,
        max_y: 1.0,
    };
    assert!(buffer.needs_replacement(&bordered));

    let mut offset = params.clone();
    offset.offset_y = 5;
    assert!(buffer.needs_replacement(&offset));

    let mut scaled = params.clone();
    scaled.pixel_size = 2;
    assert!(buffer.needs_replacement(&scaled));
}

#[test]
fn update_copies_image_pipeline_output() {
    let dir = tempfile::tempdir().unwrap();
    let ledger = Arc::new(Mutex::new(TempfileLedger::new()));
    let session = MockSession {
        width: 8,
        height: 4,
    };

    let params = ViewParams::new(8, 4);
    let mut buffer = FrameBuffer::new(&params, &test_config(dir.path().into()), &ledger);
    buffer.update(&session).unwrap();
    assert_eq!(
        buffer.pixels(),
        expected_output(FilmOutput::RgbImagePipeline, 8 * 4 * 3)
    );

    let mut params = ViewParams::new(8, 4);
    params.transparent = true;
    let mut buffer = FrameBuffer::new(&params, &test_config(dir.path().into()), &ledger);
    buffer.update(&session).unwrap();
    assert_eq!(
        buffer.pixels(),
        expected_output(FilmOutput::RgbaImagePipeline, 8 * 4 * 4)
    );
}

#[test]
fn buffers_get_distinct_scratch_paths() {
    let dir = tempfile::tempdir().unwrap();
    let ledger = Arc::new(Mutex::new(TempfileLedger::new()));

    let params = ViewParams::new(4, 4);
    let a = FrameBuffer::new(&params, &test_config(dir.path().into()), &ledger);
    let b = FrameBuffer::new(&params, &test_config(dir.path().into()), &ledger);

    assert_ne!(a.owner(), b.owner());
    assert_ne!(a.scratch_paths().noisy, b.scratch_paths().noisy);
    assert_ne!(a.scratch_paths().denoised, b.scratch_paths().denoised);
}
