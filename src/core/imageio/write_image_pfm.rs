use crate::core::error::*;
use crate::core::filmview::types::Float;

use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::Path;

/// Writes a binary PFM file.
///
/// `data` is row-major, top-down, interleaved, `width * height * channels`
/// floats with `channels` 3 or 1. Rows are stored bottom-to-top and
/// little-endian (header scale -1.0), so `read_image_pfm` round-trips the
/// array exactly.
pub fn write_image_pfm(
    path: &Path,
    data: &[Float],
    width: usize,
    height: usize,
    channels: usize,
) -> Result<(), FilmViewError> {
    debug_assert!(channels == 1 || channels == 3);
    debug_assert_eq!(data.len(), width * height * channels);

    let file = File::create(path).map_err(|e| {
        FilmViewError::io(&format!(
            "Unable to write PFM file \"{}\": {}",
            path.display(),
            e
        ))
    })?;
    let mut writer = BufWriter::new(file);

    let cc = if channels == 1 { "Pf" } else { "PF" };
    write!(writer, "{}\n{} {}\n-1.0\n", cc, width, height)?;

    // Flip in Y, as P*M has the origin at the lower left.
    for y in 0..height {
        let yy = height - y - 1;
        for x in 0..width {
            let index = yy * width + x;
            for c in 0..channels {
                let f = data[channels * index + c];
                writer.write_all(&f.to_le_bytes())?;
            }
        }
    }
    writer.flush()?;
    return Ok(());
}
