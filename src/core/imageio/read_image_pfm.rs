use crate::core::error::*;
use crate::core::filmview::types::Float;

use nom::character::complete::{alphanumeric1, multispace0};
use nom::error::*;
use nom::number::complete::*;
use nom::sequence;
use nom::IResult;
use std::fs::File;
use std::io::{BufReader, Read};
use std::path::Path;

use log::info;

/// Raw contents of a PFM file.
///
/// `data` is row-major, top-down, interleaved, with the header scale
/// already applied. `channels` is 3 ("PF") or 1 ("Pf").
#[derive(Debug, Clone)]
pub struct PfmImage {
    pub data: Vec<Float>,
    pub width: usize,
    pub height: usize,
    pub channels: usize,
    pub scale: Float,
}

fn read_word(s: &[u8]) -> IResult<&[u8], &[u8]> {
    let (s, word) = sequence::delimited(multispace0, alphanumeric1, multispace0)(s)?;
    return Ok((s, word));
}

fn read_value(s: &[u8]) -> IResult<&[u8], &[u8]> {
    let (s, word) = sequence::delimited(multispace0, recognize_float, multispace0)(s)?;
    return Ok((s, word));
}

fn parse_value<T: std::str::FromStr>(word: &[u8]) -> Option<T> {
    return std::str::from_utf8(word).ok()?.parse::<T>().ok();
}

fn read_image_pfm_core(input: &[u8]) -> IResult<&[u8], PfmImage> {
    // read either "Pf" or "PF"
    let (input, cc) = read_word(input)?;
    let cc = match std::str::from_utf8(cc) {
        Ok(cc) => cc,
        Err(_) => return Err(nom::Err::Error(Error::new(input, ErrorKind::Fail))),
    };

    let n_channels;
    if cc == "Pf" {
        n_channels = 1;
    } else if cc == "PF" {
        n_channels = 3;
    } else {
        return Err(nom::Err::Error(Error::new(input, ErrorKind::Fail)));
    }

    // read the rest of the header
    let (input, width) = read_value(input)?;
    let width = match parse_value::<usize>(width) {
        Some(v) => v,
        None => return Err(nom::Err::Error(Error::new(input, ErrorKind::Fail))),
    };

    let (input, height) = read_value(input)?;
    let height = match parse_value::<usize>(height) {
        Some(v) => v,
        None => return Err(nom::Err::Error(Error::new(input, ErrorKind::Fail))),
    };

    let (input, scale) = read_value(input)?;
    let scale = match parse_value::<f32>(scale) {
        Some(v) => v,
        None => return Err(nom::Err::Error(Error::new(input, ErrorKind::Fail))),
    };

    // a negative scale marks little-endian data
    let file_little_endian = scale < 0.0;

    let n_floats = n_channels * width * height;
    let mut data = vec![0.0; n_floats];
    {
        let mut input = input;
        // Flip in Y, as P*M has the origin at the lower left.
        for y in 0..height {
            let yy = height - y - 1;
            for x in 0..width {
                let index = yy * width + x;
                for c in 0..n_channels {
                    let (inp, f) = if file_little_endian {
                        le_f32(input)?
                    } else {
                        be_f32(input)?
                    };
                    data[n_channels * index + c] = f;
                    input = inp;
                }
            }
        }
    }

    let scale = scale.abs();
    if scale != 1.0 {
        for f in &mut data {
            *f *= scale;
        }
    }

    let image = PfmImage {
        data,
        width,
        height,
        channels: n_channels,
        scale,
    };
    return Ok((input, image));
}

/// Reads a binary PFM file.
///
/// A missing file is reported with kind `NotFound`, distinct from
/// `Malformed` for a file that exists but cannot be parsed; callers rely
/// on the difference to tell a crashed producer from a corrupt output.
pub fn read_image_pfm(path: &Path) -> Result<PfmImage, FilmViewError> {
    let mut reader = BufReader::new(File::open(path)?);
    let mut bytes = Vec::new();
    reader.read_to_end(&mut bytes)?;

    match read_image_pfm_core(&bytes) {
        Ok((_, image)) => {
            info!(
                "Read PFM image {} ({}x{}) resolution",
                path.display(),
                image.width,
                image.height
            );
            return Ok(image);
        }
        Err(_) => {
            let msg = format!("Error reading PFM file \"{}\"", path.display());
            return Err(FilmViewError::malformed(&msg));
        }
    }
}
