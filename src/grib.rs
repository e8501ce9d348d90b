use std::io::{Cursor, Read};

use anyhow::{bail, Context, Result};
use flate2::read::GzDecoder;

use crate::types::FeatureCollection;

pub fn decode_reflectivity_gzipped(zipped: &[u8]) -> Result<FeatureCollection> {
    let mut decoder = GzDecoder::new(Cursor::new(zipped));
    let mut grib = Vec::new();
    decoder
        .read_to_end(&mut grib)
        .context("Failed to gunzip GRIB payload")?;
    decode_reflectivity(&grib)
}

fn decode_reflectivity(buffer: &[u8]) -> Result<FeatureCollection> {
    if buffer.len() < 16 {
        bail!("MRMS GRIB payload is too small");
    }
    if &buffer[0..4] != b"GRIB" {
        bail!("MRMS payload does not start with GRIB bytes");
    }

    // TODO: unpack the section 3 grid and section 7 PNG field into point features.
    bail!(
        "GRIB2 reflectivity decoding is not implemented ({} bytes received)",
        buffer.len()
    )
}
