//! Pixel probe command

use crate::ProbeArgs;
use anyhow::{Context, Result};
use lutcam_core::RgbFrame;

pub fn run(args: ProbeArgs) -> Result<()> {
    let mut bytes = super::read_frame(&args.input, args.width, args.height)?;
    let frame = RgbFrame::new(&mut bytes, args.width, args.height);

    let (x, y, rgb) = match (args.x, args.y) {
        (Some(x), Some(y)) => (x, y, frame.pixel(x, y)?),
        _ => frame.center_pixel().context("Frame has no center pixel")?,
    };

    println!("Pixel ({}, {}): R={}, G={}, B={}", x, y, rgb[0], rgb[1], rgb[2]);
    Ok(())
}
