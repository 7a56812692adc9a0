//! Identity LUT generator

use crate::IdentityArgs;
use anyhow::{bail, Context, Result};
use lutcam_lut::{cube, Lut3D, MAX_LUT_SIZE};

pub fn run(args: IdentityArgs) -> Result<()> {
    if args.size == 0 || args.size > MAX_LUT_SIZE {
        bail!("LUT size must be between 1 and {}, got {}", MAX_LUT_SIZE, args.size);
    }

    let lut = Lut3D::identity(args.size);
    cube::write(&args.output, &lut)
        .with_context(|| format!("Failed to save: {}", args.output.display()))?;

    println!("{}: {}^3 identity", args.output.display(), args.size);
    Ok(())
}
