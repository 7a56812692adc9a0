//! LUT application command

use crate::config::CliConfig;
use crate::{ApplyArgs, ModeArg};
use anyhow::{Context, Result};
use lutcam_lut::ParseMode;
use lutcam_ops::{apply_lut_file, FilterOptions, OutputMode, Quantize};
use tracing::info;

pub fn run(args: ApplyArgs, config: &CliConfig) -> Result<()> {
    let opts = options(&args, config.filter);
    let mut frame = super::read_frame(&args.input, args.width, args.height)?;

    info!(
        lut = %args.lut.display(),
        input = %args.input.display(),
        "Applying LUT"
    );
    let stats = apply_lut_file(&mut frame, args.width, args.height, &args.lut, &opts)
        .with_context(|| format!("Failed to apply LUT: {}", args.lut.display()))?;

    super::write_frame(&args.output, &frame)?;

    println!(
        "{}: {} pixels processed, {} skipped in {:.1} ms",
        args.output.display(),
        stats.processed,
        stats.skipped,
        stats.elapsed.as_secs_f64() * 1000.0
    );
    Ok(())
}

/// Config file values with command-line flags on top.
fn options(args: &ApplyArgs, base: FilterOptions) -> FilterOptions {
    let mut opts = base;
    if let Some(mode) = args.mode {
        opts.mode = match mode {
            ModeArg::Monochrome => OutputMode::Monochrome,
            ModeArg::Color => OutputMode::Color,
        };
    }
    if args.round {
        opts.quantize = Quantize::Round;
    }
    if args.parallel {
        opts.parallel = true;
    }
    if args.strict {
        opts.parse = ParseMode::Strict;
    }
    opts
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::path::PathBuf;

    fn args() -> ApplyArgs {
        ApplyArgs {
            input: PathBuf::from("in.rgb"),
            width: 1,
            height: 1,
            lut: PathBuf::from("l.cube"),
            output: PathBuf::from("out.rgb"),
            mode: None,
            round: false,
            parallel: false,
            strict: false,
        }
    }

    #[test]
    fn test_flags_override_config() {
        let base = FilterOptions::default().with_quantize(Quantize::Round);
        let mut a = args();
        a.mode = Some(ModeArg::Color);
        a.strict = true;

        let opts = options(&a, base);
        assert_eq!(opts.mode, OutputMode::Color);
        assert_eq!(opts.quantize, Quantize::Round);
        assert_eq!(opts.parse, ParseMode::Strict);
        assert!(!opts.parallel);
    }

    #[test]
    fn test_config_kept_without_flags() {
        let base = FilterOptions::default().with_mode(OutputMode::Color).parallel(true);
        assert_eq!(options(&args(), base), base);
    }
}
