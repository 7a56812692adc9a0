//! LUT info command.
//!
//! Loads a `.cube` file the same way `apply` does and reports what the
//! loader made of it, including every line it tolerated.

use crate::config::CliConfig;
use crate::InfoArgs;
use anyhow::{bail, Context, Result};
use lutcam_lut::{cube, LoadReport, LutError, ParseMode};

pub fn run(args: InfoArgs, config: &CliConfig, verbose: u8) -> Result<()> {
    let mode = if args.strict {
        ParseMode::Strict
    } else {
        config.filter.parse
    };

    let report = match cube::load_with(&args.lut, mode) {
        Ok(report) => report,
        Err(LutError::Malformed { issues }) => {
            println!("{}", args.lut.display());
            for issue in &issues {
                println!("  {}", issue);
            }
            bail!("{} malformed line(s) in {}", issues.len(), args.lut.display());
        }
        Err(e) => {
            return Err(e).with_context(|| format!("Failed to load: {}", args.lut.display()));
        }
    };

    print_text(&args, &report, verbose);
    Ok(())
}

fn print_text(args: &InfoArgs, report: &LoadReport, verbose: u8) {
    let lut = &report.lut;
    println!("{}", args.lut.display());
    println!("  Size:       {}", lut.size());
    if let Some(declared) = report.declared_size {
        if report.was_clamped() {
            println!("  Declared:   {} (clamped)", declared);
        }
    }
    println!("  Entries:    {}", lut.entry_count());
    println!("  Read:       {}", report.samples_read);
    if report.is_partial() {
        println!("  Partial:    yes, missing samples are black");
    }

    if let (Some(first), Some(middle), Some(last)) = (lut.first(), lut.middle(), lut.last()) {
        println!("  First:      {}", first);
        println!("  Middle:     {}", middle);
        println!("  Last:       {}", last);
    }

    if !report.issues.is_empty() {
        println!("  Issues:     {}", report.issues.len());
        if verbose > 0 {
            for issue in &report.issues {
                println!("    {}", issue);
            }
        }
    }
}
