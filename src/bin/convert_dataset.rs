//! Convert an element table (csv / json / parquet) into a flat Parquet file.
//!
//! Usage: `convert-dataset <input> <output.parquet>`

use std::fs::File;
use std::path::PathBuf;

use anyhow::{bail, Context};
use element_explorer::data::loader::load_file;
use element_explorer::data::writer::write_parquet;

fn main() -> anyhow::Result<()> {
    env_logger::init();

    let mut args = std::env::args_os().skip(1);
    let (Some(input), Some(output), None) = (args.next(), args.next(), args.next()) else {
        bail!("usage: convert-dataset <input> <output.parquet>");
    };
    let (input, output) = (PathBuf::from(input), PathBuf::from(output));

    let dataset =
        load_file(&input).with_context(|| format!("loading {}", input.display()))?;
    let file = File::create(&output).with_context(|| format!("creating {}", output.display()))?;
    write_parquet(&dataset, file).with_context(|| format!("writing {}", output.display()))?;

    log::info!("Converted {} -> {}", input.display(), output.display());
    println!("Wrote {} elements to {}", dataset.len(), output.display());
    Ok(())
}
