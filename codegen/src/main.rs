mod cubemx;

use anyhow::{Context, Result};
use cubemx::AfDatabase;
use hwdef_pins::{generate, AltFunctionLookup, Config, HwDef, NoAltFunctions, RequestListing};
use std::path::{Path, PathBuf};
use structopt::StructOpt;
use tracing::Level;

#[derive(StructOpt)]
#[structopt(about = "Generate ChibiOS pin setup headers from a hardware definition")]
struct Opt {
    #[structopt(
        short = "D",
        long,
        parse(from_os_str),
        help = "Output directory, defaults to the directory of the hardware definition"
    )]
    outdir: Option<PathBuf>,
    #[structopt(
        long,
        parse(from_os_str),
        help = "Path of the STM32CubeMX MCU database (the directory holding families.xml)"
    )]
    cubemx_db: Option<PathBuf>,
    #[structopt(short, long, help = "Log resolved alternate functions")]
    verbose: bool,
    #[structopt(parse(from_os_str), help = "Hardware definition file")]
    hwdef: PathBuf,
}

fn main() -> Result<()> {
    let opt = Opt::from_args();

    tracing_subscriber::fmt()
        .with_max_level(if opt.verbose {
            Level::DEBUG
        } else {
            Level::INFO
        })
        .with_writer(std::io::stderr)
        .init();

    let outdir = opt
        .outdir
        .clone()
        .unwrap_or_else(|| default_outdir(&opt.hwdef));

    let lookup: Box<dyn AltFunctionLookup> = match &opt.cubemx_db {
        Some(db) => Box::new(AfDatabase::new(db.clone())),
        None => Box::new(NoAltFunctions),
    };
    let hwdef = HwDef::load(&opt.hwdef, &*lookup)
        .with_context(|| format!("cannot read hardware definition {:?}", opt.hwdef))?;

    generate(&hwdef, &Config::default().outdir(outdir), &RequestListing)?;

    Ok(())
}

fn default_outdir(hwdef: &Path) -> PathBuf {
    match hwdef.parent() {
        Some(dir) if !dir.as_os_str().is_empty() => dir.to_path_buf(),
        _ => PathBuf::from("."),
    }
}
