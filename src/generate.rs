//! Header generation pipeline

use std::fs::File;
use std::io::{BufWriter, Write};

use tracing::info;

use crate::config::Config;
use crate::dma::DmaResolver;
use crate::error::{Error, Result};
use crate::header::write_pins_header;
use crate::hwdef::HwDef;
use crate::peripheral::peripheral_list;

/// Writes the pin setup header and then lets `dma` write the DMA header.
///
/// Fails with [`Error::MissingMcu`] before touching the file system if the
/// definition has no usable `MCU` line.
pub fn generate<D: DmaResolver + ?Sized>(hwdef: &HwDef, config: &Config, dma: &D) -> Result<()> {
    let (_, mcu_type) = hwdef.mcu()?;
    info!("Setup for MCU {}", mcu_type);

    let peripherals = peripheral_list(hwdef.all_pins());

    let pins_path = config.pins_path();
    info!("Writing pin setup in {}", pins_path.display());
    let io_err = |source| Error::Io {
        path: pins_path.clone(),
        source,
    };
    let mut f = BufWriter::new(File::create(&pins_path).map_err(io_err)?);
    write_pins_header(&mut f, hwdef)
        .and_then(|_| f.flush())
        .map_err(io_err)?;
    drop(f);

    dma.resolve(&config.dma_path(), &peripherals, mcu_type)
}
