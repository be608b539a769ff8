//! DMA resolver hand-off
//!
//! Stream and channel allocation is chip specific and lives outside this
//! crate. The generator only hands over the peripherals that need DMA, in
//! the order [`peripheral_list`](crate::peripheral::peripheral_list)
//! produced them.

use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::Path;

use crate::error::{Error, Result};

/// Writes the DMA header for a list of peripherals.
pub trait DmaResolver {
    fn resolve(&self, path: &Path, peripherals: &[String], mcu_type: &str) -> Result<()>;
}

/// Resolver that records the requested peripherals without allocating
/// streams.
///
/// For each peripheral `P` the header defines `HAL_DMA_P_REQUESTED`.
#[derive(Clone, Copy, Debug, Default)]
pub struct RequestListing;

impl RequestListing {
    /// Writes the listing to `w`.
    pub fn write_to<W: Write>(
        &self,
        w: &mut W,
        peripherals: &[String],
        mcu_type: &str,
    ) -> std::io::Result<()> {
        w.write_all(b"/*\n DMA setup - generated file, do not edit\n*/\n\n#pragma once\n\n")?;
        writeln!(w, "// DMA requests for {}", mcu_type)?;
        for periph in peripherals {
            writeln!(w, "#define HAL_DMA_{}_REQUESTED", periph)?;
        }
        Ok(())
    }
}

impl DmaResolver for RequestListing {
    fn resolve(&self, path: &Path, peripherals: &[String], mcu_type: &str) -> Result<()> {
        let io_err = |source| Error::Io {
            path: path.to_path_buf(),
            source,
        };

        let mut f = BufWriter::new(File::create(path).map_err(io_err)?);
        self.write_to(&mut f, peripherals, mcu_type)
            .and_then(|_| f.flush())
            .map_err(io_err)
    }
}
