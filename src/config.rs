//! Generator configuration

use std::path::PathBuf;

/// Where the generated headers go.
///
/// Create a configuration with `default` and adjust it with the builder
/// methods:
/// ```
/// # use hwdef_pins::Config;
/// let config = Config::default().outdir("build/fmuv3");
///
/// assert_eq!(config.pins_path(), std::path::Path::new("build/fmuv3/pins.h"));
/// assert_eq!(config.dma_path(), std::path::Path::new("build/fmuv3/dma.h"));
/// ```
#[derive(Debug, Clone, PartialEq)]
#[non_exhaustive]
pub struct Config {
    /// Output directory
    pub outdir: PathBuf,
    /// File name of the pin setup header
    pub pins_header: String,
    /// File name of the DMA header
    pub dma_header: String,
}

impl Config {
    /// Sets the output directory.
    pub fn outdir(mut self, outdir: impl Into<PathBuf>) -> Self {
        self.outdir = outdir.into();
        self
    }

    /// Sets the pin setup header file name.
    pub fn pins_header(mut self, name: impl Into<String>) -> Self {
        self.pins_header = name.into();
        self
    }

    /// Sets the DMA header file name.
    pub fn dma_header(mut self, name: impl Into<String>) -> Self {
        self.dma_header = name.into();
        self
    }

    /// Full path of the pin setup header.
    pub fn pins_path(&self) -> PathBuf {
        self.outdir.join(&self.pins_header)
    }

    /// Full path of the DMA header.
    pub fn dma_path(&self) -> PathBuf {
        self.outdir.join(&self.dma_header)
    }
}

impl Default for Config {
    /// Writes `pins.h` and `dma.h` into the current directory.
    fn default() -> Config {
        Config {
            outdir: PathBuf::from("."),
            pins_header: String::from("pins.h"),
            dma_header: String::from("dma.h"),
        }
    }
}
