/*!
 # Pin definition compiler

   Turns a board's hardware definition, a short text file listing what each
   pin is used for, into the `pins.h` header ChibiOS uses to set up the STM32
   GPIO registers right after reset.

   ```text
   MCU STM32F4 STM32F407xx
   OSCILLATOR_HZ 8000000
   PA9  USART1_TX USART1
   PA10 USART1_RX USART1
   PB12 SPI2_CS   SPI2   CS
   ```

   Every pin gets its mode, output type, speed, pull resistor, initial level
   and alternate function derived from its peripheral type and modifiers
   (see [`pin`]). The alternate function numbers come from an
   [`AltFunctionLookup`], the DMA header is written by a [`DmaResolver`].

   ```no_run
   use hwdef_pins::{generate, Config, HwDef, NoAltFunctions, RequestListing};

   let hwdef = HwDef::load("hwdef.dat", &NoAltFunctions)?;
   generate(&hwdef, &Config::default().outdir("build"), &RequestListing)?;
   # Ok::<(), hwdef_pins::Error>(())
   ```
*/

pub mod af;
pub mod config;
pub mod dma;
pub mod error;
pub mod generate;
pub mod header;
pub mod hwdef;
pub mod peripheral;
pub mod pin;
pub mod port;

pub use crate::af::{AltFunctionLookup, NoAltFunctions};
pub use crate::config::Config;
pub use crate::dma::{DmaResolver, RequestListing};
pub use crate::error::{Error, PinLineError, Result};
pub use crate::generate::generate;
pub use crate::hwdef::HwDef;
pub use crate::pin::{Field, Pin};
