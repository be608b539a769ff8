//! Hardware definition parser
//!
//! A hardware definition is a line based text file. Blank lines and lines
//! starting with `#` are ignored, every other line is split on whitespace
//! and stored in the configuration table under its first word. A later line
//! with the same first word replaces the earlier one.
//!
//! ```text
//! MCU STM32F4 STM32F407xx
//! OSCILLATOR_HZ 8000000
//! PA9  USART1_TX USART1
//! PA10 USART1_RX USART1
//! PB0  LED       OUTPUT LOW
//! ```
//!
//! Lines whose first word names a pin (`P<port><index>`) additionally
//! configure that pin: the second word is its label, the third its
//! peripheral type and any further words are modifiers.

use std::collections::{BTreeMap, HashMap};
use std::fs;
use std::path::Path;

use tracing::{debug, warn};

use crate::af::AltFunctionLookup;
use crate::error::{Error, PinLineError, Result};
use crate::pin::Pin;
use crate::port;

/// A pin line that was skipped
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Warning {
    /// The offending line, trimmed
    pub line: String,
    /// Why it was skipped
    pub error: PinLineError,
}

/// Everything read from one hardware definition.
///
/// Built once per run, then only read by the header emitter and the
/// peripheral list builder.
#[derive(Clone, Debug)]
pub struct HwDef {
    config: HashMap<String, Vec<String>>,
    ports: BTreeMap<char, Vec<Pin>>,
    all_pins: Vec<Pin>,
    by_type: BTreeMap<String, Vec<Pin>>,
    mcu_type: Option<String>,
    warnings: Vec<Warning>,
}

impl Default for HwDef {
    fn default() -> Self {
        let ports = port::PIN_COUNT
            .iter()
            .map(|&(id, count)| (id, (0..count).map(|i| Pin::unconfigured(id, i)).collect()))
            .collect();

        HwDef {
            config: HashMap::new(),
            ports,
            all_pins: Vec::new(),
            by_type: BTreeMap::new(),
            mcu_type: None,
            warnings: Vec::new(),
        }
    }
}

impl HwDef {
    /// Parses a complete definition.
    pub fn parse<L: AltFunctionLookup + ?Sized>(text: &str, lookup: &L) -> Self {
        let mut hwdef = HwDef::default();
        for line in text.lines() {
            let line = line.trim();
            if line.is_empty() || line.starts_with('#') {
                continue;
            }
            hwdef.process_line(line, lookup);
        }
        hwdef
    }

    /// Reads and parses the definition file at `path`.
    pub fn load<P: AsRef<Path>, L: AltFunctionLookup + ?Sized>(path: P, lookup: &L) -> Result<Self> {
        let path = path.as_ref();
        let text = fs::read_to_string(path).map_err(|source| Error::Io {
            path: path.to_path_buf(),
            source,
        })?;
        Ok(Self::parse(&text, lookup))
    }

    /// Processes one non-empty, non-comment line.
    pub fn process_line<L: AltFunctionLookup + ?Sized>(&mut self, line: &str, lookup: &L) {
        let words: Vec<&str> = line.split_whitespace().collect();
        let (keyword, rest) = match words.split_first() {
            Some(split) => split,
            None => return,
        };

        self.config.insert(
            keyword.to_string(),
            rest.iter().map(|w| w.to_string()).collect(),
        );

        if *keyword == "MCU" {
            match rest.get(1) {
                Some(variant) => self.mcu_type = Some(variant.to_string()),
                None => warn!("MCU line without variant: {}", line),
            }
        }

        if port::pin_port(keyword).is_some() {
            if let Err(error) = self.process_pin(keyword, rest, lookup) {
                warn!("Bad pin line: {}: {}", line, error);
                self.warnings.push(Warning {
                    line: line.to_string(),
                    error,
                });
            }
        }
    }

    fn process_pin<L: AltFunctionLookup + ?Sized>(
        &mut self,
        keyword: &str,
        rest: &[&str],
        lookup: &L,
    ) -> core::result::Result<(), PinLineError> {
        let (label, kind, modifiers) = match rest {
            [label, kind, modifiers @ ..] => (*label, *kind, modifiers),
            _ => return Err(PinLineError::TooFewTokens),
        };
        let (port, index) = port::parse_pin_name(keyword)?;

        let mut pin = Pin::new(
            port,
            index,
            label,
            kind,
            modifiers.iter().map(|m| m.to_string()).collect(),
        );
        if let Some(af) = lookup.alt_function(self.mcu_type.as_deref(), keyword, label) {
            debug!("{} {} -> AF{}", keyword, label, af);
            pin.af = Some(af);
        }

        if let Some(slot) = self
            .ports
            .get_mut(&port)
            .and_then(|pins| pins.get_mut(usize::from(index)))
        {
            *slot = pin.clone();
        }
        self.by_type
            .entry(pin.kind.clone())
            .or_default()
            .push(pin.clone());
        self.all_pins.push(pin);

        Ok(())
    }

    /// The value words stored for `keyword`, if any line used it.
    pub fn get(&self, keyword: &str) -> Option<&[String]> {
        self.config.get(keyword).map(Vec::as_slice)
    }

    /// First value word stored for `keyword`.
    pub fn value(&self, keyword: &str) -> Option<&str> {
        self.get(keyword)
            .and_then(|values| values.first())
            .map(String::as_str)
    }

    /// The `(family, variant)` pair from the `MCU` line.
    pub fn mcu(&self) -> Result<(&str, &str)> {
        match self.get("MCU") {
            Some([family, variant, ..]) => Ok((family.as_str(), variant.as_str())),
            _ => Err(Error::MissingMcu),
        }
    }

    /// MCU type used for alternate function lookups, as last declared.
    pub fn mcu_type(&self) -> Option<&str> {
        self.mcu_type.as_deref()
    }

    /// Pin slots of every port, keyed by port letter.
    pub fn ports(&self) -> &BTreeMap<char, Vec<Pin>> {
        &self.ports
    }

    /// Pin slots of `port`, empty for unknown ports.
    pub fn port(&self, port: char) -> &[Pin] {
        self.ports.get(&port).map(Vec::as_slice).unwrap_or(&[])
    }

    /// Every pin line in file order, including ones a later line replaced.
    pub fn all_pins(&self) -> &[Pin] {
        &self.all_pins
    }

    /// Pins grouped by peripheral type, types in lexicographic order.
    pub fn by_type(&self) -> &BTreeMap<String, Vec<Pin>> {
        &self.by_type
    }

    /// Skipped pin lines.
    pub fn warnings(&self) -> &[Warning] {
        &self.warnings
    }
}
