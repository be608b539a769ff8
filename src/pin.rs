//! Pin model
//!
//! A [`Pin`] is the configuration request for one physical pin, as written
//! in the hardware definition. Its register settings are not stored, they
//! are derived on demand from the peripheral type, the modifier tokens and
//! the resolved alternate function:
//!
//! | field   | default                                   | modifiers                     |
//! |---------|-------------------------------------------|-------------------------------|
//! | mode    | AF → alternate, `OUTPUT`, `ADC*` → analog, `CS` → output, else input | none |
//! | otype   | push-pull, `I2C*` → open drain            | `PUSHPULL` `OPENDRAIN`        |
//! | speed   | high, `CS` or `I2C*` → medium             | `SPEED_VERYLOW` .. `SPEED_HIGH` |
//! | pull    | floating, `CS` → pull-up                  | `FLOATING` `PULLUP` `PULLDOWN` |
//! | level   | high                                      | `LOW` `HIGH`                  |
//!
//! When several modifiers target the same field, the last one on the line
//! wins.

use core::fmt;

/// Modifier marking a chip select line.
const CHIP_SELECT: &str = "CS";

/// Pin mode (`MODER`)
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Mode {
    /// Digital input
    Input,
    /// General purpose output
    Output,
    /// Routed to a peripheral via an alternate function
    Alternate,
    /// Analog input
    Analog,
}

impl Mode {
    fn name(self) -> &'static str {
        match self {
            Mode::Input => "INPUT",
            Mode::Output => "OUTPUT",
            Mode::Alternate => "ALTERNATE",
            Mode::Analog => "ANALOG",
        }
    }
}

/// Output driver type (`OTYPER`)
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum OutputType {
    /// Push pull
    PushPull,
    /// Open drain
    OpenDrain,
}

impl OutputType {
    fn from_modifier(token: &str) -> Option<Self> {
        match token {
            "PUSHPULL" => Some(OutputType::PushPull),
            "OPENDRAIN" => Some(OutputType::OpenDrain),
            _ => None,
        }
    }

    fn name(self) -> &'static str {
        match self {
            OutputType::PushPull => "PUSHPULL",
            OutputType::OpenDrain => "OPENDRAIN",
        }
    }
}

/// Output slew rate (`OSPEEDR`)
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Speed {
    VeryLow,
    Low,
    Medium,
    High,
}

impl Speed {
    fn from_modifier(token: &str) -> Option<Self> {
        match token {
            "SPEED_VERYLOW" => Some(Speed::VeryLow),
            "SPEED_LOW" => Some(Speed::Low),
            "SPEED_MEDIUM" => Some(Speed::Medium),
            "SPEED_HIGH" => Some(Speed::High),
            _ => None,
        }
    }

    fn name(self) -> &'static str {
        match self {
            Speed::VeryLow => "VERYLOW",
            Speed::Low => "LOW",
            Speed::Medium => "MEDIUM",
            Speed::High => "HIGH",
        }
    }
}

/// Internal pull resistor (`PUPDR`)
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Pull {
    /// No pull resistor
    Floating,
    /// Pulled up
    PullUp,
    /// Pulled down
    PullDown,
}

impl Pull {
    fn from_modifier(token: &str) -> Option<Self> {
        match token {
            "FLOATING" => Some(Pull::Floating),
            "PULLUP" => Some(Pull::PullUp),
            "PULLDOWN" => Some(Pull::PullDown),
            _ => None,
        }
    }

    fn name(self) -> &'static str {
        match self {
            Pull::Floating => "FLOATING",
            Pull::PullUp => "PULLUP",
            Pull::PullDown => "PULLDOWN",
        }
    }
}

/// Initial output data (`ODR`)
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Level {
    Low,
    High,
}

impl Level {
    fn from_modifier(token: &str) -> Option<Self> {
        match token {
            "LOW" => Some(Level::Low),
            "HIGH" => Some(Level::High),
            _ => None,
        }
    }

    fn name(self) -> &'static str {
        match self {
            Level::Low => "LOW",
            Level::High => "HIGH",
        }
    }
}

/// The seven per-port register aggregates written to the header.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Field {
    Moder,
    Otyper,
    Ospeedr,
    Pupdr,
    Odr,
    /// Alternate function register for pins 0..=7
    Afrl,
    /// Alternate function register for pins 8..=15
    Afrh,
}

impl Field {
    /// All fields, in the order they are emitted.
    pub const ALL: [Field; 7] = [
        Field::Moder,
        Field::Otyper,
        Field::Ospeedr,
        Field::Pupdr,
        Field::Odr,
        Field::Afrl,
        Field::Afrh,
    ];

    /// Register name as used in `VAL_GPIOx_<name>`.
    pub fn name(self) -> &'static str {
        match self {
            Field::Moder => "MODER",
            Field::Otyper => "OTYPER",
            Field::Ospeedr => "OSPEEDR",
            Field::Pupdr => "PUPDR",
            Field::Odr => "ODR",
            Field::Afrl => "AFRL",
            Field::Afrh => "AFRH",
        }
    }
}

/// One pin definition
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Pin {
    /// Port letter
    pub port: char,
    /// Pin number within the port
    pub index: u8,
    /// Functional name, `None` for a slot nobody configured
    pub label: Option<String>,
    /// Peripheral type tag, e.g. `OUTPUT`, `ADC1` or `SPI2`
    pub kind: String,
    /// Modifier tokens in declaration order
    pub modifiers: Vec<String>,
    /// Resolved alternate function number
    pub af: Option<u8>,
}

impl Pin {
    /// Creates a configured pin.
    pub fn new(
        port: char,
        index: u8,
        label: impl Into<String>,
        kind: impl Into<String>,
        modifiers: Vec<String>,
    ) -> Self {
        Pin {
            port,
            index,
            label: Some(label.into()),
            kind: kind.into(),
            modifiers,
            af: None,
        }
    }

    /// Creates the placeholder for an unconfigured slot: an unlabeled input.
    pub fn unconfigured(port: char, index: u8) -> Self {
        Pin {
            port,
            index,
            label: None,
            kind: String::from("INPUT"),
            modifiers: Vec::new(),
            af: None,
        }
    }

    /// Sets the alternate function number.
    pub fn with_af(mut self, af: u8) -> Self {
        self.af = Some(af);
        self
    }

    /// Returns `true` if `token` appears among the modifiers.
    pub fn has_modifier(&self, token: &str) -> bool {
        self.modifiers.iter().any(|m| m == token)
    }

    // Scans all modifiers and keeps the last one that parses.
    fn last_modifier<T>(&self, parse: impl Fn(&str) -> Option<T>) -> Option<T> {
        self.modifiers.iter().filter_map(|m| parse(m.as_str())).last()
    }

    fn is_i2c(&self) -> bool {
        self.kind.starts_with("I2C")
    }

    /// Alternate if an AF resolved, else output for `OUTPUT`, analog for
    /// `ADC*`, output for `CS`, otherwise input.
    pub fn mode(&self) -> Mode {
        if self.af.is_some() {
            Mode::Alternate
        } else if self.kind == "OUTPUT" {
            Mode::Output
        } else if self.kind.starts_with("ADC") {
            Mode::Analog
        } else if self.has_modifier(CHIP_SELECT) {
            Mode::Output
        } else {
            Mode::Input
        }
    }

    /// Push-pull, open drain for `I2C*`. `PUSHPULL`/`OPENDRAIN` override.
    pub fn output_type(&self) -> OutputType {
        let default = if self.is_i2c() {
            OutputType::OpenDrain
        } else {
            OutputType::PushPull
        };
        self.last_modifier(OutputType::from_modifier)
            .unwrap_or(default)
    }

    /// High, medium for `CS` or `I2C*`. A `SPEED_*` modifier overrides.
    pub fn speed(&self) -> Speed {
        let default = if self.has_modifier(CHIP_SELECT) || self.is_i2c() {
            Speed::Medium
        } else {
            Speed::High
        };
        self.last_modifier(Speed::from_modifier).unwrap_or(default)
    }

    /// Floating, pull-up for `CS`. `FLOATING`/`PULLUP`/`PULLDOWN` override.
    pub fn pull(&self) -> Pull {
        let default = if self.has_modifier(CHIP_SELECT) {
            Pull::PullUp
        } else {
            Pull::Floating
        };
        self.last_modifier(Pull::from_modifier).unwrap_or(default)
    }

    /// High unless a `LOW` or `HIGH` modifier says otherwise.
    pub fn level(&self) -> Level {
        self.last_modifier(Level::from_modifier)
            .unwrap_or(Level::High)
    }

    fn afio(&self) -> String {
        format!("PIN_AFIO_AF({}U, {}U)", self.index, self.af.unwrap_or(0))
    }

    /// Returns this pin's term for the `field` aggregate.
    ///
    /// `None` means the pin does not contribute to that register, which only
    /// happens for the alternate function half it does not live in.
    pub fn field(&self, field: Field) -> Option<String> {
        let n = self.index;
        match field {
            Field::Moder => Some(format!("PIN_MODE_{}({}U)", self.mode().name(), n)),
            Field::Otyper => Some(format!("PIN_OTYPE_{}({}U)", self.output_type().name(), n)),
            Field::Ospeedr => Some(format!("PIN_OSPEED_{}({}U)", self.speed().name(), n)),
            Field::Pupdr => Some(format!("PIN_PUPDR_{}({}U)", self.pull().name(), n)),
            Field::Odr => Some(format!("PIN_ODR_{}({}U)", self.level().name(), n)),
            Field::Afrl if n < 8 => Some(self.afio()),
            Field::Afrh if n >= 8 => Some(self.afio()),
            Field::Afrl | Field::Afrh => None,
        }
    }
}

impl fmt::Display for Pin {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "P{}{} {} {}",
            self.port,
            self.index,
            self.label.as_deref().unwrap_or(""),
            self.kind
        )?;
        if let Some(af) = self.af {
            write!(f, " AF{}", af)?;
        }
        Ok(())
    }
}
