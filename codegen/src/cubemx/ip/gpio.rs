use crate::cubemx::Db;
use anyhow::{bail, Context, Result};
use once_cell::sync::Lazy;
use regex::Regex;
use serde::Deserialize;
use std::collections::HashMap;

pub fn load(db: &Db, version: &str) -> Result<Ip> {
    let name = format!("GPIO-{}_Modes", version);
    db.load(super::ip_path(&name))
}

/// Alternate functions of a chip, by `(port, pin)` and then signal name.
pub type AfMap = HashMap<(char, u8), HashMap<String, u8>>;

#[derive(Debug, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct Ip {
    #[serde(rename = "GPIO_Pin")]
    pub pins: Vec<Pin>,
}

impl Ip {
    /// Collects every signal with a `GPIO_AF` parameter.
    ///
    /// Pins with unusual names and signals without an AF number (remap
    /// based families) are left out.
    pub fn af_map(&self) -> AfMap {
        let mut map = AfMap::new();
        for pin in &self.pins {
            let key = match (pin.port(), pin.number()) {
                (Ok(port), Ok(nr)) => (port, nr),
                _ => continue,
            };
            for signal in &pin.pin_signals {
                if let Ok(af) = signal.af() {
                    map.entry(key)
                        .or_default()
                        .insert(signal.name.clone(), af);
                }
            }
        }
        map
    }
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct Pin {
    pub port_name: String,
    pub name: String,
    #[serde(rename = "PinSignal", default)]
    pub pin_signals: Vec<PinSignal>,
}

impl Pin {
    pub fn port(&self) -> Result<char> {
        static PORT_NAME: Lazy<Regex> = Lazy::new(|| Regex::new(r"^P(?P<id>[A-Z])$").unwrap());

        let captures = PORT_NAME
            .captures(&self.port_name)
            .with_context(|| format!("invalid GPIO port name: {}", self.port_name))?;

        let id = captures.name("id").unwrap().as_str();
        let id = id.parse()?;
        Ok(id)
    }

    pub fn number(&self) -> Result<u8> {
        static PIN_NAME: Lazy<Regex> =
            Lazy::new(|| Regex::new(r"^P[A-Z](?P<nr>\d{1,2})\b.*$").unwrap());

        let captures = PIN_NAME
            .captures(&self.name)
            .with_context(|| format!("invalid GPIO pin name: {}", self.name))?;

        let id = captures.name("nr").unwrap().as_str();
        let id = id.parse()?;
        Ok(id)
    }
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct PinSignal {
    pub name: String,
    #[serde(default)]
    specific_parameter: Option<SpecificParameter>,
}

impl PinSignal {
    pub fn af(&self) -> Result<u8> {
        match &self.specific_parameter {
            Some(param) if param.name == "GPIO_AF" => parse_af(&param.possible_value),
            _ => bail!("PinSignal {} is missing a GPIO_AF parameter", self.name),
        }
    }
}

fn parse_af(s: &str) -> Result<u8> {
    static AF: Lazy<Regex> = Lazy::new(|| Regex::new(r"^GPIO_AF(?P<nr>\d{1,2})_\w+$").unwrap());

    let captures = AF
        .captures(s)
        .with_context(|| format!("invalid PinSignal AF: {}", s))?;

    let nr = captures.name("nr").unwrap().as_str().parse()?;
    Ok(nr)
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "PascalCase")]
struct SpecificParameter {
    name: String,
    possible_value: String,
}
