use crate::cubemx::Db;
use anyhow::{Context, Result};
use serde::Deserialize;

pub fn load(db: &Db, name: &str) -> Result<Mcu> {
    db.load(name)
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct Mcu {
    pub ref_name: String,
    #[serde(rename = "IP")]
    pub ips: Vec<Ip>,
}

impl Mcu {
    /// Version of the named IP block, e.g. `STM32F417_gpio_v1_0` for `GPIO`.
    pub fn ip_version(&self, ip_name: &str) -> Result<&str> {
        self.ips
            .iter()
            .find(|ip| ip.name == ip_name)
            .map(|ip| ip.version.as_str())
            .with_context(|| format!("{} has no {} IP", self.ref_name, ip_name))
    }
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct Ip {
    pub name: String,
    pub version: String,
}
