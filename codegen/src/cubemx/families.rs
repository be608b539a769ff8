use crate::cubemx::Db;
use anyhow::{Context, Result};
use serde::Deserialize;

pub fn load(db: &Db) -> Result<Families> {
    db.load("families")
}

/// Finds the first MCU whose part number matches `variant`.
///
/// The variant uses ChibiOS spelling, where each `x` stands for any
/// character: `STM32F407xx` matches `STM32F407VE` and `STM32F407ZG`.
pub fn find_mcu(db: &Db, variant: &str) -> Result<Mcu> {
    load(db)?
        .families
        .into_iter()
        .flat_map(|family| family.sub_families.into_iter())
        .flat_map(|subfamily| subfamily.mcus.into_iter())
        .find(|mcu| part_matches(variant, &mcu.rpn))
        .with_context(|| format!("no MCU matching {} in DB", variant))
}

fn part_matches(variant: &str, rpn: &str) -> bool {
    variant.len() == rpn.len()
        && variant
            .chars()
            .zip(rpn.chars())
            .all(|(v, r)| v == 'x' || v == r)
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct Families {
    #[serde(rename = "Family")]
    pub families: Vec<Family>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct Family {
    #[serde(rename = "SubFamily")]
    pub sub_families: Vec<SubFamily>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct SubFamily {
    #[serde(rename = "Mcu")]
    pub mcus: Vec<Mcu>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct Mcu {
    /// Name of the MCU file in the DB
    pub name: String,
    #[serde(rename = "RPN")]
    pub rpn: String,
}

#[cfg(test)]
mod tests {
    use super::part_matches;

    #[test]
    fn chibios_variants() {
        assert!(part_matches("STM32F407xx", "STM32F407VE"));
        assert!(part_matches("STM32F407xx", "STM32F407ZG"));
        assert!(part_matches("STM32F103xB", "STM32F103CB"));
        assert!(!part_matches("STM32F103xB", "STM32F103C8"));
        assert!(!part_matches("STM32F407xx", "STM32F417VE"));
        assert!(!part_matches("STM32F407xx", "STM32F407"));
    }
}
