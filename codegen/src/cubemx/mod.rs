pub mod families;
pub mod ip;
pub mod mcu;

mod db;

pub use db::Db;

use anyhow::Result;
use hwdef_pins::{port, AltFunctionLookup};
use ip::gpio::AfMap;
use std::{cell::RefCell, collections::HashMap, path::PathBuf};
use tracing::{debug, warn};

/// Loads the alternate function table of the MCU matching `variant`.
pub fn load_af_map(db: &Db, variant: &str) -> Result<AfMap> {
    let mcu_ = families::find_mcu(db, variant)?;
    let mcu = mcu::load(db, &mcu_.name)?;
    debug!("{} resolved to {} in DB", variant, mcu.ref_name);

    let gpio = ip::gpio::load(db, mcu.ip_version("GPIO")?)?;
    Ok(gpio.af_map())
}

/// Alternate function lookup backed by an STM32CubeMX database.
///
/// Each MCU type is loaded the first time it is asked for. A chip that
/// cannot be loaded is reported once and then resolves nothing.
pub struct AfDatabase {
    db: Db,
    chips: RefCell<HashMap<String, Option<AfMap>>>,
}

impl AfDatabase {
    pub fn new<P: Into<PathBuf>>(root: P) -> Self {
        Self {
            db: Db::new(root),
            chips: RefCell::new(HashMap::new()),
        }
    }
}

impl AltFunctionLookup for AfDatabase {
    fn alt_function(&self, mcu_type: Option<&str>, pin: &str, label: &str) -> Option<u8> {
        let mcu_type = mcu_type?;
        let key = port::parse_pin_name(pin).ok()?;

        let mut chips = self.chips.borrow_mut();
        let chip = chips.entry(mcu_type.to_string()).or_insert_with(|| {
            load_af_map(&self.db, mcu_type)
                .map_err(|e| warn!("no alternate functions for {}: {:#}", mcu_type, e))
                .ok()
        });

        chip.as_ref()?.get(&key)?.get(label).copied()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;

    const FAMILIES: &str = r#"<?xml version="1.0" encoding="UTF-8"?>
<Families>
    <Family Name="STM32F4">
        <SubFamily Name="STM32F407/417">
            <Mcu Name="STM32F407V(E-G)Tx" RefName="STM32F407VETx" RPN="STM32F407VE"/>
        </SubFamily>
    </Family>
</Families>"#;

    const MCU: &str = r#"<?xml version="1.0" encoding="UTF-8"?>
<Mcu RefName="STM32F407V(E-G)Tx">
    <IP InstanceName="GPIO" Name="GPIO" Version="STM32F417_gpio_v1_0"/>
    <IP InstanceName="USART1" Name="USART" Version="sci2_v1_1"/>
</Mcu>"#;

    const MODES: &str = r#"<?xml version="1.0" encoding="UTF-8"?>
<IP Name="GPIO" Version="STM32F417_gpio_v1_0">
    <GPIO_Pin PortName="PA" Name="PA9">
        <PinSignal Name="USART1_TX">
            <SpecificParameter Name="GPIO_AF">
                <PossibleValue>GPIO_AF7_USART1</PossibleValue>
            </SpecificParameter>
        </PinSignal>
    </GPIO_Pin>
</IP>"#;

    fn database() -> tempfile::TempDir {
        let dir = tempfile::tempdir().unwrap();
        fs::write(dir.path().join("families.xml"), FAMILIES).unwrap();
        fs::write(dir.path().join("STM32F407V(E-G)Tx.xml"), MCU).unwrap();
        fs::create_dir(dir.path().join("IP")).unwrap();
        fs::write(
            dir.path().join("IP/GPIO-STM32F417_gpio_v1_0_Modes.xml"),
            MODES,
        )
        .unwrap();
        dir
    }

    #[test]
    fn resolves_through_families_and_mcu() {
        let dir = database();
        let db = AfDatabase::new(dir.path());

        assert_eq!(
            db.alt_function(Some("STM32F407xx"), "PA9", "USART1_TX"),
            Some(7)
        );
        assert_eq!(db.alt_function(Some("STM32F407xx"), "PA9", "SPI1_SCK"), None);
        assert_eq!(db.alt_function(Some("STM32F407xx"), "PA10", "USART1_RX"), None);
        assert!(matches!(
            db.chips.borrow().get("STM32F407xx"),
            Some(Some(_))
        ));
    }

    #[test]
    fn no_mcu_type_resolves_nothing() {
        let dir = database();
        let db = AfDatabase::new(dir.path());

        assert_eq!(db.alt_function(None, "PA9", "USART1_TX"), None);
        assert!(db.chips.borrow().is_empty());
    }

    #[test]
    fn unknown_chip_is_cached_as_empty() {
        let dir = database();
        let db = AfDatabase::new(dir.path());

        assert_eq!(db.alt_function(Some("STM32F999xx"), "PA9", "USART1_TX"), None);
        assert!(matches!(db.chips.borrow().get("STM32F999xx"), Some(None)));

        // a cached failure does not shadow a loadable chip
        assert_eq!(
            db.alt_function(Some("STM32F407xx"), "PA9", "USART1_TX"),
            Some(7)
        );
    }
}
