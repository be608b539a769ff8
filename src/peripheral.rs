//! Peripherals handed to the DMA resolver

use std::collections::HashSet;

use crate::pin::Pin;

/// Types transferring in both directions, one DMA request each.
const DUPLEX_PREFIXES: [&str; 4] = ["SPI", "USART", "UART", "I2C"];

/// Types with a single DMA request named after the peripheral.
const SIMPLEX_PREFIXES: [&str; 2] = ["ADC", "SDIO"];

/// Builds the list of DMA capable peripheral requests.
///
/// `pins` is walked in file order and each peripheral type is only looked at
/// the first time it shows up. Serial, SPI and I2C buses yield a `_TX` and
/// an `_RX` request, ADCs and SDIO yield the type itself.
pub fn peripheral_list(pins: &[Pin]) -> Vec<String> {
    let mut peripherals = Vec::new();
    let mut done = HashSet::new();

    for pin in pins {
        let kind = pin.kind.as_str();
        if !done.insert(kind) {
            continue;
        }
        if DUPLEX_PREFIXES.iter().any(|prefix| kind.starts_with(prefix)) {
            peripherals.push(format!("{}_TX", kind));
            peripherals.push(format!("{}_RX", kind));
        }
        if SIMPLEX_PREFIXES.iter().any(|prefix| kind.starts_with(prefix)) {
            peripherals.push(kind.to_string());
        }
    }

    peripherals
}

#[cfg(test)]
mod tests {
    use super::*;

    fn pins(kinds: &[&str]) -> Vec<Pin> {
        kinds
            .iter()
            .enumerate()
            .map(|(i, kind)| Pin::new('A', i as u8, format!("P{}", i), *kind, Vec::new()))
            .collect()
    }

    #[test]
    fn directions() {
        let list = peripheral_list(&pins(&[
            "USART1", "USART1", "OUTPUT", "ADC1", "SPI2", "SDIO", "UART4", "I2C1", "OTG1", "ADC1",
        ]));
        assert_eq!(
            list,
            vec![
                "USART1_TX", "USART1_RX", "ADC1", "SPI2_TX", "SPI2_RX", "SDIO", "UART4_TX",
                "UART4_RX", "I2C1_TX", "I2C1_RX",
            ]
        );
    }

    #[test]
    fn empty() {
        assert!(peripheral_list(&[]).is_empty());
        assert!(peripheral_list(&pins(&["INPUT", "OUTPUT"])).is_empty());
    }
}
