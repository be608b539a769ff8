//! GPIO ports and pin names
//!
//! Every port owns a fixed number of pin slots. Ports without any bonded
//! pins on the supported packages (I, J, K) still exist, they just have a
//! width of zero.

use once_cell::sync::Lazy;
use regex::Regex;

use crate::error::PinLineError;

/// Number of pins on each port, in port order.
pub const PIN_COUNT: [(char, u8); 11] = [
    ('A', 16),
    ('B', 16),
    ('C', 16),
    ('D', 16),
    ('E', 16),
    ('F', 16),
    ('G', 16),
    ('H', 2),
    ('I', 0),
    ('J', 0),
    ('K', 0),
];

/// Iterator over all port letters, in lexicographic order.
pub fn ports() -> impl Iterator<Item = char> {
    PIN_COUNT.iter().map(|&(port, _)| port)
}

/// Number of pin slots on `port`, `None` if the letter is not a port.
pub fn pin_count(port: char) -> Option<u8> {
    PIN_COUNT
        .iter()
        .find(|&&(id, _)| id == port)
        .map(|&(_, count)| count)
}

/// Returns the port letter if `keyword` names a pin, e.g. `PA9`.
///
/// This only looks at the `P<port>` prefix. Whether the remainder is a
/// usable index is decided by [`parse_pin_name`].
pub fn pin_port(keyword: &str) -> Option<char> {
    static PIN_NAME: Lazy<Regex> = Lazy::new(|| Regex::new(r"^P(?P<port>[A-K])").unwrap());

    let captures = PIN_NAME.captures(keyword)?;
    captures.name("port")?.as_str().chars().next()
}

/// Splits a pin keyword such as `PB12` into its port and index.
pub fn parse_pin_name(keyword: &str) -> Result<(char, u8), PinLineError> {
    static PIN_INDEX: Lazy<Regex> =
        Lazy::new(|| Regex::new(r"^P(?P<port>[A-K])(?P<nr>\d{1,3})$").unwrap());

    let captures = PIN_INDEX
        .captures(keyword)
        .ok_or_else(|| PinLineError::BadIndex(keyword.to_string()))?;

    let port = captures["port"]
        .chars()
        .next()
        .ok_or_else(|| PinLineError::BadIndex(keyword.to_string()))?;
    let index: u16 = captures["nr"]
        .parse()
        .map_err(|_| PinLineError::BadIndex(keyword.to_string()))?;

    let width = pin_count(port).unwrap_or(0);
    if index >= u16::from(width) {
        return Err(PinLineError::IndexOutOfRange { port, index, width });
    }

    Ok((port, index as u8))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn port_widths() {
        assert_eq!(pin_count('A'), Some(16));
        assert_eq!(pin_count('H'), Some(2));
        assert_eq!(pin_count('K'), Some(0));
        assert_eq!(pin_count('L'), None);
        assert_eq!(ports().collect::<String>(), "ABCDEFGHIJK");
    }

    #[test]
    fn pin_keywords() {
        assert_eq!(pin_port("PA9"), Some('A'));
        assert_eq!(pin_port("PERIPH"), Some('E'));
        assert_eq!(pin_port("PZ1"), None);
        assert_eq!(pin_port("STM32_VDD"), None);
    }

    #[test]
    fn pin_names() {
        assert_eq!(parse_pin_name("PA9"), Ok(('A', 9)));
        assert_eq!(parse_pin_name("PC15"), Ok(('C', 15)));
        assert_eq!(
            parse_pin_name("PERIPH"),
            Err(PinLineError::BadIndex("PERIPH".to_string()))
        );
        assert_eq!(
            parse_pin_name("PH2"),
            Err(PinLineError::IndexOutOfRange {
                port: 'H',
                index: 2,
                width: 2
            })
        );
        assert_eq!(
            parse_pin_name("PA300"),
            Err(PinLineError::IndexOutOfRange {
                port: 'A',
                index: 300,
                width: 16
            })
        );
        assert_eq!(
            parse_pin_name("PI0"),
            Err(PinLineError::IndexOutOfRange {
                port: 'I',
                index: 0,
                width: 0
            })
        );
    }
}
