//! Alternate function lookup

/// Source of alternate function numbers.
///
/// Given the MCU type declared so far (if any), the raw pin token such as
/// `PA9` and the pin's functional label such as `USART1_TX`, returns the
/// alternate function routing that signal to the pin, or `None` if the chip
/// has no such mapping.
pub trait AltFunctionLookup {
    fn alt_function(&self, mcu_type: Option<&str>, pin: &str, label: &str) -> Option<u8>;
}

impl<F> AltFunctionLookup for F
where
    F: Fn(Option<&str>, &str, &str) -> Option<u8>,
{
    fn alt_function(&self, mcu_type: Option<&str>, pin: &str, label: &str) -> Option<u8> {
        self(mcu_type, pin, label)
    }
}

/// Lookup that never resolves anything
#[derive(Clone, Copy, Debug, Default)]
pub struct NoAltFunctions;

impl AltFunctionLookup for NoAltFunctions {
    fn alt_function(&self, _mcu_type: Option<&str>, _pin: &str, _label: &str) -> Option<u8> {
        None
    }
}
