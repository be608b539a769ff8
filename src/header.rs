//! Pin setup header
//!
//! Emits the C header that ChibiOS includes as its board configuration. It
//! holds the MCU identity and board level defines, the peripheral drivers to
//! enable and one `VAL_GPIOx_<REG>` initializer per port and register.

use std::io::{self, Write};

use crate::hwdef::HwDef;
use crate::pin::{Field, Pin};

const PREAMBLE: &str = "/*
 pin setup - generated file, do not edit
*/

#pragma once

";

const PIN_MACROS: &str = "
/*
 * I/O ports initial setup, this configuration is established soon after reset
 * in the initialization code.
 * Please refer to the STM32 Reference Manual for details.
 */
#define PIN_MODE_INPUT(n)           (0U << ((n) * 2U))
#define PIN_MODE_OUTPUT(n)          (1U << ((n) * 2U))
#define PIN_MODE_ALTERNATE(n)       (2U << ((n) * 2U))
#define PIN_MODE_ANALOG(n)          (3U << ((n) * 2U))
#define PIN_ODR_LOW(n)              (0U << (n))
#define PIN_ODR_HIGH(n)             (1U << (n))
#define PIN_OTYPE_PUSHPULL(n)       (0U << (n))
#define PIN_OTYPE_OPENDRAIN(n)      (1U << (n))
#define PIN_OSPEED_VERYLOW(n)       (0U << ((n) * 2U))
#define PIN_OSPEED_LOW(n)           (1U << ((n) * 2U))
#define PIN_OSPEED_MEDIUM(n)        (2U << ((n) * 2U))
#define PIN_OSPEED_HIGH(n)          (3U << ((n) * 2U))
#define PIN_PUPDR_FLOATING(n)       (0U << ((n) * 2U))
#define PIN_PUPDR_PULLUP(n)         (1U << ((n) * 2U))
#define PIN_PUPDR_PULLDOWN(n)       (2U << ((n) * 2U))
#define PIN_AFIO_AF(n, v)           ((v) << (((n) % 8U) * 4U))

";

// Continuation between two terms of a register initializer.
const TERM_SEPARATOR: &str = " | \\\n                           ";

/// Writes the complete pin setup header for `hwdef`.
pub fn write_pins_header<W: Write>(w: &mut W, hwdef: &HwDef) -> io::Result<()> {
    w.write_all(PREAMBLE.as_bytes())?;
    write_mcu_config(w, hwdef)?;
    write_peripheral_enable(w, hwdef)?;
    w.write_all(PIN_MACROS.as_bytes())?;

    for (&port, pins) in hwdef.ports() {
        // every pin line for the port, including replaced ones
        let mut listed: Vec<&Pin> = hwdef.all_pins().iter().filter(|p| p.port == port).collect();
        listed.sort_by_key(|p| p.index);

        writeln!(w, "/* PORT{}:", port)?;
        for pin in listed {
            writeln!(w, " {}", pin)?;
        }
        w.write_all(b"*/\n\n")?;

        if pins.is_empty() {
            // reserved ports
            for field in Field::ALL.iter() {
                writeln!(w, "#define VAL_GPIO{}_{:<7}             0x0", port, field.name())?;
            }
            w.write_all(b"\n\n\n")?;
            continue;
        }

        for &field in Field::ALL.iter() {
            let terms: Vec<String> = pins.iter().filter_map(|p| p.field(field)).collect();
            let value = if terms.is_empty() {
                String::from("0")
            } else {
                terms.join(TERM_SEPARATOR)
            };
            write!(w, "#define VAL_GPIO{}_{:<7} (", port, field.name())?;
            w.write_all(value.as_bytes())?;
            w.write_all(b")\n\n")?;
        }
    }

    Ok(())
}

fn write_mcu_config<W: Write>(w: &mut W, hwdef: &HwDef) -> io::Result<()> {
    if let Ok((family, variant)) = hwdef.mcu() {
        w.write_all(b"// MCU type (ChibiOS define)\n")?;
        writeln!(w, "#define {}_MCUCONF", family)?;
        writeln!(w, "#define {}\n", variant)?;
    }
    if let Some(vdd) = hwdef.value("STM32_VDD") {
        w.write_all(b"// Board voltage. Required for performance limits calculation\n")?;
        writeln!(w, "#define STM32_VDD {}\n", vdd)?;
    }
    if let Some(hz) = hwdef.value("OSCILLATOR_HZ") {
        w.write_all(b"// crystal frequency\n")?;
        writeln!(w, "#define STM32_HSECLK {}U\n", hz)?;
    }
    if let Some(serial) = hwdef.value("STDOUT_SERIAL") {
        w.write_all(b"// UART used for stdout (printf)\n")?;
        writeln!(w, "#define HAL_STDOUT_SERIAL {}\n", serial)?;
    }
    if let Some(baud) = hwdef.value("STDOUT_BAUDRATE") {
        w.write_all(b"// baudrate used for stdout (printf)\n")?;
        writeln!(w, "#define HAL_STDOUT_BAUDRATE {}\n", baud)?;
    }
    if hwdef.by_type().keys().any(|kind| kind.starts_with("SDIO")) {
        w.write_all(b"// SDIO available, enable POSIX filesystem support\n")?;
        w.write_all(b"#define USE_POSIX\n\n")?;
    }
    Ok(())
}

fn write_peripheral_enable<W: Write>(w: &mut W, hwdef: &HwDef) -> io::Result<()> {
    w.write_all(b"// peripherals enabled\n")?;
    for kind in hwdef.by_type().keys() {
        if kind.starts_with("USART") || kind.starts_with("UART") {
            writeln!(w, "#define STM32_SERIAL_USE_{:<6}             TRUE", kind)?;
        }
        if kind.starts_with("SPI") {
            writeln!(w, "#define STM32_SPI_USE_{}                  TRUE", kind)?;
        }
        if kind.starts_with("OTG") {
            writeln!(w, "#define STM32_USB_USE_{}                  TRUE", kind)?;
        }
        if kind.starts_with("I2C") {
            writeln!(w, "#define STM32_I2C_USE_{}                  TRUE", kind)?;
        }
    }
    Ok(())
}
