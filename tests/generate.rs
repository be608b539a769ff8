use std::cell::RefCell;
use std::fs;
use std::path::Path;

use hwdef_pins::{generate, Config, DmaResolver, Error, HwDef, NoAltFunctions, RequestListing};

const FMU: &str = "\
# test board
MCU STM32F4 STM32F407xx
STM32_VDD 330U
OSCILLATOR_HZ 24000000
PA9 USART1_TX USART1
PA10 USART1_RX USART1
PB12 IMU_CS SPI2 CS
PC0 VBAT ADC1
";

fn af(mcu: Option<&str>, pin: &str, label: &str) -> Option<u8> {
    match (mcu?, pin, label) {
        ("STM32F407xx", "PA9", "USART1_TX") | ("STM32F407xx", "PA10", "USART1_RX") => Some(7),
        _ => None,
    }
}

/// Remembers what the generator handed over.
#[derive(Default)]
struct Recorder {
    calls: RefCell<Vec<(String, Vec<String>, String)>>,
}

impl DmaResolver for Recorder {
    fn resolve(&self, path: &Path, peripherals: &[String], mcu_type: &str) -> hwdef_pins::Result<()> {
        assert!(
            path.with_file_name("pins.h").exists(),
            "pin header must be written before the DMA header"
        );
        self.calls.borrow_mut().push((
            path.file_name().unwrap().to_string_lossy().into_owned(),
            peripherals.to_vec(),
            mcu_type.to_string(),
        ));
        Ok(())
    }
}

#[test]
fn usart_end_to_end() {
    let dir = tempfile::tempdir().unwrap();
    let hwdef = HwDef::parse(FMU, &af);
    let recorder = Recorder::default();

    generate(&hwdef, &Config::default().outdir(dir.path()), &recorder).unwrap();

    let pins = fs::read_to_string(dir.path().join("pins.h")).unwrap();
    assert!(pins.contains("#define STM32_SERIAL_USE_USART1             TRUE\n"));
    assert!(pins.contains("#define STM32_SPI_USE_SPI2                  TRUE\n"));
    assert!(pins.contains("#define STM32_HSECLK 24000000U\n"));

    let afrh = pins
        .split("#define VAL_GPIOA_AFRH")
        .nth(1)
        .and_then(|s| s.split("\n\n").next())
        .unwrap();
    assert!(afrh.contains("PIN_AFIO_AF(9U, 7U)"));
    assert!(afrh.contains("PIN_AFIO_AF(10U, 7U)"));
    assert!(pins.contains("PIN_MODE_OUTPUT(12U)"));
    assert!(pins.contains("PIN_PUPDR_PULLUP(12U)"));
    assert!(pins.contains("PIN_MODE_ANALOG(0U)"));

    let calls = recorder.calls.borrow();
    assert_eq!(calls.len(), 1);
    assert_eq!(calls[0].0, "dma.h");
    assert_eq!(
        calls[0].1,
        vec!["USART1_TX", "USART1_RX", "SPI2_TX", "SPI2_RX", "ADC1"]
    );
    assert_eq!(calls[0].2, "STM32F407xx");
}

#[test]
fn default_dma_listing() {
    let dir = tempfile::tempdir().unwrap();
    let hwdef = HwDef::parse(FMU, &af);

    generate(&hwdef, &Config::default().outdir(dir.path()), &RequestListing).unwrap();

    let dma = fs::read_to_string(dir.path().join("dma.h")).unwrap();
    assert!(dma.contains("#define HAL_DMA_USART1_TX_REQUESTED\n"));
    assert!(dma.contains("#define HAL_DMA_ADC1_REQUESTED\n"));
}

#[test]
fn missing_mcu_writes_nothing() {
    let dir = tempfile::tempdir().unwrap();
    let hwdef = HwDef::parse("PA0 LED OUTPUT\n", &NoAltFunctions);

    let err = generate(&hwdef, &Config::default().outdir(dir.path()), &RequestListing);
    assert!(matches!(err, Err(Error::MissingMcu)));
    assert_eq!(fs::read_dir(dir.path()).unwrap().count(), 0);
}

#[test]
fn unwritable_outdir() {
    let dir = tempfile::tempdir().unwrap();
    let hwdef = HwDef::parse(FMU, &af);
    let config = Config::default().outdir(dir.path().join("does/not/exist"));

    match generate(&hwdef, &config, &RequestListing) {
        Err(Error::Io { path, .. }) => assert_eq!(path, config.pins_path()),
        other => panic!("expected an I/O error, got {:?}", other),
    }
}

#[test]
fn regeneration_is_byte_identical() {
    let first = tempfile::tempdir().unwrap();
    let second = tempfile::tempdir().unwrap();
    let input = first.path().join("hwdef.dat");
    fs::write(&input, FMU).unwrap();

    for dir in [first.path(), second.path()] {
        let hwdef = HwDef::load(&input, &af).unwrap();
        generate(&hwdef, &Config::default().outdir(dir), &RequestListing).unwrap();
    }

    for name in ["pins.h", "dma.h"] {
        assert_eq!(
            fs::read(first.path().join(name)).unwrap(),
            fs::read(second.path().join(name)).unwrap()
        );
    }
}

#[test]
fn duplicate_pin_line() {
    let dir = tempfile::tempdir().unwrap();
    let hwdef = HwDef::parse(
        "MCU STM32F4 STM32F407xx\nPB0 LED_RED OUTPUT LOW\nPB0 LED_GREEN OUTPUT\n",
        &NoAltFunctions,
    );

    generate(&hwdef, &Config::default().outdir(dir.path()), &RequestListing).unwrap();

    let pins = fs::read_to_string(dir.path().join("pins.h")).unwrap();
    assert!(pins.contains("/* PORTB:\n PB0 LED_RED OUTPUT\n PB0 LED_GREEN OUTPUT\n*/"));
    assert!(pins.contains("PIN_ODR_HIGH(0U)"));
    assert!(!pins.contains("PIN_ODR_LOW(0U)"));
    assert_eq!(hwdef.all_pins().len(), 2);
    assert_eq!(hwdef.all_pins()[0].to_string(), "PB0 LED_RED OUTPUT");
}
