//! ST7735 TFT adapter.
//!
//! Drives the panel through `mipidsi` over the ESP-IDF SPI master,
//! rendering text and rectangles with `embedded-graphics`.  Implements
//! [`DisplayPort`] so the domain never sees the driver types.  On host
//! builds every call degrades to a trace log.

use crate::app::ports::DisplayPort;

#[cfg(target_os = "espidf")]
mod esp {
    use super::DisplayPort;
    use crate::error::Error;
    use crate::pins;
    use embedded_graphics::mono_font::{ascii::FONT_6X10, MonoTextStyle};
    use embedded_graphics::pixelcolor::raw::RawU16;
    use embedded_graphics::pixelcolor::Rgb565;
    use embedded_graphics::prelude::*;
    use embedded_graphics::primitives::{PrimitiveStyle, Rectangle};
    use embedded_graphics::text::{Baseline, Text};
    use esp_idf_hal::delay::FreeRtos;
    use esp_idf_hal::gpio::{AnyOutputPin, Output, PinDriver};
    use esp_idf_hal::spi::{
        config::Config as SpiConfig, SpiDeviceDriver, SpiDriver, SpiDriverConfig, SPI2,
    };
    use esp_idf_hal::units::Hertz;
    use log::warn;
    use mipidsi::interface::SpiInterface;
    use mipidsi::models::ST7735s;
    use mipidsi::options::{Orientation, Rotation};

    type PanelInterface = SpiInterface<
        'static,
        SpiDeviceDriver<'static, SpiDriver<'static>>,
        PinDriver<'static, AnyOutputPin, Output>,
    >;
    type Panel = mipidsi::Display<PanelInterface, ST7735s, PinDriver<'static, AnyOutputPin, Output>>;

    /// Panel adapter plus the cursor/colour state the text API needs.
    pub struct St7735Display {
        panel: Panel,
        cursor: (u16, u16),
        text_color: Rgb565,
    }

    impl St7735Display {
        /// Bring up the SPI bus and initialise the panel.
        pub fn new(
            spi: SPI2,
            sclk: esp_idf_hal::gpio::AnyIOPin,
            sdo: esp_idf_hal::gpio::AnyIOPin,
            cs: esp_idf_hal::gpio::AnyOutputPin,
            dc: esp_idf_hal::gpio::AnyOutputPin,
            rst: esp_idf_hal::gpio::AnyOutputPin,
        ) -> Result<Self, Error> {
            let driver = SpiDriver::new(
                spi,
                sclk,
                sdo,
                None::<esp_idf_hal::gpio::AnyIOPin>,
                &SpiDriverConfig::new(),
            )
            .map_err(|_| Error::Init("SPI bus"))?;

            let config = SpiConfig::new().baudrate(Hertz(pins::TFT_SPI_FREQ_HZ));
            let device = SpiDeviceDriver::new(driver, Some(cs), &config)
                .map_err(|_| Error::Init("SPI device"))?;

            let dc = PinDriver::output(dc).map_err(|_| Error::Init("DC pin"))?;
            let rst = PinDriver::output(rst).map_err(|_| Error::Init("RST pin"))?;

            // mipidsi needs a scratch buffer for pixel batching.
            let scratch = Box::leak(Box::new([0u8; 512]));
            let interface = SpiInterface::new(device, dc, scratch);

            let mut delay = FreeRtos;
            let panel = mipidsi::Builder::new(ST7735s, interface)
                .display_size(128, 160)
                .orientation(Orientation::new().rotate(Rotation::Deg90))
                .reset_pin(rst)
                .init(&mut delay)
                .map_err(|_| Error::Init("panel init"))?;

            Ok(Self {
                panel,
                cursor: (0, 0),
                text_color: Rgb565::WHITE,
            })
        }

        fn color(raw: u16) -> Rgb565 {
            Rgb565::from(RawU16::new(raw))
        }
    }

    impl DisplayPort for St7735Display {
        fn fill_screen(&mut self, color: u16) {
            if self.panel.clear(Self::color(color)).is_err() {
                warn!("display: clear failed");
            }
        }

        fn fill_rect(&mut self, x: u16, y: u16, w: u16, h: u16, color: u16) {
            Rectangle::new(
                Point::new(i32::from(x), i32::from(y)),
                Size::new(u32::from(w), u32::from(h)),
            )
            .into_styled(PrimitiveStyle::with_fill(Self::color(color)))
            .draw(&mut self.panel)
            .ok();
        }

        fn set_cursor(&mut self, x: u16, y: u16) {
            self.cursor = (x, y);
        }

        fn set_text_color(&mut self, color: u16) {
            self.text_color = Self::color(color);
        }

        fn print(&mut self, text: &str) {
            let style = MonoTextStyle::new(&FONT_6X10, self.text_color);
            let origin = Point::new(i32::from(self.cursor.0), i32::from(self.cursor.1));
            Text::with_baseline(text, origin, style, Baseline::Top)
                .draw(&mut self.panel)
                .ok();
        }

        fn blit(&mut self, x: u16, y: u16, w: u16, h: u16, pixels: &[u16]) {
            debug_assert_eq!(pixels.len(), usize::from(w) * usize::from(h));
            let colors = pixels.iter().map(|&raw| Self::color(raw));
            if self
                .panel
                .set_pixels(x, y, x + w - 1, y + h - 1, colors)
                .is_err()
            {
                warn!("display: blit failed");
            }
        }
    }
}

#[cfg(target_os = "espidf")]
pub use esp::St7735Display;

// ── Simulation ────────────────────────────────────────────────

#[cfg(not(target_os = "espidf"))]
pub struct St7735Display;

#[cfg(not(target_os = "espidf"))]
impl St7735Display {
    pub fn new() -> Result<Self, crate::error::Error> {
        log::info!("display(sim): no panel attached");
        Ok(Self)
    }
}

#[cfg(not(target_os = "espidf"))]
impl DisplayPort for St7735Display {
    fn fill_screen(&mut self, color: u16) {
        log::trace!("display(sim): fill_screen {color:#06x}");
    }

    fn fill_rect(&mut self, x: u16, y: u16, w: u16, h: u16, color: u16) {
        log::trace!("display(sim): fill_rect ({x},{y}) {w}x{h} {color:#06x}");
    }

    fn set_cursor(&mut self, _x: u16, _y: u16) {}

    fn set_text_color(&mut self, _color: u16) {}

    fn print(&mut self, text: &str) {
        log::trace!("display(sim): print {text:?}");
    }

    fn blit(&mut self, x: u16, y: u16, w: u16, h: u16, pixels: &[u16]) {
        log::trace!("display(sim): blit ({x},{y}) {w}x{h} ({} px)", pixels.len());
    }
}
