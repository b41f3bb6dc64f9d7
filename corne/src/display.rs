//! Layer status line for the OLED screen.
//!
//! The primary half shows `Layer: <label>`, the secondary half shows nothing and is
//! mounted upside down.

use heapless::String;

use crate::layer_state::ActiveLayerSet;

/// Label shown when no labelled layer is active
pub const DEFAULT_LABEL: &str = "Alpha";

/// Prefix of the status line
pub const LAYER_PREFIX: &str = "Layer: ";

/// Chars of a line on a 128px wide screen with a 6px font
pub const LINE_WIDTH: usize = 21;

/// Label of the active layer with the highest priority, the same order the keymap resolves keys in.
///
/// `labels` is indexed by layer, an empty label lets lower layers show through.
pub fn layer_label(layers: &ActiveLayerSet, labels: &[&'static str]) -> &'static str {
    layers
        .iter_by_priority()
        .filter_map(|layer| labels.get(layer as usize).copied())
        .find(|label| !label.is_empty())
        .unwrap_or(DEFAULT_LABEL)
}

/// Line oriented text output, implemented by the display driver
pub trait TextWriter {
    type Error;

    /// Write text at the cursor
    fn write(&mut self, text: &str) -> Result<(), Self::Error>;

    /// Write text at the cursor and move the cursor to the next line
    fn write_line(&mut self, text: &str) -> Result<(), Self::Error>;
}

/// Role of this half of a split keyboard
pub trait SplitRole {
    /// The half which is connected to the host
    fn is_primary_half(&self) -> bool;
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum SplitSide {
    Primary,
    Secondary,
}

impl SplitRole for SplitSide {
    fn is_primary_half(&self) -> bool {
        *self == SplitSide::Primary
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum DisplayRotation {
    Rotate0,
    Rotate180,
}

#[cfg(feature = "ssd1306")]
impl From<DisplayRotation> for ssd1306::prelude::DisplayRotation {
    fn from(rotation: DisplayRotation) -> Self {
        match rotation {
            DisplayRotation::Rotate0 => ssd1306::prelude::DisplayRotation::Rotate0,
            DisplayRotation::Rotate180 => ssd1306::prelude::DisplayRotation::Rotate180,
        }
    }
}

/// Renders the layer status line. The line buffer is reused by every refresh.
pub struct StatusDisplay {
    labels: &'static [&'static str],
    line: String<LINE_WIDTH>,
}

impl StatusDisplay {
    pub fn new(labels: &'static [&'static str]) -> Self {
        Self {
            labels,
            line: String::new(),
        }
    }

    /// Status line of the last render
    pub fn line(&self) -> &str {
        &self.line
    }

    /// Rotation of the screen, the secondary half is flipped
    pub fn rotation(role: &impl SplitRole, default: DisplayRotation) -> DisplayRotation {
        if role.is_primary_half() {
            default
        } else {
            DisplayRotation::Rotate180
        }
    }

    pub fn render<W: TextWriter>(
        &mut self,
        layers: &ActiveLayerSet,
        role: &impl SplitRole,
        writer: &mut W,
    ) -> Result<(), W::Error> {
        if !role.is_primary_half() {
            return Ok(());
        }

        self.line.clear();
        let label = layer_label(layers, self.labels);
        // Truncate labels which don't fit in the line
        for c in LAYER_PREFIX.chars().chain(label.chars()) {
            if self.line.push(c).is_err() {
                break;
            }
        }

        writer.write(LAYER_PREFIX)?;
        writer.write_line(&self.line[LAYER_PREFIX.len()..])
    }
}

#[cfg(feature = "display")]
pub use self::graphics::GraphicsTextWriter;

#[cfg(feature = "display")]
mod graphics {
    use embedded_graphics::mono_font::MonoTextStyle;
    use embedded_graphics::mono_font::ascii::FONT_6X10;
    use embedded_graphics::pixelcolor::BinaryColor;
    use embedded_graphics::prelude::*;
    use embedded_graphics::primitives::{PrimitiveStyle, Rectangle};
    use embedded_graphics::text::{Baseline, Text};

    use super::TextWriter;

    const ROW_HEIGHT: i32 = 10;

    /// Writes text lines on any binary color `DrawTarget`, like an SSD1306 in buffered mode.
    pub struct GraphicsTextWriter<'d, D: DrawTarget<Color = BinaryColor>> {
        target: &'d mut D,
        cursor: Point,
    }

    impl<'d, D: DrawTarget<Color = BinaryColor>> GraphicsTextWriter<'d, D> {
        pub fn new(target: &'d mut D) -> Self {
            Self {
                target,
                cursor: Point::zero(),
            }
        }

        pub fn cursor(&self) -> Point {
            self.cursor
        }

        /// Move the cursor back to the top left corner
        pub fn home(&mut self) {
            self.cursor = Point::zero();
        }

        fn clear_row(&mut self) -> Result<(), D::Error> {
            let width = self.target.bounding_box().size.width;
            Rectangle::new(Point::new(0, self.cursor.y), Size::new(width, ROW_HEIGHT as u32))
                .into_styled(PrimitiveStyle::with_fill(BinaryColor::Off))
                .draw(&mut *self.target)
        }
    }

    impl<'d, D: DrawTarget<Color = BinaryColor>> TextWriter for GraphicsTextWriter<'d, D> {
        type Error = D::Error;

        fn write(&mut self, text: &str) -> Result<(), Self::Error> {
            if self.cursor.x == 0 {
                self.clear_row()?;
            }
            let style = MonoTextStyle::new(&FONT_6X10, BinaryColor::On);
            self.cursor = Text::with_baseline(text, self.cursor, style, Baseline::Top).draw(&mut *self.target)?;
            Ok(())
        }

        fn write_line(&mut self, text: &str) -> Result<(), Self::Error> {
            self.write(text)?;
            self.cursor = Point::new(0, self.cursor.y + ROW_HEIGHT);
            Ok(())
        }
    }
}
