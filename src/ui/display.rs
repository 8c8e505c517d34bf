//! ILI9341 frame rendering with `embedded-graphics`.
//!
//! The renderer draws into any RGB565 [`Panel`] (usually a framebuffer
//! that the display driver pushes out over SPI on `flush`) and presents
//! one complete frame per call.

use embedded_graphics::mono_font::ascii::{FONT_6X10, FONT_9X18, FONT_9X18_BOLD};
use embedded_graphics::mono_font::MonoTextStyle;
use embedded_graphics::pixelcolor::Rgb565;
use embedded_graphics::prelude::*;
use embedded_graphics::primitives::{PrimitiveStyle, Rectangle};
use embedded_graphics::text::{Alignment, Baseline, Text, TextStyleBuilder};

use crate::config::{DIALOG_HINT_HEIGHT, DIALOG_MARGIN, DIALOG_TITLE_HEIGHT};
use crate::ui::keyboard::{Board, Key, Keyboard, ShiftState, ROWS};
use crate::ui::menu::Menu;
use crate::ui::{Dialog, Render};

/// A display surface that can present what was drawn into it.
pub trait Panel: DrawTarget<Color = Rgb565> {
    /// Push the drawn frame to the screen.
    fn flush(&mut self) -> Result<(), Self::Error>;
}

const fn rgb(r: u8, g: u8, b: u8) -> Rgb565 {
    Rgb565::new(r >> 3, g >> 2, b >> 3)
}

pub const FOREGROUND: Rgb565 = Rgb565::BLACK;
pub const BACKGROUND: Rgb565 = Rgb565::WHITE;
pub const SHADOW: Rgb565 = rgb(0xC0, 0xC3, 0xC8);
pub const BORDER: Rgb565 = rgb(0x00, 0x00, 0xAA);
pub const TITLE_BACKGROUND: Rgb565 = rgb(0x08, 0x07, 0x64);
pub const TITLE_FOREGROUND: Rgb565 = Rgb565::WHITE;
pub const SELECTION: Rgb565 = rgb(0x00, 0x7F, 0xFF);

const MENU_TITLE_HEIGHT: u32 = 20;
const MENU_ROW_HEIGHT: u32 = 20;
const SHADOW_OFFSET: i32 = 5;
const TEXT_FIELD_HEIGHT: u32 = 24;

/// First visible row so that `position` stays on screen.
pub fn scroll_offset(position: usize, visible_rows: usize) -> usize {
    if visible_rows == 0 {
        0
    } else {
        position.saturating_sub(visible_rows - 1)
    }
}

/// [`Render`] implementation for RGB565 panels.
pub struct GraphicsRenderer<P> {
    panel: P,
}

impl<P: Panel> GraphicsRenderer<P> {
    pub fn new(panel: P) -> Self {
        Self { panel }
    }

    pub fn panel(&self) -> &P {
        &self.panel
    }

    pub fn into_inner(self) -> P {
        self.panel
    }

    fn fill(&mut self, area: Rectangle, color: Rgb565) {
        let _ = area
            .into_styled(PrimitiveStyle::with_fill(color))
            .draw(&mut self.panel);
    }

    fn text(&mut self, text: &str, at: Point, style: MonoTextStyle<'static, Rgb565>) {
        let _ = Text::with_baseline(text, at, style, Baseline::Top).draw(&mut self.panel);
    }

    fn present(&mut self) {
        if self.panel.flush().is_err() {
            #[cfg(feature = "defmt")]
            defmt::warn!("display flush failed");
        }
    }

    fn draw_key(&mut self, label: &str, area: Rectangle, selected: bool, pressed: bool) {
        let color = if selected {
            self.fill(area, if pressed { BORDER } else { SELECTION });
            BACKGROUND
        } else {
            BORDER
        };
        let style = TextStyleBuilder::new()
            .alignment(Alignment::Center)
            .baseline(Baseline::Middle)
            .build();
        let _ = Text::with_text_style(
            label,
            area.center(),
            MonoTextStyle::new(&FONT_9X18, color),
            style,
        )
        .draw(&mut self.panel);
    }
}

fn key_label<'b, const N: usize>(keyboard: &Keyboard<N>, key: Key, buf: &'b mut [u8; 4]) -> &'b str {
    match key {
        Key::Char(c) => keyboard.display_char(c).encode_utf8(buf),
        Key::Shift => match keyboard.shift() {
            ShiftState::Locked => "^^",
            _ => "^",
        },
        Key::Backspace => "<",
        Key::Mode => match keyboard.board() {
            Board::Letters => "12",
            Board::Numbers => "ab",
        },
        Key::Space => "__",
        Key::Accept => "OK",
    }
}

impl<P: Panel> Render for GraphicsRenderer<P> {
    fn draw_menu<A>(&mut self, menu: &Menu<A>) {
        let size = self.panel.bounding_box().size;
        let _ = self.panel.clear(BACKGROUND);

        self.fill(
            Rectangle::new(Point::zero(), Size::new(size.width, MENU_TITLE_HEIGHT)),
            TITLE_BACKGROUND,
        );
        self.text(
            menu.title(),
            Point::new(2, 1),
            MonoTextStyle::new(&FONT_9X18_BOLD, TITLE_FOREGROUND),
        );

        let visible = (size.height.saturating_sub(MENU_TITLE_HEIGHT) / MENU_ROW_HEIGHT) as usize;
        let first = scroll_offset(menu.position(), visible);
        for (index, item) in menu.items().iter().enumerate().skip(first).take(visible) {
            let top = (MENU_TITLE_HEIGHT + (index - first) as u32 * MENU_ROW_HEIGHT) as i32;
            let selected = index == menu.position();
            if selected {
                self.fill(
                    Rectangle::new(Point::new(0, top), Size::new(size.width, MENU_ROW_HEIGHT)),
                    SELECTION,
                );
            }
            let color = if selected { BACKGROUND } else { FOREGROUND };
            self.text(
                item.label.as_str(),
                Point::new(4, top + 1),
                MonoTextStyle::new(&FONT_9X18, color),
            );
        }

        self.present();
    }

    fn draw_keyboard<const N: usize>(&mut self, dialog: &Dialog<'_>, keyboard: &Keyboard<N>) {
        let size = self.panel.bounding_box().size;
        let margin = DIALOG_MARGIN as u32;
        let origin = Point::new(DIALOG_MARGIN, DIALOG_MARGIN);
        let frame = Size::new(
            size.width.saturating_sub(2 * margin),
            size.height.saturating_sub(2 * margin),
        );

        self.fill(
            Rectangle::new(origin + Point::new(SHADOW_OFFSET, SHADOW_OFFSET), frame),
            SHADOW,
        );
        self.fill(Rectangle::new(origin, frame), BACKGROUND);
        let _ = Rectangle::new(origin, frame)
            .into_styled(PrimitiveStyle::with_stroke(BORDER, 1))
            .draw(&mut self.panel);

        // Title bar and hint line.
        self.fill(
            Rectangle::new(origin, Size::new(frame.width, DIALOG_TITLE_HEIGHT)),
            TITLE_BACKGROUND,
        );
        self.text(
            dialog.title,
            origin + Point::new(2, 1),
            MonoTextStyle::new(&FONT_9X18_BOLD, TITLE_FOREGROUND),
        );
        let hint_top = frame.height.saturating_sub(DIALOG_HINT_HEIGHT) as i32;
        self.text(
            dialog.hint,
            origin + Point::new(2, hint_top + 2),
            MonoTextStyle::new(&FONT_6X10, BORDER),
        );

        // Text field: the tail of the content that fits, then the cursor.
        let fits = (frame.width.saturating_sub(4) / 9).saturating_sub(1) as usize;
        let content = keyboard.content();
        let skip = content.chars().count().saturating_sub(fits);
        let shown = content.char_indices().nth(skip).map_or("", |(i, _)| &content[i..]);
        let field_top = DIALOG_TITLE_HEIGHT as i32 + 3;
        let end = Text::with_baseline(
            shown,
            origin + Point::new(2, field_top),
            MonoTextStyle::new(&FONT_9X18, FOREGROUND),
            Baseline::Top,
        )
        .draw(&mut self.panel)
        .unwrap_or(origin);
        self.text("_", end, MonoTextStyle::new(&FONT_9X18, SELECTION));

        // Key grid.
        let grid_top = (DIALOG_TITLE_HEIGHT + TEXT_FIELD_HEIGHT) as i32;
        let grid_height = frame
            .height
            .saturating_sub(DIALOG_TITLE_HEIGHT + TEXT_FIELD_HEIGHT + DIALOG_HINT_HEIGHT);
        let key_height = grid_height / ROWS as u32;
        let (sel_x, sel_y) = keyboard.selection();
        for row in 0..ROWS {
            let len = keyboard.row_len(row);
            if len == 0 {
                continue;
            }
            let key_width = frame.width.saturating_sub(2) / len as u32;
            for column in 0..len {
                let Some(key) = keyboard.key_at(column, row) else {
                    continue;
                };
                let area = Rectangle::new(
                    origin
                        + Point::new(
                            1 + (column as u32 * key_width) as i32,
                            grid_top + (row as u32 * key_height) as i32,
                        ),
                    Size::new(key_width, key_height),
                );
                let selected = (column, row) == (sel_x, sel_y);
                let mut buf = [0u8; 4];
                let label = key_label(keyboard, key, &mut buf);
                self.draw_key(label, area, selected, selected && keyboard.is_pressed());
            }
        }

        self.present();
    }

    fn draw_message(&mut self, message: &str) {
        let _ = self.panel.clear(BACKGROUND);
        self.text(
            message,
            Point::new(4, 4),
            MonoTextStyle::new(&FONT_9X18, FOREGROUND),
        );
        self.present();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::{DISPLAY_HEIGHT, DISPLAY_WIDTH};
    use core::convert::Infallible;
    use embedded_graphics::Pixel;

    struct Framebuffer {
        pixels: std::vec::Vec<Rgb565>,
        flushes: usize,
    }

    impl Framebuffer {
        fn new() -> Self {
            Self {
                pixels: std::vec![Rgb565::BLACK; (DISPLAY_WIDTH * DISPLAY_HEIGHT) as usize],
                flushes: 0,
            }
        }

        fn at(&self, x: i32, y: i32) -> Rgb565 {
            self.pixels[(y as u32 * DISPLAY_WIDTH + x as u32) as usize]
        }
    }

    impl OriginDimensions for Framebuffer {
        fn size(&self) -> Size {
            Size::new(DISPLAY_WIDTH, DISPLAY_HEIGHT)
        }
    }

    impl DrawTarget for Framebuffer {
        type Color = Rgb565;
        type Error = Infallible;

        fn draw_iter<I>(&mut self, pixels: I) -> Result<(), Self::Error>
        where
            I: IntoIterator<Item = Pixel<Rgb565>>,
        {
            for Pixel(p, color) in pixels {
                if p.x >= 0 && p.y >= 0 && (p.x as u32) < DISPLAY_WIDTH && (p.y as u32) < DISPLAY_HEIGHT
                {
                    self.pixels[(p.y as u32 * DISPLAY_WIDTH + p.x as u32) as usize] = color;
                }
            }
            Ok(())
        }
    }

    impl Panel for Framebuffer {
        fn flush(&mut self) -> Result<(), Infallible> {
            self.flushes += 1;
            Ok(())
        }
    }

    #[test]
    fn scroll_keeps_cursor_visible() {
        assert_eq!(scroll_offset(0, 11), 0);
        assert_eq!(scroll_offset(10, 11), 0);
        assert_eq!(scroll_offset(11, 11), 1);
        assert_eq!(scroll_offset(20, 11), 10);
        assert_eq!(scroll_offset(5, 0), 0);
    }

    #[test]
    fn message_clears_and_presents_one_frame() {
        let mut renderer = GraphicsRenderer::new(Framebuffer::new());
        renderer.draw_message("SD card mounted");
        let panel = renderer.into_inner();
        assert_eq!(panel.flushes, 1);
        assert_eq!(panel.at(319, 239), BACKGROUND);
    }

    #[test]
    fn menu_highlights_selected_row() {
        let mut menu = Menu::new("Main menu");
        for label in ["a", "b", "c"] {
            menu.push(label, ()).unwrap();
        }
        menu.navigate_next();

        let mut renderer = GraphicsRenderer::new(Framebuffer::new());
        renderer.draw_menu(&menu);
        let panel = renderer.panel();
        assert_eq!(panel.flushes, 1);
        assert_eq!(panel.at(300, 5), TITLE_BACKGROUND);
        assert_eq!(panel.at(300, 30), BACKGROUND);
        assert_eq!(panel.at(300, 50), SELECTION);
        assert_eq!(panel.at(300, 70), BACKGROUND);
    }

    #[test]
    fn keyboard_dialog_layout() {
        let keyboard: Keyboard<16> = Keyboard::new("alice");
        let dialog = Dialog {
            title: "WiFi SSID",
            hint: "Press HOME to exit",
        };
        let mut renderer = GraphicsRenderer::new(Framebuffer::new());
        renderer.draw_keyboard(&dialog, &keyboard);
        let panel = renderer.panel();

        let right = DISPLAY_WIDTH as i32 - DIALOG_MARGIN;
        let bottom = DISPLAY_HEIGHT as i32 - DIALOG_MARGIN;
        assert_eq!(panel.flushes, 1);
        // Outside the dialog the old frame is kept.
        assert_eq!(panel.at(5, 5), Rgb565::BLACK);
        // Title bar, drop shadow and the highlighted top-left key.
        assert_eq!(panel.at(right - 3, DIALOG_MARGIN + 5), TITLE_BACKGROUND);
        assert_eq!(panel.at(right + 2, bottom + 2), SHADOW);
        let grid_top = DIALOG_MARGIN + (DIALOG_TITLE_HEIGHT + TEXT_FIELD_HEIGHT) as i32;
        assert_eq!(panel.at(DIALOG_MARGIN + 2, grid_top + 1), SELECTION);
    }
}
