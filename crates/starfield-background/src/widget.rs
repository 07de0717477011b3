//! Terminal presentation of a [`PixelCanvas`].

use ratatui::{buffer::Buffer, layout::Rect, widgets::Widget};

use crate::raster::PixelCanvas;

/// Glyph whose foreground fills the top half of a cell.
const UPPER_HALF: &str = "▀";

/// Paints a canvas into a buffer, two raster rows per terminal row.
///
/// The upper raster pixel becomes the cell's foreground and the lower one
/// its background, both composited over black. Cells outside the canvas
/// are left untouched.
#[derive(Debug, Clone, Copy)]
pub struct StarfieldView<'a> {
    canvas: &'a PixelCanvas,
}

impl<'a> StarfieldView<'a> {
    pub fn new(canvas: &'a PixelCanvas) -> Self {
        Self { canvas }
    }
}

impl Widget for StarfieldView<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let (columns, rows) = self.canvas.resolution();
        for y in 0..area.height {
            let top_row = u32::from(y) * 2;
            if top_row >= rows {
                break;
            }
            for x in 0..area.width {
                let column = u32::from(x);
                if column >= columns {
                    break;
                }
                let Some(top) = self.canvas.pixel(column, top_row) else {
                    continue;
                };
                let bottom = self.canvas.pixel(column, top_row + 1).unwrap_or(top);
                if let Some(cell) = buf.cell_mut((area.x + x, area.y + y)) {
                    cell.set_symbol(UPPER_HALF)
                        .set_fg(top.to_color())
                        .set_bg(bottom.to_color());
                }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use ratatui::style::Color;
    use starfield_core::Size;

    use crate::color::Rgba;
    use crate::surface::{DrawSurface, Paint};

    #[test]
    fn test_half_block_mapping() {
        let mut canvas = PixelCanvas::new(Size::new(2, 4), 1);
        canvas.fill_rect(
            starfield_core::Rect::new(0.0, 0.0, 2.0, 1.0),
            &Paint::Solid(Rgba::rgb(200, 0, 0)),
        );
        canvas.fill_rect(
            starfield_core::Rect::new(0.0, 1.0, 2.0, 1.0),
            &Paint::Solid(Rgba::rgb(0, 0, 200)),
        );

        let area = Rect::new(0, 0, 2, 2);
        let mut buf = Buffer::empty(area);
        StarfieldView::new(&canvas).render(area, &mut buf);

        let cell = &buf[(0, 0)];
        assert_eq!(cell.symbol(), UPPER_HALF);
        assert_eq!(cell.fg, Color::Rgb(200, 0, 0));
        assert_eq!(cell.bg, Color::Rgb(0, 0, 200));

        let lower = &buf[(1, 1)];
        assert_eq!(lower.fg, Color::Rgb(0, 0, 0));
        assert_eq!(lower.bg, Color::Rgb(0, 0, 0));
    }

    #[test]
    fn test_area_larger_than_canvas() {
        let canvas = PixelCanvas::new(Size::new(1, 2), 1);
        let area = Rect::new(0, 0, 3, 3);
        let mut buf = Buffer::empty(area);
        StarfieldView::new(&canvas).render(area, &mut buf);
        assert_eq!(buf[(0, 0)].symbol(), UPPER_HALF);
        assert_eq!(buf[(1, 0)].symbol(), " ");
        assert_eq!(buf[(0, 1)].symbol(), " ");
    }

    #[test]
    fn test_odd_row_count_repeats_top() {
        let mut canvas = PixelCanvas::new(Size::new(1, 1), 1);
        canvas.fill_rect(
            starfield_core::Rect::new(0.0, 0.0, 1.0, 1.0),
            &Paint::Solid(Rgba::rgb(10, 20, 30)),
        );
        let area = Rect::new(0, 0, 1, 1);
        let mut buf = Buffer::empty(area);
        StarfieldView::new(&canvas).render(area, &mut buf);
        assert_eq!(buf[(0, 0)].fg, Color::Rgb(10, 20, 30));
        assert_eq!(buf[(0, 0)].bg, Color::Rgb(10, 20, 30));
    }

    #[test]
    fn test_respects_area_offset() {
        let canvas = PixelCanvas::new(Size::new(1, 2), 1);
        let mut buf = Buffer::empty(Rect::new(0, 0, 3, 3));
        StarfieldView::new(&canvas).render(Rect::new(2, 1, 1, 1), &mut buf);
        assert_eq!(buf[(2, 1)].symbol(), UPPER_HALF);
        assert_eq!(buf[(0, 0)].symbol(), " ");
    }
}
