//! Rasterizes a [`ReceiptRegion`] onto an opaque white RGB canvas.
//!
//! Text uses the 8x8 bitmap glyphs from `font8x8`, scaled by an integer
//! factor; bold text is drawn twice with a small horizontal offset.
//! Characters without a glyph render as `?`.

use font8x8::{UnicodeFonts, BASIC_FONTS, LATIN_FONTS};
use image::imageops::{self, FilterType};
use image::{DynamicImage, Rgb, RgbImage};

use crate::layout::{
    center_offset, Align, ReceiptRegion, Row, COLUMNS, GLYPH_PX, LOGO_PX, PADDING_PX,
    REGION_WIDTH_PX, RULE_ROW_PX, TEXT_ROW_PX,
};

const WHITE: Rgb<u8> = Rgb([255, 255, 255]);
const INK: Rgb<u8> = Rgb([0, 0, 0]);

/// Dash and gap lengths of a rule, at 1x.
const DASH_PX: u32 = 4;
const GAP_PX: u32 = 3;

/// Smallest and largest supported pixel-density multipliers.
pub const MIN_SCALE: u32 = 2;
pub const MAX_SCALE: u32 = 4;

/// Draws `region` at `scale` device pixels per layout pixel.
///
/// `logo` is drawn wherever the region has a logo row; a region with a logo
/// row and no decoded logo leaves that strip blank.
pub fn rasterize(region: &ReceiptRegion, logo: Option<&DynamicImage>, scale: u32) -> RgbImage {
    let scale = scale.max(1);
    let mut canvas = RgbImage::from_pixel(
        REGION_WIDTH_PX * scale,
        region.height_px() * scale,
        WHITE,
    );

    let mut y = PADDING_PX;
    for row in region.rows() {
        match row {
            Row::Logo { .. } => {
                if let Some(logo) = logo {
                    let x = (REGION_WIDTH_PX - LOGO_PX) / 2;
                    draw_logo(&mut canvas, logo, x * scale, y * scale, LOGO_PX * scale);
                }
            }
            Row::Text { text, align, bold } => {
                let offset = match align {
                    Align::Left => 0,
                    Align::Center => center_offset(text),
                };
                let baseline = y + (TEXT_ROW_PX - GLYPH_PX) / 2;
                for (col, ch) in text.chars().enumerate().take(COLUMNS.saturating_sub(offset)) {
                    let x = PADDING_PX + (offset + col) as u32 * GLYPH_PX;
                    draw_glyph(&mut canvas, ch, x * scale, baseline * scale, scale, *bold);
                }
            }
            Row::Rule => {
                let rule_y = (y + RULE_ROW_PX / 2) * scale;
                draw_rule(&mut canvas, rule_y, scale);
            }
        }
        y += row.height_px();
    }

    canvas
}

fn glyph(ch: char) -> [u8; 8] {
    BASIC_FONTS
        .get(ch)
        .or_else(|| LATIN_FONTS.get(ch))
        .or_else(|| BASIC_FONTS.get('?'))
        .unwrap_or([0; 8])
}

fn draw_glyph(canvas: &mut RgbImage, ch: char, x0: u32, y0: u32, scale: u32, bold: bool) {
    let bitmap = glyph(ch);
    let passes: &[u32] = if bold { &[0, 1] } else { &[0] };
    let bold_shift = (scale / 2).max(1);

    for (gy, bits) in bitmap.iter().enumerate() {
        for gx in 0..8u32 {
            if bits & (1 << gx) == 0 {
                continue;
            }
            for pass in passes {
                let px = x0 + gx * scale + pass * bold_shift;
                let py = y0 + gy as u32 * scale;
                fill(canvas, px, py, scale, scale, INK);
            }
        }
    }
}

fn draw_rule(canvas: &mut RgbImage, y: u32, scale: u32) {
    let start = PADDING_PX * scale;
    let end = (REGION_WIDTH_PX - PADDING_PX) * scale;
    let period = (DASH_PX + GAP_PX) * scale;

    let mut x = start;
    while x < end {
        let len = (DASH_PX * scale).min(end - x);
        fill(canvas, x, y, len, scale.div_ceil(2), INK);
        x += period;
    }
}

/// Scales the logo to a `size` square and blends it over the canvas.
fn draw_logo(canvas: &mut RgbImage, logo: &DynamicImage, x0: u32, y0: u32, size: u32) {
    let scaled = imageops::resize(&logo.to_rgba8(), size, size, FilterType::Triangle);
    for (x, y, px) in scaled.enumerate_pixels() {
        let (cx, cy) = (x0 + x, y0 + y);
        if cx >= canvas.width() || cy >= canvas.height() {
            continue;
        }
        let [r, g, b, a] = px.0;
        let under = canvas.get_pixel(cx, cy).0;
        let blend = |src: u8, dst: u8| -> u8 {
            ((src as u32 * a as u32 + dst as u32 * (255 - a as u32)) / 255) as u8
        };
        canvas.put_pixel(
            cx,
            cy,
            Rgb([blend(r, under[0]), blend(g, under[1]), blend(b, under[2])]),
        );
    }
}

fn fill(canvas: &mut RgbImage, x0: u32, y0: u32, w: u32, h: u32, color: Rgb<u8>) {
    let x1 = (x0 + w).min(canvas.width());
    let y1 = (y0 + h).min(canvas.height());
    for y in y0..y1 {
        for x in x0..x1 {
            canvas.put_pixel(x, y, color);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::layout::Brand;
    use chrono::NaiveDate;
    use image::{Rgba, RgbaImage};
    use struk_core::currency::RupiahFormatter;
    use struk_core::{Draft, DisplayState, LineItem, Money};

    fn region(with_logo: bool) -> ReceiptRegion {
        let draft = Draft {
            customer_name: None,
            notes: None,
            items: vec![LineItem::new("Produk A", 2, Money::from_rupiah(15_000))],
        };
        let brand = Brand {
            logo_url: with_logo.then(|| "http://logo.test/a.png".to_string()),
            ..Brand::default()
        };
        let at = NaiveDate::from_ymd_opt(2026, 1, 2)
            .unwrap()
            .and_hms_opt(3, 4, 5)
            .unwrap();
        ReceiptRegion::build(
            &DisplayState::derive(&draft, None),
            &brand,
            &RupiahFormatter::default(),
            at,
        )
    }

    #[test]
    fn test_canvas_size_follows_scale() {
        let region = region(false);
        let image = rasterize(&region, None, 3);
        assert_eq!(image.width(), 336 * 3);
        assert_eq!(image.height(), region.height_px() * 3);
    }

    #[test]
    fn test_background_is_white_and_text_is_drawn() {
        let image = rasterize(&region(false), None, 2);
        assert_eq!(*image.get_pixel(0, 0), WHITE);
        assert!(image.pixels().any(|p| *p == INK));
    }

    #[test]
    fn test_logo_is_blended_in() {
        let logo = DynamicImage::ImageRgba8(RgbaImage::from_pixel(4, 4, Rgba([255, 0, 0, 255])));
        let image = rasterize(&region(true), Some(&logo), 2);

        let center_x = REGION_WIDTH_PX; // (336 * 2) / 2
        let center_y = (PADDING_PX + LOGO_PX / 2) * 2;
        let [r, g, b] = image.get_pixel(center_x, center_y).0;
        assert!(r > 240 && g < 15 && b < 15, "expected red, got {:?}", (r, g, b));
    }

    #[test]
    fn test_unknown_glyph_falls_back() {
        assert_eq!(glyph('\u{4e2d}'), glyph('?'));
        assert_ne!(glyph('A'), [0; 8]);
    }
}
