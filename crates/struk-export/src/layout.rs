//! # Receipt Region Layout
//!
//! Lays the displayed receipt out as a thermal-printer strip of fixed-width
//! rows. The same region feeds the text preview and the rasterizer, so what
//! `show` prints is what `export` captures.
//!
//! ## Region Anatomy (38 columns)
//! ```text
//! ┌──────────────────────────────────────────┐
//! │                 [logo]                   │  Row::Logo
//! │                VELLIXAO                  │  bold, centered
//! │              085706400133                │  centered
//! │ - - - - - - - - - - - - - - - - - - - -  │  Row::Rule
//! │ Tanggal           19/10/2026, 14.05.09   │
//! │ No. Struk                         0007   │
//! │ Pelanggan                         Budi   │
//! │ - - - - - - - - - - - - - - - - - - - -  │
//! │ Produk A                2x   Rp 15.000   │  name wraps, qty, unit price
//! │ Produk B                1x    Rp 5.000   │
//! │ - - - - - - - - - - - - - - - - - - - -  │
//! │ Total                        Rp 35.000   │  bold
//! │ Catatan: -                               │
//! │ - - - - - - - - - - - - - - - - - - - -  │
//! │             Terima kasih!                │
//! │   Barang sudah diterima dengan baik.     │
//! └──────────────────────────────────────────┘
//! ```
//!
//! Interactive controls never appear here: a region is built only from the
//! display state and the brand.

use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};
use struk_core::currency::RupiahFormatter;
use struk_core::DisplayState;

// =============================================================================
// Geometry (1x, in pixels)
// =============================================================================

/// Monospace columns per row.
pub const COLUMNS: usize = 38;

/// Glyph cell size.
pub const GLYPH_PX: u32 = 8;

/// Padding around the content.
pub const PADDING_PX: u32 = 16;

/// Region width: `COLUMNS` glyph cells plus padding on both sides.
pub const REGION_WIDTH_PX: u32 = COLUMNS as u32 * GLYPH_PX + 2 * PADDING_PX;

/// Height of one text row (glyph plus leading).
pub const TEXT_ROW_PX: u32 = 12;

/// Height of a dashed rule row.
pub const RULE_ROW_PX: u32 = 8;

/// Logo edge length.
pub const LOGO_PX: u32 = 48;

/// Space below the logo.
pub const LOGO_MARGIN_PX: u32 = 8;

const CUSTOMER_COLS: usize = 20;
const QTY_COLS: usize = 6;
const PRICE_COLS: usize = 14;
const MIN_NAME_COLS: usize = 6;
const ELLIPSIS: &str = "...";

const DATE_FORMAT: &str = "%d/%m/%Y, %H.%M.%S";

// =============================================================================
// Brand
// =============================================================================

/// Shop identity printed on every receipt.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Brand {
    pub name: String,
    pub phone: String,
    /// Logo image URL; `None` prints no logo row.
    pub logo_url: Option<String>,
    /// Document kind used in export file names.
    pub receipt_kind: String,
}

impl Default for Brand {
    fn default() -> Self {
        Brand {
            name: "VELLIXAO".to_string(),
            phone: "085706400133".to_string(),
            logo_url: Some("https://files.catbox.moe/a9u0pd.png".to_string()),
            receipt_kind: "Struk".to_string(),
        }
    }
}

// =============================================================================
// Rows
// =============================================================================

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Align {
    Left,
    Center,
}

/// One horizontal strip of the region.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Row {
    Logo { url: String },
    Text { text: String, align: Align, bold: bool },
    Rule,
}

impl Row {
    fn left(text: impl Into<String>) -> Self {
        Row::Text {
            text: text.into(),
            align: Align::Left,
            bold: false,
        }
    }

    fn centered(text: impl Into<String>) -> Self {
        Row::Text {
            text: text.into(),
            align: Align::Center,
            bold: false,
        }
    }

    fn bold(text: impl Into<String>, align: Align) -> Self {
        Row::Text {
            text: text.into(),
            align,
            bold: true,
        }
    }

    /// Row height at 1x.
    pub fn height_px(&self) -> u32 {
        match self {
            Row::Logo { .. } => LOGO_PX + LOGO_MARGIN_PX,
            Row::Text { .. } => TEXT_ROW_PX,
            Row::Rule => RULE_ROW_PX,
        }
    }
}

// =============================================================================
// Region
// =============================================================================

/// The capturable receipt: a laid-out, control-free list of rows.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ReceiptRegion {
    rows: Vec<Row>,
}

impl ReceiptRegion {
    /// Lays out `display` under `brand`, stamped with `printed_at`.
    pub fn build(
        display: &DisplayState<'_>,
        brand: &Brand,
        formatter: &RupiahFormatter,
        printed_at: NaiveDateTime,
    ) -> Self {
        let mut rows = Vec::new();

        // Header
        if let Some(url) = brand.logo_url.as_deref().filter(|u| !u.trim().is_empty()) {
            rows.push(Row::Logo {
                url: url.trim().to_string(),
            });
        }
        rows.push(Row::bold(fit(&brand.name, COLUMNS), Align::Center));
        rows.push(Row::centered(fit(&brand.phone, COLUMNS)));
        rows.push(Row::Rule);

        // Meta
        rows.push(Row::left(spread(
            "Tanggal",
            &printed_at.format(DATE_FORMAT).to_string(),
        )));
        rows.push(Row::left(spread("No. Struk", &display.number_label())));
        let customer = display.customer_name.filter(|c| !c.is_empty()).unwrap_or("-");
        rows.push(Row::left(spread("Pelanggan", &fit(customer, CUSTOMER_COLS))));
        rows.push(Row::Rule);

        // Items
        if display.items.is_empty() {
            rows.push(Row::centered("Belum ada item"));
        }
        for item in display.items {
            let right = format!(
                "{:>qty$}{:>price$}",
                format!("{}x", item.quantity()),
                formatter.format(item.unit_price()),
                qty = QTY_COLS,
                price = PRICE_COLS,
            );
            let name_cols = COLUMNS
                .saturating_sub(right.chars().count() + 1)
                .max(MIN_NAME_COLS);
            let mut lines = wrap(item.name(), name_cols).into_iter();
            let first = lines.next().unwrap_or_default();
            rows.push(Row::left(fit(
                &format!("{:<width$} {}", first, right, width = name_cols),
                COLUMNS,
            )));
            rows.extend(lines.map(Row::left));
        }
        rows.push(Row::Rule);

        // Totals and notes
        rows.push(Row::bold(
            spread("Total", &formatter.format(display.total)),
            Align::Left,
        ));
        let notes = display.notes.filter(|n| !n.is_empty()).unwrap_or("-");
        rows.extend(wrap(&format!("Catatan: {}", notes), COLUMNS).into_iter().map(Row::left));
        rows.push(Row::Rule);

        // Footer
        rows.push(Row::centered("Terima kasih!"));
        rows.push(Row::centered("Barang sudah diterima dengan baik."));

        ReceiptRegion { rows }
    }

    pub fn rows(&self) -> &[Row] {
        &self.rows
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    /// URL of the logo row, if the region has one.
    pub fn logo_url(&self) -> Option<&str> {
        self.rows.iter().find_map(|row| match row {
            Row::Logo { url } => Some(url.as_str()),
            _ => None,
        })
    }

    /// Region height at 1x, padding included.
    pub fn height_px(&self) -> u32 {
        2 * PADDING_PX + self.rows.iter().map(Row::height_px).sum::<u32>()
    }

    /// Plain-text rendering, one line per row.
    pub fn to_text(&self) -> String {
        let mut out = String::new();
        for row in &self.rows {
            let line = match row {
                Row::Logo { .. } => center("[logo]"),
                Row::Text {
                    text,
                    align: Align::Center,
                    ..
                } => center(text),
                Row::Text { text, .. } => text.clone(),
                Row::Rule => "-".repeat(COLUMNS),
            };
            out.push_str(line.trim_end());
            out.push('\n');
        }
        out
    }
}

// =============================================================================
// Text Helpers
// =============================================================================

/// Columns of leading space that center `text` in a row.
pub fn center_offset(text: &str) -> usize {
    COLUMNS.saturating_sub(text.chars().count()) / 2
}

fn center(text: &str) -> String {
    format!("{}{}", " ".repeat(center_offset(text)), text)
}

/// Cuts `text` to `width` characters, marking the cut with an ellipsis.
fn fit(text: &str, width: usize) -> String {
    if text.chars().count() <= width {
        return text.to_string();
    }
    if width < ELLIPSIS.len() {
        return text.chars().take(width).collect();
    }
    let keep = width.saturating_sub(ELLIPSIS.len());
    let mut out: String = text.chars().take(keep).collect();
    out.push_str(ELLIPSIS);
    out
}

/// `left` and `right` on one row, pushed to opposite edges.
fn spread(left: &str, right: &str) -> String {
    let right = fit(right, COLUMNS);
    let room = COLUMNS.saturating_sub(right.chars().count() + 1);
    let left = fit(left, room);
    let gap = COLUMNS.saturating_sub(left.chars().count() + right.chars().count());
    format!("{}{}{}", left, " ".repeat(gap), right)
}

/// Word-wraps `text` to `width` columns, hard-breaking longer words.
fn wrap(text: &str, width: usize) -> Vec<String> {
    let width = width.max(1);
    let mut lines = Vec::new();
    let mut line = String::new();

    for word in text.split_whitespace() {
        let mut word: Vec<char> = word.chars().collect();
        let used = line.chars().count();

        if used > 0 && used + 1 + word.len() <= width {
            line.push(' ');
            line.extend(word.iter());
            continue;
        }
        if used > 0 {
            lines.push(std::mem::take(&mut line));
        }
        while word.len() > width {
            let rest = word.split_off(width);
            lines.push(word.into_iter().collect());
            word = rest;
        }
        line.extend(word.iter());
    }

    if !line.is_empty() || lines.is_empty() {
        lines.push(line);
    }
    lines
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;
    use struk_core::{ConfirmedReceipt, Draft, LineItem, Money};

    fn printed_at() -> NaiveDateTime {
        NaiveDate::from_ymd_opt(2026, 10, 19)
            .unwrap()
            .and_hms_opt(14, 5, 9)
            .unwrap()
    }

    fn draft() -> Draft {
        Draft {
            customer_name: Some("Budi".to_string()),
            notes: None,
            items: vec![
                LineItem::new("Produk A", 2, Money::from_rupiah(15_000)),
                LineItem::new("Produk B", 1, Money::from_rupiah(5_000)),
            ],
        }
    }

    fn region(draft: &Draft, confirmed: Option<&ConfirmedReceipt>) -> ReceiptRegion {
        let display = DisplayState::derive(draft, confirmed);
        ReceiptRegion::build(
            &display,
            &Brand::default(),
            &RupiahFormatter::default(),
            printed_at(),
        )
    }

    fn texts(region: &ReceiptRegion) -> Vec<String> {
        region
            .rows()
            .iter()
            .filter_map(|row| match row {
                Row::Text { text, .. } => Some(text.clone()),
                _ => None,
            })
            .collect()
    }

    #[test]
    fn test_region_width() {
        assert_eq!(REGION_WIDTH_PX, 336);
    }

    #[test]
    fn test_confirmed_region_content() {
        let draft = draft();
        let receipt = ConfirmedReceipt {
            number: 7,
            customer_name: None,
            notes: None,
            items: draft.items.clone(),
            total: Money::from_rupiah(35_000),
        };
        let region = region(&draft, Some(&receipt));
        let text = region.to_text();

        assert!(text.contains("19/10/2026, 14.05.09"));
        assert!(text.contains("0007"));
        assert!(text.contains("Budi"));
        assert!(text.contains("Rp 35.000"));
        assert!(text.contains("Catatan: -"));
        assert!(text.contains("Terima kasih!"));
        assert_eq!(region.logo_url(), Some("https://files.catbox.moe/a9u0pd.png"));
    }

    #[test]
    fn test_every_text_row_fits() {
        let mut draft = draft();
        draft.customer_name = Some("A very long customer name indeed".to_string());
        draft.notes = Some("word ".repeat(30));
        draft.items.push(LineItem::new(
            "Supercalifragilisticexpialidocious deluxe edition",
            4_294_967_295,
            Money::from_rupiah(999_999_999),
        ));
        let region = region(&draft, None);

        for text in texts(&region) {
            assert!(text.chars().count() <= COLUMNS, "row too wide: {:?}", text);
        }
    }

    #[test]
    fn test_item_row_layout() {
        let region = region(&draft(), None);
        let rows = texts(&region);
        let item = rows.iter().find(|t| t.starts_with("Produk A")).unwrap();
        assert!(item.ends_with("2x     Rp 15.000"));
        assert_eq!(item.chars().count(), COLUMNS);
    }

    #[test]
    fn test_empty_draft_shows_placeholder() {
        let region = region(&Draft::default(), None);
        let text = region.to_text();
        assert!(text.contains("Belum ada item"));
        assert!(text.contains("DRAFT"));
        assert!(text.contains("Pelanggan"));
        assert!(text.contains("Rp 0"));
    }

    #[test]
    fn test_no_logo_row_without_url() {
        let brand = Brand {
            logo_url: None,
            ..Brand::default()
        };
        let draft = draft();
        let display = DisplayState::derive(&draft, None);
        let region = ReceiptRegion::build(&display, &brand, &RupiahFormatter::default(), printed_at());
        assert_eq!(region.logo_url(), None);
        assert!(matches!(region.rows()[0], Row::Text { bold: true, .. }));
    }

    #[test]
    fn test_wrap() {
        assert_eq!(wrap("Produk A", 18), vec!["Produk A"]);
        assert_eq!(wrap("aa bb cc", 5), vec!["aa bb", "cc"]);
        assert_eq!(wrap("abcdefgh", 3), vec!["abc", "def", "gh"]);
        assert_eq!(wrap("", 5), vec![""]);
    }

    #[test]
    fn test_fit_and_spread() {
        assert_eq!(fit("Budi", 20), "Budi");
        assert_eq!(fit("abcdefghij", 6), "abc...");
        let row = spread("Total", "Rp 35.000");
        assert_eq!(row.chars().count(), COLUMNS);
        assert!(row.starts_with("Total "));
        assert!(row.ends_with("Rp 35.000"));
    }

    #[test]
    fn test_fit_narrow_widths() {
        assert_eq!(fit("abcdef", 2), "ab");
        assert_eq!(fit("abcdef", 0), "");
        assert_eq!(fit("abcdef", 3), "...");
    }

    #[test]
    fn test_spread_with_oversized_right_side() {
        let right = "9".repeat(40);
        let row = spread("Total", &right);
        assert_eq!(row.chars().count(), COLUMNS);
        assert!(row.ends_with("..."));

        let row = spread("Total", &"9".repeat(COLUMNS - 1));
        assert_eq!(row.chars().count(), COLUMNS);
        assert!(row.starts_with(' '));
    }
}
