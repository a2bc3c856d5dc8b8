//! Cosmetic cell formatting applied to freshly appended rows.

use std::fmt;

use serde::{Deserialize, Serialize};

use super::r#trait::ProductRow;

pub const TIMESTAMP_PATTERN: &str = "yyyy-mm-dd hh:mm:ss";
pub const CURRENCY_PATTERN: &str = "$#,##0.00";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Align {
    Left,
    Center,
    Right,
}

/// Per-row presentation: number formats plus the quantity cell alignment.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RowFormat {
    pub timestamp_pattern: String,
    pub price_pattern: String,
    pub quantity_align: Align,
}

impl Default for RowFormat {
    fn default() -> Self {
        Self {
            timestamp_pattern: TIMESTAMP_PATTERN.to_string(),
            price_pattern: CURRENCY_PATTERN.to_string(),
            quantity_align: Align::Center,
        }
    }
}

impl RowFormat {
    /// Render the row's cells as they would be displayed.
    ///
    /// Only the patterns above are understood; anything else falls back to the
    /// raw value.
    pub fn render(&self, row: &ProductRow) -> RenderedRow {
        let timestamp = if self.timestamp_pattern == TIMESTAMP_PATTERN {
            row.timestamp.format("%Y-%m-%d %H:%M:%S").to_string()
        } else {
            row.timestamp.to_rfc3339()
        };

        let price = match self.price_pattern.strip_suffix("#,##0.00") {
            Some(symbol) => format_currency(row.price, symbol),
            None => row.price.to_string(),
        };

        RenderedRow {
            cells: [
                timestamp,
                row.barcode.clone(),
                row.name.clone(),
                row.description.clone(),
                price,
                row.quantity.to_string(),
            ],
            quantity_align: self.quantity_align,
        }
    }
}

/// Display strings for one row, in header order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RenderedRow {
    pub cells: [String; 6],
    pub quantity_align: Align,
}

impl fmt::Display for RenderedRow {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.cells.join(" | "))
    }
}

/// `1234.5` with `"$"` becomes `"$1,234.50"`.
pub fn format_currency(amount: f64, symbol: &str) -> String {
    let cents = (amount.abs() * 100.0).round() as u64;
    let whole = (cents / 100).to_string();
    let frac = cents % 100;

    let mut grouped = String::with_capacity(whole.len() + whole.len() / 3);
    for (i, ch) in whole.chars().enumerate() {
        if i > 0 && (whole.len() - i) % 3 == 0 {
            grouped.push(',');
        }
        grouped.push(ch);
    }

    let sign = if amount < 0.0 && cents > 0 { "-" } else { "" };
    format!("{sign}{symbol}{grouped}.{frac:02}")
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{TimeZone, Utc};

    fn row(price: f64) -> ProductRow {
        ProductRow {
            timestamp: Utc.with_ymd_and_hms(2026, 3, 4, 5, 6, 7).unwrap(),
            barcode: "123".into(),
            name: "Widget".into(),
            description: String::new(),
            price,
            quantity: 3,
        }
    }

    #[test]
    fn currency_groups_thousands() {
        assert_eq!(format_currency(0.0, "$"), "$0.00");
        assert_eq!(format_currency(19.99, "$"), "$19.99");
        assert_eq!(format_currency(1234.5, "$"), "$1,234.50");
        assert_eq!(format_currency(1234567.891, "$"), "$1,234,567.89");
        assert_eq!(format_currency(-12.5, "$"), "-$12.50");
    }

    #[test]
    fn default_format_renders_sheet_cells() {
        let rendered = RowFormat::default().render(&row(1999.0));
        assert_eq!(rendered.cells[0], "2026-03-04 05:06:07");
        assert_eq!(rendered.cells[4], "$1,999.00");
        assert_eq!(rendered.cells[5], "3");
        assert_eq!(rendered.quantity_align, Align::Center);
    }
}
