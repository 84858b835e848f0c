//! `.scl` files: placement rows, used here only to derive the layout bounds.
//!
//! ```text
//! UCLA scl 1.0
//! NumRows : 1
//! CoreRow Horizontal
//!   Coordinate   : 459
//!   Height       : 12
//!   Sitewidth    : 1
//!   Sitespacing  : 1
//!   Siteorient   : 1
//!   Sitesymmetry : 1
//!   SubrowOrigin : 459  NumSites : 10692
//! End
//! ```

use crate::error::BookshelfError;
use crate::lines::{content_lines, parse_token};
use dfmp_model::Bounds;

/// One placement row.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Row {
    /// Bottom edge of the row.
    pub coordinate: f64,
    /// Row height.
    pub height: f64,
    /// Width of one site.
    pub site_width: f64,
    /// Left edge of the row.
    pub subrow_origin: f64,
    /// Number of sites in the row.
    pub num_sites: f64,
}

impl Default for Row {
    fn default() -> Self {
        Self {
            coordinate: 0.0,
            height: 0.0,
            site_width: 1.0,
            subrow_origin: 0.0,
            num_sites: 0.0,
        }
    }
}

impl Row {
    /// Returns the x coordinate of the row's right edge.
    pub fn right(&self) -> f64 {
        self.subrow_origin + self.num_sites * self.site_width
    }

    /// Returns the y coordinate of the row's top edge.
    pub fn top(&self) -> f64 {
        self.coordinate + self.height
    }
}

/// Parses the `CoreRow ... End` blocks of `.scl` content.
pub fn parse_scl(text: &str, file: &str) -> Result<Vec<Row>, BookshelfError> {
    let mut rows = Vec::new();
    let mut current: Option<Row> = None;

    for line in content_lines(text) {
        let tokens = line.tokens();
        match tokens.first().copied() {
            Some(t) if t.eq_ignore_ascii_case("CoreRow") => {
                if current.is_some() {
                    return Err(BookshelfError::parse(file, line.number, "CoreRow without End"));
                }
                current = Some(Row::default());
            }
            Some(t) if t.eq_ignore_ascii_case("End") => match current.take() {
                Some(row) => rows.push(row),
                None => return Err(BookshelfError::parse(file, line.number, "End without CoreRow")),
            },
            _ => {
                if let Some(row) = current.as_mut() {
                    apply_fields(row, &tokens, file, line.number)?;
                }
            }
        }
    }

    if current.is_some() {
        return Err(BookshelfError::parse(
            file,
            text.lines().count(),
            "unterminated CoreRow",
        ));
    }
    Ok(rows)
}

/// Reads `Key : value` pairs from a row line. Several pairs may share a line.
fn apply_fields(
    row: &mut Row,
    tokens: &[&str],
    file: &str,
    line: usize,
) -> Result<(), BookshelfError> {
    for pair in tokens.chunks(3) {
        let [key, ":", value] = pair else {
            return Err(BookshelfError::parse(
                file,
                line,
                format!("expected 'key : value', found '{}'", pair.join(" ")),
            ));
        };
        let field = match key.to_ascii_lowercase().as_str() {
            "coordinate" => &mut row.coordinate,
            "height" => &mut row.height,
            "sitewidth" => &mut row.site_width,
            "subroworigin" => &mut row.subrow_origin,
            "numsites" => &mut row.num_sites,
            _ => continue,
        };
        *field = parse_token(value, key, file, line)?;
    }
    Ok(())
}

/// Returns `(0, max right edge, 0, max top edge)` over all rows, or `None`
/// when there are no rows.
pub fn rows_bounds(rows: &[Row]) -> Option<Bounds> {
    if rows.is_empty() {
        return None;
    }
    let max_x = rows.iter().map(Row::right).fold(f64::MIN, f64::max);
    let max_y = rows.iter().map(Row::top).fold(f64::MIN, f64::max);
    Some(Bounds::new(0.0, max_x, 0.0, max_y))
}
