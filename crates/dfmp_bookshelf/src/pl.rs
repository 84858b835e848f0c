//! `.pl` files: macro positions, orientations and fixed flags.
//!
//! Each entry is `name x y : orientation [/FIXED]`. The orientation is either
//! numeric degrees (`0`, `90`, `180`, `270`) or a compass code (`N`, `W`,
//! `S`, `E`); it may be omitted along with the colon.

use crate::error::BookshelfError;
use crate::lines::{content_lines, parse_token};
use dfmp_model::{Design, Orientation};
use std::io::{self, Write};

/// Applies `.pl` content to the macros already in `design`.
///
/// Every entry must name a known macro. `/FIXED` marks the macro fixed; an
/// entry without it leaves the flag from the `.nodes` file unchanged.
pub fn parse_pl(text: &str, file: &str, design: &mut Design) -> Result<(), BookshelfError> {
    for line in content_lines(text) {
        let tokens = line.tokens();
        if tokens.len() < 3 {
            return Err(BookshelfError::parse(
                file,
                line.number,
                "expected 'name x y : orientation'",
            ));
        }
        let id = design.require_macro(tokens[0])?;
        let x: f64 = parse_token(tokens[1], "x coordinate", file, line.number)?;
        let y: f64 = parse_token(tokens[2], "y coordinate", file, line.number)?;

        let mut orientation = None;
        let mut fixed = false;
        for token in &tokens[3..] {
            match *token {
                ":" => {}
                t if t.starts_with("/FIXED") => fixed = true,
                t => {
                    let o = t
                        .parse::<Orientation>()
                        .map_err(|e| BookshelfError::parse(file, line.number, e.to_string()))?;
                    orientation = Some(o);
                }
            }
        }

        let m = design.macro_mut(id);
        m.set_position(x, y);
        if let Some(o) = orientation {
            m.set_orientation(o);
        }
        if fixed {
            m.set_fixed(true);
        }
    }
    Ok(())
}

/// Writes the position, snapped orientation and fixed flag of every macro.
pub fn write_pl(design: &Design, out: &mut impl Write) -> io::Result<()> {
    writeln!(out, "UCLA pl 1.0")?;
    writeln!(out)?;
    for m in design.macros() {
        let p = m.position();
        write!(out, "{} {} {} : {}", m.name(), p.x, p.y, m.orientation())?;
        if m.is_fixed() {
            write!(out, " /FIXED")?;
        }
        writeln!(out)?;
    }
    Ok(())
}
