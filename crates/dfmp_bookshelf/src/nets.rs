//! `.nets` files: net membership, port directions and offsets.
//!
//! ```text
//! UCLA nets 1.0
//! NumNets : 1
//! NumPins : 2
//! NetDegree : 2 n0
//!   m0 O : 10 0
//!   m1 I : -5 2.5
//! ```
//!
//! Offsets are relative to the macro's center. A pin line without offsets
//! places the port at the center.

use crate::error::BookshelfError;
use crate::lines::{content_lines, header_value, parse_token, Line};
use dfmp_model::{Design, ModelError, NetId, PortDirection, Vector2};
use std::io::{self, Write};

/// A net whose pins are still being read.
struct OpenNet {
    id: NetId,
    name: String,
    declared: usize,
    seen: usize,
}

impl OpenNet {
    fn close(self, file: &str) -> Result<(), BookshelfError> {
        if self.declared == self.seen {
            Ok(())
        } else {
            Err(BookshelfError::DegreeMismatch {
                file: file.to_string(),
                net: self.name,
                declared: self.declared,
                actual: self.seen,
            })
        }
    }
}

/// Adds the nets of `.nets` content to `design`, connecting the macros it
/// already holds.
pub fn parse_nets(text: &str, file: &str, design: &mut Design) -> Result<(), BookshelfError> {
    let mut declared_pins = None;
    let mut open: Option<OpenNet> = None;

    for line in content_lines(text) {
        if header_value(&line, "NumNets").is_some() {
            continue;
        }
        if let Some(v) = header_value(&line, "NumPins") {
            declared_pins = Some(parse_token::<usize>(v, "pin count", file, line.number)?);
            continue;
        }
        if let Some(v) = header_value(&line, "NetDegree") {
            if let Some(prev) = open.take() {
                prev.close(file)?;
            }
            open = Some(open_net(v, file, line.number, design)?);
            continue;
        }

        let Some(net) = open.as_mut() else {
            return Err(BookshelfError::parse(
                file,
                line.number,
                "pin listed before any NetDegree line",
            ));
        };
        add_pin(&line, file, net.id, design)?;
        net.seen += 1;
    }

    if let Some(last) = open {
        last.close(file)?;
    }

    let pins = design.pin_count();
    if let Some(n) = declared_pins.filter(|&n| n != pins) {
        log::warn!("{file}: NumPins says {n}, found {pins}");
    }
    Ok(())
}

fn open_net(
    header: &str,
    file: &str,
    line: usize,
    design: &mut Design,
) -> Result<OpenNet, BookshelfError> {
    let mut tokens = header.split_whitespace();
    let declared = match tokens.next() {
        Some(t) => parse_token::<usize>(t, "net degree", file, line)?,
        None => return Err(BookshelfError::parse(file, line, "missing net degree")),
    };
    let name = match tokens.next() {
        Some(name) => name.to_string(),
        None => format!("net{}", design.net_count()),
    };
    let id = design.add_net(name.clone())?;
    Ok(OpenNet {
        id,
        name,
        declared,
        seen: 0,
    })
}

fn add_pin(
    line: &Line<'_>,
    file: &str,
    net: NetId,
    design: &mut Design,
) -> Result<(), BookshelfError> {
    let (lhs, rhs) = match line.text.split_once(':') {
        Some((lhs, rhs)) => (lhs, Some(rhs)),
        None => (line.text, None),
    };

    let mut pin = lhs.split_whitespace();
    let (Some(macro_name), Some(dir)) = (pin.next(), pin.next()) else {
        return Err(BookshelfError::parse(
            file,
            line.number,
            "expected 'macro I|O|B : dx dy'",
        ));
    };
    let direction: PortDirection = dir
        .parse()
        .map_err(|e: ModelError| BookshelfError::parse(file, line.number, e.to_string()))?;

    let offset = match rhs.map(|r| r.split_whitespace().collect::<Vec<_>>()) {
        None => Vector2::zeros(),
        Some(xy) if xy.len() == 2 => Vector2::new(
            parse_token(xy[0], "x offset", file, line.number)?,
            parse_token(xy[1], "y offset", file, line.number)?,
        ),
        Some(_) => {
            return Err(BookshelfError::parse(
                file,
                line.number,
                "expected two offsets after ':'",
            ))
        }
    };

    let macro_id = design.require_macro(macro_name)?;
    design.connect(net, macro_id, direction, offset)?;
    Ok(())
}

/// Writes every net of `design` with its pins grouped by direction.
pub fn write_nets(design: &Design, out: &mut impl Write) -> io::Result<()> {
    writeln!(out, "UCLA nets 1.0")?;
    writeln!(out)?;
    writeln!(out, "NumNets : {}", design.net_count())?;
    writeln!(out, "NumPins : {}", design.pin_count())?;
    for net in design.nets() {
        writeln!(out, "NetDegree : {} {}", net.degree(), net.name())?;
        for (direction, pin) in net.all_pins() {
            let m = design.macro_ref(pin.macro_id);
            let offset = m.port(pin.port).offset;
            writeln!(
                out,
                "\t{} {} : {} {}",
                m.name(),
                direction.code(),
                offset.x,
                offset.y
            )?;
        }
    }
    Ok(())
}
