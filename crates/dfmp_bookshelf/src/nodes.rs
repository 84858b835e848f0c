//! `.nodes` files: macro names, sizes and terminal flags.
//!
//! ```text
//! UCLA nodes 1.0
//! NumNodes : 3
//! NumTerminals : 1
//!   m0 120 80
//!   m1 60 60
//!   p0 1 1 terminal
//! ```

use crate::error::BookshelfError;
use crate::lines::{content_lines, header_value, parse_token};
use dfmp_model::{Design, Macro};
use std::io::{self, Write};

/// Parses `.nodes` content into a design holding one unplaced macro per
/// node, in file order.
///
/// The `NumNodes` and `NumTerminals` headers are optional; when present and
/// inconsistent with the body, a warning is logged.
pub fn parse_nodes(text: &str, file: &str) -> Result<Design, BookshelfError> {
    let mut design = Design::new();
    let mut declared_nodes = None;
    let mut declared_terminals = None;

    for line in content_lines(text) {
        if let Some(v) = header_value(&line, "NumNodes") {
            declared_nodes = Some(parse_token::<usize>(v, "node count", file, line.number)?);
            continue;
        }
        if let Some(v) = header_value(&line, "NumTerminals") {
            declared_terminals =
                Some(parse_token::<usize>(v, "terminal count", file, line.number)?);
            continue;
        }

        let tokens = line.tokens();
        if tokens.len() < 3 {
            return Err(BookshelfError::parse(
                file,
                line.number,
                "expected 'name width height [terminal]'",
            ));
        }
        let width: f64 = parse_token(tokens[1], "width", file, line.number)?;
        let height: f64 = parse_token(tokens[2], "height", file, line.number)?;
        let fixed = tokens
            .get(3)
            .is_some_and(|t| t.eq_ignore_ascii_case("terminal"));
        design.add_macro(Macro::new(tokens[0], width, height, fixed))?;
    }

    if let Some(n) = declared_nodes.filter(|&n| n != design.macro_count()) {
        log::warn!("{file}: NumNodes says {n}, found {}", design.macro_count());
    }
    if let Some(n) = declared_terminals.filter(|&n| n != design.fixed_count()) {
        log::warn!("{file}: NumTerminals says {n}, found {}", design.fixed_count());
    }

    Ok(design)
}

/// Writes every macro of `design` as a `.nodes` file.
pub fn write_nodes(design: &Design, out: &mut impl Write) -> io::Result<()> {
    writeln!(out, "UCLA nodes 1.0")?;
    writeln!(out)?;
    writeln!(out, "NumNodes : {}", design.macro_count())?;
    writeln!(out, "NumTerminals : {}", design.fixed_count())?;
    for m in design.macros() {
        let (w, h) = m.size();
        if m.is_fixed() {
            writeln!(out, "  {} {w} {h} terminal", m.name())?;
        } else {
            writeln!(out, "  {} {w} {h}", m.name())?;
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    const SAMPLE: &str = "UCLA nodes 1.0\n\
        # generated\n\
        NumNodes : 3\n\
        NumTerminals : 1\n\
        \tm0 120 80\n\
        \tm1 60.5 60\n\
        \tp0 1 1 terminal\n";

    #[test]
    fn parses_sizes_and_terminals() {
        let d = parse_nodes(SAMPLE, "s.nodes").unwrap();
        assert_eq!(d.macro_count(), 3);
        let m1 = d.macro_ref(d.macro_id("m1").unwrap());
        assert_eq!(m1.size(), (60.5, 60.0));
        assert!(!m1.is_fixed());
        assert!(d.macro_ref(d.macro_id("p0").unwrap()).is_fixed());
        assert_eq!(d.fixed_count(), 1);
    }

    #[test]
    fn terminal_keyword_is_case_insensitive() {
        let d = parse_nodes("p 1 1 TERMINAL\n", "t.nodes").unwrap();
        assert!(d.macros()[0].is_fixed());
    }

    #[test]
    fn short_line_is_a_parse_error() {
        let err = parse_nodes("NumNodes : 1\nm0 10\n", "bad.nodes").unwrap_err();
        match err {
            BookshelfError::Parse { line, .. } => assert_eq!(line, 2),
            other => panic!("expected parse error, got {other}"),
        }
    }

    #[test]
    fn bad_width_is_reported() {
        let err = parse_nodes("m0 wide 10\n", "bad.nodes").unwrap_err();
        assert_eq!(format!("{err}"), "bad.nodes:1: invalid width 'wide'");
    }

    #[test]
    fn duplicate_node_is_a_model_error() {
        let err = parse_nodes("m0 1 1\nm0 2 2\n", "dup.nodes").unwrap_err();
        assert!(matches!(err, BookshelfError::Model(_)));
    }

    #[test]
    fn write_then_parse() {
        let d = parse_nodes(SAMPLE, "s.nodes").unwrap();
        let mut buf = Vec::new();
        write_nodes(&d, &mut buf).unwrap();
        let text = String::from_utf8(buf).unwrap();
        assert!(text.contains("NumTerminals : 1"));
        assert!(text.contains("p0 1 1 terminal"));
        let again = parse_nodes(&text, "out.nodes").unwrap();
        assert_eq!(again.macro_count(), 3);
        assert_eq!(again.macros()[1].size(), (60.5, 60.0));
    }
}
