//! The Run Length Encoded pattern format.

use super::Pattern;
use crate::{
    error::{Error, Result},
    rule::Rule,
    universe::Universe,
};
use regex::Regex;
use std::{fmt::Write, sync::OnceLock};

/// The `x = …, y = …[, rule = …]` line.
fn header_regex() -> &'static Regex {
    static HEADER: OnceLock<Regex> = OnceLock::new();
    HEADER.get_or_init(|| {
        Regex::new(r"^x\s*=\s*(?P<x>[^,]+),\s*y\s*=\s*(?P<y>[^,]+)(?:,\s*rule\s*=\s*(?P<rule>.+))?$")
            .unwrap()
    })
}

pub(super) fn is_header(line: &str) -> bool {
    header_regex().is_match(line)
}

pub(super) fn parse(lines: &[String]) -> Result<Pattern> {
    let mut universe = Universe::new();
    let mut name = String::new();
    let mut author = String::new();
    let mut comment = String::new();
    let mut rule = Rule::GAME_OF_LIFE;
    let mut saw_header = false;
    let (mut x, mut y): (i64, i64) = (0, 0);
    // a `$` before the first written cell is ignored
    let mut wrote_cell = false;

    'lines: for line in lines {
        let line = line.trim();
        if line.is_empty() {
            continue;
        }

        if let Some(rest) = line.strip_prefix('#') {
            let mut chars = rest.chars();
            match chars.next() {
                Some('N') => name = chars.as_str().trim().to_owned(),
                Some('O') => author = chars.as_str().trim().to_owned(),
                Some('C' | 'c') => {
                    if !comment.is_empty() {
                        comment.push('\n');
                    }
                    comment.push_str(chars.as_str().trim());
                }
                _ => {}
            }
            continue;
        }

        if !saw_header && line.starts_with('x') {
            let captures = header_regex()
                .captures(line)
                .ok_or_else(|| Error::InvalidHeader(line.to_owned()))?;
            for extent in ["x", "y"] {
                captures[extent]
                    .trim()
                    .parse::<i64>()
                    .map_err(|_| Error::InvalidHeader(line.to_owned()))?;
            }
            if let Some(text) = captures.name("rule") {
                rule = text.as_str().trim().parse()?;
            }
            saw_header = true;
            continue;
        }

        let bytes = line.as_bytes();
        let mut i = 0;
        while i < bytes.len() {
            let mut count: i64 = 0;
            while bytes[i].is_ascii_digit() {
                count = count * 10 + i64::from(bytes[i] - b'0');
                i += 1;
                if i >= bytes.len() {
                    continue 'lines;
                }
            }
            let count = if count == 0 { 1 } else { count };

            match bytes[i] {
                b'b' => {
                    x += count;
                    wrote_cell = true;
                }
                b'$' => {
                    if wrote_cell {
                        y += count;
                        x = 0;
                    }
                }
                b'!' => break 'lines,
                c if c.is_ascii_whitespace() => {}
                c if c.is_ascii_alphabetic() => {
                    for _ in 0..count {
                        universe.set((x, y), 1);
                        x += 1;
                    }
                    wrote_cell = true;
                }
                c => {
                    return Err(Error::UnexpectedCharacter {
                        character: char::from(c),
                        line: line.to_owned(),
                    })
                }
            }
            i += 1;
        }
    }

    universe.set_reset_snapshot();
    Ok(Pattern {
        universe,
        name,
        author,
        comment,
        rule,
    })
}

pub(super) fn encode(pattern: &Pattern) -> String {
    let mut out = String::new();
    if !pattern.name.is_empty() {
        writeln!(out, "#N {}", pattern.name).unwrap();
    }
    if !pattern.author.is_empty() {
        writeln!(out, "#O {}", pattern.author).unwrap();
    }
    for line in pattern.comment.lines() {
        writeln!(out, "#C {line}").unwrap();
    }

    let bounds = pattern.universe.filled_bounds();
    writeln!(
        out,
        "x = {}, y = {}, rule = {}",
        bounds.width().max(0),
        bounds.height().max(0),
        pattern.rule
    )
    .unwrap();

    let cells = pattern.universe.to_cells();
    let mut gap = 0;
    let mut first = true;
    for row in &cells {
        let width = row.len() - row.iter().rev().take_while(|&&cell| cell == 0).count();
        if width == 0 {
            gap += 1;
            continue;
        }
        if first {
            first = false;
        } else {
            push_run(&mut out, gap, '$');
            out.push('\n');
        }
        let mut i = 0;
        while i < width {
            let run_end = row[i..width]
                .iter()
                .position(|&cell| cell != row[i])
                .map_or(width, |n| i + n);
            push_run(&mut out, run_end - i, if row[i] == 0 { 'b' } else { 'o' });
            i = run_end;
        }
        gap = 1;
    }
    out.push('!');
    out.push('\n');
    out
}

fn push_run(out: &mut String, count: usize, tag: char) {
    if count > 1 {
        write!(out, "{count}").unwrap();
    }
    out.push(tag);
}

#[cfg(test)]
mod tests {
    use super::*;

    fn live_cells(pattern: &Pattern) -> Vec<(i64, i64)> {
        let mut cells = Vec::new();
        pattern.universe.visit(|p| cells.push(p));
        cells.sort_unstable();
        cells
    }

    const GLIDER: &[(i64, i64)] = &[(0, 2), (1, 0), (1, 2), (2, 1), (2, 2)];

    #[test]
    fn glider() {
        let pattern =
            Pattern::decode_rle(&b"x = 3, y = 3, rule = B3/S23\nbob$2bo$3o!\n"[..]).unwrap();
        assert_eq!(live_cells(&pattern), GLIDER);
        assert_eq!(pattern.rule, Rule::GAME_OF_LIFE);
        assert_eq!(pattern.name, "");
        assert_eq!(pattern.author, "");
        assert_eq!(pattern.comment, "");
        assert_eq!(pattern.universe.to_cells(), [[0, 1, 0], [0, 0, 1], [1, 1, 1]]);
    }

    #[test]
    fn metadata() {
        let input = b"#N Gosper glider gun\n\
            #O Bill Gosper\n\
            #C The first known gun.\n\
            #C Emits a glider every 30 generations.\n\
            x = 3, y = 3\n\
            3o!\n";
        let pattern = Pattern::decode_rle(&input[..]).unwrap();
        assert_eq!(pattern.name, "Gosper glider gun");
        assert_eq!(pattern.author, "Bill Gosper");
        assert_eq!(
            pattern.comment,
            "The first known gun.\nEmits a glider every 30 generations."
        );
    }

    #[test]
    fn header_rule_variants() {
        for (header, want) in [
            ("x = 3, y = 3", Rule::GAME_OF_LIFE),
            ("x = 3, y = 3, rule = B3/S23", Rule::GAME_OF_LIFE),
            ("x = 3, y = 3, rule = 23/3", Rule::GAME_OF_LIFE),
            ("x=3,y=3,rule=b36/s23", Rule::HIGH_LIFE),
            ("x  =  3 , y  =  3", Rule::GAME_OF_LIFE),
        ] {
            let input = format!("{header}\n3o!\n");
            let pattern = Pattern::decode_rle(input.as_bytes()).unwrap();
            assert_eq!(pattern.rule, want, "header {header:?}");
            assert_eq!(pattern.universe.population(), 3, "header {header:?}");
        }
    }

    #[test]
    fn invalid_headers() {
        for input in ["x = 3\n3o!\n", "x = three, y = 3\n3o!\n"] {
            assert!(
                matches!(
                    Pattern::decode_rle(input.as_bytes()),
                    Err(Error::InvalidHeader(_))
                ),
                "input {input:?}"
            );
        }
    }

    #[test]
    fn unsupported_header_rule() {
        assert!(matches!(
            Pattern::decode_rle(&b"x = 3, y = 3, rule = B3/S2A\n3o!\n"[..]),
            Err(Error::UnsupportedRule(_))
        ));
    }

    #[test]
    fn multi_digit_runs() {
        let pattern = Pattern::decode_rle(&b"x = 24, y = 2\n24o$12b12o!\n"[..]).unwrap();
        assert_eq!(pattern.universe.population(), 36);
        assert!(pattern.universe.get((23, 0)));
        assert!(!pattern.universe.get((11, 1)));
        assert!(pattern.universe.get((12, 1)));
    }

    #[test]
    fn leading_row_advance_is_ignored() {
        let leading = Pattern::decode_rle(&b"x = 3, y = 3\n$3o!\n"[..]).unwrap();
        let plain = Pattern::decode_rle(&b"x = 3, y = 3\n3o!\n"[..]).unwrap();
        assert_eq!(live_cells(&leading), live_cells(&plain));
    }

    #[test]
    fn data_may_exceed_the_declared_extents() {
        let pattern = Pattern::decode_rle(&b"x = 1, y = 1\n5o$5o!\n"[..]).unwrap();
        assert_eq!(pattern.universe.population(), 10);
    }

    #[test]
    fn missing_terminator_is_tolerated() {
        let pattern = Pattern::decode_rle(&b"x = 3, y = 3\nbob$2bo$3o\n"[..]).unwrap();
        assert_eq!(live_cells(&pattern), GLIDER);
    }

    #[test]
    fn data_after_terminator_is_ignored() {
        let pattern = Pattern::decode_rle(&b"x = 3, y = 3\n3o!3o$3o\n"[..]).unwrap();
        assert_eq!(pattern.universe.population(), 3);
    }

    #[test]
    fn unexpected_character() {
        match Pattern::decode_rle(&b"x = 3, y = 3\n3o%$3o!\n"[..]) {
            Err(Error::UnexpectedCharacter { character, line }) => {
                assert_eq!(character, '%');
                assert_eq!(line, "3o%$3o!");
            }
            Err(err) => panic!("wrong error: {err}"),
            Ok(_) => panic!("expected an error"),
        }
    }

    #[test]
    fn snapshot_is_taken() {
        let mut pattern =
            Pattern::decode_rle(&b"x = 3, y = 3\nbob$2bo$3o!\n"[..]).unwrap();
        pattern.universe.step(Rule::GAME_OF_LIFE, 4);
        pattern.universe.reset();
        assert_eq!(live_cells(&pattern), GLIDER);
    }

    #[test]
    fn encode_glider() {
        let pattern =
            Pattern::decode_rle(&b"#N Glider\nx = 3, y = 3, rule = B3/S23\nbob$2bo$3o!\n"[..])
                .unwrap();
        // trailing dead cells are dropped from each row
        assert_eq!(
            pattern.encode_rle(),
            "#N Glider\nx = 3, y = 3, rule = B3/S23\nbo$\n2bo$\n3o!\n"
        );
    }

    #[test]
    fn encode_compresses_blank_rows() {
        let pattern = Pattern::decode_rle(&b"x = 1, y = 3\no2$o!\n"[..]).unwrap();
        assert_eq!(pattern.encode_rle(), "x = 1, y = 3, rule = B3/S23\no2$\no!\n");
    }

    #[test]
    fn encode_decode_round_trip() {
        let lwss = b"#N LWSS\n#O John Conway\nx = 5, y = 4\nbo2bo$o4b$o3bo$4o!\n";
        let pattern = Pattern::decode_rle(&lwss[..]).unwrap();
        let reparsed = Pattern::decode_rle(pattern.encode_rle().as_bytes()).unwrap();
        assert_eq!(reparsed.name, "LWSS");
        assert_eq!(reparsed.author, "John Conway");
        assert_eq!(reparsed.rule, pattern.rule);
        assert_eq!(live_cells(&reparsed), live_cells(&pattern));
    }

    #[test]
    fn encode_empty_universe() {
        let pattern = Pattern::default();
        assert_eq!(pattern.encode_rle(), "x = 0, y = 0, rule = B/S\n!\n");
    }
}
