//! The plaintext pattern format.

use super::Pattern;
use crate::{
    error::{Error, Result},
    rule::Rule,
    universe::Universe,
};

pub(super) fn parse(lines: &[String]) -> Result<Pattern> {
    let mut universe = Universe::new();
    let mut name = String::new();
    let mut author = String::new();
    let mut comment = String::new();
    let mut y: i64 = 0;

    for line in lines {
        if let Some(rest) = line.strip_prefix('!') {
            if let Some(text) = rest.strip_prefix("Name:") {
                name = text.trim().to_owned();
            } else if let Some(text) = rest.strip_prefix("Author:") {
                author = text.trim().to_owned();
            } else {
                let text = rest.trim();
                if !text.is_empty() {
                    if !comment.is_empty() {
                        comment.push('\n');
                    }
                    comment.push_str(text);
                }
            }
            continue;
        }

        for (x, c) in line.trim_end().chars().enumerate() {
            match c {
                '.' => {}
                'O' | '*' => universe.set((x as i64, y), 1),
                _ => {
                    return Err(Error::UnexpectedCharacter {
                        character: c,
                        line: line.clone(),
                    })
                }
            }
        }
        y += 1;
    }

    universe.set_reset_snapshot();
    Ok(Pattern {
        universe,
        name,
        author,
        comment,
        rule: Rule::GAME_OF_LIFE,
    })
}

pub(super) fn encode(pattern: &Pattern) -> String {
    let mut out = String::new();
    if !pattern.name.is_empty() {
        out.push_str("!Name: ");
        out.push_str(&pattern.name);
        out.push('\n');
    }
    if !pattern.author.is_empty() {
        out.push_str("!Author: ");
        out.push_str(&pattern.author);
        out.push('\n');
    }
    for line in pattern.comment.lines() {
        out.push('!');
        out.push_str(line);
        out.push('\n');
    }
    for row in pattern.universe.to_cells() {
        for cell in row {
            out.push(if cell == 0 { '.' } else { 'O' });
        }
        out.push('\n');
    }
    out
}
