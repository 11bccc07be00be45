use nom::{
    character::complete::{alpha1, digit1, space0, space1},
    combinator::{all_consuming, map_res, opt},
    multi::many0,
    sequence::{delimited, preceded, tuple},
    IResult,
};
use serde::Deserialize;
use std::collections::HashMap;

use crate::error::{Error, ErrorKind, Result};

/// Command names, as written out or bound to an alias in the key map.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Action {
    Next,
    Prev,
    Today,
    Click,
    Items,
    Quit,
}

pub type KeyMap = HashMap<String, Action>;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Cmd {
    Noop,
    NextMonth(u32),
    PrevMonth(u32),
    Today,
    Click(usize, usize),
    Items(u32),
    Exit,
}

const ACTIONS: [(&str, Action); 6] = [
    ("next", Action::Next),
    ("prev", Action::Prev),
    ("today", Action::Today),
    ("click", Action::Click),
    ("items", Action::Items),
    ("quit", Action::Quit),
];

pub fn default_key_map() -> KeyMap {
    let mut keys = KeyMap::new();
    keys.insert("n".to_owned(), Action::Next);
    keys.insert("p".to_owned(), Action::Prev);
    keys.insert("t".to_owned(), Action::Today);
    keys.insert("c".to_owned(), Action::Click);
    keys.insert("i".to_owned(), Action::Items);
    keys.insert("q".to_owned(), Action::Quit);
    keys
}

fn number(input: &str) -> IResult<&str, u32> {
    map_res(digit1, str::parse::<u32>)(input)
}

// [count] word [arg ...]
fn command_line(input: &str) -> IResult<&str, (Option<u32>, &str, Vec<u32>)> {
    all_consuming(delimited(
        space0,
        tuple((
            opt(number),
            preceded(space0, alpha1),
            many0(preceded(space1, number)),
        )),
        space0,
    ))(input)
}

fn resolve(word: &str, keys: &KeyMap) -> Option<Action> {
    let word = word.to_lowercase();
    ACTIONS
        .iter()
        .find(|(name, _)| *name == word)
        .map(|(_, action)| *action)
        .or_else(|| keys.get(&word).copied())
}

fn usage_error(line: &str, usage: &str) -> Error {
    Error::new(
        ErrorKind::ParseError,
        &format!("'{}': usage: {}", line.trim(), usage),
    )
}

/// Parses one line of input into a command. Blank lines are [`Cmd::Noop`].
pub fn parse_cmd(line: &str, keys: &KeyMap) -> Result<Cmd> {
    if line.trim().is_empty() {
        return Ok(Cmd::Noop);
    }

    let (_, (count, word, args)) = command_line(line)?;

    let action = resolve(word, keys).ok_or_else(|| {
        Error::new(
            ErrorKind::ParseError,
            &format!("unknown command '{}'", word),
        )
    })?;

    match (action, count, args.as_slice()) {
        (Action::Next, count, []) => Ok(Cmd::NextMonth(count.unwrap_or(1))),
        (Action::Prev, count, []) => Ok(Cmd::PrevMonth(count.unwrap_or(1))),
        (Action::Today, None, []) => Ok(Cmd::Today),
        (Action::Click, None, [row, col]) => Ok(Cmd::Click(*row as usize, *col as usize)),
        (Action::Items, None, [day]) => Ok(Cmd::Items(*day)),
        (Action::Quit, None, []) => Ok(Cmd::Exit),
        (Action::Next, _, _) => Err(usage_error(line, "[count] next")),
        (Action::Prev, _, _) => Err(usage_error(line, "[count] prev")),
        (Action::Today, _, _) => Err(usage_error(line, "today")),
        (Action::Click, _, _) => Err(usage_error(line, "click <row> <column>")),
        (Action::Items, _, _) => Err(usage_error(line, "items <day>")),
        (Action::Quit, _, _) => Err(usage_error(line, "quit")),
    }
}
