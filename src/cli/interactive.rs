//! Line based checkbox driver.
//!
//! Each command is one checkbox event; the tree is re-rendered after every
//! mutation so the selection is read right after it was written.

use std::io::{self, BufRead, Write};

use tracing::debug;

use crate::application::{render_forest, CheckboxSession, RenderOptions, ToggleEvent};
use crate::domain::{descendant_ids, NodeId};

const HELP: &str = "\
commands:
  s <id>   toggle node and its subtree
  c <id>   toggle node alone (may uncheck its parent)
  d <id>   list node and descendants
  p        print tree
  l        list checked ids
  h        help
  q        quit";

#[derive(Debug, Clone, PartialEq, Eq)]
enum Command {
    Toggle(ToggleEvent),
    Descendants(NodeId),
    Print,
    List,
    Help,
    Quit,
    Empty,
}

fn parse_line(line: &str) -> Result<Command, String> {
    let mut parts = line.split_whitespace();
    let Some(verb) = parts.next() else {
        return Ok(Command::Empty);
    };
    let arg = parts.next();
    if parts.next().is_some() {
        return Err(format!("too many arguments: {}", line.trim()));
    }
    let need_id = |arg: Option<&str>| {
        arg.map(NodeId::from)
            .ok_or_else(|| format!("'{}' needs a node id", verb))
    };
    match verb {
        "s" | "subtree" => Ok(Command::Toggle(ToggleEvent::Subtree(need_id(arg)?))),
        "c" | "child" => Ok(Command::Toggle(ToggleEvent::Child(need_id(arg)?))),
        "d" | "descendants" => Ok(Command::Descendants(need_id(arg)?)),
        "p" | "print" => Ok(Command::Print),
        "l" | "list" => Ok(Command::List),
        "h" | "help" | "?" => Ok(Command::Help),
        "q" | "quit" | "exit" => Ok(Command::Quit),
        other => Err(format!("unknown command: {} (h for help)", other)),
    }
}

/// Read commands from `input` until `q` or end of input.
pub fn run<R: BufRead, W: Write>(
    session: &mut CheckboxSession<'_>,
    opts: &RenderOptions,
    input: R,
    out: &mut W,
) -> io::Result<()> {
    write!(out, "{}", render_forest(session.forest(), session.selection(), opts))?;
    writeln!(out, "{}", HELP)?;

    let mut lines = input.lines();
    loop {
        write!(out, "> ")?;
        out.flush()?;
        let Some(line) = lines.next() else {
            writeln!(out)?;
            return Ok(());
        };
        let line = line?;
        debug!("command: {:?}", line);

        match parse_line(&line) {
            Ok(Command::Toggle(event)) => match session.apply(&event) {
                Some(_) => write!(
                    out,
                    "{}",
                    render_forest(session.forest(), session.selection(), opts)
                )?,
                None => writeln!(out, "no such node: {}", event.id())?,
            },
            Ok(Command::Descendants(id)) => match session.index().get(&id) {
                Some(node) => {
                    for id in descendant_ids(node) {
                        writeln!(out, "{}", id)?;
                    }
                }
                None => writeln!(out, "no such node: {}", id)?,
            },
            Ok(Command::Print) => write!(
                out,
                "{}",
                render_forest(session.forest(), session.selection(), opts)
            )?,
            Ok(Command::List) => {
                let ids: Vec<String> = session
                    .checked_ids()
                    .into_iter()
                    .map(String::from)
                    .collect();
                writeln!(out, "checked: [{}]", ids.join(", "))?;
            }
            Ok(Command::Help) => writeln!(out, "{}", HELP)?,
            Ok(Command::Quit) => return Ok(()),
            Ok(Command::Empty) => {}
            Err(message) => writeln!(out, "{}", message)?,
        }
    }
}
