//! Deck-list format.
//!
//! ```text
//! Deck
//! 4 Lightning Bolt
//! 2 Island
//!
//! Sideboard
//! 2 Pyroblast
//! ```
//!
//! Only the mainboard is read unless the sideboard is enabled in
//! [`IoConfig`]. Lines before any header count as mainboard. Every key read
//! is a [`Card`].

use std::io::{Read, Write};

use super::{StackReader, StackWriter};
use crate::cards::{Card, NamedCard};
use crate::config::IoConfig;
use crate::error::{Result, StackError};
use crate::stack::Stack;

const DECK_HEADER: &str = "Deck";
const SIDEBOARD_HEADER: &str = "Sideboard";

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
enum Section {
    Main,
    Sideboard,
}

/// Reads deck lists into card-keyed stacks.
#[derive(Clone, Debug, Default)]
pub struct DeckListReader {
    include_sideboard: bool,
}

impl DeckListReader {
    #[must_use]
    pub fn new(config: &IoConfig) -> Self {
        Self {
            include_sideboard: config.include_sideboard,
        }
    }

    /// Parse deck-list text.
    pub fn parse(&self, content: &str) -> Result<Stack> {
        let mut section = Section::Main;
        let mut stack = Stack::new();
        let mut lines_read = 0;

        for (index, raw) in content.lines().enumerate() {
            let line_num = index + 1;
            let line = raw.trim();

            if line.is_empty() {
                continue;
            }
            if line.eq_ignore_ascii_case(DECK_HEADER) {
                section = Section::Main;
                continue;
            }
            if line.eq_ignore_ascii_case(SIDEBOARD_HEADER) {
                section = Section::Sideboard;
                continue;
            }

            let (count, name) = parse_card_line(line, line_num)?;
            if section == Section::Sideboard && !self.include_sideboard {
                continue;
            }
            let card = card_at(name, line_num)?;
            stack.try_insert(card.into(), count).map_err(|_| {
                StackError::format(format!("Total card count too large at line {}", line_num))
            })?;
            lines_read += 1;
        }

        log::debug!("Parsed {} deck-list lines", lines_read);
        Ok(stack)
    }
}

impl StackReader for DeckListReader {
    fn read(&self, input: &mut dyn Read) -> Result<Stack> {
        let mut content = String::new();
        input.read_to_string(&mut content)?;
        self.parse(&content)
    }
}

/// Split `<count> <name>` and check the count.
fn parse_card_line(line: &str, line_num: usize) -> Result<(usize, &str)> {
    let (count, name) = line.split_once(char::is_whitespace).ok_or_else(|| {
        StackError::format(format!(
            "Invalid card line format at line {}: '{}'",
            line_num, line
        ))
    })?;

    let invalid = || StackError::format(format!("Invalid count '{}' at line {}", count, line_num));
    // usize::from_str also takes a leading '+'
    if !count.bytes().all(|b| b.is_ascii_digit()) {
        return Err(invalid());
    }
    let count: usize = count.parse().map_err(|_| invalid())?;
    if count == 0 {
        return Err(StackError::format(format!(
            "Count must be positive, got 0 at line {}",
            line_num
        )));
    }

    Ok((count, name.trim()))
}

fn card_at(name: &str, line_num: usize) -> Result<Card> {
    Card::new(name).map_err(|_| {
        StackError::format(format!("Card name cannot be empty at line {}", line_num))
    })
}

/// Writes stacks as deck lists.
///
/// Keys are reduced to names; entries sharing a name are merged.
#[derive(Clone, Debug, Default)]
pub struct DeckListWriter {
    sorted: bool,
}

impl DeckListWriter {
    #[must_use]
    pub fn new(config: &IoConfig) -> Self {
        Self {
            sorted: config.sort_deck_list,
        }
    }

    /// Render a stack as deck-list text.
    #[must_use]
    pub fn format(&self, stack: &Stack) -> String {
        let cards = stack.to_cards();
        let mut lines: Vec<(&str, usize)> = cards.items().map(|(k, c)| (k.name(), c)).collect();
        if self.sorted {
            lines.sort_by(|a, b| a.0.cmp(b.0));
        }

        let mut out = String::from(DECK_HEADER);
        out.push('\n');
        for (name, count) in lines {
            out.push_str(&format!("{} {}\n", count, name));
        }
        out.push('\n');
        out.push_str(SIDEBOARD_HEADER);
        out.push('\n');
        out
    }
}

impl StackWriter for DeckListWriter {
    fn write(&self, stack: &Stack, output: &mut dyn Write) -> Result<()> {
        output.write_all(self.format(stack).as_bytes())?;
        Ok(())
    }
}
