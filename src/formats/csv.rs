//! CSV collection format.
//!
//! ```text
//! Count,Card Name,Set Name,Collector Number,Foil,Price
//! 1,Lightning Bolt,Beta,161,false,100.00
//! ```
//!
//! `Count` and `Card Name` are required; the other columns are optional and
//! extra columns are ignored. Every key read is a [`Print`].

use std::io::{Read, Write};
use std::str::FromStr;

use ::csv::{ReaderBuilder, StringRecord, Trim, WriterBuilder};
use rust_decimal::Decimal;

use super::{StackReader, StackWriter};
use crate::cards::print::parse_flag;
use crate::cards::{CardKey, NamedCard, Price, Print, PrintIdentity};
use crate::config::IoConfig;
use crate::error::{Result, StackError};
use crate::stack::Stack;

const COUNT: &str = "Count";
const CARD_NAME: &str = "Card Name";
const SET_NAME: &str = "Set Name";
const COLLECTOR_NUMBER: &str = "Collector Number";
const FOIL: &str = "Foil";
const PRICE: &str = "Price";

/// Column order used when writing.
pub const HEADER: [&str; 6] = [COUNT, CARD_NAME, SET_NAME, COLLECTOR_NUMBER, FOIL, PRICE];

/// Column positions found in a header row.
#[derive(Debug)]
struct Columns {
    count: usize,
    name: usize,
    set: Option<usize>,
    collector_number: Option<usize>,
    foil: Option<usize>,
    price: Option<usize>,
}

impl Columns {
    fn locate(headers: &StringRecord) -> Result<Self> {
        let find = |column: &str| headers.iter().position(|h| h == column);
        let require = |column: &str| {
            find(column).ok_or_else(|| {
                StackError::format(format!("Missing required CSV column '{}'", column))
            })
        };

        Ok(Self {
            count: require(COUNT)?,
            name: require(CARD_NAME)?,
            set: find(SET_NAME),
            collector_number: find(COLLECTOR_NUMBER),
            foil: find(FOIL),
            price: find(PRICE),
        })
    }
}

/// Reads CSV collections into print-keyed stacks.
#[derive(Clone, Debug, Default)]
pub struct CsvReader {
    identity: PrintIdentity,
}

impl CsvReader {
    #[must_use]
    pub fn new(config: &IoConfig) -> Self {
        Self {
            identity: config.print_identity(),
        }
    }

    fn parse_row(&self, record: &StringRecord, columns: &Columns, row: usize) -> Result<(Print, usize)> {
        let cell = |index: Option<usize>| index.and_then(|i| record.get(i)).unwrap_or("");

        let count = parse_count(cell(Some(columns.count)), row)?;

        let name = cell(Some(columns.name));
        if name.is_empty() {
            return Err(StackError::format(format!(
                "Card name cannot be empty at row {}",
                row
            )));
        }

        let foil = match cell(columns.foil) {
            "" => false,
            raw => parse_flag(raw).ok_or_else(|| {
                StackError::format(format!("Invalid foil '{}' at row {}", raw, row))
            })?,
        };

        let price = match cell(columns.price) {
            "" => None,
            raw => Some(parse_price(raw, row)?),
        };

        let print = Print::new(name, cell(columns.set), foil, price)?
            .with_collector_number(cell(columns.collector_number))
            .with_identity(self.identity);
        Ok((print, count))
    }
}

fn parse_count(raw: &str, row: usize) -> Result<usize> {
    let count: i64 = raw
        .parse()
        .map_err(|_| StackError::format(format!("Invalid count '{}' at row {}", raw, row)))?;
    if count <= 0 {
        return Err(StackError::format(format!(
            "Count must be positive, got {} at row {}",
            count, row
        )));
    }
    usize::try_from(count)
        .map_err(|_| StackError::format(format!("Count too large at row {}", row)))
}

fn parse_price(raw: &str, row: usize) -> Result<Price> {
    let invalid = || StackError::format(format!("Invalid price '{}' at row {}", raw, row));
    let amount = Decimal::from_str(raw).map_err(|_| invalid())?;
    Price::new(amount).map_err(|_| invalid())
}

impl StackReader for CsvReader {
    fn read(&self, input: &mut dyn Read) -> Result<Stack> {
        let mut reader = ReaderBuilder::new()
            .trim(Trim::All)
            .flexible(true)
            .from_reader(input);

        let columns = Columns::locate(reader.headers()?)?;
        log::debug!("CSV columns: {:?}", columns);

        let mut stack = Stack::new();
        // Header is row 1
        for (index, record) in reader.records().enumerate() {
            let row = index + 2;
            let (print, count) = self.parse_row(&record?, &columns, row)?;
            stack.try_insert(print.into(), count).map_err(|_| {
                StackError::format(format!("Total card count too large at row {}", row))
            })?;
        }

        Ok(stack)
    }
}

/// Writes stacks as CSV collections.
///
/// Card keys are written with default print metadata.
#[derive(Clone, Debug, Default)]
pub struct CsvWriter;

impl CsvWriter {
    #[must_use]
    pub fn new() -> Self {
        Self
    }
}

impl StackWriter for CsvWriter {
    fn write(&self, stack: &Stack, output: &mut dyn Write) -> Result<()> {
        let mut writer = WriterBuilder::new().from_writer(output);
        writer.write_record(HEADER)?;

        for (key, count) in stack.to_prints().items() {
            let CardKey::Print(print) = key else {
                continue;
            };
            let count = count.to_string();
            let price = print.price().map(|p| p.to_string()).unwrap_or_default();
            writer.write_record([
                count.as_str(),
                print.name(),
                print.set(),
                print.collector_number().unwrap_or(""),
                if print.foil() { "true" } else { "false" },
                price.as_str(),
            ])?;
        }

        writer.flush()?;
        Ok(())
    }
}
