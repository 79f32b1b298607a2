/// Record reader
///
/// Parses the text records the generator writes back into events, the way a
/// downstream book replays them: action code, side code, order id, then price
/// and quantity for adds. Cancel placeholders are read but not checked.

use crate::event::{Action, Event, Side};
use std::io::BufRead;
use thiserror::Error;

const FIELD_COUNT: usize = 5;

#[derive(Error, Debug)]
pub enum RecordError {
    #[error("expected 5 fields, found {0}")]
    FieldCount(usize),

    #[error("invalid action code: {0:?}")]
    InvalidAction(String),

    #[error("invalid side code: {0:?}")]
    InvalidSide(String),

    #[error("invalid {field}: {value:?}")]
    InvalidNumber { field: &'static str, value: String },

    #[error("line {line}: {source}")]
    Line {
        line: usize,
        #[source]
        source: Box<RecordError>,
    },

    #[error("read failed: {0}")]
    Io(#[from] std::io::Error),
}

pub type RecordResult<T> = Result<T, RecordError>;

pub struct RecordReader;

impl RecordReader {
    /// Parse one record, without its line terminator
    pub fn parse_line(line: &str) -> RecordResult<Event> {
        let fields: Vec<&str> = line.trim_end_matches(&['\r', '\n'][..]).split(',').collect();
        if fields.len() != FIELD_COUNT {
            return Err(RecordError::FieldCount(fields.len()));
        }

        let action = single_char(fields[0])
            .and_then(Action::from_code)
            .ok_or_else(|| RecordError::InvalidAction(fields[0].to_string()))?;
        let side = single_char(fields[1])
            .and_then(Side::from_code)
            .ok_or_else(|| RecordError::InvalidSide(fields[1].to_string()))?;
        let order_id: u64 = parse_number("order_id", fields[2])?;

        match action {
            Action::Add => Ok(Event::Add {
                side,
                order_id,
                price: parse_number("price", fields[3])?,
                quantity: parse_number("quantity", fields[4])?,
            }),
            Action::Cancel => Ok(Event::Cancel { order_id }),
        }
    }

    /// Parse every record from a reader.
    /// Calls callback for each event; stops early if the callback returns
    /// false. Blank lines are skipped. Returns the number of events delivered.
    pub fn parse_stream<R, F>(reader: R, mut callback: F) -> RecordResult<usize>
    where
        R: BufRead,
        F: FnMut(&Event) -> bool,
    {
        let mut count = 0;

        for (idx, line) in reader.lines().enumerate() {
            let line = line?;
            if line.trim().is_empty() {
                continue;
            }

            let event = Self::parse_line(&line).map_err(|e| RecordError::Line {
                line: idx + 1,
                source: Box::new(e),
            })?;
            if !callback(&event) {
                break;
            }
            count += 1;
        }

        Ok(count)
    }

    /// Read a whole stream into memory
    pub fn read_all<R: BufRead>(reader: R) -> RecordResult<Vec<Event>> {
        let mut events = Vec::new();
        Self::parse_stream(reader, |event| {
            events.push(*event);
            true
        })?;
        Ok(events)
    }
}

fn single_char(field: &str) -> Option<char> {
    let mut chars = field.chars();
    match (chars.next(), chars.next()) {
        (Some(c), None) => Some(c),
        _ => None,
    }
}

fn parse_number<T: std::str::FromStr>(field: &'static str, value: &str) -> RecordResult<T> {
    value.parse().map_err(|_| RecordError::InvalidNumber {
        field,
        value: value.to_string(),
    })
}
