/// Order flow event model
///
/// Text record layout, one event per line:
///   action,side,order_id,price,quantity
///
///   - action: 'A' (add) or 'C' (cancel)
///   - side: 'B' (buy) or 'S' (sell); always 'B' on cancels
///   - order_id: positive integer
///   - price: integer; 0 on cancels
///   - quantity: 1..=100; 0 on cancels

use std::fmt;

pub const MIN_QUANTITY: u32 = 1;
pub const MAX_QUANTITY: u32 = 100;

/// Side and price/quantity written on cancel records. Carried only so every
/// line has five fields.
pub const CANCEL_SIDE: Side = Side::Buy;
pub const CANCEL_PRICE: i64 = 0;
pub const CANCEL_QUANTITY: u32 = 0;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Side {
    Buy,
    Sell,
}

impl Side {
    pub fn code(self) -> char {
        match self {
            Side::Buy => 'B',
            Side::Sell => 'S',
        }
    }

    pub fn from_code(c: char) -> Option<Self> {
        match c {
            'B' => Some(Side::Buy),
            'S' => Some(Side::Sell),
            _ => None,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Action {
    Add,
    Cancel,
}

impl Action {
    pub fn code(self) -> char {
        match self {
            Action::Add => 'A',
            Action::Cancel => 'C',
        }
    }

    pub fn from_code(c: char) -> Option<Self> {
        match c {
            'A' => Some(Action::Add),
            'C' => Some(Action::Cancel),
            _ => None,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Event {
    Add {
        side: Side,
        order_id: u64,
        price: i64,
        quantity: u32,
    },
    Cancel {
        order_id: u64,
    },
}

impl Event {
    pub fn action(&self) -> Action {
        match self {
            Event::Add { .. } => Action::Add,
            Event::Cancel { .. } => Action::Cancel,
        }
    }

    pub fn order_id(&self) -> u64 {
        match *self {
            Event::Add { order_id, .. } | Event::Cancel { order_id } => order_id,
        }
    }

    /// The five record fields in wire order, placeholders filled in for cancels
    pub fn fields(&self) -> (Action, Side, u64, i64, u32) {
        match *self {
            Event::Add {
                side,
                order_id,
                price,
                quantity,
            } => (Action::Add, side, order_id, price, quantity),
            Event::Cancel { order_id } => (
                Action::Cancel,
                CANCEL_SIDE,
                order_id,
                CANCEL_PRICE,
                CANCEL_QUANTITY,
            ),
        }
    }
}

/// Formats the event as a single record line without the trailing newline
impl fmt::Display for Event {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let (action, side, order_id, price, quantity) = self.fields();
        write!(
            f,
            "{},{},{},{},{}",
            action.code(),
            side.code(),
            order_id,
            price,
            quantity
        )
    }
}
