use crate::error::RequestError;
use serde::{Deserialize, Serialize};
use std::{fmt, str::FromStr};

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub enum OrderDir {
    #[default]
    Asc,
    Desc,
}

impl OrderDir {
    pub fn as_sql(&self) -> &'static str {
        match self {
            OrderDir::Asc => "ASC",
            OrderDir::Desc => "DESC",
        }
    }
}

impl FromStr for OrderDir {
    type Err = RequestError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        if s.eq_ignore_ascii_case("asc") {
            Ok(OrderDir::Asc)
        } else if s.eq_ignore_ascii_case("desc") {
            Ok(OrderDir::Desc)
        } else {
            Err(RequestError::InvalidDirection(s.to_string()))
        }
    }
}

impl fmt::Display for OrderDir {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            OrderDir::Asc => write!(f, "asc"),
            OrderDir::Desc => write!(f, "desc"),
        }
    }
}

/// A single `(columnIndex, direction)` sort instruction.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "OrderParams", into = "OrderParams")]
pub struct Order {
    column: usize,
    dir: OrderDir,
}

impl Order {
    /// Builds an order from a raw direction token (`asc`/`desc`, any case).
    pub fn new(column: usize, dir: &str) -> Result<Self, RequestError> {
        Ok(Self {
            column,
            dir: dir.parse()?,
        })
    }

    pub fn asc(column: usize) -> Self {
        Self {
            column,
            dir: OrderDir::Asc,
        }
    }

    pub fn desc(column: usize) -> Self {
        Self {
            column,
            dir: OrderDir::Desc,
        }
    }

    pub fn column(&self) -> usize {
        self.column
    }

    pub fn dir(&self) -> OrderDir {
        self.dir
    }
}

/// Wire shape of an order instruction: `{"column": 0, "dir": "asc"}`.
#[derive(Debug, Clone, Serialize, Deserialize)]
struct OrderParams {
    column: usize,
    dir: String,
}

impl TryFrom<OrderParams> for Order {
    type Error = RequestError;

    fn try_from(params: OrderParams) -> Result<Self, Self::Error> {
        Order::new(params.column, &params.dir)
    }
}

impl From<Order> for OrderParams {
    fn from(order: Order) -> Self {
        Self {
            column: order.column,
            dir: order.dir.to_string(),
        }
    }
}
