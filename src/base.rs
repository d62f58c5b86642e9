//! Shared vocabulary for the index structures

use std::fmt;

use thiserror::Error;

/// Position of a value within its source column; the unit returned by all
/// queries. Row ids must fit in 32 bits (the bitmap index addresses u32).
pub type RowId = u32;

/// Marks object that have a length
pub trait Len {
    fn len(&self) -> usize;
}

/// A comparison predicate between a column's values and a query key,
/// evaluated as `column-value <op> key`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Operator {
    Equal,
    Less,
    LessEqual,
    Greater,
    GreaterEqual,
    NotEqual,
}

impl Operator {
    /// Numeric code of the operator, for callers that drive queries from
    /// untyped plans.
    pub fn code(&self) -> u8 {
        match self {
            Operator::Equal => 0,
            Operator::Less => 1,
            Operator::LessEqual => 2,
            Operator::Greater => 3,
            Operator::GreaterEqual => 4,
            Operator::NotEqual => 5,
        }
    }
}

impl TryFrom<u8> for Operator {
    type Error = QueryError;

    fn try_from(code: u8) -> Result<Self, QueryError> {
        match code {
            0 => Ok(Operator::Equal),
            1 => Ok(Operator::Less),
            2 => Ok(Operator::LessEqual),
            3 => Ok(Operator::Greater),
            4 => Ok(Operator::GreaterEqual),
            5 => Ok(Operator::NotEqual),
            _ => Err(QueryError::UnknownOperator(code)),
        }
    }
}

impl fmt::Display for Operator {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        let s = match self {
            Operator::Equal => "=",
            Operator::Less => "<",
            Operator::LessEqual => "<=",
            Operator::Greater => ">",
            Operator::GreaterEqual => ">=",
            Operator::NotEqual => "!=",
        };
        write!(f, "{}", s)
    }
}

/// Errors reported through a cursor's terminal state. These are usage
/// errors, not transient failures: there is nothing to retry.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum QueryError {
    #[error("operator {0} is not implemented")]
    UnsupportedOperator(Operator),
    #[error("unknown operator: {0}")]
    UnknownOperator(u8),
}
