//! Sort directions, null placement and sort state entries.

use std::cmp::Ordering;
use std::str::FromStr;

use serde::Deserialize;
use serde::Serialize;

use crate::error::ParseNullOrderError;

/// Sort direction.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Direction {
    /// Ascending order (A-Z, 0-9).
    Asc,
    /// Descending order (Z-A, 9-0).
    Desc,
}

impl Direction {
    /// `1` for ascending, `-1` for descending.
    pub fn sign(self) -> i32 {
        match self {
            Direction::Asc => 1,
            Direction::Desc => -1,
        }
    }

    /// Direction from a signed number; `0` means inactive.
    pub fn from_sign(sign: i32) -> Option<Direction> {
        match sign.cmp(&0) {
            Ordering::Greater => Some(Direction::Asc),
            Ordering::Less => Some(Direction::Desc),
            Ordering::Equal => None,
        }
    }

    /// Applies the direction to an ascending ordering.
    pub fn apply(self, ordering: Ordering) -> Ordering {
        match self {
            Direction::Asc => ordering,
            Direction::Desc => ordering.reverse(),
        }
    }

    /// The opposite direction.
    pub fn reverse(self) -> Direction {
        match self {
            Direction::Asc => Direction::Desc,
            Direction::Desc => Direction::Asc,
        }
    }
}

/// Where values that cannot be compared end up.
///
/// A value is non-comparable when [`Value::is_comparable`](crate::model::Value::is_comparable)
/// is false, typically a missing field.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum NullOrder {
    /// Smaller than any value: first when ascending, last when descending.
    Small,
    /// Larger than any value: last when ascending, first when descending.
    Large,
    /// Always first.
    First,
    /// Always last.
    #[default]
    Last,
}

impl NullOrder {
    /// Orders `a` against `b` when at most one of them is comparable.
    pub fn place(self, a_comparable: bool, b_comparable: bool, dir: Direction) -> Ordering {
        // +1 when only `a` has a value, -1 when only `b` does.
        let rank = i32::from(a_comparable) - i32::from(b_comparable);
        let factor = match self {
            NullOrder::Small => dir.sign(),
            NullOrder::Large => -dir.sign(),
            NullOrder::First => 1,
            NullOrder::Last => -1,
        };
        (rank * factor).cmp(&0)
    }
}

impl FromStr for NullOrder {
    type Err = ParseNullOrderError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "small" => Ok(NullOrder::Small),
            "large" => Ok(NullOrder::Large),
            "first" => Ok(NullOrder::First),
            "last" => Ok(NullOrder::Last),
            _ => Err(ParseNullOrderError(s.to_string())),
        }
    }
}

/// One key of the sort state.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct SortEntry {
    /// Column key.
    pub key: String,
    /// Active direction.
    pub dir: Direction,
}

impl SortEntry {
    /// Creates a sort entry.
    pub fn new(key: impl Into<String>, dir: Direction) -> Self {
        Self {
            key: key.into(),
            dir,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_from_sign() {
        assert_eq!(Direction::from_sign(1), Some(Direction::Asc));
        assert_eq!(Direction::from_sign(-3), Some(Direction::Desc));
        assert_eq!(Direction::from_sign(0), None);
    }

    #[test]
    fn test_null_order_placement() {
        use Direction::*;
        // `a` has a value, `b` does not.
        assert_eq!(NullOrder::Last.place(true, false, Asc), Ordering::Less);
        assert_eq!(NullOrder::Last.place(true, false, Desc), Ordering::Less);
        assert_eq!(NullOrder::First.place(true, false, Asc), Ordering::Greater);
        assert_eq!(NullOrder::First.place(true, false, Desc), Ordering::Greater);
        assert_eq!(NullOrder::Small.place(true, false, Asc), Ordering::Greater);
        assert_eq!(NullOrder::Small.place(true, false, Desc), Ordering::Less);
        assert_eq!(NullOrder::Large.place(true, false, Asc), Ordering::Less);
        assert_eq!(NullOrder::Large.place(true, false, Desc), Ordering::Greater);
        assert_eq!(NullOrder::Last.place(false, false, Asc), Ordering::Equal);
    }

    #[test]
    fn test_parse_null_order() {
        assert_eq!("FIRST".parse::<NullOrder>(), Ok(NullOrder::First));
        assert_eq!("large".parse::<NullOrder>(), Ok(NullOrder::Large));
        assert!("middle".parse::<NullOrder>().is_err());
    }
}
