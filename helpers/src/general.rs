use std::cmp::Ordering;
use std::error::Error;
use std::fmt;

/// InputValueError is used if some race option or parameter does not fulfill the posed
/// requirements, e.g., a circuit without laps or a vehicle without a fuel tank.
#[derive(Debug, Clone)]
pub struct InputValueError {
    pub reason: String,
}

impl InputValueError {
    pub fn new(reason: &str) -> InputValueError {
        InputValueError {
            reason: reason.to_owned(),
        }
    }
}

impl fmt::Display for InputValueError {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "Invalid input value: {}", self.reason)
    }
}

impl Error for InputValueError {}

#[derive(Debug, Clone, Copy)]
pub enum SortOrder {
    Ascending,
    Descending,
}

/// argsort returns the indices that would sort an array. The sort is stable, i.e. equal values
/// keep their original order. Incomparable values (NaN) are treated as equal.
pub fn argsort<T: PartialOrd>(x: &[T], order: SortOrder) -> Vec<usize> {
    let mut indices: Vec<usize> = (0..x.len()).collect();
    match order {
        SortOrder::Ascending => {
            indices.sort_by(|&a, &b| x[a].partial_cmp(&x[b]).unwrap_or(Ordering::Equal))
        }
        SortOrder::Descending => {
            indices.sort_by(|&a, &b| x[b].partial_cmp(&x[a]).unwrap_or(Ordering::Equal))
        }
    }
    indices
}

/// ordinal returns the rank with its English suffix as used for race positions: 1st, 2nd, 3rd,
/// and "th" for everything else.
pub fn ordinal(rank: u32) -> String {
    match rank {
        1 => "1st".to_owned(),
        2 => "2nd".to_owned(),
        3 => "3rd".to_owned(),
        _ => format!("{}th", rank),
    }
}
