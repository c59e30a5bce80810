use std::io;

use thiserror::Error;

#[derive(Error, Debug)]
pub enum SeedError {
    #[error("CSV Error")]
    CsvError(#[from] csv::Error),
    #[error("I/O Error")]
    IoError(#[from] io::Error),
    #[error("Invalid input. Please enter an integer.")]
    InvalidCount(#[source] std::num::ParseIntError),
    #[error("Cannot generate {0} records in a single seed file")]
    CountTooLarge(String),
}
