use std::fmt;
use std::fs::{self, File};
use std::io::BufWriter;
use std::num::IntErrorKind;
use std::path::{Path, PathBuf};

use chrono::{Local, NaiveDate};
use log::info;
use rand::Rng;

use crate::error::SeedError;
use crate::export::export_records_csv;
use crate::record::{RecordGenerator, AMOUNT_MAX, AMOUNT_MIN, DEFAULT_START_ID, MAX_DAYS_AGO};
use crate::sql::SeedSqlWriter;

pub const DEFAULT_OUTPUT_DIR: &str = "seeds";
/// Gap left between the last generated id and the advanced sequence value.
pub const SEQUENCE_HEADROOM: u64 = 100;
pub const NOTHING_TO_GENERATE: &str = "Nothing to generate (N must be greater than 0).";

const IMPORT_HOST: &str = "ubuntu@your-vm";
const IMPORT_DATABASE: &str = "aisco_product_hightide";
const VERIFY_ENDPOINT: &str = "https://hightide-no-cache.sple.my.id/call/income/list";

/// Parses the requested record count. Surrounding whitespace is ignored.
/// Integers below `i64::MIN` saturate, they still mean "nothing to generate".
///
/// # Errors
/// Errors when `input` is not an integer, or is an integer above `i64::MAX`
pub fn parse_count(input: &str) -> Result<i64, SeedError> {
    let input = input.trim();
    match input.parse::<i64>() {
        Ok(count) => Ok(count),
        Err(err) => match err.kind() {
            IntErrorKind::PosOverflow => Err(SeedError::CountTooLarge(input.to_string())),
            IntErrorKind::NegOverflow => Ok(i64::MIN),
            _ => Err(SeedError::InvalidCount(err)),
        },
    }
}

#[must_use]
pub fn output_path(dir: &Path, count: u32) -> PathBuf {
    dir.join(format!("seed_income_{}_records.sql", count))
}

#[must_use]
pub fn csv_output_path(dir: &Path, count: u32) -> PathBuf {
    dir.join(format!("seed_income_{}_records.csv", count))
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SeedConfig {
    pub count: i64,
    pub output_dir: PathBuf,
    pub start_id: u64,
    pub write_csv: bool,
}

impl SeedConfig {
    #[must_use]
    pub fn new(count: i64) -> Self {
        SeedConfig {
            count,
            output_dir: PathBuf::from(DEFAULT_OUTPUT_DIR),
            start_id: DEFAULT_START_ID,
            write_csv: false,
        }
    }
}

#[derive(Debug, PartialEq, Eq)]
pub enum SeedOutcome {
    /// The count was not positive; nothing was written.
    Nothing,
    Written(SeedSummary),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SeedSummary {
    pub sql_path: PathBuf,
    pub csv_path: Option<PathBuf>,
    pub count: u32,
    pub first_id: u64,
    pub last_id: u64,
    pub sequence_value: u64,
}

#[derive(Debug)]
pub struct Seeder {
    config: SeedConfig,
    today: NaiveDate,
}

impl Seeder {
    #[must_use]
    pub fn new(config: SeedConfig) -> Self {
        Seeder {
            config,
            today: Local::now().date_naive(),
        }
    }

    /// Pins the day record dates are counted back from.
    #[must_use]
    pub fn with_today(mut self, today: NaiveDate) -> Self {
        self.today = today;
        self
    }

    #[must_use]
    pub fn config(&self) -> &SeedConfig {
        &self.config
    }

    /// Generates the records and writes the seed file (and the CSV export when
    /// enabled). A non-positive count touches nothing on disk.
    ///
    /// # Errors
    /// Errors when the count does not fit in one file or when creating the
    /// output directory or writing a file fails
    pub fn run<R: Rng + ?Sized>(&self, rng: &mut R) -> Result<SeedOutcome, SeedError> {
        if self.config.count <= 0 {
            info!("Requested {} records, skipping", self.config.count);
            return Ok(SeedOutcome::Nothing);
        }
        let count = u32::try_from(self.config.count)
            .map_err(|_| SeedError::CountTooLarge(self.config.count.to_string()))?;

        fs::create_dir_all(&self.config.output_dir)?;
        let sql_path = output_path(&self.config.output_dir, count);

        let generator = RecordGenerator::new(self.config.start_id, self.today);
        let records = generator.generate(count, rng);
        let first_id = self.config.start_id;
        let last_id = first_id + u64::from(count) - 1;
        let sequence_value = first_id + u64::from(count) + SEQUENCE_HEADROOM;

        let mut writer = SeedSqlWriter::new(BufWriter::new(File::create(&sql_path)?));
        writer.write_header(count)?;
        writer.write_reference_data()?;
        writer.write_records(&records)?;
        writer.write_sequence_update(sequence_value)?;
        writer.write_verification()?;
        writer.flush()?;
        info!("Wrote {} records to {}", count, sql_path.display());

        let csv_path = if self.config.write_csv {
            let path = csv_output_path(&self.config.output_dir, count);
            export_records_csv(&path, &records)?;
            Some(path)
        } else {
            None
        };

        Ok(SeedOutcome::Written(SeedSummary {
            sql_path,
            csv_path,
            count,
            first_id,
            last_id,
            sequence_value,
        }))
    }
}

impl fmt::Display for SeedSummary {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(
            f,
            "✓ SQL file generated successfully: {}",
            self.sql_path.display()
        )?;
        if let Some(csv_path) = &self.csv_path {
            writeln!(f, "✓ CSV export: {}", csv_path.display())?;
        }
        writeln!(f, "✓ Contains {} income records", self.count)?;
        writeln!(f, "✓ Record ids: {} - {}", self.first_id, self.last_id)?;
        writeln!(f, "✓ Date range: Last {} days", MAX_DAYS_AGO)?;
        writeln!(
            f,
            "✓ Amount range: Rp {} - Rp {}",
            group_thousands(AMOUNT_MIN),
            group_thousands(AMOUNT_MAX)
        )?;
        writeln!(f)?;
        writeln!(f, "To import the data:")?;
        writeln!(
            f,
            "  1. Upload: scp {} {}:/tmp/",
            self.sql_path.display(),
            IMPORT_HOST
        )?;
        let file_name = self
            .sql_path
            .file_name()
            .map_or_else(String::new, |name| name.to_string_lossy().into_owned());
        writeln!(
            f,
            "  2. Import: psql -U postgres -d {} -f /tmp/{}",
            IMPORT_DATABASE, file_name
        )?;
        write!(f, "  3. Verify: Check endpoint {}", VERIFY_ENDPOINT)
    }
}

fn group_thousands(value: u32) -> String {
    let digits = value.to_string();
    let mut grouped = String::with_capacity(digits.len() + digits.len() / 3);
    for (i, digit) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            grouped.push(',');
        }
        grouped.push(digit);
    }
    grouped
}
