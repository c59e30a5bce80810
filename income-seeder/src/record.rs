use chrono::{Duration, NaiveDate};
use rand::seq::SliceRandom;
use rand::Rng;
use serde::Serialize;

use crate::reference::{coa_ids, DESCRIPTIONS, PAYMENT_METHODS, PROGRAM_CHOICES};

/// Ids start well above anything a demo database is likely to hold already.
pub const DEFAULT_START_ID: u64 = 1001;
pub const AMOUNT_MIN: u32 = 100;
pub const AMOUNT_MAX: u32 = 10_000;
/// Dates are drawn from `today - MAX_DAYS_AGO ..= today`.
pub const MAX_DAYS_AGO: u32 = 365;

/// One logical income record. It is written as three rows sharing `id`:
/// `financialreport_comp`, `financialreport_impl` and `financialreport_income`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct IncomeRecord {
    pub id: u64,
    pub amount: u32,
    #[serde(rename = "datestamp")]
    pub date: NaiveDate,
    pub description: &'static str,
    pub coa_id: u32,
    pub program_id: Option<u32>,
    pub payment_method: &'static str,
}

#[derive(Debug, Clone)]
pub struct RecordGenerator {
    start_id: u64,
    today: NaiveDate,
    coa_ids: Vec<u32>,
}

impl RecordGenerator {
    #[must_use]
    pub fn new(start_id: u64, today: NaiveDate) -> Self {
        RecordGenerator {
            start_id,
            today,
            coa_ids: coa_ids(),
        }
    }

    #[must_use]
    pub fn start_id(&self) -> u64 {
        self.start_id
    }

    #[must_use]
    pub fn today(&self) -> NaiveDate {
        self.today
    }

    /// Builds the record at position `index` of the run, with id `start_id + index`.
    pub fn record<R: Rng + ?Sized>(&self, index: u64, rng: &mut R) -> IncomeRecord {
        let amount = rng.gen_range(AMOUNT_MIN..=AMOUNT_MAX);
        let days_ago = rng.gen_range(0..=MAX_DAYS_AGO);
        IncomeRecord {
            id: self.start_id + index,
            amount,
            date: self.today - Duration::days(i64::from(days_ago)),
            // candidate lists are never empty, the defaults are unreachable
            description: DESCRIPTIONS.choose(rng).copied().unwrap_or_default(),
            coa_id: self.coa_ids.choose(rng).copied().unwrap_or_default(),
            program_id: PROGRAM_CHOICES.choose(rng).copied().flatten(),
            payment_method: PAYMENT_METHODS.choose(rng).copied().unwrap_or_default(),
        }
    }

    pub fn generate<R: Rng + ?Sized>(&self, count: u32, rng: &mut R) -> Vec<IncomeRecord> {
        (0..u64::from(count))
            .map(|index| self.record(index, rng))
            .collect()
    }
}
