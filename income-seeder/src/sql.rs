use std::io::{self, Write};

use log::debug;

use crate::record::IncomeRecord;
use crate::reference::{CHART_OF_ACCOUNTS, PROGRAMS};

const RULE: &str = "-- ========================================";
pub const SEQUENCE_NAME: &str = "hibernate_sequence";

/// Renders the sections of a seed file, in file order, onto any writer.
///
/// Every `INSERT` ends with `ON CONFLICT (<key>) DO NOTHING` so re-importing
/// a file is harmless for rows that already exist.
pub struct SeedSqlWriter<W: Write> {
    writer: W,
}

impl<W: Write> SeedSqlWriter<W> {
    #[must_use]
    pub fn new(writer: W) -> Self {
        SeedSqlWriter { writer }
    }

    /// # Errors
    /// Errors when the underlying writer fails
    pub fn write_header(&mut self, count: u32) -> io::Result<()> {
        writeln!(self.writer, "{}", RULE)?;
        writeln!(self.writer, "-- Seed Income Records for /call/income/list")?;
        writeln!(self.writer, "-- Generated: {} records", count)?;
        writeln!(self.writer, "{}\n", RULE)
    }

    /// Writes the chart-of-account and program rows the income records point at.
    ///
    /// # Errors
    /// Errors when the underlying writer fails
    pub fn write_reference_data(&mut self) -> io::Result<()> {
        writeln!(self.writer, "-- Ensure Chart of Account records exist")?;
        self.write_insert(
            "chartofaccount_comp (id)",
            CHART_OF_ACCOUNTS.iter().map(|coa| format!("({})", coa.id)),
            "id",
        )?;
        self.write_insert(
            "chartofaccount_impl (id, code, name, description, isvisible)",
            CHART_OF_ACCOUNTS.iter().map(|coa| {
                format!(
                    "({}, {}, {}, {}, {})",
                    coa.id,
                    coa.code,
                    quote(coa.name),
                    quote(coa.description),
                    quote(if coa.visible { "true" } else { "false" }),
                )
            }),
            "id",
        )?;

        writeln!(
            self.writer,
            "-- Ensure Program records exist (for foreign key references)"
        )?;
        self.write_insert(
            "program_comp (idprogram, name, description, executiondate, logourl, partner, target)",
            PROGRAMS.iter().map(|program| {
                format!(
                    "({}, {}, {}, {}, {}, {}, {})",
                    program.id,
                    quote(program.name),
                    quote(program.description),
                    quote(program.execution_date),
                    quote(program.logo_url),
                    quote(program.partner),
                    quote(program.target),
                )
            }),
            "idprogram",
        )?;
        self.write_insert(
            "program_activity (idprogram)",
            PROGRAMS.iter().map(|program| format!("({})", program.id)),
            "idprogram",
        )?;
        debug!(
            "Wrote {} chart of account and {} program rows",
            CHART_OF_ACCOUNTS.len(),
            PROGRAMS.len()
        );
        Ok(())
    }

    /// Writes the three per-record blocks, each with one tuple per record.
    /// `records` must not be empty, an `INSERT` without tuples is not valid SQL.
    ///
    /// # Errors
    /// Errors when the underlying writer fails
    pub fn write_records(&mut self, records: &[IncomeRecord]) -> io::Result<()> {
        writeln!(self.writer, "-- Insert Financial Report Component records")?;
        self.write_insert(
            "financialreport_comp (id, amount, datestamp, description, coa_id, program_idprogram)",
            records.iter().map(|record| {
                format!(
                    "({}, {}, '{}', {}, {}, {})",
                    record.id,
                    record.amount,
                    record.date.format("%Y-%m-%d"),
                    quote(record.description),
                    record.coa_id,
                    record
                        .program_id
                        .map_or_else(|| "NULL".to_string(), |id| id.to_string()),
                )
            }),
            "id",
        )?;

        writeln!(self.writer, "-- Insert Financial Report Implementation records")?;
        self.write_insert(
            "financialreport_impl (id)",
            records.iter().map(|record| format!("({})", record.id)),
            "id",
        )?;

        writeln!(
            self.writer,
            "-- Insert Income-specific records with payment method"
        )?;
        self.write_insert(
            "financialreport_income (id, paymentmethod)",
            records
                .iter()
                .map(|record| format!("({}, {})", record.id, quote(record.payment_method))),
            "id",
        )?;
        debug!("Wrote {} income records", records.len());
        Ok(())
    }

    /// # Errors
    /// Errors when the underlying writer fails
    pub fn write_sequence_update(&mut self, value: u64) -> io::Result<()> {
        writeln!(
            self.writer,
            "-- Update {} to avoid ID conflicts",
            SEQUENCE_NAME
        )?;
        writeln!(
            self.writer,
            "SELECT setval('{}', {}, true);\n",
            SEQUENCE_NAME, value
        )
    }

    /// Writes the verification join (commented out) and a live row count.
    ///
    /// # Errors
    /// Errors when the underlying writer fails
    pub fn write_verification(&mut self) -> io::Result<()> {
        writeln!(self.writer, "{}", RULE)?;
        writeln!(self.writer, "-- Verification Query")?;
        writeln!(self.writer, "{}", RULE)?;
        writeln!(self.writer, "-- Run this to verify the data:")?;
        writeln!(self.writer, "/*")?;
        self.writer.write_all(VERIFICATION_QUERY.as_bytes())?;
        writeln!(self.writer, "*/")?;
        writeln!(self.writer)?;
        writeln!(self.writer, "SELECT COUNT(*) FROM financialreport_comp;")
    }

    /// # Errors
    /// Errors when the underlying writer fails
    pub fn flush(&mut self) -> io::Result<()> {
        self.writer.flush()
    }

    #[must_use]
    pub fn into_inner(self) -> W {
        self.writer
    }

    fn write_insert(
        &mut self,
        target: &str,
        tuples: impl IntoIterator<Item = String>,
        conflict_key: &str,
    ) -> io::Result<()> {
        writeln!(self.writer, "INSERT INTO {} VALUES", target)?;
        for (i, tuple) in tuples.into_iter().enumerate() {
            if i > 0 {
                self.writer.write_all(b",\n")?;
            }
            self.writer.write_all(tuple.as_bytes())?;
        }
        writeln!(self.writer, "\nON CONFLICT ({}) DO NOTHING;\n", conflict_key)
    }
}

const VERIFICATION_QUERY: &str = "SELECT
  fr.id,
  fr.amount,
  fr.datestamp,
  fr.description,
  fi.paymentmethod,
  coa.name as account_name,
  p.name as program_name
FROM financialreport_comp fr
JOIN financialreport_income fi ON fr.id = fi.id
JOIN chartofaccount_impl coa ON fr.coa_id = coa.id
LEFT JOIN program_comp p ON fr.program_idprogram = p.idprogram
ORDER BY fr.datestamp DESC
LIMIT 20;
";

/// Single-quoted SQL text literal.
#[must_use]
pub fn quote(text: &str) -> String {
    format!("'{}'", text.replace('\'', "''"))
}
