use std::error::Error;
use std::io::{self, BufRead, Write};
use std::path::PathBuf;

use clap::Parser;
use log::debug;

use income_seeder::error::SeedError;
use income_seeder::seed::{
    parse_count, SeedConfig, SeedOutcome, Seeder, DEFAULT_OUTPUT_DIR, NOTHING_TO_GENERATE,
};

#[derive(Parser)]
#[clap(author, version, about = "Generates a SQL seed file of random income records", long_about = None)]
struct Cli {
    /// Number of income records to generate. Prompted for when omitted
    #[clap(allow_hyphen_values = true)]
    pub(crate) count: Option<String>,

    /// Directory the seed file is written to
    #[clap(long, default_value = DEFAULT_OUTPUT_DIR)]
    pub(crate) output_dir: PathBuf,

    /// Also write the generated records to a CSV file next to the SQL file
    #[clap(long)]
    pub(crate) csv: bool,
}

fn prompt_count(input: &mut impl BufRead, out: &mut impl Write) -> io::Result<String> {
    write!(out, "Enter the number of income records: ")?;
    out.flush()?;
    let mut line = String::new();
    input.read_line(&mut line)?;
    Ok(line)
}

fn run(cli: Cli, input: &mut impl BufRead, out: &mut impl Write) -> Result<(), Box<dyn Error>> {
    let line = match cli.count {
        Some(count) => count,
        None => prompt_count(input, out)?,
    };
    let count = match parse_count(&line) {
        Ok(count) => count,
        Err(err @ SeedError::InvalidCount(_)) => {
            writeln!(out, "{}", err)?;
            return Ok(());
        }
        Err(err) => return Err(err.into()),
    };

    let mut config = SeedConfig::new(count);
    config.output_dir = cli.output_dir;
    config.write_csv = cli.csv;
    debug!("Seeding with {:?}", config);

    match Seeder::new(config).run(&mut rand::thread_rng())? {
        SeedOutcome::Nothing => writeln!(out, "{}", NOTHING_TO_GENERATE)?,
        SeedOutcome::Written(summary) => writeln!(out, "{}", summary)?,
    }

    Ok(())
}

fn main() -> Result<(), Box<dyn Error>> {
    env_logger::init();
    let cli = Cli::parse();
    run(cli, &mut io::stdin().lock(), &mut io::stdout().lock())
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    fn run_with(args: &[&str], stdin: &str, dir: &TempDir) -> (Result<(), Box<dyn Error>>, String) {
        let output_dir = dir.path().join("seeds");
        let mut argv = vec![
            "income-seeder-cli",
            "--output-dir",
            output_dir.to_str().unwrap(),
        ];
        argv.extend_from_slice(args);
        let cli = Cli::try_parse_from(argv).unwrap();
        let mut out = Vec::new();
        let res = run(cli, &mut stdin.as_bytes(), &mut out);
        (res, String::from_utf8(out).unwrap())
    }

    fn sql_files(dir: &TempDir) -> usize {
        std::fs::read_dir(dir.path().join("seeds"))
            .map(|entries| {
                entries
                    .filter_map(Result::ok)
                    .filter(|entry| entry.path().extension().map_or(false, |ext| ext == "sql"))
                    .count()
            })
            .unwrap_or(0)
    }

    #[test]
    fn test_run_invalid_input() {
        let dir = TempDir::new().unwrap();
        let (res, out) = run_with(&["abc"], "", &dir);
        assert!(res.is_ok());
        assert_eq!(out, "Invalid input. Please enter an integer.\n");
        assert!(!dir.path().join("seeds").exists());
    }

    #[test]
    fn test_run_non_positive_counts() {
        for count in ["0", "-5"] {
            let dir = TempDir::new().unwrap();
            let (res, out) = run_with(&[count], "", &dir);
            assert!(res.is_ok());
            assert_eq!(out, format!("{}\n", NOTHING_TO_GENERATE));
            assert_eq!(sql_files(&dir), 0);
        }
    }

    #[test]
    fn test_run_prompts_when_count_missing() {
        let dir = TempDir::new().unwrap();
        let (res, out) = run_with(&[], "nope\n", &dir);
        assert!(res.is_ok());
        assert_eq!(
            out,
            "Enter the number of income records: Invalid input. Please enter an integer.\n"
        );

        let (res, out) = run_with(&[], " 3\n", &dir);
        assert!(res.is_ok());
        assert!(out.starts_with("Enter the number of income records: ✓ SQL file generated"));
        assert!(out.contains("✓ Contains 3 income records"));
        assert!(dir.path().join("seeds").join("seed_income_3_records.sql").exists());
    }

    #[test]
    fn test_run_writes_seed_file() {
        let dir = TempDir::new().unwrap();
        let (res, out) = run_with(&["4"], "", &dir);
        assert!(res.is_ok());
        assert!(out.contains("✓ Contains 4 income records"));
        assert_eq!(sql_files(&dir), 1);
    }

    #[test]
    fn test_run_count_too_large() {
        let dir = TempDir::new().unwrap();
        let (res, out) = run_with(&["99999999999999999999"], "", &dir);
        assert!(res.is_err());
        assert!(out.is_empty());
        assert_eq!(sql_files(&dir), 0);
    }

    #[test]
    fn test_cli_defaults() {
        let cli = Cli::try_parse_from(["income-seeder-cli"]).unwrap();
        assert!(cli.count.is_none());
        assert_eq!(cli.output_dir, PathBuf::from("seeds"));
        assert!(!cli.csv);
    }

    #[test]
    fn test_cli_negative_count() {
        let cli = Cli::try_parse_from(["income-seeder-cli", "-5"]).unwrap();
        assert_eq!(cli.count.as_deref(), Some("-5"));
        assert_eq!(parse_count(cli.count.as_deref().unwrap()).unwrap(), -5);
    }

    #[test]
    fn test_cli_options() {
        let cli =
            Cli::try_parse_from(["income-seeder-cli", "--output-dir", "out", "--csv", "25"])
                .unwrap();
        assert_eq!(cli.count.as_deref(), Some("25"));
        assert_eq!(cli.output_dir, PathBuf::from("out"));
        assert!(cli.csv);
    }
}
