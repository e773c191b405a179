//! gridtable CLI - locate and extract tables from CSV grids

use anyhow::{bail, Context, Result};
use clap::{Parser, Subcommand, ValueEnum};
use gridtable::prelude::*;
use gridtable_core::CellAddress;
use gridtable_csv::{CsvReadOptions, CsvReader, CsvWriteOptions, CsvWriter, LineTerminator};
use serde::Serialize;
use std::io::{self, Write};
use std::path::{Path, PathBuf};

#[derive(Parser)]
#[command(name = "gridtable")]
#[command(
    author,
    version,
    about = "Locate and extract labeled tables from spreadsheet-like grids"
)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Print the location of the first table in a grid
    Locate {
        /// Input CSV file
        input: PathBuf,

        /// Only look at rows from this one on (1-based)
        #[arg(long, value_parser = parse_row)]
        min_row: Option<u32>,

        /// Input field delimiter (default: comma)
        #[arg(short, long, default_value = ",")]
        delimiter: char,
    },

    /// Extract a table and write it as JSON or CSV
    Extract {
        /// Input CSV file
        input: PathBuf,

        /// Column range of the table, e.g. "B:D" (default: detect)
        #[arg(short, long)]
        columns: Option<ColumnRange>,

        /// First row of the table, header included (1-based)
        #[arg(long, value_parser = parse_row, requires = "columns")]
        first_row: Option<u32>,

        /// Only look at rows from this one on when detecting (1-based)
        #[arg(long, value_parser = parse_row, conflicts_with = "columns")]
        min_row: Option<u32>,

        /// The table has no header row
        #[arg(long)]
        no_header: bool,

        /// Column labels, comma-separated
        #[arg(long, value_delimiter = ',')]
        labels: Option<Vec<String>>,

        /// Read past blank rows and row gaps until the grid ends
        #[arg(long)]
        keep_going: bool,

        /// Keep rows whose values are all missing
        #[arg(long)]
        keep_empty_rows: bool,

        /// Infer a type for each column
        #[arg(long)]
        infer_types: bool,

        /// Rewrite header labels into identifier form
        #[arg(long)]
        normalize_labels: bool,

        /// Output format
        #[arg(short, long, value_enum, default_value_t = Format::Json)]
        format: Format,

        /// Output file (default: stdout)
        #[arg(short, long)]
        output: Option<PathBuf>,

        /// Input field delimiter (default: comma)
        #[arg(short, long, default_value = ",")]
        delimiter: char,
    },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
enum Format {
    Json,
    Csv,
}

/// JSON shape of an extracted table
#[derive(Debug, Serialize)]
struct TableJson {
    labels: Vec<String>,
    types: Vec<String>,
    rows: Vec<Vec<serde_json::Value>>,
}

impl TableJson {
    fn new(table: &Table) -> Self {
        Self {
            labels: table.labels().to_vec(),
            types: table
                .element_types()
                .iter()
                .map(ElementType::to_string)
                .collect(),
            rows: table
                .rows()
                .map(|row| row.iter().map(json_value).collect())
                .collect(),
        }
    }
}

fn json_value(value: &CellValue) -> serde_json::Value {
    use serde_json::Value;

    match value {
        CellValue::Empty => Value::Null,
        CellValue::Boolean(b) => Value::Bool(*b),
        CellValue::Int(n) => Value::from(*n),
        CellValue::Float(n) => serde_json::Number::from_f64(*n)
            .map(Value::Number)
            .unwrap_or(Value::Null),
        other => Value::String(other.to_string()),
    }
}

fn parse_row(s: &str) -> std::result::Result<u32, String> {
    CellAddress::parse_row_number(s).map_err(|e| e.to_string())
}

fn delimiter_byte(delimiter: char) -> Result<u8> {
    if !delimiter.is_ascii() {
        bail!("Delimiter must be an ASCII character, got '{}'", delimiter);
    }
    Ok(delimiter as u8)
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    match cli.command {
        Commands::Locate {
            input,
            min_row,
            delimiter,
        } => locate(&input, min_row, delimiter),
        Commands::Extract {
            input,
            columns,
            first_row,
            min_row,
            no_header,
            labels,
            keep_going,
            keep_empty_rows,
            infer_types,
            normalize_labels,
            format,
            output,
            delimiter,
        } => {
            let source = match columns {
                Some(columns) => TableSource::Columns { columns, first_row },
                None => TableSource::Detect { min_row },
            };
            let options = TableOptions {
                header: !no_header,
                labels,
                stop_on_empty_row: !keep_going,
                normalize_labels,
                ..TableOptions::default()
            };
            let materialize = MaterializeOptions {
                infer_types,
                keep_empty_rows,
            };
            extract(
                &input,
                source,
                options,
                materialize,
                format,
                output.as_deref(),
                delimiter,
            )
        }
    }
}

fn load(input: &Path, delimiter: char) -> Result<Worksheet> {
    let options = CsvReadOptions {
        delimiter: delimiter_byte(delimiter)?,
        ..CsvReadOptions::default()
    };
    CsvReader::read_file(input, &options)
        .with_context(|| format!("Failed to read '{}'", input.display()))
}

fn locate(input: &Path, min_row: Option<u32>, delimiter: char) -> Result<()> {
    let sheet = load(input, delimiter)?;
    let location = sheet
        .locate_table(min_row)
        .with_context(|| format!("No table in '{}'", input.display()))?;

    println!("{}", location);
    Ok(())
}

fn extract(
    input: &Path,
    source: TableSource,
    options: TableOptions,
    materialize: MaterializeOptions,
    format: Format,
    output: Option<&Path>,
    delimiter: char,
) -> Result<()> {
    let sheet = load(input, delimiter)?;
    let table = sheet
        .table(source, options, materialize)
        .with_context(|| format!("Failed to extract a table from '{}'", input.display()))?;

    let mut buffer = Vec::new();
    match format {
        Format::Json => {
            serde_json::to_writer_pretty(&mut buffer, &TableJson::new(&table))
                .context("Failed to serialize table")?;
            buffer.push(b'\n');
        }
        Format::Csv => {
            let options = CsvWriteOptions {
                delimiter: delimiter_byte(delimiter)?,
                line_terminator: LineTerminator::LF,
                ..CsvWriteOptions::default()
            };
            CsvWriter::write_table(&table, &mut buffer, &options)
                .context("Failed to write CSV")?;
        }
    }

    if let Some(output_path) = output {
        std::fs::write(output_path, &buffer)
            .with_context(|| format!("Failed to write '{}'", output_path.display()))?;
        eprintln!(
            "Wrote {} rows x {} columns to '{}'",
            table.row_count(),
            table.column_count(),
            output_path.display()
        );
    } else {
        io::stdout()
            .write_all(&buffer)
            .context("Failed to write to stdout")?;
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn grid(contents: &str) -> tempfile::NamedTempFile {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        file.write_all(contents.as_bytes()).unwrap();
        file
    }

    #[test]
    fn test_cli_parses_extract() {
        let cli = Cli::try_parse_from([
            "gridtable",
            "extract",
            "in.csv",
            "--columns",
            "B:D",
            "--first-row",
            "3",
            "--labels",
            "a,b,c",
            "--format",
            "csv",
        ])
        .unwrap();

        match cli.command {
            Commands::Extract {
                columns,
                first_row,
                labels,
                format,
                ..
            } => {
                assert_eq!(columns, Some(ColumnRange::parse("B:D").unwrap()));
                assert_eq!(first_row, Some(2));
                assert_eq!(
                    labels,
                    Some(vec!["a".to_string(), "b".to_string(), "c".to_string()])
                );
                assert_eq!(format, Format::Csv);
            }
            _ => panic!("expected extract"),
        }
    }

    #[test]
    fn test_cli_rejects_bad_rows() {
        assert!(Cli::try_parse_from(["gridtable", "locate", "in.csv", "--min-row", "0"]).is_err());
        assert!(
            Cli::try_parse_from(["gridtable", "extract", "in.csv", "--first-row", "2"]).is_err()
        );
    }

    #[test]
    fn test_json_shape() {
        let file = grid("id,score,note\n1,2.5,\n2,,x\n");
        let sheet = load(file.path(), ',').unwrap();
        let table = sheet
            .table(
                TableSource::detect(),
                TableOptions::default(),
                MaterializeOptions {
                    infer_types: true,
                    ..MaterializeOptions::default()
                },
            )
            .unwrap();

        let json = serde_json::to_value(TableJson::new(&table)).unwrap();
        assert_eq!(
            json,
            serde_json::json!({
                "labels": ["id", "score", "note"],
                "types": ["int", "float?", "string?"],
                "rows": [[1, 2.5, null], [2, null, "x"]],
            })
        );
    }

    #[test]
    fn test_extract_to_csv_file() {
        let file = grid("title\n\nname,qty\nbolt,3\nnut,\n");
        let out = tempfile::NamedTempFile::new().unwrap();

        extract(
            file.path(),
            TableSource::Detect { min_row: Some(1) },
            TableOptions::default(),
            MaterializeOptions::default(),
            Format::Csv,
            Some(out.path()),
            ',',
        )
        .unwrap();

        let written = std::fs::read_to_string(out.path()).unwrap();
        assert_eq!(written, "name,qty\nbolt,3\nnut,\n");
    }

    #[test]
    fn test_delimiter_must_be_ascii() {
        assert_eq!(delimiter_byte(';').unwrap(), b';');
        assert!(delimiter_byte('§').is_err());
    }
}
