//! Output writers for simulation results.

use std::fs::{File, OpenOptions};
use std::io::{BufWriter, Write};
use std::path::{Path, PathBuf};

use flate2::write::GzEncoder;
use flate2::Compression;

use crate::metrics::{CsvSummaryRow, GameMetrics};
use crate::types::OutputFormat;

/// Where match records go before the CSV summary.
enum Records {
    /// Streamed line by line.
    Lines(Box<dyn Write + Send>),
    /// Held until `finish` writes them as one array.
    Array {
        writer: Box<dyn Write + Send>,
        pending: Vec<GameMetrics>,
    },
}

pub struct OutputWriter {
    records: Records,
    csv_writer: csv::Writer<BufWriter<File>>,
    records_path: PathBuf,
    csv_path: PathBuf,
}

impl OutputWriter {
    pub fn new(
        output_dir: &str,
        format: &OutputFormat,
        compress: bool,
    ) -> Result<Self, Box<dyn std::error::Error>> {
        let dir = Path::new(output_dir);
        std::fs::create_dir_all(dir)?;

        let timestamp = time::OffsetDateTime::now_utc()
            .format(&time::format_description::well_known::Iso8601::DEFAULT)
            .unwrap_or_else(|_| "unknown".to_string())
            .replace(':', "-");

        let extension = match format {
            OutputFormat::Jsonl => "jsonl",
            OutputFormat::Json => "json",
        };
        let mut records_path = dir.join(format!("simulation_{timestamp}.{extension}"));
        let writer: Box<dyn Write + Send> = if compress {
            records_path = dir.join(format!("simulation_{timestamp}.{extension}.gz"));
            Box::new(BufWriter::new(GzEncoder::new(
                File::create(&records_path)?,
                Compression::default(),
            )))
        } else {
            Box::new(BufWriter::new(create_truncated(&records_path)?))
        };
        let records = match format {
            OutputFormat::Jsonl => Records::Lines(writer),
            OutputFormat::Json => Records::Array {
                writer,
                pending: Vec::new(),
            },
        };

        // The CSV summary is always written uncompressed
        let csv_path = dir.join(format!("simulation_{timestamp}_summary.csv"));
        let csv_writer = csv::Writer::from_writer(BufWriter::new(create_truncated(&csv_path)?));

        Ok(Self {
            records,
            csv_writer,
            records_path,
            csv_path,
        })
    }

    pub fn write_game(&mut self, metrics: &GameMetrics) -> Result<(), Box<dyn std::error::Error>> {
        match &mut self.records {
            Records::Lines(writer) => {
                let json = serde_json::to_string(metrics)?;
                writeln!(writer, "{json}")?;
                writer.flush()?;
            }
            Records::Array { pending, .. } => pending.push(metrics.clone()),
        }

        let row: CsvSummaryRow = metrics.into();
        self.csv_writer.serialize(&row)?;
        self.csv_writer.flush()?;
        Ok(())
    }

    pub fn finish(mut self) -> Result<(), Box<dyn std::error::Error>> {
        match &mut self.records {
            Records::Lines(writer) => writer.flush()?,
            Records::Array { writer, pending } => {
                serde_json::to_writer_pretty(&mut *writer, pending)?;
                writeln!(writer)?;
                writer.flush()?;
            }
        }
        self.csv_writer.flush()?;
        Ok(())
    }

    pub fn output_paths(&self) -> (&PathBuf, &PathBuf) {
        (&self.records_path, &self.csv_path)
    }
}

fn create_truncated(path: &Path) -> std::io::Result<File> {
    OpenOptions::new()
        .create(true)
        .write(true)
        .truncate(true)
        .open(path)
}
