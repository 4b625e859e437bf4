use crate::core::{CheckResults, FileReport};
use colored::*;
use std::io::Write;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OutputFormat {
    Json,
    Terminal,
}

pub trait OutputWriter {
    fn write_results(&mut self, results: &CheckResults) -> anyhow::Result<()>;
}

pub struct JsonWriter<W: Write> {
    writer: W,
}

impl<W: Write> JsonWriter<W> {
    pub fn new(writer: W) -> Self {
        Self { writer }
    }
}

impl<W: Write> OutputWriter for JsonWriter<W> {
    fn write_results(&mut self, results: &CheckResults) -> anyhow::Result<()> {
        let json = serde_json::to_string_pretty(results)?;
        self.writer.write_all(json.as_bytes())?;
        writeln!(self.writer)?;
        Ok(())
    }
}

/// Human-oriented listing: one `path:line:column CODE message` row per
/// finding, grouped by file, with a summary block at the end.
pub struct TerminalWriter<W: Write> {
    writer: W,
}

impl<W: Write> TerminalWriter<W> {
    pub fn new(writer: W) -> Self {
        Self { writer }
    }

    fn write_file(&mut self, file: &FileReport) -> anyhow::Result<()> {
        for diagnostic in &file.diagnostics {
            writeln!(
                self.writer,
                "{}:{}:{} {} {}",
                file.path.display().to_string().cyan(),
                diagnostic.line,
                diagnostic.column,
                diagnostic.code.as_str().yellow().bold(),
                diagnostic.message
            )?;
        }
        Ok(())
    }

    fn write_summary(&mut self, results: &CheckResults) -> anyhow::Result<()> {
        let summary = &results.summary;
        writeln!(self.writer)?;
        writeln!(
            self.writer,
            "{} {} files, {} functions",
            "checked:".bold(),
            summary.files_checked,
            summary.functions_checked
        )?;
        if summary.files_skipped > 0 {
            writeln!(
                self.writer,
                "{} {} files (unreadable or unparsable)",
                "skipped:".bold(),
                summary.files_skipped
            )?;
        }
        let verdict = if summary.total_diagnostics == 0 {
            "no documentation drift found".green().to_string()
        } else {
            format!("{} problems found", summary.total_diagnostics)
                .red()
                .bold()
                .to_string()
        };
        writeln!(self.writer, "{verdict}")?;
        Ok(())
    }
}

impl<W: Write> OutputWriter for TerminalWriter<W> {
    fn write_results(&mut self, results: &CheckResults) -> anyhow::Result<()> {
        for file in &results.files {
            self.write_file(file)?;
        }
        self.write_summary(results)?;
        Ok(())
    }
}

pub fn create_writer(format: OutputFormat) -> Box<dyn OutputWriter> {
    match format {
        OutputFormat::Json => Box::new(JsonWriter::new(std::io::stdout())),
        OutputFormat::Terminal => Box::new(TerminalWriter::new(std::io::stdout())),
    }
}

/// Writer variant for `--output`, pointing at a file instead of stdout.
pub fn create_file_writer(format: OutputFormat, file: std::fs::File) -> Box<dyn OutputWriter> {
    match format {
        OutputFormat::Json => Box::new(JsonWriter::new(file)),
        OutputFormat::Terminal => Box::new(TerminalWriter::new(file)),
    }
}
