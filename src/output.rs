use crate::cli::{Mode, OutputFormat};
use crate::error::Result;
use crate::log_info;
use crate::records::{ResultSet, Row};
use crate::utils::ensure_directory;
use std::fs;
use std::io::{self, Write};
use std::path::Path;

const CSV_SEPARATOR: char = ',';
const TIMESTAMP_FORMAT: &str = "%Y-%m-%d_%H-%M-%S";

/// Hands a finished result set to the selected sink.
pub fn control_output(
    results: &ResultSet,
    mode: Mode,
    format: Option<OutputFormat>,
    results_dir: &Path,
) -> Result<()> {
    match format {
        None => plain_output(results),
        Some(OutputFormat::Pretty) => pretty_output(results),
        Some(OutputFormat::File) => file_output(results, mode, results_dir)?,
    }
    Ok(())
}

fn plain_output(results: &ResultSet) {
    for row in results.rows() {
        println!("{}", row.join(" "));
    }
}

fn pretty_output(results: &ResultSet) {
    print!("{}", render_table(results.rows()));
}

fn file_output(results: &ResultSet, mode: Mode, results_dir: &Path) -> Result<()> {
    ensure_directory(results_dir)?;

    let stamp = chrono::Local::now().format(TIMESTAMP_FORMAT);
    let path = results_dir.join(format!("{}_{}.csv", mode.as_str(), stamp));

    let mut buf: Vec<u8> = Vec::new();
    for row in results.rows() {
        write_csv_row(&mut buf, row)?;
    }
    fs::write(&path, buf)?;

    log_info!("[output] Results saved to {:?}", path);
    Ok(())
}

fn needs_quotes(field: &str) -> bool {
    field.contains(CSV_SEPARATOR)
        || field.contains('"')
        || field.contains('\n')
        || field.contains('\r')
}

fn write_csv_row<W: Write>(mut w: W, row: &[String]) -> io::Result<()> {
    let mut first = true;
    for cell in row {
        if !first {
            write!(w, "{}", CSV_SEPARATOR)?;
        } else {
            first = false;
        }
        if needs_quotes(cell) {
            let escaped = cell.replace('"', "\"\"");
            write!(w, "\"{}\"", escaped)?;
        } else {
            write!(w, "{}", cell)?;
        }
    }
    writeln!(w)
}

/// ASCII box table: border, header, border, data rows, border.
fn render_table(rows: &[Row]) -> String {
    let columns = rows.iter().map(Vec::len).max().unwrap_or(0);
    let mut widths = vec![0usize; columns];
    for row in rows {
        for (i, cell) in row.iter().enumerate() {
            widths[i] = widths[i].max(cell.chars().count());
        }
    }

    let mut border = String::from("+");
    for width in &widths {
        border.push_str(&"-".repeat(width + 2));
        border.push('+');
    }
    border.push('\n');

    let format_row = |row: &Row| {
        let mut line = String::from("|");
        for (i, width) in widths.iter().enumerate() {
            let cell = row.get(i).map(String::as_str).unwrap_or("");
            let padding = width - cell.chars().count();
            line.push(' ');
            line.push_str(cell);
            line.push_str(&" ".repeat(padding + 1));
            line.push('|');
        }
        line.push('\n');
        line
    };

    let mut out = border.clone();
    if let Some(header) = rows.first() {
        out.push_str(&format_row(header));
        out.push_str(&border);
    }
    for row in rows.iter().skip(1) {
        out.push_str(&format_row(row));
    }
    out.push_str(&border);
    out
}
