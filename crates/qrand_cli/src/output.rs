//! Rendering of sampled points as table, CSV or JSON.

use std::io::Write;

use serde::Serialize;

use crate::config::OutputFormat;
use crate::Result;

/// Points produced by one sampling run.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum Samples {
    /// Real-valued points (uniform and Gaussian kinds)
    Real(Vec<Vec<f64>>),
    /// Integer points
    Integer(Vec<Vec<i64>>),
}

impl Samples {
    /// Number of points.
    pub fn len(&self) -> usize {
        match self {
            Samples::Real(points) => points.len(),
            Samples::Integer(points) => points.len(),
        }
    }

    /// Coordinates per point, zero when there are no points.
    pub fn dimension(&self) -> usize {
        match self {
            Samples::Real(points) => points.first().map_or(0, Vec::len),
            Samples::Integer(points) => points.first().map_or(0, Vec::len),
        }
    }

    fn rows(&self) -> Vec<Vec<String>> {
        match self {
            Samples::Real(points) => points
                .iter()
                .map(|p| p.iter().map(|x| format!("{:.6}", x)).collect())
                .collect(),
            Samples::Integer(points) => points
                .iter()
                .map(|p| p.iter().map(i64::to_string).collect())
                .collect(),
        }
    }
}

#[derive(Serialize)]
struct JsonReport<'a> {
    points: &'a Samples,
    #[serde(skip_serializing_if = "Option::is_none")]
    state: Option<&'a str>,
}

/// Writes `samples` in `format`, followed by the checkpoint when given.
///
/// JSON carries the checkpoint as a `state` field; table and CSV end with a
/// `state: ...` line.
pub fn render<W: Write>(
    out: &mut W,
    samples: &Samples,
    format: OutputFormat,
    state: Option<&str>,
) -> Result<()> {
    match format {
        OutputFormat::Json => {
            serde_json::to_writer_pretty(&mut *out, &JsonReport { points: samples, state })?;
            writeln!(out)?;
            return Ok(());
        }
        OutputFormat::Csv => write_csv(out, samples)?,
        OutputFormat::Table => write_table(out, samples)?,
    }
    if let Some(state) = state {
        writeln!(out, "state: {}", state)?;
    }
    Ok(())
}

fn header(dimension: usize) -> Vec<String> {
    std::iter::once("index".to_string())
        .chain((0..dimension).map(|d| format!("x{}", d)))
        .collect()
}

fn write_csv<W: Write>(out: &mut W, samples: &Samples) -> Result<()> {
    let mut writer = csv::Writer::from_writer(out);
    writer.write_record(header(samples.dimension()))?;
    for (i, row) in samples.rows().into_iter().enumerate() {
        writer.write_record(std::iter::once(i.to_string()).chain(row))?;
    }
    writer.flush()?;
    Ok(())
}

fn write_table<W: Write>(out: &mut W, samples: &Samples) -> Result<()> {
    let header = header(samples.dimension());
    let rows: Vec<Vec<String>> = samples
        .rows()
        .into_iter()
        .enumerate()
        .map(|(i, row)| std::iter::once(i.to_string()).chain(row).collect())
        .collect();

    let widths: Vec<usize> = (0..header.len())
        .map(|c| {
            rows.iter()
                .map(|r| r[c].len())
                .chain(std::iter::once(header[c].len()))
                .max()
                .unwrap_or(0)
        })
        .collect();

    let rule = |left: &str, mid: &str, right: &str| {
        let cells: Vec<String> = widths.iter().map(|w| "─".repeat(w + 2)).collect();
        format!("{}{}{}", left, cells.join(mid), right)
    };
    let line = |cells: &[String]| {
        let cells: Vec<String> = cells
            .iter()
            .zip(&widths)
            .map(|(cell, w)| format!(" {:>w$} ", cell, w = w))
            .collect();
        format!("│{}│", cells.join("│"))
    };

    writeln!(out, "{}", rule("┌", "┬", "┐"))?;
    writeln!(out, "{}", line(&header))?;
    writeln!(out, "{}", rule("├", "┼", "┤"))?;
    for row in &rows {
        writeln!(out, "{}", line(row))?;
    }
    writeln!(out, "{}", rule("└", "┴", "┘"))?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn rendered(samples: &Samples, format: OutputFormat, state: Option<&str>) -> String {
        let mut out = Vec::new();
        render(&mut out, samples, format, state).unwrap();
        String::from_utf8(out).unwrap()
    }

    #[test]
    fn test_csv_output() {
        let samples = Samples::Integer(vec![vec![1, 2], vec![3, 4]]);
        let text = rendered(&samples, OutputFormat::Csv, None);
        assert_eq!(text, "index,x0,x1\n0,1,2\n1,3,4\n");
    }

    #[test]
    fn test_csv_output_with_state() {
        let samples = Samples::Real(vec![vec![0.5]]);
        let text = rendered(&samples, OutputFormat::Csv, Some("1,2,1,1"));
        assert_eq!(text, "index,x0\n0,0.500000\nstate: 1,2,1,1\n");
    }

    #[test]
    fn test_json_output() {
        let samples = Samples::Real(vec![vec![0.25, 0.75]]);
        let text = rendered(&samples, OutputFormat::Json, Some("2,2,3,1,2,1"));
        let value: serde_json::Value = serde_json::from_str(&text).unwrap();
        assert_eq!(value["points"][0][1], 0.75);
        assert_eq!(value["state"], "2,2,3,1,2,1");

        let text = rendered(&samples, OutputFormat::Json, None);
        let value: serde_json::Value = serde_json::from_str(&text).unwrap();
        assert!(value.get("state").is_none());
    }

    #[test]
    fn test_table_output() {
        let samples = Samples::Integer(vec![vec![7], vec![-12]]);
        let text = rendered(&samples, OutputFormat::Table, None);
        let lines: Vec<&str> = text.lines().collect();
        assert_eq!(lines.len(), 6);
        assert_eq!(lines[1], "│ index │  x0 │");
        assert_eq!(lines[4], "│     1 │ -12 │");
    }

    #[test]
    fn test_empty_samples() {
        let samples = Samples::Real(Vec::new());
        assert_eq!(samples.len(), 0);
        assert_eq!(rendered(&samples, OutputFormat::Csv, None), "index\n");
    }
}
