//! Rendering of allocation results.
//!
//! Three formats are supported:
//! - `table`: box-drawn table for terminals
//! - `json`: pretty-printed document for scripts
//! - `csv`: one record per macro plus a total record

use crate::{Allocation, CalorieTarget, Macro, MacroPercentages, Result};
use serde::{Deserialize, Serialize};
use std::io::Write;
use std::str::FromStr;

/// Output format for a report
#[derive(Clone, Copy, Debug, Serialize, Deserialize, PartialEq, Eq, Default)]
#[serde(rename_all = "snake_case")]
pub enum OutputFormat {
    #[default]
    Table,
    Json,
    Csv,
}

impl FromStr for OutputFormat {
    type Err = String;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "table" => Ok(OutputFormat::Table),
            "json" => Ok(OutputFormat::Json),
            "csv" => Ok(OutputFormat::Csv),
            other => Err(format!(
                "unknown format '{}' (expected table, json or csv)",
                other
            )),
        }
    }
}

/// Line announcing a TDEE-derived target, e.g. `20% of 2500 is 2000`
pub fn tdee_summary(target: &CalorieTarget) -> Option<String> {
    match *target {
        CalorieTarget::FromTdee {
            tdee,
            percent_deficit,
            calories,
        } => Some(format!("{:2}% of {} is {}", percent_deficit, tdee, calories)),
        CalorieTarget::Direct(_) => None,
    }
}

/// Write the report for `allocation` in the requested format
pub fn write_report<W: Write>(
    out: &mut W,
    format: OutputFormat,
    target: &CalorieTarget,
    allocation: &Allocation,
) -> Result<()> {
    match format {
        OutputFormat::Table => {
            if let Some(summary) = tdee_summary(target) {
                writeln!(out, "{}", summary)?;
            }
            writeln!(out, "{}", render_table(allocation))?;
        }
        OutputFormat::Json => write_json(out, target, allocation)?,
        OutputFormat::Csv => write_csv(out, allocation)?,
    }
    Ok(())
}

// ============================================================================
// Table
// ============================================================================

#[derive(Clone, Copy, PartialEq, Eq)]
enum Align {
    Left,
    Right,
}

struct Cell {
    text: String,
    align: Align,
}

impl Cell {
    fn text(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            align: Align::Left,
        }
    }

    fn number(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            align: Align::Right,
        }
    }

    fn width(&self) -> usize {
        self.text.chars().count()
    }
}

type Row = [Cell; 4];

/// Render the allocation as a light box-drawn table.
///
/// Rows are Fat, Protein, Carbs; the footer sums the adjusted integer
/// percentages, which may not total 100.
pub fn render_table(allocation: &Allocation) -> String {
    let header: Row = [
        Cell::text("MACRO"),
        Cell::text("GRAMS"),
        Cell::text("PERCENTAGE"),
        Cell::text("CALORIES"),
    ];

    let body: Vec<Row> = Macro::ALL
        .iter()
        .map(|&kind| {
            let amount = allocation.macros.get(kind);
            [
                Cell::text(kind.label()),
                Cell::number(amount.grams.to_string()),
                Cell::number(format!("{:4.1}", allocation.calorie_share(kind))),
                Cell::number(amount.calories.to_string()),
            ]
        })
        .collect();

    let footer: Row = [
        Cell::text("TOTAL"),
        Cell::text("-"),
        Cell::number(allocation.percentages.total().to_string()),
        Cell::number(allocation.calories.to_string()),
    ];

    let mut widths = [0usize; 4];
    for row in std::iter::once(&header)
        .chain(body.iter())
        .chain(std::iter::once(&footer))
    {
        for (width, cell) in widths.iter_mut().zip(row.iter()) {
            *width = (*width).max(cell.width());
        }
    }

    let mut lines = Vec::with_capacity(body.len() + 6);
    lines.push(border(&widths, '┌', '┬', '┐'));
    lines.push(row_line(&header, &widths));
    lines.push(border(&widths, '├', '┼', '┤'));
    lines.extend(body.iter().map(|row| row_line(row, &widths)));
    lines.push(border(&widths, '├', '┼', '┤'));
    lines.push(row_line(&footer, &widths));
    lines.push(border(&widths, '└', '┴', '┘'));
    lines.join("\n")
}

fn border(widths: &[usize; 4], left: char, join: char, right: char) -> String {
    let segments: Vec<String> = widths.iter().map(|w| "─".repeat(w + 2)).collect();
    format!("{}{}{}", left, segments.join(&join.to_string()), right)
}

fn row_line(row: &Row, widths: &[usize; 4]) -> String {
    let cells: Vec<String> = row
        .iter()
        .zip(widths.iter())
        .map(|(cell, &width)| match cell.align {
            Align::Left => format!(" {:<width$} ", cell.text, width = width),
            Align::Right => format!(" {:>width$} ", cell.text, width = width),
        })
        .collect();
    format!("│{}│", cells.join("│"))
}

// ============================================================================
// JSON
// ============================================================================

#[derive(Debug, Serialize)]
struct JsonReport {
    calories: i64,
    #[serde(skip_serializing_if = "Option::is_none")]
    tdee: Option<JsonTdee>,
    percentages: MacroPercentages,
    carb_limit_applied: bool,
    macros: Vec<JsonMacro>,
}

#[derive(Debug, Serialize)]
struct JsonTdee {
    tdee: i64,
    percent_deficit: i64,
}

#[derive(Debug, Serialize)]
struct JsonMacro {
    #[serde(rename = "macro")]
    kind: Macro,
    grams: i64,
    calories: i64,
    percentage: f64,
}

fn write_json<W: Write>(out: &mut W, target: &CalorieTarget, allocation: &Allocation) -> Result<()> {
    let tdee = match *target {
        CalorieTarget::FromTdee {
            tdee,
            percent_deficit,
            ..
        } => Some(JsonTdee {
            tdee,
            percent_deficit,
        }),
        CalorieTarget::Direct(_) => None,
    };

    let report = JsonReport {
        calories: allocation.calories,
        tdee,
        percentages: allocation.percentages,
        carb_limit_applied: allocation.carb_limit_applied,
        macros: Macro::ALL
            .iter()
            .map(|&kind| {
                let amount = allocation.macros.get(kind);
                JsonMacro {
                    kind,
                    grams: amount.grams,
                    calories: amount.calories,
                    percentage: allocation.calorie_share(kind),
                }
            })
            .collect(),
    };

    serde_json::to_writer_pretty(&mut *out, &report)?;
    writeln!(out)?;
    Ok(())
}

// ============================================================================
// CSV
// ============================================================================

/// A row in the CSV output
#[derive(Debug, Serialize)]
struct CsvRow {
    #[serde(rename = "macro")]
    name: &'static str,
    grams: Option<i64>,
    percentage: String,
    calories: i64,
}

fn write_csv<W: Write>(out: &mut W, allocation: &Allocation) -> Result<()> {
    let mut writer = csv::Writer::from_writer(out);

    for &kind in Macro::ALL.iter() {
        let amount = allocation.macros.get(kind);
        writer.serialize(CsvRow {
            name: kind.label(),
            grams: Some(amount.grams),
            percentage: format!("{:.1}", allocation.calorie_share(kind)),
            calories: amount.calories,
        })?;
    }

    writer.serialize(CsvRow {
        name: "Total",
        grams: None,
        percentage: allocation.percentages.total().to_string(),
        calories: allocation.calories,
    })?;

    writer.flush()?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{allocate, MacroConfig};

    fn scenario(calories: i64, limit: Option<i64>, pct: MacroPercentages) -> Allocation {
        let config = MacroConfig {
            percentages: pct,
            hard_carb_limit: limit,
            calories: Some(calories),
            ..MacroConfig::default()
        };
        allocate(&config, calories)
    }

    #[test]
    fn test_render_default_table() {
        let allocation = scenario(2000, None, MacroPercentages::default());
        let expected = "\
┌─────────┬───────┬────────────┬──────────┐
│ MACRO   │ GRAMS │ PERCENTAGE │ CALORIES │
├─────────┼───────┼────────────┼──────────┤
│ Fat     │   133 │       60.0 │     1200 │
│ Protein │   150 │       30.0 │      600 │
│ Carbs   │    50 │       10.0 │      200 │
├─────────┼───────┼────────────┼──────────┤
│ TOTAL   │ -     │        100 │     2000 │
└─────────┴───────┴────────────┴──────────┘";
        assert_eq!(render_table(&allocation), expected);
    }

    #[test]
    fn test_render_clamped_table() {
        let allocation = scenario(2000, Some(20), MacroPercentages::new(50, 20, 30));
        let table = render_table(&allocation);
        assert!(table.contains("│ Carbs   │    20 │        4.0 │       80 │"));
        assert!(table.contains("│ Protein │   330 │       66.0 │     1320 │"));
        assert!(table.contains("│ Fat     │    66 │       30.0 │      600 │"));
    }

    #[test]
    fn test_parse_output_format() {
        assert_eq!("json".parse::<OutputFormat>(), Ok(OutputFormat::Json));
        assert_eq!("CSV".parse::<OutputFormat>(), Ok(OutputFormat::Csv));
        assert!("xml".parse::<OutputFormat>().is_err());
    }

    #[test]
    fn test_tdee_summary() {
        let target = CalorieTarget::resolve(None, Some(2500), 20).unwrap();
        assert_eq!(tdee_summary(&target).as_deref(), Some("20% of 2500 is 2000"));

        let target = CalorieTarget::resolve(None, Some(2500), 5).unwrap();
        assert_eq!(tdee_summary(&target).as_deref(), Some(" 5% of 2500 is 2375"));

        assert_eq!(tdee_summary(&CalorieTarget::Direct(2000)), None);
    }

    #[test]
    fn test_table_report_includes_tdee_line() {
        let target = CalorieTarget::resolve(None, Some(2500), 20).unwrap();
        let allocation = scenario(target.calories(), None, MacroPercentages::default());

        let mut out = Vec::new();
        write_report(&mut out, OutputFormat::Table, &target, &allocation).unwrap();
        let text = String::from_utf8(out).unwrap();

        assert!(text.starts_with("20% of 2500 is 2000\n┌"));
        assert!(text.ends_with("┘\n"));
    }

    #[test]
    fn test_json_report() {
        let target = CalorieTarget::Direct(2000);
        let allocation = scenario(2000, Some(20), MacroPercentages::new(50, 20, 30));

        let mut out = Vec::new();
        write_report(&mut out, OutputFormat::Json, &target, &allocation).unwrap();
        let value: serde_json::Value = serde_json::from_slice(&out).unwrap();

        assert_eq!(value["calories"], 2000);
        assert!(value.get("tdee").is_none());
        assert_eq!(value["carb_limit_applied"], true);
        assert_eq!(value["percentages"]["protein"], 66);
        assert_eq!(value["macros"][0]["macro"], "fat");
        assert_eq!(value["macros"][0]["grams"], 66);
        assert_eq!(value["macros"][2]["calories"], 80);
    }

    #[test]
    fn test_csv_report() {
        let target = CalorieTarget::Direct(2000);
        let allocation = scenario(2000, None, MacroPercentages::default());

        let mut out = Vec::new();
        write_report(&mut out, OutputFormat::Csv, &target, &allocation).unwrap();
        let text = String::from_utf8(out).unwrap();

        let expected = "\
macro,grams,percentage,calories
Fat,133,60.0,1200
Protein,150,30.0,600
Carbs,50,10.0,200
Total,,100,2000
";
        assert_eq!(text, expected);
    }
}
