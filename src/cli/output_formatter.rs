use colored::*;
use serde_json::{json, Value as JsonValue};

use crate::cli::cli_args::OutputFormat;
use crate::utils::types::{ResultTable, Value};

/// Formats query results for CLI output
pub struct OutputFormatter;

impl OutputFormatter {
    /// Format a result table according to the specified format
    pub fn format_result(result: &ResultTable, format: &OutputFormat) -> String {
        match format {
            OutputFormat::Table => Self::format_table(result),
            OutputFormat::Json => Self::format_json(result),
            OutputFormat::Csv => Self::format_csv(result),
        }
    }

    /// Format results as a colored table
    fn format_table(result: &ResultTable) -> String {
        if result.is_empty() {
            return "No results found.".dimmed().to_string();
        }

        let mut output = String::new();

        // Column widths are measured on the uncolored text
        let mut col_widths: Vec<usize> = result
            .columns
            .iter()
            .map(|col| col.name.chars().count())
            .collect();

        for row in &result.rows {
            for (i, value) in row.values.iter().enumerate() {
                if i < col_widths.len() {
                    let value_str = Self::value_to_string(value);
                    col_widths[i] = col_widths[i].max(value_str.chars().count());
                }
            }
        }

        for width in &mut col_widths {
            *width = (*width).max(8);
        }

        // Header
        output.push_str(&Self::format_table_separator(&col_widths, true));
        output.push('|');
        for (i, col) in result.columns.iter().enumerate() {
            output.push_str(&format!(
                " {} |",
                Self::pad(col.name.bold().cyan(), &col.name, col_widths[i])
            ));
        }
        output.push('\n');
        output.push_str(&Self::format_table_separator(&col_widths, false));

        // Data rows
        for row in &result.rows {
            output.push('|');
            for (i, value) in row.values.iter().enumerate() {
                if i < col_widths.len() {
                    let plain = Self::value_to_string(value);
                    output.push_str(&format!(
                        " {} |",
                        Self::pad(Self::format_value_colored(value), &plain, col_widths[i])
                    ));
                }
            }
            output.push('\n');
        }

        output.push_str(&Self::format_table_separator(&col_widths, true));

        output.push_str(&format!(
            "\n{} {}\n",
            result.row_count().to_string().green().bold(),
            if result.row_count() == 1 { "row" } else { "rows" }
        ));

        output
    }

    /// Left-align colored text using the width of its plain form
    fn pad(colored_text: ColoredString, plain: &str, width: usize) -> String {
        let fill = width.saturating_sub(plain.chars().count());
        format!("{}{}", colored_text, " ".repeat(fill))
    }

    /// Format table separator line
    fn format_table_separator(col_widths: &[usize], is_border: bool) -> String {
        let edge = if is_border { '+' } else { '|' };
        let mut separator = String::new();

        separator.push(edge);
        for &width in col_widths {
            separator.push_str(&"-".repeat(width + 2));
            separator.push(edge);
        }

        separator.push('\n');
        separator
    }

    /// Format results as JSON
    fn format_json(result: &ResultTable) -> String {
        let rows: Vec<JsonValue> = result
            .rows
            .iter()
            .map(|row| {
                let mut row_obj = serde_json::Map::new();
                for (i, value) in row.values.iter().enumerate() {
                    if let Some(col) = result.columns.get(i) {
                        row_obj.insert(col.name.clone(), Self::value_to_json(value));
                    }
                }
                JsonValue::Object(row_obj)
            })
            .collect();

        let output = json!({
            "data": rows,
            "metadata": {
                "columns": result.columns.iter().map(|col| {
                    json!({
                        "name": col.name,
                        "type": format!("{:?}", col.data_type),
                        "nullable": col.nullable
                    })
                }).collect::<Vec<_>>(),
                "row_count": result.row_count()
            }
        });

        serde_json::to_string_pretty(&output).unwrap_or_else(|_| "{}".to_string())
    }

    /// Format results as CSV
    fn format_csv(result: &ResultTable) -> String {
        let mut output = String::new();

        let headers: Vec<String> = result
            .columns
            .iter()
            .map(|col| Self::escape_csv_field(&col.name))
            .collect();
        output.push_str(&headers.join(","));
        output.push('\n');

        for row in &result.rows {
            let values: Vec<String> = row
                .values
                .iter()
                .map(|value| match value {
                    Value::Null => String::new(),
                    other => Self::escape_csv_field(&Self::value_to_string(other)),
                })
                .collect();
            output.push_str(&values.join(","));
            output.push('\n');
        }

        output
    }

    /// Convert a Value to a display string
    fn value_to_string(value: &Value) -> String {
        match value {
            Value::Text(s) => s.clone(),
            Value::Integer(i) => i.to_string(),
            Value::Float(f) => format!("{:.2}", f),
            Value::Null => "NULL".to_string(),
        }
    }

    /// Convert a Value to a colored string for table display
    fn format_value_colored(value: &Value) -> ColoredString {
        match value {
            Value::Text(s) => s.normal(),
            Value::Integer(i) => i.to_string().blue(),
            Value::Float(f) => format!("{:.2}", f).blue(),
            Value::Null => "NULL".dimmed(),
        }
    }

    /// Convert a Value to JSON
    fn value_to_json(value: &Value) -> JsonValue {
        match value {
            Value::Text(s) => JsonValue::String(s.clone()),
            Value::Integer(i) => JsonValue::Number((*i).into()),
            Value::Float(f) => serde_json::Number::from_f64(*f)
                .map(JsonValue::Number)
                .unwrap_or(JsonValue::Null),
            Value::Null => JsonValue::Null,
        }
    }

    /// Escape CSV field if it contains special characters
    fn escape_csv_field(field: &str) -> String {
        if field.contains(',') || field.contains('"') || field.contains('\n') {
            format!("\"{}\"", field.replace('"', "\"\""))
        } else {
            field.to_string()
        }
    }

    /// Format error message for CLI display
    pub fn format_error(error: &crate::utils::error::StatsError) -> String {
        format!("{} {}", "Error:".red().bold(), error.to_string().red())
    }

    /// Format info message for CLI display
    pub fn format_info(message: &str) -> String {
        format!("{} {}", "Info:".blue().bold(), message)
    }
}
