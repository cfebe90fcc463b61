//! Terminal rendering of conversation messages.
//!
//! Everything here builds plain strings; colours come from `colored` and are
//! applied after padding so ANSI codes never disturb column alignment.

use colored::{Color, ColoredString, Colorize};
use estate_core::report::DownloadOutcome;
use estate_core::session::{Message, Sender};
use estate_core::view::{
    ChartView, GrowthCallout, TableGroup, TrendColor, render_chart, render_growth, render_table,
};

const SPARK_BARS: [char; 8] = ['▁', '▂', '▃', '▄', '▅', '▆', '▇', '█'];

pub fn print_message(message: &Message) {
    print!("{}", format_message(message));
}

pub fn print_download(outcome: &DownloadOutcome) {
    println!("{}", format_download(outcome));
}

pub fn format_message(message: &Message) -> String {
    let mut out = String::new();

    match message.sender {
        Sender::User => {
            out.push_str(&format!("{}\n", format!("> {}", message.text).green()));
        }
        Sender::Bot => {
            for line in message.text.lines() {
                out.push_str(&format!("{}\n", line.bright_blue()));
            }
            if let Some(chart) = render_chart(message.chart.as_ref()) {
                out.push_str(&format_chart(&chart));
            }
            if let Some(callout) = render_growth(message.growth.as_ref()) {
                out.push_str(&format_growth(&callout));
            }
            if let Some(groups) = render_table(message.table.as_deref()) {
                for group in &groups {
                    out.push_str(&format_table_group(group));
                }
            }
            out.push('\n');
        }
    }

    out
}

pub fn format_chart(chart: &ChartView) -> String {
    if chart.rows.is_empty() {
        return String::new();
    }

    let headers: Vec<String> = std::iter::once("year".to_string())
        .chain(chart.series.iter().map(|s| s.label.clone()))
        .collect();
    let cells: Vec<Vec<String>> = chart
        .rows
        .iter()
        .map(|row| {
            std::iter::once(row.year.clone())
                .chain(chart.series.iter().map(|s| format_value(row.value(&s.label))))
                .collect()
        })
        .collect();
    let widths = column_widths(&headers, &cells);
    let colors: Vec<Color> = std::iter::once(Color::BrightBlack)
        .chain(chart.series.iter().map(|s| series_color(s.color)))
        .collect();

    let mut out = String::from("\n");
    let header_line: Vec<String> = headers
        .iter()
        .zip(&widths)
        .zip(&colors)
        .map(|((h, &w), &c)| pad(h, w).color(c).bold().to_string())
        .collect();
    out.push_str(&format!("  {}\n", header_line.join("  ")));

    for row in &cells {
        let line: Vec<String> = row.iter().zip(&widths).map(|(c, &w)| pad(c, w)).collect();
        out.push_str(&format!("  {}\n", line.join("  ")));
    }

    for (series, color) in chart.series.iter().zip(colors.iter().skip(1)) {
        let values: Vec<Option<f64>> = chart.rows.iter().map(|r| r.value(&series.label)).collect();
        out.push_str(&format!(
            "  {} {}\n",
            sparkline(&values).color(*color),
            series.label.color(*color)
        ));
    }

    out
}

pub fn format_growth(callout: &GrowthCallout) -> String {
    let color = match callout.color() {
        TrendColor::Green => Color::Green,
        TrendColor::Red => Color::Red,
        TrendColor::Gray => Color::BrightBlack,
    };
    let bar: ColoredString = "│".color(color);

    let mut out = String::from("\n");
    out.push_str(&format!(
        "{} {}\n",
        bar,
        format!("Growth Analysis ({})", callout.label).bright_black()
    ));
    out.push_str(&format!(
        "{} Initial {}   {}   Current {}\n",
        bar,
        format_number(callout.initial).bold(),
        format!("{} {}%", callout.glyph(), format_number(callout.percent_change))
            .color(color)
            .bold(),
        format_number(callout.final_value).bold()
    ));
    out
}

pub fn format_table_group(group: &TableGroup) -> String {
    let cells = group.cells();
    let widths = column_widths(&group.columns, &cells);

    let mut out = String::from("\n");
    out.push_str(&format!("{}\n", format!("📍 {}", group.location).bright_blue().bold()));

    let header: Vec<String> = group
        .columns
        .iter()
        .zip(&widths)
        .map(|(c, &w)| pad(c, w).bright_black().bold().to_string())
        .collect();
    out.push_str(&format!("  {}\n", header.join("  ")));

    for row in &cells {
        let line: Vec<String> = row.iter().zip(&widths).map(|(c, &w)| pad(c, w)).collect();
        out.push_str(&format!("  {}\n", line.join("  ").trim_end()));
    }

    out
}

pub fn format_download(outcome: &DownloadOutcome) -> String {
    match outcome {
        DownloadOutcome::Saved { path, bytes } => {
            format!("⬇ Report saved to {} ({} bytes)", path.display(), bytes)
                .green()
                .to_string()
        }
        DownloadOutcome::Failed { alert } => format!("⚠ {}", alert).red().bold().to_string(),
    }
}

/// Unicode sparkline; missing points render as spaces.
pub fn sparkline(values: &[Option<f64>]) -> String {
    let present: Vec<f64> = values.iter().flatten().copied().collect();
    let min = present.iter().copied().fold(f64::INFINITY, f64::min);
    let max = present.iter().copied().fold(f64::NEG_INFINITY, f64::max);
    let span = max - min;

    values
        .iter()
        .map(|value| match value {
            None => ' ',
            Some(_) if span <= 0.0 => SPARK_BARS[3],
            Some(v) => {
                let idx = ((v - min) / span * (SPARK_BARS.len() - 1) as f64).round() as usize;
                SPARK_BARS[idx.min(SPARK_BARS.len() - 1)]
            }
        })
        .collect()
}

/// Display width of each column: the widest of its header and cells.
pub fn column_widths(headers: &[String], rows: &[Vec<String>]) -> Vec<usize> {
    headers
        .iter()
        .enumerate()
        .map(|(i, header)| {
            rows.iter()
                .filter_map(|row| row.get(i))
                .map(|cell| cell.chars().count())
                .chain(std::iter::once(header.chars().count()))
                .max()
                .unwrap_or(0)
        })
        .collect()
}

/// Parses `#rrggbb`.
pub fn hex_rgb(hex: &str) -> Option<(u8, u8, u8)> {
    let digits = hex.strip_prefix('#')?;
    if digits.len() != 6 {
        return None;
    }
    let channel = |range: std::ops::Range<usize>| u8::from_str_radix(digits.get(range)?, 16).ok();
    Some((channel(0..2)?, channel(2..4)?, channel(4..6)?))
}

fn series_color(hex: &str) -> Color {
    hex_rgb(hex)
        .map(|(r, g, b)| Color::TrueColor { r, g, b })
        .unwrap_or(Color::White)
}

fn format_value(value: Option<f64>) -> String {
    value.map(format_number).unwrap_or_default()
}

fn format_number(value: f64) -> String {
    format!("{}", value)
}

fn pad(text: &str, width: usize) -> String {
    format!("{:<width$}", text, width = width)
}
