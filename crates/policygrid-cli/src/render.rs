use std::io::{self, IsTerminal, Write};

use anyhow::anyhow;
use policygrid_core::columns::{cell_text, visible_columns};
use policygrid_core::grid::GridState;
use policygrid_core::stats::StatsState;
use policygrid_shared::{GridRow, StatusId};
use unicode_width::UnicodeWidthStr;

#[derive(Debug, Clone)]
pub struct Renderer {
    color: bool,
}

impl Renderer {
    pub fn new(color_setting: Option<&str>) -> anyhow::Result<Self> {
        let color = match color_setting
            .unwrap_or("on")
            .to_ascii_lowercase()
            .as_str()
        {
            "on" | "yes" | "true" | "1" => true,
            "off" | "no" | "false" | "0" => false,
            other => return Err(anyhow!("invalid color setting: {other}")),
        };

        Ok(Self { color })
    }

    #[tracing::instrument(skip_all)]
    pub fn print_stats(&self, stats: &StatsState) -> anyhow::Result<()> {
        let mut out = io::stdout().lock();

        let headers = vec!["Status".to_string(), "Name".to_string(), "Count".to_string()];
        let mut rows = vec![vec![
            self.paint("ALL", "1"),
            "All".to_string(),
            stats.total_count().to_string(),
        ]];
        for status in stats.statuses() {
            rows.push(vec![
                self.paint_status(&status.id),
                status.display_name(),
                status.count.to_string(),
            ]);
        }

        write_table(&mut out, headers, rows)?;

        let lines = stats
            .lines_of_business()
            .iter()
            .map(|lob| lob.as_str())
            .collect::<Vec<_>>()
            .join(", ");
        if !lines.is_empty() {
            writeln!(out)?;
            writeln!(out, "lines of business  {lines}")?;
        }
        Ok(())
    }

    #[tracing::instrument(skip_all)]
    pub fn print_grid(&self, grid: &GridState) -> anyhow::Result<()> {
        let mut out = io::stdout().lock();

        let columns = visible_columns().collect::<Vec<_>>();
        let headers = columns
            .iter()
            .map(|column| match grid.sort_for(column.field) {
                Some(sort) => format!("{} ({})", column.header_name, sort.as_str()),
                None => column.header_name.to_string(),
            })
            .collect::<Vec<_>>();

        let rows: Vec<Vec<String>> = grid
            .rows()
            .iter()
            .map(|row| {
                columns
                    .iter()
                    .map(|column| self.cell(row, column.field))
                    .collect()
            })
            .collect();

        write_table(&mut out, headers, rows)?;
        writeln!(out)?;
        writeln!(
            out,
            "{}  (page {} of {})",
            grid.row_range_label(),
            grid.page() + 1,
            grid.page_count()
        )?;
        Ok(())
    }

    fn cell(&self, row: &GridRow, field: &str) -> String {
        if field == "status" {
            return self.paint_status(&row.status);
        }
        cell_text(row, field)
    }

    fn paint_status(&self, id: &StatusId) -> String {
        let code = match id {
            StatusId::Bound | StatusId::Issued => "32",
            StatusId::Closed => "90",
            StatusId::Quoted => "36",
            StatusId::PendingQuote | StatusId::PendingRenewal | StatusId::ApprovalPending => {
                "33"
            }
            StatusId::InDesign | StatusId::Other(_) => "0",
        };
        self.paint(id.as_str(), code)
    }

    fn paint(&self, text: &str, code: &str) -> String {
        if !self.color || code == "0" || !io::stdout().is_terminal() {
            return text.to_string();
        }
        format!("\x1b[{code}m{text}\x1b[0m")
    }
}

fn write_table<W: Write>(
    mut writer: W,
    headers: Vec<String>,
    rows: Vec<Vec<String>>,
) -> anyhow::Result<()> {
    let mut widths = headers
        .iter()
        .map(|header| UnicodeWidthStr::width(header.as_str()))
        .collect::<Vec<_>>();

    for row in &rows {
        for (idx, cell) in row.iter().enumerate() {
            if let Some(width) = widths.get_mut(idx) {
                *width = (*width).max(UnicodeWidthStr::width(strip_ansi(cell).as_str()));
            }
        }
    }

    for (header, width) in headers.iter().zip(widths.iter().copied()) {
        write!(writer, "{header:width$} ")?;
    }
    writeln!(writer)?;

    for width in widths.iter().copied() {
        write!(writer, "{:-<width$} ", "")?;
    }
    writeln!(writer)?;

    for row in rows {
        for (cell, width) in row.iter().zip(&widths) {
            let visible_width = UnicodeWidthStr::width(strip_ansi(cell).as_str());
            let padding = width.saturating_sub(visible_width);
            write!(writer, "{}{} ", cell, " ".repeat(padding))?;
        }
        writeln!(writer)?;
    }

    Ok(())
}

fn strip_ansi(s: &str) -> String {
    let mut out = String::with_capacity(s.len());
    let mut escaped = false;

    for ch in s.chars() {
        if escaped {
            if ch == 'm' {
                escaped = false;
            }
            continue;
        }

        if ch == '\x1b' {
            escaped = true;
            continue;
        }

        out.push(ch);
    }

    out
}
