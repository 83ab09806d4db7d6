// loadstats_analyze - summary charts
// Copyright (C) 2025 loadstats_analyze contributors
//
// This program is free software: you can redistribute it and/or modify
// it under the terms of the GNU General Public License as published by
// the Free Software Foundation, either version 3 of the License, or
// (at your option) any later version.
//
// This program is distributed in the hope that it will be useful,
// but WITHOUT ANY WARRANTY; without even the implied warranty of
// MERCHANTABILITY or FITNESS FOR A PARTICULAR PURPOSE.  See the
// GNU General Public License for more details.
//
// You should have received a copy of the GNU General Public License
// along with this program.  If not, see <https://www.gnu.org/licenses/>.

//! # Charts
//!
//! Multi-panel PNG bar charts, one bar per region:
//! - `performance_analysis.png`: avg response, error rate, throughput, p95 (2x2)
//! - `system_metrics_analysis.png`: CPU, memory, load, I/O read, I/O write
//!   and a text summary panel (2x3)

use std::error::Error;
use std::path::Path;

use plotters::coord::Shift;
use plotters::prelude::*;

use crate::aggregate::RegionSummary;
use crate::error::{AnalyzeError, Result};
use crate::k6::LoadTestSummary;
use crate::region::{rollup_regions, rollup_text};

type Panel<'a> = DrawingArea<BitMapBackend<'a>, Shift>;
type DrawResult = std::result::Result<(), Box<dyn Error>>;

const SKYBLUE: RGBColor = RGBColor(135, 206, 235);
const LIGHTGREEN: RGBColor = RGBColor(144, 238, 144);
const GOLD: RGBColor = RGBColor(255, 215, 0);
const ORANGE: RGBColor = RGBColor(255, 165, 0);
const PURPLE: RGBColor = RGBColor(128, 0, 128);
const BROWN: RGBColor = RGBColor(165, 42, 42);
const STEELBLUE: RGBColor = RGBColor(70, 130, 180);

/// One set of bars in a panel. Narrower sets are drawn over wider ones.
struct Bars<'a> {
    label: &'a str,
    values: Vec<f64>,
    color: RGBColor,
    alpha: f64,
    width: f64,
}

fn bar_panel(area: &Panel, title: &str, y_desc: &str, labels: &[String], bars: &[Bars]) -> DrawResult {
    let n = labels.len();
    if n == 0 {
        return Ok(());
    }
    let peak = bars
        .iter()
        .flat_map(|b| b.values.iter().copied())
        .fold(0.0_f64, f64::max);
    let y_max = if peak > 0.0 { peak * 1.1 } else { 1.0 };

    let mut chart = ChartBuilder::on(area)
        .caption(title, ("sans-serif", 22))
        .margin(12)
        .x_label_area_size(40)
        .y_label_area_size(60)
        .build_cartesian_2d(-0.5f64..(n as f64 - 0.5), 0f64..y_max)?;

    let x_label = |x: &f64| {
        let idx = x.round();
        if (x - idx).abs() < 1e-6 && idx >= 0.0 {
            labels.get(idx as usize).cloned().unwrap_or_default()
        } else {
            String::new()
        }
    };
    chart
        .configure_mesh()
        .disable_x_mesh()
        .x_labels(n + 1)
        .x_label_formatter(&x_label)
        .y_desc(y_desc)
        .draw()?;

    for b in bars {
        let half = b.width / 2.0;
        let style = b.color.mix(b.alpha).filled();
        chart
            .draw_series(b.values.iter().enumerate().map(|(i, v)| {
                let x = i as f64;
                Rectangle::new([(x - half, 0.0), (x + half, *v)], style)
            }))?
            .label(b.label)
            .legend(move |(x, y)| Rectangle::new([(x, y - 5), (x + 10, y + 5)], style));
    }
    if bars.len() > 1 {
        chart
            .configure_series_labels()
            .background_style(WHITE.mix(0.8))
            .border_style(BLACK)
            .draw()?;
    }
    Ok(())
}

fn text_panel(area: &Panel, text: &str) -> DrawResult {
    let style = TextStyle::from(("monospace", 20).into_font());
    for (i, line) in text.lines().enumerate() {
        area.draw_text(line, &style, (30, 40 + i as i32 * 30))?;
    }
    Ok(())
}

fn render_err(path: &Path, e: Box<dyn Error>) -> AnalyzeError {
    AnalyzeError::Render {
        path: path.to_path_buf(),
        message: e.to_string(),
    }
}

fn draw_load_tests(path: &Path, runs: &[LoadTestSummary], size: (u32, u32)) -> DrawResult {
    let root = BitMapBackend::new(path, size).into_drawing_area();
    root.fill(&WHITE)?;
    let panels = root.split_evenly((2, 2));
    let labels: Vec<String> = runs.iter().map(|r| r.region.clone()).collect();
    let single = |label, values: Vec<f64>, color| {
        [Bars {
            label,
            values,
            color,
            alpha: 0.7,
            width: 0.8,
        }]
    };

    bar_panel(
        &panels[0],
        "Average response time per region",
        "Time (ms)",
        &labels,
        &single("avg", runs.iter().map(|r| r.avg_duration).collect(), STEELBLUE),
    )?;
    bar_panel(
        &panels[1],
        "Error rate per region",
        "Errors (%)",
        &labels,
        &single("errors", runs.iter().map(|r| r.failed_requests).collect(), RED),
    )?;
    bar_panel(
        &panels[2],
        "Throughput per region",
        "Requests/sec",
        &labels,
        &single("req/s", runs.iter().map(|r| r.requests_per_sec).collect(), GREEN),
    )?;
    bar_panel(
        &panels[3],
        "95th percentile per region",
        "Time (ms)",
        &labels,
        &single("p95", runs.iter().map(|r| r.p95_duration).collect(), ORANGE),
    )?;
    root.present()?;
    Ok(())
}

fn avg_max<'a>(avg: Vec<f64>, max: Vec<f64>, avg_color: RGBColor, max_color: RGBColor) -> [Bars<'a>; 2] {
    [
        Bars {
            label: "Mean",
            values: avg,
            color: avg_color,
            alpha: 0.7,
            width: 0.8,
        },
        Bars {
            label: "Max",
            values: max,
            color: max_color,
            alpha: 0.5,
            width: 0.4,
        },
    ]
}

fn draw_regions(path: &Path, regions: &[RegionSummary], size: (u32, u32)) -> DrawResult {
    let root = BitMapBackend::new(path, size).into_drawing_area();
    root.fill(&WHITE)?;
    let root = root.titled("System metrics per region", ("sans-serif", 30))?;
    let panels = root.split_evenly((2, 3));
    let labels: Vec<String> = regions.iter().map(|r| r.region.clone()).collect();
    let col = |f: fn(&RegionSummary) -> f64| regions.iter().map(f).collect::<Vec<f64>>();

    bar_panel(
        &panels[0],
        "CPU usage (%)",
        "CPU %",
        &labels,
        &avg_max(col(|r| r.cpu_avg), col(|r| r.cpu_max), SKYBLUE, RED),
    )?;
    bar_panel(
        &panels[1],
        "Memory usage (%)",
        "Memory %",
        &labels,
        &avg_max(col(|r| r.memory_avg_pct), col(|r| r.memory_max_pct), LIGHTGREEN, ORANGE),
    )?;
    bar_panel(
        &panels[2],
        "Load average",
        "Load",
        &labels,
        &avg_max(col(|r| r.load_avg), col(|r| r.load_max), GOLD, RED),
    )?;
    bar_panel(
        &panels[3],
        "Disk I/O - read (r/s)",
        "Reads/sec",
        &labels,
        &[Bars {
            label: "r/s",
            values: col(|r| r.io_read_avg),
            color: PURPLE,
            alpha: 0.7,
            width: 0.8,
        }],
    )?;
    bar_panel(
        &panels[4],
        "Disk I/O - write (w/s)",
        "Writes/sec",
        &labels,
        &[Bars {
            label: "w/s",
            values: col(|r| r.io_write_avg),
            color: BROWN,
            alpha: 0.7,
            width: 0.8,
        }],
    )?;
    if let Some(rollup) = rollup_regions(regions) {
        text_panel(&panels[5], &format!("SUMMARY\n=======\n{}", rollup_text(&rollup)))?;
    }
    root.present()?;
    Ok(())
}

/// Write the 2x2 load-test chart to `path`.
pub fn plot_load_tests(path: &Path, runs: &[LoadTestSummary], width: u32, height: u32) -> Result<()> {
    draw_load_tests(path, runs, (width, height)).map_err(|e| render_err(path, e))
}

/// Write the 2x3 system-metrics chart to `path`.
pub fn plot_regions(path: &Path, regions: &[RegionSummary], width: u32, height: u32) -> Result<()> {
    draw_regions(path, regions, (width, height)).map_err(|e| render_err(path, e))
}
