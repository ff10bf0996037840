//! JSON snapshot of the charts currently on screen.

use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::Path;

use anyhow::{Context, Result};
use serde::Serialize;

use crate::color::{to_hex, ColorMap};
use crate::data::aggregate::{PieChart, ScatterChart};
use crate::data::filter::Selection;
use crate::data::model::Outcome;

#[derive(Debug, Serialize)]
pub struct ChartExport<'a> {
    pub site: &'a str,
    pub payload_range: [f64; 2],
    pub pie: PieExport<'a>,
    pub scatter: ScatterExport<'a>,
}

#[derive(Debug, Serialize)]
pub struct PieExport<'a> {
    pub title: &'a str,
    pub slices: Vec<SliceExport<'a>>,
}

#[derive(Debug, Serialize)]
pub struct SliceExport<'a> {
    pub label: &'a str,
    pub count: usize,
    pub color: String,
}

#[derive(Debug, Serialize)]
pub struct ScatterExport<'a> {
    pub title: &'a str,
    /// `(class, #rrggbb)` for failure then success.
    pub colors: [(u8, String); 2],
    pub marker_size: f32,
    pub points: Vec<PointExport<'a>>,
}

#[derive(Debug, Serialize)]
pub struct PointExport<'a> {
    pub payload_mass_kg: f64,
    pub outcome: Outcome,
    pub booster_version: &'a str,
}

impl<'a> ChartExport<'a> {
    pub fn new(
        selection: &'a Selection,
        pie: &'a PieChart,
        pie_colors: &ColorMap,
        scatter: &'a ScatterChart,
    ) -> Self {
        ChartExport {
            site: &selection.site,
            payload_range: [selection.payload_range.min, selection.payload_range.max],
            pie: PieExport {
                title: &pie.title,
                slices: pie
                    .data
                    .iter()
                    .map(|d| SliceExport {
                        label: &d.label,
                        count: d.count,
                        color: to_hex(pie_colors.color_for(&d.label)),
                    })
                    .collect(),
            },
            scatter: ScatterExport {
                title: &scatter.title,
                colors: [Outcome::Failure, Outcome::Success]
                    .map(|o| (o.class(), to_hex(scatter.colors.color_for(o)))),
                marker_size: scatter.style.size,
                points: scatter
                    .points
                    .iter()
                    .map(|p| PointExport {
                        payload_mass_kg: p.payload_mass_kg,
                        outcome: p.outcome,
                        booster_version: &p.booster_version,
                    })
                    .collect(),
            },
        }
    }
}

/// Write the snapshot as pretty-printed JSON.
pub fn write_json(export: &ChartExport<'_>, path: &Path) -> Result<()> {
    let file = File::create(path).with_context(|| format!("creating {}", path.display()))?;
    let mut writer = BufWriter::new(file);
    serde_json::to_writer_pretty(&mut writer, export).context("serialising chart data")?;
    writer.flush().context("flushing chart export")?;
    log::info!("Exported chart data to {}", path.display());
    Ok(())
}
