use std::fmt::Display;

use comfy_table::{Attribute, Cell, CellAlignment, Color, Table, modifiers, presets};
use itertools::Itertools;

use crate::{core::metrics::Metrics, fmt::FormattedPercentage};

fn new_table() -> Table {
    let mut table = Table::new();
    table.load_preset(presets::UTF8_FULL_CONDENSED).apply_modifier(modifiers::UTF8_ROUND_CORNERS);
    table.enforce_styling();
    table
}

fn optional_cell(value: Option<impl Display>) -> Cell {
    value.map_or_else(
        || Cell::new("n/a").add_attribute(Attribute::Dim),
        |value| Cell::new(value).set_alignment(CellAlignment::Right),
    )
}

fn share_cell(share: f64) -> Cell {
    Cell::new(FormattedPercentage(share)).set_alignment(CellAlignment::Right).fg(
        if share >= 0.999 {
            Color::Green
        } else if share > 0.0 {
            Color::DarkYellow
        } else {
            Color::Red
        },
    )
}

#[must_use]
pub fn build_metrics_table(metrics: &Metrics) -> Table {
    let mut table = new_table();
    table.set_header(vec!["", "Home", "Loadpoints", "Now"]);
    table.add_row(vec![
        Cell::new("Green share"),
        share_cell(metrics.green_share_home),
        share_cell(metrics.green_share_loadpoints),
        Cell::new(""),
    ]);
    table.add_row(vec![
        Cell::new("Price"),
        optional_cell(metrics.price_home),
        optional_cell(metrics.price_loadpoints),
        optional_cell(metrics.quote.grid),
    ]);
    table.add_row(vec![
        Cell::new("CO₂"),
        optional_cell(metrics.co2_home),
        optional_cell(metrics.co2_loadpoints),
        optional_cell(metrics.quote.co2),
    ]);
    table.add_row(vec![
        Cell::new("Feed-in"),
        Cell::new(""),
        Cell::new(""),
        optional_cell(metrics.quote.feed_in),
    ]);
    table.add_row(vec![
        Cell::new("Solar"),
        Cell::new(""),
        Cell::new(""),
        optional_cell(metrics.quote.solar),
    ]);
    table
}

/// Solar forecast side by side with the adjusted one, when available.
#[must_use]
pub fn build_solar_forecast_table(metrics: &Metrics) -> Table {
    let mut table = new_table();
    let adjusted = metrics.forecast.adjusted.as_ref();
    table.set_header(vec!["Date", "Time", "Forecast", "Adjusted"]);
    let adjusted_values = adjusted
        .map(|adjustment| adjustment.solar.iter().map(|point| point.value).collect_vec())
        .unwrap_or_default();
    for (index, point) in metrics.forecast.solar.iter().enumerate() {
        table.add_row(vec![
            Cell::new(point.time.format("%b %d")).add_attribute(Attribute::Dim),
            Cell::new(point.time.format("%H:%M")),
            Cell::new(point.value).set_alignment(CellAlignment::Right),
            optional_cell(adjusted_values.get(index)),
        ]);
    }
    if let Some(adjustment) = adjusted {
        table.add_row(vec![
            Cell::new("Today").add_attribute(Attribute::Bold),
            Cell::new(format!("×{:.3}", adjustment.scale)),
            Cell::new(adjustment.forecasted_today).set_alignment(CellAlignment::Right),
            Cell::new(adjustment.yield_today).set_alignment(CellAlignment::Right),
        ]);
    }
    table
}
