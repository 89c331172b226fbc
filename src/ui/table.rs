// src/ui/table.rs
use tabled::{Table, Tabled};
use crate::analysis::{BoundsPolicy, FrequencyTable, SimulationRun};

#[derive(Debug, Clone, Tabled)]
struct FrequencyRow {
    #[tabled(rename = "Interval")]
    interval: String,
    #[tabled(rename = "Midpoint")]
    midpoint: f64,
    #[tabled(rename = "Frequency")]
    frequency: usize,
    #[tabled(rename = "Probability")]
    probability: String,
    #[tabled(rename = "Cumulative")]
    cumulative: String,
    #[tabled(rename = "Random")]
    random: String,
}

#[derive(Debug, Clone, Tabled)]
struct SimulationRow {
    #[tabled(rename = "#")]
    index: usize,
    #[tabled(rename = "Draw")]
    draw: u32,
    #[tabled(rename = "Simulated")]
    simulated: f64,
    #[tabled(rename = "Change")]
    change: String,
}

pub fn render_frequency_table(table: &FrequencyTable) -> String {
    let rows: Vec<FrequencyRow> = table.rows()
        .iter()
        .map(|row| FrequencyRow {
            interval: row.interval_label(),
            midpoint: row.midpoint,
            frequency: row.frequency,
            probability: format!("{:.2}", row.probability),
            cumulative: format!("{:.2}", row.cumulative_probability),
            random: row.random_label(),
        })
        .collect();

    let bounds = match table.policy() {
        BoundsPolicy::RoundedCumulative => "rounded cumulative",
        BoundsPolicy::UnroundedCumulative => "unrounded cumulative",
    };
    format!(
        "{}\nn = {}, range {} - {}, {} of {} classes (width {}), random bounds from {}\n",
        Table::new(rows),
        table.total(),
        table.min(),
        table.max(),
        table.rows().len(),
        table.class_count(),
        table.class_width(),
        bounds
    )
}

pub fn render_simulation(run: &SimulationRun) -> String {
    let rows: Vec<SimulationRow> = run.draws
        .iter()
        .enumerate()
        .map(|(i, draw)| SimulationRow {
            index: i + 1,
            draw: draw.draw,
            simulated: draw.value,
            change: draw.percent_label.clone(),
        })
        .collect();

    let summary = &run.summary;
    format!(
        "{}\nn = {}, mean = {:.2}, std dev = {:.2}, min = {}, max = {}, change vs {}\n",
        Table::new(rows),
        summary.count,
        summary.mean,
        summary.std_dev,
        summary.min,
        summary.max,
        run.baseline
    )
}

pub fn render_rounded(values: &[i64]) -> String {
    values.iter()
        .map(|v| v.to_string())
        .collect::<Vec<_>>()
        .join(", ")
}
