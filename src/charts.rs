//! Inline SVG builders for the monitoring dashboard. Everything renders
//! to self-contained markup with no script dependencies, so output can be
//! embedded anywhere that accepts static HTML.

use crate::models::CostRecord;
use crate::synthetic::{LatencyDistribution, SyntheticSeries};

const PALETTE: [&str; 15] = [
    "#002855", "#0051a8", "#0072ce", "#338fce", "#5aa4d6", "#7fb9de", "#a6cee6", "#c3dbed",
    "#d9e7f3", "#b2d4ff", "#4d7fb3", "#1b4f72", "#41729f", "#2f6690", "#398cbf",
];

/// Line-with-area chart of a daily cost series. Records must be sorted by
/// date; a single-day series degenerates to one point on the left axis.
pub fn cost_line_area_svg(records: &[CostRecord], width: f64, height: f64, stroke: &str) -> String {
    if records.is_empty() {
        return "<div>No cost data</div>".to_string();
    }
    let padding = 40.0;
    let max_cost = records.iter().map(|r| r.cost).fold(0.0f64, f64::max).max(1e-9);
    let date_min = records[0].date;
    let span = (records[records.len() - 1].date - date_min).num_days().max(1) as f64;

    let x_pos = |r: &CostRecord| {
        padding + (r.date - date_min).num_days() as f64 / span * (width - 2.0 * padding)
    };
    let y_pos = |cost: f64| height - padding - cost / max_cost * (height - 2.0 * padding);

    let mut line_path = format!("M {} {}", x_pos(&records[0]), y_pos(records[0].cost));
    for r in &records[1..] {
        line_path.push_str(&format!(" L {} {}", x_pos(r), y_pos(r.cost)));
    }
    let area_path = format!(
        "{line_path} L {} {} L {} {} Z",
        x_pos(&records[records.len() - 1]),
        height - padding,
        x_pos(&records[0]),
        height - padding,
    );

    let mut ticks = String::new();
    for r in records {
        let x = x_pos(r);
        ticks.push_str(&format!(
            "<line x1='{x}' y1='{}' x2='{x}' y2='{}' stroke='#888' stroke-width='1'/>",
            height - padding,
            height - padding + 6.0,
        ));
        ticks.push_str(&format!(
            "<text x='{x}' y='{}' font-size='10' text-anchor='middle' fill='#444'>{}</text>",
            height - padding + 18.0,
            r.date.format("%m-%d"),
        ));
    }
    for i in 0..6 {
        let val = i as f64 / 5.0 * max_cost;
        let y = y_pos(val);
        ticks.push_str(&format!(
            "<line x1='{}' y1='{y}' x2='{padding}' y2='{y}' stroke='#888' stroke-width='1'/>",
            padding - 6.0,
        ));
        ticks.push_str(&format!(
            "<text x='{}' y='{}' font-size='10' text-anchor='end' fill='#444'>{val:.1}</text>",
            padding - 10.0,
            y + 3.0,
        ));
        ticks.push_str(&format!(
            "<line x1='{padding}' y1='{y}' x2='{}' y2='{y}' stroke='#eaecef' stroke-width='1'/>",
            width - padding,
        ));
    }

    format!(
        r##"<svg width="{width}" height="{height}" role="img" aria-label="Daily Cost Trend">
<rect x="0" y="0" width="{width}" height="{height}" fill="#ffffff" rx="6" ry="6"/>
<defs><linearGradient id="gradCostArea" x1="0" x2="0" y1="0" y2="1">
<stop offset="0%" stop-color="{stroke}" stop-opacity="0.55"/>
<stop offset="100%" stop-color="{stroke}" stop-opacity="0"/>
</linearGradient></defs>
<path d="{area_path}" fill="url(#gradCostArea)" stroke="none" opacity="0.85"></path>
<path d="{line_path}" fill="none" stroke="{stroke}" stroke-width="2.2" stroke-linejoin="round" stroke-linecap="round"></path>
{ticks}</svg>"##
    )
}

/// Pie chart of per-day cost shares with a legend column.
pub fn cost_pie_svg(records: &[CostRecord], diameter: f64) -> String {
    if records.is_empty() {
        return "<div>No cost data</div>".to_string();
    }
    let total: f64 = records.iter().map(|r| r.cost).sum();
    let total = if total > 0.0 { total } else { 1.0 };
    let center = diameter / 2.0;
    let radius = diameter / 2.0 - 4.0;

    let mut segments = String::new();
    let mut legend = String::new();
    let mut accum = 0.0f64;
    for (idx, r) in records.iter().enumerate() {
        let fraction = r.cost / total;
        let angle = fraction * std::f64::consts::TAU;
        let (start, end) = (accum, accum + angle);
        accum = end;
        let x1 = center + radius * start.sin();
        let y1 = center - radius * start.cos();
        let x2 = center + radius * end.sin();
        let y2 = center - radius * end.cos();
        let large_arc = if angle > std::f64::consts::PI { 1 } else { 0 };
        let color = PALETTE[idx % PALETTE.len()];
        segments.push_str(&format!(
            "<path d='M {center} {center} L {x1} {y1} A {radius} {radius} 0 {large_arc} 1 {x2} {y2} Z' \
             fill='{color}' stroke='#ffffff' stroke-width='1'>\
             <title>{} : {:.2}</title></path>",
            r.date, r.cost,
        ));
        legend.push_str(&format!(
            "<div style='display:flex;align-items:center;font-size:11px;margin-bottom:4px;'>\
             <span style='display:inline-block;width:14px;height:14px;background:{color};border-radius:3px;margin-right:6px;\
             border:1px solid #fff;box-shadow:0 0 0 1px #eaecef;'></span>\
             {}: {:.2} ({:.1}%)</div>",
            r.date.format("%m-%d"),
            r.cost,
            fraction * 100.0,
        ));
    }

    format!(
        r##"<div style="display:flex;flex-wrap:wrap;gap:1.2rem;">
<svg width="{diameter}" height="{diameter}" viewBox="0 0 {diameter} {diameter}" role="img" aria-label="Cost Distribution by Day">
<circle cx="{center}" cy="{center}" r="{radius}" fill="#f8fafc" stroke="#eaecef" stroke-width="1"/>
{segments}</svg>
<div style="flex:1;min-width:180px;display:flex;flex-direction:column;flex-wrap:nowrap;">
<div style="font-size:0.75rem;font-weight:600;color:#0051a8;margin-bottom:6px;">Daily Distribution</div>
{legend}</div></div>"##
    )
}

/// Bar sparkline of a series, scaled to the series maximum.
pub fn sparkline_html(series: &SyntheticSeries) -> String {
    if series.series.is_empty() {
        return "<div>No data</div>".to_string();
    }
    let max_v = series
        .series
        .iter()
        .map(|p| p.value)
        .fold(0.0f64, f64::max)
        .max(1.0);
    let bars: String = series
        .series
        .iter()
        .map(|p| {
            format!(
                "<div title='{}' style='flex:1;height:40px;display:flex;align-items:flex-end;'>\
                 <div style='width:100%;background:linear-gradient(180deg,#0051a8,#002855);\
                 height:{:.2}%;border-radius:2px;'></div></div>",
                p.value,
                p.value / max_v * 100.0,
            )
        })
        .collect();
    format!(
        "<div style=\"display:flex;gap:2px;align-items:flex-end;height:40px;\">{bars}</div>\
         <div style=\"font-size:0.6rem;color:#555;margin-top:4px;\">Last {} pts</div>",
        series.series.len(),
    )
}

/// Stacked horizontal bars of per-model latency buckets with percentile
/// markers. Bars share one count scale; percentile markers are scaled per
/// model against max(p99, 2000ms).
pub fn stacked_latency_svg(data: &[LatencyDistribution], width: f64) -> String {
    if data.is_empty() {
        return "<div>No latency data</div>".to_string();
    }
    let bar_height = 32.0;
    let gap = 18.0;
    let max_total = data.iter().map(|d| d.total).max().unwrap_or(1).max(1) as f64;
    let height = (bar_height + gap) * data.len() as f64 + 40.0;
    let left_margin = 140.0;
    let usable_width = width - left_margin - 40.0;

    let mut parts = vec![
        format!(
            "<svg width='{width}' height='{height}' role='img' aria-label='Latency Distribution by Model'>"
        ),
        "<rect x='0' y='0' width='100%' height='100%' fill='#ffffff' rx='8' ry='8'/>".to_string(),
        "<style>.lbl{font:11px Helvetica,Arial,sans-serif;fill:#002855}\
         .pct{font:9px Helvetica,Arial,sans-serif;fill:#444}</style>"
            .to_string(),
        "<text x='12' y='18' class='lbl' font-size='13' font-weight='600'>Latency Distribution (synthetic)</text>".to_string(),
        "<text x='12' y='32' class='pct' font-size='10'>Stacked counts (fast / typical / slow) with p50 | p90 | p99 markers</text>".to_string(),
    ];

    for (idx, row) in data.iter().enumerate() {
        let y = 30.0 + idx as f64 * (bar_height + gap);
        parts.push(format!(
            "<text x='12' y='{}' class='lbl' font-size='11' font-weight='600'>{}</text>",
            y + bar_height * 0.65,
            row.model,
        ));

        let mut x_cursor = left_margin;
        for (name, value, color) in [
            ("fast", row.fast, "#1b7b34"),
            ("normal", row.normal, "#f5a300"),
            ("slow", row.slow, "#c62828"),
        ] {
            let seg_width = value as f64 / max_total * usable_width;
            parts.push(format!(
                "<rect x='{x_cursor}' y='{y}' width='{seg_width}' height='{bar_height}' \
                 fill='{color}' rx='4' ry='4'>\
                 <title>{} - {name}: {value} ({:.1}%)</title></rect>",
                row.model,
                value as f64 / row.total.max(1) as f64 * 100.0,
            ));
            x_cursor += seg_width;
        }

        let scale = row.p99.max(2000.0);
        let x_for = |ms: f64| left_margin + (ms / scale).min(1.0) * usable_width;
        for (mark, value, color) in [
            ("P50", row.p50, "#004b8d"),
            ("P90", row.p90, "#6a1b9a"),
            ("P99", row.p99, "#b00020"),
        ] {
            let x_m = x_for(value);
            parts.push(format!(
                "<line x1='{x_m}' y1='{}' x2='{x_m}' y2='{}' stroke='{color}' stroke-width='2' opacity='0.9'/>",
                y - 2.0,
                y + bar_height + 2.0,
            ));
            parts.push(format!(
                "<text x='{}' y='{}' class='pct'>{mark} {value}ms</text>",
                x_m + 4.0,
                y + bar_height / 2.0 + 4.0,
            ));
        }

        parts.push(format!(
            "<text x='{}' y='{}' class='pct' font-size='10'>{} req</text>",
            left_margin + usable_width + 6.0,
            y + bar_height * 0.65,
            row.total,
        ));
    }

    let legend_y = height - 12.0;
    let mut legend_x = 12.0;
    for (label, color) in [
        ("Fast (&lt;250ms)", "#1b7b34"),
        ("Typical (250-1000ms)", "#f5a300"),
        ("Slow (&gt;1000ms)", "#c62828"),
        ("p50", "#004b8d"),
        ("p90", "#6a1b9a"),
        ("p99", "#b00020"),
    ] {
        parts.push(format!(
            "<rect x='{legend_x}' y='{}' width='14' height='14' fill='{color}' rx='3' ry='3'/>",
            legend_y - 10.0,
        ));
        parts.push(format!(
            "<text x='{}' y='{}' class='pct' font-size='10'>{label}</text>",
            legend_x + 20.0,
            legend_y + 2.0,
        ));
        legend_x += 120.0;
    }

    parts.push("</svg>".to_string());
    parts.concat()
}
