//! HTML report with inline SVG charts
//!
//! Self-contained document (embedded CSS, no external assets) carrying the
//! descriptive charts and the hypothesis-test block: mean-per-group bars,
//! the daily time series and rolling mean with period days shaded, the
//! stacked with/without-sweets bars, and the per-group distribution table.

use crate::dataset::DailyDataset;
use crate::summary::{Crosstab, FiveNumberSummary, GroupMeans};
use crate::verdict::HypothesisAssessment;

const CHART_WIDTH: f64 = 640.0;
const CHART_HEIGHT: f64 = 240.0;
const MARGIN: f64 = 30.0;

/// HTML report builder
#[derive(Debug)]
pub struct HtmlReport<'a> {
    dataset: &'a DailyDataset,
    means: &'a GroupMeans,
    on_summary: &'a FiveNumberSummary,
    off_summary: &'a FiveNumberSummary,
    rolling: &'a [f64],
    rolling_window: usize,
    crosstab: &'a Crosstab,
    assessment: &'a HypothesisAssessment,
}

impl<'a> HtmlReport<'a> {
    #[allow(clippy::too_many_arguments)]
    pub fn new(
        dataset: &'a DailyDataset,
        means: &'a GroupMeans,
        on_summary: &'a FiveNumberSummary,
        off_summary: &'a FiveNumberSummary,
        rolling: &'a [f64],
        rolling_window: usize,
        crosstab: &'a Crosstab,
        assessment: &'a HypothesisAssessment,
    ) -> Self {
        Self {
            dataset,
            means,
            on_summary,
            off_summary,
            rolling,
            rolling_window,
            crosstab,
            assessment,
        }
    }

    /// Escape HTML special characters
    fn escape_html(text: &str) -> String {
        text.replace('&', "&amp;")
            .replace('<', "&lt;")
            .replace('>', "&gt;")
            .replace('"', "&quot;")
            .replace('\'', "&#39;")
    }

    /// Generate embedded CSS styles
    fn generate_styles() -> &'static str {
        r#"
        body {
            font-family: -apple-system, BlinkMacSystemFont, 'Segoe UI', Roboto, sans-serif;
            margin: 20px;
            background-color: #f5f5f5;
        }
        h1, h2 {
            color: #333;
        }
        .chart {
            background-color: white;
            box-shadow: 0 1px 3px rgba(0,0,0,0.1);
            margin-bottom: 20px;
            padding: 10px;
        }
        table {
            border-collapse: collapse;
            background-color: white;
            box-shadow: 0 1px 3px rgba(0,0,0,0.1);
            margin-bottom: 20px;
        }
        th, td {
            border: 1px solid #ddd;
            padding: 8px;
            text-align: right;
        }
        th {
            background-color: #4a90d9;
            color: white;
        }
        td:first-child, th:first-child {
            text-align: left;
        }
        pre.results {
            background-color: white;
            box-shadow: 0 1px 3px rgba(0,0,0,0.1);
            padding: 12px;
            font-size: 0.95em;
        }
        .footer {
            margin-top: 20px;
            font-size: 0.8em;
            color: #888;
            text-align: center;
        }
        "#
    }

    /// x position of day `i` in a series of `n` points
    fn x_at(i: usize, n: usize) -> f64 {
        if n <= 1 {
            return MARGIN;
        }
        MARGIN + (CHART_WIDTH - 2.0 * MARGIN) * i as f64 / (n - 1) as f64
    }

    /// y position for a value in [0, 1]
    fn y_at(value: f64) -> f64 {
        CHART_HEIGHT - MARGIN - (CHART_HEIGHT - 2.0 * MARGIN) * value.clamp(0.0, 1.0)
    }

    /// Shaded rectangles for runs of consecutive on-period days
    fn period_shading(&self) -> String {
        let observations = self.dataset.observations();
        let n = observations.len();
        let mut svg = String::new();

        let mut run_start: Option<usize> = None;
        for i in 0..=n {
            let on = i < n && observations[i].on_period != 0;
            match (run_start, on) {
                (None, true) => run_start = Some(i),
                (Some(start), false) => {
                    let x0 = Self::x_at(start, n);
                    let x1 = Self::x_at(i - 1, n);
                    svg.push_str(&format!(
                        r##"<rect x="{:.1}" y="{:.1}" width="{:.1}" height="{:.1}" fill="#e88" opacity="0.25"/>"##,
                        x0 - 4.0,
                        MARGIN,
                        (x1 - x0) + 8.0,
                        CHART_HEIGHT - 2.0 * MARGIN,
                    ));
                    svg.push('\n');
                    run_start = None;
                }
                _ => {}
            }
        }

        svg
    }

    /// Polyline with circle markers for a 0..=1 series
    fn series_polyline(values: &[f64], color: &str) -> String {
        let n = values.len();
        let points: Vec<String> = values
            .iter()
            .enumerate()
            .map(|(i, v)| format!("{:.1},{:.1}", Self::x_at(i, n), Self::y_at(*v)))
            .collect();

        let mut svg = format!(
            r#"<polyline points="{}" fill="none" stroke="{}" stroke-width="1.5"/>"#,
            points.join(" "),
            color
        );
        svg.push('\n');

        for (i, v) in values.iter().enumerate() {
            svg.push_str(&format!(
                r#"<circle cx="{:.1}" cy="{:.1}" r="2.5" fill="{}"/>"#,
                Self::x_at(i, n),
                Self::y_at(*v),
                color
            ));
            svg.push('\n');
        }

        svg
    }

    /// Open an SVG element with the shared frame and baseline axis
    fn svg_open() -> String {
        format!(
            concat!(
                r#"<svg viewBox="0 0 {w} {h}" width="{w}" height="{h}" xmlns="http://www.w3.org/2000/svg">"#,
                "\n",
                r##"<line x1="{m}" y1="{y0}" x2="{x1}" y2="{y0}" stroke="#999"/>"##,
                "\n"
            ),
            w = CHART_WIDTH,
            h = CHART_HEIGHT,
            m = MARGIN,
            y0 = CHART_HEIGHT - MARGIN,
            x1 = CHART_WIDTH - MARGIN,
        )
    }

    /// Bar chart of mean sweets consumption per period status
    fn render_means_chart(&self) -> String {
        let bars = [
            ("Not on period", self.means.off_period, "#4a90d9"),
            ("On period", self.means.on_period, "#d9534f"),
        ];

        let bar_width = 120.0;
        let slot = (CHART_WIDTH - 2.0 * MARGIN) / bars.len() as f64;
        let mut svg = Self::svg_open();

        for (i, (label, value, color)) in bars.iter().enumerate() {
            let x = MARGIN + slot * (i as f64 + 0.5) - bar_width / 2.0;
            let y = Self::y_at(*value);
            let base = CHART_HEIGHT - MARGIN;

            svg.push_str(&format!(
                r#"<rect x="{:.1}" y="{:.1}" width="{:.1}" height="{:.1}" fill="{}"/>"#,
                x,
                y,
                bar_width,
                base - y,
                color
            ));
            svg.push('\n');
            svg.push_str(&format!(
                r#"<text x="{:.1}" y="{:.1}" text-anchor="middle" font-size="12">{:.2}</text>"#,
                x + bar_width / 2.0,
                y - 5.0,
                value
            ));
            svg.push('\n');
            svg.push_str(&format!(
                r#"<text x="{:.1}" y="{:.1}" text-anchor="middle" font-size="12">{}</text>"#,
                x + bar_width / 2.0,
                base + 16.0,
                Self::escape_html(label)
            ));
            svg.push('\n');
        }

        svg.push_str("</svg>\n");
        svg
    }

    /// Daily time series with period days shaded
    fn render_timeseries_chart(&self) -> String {
        let values: Vec<f64> = self
            .dataset
            .observations()
            .iter()
            .map(|o| o.sweets_consumed as f64)
            .collect();

        let mut svg = Self::svg_open();
        svg.push_str(&self.period_shading());
        svg.push_str(&Self::series_polyline(&values, "#4a90d9"));
        svg.push_str("</svg>\n");
        svg
    }

    /// Rolling-mean line with period days shaded
    fn render_rolling_chart(&self) -> String {
        let mut svg = Self::svg_open();
        svg.push_str(&self.period_shading());
        svg.push_str(&Self::series_polyline(self.rolling, "#5cb85c"));
        svg.push_str("</svg>\n");
        svg
    }

    /// Stacked bars: days with vs without sweets per period status
    fn render_stacked_chart(&self) -> String {
        let groups = [
            (
                "Not on period",
                self.crosstab.off_period_no_sweets,
                self.crosstab.off_period_sweets,
            ),
            (
                "On period",
                self.crosstab.on_period_no_sweets,
                self.crosstab.on_period_sweets,
            ),
        ];

        let max_total = groups
            .iter()
            .map(|(_, no, yes)| no + yes)
            .max()
            .unwrap_or(1)
            .max(1) as f64;

        let bar_width = 120.0;
        let slot = (CHART_WIDTH - 2.0 * MARGIN) / groups.len() as f64;
        let plot_height = CHART_HEIGHT - 2.0 * MARGIN;
        let base = CHART_HEIGHT - MARGIN;
        let mut svg = Self::svg_open();

        for (i, (label, no_sweets, sweets)) in groups.iter().enumerate() {
            let x = MARGIN + slot * (i as f64 + 0.5) - bar_width / 2.0;
            let no_height = plot_height * *no_sweets as f64 / max_total;
            let yes_height = plot_height * *sweets as f64 / max_total;

            // Bottom segment: days without sweets
            svg.push_str(&format!(
                r##"<rect x="{:.1}" y="{:.1}" width="{:.1}" height="{:.1}" fill="#4a90d9"/>"##,
                x,
                base - no_height,
                bar_width,
                no_height
            ));
            svg.push('\n');
            // Top segment: days with sweets
            svg.push_str(&format!(
                r##"<rect x="{:.1}" y="{:.1}" width="{:.1}" height="{:.1}" fill="#d9534f"/>"##,
                x,
                base - no_height - yes_height,
                bar_width,
                yes_height
            ));
            svg.push('\n');
            svg.push_str(&format!(
                r#"<text x="{:.1}" y="{:.1}" text-anchor="middle" font-size="12">{}</text>"#,
                x + bar_width / 2.0,
                base + 16.0,
                Self::escape_html(label)
            ));
            svg.push('\n');
        }

        svg.push_str(
            r##"<text x="610" y="20" text-anchor="end" font-size="12"><tspan fill="#d9534f">&#9632;</tspan> Sweets (1)  <tspan fill="#4a90d9">&#9632;</tspan> No sweets (0)</text>"##,
        );
        svg.push('\n');
        svg.push_str("</svg>\n");
        svg
    }

    /// Per-group distribution table (the boxplot numbers for a 0/1 flag)
    fn render_distribution_table(&self) -> String {
        let mut html = String::new();
        html.push_str("    <table>\n");
        html.push_str("        <tr><th>Group</th><th>Days</th><th>Min</th><th>Q1</th><th>Median</th><th>Q3</th><th>Max</th></tr>\n");

        for (label, days, s) in [
            ("Not on period", self.means.off_period_days, self.off_summary),
            ("On period", self.means.on_period_days, self.on_summary),
        ] {
            html.push_str(&format!(
                "        <tr><td>{}</td><td>{}</td><td>{:.2}</td><td>{:.2}</td><td>{:.2}</td><td>{:.2}</td><td>{:.2}</td></tr>\n",
                Self::escape_html(label),
                days,
                s.min,
                s.q1,
                s.median,
                s.q3,
                s.max
            ));
        }

        html.push_str("    </table>\n");
        html
    }

    /// Generate complete HTML document
    pub fn to_html(&self) -> String {
        let mut html = String::new();

        html.push_str("<!DOCTYPE html>\n");
        html.push_str("<html lang=\"en\">\n");

        html.push_str("<head>\n");
        html.push_str("    <meta charset=\"UTF-8\">\n");
        html.push_str(
            "    <meta name=\"viewport\" content=\"width=device-width, initial-scale=1.0\">\n",
        );
        html.push_str("    <title>Daily Diary Analysis Report</title>\n");
        html.push_str("    <style>");
        html.push_str(Self::generate_styles());
        html.push_str("</style>\n");
        html.push_str("</head>\n");

        html.push_str("<body>\n");
        html.push_str("    <h1>Daily Sweet Consumption Analysis</h1>\n");

        html.push_str("    <h2>Average Consumption: On Period vs Not on Period</h2>\n");
        html.push_str("    <div class=\"chart\">");
        html.push_str(&self.render_means_chart());
        html.push_str("</div>\n");

        html.push_str("    <h2>Distribution by Period Status</h2>\n");
        html.push_str(&self.render_distribution_table());

        html.push_str("    <h2>Daily Consumption with Period Days Highlighted</h2>\n");
        html.push_str("    <div class=\"chart\">");
        html.push_str(&self.render_timeseries_chart());
        html.push_str("</div>\n");

        html.push_str(&format!(
            "    <h2>{}-day Rolling Average</h2>\n",
            self.rolling_window
        ));
        html.push_str("    <div class=\"chart\">");
        html.push_str(&self.render_rolling_chart());
        html.push_str("</div>\n");

        html.push_str("    <h2>Days with vs without Sweets</h2>\n");
        html.push_str("    <div class=\"chart\">");
        html.push_str(&self.render_stacked_chart());
        html.push_str("</div>\n");

        html.push_str("    <h2>Hypothesis Test</h2>\n");
        html.push_str("    <pre class=\"results\">");
        html.push_str(&Self::escape_html(&self.assessment.to_report_string()));
        html.push_str("</pre>\n");

        html.push_str("    <div class=\"footer\">\n");
        html.push_str("        Generated by dulce - Daily Diary Analyzer\n");
        html.push_str("    </div>\n");

        html.push_str("</body>\n");
        html.push_str("</html>\n");

        html
    }
}
