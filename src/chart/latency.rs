use plotters::{
    coord::Shift,
    prelude::*,
    style::text_anchor::{HPos, Pos, VPos},
};

use crate::config::{check_shape, ConfigError};

use super::{category_label, category_range, figure, font, headroom, px, Chart, DrawResult};

pub const FILE_STEM: &str = "Chart1_ResponseTime";
const TITLE: &str = "Figure 1: System latency across load levels";

const AVG_COLOR: RGBColor = RGBColor(0x4C, 0xAF, 0x50);
const P95_COLOR: RGBColor = RGBColor(0xFF, 0x98, 0x00);

// Width of a single bar, in scenario slots.
const BAR_WIDTH: f64 = 0.35;

// Grouped bars of average and p95 latency per scenario.
pub struct LatencyChart<'a> {
    labels: &'a [String],
    avg: &'a [f64],
    p95: &'a [f64],
}

impl<'a> LatencyChart<'a> {
    pub fn new(labels: &'a [String], avg: &'a [f64], p95: &'a [f64]) -> Result<Self, ConfigError> {
        check_shape(labels, &[("avg_latency", avg), ("p95_latency", p95)])?;
        Ok(Self { labels, avg, p95 })
    }

    // Bar rectangles as (left, right, height).
    fn bars(&self) -> impl Iterator<Item = (f64, f64, f64)> + '_ {
        let avg = self
            .avg
            .iter()
            .enumerate()
            .map(|(i, &v)| (i as f64 - BAR_WIDTH, i as f64, v));
        let p95 = self
            .p95
            .iter()
            .enumerate()
            .map(|(i, &v)| (i as f64, i as f64 + BAR_WIDTH, v));
        avg.chain(p95)
    }
}

// Bar annotations show the value truncated towards zero.
pub fn bar_label(value: f64) -> String {
    format!("{}", value.trunc() as i64)
}

impl Chart for LatencyChart<'_> {
    fn file_stem(&self) -> &'static str {
        FILE_STEM
    }

    fn size(&self) -> (u32, u32) {
        figure(10, 6)
    }

    fn draw<DB: DrawingBackend>(&self, root: &DrawingArea<DB, Shift>) -> DrawResult<(), DB> {
        let n = self.labels.len();
        let y_max = headroom(self.avg.iter().chain(self.p95.iter()));

        let mut chart = ChartBuilder::on(root)
            .caption(TITLE, font(12.0))
            .margin(px(10.0))
            .x_label_area_size(px(30.0))
            .y_label_area_size(px(50.0))
            .build_cartesian_2d(category_range(n), 0.0..y_max)?;

        chart
            .configure_mesh()
            .disable_x_mesh()
            .x_labels(n)
            .max_light_lines(0)
            .bold_line_style(BLACK.mix(0.15))
            .x_label_formatter(&|x| category_label(self.labels, *x))
            .y_desc("Response time (ms)")
            .label_style(font(10.0))
            .axis_desc_style(font(10.0))
            .draw()?;

        let key = px(5.0) as i32;
        chart
            .draw_series(self.avg.iter().enumerate().map(|(i, &v)| {
                let x = i as f64;
                Rectangle::new([(x - BAR_WIDTH, 0.0), (x, v)], AVG_COLOR.filled())
            }))?
            .label("Average (Avg)")
            .legend(move |(x, y)| {
                Rectangle::new([(x, y - key), (x + 2 * key, y + key)], AVG_COLOR.filled())
            });
        chart
            .draw_series(self.p95.iter().enumerate().map(|(i, &v)| {
                let x = i as f64;
                Rectangle::new([(x, 0.0), (x + BAR_WIDTH, v)], P95_COLOR.filled())
            }))?
            .label("95% of users (P95)")
            .legend(move |(x, y)| {
                Rectangle::new([(x, y - key), (x + 2 * key, y + key)], P95_COLOR.filled())
            });

        let annotation = TextStyle::from(font(9.0)).pos(Pos::new(HPos::Center, VPos::Bottom));
        let offset = px(3.0) as i32;
        chart.draw_series(self.bars().map(|(left, right, height)| {
            EmptyElement::at(((left + right) / 2.0, height))
                + Text::new(bar_label(height), (0, -offset), annotation.clone())
        }))?;

        chart
            .configure_series_labels()
            .position(SeriesLabelPosition::UpperLeft)
            .label_font(font(10.0))
            .background_style(WHITE.mix(0.8).filled())
            .border_style(BLACK.mix(0.3))
            .draw()?;

        Ok(())
    }
}
