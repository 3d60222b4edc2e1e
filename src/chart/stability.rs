use plotters::{
    coord::Shift,
    prelude::*,
    style::{
        text_anchor::{HPos, Pos, VPos},
        FontStyle,
    },
};

use crate::config::{check_shape, ConfigError};

use super::{category_label, category_range, figure, font, headroom, px, Chart, DrawResult};

pub const FILE_STEM: &str = "Chart2_Stability";
const TITLE: &str = "Figure 2: Throughput vs error rate";

const THROUGHPUT_COLOR: RGBColor = RGBColor(0x1F, 0x77, 0xB4);
const ERROR_COLOR: RGBColor = RGBColor(0xD6, 0x27, 0x28);

// Headroom above the highest error rate on the right axis, in percent.
pub const ERROR_AXIS_HEADROOM: f64 = 5.0;

// Throughput bars on the left axis, error rate line on the right axis.
pub struct StabilityChart<'a> {
    labels: &'a [String],
    throughput: &'a [f64],
    error_rate: &'a [f64],
}

impl<'a> StabilityChart<'a> {
    pub fn new(
        labels: &'a [String],
        throughput: &'a [f64],
        error_rate: &'a [f64],
    ) -> Result<Self, ConfigError> {
        check_shape(
            labels,
            &[("throughput", throughput), ("error_rate", error_rate)],
        )?;
        Ok(Self {
            labels,
            throughput,
            error_rate,
        })
    }

    pub fn error_axis_upper_bound(&self) -> f64 {
        error_axis_upper_bound(self.error_rate)
    }

    fn error_points(&self) -> Vec<(f64, f64)> {
        self.error_rate
            .iter()
            .enumerate()
            .map(|(i, &v)| (i as f64, v))
            .collect()
    }
}

pub fn error_axis_upper_bound(error_rate: &[f64]) -> f64 {
    error_rate.iter().cloned().reduce(f64::max).unwrap_or(0.0) + ERROR_AXIS_HEADROOM
}

// Whole numbers keep one decimal place: 3 -> "3.0%", 13.89 -> "13.89%".
pub fn percent_label(value: f64) -> String {
    if value.is_finite() && value.fract() == 0.0 {
        format!("{:.1}%", value)
    } else {
        format!("{}%", value)
    }
}

impl Chart for StabilityChart<'_> {
    fn file_stem(&self) -> &'static str {
        FILE_STEM
    }

    fn size(&self) -> (u32, u32) {
        figure(10, 6)
    }

    fn draw<DB: DrawingBackend>(&self, root: &DrawingArea<DB, Shift>) -> DrawResult<(), DB> {
        let n = self.labels.len();

        let mut chart = ChartBuilder::on(root)
            .caption(TITLE, font(12.0))
            .margin(px(10.0))
            .x_label_area_size(px(35.0))
            .y_label_area_size(px(50.0))
            .right_y_label_area_size(px(50.0))
            .build_cartesian_2d(category_range(n), 0.0..headroom(self.throughput))?
            .set_secondary_coord(category_range(n), 0.0..self.error_axis_upper_bound());

        chart
            .configure_mesh()
            .disable_x_mesh()
            .x_labels(n)
            .disable_y_mesh()
            .x_label_formatter(&|x| category_label(self.labels, *x))
            .x_desc("Test scenario")
            .y_desc("Throughput (req/s)")
            .label_style(font(10.0))
            .y_label_style(font(10.0).color(&THROUGHPUT_COLOR))
            .axis_desc_style(font(10.0).style(FontStyle::Bold))
            .draw()?;

        chart
            .configure_secondary_axes()
            .y_desc("Error rate (%)")
            .label_style(font(10.0).color(&ERROR_COLOR))
            .axis_desc_style(font(10.0).style(FontStyle::Bold))
            .draw()?;

        let key = px(5.0) as i32;
        chart
            .draw_series(self.throughput.iter().enumerate().map(|(i, &v)| {
                let x = i as f64;
                Rectangle::new(
                    [(x - 0.25, 0.0), (x + 0.25, v)],
                    THROUGHPUT_COLOR.mix(0.6).filled(),
                )
            }))?
            .label("Throughput")
            .legend(move |(x, y)| {
                Rectangle::new(
                    [(x, y - key), (x + 2 * key, y + key)],
                    THROUGHPUT_COLOR.mix(0.6).filled(),
                )
            });

        let points = self.error_points();
        chart
            .draw_secondary_series(LineSeries::new(
                points.clone(),
                ERROR_COLOR.stroke_width(px(3.0)),
            ))?
            .label("Error rate")
            .legend(move |(x, y)| {
                PathElement::new(vec![(x, y), (x + 2 * key, y)], ERROR_COLOR.stroke_width(px(3.0)))
            });
        chart.draw_secondary_series(
            points
                .iter()
                .map(|&p| Circle::new(p, px(4.0) as i32, ERROR_COLOR.filled())),
        )?;

        let annotation = font(10.0)
            .style(FontStyle::Bold)
            .color(&ERROR_COLOR)
            .pos(Pos::new(HPos::Center, VPos::Bottom));
        let offset = px(6.0) as i32;
        chart.draw_secondary_series(points.iter().map(|&(x, v)| {
            EmptyElement::at((x, v))
                + Text::new(percent_label(v), (0, -offset), annotation.clone())
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
