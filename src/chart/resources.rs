use plotters::{coord::Shift, prelude::*, series::DashedLineSeries, style::FontStyle};

use crate::metric::ResourceSample;

use super::{figure, font, headroom, padded_range, px, Chart, DrawResult};

pub const FILE_STEM: &str = "Chart3_Resources";
const TITLE: &str = "Figure 3: System resource usage over time (Stress Test 500 VUs)";

const CPU_COLOR: RGBColor = RGBColor(0xD3, 0x2F, 0x2F);
const RAM_COLOR: RGBColor = RGBColor(0x19, 0x76, 0xD2);

// CPU percent (filled, left axis) and RAM megabytes (dashed, right axis)
// over elapsed seconds. Samples are drawn in the order they were logged.
pub struct ResourceChart<'a> {
    samples: &'a [ResourceSample],
}

impl<'a> ResourceChart<'a> {
    pub fn new(samples: &'a [ResourceSample]) -> Self {
        Self { samples }
    }

    fn cpu_points(&self) -> Vec<(f64, f64)> {
        self.samples
            .iter()
            .map(|s| (s.elapsed_secs as f64, s.cpu_percent))
            .collect()
    }

    fn ram_points(&self) -> Vec<(f64, f64)> {
        self.samples
            .iter()
            .map(|s| (s.elapsed_secs as f64, s.ram_mb))
            .collect()
    }
}

impl Chart for ResourceChart<'_> {
    fn file_stem(&self) -> &'static str {
        FILE_STEM
    }

    fn size(&self) -> (u32, u32) {
        figure(12, 6)
    }

    fn draw<DB: DrawingBackend>(&self, root: &DrawingArea<DB, Shift>) -> DrawResult<(), DB> {
        let cpu = self.cpu_points();
        let ram = self.ram_points();
        let x_range = padded_range(cpu.iter().map(|&(x, _)| x));
        let cpu_max = headroom(cpu.iter().map(|(_, y)| y));

        let mut chart = ChartBuilder::on(root)
            .caption(TITLE, font(12.0))
            .margin(px(10.0))
            .x_label_area_size(px(30.0))
            .y_label_area_size(px(50.0))
            .right_y_label_area_size(px(55.0))
            .build_cartesian_2d(x_range.clone(), 0.0..cpu_max)?
            .set_secondary_coord(x_range, padded_range(ram.iter().map(|&(_, y)| y)));

        chart
            .configure_mesh()
            .max_light_lines(0)
            .bold_line_style(BLACK.mix(0.15))
            .x_label_formatter(&|x| format!("{:.0}", x))
            .x_desc("Test time (s)")
            .y_desc("CPU usage (%)")
            .label_style(font(10.0))
            .y_label_style(font(10.0).color(&CPU_COLOR))
            .axis_desc_style(font(10.0).style(FontStyle::Bold))
            .draw()?;

        chart
            .configure_secondary_axes()
            .y_desc("RAM usage (MB)")
            .label_style(font(10.0).color(&RAM_COLOR))
            .axis_desc_style(font(10.0).style(FontStyle::Bold))
            .draw()?;

        if self.samples.is_empty() {
            return Ok(());
        }

        let line = px(2.0);
        let key = px(10.0) as i32;
        chart
            .draw_series(
                AreaSeries::new(cpu, 0.0, CPU_COLOR.mix(0.1).filled())
                    .border_style(CPU_COLOR.stroke_width(line)),
            )?
            .label("CPU")
            .legend(move |(x, y)| {
                PathElement::new(vec![(x, y), (x + 2 * key, y)], CPU_COLOR.stroke_width(line))
            });
        chart
            .draw_secondary_series(DashedLineSeries::new(
                ram,
                px(6.0),
                px(3.0),
                RAM_COLOR.stroke_width(line),
            ))?
            .label("RAM")
            .legend(move |(x, y)| {
                PathElement::new(vec![(x, y), (x + 2 * key, y)], RAM_COLOR.stroke_width(line))
            });

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
