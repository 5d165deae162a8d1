//! Plotters-powered score sensitivity chart widget for Ratatui.
//!
//! We render Plotters output into the Ratatui buffer using `plotters-ratatui-backend`.

use plotters::prelude::*;
use plotters_ratatui_backend::widget_fn;
use ratatui::{
    buffer::Buffer,
    layout::Rect,
    style::{Color, Style},
    widgets::Widget,
};

/// A lightweight, render-only chart description.
///
/// All series and bounds are computed outside the render call so `render()`
/// only draws.
pub struct SensitivityChart<'a> {
    /// Score as a function of the swept metric.
    pub curve: &'a [(f64, f64)],
    /// Current `(metric value, score)`.
    pub current: (f64, f64),
    /// Status thresholds drawn as horizontal guides (at-risk, stable).
    pub thresholds: [f64; 2],
    /// X bounds (metric range, %).
    pub x_bounds: [f64; 2],
    /// Y bounds (score).
    pub y_bounds: [f64; 2],
    pub x_label: &'a str,
    pub y_label: &'a str,
}

impl<'a> Widget for SensitivityChart<'a> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        // Plotters can fail to lay out very small areas; show a hint instead of panicking.
        if area.width < 20 || area.height < 8 {
            buf.set_string(
                area.x,
                area.y,
                "Chart area too small (resize terminal).",
                Style::default().fg(Color::Yellow),
            );
            return;
        }

        let [x0, x1] = self.x_bounds;
        let [y0, y1] = self.y_bounds;

        if !(x0.is_finite() && x1.is_finite() && y0.is_finite() && y1.is_finite()) || x1 <= x0 || y1 <= y0 {
            return;
        }

        let widget = widget_fn(move |root| {
            let mut chart = ChartBuilder::on(&root)
                .margin(1)
                .set_label_area_size(LabelAreaPosition::Left, 6)
                .set_label_area_size(LabelAreaPosition::Bottom, 3)
                .build_cartesian_2d(x0..x1, y0..y1)?;

            chart
                .configure_mesh()
                .disable_x_mesh()
                .disable_y_mesh()
                .x_desc(self.x_label)
                .y_desc(self.y_label)
                .x_labels(5)
                .y_labels(5)
                .x_label_formatter(&|v| format!("{v:.1}"))
                .y_label_formatter(&|v| format!("{v:.0}"))
                .label_style(("sans-serif", 10).into_font().color(&WHITE))
                .axis_style(&WHITE)
                .bold_line_style(&WHITE)
                .draw()?;

            let curve_color = RGBColor(0, 255, 255); // cyan
            let at_risk_color = RGBColor(255, 0, 0); // red
            let stable_color = RGBColor(0, 255, 0); // green
            let current_color = RGBColor(255, 255, 0); // yellow

            // Threshold guides first so the curve draws over them.
            let [at_risk, stable] = self.thresholds;
            if at_risk > y0 && at_risk < y1 {
                chart.draw_series(LineSeries::new([(x0, at_risk), (x1, at_risk)], &at_risk_color))?;
            }
            if stable > y0 && stable < y1 {
                chart.draw_series(LineSeries::new([(x0, stable), (x1, stable)], &stable_color))?;
            }

            chart.draw_series(LineSeries::new(self.curve.iter().copied(), &curve_color))?;

            // Current input: a vertical marker plus a dot. `Circle` radii are mapped
            // incorrectly by the ratatui backend, so stick to lines and pixels.
            let (cx, cy) = self.current;
            if cx >= x0 && cx <= x1 {
                chart.draw_series(LineSeries::new([(cx, y0), (cx, y1)], &current_color))?;
                chart.draw_series(std::iter::once(Pixel::new((cx, cy), WHITE)))?;
            }

            Ok(())
        });

        widget.render(area, buf);
    }
}
