//! SVG chart rendering for the completed result series
//!
//! Renders write and read throughput against file size as a standalone
//! 800x600 SVG document: write curve red, read curve blue, y axis from
//! zero to 1.1x the peak speed.

use crate::models::ResultSeries;
use crate::{Result, SweepError};
use std::fmt::Write as _;
use std::fs;
use std::path::Path;

const WIDTH: f64 = 800.0;
const HEIGHT: f64 = 600.0;
const MARGIN_LEFT: f64 = 70.0;
const MARGIN_RIGHT: f64 = 30.0;
const MARGIN_TOP: f64 = 50.0;
const MARGIN_BOTTOM: f64 = 60.0;

/// Render the series to an SVG file at `path`.
pub fn render_svg(series: &ResultSeries, path: &Path) -> Result<()> {
    if series.is_empty() {
        return Err(SweepError::ConfigError(
            "cannot plot an empty result series".to_string(),
        ));
    }

    let svg = render_document(series);
    fs::write(path, svg).map_err(|e| SweepError::io("plot/write", e))?;
    Ok(())
}

fn render_document(series: &ResultSeries) -> String {
    let x_min = series.points().first().map(|p| p.size_bytes).unwrap_or(0) as f64 / 1_048_576.0;
    let x_max = series.points().last().map(|p| p.size_bytes).unwrap_or(0) as f64 / 1_048_576.0;
    let y_max = (series.peak_speed() * 1.1).max(1.0);

    let plot_w = WIDTH - MARGIN_LEFT - MARGIN_RIGHT;
    let plot_h = HEIGHT - MARGIN_TOP - MARGIN_BOTTOM;

    let x_pos = |size_mb: f64| -> f64 {
        if x_max > x_min {
            MARGIN_LEFT + (size_mb - x_min) / (x_max - x_min) * plot_w
        } else {
            MARGIN_LEFT + plot_w / 2.0
        }
    };
    let y_pos = |speed: f64| -> f64 { MARGIN_TOP + plot_h - (speed / y_max) * plot_h };

    let polyline = |f: &dyn Fn(&crate::models::SizePoint) -> f64| -> String {
        series
            .iter()
            .map(|p| {
                format!(
                    "{:.1},{:.1}",
                    x_pos(p.size_bytes as f64 / 1_048_576.0),
                    y_pos(f(p))
                )
            })
            .collect::<Vec<_>>()
            .join(" ")
    };

    let mut svg = String::new();
    let _ = writeln!(
        svg,
        r#"<svg xmlns="http://www.w3.org/2000/svg" width="{WIDTH}" height="{HEIGHT}" viewBox="0 0 {WIDTH} {HEIGHT}">"#
    );
    let _ = writeln!(svg, r#"<rect width="{WIDTH}" height="{HEIGHT}" fill="white"/>"#);
    let _ = writeln!(
        svg,
        r#"<text x="{:.0}" y="30" text-anchor="middle" font-family="sans-serif" font-size="18">Disk Write/Read Speed vs File Size</text>"#,
        WIDTH / 2.0
    );

    // Axes
    let _ = writeln!(
        svg,
        r#"<line x1="{l:.1}" y1="{t:.1}" x2="{l:.1}" y2="{b:.1}" stroke="black"/>"#,
        l = MARGIN_LEFT,
        t = MARGIN_TOP,
        b = MARGIN_TOP + plot_h
    );
    let _ = writeln!(
        svg,
        r#"<line x1="{l:.1}" y1="{b:.1}" x2="{r:.1}" y2="{b:.1}" stroke="black"/>"#,
        l = MARGIN_LEFT,
        r = MARGIN_LEFT + plot_w,
        b = MARGIN_TOP + plot_h
    );
    let _ = writeln!(
        svg,
        r#"<text x="{:.0}" y="{:.0}" text-anchor="middle" font-family="sans-serif" font-size="14">File size (MB)</text>"#,
        MARGIN_LEFT + plot_w / 2.0,
        HEIGHT - 15.0
    );
    let _ = writeln!(
        svg,
        r#"<text x="20" y="{:.0}" text-anchor="middle" font-family="sans-serif" font-size="14" transform="rotate(-90 20 {:.0})">Speed (MB/s)</text>"#,
        MARGIN_TOP + plot_h / 2.0,
        MARGIN_TOP + plot_h / 2.0
    );

    // Axis tick labels at the extremes
    let _ = writeln!(
        svg,
        r#"<text x="{:.1}" y="{:.0}" text-anchor="middle" font-family="sans-serif" font-size="12">{:.1}</text>"#,
        x_pos(x_min),
        MARGIN_TOP + plot_h + 20.0,
        x_min
    );
    let _ = writeln!(
        svg,
        r#"<text x="{:.1}" y="{:.0}" text-anchor="middle" font-family="sans-serif" font-size="12">{:.1}</text>"#,
        x_pos(x_max),
        MARGIN_TOP + plot_h + 20.0,
        x_max
    );
    let _ = writeln!(
        svg,
        r#"<text x="{:.0}" y="{:.1}" text-anchor="end" font-family="sans-serif" font-size="12">{:.0}</text>"#,
        MARGIN_LEFT - 8.0,
        MARGIN_TOP + 5.0,
        y_max
    );
    let _ = writeln!(
        svg,
        r#"<text x="{:.0}" y="{:.1}" text-anchor="end" font-family="sans-serif" font-size="12">0</text>"#,
        MARGIN_LEFT - 8.0,
        MARGIN_TOP + plot_h + 5.0
    );

    // Curves
    let _ = writeln!(
        svg,
        r#"<polyline points="{}" fill="none" stroke="red" stroke-width="2"/>"#,
        polyline(&|p| p.write_speed_mbs)
    );
    let _ = writeln!(
        svg,
        r#"<polyline points="{}" fill="none" stroke="blue" stroke-width="2"/>"#,
        polyline(&|p| p.read_speed_mbs)
    );

    // Legend
    let legend_x = MARGIN_LEFT + plot_w - 110.0;
    let _ = writeln!(
        svg,
        r#"<line x1="{x:.0}" y1="{y:.0}" x2="{x2:.0}" y2="{y:.0}" stroke="red" stroke-width="2"/><text x="{tx:.0}" y="{ty:.0}" font-family="sans-serif" font-size="13">Write</text>"#,
        x = legend_x,
        x2 = legend_x + 25.0,
        y = MARGIN_TOP + 15.0,
        tx = legend_x + 32.0,
        ty = MARGIN_TOP + 19.0
    );
    let _ = writeln!(
        svg,
        r#"<line x1="{x:.0}" y1="{y:.0}" x2="{x2:.0}" y2="{y:.0}" stroke="blue" stroke-width="2"/><text x="{tx:.0}" y="{ty:.0}" font-family="sans-serif" font-size="13">Read</text>"#,
        x = legend_x,
        x2 = legend_x + 25.0,
        y = MARGIN_TOP + 35.0,
        tx = legend_x + 32.0,
        ty = MARGIN_TOP + 39.0
    );

    svg.push_str("</svg>\n");
    svg
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::SizePoint;
    use tempfile::tempdir;

    fn series() -> ResultSeries {
        let mut series = ResultSeries::new();
        series.push(SizePoint {
            size_bytes: 1024 * 1024,
            write_speed_mbs: 120.0,
            read_speed_mbs: 450.0,
        });
        series.push(SizePoint {
            size_bytes: 2 * 1024 * 1024,
            write_speed_mbs: 130.0,
            read_speed_mbs: 460.0,
        });
        series
    }

    #[test]
    fn test_render_svg_writes_file() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("speed_graph.svg");

        render_svg(&series(), &path).unwrap();

        let content = std::fs::read_to_string(&path).unwrap();
        assert!(content.starts_with("<svg"));
        assert!(content.contains("polyline"));
        assert!(content.contains("Write"));
        assert!(content.contains("Read"));
        assert!(content.ends_with("</svg>\n"));
    }

    #[test]
    fn test_empty_series_rejected() {
        let dir = tempdir().unwrap();
        let err = render_svg(&ResultSeries::new(), &dir.path().join("x.svg")).unwrap_err();
        assert!(err.to_string().contains("empty"));
    }

    #[test]
    fn test_single_point_series_renders() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("single.svg");
        let mut single = ResultSeries::new();
        single.push(SizePoint {
            size_bytes: 1024 * 1024,
            write_speed_mbs: 100.0,
            read_speed_mbs: 200.0,
        });

        render_svg(&single, &path).unwrap();
        assert!(path.exists());
    }
}
