//! SVG bar chart of the sensitivity analysis.

use std::fmt::Write as _;
use std::fs;
use std::path::Path;

use tracing::{info, instrument};

use vaxcast_model::SensitivityReport;

use crate::IoError;

const WIDTH: f64 = 640.0;
const HEIGHT: f64 = 400.0;
const MARGIN_LEFT: f64 = 60.0;
const MARGIN_BOTTOM: f64 = 120.0;
const MARGIN_TOP: f64 = 40.0;
const MARGIN_RIGHT: f64 = 20.0;

/// Render the sensitivity report as an SVG bar chart.
///
/// One bar per attribute, y axis fixed to [0, 1] accuracy, attribute
/// names rotated under the x axis. Plain hand-assembled SVG markup; no
/// rendering library involved.
///
/// # Errors
///
/// Returns [`IoError::WriteFile`] if the file cannot be written.
#[instrument(skip_all, fields(path = %path.display()))]
pub fn write_sensitivity_chart(report: &SensitivityReport, path: &Path) -> Result<(), IoError> {
    let svg = render(report);
    fs::write(path, svg).map_err(|e| IoError::WriteFile {
        path: path.to_path_buf(),
        source: e,
    })?;
    info!("sensitivity chart written");
    Ok(())
}

fn render(report: &SensitivityReport) -> String {
    let plot_width = WIDTH - MARGIN_LEFT - MARGIN_RIGHT;
    let plot_height = HEIGHT - MARGIN_TOP - MARGIN_BOTTOM;
    let n_bars = report.len().max(1) as f64;
    let slot = plot_width / n_bars;
    let bar_width = slot * 0.7;

    let mut svg = String::new();
    let _ = writeln!(
        svg,
        r#"<svg xmlns="http://www.w3.org/2000/svg" width="{WIDTH}" height="{HEIGHT}" viewBox="0 0 {WIDTH} {HEIGHT}">"#
    );
    let _ = writeln!(
        svg,
        r#"<text x="{}" y="24" text-anchor="middle" font-family="sans-serif" font-size="16">Sensitivity Analysis</text>"#,
        WIDTH / 2.0
    );

    // Axes.
    let x0 = MARGIN_LEFT;
    let y0 = MARGIN_TOP + plot_height;
    let _ = writeln!(
        svg,
        r#"<line x1="{x0}" y1="{}" x2="{x0}" y2="{y0}" stroke="black"/>"#,
        MARGIN_TOP
    );
    let _ = writeln!(
        svg,
        r#"<line x1="{x0}" y1="{y0}" x2="{}" y2="{y0}" stroke="black"/>"#,
        WIDTH - MARGIN_RIGHT
    );

    // Y ticks at 0.0, 0.25, 0.5, 0.75, 1.0.
    for i in 0..=4 {
        let value = i as f64 * 0.25;
        let y = y0 - value * plot_height;
        let _ = writeln!(
            svg,
            r#"<line x1="{}" y1="{y}" x2="{x0}" y2="{y}" stroke="black"/>"#,
            x0 - 5.0
        );
        let _ = writeln!(
            svg,
            r#"<text x="{}" y="{}" text-anchor="end" font-family="sans-serif" font-size="11">{value:.2}</text>"#,
            x0 - 8.0,
            y + 4.0
        );
    }

    // Bars and rotated attribute labels.
    for (i, (name, accuracy)) in report.iter().enumerate() {
        let accuracy = accuracy.clamp(0.0, 1.0);
        let x = x0 + i as f64 * slot + (slot - bar_width) / 2.0;
        let bar_height = accuracy * plot_height;
        let y = y0 - bar_height;
        let _ = writeln!(
            svg,
            r#"<rect x="{x:.1}" y="{y:.1}" width="{bar_width:.1}" height="{bar_height:.1}" fill="steelblue"/>"#
        );
        let label_x = x + bar_width / 2.0;
        let label_y = y0 + 12.0;
        let _ = writeln!(
            svg,
            r#"<text x="{label_x:.1}" y="{label_y:.1}" transform="rotate(45 {label_x:.1} {label_y:.1})" font-family="sans-serif" font-size="11">{}</text>"#,
            escape(name)
        );
    }

    svg.push_str("</svg>\n");
    svg
}

fn escape(text: &str) -> String {
    text.replace('&', "&amp;").replace('<', "&lt;").replace('>', "&gt;")
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::BTreeMap;

    use tempfile::TempDir;
    use vaxcast_model::{
        fit, partition, sensitivity_analysis, AttributeValue, ClassifierConfig, Dataset, Record,
        RegionId,
    };

    fn small_report() -> SensitivityReport {
        let config = ClassifierConfig::new(55.0).unwrap();
        let record = |id: &str, pop: f64, svi: &str, vax: f64| {
            let mut values = BTreeMap::new();
            values.insert("Population-Density".to_string(), AttributeValue::Continuous(pop));
            values.insert("Percent-Over-65".to_string(), AttributeValue::Continuous(15.0));
            values.insert("Income".to_string(), AttributeValue::Continuous(45_000.0));
            values.insert(
                "Percent-Attend-College".to_string(),
                AttributeValue::Continuous(25.0),
            );
            values.insert(
                "Social Vulnerability Index".to_string(),
                AttributeValue::Categorical(svi.to_string()),
            );
            (RegionId::new(id), Record::new(values, vax))
        };
        let training = Dataset::from_records(vec![
            record("c1", 100.0, "A", 70.0),
            record("c2", 200.0, "B", 40.0),
        ]);
        let models = fit(&partition(&training, &config).unwrap(), &config).unwrap();
        let test = Dataset::from_records(vec![
            record("t1", 110.0, "A", 70.0),
            record("t2", 190.0, "B", 40.0),
        ]);
        sensitivity_analysis(&test, &models, &config).unwrap()
    }

    #[test]
    fn chart_has_one_bar_per_attribute() {
        let report = small_report();
        let svg = render(&report);
        assert_eq!(svg.matches("<rect").count(), report.len());
        assert!(svg.contains("Sensitivity Analysis"));
        assert!(svg.contains("Population-Density"));
    }

    #[test]
    fn chart_writes_to_disk() {
        let report = small_report();
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("run_sensitivity.svg");
        write_sensitivity_chart(&report, &path).unwrap();
        let content = fs::read_to_string(&path).unwrap();
        assert!(content.starts_with("<svg"));
        assert!(content.trim_end().ends_with("</svg>"));
    }
}
