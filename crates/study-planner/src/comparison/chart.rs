use serde::Serialize;
use std::f64::consts::{FRAC_PI_2, TAU};

#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum ChartError {
    #[error("chart total is zero; nothing to draw")]
    ZeroTotal,
    #[error("chart value for '{label}' must be finite and non-negative, got {value}")]
    InvalidValue { label: String, value: f64 },
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ChartSlice {
    pub label: String,
    pub value: f64,
    pub color: String,
}

impl ChartSlice {
    pub fn new(label: impl Into<String>, value: f64, color: impl Into<String>) -> Self {
        Self {
            label: label.into(),
            value,
            color: color.into(),
        }
    }
}

/// Circle the donut is stroked on.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct DonutGeometry {
    pub radius: f64,
    pub stroke_width: f64,
}

impl DonutGeometry {
    pub fn circumference(&self) -> f64 {
        TAU * self.radius
    }
}

impl Default for DonutGeometry {
    fn default() -> Self {
        Self {
            radius: 70.0,
            stroke_width: 24.0,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DonutArc {
    pub label: String,
    pub color: String,
    pub value: f64,
    /// Share of the full circle, 0.0..=1.0.
    pub fraction: f64,
    pub start_angle: f64,
    pub sweep_angle: f64,
    pub dash_length: f64,
    pub dash_offset: f64,
}

impl DonutArc {
    pub fn percentage(&self) -> f64 {
        self.fraction * 100.0
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DonutChart {
    pub total: f64,
    pub geometry: DonutGeometry,
    pub arcs: Vec<DonutArc>,
}

/// Arcs start at twelve o'clock.
pub const DONUT_START_ANGLE: f64 = -FRAC_PI_2;

/// Lays slices out as consecutive arcs with no gaps.
///
/// `total` defaults to the sum of slice values. A zero total is an error
/// rather than a chart of NaN proportions.
pub fn donut(
    slices: &[ChartSlice],
    total: Option<f64>,
    geometry: DonutGeometry,
) -> Result<DonutChart, ChartError> {
    for slice in slices {
        ensure_valid(&slice.label, slice.value)?;
    }

    let total = match total {
        Some(total) => {
            ensure_valid("total", total)?;
            total
        }
        None => slices.iter().map(|slice| slice.value).sum(),
    };
    if total == 0.0 {
        return Err(ChartError::ZeroTotal);
    }

    let circumference = geometry.circumference();
    let mut consumed = 0.0;
    let arcs = slices
        .iter()
        .map(|slice| {
            let fraction = slice.value / total;
            let arc = DonutArc {
                label: slice.label.clone(),
                color: slice.color.clone(),
                value: slice.value,
                fraction,
                start_angle: DONUT_START_ANGLE + TAU * consumed,
                sweep_angle: TAU * fraction,
                dash_length: circumference * fraction,
                dash_offset: -(circumference * consumed),
            };
            consumed += fraction;
            arc
        })
        .collect();

    Ok(DonutChart {
        total,
        geometry,
        arcs,
    })
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Bar {
    pub label: String,
    pub value: f64,
    pub length: f64,
}

/// Bar lengths normalised against the largest value, which gets `max_length`.
pub fn bars(entries: &[(String, f64)], max_length: f64) -> Result<Vec<Bar>, ChartError> {
    for (label, value) in entries {
        ensure_valid(label, *value)?;
    }
    let peak = entries
        .iter()
        .map(|(_, value)| *value)
        .fold(0.0_f64, f64::max);
    if peak == 0.0 {
        return Err(ChartError::ZeroTotal);
    }

    Ok(entries
        .iter()
        .map(|(label, value)| Bar {
            label: label.clone(),
            value: *value,
            length: value / peak * max_length,
        })
        .collect())
}

fn ensure_valid(label: &str, value: f64) -> Result<(), ChartError> {
    if value.is_finite() && value >= 0.0 {
        Ok(())
    } else {
        Err(ChartError::InvalidValue {
            label: label.to_string(),
            value,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const EPSILON: f64 = 1e-9;

    fn slices(values: &[f64]) -> Vec<ChartSlice> {
        values
            .iter()
            .enumerate()
            .map(|(index, value)| ChartSlice::new(format!("s{index}"), *value, "#000000"))
            .collect()
    }

    #[test]
    fn proportions_follow_values_and_sum_to_one() {
        let chart = donut(&slices(&[100.0, 200.0, 300.0]), None, DonutGeometry::default())
            .expect("chart renders");

        let fractions: Vec<f64> = chart.arcs.iter().map(|arc| arc.fraction).collect();
        for (actual, expected) in fractions.iter().zip([1.0 / 6.0, 2.0 / 6.0, 3.0 / 6.0]) {
            assert!((actual - expected).abs() < EPSILON);
        }
        assert!((fractions.iter().sum::<f64>() - 1.0).abs() < EPSILON);
        assert!((chart.total - 600.0).abs() < EPSILON);
    }

    #[test]
    fn arcs_are_consecutive_from_twelve_o_clock() {
        let chart = donut(&slices(&[1.0, 1.0, 2.0]), None, DonutGeometry::default())
            .expect("chart renders");

        assert!((chart.arcs[0].start_angle - DONUT_START_ANGLE).abs() < EPSILON);
        for pair in chart.arcs.windows(2) {
            let end = pair[0].start_angle + pair[0].sweep_angle;
            assert!((pair[1].start_angle - end).abs() < EPSILON);
        }
        let last = chart.arcs.last().expect("arcs present");
        let end = last.start_angle + last.sweep_angle;
        assert!((end - (DONUT_START_ANGLE + TAU)).abs() < EPSILON);

        let circumference = chart.geometry.circumference();
        assert!((chart.arcs[2].dash_length - circumference / 2.0).abs() < EPSILON);
        assert!((chart.arcs[2].dash_offset + circumference / 2.0).abs() < EPSILON);
    }

    #[test]
    fn zero_total_is_an_error() {
        let err = donut(&slices(&[0.0, 0.0]), None, DonutGeometry::default())
            .expect_err("zero total rejected");
        assert_eq!(err, ChartError::ZeroTotal);

        let err = donut(&[], None, DonutGeometry::default()).expect_err("empty rejected");
        assert_eq!(err, ChartError::ZeroTotal);
    }

    #[test]
    fn rejects_negative_and_nan_values() {
        let err = donut(&slices(&[10.0, -1.0]), None, DonutGeometry::default())
            .expect_err("negative rejected");
        assert!(matches!(err, ChartError::InvalidValue { .. }));

        let err = bars(&[("a".to_string(), f64::NAN)], 100.0).expect_err("nan rejected");
        assert!(matches!(err, ChartError::InvalidValue { .. }));
    }

    #[test]
    fn explicit_total_is_respected() {
        let chart = donut(&slices(&[25.0]), Some(100.0), DonutGeometry::default())
            .expect("chart renders");
        assert!((chart.arcs[0].percentage() - 25.0).abs() < EPSILON);
    }

    #[test]
    fn bars_normalise_against_the_maximum() {
        let result = bars(
            &[
                ("a".to_string(), 1750.0),
                ("b".to_string(), 875.0),
                ("c".to_string(), 1750.0),
            ],
            200.0,
        )
        .expect("bars render");

        assert!((result[0].length - 200.0).abs() < EPSILON);
        assert!((result[1].length - 100.0).abs() < EPSILON);
        assert!((result[2].length - 200.0).abs() < EPSILON);
    }
}
