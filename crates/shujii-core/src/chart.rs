//! Radar chart series for the on-screen result.
//!
//! The plotting widget draws a polar line through the points in order; to
//! make the shape close into a loop the first point is repeated at the end.

use serde::{Deserialize, Serialize};
use ts_rs::TS;

use crate::models::answer::AnswerSet;

/// A closed polar series: one radius and one axis label per question, plus
/// the first of each repeated at the end.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct RadarSeries {
    pub r: Vec<f64>,
    pub theta: Vec<String>,
    pub name: String,
}

/// Radial axis settings for the widget: yes/no plotted on a 0..1 scale.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct RadialAxis {
    pub range: Vec<f64>,
    pub tick_vals: Vec<f64>,
    pub tick_text: Vec<String>,
}

impl Default for RadialAxis {
    fn default() -> Self {
        Self {
            range: vec![0.0, 1.0],
            tick_vals: vec![0.0, 1.0],
            tick_text: vec!["No".to_string(), "Yes".to_string()],
        }
    }
}

/// Everything the widget needs to draw the radar chart.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct RadarChart {
    pub series: RadarSeries,
    pub radial_axis: RadialAxis,
}

/// Build the closed series from the yes/no answers, in catalogue order.
pub fn radar_series(answers: &AnswerSet) -> RadarSeries {
    let mut r = Vec::with_capacity(answers.yes_no().len() + 1);
    let mut theta = Vec::with_capacity(answers.yes_no().len() + 1);

    for (question, yes) in answers.answers() {
        r.push(if yes { 1.0 } else { 0.0 });
        theta.push(question.id.to_string());
    }

    if let (Some(&first_r), Some(first_theta)) = (r.first(), theta.first().cloned()) {
        r.push(first_r);
        theta.push(first_theta);
    }

    RadarSeries {
        r,
        theta,
        name: "Yes=1 / No=0".to_string(),
    }
}

pub fn radar_chart(answers: &AnswerSet) -> RadarChart {
    RadarChart {
        series: radar_series(answers),
        radial_axis: RadialAxis::default(),
    }
}
