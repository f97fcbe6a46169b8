//! Aggregate squared relative error of a prediction over five channels: CJ velocity,
//! CJ temperature, von Neumann temperature, induction length and detonation cell size.
#![allow(non_snake_case)]
use super::calibration::Prediction;
use super::spray_parameters::TargetSpec;
use serde::{Deserialize, Serialize};

/// Source of the mean detonation cell size, cm (typically a soot foil measurement).
pub trait CellSizeSource {
    fn mean_cell_size(&self) -> f64;
}

/// Cell size measured elsewhere.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct MeasuredCellSize {
    /// cm
    pub mean: f64,
}

impl CellSizeSource for MeasuredCellSize {
    fn mean_cell_size(&self) -> f64 {
        self.mean
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct LossBreakdown {
    pub DCJ: f64,
    pub TCJ: f64,
    pub TvN: f64,
    pub Lind: f64,
    pub cell: f64,
}

impl LossBreakdown {
    pub fn total(&self) -> f64 {
        self.DCJ + self.TCJ + self.TvN + self.Lind + self.cell
    }

    pub fn channels(&self) -> [(&'static str, f64); 5] {
        [
            ("DCJ", self.DCJ),
            ("TCJ", self.TCJ),
            ("TvN", self.TvN),
            ("Lind", self.Lind),
            ("cell size", self.cell),
        ]
    }
}

fn squared_relative_error(pred: f64, target: f64) -> f64 {
    ((pred - target) / target).powi(2)
}

/// Loss of `prediction` against `targets`; the induction length is compared in mm.
pub fn evaluate_loss(
    prediction: &Prediction,
    targets: &TargetSpec,
    cell_size: &dyn CellSizeSource,
) -> LossBreakdown {
    LossBreakdown {
        DCJ: squared_relative_error(prediction.DCJ_pred, targets.DCJ_target),
        TCJ: squared_relative_error(prediction.TCJ_pred, targets.TCJ_target),
        TvN: squared_relative_error(prediction.TvN_pred, targets.TvN_target),
        Lind: squared_relative_error(prediction.li_pred_mm(), targets.Lind_target),
        cell: squared_relative_error(cell_size.mean_cell_size(), targets.cell_size_target),
    }
}
