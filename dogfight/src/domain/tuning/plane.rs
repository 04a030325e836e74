use std::f64::consts::PI;
use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use super::gun::GunTuning;
use crate::domain::gun::Gun;
use crate::domain::plane::{Plane, Spawn};
use crate::domain::ports::Color;

/// Flight characteristics of one plane model.
#[derive(Debug, Clone, Copy)]
pub struct PlaneTuning {
    /// Cells travelled per tick.
    pub speed: f64,

    /// Radians gained or lost per pitch input.
    pub turning_circle: f64,

    /// Hull integrity on spawn and after every reset.
    pub hull: i32,

    pub color: Color,
}

impl Default for PlaneTuning {
    fn default() -> Self {
        Self {
            speed: 0.3,
            turning_circle: PI / 8.0,
            hull: 100,
            color: Color::Red,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PlaneModel {
    #[default]
    P51,
    Bf109,
}

impl PlaneModel {
    pub fn tuning(self) -> PlaneTuning {
        match self {
            PlaneModel::P51 => PlaneTuning::default(),
            PlaneModel::Bf109 => PlaneTuning {
                color: Color::Yellow,
                ..PlaneTuning::default()
            },
        }
    }

    pub fn gun_tuning(self) -> GunTuning {
        GunTuning::default()
    }

    /// Builds a ready-to-fly plane of this model for `plane_id` at `spawn`.
    pub fn build(self, plane_id: u8, spawn: Spawn) -> Plane {
        Plane::new(
            plane_id,
            self,
            spawn,
            self.tuning(),
            Gun::new(self.gun_tuning()),
        )
    }

    pub fn as_str(self) -> &'static str {
        match self {
            PlaneModel::P51 => "p51",
            PlaneModel::Bf109 => "bf109",
        }
    }
}

impl fmt::Display for PlaneModel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for PlaneModel {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "p51" | "p-51" => Ok(PlaneModel::P51),
            "bf109" | "bf-109" => Ok(PlaneModel::Bf109),
            other => Err(format!("unknown plane model `{other}` (expected p51 or bf109)")),
        }
    }
}
