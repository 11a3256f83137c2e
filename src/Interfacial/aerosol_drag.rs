//! # Aerosol drag
//!
//! Stokes drag of very small dispersed particles corrected for slip at the
//! particle surface (Cunningham correction):
//! ```text
//! lambda = k_B·T / (sqrt(2)·pi·p·dm²)          mean free path of the gas
//! Cc     = 1 + lambda/d·(A1 + A2·exp(-A3·d/lambda))
//! Cd·Re  = 24/Cc
//! ```
//! `dm` is the diameter of the continuous phase molecules (N2 by default).
use crate::Combustion::errors::CombustionError;
use crate::Combustion::residuals::check_field;
use crate::Mixture::mixture_api::{ScalarField, ThermoState};
use serde::{Deserialize, Serialize};
use std::f64::consts::{PI, SQRT_2};

/// Boltzmann constant, J/K
pub const K_BOLTZMANN: f64 = 1.380649e-23;

fn default_a1() -> f64 {
    2.514
}
fn default_a2() -> f64 {
    0.8
}
fn default_a3() -> f64 {
    0.55
}
fn default_dm() -> f64 {
    364e-12
}

/// Continuous phase state and dispersed phase geometry of a phase pair
pub struct PhasePair<'a, T: ThermoState + ?Sized> {
    pub continuous: &'a T,
    /// dispersed phase diameter, m
    pub d: &'a ScalarField,
}

#[allow(non_snake_case)]
pub trait DragModel {
    /// drag coefficient times the Reynolds number
    fn CdRe<T: ThermoState + ?Sized>(
        &self,
        pair: &PhasePair<T>,
    ) -> Result<ScalarField, CombustionError>;
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[allow(non_snake_case)]
pub struct AerosolDrag {
    #[serde(default = "default_a1")]
    pub A1: f64,
    #[serde(default = "default_a2")]
    pub A2: f64,
    #[serde(default = "default_a3")]
    pub A3: f64,
    /// molecule diameter of the continuous phase, m
    #[serde(default = "default_dm")]
    pub dm: f64,
}

impl Default for AerosolDrag {
    fn default() -> Self {
        Self {
            A1: default_a1(),
            A2: default_a2(),
            A3: default_a3(),
            dm: default_dm(),
        }
    }
}

impl AerosolDrag {
    pub fn from_value(value: &serde_json::Value) -> Result<Self, CombustionError> {
        let drag: AerosolDrag = serde_json::from_value(value.clone())?;
        if !(drag.dm.is_finite() && drag.dm > 0.0) {
            return Err(CombustionError::invalid_key("dm", "must be a positive length"));
        }
        Ok(drag)
    }

    /// mean free path of the continuous phase, m
    pub fn mean_free_path(&self, t: f64, p: f64) -> f64 {
        K_BOLTZMANN * t / (SQRT_2 * PI * p * self.dm.powi(2))
    }

    /// Cunningham slip correction for particle diameter d
    pub fn cunningham(&self, lambda: f64, d: f64) -> f64 {
        1.0 + lambda / d * (self.A1 + self.A2 * (-self.A3 * d / lambda).exp())
    }
}

impl DragModel for AerosolDrag {
    fn CdRe<T: ThermoState + ?Sized>(
        &self,
        pair: &PhasePair<T>,
    ) -> Result<ScalarField, CombustionError> {
        let t = pair.continuous.temperature();
        let p = pair.continuous.pressure();
        let n_cells = t.len();
        check_field("p", p, n_cells)?;
        check_field("d", pair.d, n_cells)?;
        let mut cd_re = ScalarField::zeros(n_cells);
        for c in 0..n_cells {
            if !(p[c] > 0.0 && pair.d[c] > 0.0) {
                return Err(CombustionError::NumericalDomain(format!(
                    "aerosol drag in cell {}: p = {}, d = {}",
                    c, p[c], pair.d[c]
                )));
            }
            let lambda = self.mean_free_path(t[c], p[c]);
            cd_re[c] = 24.0 / self.cunningham(lambda, pair.d[c]);
        }
        Ok(cd_re)
    }
}
