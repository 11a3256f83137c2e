use super::mixture_api::{R_UNIVERSAL, T_STD};
use enum_dispatch::enum_dispatch;
use serde::{Deserialize, Serialize};

// NASA 7-coefficient polynomials, molar basis
#[allow(non_snake_case)]
fn Cp(t: f64, a: &[f64; 7]) -> f64 {
    R_UNIVERSAL * (a[0] + a[1] * t + a[2] * t.powi(2) + a[3] * t.powi(3) + a[4] * t.powi(4))
}
fn dh(t: f64, a: &[f64; 7]) -> f64 {
    R_UNIVERSAL
        * t
        * (a[0]
            + a[1] * t / 2.0
            + a[2] * t.powi(2) / 3.0
            + a[3] * t.powi(3) / 4.0
            + a[4] * t.powi(4) / 5.0
            + a[5] / t)
}

#[enum_dispatch]
pub trait SpecieThermoCalculator {
    /// molar enthalpy (formation + sensible), J/mol
    fn enthalpy(&self, t: f64) -> f64;
    /// molar heat capacity, J/(mol·K)
    fn heat_capacity(&self, t: f64) -> f64;
}

/// Enthalpy of formation at 298.15 K plus a constant heat capacity
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[allow(non_snake_case)]
pub struct ConstantThermo {
    /// J/mol
    pub Hf: f64,
    /// J/(mol·K)
    #[serde(default)]
    pub Cp: f64,
}

impl SpecieThermoCalculator for ConstantThermo {
    fn enthalpy(&self, t: f64) -> f64 {
        self.Hf + self.Cp * (t - T_STD)
    }
    fn heat_capacity(&self, _t: f64) -> f64 {
        self.Cp
    }
}

/// NASA format 7 coefficients for two temperature ranges
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct NASA7Thermo {
    /// [T low, T common, T high]
    #[serde(rename = "T")]
    pub t_range: [f64; 3],
    pub low: [f64; 7],
    pub high: [f64; 7],
}

impl NASA7Thermo {
    // outside [T low, T high] the nearest polynomial is extrapolated
    fn coeffs(&self, t: f64) -> &[f64; 7] {
        if t <= self.t_range[1] {
            &self.low
        } else {
            &self.high
        }
    }
}

impl SpecieThermoCalculator for NASA7Thermo {
    fn enthalpy(&self, t: f64) -> f64 {
        dh(t, self.coeffs(t))
    }
    fn heat_capacity(&self, t: f64) -> f64 {
        Cp(t, self.coeffs(t))
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(tag = "model")]
#[enum_dispatch(SpecieThermoCalculator)]
pub enum SpecieThermo {
    #[serde(rename = "constant")]
    Constant(ConstantThermo),
    #[serde(rename = "NASA7")]
    NASA7(NASA7Thermo),
}
