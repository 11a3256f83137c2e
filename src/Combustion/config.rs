//! # Combustion properties
//!
//! Nested key/value configuration of a combustion model, read once at
//! construction and again on every explicit reload.
//! ```json
//! {
//!   "combustionModel": "singleStepCombustion",
//!   "semiImplicit": true,
//!   "fuel": "CH4",
//!   "oxidant": "O2",
//!   "inertSpecie": "N2",
//!   "airOxygenMassFraction": 0.232,
//!   "semiImplicitFloor": 1e-6,
//!   "reaction": { "equation": "CH4 + 2O2 = CO2 + 2H2O" }
//! }
//! ```
//! The reaction may also be given as explicit lists:
//! `{"reactants": [{"specie": "CH4", "coeff": 1}, ...], "products": [...]}`.
use super::errors::CombustionError;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::fs::File;
use std::io::BufReader;
use std::path::Path;

pub const SINGLE_STEP_COMBUSTION: &str = "singleStepCombustion";

fn default_model() -> String {
    SINGLE_STEP_COMBUSTION.to_string()
}
fn default_oxidant() -> String {
    "O2".to_string()
}
/// mass fraction of oxygen in air
fn default_air_oxygen_mass_fraction() -> f64 {
    0.232
}
fn default_semi_implicit_floor() -> f64 {
    1e-6
}
fn default_coeff() -> f64 {
    1.0
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct SpecieCoeffSpec {
    pub specie: String,
    #[serde(default = "default_coeff")]
    pub coeff: f64,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(untagged)]
pub enum ReactionSpec {
    Equation {
        equation: String,
    },
    Lists {
        reactants: Vec<SpecieCoeffSpec>,
        products: Vec<SpecieCoeffSpec>,
    },
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct CombustionProperties {
    #[serde(default = "default_model")]
    pub combustion_model: String,
    /// semi-implicit (true) or explicit (false) treatment of the fuel source
    pub semi_implicit: bool,
    pub fuel: String,
    #[serde(default = "default_oxidant")]
    pub oxidant: String,
    pub inert_specie: String,
    #[serde(default = "default_air_oxygen_mass_fraction")]
    pub air_oxygen_mass_fraction: f64,
    /// lower bound of the fuel linearisation denominator
    #[serde(default = "default_semi_implicit_floor")]
    pub semi_implicit_floor: f64,
    pub reaction: ReactionSpec,
}

impl CombustionProperties {
    pub fn from_value(value: &Value) -> Result<Self, CombustionError> {
        let properties: CombustionProperties = serde_json::from_value(value.clone())?;
        properties.validate()?;
        Ok(properties)
    }

    pub fn from_json_str(text: &str) -> Result<Self, CombustionError> {
        let properties: CombustionProperties = serde_json::from_str(text)?;
        properties.validate()?;
        Ok(properties)
    }

    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self, CombustionError> {
        let reader = BufReader::new(File::open(path)?);
        let properties: CombustionProperties = serde_json::from_reader(reader)?;
        properties.validate()?;
        Ok(properties)
    }

    /// value checks serde cannot express
    pub fn validate(&self) -> Result<(), CombustionError> {
        for (key, name) in [
            ("fuel", &self.fuel),
            ("oxidant", &self.oxidant),
            ("inertSpecie", &self.inert_specie),
        ] {
            if name.trim().is_empty() {
                return Err(CombustionError::invalid_key(key, "empty specie name"));
            }
        }
        if self.fuel == self.oxidant {
            return Err(CombustionError::invalid_key(
                "oxidant",
                "oxidant and fuel must be different species",
            ));
        }
        let y_o2 = self.air_oxygen_mass_fraction;
        if !(y_o2 > 0.0 && y_o2 <= 1.0) {
            return Err(CombustionError::invalid_key(
                "airOxygenMassFraction",
                format!("{} is not in (0, 1]", y_o2),
            ));
        }
        if !(self.semi_implicit_floor.is_finite() && self.semi_implicit_floor > 0.0) {
            return Err(CombustionError::invalid_key(
                "semiImplicitFloor",
                "must be a positive number",
            ));
        }
        Ok(())
    }
}
