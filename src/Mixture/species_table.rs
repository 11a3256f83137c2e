//! # Species table
//!
//! Concrete `Mixture`: an ordered list of species with molecular weights and
//! optional thermo data. Species can be added one by one or loaded from JSON:
//! ```json
//! [
//!   {"name": "CH4", "thermo": {"model": "constant", "Hf": -74870.0}},
//!   {"name": "fuelVapour", "formula": "C7H16", "thermo": {"model": "NASA7", "T": [200, 1000, 5000], "low": [...], "high": [...]}},
//!   {"name": "N2", "W": 28.014}
//! ]
//! ```
//! When `W` is not given it is computed from `formula`, or from the name read as a formula.
use super::mixture_api::Mixture;
use super::molmass::calculate_molar_mass;
use super::species_thermo::{SpecieThermo, SpecieThermoCalculator};
use crate::Combustion::errors::CombustionError;
use serde::{Deserialize, Serialize};
use std::fs::File;
use std::io::BufReader;
use std::path::Path;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SpecieEntry {
    pub name: String,
    #[serde(rename = "W", default)]
    pub molecular_weight: Option<f64>,
    #[serde(default)]
    pub formula: Option<String>,
    #[serde(default)]
    pub thermo: Option<SpecieThermo>,
}

#[derive(Debug, Clone, Default)]
pub struct SpeciesTable {
    species: Vec<String>,
    molecular_weights: Vec<f64>,
    thermo: Vec<Option<SpecieThermo>>,
}

impl SpeciesTable {
    pub fn new() -> Self {
        Self::default()
    }

    /// add specie with known molecular weight, g/mol
    pub fn add_specie(
        &mut self,
        name: &str,
        molecular_weight: f64,
        thermo: Option<SpecieThermo>,
    ) -> Result<usize, CombustionError> {
        if self.species_index(name).is_some() {
            return Err(CombustionError::invalid_key(
                name,
                "specie is defined more than once",
            ));
        }
        if !(molecular_weight.is_finite() && molecular_weight > 0.0) {
            return Err(CombustionError::invalid_key(
                "W",
                format!("molecular weight of {} must be positive", name),
            ));
        }
        self.species.push(name.to_string());
        self.molecular_weights.push(molecular_weight);
        self.thermo.push(thermo);
        Ok(self.species.len() - 1)
    }

    /// add specie whose molecular weight is computed from its chemical formula
    pub fn add_specie_from_formula(
        &mut self,
        name: &str,
        formula: &str,
        thermo: Option<SpecieThermo>,
    ) -> Result<usize, CombustionError> {
        let (molar_mass, _) = calculate_molar_mass(formula).map_err(|reason| {
            CombustionError::invalid_key("formula", format!("{}: {}", formula, reason))
        })?;
        self.add_specie(name, molar_mass, thermo)
    }

    pub fn add_entry(&mut self, entry: SpecieEntry) -> Result<usize, CombustionError> {
        match entry.molecular_weight {
            Some(w) => self.add_specie(&entry.name, w, entry.thermo),
            None => {
                let formula = entry.formula.clone().unwrap_or_else(|| entry.name.clone());
                self.add_specie_from_formula(&entry.name, &formula, entry.thermo)
            }
        }
    }

    pub fn from_entries(entries: Vec<SpecieEntry>) -> Result<Self, CombustionError> {
        let mut table = Self::new();
        for entry in entries {
            table.add_entry(entry)?;
        }
        Ok(table)
    }

    pub fn from_json(value: serde_json::Value) -> Result<Self, CombustionError> {
        let entries: Vec<SpecieEntry> = serde_json::from_value(value)?;
        Self::from_entries(entries)
    }

    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self, CombustionError> {
        let reader = BufReader::new(File::open(path)?);
        let entries: Vec<SpecieEntry> = serde_json::from_reader(reader)?;
        Self::from_entries(entries)
    }

    pub fn thermo(&self, i: usize) -> Option<&SpecieThermo> {
        self.thermo.get(i).and_then(|t| t.as_ref())
    }
}

impl Mixture for SpeciesTable {
    fn species(&self) -> &[String] {
        &self.species
    }
    fn molecular_weight(&self, i: usize) -> f64 {
        self.molecular_weights[i]
    }
    fn enthalpy(&self, i: usize, t: f64) -> Option<f64> {
        self.thermo(i).map(|thermo| thermo.enthalpy(t))
    }
}
