//! # Mixture API
//!
//! Capability interfaces the combustion closure is written against.
//! - `Mixture`: species list, molecular weights and molar enthalpies
//! - `ThermoState`: cell fields of temperature, pressure and density
//!
//! Any thermophysical package exposing these can be plugged into the
//! combustion models; `SpeciesTable` and `ThermoFields` are the ones shipped
//! with the crate.
use nalgebra::DVector;

/// one value per cell of the mesh
pub type ScalarField = DVector<f64>;

/// standard reference temperature, K
pub const T_STD: f64 = 298.15;
/// universal gas constant, J/(mol·K)
pub const R_UNIVERSAL: f64 = 8.314462618;

pub trait Mixture {
    /// names of all species, index order is the order of the mass fraction fields
    fn species(&self) -> &[String];
    /// molecular weight of specie i, g/mol
    fn molecular_weight(&self, i: usize) -> f64;
    /// molar enthalpy (formation + sensible) of specie i at temperature t, J/mol.
    /// None if the specie carries no enthalpy data
    fn enthalpy(&self, i: usize, t: f64) -> Option<f64>;

    /// enthalpy of formation at the standard reference temperature, J/mol
    fn formation_enthalpy(&self, i: usize) -> Option<f64> {
        self.enthalpy(i, T_STD)
    }

    fn species_index(&self, name: &str) -> Option<usize> {
        self.species().iter().position(|s| s == name)
    }

    fn n_species(&self) -> usize {
        self.species().len()
    }
}

pub trait ThermoState {
    fn temperature(&self) -> &ScalarField;
    fn pressure(&self) -> &ScalarField;
    fn density(&self) -> &ScalarField;

    fn n_cells(&self) -> usize {
        self.temperature().len()
    }
}

/// Plain container of thermodynamic state fields
#[derive(Debug, Clone)]
#[allow(non_snake_case)]
pub struct ThermoFields {
    pub T: ScalarField,
    pub p: ScalarField,
    pub rho: ScalarField,
}

impl ThermoFields {
    #[allow(non_snake_case)]
    pub fn new(T: ScalarField, p: ScalarField, rho: ScalarField) -> Self {
        Self { T, p, rho }
    }
    /// the same state in every cell
    pub fn uniform(n_cells: usize, t: f64, p: f64, rho: f64) -> Self {
        Self {
            T: ScalarField::from_element(n_cells, t),
            p: ScalarField::from_element(n_cells, p),
            rho: ScalarField::from_element(n_cells, rho),
        }
    }
}

impl ThermoState for ThermoFields {
    fn temperature(&self) -> &ScalarField {
        &self.T
    }
    fn pressure(&self) -> &ScalarField {
        &self.p
    }
    fn density(&self) -> &ScalarField {
        &self.rho
    }
}
