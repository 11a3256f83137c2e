//! # Stoichiometry
//!
//! Converts the molar reaction into mass-based quantities:
//! - `s`: mass of oxidant consumed per unit mass of fuel
//! - `stoic_ratio`: mass of all non-fuel reactants per unit mass of fuel, taken
//!   from the net coefficients so that a specie written on both sides only
//!   counts with what the reaction consumes. When
//!   the inert specie is not written in the reaction, the inert carried by the
//!   air is added through the air oxygen mass fraction: `s·(1 - Y_O2)/Y_O2`
//! - net molar coefficients, mass coefficients per unit mass of fuel and
//!   the role of every specie
use super::errors::CombustionError;
use super::reaction::Reaction;
use crate::Mixture::mixture_api::Mixture;
use approx::relative_eq;
use log::info;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SpecieRole {
    Fuel,
    Consumed,
    Produced,
    Inert,
}

#[derive(Debug, Clone, PartialEq)]
pub struct Stoichiometry {
    /// stoichiometric air-fuel mass ratio
    pub stoic_ratio: f64,
    /// stoichiometric oxygen-fuel mass ratio
    pub s: f64,
    /// net molar coefficients, products minus reactants
    pub molar_coeffs: Vec<f64>,
    /// net coefficients in kg of specie per kg of fuel; the fuel entry is -1
    pub specie_stoich_coeffs: Vec<f64>,
    pub roles: Vec<SpecieRole>,
    /// mass of inert diluent per unit mass of fuel at stoichiometry
    pub inert_mass_ratio: f64,
    /// W_fuel·|nu_fuel|, g per mole of reaction
    pub fuel_mass: f64,
}

pub struct StoichiometryCalculator<'a, M: Mixture + ?Sized> {
    mixture: &'a M,
    reaction: &'a Reaction,
}

impl<'a, M: Mixture + ?Sized> StoichiometryCalculator<'a, M> {
    pub fn new(mixture: &'a M, reaction: &'a Reaction) -> Self {
        Self { mixture, reaction }
    }

    fn name(&self, i: usize) -> String {
        self.mixture.species()[i].clone()
    }

    /// W_fuel·|nu_fuel|; the fuel must be consumed by the reaction
    pub fn fuel_mass(&self, fuel_index: usize) -> Result<f64, CombustionError> {
        let nu_fuel = self.reaction.lhs_coeff(fuel_index) - self.reaction.rhs_coeff(fuel_index);
        if nu_fuel <= 0.0 {
            return Err(CombustionError::ZeroFuelCoefficient(self.name(fuel_index)));
        }
        let fuel_mass = self.mixture.molecular_weight(fuel_index) * nu_fuel;
        if !(fuel_mass.is_finite() && fuel_mass > 0.0) {
            return Err(CombustionError::NumericalDomain(format!(
                "fuel mass W·nu = {} of {} cannot normalise the reaction",
                fuel_mass,
                self.name(fuel_index)
            )));
        }
        Ok(fuel_mass)
    }

    fn roles(&self, molar_coeffs: &[f64], fuel_index: usize) -> Vec<SpecieRole> {
        molar_coeffs
            .iter()
            .enumerate()
            .map(|(i, nu)| {
                if i == fuel_index {
                    SpecieRole::Fuel
                } else if *nu < 0.0 {
                    SpecieRole::Consumed
                } else if *nu > 0.0 {
                    SpecieRole::Produced
                } else {
                    SpecieRole::Inert
                }
            })
            .collect()
    }

    /// sum(W·nu) over reactants must equal sum(W·nu) over products
    fn check_mass_balance(&self, molar_coeffs: &[f64]) -> Result<(), CombustionError> {
        let (mut reactants, mut products) = (0.0, 0.0);
        for (i, nu) in molar_coeffs.iter().enumerate() {
            let w = self.mixture.molecular_weight(i);
            if *nu < 0.0 {
                reactants -= w * nu;
            } else {
                products += w * nu;
            }
        }
        if !relative_eq!(reactants, products, max_relative = 1e-6) {
            return Err(CombustionError::MassImbalance {
                equation: self.reaction.equation.clone(),
                reactants,
                products,
            });
        }
        Ok(())
    }

    pub fn calculate(
        &self,
        fuel_index: usize,
        oxidant_index: usize,
        inert_index: usize,
        air_oxygen_mass_fraction: f64,
    ) -> Result<Stoichiometry, CombustionError> {
        let fuel_mass = self.fuel_mass(fuel_index)?;

        let n_species = self.mixture.n_species();
        let molar_coeffs = self.reaction.net_coeffs(n_species);
        self.check_mass_balance(&molar_coeffs)?;
        let roles = self.roles(&molar_coeffs, fuel_index);

        // net consumption: a specie written on both sides only counts with its net coefficient
        let nu_oxidant = -molar_coeffs[oxidant_index];
        if oxidant_index == fuel_index || nu_oxidant <= 0.0 {
            return Err(CombustionError::OxidantNotReactant(self.name(oxidant_index)));
        }
        let s = self.mixture.molecular_weight(oxidant_index) * nu_oxidant / fuel_mass;

        let mut non_fuel_reactants = 0.0;
        let mut inert_reactants = 0.0;
        for (i, role) in roles.iter().enumerate() {
            let w = self.mixture.molecular_weight(i);
            match role {
                SpecieRole::Consumed => non_fuel_reactants -= w * molar_coeffs[i],
                // diluent written on both sides of the reaction
                SpecieRole::Inert => {
                    let mass = w * self.reaction.lhs_coeff(i);
                    non_fuel_reactants += mass;
                    inert_reactants += mass;
                }
                SpecieRole::Fuel | SpecieRole::Produced => {}
            }
        }
        // inert of the oxidising air, not written in the reaction
        let air_inert = if self.reaction.participates(inert_index) {
            0.0
        } else {
            s * (1.0 - air_oxygen_mass_fraction) / air_oxygen_mass_fraction
        };
        let stoic_ratio = non_fuel_reactants / fuel_mass + air_inert;
        let inert_mass_ratio = inert_reactants / fuel_mass + air_inert;

        let specie_stoich_coeffs: Vec<f64> = molar_coeffs
            .iter()
            .enumerate()
            .map(|(i, nu)| nu * self.mixture.molecular_weight(i) / fuel_mass)
            .collect();

        info!(
            "stoichiometric air-fuel ratio: {}, oxygen-fuel ratio: {}",
            stoic_ratio, s
        );
        Ok(Stoichiometry {
            stoic_ratio,
            s,
            molar_coeffs,
            specie_stoich_coeffs,
            roles,
            inert_mass_ratio,
            fuel_mass,
        })
    }
}
