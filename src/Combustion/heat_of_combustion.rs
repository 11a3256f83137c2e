use super::errors::CombustionError;
use super::reaction::Reaction;
use crate::Mixture::mixture_api::Mixture;
use log::info;

/// Heat released per unit mass of fuel, J/kg
///
/// q_fuel = [sum over reactants of |nu|·h - sum over products of nu·h] / (W_fuel·|nu_fuel|)
/// with h the molar enthalpy of formation (J/mol) and W in g/mol
pub struct HeatOfCombustionCalculator<'a, M: Mixture + ?Sized> {
    mixture: &'a M,
    reaction: &'a Reaction,
}

impl<'a, M: Mixture + ?Sized> HeatOfCombustionCalculator<'a, M> {
    pub fn new(mixture: &'a M, reaction: &'a Reaction) -> Self {
        Self { mixture, reaction }
    }

    fn formation_enthalpy(&self, i: usize) -> Result<f64, CombustionError> {
        let hf = self
            .mixture
            .formation_enthalpy(i)
            .ok_or_else(|| CombustionError::MissingEnthalpy(self.mixture.species()[i].clone()))?;
        if !hf.is_finite() {
            return Err(CombustionError::MissingEnthalpy(
                self.mixture.species()[i].clone(),
            ));
        }
        Ok(hf)
    }

    /// `fuel_mass` is W_fuel·|nu_fuel| from the stoichiometry
    pub fn calculate(&self, fuel_mass: f64) -> Result<f64, CombustionError> {
        if !(fuel_mass.is_finite() && fuel_mass > 0.0) {
            return Err(CombustionError::NumericalDomain(format!(
                "heat of combustion normalised by fuel mass {}",
                fuel_mass
            )));
        }
        let mut released = 0.0;
        for sc in &self.reaction.lhs {
            released += sc.stoich_coeff * self.formation_enthalpy(sc.index)?;
        }
        for sc in &self.reaction.rhs {
            released -= sc.stoich_coeff * self.formation_enthalpy(sc.index)?;
        }
        // J/g -> J/kg
        let q_fuel = 1e3 * released / fuel_mass;
        info!("Fuel heat of combustion: {} J/kg", q_fuel);
        Ok(q_fuel)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::Mixture::species_table::SpeciesTable;
    use crate::Mixture::species_thermo::{ConstantThermo, SpecieThermo};
    use approx::assert_relative_eq;

    fn hf(value: f64) -> Option<SpecieThermo> {
        Some(SpecieThermo::Constant(ConstantThermo { Hf: value, Cp: 0.0 }))
    }

    #[test]
    fn test_methane_heat_of_combustion() {
        let mut mixture = SpeciesTable::new();
        mixture.add_specie("CH4", 16.0, hf(-74.87e3)).unwrap();
        mixture.add_specie("O2", 32.0, hf(0.0)).unwrap();
        mixture.add_specie("CO2", 44.0, hf(-393.51e3)).unwrap();
        mixture.add_specie("H2O", 18.0, hf(-241.83e3)).unwrap();
        mixture.add_specie("N2", 28.0, hf(0.0)).unwrap();
        let reaction =
            Reaction::from_equation(&mixture, "CH4 + 2O2 + 7.52N2 = CO2 + 2H2O + 7.52N2").unwrap();
        let q_fuel = HeatOfCombustionCalculator::new(&mixture, &reaction)
            .calculate(16.0)
            .unwrap();
        // (-74.87 + 393.51 + 2·241.83) kJ/mol / 16 g/mol
        assert_relative_eq!(q_fuel, 802.3e3 / 16.0 * 1e3, max_relative = 1e-9);
        assert!(q_fuel > 4.9e7 && q_fuel < 5.1e7);
    }

    #[test]
    fn test_missing_enthalpy_names_the_specie() {
        let mut mixture = SpeciesTable::new();
        mixture.add_specie("CH4", 16.0, hf(-74.87e3)).unwrap();
        mixture.add_specie("O2", 32.0, hf(0.0)).unwrap();
        mixture.add_specie("CO2", 44.0, hf(-393.51e3)).unwrap();
        mixture.add_specie("H2O", 18.0, None).unwrap();
        let reaction = Reaction::from_equation(&mixture, "CH4 + 2O2 = CO2 + 2H2O").unwrap();
        let err = HeatOfCombustionCalculator::new(&mixture, &reaction)
            .calculate(16.0)
            .unwrap_err();
        assert!(matches!(err, CombustionError::MissingEnthalpy(ref name) if name == "H2O"));
        assert!(err.to_string().contains("H2O"));
    }
}
