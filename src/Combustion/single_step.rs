//! # Single step combustion
//!
//! Closure for a single global irreversible reaction `fuel + s·oxidant -> products`
//! written against the `Mixture` and `ThermoState` capability traits.
//!
//! At construction (and on every reload) the reaction is read from the
//! configuration and every constant is derived once:
//! stoichiometric ratios, mass coefficients, heat of combustion per kg of
//! fuel and the fully burned product mass fractions. Per solver step the model
//! 1) updates product residuals and reactant excesses from the mass fractions,
//! 2) receives the fuel consumption rate (from a `RateLaw` or set directly),
//! 3) hands out linear species sources and the heat release rate.
//!
//! Only residual fields and the fuel consumption rate change between reloads.
//! ### Example
//! ```ignore
//! let mut model = SingleStepCombustion::new(&config, &species, &thermo)?;
//! model.correct(&Y, &rate_law)?;
//! let fuel_source = model.build_source_term(model.fuel_index(), &Y[model.fuel_index()])?;
//! let Qdot = model.heat_release();
//! ```
use super::combustion_api::{CombustionModel, RateLaw, RateLawState};
use super::config::CombustionProperties;
use super::errors::CombustionError;
use super::heat_of_combustion::HeatOfCombustionCalculator;
use super::max_products::{MaxProducts, calculate_max_products};
use super::reaction::Reaction;
use super::residuals::{ResidualTracker, check_field};
use super::source_terms::{LinearSource, SourceTermBuilder};
use super::stoichiometry::{SpecieRole, Stoichiometry, StoichiometryCalculator};
use crate::Mixture::mixture_api::{Mixture, ScalarField, ThermoState};
use log::{info, warn};
use prettytable::{Table, row};
use serde_json::Value;

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct StoichiometricRatios {
    /// mass of air per unit mass of fuel
    pub stoic_ratio: f64,
    /// mass of oxidant per unit mass of fuel
    pub s: f64,
    /// J per kg of fuel
    pub q_fuel: f64,
}

/// Everything derived from the configuration and the mixture
#[derive(Debug, Clone)]
pub struct ReactionConstants {
    pub properties: CombustionProperties,
    pub reaction: Reaction,
    pub stoichiometry: Stoichiometry,
    /// heat of combustion, J per kg of fuel
    pub q_fuel: f64,
    pub max_products: MaxProducts,
    pub fuel_index: usize,
    pub oxidant_index: usize,
    pub inert_index: usize,
}

impl ReactionConstants {
    pub fn derive<M: Mixture + ?Sized>(
        mixture: &M,
        properties: CombustionProperties,
    ) -> Result<Self, CombustionError> {
        let index_of = |name: &str| {
            mixture
                .species_index(name)
                .ok_or_else(|| CombustionError::UnknownSpecie(name.to_string()))
        };
        let fuel_index = index_of(&properties.fuel)?;
        let oxidant_index = index_of(&properties.oxidant)?;
        let inert_index = index_of(&properties.inert_specie)?;

        let reaction = Reaction::from_spec(mixture, &properties.reaction)?;
        info!("single step reaction: {}", reaction);
        let stoichiometry = StoichiometryCalculator::new(mixture, &reaction).calculate(
            fuel_index,
            oxidant_index,
            inert_index,
            properties.air_oxygen_mass_fraction,
        )?;
        if inert_index == fuel_index || inert_index == oxidant_index {
            return Err(CombustionError::invalid_key(
                "inertSpecie",
                format!("{} is the fuel or the oxidant", properties.inert_specie),
            ));
        }
        if stoichiometry.roles[inert_index] != SpecieRole::Inert {
            return Err(CombustionError::invalid_key(
                "inertSpecie",
                format!(
                    "{} has a net coefficient {} in the reaction",
                    properties.inert_specie, stoichiometry.molar_coeffs[inert_index]
                ),
            ));
        }
        let q_fuel =
            HeatOfCombustionCalculator::new(mixture, &reaction).calculate(stoichiometry.fuel_mass)?;
        let max_products = calculate_max_products(&stoichiometry)?;
        info!("Maximum products mass concentrations:");
        for (name, y) in mixture.species().iter().zip(max_products.Yprod0.iter()) {
            if *y > 0.0 {
                info!("    {}: {:.6}", name, y);
            }
        }
        info!("    inert: {:.6}", max_products.inert_fraction);

        Ok(Self {
            properties,
            reaction,
            stoichiometry,
            q_fuel,
            max_products,
            fuel_index,
            oxidant_index,
            inert_index,
        })
    }
}

pub struct SingleStepCombustion<'a, M: Mixture + ?Sized, T: ThermoState + ?Sized> {
    mixture: &'a M,
    thermo: &'a T,
    constants: ReactionConstants,
    source_builder: SourceTermBuilder,
    residuals: ResidualTracker,
    /// fuel consumption rate, kg/(m³·s)
    w_fuel: ScalarField,
}

impl<'a, M: Mixture + ?Sized, T: ThermoState + ?Sized> SingleStepCombustion<'a, M, T> {
    pub fn new(config: &Value, mixture: &'a M, thermo: &'a T) -> Result<Self, CombustionError> {
        let properties = CombustionProperties::from_value(config)?;
        Self::from_properties(properties, mixture, thermo)
    }

    pub fn from_properties(
        properties: CombustionProperties,
        mixture: &'a M,
        thermo: &'a T,
    ) -> Result<Self, CombustionError> {
        let constants = ReactionConstants::derive(mixture, properties)?;
        let n_cells = thermo.n_cells();
        let source_builder = SourceTermBuilder::new(
            constants.properties.semi_implicit,
            constants.properties.semi_implicit_floor,
        );
        Ok(Self {
            mixture,
            thermo,
            residuals: ResidualTracker::new(mixture.n_species(), n_cells),
            source_builder,
            constants,
            w_fuel: ScalarField::zeros(n_cells),
        })
    }

    //////////////////////////////////// ACCESSORS ////////////////////////////////////
    pub fn mixture(&self) -> &M {
        self.mixture
    }
    pub fn thermo(&self) -> &T {
        self.thermo
    }
    pub fn properties(&self) -> &CombustionProperties {
        &self.constants.properties
    }
    pub fn constants(&self) -> &ReactionConstants {
        &self.constants
    }
    pub fn reaction(&self) -> &Reaction {
        &self.constants.reaction
    }
    /// stoichiometric air-fuel mass ratio
    pub fn stoic_ratio(&self) -> f64 {
        self.constants.stoichiometry.stoic_ratio
    }
    /// stoichiometric oxygen-fuel mass ratio
    pub fn s(&self) -> f64 {
        self.constants.stoichiometry.s
    }
    /// heat of combustion, J/kg of fuel
    pub fn q_fuel(&self) -> f64 {
        self.constants.q_fuel
    }
    pub fn ratios(&self) -> StoichiometricRatios {
        StoichiometricRatios {
            stoic_ratio: self.stoic_ratio(),
            s: self.s(),
            q_fuel: self.q_fuel(),
        }
    }
    pub fn specie_stoich_coeffs(&self) -> &[f64] {
        &self.constants.stoichiometry.specie_stoich_coeffs
    }
    pub fn molar_coeffs(&self) -> &[f64] {
        &self.constants.stoichiometry.molar_coeffs
    }
    #[allow(non_snake_case)]
    pub fn Yprod0(&self) -> &[f64] {
        &self.constants.max_products.Yprod0
    }
    pub fn inert_fraction(&self) -> f64 {
        self.constants.max_products.inert_fraction
    }
    pub fn fuel_index(&self) -> usize {
        self.constants.fuel_index
    }
    pub fn oxidant_index(&self) -> usize {
        self.constants.oxidant_index
    }
    pub fn inert_index(&self) -> usize {
        self.constants.inert_index
    }
    pub fn specie_roles(&self) -> &[SpecieRole] {
        &self.constants.stoichiometry.roles
    }
    pub fn semi_implicit(&self) -> bool {
        self.source_builder.semi_implicit()
    }
    /// residual of specie i, `None` if i is not a specie of the mixture
    pub fn fres(&self, i: usize) -> Option<&ScalarField> {
        self.residuals.fres(i)
    }
    pub fn excess_fuel(&self) -> &ScalarField {
        self.residuals.excess_fuel()
    }
    pub fn excess_oxidant(&self) -> &ScalarField {
        self.residuals.excess_oxidant()
    }
    pub fn w_fuel(&self) -> &ScalarField {
        &self.w_fuel
    }

    //////////////////////////////////// PER STEP ////////////////////////////////////
    /// product residuals and reactant excesses from the current mass fractions
    pub fn fres_correct(&mut self, y: &[ScalarField]) -> Result<(), CombustionError> {
        self.residuals.update(
            y,
            &self.constants.max_products.Yprod0,
            &self.constants.stoichiometry.roles,
        )?;
        let (fuel, oxidant) = (self.constants.fuel_index, self.constants.oxidant_index);
        self.residuals
            .update_excess(&y[fuel], &y[oxidant], self.constants.stoichiometry.s)
    }

    pub fn set_fuel_consumption_rate(&mut self, w_fuel: ScalarField) -> Result<(), CombustionError> {
        check_field("wFuel", &w_fuel, self.residuals.n_cells())?;
        self.w_fuel = w_fuel;
        Ok(())
    }

    /// residual update followed by the fuel consumption rate of `rate_law`
    pub fn correct(&mut self, y: &[ScalarField], rate_law: &dyn RateLaw) -> Result<(), CombustionError> {
        self.fres_correct(y)?;
        let state = RateLawState {
            Y: y,
            fuel_index: self.constants.fuel_index,
            oxidant_index: self.constants.oxidant_index,
            s: self.constants.stoichiometry.s,
            stoic_ratio: self.constants.stoichiometry.stoic_ratio,
            fres: self.residuals.fres_fields().iter().collect(),
            excess_fuel: self.residuals.excess_fuel(),
            excess_oxidant: self.residuals.excess_oxidant(),
            T: self.thermo.temperature(),
            p: self.thermo.pressure(),
            rho: self.thermo.density(),
        };
        let w_fuel = rate_law.fuel_consumption_rate(&state)?;
        self.set_fuel_consumption_rate(w_fuel)
    }

    /// linear source of specie `specie` whose current mass fraction is `y`;
    /// in semi-implicit mode the fuel relaxes to the excess fuel of the last `fres_correct`
    pub fn build_source_term(
        &self,
        specie: usize,
        y: &ScalarField,
    ) -> Result<LinearSource, CombustionError> {
        let roles = &self.constants.stoichiometry.roles;
        let role = *roles.get(specie).ok_or_else(|| {
            CombustionError::UnknownSpecie(format!("index {} of {} species", specie, roles.len()))
        })?;
        self.source_builder.build_source_term(
            role,
            self.constants.stoichiometry.specie_stoich_coeffs[specie],
            y,
            &self.w_fuel,
            self.residuals.excess_fuel(),
        )
    }

    /// heat release rate q_fuel·w_fuel, W/m³
    pub fn heat_release(&self) -> ScalarField {
        SourceTermBuilder::heat_release(self.constants.q_fuel, &self.w_fuel)
    }

    //////////////////////////////////// RELOAD ////////////////////////////////////
    /// Re-read the configuration and re-derive every constant. On error the
    /// model keeps its previous constants and fields.
    pub fn reload(&mut self, config: &Value) -> Result<(), CombustionError> {
        match CombustionProperties::from_value(config) {
            Ok(properties) => self.reload_properties(properties),
            Err(e) => {
                warn!("combustion properties rejected, keeping previous model: {}", e);
                Err(e)
            }
        }
    }

    pub fn reload_properties(
        &mut self,
        properties: CombustionProperties,
    ) -> Result<(), CombustionError> {
        match ReactionConstants::derive(self.mixture, properties) {
            Ok(constants) => {
                self.install(constants);
                Ok(())
            }
            Err(e) => {
                warn!("combustion properties rejected, keeping previous model: {}", e);
                Err(e)
            }
        }
    }

    fn install(&mut self, constants: ReactionConstants) {
        self.source_builder = SourceTermBuilder::new(
            constants.properties.semi_implicit,
            constants.properties.semi_implicit_floor,
        );
        self.constants = constants;
        // residuals and rate belong to the old reaction
        self.residuals.reset();
        self.w_fuel.fill(0.0);
        info!(
            "combustion properties reloaded: stoic_ratio = {:.4}, s = {:.4}, q_fuel = {:.4e} J/kg",
            self.stoic_ratio(),
            self.s(),
            self.q_fuel()
        );
    }

    //////////////////////////////////// REPORT ////////////////////////////////////
    pub fn summary_table(&self) -> Table {
        let mut table = Table::new();
        table.add_row(row!["Specie", "W, g/mol", "Role", "nu", "kg/kg fuel", "Yprod0"]);
        let species = self.mixture.species();
        for (i, name) in species.iter().enumerate() {
            table.add_row(row![
                name,
                format!("{:.4}", self.mixture.molecular_weight(i)),
                format!("{:?}", self.specie_roles()[i]),
                format!("{}", self.molar_coeffs()[i]),
                format!("{:.5}", self.specie_stoich_coeffs()[i]),
                format!("{:.5}", self.Yprod0()[i])
            ]);
        }
        table
    }

    pub fn pretty_print(&self) {
        println!("{}", self.reaction());
        let mut constants = Table::new();
        constants.add_row(row!["Parameter", "Value"]);
        constants.add_row(row!["stoicRatio", format!("{:.5}", self.stoic_ratio())]);
        constants.add_row(row!["s", format!("{:.5}", self.s())]);
        constants.add_row(row!["qFuel, J/kg", format!("{:.5e}", self.q_fuel())]);
        constants.add_row(row!["inert fraction", format!("{:.5}", self.inert_fraction())]);
        constants.add_row(row!["semiImplicit", self.semi_implicit()]);
        constants.printstd();
        self.summary_table().printstd();
    }
}

impl<'a, M: Mixture + ?Sized, T: ThermoState + ?Sized> CombustionModel
    for SingleStepCombustion<'a, M, T>
{
    fn model_name(&self) -> &str {
        &self.constants.properties.combustion_model
    }
    fn correct(&mut self, y: &[ScalarField], rate_law: &dyn RateLaw) -> Result<(), CombustionError> {
        SingleStepCombustion::correct(self, y, rate_law)
    }
    fn source_term(&self, specie: usize, y: &ScalarField) -> Result<LinearSource, CombustionError> {
        self.build_source_term(specie, y)
    }
    fn heat_release(&self) -> ScalarField {
        SingleStepCombustion::heat_release(self)
    }
    fn reload(&mut self, config: &Value) -> Result<(), CombustionError> {
        SingleStepCombustion::reload(self, config)
    }
}
