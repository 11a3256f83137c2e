use super::errors::CombustionError;
use super::source_terms::LinearSource;
use crate::Mixture::mixture_api::ScalarField;

/// What a rate law sees when asked for the fuel consumption rate
#[allow(non_snake_case)]
pub struct RateLawState<'s> {
    /// mass fractions of all species
    pub Y: &'s [ScalarField],
    pub fuel_index: usize,
    pub oxidant_index: usize,
    /// stoichiometric oxygen-fuel mass ratio
    pub s: f64,
    /// stoichiometric air-fuel mass ratio
    pub stoic_ratio: f64,
    /// product residuals, one field per specie (zero for non-products)
    pub fres: Vec<&'s ScalarField>,
    pub excess_fuel: &'s ScalarField,
    pub excess_oxidant: &'s ScalarField,
    pub T: &'s ScalarField,
    pub p: &'s ScalarField,
    pub rho: &'s ScalarField,
}

/// Fuel consumption rate law (eddy dissipation, Arrhenius, ...), kg/(m³·s).
/// The combustion closure only consumes its output.
pub trait RateLaw {
    fn fuel_consumption_rate(&self, state: &RateLawState) -> Result<ScalarField, CombustionError>;
}

impl<F> RateLaw for F
where
    F: Fn(&RateLawState) -> ScalarField,
{
    fn fuel_consumption_rate(&self, state: &RateLawState) -> Result<ScalarField, CombustionError> {
        Ok(self(state))
    }
}

/// Interface of the combustion models constructed through the model registry
pub trait CombustionModel {
    fn model_name(&self) -> &str;
    /// update residuals from the mass fractions, then ask the rate law for the fuel consumption rate
    fn correct(&mut self, y: &[ScalarField], rate_law: &dyn RateLaw) -> Result<(), CombustionError>;
    /// linear source of specie `specie` for its transport equation
    fn source_term(&self, specie: usize, y: &ScalarField) -> Result<LinearSource, CombustionError>;
    /// heat release rate, W/m³
    fn heat_release(&self) -> ScalarField;
    /// re-read the configuration; the model is unchanged on error
    fn reload(&mut self, config: &serde_json::Value) -> Result<(), CombustionError>;
}
