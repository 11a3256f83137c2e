/// Error type of the combustion closure.
pub mod errors;
/// Combustion properties read from JSON.
pub mod config;
/// Reaction equation parsing and the (specie, coefficient) lists of the single step reaction.
pub mod reaction;
/// Stoichiometric oxygen-fuel (`s`) and air-fuel (`stoic_ratio`) mass ratios, mass
/// coefficients per unit mass of fuel and the role of every specie in the reaction.
pub mod stoichiometry;
/// Heat of combustion per kg of fuel from the formation enthalpies of the species.
pub mod heat_of_combustion;
/// Mass fractions of the fully burned stoichiometric mixture.
pub mod max_products;
/// Per-cell product residuals and reactant excesses.
pub mod residuals;
/// Explicit and semi-implicit linear species sources, heat release rate.
pub mod source_terms;
/// `RateLaw` and `CombustionModel` interfaces.
pub mod combustion_api;
/// The single step combustion model: owns the derived constants, residuals and
/// fuel consumption rate; supports reload of its configuration.
/// # Examples
/// ```
/// use ::SingleStepCombustion::Combustion::single_step::SingleStepCombustion;
/// use ::SingleStepCombustion::Mixture::mixture_api::{ScalarField, ThermoFields};
/// use ::SingleStepCombustion::Mixture::species_table::SpeciesTable;
/// use ::SingleStepCombustion::Mixture::species_thermo::{ConstantThermo, SpecieThermo};
/// use serde_json::json;
/// let hf = |h: f64| Some(SpecieThermo::Constant(ConstantThermo { Hf: h, Cp: 0.0 }));
/// let mut species = SpeciesTable::new();
/// species.add_specie("CH4", 16.0, hf(-74.87e3)).unwrap();
/// species.add_specie("O2", 32.0, hf(0.0)).unwrap();
/// species.add_specie("CO2", 44.0, hf(-393.51e3)).unwrap();
/// species.add_specie("H2O", 18.0, hf(-241.83e3)).unwrap();
/// species.add_specie("N2", 28.0, hf(0.0)).unwrap();
/// let thermo = ThermoFields::uniform(4, 1500.0, 101325.0, 0.3);
/// let config = json!({
///     "semiImplicit": true,
///     "fuel": "CH4",
///     "inertSpecie": "N2",
///     "reaction": {"equation": "CH4 + 2O2 = CO2 + 2H2O"}
/// });
/// let mut model = SingleStepCombustion::new(&config, &species, &thermo).unwrap();
/// assert_eq!(model.s(), 4.0);
/// model.set_fuel_consumption_rate(ScalarField::from_element(4, 0.1)).unwrap();
/// let qdot = model.heat_release();
/// assert!((qdot[0] - 0.1 * model.q_fuel()).abs() < 1e-6);
/// ```
pub mod single_step;
pub mod single_step_tests;
/// Name -> factory map of combustion models.
pub mod registry;
