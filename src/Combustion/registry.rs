//! # Combustion model registry
//!
//! Process-wide map from model name to factory, filled with the built-in
//! models on first access. Solvers construct their combustion model from the
//! `combustionModel` key of the configuration without knowing the concrete type:
//! ```ignore
//! let model = new_combustion_model(&config, &species, &thermo)?;
//! ```
//! Further models are added with `register_model` before construction.
use super::combustion_api::CombustionModel;
use super::config::SINGLE_STEP_COMBUSTION;
use super::errors::CombustionError;
use super::single_step::SingleStepCombustion;
use crate::Mixture::mixture_api::{Mixture, ThermoState};
use log::info;
use serde_json::Value;
use std::collections::HashMap;
use std::sync::{Mutex, MutexGuard, OnceLock};

/// builds a model from its configuration, the mixture and the thermodynamic state
pub type ModelFactory = for<'a> fn(
    &Value,
    &'a dyn Mixture,
    &'a dyn ThermoState,
) -> Result<Box<dyn CombustionModel + 'a>, CombustionError>;

fn single_step_factory<'a>(
    config: &Value,
    mixture: &'a dyn Mixture,
    thermo: &'a dyn ThermoState,
) -> Result<Box<dyn CombustionModel + 'a>, CombustionError> {
    Ok(Box::new(SingleStepCombustion::new(config, mixture, thermo)?))
}

pub struct ModelRegistry {
    factories: HashMap<String, ModelFactory>,
}

impl ModelRegistry {
    /// registry holding the built-in models
    pub fn new() -> Self {
        let mut factories: HashMap<String, ModelFactory> = HashMap::new();
        factories.insert(SINGLE_STEP_COMBUSTION.to_string(), single_step_factory);
        Self { factories }
    }

    /// adds or replaces the factory of `name`
    pub fn register(&mut self, name: &str, factory: ModelFactory) {
        if self.factories.insert(name.to_string(), factory).is_some() {
            info!("combustion model {} replaced", name);
        }
    }

    pub fn factory(&self, name: &str) -> Result<ModelFactory, CombustionError> {
        self.factories
            .get(name)
            .copied()
            .ok_or_else(|| CombustionError::UnknownModel(name.to_string()))
    }

    pub fn contains(&self, name: &str) -> bool {
        self.factories.contains_key(name)
    }

    /// sorted model names
    pub fn names(&self) -> Vec<String> {
        let mut names: Vec<String> = self.factories.keys().cloned().collect();
        names.sort();
        names
    }
}

impl Default for ModelRegistry {
    fn default() -> Self {
        Self::new()
    }
}

static GLOBAL_MODEL_REGISTRY: OnceLock<Mutex<ModelRegistry>> = OnceLock::new();

fn registry() -> MutexGuard<'static, ModelRegistry> {
    GLOBAL_MODEL_REGISTRY
        .get_or_init(|| Mutex::new(ModelRegistry::new()))
        .lock()
        // the map stays consistent even if a holder panicked
        .unwrap_or_else(|poisoned| poisoned.into_inner())
}

pub fn with_model_registry<F, R>(f: F) -> R
where
    F: FnOnce(&ModelRegistry) -> R,
{
    f(&registry())
}

pub fn register_model(name: &str, factory: ModelFactory) {
    registry().register(name, factory);
}

pub fn registered_models() -> Vec<String> {
    with_model_registry(|r| r.names())
}

/// model named by the `combustionModel` key (default `singleStepCombustion`)
pub fn new_combustion_model<'a>(
    config: &Value,
    mixture: &'a dyn Mixture,
    thermo: &'a dyn ThermoState,
) -> Result<Box<dyn CombustionModel + 'a>, CombustionError> {
    let name = match config.get("combustionModel") {
        None => SINGLE_STEP_COMBUSTION,
        Some(value) => value.as_str().ok_or_else(|| {
            CombustionError::invalid_key("combustionModel", "model name must be a string")
        })?,
    };
    // lock released before the factory runs
    let factory = with_model_registry(|r| r.factory(name))?;
    info!("Selecting combustion model {}", name);
    factory(config, mixture, thermo)
}
