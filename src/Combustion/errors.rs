use thiserror::Error;

/// error types of the combustion closure
///
/// everything except `NumericalDomain` and `FieldSize` is a configuration error:
/// it aborts construction (or reload) of a model and names the offending key or specie
#[derive(Debug, Error)]
pub enum CombustionError {
    #[error("configuration error: key `{key}`: {reason}")]
    InvalidKey { key: String, reason: String },
    #[error("configuration error: specie `{0}` not found in the mixture")]
    UnknownSpecie(String),
    #[error("configuration error: fuel `{0}` has zero stoichiometric coefficient in the reaction")]
    ZeroFuelCoefficient(String),
    #[error("configuration error: oxidant `{0}` is not a reactant of the reaction")]
    OxidantNotReactant(String),
    #[error("configuration error: no enthalpy data for specie `{0}`")]
    MissingEnthalpy(String),
    #[error(
        "configuration error: reaction `{equation}` is not mass balanced (reactants {reactants} g, products {products} g)"
    )]
    MassImbalance {
        equation: String,
        reactants: f64,
        products: f64,
    },
    #[error("configuration error: products and inert mass fractions sum to {0}, not 1")]
    ProductsNotNormalised(f64),
    #[error("configuration error: cannot parse reaction `{equation}`: {reason}")]
    ReactionSyntax { equation: String, reason: String },
    #[error("configuration error: unknown combustion model `{0}`")]
    UnknownModel(String),
    #[error("configuration error: {0}")]
    Io(#[from] std::io::Error),
    #[error("configuration error: {0}")]
    Json(#[from] serde_json::Error),
    #[error("numerical domain error: {0}")]
    NumericalDomain(String),
    #[error("field `{field}` has {found} values, expected {expected}")]
    FieldSize {
        field: String,
        found: usize,
        expected: usize,
    },
}

impl CombustionError {
    pub fn invalid_key(key: &str, reason: impl Into<String>) -> Self {
        CombustionError::InvalidKey {
            key: key.to_string(),
            reason: reason.into(),
        }
    }

    pub fn is_configuration_error(&self) -> bool {
        !matches!(
            self,
            CombustionError::NumericalDomain(_) | CombustionError::FieldSize { .. }
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_messages_name_the_offender() {
        let err = CombustionError::UnknownSpecie("C3H8".to_string());
        assert!(err.to_string().contains("C3H8"));
        assert!(err.is_configuration_error());

        let err = CombustionError::invalid_key("fuel", "missing");
        assert!(err.to_string().contains("`fuel`"));

        let err = CombustionError::NumericalDomain("W_fuel = 0".to_string());
        assert!(!err.is_configuration_error());
    }
}
