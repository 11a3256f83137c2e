use super::errors::CombustionError;
use super::stoichiometry::{SpecieRole, Stoichiometry};
use approx::relative_eq;

/// tolerance of the products + inert normalisation check
pub const NORMALISATION_TOLERANCE: f64 = 1e-6;

/// Mass fractions of the fully burned stoichiometric mixture
#[derive(Debug, Clone, PartialEq)]
#[allow(non_snake_case)]
pub struct MaxProducts {
    /// product mass fractions, zero for every specie that is not produced
    pub Yprod0: Vec<f64>,
    /// mass fraction of inert diluent
    pub inert_fraction: f64,
}

/// Yprod0[i] = (kg of i formed per kg of fuel) / (1 + stoic_ratio):
/// one kg of fuel burns with stoic_ratio kg of air into 1 + stoic_ratio kg of products
pub fn calculate_max_products(st: &Stoichiometry) -> Result<MaxProducts, CombustionError> {
    let total_mass = 1.0 + st.stoic_ratio;
    #[allow(non_snake_case)]
    let Yprod0: Vec<f64> = st
        .specie_stoich_coeffs
        .iter()
        .zip(st.roles.iter())
        .map(|(coeff, role)| {
            if *role == SpecieRole::Produced {
                coeff / total_mass
            } else {
                0.0
            }
        })
        .collect();
    let inert_fraction = st.inert_mass_ratio / total_mass;

    let sum: f64 = Yprod0.iter().sum::<f64>() + inert_fraction;
    if !relative_eq!(sum, 1.0, epsilon = NORMALISATION_TOLERANCE) {
        return Err(CombustionError::ProductsNotNormalised(sum));
    }
    Ok(MaxProducts {
        Yprod0,
        inert_fraction,
    })
}
