//! # Source terms
//!
//! Linear source contributions `d(rho·Y_i)/dt = su + sp·Y_i` of the single
//! step reaction, where the reaction itself gives `d(rho·Y_i)/dt = c_i·w_fuel`
//! with `c_i` the mass stoichiometric coefficient (fuel: -1) and `w_fuel` the
//! fuel consumption rate, kg/(m³·s), supplied by a rate law.
//!
//! Explicit treatment puts everything in `su`. Semi-implicit treatment moves
//! the fuel source into the diagonal: the fuel is linearised around the
//! excess fuel level `Y*` that cannot burn,
//! ```text
//! sp = -w_fuel / max(Y_fuel - Y*, floor),   su = -sp·Y*
//! ```
//! so the solved fuel relaxes towards `Y*` and never overshoots below it,
//! whatever the time step. At the current state `su + sp·Y = -w_fuel`
//! whenever `Y_fuel - Y*` is above the floor.
use super::errors::CombustionError;
use super::residuals::check_field;
use super::stoichiometry::SpecieRole;
use crate::Mixture::mixture_api::ScalarField;

#[derive(Debug, Clone, PartialEq)]
pub struct LinearSource {
    /// explicit part
    pub su: ScalarField,
    /// implicit diagonal coefficient, never positive
    pub sp: ScalarField,
}

impl LinearSource {
    pub fn zeros(n_cells: usize) -> Self {
        Self {
            su: ScalarField::zeros(n_cells),
            sp: ScalarField::zeros(n_cells),
        }
    }

    /// source value at the state y
    pub fn evaluate(&self, y: &ScalarField) -> ScalarField {
        &self.su + self.sp.component_mul(y)
    }

    pub fn is_zero(&self) -> bool {
        self.su.iter().chain(self.sp.iter()).all(|v| *v == 0.0)
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SourceTermBuilder {
    semi_implicit: bool,
    floor: f64,
}

impl SourceTermBuilder {
    pub fn new(semi_implicit: bool, floor: f64) -> Self {
        Self {
            semi_implicit,
            floor,
        }
    }

    pub fn semi_implicit(&self) -> bool {
        self.semi_implicit
    }

    /// `relax_to` is the level the fuel relaxes to in semi-implicit mode (excess fuel);
    /// it is ignored for every other specie
    pub fn build_source_term(
        &self,
        role: SpecieRole,
        coeff: f64,
        y: &ScalarField,
        w_fuel: &ScalarField,
        relax_to: &ScalarField,
    ) -> Result<LinearSource, CombustionError> {
        let n_cells = w_fuel.len();
        check_field("Y", y, n_cells)?;
        let mut source = LinearSource::zeros(n_cells);
        if !(self.semi_implicit && role == SpecieRole::Fuel) {
            source.su = w_fuel * coeff;
            return Ok(source);
        }
        check_field("fres", relax_to, n_cells)?;
        for c in 0..n_cells {
            let w_specie = coeff * w_fuel[c];
            if w_specie > 0.0 {
                // a fuel source cannot go implicit with a positive coefficient
                source.su[c] = w_specie;
                continue;
            }
            let implicit = w_specie / (y[c] - relax_to[c]).max(self.floor);
            source.sp[c] = implicit;
            source.su[c] = -implicit * relax_to[c];
        }
        Ok(source)
    }

    /// heat release rate q_fuel·w_fuel, W/m³
    pub fn heat_release(q_fuel: f64, w_fuel: &ScalarField) -> ScalarField {
        w_fuel * q_fuel
    }
}
