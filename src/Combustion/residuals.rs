//! # Residual tracker
//!
//! Per-step fields of remaining capacity to form every product:
//! `fres[i] = clamp(Yprod0[i] - Y[i], 0, Yprod0[i])`. As Y[i] approaches the
//! fully burned value the residual goes to zero, which rate laws use to taper
//! the reaction rate. Also tracks the excess of fuel and of oxidant over the
//! stoichiometric proportion, `max(Y_fuel - Y_ox/s, 0)` and `max(Y_ox - s·Y_fuel, 0)`.
//!
//! Values outside the bounds (mass fractions below 0 or above 1 coming from
//! the transport solve) are clamped silently.
use super::errors::CombustionError;
use super::stoichiometry::SpecieRole;
use crate::Mixture::mixture_api::ScalarField;
use log::debug;

pub(crate) fn check_field(
    field: &str,
    values: &ScalarField,
    n_cells: usize,
) -> Result<(), CombustionError> {
    if values.len() != n_cells {
        return Err(CombustionError::FieldSize {
            field: field.to_string(),
            found: values.len(),
            expected: n_cells,
        });
    }
    Ok(())
}

#[derive(Debug)]
pub struct ResidualTracker {
    n_cells: usize,
    fres: Vec<ScalarField>,
    excess_fuel: ScalarField,
    excess_oxidant: ScalarField,
}

impl ResidualTracker {
    pub fn new(n_species: usize, n_cells: usize) -> Self {
        Self {
            n_cells,
            fres: vec![ScalarField::zeros(n_cells); n_species],
            excess_fuel: ScalarField::zeros(n_cells),
            excess_oxidant: ScalarField::zeros(n_cells),
        }
    }

    pub fn n_cells(&self) -> usize {
        self.n_cells
    }

    /// back to zero residuals, e.g. after the reaction changed
    pub fn reset(&mut self) {
        for f in self.fres.iter_mut() {
            f.fill(0.0);
        }
        self.excess_fuel.fill(0.0);
        self.excess_oxidant.fill(0.0);
    }

    /// residual of specie i; zero for species which are not products,
    /// `None` past the last specie
    pub fn fres(&self, i: usize) -> Option<&ScalarField> {
        self.fres.get(i)
    }

    pub fn fres_fields(&self) -> &[ScalarField] {
        &self.fres
    }

    pub fn excess_fuel(&self) -> &ScalarField {
        &self.excess_fuel
    }

    pub fn excess_oxidant(&self) -> &ScalarField {
        &self.excess_oxidant
    }

    /// recompute product residuals from the current mass fractions
    #[allow(non_snake_case)]
    pub fn update(
        &mut self,
        y: &[ScalarField],
        Yprod0: &[f64],
        roles: &[SpecieRole],
    ) -> Result<(), CombustionError> {
        if y.len() != self.fres.len() {
            return Err(CombustionError::FieldSize {
                field: "Y".to_string(),
                found: y.len(),
                expected: self.fres.len(),
            });
        }
        for (i, yi) in y.iter().enumerate() {
            check_field(&format!("Y[{}]", i), yi, self.n_cells)?;
        }
        let mut clamped = 0usize;
        for (i, fres_i) in self.fres.iter_mut().enumerate() {
            if roles[i] != SpecieRole::Produced {
                fres_i.fill(0.0);
                continue;
            }
            let y0 = Yprod0[i];
            for (r, yi) in fres_i.iter_mut().zip(y[i].iter()) {
                let raw = y0 - yi;
                // max/min rather than clamp: a NaN mass fraction gives a zero residual
                let bounded = raw.max(0.0).min(y0);
                if bounded != raw {
                    clamped += 1;
                }
                *r = bounded;
            }
        }
        if clamped > 0 {
            debug!("product residuals clamped in {} cells", clamped);
        }
        Ok(())
    }

    /// excess fuel and excess oxidant over the stoichiometric proportion
    pub fn update_excess(
        &mut self,
        y_fuel: &ScalarField,
        y_oxidant: &ScalarField,
        s: f64,
    ) -> Result<(), CombustionError> {
        check_field("Y_fuel", y_fuel, self.n_cells)?;
        check_field("Y_oxidant", y_oxidant, self.n_cells)?;
        if !(s.is_finite() && s > 0.0) {
            return Err(CombustionError::NumericalDomain(format!(
                "oxygen-fuel ratio s = {} cannot scale the oxidant",
                s
            )));
        }
        for c in 0..self.n_cells {
            let (yf, yo) = (y_fuel[c].max(0.0), y_oxidant[c].max(0.0));
            self.excess_fuel[c] = (yf - yo / s).max(0.0);
            self.excess_oxidant[c] = (yo - s * yf).max(0.0);
        }
        Ok(())
    }
}
