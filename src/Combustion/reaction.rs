//! # Reaction
//!
//! The single irreversible reaction of the model: ordered (specie, coefficient)
//! pairs of reactants (`lhs`) and products (`rhs`), with specie names resolved
//! against the mixture once at construction.
//!
//! Equations are written as `CH4 + 2O2 = CO2 + 2H2O`; `=>`, `->` and `<=>`
//! are accepted as separators, coefficients may be fractional (`7.52N2`) and
//! may be separated from the specie by `*` or white space (`7.52 * N2`).
use super::config::{ReactionSpec, SpecieCoeffSpec};
use super::errors::CombustionError;
use crate::Mixture::mixture_api::Mixture;
use regex::Regex;
use std::fmt;

#[derive(Debug, Clone, PartialEq)]
pub struct SpecieCoeff {
    pub index: usize,
    pub stoich_coeff: f64,
}

#[derive(Debug, Clone, PartialEq)]
pub struct Reaction {
    pub equation: String,
    pub lhs: Vec<SpecieCoeff>,
    pub rhs: Vec<SpecieCoeff>,
}

fn syntax_error(equation: &str, reason: impl Into<String>) -> CombustionError {
    CombustionError::ReactionSyntax {
        equation: equation.to_string(),
        reason: reason.into(),
    }
}

fn parse_side(equation: &str, side: &str) -> Result<Vec<(String, f64)>, CombustionError> {
    let term = Regex::new(r"^(\d+\.?\d*|\.\d+)?\s*\*?\s*([A-Za-z][A-Za-z0-9_()\-,]*)$")
        .map_err(|e| syntax_error(equation, e.to_string()))?;
    let mut terms: Vec<(String, f64)> = Vec::new();
    for raw in side.split('+') {
        let raw = raw.trim();
        if raw.is_empty() {
            return Err(syntax_error(equation, "empty term"));
        }
        let captures = term
            .captures(raw)
            .ok_or_else(|| syntax_error(equation, format!("cannot read term `{}`", raw)))?;
        let coeff = match captures.get(1) {
            Some(c) => c
                .as_str()
                .parse::<f64>()
                .map_err(|e| syntax_error(equation, e.to_string()))?,
            None => 1.0,
        };
        if coeff <= 0.0 {
            return Err(syntax_error(
                equation,
                format!("coefficient of `{}` must be positive", raw),
            ));
        }
        let name = captures[2].to_string();
        // the same specie twice on one side is one term
        match terms.iter_mut().find(|(n, _)| *n == name) {
            Some((_, c)) => *c += coeff,
            None => terms.push((name, coeff)),
        }
    }
    Ok(terms)
}

/// split equation into reactant and product (name, coefficient) lists
pub fn parse_equation(
    equation: &str,
) -> Result<(Vec<(String, f64)>, Vec<(String, f64)>), CombustionError> {
    let separator =
        Regex::new(r"<=>|=>|->|=").map_err(|e| syntax_error(equation, e.to_string()))?;
    let sides: Vec<&str> = separator.split(equation).collect();
    if sides.len() != 2 {
        return Err(syntax_error(
            equation,
            "expected exactly one of `=`, `=>`, `->`, `<=>`",
        ));
    }
    let lhs = parse_side(equation, sides[0])?;
    let rhs = parse_side(equation, sides[1])?;
    Ok((lhs, rhs))
}

fn resolve<M: Mixture + ?Sized>(
    mixture: &M,
    terms: &[(String, f64)],
) -> Result<Vec<SpecieCoeff>, CombustionError> {
    terms
        .iter()
        .map(|(name, coeff)| {
            let index = mixture
                .species_index(name)
                .ok_or_else(|| CombustionError::UnknownSpecie(name.clone()))?;
            Ok(SpecieCoeff {
                index,
                stoich_coeff: *coeff,
            })
        })
        .collect()
}

fn format_side<M: Mixture + ?Sized>(mixture: &M, side: &[SpecieCoeff]) -> String {
    side.iter()
        .map(|sc| {
            let name = &mixture.species()[sc.index];
            if sc.stoich_coeff == 1.0 {
                name.clone()
            } else {
                format!("{}{}", sc.stoich_coeff, name)
            }
        })
        .collect::<Vec<_>>()
        .join(" + ")
}

impl Reaction {
    pub fn from_equation<M: Mixture + ?Sized>(
        mixture: &M,
        equation: &str,
    ) -> Result<Self, CombustionError> {
        let (lhs, rhs) = parse_equation(equation)?;
        Ok(Self {
            equation: equation.trim().to_string(),
            lhs: resolve(mixture, &lhs)?,
            rhs: resolve(mixture, &rhs)?,
        })
    }

    pub fn from_lists<M: Mixture + ?Sized>(
        mixture: &M,
        reactants: &[SpecieCoeffSpec],
        products: &[SpecieCoeffSpec],
    ) -> Result<Self, CombustionError> {
        let to_terms = |list: &[SpecieCoeffSpec]| -> Result<Vec<(String, f64)>, CombustionError> {
            if list.is_empty() {
                return Err(CombustionError::invalid_key("reaction", "empty specie list"));
            }
            list.iter()
                .map(|sc| {
                    if sc.coeff > 0.0 {
                        Ok((sc.specie.clone(), sc.coeff))
                    } else {
                        Err(CombustionError::invalid_key(
                            "coeff",
                            format!("coefficient of {} must be positive", sc.specie),
                        ))
                    }
                })
                .collect()
        };
        let lhs = resolve(mixture, &to_terms(reactants)?)?;
        let rhs = resolve(mixture, &to_terms(products)?)?;
        let equation = format!(
            "{} = {}",
            format_side(mixture, &lhs),
            format_side(mixture, &rhs)
        );
        Ok(Self { equation, lhs, rhs })
    }

    pub fn from_spec<M: Mixture + ?Sized>(
        mixture: &M,
        spec: &ReactionSpec,
    ) -> Result<Self, CombustionError> {
        match spec {
            ReactionSpec::Equation { equation } => Self::from_equation(mixture, equation),
            ReactionSpec::Lists {
                reactants,
                products,
            } => Self::from_lists(mixture, reactants, products),
        }
    }

    /// coefficient of specie i among the reactants, 0 if absent
    pub fn lhs_coeff(&self, i: usize) -> f64 {
        self.lhs
            .iter()
            .filter(|sc| sc.index == i)
            .map(|sc| sc.stoich_coeff)
            .sum()
    }

    /// coefficient of specie i among the products, 0 if absent
    pub fn rhs_coeff(&self, i: usize) -> f64 {
        self.rhs
            .iter()
            .filter(|sc| sc.index == i)
            .map(|sc| sc.stoich_coeff)
            .sum()
    }

    /// net signed molar coefficient of every specie: products minus reactants
    pub fn net_coeffs(&self, n_species: usize) -> Vec<f64> {
        let mut nu = vec![0.0; n_species];
        for sc in &self.lhs {
            nu[sc.index] -= sc.stoich_coeff;
        }
        for sc in &self.rhs {
            nu[sc.index] += sc.stoich_coeff;
        }
        nu
    }

    pub fn participates(&self, i: usize) -> bool {
        self.lhs.iter().chain(self.rhs.iter()).any(|sc| sc.index == i)
    }
}

impl fmt::Display for Reaction {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "{}", self.equation)
    }
}
