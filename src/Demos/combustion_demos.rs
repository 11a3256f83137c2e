use crate::Combustion::combustion_api::RateLawState;
use crate::Combustion::errors::CombustionError;
use crate::Combustion::registry::new_combustion_model;
use crate::Combustion::single_step::SingleStepCombustion;
use crate::Interfacial::aerosol_drag::{AerosolDrag, DragModel, PhasePair};
use crate::Mixture::mixture_api::{Mixture, ScalarField, ThermoFields};
use crate::Mixture::species_table::SpeciesTable;
use log::error;
use prettytable::{Table, row};
use serde_json::json;

pub fn combustion_demos(task: usize) {
    let result = match task {
        0 => methane_constants(),
        1 => heptane_from_json(),
        2 => stirred_cell(),
        3 => aerosol_drag(),
        _ => {
            error!("no demo number {}", task);
            Ok(())
        }
    };
    if let Err(e) = result {
        error!("demo {} failed: {}", task, e);
    }
}

fn methane_species() -> Result<SpeciesTable, CombustionError> {
    SpeciesTable::from_json(json!([
        {"name": "CH4", "W": 16.0, "thermo": {"model": "constant", "Hf": -74.87e3}},
        {"name": "O2", "W": 32.0, "thermo": {"model": "constant", "Hf": 0.0}},
        {"name": "CO2", "W": 44.0, "thermo": {"model": "constant", "Hf": -393.51e3}},
        {"name": "H2O", "W": 18.0, "thermo": {"model": "constant", "Hf": -241.83e3}},
        {"name": "N2", "W": 28.0, "thermo": {"model": "constant", "Hf": 0.0}}
    ]))
}

/// methane in air: s = 4, stoichiometric air-fuel ratio 17.24, 50 MJ/kg
pub fn methane_constants() -> Result<(), CombustionError> {
    let species = methane_species()?;
    let thermo = ThermoFields::uniform(1, 300.0, 101325.0, 1.2);
    let config = json!({
        "semiImplicit": true,
        "fuel": "CH4",
        "inertSpecie": "N2",
        "reaction": {"equation": "CH4 + 2O2 = CO2 + 2H2O"}
    });
    let model = SingleStepCombustion::new(&config, &species, &thermo)?;
    model.pretty_print();
    Ok(())
}

/// molecular weights from the formulas, CO2 and H2O with NASA polynomials, nitrogen in the reaction
pub fn heptane_from_json() -> Result<(), CombustionError> {
    let species = SpeciesTable::from_json(json!([
        {"name": "C7H16", "thermo": {"model": "constant", "Hf": -187.8e3}},
        {"name": "O2", "thermo": {"model": "constant", "Hf": 0.0}},
        {"name": "CO2", "thermo": {"model": "NASA7", "T": [200.0, 1000.0, 3500.0],
            "low": [2.35677352e+00, 8.98459677e-03, -7.12356269e-06, 2.45919022e-09, -1.43699548e-13, -4.83719697e+04, 9.90105222e+00],
            "high": [3.85746029e+00, 4.41437026e-03, -2.21481404e-06, 5.23490188e-10, -4.72084164e-14, -4.87591660e+04, 2.27163806e+00]}},
        {"name": "H2O", "thermo": {"model": "NASA7", "T": [200.0, 1000.0, 3500.0],
            "low": [4.19864056e+00, -2.03643410e-03, 6.52040211e-06, -5.48797062e-09, 1.77197817e-12, -3.02937267e+04, -8.49032208e-01],
            "high": [3.03399249e+00, 2.17691804e-03, -1.64072518e-07, -9.70419870e-11, 1.68200992e-14, -3.00042971e+04, 4.96677010e+00]}},
        {"name": "N2", "thermo": {"model": "constant", "Hf": 0.0}}
    ]))?;
    let thermo = ThermoFields::uniform(1, 300.0, 101325.0, 1.2);
    let config = json!({
        "semiImplicit": false,
        "fuel": "C7H16",
        "inertSpecie": "N2",
        "reaction": {
            "reactants": [{"specie": "C7H16"}, {"specie": "O2", "coeff": 11}, {"specie": "N2", "coeff": 41.36}],
            "products": [{"specie": "CO2", "coeff": 7}, {"specie": "H2O", "coeff": 8}, {"specie": "N2", "coeff": 41.36}]
        }
    });
    let model = SingleStepCombustion::new(&config, &species, &thermo)?;
    model.pretty_print();
    Ok(())
}

/// mixing limited rate rho·min(Y_fuel, Y_ox/s)/tau, tau = 1 ms
fn mixing_limited(state: &RateLawState) -> ScalarField {
    let tau = 1e-3;
    let y_fuel = &state.Y[state.fuel_index];
    let y_ox = &state.Y[state.oxidant_index];
    ScalarField::from_fn(y_fuel.len(), |c, _| {
        state.rho[c] * y_fuel[c].min(y_ox[c] / state.s).max(0.0) / tau
    })
}

/// A lean and a rich cell burning at constant density; the fuel is advanced
/// implicitly with its linearised source, the other species explicitly
pub fn stirred_cell() -> Result<(), CombustionError> {
    let species = methane_species()?;
    let thermo = ThermoFields::uniform(2, 1500.0, 101325.0, 0.25);
    let config = json!({
        "combustionModel": "singleStepCombustion",
        "semiImplicit": true,
        "fuel": "CH4",
        "inertSpecie": "N2",
        "reaction": {"equation": "CH4 + 2O2 = CO2 + 2H2O"}
    });
    let mut model = new_combustion_model(&config, &species, &thermo)?;
    let n_species = species.n_species();
    let mut y = vec![
        ScalarField::from_vec(vec![0.04, 0.08]),
        ScalarField::from_vec(vec![0.22, 0.21]),
        ScalarField::zeros(2),
        ScalarField::zeros(2),
        ScalarField::from_vec(vec![0.74, 0.71]),
    ];
    let dt = 2e-4;
    let rho = &thermo.rho;
    let mut table = Table::new();
    table.add_row(row!["t, ms", "cell", "Y_CH4", "Y_O2", "Y_CO2", "Qdot, W/m3"]);
    for step in 0..=20 {
        model.correct(&y, &mixing_limited)?;
        let qdot = model.heat_release();
        if step % 5 == 0 {
            for c in 0..2 {
                table.add_row(row![
                    format!("{:.1}", step as f64 * dt * 1e3),
                    c,
                    format!("{:.5}", y[0][c]),
                    format!("{:.5}", y[1][c]),
                    format!("{:.5}", y[2][c]),
                    format!("{:.4e}", qdot[c])
                ]);
            }
        }
        let mut next = Vec::with_capacity(n_species);
        for (i, yi) in y.iter().enumerate() {
            let source = model.source_term(i, yi)?;
            // (rho·Y_new - rho·Y)/dt = su + sp·Y_new
            let y_new = ScalarField::from_fn(yi.len(), |c, _| {
                (rho[c] * yi[c] / dt + source.su[c]) / (rho[c] / dt - source.sp[c])
            });
            next.push(y_new);
        }
        y = next;
    }
    table.printstd();
    Ok(())
}

pub fn aerosol_drag() -> Result<(), CombustionError> {
    let drag = AerosolDrag::from_value(&json!({}))?;
    let thermo = ThermoFields::uniform(5, 300.0, 101325.0, 1.2);
    let d = ScalarField::from_vec(vec![1e-9, 1e-8, 1e-7, 1e-6, 1e-5]);
    let cd_re = drag.CdRe(&PhasePair {
        continuous: &thermo,
        d: &d,
    })?;
    let lambda = drag.mean_free_path(300.0, 101325.0);
    let mut table = Table::new();
    table.add_row(row!["d, m", "Kn", "Cc", "CdRe"]);
    for c in 0..d.len() {
        table.add_row(row![
            format!("{:.1e}", d[c]),
            format!("{:.3e}", 2.0 * lambda / d[c]),
            format!("{:.4}", drag.cunningham(lambda, d[c])),
            format!("{:.4}", cd_re[c])
        ]);
    }
    table.printstd();
    Ok(())
}
