#[cfg(test)]
mod tests {
    use crate::Combustion::combustion_api::{RateLaw, RateLawState};
    use crate::Combustion::errors::CombustionError;
    use crate::Combustion::single_step::SingleStepCombustion;
    use crate::Combustion::stoichiometry::SpecieRole;
    use crate::Mixture::mixture_api::{ScalarField, ThermoFields};
    use crate::Mixture::species_table::SpeciesTable;
    use crate::Mixture::species_thermo::{ConstantThermo, SpecieThermo};
    use approx::assert_relative_eq;
    use serde_json::{Value, json};

    const TAU: f64 = 0.01;

    fn hf(value: f64) -> Option<SpecieThermo> {
        Some(SpecieThermo::Constant(ConstantThermo { Hf: value, Cp: 0.0 }))
    }

    fn methane_mixture() -> SpeciesTable {
        let mut mixture = SpeciesTable::new();
        mixture.add_specie("CH4", 16.0, hf(-74.87e3)).unwrap();
        mixture.add_specie("O2", 32.0, hf(0.0)).unwrap();
        mixture.add_specie("CO2", 44.0, hf(-393.51e3)).unwrap();
        mixture.add_specie("H2O", 18.0, hf(-241.83e3)).unwrap();
        mixture.add_specie("N2", 28.0, hf(0.0)).unwrap();
        mixture
    }

    fn methane_config() -> Value {
        json!({
            "semiImplicit": true,
            "fuel": "CH4",
            "oxidant": "O2",
            "inertSpecie": "N2",
            "reaction": {"equation": "CH4 + 2O2 = CO2 + 2H2O"}
        })
    }

    fn thermo() -> ThermoFields {
        ThermoFields::uniform(3, 1500.0, 101325.0, 1.0)
    }

    /// stoichiometric, rich and burned cells
    fn mass_fractions() -> Vec<ScalarField> {
        vec![
            ScalarField::from_vec(vec![0.05, 0.1, 0.0]),
            ScalarField::from_vec(vec![0.2, 0.2, 0.0]),
            ScalarField::from_vec(vec![0.0, 0.0, 0.16]),
            ScalarField::from_vec(vec![0.0, 0.0, 0.13]),
            ScalarField::from_vec(vec![0.75, 0.7, 0.71]),
        ]
    }

    /// mixing limited rate rho·min(Y_fuel, Y_ox/s)/tau
    fn mixing_limited(state: &RateLawState) -> ScalarField {
        let y_fuel = &state.Y[state.fuel_index];
        let y_ox = &state.Y[state.oxidant_index];
        ScalarField::from_fn(y_fuel.len(), |c, _| {
            state.rho[c] * y_fuel[c].min(y_ox[c] / state.s).max(0.0) / TAU
        })
    }

    struct WrongSizeRate;
    impl RateLaw for WrongSizeRate {
        fn fuel_consumption_rate(
            &self,
            _state: &RateLawState,
        ) -> Result<ScalarField, CombustionError> {
            Ok(ScalarField::zeros(7))
        }
    }

    #[test]
    fn test_methane_constants() {
        let mixture = methane_mixture();
        let thermo = thermo();
        let model = SingleStepCombustion::new(&methane_config(), &mixture, &thermo).unwrap();
        assert_eq!(model.s(), 4.0);
        assert_relative_eq!(model.stoic_ratio(), 4.0 / 0.232, epsilon = 1e-12);
        assert_relative_eq!(model.stoic_ratio(), 17.24, epsilon = 1e-2);
        assert_relative_eq!(model.q_fuel(), 5.014375e7, max_relative = 1e-9);
        assert_eq!(model.fuel_index(), 0);
        assert_eq!(model.oxidant_index(), 1);
        assert_eq!(model.inert_index(), 4);
        assert!(model.semi_implicit());
        assert_eq!(model.specie_roles()[0], SpecieRole::Fuel);
        assert_eq!(model.specie_roles()[4], SpecieRole::Inert);

        let total = 1.0 + 4.0 / 0.232;
        assert_relative_eq!(model.Yprod0()[2], 2.75 / total, epsilon = 1e-12);
        assert_relative_eq!(model.Yprod0()[3], 2.25 / total, epsilon = 1e-12);
        assert_eq!(model.Yprod0()[0], 0.0);
        assert_eq!(model.Yprod0()[1], 0.0);
        let sum: f64 = model.Yprod0().iter().sum::<f64>() + model.inert_fraction();
        assert_relative_eq!(sum, 1.0, epsilon = 1e-6);
        // mass balance of the mass coefficients
        let balance: f64 = model.specie_stoich_coeffs().iter().sum();
        assert_relative_eq!(balance, 0.0, epsilon = 1e-12);
        assert!(model.stoic_ratio() >= model.s() && model.s() >= 0.0);
        for y in model.Yprod0() {
            assert!(*y >= 0.0 && *y <= 1.0);
        }
    }

    #[test]
    fn test_reaction_lists_give_same_constants() {
        let mixture = methane_mixture();
        let thermo = thermo();
        let mut config = methane_config();
        config["reaction"] = json!({
            "reactants": [{"specie": "CH4"}, {"specie": "O2", "coeff": 2}],
            "products": [{"specie": "CO2"}, {"specie": "H2O", "coeff": 2}]
        });
        let from_lists = SingleStepCombustion::new(&config, &mixture, &thermo).unwrap();
        let from_equation = SingleStepCombustion::new(&methane_config(), &mixture, &thermo).unwrap();
        assert_eq!(from_lists.s(), from_equation.s());
        assert_relative_eq!(from_lists.stoic_ratio(), from_equation.stoic_ratio());
        assert_relative_eq!(from_lists.q_fuel(), from_equation.q_fuel());
        assert_eq!(from_lists.Yprod0(), from_equation.Yprod0());
    }

    #[test]
    fn test_construction_errors() {
        let mixture = methane_mixture();
        let thermo = thermo();

        let mut config = methane_config();
        config["fuel"] = json!("C8H18");
        let err = SingleStepCombustion::new(&config, &mixture, &thermo).err().unwrap();
        assert!(matches!(err, CombustionError::UnknownSpecie(ref name) if name == "C8H18"));

        let mut config = methane_config();
        config["reaction"] = json!({"equation": "CH4 + O2 = CO2 + 2H2O"});
        let err = SingleStepCombustion::new(&config, &mixture, &thermo).err().unwrap();
        assert!(matches!(err, CombustionError::MassImbalance { .. }));

        let mut config = methane_config();
        config.as_object_mut().unwrap().remove("inertSpecie");
        let err = SingleStepCombustion::new(&config, &mixture, &thermo).err().unwrap();
        assert!(err.is_configuration_error());
        assert!(err.to_string().contains("inertSpecie"));

        let mut no_enthalpy = SpeciesTable::new();
        no_enthalpy.add_specie("CH4", 16.0, hf(-74.87e3)).unwrap();
        no_enthalpy.add_specie("O2", 32.0, hf(0.0)).unwrap();
        no_enthalpy.add_specie("CO2", 44.0, None).unwrap();
        no_enthalpy.add_specie("H2O", 18.0, hf(-241.83e3)).unwrap();
        no_enthalpy.add_specie("N2", 28.0, None).unwrap();
        let err = SingleStepCombustion::new(&methane_config(), &no_enthalpy, &thermo)
            .err()
            .unwrap();
        assert!(matches!(err, CombustionError::MissingEnthalpy(ref name) if name == "CO2"));
    }

    #[test]
    fn test_inert_must_not_react() {
        let mixture = methane_mixture();
        let thermo = thermo();
        for inert in ["O2", "CH4", "H2O"] {
            let mut config = methane_config();
            config["inertSpecie"] = json!(inert);
            let err = SingleStepCombustion::new(&config, &mixture, &thermo).err().unwrap();
            assert!(matches!(err, CombustionError::InvalidKey { ref key, .. } if key == "inertSpecie"));
            assert!(err.is_configuration_error());
            assert!(err.to_string().contains(inert));
        }
        // a diluent written on both sides stays inert
        let mut config = methane_config();
        config["reaction"] = json!({"equation": "CH4 + 2O2 + 7.52N2 = CO2 + 2H2O + 7.52N2"});
        let model = SingleStepCombustion::new(&config, &mixture, &thermo).unwrap();
        assert_eq!(model.specie_roles()[model.inert_index()], SpecieRole::Inert);

        let mut model = SingleStepCombustion::new(&methane_config(), &mixture, &thermo).unwrap();
        let mut config = methane_config();
        config["inertSpecie"] = json!("CO2");
        assert!(model.reload(&config).is_err());
        assert_eq!(model.inert_index(), 4);
    }

    #[test]
    fn test_overlapping_species_count_net() {
        let mixture = methane_mixture();
        let thermo = thermo();
        for equation in ["CH4 + 2O2 + H2O = CO2 + 3H2O", "CH4 + 3O2 = CO2 + 2H2O + O2"] {
            let mut config = methane_config();
            config["reaction"] = json!({ "equation": equation });
            let model = SingleStepCombustion::new(&config, &mixture, &thermo).unwrap();
            assert_eq!(model.s(), 4.0);
            assert_relative_eq!(model.stoic_ratio(), 4.0 / 0.232, epsilon = 1e-12);
            assert_relative_eq!(model.q_fuel(), 5.014375e7, max_relative = 1e-9);
            let sum: f64 = model.Yprod0().iter().sum::<f64>() + model.inert_fraction();
            assert_relative_eq!(sum, 1.0, epsilon = 1e-6);
        }
    }

    #[test]
    fn test_correct_with_rate_law() {
        let mixture = methane_mixture();
        let thermo = thermo();
        let mut model = SingleStepCombustion::new(&methane_config(), &mixture, &thermo).unwrap();
        let y = mass_fractions();
        model.correct(&y, &mixing_limited).unwrap();

        let w = model.w_fuel().clone();
        assert_relative_eq!(w[0], 5.0, epsilon = 1e-12);
        assert_relative_eq!(w[1], 5.0, epsilon = 1e-12);
        assert_eq!(w[2], 0.0);
        // residuals: nothing formed in the first cells, fully burned in the last
        assert_relative_eq!(model.fres(2).unwrap()[0], model.Yprod0()[2]);
        assert_eq!(model.fres(2).unwrap()[2], 0.0);
        assert_eq!(model.fres(0), Some(&ScalarField::zeros(3)));
        assert!(model.fres(5).is_none());
        assert_relative_eq!(model.excess_fuel()[1], 0.05, epsilon = 1e-12);
        assert_eq!(model.excess_oxidant()[1], 0.0);

        let qdot = model.heat_release();
        assert_relative_eq!(qdot[0], 5.0 * model.q_fuel(), max_relative = 1e-12);
        assert_eq!(qdot[2], 0.0);
    }

    #[test]
    fn test_correct_is_idempotent() {
        let mixture = methane_mixture();
        let thermo = thermo();
        let mut model = SingleStepCombustion::new(&methane_config(), &mixture, &thermo).unwrap();
        let y = mass_fractions();
        model.correct(&y, &mixing_limited).unwrap();
        let fres: Vec<ScalarField> = (0..5).map(|i| model.fres(i).unwrap().clone()).collect();
        let w = model.w_fuel().clone();
        model.correct(&y, &mixing_limited).unwrap();
        for i in 0..5 {
            assert_eq!(Some(&fres[i]), model.fres(i));
        }
        assert_eq!(&w, model.w_fuel());
    }

    #[test]
    fn test_rate_law_field_size_is_checked() {
        let mixture = methane_mixture();
        let thermo = thermo();
        let mut model = SingleStepCombustion::new(&methane_config(), &mixture, &thermo).unwrap();
        let err = model.correct(&mass_fractions(), &WrongSizeRate).unwrap_err();
        assert!(matches!(err, CombustionError::FieldSize { found: 7, expected: 3, .. }));
        assert!(!err.is_configuration_error());
        assert_eq!(model.w_fuel(), &ScalarField::zeros(3));
    }

    #[test]
    fn test_semi_implicit_fuel_source() {
        let mixture = methane_mixture();
        let thermo = thermo();
        let mut model = SingleStepCombustion::new(&methane_config(), &mixture, &thermo).unwrap();
        let y = mass_fractions();
        model.correct(&y, &mixing_limited).unwrap();

        let fuel = model.build_source_term(0, &y[0]).unwrap();
        // stoichiometric cell relaxes to zero fuel, rich cell to the excess fuel
        assert_relative_eq!(fuel.sp[0], -5.0 / 0.05, epsilon = 1e-9);
        assert_relative_eq!(fuel.su[0], 0.0, epsilon = 1e-12);
        assert_relative_eq!(fuel.sp[1], -5.0 / 0.05, epsilon = 1e-9);
        assert_relative_eq!(fuel.su[1], 5.0, epsilon = 1e-9);
        let at_state = fuel.evaluate(&y[0]);
        assert_relative_eq!(at_state[0], -5.0, epsilon = 1e-9);
        assert_relative_eq!(at_state[1], -5.0, epsilon = 1e-9);
        assert_relative_eq!(at_state[2], 0.0);
        for sp in fuel.sp.iter() {
            assert!(*sp <= 0.0);
        }

        let co2 = model.build_source_term(2, &y[2]).unwrap();
        assert_eq!(co2.sp, ScalarField::zeros(3));
        assert_relative_eq!(co2.su[0], 2.75 * 5.0, epsilon = 1e-9);
        let o2 = model.build_source_term(1, &y[1]).unwrap();
        assert_relative_eq!(o2.su[1], -20.0, epsilon = 1e-9);
    }

    #[test]
    fn test_explicit_sources_conserve_mass() {
        let mixture = methane_mixture();
        let thermo = thermo();
        let mut config = methane_config();
        config["semiImplicit"] = json!(false);
        let mut model = SingleStepCombustion::new(&config, &mixture, &thermo).unwrap();
        let y = mass_fractions();
        model.correct(&y, &mixing_limited).unwrap();
        let mut total = ScalarField::zeros(3);
        for i in 0..5 {
            let source = model.build_source_term(i, &y[i]).unwrap();
            assert_eq!(source.sp, ScalarField::zeros(3));
            total += source.evaluate(&y[i]);
        }
        for c in 0..3 {
            assert_relative_eq!(total[c], 0.0, epsilon = 1e-9);
        }
    }

    #[test]
    fn test_zero_rate_gives_zero_sources() {
        let mixture = methane_mixture();
        let thermo = thermo();
        let mut model = SingleStepCombustion::new(&methane_config(), &mixture, &thermo).unwrap();
        let y = mass_fractions();
        model.fres_correct(&y).unwrap();
        model.set_fuel_consumption_rate(ScalarField::zeros(3)).unwrap();
        for i in 0..5 {
            assert!(model.build_source_term(i, &y[i]).unwrap().is_zero());
        }
        assert_eq!(model.heat_release(), ScalarField::zeros(3));
        assert!(model.build_source_term(5, &y[0]).is_err());
    }

    #[test]
    fn test_heat_release_is_linear() {
        let mixture = methane_mixture();
        let thermo = thermo();
        let mut model = SingleStepCombustion::new(&methane_config(), &mixture, &thermo).unwrap();
        let w = ScalarField::from_vec(vec![0.5, 1.0, 3.0]);
        model.set_fuel_consumption_rate(w.clone()).unwrap();
        let once = model.heat_release();
        model.set_fuel_consumption_rate(w * 2.0).unwrap();
        let twice = model.heat_release();
        for c in 0..3 {
            assert_relative_eq!(twice[c], 2.0 * once[c], max_relative = 1e-12);
        }
        let err = model
            .set_fuel_consumption_rate(ScalarField::zeros(2))
            .unwrap_err();
        assert!(matches!(err, CombustionError::FieldSize { .. }));
    }

    #[test]
    fn test_invalid_reload_keeps_state() {
        let mixture = methane_mixture();
        let thermo = thermo();
        let mut model = SingleStepCombustion::new(&methane_config(), &mixture, &thermo).unwrap();
        let y = mass_fractions();
        model.correct(&y, &mixing_limited).unwrap();
        let (stoic_ratio, s, q_fuel) = (model.stoic_ratio(), model.s(), model.q_fuel());
        let ratios = model.ratios();
        let yprod0 = model.Yprod0().to_vec();
        let fres = model.fres(2).unwrap().clone();
        let w = model.w_fuel().clone();

        let mut unknown_fuel = methane_config();
        unknown_fuel["fuel"] = json!("C3H8");
        let mut unbalanced = methane_config();
        unbalanced["reaction"] = json!({"equation": "CH4 + 3O2 = CO2 + 2H2O"});
        let mut missing_key = methane_config();
        missing_key.as_object_mut().unwrap().remove("semiImplicit");

        for config in [unknown_fuel, unbalanced, missing_key] {
            let err = model.reload(&config).unwrap_err();
            assert!(err.is_configuration_error());
            assert_eq!(model.stoic_ratio(), stoic_ratio);
            assert_eq!(model.s(), s);
            assert_eq!(model.q_fuel(), q_fuel);
            assert_eq!(model.ratios(), ratios);
            assert_eq!(model.Yprod0(), yprod0.as_slice());
            assert_eq!(model.fres(2), Some(&fres));
            assert_eq!(model.w_fuel(), &w);
            assert!(model.semi_implicit());
        }
    }

    #[test]
    fn test_valid_reload_replaces_constants() {
        let mixture = methane_mixture();
        let thermo = thermo();
        let mut model = SingleStepCombustion::new(&methane_config(), &mixture, &thermo).unwrap();
        model.correct(&mass_fractions(), &mixing_limited).unwrap();

        let config = json!({
            "semiImplicit": false,
            "fuel": "CH4",
            "inertSpecie": "N2",
            "reaction": {"equation": "CH4 + 2O2 + 7.52N2 => CO2 + 2H2O + 7.52N2"}
        });
        model.reload(&config).unwrap();
        assert!(!model.semi_implicit());
        assert_eq!(model.s(), 4.0);
        assert_relative_eq!(model.stoic_ratio(), (64.0 + 7.52 * 28.0) / 16.0, epsilon = 1e-12);
        assert_relative_eq!(model.q_fuel(), 5.014375e7, max_relative = 1e-9);
        let sum: f64 = model.Yprod0().iter().sum::<f64>() + model.inert_fraction();
        assert_relative_eq!(sum, 1.0, epsilon = 1e-6);
        assert_eq!(model.w_fuel(), &ScalarField::zeros(3));
        assert_eq!(model.fres(2), Some(&ScalarField::zeros(3)));
    }

    #[test]
    fn test_summary_table() {
        let mixture = methane_mixture();
        let thermo = thermo();
        let model = SingleStepCombustion::new(&methane_config(), &mixture, &thermo).unwrap();
        let table = model.summary_table();
        // header + one row per specie
        assert_eq!(table.len(), 6);
        let rendered = table.to_string();
        assert!(rendered.contains("CO2"));
        assert!(rendered.contains("Produced"));
        model.pretty_print();
    }
}
