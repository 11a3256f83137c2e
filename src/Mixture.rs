/// Capability traits of a multi-species mixture and of the cell thermodynamic state
/// (`Mixture`, `ThermoState`), scalar field type and physical constants.
pub mod mixture_api;
/// Molar mass of a chemical formula: recursive parser of element symbols, counts and brackets.
pub mod molmass;
/// Per-specie enthalpy models (constant heat capacity, NASA 7-coefficient polynomials)
/// dispatched through `enum_dispatch`.
pub mod species_thermo;
/// `SpeciesTable`: concrete mixture built in code or loaded from JSON.
pub mod species_table;
