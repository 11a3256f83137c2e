#[allow(non_snake_case)]
pub mod Combustion;
#[allow(non_snake_case)]
pub mod Interfacial;
#[allow(non_snake_case)]
pub mod Mixture;
#[allow(non_snake_case)]
pub mod Demos;
