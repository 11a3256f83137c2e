/// Stokes drag with Cunningham slip correction for very small dispersed particles.
#[allow(non_snake_case)]
pub mod aerosol_drag;
