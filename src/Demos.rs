/// Worked cases of the single step combustion closure: constants of common fuels,
/// a few explicit time steps of a perfectly stirred cell, aerosol drag coefficients.
pub mod combustion_demos;
