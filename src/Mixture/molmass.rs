/// Module to calculate the atomic composition and molar mass of a chemical formula
///
/// Used by the species table when a specie is given without an explicit
/// molecular weight: the specie name is then read as its chemical formula.
use std::collections::HashMap;

// Define a struct to hold element data
pub struct Element {
    name: &'static str,
    atomic_mass: f64,
}

// elements met in combustion mixtures
const ELEMENTS: &[Element] = &[
    Element {
        name: "H",
        atomic_mass: 1.008,
    },
    Element {
        name: "He",
        atomic_mass: 4.0026,
    },
    Element {
        name: "B",
        atomic_mass: 10.81,
    },
    Element {
        name: "C",
        atomic_mass: 12.011,
    },
    Element {
        name: "N",
        atomic_mass: 14.007,
    },
    Element {
        name: "O",
        atomic_mass: 15.999,
    },
    Element {
        name: "F",
        atomic_mass: 18.998,
    },
    Element {
        name: "Ne",
        atomic_mass: 20.18,
    },
    Element {
        name: "Na",
        atomic_mass: 22.99,
    },
    Element {
        name: "Mg",
        atomic_mass: 24.305,
    },
    Element {
        name: "Al",
        atomic_mass: 26.98,
    },
    Element {
        name: "Si",
        atomic_mass: 28.085,
    },
    Element {
        name: "P",
        atomic_mass: 30.974,
    },
    Element {
        name: "S",
        atomic_mass: 32.065,
    },
    Element {
        name: "Cl",
        atomic_mass: 35.45,
    },
    Element {
        name: "Ar",
        atomic_mass: 39.948,
    },
    Element {
        name: "K",
        atomic_mass: 39.102,
    },
    Element {
        name: "Ca",
        atomic_mass: 40.08,
    },
    Element {
        name: "Fe",
        atomic_mass: 55.845,
    },
];

pub fn atomic_mass(symbol: &str) -> Option<f64> {
    ELEMENTS
        .iter()
        .find(|e| e.name == symbol)
        .map(|e| e.atomic_mass)
}

// phase markers like H2O(g) or C(s) are not part of the composition
fn strip_phase_suffix(formula: &str) -> &str {
    for suffix in ["(g)", "(l)", "(s)", "(c)", "(cr)", "(L)", "(G)"] {
        if let Some(stripped) = formula.strip_suffix(suffix) {
            return stripped;
        }
    }
    formula
}

fn read_count(chars: &[char], pos: &mut usize) -> Result<usize, String> {
    let start = *pos;
    while *pos < chars.len() && chars[*pos].is_ascii_digit() {
        *pos += 1;
    }
    if start == *pos {
        return Ok(1);
    }
    let digits: String = chars[start..*pos].iter().collect();
    digits
        .parse()
        .map_err(|e| format!("bad count {} at position {}: {}", digits, start, e))
}

fn add_atoms(counts: &mut HashMap<String, usize>, element: String, n: usize) -> Result<(), String> {
    let total = counts.entry(element).or_insert(0);
    *total = total
        .checked_add(n)
        .ok_or_else(|| "too many atoms in formula".to_string())?;
    Ok(())
}

// recursive descent over element symbols and bracketed groups
fn parse_group(
    chars: &[char],
    pos: &mut usize,
    depth: usize,
) -> Result<HashMap<String, usize>, String> {
    let mut counts: HashMap<String, usize> = HashMap::new();
    while *pos < chars.len() {
        let c = chars[*pos];
        if c == '(' || c == '[' {
            *pos += 1;
            let inner = parse_group(chars, pos, depth + 1)?;
            let multiplier = read_count(chars, pos)?;
            for (element, n) in inner {
                let n = n
                    .checked_mul(multiplier)
                    .ok_or_else(|| "too many atoms in formula".to_string())?;
                add_atoms(&mut counts, element, n)?;
            }
        } else if c == ')' || c == ']' {
            if depth == 0 {
                return Err(format!("unbalanced bracket at position {}", pos));
            }
            *pos += 1;
            return Ok(counts);
        } else if c.is_ascii_uppercase() {
            let mut symbol = c.to_string();
            *pos += 1;
            while *pos < chars.len() && chars[*pos].is_ascii_lowercase() {
                symbol.push(chars[*pos]);
                *pos += 1;
            }
            if atomic_mass(&symbol).is_none() {
                return Err(format!("unknown element {}", symbol));
            }
            let n = read_count(chars, pos)?;
            add_atoms(&mut counts, symbol, n)?;
        } else {
            return Err(format!("unexpected character '{}' in formula", c));
        }
    }
    if depth != 0 {
        return Err("unclosed bracket".to_string());
    }
    Ok(counts)
}

/// parse formula like "CH4", "Ca(NO3)2" or "H2O(g)" into element counts
pub fn parse_formula(formula: &str) -> Result<HashMap<String, usize>, String> {
    let formula = strip_phase_suffix(formula.trim());
    if formula.is_empty() {
        return Err("empty formula".to_string());
    }
    let chars: Vec<char> = formula.chars().collect();
    let mut pos = 0;
    parse_group(&chars, &mut pos, 0)
}

// Function to calculate the molar mass of a substance given its chemical formula, g/mol
pub fn calculate_molar_mass(formula: &str) -> Result<(f64, HashMap<String, usize>), String> {
    let counts = parse_formula(formula)?;
    let molar_mass = counts
        .iter()
        .map(|(element, n)| atomic_mass(element).unwrap_or(0.0) * *n as f64)
        .sum();
    Ok((molar_mass, counts))
}
