use std::fmt;

/// The elements in the lookup table.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Element {
    Hydrogen,
    Carbon,
    Oxygen,
}

impl Element {
    pub const ALL: [Element; 3] = [Element::Hydrogen, Element::Carbon, Element::Oxygen];

    pub fn name(self) -> &'static str {
        match self {
            Element::Hydrogen => "Hydrogen",
            Element::Carbon => "Carbon",
            Element::Oxygen => "Oxygen",
        }
    }

    pub fn atomic_number(self) -> u32 {
        match self {
            Element::Hydrogen => 1,
            Element::Carbon => 6,
            Element::Oxygen => 8,
        }
    }

    /// Molar mass in g/mol.
    pub fn molar_mass(self) -> f64 {
        match self {
            Element::Hydrogen => 1.008,
            Element::Carbon => 12.011,
            Element::Oxygen => 15.999,
        }
    }

    /// Exact, case-sensitive match on the English name.
    pub fn from_name(name: &str) -> Option<Element> {
        Element::ALL.into_iter().find(|el| el.name() == name)
    }

    pub fn from_atomic_number(z: u32) -> Option<Element> {
        Element::ALL.into_iter().find(|el| el.atomic_number() == z)
    }
}

impl fmt::Display for Element {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Density in g/mL. No validation: a zero volume gives an infinite or NaN result.
pub fn calculate_density(mass: f64, volume: f64) -> f64 {
    mass / volume
}

/// Molar mass for a known element name, 0.0 otherwise.
pub fn molar_mass(name: &str) -> f64 {
    Element::from_name(name).map_or(0.0, Element::molar_mass)
}

/// Element name for a known atomic number, "Unknown" otherwise.
pub fn element_name(atomic_number: u32) -> &'static str {
    Element::from_atomic_number(atomic_number).map_or("Unknown", Element::name)
}

/// Atomic number for a known element name, 0 otherwise.
pub fn atomic_number(name: &str) -> u32 {
    Element::from_name(name).map_or(0, Element::atomic_number)
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_abs_diff_eq;

    #[test]
    fn test_density() {
        assert_abs_diff_eq!(calculate_density(10.0, 5.0), 2.0);
        assert!(calculate_density(1.0, 0.0).is_infinite());
    }

    #[test]
    fn test_known_elements() {
        assert_abs_diff_eq!(molar_mass("Hydrogen"), 1.008);
        assert_abs_diff_eq!(molar_mass("Carbon"), 12.011);
        assert_abs_diff_eq!(molar_mass("Oxygen"), 15.999);
        assert_eq!(element_name(1), "Hydrogen");
        assert_eq!(element_name(6), "Carbon");
        assert_eq!(element_name(8), "Oxygen");
        assert_eq!(atomic_number("Hydrogen"), 1);
        assert_eq!(atomic_number("Carbon"), 6);
        assert_eq!(atomic_number("Oxygen"), 8);
    }

    #[test]
    fn test_unknown_inputs() {
        assert_eq!(molar_mass("Helium"), 0.0);
        assert_eq!(molar_mass("hydrogen"), 0.0);
        assert_eq!(element_name(2), "Unknown");
        assert_eq!(element_name(0), "Unknown");
        assert_eq!(atomic_number(""), 0);
    }

    #[test]
    fn test_round_trip_through_tables() {
        for el in Element::ALL {
            assert_eq!(element_name(atomic_number(el.name())), el.name());
        }
    }

    #[test]
    fn test_lookup_by_name_and_number() {
        assert_eq!(Element::from_name("Carbon"), Some(Element::Carbon));
        assert_eq!(Element::from_name("Neon"), None);
        assert_eq!(Element::from_atomic_number(8), Some(Element::Oxygen));
        assert_eq!(Element::from_atomic_number(10), None);
        assert_eq!(Element::Hydrogen.to_string(), "Hydrogen");
    }
}
