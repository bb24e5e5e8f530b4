//! Periodic table dataset and element lookup
//!
//! The embedded dataset follows the Periodic-Table-JSON layout: a root object
//! with an `elements` array whose records carry `name`, `symbol`, `number`,
//! `atomic_mass` and `electron_configuration`.

use crate::configuration::{ElectronConfiguration, MAX_SHELLS};
use crate::error::ChemistryError;
use serde::Deserialize;
use std::fs;
use std::path::Path;

/// Embed the periodic table JSON at compile time.
const ELEMENTS_JSON: &str = include_str!("../data/elements.json");

#[derive(Debug, Deserialize)]
struct RawElement {
    name: String,
    #[serde(default)]
    symbol: String,
    number: u32,
    atomic_mass: f64,
    electron_configuration: String,
}

#[derive(Debug, Deserialize)]
struct Dataset {
    elements: Vec<RawElement>,
}

/// One validated element of the dataset
#[derive(Debug, Clone, PartialEq)]
pub struct ElementRecord {
    pub name: String,
    pub symbol: String,
    pub atomic_number: u32,
    pub atomic_mass: f64,
    pub electron_configuration: ElectronConfiguration,
}

impl ElementRecord {
    pub fn proton_count(&self) -> u32 {
        self.atomic_number
    }

    /// Rounded atomic mass minus atomic number.
    ///
    /// Not clamped: a record whose mass is lighter than its proton count yields
    /// a negative value and callers must decide what to do with it.
    pub fn neutron_count(&self) -> i64 {
        self.atomic_mass.round() as i64 - self.atomic_number as i64
    }

    pub fn electron_count(&self) -> u32 {
        self.electron_configuration.electron_count()
    }

    /// Electrons per principal shell, indexed from zero
    pub fn shells(&self) -> [u32; MAX_SHELLS] {
        self.electron_configuration.shell_distribution()
    }

    fn from_raw(raw: RawElement) -> Result<Self, ChemistryError> {
        if raw.number == 0 {
            return Err(ChemistryError::InvalidRecord {
                element: raw.name,
                reason: "atomic number must be at least 1".to_string(),
            });
        }
        if !raw.atomic_mass.is_finite() || raw.atomic_mass < 0.0 {
            return Err(ChemistryError::InvalidRecord {
                element: raw.name,
                reason: format!("atomic mass {} is not a non-negative number", raw.atomic_mass),
            });
        }

        let electron_configuration = match raw.electron_configuration.parse() {
            Ok(config) => config,
            Err(source) => {
                return Err(ChemistryError::MalformedToken {
                    element: raw.name,
                    source,
                })
            }
        };

        Ok(Self {
            name: raw.name,
            symbol: raw.symbol,
            atomic_number: raw.number,
            atomic_mass: raw.atomic_mass,
            electron_configuration,
        })
    }
}

/// Immutable, validated periodic table
#[derive(Debug, Clone)]
pub struct PeriodicTable {
    elements: Vec<ElementRecord>,
}

impl PeriodicTable {
    /// Load the table embedded in the crate.
    pub fn load() -> Result<Self, ChemistryError> {
        Self::from_json(ELEMENTS_JSON)
    }

    /// Load a table from a JSON document on disk.
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self, ChemistryError> {
        let contents = fs::read_to_string(path.as_ref()).map_err(|error| ChemistryError::Io {
            path: path.as_ref().to_path_buf(),
            error,
        })?;
        Self::from_json(&contents)
    }

    /// Parse and validate every record.
    ///
    /// Configuration tokens are parsed here so a malformed record fails the
    /// load instead of surfacing mid-simulation.
    pub fn from_json(json: &str) -> Result<Self, ChemistryError> {
        let dataset: Dataset = serde_json::from_str(json)?;
        let elements = dataset
            .elements
            .into_iter()
            .map(ElementRecord::from_raw)
            .collect::<Result<Vec<_>, _>>()?;

        log::debug!("Loaded periodic table with {} elements", elements.len());
        Ok(Self { elements })
    }

    /// Exact, case-sensitive name lookup. The first matching record wins.
    pub fn find(&self, name: &str) -> Result<&ElementRecord, ChemistryError> {
        self.elements
            .iter()
            .find(|e| e.name == name)
            .ok_or_else(|| ChemistryError::ElementNotFound {
                name: name.to_string(),
            })
    }

    pub fn find_by_symbol(&self, symbol: &str) -> Result<&ElementRecord, ChemistryError> {
        self.elements
            .iter()
            .find(|e| e.symbol == symbol)
            .ok_or_else(|| ChemistryError::ElementNotFound {
                name: symbol.to_string(),
            })
    }

    pub fn iter(&self) -> impl Iterator<Item = &ElementRecord> {
        self.elements.iter()
    }

    pub fn len(&self) -> usize {
        self.elements.len()
    }

    pub fn is_empty(&self) -> bool {
        self.elements.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn embedded_table_loads() {
        let table = PeriodicTable::load().expect("embedded dataset should parse");
        assert_eq!(table.len(), 118);
    }

    #[test]
    fn proton_count_is_atomic_number() {
        let table = PeriodicTable::load().unwrap();
        for element in table.iter() {
            assert_eq!(element.proton_count(), element.atomic_number);
        }
    }

    #[test]
    fn neutral_atoms_have_as_many_electrons_as_protons() {
        let table = PeriodicTable::load().unwrap();
        for element in table.iter() {
            assert_eq!(
                element.electron_count(),
                element.atomic_number,
                "{} configuration does not sum to its atomic number",
                element.name
            );
        }
    }

    #[test]
    fn helium_counts() {
        let table = PeriodicTable::load().unwrap();
        let he = table.find("Helium").unwrap();
        assert_eq!(he.proton_count(), 2);
        assert_eq!(he.neutron_count(), 2);
        assert_eq!(he.electron_count(), 2);
    }

    #[test]
    fn uranium_counts() {
        let table = PeriodicTable::load().unwrap();
        let u = table.find("Uranium").unwrap();
        assert_eq!(u.proton_count(), 92);
        assert_eq!(u.neutron_count(), 146);
        assert_eq!(u.electron_count(), 92);
    }

    #[test]
    fn gold_d_subshell_counts_ten() {
        let table = PeriodicTable::load().unwrap();
        let au = table.find_by_symbol("Au").unwrap();
        assert_eq!(au.name, "Gold");
        assert_eq!(au.electron_count(), 79);
    }

    #[test]
    fn unknown_name_is_a_named_error() {
        let table = PeriodicTable::load().unwrap();
        let err = table.find("Unobtainium").unwrap_err();
        assert!(matches!(err, ChemistryError::ElementNotFound { ref name } if name == "Unobtainium"));

        // Lookup is exact
        assert!(table.find("helium").is_err());
    }

    #[test]
    fn first_match_wins() {
        let json = r#"{"elements": [
            {"name": "Twin", "number": 1, "atomic_mass": 1.0, "electron_configuration": "1s1"},
            {"name": "Twin", "number": 2, "atomic_mass": 4.0, "electron_configuration": "1s2"}
        ]}"#;
        let table = PeriodicTable::from_json(json).unwrap();
        assert_eq!(table.find("Twin").unwrap().atomic_number, 1);
    }

    #[test]
    fn negative_neutron_count_is_not_clamped() {
        let json = r#"{"elements": [
            {"name": "Odd", "number": 5, "atomic_mass": 2.4, "electron_configuration": "1s2 2s2 2p1"}
        ]}"#;
        let table = PeriodicTable::from_json(json).unwrap();
        assert_eq!(table.find("Odd").unwrap().neutron_count(), -3);
    }

    #[test]
    fn malformed_configuration_fails_the_load() {
        let json = r#"{"elements": [
            {"name": "Broken", "number": 3, "atomic_mass": 6.9, "electron_configuration": "1s2 2sx"}
        ]}"#;
        let err = PeriodicTable::from_json(json).unwrap_err();
        match err {
            ChemistryError::MalformedToken { element, source } => {
                assert_eq!(element, "Broken");
                assert_eq!(source.token, "2sx");
            }
            other => panic!("unexpected error: {other}"),
        }
    }

    #[test]
    fn zero_atomic_number_is_rejected() {
        let json = r#"{"elements": [
            {"name": "Nothing", "number": 0, "atomic_mass": 0.0, "electron_configuration": ""}
        ]}"#;
        assert!(matches!(
            PeriodicTable::from_json(json),
            Err(ChemistryError::InvalidRecord { .. })
        ));
    }

    #[test]
    fn missing_file_reports_path() {
        let err = PeriodicTable::from_file("/nonexistent/elements.json").unwrap_err();
        assert!(err.to_string().contains("/nonexistent/elements.json"));
    }
}
