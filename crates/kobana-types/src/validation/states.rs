//! Brazilian federative units (UF codes).
//!
//! The registry lists the 26 states and the Federal District under their
//! official two-letter codes. Lookups are case-insensitive so `"sp"` and
//! `"SP"` both resolve to São Paulo.
//!
//! # Examples
//!
//! ```
//! use kobana_types::validation::states::{is_brazilian_state, state_by_code};
//!
//! assert!(is_brazilian_state("rj"));
//! assert!(!is_brazilian_state("XX"));
//! assert_eq!(state_by_code("df").map(|s| s.name), Some("Distrito Federal"));
//! ```

use std::collections::HashMap;
use std::sync::LazyLock;

/// A federative unit with its two-letter code and name.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StateInfo {
    /// Upper-case UF code (e.g., "SP").
    pub code: &'static str,
    /// Human-readable name (e.g., "São Paulo").
    pub name: &'static str,
}

/// All 27 federative units, in the order they are usually listed.
pub static BRAZILIAN_STATES: &[StateInfo] = &[
    StateInfo { code: "AC", name: "Acre" },
    StateInfo { code: "AL", name: "Alagoas" },
    StateInfo { code: "AP", name: "Amapá" },
    StateInfo { code: "AM", name: "Amazonas" },
    StateInfo { code: "BA", name: "Bahia" },
    StateInfo { code: "CE", name: "Ceará" },
    StateInfo { code: "DF", name: "Distrito Federal" },
    StateInfo { code: "ES", name: "Espírito Santo" },
    StateInfo { code: "GO", name: "Goiás" },
    StateInfo { code: "MA", name: "Maranhão" },
    StateInfo { code: "MT", name: "Mato Grosso" },
    StateInfo { code: "MS", name: "Mato Grosso do Sul" },
    StateInfo { code: "MG", name: "Minas Gerais" },
    StateInfo { code: "PA", name: "Pará" },
    StateInfo { code: "PB", name: "Paraíba" },
    StateInfo { code: "PR", name: "Paraná" },
    StateInfo { code: "PE", name: "Pernambuco" },
    StateInfo { code: "PI", name: "Piauí" },
    StateInfo { code: "RJ", name: "Rio de Janeiro" },
    StateInfo { code: "RN", name: "Rio Grande do Norte" },
    StateInfo { code: "RS", name: "Rio Grande do Sul" },
    StateInfo { code: "RO", name: "Rondônia" },
    StateInfo { code: "RR", name: "Roraima" },
    StateInfo { code: "SC", name: "Santa Catarina" },
    StateInfo { code: "SP", name: "São Paulo" },
    StateInfo { code: "SE", name: "Sergipe" },
    StateInfo { code: "TO", name: "Tocantins" },
];

/// Lazy-initialized index from UF code to its [`StateInfo`].
pub static CODE_TO_STATE: LazyLock<HashMap<&'static str, &'static StateInfo>> =
    LazyLock::new(|| BRAZILIAN_STATES.iter().map(|s| (s.code, s)).collect());

/// Looks up a federative unit by code, ignoring letter case.
pub fn state_by_code(code: &str) -> Option<&'static StateInfo> {
    CODE_TO_STATE
        .get(code.to_ascii_uppercase().as_str())
        .copied()
}

/// `true` iff `code` is one of the 27 official UF codes, in any letter case.
pub fn is_brazilian_state(code: &str) -> bool {
    state_by_code(code).is_some()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_registry_has_27_units() {
        assert_eq!(BRAZILIAN_STATES.len(), 27);
        assert_eq!(CODE_TO_STATE.len(), 27);
    }

    #[test]
    fn test_every_listed_code_is_valid() {
        let codes = [
            "AC", "AL", "AP", "AM", "BA", "CE", "DF", "ES", "GO", "MA", "MT", "MS", "MG", "PA",
            "PB", "PR", "PE", "PI", "RJ", "RN", "RS", "RO", "RR", "SC", "SP", "SE", "TO",
        ];
        for code in codes {
            assert!(is_brazilian_state(code), "{code} should be valid");
            assert!(is_brazilian_state(&code.to_lowercase()));
        }
    }

    #[test]
    fn test_invalid_codes() {
        assert!(!is_brazilian_state("XX"));
        assert!(!is_brazilian_state(""));
        assert!(!is_brazilian_state("SPA"));
        assert!(!is_brazilian_state("12"));
        assert!(!is_brazilian_state(" SP"));
    }

    #[test]
    fn test_state_by_code() {
        let sp = state_by_code("Sp").unwrap();
        assert_eq!(sp.code, "SP");
        assert_eq!(sp.name, "São Paulo");
        assert!(state_by_code("ZZ").is_none());
    }
}
