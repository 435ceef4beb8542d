//! CPF and CNPJ check-digit validation.
//!
//! Both Brazilian taxpayer numbers end in two check digits computed from the
//! preceding digits with a weighted sum modulo 11. Punctuation is ignored, so
//! `"573.456.585-70"` and `"57345658570"` are the same CPF. Numbers made of a
//! single repeated digit pass the arithmetic but are never issued, and are
//! rejected.
//!
//! # Examples
//!
//! ```
//! use kobana_types::validation::document::{is_cnpj, is_cpf, is_cpf_or_cnpj};
//!
//! assert!(is_cpf("573.456.585-70"));
//! assert!(is_cnpj("85.528.357/8060-99"));
//! assert!(!is_cpf_or_cnpj("12345678900"));
//! ```

use super::helpers::only_digits;

pub const CPF_LENGTH: usize = 11;
pub const CNPJ_LENGTH: usize = 14;

const CNPJ_FIRST_WEIGHTS: [u32; 12] = [5, 4, 3, 2, 9, 8, 7, 6, 5, 4, 3, 2];
const CNPJ_SECOND_WEIGHTS: [u32; 13] = [6, 5, 4, 3, 2, 9, 8, 7, 6, 5, 4, 3, 2];

/// Kind of taxpayer document a number was recognized as.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DocumentKind {
    /// Individual taxpayer (Cadastro de Pessoas Físicas).
    Cpf,
    /// Legal entity (Cadastro Nacional da Pessoa Jurídica).
    Cnpj,
}

impl DocumentKind {
    /// Classifies `document` as a checksum-valid CPF or CNPJ, if it is either.
    pub fn detect(document: &str) -> Option<Self> {
        if is_cpf(document) {
            Some(DocumentKind::Cpf)
        } else if is_cnpj(document) {
            Some(DocumentKind::Cnpj)
        } else {
            None
        }
    }
}

/// `true` iff `document` holds 11 digits with correct CPF check digits.
pub fn is_cpf(document: &str) -> bool {
    let digits = only_digits(document);
    if digits.len() != CPF_LENGTH || all_same(&digits) {
        return false;
    }
    let first = cpf_check_digit(&digits[..9]);
    let second = cpf_check_digit(&digits[..10]);
    digits[9] == first && digits[10] == second
}

/// `true` iff `document` holds 14 digits with correct CNPJ check digits.
pub fn is_cnpj(document: &str) -> bool {
    let digits = only_digits(document);
    if digits.len() != CNPJ_LENGTH || all_same(&digits) {
        return false;
    }
    let first = cnpj_check_digit(&digits[..12], &CNPJ_FIRST_WEIGHTS);
    let second = cnpj_check_digit(&digits[..13], &CNPJ_SECOND_WEIGHTS);
    digits[12] == first && digits[13] == second
}

/// `true` iff `document` is a valid CPF or a valid CNPJ.
pub fn is_cpf_or_cnpj(document: &str) -> bool {
    DocumentKind::detect(document).is_some()
}

fn all_same(digits: &[u32]) -> bool {
    digits.windows(2).all(|pair| pair[0] == pair[1])
}

// Weights run from len+1 down to 2.
fn cpf_check_digit(digits: &[u32]) -> u32 {
    let top = digits.len() as u32 + 1;
    let sum: u32 = digits
        .iter()
        .zip((2..=top).rev())
        .map(|(digit, weight)| digit * weight)
        .sum();
    match (sum * 10) % 11 {
        10 => 0,
        d => d,
    }
}

fn cnpj_check_digit(digits: &[u32], weights: &[u32]) -> u32 {
    let sum: u32 = digits.iter().zip(weights).map(|(d, w)| d * w).sum();
    match sum % 11 {
        r if r < 2 => 0,
        r => 11 - r,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_valid_cpf() {
        assert!(is_cpf("57345658570"));
        assert!(is_cpf("573.456.585-70"));
        assert!(is_cpf("12345678909"));
    }

    #[test]
    fn test_invalid_cpf() {
        assert!(!is_cpf("12345678900"));
        assert!(!is_cpf("57345658571"));
        assert!(!is_cpf("5734565857"));
        assert!(!is_cpf("573456585700"));
        assert!(!is_cpf(""));
        assert!(!is_cpf("abcdefghijk"));
    }

    #[test]
    fn test_repeated_digits_rejected() {
        for d in 0..=9 {
            let cpf = d.to_string().repeat(CPF_LENGTH);
            let cnpj = d.to_string().repeat(CNPJ_LENGTH);
            assert!(!is_cpf(&cpf), "{cpf}");
            assert!(!is_cnpj(&cnpj), "{cnpj}");
        }
    }

    #[test]
    fn test_valid_cnpj() {
        assert!(is_cnpj("85528357806099"));
        assert!(is_cnpj("85.528.357/8060-99"));
        assert!(is_cnpj("11222333000181"));
    }

    #[test]
    fn test_invalid_cnpj() {
        assert!(!is_cnpj("85528357806098"));
        assert!(!is_cnpj("85528357806089"));
        assert!(!is_cnpj("8552835780609"));
        assert!(!is_cnpj("57345658570"));
    }

    #[test]
    fn test_detect_kind() {
        assert_eq!(DocumentKind::detect("57345658570"), Some(DocumentKind::Cpf));
        assert_eq!(DocumentKind::detect("85528357806099"), Some(DocumentKind::Cnpj));
        assert_eq!(DocumentKind::detect("12345678900"), None);
        assert!(is_cpf_or_cnpj("85528357806099"));
    }
}
