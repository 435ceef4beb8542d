//! Fee structure rules for fines, reductions and interest.
//!
//! A charge may carry three independent fee structures. Each one is selected by
//! a numeric `<name>_type` and, depending on the selected variant, needs a paired
//! `<name>_amount` (fixed value) or `<name>_percentage` field:
//!
//! | Structure   | 0    | 1                 | 2                   | 3                  |
//! |-------------|------|-------------------|---------------------|--------------------|
//! | `fine`      | none | value             | percentage          |                    |
//! | `reduction` | none | value             | percentage          |                    |
//! | `interest`  | none | daily value       | daily percentage    | monthly percentage |
//!
//! The three structures share one rule, parameterized by a [`FeeStructure`]
//! descriptor. All error messages are derived from the descriptor.

use rust_decimal::Decimal;
use serde_json::Value;
use std::cmp::Ordering;

use crate::payload::{Payload, is_blank};
use crate::util::NumberLike;

/// What the paired field of a fee variant holds.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FeeKind {
    /// No fee; nothing else is read.
    None,
    /// A fixed amount in `<name>_amount`.
    Value,
    /// A percentage in `<name>_percentage`.
    Percentage,
}

/// One selectable `<name>_type` code.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FeeVariant {
    pub code: u8,
    pub meaning: &'static str,
    pub kind: FeeKind,
}

/// Descriptor of one fee structure: its field prefix and allowed variants.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FeeStructure {
    pub name: &'static str,
    pub variants: &'static [FeeVariant],
}

const fn fee_variant(code: u8, meaning: &'static str, kind: FeeKind) -> FeeVariant {
    FeeVariant {
        code,
        meaning,
        kind,
    }
}

pub const FINE: FeeStructure = FeeStructure {
    name: "fine",
    variants: &[
        fee_variant(0, "none", FeeKind::None),
        fee_variant(1, "value", FeeKind::Value),
        fee_variant(2, "percentage", FeeKind::Percentage),
    ],
};

pub const REDUCTION: FeeStructure = FeeStructure {
    name: "reduction",
    variants: &[
        fee_variant(0, "none", FeeKind::None),
        fee_variant(1, "value", FeeKind::Value),
        fee_variant(2, "percentage", FeeKind::Percentage),
    ],
};

pub const INTEREST: FeeStructure = FeeStructure {
    name: "interest",
    variants: &[
        fee_variant(0, "none", FeeKind::None),
        fee_variant(1, "daily value", FeeKind::Value),
        fee_variant(2, "daily percentage", FeeKind::Percentage),
        fee_variant(3, "monthly percentage", FeeKind::Percentage),
    ],
};

/// All fee structures in the order they are validated.
pub const FEE_STRUCTURES: [FeeStructure; 3] = [FINE, REDUCTION, INTEREST];

/// Reads a `*_type` code. Only JSON numbers with an integral value qualify;
/// strings such as `"1"` are left to the caller to reject.
fn type_code(value: &Value) -> Option<u64> {
    let Value::Number(number) = value else {
        return None;
    };
    if let Some(code) = number.as_u64() {
        return Some(code);
    }
    number
        .as_f64()
        .filter(|f| f.fract() == 0.0 && *f >= 0.0 && *f <= u8::MAX as f64)
        .map(|f| f as u64)
}

fn is_zero(value: &Value) -> bool {
    type_code(value) == Some(0)
}

impl FeeStructure {
    pub fn type_field(&self) -> String {
        format!("{}_type", self.name)
    }

    pub fn amount_field(&self) -> String {
        format!("{}_amount", self.name)
    }

    pub fn percentage_field(&self) -> String {
        format!("{}_percentage", self.name)
    }

    /// Resolves a raw `*_type` value to one of this structure's variants.
    pub fn variant(&self, value: &Value) -> Option<&'static FeeVariant> {
        let code = type_code(value)?;
        self.variants.iter().find(|v| u64::from(v.code) == code)
    }

    /// Runs the rule against `payload`, returning every violation found.
    ///
    /// An absent or zero type yields no errors. An unknown type yields exactly
    /// one error and the paired field is not inspected.
    pub fn check(&self, payload: Payload<'_>) -> Vec<String> {
        let type_field = self.type_field();
        let Some(raw) = payload.field(&type_field) else {
            return Vec::new();
        };
        if is_zero(raw) {
            return Vec::new();
        }
        let Some(selected) = self.variant(raw) else {
            return vec![self.invalid_type_message()];
        };
        match selected.kind {
            FeeKind::None => Vec::new(),
            FeeKind::Value => self.check_amount(payload),
            FeeKind::Percentage => self.check_percentage(payload),
        }
    }

    fn check_amount(&self, payload: Payload<'_>) -> Vec<String> {
        let field = self.amount_field();
        let value = payload.field(&field);
        if is_blank(value) {
            return vec![format!(
                "{field} is required when {} is {}",
                self.type_field(),
                self.codes_of(FeeKind::Value)
            )];
        }
        if number_like(value).cmp_decimal(Decimal::ZERO) != Some(Ordering::Greater) {
            return vec![format!("{field} must be greater than 0")];
        }
        Vec::new()
    }

    fn check_percentage(&self, payload: Payload<'_>) -> Vec<String> {
        let field = self.percentage_field();
        let value = payload.field(&field);
        if is_blank(value) {
            return vec![format!(
                "{field} is required when {} is {}",
                self.type_field(),
                self.codes_of(FeeKind::Percentage)
            )];
        }
        let percentage = number_like(value);
        let above_zero = percentage.cmp_decimal(Decimal::ZERO) == Some(Ordering::Greater);
        let within_hundred = matches!(
            percentage.cmp_decimal(Decimal::ONE_HUNDRED),
            Some(Ordering::Less | Ordering::Equal)
        );
        if !above_zero || !within_hundred {
            return vec![format!("{field} must be between 0 and 100")];
        }
        Vec::new()
    }

    /// `"2"` or `"2 or 3"`.
    fn codes_of(&self, kind: FeeKind) -> String {
        self.variants
            .iter()
            .filter(|v| v.kind == kind)
            .map(|v| v.code.to_string())
            .collect::<Vec<_>>()
            .join(" or ")
    }

    /// `"fine_type must be 0 (none), 1 (value), or 2 (percentage)"`.
    pub fn invalid_type_message(&self) -> String {
        let options: Vec<String> = self
            .variants
            .iter()
            .map(|v| format!("{} ({})", v.code, v.meaning))
            .collect();
        let listed = match options.split_last() {
            Some((last, rest)) if !rest.is_empty() => format!("{}, or {last}", rest.join(", ")),
            Some((last, _)) => last.clone(),
            None => String::new(),
        };
        format!("{} must be {listed}", self.type_field())
    }
}

// Non-numeric values count as zero so they fail the range checks.
fn number_like(value: Option<&Value>) -> NumberLike {
    value
        .and_then(NumberLike::from_value)
        .unwrap_or(NumberLike::Exact(Decimal::ZERO))
}
