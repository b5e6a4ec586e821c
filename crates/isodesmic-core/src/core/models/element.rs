use phf::{Map, phf_map};
use std::fmt;
use std::str::FromStr;
use thiserror::Error;

static ATOMIC_NUMBERS: Map<&'static str, u8> = phf_map! {
    "H" => 1, "He" => 2,
    "Li" => 3, "Be" => 4, "B" => 5, "C" => 6, "N" => 7, "O" => 8, "F" => 9, "Ne" => 10,
    "Na" => 11, "Mg" => 12, "Al" => 13, "Si" => 14, "P" => 15, "S" => 16, "Cl" => 17, "Ar" => 18,
    "K" => 19, "Ca" => 20, "Sc" => 21, "Ti" => 22, "V" => 23, "Cr" => 24, "Mn" => 25, "Fe" => 26,
    "Co" => 27, "Ni" => 28, "Cu" => 29, "Zn" => 30, "Ga" => 31, "Ge" => 32, "As" => 33, "Se" => 34,
    "Br" => 35, "Kr" => 36,
    "Rb" => 37, "Sr" => 38, "Y" => 39, "Zr" => 40, "Nb" => 41, "Mo" => 42, "Tc" => 43, "Ru" => 44,
    "Rh" => 45, "Pd" => 46, "Ag" => 47, "Cd" => 48, "In" => 49, "Sn" => 50, "Sb" => 51, "Te" => 52,
    "I" => 53, "Xe" => 54,
    "Cs" => 55, "Ba" => 56, "Pt" => 78, "Au" => 79, "Hg" => 80, "Pb" => 82,
};

#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("Invalid or unsupported element symbol: '{0}'")]
pub struct ParseElementError(pub String);

/// A chemical element, identified by its symbol.
///
/// Elements are only constructed from the static symbol table, so two elements
/// compare equal exactly when their symbols do.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Element {
    symbol: &'static str,
    atomic_number: u8,
}

impl Element {
    /// Looks up an element by symbol.
    ///
    /// The lookup normalizes capitalization, so `"cl"`, `"CL"` and `"Cl"` all
    /// resolve to chlorine.
    ///
    /// # Errors
    ///
    /// Returns `ParseElementError` if the symbol is not in the element table.
    pub fn from_symbol(symbol: &str) -> Result<Self, ParseElementError> {
        let trimmed = symbol.trim();
        let mut chars = trimmed.chars();
        let normalized: String = match chars.next() {
            Some(first) => first
                .to_uppercase()
                .chain(chars.flat_map(char::to_lowercase))
                .collect(),
            None => return Err(ParseElementError(symbol.to_string())),
        };

        ATOMIC_NUMBERS
            .get_entry(normalized.as_str())
            .map(|(&symbol, &atomic_number)| Self {
                symbol,
                atomic_number,
            })
            .ok_or_else(|| ParseElementError(symbol.to_string()))
    }

    pub fn symbol(&self) -> &'static str {
        self.symbol
    }

    pub fn atomic_number(&self) -> u8 {
        self.atomic_number
    }
}

impl FromStr for Element {
    type Err = ParseElementError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::from_symbol(s)
    }
}

impl fmt::Display for Element {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.symbol)
    }
}
