//! Supported currencies.

use std::fmt;
use std::str::FromStr;

/// Currencies accounts may be denominated in.
///
/// The ledger never converts between them: a transfer is only accepted when
/// both accounts use the requested currency.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Currency {
    Usd,
    Cad,
    Nar,
}

impl Currency {
    pub const ALL: [Currency; 3] = [Currency::Usd, Currency::Cad, Currency::Nar];

    pub fn code(self) -> &'static str {
        match self {
            Currency::Usd => "USD",
            Currency::Cad => "CAD",
            Currency::Nar => "NAR",
        }
    }

    pub fn is_supported(code: &str) -> bool {
        code.parse::<Currency>().is_ok()
    }
}

impl FromStr for Currency {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Currency::ALL
            .into_iter()
            .find(|c| c.code() == s)
            .ok_or_else(|| format!("unsupported currency: {s}"))
    }
}

impl fmt::Display for Currency {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.code())
    }
}
