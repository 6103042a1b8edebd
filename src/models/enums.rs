use serde::{Deserialize, Serialize};
use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[error("Invalid value for {field}: {value}")]
pub struct ParseEnumError {
    pub field: String,
    pub value: String,
}

/// Macro to generate enum with as_str + std::str::FromStr pattern.
/// Variant order is declaration order, so derived `Ord` follows it.
macro_rules! str_enum {
    ($(#[$meta:meta])* $name:ident { $($variant:ident => $s:literal),+ $(,)? }) => {
        $(#[$meta])*
        #[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
        pub enum $name {
            $(#[serde(rename = $s)] $variant),+
        }

        impl $name {
            pub fn as_str(&self) -> &'static str {
                match self {
                    $(Self::$variant => $s),+
                }
            }
        }

        impl std::str::FromStr for $name {
            type Err = ParseEnumError;

            fn from_str(s: &str) -> Result<Self, Self::Err> {
                match s {
                    $($s => Ok(Self::$variant)),+,
                    _ => Err(ParseEnumError {
                        field: stringify!($name).into(),
                        value: s.into(),
                    }),
                }
            }
        }

        impl std::fmt::Display for $name {
            fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
                f.write_str(self.as_str())
            }
        }
    };
}

str_enum!(
    /// Coarse urgency bucket. Ordered Low < Medium < Severe.
    Severity {
        Low => "low",
        Medium => "medium",
        Severe => "severe",
    }
);

impl Severity {
    /// Every tier, in ascending urgency.
    pub const ALL: [Severity; 3] = [Severity::Low, Severity::Medium, Severity::Severe];

    /// Upper-case label used in chat replies ("LOW", "MEDIUM", "SEVERE").
    pub fn label(&self) -> &'static str {
        match self {
            Self::Low => "LOW",
            Self::Medium => "MEDIUM",
            Self::Severe => "SEVERE",
        }
    }
}

str_enum!(AppointmentStatus {
    Confirmed => "confirmed",
    Cancelled => "cancelled",
});

str_enum!(
    /// How stage-2 condition names are compared against an utterance.
    MatchStrategy {
        Reference => "reference",
        Symmetric => "symmetric",
    }
);

impl Default for MatchStrategy {
    fn default() -> Self {
        Self::Reference
    }
}
