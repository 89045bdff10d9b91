//! Closed vocabularies shared by catalog items and shopper preferences.
//!
//! Every vocabulary parses case-insensitively from its wire label and
//! serializes back to the same lowercase label. Unknown labels are a parse
//! error here; callers decide whether that means "absent" or "reject".

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Returned when a label is not part of a vocabulary
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("unknown {vocabulary} label '{label}'")]
pub struct UnknownLabel {
    pub vocabulary: &'static str,
    pub label: String,
}

macro_rules! vocabulary {
    (
        $(#[$meta:meta])*
        $name:ident ($vocab:literal) {
            $($variant:ident => $label:literal),+ $(,)?
        }
    ) => {
        $(#[$meta])*
        #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
        pub enum $name {
            $(
                #[serde(rename = $label)]
                $variant,
            )+
        }

        impl $name {
            /// Every member, in declaration order
            pub const ALL: &'static [$name] = &[$($name::$variant),+];

            pub fn as_str(&self) -> &'static str {
                match self {
                    $($name::$variant => $label,)+
                }
            }

            /// Parse a label, returning `None` for anything outside the vocabulary
            pub fn parse_lenient(label: &str) -> Option<Self> {
                label.parse().ok()
            }
        }

        impl FromStr for $name {
            type Err = UnknownLabel;

            fn from_str(s: &str) -> Result<Self, Self::Err> {
                let needle = s.trim();
                $name::ALL
                    .iter()
                    .find(|v| v.as_str().eq_ignore_ascii_case(needle))
                    .copied()
                    .ok_or_else(|| UnknownLabel {
                        vocabulary: $vocab,
                        label: s.to_string(),
                    })
            }
        }

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.write_str(self.as_str())
            }
        }
    };
}

vocabulary! {
    /// Coarse color groups used both as catalog attributes and as a
    /// preference dimension.
    ColorLabel ("color") {
        Black => "black",
        White => "white",
        Gray => "gray",
        Red => "red",
        Orange => "orange",
        Green => "green",
        Teal => "teal",
        Blue => "blue",
        Purple => "purple",
        Neutral => "neutral",
        Gold => "gold",
        Silver => "silver",
        Pink => "pink",
        Yellow => "yellow",
    }
}

/// Bumped whenever [`ColorLabel`] gains or loses a member
pub const COLOR_VOCABULARY_VERSION: u32 = 1;

vocabulary! {
    Occasion ("occasion") {
        Daily => "daily",
        Office => "office",
        Party => "party",
        Wedding => "wedding",
        Festival => "festival",
    }
}

vocabulary! {
    Style ("style") {
        Traditional => "traditional",
        Modern => "modern",
        Fusion => "fusion",
        Minimalist => "minimalist",
    }
}

vocabulary! {
    Category ("category") {
        Necklace => "necklace",
        Earrings => "earrings",
        Bracelet => "bracelet",
        Ring => "ring",
        Anklet => "anklet",
        Set => "set",
    }
}

vocabulary! {
    Material ("material") {
        Gold => "gold",
        Silver => "silver",
        Platinum => "platinum",
        Diamond => "diamond",
        Pearl => "pearl",
        Gemstone => "gemstone",
        Artificial => "artificial",
        Kundan => "kundan",
        Meenakari => "meenakari",
        Polki => "polki",
        Jadau => "jadau",
        Brass => "brass",
        Copper => "copper",
        Ruby => "ruby",
        Emerald => "emerald",
        Sapphire => "sapphire",
        WhiteGold => "white-gold",
        RoseGold => "rose-gold",
        AntiqueGold => "antique-gold",
    }
}

vocabulary! {
    Gender ("gender") {
        Men => "men",
        Women => "women",
        Unisex => "unisex",
    }
}

impl Gender {
    /// `men` and `women` narrow a search; `unisex` does not
    pub fn is_binary(&self) -> bool {
        matches!(self, Gender::Men | Gender::Women)
    }
}
