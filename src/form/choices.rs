use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use super::FormError;

/// Risk level of the region where the works take place.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum RegionRiesgo {
    #[serde(rename = "ALTA")]
    Alta,
    #[default]
    #[serde(rename = "MEDIA")]
    Media,
    #[serde(rename = "BAJA")]
    Baja,
}

impl RegionRiesgo {
    pub const ALL: [RegionRiesgo; 3] = [Self::Alta, Self::Media, Self::Baja];

    pub fn label(self) -> &'static str {
        match self {
            Self::Alta => "ALTA",
            Self::Media => "MEDIA",
            Self::Baja => "BAJA",
        }
    }
}

impl fmt::Display for RegionRiesgo {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

impl FromStr for RegionRiesgo {
    type Err = FormError;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        let wanted = value.trim();
        Self::ALL
            .into_iter()
            .find(|choice| choice.label().eq_ignore_ascii_case(wanted))
            .ok_or_else(|| FormError::UnknownChoice {
                field: "region_riesgo",
                value: value.to_string(),
            })
    }
}

/// Procurement procedure used to award the contract.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum TipoProceso {
    #[default]
    #[serde(rename = "Licitación")]
    Licitacion,
    #[serde(rename = "Adjudicación Simplificada")]
    AdjudicacionSimplificada,
    #[serde(rename = "Contratación Directa")]
    ContratacionDirecta,
}

impl TipoProceso {
    pub const ALL: [TipoProceso; 3] = [
        Self::Licitacion,
        Self::AdjudicacionSimplificada,
        Self::ContratacionDirecta,
    ];

    pub fn label(self) -> &'static str {
        match self {
            Self::Licitacion => "Licitación",
            Self::AdjudicacionSimplificada => "Adjudicación Simplificada",
            Self::ContratacionDirecta => "Contratación Directa",
        }
    }
}

impl fmt::Display for TipoProceso {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

impl FromStr for TipoProceso {
    type Err = FormError;

    /// Accepts the display label, ignoring case, accents and `_`/`-` separators.
    fn from_str(value: &str) -> Result<Self, Self::Err> {
        let wanted = fold_label(value);
        Self::ALL
            .into_iter()
            .find(|choice| fold_label(choice.label()) == wanted)
            .ok_or_else(|| FormError::UnknownChoice {
                field: "tipo_proceso",
                value: value.to_string(),
            })
    }
}

fn fold_label(value: &str) -> String {
    let mut folded = String::with_capacity(value.len());
    for word in value
        .split(|ch: char| ch.is_whitespace() || ch == '_' || ch == '-')
        .filter(|word| !word.is_empty())
    {
        if !folded.is_empty() {
            folded.push(' ');
        }
        folded.extend(word.chars().flat_map(char::to_lowercase).map(strip_accent));
    }
    folded
}

fn strip_accent(ch: char) -> char {
    match ch {
        'á' | 'à' | 'ä' => 'a',
        'é' | 'è' | 'ë' => 'e',
        'í' | 'ì' | 'ï' => 'i',
        'ó' | 'ò' | 'ö' => 'o',
        'ú' | 'ù' | 'ü' => 'u',
        other => other,
    }
}
