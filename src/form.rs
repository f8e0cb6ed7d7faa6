//! Editable single-project form and its submit gate.
//!
//! [`FormStateStore::set`] is the only mutation path. The five numeric fields
//! hold raw text exactly as typed; they are parsed only to decide whether the
//! form can be submitted and when the wire request is built.

use std::fmt;
use std::str::FromStr;

use thiserror::Error;

mod choices;
mod request;

pub use choices::{RegionRiesgo, TipoProceso};
pub use request::PredictionRequest;

/// Errors raised when a field update cannot be applied.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum FormError {
    #[error("Unknown form field {0:?}")]
    UnknownField(String),
    #[error("Field {field} does not accept a {given} value")]
    KindMismatch {
        field: &'static str,
        given: &'static str,
    },
    #[error("Invalid value {value:?} for {field}")]
    UnknownChoice { field: &'static str, value: String },
}

/// Every editable field, named after its wire key.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum FormField {
    CostoTotal,
    PlazoMeses,
    AdicionalesPct,
    Ampliaciones,
    Penalidades,
    BajaCompetencia,
    EmpresaSancionada,
    Consorcio,
    ExperienciaEntidad,
    RegionRiesgo,
    TipoProceso,
}

impl FormField {
    /// Fields that must parse as finite numbers before submitting.
    pub const NUMERIC: [FormField; 5] = [
        Self::CostoTotal,
        Self::PlazoMeses,
        Self::AdicionalesPct,
        Self::Ampliaciones,
        Self::Penalidades,
    ];

    pub const FLAGS: [FormField; 4] = [
        Self::BajaCompetencia,
        Self::EmpresaSancionada,
        Self::Consorcio,
        Self::ExperienciaEntidad,
    ];

    pub const ALL: [FormField; 11] = [
        Self::CostoTotal,
        Self::PlazoMeses,
        Self::AdicionalesPct,
        Self::Ampliaciones,
        Self::Penalidades,
        Self::BajaCompetencia,
        Self::EmpresaSancionada,
        Self::Consorcio,
        Self::ExperienciaEntidad,
        Self::RegionRiesgo,
        Self::TipoProceso,
    ];

    pub fn wire_name(self) -> &'static str {
        match self {
            Self::CostoTotal => "costo_total",
            Self::PlazoMeses => "plazo_meses",
            Self::AdicionalesPct => "adicionales_pct",
            Self::Ampliaciones => "ampliaciones",
            Self::Penalidades => "penalidades",
            Self::BajaCompetencia => "baja_competencia",
            Self::EmpresaSancionada => "empresa_sancionada",
            Self::Consorcio => "consorcio",
            Self::ExperienciaEntidad => "experiencia_entidad",
            Self::RegionRiesgo => "region_riesgo",
            Self::TipoProceso => "tipo_proceso",
        }
    }

    pub fn is_numeric(self) -> bool {
        Self::NUMERIC.contains(&self)
    }

    pub fn is_flag(self) -> bool {
        Self::FLAGS.contains(&self)
    }
}

impl fmt::Display for FormField {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.wire_name())
    }
}

impl FromStr for FormField {
    type Err = FormError;

    fn from_str(name: &str) -> Result<Self, Self::Err> {
        let wanted = name.trim().replace('-', "_");
        Self::ALL
            .into_iter()
            .find(|field| field.wire_name().eq_ignore_ascii_case(&wanted))
            .ok_or_else(|| FormError::UnknownField(name.to_string()))
    }
}

/// A value for one field, as produced by an input widget.
#[derive(Clone, Debug, PartialEq)]
pub enum FieldValue {
    /// Clears a numeric field back to the unset marker.
    Unset,
    Text(String),
    Flag(bool),
    Region(RegionRiesgo),
    Proceso(TipoProceso),
}

impl FieldValue {
    fn kind(&self) -> &'static str {
        match self {
            Self::Unset => "unset",
            Self::Text(_) => "text",
            Self::Flag(_) => "flag",
            Self::Region(_) => "region",
            Self::Proceso(_) => "process type",
        }
    }
}

impl From<&str> for FieldValue {
    fn from(value: &str) -> Self {
        Self::Text(value.to_string())
    }
}

impl From<String> for FieldValue {
    fn from(value: String) -> Self {
        Self::Text(value)
    }
}

impl From<bool> for FieldValue {
    fn from(value: bool) -> Self {
        Self::Flag(value)
    }
}

impl From<RegionRiesgo> for FieldValue {
    fn from(value: RegionRiesgo) -> Self {
        Self::Region(value)
    }
}

impl From<TipoProceso> for FieldValue {
    fn from(value: TipoProceso) -> Self {
        Self::Proceso(value)
    }
}

/// The single-project record.
///
/// Defaults mirror a fresh form: numbers unset, flags off, `MEDIA` region,
/// `Licitación` process.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct PredictionForm {
    costo_total: Option<String>,
    plazo_meses: Option<String>,
    adicionales_pct: Option<String>,
    ampliaciones: Option<String>,
    penalidades: Option<String>,
    baja_competencia: bool,
    empresa_sancionada: bool,
    consorcio: bool,
    experiencia_entidad: bool,
    region_riesgo: RegionRiesgo,
    tipo_proceso: TipoProceso,
}

impl PredictionForm {
    /// Raw text of a numeric field; `None` for unset or non-numeric fields.
    pub fn numeric_text(&self, field: FormField) -> Option<&str> {
        match field {
            FormField::CostoTotal => self.costo_total.as_deref(),
            FormField::PlazoMeses => self.plazo_meses.as_deref(),
            FormField::AdicionalesPct => self.adicionales_pct.as_deref(),
            FormField::Ampliaciones => self.ampliaciones.as_deref(),
            FormField::Penalidades => self.penalidades.as_deref(),
            _ => None,
        }
    }

    /// Parsed value of a numeric field when it holds a finite number.
    pub fn numeric_value(&self, field: FormField) -> Option<f64> {
        self.numeric_text(field).and_then(parse_finite)
    }

    pub fn flag(&self, field: FormField) -> Option<bool> {
        match field {
            FormField::BajaCompetencia => Some(self.baja_competencia),
            FormField::EmpresaSancionada => Some(self.empresa_sancionada),
            FormField::Consorcio => Some(self.consorcio),
            FormField::ExperienciaEntidad => Some(self.experiencia_entidad),
            _ => None,
        }
    }

    pub fn region_riesgo(&self) -> RegionRiesgo {
        self.region_riesgo
    }

    pub fn tipo_proceso(&self) -> TipoProceso {
        self.tipo_proceso
    }

    /// True iff every numeric field is set and parses to a finite number.
    pub fn can_submit(&self) -> bool {
        FormField::NUMERIC
            .iter()
            .all(|field| self.numeric_value(*field).is_some())
    }

    /// Numeric fields currently blocking submission, in form order.
    pub fn invalid_fields(&self) -> Vec<FormField> {
        FormField::NUMERIC
            .into_iter()
            .filter(|field| self.numeric_value(*field).is_none())
            .collect()
    }

    /// Build the wire request; `None` while the form cannot be submitted.
    pub fn to_request(&self) -> Option<PredictionRequest> {
        PredictionRequest::from_form(self)
    }

    fn numeric_slot(&mut self, field: FormField) -> Option<&mut Option<String>> {
        match field {
            FormField::CostoTotal => Some(&mut self.costo_total),
            FormField::PlazoMeses => Some(&mut self.plazo_meses),
            FormField::AdicionalesPct => Some(&mut self.adicionales_pct),
            FormField::Ampliaciones => Some(&mut self.ampliaciones),
            FormField::Penalidades => Some(&mut self.penalidades),
            _ => None,
        }
    }

    fn flag_slot(&mut self, field: FormField) -> Option<&mut bool> {
        match field {
            FormField::BajaCompetencia => Some(&mut self.baja_competencia),
            FormField::EmpresaSancionada => Some(&mut self.empresa_sancionada),
            FormField::Consorcio => Some(&mut self.consorcio),
            FormField::ExperienciaEntidad => Some(&mut self.experiencia_entidad),
            _ => None,
        }
    }

    fn apply(&mut self, field: FormField, value: FieldValue) -> Result<(), FormError> {
        let mismatch = |value: &FieldValue| FormError::KindMismatch {
            field: field.wire_name(),
            given: value.kind(),
        };
        match value {
            FieldValue::Unset | FieldValue::Text(_) if field.is_numeric() => {
                if let Some(slot) = self.numeric_slot(field) {
                    *slot = match value {
                        FieldValue::Text(text) => Some(text),
                        _ => None,
                    };
                }
                Ok(())
            }
            FieldValue::Flag(on) if field.is_flag() => {
                if let Some(slot) = self.flag_slot(field) {
                    *slot = on;
                }
                Ok(())
            }
            FieldValue::Region(region) if field == FormField::RegionRiesgo => {
                self.region_riesgo = region;
                Ok(())
            }
            FieldValue::Proceso(tipo) if field == FormField::TipoProceso => {
                self.tipo_proceso = tipo;
                Ok(())
            }
            other => Err(mismatch(&other)),
        }
    }
}

/// Parses the way a number input reports its value: surrounding whitespace is
/// ignored, empty text is not a number, and only finite values count.
fn parse_finite(text: &str) -> Option<f64> {
    let trimmed = text.trim();
    if trimmed.is_empty() {
        return None;
    }
    trimmed.parse::<f64>().ok().filter(|value| value.is_finite())
}

fn parse_flag(text: &str) -> Option<bool> {
    match text.trim().to_ascii_lowercase().as_str() {
        "1" | "true" | "si" | "sí" | "yes" | "on" => Some(true),
        "0" | "false" | "no" | "off" => Some(false),
        _ => None,
    }
}

/// Holds the current form and is the only way to change it.
#[derive(Clone, Debug, Default)]
pub struct FormStateStore {
    form: PredictionForm,
}

impl FormStateStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn form(&self) -> &PredictionForm {
        &self.form
    }

    /// Replace one field, leaving every other field untouched.
    pub fn set(&mut self, field: FormField, value: impl Into<FieldValue>) -> Result<(), FormError> {
        self.form.apply(field, value.into())
    }

    /// Set a field from its wire name and textual value.
    ///
    /// Flags take `0/1/true/false`; enums take their labels.
    pub fn set_from_str(&mut self, name: &str, text: &str) -> Result<(), FormError> {
        let field: FormField = name.parse()?;
        let value = if field.is_numeric() {
            FieldValue::Text(text.to_string())
        } else if field.is_flag() {
            let on = parse_flag(text).ok_or_else(|| FormError::UnknownChoice {
                field: field.wire_name(),
                value: text.to_string(),
            })?;
            FieldValue::Flag(on)
        } else if field == FormField::RegionRiesgo {
            FieldValue::Region(text.parse()?)
        } else {
            FieldValue::Proceso(text.parse()?)
        };
        self.set(field, value)
    }

    /// Restore the default record.
    pub fn reset(&mut self) {
        self.form = PredictionForm::default();
    }

    pub fn can_submit(&self) -> bool {
        self.form.can_submit()
    }
}
