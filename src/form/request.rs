use serde::Serialize;

use super::{FormField, PredictionForm, RegionRiesgo, TipoProceso};
use crate::wire::serialize_number;

/// JSON body for `POST /predict`.
///
/// Flags travel as integers 0/1 whatever their form representation.
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct PredictionRequest {
    #[serde(serialize_with = "serialize_number")]
    pub costo_total: f64,
    #[serde(serialize_with = "serialize_number")]
    pub plazo_meses: f64,
    #[serde(serialize_with = "serialize_number")]
    pub adicionales_pct: f64,
    #[serde(serialize_with = "serialize_number")]
    pub ampliaciones: f64,
    #[serde(serialize_with = "serialize_number")]
    pub penalidades: f64,
    pub baja_competencia: u8,
    pub empresa_sancionada: u8,
    pub consorcio: u8,
    pub experiencia_entidad: u8,
    pub region_riesgo: RegionRiesgo,
    pub tipo_proceso: TipoProceso,
}

impl PredictionRequest {
    pub(super) fn from_form(form: &PredictionForm) -> Option<Self> {
        let number = |field| form.numeric_value(field);
        let flag = |field| u8::from(form.flag(field).unwrap_or(false));
        Some(Self {
            costo_total: number(FormField::CostoTotal)?,
            plazo_meses: number(FormField::PlazoMeses)?,
            adicionales_pct: number(FormField::AdicionalesPct)?,
            ampliaciones: number(FormField::Ampliaciones)?,
            penalidades: number(FormField::Penalidades)?,
            baja_competencia: flag(FormField::BajaCompetencia),
            empresa_sancionada: flag(FormField::EmpresaSancionada),
            consorcio: flag(FormField::Consorcio),
            experiencia_entidad: flag(FormField::ExperienciaEntidad),
            region_riesgo: form.region_riesgo(),
            tipo_proceso: form.tipo_proceso(),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::super::FormStateStore;
    use super::*;
    use serde_json::json;

    #[test]
    fn reference_project_coerces_flags_to_integers() {
        let mut store = FormStateStore::new();
        for (name, value) in [
            ("costo_total", "500000"),
            ("plazo_meses", "12"),
            ("adicionales_pct", "5"),
            ("ampliaciones", "1"),
            ("penalidades", "0"),
        ] {
            store.set_from_str(name, value).unwrap();
        }
        store.set(FormField::BajaCompetencia, true).unwrap();
        store.set(FormField::EmpresaSancionada, false).unwrap();
        store.set(FormField::Consorcio, false).unwrap();
        store.set(FormField::ExperienciaEntidad, true).unwrap();
        store.set(FormField::RegionRiesgo, RegionRiesgo::Alta).unwrap();
        store.set(FormField::TipoProceso, TipoProceso::Licitacion).unwrap();
        assert!(store.can_submit());

        let request = store.form().to_request().unwrap();
        let payload = serde_json::to_value(&request).unwrap();
        assert_eq!(
            payload,
            json!({
                "costo_total": 500000,
                "plazo_meses": 12,
                "adicionales_pct": 5,
                "ampliaciones": 1,
                "penalidades": 0,
                "baja_competencia": 1,
                "empresa_sancionada": 0,
                "consorcio": 0,
                "experiencia_entidad": 1,
                "region_riesgo": "ALTA",
                "tipo_proceso": "Licitación"
            })
        );
        assert!(payload["baja_competencia"].is_u64());
    }

    #[test]
    fn fractional_values_stay_fractional() {
        let mut store = FormStateStore::new();
        for field in FormField::NUMERIC {
            store.set(field, "0.25").unwrap();
        }
        let payload = serde_json::to_string(&store.form().to_request().unwrap()).unwrap();
        assert!(payload.contains("\"adicionales_pct\":0.25"));
    }

    #[test]
    fn unsubmittable_form_yields_no_request() {
        let mut store = FormStateStore::new();
        store.set(FormField::CostoTotal, "100").unwrap();
        assert!(store.form().to_request().is_none());
    }
}
