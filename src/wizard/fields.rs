use std::collections::BTreeMap;
use thiserror::Error;

pub const DNI_MAX_DIGITS: usize = 8;
pub const CV_FIELD: &str = "cv";
pub const PLAN_FIELD: &str = "plan";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FieldKind {
    Text,
    Email,
    Tel,
    Dni,
    TextArea,
    Select(&'static [(&'static str, &'static str)]),
    /// A checkbox, optionally wrapped in a labelled `.form-check` group.
    Checkbox { group: Option<&'static str> },
    File,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FieldSpec {
    pub name: &'static str,
    pub label: &'static str,
    pub step: usize,
    pub kind: FieldKind,
    pub required: bool,
}

pub const EXPERIENCE_OPTIONS: &[(&str, &str)] = &[
    ("0-2", "Menos de 2 años"),
    ("3-5", "Entre 3 y 5 años"),
    ("6-10", "Entre 6 y 10 años"),
    ("10+", "Más de 10 años"),
];

pub const SECTOR_OPTIONS: &[(&str, &str)] = &[
    ("tecnologia", "Tecnología"),
    ("finanzas", "Finanzas y banca"),
    ("salud", "Salud"),
    ("educacion", "Educación"),
    ("comercial", "Ventas y marketing"),
    ("otro", "Otro"),
];

pub const PLAN_OPTIONS: &[(&str, &str)] = &[
    ("basico", "Básico"),
    ("profesional", "Profesional"),
    ("premium", "Premium"),
];

pub const STEP_TITLES: &[&str] = &[
    "Datos personales",
    "Perfil profesional",
    "Tu plan",
    "Confirmación",
];

pub const FORM_FIELDS: &[FieldSpec] = &[
    FieldSpec { name: "nombre", label: "Nombre", step: 1, kind: FieldKind::Text, required: true },
    FieldSpec { name: "apellidos", label: "Apellidos", step: 1, kind: FieldKind::Text, required: true },
    FieldSpec { name: "dni", label: "DNI", step: 1, kind: FieldKind::Dni, required: true },
    FieldSpec { name: "email", label: "Correo electrónico", step: 1, kind: FieldKind::Email, required: true },
    FieldSpec { name: "telefono", label: "Teléfono", step: 1, kind: FieldKind::Tel, required: true },
    FieldSpec { name: "puesto", label: "Puesto al que aspiras", step: 2, kind: FieldKind::Text, required: true },
    FieldSpec { name: "experiencia", label: "Años de experiencia", step: 2, kind: FieldKind::Select(EXPERIENCE_OPTIONS), required: true },
    FieldSpec { name: "sector", label: "Sector", step: 2, kind: FieldKind::Select(SECTOR_OPTIONS), required: true },
    FieldSpec { name: "linkedin", label: "Perfil de LinkedIn", step: 2, kind: FieldKind::Text, required: false },
    FieldSpec { name: CV_FIELD, label: "CV (PDF, DOC o DOCX, máx. 5MB)", step: 2, kind: FieldKind::File, required: true },
    FieldSpec { name: PLAN_FIELD, label: "Plan", step: 3, kind: FieldKind::Select(PLAN_OPTIONS), required: true },
    FieldSpec { name: "objetivos", label: "¿Qué quieres mejorar de tu CV?", step: 3, kind: FieldKind::TextArea, required: true },
    FieldSpec { name: "comentarios", label: "Comentarios adicionales", step: 3, kind: FieldKind::TextArea, required: false },
    FieldSpec { name: "terminos", label: "Acepto los términos y condiciones", step: 4, kind: FieldKind::Checkbox { group: Some("terminos-check") }, required: true },
    FieldSpec { name: "privacidad", label: "Acepto la política de privacidad", step: 4, kind: FieldKind::Checkbox { group: Some("privacidad-check") }, required: true },
    FieldSpec { name: "newsletter", label: "Quiero recibir novedades por correo", step: 4, kind: FieldKind::Checkbox { group: None }, required: false },
];

/// Strips everything but ASCII digits and keeps at most eight of them.
pub fn sanitize_dni(raw: &str) -> String {
    raw.chars()
        .filter(|c| c.is_ascii_digit())
        .take(DNI_MAX_DIGITS)
        .collect()
}

pub fn step_count(fields: &[FieldSpec]) -> usize {
    fields.iter().map(|f| f.step).max().unwrap_or(0)
}

pub fn find_field<'a>(fields: &'a [FieldSpec], name: &str) -> Option<&'a FieldSpec> {
    fields.iter().find(|f| f.name == name)
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FieldValue {
    Text(String),
    Checked(bool),
}

/// Current value of every non-file field, keyed by field name.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FormValues(BTreeMap<String, FieldValue>);

impl FormValues {
    pub fn text(&self, name: &str) -> &str {
        match self.0.get(name) {
            Some(FieldValue::Text(value)) => value,
            _ => "",
        }
    }

    pub fn is_checked(&self, name: &str) -> bool {
        matches!(self.0.get(name), Some(FieldValue::Checked(true)))
    }

    pub fn set_text(&mut self, name: &str, value: String) {
        self.0.insert(name.to_string(), FieldValue::Text(value));
    }

    pub fn set_checked(&mut self, name: &str, checked: bool) {
        self.0.insert(name.to_string(), FieldValue::Checked(checked));
    }

    pub fn clear(&mut self) {
        self.0.clear();
    }

    pub fn is_empty(&self) -> bool {
        self.0.values().all(|value| match value {
            FieldValue::Text(text) => text.is_empty(),
            FieldValue::Checked(checked) => !checked,
        })
    }

    /// Value every `<select>` of the schema should show; "" is the
    /// placeholder option.
    pub fn select_values<'a>(&'a self, fields: &[FieldSpec]) -> Vec<(&'static str, &'a str)> {
        fields
            .iter()
            .filter(|field| matches!(field.kind, FieldKind::Select(_)))
            .map(|field| (field.name, self.text(field.name)))
            .collect()
    }

    /// Name/value pairs as they go over the wire, in schema order. Every
    /// text-like field is sent, untouched ones as "". Unchecked boxes are
    /// left out, checked ones are sent as "on". File fields travel separately.
    pub fn entries(&self, fields: &[FieldSpec]) -> Vec<(String, String)> {
        fields
            .iter()
            .filter_map(|field| match field.kind {
                FieldKind::File => None,
                FieldKind::Checkbox { .. } => self
                    .is_checked(field.name)
                    .then(|| (field.name.to_string(), "on".to_string())),
                _ => Some((field.name.to_string(), self.text(field.name).to_string())),
            })
            .collect()
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("Por favor, completa todos los campos obligatorios (*).")]
pub struct ValidationError {
    pub fields: Vec<&'static str>,
}

/// Outcome of checking the required fields of one step.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct StepCheck {
    pub invalid: Vec<&'static str>,
    pub valid: Vec<&'static str>,
    pub validated_groups: Vec<&'static str>,
}

impl StepCheck {
    pub fn into_result(self) -> Result<(), ValidationError> {
        if self.invalid.is_empty() {
            Ok(())
        } else {
            Err(ValidationError { fields: self.invalid })
        }
    }
}

pub fn is_satisfied(field: &FieldSpec, values: &FormValues, has_attachment: bool) -> bool {
    match field.kind {
        FieldKind::Checkbox { .. } => values.is_checked(field.name),
        FieldKind::File => has_attachment,
        _ => !values.text(field.name).trim().is_empty(),
    }
}

pub fn check_step(
    fields: &[FieldSpec],
    step: usize,
    values: &FormValues,
    has_attachment: bool,
) -> StepCheck {
    let mut check = StepCheck::default();
    for field in fields.iter().filter(|f| f.step == step && f.required) {
        if is_satisfied(field, values, has_attachment) {
            check.valid.push(field.name);
        } else {
            check.invalid.push(field.name);
            if let FieldKind::Checkbox { group: Some(group) } = field.kind {
                check.validated_groups.push(group);
            }
        }
    }
    check
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn dni_keeps_digits_only() {
        assert_eq!(sanitize_dni("12a3-45"), "12345");
        assert_eq!(sanitize_dni("abc"), "");
    }

    #[test]
    fn dni_is_truncated_to_eight_digits() {
        assert_eq!(sanitize_dni("1234567890"), "12345678");
        assert_eq!(sanitize_dni("12.345.678-Z"), "12345678");
    }

    #[test]
    fn form_has_four_steps() {
        assert_eq!(step_count(FORM_FIELDS), 4);
        assert_eq!(STEP_TITLES.len(), 4);
    }

    #[test]
    fn whitespace_only_text_is_invalid() {
        let mut values = FormValues::default();
        values.set_text("nombre", "   ".into());
        values.set_text("apellidos", "Pérez".into());
        let check = check_step(FORM_FIELDS, 1, &values, false);
        assert!(check.invalid.contains(&"nombre"));
        assert!(check.valid.contains(&"apellidos"));
    }

    #[test]
    fn optional_fields_are_not_checked() {
        let check = check_step(FORM_FIELDS, 3, &FormValues::default(), false);
        assert_eq!(check.invalid, vec![PLAN_FIELD, "objetivos"]);
    }

    #[test]
    fn unchecked_required_box_marks_its_group() {
        let mut values = FormValues::default();
        values.set_checked("terminos", true);
        let check = check_step(FORM_FIELDS, 4, &values, false);
        assert_eq!(check.invalid, vec!["privacidad"]);
        assert_eq!(check.validated_groups, vec!["privacidad-check"]);
    }

    #[test]
    fn file_field_needs_an_attachment() {
        let mut values = FormValues::default();
        for name in ["puesto", "experiencia", "sector"] {
            values.set_text(name, "x".into());
        }
        let check = check_step(FORM_FIELDS, 2, &values, false);
        assert_eq!(check.invalid, vec![CV_FIELD]);
        assert!(check_step(FORM_FIELDS, 2, &values, true).into_result().is_ok());
    }

    #[test]
    fn select_values_follow_the_stored_values() {
        let mut values = FormValues::default();
        values.set_text("plan", "basico".into());
        assert_eq!(
            values.select_values(FORM_FIELDS),
            vec![("experiencia", ""), ("sector", ""), ("plan", "basico")]
        );

        values.clear();
        assert!(values.select_values(FORM_FIELDS).iter().all(|(_, value)| value.is_empty()));
    }

    #[test]
    fn entries_cover_every_field_but_unchecked_boxes() {
        let fields = &FORM_FIELDS[..2];
        let mut values = FormValues::default();
        values.set_text("nombre", "Ana".into());
        assert_eq!(
            values.entries(fields),
            vec![
                ("nombre".to_string(), "Ana".to_string()),
                ("apellidos".to_string(), String::new()),
            ]
        );

        let mut values = FormValues::default();
        values.set_checked("newsletter", false);
        values.set_checked("terminos", true);
        let names: Vec<String> = values
            .entries(FORM_FIELDS)
            .into_iter()
            .map(|(name, _)| name)
            .collect();
        assert!(names.contains(&"terminos".to_string()));
        assert!(!names.contains(&"newsletter".to_string()));
        assert!(!names.contains(&CV_FIELD.to_string()));
        assert!(names.contains(&"linkedin".to_string()));
    }

    #[test]
    fn cleared_values_are_empty() {
        let mut values = FormValues::default();
        values.set_text("nombre", "Ana".into());
        assert!(!values.is_empty());
        values.clear();
        assert!(values.is_empty());
        assert_eq!(values.text("nombre"), "");
    }
}
