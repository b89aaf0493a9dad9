use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use super::localization::LabelKey;

/// Applicant answers for one rental application.
///
/// Field names match the submission wire format exactly.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct FormRecord {
    pub first_name: String,
    pub last_name: String,
    pub email: String,
    pub phone: String,
    pub current_address: String,
    pub employment_status: String,
    pub monthly_income: String,
    pub desired_move_in_date: String,
    pub number_of_occupants: String,
    pub has_pets: bool,
    pub pet_details: String,
    pub credit_score: String,
    pub additional_notes: String,
}

/// Named fields of [`FormRecord`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FormField {
    FirstName,
    LastName,
    Email,
    Phone,
    CurrentAddress,
    EmploymentStatus,
    MonthlyIncome,
    DesiredMoveInDate,
    NumberOfOccupants,
    HasPets,
    PetDetails,
    CreditScore,
    AdditionalNotes,
}

impl FormField {
    pub const ALL: [FormField; 13] = [
        FormField::FirstName,
        FormField::LastName,
        FormField::Email,
        FormField::Phone,
        FormField::CurrentAddress,
        FormField::EmploymentStatus,
        FormField::MonthlyIncome,
        FormField::DesiredMoveInDate,
        FormField::NumberOfOccupants,
        FormField::HasPets,
        FormField::PetDetails,
        FormField::CreditScore,
        FormField::AdditionalNotes,
    ];

    pub const fn name(self) -> &'static str {
        match self {
            FormField::FirstName => "first_name",
            FormField::LastName => "last_name",
            FormField::Email => "email",
            FormField::Phone => "phone",
            FormField::CurrentAddress => "current_address",
            FormField::EmploymentStatus => "employment_status",
            FormField::MonthlyIncome => "monthly_income",
            FormField::DesiredMoveInDate => "desired_move_in_date",
            FormField::NumberOfOccupants => "number_of_occupants",
            FormField::HasPets => "has_pets",
            FormField::PetDetails => "pet_details",
            FormField::CreditScore => "credit_score",
            FormField::AdditionalNotes => "additional_notes",
        }
    }

    pub fn from_name(name: &str) -> Result<Self, FormError> {
        Self::ALL
            .into_iter()
            .find(|field| field.name() == name)
            .ok_or_else(|| FormError::UnknownField(name.to_string()))
    }

    pub const fn is_required(self) -> bool {
        !matches!(
            self,
            FormField::HasPets
                | FormField::PetDetails
                | FormField::CreditScore
                | FormField::AdditionalNotes
        )
    }
}

/// Value delivered by an input event: checkbox state or free text.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum FieldValue {
    Flag(bool),
    Text(String),
}

impl From<bool> for FieldValue {
    fn from(value: bool) -> Self {
        FieldValue::Flag(value)
    }
}

impl From<&str> for FieldValue {
    fn from(value: &str) -> Self {
        FieldValue::Text(value.to_string())
    }
}

impl From<String> for FieldValue {
    fn from(value: String) -> Self {
        FieldValue::Text(value)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum FormError {
    #[error("unknown form field '{0}'")]
    UnknownField(String),
    #[error("field '{field}' expects a {expected} value")]
    TypeMismatch {
        field: &'static str,
        expected: &'static str,
    },
}

impl FormRecord {
    /// Returns a new snapshot with `field` replaced; `self` is left untouched.
    pub fn with_value(&self, field: FormField, value: FieldValue) -> Result<Self, FormError> {
        let mut next = self.clone();
        match (field, value) {
            (FormField::HasPets, FieldValue::Flag(flag)) => next.has_pets = flag,
            (FormField::HasPets, FieldValue::Text(_)) => {
                return Err(FormError::TypeMismatch {
                    field: field.name(),
                    expected: "boolean",
                })
            }
            (field, FieldValue::Flag(_)) => {
                return Err(FormError::TypeMismatch {
                    field: field.name(),
                    expected: "text",
                })
            }
            (field, FieldValue::Text(text)) => {
                if let Some(slot) = next.text_mut(field) {
                    *slot = text;
                }
            }
        }
        Ok(next)
    }

    pub fn with_address(&self, address: impl Into<String>) -> Self {
        Self {
            current_address: address.into(),
            ..self.clone()
        }
    }

    /// Text content of a field, `None` for the `has_pets` checkbox.
    pub fn text(&self, field: FormField) -> Option<&str> {
        let value = match field {
            FormField::FirstName => &self.first_name,
            FormField::LastName => &self.last_name,
            FormField::Email => &self.email,
            FormField::Phone => &self.phone,
            FormField::CurrentAddress => &self.current_address,
            FormField::EmploymentStatus => &self.employment_status,
            FormField::MonthlyIncome => &self.monthly_income,
            FormField::DesiredMoveInDate => &self.desired_move_in_date,
            FormField::NumberOfOccupants => &self.number_of_occupants,
            FormField::HasPets => return None,
            FormField::PetDetails => &self.pet_details,
            FormField::CreditScore => &self.credit_score,
            FormField::AdditionalNotes => &self.additional_notes,
        };
        Some(value.as_str())
    }

    fn text_mut(&mut self, field: FormField) -> Option<&mut String> {
        let slot = match field {
            FormField::FirstName => &mut self.first_name,
            FormField::LastName => &mut self.last_name,
            FormField::Email => &mut self.email,
            FormField::Phone => &mut self.phone,
            FormField::CurrentAddress => &mut self.current_address,
            FormField::EmploymentStatus => &mut self.employment_status,
            FormField::MonthlyIncome => &mut self.monthly_income,
            FormField::DesiredMoveInDate => &mut self.desired_move_in_date,
            FormField::NumberOfOccupants => &mut self.number_of_occupants,
            FormField::HasPets => return None,
            FormField::PetDetails => &mut self.pet_details,
            FormField::CreditScore => &mut self.credit_score,
            FormField::AdditionalNotes => &mut self.additional_notes,
        };
        Some(slot)
    }

    /// Checks the constraints the input controls enforce before a submit is allowed.
    pub fn check_constraints(&self) -> Result<(), Vec<FieldViolation>> {
        let mut violations = Vec::new();

        for field in FormField::ALL {
            let Some(value) = self.text(field) else {
                continue;
            };

            if value.is_empty() {
                if field.is_required() {
                    violations.push(FieldViolation::new(field, ConstraintKind::Required));
                }
                continue;
            }

            let satisfied = match field {
                FormField::Email => is_email(value),
                FormField::MonthlyIncome => value
                    .trim()
                    .parse::<f64>()
                    .map(f64::is_finite)
                    .unwrap_or(false),
                FormField::NumberOfOccupants => {
                    whole_number(value).is_some_and(|count| count >= 1.0)
                }
                FormField::DesiredMoveInDate => {
                    NaiveDate::parse_from_str(value.trim(), "%Y-%m-%d").is_ok()
                }
                FormField::EmploymentStatus => EmploymentStatus::from_value(value).is_some(),
                FormField::CreditScore => whole_number(value).is_some_and(|score| {
                    (f64::from(CREDIT_SCORE_MIN)..=f64::from(CREDIT_SCORE_MAX)).contains(&score)
                }),
                _ => true,
            };

            if !satisfied {
                violations.push(FieldViolation::new(field, ConstraintKind::for_field(field)));
            }
        }

        if violations.is_empty() {
            Ok(())
        } else {
            Err(violations)
        }
    }
}

pub const CREDIT_SCORE_MIN: u16 = 300;
pub const CREDIT_SCORE_MAX: u16 = 850;

/// Constraint a field failed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum ConstraintKind {
    Required,
    EmailFormat,
    Numeric,
    MinimumOneOccupant,
    CalendarDate,
    EmploymentOption,
    CreditScoreRange,
}

impl ConstraintKind {
    fn for_field(field: FormField) -> Self {
        match field {
            FormField::Email => ConstraintKind::EmailFormat,
            FormField::MonthlyIncome => ConstraintKind::Numeric,
            FormField::NumberOfOccupants => ConstraintKind::MinimumOneOccupant,
            FormField::DesiredMoveInDate => ConstraintKind::CalendarDate,
            FormField::EmploymentStatus => ConstraintKind::EmploymentOption,
            FormField::CreditScore => ConstraintKind::CreditScoreRange,
            _ => ConstraintKind::Required,
        }
    }

    pub const fn message(self) -> &'static str {
        match self {
            ConstraintKind::Required => "please fill out this field",
            ConstraintKind::EmailFormat => "please enter an email address",
            ConstraintKind::Numeric => "please enter a number",
            ConstraintKind::MinimumOneOccupant => "value must be a whole number of at least 1",
            ConstraintKind::CalendarDate => "please enter a date as YYYY-MM-DD",
            ConstraintKind::EmploymentOption => "please select an item in the list",
            ConstraintKind::CreditScoreRange => "value must be between 300 and 850",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FieldViolation {
    pub field: FormField,
    pub constraint: ConstraintKind,
    pub message: &'static str,
}

impl FieldViolation {
    fn new(field: FormField, constraint: ConstraintKind) -> Self {
        Self {
            field,
            constraint,
            message: constraint.message(),
        }
    }
}

/// Options offered by the employment status select.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum EmploymentStatus {
    #[serde(rename = "Full-time")]
    FullTime,
    #[serde(rename = "Part-time")]
    PartTime,
    #[serde(rename = "Self-employed")]
    SelfEmployed,
    Unemployed,
    Retired,
}

impl EmploymentStatus {
    pub const ALL: [EmploymentStatus; 5] = [
        EmploymentStatus::FullTime,
        EmploymentStatus::PartTime,
        EmploymentStatus::SelfEmployed,
        EmploymentStatus::Unemployed,
        EmploymentStatus::Retired,
    ];

    /// Value submitted on the wire.
    pub const fn value(self) -> &'static str {
        match self {
            EmploymentStatus::FullTime => "Full-time",
            EmploymentStatus::PartTime => "Part-time",
            EmploymentStatus::SelfEmployed => "Self-employed",
            EmploymentStatus::Unemployed => "Unemployed",
            EmploymentStatus::Retired => "Retired",
        }
    }

    pub const fn label(self) -> LabelKey {
        match self {
            EmploymentStatus::FullTime => LabelKey::FullTime,
            EmploymentStatus::PartTime => LabelKey::PartTime,
            EmploymentStatus::SelfEmployed => LabelKey::SelfEmployed,
            EmploymentStatus::Unemployed => LabelKey::Unemployed,
            EmploymentStatus::Retired => LabelKey::Retired,
        }
    }

    pub fn from_value(value: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|status| status.value() == value)
    }
}

// Mirrors the browser's valid-email-address production.
fn is_email(value: &str) -> bool {
    const LOCAL_SPECIALS: &str = ".!#$%&'*+/=?^_`{|}~-";

    let Some((local, domain)) = value.split_once('@') else {
        return false;
    };

    let local_ok = !local.is_empty()
        && local
            .chars()
            .all(|c| c.is_ascii_alphanumeric() || LOCAL_SPECIALS.contains(c));

    let domain_ok = !domain.is_empty()
        && domain.split('.').all(|label| {
            !label.is_empty()
                && label.len() <= 63
                && !label.starts_with('-')
                && !label.ends_with('-')
                && label.chars().all(|c| c.is_ascii_alphanumeric() || c == '-')
        });

    local_ok && domain_ok
}

// Number inputs with step 1 accept "2" and "2.0" alike.
fn whole_number(value: &str) -> Option<f64> {
    value
        .trim()
        .parse::<f64>()
        .ok()
        .filter(|number| number.is_finite() && number.fract() == 0.0)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn completed() -> FormRecord {
        FormRecord {
            first_name: "Ada".to_string(),
            last_name: "Lovelace".to_string(),
            email: "ada@example.com".to_string(),
            phone: "555-0100".to_string(),
            current_address: "100 Main St, Springfield".to_string(),
            employment_status: "Full-time".to_string(),
            monthly_income: "5200".to_string(),
            desired_move_in_date: "2026-11-01".to_string(),
            number_of_occupants: "2".to_string(),
            has_pets: false,
            pet_details: String::new(),
            credit_score: String::new(),
            additional_notes: String::new(),
        }
    }

    #[test]
    fn with_value_returns_new_snapshot() {
        let original = FormRecord::default();
        let updated = original
            .with_value(FormField::FirstName, "Ada".into())
            .expect("text field accepts text");

        assert_eq!(updated.first_name, "Ada");
        assert!(original.first_name.is_empty());

        let with_pets = updated
            .with_value(FormField::HasPets, true.into())
            .expect("checkbox accepts flag");
        assert!(with_pets.has_pets);
    }

    #[test]
    fn with_value_rejects_mismatched_types() {
        let form = FormRecord::default();
        assert_eq!(
            form.with_value(FormField::HasPets, "yes".into()),
            Err(FormError::TypeMismatch {
                field: "has_pets",
                expected: "boolean",
            })
        );
        assert!(matches!(
            form.with_value(FormField::Email, true.into()),
            Err(FormError::TypeMismatch { field: "email", .. })
        ));
    }

    #[test]
    fn field_names_round_trip() {
        for field in FormField::ALL {
            assert_eq!(FormField::from_name(field.name()), Ok(field));
        }
        assert_eq!(
            FormField::from_name("ssn"),
            Err(FormError::UnknownField("ssn".to_string()))
        );
    }

    #[test]
    fn serializes_with_wire_field_names() {
        let value = serde_json::to_value(completed()).expect("serializes");
        let object = value.as_object().expect("object");
        assert_eq!(object.len(), 13);
        for field in FormField::ALL {
            assert!(object.contains_key(field.name()), "missing {}", field.name());
        }
        assert_eq!(object["has_pets"], serde_json::Value::Bool(false));
    }

    #[test]
    fn completed_form_satisfies_constraints() {
        assert_eq!(completed().check_constraints(), Ok(()));
    }

    #[test]
    fn empty_form_reports_every_required_field() {
        let violations = FormRecord::default()
            .check_constraints()
            .expect_err("empty form is incomplete");
        let fields: Vec<FormField> = violations.iter().map(|v| v.field).collect();
        assert_eq!(
            fields,
            FormField::ALL
                .into_iter()
                .filter(|field| field.is_required())
                .collect::<Vec<_>>()
        );
        assert!(violations
            .iter()
            .all(|v| v.constraint == ConstraintKind::Required));
    }

    #[test]
    fn format_constraints_match_input_types() {
        let mut form = completed();
        form.email = "ada.example.com".to_string();
        form.monthly_income = "lots".to_string();
        form.number_of_occupants = "0".to_string();
        form.credit_score = "900".to_string();
        form.desired_move_in_date = "11/01/2026".to_string();
        form.employment_status = "Astronaut".to_string();

        let violations = form.check_constraints().expect_err("invalid values");
        let kinds: Vec<ConstraintKind> = violations.iter().map(|v| v.constraint).collect();
        assert_eq!(
            kinds,
            vec![
                ConstraintKind::EmailFormat,
                ConstraintKind::EmploymentOption,
                ConstraintKind::Numeric,
                ConstraintKind::CalendarDate,
                ConstraintKind::MinimumOneOccupant,
                ConstraintKind::CreditScoreRange,
            ]
        );
    }

    #[test]
    fn credit_score_bounds_are_inclusive() {
        let mut form = completed();
        form.credit_score = "300".to_string();
        assert!(form.check_constraints().is_ok());
        form.credit_score = "850".to_string();
        assert!(form.check_constraints().is_ok());
        form.credit_score = "299".to_string();
        assert!(form.check_constraints().is_err());
    }

    #[test]
    fn whole_number_fields_accept_decimal_notation() {
        let mut form = completed();
        form.number_of_occupants = "2.0".to_string();
        form.credit_score = "712.0".to_string();
        assert!(form.check_constraints().is_ok());

        form.number_of_occupants = "2.5".to_string();
        let violations = form.check_constraints().expect_err("fractional occupants");
        assert_eq!(violations.len(), 1);
        assert_eq!(violations[0].constraint, ConstraintKind::MinimumOneOccupant);

        form.number_of_occupants = "3".to_string();
        form.credit_score = "712.5".to_string();
        let violations = form.check_constraints().expect_err("fractional score");
        assert_eq!(violations[0].constraint, ConstraintKind::CreditScoreRange);

        form.credit_score = "NaN".to_string();
        assert!(form.check_constraints().is_err());
    }

    #[test]
    fn email_check_follows_browser_rules() {
        assert!(is_email("tenant+apply@mail.example.org"));
        assert!(is_email("a@localhost"));
        assert!(!is_email("@example.com"));
        assert!(!is_email("tenant@"));
        assert!(!is_email("tenant@-example.com"));
        assert!(!is_email("ten ant@example.com"));
        assert!(!is_email("tenant@example..com"));
    }
}
