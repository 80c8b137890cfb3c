use chrono::{DateTime, NaiveDate, Utc};
use database::mongodb::uuid_as_string;
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use uuid::Uuid;
use validator::Validate;

/// Shop employee
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct Employee {
    #[serde(rename = "_id", alias = "id", with = "uuid_as_string")]
    pub id: Uuid,
    pub name: String,
    pub last_name: String,
    pub email: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub phone: Option<String>,
    pub position: String,
    /// Internal staff credential
    pub employee_code: String,
    pub hire_date: NaiveDate,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub birth_date: Option<NaiveDate>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Deserialize, Validate, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct CreateEmployee {
    #[validate(
        length(max = 100),
        custom(
            function = "axum_helpers::validation::not_blank",
            message = "El nombre es obligatorio"
        )
    )]
    pub name: String,
    #[validate(
        length(max = 100),
        custom(
            function = "axum_helpers::validation::not_blank",
            message = "El apellido es obligatorio"
        )
    )]
    pub last_name: String,
    #[validate(email(message = "El email no es válido"))]
    pub email: String,
    #[validate(length(max = 30))]
    pub phone: Option<String>,
    #[validate(custom(
        function = "axum_helpers::validation::not_blank",
        message = "El puesto es obligatorio"
    ))]
    pub position: String,
    #[validate(custom(
        function = "axum_helpers::validation::not_blank",
        message = "El código de empleado es obligatorio"
    ))]
    pub employee_code: String,
    pub hire_date: NaiveDate,
    pub birth_date: Option<NaiveDate>,
}

#[derive(Debug, Clone, Default, Deserialize, Validate, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct UpdateEmployee {
    #[validate(custom(function = "axum_helpers::validation::not_blank"))]
    pub name: Option<String>,
    #[validate(custom(function = "axum_helpers::validation::not_blank"))]
    pub last_name: Option<String>,
    #[validate(email(message = "El email no es válido"))]
    pub email: Option<String>,
    #[validate(length(max = 30))]
    pub phone: Option<String>,
    #[validate(custom(function = "axum_helpers::validation::not_blank"))]
    pub position: Option<String>,
    #[validate(custom(function = "axum_helpers::validation::not_blank"))]
    pub employee_code: Option<String>,
    pub hire_date: Option<NaiveDate>,
    pub birth_date: Option<NaiveDate>,
}

/// Veterinarian
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct Vet {
    #[serde(rename = "_id", alias = "id", with = "uuid_as_string")]
    pub id: Uuid,
    pub name: String,
    pub last_name: String,
    /// Lowercased, unique across vets
    pub email: String,
    /// Unique across vets
    pub tax_id: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub phone: Option<String>,
    /// Professional license credential
    pub license_number: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub specialty: Option<String>,
    pub hire_date: NaiveDate,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Deserialize, Validate, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct CreateVet {
    #[validate(
        length(max = 100),
        custom(
            function = "axum_helpers::validation::not_blank",
            message = "El nombre es obligatorio"
        )
    )]
    pub name: String,
    #[validate(
        length(max = 100),
        custom(
            function = "axum_helpers::validation::not_blank",
            message = "El apellido es obligatorio"
        )
    )]
    pub last_name: String,
    #[validate(email(message = "El email no es válido"))]
    pub email: String,
    #[validate(
        length(max = 20),
        custom(
            function = "axum_helpers::validation::not_blank",
            message = "El identificador fiscal es obligatorio"
        )
    )]
    pub tax_id: String,
    #[validate(length(max = 30))]
    pub phone: Option<String>,
    #[validate(custom(
        function = "axum_helpers::validation::not_blank",
        message = "El número de colegiado es obligatorio"
    ))]
    pub license_number: String,
    #[validate(length(max = 100))]
    pub specialty: Option<String>,
    pub hire_date: NaiveDate,
}

#[derive(Debug, Clone, Default, Deserialize, Validate, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct UpdateVet {
    #[validate(custom(function = "axum_helpers::validation::not_blank"))]
    pub name: Option<String>,
    #[validate(custom(function = "axum_helpers::validation::not_blank"))]
    pub last_name: Option<String>,
    #[validate(email(message = "El email no es válido"))]
    pub email: Option<String>,
    #[validate(
        length(max = 20),
        custom(function = "axum_helpers::validation::not_blank")
    )]
    pub tax_id: Option<String>,
    #[validate(length(max = 30))]
    pub phone: Option<String>,
    #[validate(custom(function = "axum_helpers::validation::not_blank"))]
    pub license_number: Option<String>,
    #[validate(length(max = 100))]
    pub specialty: Option<String>,
    pub hire_date: Option<NaiveDate>,
}

pub fn normalize_email(email: &str) -> String {
    email.trim().to_lowercase()
}

/// Tax ids compare without surrounding whitespace and case
pub fn normalize_tax_id(tax_id: &str) -> String {
    tax_id.trim().to_uppercase()
}

fn non_empty(value: Option<String>) -> Option<String> {
    value
        .map(|v| v.trim().to_string())
        .filter(|v| !v.is_empty())
}

impl Employee {
    pub fn new(input: CreateEmployee) -> Self {
        let now = Utc::now();
        Self {
            id: Uuid::now_v7(),
            name: input.name.trim().to_string(),
            last_name: input.last_name.trim().to_string(),
            email: normalize_email(&input.email),
            phone: non_empty(input.phone),
            position: input.position.trim().to_string(),
            employee_code: input.employee_code.trim().to_string(),
            hire_date: input.hire_date,
            birth_date: input.birth_date,
            created_at: now,
            updated_at: now,
        }
    }

    pub fn apply_update(&mut self, update: UpdateEmployee) {
        if let Some(name) = update.name {
            self.name = name.trim().to_string();
        }
        if let Some(last_name) = update.last_name {
            self.last_name = last_name.trim().to_string();
        }
        if let Some(email) = update.email {
            self.email = normalize_email(&email);
        }
        if update.phone.is_some() {
            self.phone = non_empty(update.phone);
        }
        if let Some(position) = update.position {
            self.position = position.trim().to_string();
        }
        if let Some(code) = update.employee_code {
            self.employee_code = code.trim().to_string();
        }
        if let Some(hire_date) = update.hire_date {
            self.hire_date = hire_date;
        }
        if update.birth_date.is_some() {
            self.birth_date = update.birth_date;
        }
        self.updated_at = Utc::now();
    }
}

impl Vet {
    pub fn new(input: CreateVet) -> Self {
        let now = Utc::now();
        Self {
            id: Uuid::now_v7(),
            name: input.name.trim().to_string(),
            last_name: input.last_name.trim().to_string(),
            email: normalize_email(&input.email),
            tax_id: normalize_tax_id(&input.tax_id),
            phone: non_empty(input.phone),
            license_number: input.license_number.trim().to_string(),
            specialty: non_empty(input.specialty),
            hire_date: input.hire_date,
            created_at: now,
            updated_at: now,
        }
    }

    pub fn apply_update(&mut self, update: UpdateVet) {
        if let Some(name) = update.name {
            self.name = name.trim().to_string();
        }
        if let Some(last_name) = update.last_name {
            self.last_name = last_name.trim().to_string();
        }
        if let Some(email) = update.email {
            self.email = normalize_email(&email);
        }
        if let Some(tax_id) = update.tax_id {
            self.tax_id = normalize_tax_id(&tax_id);
        }
        if update.phone.is_some() {
            self.phone = non_empty(update.phone);
        }
        if let Some(license) = update.license_number {
            self.license_number = license.trim().to_string();
        }
        if update.specialty.is_some() {
            self.specialty = non_empty(update.specialty);
        }
        if let Some(hire_date) = update.hire_date {
            self.hire_date = hire_date;
        }
        self.updated_at = Utc::now();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn vet_input() -> CreateVet {
        CreateVet {
            name: "Ana".to_string(),
            last_name: "Ruiz".to_string(),
            email: "Ana.Ruiz@Vets.com".to_string(),
            tax_id: " 12345678z ".to_string(),
            phone: None,
            license_number: "COL-2231".to_string(),
            specialty: Some("Dermatología".to_string()),
            hire_date: NaiveDate::from_ymd_opt(2021, 3, 1).unwrap(),
        }
    }

    #[test]
    fn test_vet_normalizes_unique_fields() {
        let vet = Vet::new(vet_input());
        assert_eq!(vet.email, "ana.ruiz@vets.com");
        assert_eq!(vet.tax_id, "12345678Z");
    }

    #[test]
    fn test_dates_serialize_as_iso_days() {
        let vet = Vet::new(vet_input());
        let json = serde_json::to_value(&vet).unwrap();
        assert_eq!(json["hireDate"], "2021-03-01");
        assert_eq!(json["taxId"], "12345678Z");
        assert_eq!(json["licenseNumber"], "COL-2231");
    }

    #[test]
    fn test_blank_tax_id_is_rejected() {
        let mut input = vet_input();
        input.tax_id = "  ".to_string();
        assert!(input.validate().is_err());
    }

    #[test]
    fn test_employee_update_is_partial() {
        let mut employee = Employee::new(CreateEmployee {
            name: "Pablo".to_string(),
            last_name: "Sanz".to_string(),
            email: "pablo@bandoggie.com".to_string(),
            phone: None,
            position: "Dependiente".to_string(),
            employee_code: "EMP-001".to_string(),
            hire_date: NaiveDate::from_ymd_opt(2020, 1, 15).unwrap(),
            birth_date: None,
        });

        employee.apply_update(UpdateEmployee {
            position: Some("Encargado".to_string()),
            ..Default::default()
        });

        assert_eq!(employee.position, "Encargado");
        assert_eq!(employee.employee_code, "EMP-001");
    }
}
