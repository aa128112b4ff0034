//! Car-related DTOs for API requests and responses.

use serde::{Deserialize, Serialize};
use validator::Validate;

use crate::models::{Car, CarChangeset, NewPerson, Person};
use crate::repositories::CarFilter;
use crate::services::{BulkAddOutcome, EnrichmentFailure};

// ============================================================================
// Request DTOs
// ============================================================================

/// Optional list filters from the query string.
///
/// An absent or empty value is not applied.
#[derive(Debug, Deserialize, Default)]
pub struct CarFilterParams {
    pub make: Option<String>,
    pub model: Option<String>,
    pub year: Option<i32>,
}

impl CarFilterParams {
    /// Converts the query parameters into a repository filter,
    /// dropping empty strings.
    pub fn into_filter(self) -> CarFilter {
        CarFilter {
            make: self.make.filter(|s| !s.is_empty()),
            model: self.model.filter(|s| !s.is_empty()),
            year: self.year,
        }
    }
}

/// Owner block of a car payload.
#[derive(Debug, Serialize, Deserialize, Validate, Clone, PartialEq, Eq)]
pub struct OwnerDto {
    #[validate(length(min = 1, max = 255, message = "name must be between 1 and 255 characters"))]
    pub name: String,
    #[validate(length(
        min = 1,
        max = 255,
        message = "surname must be between 1 and 255 characters"
    ))]
    pub surname: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub patronymic: Option<String>,
}

/// Request body for updating a car. All fields are optional; absent fields
/// are left untouched.
#[derive(Debug, Deserialize, Validate)]
pub struct UpdateCarRequest {
    #[validate(length(min = 1, max = 255, message = "mark must be between 1 and 255 characters"))]
    pub mark: Option<String>,
    #[validate(length(
        min = 1,
        max = 255,
        message = "model must be between 1 and 255 characters"
    ))]
    pub model: Option<String>,
    #[validate(range(min = 1886, max = 2100, message = "year must be between 1886 and 2100"))]
    pub year: Option<i32>,
    #[validate(nested)]
    pub owner: Option<OwnerDto>,
}

impl UpdateCarRequest {
    /// Converts the request DTO into a changeset plus the owner upsert data.
    pub fn into_changeset(self) -> (CarChangeset, Option<NewPerson>) {
        let changeset = CarChangeset {
            mark: self.mark,
            model: self.model,
            year: self.year,
            owner_id: None,
        };
        let owner = self.owner.map(|owner| NewPerson {
            name: owner.name,
            surname: owner.surname,
            patronymic: owner.patronymic,
        });
        (changeset, owner)
    }
}

/// Request body for bulk-adding cars by registration number.
#[derive(Debug, Deserialize, Validate)]
pub struct AddCarsRequest {
    #[serde(rename = "regNums")]
    #[validate(
        length(min = 1, message = "regNums must not be empty"),
        custom(function = validate_reg_nums)
    )]
    pub reg_nums: Vec<String>,
}

fn validate_reg_nums(reg_nums: &[String]) -> Result<(), validator::ValidationError> {
    for reg_num in reg_nums {
        if reg_num.is_empty() || reg_num.len() > 20 {
            return Err(validator::ValidationError::new("reg_num")
                .with_message("each regNum must be between 1 and 20 characters".into()));
        }
    }
    Ok(())
}

// ============================================================================
// Response DTOs
// ============================================================================

/// Response body for a single car. Fields not yet filled in by enrichment
/// serialize as `null`.
#[derive(Debug, Serialize, PartialEq, Eq)]
pub struct CarResponse {
    #[serde(rename = "regNum")]
    pub reg_num: String,
    pub mark: Option<String>,
    pub model: Option<String>,
    pub year: Option<i32>,
    pub owner: Option<OwnerDto>,
}

impl From<(Car, Option<Person>)> for CarResponse {
    fn from((car, owner): (Car, Option<Person>)) -> Self {
        Self {
            reg_num: car.reg_num,
            mark: car.mark,
            model: car.model,
            year: car.year,
            owner: owner.map(|person| OwnerDto {
                name: person.name,
                surname: person.surname,
                patronymic: person.patronymic,
            }),
        }
    }
}

/// One registration number whose enrichment failed during a bulk add.
#[derive(Debug, Serialize, PartialEq, Eq)]
pub struct EnrichmentFailureResponse {
    #[serde(rename = "regNum")]
    pub reg_num: String,
    pub error: String,
}

impl From<EnrichmentFailure> for EnrichmentFailureResponse {
    fn from(failure: EnrichmentFailure) -> Self {
        Self {
            reg_num: failure.reg_num,
            error: failure.error,
        }
    }
}

/// Response body for a bulk add: every registration number was persisted;
/// `failures` lists those still waiting for enrichment.
#[derive(Debug, Serialize)]
pub struct AddCarsResponse {
    pub cars: Vec<CarResponse>,
    pub failures: Vec<EnrichmentFailureResponse>,
}

impl From<BulkAddOutcome> for AddCarsResponse {
    fn from(outcome: BulkAddOutcome) -> Self {
        Self {
            cars: outcome.cars.into_iter().map(CarResponse::from).collect(),
            failures: outcome
                .failures
                .into_iter()
                .map(EnrichmentFailureResponse::from)
                .collect(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn car_response_uses_camel_case_reg_num() {
        let response = CarResponse {
            reg_num: "X123XX150".to_string(),
            mark: Some("Lada".to_string()),
            model: Some("Vesta".to_string()),
            year: Some(2002),
            owner: Some(OwnerDto {
                name: "Ivan".to_string(),
                surname: "Ivanov".to_string(),
                patronymic: Some("Ivanovich".to_string()),
            }),
        };

        let json = serde_json::to_value(&response).unwrap();
        assert_eq!(json["regNum"], "X123XX150");
        assert_eq!(json["owner"]["patronymic"], "Ivanovich");
    }

    #[test]
    fn bare_row_serializes_nulls() {
        let response = CarResponse {
            reg_num: "A001AA77".to_string(),
            mark: None,
            model: None,
            year: None,
            owner: None,
        };

        let json = serde_json::to_value(&response).unwrap();
        assert!(json["mark"].is_null());
        assert!(json["owner"].is_null());
    }

    #[test]
    fn add_request_decodes_reg_nums_field() {
        let request: AddCarsRequest =
            serde_json::from_str(r#"{"regNums": ["X123XX150", "A001AA77"]}"#).unwrap();
        assert_eq!(request.reg_nums.len(), 2);
        assert!(request.validate().is_ok());
    }

    #[test]
    fn add_request_rejects_empty_batch_and_blank_entries() {
        let request: AddCarsRequest = serde_json::from_str(r#"{"regNums": []}"#).unwrap();
        assert!(request.validate().is_err());

        let request: AddCarsRequest = serde_json::from_str(r#"{"regNums": [""]}"#).unwrap();
        assert!(request.validate().is_err());
    }

    #[test]
    fn update_request_maps_into_changeset_and_owner() {
        let request: UpdateCarRequest = serde_json::from_str(
            r#"{
                "mark": "Ford",
                "model": "Focus",
                "year": 2020,
                "owner": {"name": "Ivan", "surname": "Ivanov"}
            }"#,
        )
        .unwrap();
        assert!(request.validate().is_ok());

        let (changeset, owner) = request.into_changeset();
        assert_eq!(changeset.mark.as_deref(), Some("Ford"));
        assert_eq!(changeset.model.as_deref(), Some("Focus"));
        assert_eq!(changeset.year, Some(2020));
        assert!(changeset.has_changes());

        let owner = owner.unwrap();
        assert_eq!(owner.name, "Ivan");
        assert_eq!(owner.patronymic, None);
    }

    #[test]
    fn update_request_rejects_out_of_range_year() {
        let request: UpdateCarRequest = serde_json::from_str(r#"{"year": 1700}"#).unwrap();
        assert!(request.validate().is_err());
    }

    #[test]
    fn filter_params_drop_empty_strings() {
        let params = CarFilterParams {
            make: Some(String::new()),
            model: Some("Vesta".to_string()),
            year: None,
        };
        let filter = params.into_filter();
        assert_eq!(filter.make, None);
        assert_eq!(filter.model.as_deref(), Some("Vesta"));
    }
}
