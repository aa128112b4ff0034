use serde::Deserialize;

/// Vehicle record as returned by the vehicle-info API.
///
/// `year` and `owner` are optional because the upstream omits them for some
/// registration numbers.
#[derive(Debug, Clone, Deserialize, PartialEq, Eq)]
pub struct VehicleInfo {
    #[serde(rename = "regNum")]
    pub reg_num: String,
    pub mark: String,
    pub model: String,
    #[serde(default)]
    pub year: Option<i32>,
    #[serde(default)]
    pub owner: Option<VehicleOwner>,
}

/// Owner block of a vehicle-info response.
#[derive(Debug, Clone, Deserialize, PartialEq, Eq)]
pub struct VehicleOwner {
    pub name: String,
    pub surname: String,
    #[serde(default)]
    pub patronymic: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn decodes_full_response() {
        let info: VehicleInfo = serde_json::from_str(
            r#"{
                "regNum": "X123XX150",
                "mark": "Lada",
                "model": "Vesta",
                "year": 2002,
                "owner": {"name": "Ivan", "surname": "Ivanov", "patronymic": "Ivanovich"}
            }"#,
        )
        .unwrap();
        assert_eq!(info.reg_num, "X123XX150");
        assert_eq!(info.mark, "Lada");
        assert_eq!(info.year, Some(2002));
        assert_eq!(info.owner.unwrap().surname, "Ivanov");
    }

    #[test]
    fn decodes_response_without_year_and_owner() {
        let info: VehicleInfo =
            serde_json::from_str(r#"{"regNum": "A001AA77", "mark": "Kia", "model": "Rio"}"#)
                .unwrap();
        assert_eq!(info.year, None);
        assert_eq!(info.owner, None);
    }
}
