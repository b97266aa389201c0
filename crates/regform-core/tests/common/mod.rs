// crates/regform-core/tests/common/mod.rs
#![allow(dead_code)]

use chrono::NaiveDate;
use regform_core::{Gender, GeographyTree, RegistrationRecord};

pub const FIXTURE: &str = r#"[
  {"country": "India", "states": [
    {"state": "Tamil Nadu", "cities": [
      {"name": "Chennai", "pincode": "600001"},
      {"name": "Madurai", "pincode": "625001"}
    ]},
    {"state": "Kerala", "cities": [
      {"name": "Kochi", "pincode": "682001"}
    ]}
  ]},
  {"country": "Germany", "states": [
    {"state": "Bavaria", "cities": [
      {"name": "München", "pincode": "80331"},
      {"name": "Nürnberg", "pincode": 90402}
    ]}
  ]},
  {"country": "Canada", "states": []}
]"#;

pub fn tree() -> GeographyTree {
    GeographyTree::from_json_str(FIXTURE).expect("fixture parses")
}

pub fn reference_day() -> NaiveDate {
    NaiveDate::from_ymd_opt(2024, 6, 15).expect("valid date")
}

/// A record that passes validation against the fixture.
pub fn complete_record() -> RegistrationRecord {
    RegistrationRecord {
        full_name: "Asha Rao".into(),
        email: "asha@example.com".into(),
        age: Some(24),
        date_of_birth: "2000-06-15".into(),
        gender: Some(Gender::Female),
        address: "158, West street".into(),
        country: "India".into(),
        state: "Tamil Nadu".into(),
        city: "Chennai".into(),
        postal_code: "600001".into(),
        id: None,
    }
}
