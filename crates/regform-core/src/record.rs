// crates/regform-core/src/record.rs
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// A single registration, as the form edits it and as every store persists it.
///
/// The serialized keys match the REST endpoint the form talks to, so a record
/// fetched from `listAll` can seed an edit session unchanged.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RegistrationRecord {
    #[serde(default)]
    pub full_name: String,
    #[serde(default)]
    pub email: String,
    /// Derived from `date_of_birth` whenever that parses.
    #[serde(default, deserialize_with = "age_from_wire")]
    pub age: Option<u32>,
    /// ISO date, `YYYY-MM-DD`, exactly as a date input produces it.
    #[serde(default, rename = "dob")]
    pub date_of_birth: String,
    #[serde(default, deserialize_with = "gender_from_wire")]
    pub gender: Option<Gender>,
    #[serde(default)]
    pub address: String,
    #[serde(default)]
    pub country: String,
    #[serde(default)]
    pub state: String,
    #[serde(default)]
    pub city: String,
    #[serde(default, rename = "pincode")]
    pub postal_code: String,
    #[serde(
        default,
        skip_serializing_if = "Option::is_none",
        deserialize_with = "id_from_wire"
    )]
    pub id: Option<String>,
}

impl RegistrationRecord {
    pub fn new() -> Self {
        Self::default()
    }

    /// The location fields, top-down.
    pub fn location(&self) -> (&str, &str, &str) {
        (&self.country, &self.state, &self.city)
    }

    /// `address, city, country`, the way the user listing shows it.
    pub fn display_address(&self) -> String {
        [&self.address, &self.city, &self.country]
            .iter()
            .map(|s| s.trim())
            .filter(|s| !s.is_empty())
            .collect::<Vec<_>>()
            .join(", ")
    }

    /// Birth date as `DD-MM-YYYY`, or the raw value when it does not parse.
    pub fn display_date_of_birth(&self) -> String {
        chrono::NaiveDate::parse_from_str(self.date_of_birth.trim(), crate::engine::DATE_FORMAT)
            .map(|d| d.format("%d-%m-%Y").to_string())
            .unwrap_or_else(|_| self.date_of_birth.clone())
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Gender {
    Male,
    Female,
}

impl Gender {
    pub const ALL: [Gender; 2] = [Gender::Male, Gender::Female];

    pub fn as_str(self) -> &'static str {
        match self {
            Gender::Male => "Male",
            Gender::Female => "Female",
        }
    }
}

impl fmt::Display for Gender {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("unknown gender '{0}', expected Male or Female")]
pub struct UnknownGender(pub String);

impl FromStr for Gender {
    type Err = UnknownGender;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let s = s.trim();
        Gender::ALL
            .into_iter()
            .find(|g| g.as_str().eq_ignore_ascii_case(s))
            .ok_or_else(|| UnknownGender(s.to_owned()))
    }
}

/// The form's fields. The string form is the wire key, which is also the key
/// of every validation error.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum Field {
    #[serde(rename = "fullName")]
    FullName,
    #[serde(rename = "email")]
    Email,
    #[serde(rename = "age")]
    Age,
    #[serde(rename = "dob")]
    DateOfBirth,
    #[serde(rename = "gender")]
    Gender,
    #[serde(rename = "address")]
    Address,
    #[serde(rename = "country")]
    Country,
    #[serde(rename = "state")]
    State,
    #[serde(rename = "city")]
    City,
    #[serde(rename = "pincode")]
    PostalCode,
}

impl Field {
    /// In form order.
    pub const ALL: [Field; 10] = [
        Field::FullName,
        Field::Email,
        Field::Age,
        Field::DateOfBirth,
        Field::Gender,
        Field::Address,
        Field::Country,
        Field::State,
        Field::City,
        Field::PostalCode,
    ];

    pub fn as_str(self) -> &'static str {
        match self {
            Field::FullName => "fullName",
            Field::Email => "email",
            Field::Age => "age",
            Field::DateOfBirth => "dob",
            Field::Gender => "gender",
            Field::Address => "address",
            Field::Country => "country",
            Field::State => "state",
            Field::City => "city",
            Field::PostalCode => "pincode",
        }
    }
}

impl fmt::Display for Field {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Field {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Field::ALL
            .into_iter()
            .find(|f| f.as_str() == s)
            .ok_or_else(|| format!("unknown field '{s}'"))
    }
}

// Stored records come back with `age` as a number, a numeric string, or "".
fn age_from_wire<'de, D>(de: D) -> Result<Option<u32>, D::Error>
where
    D: serde::Deserializer<'de>,
{
    #[derive(Deserialize)]
    #[serde(untagged)]
    enum Wire {
        Number(u32),
        Text(String),
    }

    Ok(match Option::<Wire>::deserialize(de)? {
        Some(Wire::Number(n)) => Some(n),
        Some(Wire::Text(s)) => s.trim().parse().ok(),
        None => None,
    })
}

fn id_from_wire<'de, D>(de: D) -> Result<Option<String>, D::Error>
where
    D: serde::Deserializer<'de>,
{
    #[derive(Deserialize)]
    #[serde(untagged)]
    enum Wire {
        Number(u64),
        Text(String),
    }

    Ok(match Option::<Wire>::deserialize(de)? {
        Some(Wire::Number(n)) => Some(n.to_string()),
        Some(Wire::Text(s)) if !s.trim().is_empty() => Some(s),
        _ => None,
    })
}

// "" means "not chosen yet".
fn gender_from_wire<'de, D>(de: D) -> Result<Option<Gender>, D::Error>
where
    D: serde::Deserializer<'de>,
{
    let raw = Option::<String>::deserialize(de)?;
    Ok(raw.and_then(|s| s.parse().ok()))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn wire_keys_match_the_endpoint() {
        let record = RegistrationRecord {
            full_name: "Asha Rao".into(),
            age: Some(30),
            date_of_birth: "1994-02-01".into(),
            gender: Some(Gender::Female),
            postal_code: "600001".into(),
            ..Default::default()
        };
        let value = serde_json::to_value(&record).unwrap();
        assert_eq!(value["fullName"], "Asha Rao");
        assert_eq!(value["dob"], "1994-02-01");
        assert_eq!(value["pincode"], "600001");
        assert_eq!(value["age"], 30);
        assert_eq!(value["gender"], "Female");
        assert!(value.get("id").is_none());
    }

    #[test]
    fn tolerant_decoding_of_stored_records() {
        let record: RegistrationRecord = serde_json::from_str(
            r#"{"fullName": "Ravi", "age": "41", "gender": "", "id": 7}"#,
        )
        .unwrap();
        assert_eq!(record.age, Some(41));
        assert_eq!(record.gender, None);
        assert_eq!(record.id.as_deref(), Some("7"));
        assert_eq!(record.city, "");
    }

    #[test]
    fn listing_helpers() {
        let record = RegistrationRecord {
            address: "158, West street".into(),
            city: "Chennai".into(),
            country: "India".into(),
            date_of_birth: "2000-06-15".into(),
            ..Default::default()
        };
        assert_eq!(record.display_address(), "158, West street, Chennai, India");
        assert_eq!(record.display_date_of_birth(), "15-06-2000");
    }

    #[test]
    fn field_and_gender_parse() {
        assert_eq!("pincode".parse::<Field>().unwrap(), Field::PostalCode);
        assert_eq!("female".parse::<Gender>().unwrap(), Gender::Female);
        assert!("other".parse::<Gender>().is_err());
    }
}
