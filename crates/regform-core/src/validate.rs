// crates/regform-core/src/validate.rs
use crate::record::{Field, RegistrationRecord};
use crate::text::is_blank;
use once_cell::sync::Lazy;
use regex::Regex;
use serde::{Serialize, Serializer};
use std::collections::BTreeMap;
use std::fmt;

// local@domain.tld: no spaces, one '@', a dot in the domain part with a
// label on both sides.
static EMAIL_RE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^[^\s@]+@[^\s@.]+(\.[^\s@.]+)*\.[A-Za-z]{2,}$")
        .expect("email pattern is a valid regex")
});

/// Per-field validation messages. Empty means the record can be submitted.
///
/// Keys iterate in form order.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ValidationErrors {
    errors: BTreeMap<Field, &'static str>,
}

impl ValidationErrors {
    pub fn is_empty(&self) -> bool {
        self.errors.is_empty()
    }

    pub fn len(&self) -> usize {
        self.errors.len()
    }

    pub fn get(&self, field: Field) -> Option<&'static str> {
        self.errors.get(&field).copied()
    }

    pub fn contains(&self, field: Field) -> bool {
        self.errors.contains_key(&field)
    }

    pub fn fields(&self) -> impl Iterator<Item = Field> + '_ {
        self.errors.keys().copied()
    }

    pub fn iter(&self) -> impl Iterator<Item = (Field, &'static str)> + '_ {
        self.errors.iter().map(|(f, m)| (*f, *m))
    }

    fn insert(&mut self, field: Field, message: &'static str) {
        self.errors.insert(field, message);
    }
}

impl fmt::Display for ValidationErrors {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut first = true;
        for (field, message) in self.iter() {
            if !first {
                f.write_str("; ")?;
            }
            write!(f, "{field}: {message}")?;
            first = false;
        }
        Ok(())
    }
}

/// Serializes as `{"fullName": "Full name is required", ...}`.
impl Serialize for ValidationErrors {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_map(self.iter().map(|(f, m)| (f.as_str(), m)))
    }
}

/// `true` for a `local@domain.tld` shaped address.
pub fn is_valid_email(email: &str) -> bool {
    EMAIL_RE.is_match(email.trim())
}

/// Required-field checks over the whole record.
///
/// Each field is judged on its own value only, so blanking one field of a
/// valid record reports exactly that field.
pub fn validate(record: &RegistrationRecord) -> ValidationErrors {
    let mut errors = ValidationErrors::default();

    if is_blank(&record.full_name) {
        errors.insert(Field::FullName, "Full name is required");
    }

    if is_blank(&record.email) {
        errors.insert(Field::Email, "Email is required");
    } else if !is_valid_email(&record.email) {
        errors.insert(Field::Email, "Invalid email address");
    }

    match record.age {
        None => errors.insert(Field::Age, "Age is required"),
        Some(0) => errors.insert(Field::Age, "Age must be at least 1"),
        Some(_) => {}
    }

    if is_blank(&record.date_of_birth) {
        errors.insert(Field::DateOfBirth, "Date of birth is required");
    }

    if record.gender.is_none() {
        errors.insert(Field::Gender, "Gender is required");
    }

    if is_blank(&record.address) {
        errors.insert(Field::Address, "Address is required");
    }

    let location = [
        (Field::Country, &record.country, "Country is required"),
        (Field::State, &record.state, "State is required"),
        (Field::City, &record.city, "City is required"),
        (Field::PostalCode, &record.postal_code, "Pincode is required"),
    ];
    for (field, value, message) in location {
        if is_blank(value) {
            errors.insert(field, message);
        }
    }

    errors
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::record::Gender;

    fn complete() -> RegistrationRecord {
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

    #[test]
    fn complete_record_is_valid() {
        assert!(validate(&complete()).is_empty());
    }

    #[test]
    fn each_missing_field_is_reported_alone() {
        let blankers: [(Field, fn(&mut RegistrationRecord)); 10] = [
            (Field::FullName, |r| r.full_name = "  ".into()),
            (Field::Email, |r| r.email.clear()),
            (Field::Age, |r| r.age = None),
            (Field::DateOfBirth, |r| r.date_of_birth.clear()),
            (Field::Gender, |r| r.gender = None),
            (Field::Address, |r| r.address.clear()),
            (Field::Country, |r| r.country.clear()),
            (Field::State, |r| r.state.clear()),
            (Field::City, |r| r.city.clear()),
            (Field::PostalCode, |r| r.postal_code.clear()),
        ];

        for (field, blank) in blankers {
            let mut record = complete();
            blank(&mut record);
            let errors = validate(&record);
            assert_eq!(errors.fields().collect::<Vec<_>>(), vec![field], "{field}");
        }
    }

    #[test]
    fn age_zero_is_rejected() {
        let mut record = complete();
        record.age = Some(0);
        assert_eq!(validate(&record).get(Field::Age), Some("Age must be at least 1"));
    }

    #[test]
    fn email_shapes() {
        for ok in ["a@b.co", "first.last+tag@mail.example.org", " x@y.io "] {
            assert!(is_valid_email(ok), "{ok}");
        }
        for bad in ["", "plain", "a@b", "a@.com", "a b@c.com", "a@@b.com", "@b.com", "a@b.c"] {
            assert!(!is_valid_email(bad), "{bad}");
        }
    }

    #[test]
    fn serializes_by_wire_key() {
        let mut record = complete();
        record.postal_code.clear();
        record.email = "nope".into();
        let json = serde_json::to_value(validate(&record)).unwrap();
        assert_eq!(json["pincode"], "Pincode is required");
        assert_eq!(json["email"], "Invalid email address");
    }
}
