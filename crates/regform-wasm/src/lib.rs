//! regform-wasm: WebAssembly bindings for regform-core
//!
//! Drives one registration form from JavaScript. The geography dataset is
//! compiled into the module; every cascade, derivation and validation step
//! runs in Rust and the page only renders what comes back.
//!
//! Quick start (browser)
//! ---------------------
//! ```javascript
//! import init, { RegistrationForm } from 'regform-wasm';
//!
//! async function main() {
//!   await init();
//!   const form = new RegistrationForm();
//!   const states = form.select_country('India');   // ["Tamil Nadu", ...]
//!   const cities = form.select_state('Tamil Nadu'); // [{name, pincode}, ...]
//!   form.select_city('Chennai');                    // "600001"
//!   form.set_field('dob', '2000-06-15');
//!   console.log(form.record().age, form.validate(), form.phase());
//! }
//! main();
//! ```
//!
//! Editing a stored user
//! ---------------------
//! ```javascript
//! const user = await (await fetch(`${API_URL}/${id}`)).json();
//! const form = RegistrationForm.from_record(user);
//! ```
//!
//! Notes
//! -----
//! - Records cross the boundary in the REST wire shape (`fullName`, `dob`,
//!   `pincode`, ...), so fetched users can be passed in unchanged.
//! - Saving is left to the page; `record()` is the body to send.

use chrono::NaiveDate;
use regform_core::prelude::*;
use serde::Serialize;
use serde_wasm_bindgen::Serializer;
use wasm_bindgen::prelude::*;

#[cfg(target_arch = "wasm32")]
#[wasm_bindgen(start)]
pub fn start() {
    console_error_panic_hook::set_once();
    web_sys::console::log_1(&"Initializing regform WASM module...".into());

    match GeographyTree::load() {
        Ok(tree) => {
            let stats = tree.stats();
            web_sys::console::log_1(
                &format!(
                    "✓ Loaded {} countries, {} states, {} cities",
                    stats.countries, stats.states, stats.cities
                )
                .into(),
            );
        }
        Err(e) => web_sys::console::error_1(&format!("geography failed to load: {e}").into()),
    }
}

/* --------------------------------------------------------------------------
   Boundary helpers
-------------------------------------------------------------------------- */

#[derive(Serialize)]
struct CityOption<'a> {
    name: &'a str,
    pincode: &'a str,
}

// Plain objects rather than JS `Map`s, so the page can use `obj.field`.
fn to_js<T: Serialize + ?Sized>(value: &T) -> Result<JsValue, JsError> {
    Ok(value.serialize(&Serializer::json_compatible())?)
}

fn state_names(states: &[State]) -> Vec<String> {
    states.iter().map(|s| s.name().to_owned()).collect()
}

fn city_options(cities: &[City]) -> Result<JsValue, JsError> {
    let options: Vec<_> = cities
        .iter()
        .map(|c| CityOption {
            name: c.name(),
            pincode: c.postal_code(),
        })
        .collect();
    to_js(&options)
}

// `Date` is only reachable inside a JS host; native builds (docs, unit
// tests) fall back to the system clock.
#[cfg(target_arch = "wasm32")]
fn js_today() -> NaiveDate {
    let now = js_sys::Date::new_0();
    NaiveDate::from_ymd_opt(now.get_full_year() as i32, now.get_month() + 1, now.get_date())
        .unwrap_or_else(regform_core::engine::today)
}

#[cfg(not(target_arch = "wasm32"))]
fn js_today() -> NaiveDate {
    regform_core::engine::today()
}

fn text(value: &JsValue) -> String {
    value.as_string().unwrap_or_default()
}

fn age(value: &JsValue) -> Option<u32> {
    match value.as_f64() {
        Some(n) => whole_age(n),
        None => text(value).trim().parse().ok(),
    }
}

// Fractional, negative and out-of-range numbers count as no age at all.
fn whole_age(n: f64) -> Option<u32> {
    if n.is_finite() && n.fract() == 0.0 && (0.0..=f64::from(u32::MAX)).contains(&n) {
        Some(n as u32)
    } else {
        None
    }
}

/* --------------------------------------------------------------------------
   RegistrationForm
-------------------------------------------------------------------------- */

/// One registration form, blank or seeded from a stored user.
#[wasm_bindgen]
pub struct RegistrationForm {
    session: FormSession<'static>,
}

#[wasm_bindgen]
impl RegistrationForm {
    /// A blank form.
    #[wasm_bindgen(constructor)]
    pub fn new() -> Result<RegistrationForm, JsError> {
        let tree = GeographyTree::load()?;
        Ok(Self {
            session: FormSession::with_record(tree, RegistrationRecord::new(), js_today()),
        })
    }

    /// Edit hand-off: seeds the form with a stored user (wire shape, with
    /// `id`). The location is reconciled against the dataset.
    pub fn from_record(value: JsValue) -> Result<RegistrationForm, JsError> {
        let tree = GeographyTree::load()?;
        let record: RegistrationRecord = serde_wasm_bindgen::from_value(value)?;
        Ok(Self {
            session: FormSession::with_record(tree, record, js_today()),
        })
    }

    pub fn countries(&self) -> Vec<String> {
        self.session
            .countries()
            .iter()
            .map(|c| c.name().to_owned())
            .collect()
    }

    /// States of the selected country.
    pub fn states(&self) -> Vec<String> {
        state_names(self.session.states())
    }

    /// Cities of the selected state, as `[{name, pincode}]`.
    pub fn cities(&self) -> Result<JsValue, JsError> {
        city_options(self.session.cities())
    }

    /// Sets the country, clears state/city/pincode, returns the new states.
    pub fn select_country(&mut self, name: &str) -> Result<Vec<String>, JsError> {
        let snapshot = self.session.apply(FieldChange::Country(name.to_owned()))?;
        Ok(state_names(snapshot.states))
    }

    /// Sets the state, clears city/pincode, returns the new cities.
    pub fn select_state(&mut self, name: &str) -> Result<JsValue, JsError> {
        let snapshot = self.session.apply(FieldChange::State(name.to_owned()))?;
        city_options(snapshot.cities)
    }

    /// Sets the city and returns its pincode (empty on a miss).
    pub fn select_city(&mut self, name: &str) -> Result<String, JsError> {
        let snapshot = self.session.apply(FieldChange::City(name.to_owned()))?;
        Ok(snapshot.record.postal_code.clone())
    }

    /// Generic change handler keyed by wire name (`fullName`, `dob`, ...).
    ///
    /// `pincode` cannot be set; it follows the city.
    pub fn set_field(&mut self, name: &str, value: JsValue) -> Result<(), JsError> {
        let field: Field = name.parse().map_err(|e: String| JsError::new(&e))?;
        let change = match field {
            Field::FullName => FieldChange::FullName(text(&value)),
            Field::Email => FieldChange::Email(text(&value)),
            Field::Age => FieldChange::Age(age(&value)),
            Field::DateOfBirth => FieldChange::DateOfBirth(text(&value)),
            Field::Gender => {
                let raw = text(&value);
                if raw.trim().is_empty() {
                    FieldChange::Gender(None)
                } else {
                    FieldChange::Gender(Some(raw.parse()?))
                }
            }
            Field::Address => FieldChange::Address(text(&value)),
            Field::Country => FieldChange::Country(text(&value)),
            Field::State => FieldChange::State(text(&value)),
            Field::City => FieldChange::City(text(&value)),
            Field::PostalCode => {
                return Err(JsError::new("pincode is derived from the selected city"))
            }
        };
        self.session.apply(change)?;
        Ok(())
    }

    /// The current record in wire shape.
    pub fn record(&self) -> Result<JsValue, JsError> {
        to_js(self.session.record())
    }

    /// `{field: message}` for every failing field; `{}` when valid.
    pub fn validate(&self) -> Result<JsValue, JsError> {
        to_js(&self.session.validate())
    }

    /// `empty`, `partially-filled`, `valid` or `submitted`.
    pub fn phase(&self) -> String {
        self.session.phase().as_str().to_owned()
    }

    /// `true` when seeded from a stored user.
    pub fn is_edit(&self) -> bool {
        self.session.is_edit()
    }
}
