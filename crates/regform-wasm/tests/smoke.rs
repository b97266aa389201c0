use wasm_bindgen::JsValue;
use wasm_bindgen_test::*;

use regform_wasm::RegistrationForm;

#[wasm_bindgen_test]
fn cascade_fills_the_pincode() {
    #[cfg(target_arch = "wasm32")]
    regform_wasm::start();

    let mut form = RegistrationForm::new().unwrap();
    assert!(form.countries().iter().any(|c| c == "India"));

    let states = form.select_country("India").unwrap();
    assert!(states.iter().any(|s| s == "Tamil Nadu"));

    form.select_state("Tamil Nadu").unwrap();
    assert_eq!(form.select_city("Chennai").unwrap(), "600001");

    // A new country wipes the lower levels.
    form.select_country("Germany").unwrap();
    assert_eq!(form.select_city("Chennai").unwrap(), "");
}

#[wasm_bindgen_test]
fn validation_comes_back_keyed_by_field() {
    let mut form = RegistrationForm::new().unwrap();
    assert_eq!(form.phase(), "empty");

    form.set_field("fullName", JsValue::from_str("Asha Rao")).unwrap();
    form.set_field("email", JsValue::from_str("not-an-email")).unwrap();
    assert_eq!(form.phase(), "partially-filled");

    let errors = form.validate().unwrap();
    let email = js_sys::Reflect::get(&errors, &JsValue::from_str("email")).unwrap();
    assert_eq!(email.as_string().as_deref(), Some("Invalid email address"));
    let name = js_sys::Reflect::get(&errors, &JsValue::from_str("fullName")).unwrap();
    assert!(name.is_undefined());

    assert!(form.set_field("pincode", JsValue::from_str("1")).is_err());
}

#[wasm_bindgen_test]
fn fractional_age_is_treated_as_missing() {
    let mut form = RegistrationForm::new().unwrap();
    form.set_field("age", JsValue::from_f64(12.5)).unwrap();

    let errors = form.validate().unwrap();
    let age = js_sys::Reflect::get(&errors, &JsValue::from_str("age")).unwrap();
    assert_eq!(age.as_string().as_deref(), Some("Age is required"));
}
