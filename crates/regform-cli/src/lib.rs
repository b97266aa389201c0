//! regform-cli
//! ===========
//!
//! Command-line front-end for `regform-core`.
//!
//! This crate primarily provides a binary (`regform`). The small library
//! target exists so the crate has a documentation page.
//!
//! Quick start
//! -----------
//!
//! ```text
//! regform countries
//! regform states India
//! regform cities India "Tamil Nadu"
//! regform register --full-name "Asha Rao" --email asha@example.com \
//!     --dob 2000-06-15 --gender female --address "158, West street" \
//!     --country india --state "tamil nadu" --city chennai
//! regform users
//! regform edit 1 --city Madurai
//! regform delete 1
//! ```
//!
//! Records go to `users.json` in the working directory unless `--store`
//! (or `REGFORM_STORE`) says otherwise: `memory`, `file:<path>`, or, with
//! the `http` feature, an `https://` collection URL.
//!
//! For programmatic access use [`regform-core`] directly.
//!
//! [`regform-core`]: https://docs.rs/regform-core
