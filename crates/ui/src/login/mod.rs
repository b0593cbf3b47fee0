//! Login form controller.

mod credentials;
mod form;

pub use credentials::Credentials;
pub use form::{LoginForm, Redirect};
