//! Front-end controllers for the admin console: the conversation transcript
//! view and the login form.

pub mod login;
pub mod transcript;

pub use login::{Credentials, LoginForm, Redirect};
pub use transcript::{ConversationView, EmptyState, ResponseBlock, UtteranceLine};
