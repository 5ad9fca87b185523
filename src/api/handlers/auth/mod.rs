//! Authentication and authorization: signup, login, sessions, and the
//! policy rules the rest of the API leans on.

pub mod login;
pub mod password;
pub mod policy;
pub mod principal;
pub mod session;
pub mod signup;
pub mod state;
pub(crate) mod storage;
pub mod token;
pub mod types;
