//! SeaORM models for the six business collections plus user accounts.
//!
//! Table names are carried over from the original deployment, which named
//! its collections in Portuguese (`locais`, `fornecedores`, ...).

pub mod concrete_type;
pub mod device;
pub mod input;
pub mod location;
pub mod pour;
pub mod supplier;
pub mod user;
