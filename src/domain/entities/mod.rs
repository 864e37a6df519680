//! Core domain entities.
//!
//! Entities are plain data structures mirroring the stored records; creation
//! and mutation inputs get their own structs.
//!
//! - [`User`] - an account holder (`NewUser`, `UserProfile` for inputs)
//! - [`Address`] - a shipping address owned by exactly one user
//!   (`NewAddress`, `AddressDetails`)
//! - [`Session`] - an issued refresh token (`NewSession`)

pub mod address;
pub mod session;
pub mod user;

pub use address::{Address, AddressDetails, NewAddress};
pub use session::{NewSession, Session};
pub use user::{NewUser, Role, User, UserProfile};
