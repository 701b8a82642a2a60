//! Member metadata for `backfield`.
//!
//! `#[derive(Members)]` records, at the point of definition, every member of a
//! struct: its plain fields (storage locations), its computed properties with
//! their declared access policy, and the storage synthesized for each
//! auto-property. The records give type-erased, policy-free access to each
//! storage location.
//!
//! ```
//! use backfield_meta::derive::Members;
//! use backfield_meta::info::{Typed, Visibility};
//!
//! #[derive(Members, Default)]
//! struct Account {
//!     #[member(property = "balance", get)]
//!     balance: u64,
//!     owner: String,
//! }
//!
//! let info = Account::type_info();
//! let balance = info.property("balance").unwrap();
//! assert_eq!(balance.getter(), Some(Visibility::Public));
//! assert_eq!(balance.setter(), None);
//!
//! // The backing field is registered under its synthesized name.
//! let backing = info.field("<balance>$backing").unwrap();
//!
//! let mut account = Account::default();
//! backing.set(&mut account, Box::new(10_u64)).unwrap();
//! assert_eq!(account.balance, 10);
//! ```
#![no_std]

// -----------------------------------------------------------------------------
// Extern Self

// Generated code refers to `::backfield_meta`; this makes that path valid
// inside the crate itself.
extern crate self as backfield_meta;

// -----------------------------------------------------------------------------
// no_std support

// `TypeInfoCell` is built on `std::sync::OnceLock`.
extern crate std;

extern crate alloc;

// -----------------------------------------------------------------------------
// Modules

mod access_error;

pub mod cell;
pub mod info;
pub mod registry;

// -----------------------------------------------------------------------------
// Top-Level exports

#[doc(hidden)]
pub mod __macro_exports;

pub use access_error::AccessError;
pub use backfield_meta_derive as derive;
pub use info::auto_backing_name;
