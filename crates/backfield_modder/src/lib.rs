//! Typed get/set accessors for any registered member, whatever its
//! declared access policy.
//!
//! A property is resolved to the field that stores it, by trying each
//! [`NameTransform`] of a [`Modder`] in turn. The field is then wrapped in an
//! [`EasyField`], which reads and writes it directly.
//!
//! ```
//! use backfield_meta::derive::Members;
//! use backfield_modder::{Modder, selector};
//!
//! #[derive(Members, Default)]
//! pub struct Foreign {
//!     #[member(property = "change_me", get)]
//!     change_me: String,
//! }
//!
//! let field = Modder::shared()
//!     .try_get_selected::<Foreign, String>(&selector!(|e: Foreign| e.change_me))
//!     .unwrap()
//!     .unwrap();
//!
//! let mut foreign = Foreign::default();
//! field.set(&mut foreign, "changed".to_owned()).unwrap();
//! assert_eq!(field.get(&foreign).unwrap(), "changed");
//! ```
#![no_std]

// -----------------------------------------------------------------------------
// no_std support

// `Modder::shared` is built on `std::sync::LazyLock`.
extern crate std;

extern crate alloc;

// -----------------------------------------------------------------------------
// Modules

mod easy_field;
mod modder;
mod transform;

pub mod locator;

// -----------------------------------------------------------------------------
// Exports

pub use easy_field::{EasyField, UntypedField};
pub use locator::{LocateError, Selector};
pub use modder::Modder;
pub use transform::NameTransform;
