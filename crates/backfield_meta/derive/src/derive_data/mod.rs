//! Provide some tools for parsing token stream.

// -----------------------------------------------------------------------------
// Modules

mod attributes;
mod members_struct;

// -----------------------------------------------------------------------------
// Internal API

pub(crate) use attributes::{AccessPolicy, FieldAttributes, TypeAttributes};
pub(crate) use members_struct::{MemberField, MembersStruct};
