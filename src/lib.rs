#![doc = include_str!("../README.md")]
#![cfg_attr(docsrs, feature(doc_cfg))]

pub use backfield_meta as meta;
pub use backfield_modder as modder;
