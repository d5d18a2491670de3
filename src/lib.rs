//! `hydromesh` is a semi-modular toolkit of conversion utilities for 2D
//! unstructured triangular meshes used in hydraulic modelling
//!
#![doc = include_str!("../readme.md")]
#![deny(missing_docs, missing_debug_implementations)]
#![cfg_attr(docsrs, feature(doc_cfg, doc_auto_cfg))]

// Re-exports of toolkit crates.
#[doc(inline)]
pub use hydromesh_utils as utils;

#[cfg(feature = "grid")]
#[cfg_attr(docsrs, doc(cfg(feature = "grid")))]
#[doc(inline)]
pub use hydromesh_grid as grid;

#[cfg(feature = "interp")]
#[cfg_attr(docsrs, doc(cfg(feature = "interp")))]
#[doc(inline)]
pub use hydromesh_interp as interp;

#[cfg(feature = "selafin")]
#[cfg_attr(docsrs, doc(cfg(feature = "selafin")))]
#[doc(inline)]
pub use hydromesh_selafin as selafin;
