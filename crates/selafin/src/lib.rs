//! Module for working with TELEMAC SELAFIN binaries
//!
#![doc = include_str!("../readme.md")]

// Split into subfiles for development, but anything important is re-exported
mod error;
mod header;
mod precision;
mod reader;
mod record;
mod selafin;
mod text;
mod timestep;
mod topology;
mod writer;

// Inline anything important for a nice public API
#[doc(inline)]
pub use error::{Error, Result};

#[doc(inline)]
pub use header::{Date, Header, Variable};

#[doc(inline)]
pub use precision::Precision;

#[doc(inline)]
pub use reader::{read_selafin, SelafinReader};

#[doc(inline)]
pub use selafin::{Selafin, Summary};

#[doc(inline)]
pub use text::FixedText;

#[doc(inline)]
pub use timestep::TimeStep;

#[doc(inline)]
pub use topology::{Topology, NODES_PER_ELEMENT};

#[doc(inline)]
pub use writer::{write_selafin, SelafinWriter};
