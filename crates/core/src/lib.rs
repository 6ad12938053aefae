//! # coastcvi core
//!
//! Data model, registry and persistence seam for coastal vulnerability analysis.
//!
//! This crate provides:
//! - `Parameter` and its vulnerability scoring (ranges or categorical options)
//! - `Formula`: atomic formula tags and recursive composite trees
//! - `CoastalIndex`: named, citeable index definitions
//! - `Registry`: validated parameter and index catalogs
//! - `ShorelineSegment` and the `FeatureCollection` document it persists as
//! - `DocumentStore`: the key-value store the calculation results are written to
//! - Algorithm trait for a consistent API

pub mod error;
pub mod formula;
pub mod index;
pub mod parameter;
pub mod registry;
pub mod segment;
pub mod store;
pub mod vector;

pub use error::{Error, Result};
pub use formula::{CombineMethod, CompositeFormula, Formula, FormulaFamily, FormulaTag, SubIndex};
pub use index::{CoastalIndex, IndexKind};
pub use parameter::{Parameter, ParameterValue, VulnerabilityScale};
pub use registry::Registry;
pub use segment::ShorelineSegment;

/// Prelude for convenient imports
pub mod prelude {
    pub use crate::error::{Error, Result};
    pub use crate::formula::{Formula, FormulaTag};
    pub use crate::index::CoastalIndex;
    pub use crate::parameter::{Parameter, ParameterValue, VulnerabilityScale};
    pub use crate::registry::Registry;
    pub use crate::segment::ShorelineSegment;
    pub use crate::store::{DocumentStore, MemoryStore};
    pub use crate::vector::{Feature, FeatureCollection};
    pub use crate::Algorithm;
}

/// Shared shape of the coastcvi operations.
///
/// An algorithm maps an input to an output under a `Params` value; `Params::default()`
/// carries the documented defaults.
pub trait Algorithm {
    type Input;
    type Output;
    /// Tuning knobs; `Default` gives the documented behavior
    type Params: Default;
    type Error: std::error::Error;

    /// Short identifier, e.g. `"IndexDetection"`
    fn name(&self) -> &'static str;

    /// One-line human description
    fn description(&self) -> &'static str;

    fn execute(&self, input: Self::Input, params: Self::Params) -> std::result::Result<Self::Output, Self::Error>;

    /// Run with `Params::default()`
    fn execute_default(&self, input: Self::Input) -> std::result::Result<Self::Output, Self::Error> {
        self.execute(input, Self::Params::default())
    }
}
