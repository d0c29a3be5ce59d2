//! bfinfo - Tree view of the metadata in LOFAR beamformed (BF) HDF5 files

pub mod error;
pub mod output;
pub mod schema;
pub mod selector;
pub mod source;
pub mod style;

pub use error::BfError;
pub use output::{DisplayConfig, MetaFormatter, RenderContext};
pub use selector::{Selector, StokesSelector, Visit};
pub use source::h5::BfFile;
pub use style::{Style, Theme};
