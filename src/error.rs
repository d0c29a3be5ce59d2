//! Error types for bfinfo

use thiserror::Error;

/// Anything that can go wrong between argument parsing and the first line of
/// output. Attribute reads past this point never fail; a missing value is
/// reported as a placeholder line, not an error.
#[derive(Error, Debug)]
pub enum BfError {
    /// A SAP or beam selector that is not "all", an index, or a list of
    /// indices. Raised at construction time, never mid-traversal.
    #[error("invalid selector '{0}': expected \"all\", an index, or a list like \"0,2\"")]
    InvalidSelector(String),

    /// A Stokes selector that is not "all" or a list of component names.
    #[error("invalid stokes selector '{0}': expected \"all\" or component names like \"I\" or \"I,Q\"")]
    InvalidStokesSelector(String),

    /// Specified file doesn't exist. hdf5::File::open would catch this too,
    /// but its error message is horrendous.
    #[error("specified file '{0}' doesn't exist")]
    FileDoesntExist(String),

    #[error("HDF5 error: {0}")]
    Hdf5(#[from] hdf5::Error),
}
