//! SQL core: the dialect tag, the static catalogs, and the
//! typed-datatype algebra.
//!
//! Everything in this module is purely functional and stateless: the
//! catalogs are process-wide constants, and datatype values are
//! constructed once and only read afterwards. It is safe to use from
//! any number of threads without synchronization.

pub mod charset;
pub mod datatype;
pub mod dialect;
pub mod names;

pub use charset::{CharacterSet, CharsetCatalog, CharsetCategory};
pub use datatype::{
    Datatype, DatatypeError, MsSqlDatatype, MySqlDatatype, RawColumnType, TypeParameters,
};
pub use dialect::{Dialect, DialectError};
pub use names::{DatatypeCatalog, DatatypeCategory, DatatypeName};
