//! Localization - phrase catalogs and the resolver used to render replies.

mod catalog;
mod interpolate;
mod resolver;

pub use catalog::{PhraseCatalog, LANGUAGE_NAME_KEY};
pub use interpolate::{interpolate, InterpolationError, MessageArg};
pub use resolver::PhraseResolver;
