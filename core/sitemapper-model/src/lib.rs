//! Content model for Sitemapper.
//!
//! Defines the types every other crate in the workspace depends on:
//! - [`ContentTypeSchema`] — a content type as registered in the CMS schema registry
//! - [`ContentEntry`] — one record of a content type (id, type, JSON payload)
//! - [`ContentTypeDescriptor`] — the public-facing shape of a discoverable content type
//!
//! Schemas and entries use the CMS's camelCase JSON conventions so they can be
//! loaded straight from exported schema files and entity listings.

mod descriptor;
mod entry;
mod schema;

pub use descriptor::ContentTypeDescriptor;
pub use entry::ContentEntry;
pub use schema::{
    API_UID_PREFIX, Attribute, ContentKind, ContentTypeSchema, SchemaInfo, SchemaOptions,
};
