//! RDF datastreams: declared properties over an object's statements
//!
//! - `property`: property declarations and index directives
//! - `value`: literal/resource values and type coercion
//! - `subject`: lazy subject resolution
//! - `proxy`: write-through multi-valued property views
//! - `prefix`: container-scoped field names
//! - `store`: datastream types and instances

pub mod prefix;
pub mod property;
pub mod proxy;
pub mod store;
pub mod subject;
pub mod value;

pub use prefix::{apply_prefix, NamePrefixer};
pub use property::{IndexDirective, PropertyDefinition, UsageTag};
pub use proxy::BoundValueProxy;
pub use store::{DatastreamType, FieldInfo, RdfDatastream};
pub use subject::{SubjectBinder, SubjectContext, SubjectRule, DEFAULT_SUBJECT_NAMESPACE};
pub use value::{CoercionError, PropertyValue, ResourceRef, ValueType};
