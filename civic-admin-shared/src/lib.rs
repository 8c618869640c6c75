//! # Civic Admin Shared
//!
//! Domain types shared by every layer of the civic admin back-office: the
//! closed set of managed entity kinds, the entity record shape, localized
//! text, polymorphic category references and the city registry.

pub mod category;
pub mod city;
pub mod entity;
pub mod lenient;
pub mod record;
pub mod status;
pub mod timestamp;

pub use category::{strip_path_prefix, Category, CategoryName, CategoryRef, DocumentRef};
pub use city::{find_city, City, CITIES};
pub use entity::{EntityKind, ParseEntityKindError};
pub use record::{text_variants, value_at, EntityRecord, Locale, LocalizedText};
