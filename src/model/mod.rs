//! Content data model: loosely-typed input DTOs and strongly-typed view
//! models.
//!
//! [`data`] mirrors the upstream repository's wire shapes; [`view`] holds the
//! assembled output. [`mvc`] carries the MVC target descriptor both sides
//! share.

pub mod data;
pub mod mvc;
pub mod view;

pub use data::{BinaryContentData, EntityData, ExternalContentData, PageData, RegionData};
pub use mvc::MvcData;
pub use view::{
    EntityModel, EntityModelSet, EntityVariant, FieldMap, PageModel, RegionModel, RegionModelSet,
};
