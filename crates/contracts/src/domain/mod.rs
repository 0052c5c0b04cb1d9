pub mod invoice;
pub mod material;
