//! Repository implementations for database access

pub mod items;

pub use items::{Item, ItemRepo, ItemStore, NewItem, STATIC_ITEM_NAME, STATIC_ITEM_SOURCE};
