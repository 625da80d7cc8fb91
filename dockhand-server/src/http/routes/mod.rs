//! Route handlers organized by resource

pub mod db_check;
pub mod health;
pub mod items;

#[cfg(test)]
pub(crate) mod testing;
