//! One router per resource, each carrying its model as state.

pub mod carts;
pub mod orders;
pub mod products;
pub mod users;
