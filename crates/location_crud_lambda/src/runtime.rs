pub use location_crud_core::{contract, generation, routes};
