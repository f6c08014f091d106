mod route_guards;

pub use route_guards::{protect_internal_route, protect_route};
