//! Route optimization.
//!
//! Answers "which charging stations can I reach from here, and how do I get
//! to my destination?": both place names are geocoded, the catalog is
//! filtered to stations within range of the start and ranked by geodesic
//! distance, and a maps deep link is built for the trip itself.
//!
//! The optimizer does not compute paths. Turn-by-turn routing is delegated
//! to the mapping service behind the returned link.

mod optimize;
mod range;
mod route_link;

pub use optimize::{Endpoint, ErrorKind, RouteError, RouteOptimizer, RouteQuery, RouteResult};
pub use range::{InvalidRange, geodesic_distance_km, stations_in_range, validate_range};
pub use route_link::{InvalidMapsHost, RouteLinks};
