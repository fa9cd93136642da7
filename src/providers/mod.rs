//! Provider-Grenze: Geocoding, Routing, Geolokation, Snapshot.

pub mod google;
pub mod offline;
pub mod port;
pub mod types;

pub use port::{
    GeocodePurpose, ImmediatePort, ProviderPort, ProviderRequest, ProviderResponse, ThreadedPort,
};
pub use types::{
    GeocodeResult, GeocodingProvider, GeolocationSource, MapType, ProviderSet, RouteSummary,
    RoutingProvider, SnapshotProvider, SnapshotRequest, Suggestion, TravelMode,
};
