pub mod bill_map;
pub mod districts;
pub mod fips;
pub mod polygon;
pub mod shapes;

pub use bill_map::{bill_map, BillMap, BillMapSummary, Stance, StateStance};
pub use districts::{
    aggregate_house, aggregate_senate, average_grade, district_key, GeographicAggregation,
    GeographicUnit, GroupingMode, GroupingRequest,
};
pub use fips::{state_code, state_fips};
pub use polygon::{multipolygon_centroid, polygon_centroid, signed_area, Point};
pub use shapes::{centroids, load_shapes, parse_shapes, DistrictShape};
