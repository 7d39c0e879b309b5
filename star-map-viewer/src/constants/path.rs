/// Directory under the asset root holding every map data file.
pub const MAP_DATA_ROOT: &str = "map";

/// Aggregate regions (constellations, regions, wormhole pockets).
pub const SELECTABLES_PATH: &str = "map/selection.json";

/// Per-system jump counts.
pub const TRAFFIC_PATH: &str = "map/system_jumps.json";

/// Per-system ship and NPC kills.
pub const KILLS_PATH: &str = "map/system_kills.json";

/// Detail pages live next to the viewer, one per system or selectable.
pub const DETAIL_PAGE_ROOT: &str = "../map";

pub fn detail_page_url(id: &str) -> String {
    format!("{}/{}.html", DETAIL_PAGE_ROOT, id)
}
