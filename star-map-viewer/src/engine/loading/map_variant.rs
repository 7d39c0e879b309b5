use crate::constants::path::MAP_DATA_ROOT;
use crate::engine::assets::system_id::SystemId;
use serde::{Deserialize, Serialize};

/// Map variants the viewer can load. Each has its own catalog, optional jump
/// list, and a selectable that frames the whole map.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MapVariant {
    #[default]
    Nec,
    Pochven,
    Anoikis,
}

impl MapVariant {
    /// Convert string identifier to map variant for RPC compatibility.
    pub fn from_string(s: &str) -> Option<Self> {
        match s.to_lowercase().as_str() {
            "nec" => Some(Self::Nec),
            "pochven" => Some(Self::Pochven),
            "anoikis" => Some(Self::Anoikis),
            _ => None,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Nec => "nec",
            Self::Pochven => "pochven",
            Self::Anoikis => "anoikis",
        }
    }

    pub fn catalog_path(&self) -> String {
        let file = match self {
            Self::Nec => "NEC",
            Self::Pochven => "pochven",
            Self::Anoikis => "anoikis",
        };
        format!("{}/{}.json", MAP_DATA_ROOT, file)
    }

    /// Anoikis is wormhole space and has no stargate network.
    pub fn jumps_path(&self) -> Option<String> {
        match self {
            Self::Nec => Some(format!("{}/NEC_jumps.json", MAP_DATA_ROOT)),
            Self::Pochven => Some(format!("{}/pochven_jumps.json", MAP_DATA_ROOT)),
            Self::Anoikis => None,
        }
    }

    /// Selectable that frames this map when it is loaded.
    pub fn overview_id(&self) -> SystemId {
        match self {
            Self::Nec => SystemId::from("-1"),
            Self::Pochven => SystemId::from("10000070"),
            Self::Anoikis => SystemId::from("-2"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn variants_round_trip_through_strings() {
        for variant in [MapVariant::Nec, MapVariant::Pochven, MapVariant::Anoikis] {
            assert_eq!(MapVariant::from_string(variant.as_str()), Some(variant));
        }
        assert_eq!(MapVariant::from_string("POCHVEN"), Some(MapVariant::Pochven));
        assert_eq!(MapVariant::from_string("jove"), None);
    }

    #[test]
    fn only_wormhole_space_lacks_jumps() {
        assert!(MapVariant::Nec.jumps_path().is_some());
        assert!(MapVariant::Pochven.jumps_path().is_some());
        assert!(MapVariant::Anoikis.jumps_path().is_none());
    }

    #[test]
    fn overview_ids_match_map_pages() {
        assert_eq!(MapVariant::Nec.overview_id().as_str(), "-1");
        assert_eq!(MapVariant::Anoikis.overview_id().as_str(), "-2");
        assert_eq!(MapVariant::Pochven.overview_id().as_str(), "10000070");
    }
}
