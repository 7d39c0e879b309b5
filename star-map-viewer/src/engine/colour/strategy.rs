use crate::engine::assets::metrics::SystemMetrics;
use crate::engine::assets::star_map::StarSystem;
use constants::palette::{CLASS_COLOURS, NULL_SECURITY_COLOUR, Rgb, SECURITY_COLOURS};
use serde::{Deserialize, Serialize};

/// Active point-cloud colouring. Exactly one is active at a time.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ColourMode {
    #[default]
    Security,
    Traffic,
    ShipKills,
    NpcKills,
}

impl ColourMode {
    pub const ALL: [ColourMode; 4] = [
        ColourMode::Security,
        ColourMode::Traffic,
        ColourMode::ShipKills,
        ColourMode::NpcKills,
    ];

    /// Convert string identifier to colour mode for RPC compatibility.
    /// Accepts the frontend's `jumps` as an alias for traffic.
    pub fn from_string(s: &str) -> Option<Self> {
        match s.to_lowercase().as_str() {
            "security" => Some(Self::Security),
            "traffic" | "jumps" => Some(Self::Traffic),
            "ship_kills" => Some(Self::ShipKills),
            "npc_kills" => Some(Self::NpcKills),
            _ => None,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Security => "security",
            Self::Traffic => "traffic",
            Self::ShipKills => "ship_kills",
            Self::NpcKills => "npc_kills",
        }
    }
}

/// Colour for one system under the given mode. Components are in [0, 1].
pub fn colour_of(mode: ColourMode, system: &StarSystem, metrics: &SystemMetrics) -> Rgb {
    match metrics.for_mode(mode) {
        None => security_colour(system),
        Some(metric) => grey(metric.fraction(&system.id)),
    }
}

/// Wormhole class wins over security; non-positive or missing security gets
/// the null-sec colour.
pub fn security_colour(system: &StarSystem) -> Rgb {
    if let Some(class) = system.wormhole_class() {
        return CLASS_COLOURS[usize::from(class - 1)];
    }

    match system.security {
        Some(security) if security > 0.0 => SECURITY_COLOURS[security_band(security)],
        _ => NULL_SECURITY_COLOUR,
    }
}

/// Palette slot for a positive security value: `round(security * 10)` in [0, 10].
pub fn security_band(security: f32) -> usize {
    round_half_up(security * 10.0).clamp(0.0, 10.0) as usize
}

/// Round to nearest, halves towards positive infinity.
pub fn round_half_up(value: f32) -> f32 {
    (value + 0.5).floor()
}

/// Equal-channel colour, clamped to [0, 1]; non-finite input is black.
pub fn grey(channel: f32) -> Rgb {
    let channel = if channel.is_finite() {
        channel.clamp(0.0, 1.0)
    } else {
        0.0
    };
    [channel, channel, channel]
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::engine::assets::metrics::PerSystemMetric;
    use crate::engine::assets::system_id::SystemId;
    use bevy::math::Vec3;

    fn system(id: &str, security: Option<f32>, whclass: Option<&str>) -> StarSystem {
        StarSystem {
            id: SystemId::from(id),
            name: id.to_string(),
            render_position: Vec3::ZERO,
            security,
            whclass: whclass.map(str::to_string),
            index: 0,
        }
    }

    fn assert_close(a: f32, b: f32) {
        let diff = (a - b).abs();
        assert!(diff < 1e-6, "expected {} close to {}", a, b);
    }

    #[test]
    fn security_scenario_maps_to_palette_entries() {
        let metrics = SystemMetrics::default();
        let a = system("A", Some(1.0), None);
        let b = system("B", Some(-1.0), None);
        let c = system("C", None, Some("C3"));

        assert_eq!(colour_of(ColourMode::Security, &a, &metrics), SECURITY_COLOURS[10]);
        assert_eq!(colour_of(ColourMode::Security, &b, &metrics), NULL_SECURITY_COLOUR);
        assert_eq!(colour_of(ColourMode::Security, &c, &metrics), CLASS_COLOURS[2]);
    }

    #[test]
    fn wormhole_class_overrides_security() {
        let metrics = SystemMetrics::default();
        let pocket = system("J100001", Some(0.9), Some("C6"));
        assert_eq!(colour_of(ColourMode::Security, &pocket, &metrics), CLASS_COLOURS[5]);
    }

    #[test]
    fn unparseable_class_falls_back_to_security() {
        let metrics = SystemMetrics::default();
        let thera = system("Thera", Some(-0.99), Some("C12"));
        assert_eq!(colour_of(ColourMode::Security, &thera, &metrics), NULL_SECURITY_COLOUR);
    }

    #[test]
    fn missing_and_zero_security_are_null_sec() {
        let metrics = SystemMetrics::default();
        assert_eq!(
            colour_of(ColourMode::Security, &system("X", None, None), &metrics),
            NULL_SECURITY_COLOUR
        );
        assert_eq!(
            colour_of(ColourMode::Security, &system("Y", Some(0.0), None), &metrics),
            NULL_SECURITY_COLOUR
        );
    }

    #[test]
    fn lowest_band_shares_colour() {
        assert_eq!(security_band(0.04), 0);
        assert_eq!(security_band(0.05), 1);
        assert_eq!(security_band(0.14), 1);
        assert_eq!(security_band(0.46), 5);
        assert_eq!(security_band(1.0), 10);
        assert_eq!(security_band(1.3), 10);
    }

    #[test]
    fn traffic_scenario_is_linear_grey() {
        let metrics = SystemMetrics {
            traffic: PerSystemMetric::from_entries([
                (SystemId::from("A"), 10),
                (SystemId::from("B"), 30),
            ]),
            ..Default::default()
        };

        let a = colour_of(ColourMode::Traffic, &system("A", None, None), &metrics);
        let b = colour_of(ColourMode::Traffic, &system("B", None, None), &metrics);
        let absent = colour_of(ColourMode::Traffic, &system("Z", None, None), &metrics);

        assert_close(a[0], 1.0 / 3.0);
        assert_eq!(a[0], a[1]);
        assert_eq!(a[1], a[2]);
        assert_eq!(b, [1.0, 1.0, 1.0]);
        assert_eq!(absent, [0.0, 0.0, 0.0]);
    }

    #[test]
    fn metric_modes_stay_in_range_with_zero_maximum() {
        let metrics = SystemMetrics {
            ship_kills: PerSystemMetric::from_entries([(SystemId::from("A"), 0)]),
            ..Default::default()
        };
        let a = system("A", Some(0.5), None);

        for mode in ColourMode::ALL {
            let colour = colour_of(mode, &a, &metrics);
            assert!(
                colour.iter().all(|c| (0.0..=1.0).contains(c)),
                "{:?} produced {:?}",
                mode,
                colour
            );
        }
    }

    #[test]
    fn mode_strings_parse() {
        assert_eq!(ColourMode::from_string("jumps"), Some(ColourMode::Traffic));
        assert_eq!(ColourMode::from_string("NPC_KILLS"), Some(ColourMode::NpcKills));
        assert_eq!(ColourMode::from_string("sovereignty"), None);
        for mode in ColourMode::ALL {
            assert_eq!(ColourMode::from_string(mode.as_str()), Some(mode));
        }
    }
}
