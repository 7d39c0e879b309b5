use crate::engine::assets::metrics::SystemMetrics;
use crate::engine::assets::selectables::Selectable;
use crate::engine::assets::star_map::StarSystem;
use crate::engine::colour::strategy::{ColourMode, round_half_up};

/// What a map label describes.
#[derive(Debug, Clone, Copy)]
pub enum LabelSubject<'a> {
    System(&'a StarSystem),
    Selectable(&'a Selectable),
}

/// Two-line label text: display name and mode-dependent detail.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct LabelContent {
    pub name: String,
    pub secondary: String,
}

impl LabelContent {
    /// Label for a system or a named selectable. Unnamed selectables have no
    /// label.
    pub fn for_subject(
        mode: ColourMode,
        subject: LabelSubject<'_>,
        metrics: &SystemMetrics,
    ) -> Option<Self> {
        let name = match subject {
            LabelSubject::System(system) => system.name.clone(),
            LabelSubject::Selectable(selectable) => selectable.name.clone()?,
        };
        Some(Self {
            name,
            secondary: secondary_text(mode, subject, metrics),
        })
    }
}

/// Secondary label line for the active colour mode.
///
/// Systems show their wormhole class verbatim when they have one, otherwise
/// the value the current mode colours by. Selectables ignore the mode.
pub fn secondary_text(mode: ColourMode, subject: LabelSubject<'_>, metrics: &SystemMetrics) -> String {
    match subject {
        LabelSubject::System(system) => {
            if let Some(whclass) = &system.whclass {
                return whclass.clone();
            }
            match mode {
                ColourMode::Security => system
                    .security
                    .map(format_security)
                    .unwrap_or_else(|| "???".to_string()),
                ColourMode::Traffic => format!("🚀{}", metrics.traffic.get(&system.id)),
                ColourMode::ShipKills => format!("☠️{}", metrics.ship_kills.get(&system.id)),
                ColourMode::NpcKills => format!("☠️{}", metrics.npc_kills.get(&system.id)),
            }
        }
        LabelSubject::Selectable(selectable) => {
            if let Some(whclass) = &selectable.whclass {
                whclass.clone()
            } else if let Some(security) = selectable.security {
                format_security(security)
            } else {
                String::new()
            }
        }
    }
}

/// Security rounded to one decimal with at least one fraction digit.
pub fn format_security(security: f32) -> String {
    let rounded = round_half_up(security * 10.0) / 10.0;
    // Avoid printing "-0.0" for slightly negative values.
    let rounded = if rounded == 0.0 { 0.0 } else { rounded };
    format!("{:.1}", rounded)
}
