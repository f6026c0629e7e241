use serde::{Deserialize, Serialize};

use wf_core::{DiscoveryState, LocationId, PathKind, Point, WorldMap};
use wf_rand::RandomSource;

use crate::clock::hour_is_night;

/// How a chance-met traveler feels about the player.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Disposition {
    /// Glad of the company.
    Friendly,
    /// Indifferent.
    Neutral,
    /// Keeping a hand near a weapon.
    Wary,
    /// Looking for trouble.
    Hostile,
}

/// Weather rolled on the road.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum WeatherKind {
    /// Steady rain.
    Rain,
    /// Thick fog.
    Fog,
    /// A real storm.
    Storm,
    /// Driving snow.
    Snow,
}

/// One enemy in an ambush roster.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Enemy {
    /// Display name.
    pub name: String,
    /// Level, scaled from the player's.
    pub level: u32,
}

/// The typed payload of a travel encounter.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TravelEventKind {
    /// Hostiles block the way.
    Ambush {
        /// The attackers.
        enemies: Vec<Enemy>,
    },
    /// A traveler on the same road.
    Traveler {
        /// Their disposition.
        disposition: Disposition,
    },
    /// A merchant caravan willing to trade.
    Caravan {
        /// What they carry.
        goods: String,
    },
    /// Signs of an uncharted place nearby.
    Discovery {
        /// The location hinted at, if any remains unknown.
        location: Option<LocationId>,
    },
    /// Weather worth sheltering from.
    Weather {
        /// What is falling.
        weather: WeatherKind,
        /// Minutes lost if waited out.
        delay_minutes: f64,
    },
    /// A quicker way through.
    Shortcut {
        /// Minutes saved by taking it.
        minutes_saved: f64,
    },
    /// Someone hurt at the roadside.
    WoundedNpc {
        /// Their name.
        name: String,
    },
}

impl TravelEventKind {
    /// A short label for logs and weighting tables.
    pub fn label(&self) -> &'static str {
        match self {
            Self::Ambush { .. } => "ambush",
            Self::Traveler { .. } => "traveler",
            Self::Caravan { .. } => "caravan",
            Self::Discovery { .. } => "discovery",
            Self::Weather { .. } => "weather",
            Self::Shortcut { .. } => "shortcut",
            Self::WoundedNpc { .. } => "wounded_npc",
        }
    }
}

/// How combat resolved, reported back by the host.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CombatResult {
    /// The player won.
    Victory,
    /// The player got away.
    Fled,
    /// The player lost.
    Defeat,
}

/// The host's decision about a pending travel event.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum EventOutcome {
    /// Carry on unaffected.
    Continue,
    /// Lose time before moving again.
    Delay {
        /// Minutes lost.
        minutes: f64,
    },
    /// Combat happened.
    Combat {
        /// How it went.
        result: CombatResult,
    },
    /// A trade was offered.
    Trade {
        /// Whether it went through.
        completed: bool,
    },
    /// Something new was learned about the world.
    Discovery {
        /// The location revealed.
        location: LocationId,
    },
}

/// An encounter generated mid-journey.
///
/// Ephemeral: created by the roller, resolved by the host, discarded by
/// the travel machine once its outcome is applied.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TravelEvent {
    /// The typed payload.
    pub kind: TravelEventKind,
    /// Game minute it triggered.
    pub minute: f64,
    /// World position it triggered at.
    pub position: Point,
    /// Whether the host has resolved it.
    pub resolved: bool,
    /// The outcome chosen, once resolved.
    pub outcome: Option<EventOutcome>,
}

/// Tuning for the encounter roller.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RollerConfig {
    /// Flat chance per roll.
    pub base_rate: f64,
    /// Additional chance per point of danger.
    pub danger_rate: f64,
    /// No encounters before this much of the segment is behind you.
    pub min_segment_progress: f64,
    /// Hard ceiling on the per-roll chance.
    pub max_rate: f64,
}

impl Default for RollerConfig {
    fn default() -> Self {
        Self {
            base_rate: 0.05,
            danger_rate: 0.06,
            min_segment_progress: 0.1,
            max_rate: 0.8,
        }
    }
}

impl RollerConfig {
    /// A roller that never fires; useful for quiet journeys and tests.
    pub fn silent() -> Self {
        Self {
            base_rate: 0.0,
            danger_rate: 0.0,
            ..Self::default()
        }
    }

    /// Set the flat per-roll chance.
    pub fn with_base_rate(mut self, rate: f64) -> Self {
        self.base_rate = rate;
        self
    }
}

/// Per-roll context supplied by the travel machine.
#[derive(Debug, Clone, Copy)]
pub struct RollContext {
    /// Current game minute.
    pub minute: f64,
    /// Hour of day, `[0, 24)`.
    pub hour_of_day: f64,
    /// Progress through the current segment, `[0, 1]`.
    pub segment_progress: f64,
    /// Kind of the path being traveled.
    pub path_kind: PathKind,
    /// Effective danger level at the traveler's position.
    pub danger: f64,
    /// The traveler's interpolated position.
    pub position: Point,
    /// The player's level, for scaling rosters.
    pub player_level: u32,
}

/// Rolls whether an encounter happens and synthesizes its contents.
///
/// Each journey gets its own stream, derived from the start minute and
/// origin, so a saved and replayed journey reproduces the same
/// encounter sequence.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EncounterRoller {
    config: RollerConfig,
    rng: RandomSource,
}

impl EncounterRoller {
    /// Create a roller over an explicit stream.
    pub fn new(config: RollerConfig, rng: RandomSource) -> Self {
        Self { config, rng }
    }

    /// Derive a journey-specific roller from the world stream.
    pub fn for_journey(
        config: RollerConfig,
        world_rng: &RandomSource,
        start_minute: f64,
        origin: LocationId,
    ) -> Self {
        let label = format!("journey-{}-{}", start_minute.floor() as i64, origin);
        Self::new(config, world_rng.fork(&label))
    }

    /// Decide whether an encounter fires at this roll.
    ///
    /// Refuses to fire before the minimum in-segment progress; otherwise
    /// consumes exactly one draw. The rate is base + danger contribution,
    /// scaled by time of day and path kind, clamped to the ceiling.
    pub fn should_trigger(&mut self, ctx: &RollContext) -> bool {
        if ctx.segment_progress < self.config.min_segment_progress {
            return false;
        }
        let rate = self.rate(ctx);
        self.rng.next_bool(rate)
    }

    /// The clamped per-roll encounter chance for this context.
    pub fn rate(&self, ctx: &RollContext) -> f64 {
        let mut rate = self.config.base_rate + self.config.danger_rate * ctx.danger;
        rate *= if hour_is_night(ctx.hour_of_day) { 1.5 } else { 1.0 };
        rate *= ctx.path_kind.danger();
        rate.min(self.config.max_rate)
    }

    /// Synthesize an encounter for this context.
    pub fn generate(&mut self, ctx: &RollContext, map: &WorldMap) -> TravelEvent {
        let labels = [
            "ambush",
            "traveler",
            "caravan",
            "discovery",
            "weather",
            "shortcut",
            "wounded_npc",
        ];
        let weights = self.kind_weights(ctx);
        let label = *self.rng.weighted_pick(&labels, &weights);
        let kind = match label {
            "ambush" => self.roll_ambush(ctx),
            "traveler" => self.roll_traveler(ctx),
            "caravan" => TravelEventKind::Caravan {
                goods: (*self.rng.pick(&["salt", "wool", "iron", "spices", "grain"])).to_string(),
            },
            "discovery" => TravelEventKind::Discovery {
                location: nearest_unknown(map, &ctx.position),
            },
            "weather" => self.roll_weather(),
            "shortcut" => TravelEventKind::Shortcut {
                minutes_saved: self.rng.next_float(5.0, 20.0),
            },
            _ => TravelEventKind::WoundedNpc {
                name: (*self.rng.pick(&["Maren", "Oswin", "Petra", "Callum", "Ysolt"])).to_string(),
            },
        };
        TravelEvent {
            kind,
            minute: ctx.minute,
            position: ctx.position,
            resolved: false,
            outcome: None,
        }
    }

    /// The raw generator state, for save/restore.
    pub fn state(&self) -> u32 {
        self.rng.state()
    }

    /// Restore a previously captured generator state.
    pub fn set_state(&mut self, state: u32) {
        self.rng.set_state(state);
    }

    /// Context-adjusted weights, in the label order used by `generate`.
    fn kind_weights(&self, ctx: &RollContext) -> Vec<f64> {
        let night = hour_is_night(ctx.hour_of_day);
        let mut ambush = 1.0;
        let mut traveler = 1.2;
        let mut caravan = 0.8;
        let mut discovery = 0.7;
        let mut weather = 0.8;
        let mut shortcut = 0.4;
        let mut wounded = 0.5;

        if night {
            ambush *= 2.0;
            traveler *= 0.3;
        }
        match ctx.path_kind {
            PathKind::Wilderness => {
                discovery *= 1.8;
                weather *= 1.5;
            }
            PathKind::Hidden => shortcut *= 2.5,
            PathKind::Road => {
                caravan *= 2.0;
                traveler *= 1.5;
            }
            PathKind::Trail => {}
        }
        if ctx.danger >= 1.3 {
            ambush *= 1.6;
            wounded *= 1.8;
        }
        vec![ambush, traveler, caravan, discovery, weather, shortcut, wounded]
    }

    fn roll_ambush(&mut self, ctx: &RollContext) -> TravelEventKind {
        let roster: &[&str] = if ctx.danger < 1.0 {
            &["Bandit", "Wolf", "Cutpurse"]
        } else if ctx.danger < 1.4 {
            &["Raider", "Dire Wolf", "Outlaw"]
        } else {
            &["Troll", "Wraith", "Marauder"]
        };
        let count = self.rng.next_int(2, 4) as usize;
        let enemies = (0..count)
            .map(|_| Enemy {
                name: (*self.rng.pick(roster)).to_string(),
                level: (i64::from(ctx.player_level) + self.rng.next_int(-1, 1)).max(1) as u32,
            })
            .collect();
        TravelEventKind::Ambush { enemies }
    }

    fn roll_traveler(&mut self, ctx: &RollContext) -> TravelEventKind {
        let night = hour_is_night(ctx.hour_of_day);
        let dispositions = [
            Disposition::Friendly,
            Disposition::Neutral,
            Disposition::Wary,
            Disposition::Hostile,
        ];
        let friendly = if night { 0.5 } else { 1.5 };
        let hostile = 0.3 + ctx.danger * 0.4;
        let weights = [friendly, 1.0, 0.8, hostile];
        TravelEventKind::Traveler {
            disposition: *self.rng.weighted_pick(&dispositions, &weights),
        }
    }

    fn roll_weather(&mut self) -> TravelEventKind {
        let kinds = [
            WeatherKind::Rain,
            WeatherKind::Fog,
            WeatherKind::Storm,
            WeatherKind::Snow,
        ];
        let weights = [1.0, 0.8, 0.5, 0.3];
        TravelEventKind::Weather {
            weather: *self.rng.weighted_pick(&kinds, &weights),
            delay_minutes: self.rng.next_float(10.0, 40.0),
        }
    }
}

/// The closest still-unknown location, if any.
fn nearest_unknown(map: &WorldMap, position: &Point) -> Option<LocationId> {
    map.locations()
        .filter(|l| l.discovery == DiscoveryState::Unknown)
        .min_by(|a, b| {
            a.position
                .distance(position)
                .total_cmp(&b.position.distance(position))
        })
        .map(|l| l.id)
}
