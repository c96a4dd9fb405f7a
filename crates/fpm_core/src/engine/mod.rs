pub mod actions;
pub mod agent;
pub mod config;
pub mod field;
pub mod formation;
pub mod match_sim;
pub mod probability;
pub mod sampler;
pub mod sink;
pub mod zone;

pub use agent::{AgentState, PlayerAgent};
pub use config::{MatchConfig, TeamConfig};
pub use field::{Field, FIELD};
pub use formation::{Formation, FormationSlot};
pub use match_sim::{Match, MatchClock, MatchEngine, OnBallAction, Possession};
pub use sampler::WeightedSampler;
pub use sink::{EventLog, EventLogStats, EventSink, NullSink};
pub use zone::{Row, Zone, ZoneType};
