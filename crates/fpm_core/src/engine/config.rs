//! Match configuration
//!
//! Everything needed to build a match. Loaded from YAML/JSON by the CLI;
//! top-level fields default, team blocks need `name`, `formation` and `tactics`.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use validator::{Validate, ValidationError};

use super::formation::Formation;
use crate::error::Result;
use crate::models::TeamSide;
use crate::tactics::{DribbleModel, TacticalPreset, TacticalProfile, TacticalTuning};

pub const DEFAULT_DURATION_MINUTES: u32 = 90;
pub const DEFAULT_SECONDS_PER_STEP: u32 = 10;
/// 2025-01-01T15:00:00Z
pub const DEFAULT_KICKOFF_UNIX: i64 = 1_735_743_600;

/// Match construction parameters
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
#[serde(default)]
pub struct MatchConfig {
    #[validate(range(max = 240))]
    pub duration_minutes: u32,
    #[validate(range(min = 1, max = 60), custom = "divides_minute")]
    pub seconds_per_step: u32,
    /// Entropy-seeded when absent
    pub seed: Option<u64>,
    /// Match identifier carried into exported traces
    #[validate(length(min = 1, max = 64))]
    pub match_label: String,
    pub kickoff_time: DateTime<Utc>,
    #[validate]
    pub home: TeamConfig,
    #[validate]
    pub away: TeamConfig,
}

impl Default for MatchConfig {
    fn default() -> Self {
        Self {
            duration_minutes: DEFAULT_DURATION_MINUTES,
            seconds_per_step: DEFAULT_SECONDS_PER_STEP,
            seed: None,
            match_label: "M01".to_string(),
            kickoff_time: default_kickoff(),
            home: TeamConfig::home_default(),
            away: TeamConfig::away_default(),
        }
    }
}

impl MatchConfig {
    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = Some(seed);
        self
    }

    pub fn with_duration(mut self, minutes: u32) -> Self {
        self.duration_minutes = minutes;
        self
    }

    /// Ticks in a full match
    pub fn step_budget(&self) -> u64 {
        if self.seconds_per_step == 0 {
            return 0;
        }
        self.duration_minutes as u64 * 60 / self.seconds_per_step as u64
    }

    pub fn team(&self, side: TeamSide) -> &TeamConfig {
        match side {
            TeamSide::Home => &self.home,
            TeamSide::Away => &self.away,
        }
    }

    /// Field validation, then lineup checks for both sides
    pub fn check(&self) -> Result<()> {
        self.validate()?;
        for side in TeamSide::BOTH {
            self.team(side).lineup()?.validate(side)?;
        }
        Ok(())
    }
}

pub fn default_kickoff() -> DateTime<Utc> {
    DateTime::from_timestamp(DEFAULT_KICKOFF_UNIX, 0).unwrap_or_default()
}

fn divides_minute(seconds: u32) -> std::result::Result<(), ValidationError> {
    if seconds == 0 || 60 % seconds != 0 {
        return Err(ValidationError::new("seconds_per_step_must_divide_60"));
    }
    Ok(())
}

/// Per-team setup
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Validate)]
pub struct TeamConfig {
    #[validate(length(min = 1, max = 40))]
    pub name: String,
    /// Built-in lineup name, e.g. "4-3-3"
    pub formation: String,
    /// Custom lineup; takes precedence over `formation`
    #[serde(default)]
    pub lineup: Option<Formation>,
    pub tactics: TacticalPreset,
    #[serde(default)]
    pub dribble_model: DribbleModel,
    #[serde(default)]
    pub tuning: Option<TacticalTuning>,
}

impl TeamConfig {
    pub fn home_default() -> Self {
        Self {
            name: "Home".to_string(),
            formation: "4-3-3".to_string(),
            lineup: None,
            tactics: TacticalPreset::Penetration,
            dribble_model: DribbleModel::Basic,
            tuning: None,
        }
    }

    pub fn away_default() -> Self {
        Self {
            name: "Away".to_string(),
            formation: "4-4-2".to_string(),
            lineup: None,
            tactics: TacticalPreset::Standard,
            dribble_model: DribbleModel::Basic,
            tuning: None,
        }
    }

    pub fn with_tactics(mut self, tactics: TacticalPreset) -> Self {
        self.tactics = tactics;
        self
    }

    pub fn lineup(&self) -> Result<Formation> {
        match &self.lineup {
            Some(formation) => Ok(formation.clone()),
            None => Formation::preset(&self.formation),
        }
    }

    pub fn profile(&self) -> TacticalProfile {
        let profile =
            TacticalProfile::from_preset(self.tactics).with_dribble_model(self.dribble_model);
        match &self.tuning {
            Some(tuning) => profile.with_tuning(tuning.clone()),
            None => profile,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::MatchError;

    #[test]
    fn test_default_config_is_valid() {
        let config = MatchConfig::default();
        assert!(config.check().is_ok());
        assert_eq!(config.step_budget(), 540);
        assert_eq!(config.home.tactics, TacticalPreset::Penetration);
        assert_eq!(config.away.tactics, TacticalPreset::Standard);
    }

    #[test]
    fn test_step_must_divide_minute() {
        let mut config = MatchConfig::default();
        config.seconds_per_step = 7;
        assert!(matches!(config.check(), Err(MatchError::InvalidConfig(_))));
        config.seconds_per_step = 15;
        assert!(config.check().is_ok());
        assert_eq!(config.step_budget(), 360);
    }

    #[test]
    fn test_unknown_formation_rejected() {
        let mut config = MatchConfig::default();
        config.away.formation = "2-3-5".to_string();
        assert!(matches!(config.check(), Err(MatchError::InvalidFormation { .. })));
    }

    #[test]
    fn test_partial_json_fills_defaults() {
        let config: MatchConfig =
            serde_json::from_str(r#"{ "duration_minutes": 45, "seed": 7 }"#).unwrap();
        assert_eq!(config.duration_minutes, 45);
        assert_eq!(config.seed, Some(7));
        assert_eq!(config.seconds_per_step, DEFAULT_SECONDS_PER_STEP);
        assert_eq!(config.home.formation, "4-3-3");
    }

    #[test]
    fn test_team_profile_carries_overrides() {
        let mut team = TeamConfig::away_default().with_tactics(TacticalPreset::Counter);
        team.dribble_model = DribbleModel::ContextAware;
        team.tuning = Some(TacticalTuning { counter_attack_window: 3, ..Default::default() });
        let profile = team.profile();
        assert!(profile.counter_attack);
        assert_eq!(profile.dribble_model, DribbleModel::ContextAware);
        assert_eq!(profile.tuning.counter_attack_window, 3);
    }
}
