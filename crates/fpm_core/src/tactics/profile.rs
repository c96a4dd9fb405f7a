//! Tactical profiles
//!
//! A `TacticalProfile` is the per-team bundle of behaviour switches and tuning
//! constants. It is built once from a [`TacticalPreset`] (optionally with a
//! tuning override) and shared read-only by every player of the team.

use serde::{Deserialize, Serialize};

/// Named team behaviour preset
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum TacticalPreset {
    /// Plain weights, dribbles held back early in a possession
    #[default]
    Standard,
    /// Patient build-up: pass chains, dribble restraint, selective shooting
    Possession,
    /// Build-up plus final-third penetration and counter-attack triggers
    Penetration,
    /// Direct play: counter-attack triggers and final-third penetration only
    Counter,
}

impl TacticalPreset {
    pub const ALL: [TacticalPreset; 4] = [
        TacticalPreset::Standard,
        TacticalPreset::Possession,
        TacticalPreset::Penetration,
        TacticalPreset::Counter,
    ];

    pub fn display_name(&self) -> &'static str {
        match self {
            Self::Standard => "Standard",
            Self::Possession => "Possession",
            Self::Penetration => "Penetration",
            Self::Counter => "Counter",
        }
    }

    pub fn description(&self) -> &'static str {
        match self {
            Self::Standard => "Skill-driven choices with early dribble restraint",
            Self::Possession => "Build long pass chains and wait for a quality shot",
            Self::Penetration => "Work the ball into the final third and punish turnovers",
            Self::Counter => "Break forward quickly after winning the ball",
        }
    }
}

/// Dribble success model
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum DribbleModel {
    /// `max(0.2, dribbling - 0.15 * pressure)`
    #[default]
    Basic,
    /// Density, space-ahead and final-third-potential estimator
    ContextAware,
}

/// Overridable tactical constants.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct TacticalTuning {
    // Possession build-up
    pub possession_pass_multiplier: f32,
    /// Pass scaling applies while the chain is shorter than this
    pub possession_chain_limit: u32,
    pub chain_build_bonus: f32,
    pub long_chain_pass_damping: f32,
    pub restraint_dribble_multiplier: f32,
    /// Restraint applies while the chain is shorter than this
    pub restraint_chain_limit: u32,
    /// Confidence gain multiplier once the chain reaches `confidence_gain_chain`
    pub chain_confidence_gain: f32,
    pub confidence_gain_chain: u32,
    /// Confidence loss multiplier once the chain reaches `confidence_loss_chain`
    pub chain_confidence_damping: f32,
    pub confidence_loss_chain: u32,

    // Dribble filter
    pub dribble_success_threshold: f32,
    pub dribble_failure_penalty: f32,
    pub dribble_success_reward: f32,

    // Shot selection
    pub shot_chain_bonus: f32,
    pub shot_chain_threshold: u32,
    pub low_xg_threshold: f32,
    pub low_xg_multiplier: f32,
    pub low_xg_reward: f32,
    pub on_target_reward: f32,
    pub goal_reward: f32,
    /// Confidence gained per unit of pending shot reward
    pub reward_confidence_gain: f32,
    /// Confidence lost per unit of negative shot reward
    pub reward_confidence_loss: f32,

    // Final-third penetration
    pub entry_pass_multiplier: f32,
    pub final_third_pass_multiplier: f32,
    pub entry_dribble_multiplier: f32,
    pub final_third_dribble_multiplier: f32,
    pub key_chance_shot_multiplier: f32,
    pub final_third_shot_multiplier: f32,
    pub final_third_bonus: f32,
    pub key_chance_bonus: f32,
    /// Share of `final_third_bonus` credited to a dribble inside the final third
    pub final_third_play_share: f32,
    pub entry_target_bonus: f32,
    pub final_row_target_bonus: f32,
    pub progressive_target_bonus: f32,
    pub attacker_target_bonus: f32,

    // Counter-attack
    pub counter_attack_bonus: f32,
    pub counter_shot_factor: f32,
    pub counter_attack_window: u8,
}

impl Default for TacticalTuning {
    fn default() -> Self {
        Self {
            possession_pass_multiplier: 1.5,
            possession_chain_limit: 4,
            chain_build_bonus: 1.3,
            long_chain_pass_damping: 0.9,
            restraint_dribble_multiplier: 0.7,
            restraint_chain_limit: 3,
            chain_confidence_gain: 1.3,
            confidence_gain_chain: 3,
            chain_confidence_damping: 0.7,
            confidence_loss_chain: 2,

            dribble_success_threshold: 0.65,
            dribble_failure_penalty: 5.0,
            dribble_success_reward: 4.0,

            shot_chain_bonus: 1.2,
            shot_chain_threshold: 3,
            low_xg_threshold: 0.07,
            low_xg_multiplier: 0.3,
            low_xg_reward: -4.0,
            on_target_reward: 3.0,
            goal_reward: 10.0,
            reward_confidence_gain: 0.01,
            reward_confidence_loss: 0.005,

            entry_pass_multiplier: 2.5,
            final_third_pass_multiplier: 1.4,
            entry_dribble_multiplier: 2.0,
            final_third_dribble_multiplier: 1.6,
            key_chance_shot_multiplier: 3.0,
            final_third_shot_multiplier: 1.8,
            final_third_bonus: 5.0,
            key_chance_bonus: 10.0,
            final_third_play_share: 0.6,
            entry_target_bonus: 1.5,
            final_row_target_bonus: 0.8,
            progressive_target_bonus: 0.4,
            attacker_target_bonus: 0.6,

            counter_attack_bonus: 8.0,
            counter_shot_factor: 0.6,
            counter_attack_window: 2,
        }
    }
}

impl TacticalTuning {
    /// Additive shot bonus while the counter-attack window is open
    pub fn counter_shot_bonus(&self) -> f32 {
        self.counter_attack_bonus * self.counter_shot_factor
    }
}

/// Per-team behaviour switches plus tuning.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TacticalProfile {
    pub preset: TacticalPreset,
    pub possession_build_up: bool,
    pub dribble_filter: bool,
    pub dribble_restraint: bool,
    pub shot_selection: bool,
    pub final_third_penetration: bool,
    pub counter_attack: bool,
    pub dribble_model: DribbleModel,
    pub tuning: TacticalTuning,
}

impl Default for TacticalProfile {
    fn default() -> Self {
        Self::from_preset(TacticalPreset::default())
    }
}

impl TacticalProfile {
    /// All switches off
    pub fn plain() -> Self {
        Self {
            preset: TacticalPreset::Standard,
            possession_build_up: false,
            dribble_filter: false,
            dribble_restraint: false,
            shot_selection: false,
            final_third_penetration: false,
            counter_attack: false,
            dribble_model: DribbleModel::Basic,
            tuning: TacticalTuning::default(),
        }
    }

    pub fn from_preset(preset: TacticalPreset) -> Self {
        let base = Self { preset, ..Self::plain() };
        match preset {
            TacticalPreset::Standard => Self { dribble_restraint: true, ..base },
            TacticalPreset::Possession => Self {
                possession_build_up: true,
                dribble_restraint: true,
                shot_selection: true,
                ..base
            },
            TacticalPreset::Penetration => Self {
                possession_build_up: true,
                dribble_filter: true,
                shot_selection: true,
                final_third_penetration: true,
                counter_attack: true,
                ..base
            },
            TacticalPreset::Counter => Self {
                final_third_penetration: true,
                counter_attack: true,
                ..base
            },
        }
    }

    pub fn with_tuning(mut self, tuning: TacticalTuning) -> Self {
        self.tuning = tuning;
        self
    }

    pub fn with_dribble_model(mut self, model: DribbleModel) -> Self {
        self.dribble_model = model;
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_preset_switches() {
        let standard = TacticalProfile::from_preset(TacticalPreset::Standard);
        assert!(standard.dribble_restraint);
        assert!(!standard.possession_build_up);
        assert!(!standard.counter_attack);

        let penetration = TacticalProfile::from_preset(TacticalPreset::Penetration);
        assert!(penetration.possession_build_up);
        assert!(penetration.dribble_filter);
        assert!(penetration.shot_selection);
        assert!(penetration.final_third_penetration);
        assert!(penetration.counter_attack);
        assert!(!penetration.dribble_restraint);

        let counter = TacticalProfile::from_preset(TacticalPreset::Counter);
        assert!(counter.counter_attack && counter.final_third_penetration);
        assert!(!counter.possession_build_up);
    }

    #[test]
    fn test_counter_shot_bonus() {
        let tuning = TacticalTuning::default();
        assert!((tuning.counter_shot_bonus() - 4.8).abs() < 1e-5);
    }

    #[test]
    fn test_partial_tuning_override_keeps_defaults() {
        let tuning: TacticalTuning =
            serde_json::from_str(r#"{ "entry_pass_multiplier": 3.0 }"#).unwrap();
        assert_eq!(tuning.entry_pass_multiplier, 3.0);
        assert_eq!(tuning.key_chance_bonus, 10.0);
        assert_eq!(tuning.final_third_play_share, 0.6);
        assert_eq!(tuning.chain_confidence_gain, 1.3);

        let tuning: TacticalTuning =
            serde_json::from_str(r#"{ "final_third_play_share": 0.5, "reward_confidence_loss": 0.02 }"#)
                .unwrap();
        assert_eq!(tuning.final_third_play_share, 0.5);
        assert_eq!(tuning.reward_confidence_loss, 0.02);
        assert_eq!(tuning.reward_confidence_gain, 0.01);
    }
}
