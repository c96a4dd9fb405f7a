//! Team tactics: profiles and the weight modifiers they drive.

pub mod modifiers;
pub mod profile;

pub use modifiers::{
    adjust_dribble_weight, adjust_pass_weight, adjust_shot_weight, is_final_third_entry,
    is_in_final_third, is_key_chance, ActionContext,
};
pub use profile::{DribbleModel, TacticalPreset, TacticalProfile, TacticalTuning};
