mod engine;
pub mod format;
mod retirement;
mod types;

pub use engine::{calculate_goal, calculate_lumpsum, calculate_sip};
pub use retirement::{DELAY_YEARS, calculate_retirement};
pub use types::{
    DelayScenario, ExistingSaving, GoalInputs, GoalPlan, GoalResult, LumpsumInputs, LumpsumResult,
    Period, RetirementInputs, RetirementResult, SipInputs, SipResult,
};
