//! Step interface for bots, training harnesses and UIs.

mod shelem_env;
mod step;

pub use shelem_env::ShelemEnv;
pub use step::{StepEvent, StepInfo, StepResult};
