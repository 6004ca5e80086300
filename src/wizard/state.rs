use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum WizardError {
    #[error("step {step} is outside 1..={total_steps}")]
    StepOutOfRange { step: usize, total_steps: usize },
    #[error("a wizard needs at least one step")]
    NoSteps,
}

/// Position of the wizard. `current_step` is 1-based and always within
/// `1..=total_steps`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct WizardState {
    current_step: usize,
    total_steps: usize,
}

impl WizardState {
    pub fn new(total_steps: usize) -> Result<Self, WizardError> {
        if total_steps == 0 {
            return Err(WizardError::NoSteps);
        }
        Ok(Self {
            current_step: 1,
            total_steps,
        })
    }

    pub fn current_step(&self) -> usize {
        self.current_step
    }

    pub fn total_steps(&self) -> usize {
        self.total_steps
    }

    pub fn is_final(&self) -> bool {
        self.current_step == self.total_steps
    }

    pub fn check_target(&self, step: usize) -> Result<(), WizardError> {
        if (1..=self.total_steps).contains(&step) {
            Ok(())
        } else {
            Err(WizardError::StepOutOfRange {
                step,
                total_steps: self.total_steps,
            })
        }
    }

    pub fn set_step(&mut self, step: usize) -> Result<(), WizardError> {
        self.check_target(step)?;
        self.current_step = step;
        Ok(())
    }

    pub fn reset(&mut self) {
        self.current_step = 1;
    }

    /// Width of the progress bar in percent. A single-step wizard is always
    /// complete.
    pub fn progress_percent(&self) -> f64 {
        if self.total_steps == 1 {
            return 100.0;
        }
        (self.current_step - 1) as f64 / (self.total_steps - 1) as f64 * 100.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn close(a: f64, b: f64) -> bool {
        (a - b).abs() < 0.01
    }

    #[test]
    fn starts_on_first_step() {
        let state = WizardState::new(4).unwrap();
        assert_eq!(state.current_step(), 1);
        assert!(!state.is_final());
    }

    #[test]
    fn zero_steps_is_rejected() {
        assert_eq!(WizardState::new(0), Err(WizardError::NoSteps));
    }

    #[test]
    fn progress_for_four_steps() {
        let mut state = WizardState::new(4).unwrap();
        assert!(close(state.progress_percent(), 0.0));
        state.set_step(3).unwrap();
        assert!(close(state.progress_percent(), 66.67));
        state.set_step(4).unwrap();
        assert!(close(state.progress_percent(), 100.0));
        assert!(state.is_final());
    }

    #[test]
    fn single_step_is_complete() {
        let state = WizardState::new(1).unwrap();
        assert!(close(state.progress_percent(), 100.0));
    }

    #[test]
    fn out_of_range_target_keeps_step() {
        let mut state = WizardState::new(3).unwrap();
        state.set_step(2).unwrap();
        assert_eq!(
            state.set_step(4),
            Err(WizardError::StepOutOfRange { step: 4, total_steps: 3 })
        );
        assert!(state.set_step(0).is_err());
        assert_eq!(state.current_step(), 2);
    }

    #[test]
    fn reset_returns_to_first_step() {
        let mut state = WizardState::new(3).unwrap();
        state.set_step(3).unwrap();
        state.reset();
        assert_eq!(state.current_step(), 1);
    }
}
