//! Application state for the Coach Desk API.
//!
//! This module defines the shared application state that is available
//! to all request handlers.

use std::sync::Arc;

use crate::calculation::SalaryCalculator;
use crate::config::{ConfigLoader, RosterConfig};
use crate::error::EngineResult;
use crate::feedback::FeedbackService;
use crate::notification::{Notifier, build_notifier};
use crate::store::{
    AttendanceStore, CoachStore, FeedbackStore, MemoryAttendanceStore, MemoryCoachStore,
    MemoryFeedbackStore,
};

/// Shared application state.
///
/// Holds the store collaborators, the salary calculator built over them,
/// the feedback workflow and the seed roster.
#[derive(Clone)]
pub struct AppState {
    coaches: Arc<dyn CoachStore>,
    attendance: Arc<dyn AttendanceStore>,
    calculator: SalaryCalculator,
    feedback: FeedbackService,
    roster: Arc<RosterConfig>,
}

impl AppState {
    /// Creates application state from explicit collaborators.
    pub fn new(
        coaches: Arc<dyn CoachStore>,
        attendance: Arc<dyn AttendanceStore>,
        feedback: Arc<dyn FeedbackStore>,
        notifier: Arc<dyn Notifier>,
        roster: RosterConfig,
    ) -> Self {
        Self {
            calculator: SalaryCalculator::new(coaches.clone(), attendance.clone()),
            coaches,
            attendance,
            feedback: FeedbackService::new(feedback, notifier),
            roster: Arc::new(roster),
        }
    }

    /// Creates in-memory state seeded from the configured roster, with the
    /// configured notifier.
    pub fn from_config(config: &ConfigLoader) -> EngineResult<Self> {
        let notifier = build_notifier(config.notification())?;
        Self::in_memory(config, notifier)
    }

    /// Creates in-memory state seeded from the configured roster, sending
    /// notifications through `notifier`.
    pub fn in_memory(config: &ConfigLoader, notifier: Arc<dyn Notifier>) -> EngineResult<Self> {
        let roster = config.config().roster().clone();
        let coaches = MemoryCoachStore::new(roster.coaches.clone())?;
        Ok(Self::new(
            Arc::new(coaches),
            Arc::new(MemoryAttendanceStore::new()),
            Arc::new(MemoryFeedbackStore::new()),
            notifier,
            roster,
        ))
    }

    /// Returns the coach store.
    pub fn coaches(&self) -> &Arc<dyn CoachStore> {
        &self.coaches
    }

    /// Returns the attendance store.
    pub fn attendance(&self) -> &Arc<dyn AttendanceStore> {
        &self.attendance
    }

    /// Returns the salary calculator.
    pub fn calculator(&self) -> &SalaryCalculator {
        &self.calculator
    }

    /// Returns the feedback workflow.
    pub fn feedback(&self) -> &FeedbackService {
        &self.feedback
    }

    /// Returns the seed roster.
    pub fn roster(&self) -> &RosterConfig {
        &self.roster
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_app_state_is_clone() {
        // Verify AppState can be cloned (required for axum state)
        fn assert_clone<T: Clone + Send + Sync + 'static>() {}
        assert_clone::<AppState>();
    }

    #[tokio::test]
    async fn test_from_config_seeds_coaches() {
        let config = ConfigLoader::load("./config/default").expect("Failed to load config");
        let state = AppState::from_config(&config).unwrap();
        assert_eq!(state.coaches().list_all().await.unwrap().len(), 3);
        assert!(state.attendance().list_all().await.unwrap().is_empty());
        assert_eq!(state.roster().players.len(), 3);
    }
}
