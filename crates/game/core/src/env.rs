//! Read-only environment facts available to intent transitions.

use crate::config::GameConfig;

/// Borrowed view of the ambient configuration handed to every transition.
///
/// Transitions receive `GameEnv` instead of raw references so additional
/// environment facts can be threaded through without touching each call
/// site. All access is read-only; transitions must stay side-effect free
/// apart from the state mutation in `apply`.
#[derive(Clone, Copy)]
pub struct GameEnv<'a> {
    config: &'a GameConfig,
}

impl<'a> GameEnv<'a> {
    pub fn new(config: &'a GameConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &GameConfig {
        self.config
    }
}
