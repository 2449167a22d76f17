pub const WIN_NORMALIZATION: f64 = 2.0;
pub const EXPLORATION: f64 = 2.0;


/// Tuning for the UCB1 rule `wins / (normalization * visits) +
/// sqrt(exploration * ln(parent_visits) / visits)`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct MctsConfig {
    /// Divides the 0/1/2 win contributions down to a win rate.
    pub win_normalization: f64,

    /// Weight inside the exploration square root during tree descent.
    pub exploration: f64,

    /// Weight used when picking the move to play once the budget is spent.
    pub final_exploration: f64,
}

impl Default for MctsConfig {
    fn default() -> Self {
        return Self {
            win_normalization: WIN_NORMALIZATION,
            exploration: EXPLORATION,
            final_exploration: EXPLORATION,
        }
    }
}

impl MctsConfig {
    pub fn with_win_normalization(mut self, normalization: f64) -> Self {
        self.win_normalization = normalization;
        return self;
    }

    pub fn with_exploration(mut self, exploration: f64) -> Self {
        self.exploration = exploration;
        return self;
    }

    /// 0.0 picks the child with the best win rate.
    pub fn with_final_exploration(mut self, exploration: f64) -> Self {
        self.final_exploration = exploration;
        return self;
    }
}


#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_match_plain_ucb1() {
        let config = MctsConfig::default();
        assert!((config.win_normalization - 2.0).abs() < 1e-12);
        assert!((config.exploration - 2.0).abs() < 1e-12);
        assert!((config.final_exploration - config.exploration).abs() < 1e-12);
    }

    #[test]
    fn builder_overrides_fields() {
        let config = MctsConfig::default()
            .with_exploration(1.0)
            .with_final_exploration(0.0)
            .with_win_normalization(4.0);
        assert!((config.exploration - 1.0).abs() < 1e-12);
        assert!(config.final_exploration.abs() < 1e-12);
        assert!((config.win_normalization - 4.0).abs() < 1e-12);
    }
}
