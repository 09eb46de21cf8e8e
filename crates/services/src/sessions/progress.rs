/// Aggregated view of session progress, useful for UI.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SessionProgress {
    pub total: usize,
    pub answered: usize,
    pub remaining: usize,
    /// One-based number of the problem on screen; `None` once complete.
    pub position: Option<usize>,
    pub is_complete: bool,
}

impl SessionProgress {
    /// Whole percent of the run reached by the problem on screen.
    #[must_use]
    pub fn percent_through(&self) -> usize {
        if self.total == 0 {
            return 0;
        }
        let reached = self.position.unwrap_or(self.total);
        (reached * 200 + self.total) / (self.total * 2)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn percent_through_counts_the_problem_on_screen() {
        let progress = SessionProgress {
            total: 10,
            answered: 2,
            remaining: 8,
            position: Some(3),
            is_complete: false,
        };
        assert_eq!(progress.percent_through(), 30);

        let done = SessionProgress {
            position: None,
            is_complete: true,
            answered: 10,
            remaining: 0,
            ..progress
        };
        assert_eq!(done.percent_through(), 100);
    }
}
