/// Best score seen since the world was built. Purely in memory; persisting
/// it across runs is the host's business.
#[derive(Debug, Default)]
pub struct ScoreBoard {
    high_score: u64,
}

impl ScoreBoard {
    /// Records a finished run. Returns true when the score beats the
    /// previous best; ties are not new records.
    pub fn record(&mut self, score: u64) -> bool {
        if score > self.high_score {
            self.high_score = score;
            true
        } else {
            false
        }
    }

    pub fn high_score(&self) -> u64 {
        self.high_score
    }
}
