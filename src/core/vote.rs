use crate::domain::model::{Prediction, VoteCount};

/// Frequency counter that remembers first-insertion order.
///
/// The winner is the most frequent prediction; among equal counts the one
/// seen first wins.
#[derive(Debug, Clone, Default)]
pub struct VoteTally {
    counts: Vec<VoteCount>,
}

impl VoteTally {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn record(&mut self, prediction: &Prediction) {
        match self.counts.iter_mut().find(|v| &v.prediction == prediction) {
            Some(vote) => vote.count += 1,
            None => self.counts.push(VoteCount {
                prediction: prediction.clone(),
                count: 1,
            }),
        }
    }

    pub fn total(&self) -> usize {
        self.counts.iter().map(|v| v.count).sum()
    }

    pub fn winner(&self) -> Option<&Prediction> {
        let mut best: Option<&VoteCount> = None;
        for vote in &self.counts {
            match best {
                Some(b) if vote.count <= b.count => {}
                _ => best = Some(vote),
            }
        }
        best.map(|v| &v.prediction)
    }

    pub fn into_counts(self) -> Vec<VoteCount> {
        self.counts
    }
}

impl<'a> FromIterator<&'a Prediction> for VoteTally {
    fn from_iter<I: IntoIterator<Item = &'a Prediction>>(iter: I) -> Self {
        let mut tally = VoteTally::new();
        for prediction in iter {
            tally.record(prediction);
        }
        tally
    }
}
