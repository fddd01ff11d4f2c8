use super::{Action, Seat};
use serde::{Deserialize, Serialize};

/// The ordered log of every accepted action in a match. Together with
/// the match seed this reproduces a game exactly, and it is what the
/// transport replays to a client that joins late.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct GameHistory {
    entries: Vec<(Seat, Action)>,
}

impl GameHistory {
    pub fn new() -> Self {
        GameHistory::default()
    }

    pub fn record(&mut self, seat: Seat, action: Action) {
        self.entries.push((seat, action));
    }

    pub fn entries(&self) -> &[(Seat, Action)] {
        &self.entries
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Completed turns so far: one per `EndTurn` in the log.
    pub fn num_turns(&self) -> usize {
        self.entries
            .iter()
            .filter(|(_, a)| matches!(a, Action::EndTurn))
            .count()
    }
}

impl IntoIterator for GameHistory {
    type Item = (Seat, Action);
    type IntoIter = std::vec::IntoIter<(Seat, Action)>;

    fn into_iter(self) -> Self::IntoIter {
        self.entries.into_iter()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn num_turns_counts_end_turns() {
        let mut history = GameHistory::new();
        history.record(0, Action::Pass);
        history.record(0, Action::EndTurn);
        history.record(1, Action::Pass);
        assert_eq!(history.num_turns(), 1);
        history.record(1, Action::EndTurn);
        assert_eq!(history.num_turns(), 2);
        assert_eq!(history.len(), 4);
    }
}
