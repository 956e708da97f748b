use serde::Serialize;
use tracing::info;

use crate::clue_store::ClueStore;
use crate::suspect_index::SuspectIndex;

/// Clues that must point at the accused for the case to close.
pub const RESOLVED_THRESHOLD: usize = 2;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Outcome {
    /// Nothing was collected, so no accusation can be weighed.
    NoEvidence,
    Resolved,
    Inconclusive,
    IncorrectAccusation,
}

impl Outcome {
    pub fn classify(count: usize) -> Self {
        match count {
            0 => Outcome::IncorrectAccusation,
            n if n >= RESOLVED_THRESHOLD => Outcome::Resolved,
            _ => Outcome::Inconclusive,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct EvidenceLine {
    pub clue: String,
    /// `None` when the clue is not in the index.
    pub suspect: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Judgement {
    pub accused: String,
    pub count: usize,
    pub outcome: Outcome,
}

/// Number of collected clues whose suspect is exactly `accused`.
pub fn count_clues_for_suspect(store: &ClueStore, index: &SuspectIndex, accused: &str) -> usize {
    store
        .iter()
        .filter(|clue| index.lookup(clue) == Some(accused))
        .count()
}

pub struct VerdictEvaluator<'a> {
    store: &'a ClueStore,
    index: &'a SuspectIndex,
}

impl<'a> VerdictEvaluator<'a> {
    pub fn new(store: &'a ClueStore, index: &'a SuspectIndex) -> Self {
        Self { store, index }
    }

    /// Callers should check this before asking who to accuse.
    pub fn has_evidence(&self) -> bool {
        !self.store.is_empty()
    }

    /// Collected clues in ascending order with the suspect each one names.
    pub fn evidence(&self) -> Vec<EvidenceLine> {
        self.store
            .iter()
            .map(|clue| EvidenceLine {
                clue: clue.to_string(),
                suspect: self.index.lookup(clue).map(str::to_string),
            })
            .collect()
    }

    pub fn judge(&self, accused: &str) -> Judgement {
        if !self.has_evidence() {
            return Judgement {
                accused: accused.to_string(),
                count: 0,
                outcome: Outcome::NoEvidence,
            };
        }

        let count = count_clues_for_suspect(self.store, self.index, accused);
        let outcome = Outcome::classify(count);
        info!(accused, count, ?outcome, "accusation weighed");
        Judgement {
            accused: accused.to_string(),
            count,
            outcome,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn index() -> SuspectIndex {
        let mut index = SuspectIndex::new();
        index.insert("Livro aberto sobre venenos", "Mordomo");
        index.insert("Frasco vazio de arsenico", "Mordomo");
        index.insert("Faca desaparecida do bloco", "Cozinheiro");
        index
    }

    fn store(clues: &[&str]) -> ClueStore {
        let mut store = ClueStore::new();
        for clue in clues {
            store.insert(clue);
        }
        store
    }

    #[test]
    fn test_classification_thresholds() {
        assert_eq!(Outcome::classify(0), Outcome::IncorrectAccusation);
        assert_eq!(Outcome::classify(1), Outcome::Inconclusive);
        assert_eq!(Outcome::classify(2), Outcome::Resolved);
        assert_eq!(Outcome::classify(7), Outcome::Resolved);
    }

    #[test]
    fn test_two_clues_resolve() {
        let index = index();
        let store = store(&["Livro aberto sobre venenos", "Frasco vazio de arsenico"]);
        assert_eq!(count_clues_for_suspect(&store, &index, "Mordomo"), 2);
        let judgement = VerdictEvaluator::new(&store, &index).judge("Mordomo");
        assert_eq!(judgement.count, 2);
        assert_eq!(judgement.outcome, Outcome::Resolved);
    }

    #[test]
    fn test_one_clue_inconclusive() {
        let index = index();
        let store = store(&["Frasco vazio de arsenico", "Faca desaparecida do bloco"]);
        let judgement = VerdictEvaluator::new(&store, &index).judge("Mordomo");
        assert_eq!(judgement.count, 1);
        assert_eq!(judgement.outcome, Outcome::Inconclusive);
    }

    #[test]
    fn test_match_is_exact_and_case_sensitive() {
        let index = index();
        let store = store(&["Livro aberto sobre venenos", "Frasco vazio de arsenico"]);
        let evaluator = VerdictEvaluator::new(&store, &index);
        assert_eq!(evaluator.judge("mordomo").outcome, Outcome::IncorrectAccusation);
        assert_eq!(evaluator.judge("Mordomo ").count, 0);
    }

    #[test]
    fn test_unresolved_clues_are_listed_but_not_counted() {
        let index = index();
        let store = store(&["Pegadas na lama", "Faca desaparecida do bloco"]);
        let evaluator = VerdictEvaluator::new(&store, &index);
        assert_eq!(
            evaluator.evidence(),
            vec![
                EvidenceLine {
                    clue: "Faca desaparecida do bloco".into(),
                    suspect: Some("Cozinheiro".into()),
                },
                EvidenceLine {
                    clue: "Pegadas na lama".into(),
                    suspect: None,
                },
            ]
        );
        assert_eq!(evaluator.judge("Cozinheiro").count, 1);
    }

    #[test]
    fn test_empty_store_has_no_evidence() {
        let index = index();
        let store = ClueStore::new();
        let evaluator = VerdictEvaluator::new(&store, &index);
        assert!(!evaluator.has_evidence());
        assert!(evaluator.evidence().is_empty());
        assert_eq!(evaluator.judge("Mordomo").outcome, Outcome::NoEvidence);
    }
}
