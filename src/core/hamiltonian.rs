//! Backtracking search for a Hamiltonian cycle over the compatibility graph.
//!
//! The search starts from the first participant and tries successors in
//! adjacency order, so for a given input it always returns the same cycle.
//! Worst case is exponential in the number of participants; groups are
//! expected to stay in the tens, and the constraint filtering keeps the
//! graph sparse.

use crate::core::graph::{CompatibilityGraph, ImmediateFamilyRule};
use crate::domain::model::{Assignment, HistoryIndex, Participant};
use crate::domain::ports::AssignmentStrategy;
use crate::utils::error::{Result, SantaError};

/// Path and visited set for one search. Every push is undone on backtrack.
struct CycleSearch<'g> {
    graph: &'g CompatibilityGraph,
    path: Vec<usize>,
    visited: Vec<bool>,
}

impl<'g> CycleSearch<'g> {
    fn new(graph: &'g CompatibilityGraph) -> Self {
        Self {
            graph,
            path: Vec::with_capacity(graph.len()),
            visited: vec![false; graph.len()],
        }
    }

    fn run(mut self) -> Option<Vec<usize>> {
        if self.graph.is_empty() || self.graph.has_isolated_node() {
            return None;
        }

        self.visit(0);
        if self.extend() {
            Some(self.path)
        } else {
            None
        }
    }

    fn visit(&mut self, node: usize) {
        self.visited[node] = true;
        self.path.push(node);
    }

    fn unvisit(&mut self) {
        if let Some(node) = self.path.pop() {
            self.visited[node] = false;
        }
    }

    fn extend(&mut self) -> bool {
        let Some(&current) = self.path.last() else {
            return false;
        };

        if self.path.len() == self.graph.len() {
            return self.graph.has_edge(current, self.path[0]);
        }

        let graph = self.graph;
        for &next in graph.successors(current) {
            if self.visited[next] {
                continue;
            }
            self.visit(next);
            if self.extend() {
                return true;
            }
            self.unvisit();
        }
        false
    }
}

/// Returns participant indices forming a cycle through every node, or `None`
/// once every branch is exhausted.
pub fn find_hamiltonian_cycle(graph: &CompatibilityGraph) -> Option<Vec<usize>> {
    CycleSearch::new(graph).run()
}

/// Consecutive pairs of the cycle, wrapping from the last participant back to the first.
pub fn assignments_from_cycle(
    year: i32,
    participants: &[Participant],
    cycle: &[usize],
) -> Vec<Assignment> {
    cycle
        .iter()
        .zip(cycle.iter().cycle().skip(1))
        .map(|(&santa, &recipient)| {
            Assignment::new(year, participants[santa].id, participants[recipient].id)
        })
        .collect()
}

#[derive(Debug, Clone, Copy, Default)]
pub struct HamiltonianCycleStrategy {
    rule: ImmediateFamilyRule,
}

impl HamiltonianCycleStrategy {
    pub fn new(rule: ImmediateFamilyRule) -> Self {
        Self { rule }
    }

    pub fn rule(&self) -> ImmediateFamilyRule {
        self.rule
    }
}

impl AssignmentStrategy for HamiltonianCycleStrategy {
    fn generate_assignments(
        &self,
        year: i32,
        participants: &[Participant],
        history: &HistoryIndex,
    ) -> Result<Vec<Assignment>> {
        let graph = CompatibilityGraph::build(participants, history, self.rule);
        tracing::debug!(
            "Compatibility graph for {}: {} participants, {} admissible pairings",
            year,
            graph.len(),
            graph.edge_count()
        );

        let cycle = find_hamiltonian_cycle(&graph).ok_or_else(|| {
            SantaError::assignment_impossible(
                "Failed to generate valid assignments due to family constraints",
            )
        })?;

        tracing::info!("Successfully generated assignments using HAMILTONIAN_CYCLE strategy");
        Ok(assignments_from_cycle(year, participants, &cycle))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::model::RelationEdge;
    use crate::utils::error::ErrorCategory;

    fn six_members() -> Vec<Participant> {
        vec![
            Participant::new(1, 1, "A"),
            Participant::new(2, 1, "B"),
            Participant::new(3, 2, "C"),
            Participant::new(4, 2, "D"),
            Participant::new(5, 3, "E"),
            Participant::new(6, 3, "F"),
        ]
    }

    fn pairs(assignments: &[Assignment]) -> Vec<(i64, i64)> {
        assignments
            .iter()
            .map(|a| (a.santa_id, a.recipient_id))
            .collect()
    }

    #[test]
    fn test_first_cycle_in_adjacency_order() {
        let members = six_members();
        let graph =
            CompatibilityGraph::build(&members, &HistoryIndex::new(), ImmediateFamilyRule::AnyEdge);

        let cycle = find_hamiltonian_cycle(&graph).unwrap();

        // A → C → B → E → D → F → A
        assert_eq!(cycle, vec![0, 2, 1, 4, 3, 5]);
    }

    #[test]
    fn test_search_is_deterministic() {
        let members = six_members();
        let history = HistoryIndex::from_assignments(&[Assignment::new(2023, 1, 3)]);
        let strategy = HamiltonianCycleStrategy::default();

        let first = strategy.generate_assignments(2024, &members, &history).unwrap();
        for _ in 0..5 {
            let again = strategy.generate_assignments(2024, &members, &history).unwrap();
            assert_eq!(again, first);
        }
    }

    #[test]
    fn test_assignments_wrap_around() {
        let members = six_members();
        let assignments = assignments_from_cycle(2024, &members, &[0, 2, 1, 4, 3, 5]);

        assert_eq!(
            pairs(&assignments),
            vec![(1, 3), (3, 2), (2, 5), (5, 4), (4, 6), (6, 1)]
        );
        assert!(assignments.iter().all(|a| a.assignment_year == 2024));
        assert!(assignments.iter().all(|a| a.id.is_none()));
    }

    #[test]
    fn test_cycle_must_close() {
        // A → B → C → D covers every node but D has no edge back to A
        let members = vec![
            Participant::new(1, 1, "A"),
            Participant::new(2, 2, "B"),
            Participant::new(3, 3, "C"),
            Participant::new(4, 4, "D"),
        ];
        let history = HistoryIndex::from_assignments(&[
            Assignment::new(2023, 1, 3),
            Assignment::new(2023, 1, 4),
            Assignment::new(2023, 2, 1),
            Assignment::new(2023, 2, 4),
            Assignment::new(2023, 3, 2),
            Assignment::new(2023, 4, 1),
            Assignment::new(2023, 4, 3),
        ]);
        let graph = CompatibilityGraph::build(&members, &history, ImmediateFamilyRule::AnyEdge);

        assert_eq!(graph.successors(0), &[1]);
        assert_eq!(graph.successors(1), &[2]);
        assert_eq!(graph.successors(2), &[0, 3]);
        assert_eq!(graph.successors(3), &[1]);
        assert!(!graph.has_isolated_node());
        assert_eq!(find_hamiltonian_cycle(&graph), None);
    }

    #[test]
    fn test_backtracks_past_dead_end() {
        // 第一個候選 (B) 走不通，必須退回改走 C
        let members = vec![
            Participant::new(1, 1, "A"),
            Participant::new(2, 2, "B"),
            Participant::new(3, 3, "C"),
        ];
        let history = HistoryIndex::from_assignments(&[
            Assignment::new(2023, 2, 3),
            Assignment::new(2023, 3, 1),
        ]);
        let graph = CompatibilityGraph::build(&members, &history, ImmediateFamilyRule::AnyEdge);
        assert_eq!(graph.successors(0), &[1, 2]);

        assert_eq!(find_hamiltonian_cycle(&graph), Some(vec![0, 2, 1]));
    }

    #[test]
    fn test_two_from_same_family_has_no_cycle() {
        let members = vec![Participant::new(1, 1, "A"), Participant::new(2, 1, "B")];
        let strategy = HamiltonianCycleStrategy::default();

        for _ in 0..3 {
            let err = strategy
                .generate_assignments(2024, &members, &HistoryIndex::new())
                .unwrap_err();
            assert_eq!(err.category(), ErrorCategory::AssignmentImpossible);
            assert_eq!(
                err.to_string(),
                "Failed to generate valid assignments due to family constraints"
            );
        }
    }

    #[test]
    fn test_two_participants_swap() {
        let members = vec![Participant::new(1, 1, "A"), Participant::new(2, 2, "B")];
        let strategy = HamiltonianCycleStrategy::default();

        let assignments = strategy
            .generate_assignments(2024, &members, &HistoryIndex::new())
            .unwrap();
        assert_eq!(pairs(&assignments), vec![(1, 2), (2, 1)]);

        let history = HistoryIndex::from_assignments(&assignments);
        assert!(strategy.generate_assignments(2025, &members, &history).is_err());
    }

    #[test]
    fn test_degenerate_graphs() {
        let empty = CompatibilityGraph::build(&[], &HistoryIndex::new(), ImmediateFamilyRule::AnyEdge);
        assert_eq!(find_hamiltonian_cycle(&empty), None);

        let single = CompatibilityGraph::build(
            &[Participant::new(1, 1, "A")],
            &HistoryIndex::new(),
            ImmediateFamilyRule::AnyEdge,
        );
        assert_eq!(find_hamiltonian_cycle(&single), None);
    }

    #[test]
    fn test_immediate_family_rules_diverge() {
        let members = vec![
            Participant::new(1, 1, "A").with_relation(RelationEdge::immediate_family(2)),
            Participant::new(2, 2, "B"),
            Participant::new(3, 3, "C"),
            Participant::new(4, 4, "D"),
        ];

        let err = HamiltonianCycleStrategy::new(ImmediateFamilyRule::AnyEdge)
            .generate_assignments(2024, &members, &HistoryIndex::new())
            .unwrap_err();
        assert_eq!(err.category(), ErrorCategory::AssignmentImpossible);

        let assignments = HamiltonianCycleStrategy::new(ImmediateFamilyRule::Targeted)
            .generate_assignments(2024, &members, &HistoryIndex::new())
            .unwrap();
        assert_eq!(pairs(&assignments), vec![(1, 3), (3, 2), (2, 4), (4, 1)]);
        assert!(!assignments
            .iter()
            .any(|a| (a.santa_id, a.recipient_id) == (1, 2) || (a.santa_id, a.recipient_id) == (2, 1)));
    }

    #[test]
    fn test_larger_group_covers_everyone() {
        let members: Vec<Participant> = (1..=24)
            .map(|id| Participant::new(id, ((id - 1) / 3) as i32, format!("P{}", id)))
            .collect();

        let assignments = HamiltonianCycleStrategy::default()
            .generate_assignments(2024, &members, &HistoryIndex::new())
            .unwrap();

        assert_eq!(assignments.len(), 24);
        let mut givers: Vec<i64> = assignments.iter().map(|a| a.santa_id).collect();
        let mut recipients: Vec<i64> = assignments.iter().map(|a| a.recipient_id).collect();
        givers.sort();
        recipients.sort();
        let all: Vec<i64> = (1..=24).collect();
        assert_eq!(givers, all);
        assert_eq!(recipients, all);
    }
}
