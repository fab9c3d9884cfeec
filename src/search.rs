use std::fmt::{self, Display};
use std::sync::atomic::{AtomicU32, Ordering};
use std::time::Duration;

use indicatif::{ProgressBar, ProgressStyle};
use rayon::prelude::*;

use crate::bitmask::{CanRepresentLetterBitmask, LetterBitmask};
use crate::roster::{CandidatePtr, Roster};
use crate::scoring::{letter_frequencies, rank_by_rarity, rarity_weights, RARITY_EXPONENT};

/// Represents verbosity options for a search.
#[derive(Clone, Copy, PartialEq, Eq)]
pub enum Verbosity {
    Silent,
    PrettyPrint,
    Debug,
}

/// Counters describing how much of the subset space a search touched.
#[derive(Debug, Default, Clone, Copy)]
pub struct SearchStats {
    pub nodes: u64,
    pub teams_scored: u64,
    pub feasibility_prunes: u64,
    pub bound_prunes: u64,
}

impl SearchStats {
    fn absorb(&mut self, other: &SearchStats) {
        self.nodes += other.nodes;
        self.teams_scored += other.teams_scored;
        self.feasibility_prunes += other.feasibility_prunes;
        self.bound_prunes += other.bound_prunes;
    }
}

impl Display for SearchStats {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} nodes, {} teams scored, {} feasibility prunes, {} bound prunes",
            self.nodes, self.teams_scored, self.feasibility_prunes, self.bound_prunes
        )
    }
}

/// A complete team, members in selection order.
#[derive(Debug, Clone)]
pub struct Team {
    members: Vec<CandidatePtr>,
}

impl Team {
    fn from_indices(indices: &[usize], ranked: &[CandidatePtr]) -> Self {
        Team {
            members: indices.iter().map(|&i| ranked[i].clone()).collect(),
        }
    }

    pub fn members(&self) -> &[CandidatePtr] {
        &self.members
    }

    /// OR of every member's letter mask.
    pub fn combined_mask(&self) -> LetterBitmask {
        self.members
            .iter()
            .fold(0, |mask, member| mask | member.letters())
    }

    pub fn coverage(&self) -> u32 {
        self.combined_mask().coverage()
    }

    pub fn missing_letters(&self) -> LetterBitmask {
        self.combined_mask().missing_letters()
    }
}

/// Everything a finished search produced. When `teams` is empty the requested
/// size was unsatisfiable and `best_coverage` is 0.
pub struct SearchOutcome {
    pub best_coverage: u32,
    pub teams: Vec<Team>,
    pub stats: SearchStats,
}

/// Best-so-far aggregate: one per search, or one per worker when parallel.
#[derive(Default)]
struct RunningBest {
    coverage: u32,
    teams: Vec<Team>,
    stats: SearchStats,
}

impl RunningBest {
    /// Max-then-collect-ties update with a freshly completed team. A strictly
    /// better team replaces the collection; an equal one joins it.
    fn record(
        &mut self,
        mask: LetterBitmask,
        indices: &[usize],
        ranked: &[CandidatePtr],
        bound: Option<&AtomicU32>,
    ) {
        self.stats.teams_scored += 1;

        let coverage = mask.coverage();
        if coverage < self.coverage {
            return;
        }
        if coverage > self.coverage {
            self.coverage = coverage;
            self.teams.clear();
            if let Some(bound) = bound {
                bound.fetch_max(coverage, Ordering::Relaxed);
            }
        }

        self.teams.push(Team::from_indices(indices, ranked));
    }
}

/// Single-use branch-and-bound searcher over a rarity-ranked roster.
///
/// Construction ranks the candidates and precomputes the suffix coverage
/// table; afterwards all tables are read-only, so `solve_parallel` can fan
/// branches across threads without locking anything but the running best.
pub struct TeamFinder {
    ranked: Vec<CandidatePtr>,
    suffix_masks: Vec<LetterBitmask>,
    team_size: usize,
    verbosity: Verbosity,
}

impl TeamFinder {
    pub fn new(roster: Roster, team_size: usize) -> Self {
        let candidates = roster.into_candidates();
        let weights = rarity_weights(&letter_frequencies(&candidates), RARITY_EXPONENT);
        let ranked = rank_by_rarity(candidates, &weights);
        let suffix_masks = compute_suffix_masks(&ranked);

        TeamFinder {
            ranked,
            suffix_masks,
            team_size,
            verbosity: Verbosity::Silent,
        }
    }

    pub fn set_verbosity(&mut self, verbosity: Verbosity) {
        self.verbosity = verbosity;
    }

    /// Candidates in search order, rarest letters first.
    pub fn ranked(&self) -> &[CandidatePtr] {
        &self.ranked
    }

    /// Depth-first search on the calling thread.
    pub fn solve(&self) -> SearchOutcome {
        let pb = self.progress_bar();

        let mut best = RunningBest::default();
        let mut team = Vec::with_capacity(self.team_size);
        self.recurse(0, &mut team, 0, &mut best, None, &pb);

        pb.finish_and_clear();

        SearchOutcome {
            best_coverage: best.coverage,
            teams: best.teams,
            stats: best.stats,
        }
    }

    /// Fan the choice of first member across the rayon pool.
    ///
    /// Workers share a monotonically raised coverage lower bound for pruning
    /// and collect into private aggregates; the join merges aggregates in
    /// branch order, so the outcome is identical to [`Self::solve`].
    pub fn solve_parallel(&self) -> SearchOutcome {
        if self.team_size == 0 {
            // No first member to branch on; the empty team is the answer.
            return self.solve();
        }

        let pb = self.progress_bar();
        pb.enable_steady_tick(Duration::from_millis(250));

        let bound = AtomicU32::new(0);

        let locals: Vec<RunningBest> = (0..self.ranked.len())
            .into_par_iter()
            .map(|first| {
                let mut best = RunningBest::default();
                let mut team = vec![first];
                self.recurse(
                    first + 1,
                    &mut team,
                    self.ranked[first].letters(),
                    &mut best,
                    Some(&bound),
                    &pb,
                );
                pb.inc(1);
                best
            })
            .collect();

        pb.finish_and_clear();

        merge_worker_bests(locals)
    }

    fn recurse(
        &self,
        cursor: usize,
        team: &mut Vec<usize>,
        mask: LetterBitmask,
        best: &mut RunningBest,
        bound: Option<&AtomicU32>,
        pb: &ProgressBar,
    ) {
        best.stats.nodes += 1;

        if team.len() == self.team_size {
            best.record(mask, team.as_slice(), &self.ranked, bound);
            return;
        }

        // Not enough candidates left to fill the team.
        let remaining = self.ranked.len().saturating_sub(cursor);
        if team.len() + remaining < self.team_size {
            best.stats.feasibility_prunes += 1;
            return;
        }

        // Ties are collected, so only a strictly worse upper bound is cut.
        let known_best = match bound {
            Some(bound) => best.coverage.max(bound.load(Ordering::Relaxed)),
            None => best.coverage,
        };
        if (mask | self.suffix_masks[cursor]).coverage() < known_best {
            best.stats.bound_prunes += 1;
            return;
        }

        for next in cursor..self.ranked.len() {
            if team.is_empty() {
                pb.inc(1);
            }
            team.push(next);
            self.recurse(
                next + 1,
                team,
                mask | self.ranked[next].letters(),
                best,
                bound,
                pb,
            );
            team.pop();
        }
    }

    fn progress_bar(&self) -> ProgressBar {
        let pb = match self.verbosity {
            Verbosity::PrettyPrint | Verbosity::Debug => {
                ProgressBar::new(self.ranked.len() as u64)
            }
            Verbosity::Silent => ProgressBar::hidden(),
        };

        let sty = ProgressStyle::with_template(
            "[{spinner:.green} {elapsed_precise}] {wide_bar:.cyan/blue} {pos:>7}/{len:7} {msg} (eta {eta})",
        )
        .unwrap()
        .progress_chars("##-");
        pb.set_style(sty);

        pb
    }
}

/// Suffix OR table: entry `i` covers `ranked[i..]`, entry `n` is empty.
fn compute_suffix_masks(ranked: &[CandidatePtr]) -> Vec<LetterBitmask> {
    let mut masks = vec![0; ranked.len() + 1];
    for (i, candidate) in ranked.iter().enumerate().rev() {
        masks[i] = masks[i + 1] | candidate.letters();
    }

    masks
}

/// Merge per-worker aggregates with the same max-then-collect-ties rule the
/// sequential search applies team by team. Workers arrive in branch order and
/// each worker's teams are in its own depth-first order, so the merged list
/// matches the sequential visit order.
fn merge_worker_bests(locals: Vec<RunningBest>) -> SearchOutcome {
    let mut stats = SearchStats::default();
    for local in &locals {
        stats.absorb(&local.stats);
    }

    let best_coverage = locals
        .iter()
        .filter(|local| !local.teams.is_empty())
        .map(|local| local.coverage)
        .max()
        .unwrap_or(0);

    let mut teams = Vec::new();
    for local in locals {
        if !local.teams.is_empty() && local.coverage == best_coverage {
            teams.extend(local.teams);
        }
    }

    SearchOutcome {
        best_coverage,
        teams,
        stats,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn finder(names: &[&str], team_size: usize) -> TeamFinder {
        TeamFinder::new(Roster::from_names(names.iter().copied()), team_size)
    }

    fn team_names(team: &Team) -> Vec<&str> {
        team.members().iter().map(|m| m.name()).collect()
    }

    #[test]
    fn test_suffix_masks() {
        let ranked = Roster::from_names(["ab", "bc", "d"]).into_candidates();
        let masks = compute_suffix_masks(&ranked);

        assert_eq!(masks.len(), 4);
        assert_eq!(masks[3], 0);
        assert_eq!(masks[2], LetterBitmask::compute_bitmask("d".chars()));
        assert_eq!(masks[1], LetterBitmask::compute_bitmask("bcd".chars()));
        assert_eq!(masks[0], LetterBitmask::compute_bitmask("abcd".chars()));
    }

    #[test]
    fn test_disjoint_pair_beats_overlapping_pairs() {
        let outcome = finder(&["ab", "cd", "ac"], 2).solve();

        assert_eq!(outcome.best_coverage, 4);
        assert_eq!(outcome.teams.len(), 1);

        let mut names = team_names(&outcome.teams[0]);
        names.sort_unstable();
        assert_eq!(names, ["ab", "cd"]);
    }

    #[test]
    fn test_duplicate_names_are_selectable_by_position() {
        let outcome = finder(&["xyz", "xyz"], 2).solve();

        assert_eq!(outcome.best_coverage, 3);
        assert_eq!(outcome.teams.len(), 1);
        assert_eq!(team_names(&outcome.teams[0]), ["xyz", "xyz"]);
    }

    #[test]
    fn test_oversized_team_yields_empty_result() {
        let outcome = finder(&["a", "b", "c"], 4).solve();

        assert_eq!(outcome.best_coverage, 0);
        assert!(outcome.teams.is_empty());
    }

    #[test]
    fn test_zero_team_size_yields_the_empty_team() {
        for outcome in [
            finder(&["a", "b"], 0).solve(),
            finder(&["a", "b"], 0).solve_parallel(),
            finder(&[], 0).solve(),
        ] {
            assert_eq!(outcome.best_coverage, 0);
            assert_eq!(outcome.teams.len(), 1);
            assert!(outcome.teams[0].members().is_empty());
        }
    }

    #[test]
    fn test_empty_roster_with_positive_size() {
        let outcome = finder(&[], 1).solve();
        assert!(outcome.teams.is_empty());

        let outcome = finder(&[], 1).solve_parallel();
        assert!(outcome.teams.is_empty());
    }

    #[test]
    fn test_all_tying_teams_are_collected() {
        // Every pair of disjoint two-letter names covers exactly four letters.
        let outcome = finder(&["ab", "cd", "ef"], 2).solve();

        assert_eq!(outcome.best_coverage, 4);
        assert_eq!(outcome.teams.len(), 3);
        for team in &outcome.teams {
            assert_eq!(team.coverage(), 4);
        }
    }

    #[test]
    fn test_blank_candidates_occupy_slots() {
        let outcome = finder(&["", "ab"], 2).solve();

        assert_eq!(outcome.best_coverage, 2);
        assert_eq!(outcome.teams.len(), 1);
        assert_eq!(outcome.teams[0].members().len(), 2);
    }

    #[test]
    fn test_team_reports_missing_letters() {
        let outcome = finder(&["abc", "def"], 2).solve();

        assert_eq!(outcome.best_coverage, 6);
        let missing: String = outcome.teams[0].missing_letters().iter_letters().collect();
        assert_eq!(missing, "ghijklmnopqrstuvwxyz");
    }
}
