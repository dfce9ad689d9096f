use rand::Rng;
use rand::rngs::SmallRng;

use crate::engine::levels::Skill;
use crate::engine::stats::{SkillStats, Stats};

/// Score for a skill with no recorded attempts. Untried skills are treated
/// as mediocre rather than mastered so they neither dominate nor vanish from
/// mixed-mode selection.
const NEUTRAL_SCORE: f64 = 0.55;

/// Weight floor in mixed mode. Even a skill at 100% accuracy keeps a small
/// chance of being drilled.
const MIN_WEIGHT: f64 = 0.15;

fn skill_score(stats: &SkillStats) -> f64 {
    if stats.history.is_empty() {
        NEUTRAL_SCORE
    } else {
        stats.accuracy()
    }
}

/// The skill with the strictly lowest score. Ties keep the earliest skill in
/// the fixed add/sub/mul/div order.
pub fn weakest_skill(stats: &Stats) -> Skill {
    let mut weakest = Skill::Add;
    let mut lowest = f64::INFINITY;
    for &skill in Skill::all() {
        let score = skill_score(stats.skill(skill));
        if score < lowest {
            lowest = score;
            weakest = skill;
        }
    }
    weakest
}

/// Weighted draw for mixed mode: weight = max(0.15, 1 - score), so weaker
/// skills come up more often without starving strong ones.
pub fn pick_skill(stats: &Stats, rng: &mut SmallRng) -> Skill {
    let weights: Vec<(Skill, f64)> = Skill::all()
        .iter()
        .map(|&skill| {
            let weight = (1.0 - skill_score(stats.skill(skill))).max(MIN_WEIGHT);
            (skill, weight)
        })
        .collect();

    let total: f64 = weights.iter().map(|(_, w)| w).sum();
    let mut roll = rng.gen_range(0.0..total);
    for (skill, weight) in &weights {
        roll -= weight;
        if roll <= 0.0 {
            return *skill;
        }
    }

    // Rounding can exhaust the walk without crossing zero
    Skill::Add
}

#[cfg(test)]
mod tests {
    use std::collections::HashMap;

    use rand::SeedableRng;

    use super::*;
    use crate::engine::stats::update_stats;

    fn stats_with_results(results: &[(Skill, bool)]) -> Stats {
        results.iter().fold(Stats::default(), |acc, &(skill, correct)| {
            update_stats(&acc, skill, correct, 1000.0).stats
        })
    }

    #[test]
    fn test_all_empty_histories_tie_to_add() {
        assert_eq!(weakest_skill(&Stats::default()), Skill::Add);
    }

    #[test]
    fn test_weakest_is_the_lowest_accuracy_skill() {
        let stats = stats_with_results(&[
            (Skill::Add, true),
            (Skill::Sub, true),
            (Skill::Mul, false),
            (Skill::Mul, false),
            (Skill::Mul, true),
            (Skill::Div, true),
        ]);
        assert_eq!(weakest_skill(&stats), Skill::Mul);
    }

    #[test]
    fn test_untried_skill_scores_below_a_perfect_one() {
        // div untouched (0.55) vs the rest perfect (1.0)
        let stats = stats_with_results(&[
            (Skill::Add, true),
            (Skill::Sub, true),
            (Skill::Mul, true),
        ]);
        assert_eq!(weakest_skill(&stats), Skill::Div);
    }

    #[test]
    fn test_accuracy_tie_keeps_fixed_order() {
        let stats = stats_with_results(&[
            (Skill::Sub, false),
            (Skill::Div, false),
        ]);
        // sub and div both score 0; sub comes first in the fixed order
        assert_eq!(weakest_skill(&stats), Skill::Sub);
    }

    #[test]
    fn test_pick_skill_is_deterministic_under_a_seed() {
        let stats = Stats::default();
        let mut first = SmallRng::seed_from_u64(9);
        let mut second = SmallRng::seed_from_u64(9);
        for _ in 0..50 {
            assert_eq!(pick_skill(&stats, &mut first), pick_skill(&stats, &mut second));
        }
    }

    #[test]
    fn test_pick_skill_favours_the_weak_skill() {
        // mul at 0% accuracy (weight 1.0), others untouched (weight 0.45)
        let stats = stats_with_results(&[(Skill::Mul, false), (Skill::Mul, false)]);
        let mut rng = SmallRng::seed_from_u64(3);
        let mut counts: HashMap<Skill, usize> = HashMap::new();
        for _ in 0..2000 {
            *counts.entry(pick_skill(&stats, &mut rng)).or_default() += 1;
        }
        let mul = counts[&Skill::Mul];
        for &other in &[Skill::Add, Skill::Sub, Skill::Div] {
            assert!(
                mul > counts[&other],
                "mul drawn {mul} times, {other:?} {} times",
                counts[&other]
            );
        }
    }

    #[test]
    fn test_weight_floor_keeps_mastered_skills_alive() {
        // Everything perfect: every skill sits on the floor weight
        let stats = stats_with_results(&[
            (Skill::Add, true),
            (Skill::Sub, true),
            (Skill::Mul, true),
            (Skill::Div, true),
        ]);
        let mut rng = SmallRng::seed_from_u64(11);
        let mut counts: HashMap<Skill, usize> = HashMap::new();
        for _ in 0..400 {
            *counts.entry(pick_skill(&stats, &mut rng)).or_default() += 1;
        }
        for &skill in Skill::all() {
            assert!(
                counts.get(&skill).copied().unwrap_or(0) > 0,
                "{skill:?} was starved"
            );
        }
    }
}
