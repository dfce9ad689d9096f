use rand::Rng;
use rand::rngs::SmallRng;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::engine::levels::{MAX_LEVEL, Skill, level_spec};

/// One concrete drill problem. Disposable: the session driver shows it,
/// reports the outcome, and drops it. `id` exists only so the driver can tell
/// consecutive draws apart; problem identity is `(skill, text)`.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Question {
    pub id: String,
    pub text: String,
    pub answer: i64,
    pub skill: Skill,
    pub level: u32,
}

#[derive(Clone, Copy, Debug, Default)]
pub struct QuestionOptions {
    /// `Some(_)` overrides the level table's negative-result flag; `None`
    /// keeps the table default. The session layer derives the override from
    /// the negative-unlock setting.
    pub allow_negative: Option<bool>,
}

/// Draw a problem for (skill, level). Operands come uniformly and
/// independently from the level's inclusive ranges via the caller's RNG, so
/// a seeded RNG replays an exact question sequence.
pub fn generate_question(
    skill: Skill,
    level: u32,
    options: QuestionOptions,
    rng: &mut SmallRng,
) -> Question {
    let spec = level_spec(skill, level);
    let a = rng.gen_range(spec.min_a..=spec.max_a);
    let b = rng.gen_range(spec.min_b..=spec.max_b);

    let (text, answer) = match skill {
        Skill::Add => (format!("{a} + {b}"), a + b),
        Skill::Sub => {
            let allow_negative = options.allow_negative.unwrap_or(spec.allow_negative_result);
            if allow_negative {
                // Draw order preserved; the answer may dip below zero.
                (format!("{a} - {b}"), a - b)
            } else {
                let (minuend, subtrahend) = if a >= b { (a, b) } else { (b, a) };
                (format!("{minuend} - {subtrahend}"), minuend - subtrahend)
            }
        }
        Skill::Mul => (format!("{a} x {b}"), a * b),
        Skill::Div => {
            // Build the problem backwards from divisor and quotient so the
            // division is always exact.
            let divisor = a.max(1);
            let quotient = b;
            let dividend = divisor * quotient;
            (format!("{dividend} / {divisor}"), quotient)
        }
    };

    Question {
        id: Uuid::new_v4().to_string(),
        text,
        answer,
        skill,
        level: level.clamp(1, MAX_LEVEL),
    }
}

#[cfg(test)]
mod tests {
    use rand::SeedableRng;

    use super::*;

    fn rng() -> SmallRng {
        SmallRng::seed_from_u64(42)
    }

    fn operands(text: &str, op: &str) -> (i64, i64) {
        let sep = format!(" {op} ");
        let mut parts = text.split(&sep);
        let a = parts.next().unwrap().parse().unwrap();
        let b = parts.next().unwrap().parse().unwrap();
        (a, b)
    }

    #[test]
    fn test_add_level_one_stays_in_range() {
        let mut rng = rng();
        for _ in 0..100 {
            let q = generate_question(Skill::Add, 1, QuestionOptions::default(), &mut rng);
            let (a, b) = operands(&q.text, "+");
            assert!((0..=10).contains(&a));
            assert!((0..=10).contains(&b));
            assert_eq!(q.answer, a + b);
        }
    }

    #[test]
    fn test_mul_answer_matches_text() {
        let mut rng = rng();
        for level in 1..=MAX_LEVEL {
            for _ in 0..50 {
                let q = generate_question(Skill::Mul, level, QuestionOptions::default(), &mut rng);
                let (a, b) = operands(&q.text, "x");
                assert_eq!(q.answer, a * b);
            }
        }
    }

    #[test]
    fn test_sub_without_negatives_never_goes_below_zero() {
        let mut rng = rng();
        for level in 1..=MAX_LEVEL {
            for _ in 0..50 {
                let q = generate_question(
                    Skill::Sub,
                    level,
                    QuestionOptions {
                        allow_negative: Some(false),
                    },
                    &mut rng,
                );
                let (minuend, subtrahend) = operands(&q.text, "-");
                assert!(q.answer >= 0, "negative answer from {}", q.text);
                assert!(minuend >= subtrahend);
                assert_eq!(q.answer, minuend - subtrahend);
            }
        }
    }

    #[test]
    fn test_sub_with_negatives_preserves_draw_order() {
        let mut rng = rng();
        let mut saw_negative = false;
        for _ in 0..200 {
            let q = generate_question(
                Skill::Sub,
                3,
                QuestionOptions {
                    allow_negative: Some(true),
                },
                &mut rng,
            );
            let (a, b) = operands(&q.text, "-");
            assert_eq!(q.answer, a - b);
            if q.answer < 0 {
                saw_negative = true;
            }
        }
        assert!(saw_negative, "200 draws over [0,20]x[0,20] should go negative");
    }

    #[test]
    fn test_sub_table_flag_applies_when_no_override() {
        let mut rng = rng();
        // Level 1 disallows negatives in the table
        for _ in 0..100 {
            let q = generate_question(Skill::Sub, 1, QuestionOptions::default(), &mut rng);
            assert!(q.answer >= 0);
        }
        // The top level allows them
        let mut saw_negative = false;
        for _ in 0..300 {
            let q =
                generate_question(Skill::Sub, MAX_LEVEL, QuestionOptions::default(), &mut rng);
            let (a, b) = operands(&q.text, "-");
            assert_eq!(q.answer, a - b);
            if q.answer < 0 {
                saw_negative = true;
            }
        }
        assert!(saw_negative);
    }

    #[test]
    fn test_div_is_always_exact() {
        let mut rng = rng();
        for level in 1..=MAX_LEVEL {
            for _ in 0..50 {
                let q = generate_question(Skill::Div, level, QuestionOptions::default(), &mut rng);
                let (dividend, divisor) = operands(&q.text, "/");
                assert!(divisor >= 1);
                assert_eq!(dividend % divisor, 0);
                assert_eq!(q.answer * divisor, dividend);
            }
        }
    }

    #[test]
    fn test_out_of_range_level_is_clamped_on_question() {
        let mut rng = rng();
        let q = generate_question(Skill::Add, 999, QuestionOptions::default(), &mut rng);
        assert_eq!(q.level, MAX_LEVEL);
        let q = generate_question(Skill::Add, 0, QuestionOptions::default(), &mut rng);
        assert_eq!(q.level, 1);
    }

    #[test]
    fn test_each_draw_gets_a_fresh_id() {
        let mut rng = rng();
        let first = generate_question(Skill::Add, 1, QuestionOptions::default(), &mut rng);
        let second = generate_question(Skill::Add, 1, QuestionOptions::default(), &mut rng);
        assert_ne!(first.id, second.id);
    }

    #[test]
    fn test_seeded_rng_replays_the_same_operands() {
        let mut first = SmallRng::seed_from_u64(7);
        let mut second = SmallRng::seed_from_u64(7);
        for _ in 0..20 {
            let a = generate_question(Skill::Mul, 5, QuestionOptions::default(), &mut first);
            let b = generate_question(Skill::Mul, 5, QuestionOptions::default(), &mut second);
            assert_eq!(a.text, b.text);
            assert_eq!(a.answer, b.answer);
        }
    }
}
