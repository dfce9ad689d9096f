use rand::rngs::SmallRng;

use crate::config::Settings;
use crate::engine::mistakes::{MistakeItem, practice_queue};
use crate::engine::question::{Question, QuestionOptions, generate_question};
use crate::engine::selector::pick_skill;
use crate::engine::stats::Stats;
use crate::session::mode::Mode;

/// Draw the next question for a drill session. `Mix` resolves through the
/// weighted selector; the question comes from the skill's current level, with
/// the negative-subtraction override derived from settings.
pub fn next_question(
    mode: Mode,
    stats: &Stats,
    settings: &Settings,
    rng: &mut SmallRng,
) -> Question {
    let skill = mode.skill().unwrap_or_else(|| pick_skill(stats, rng));
    let level = stats.skill(skill).level;
    let options = QuestionOptions {
        allow_negative: Some(settings.allows_negative_at(level)),
    };
    generate_question(skill, level, options, rng)
}

/// Build a mistake-practice queue of at most `question_count` stored
/// problems, most-missed and most-recent first.
pub fn mistake_session(items: &[MistakeItem], settings: &Settings) -> Vec<Question> {
    practice_queue(items, settings.question_count)
}
