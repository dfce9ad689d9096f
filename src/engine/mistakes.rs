use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::engine::levels::Skill;
use crate::engine::question::Question;

pub const LEDGER_CAP: usize = 50;

/// A previously-missed problem. Identity is `(skill, text)` rather than the
/// random question id, so missing the same problem twice merges into one
/// entry with its miss count bumped.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct MistakeItem {
    pub id: String,
    pub text: String,
    pub answer: i64,
    pub skill: Skill,
    pub level: u32,
    pub misses: u32,
    pub last_missed_at: DateTime<Utc>,
}

fn identity_key(skill: Skill, text: &str) -> String {
    format!("{}:{}", skill.to_key(), text)
}

/// Record a miss. An existing entry for the same problem moves to the head
/// with `misses` incremented and answer/level/timestamp refreshed; otherwise
/// a fresh entry is inserted at the head. The ledger truncates from the tail
/// at `LEDGER_CAP`.
pub fn add_mistake_entry(items: &[MistakeItem], question: &Question) -> Vec<MistakeItem> {
    let key = identity_key(question.skill, &question.text);
    let mut next = Vec::with_capacity(items.len() + 1);

    match items.iter().position(|item| item.id == key) {
        Some(pos) => {
            let mut entry = items[pos].clone();
            entry.misses += 1;
            entry.answer = question.answer;
            entry.level = question.level;
            entry.last_missed_at = Utc::now();
            next.push(entry);
            next.extend(
                items
                    .iter()
                    .enumerate()
                    .filter(|&(i, _)| i != pos)
                    .map(|(_, item)| item.clone()),
            );
        }
        None => {
            next.push(MistakeItem {
                id: key,
                text: question.text.clone(),
                answer: question.answer,
                skill: question.skill,
                level: question.level,
                misses: 1,
                last_missed_at: Utc::now(),
            });
            next.extend(items.iter().cloned());
        }
    }

    next.truncate(LEDGER_CAP);
    next
}

/// Drop the entry matching the question's problem identity. Called when a
/// practice question is finally answered correctly; absent keys leave the
/// ledger untouched.
pub fn remove_mistake_entry(items: &[MistakeItem], question: &Question) -> Vec<MistakeItem> {
    let key = identity_key(question.skill, &question.text);
    items
        .iter()
        .filter(|item| item.id != key)
        .cloned()
        .collect()
}

/// Practice ordering: most-missed first, recency breaking ties.
pub fn practice_order(items: &[MistakeItem]) -> Vec<MistakeItem> {
    let mut ordered = items.to_vec();
    ordered.sort_by(|a, b| {
        b.misses
            .cmp(&a.misses)
            .then(b.last_missed_at.cmp(&a.last_missed_at))
    });
    ordered
}

/// Convert the top `len` ledger entries into one-off questions. Text, answer,
/// skill and level are reused verbatim; only the id is fresh, so a re-miss
/// still collapses onto the same ledger entry.
pub fn practice_queue(items: &[MistakeItem], len: usize) -> Vec<Question> {
    practice_order(items)
        .into_iter()
        .take(len)
        .map(|item| Question {
            id: Uuid::new_v4().to_string(),
            text: item.text,
            answer: item.answer,
            skill: item.skill,
            level: item.level,
        })
        .collect()
}
