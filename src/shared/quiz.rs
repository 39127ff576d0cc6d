/**
 * Quiz Question Types
 *
 * Payload types for translation questions. A question is one word in the
 * room's source language plus a shuffled set of candidate translations in
 * the target language (the correct one and two distractors). The correct
 * choice is never marked in the payload; clients learn it from the answer
 * broadcast.
 */
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// A single word choice presented to clients.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct WordInfo {
    pub id: Uuid,
    pub name: String,
}

/// A prepared translation question for a room's language pair.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct QuizQuestion {
    /// The word participants must translate.
    pub word_for_translate: WordInfo,
    /// Candidate translations, shuffled; exactly one is correct.
    pub other_words: Vec<WordInfo>,
}

/// Verdict on a submitted answer.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AnswerCheck {
    pub correct: bool,
    /// Identity of the correct translation, echoed in the answer broadcast.
    pub correct_word_id: Uuid,
}
