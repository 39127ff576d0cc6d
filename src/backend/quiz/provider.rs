/**
 * Question Provider
 *
 * Supplies translation questions for a room's language pair and judges
 * submitted answers. A question is one random word in the source language
 * plus three candidate translations in the target language: the correct
 * one and two random distractors, shuffled so position carries no signal.
 */
use async_trait::async_trait;
use rand::seq::SliceRandom;
use sqlx::PgPool;
use uuid::Uuid;

use crate::backend::error::{BackendError, BackendResult};
use crate::shared::{AnswerCheck, QuizQuestion, WordInfo};

#[async_trait]
pub trait QuestionProvider: Send + Sync {
    /// Prepare a question for the given language pair.
    ///
    /// Fails with `QuestionUnavailable` when the word pool has nothing for
    /// the pair.
    async fn random_question(
        &self,
        language_from_id: i32,
        language_to_id: i32,
    ) -> BackendResult<QuizQuestion>;

    /// Judge whether `chosen_word_id` is the correct translation of
    /// `word_for_translate_id`; the verdict carries the correct id either
    /// way.
    async fn check_translation(
        &self,
        word_for_translate_id: Uuid,
        chosen_word_id: Uuid,
    ) -> BackendResult<AnswerCheck>;
}

pub struct PgQuestionProvider {
    pool: PgPool,
}

impl PgQuestionProvider {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl QuestionProvider for PgQuestionProvider {
    async fn random_question(
        &self,
        language_from_id: i32,
        language_to_id: i32,
    ) -> BackendResult<QuizQuestion> {
        #[derive(sqlx::FromRow)]
        struct QuestionRow {
            id: Uuid,
            name: String,
            translation_id: Uuid,
            translation_name: String,
        }

        let question = sqlx::query_as::<_, QuestionRow>(
            r#"
            SELECT w.id, w.name, t.id AS translation_id, t.name AS translation_name
            FROM words w
            JOIN translation_words t ON t.id = w.translation_id
            WHERE w.language_id = $1
            ORDER BY RANDOM()
            LIMIT 1
            "#,
        )
        .bind(language_from_id)
        .fetch_optional(&self.pool)
        .await?
        .ok_or(BackendError::QuestionUnavailable {
            from: language_from_id,
            to: language_to_id,
        })?;

        let distractors = sqlx::query_as::<_, WordRow>(
            r#"
            SELECT id, name
            FROM translation_words
            WHERE to_language_id = $1 AND id != $2
            ORDER BY RANDOM()
            LIMIT 2
            "#,
        )
        .bind(language_to_id)
        .bind(question.translation_id)
        .fetch_all(&self.pool)
        .await?;

        let mut other_words: Vec<WordInfo> = distractors
            .into_iter()
            .map(|row| WordInfo {
                id: row.id,
                name: row.name,
            })
            .collect();
        other_words.push(WordInfo {
            id: question.translation_id,
            name: question.translation_name,
        });
        other_words.shuffle(&mut rand::rng());

        Ok(QuizQuestion {
            word_for_translate: WordInfo {
                id: question.id,
                name: question.name,
            },
            other_words,
        })
    }

    async fn check_translation(
        &self,
        word_for_translate_id: Uuid,
        chosen_word_id: Uuid,
    ) -> BackendResult<AnswerCheck> {
        let translation_id: Option<Uuid> =
            sqlx::query_scalar("SELECT translation_id FROM words WHERE id = $1")
                .bind(word_for_translate_id)
                .fetch_optional(&self.pool)
                .await?;

        let correct_word_id =
            translation_id.ok_or(BackendError::WordNotFound(word_for_translate_id))?;

        Ok(AnswerCheck {
            correct: chosen_word_id == correct_word_id,
            correct_word_id,
        })
    }
}

#[derive(sqlx::FromRow)]
struct WordRow {
    id: Uuid,
    name: String,
}
