//! Shared test harness: in-memory collaborator fakes and helpers.
//!
//! The fakes implement the same seams the PostgreSQL backends do, so the
//! lifecycle manager and orchestrator under test run the real control flow
//! against deterministic state.
#![allow(dead_code)]

use std::collections::HashMap;
use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use axum::extract::ws::Message;
use chrono::Utc;
use tokio::sync::mpsc::{self, UnboundedReceiver};
use uuid::Uuid;

use lingoduel::backend::competition::{CompetitionOrchestrator, ScoreLedger};
use lingoduel::backend::error::{BackendError, BackendResult};
use lingoduel::backend::quiz::QuestionProvider;
use lingoduel::backend::realtime::ConnectionRegistry;
use lingoduel::backend::rooms::membership::{MembershipIndex, MemoryMembershipIndex};
use lingoduel::backend::rooms::store::{Participant, Room, RoomStore, RoomWithCount};
use lingoduel::backend::rooms::RoomLifecycle;
use lingoduel::backend::users::{UserDirectory, UserProfile};
use lingoduel::shared::{AnswerCheck, PlayerScore, Presence, QuizQuestion, RoomEvent, RoomStatus, WordInfo};

// ---------------------------------------------------------------------------
// Room store fake

#[derive(Clone)]
struct ParticipantRow {
    id: i32,
    competition_id: i32,
    user_id: i32,
    user_points: i32,
    user_status: Presence,
}

#[derive(Default)]
struct StoreInner {
    rooms: HashMap<i32, Room>,
    // Vec keeps insertion order, which doubles as the join-order tie-break.
    participants: Vec<ParticipantRow>,
    next_room_id: i32,
    next_participant_id: i32,
}

/// In-memory `RoomStore` with the same semantics as the PostgreSQL one.
pub struct MemoryRoomStore {
    inner: Mutex<StoreInner>,
    profiles: HashMap<i32, UserProfile>,
}

impl MemoryRoomStore {
    pub fn new(profiles: &[UserProfile]) -> Self {
        Self {
            inner: Mutex::new(StoreInner::default()),
            profiles: profiles.iter().map(|p| (p.id, p.clone())).collect(),
        }
    }
}

#[async_trait]
impl RoomStore for MemoryRoomStore {
    async fn create_room(
        &self,
        owner_id: i32,
        language_from_id: i32,
        language_to_id: i32,
    ) -> BackendResult<Room> {
        let mut inner = self.inner.lock().unwrap();
        inner.next_room_id += 1;
        inner.next_participant_id += 1;
        let room = Room {
            id: inner.next_room_id,
            status: RoomStatus::Created,
            owner_id,
            language_from_id,
            language_to_id,
            created_at: Utc::now(),
        };
        inner.rooms.insert(room.id, room.clone());
        let participant = ParticipantRow {
            id: inner.next_participant_id,
            competition_id: room.id,
            user_id: owner_id,
            user_points: 0,
            user_status: Presence::Online,
        };
        inner.participants.push(participant);
        Ok(room)
    }

    async fn room(&self, room_id: i32) -> BackendResult<Option<Room>> {
        Ok(self.inner.lock().unwrap().rooms.get(&room_id).cloned())
    }

    async fn list_rooms(&self) -> BackendResult<Vec<RoomWithCount>> {
        let inner = self.inner.lock().unwrap();
        let mut rooms: Vec<&Room> = inner.rooms.values().collect();
        rooms.sort_by_key(|room| room.id);
        Ok(rooms
            .into_iter()
            .map(|room| {
                let online_count = inner
                    .participants
                    .iter()
                    .filter(|p| p.competition_id == room.id && p.user_status == Presence::Online)
                    .count() as i64;
                RoomWithCount {
                    room: room.clone(),
                    online_count,
                }
            })
            .collect())
    }

    async fn participant(&self, room_id: i32, user_id: i32) -> BackendResult<Option<Participant>> {
        let inner = self.inner.lock().unwrap();
        Ok(inner
            .participants
            .iter()
            .find(|p| p.competition_id == room_id && p.user_id == user_id)
            .map(|p| Participant {
                id: p.id,
                competition_id: p.competition_id,
                user_id: p.user_id,
                user_points: p.user_points,
                user_status: p.user_status,
            }))
    }

    async fn apply_join(&self, room_id: i32, user_id: i32, activate: bool) -> BackendResult<()> {
        let mut inner = self.inner.lock().unwrap();
        if activate {
            if let Some(room) = inner.rooms.get_mut(&room_id) {
                room.status = RoomStatus::Active;
            }
        }
        let existing = inner
            .participants
            .iter()
            .position(|p| p.competition_id == room_id && p.user_id == user_id);
        match existing {
            Some(i) => inner.participants[i].user_status = Presence::Online,
            None => {
                inner.next_participant_id += 1;
                let participant = ParticipantRow {
                    id: inner.next_participant_id,
                    competition_id: room_id,
                    user_id,
                    user_points: 0,
                    user_status: Presence::Online,
                };
                inner.participants.push(participant);
            }
        }
        Ok(())
    }

    async fn apply_leave(&self, room_id: i32, user_id: i32, pause: bool) -> BackendResult<()> {
        let mut inner = self.inner.lock().unwrap();
        if pause {
            if let Some(room) = inner.rooms.get_mut(&room_id) {
                room.status = RoomStatus::Paused;
            }
        }
        if let Some(row) = inner
            .participants
            .iter_mut()
            .find(|p| p.competition_id == room_id && p.user_id == user_id)
        {
            row.user_status = Presence::Offline;
        }
        Ok(())
    }

    async fn set_room_status(&self, room_id: i32, status: RoomStatus) -> BackendResult<()> {
        let mut inner = self.inner.lock().unwrap();
        if let Some(room) = inner.rooms.get_mut(&room_id) {
            room.status = status;
        }
        Ok(())
    }

    async fn owner_present(&self, room_id: i32) -> BackendResult<bool> {
        let inner = self.inner.lock().unwrap();
        let Some(room) = inner.rooms.get(&room_id) else {
            return Ok(false);
        };
        Ok(inner.participants.iter().any(|p| {
            p.competition_id == room_id
                && p.user_id == room.owner_id
                && p.user_status == Presence::Online
        }))
    }

    async fn online_count(&self, room_id: i32) -> BackendResult<i64> {
        let inner = self.inner.lock().unwrap();
        Ok(inner
            .participants
            .iter()
            .filter(|p| p.competition_id == room_id && p.user_status == Presence::Online)
            .count() as i64)
    }

    async fn standings(&self, room_id: i32) -> BackendResult<Vec<PlayerScore>> {
        let inner = self.inner.lock().unwrap();
        let mut rows: Vec<&ParticipantRow> = inner
            .participants
            .iter()
            .filter(|p| p.competition_id == room_id && p.user_status == Presence::Online)
            .collect();
        rows.sort_by(|a, b| b.user_points.cmp(&a.user_points).then(a.id.cmp(&b.id)));
        Ok(rows
            .into_iter()
            .map(|row| {
                let profile = &self.profiles[&row.user_id];
                PlayerScore {
                    username: profile.username.clone(),
                    user_photo_url: profile.photo_url.clone(),
                    points: row.user_points,
                }
            })
            .collect())
    }

    async fn adjust_points(&self, room_id: i32, user_id: i32, delta: i32) -> BackendResult<()> {
        let mut inner = self.inner.lock().unwrap();
        if let Some(row) = inner
            .participants
            .iter_mut()
            .find(|p| p.competition_id == room_id && p.user_id == user_id)
        {
            row.user_points += delta;
        }
        Ok(())
    }
}

// ---------------------------------------------------------------------------
// User directory fake

pub struct MemoryUserDirectory {
    users: HashMap<i64, UserProfile>,
}

impl MemoryUserDirectory {
    pub fn new(profiles: &[UserProfile]) -> Self {
        Self {
            users: profiles.iter().map(|p| (p.telegram_id, p.clone())).collect(),
        }
    }
}

#[async_trait]
impl UserDirectory for MemoryUserDirectory {
    async fn resolve(&self, telegram_id: i64) -> BackendResult<Option<UserProfile>> {
        Ok(self.users.get(&telegram_id).cloned())
    }
}

// ---------------------------------------------------------------------------
// Question provider fake

/// Deterministic english -> russian word bank: "cat" with the correct
/// translation and two distractors.
pub struct MemoryQuestionProvider {
    pub language_from_id: i32,
    pub language_to_id: i32,
    pub word_id: Uuid,
    pub correct_id: Uuid,
    distractors: Vec<WordInfo>,
}

impl MemoryQuestionProvider {
    pub fn english_russian() -> Self {
        Self {
            language_from_id: 2,
            language_to_id: 1,
            word_id: Uuid::new_v4(),
            correct_id: Uuid::new_v4(),
            distractors: vec![
                WordInfo {
                    id: Uuid::new_v4(),
                    name: "собака".to_string(),
                },
                WordInfo {
                    id: Uuid::new_v4(),
                    name: "дом".to_string(),
                },
            ],
        }
    }

    /// An id that is definitely not the correct translation.
    pub fn wrong_choice(&self) -> Uuid {
        self.distractors[0].id
    }
}

#[async_trait]
impl QuestionProvider for MemoryQuestionProvider {
    async fn random_question(
        &self,
        language_from_id: i32,
        language_to_id: i32,
    ) -> BackendResult<QuizQuestion> {
        if language_from_id != self.language_from_id || language_to_id != self.language_to_id {
            return Err(BackendError::QuestionUnavailable {
                from: language_from_id,
                to: language_to_id,
            });
        }
        let mut other_words = self.distractors.clone();
        other_words.push(WordInfo {
            id: self.correct_id,
            name: "кошка".to_string(),
        });
        Ok(QuizQuestion {
            word_for_translate: WordInfo {
                id: self.word_id,
                name: "cat".to_string(),
            },
            other_words,
        })
    }

    async fn check_translation(
        &self,
        word_for_translate_id: Uuid,
        chosen_word_id: Uuid,
    ) -> BackendResult<AnswerCheck> {
        if word_for_translate_id != self.word_id {
            return Err(BackendError::WordNotFound(word_for_translate_id));
        }
        Ok(AnswerCheck {
            correct: chosen_word_id == self.correct_id,
            correct_word_id: self.correct_id,
        })
    }
}

// ---------------------------------------------------------------------------
// Harness

pub struct TestApp {
    pub registry: ConnectionRegistry,
    pub membership: Arc<dyn MembershipIndex>,
    pub store: Arc<MemoryRoomStore>,
    pub questions: Arc<MemoryQuestionProvider>,
    pub lifecycle: Arc<RoomLifecycle>,
    pub orchestrator: Arc<CompetitionOrchestrator>,
}

pub fn profile(id: i32, telegram_id: i64, username: &str) -> UserProfile {
    UserProfile {
        id,
        telegram_id,
        username: username.to_string(),
        photo_url: None,
    }
}

/// Wire the real services to in-memory collaborators.
pub fn test_app(profiles: &[UserProfile]) -> TestApp {
    let registry = ConnectionRegistry::new();
    let membership: Arc<dyn MembershipIndex> = Arc::new(MemoryMembershipIndex::new());
    let store = Arc::new(MemoryRoomStore::new(profiles));
    let questions = Arc::new(MemoryQuestionProvider::english_russian());

    let store_dyn: Arc<dyn RoomStore> = store.clone();
    let users_dyn: Arc<dyn UserDirectory> = Arc::new(MemoryUserDirectory::new(profiles));
    let questions_dyn: Arc<dyn QuestionProvider> = questions.clone();

    let lifecycle = Arc::new(RoomLifecycle::new(
        store_dyn.clone(),
        users_dyn.clone(),
        membership.clone(),
        registry.clone(),
    ));
    let orchestrator = Arc::new(CompetitionOrchestrator::new(
        store_dyn.clone(),
        users_dyn,
        membership.clone(),
        questions_dyn,
        ScoreLedger::new(store_dyn),
        registry.clone(),
    ));

    TestApp {
        registry,
        membership,
        store,
        questions,
        lifecycle,
        orchestrator,
    }
}

/// Attach a fake connection for a user; returned receiver sees every event
/// pushed to them.
pub fn connect(app: &TestApp, telegram_id: i64) -> UnboundedReceiver<Message> {
    let (tx, rx) = mpsc::unbounded_channel();
    app.registry.register(telegram_id, tx);
    rx
}

/// Drain every event currently queued on a fake connection.
pub fn drain_events(rx: &mut UnboundedReceiver<Message>) -> Vec<RoomEvent> {
    let mut events = Vec::new();
    while let Ok(message) = rx.try_recv() {
        if let Message::Text(text) = message {
            events.push(serde_json::from_str(&text).expect("server pushed malformed event"));
        }
    }
    events
}

/// Await the next event on a fake connection.
pub async fn next_event(rx: &mut UnboundedReceiver<Message>) -> RoomEvent {
    loop {
        match rx.recv().await.expect("connection closed without event") {
            Message::Text(text) => {
                return serde_json::from_str(&text).expect("server pushed malformed event")
            }
            _ => continue,
        }
    }
}
