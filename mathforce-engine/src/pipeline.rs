//! End-of-session pipeline and the reads that prepare the next session.
//!
//! ```text
//! SessionAggregate ─► PAI + ERA ─► adapt ─► aggregate with next difficulty saved
//!                                              │
//!                              weak topic ─► marker overwrite
//!                                              │
//!                                   HistoryRecord ─► ledger append
//! ```

use chrono::{DateTime, Utc};
use rand::Rng;
use serde::Serialize;
use serde::de::DeserializeOwned;
use tracing::{info, warn};

use crate::adapt::{
    self, Adaptation, AdaptationInput, SessionSettings, WeakTopicMarker, select_questions,
};
use crate::analysis::{self, EraTag, pai};
use crate::config::SessionDefaults;
use crate::error::Result;
use crate::history::{HistoryLedger, HistoryRecord, PaiTrend, Recommendation, recommendations};
use crate::session::{SessionAggregate, SessionRecorder};
use crate::store::{KeyValueStore, LAST_SESSION_KEY, WEAK_TOPIC_KEY};
use crate::types::{DifficultyLevel, Question, Role, scoped_key};

/// Everything computed when a session completes.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SessionReport {
    /// `None` when the session was unmeasurable
    pub pai: Option<u8>,
    pub accuracy: u8,
    pub mean_time: Option<f64>,
    pub tags: Vec<EraTag>,
    pub adaptation: Adaptation,
    pub weak_topic: Option<String>,
    pub record: HistoryRecord,
    pub previous_pai: Option<u8>,
    pub trend: Option<PaiTrend>,
}

impl SessionReport {
    /// Banner text when the difficulty moved.
    pub fn notice(&self) -> Option<&'static str> {
        self.adaptation.direction().notice()
    }
}

/// The analytics engine bound to one store and role scope.
#[derive(Debug)]
pub struct Engine<S> {
    store: S,
    role: Role,
}

impl<S: KeyValueStore> Engine<S> {
    pub fn new(store: S, role: Role) -> Self {
        Self { store, role }
    }

    pub fn role(&self) -> Role {
        self.role
    }

    pub fn store(&self) -> &S {
        &self.store
    }

    /// Start recording a session with normalized settings.
    pub fn start_session(&self, settings: &SessionSettings) -> SessionRecorder {
        SessionRecorder::new(settings.grade, settings.difficulty)
    }

    /// Run the end-of-session pipeline and persist its results.
    pub async fn complete_session(&self, aggregate: &SessionAggregate) -> Result<SessionReport> {
        self.complete_session_at(aggregate, Utc::now()).await
    }

    /// [`Engine::complete_session`] with an explicit record date.
    pub async fn complete_session_at(
        &self,
        aggregate: &SessionAggregate,
        date: DateTime<Utc>,
    ) -> Result<SessionReport> {
        let pai = pai::compute(aggregate);
        let tags = analysis::classify(aggregate);
        let accuracy = aggregate.accuracy();

        let adaptation = adapt::adapt(&AdaptationInput {
            previous: aggregate.difficulty,
            accuracy,
            pai,
            max_streak: aggregate.max_streak,
            total_questions: aggregate.total_questions,
            tags: &tags,
        });

        // ledger last: a recorded session always has its difficulty saved
        let mut carried = aggregate.clone();
        carried.difficulty = adaptation.next;
        self.write_json(&self.last_session_key(), &carried).await?;

        let weak_topic = adapt::weak_topic(&aggregate.wrong_topics);
        if let Some(topic) = &weak_topic {
            let marker = WeakTopicMarker::new(aggregate.grade, topic.clone());
            self.write_json(&self.weak_topic_key(), &marker).await?;
        }

        let record = HistoryRecord::from_session(aggregate, pai, &tags, date);
        let ledger = HistoryLedger::append(&self.store, self.role, record.clone()).await?;

        let previous_pai = ledger.previous_pai();
        let trend = ledger.pai_trend(pai);

        info!(
            role = %self.role,
            pai = ?pai,
            accuracy,
            era = %record.era,
            difficulty = %adaptation.next,
            "session completed"
        );

        Ok(SessionReport {
            pai,
            accuracy,
            mean_time: aggregate.mean_time(),
            tags,
            adaptation,
            weak_topic,
            record,
            previous_pai,
            trend,
        })
    }

    /// Pick questions for the next session, biased to the stored weak topic
    /// when it was recorded for the same grade.
    pub async fn prepare_session<R: Rng + ?Sized>(
        &self,
        pool: &[Question],
        settings: &SessionSettings,
        rng: &mut R,
    ) -> Result<Vec<Question>> {
        let marker = self.load_weak_topic().await?;
        let weak = marker.as_ref().and_then(|m| m.topic_for(settings.grade));
        Ok(select_questions(
            pool,
            settings.grade,
            settings.difficulty,
            settings.count,
            weak,
            rng,
        ))
    }

    /// Difficulty carried forward from the last session, 3 without one.
    pub async fn next_difficulty(&self) -> Result<DifficultyLevel> {
        Ok(self.carried_difficulty().await?.unwrap_or_default())
    }

    /// Difficulty saved with the last session, if one was recorded.
    pub async fn carried_difficulty(&self) -> Result<Option<DifficultyLevel>> {
        Ok(self.last_session().await?.map(|agg| agg.difficulty))
    }

    /// Settings for the next session.
    ///
    /// Explicit overrides win, then the carried difficulty, then `defaults`.
    pub async fn next_settings(
        &self,
        defaults: &SessionDefaults,
        grade: Option<u8>,
        difficulty: Option<u8>,
        count: Option<usize>,
    ) -> Result<SessionSettings> {
        let difficulty = match difficulty {
            Some(d) => Some(d),
            None => self.carried_difficulty().await?.map(DifficultyLevel::get),
        };
        Ok(defaults.settings(grade, difficulty, count))
    }

    pub async fn last_session(&self) -> Result<Option<SessionAggregate>> {
        self.read_json(&self.last_session_key()).await
    }

    pub async fn load_weak_topic(&self) -> Result<Option<WeakTopicMarker>> {
        self.read_json(&self.weak_topic_key()).await
    }

    pub async fn history(&self) -> Result<HistoryLedger> {
        HistoryLedger::load(&self.store, self.role).await
    }

    /// Recommendations for the latest recorded session. Empty without
    /// history.
    pub async fn latest_recommendations(&self) -> Result<Vec<Recommendation>> {
        let ledger = self.history().await?;
        let Some(latest) = ledger.latest() else {
            return Ok(Vec::new());
        };
        let marker = self.load_weak_topic().await?;
        Ok(recommendations(
            latest.pai,
            latest.accuracy,
            &latest.era,
            marker.as_ref().map(|m| (m.topic.as_str(), m.grade.get())),
        ))
    }

    fn last_session_key(&self) -> String {
        scoped_key(LAST_SESSION_KEY, Some(self.role))
    }

    fn weak_topic_key(&self) -> String {
        scoped_key(WEAK_TOPIC_KEY, Some(self.role))
    }

    async fn read_json<T: DeserializeOwned>(&self, key: &str) -> Result<Option<T>> {
        let Some(raw) = self.store.get(key).await? else {
            return Ok(None);
        };
        match serde_json::from_str(&raw) {
            Ok(value) => Ok(Some(value)),
            Err(e) => {
                warn!(key, error = %e, "ignoring unreadable stored value");
                Ok(None)
            }
        }
    }

    async fn write_json<T: Serialize>(&self, key: &str, value: &T) -> Result<()> {
        self.store.set(key, serde_json::to_string(value)?).await
    }
}
