//! Chat sessions, one per logged-in employee.
//!
//! A session owns the employee's record and transcript and answers each
//! utterance through the shared `DialogueEngine`. Turns are handled one at a
//! time in submission order: a turn submitted while another is composing
//! waits for it to finish rather than interleaving.

use std::collections::HashMap;
use std::sync::Arc;

use chrono::{DateTime, Utc};
use tokio::sync::{Mutex, RwLock};
use tracing::{debug, info};
use uuid::Uuid;

use crate::config::ComposingDelay;
use crate::dialogue::{DialogueEngine, DialogueTurn, Reply, Speaker, Transcript};
use crate::resolver::OnboardingRecord;
use crate::session::EmployeeSession;

pub struct ChatSession {
    id: Uuid,
    employee: EmployeeSession,
    record: Arc<OnboardingRecord>,
    engine: Arc<DialogueEngine>,
    delay: ComposingDelay,
    /// Serializes turns. tokio's mutex queues waiters FIFO.
    turn: Mutex<()>,
    transcript: RwLock<Transcript>,
    opened_at: DateTime<Utc>,
}

impl ChatSession {
    /// Open a session and post the welcome message.
    pub fn open(
        employee: EmployeeSession,
        engine: Arc<DialogueEngine>,
        delay: ComposingDelay,
    ) -> Self {
        let record = Arc::new(employee.onboarding_data.clone());
        let mut transcript = Transcript::new();
        transcript.push(
            Speaker::Assistant,
            engine.welcome_message(&employee.name, &record),
        );

        let id = Uuid::new_v4();
        info!(chat_id = %id, employee = %employee.email, "Chat session opened");

        Self {
            id,
            employee,
            record,
            engine,
            delay,
            turn: Mutex::new(()),
            transcript: RwLock::new(transcript),
            opened_at: Utc::now(),
        }
    }

    pub fn id(&self) -> Uuid {
        self.id
    }

    pub fn employee(&self) -> &EmployeeSession {
        &self.employee
    }

    pub fn record(&self) -> &OnboardingRecord {
        &self.record
    }

    pub fn opened_at(&self) -> DateTime<Utc> {
        self.opened_at
    }

    /// Answer one utterance after the composing delay.
    pub async fn submit(&self, utterance: &str) -> Reply {
        let _turn = self.turn.lock().await;

        self.transcript
            .write()
            .await
            .push(Speaker::Employee, utterance);

        let delay = self.delay.sample();
        debug!(chat_id = %self.id, delay_ms = delay.as_millis() as u64, "Composing reply");
        tokio::time::sleep(delay).await;

        let reply = self.engine.reply(utterance, &self.record);
        self.transcript
            .write()
            .await
            .push(Speaker::Assistant, reply.text.clone());

        info!(chat_id = %self.id, intent = %reply.intent, "Chat turn answered");
        reply
    }

    /// Snapshot of the transcript so far.
    pub async fn history(&self) -> Vec<DialogueTurn> {
        self.transcript.read().await.turns().to_vec()
    }
}

/// Open chat sessions by id.
#[derive(Default)]
pub struct ChatSessions {
    sessions: RwLock<HashMap<Uuid, Arc<ChatSession>>>,
}

impl ChatSessions {
    pub fn new() -> Self {
        Self::default()
    }

    pub async fn insert(&self, session: ChatSession) -> Arc<ChatSession> {
        let session = Arc::new(session);
        self.sessions
            .write()
            .await
            .insert(session.id(), Arc::clone(&session));
        session
    }

    pub async fn get(&self, id: Uuid) -> Option<Arc<ChatSession>> {
        self.sessions.read().await.get(&id).cloned()
    }

    /// Close a session, returning it if it was open.
    pub async fn remove(&self, id: Uuid) -> Option<Arc<ChatSession>> {
        let removed = self.sessions.write().await.remove(&id);
        if removed.is_some() {
            info!(chat_id = %id, "Chat session closed");
        }
        removed
    }

    pub async fn len(&self) -> usize {
        self.sessions.read().await.len()
    }
}

#[cfg(test)]
mod tests {
    use std::time::Duration;

    use futures::future::join_all;

    use super::*;
    use crate::dialogue::Intent;
    use crate::registry::Registry;
    use crate::resolver::Resolver;

    fn employee() -> EmployeeSession {
        let record = Resolver::new(Arc::new(Registry::builtin()))
            .resolve("aurora", "UX Designer")
            .unwrap();
        EmployeeSession::new("Jordan Lee", "jordan@rc.com", "aurora", "UX Designer", record)
    }

    fn open(delay: ComposingDelay) -> ChatSession {
        ChatSession::open(employee(), Arc::new(DialogueEngine::default_rules()), delay)
    }

    #[tokio::test]
    async fn opens_with_welcome_turn() {
        let chat = open(ComposingDelay::NONE);
        let history = chat.history().await;
        assert_eq!(history.len(), 1);
        assert_eq!(history[0].speaker, Speaker::Assistant);
        assert!(history[0].text.starts_with("Welcome Jordan Lee!"));
    }

    #[tokio::test]
    async fn submit_records_both_turns() {
        let chat = open(ComposingDelay::NONE);
        let reply = chat.submit("what slack channels am I in?").await;
        assert_eq!(reply.intent, Intent::Channels);

        let history = chat.history().await;
        assert_eq!(history.len(), 3);
        assert_eq!(history[1].speaker, Speaker::Employee);
        assert_eq!(history[1].text, "what slack channels am I in?");
        assert_eq!(history[2].text, reply.text);
    }

    #[tokio::test]
    async fn concurrent_turns_answered_in_submission_order() {
        let chat = open(ComposingDelay {
            base: Duration::from_millis(2),
            jitter: Duration::from_millis(3),
        });
        let utterances = [
            "who is my manager",
            "which repos",
            "company values",
            "first day?",
            "hello",
        ];

        let replies = join_all(utterances.iter().map(|u| chat.submit(u))).await;
        let intents: Vec<Intent> = replies.iter().map(|r| r.intent).collect();
        assert_eq!(
            intents,
            vec![
                Intent::ManagerContact,
                Intent::Repositories,
                Intent::CompanyValues,
                Intent::FirstDay,
                Intent::Help,
            ]
        );

        // Strict employee/assistant alternation after the welcome turn.
        let history = chat.history().await;
        assert_eq!(history.len(), 1 + utterances.len() * 2);
        for (i, pair) in history[1..].chunks(2).enumerate() {
            assert_eq!(pair[0].speaker, Speaker::Employee);
            assert_eq!(pair[0].text, utterances[i]);
            assert_eq!(pair[1].speaker, Speaker::Assistant);
            assert_eq!(pair[1].text, replies[i].text);
        }
    }

    #[tokio::test]
    async fn registry_of_sessions() {
        let sessions = ChatSessions::new();
        let chat = sessions.insert(open(ComposingDelay::NONE)).await;
        assert_eq!(sessions.len().await, 1);
        assert!(sessions.get(chat.id()).await.is_some());
        assert!(sessions.get(Uuid::new_v4()).await.is_none());
        assert_eq!(chat.record().role.manager, "Rania Boutros");

        assert!(sessions.remove(chat.id()).await.is_some());
        assert!(sessions.remove(chat.id()).await.is_none());
        assert_eq!(sessions.len().await, 0);
        assert!(sessions.get(chat.id()).await.is_none());
    }
}
