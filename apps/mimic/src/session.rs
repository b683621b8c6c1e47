//! Session orchestration — one handle in, N (subject, post) pairs out.
//!
//! Flow: fetch_posts → describe_tone → N × (generate_subject → synthesize →
//!       record subject). Posts and tone are produced once per session.
//!
//! Presentation concerns (verbose dumps, pausing) hang off `SessionObserver`;
//! nothing here touches the terminal.

use serde::Serialize;
use tracing::{debug, info, info_span, Instrument};
use uuid::Uuid;

use crate::errors::MimicError;
use crate::generation::subject::{generate_subject, Subject, SubjectHistory};
use crate::generation::synthesizer::{synthesize, GeneratedPost};
use crate::generation::tone::{describe_tone, ToneDescription};
use crate::llm_client::{GenerationProfiles, TextGenerator};
use crate::timeline::{fetch_posts, FetchWindow, PostCollection, TimelineApi};

pub const DEFAULT_ROUNDS: usize = 3;

/// What to run: whose style, and how many posts to write.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SessionRequest {
    pub handle: String,
    pub rounds: usize,
}

impl SessionRequest {
    pub fn new(handle: impl Into<String>) -> Self {
        Self {
            handle: handle.into(),
            rounds: DEFAULT_ROUNDS,
        }
    }

    pub fn with_rounds(mut self, rounds: usize) -> Self {
        self.rounds = rounds;
        self
    }
}

/// One generation round's output.
#[derive(Debug, Clone, Serialize)]
pub struct GenerationRound {
    /// 1-based.
    pub round: usize,
    pub subject: Subject,
    pub post: GeneratedPost,
}

/// Everything a session produced. Dropped once presented.
#[derive(Debug, Clone, Serialize)]
pub struct SessionReport {
    pub id: Uuid,
    pub handle: String,
    pub posts: PostCollection,
    pub tone: ToneDescription,
    pub rounds: Vec<GenerationRound>,
}

/// Points in a session where observers are notified.
#[derive(Debug)]
pub enum SessionEvent<'a> {
    PostsFetched {
        handle: &'a str,
        posts: &'a PostCollection,
    },
    ToneDescribed(&'a ToneDescription),
    /// `used` is the history that was handed to the subject generator.
    SubjectGenerated {
        round: usize,
        subject: &'a Subject,
        used: &'a SubjectHistory,
    },
    RoundCompleted(&'a GenerationRound),
}

/// Receives session events as they happen.
pub trait SessionObserver {
    fn on_event(&mut self, event: &SessionEvent<'_>) -> std::io::Result<()>;
}

/// The collaborators a session runs against. Built once, reused across sessions.
pub struct Pipeline<'a> {
    pub timeline: &'a dyn TimelineApi,
    pub llm: &'a dyn TextGenerator,
    pub profiles: &'a GenerationProfiles,
    pub window: FetchWindow,
    pub rubric: &'a str,
}

impl Pipeline<'_> {
    /// Runs one full session. Any error aborts the session; nothing is salvaged.
    pub async fn run_session(
        &self,
        request: &SessionRequest,
        observer: &mut dyn SessionObserver,
    ) -> Result<SessionReport, MimicError> {
        let id = Uuid::new_v4();
        let span = info_span!("session", %id, handle = %request.handle);
        self.run_session_inner(id, request, observer)
            .instrument(span)
            .await
    }

    async fn run_session_inner(
        &self,
        id: Uuid,
        request: &SessionRequest,
        observer: &mut dyn SessionObserver,
    ) -> Result<SessionReport, MimicError> {
        info!("Starting session: {} rounds", request.rounds);

        let posts = fetch_posts(self.timeline, &request.handle, self.window).await?;
        notify(
            observer,
            SessionEvent::PostsFetched {
                handle: &request.handle,
                posts: &posts,
            },
        )?;

        let tone = describe_tone(self.llm, &self.profiles.exact, self.rubric, &posts).await?;
        notify(observer, SessionEvent::ToneDescribed(&tone))?;

        let mut history = SubjectHistory::new();
        let mut rounds = Vec::with_capacity(request.rounds);

        for round in 1..=request.rounds {
            debug!(
                "Round {}/{}: subjects so far {:?}",
                round,
                request.rounds,
                history.as_slice()
            );
            let subject =
                generate_subject(self.llm, &self.profiles.creative, &posts, &history).await?;
            notify(
                observer,
                SessionEvent::SubjectGenerated {
                    round,
                    subject: &subject,
                    used: &history,
                },
            )?;

            let post = synthesize(
                self.llm,
                &self.profiles.creative,
                &tone,
                &posts,
                &subject.text,
            )
            .await?;

            history.push(subject.text.clone());
            let completed = GenerationRound {
                round,
                subject,
                post,
            };
            notify(observer, SessionEvent::RoundCompleted(&completed))?;
            rounds.push(completed);
        }

        info!("Session finished with {} posts", rounds.len());

        Ok(SessionReport {
            id,
            handle: request.handle.clone(),
            posts,
            tone,
            rounds,
        })
    }
}

fn notify(observer: &mut dyn SessionObserver, event: SessionEvent<'_>) -> Result<(), MimicError> {
    debug!("Session event: {:?}", event);
    observer.on_event(&event)?;
    Ok(())
}
