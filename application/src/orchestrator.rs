//! Orchestrator - the inbound surface every front end calls.
//!
//! Each method validates its arguments before anything is spawned, builds
//! the prompt (loading the shared preamble once per call), runs the
//! pattern's use case, and stops every outstanding invocation if the
//! caller cancels.

use crate::config::OrchestratorSettings;
use crate::error::OrchestrationError;
use crate::ports::agent_runner::AgentRunner;
use crate::ports::context_loader::ContextLoaderPort;
use crate::ports::progress::{NoProgress, ProgressNotifier};
use crate::use_cases::ask::AskUseCase;
use crate::use_cases::consensus::{RunConsensusInput, RunConsensusUseCase};
use crate::use_cases::council::{RunCouncilInput, RunCouncilUseCase};
use crate::use_cases::debate::{RunDebateInput, RunDebateUseCase};
use council_domain::{
    AgentKind, AgentResponse, ConsensusResult, CouncilRecord, DebateRounds, DebateTranscript,
    DomainError, Prompt,
};
use std::future::Future;
use std::path::PathBuf;
use std::sync::Arc;
use std::time::Duration;
use tokio_util::sync::CancellationToken;
use tracing::{debug, info};

/// Per-call options shared by every pattern.
#[derive(Debug, Clone, Default)]
pub struct CallOptions {
    /// Project root for the shared context; falls back to settings, then cwd
    pub project_path: Option<PathBuf>,
    /// Overrides the settings' `include_context`
    pub include_context: Option<bool>,
    /// Overrides the pattern's default time budget per invocation
    pub timeout: Option<Duration>,
}

impl CallOptions {
    pub fn with_project_path(mut self, path: impl Into<PathBuf>) -> Self {
        self.project_path = Some(path.into());
        self
    }

    pub fn with_include_context(mut self, include: bool) -> Self {
        self.include_context = Some(include);
        self
    }

    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = Some(timeout);
        self
    }
}

/// Entry point for single, parallel, consensus, debate and council calls.
pub struct Orchestrator<R: AgentRunner + 'static, C: ContextLoaderPort> {
    runner: Arc<R>,
    context: Arc<C>,
    settings: OrchestratorSettings,
    working_dir: PathBuf,
    progress: Arc<dyn ProgressNotifier>,
    cancel: CancellationToken,
    council_seed: Option<u64>,
}

impl<R: AgentRunner + 'static, C: ContextLoaderPort> Orchestrator<R, C> {
    pub fn new(runner: Arc<R>, context: Arc<C>, settings: OrchestratorSettings) -> Self {
        Self {
            runner,
            context,
            settings,
            working_dir: std::env::current_dir().unwrap_or_else(|_| PathBuf::from(".")),
            progress: Arc::new(NoProgress),
            cancel: CancellationToken::new(),
            council_seed: None,
        }
    }

    // ==================== Builder Methods ====================

    pub fn with_progress(mut self, progress: Arc<dyn ProgressNotifier>) -> Self {
        self.progress = progress;
        self
    }

    /// Cancelling this token aborts every call in flight.
    pub fn with_cancellation(mut self, token: CancellationToken) -> Self {
        self.cancel = token;
        self
    }

    /// Directory used as the project root when nothing else names one.
    pub fn with_working_dir(mut self, dir: impl Into<PathBuf>) -> Self {
        self.working_dir = dir.into();
        self
    }

    /// Seed the council label shuffle (reproducible assignments).
    pub fn with_council_seed(mut self, seed: u64) -> Self {
        self.council_seed = Some(seed);
        self
    }

    pub fn settings(&self) -> &OrchestratorSettings {
        &self.settings
    }

    // ==================== Tool Surface ====================

    /// Ask one agent, named by its identifier.
    pub async fn ask_single(
        &self,
        agent: &str,
        body: &str,
        options: &CallOptions,
    ) -> Result<AgentResponse, OrchestrationError> {
        let agent: AgentKind = agent.parse()?;
        self.settings.validate()?;
        let prompt = self.build_prompt(body, options)?;
        let timeout = options.timeout.unwrap_or(self.settings.timeouts.ask);

        let use_case = AskUseCase::new(Arc::clone(&self.runner));
        self.cancellable(use_case.ask_single(agent, &prompt, timeout))
            .await
    }

    /// Ask every configured agent in parallel.
    pub async fn ask_many(
        &self,
        body: &str,
        options: &CallOptions,
    ) -> Result<Vec<AgentResponse>, OrchestrationError> {
        self.settings.validate()?;
        let prompt = self.build_prompt(body, options)?;
        let timeout = options.timeout.unwrap_or(self.settings.timeouts.ask);

        let use_case = AskUseCase::new(Arc::clone(&self.runner));
        self.cancellable(use_case.ask_many_with_progress(
            &self.settings.agents,
            &prompt,
            timeout,
            self.progress.as_ref(),
        ))
        .await
    }

    /// Parallel answers, then a synthesis.
    pub async fn request_consensus(
        &self,
        body: &str,
        options: &CallOptions,
    ) -> Result<ConsensusResult, OrchestrationError> {
        self.settings.validate()?;
        let prompt = self.build_prompt(body, options)?;
        let timeout = options.timeout.unwrap_or(self.settings.timeouts.consensus);

        let input = RunConsensusInput::new(prompt, self.settings.agents.clone(), timeout)
            .with_synthesizer(self.settings.synthesizer);
        let use_case = RunConsensusUseCase::new(Arc::clone(&self.runner));
        self.cancellable(use_case.execute_with_progress(input, self.progress.as_ref()))
            .await?
    }

    /// A debate of `rounds` rounds; out-of-range counts are rejected.
    pub async fn request_debate(
        &self,
        body: &str,
        rounds: i64,
        options: &CallOptions,
    ) -> Result<DebateTranscript, OrchestrationError> {
        let rounds = DebateRounds::new(rounds)?;
        self.settings.validate()?;
        let prompt = self.build_prompt(body, options)?;
        let timeout = options.timeout.unwrap_or(self.settings.timeouts.debate);

        let input = RunDebateInput::new(prompt, self.settings.agents.clone(), rounds, timeout);
        let use_case = RunDebateUseCase::new(Arc::clone(&self.runner));
        self.cancellable(use_case.execute_with_progress(input, self.progress.as_ref()))
            .await?
    }

    /// Individual answers and anonymized peer review, ready for the
    /// caller to chair.
    pub async fn request_council(
        &self,
        body: &str,
        orchestrator_answer: &str,
        options: &CallOptions,
    ) -> Result<CouncilRecord, OrchestrationError> {
        if orchestrator_answer.trim().is_empty() {
            return Err(DomainError::EmptyOrchestratorAnswer.into());
        }
        self.settings.validate()?;
        let prompt = self.build_prompt(body, options)?;
        let timeout = options.timeout.unwrap_or(self.settings.timeouts.council);

        let input = RunCouncilInput::new(
            prompt,
            orchestrator_answer,
            self.settings.agents.clone(),
            timeout,
        );
        let mut use_case = RunCouncilUseCase::new(Arc::clone(&self.runner));
        if let Some(seed) = self.council_seed {
            use_case = use_case.with_seed(seed);
        }
        self.cancellable(use_case.execute_with_progress(input, self.progress.as_ref()))
            .await?
    }

    // ==================== Helpers ====================

    /// Validate the body and attach the shared preamble, if enabled.
    fn build_prompt(&self, body: &str, options: &CallOptions) -> Result<Prompt, DomainError> {
        if options.timeout.is_some_and(|t| t.is_zero()) {
            return Err(DomainError::InvalidTimeout);
        }
        let prompt = Prompt::new(body)?;

        let include = options
            .include_context
            .unwrap_or(self.settings.include_context);
        if !include {
            return Ok(prompt);
        }

        let root = self
            .settings
            .resolve_project_path(options.project_path.as_deref(), &self.working_dir);
        let preamble = self.context.load_preamble(&root);
        match &preamble {
            Some(p) => debug!(
                "Loaded {} bytes of shared context from {}",
                p.text().len(),
                root.display()
            ),
            None => debug!("No shared context under {}", root.display()),
        }
        Ok(prompt.with_preamble(preamble))
    }

    /// Race `fut` against the cancellation token. Losing the race drops
    /// `fut`, which aborts its tasks and kills their processes.
    async fn cancellable<T>(&self, fut: impl Future<Output = T>) -> Result<T, OrchestrationError> {
        tokio::select! {
            biased;
            _ = self.cancel.cancelled() => {
                info!("Call cancelled by caller");
                Err(OrchestrationError::Cancelled)
            }
            result = fut => Ok(result),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::PatternTimeouts;
    use crate::ports::context_loader::NoContext;
    use crate::testing::MockRunner;
    use council_domain::{ContextPreamble, LoadedContextFile};
    use std::path::Path;
    use std::sync::Mutex;

    /// Returns a fixed preamble and records which roots were asked for.
    struct FixedContext {
        roots: Mutex<Vec<PathBuf>>,
    }

    impl FixedContext {
        fn new() -> Self {
            Self {
                roots: Mutex::new(Vec::new()),
            }
        }
    }

    impl ContextLoaderPort for FixedContext {
        fn load_known_files(&self, project_root: &Path) -> Vec<LoadedContextFile> {
            self.roots.lock().unwrap().push(project_root.to_path_buf());
            Vec::new()
        }

        fn load_preamble(&self, project_root: &Path) -> Option<ContextPreamble> {
            self.load_known_files(project_root);
            ContextPreamble::from_sections(Some("Always use cargo."), None)
        }
    }

    fn orchestrator(runner: Arc<MockRunner>) -> Orchestrator<MockRunner, NoContext> {
        Orchestrator::new(runner, Arc::new(NoContext), OrchestratorSettings::default())
    }

    #[tokio::test]
    async fn test_invalid_rounds_spawn_nothing() {
        let runner = Arc::new(MockRunner::echo());
        let orchestrator = orchestrator(Arc::clone(&runner));

        for rounds in [0, 6, -3] {
            let err = orchestrator
                .request_debate("topic", rounds, &CallOptions::default())
                .await
                .unwrap_err();
            assert!(err.is_validation());
            assert!(matches!(
                err,
                OrchestrationError::Validation(DomainError::InvalidRounds { .. })
            ));
        }
        assert!(runner.calls().is_empty());
    }

    #[tokio::test]
    async fn test_unknown_agent_and_empty_prompt_rejected() {
        let runner = Arc::new(MockRunner::echo());
        let orchestrator = orchestrator(Arc::clone(&runner));

        let err = orchestrator
            .ask_single("claude", "hi", &CallOptions::default())
            .await
            .unwrap_err();
        assert_eq!(
            err,
            OrchestrationError::Validation(DomainError::UnknownAgent("claude".into()))
        );

        let err = orchestrator
            .ask_many("   ", &CallOptions::default())
            .await
            .unwrap_err();
        assert_eq!(err, OrchestrationError::Validation(DomainError::EmptyPrompt));
        assert!(runner.calls().is_empty());
    }

    #[tokio::test]
    async fn test_preamble_prepended_once_per_call() {
        let runner = Arc::new(MockRunner::echo());
        let context = Arc::new(FixedContext::new());
        let orchestrator = Orchestrator::new(
            Arc::clone(&runner),
            Arc::clone(&context),
            OrchestratorSettings::default(),
        )
        .with_working_dir("/cwd");

        orchestrator
            .ask_many("question", &CallOptions::default().with_project_path("/proj"))
            .await
            .unwrap();

        assert_eq!(*context.roots.lock().unwrap(), vec![PathBuf::from("/proj")]);
        for (_, prompt) in runner.calls() {
            assert!(prompt.contains("[CLAUDE.md]\nAlways use cargo."));
            assert!(prompt.ends_with("\n\nquestion"));
        }
    }

    #[tokio::test]
    async fn test_context_can_be_disabled() {
        let runner = Arc::new(MockRunner::echo());
        let context = Arc::new(FixedContext::new());
        let orchestrator = Orchestrator::new(
            Arc::clone(&runner),
            Arc::clone(&context),
            OrchestratorSettings::default(),
        );

        orchestrator
            .ask_single(
                "codex",
                "question",
                &CallOptions::default().with_include_context(false),
            )
            .await
            .unwrap();

        assert!(context.roots.lock().unwrap().is_empty());
        assert_eq!(runner.calls()[0].1, "question");
    }

    #[tokio::test(start_paused = true)]
    async fn test_cancellation_stops_the_call() {
        let runner = Arc::new(
            MockRunner::echo()
                .with_delay(AgentKind::Codex, Duration::from_secs(600))
                .with_delay(AgentKind::Gemini, Duration::from_secs(600)),
        );
        let token = CancellationToken::new();
        let orchestrator = orchestrator(runner).with_cancellation(token.clone());

        let canceller = tokio::spawn(async move {
            tokio::time::sleep(Duration::from_secs(1)).await;
            token.cancel();
        });

        let err = orchestrator
            .request_consensus("slow question", &CallOptions::default())
            .await
            .unwrap_err();
        assert_eq!(err, OrchestrationError::Cancelled);
        canceller.await.unwrap();
    }

    #[tokio::test]
    async fn test_zero_timeout_override_rejected() {
        let runner = Arc::new(MockRunner::echo());
        let orchestrator = orchestrator(Arc::clone(&runner));

        let err = orchestrator
            .ask_many(
                "q",
                &CallOptions::default().with_timeout(Duration::ZERO),
            )
            .await
            .unwrap_err();
        assert_eq!(err, OrchestrationError::Validation(DomainError::InvalidTimeout));
        assert!(runner.calls().is_empty());
    }

    #[tokio::test]
    async fn test_settings_validated_before_spawn() {
        let runner = Arc::new(MockRunner::echo());
        let settings = OrchestratorSettings::default().with_timeouts(PatternTimeouts {
            council: Duration::ZERO,
            ..Default::default()
        });
        let orchestrator = Orchestrator::new(Arc::clone(&runner), Arc::new(NoContext), settings);

        let err = orchestrator
            .request_council("q", "my answer", &CallOptions::default())
            .await
            .unwrap_err();
        assert!(err.is_validation());
        assert!(runner.calls().is_empty());
    }

    #[tokio::test]
    async fn test_council_through_orchestrator() {
        let runner = Arc::new(MockRunner::new(|agent, prompt| {
            if prompt.body().contains("--- Answer ") {
                AgentResponse::success(agent.as_str(), "RANKING: A > B > C")
            } else {
                AgentResponse::success(agent.as_str(), "an independent answer")
            }
        }));
        let orchestrator = orchestrator(Arc::clone(&runner)).with_council_seed(1);

        let record = orchestrator
            .request_council("q", "my answer", &CallOptions::default())
            .await
            .unwrap();

        assert!(record.is_reviewed());
        assert_eq!(record.peer_reviews.len(), 2);
        assert_eq!(runner.calls().len(), 4);
        assert!(record.chairman_brief().unwrap().contains("## Label key"));
    }

    #[tokio::test]
    async fn test_ask_single_validates_settings() {
        let runner = Arc::new(MockRunner::echo());
        let settings = OrchestratorSettings::default().with_timeouts(PatternTimeouts {
            ask: Duration::ZERO,
            ..Default::default()
        });
        let orchestrator = Orchestrator::new(Arc::clone(&runner), Arc::new(NoContext), settings);

        let err = orchestrator
            .ask_single("codex", "q", &CallOptions::default())
            .await
            .unwrap_err();
        assert_eq!(err, OrchestrationError::Validation(DomainError::InvalidTimeout));
        assert!(runner.calls().is_empty());
    }

    #[tokio::test]
    async fn test_council_rejects_duplicate_agents() {
        let runner = Arc::new(MockRunner::echo());
        let settings =
            OrchestratorSettings::default().with_agents(vec![AgentKind::Codex, AgentKind::Codex]);
        let orchestrator = Orchestrator::new(Arc::clone(&runner), Arc::new(NoContext), settings);

        let err = orchestrator
            .request_council("q", "my answer", &CallOptions::default())
            .await
            .unwrap_err();
        assert_eq!(
            err,
            OrchestrationError::Validation(DomainError::DuplicateAgent("codex".into()))
        );
        assert!(runner.calls().is_empty());
    }

    #[tokio::test]
    async fn test_relative_project_path_resolved_against_working_dir() {
        let runner = Arc::new(MockRunner::echo());
        let context = Arc::new(FixedContext::new());
        let orchestrator = Orchestrator::new(
            Arc::clone(&runner),
            Arc::clone(&context),
            OrchestratorSettings::default(),
        )
        .with_working_dir("/agent-council-missing/repo");

        orchestrator
            .ask_single("gemini", "q", &CallOptions::default().with_project_path("."))
            .await
            .unwrap();

        assert_eq!(
            *context.roots.lock().unwrap(),
            vec![PathBuf::from("/agent-council-missing/repo")]
        );
    }
}
