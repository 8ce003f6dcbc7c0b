// ABOUTME: Analysis request controller gating when brief analysis may run
// ABOUTME: Owns the empty/analyzing/ready state and publishes every transition to subscribers

use std::fmt;
use std::sync::Arc;
use std::time::Duration;

use rockspace_config::DEFAULT_SCAN_DELAY_MS;
use rockspace_core::{idea_length, is_analyzable, AIAnalysis, MIN_IDEA_LENGTH};
use serde::Serialize;
use tokio::sync::watch;
use tracing::{debug, error, info};

use crate::analyzer::Analyze;

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "status", content = "analysis", rename_all = "lowercase")]
pub enum AnalysisState {
    Empty,
    Analyzing,
    Ready(AIAnalysis),
}

impl AnalysisState {
    pub fn is_analyzing(&self) -> bool {
        matches!(self, AnalysisState::Analyzing)
    }

    pub fn analysis(&self) -> Option<&AIAnalysis> {
        match self {
            AnalysisState::Ready(analysis) => Some(analysis),
            _ => None,
        }
    }
}

impl fmt::Display for AnalysisState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            AnalysisState::Empty => write!(f, "empty"),
            AnalysisState::Analyzing => write!(f, "analyzing"),
            AnalysisState::Ready(_) => write!(f, "ready"),
        }
    }
}

/// Result of a trigger action
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TriggerOutcome {
    /// Idea shorter than the minimum; nothing happened
    TooShort { length: usize },
    /// An analysis is already in flight; nothing happened
    AlreadyAnalyzing,
    /// The cycle ran to completion and the state is now ready
    Completed(AIAnalysis),
}

/// Single owner of [`AnalysisState`].
///
/// Only one analysis runs at a time. The guard is the state itself: a trigger
/// flips `empty`/`ready` to `analyzing` atomically or is ignored. Once started,
/// a cycle always reaches `ready`; there is no cancellation and no error state.
/// The cycle runs on its own task, so dropping the trigger future does not stop it.
pub struct AnalysisController<A> {
    analyzer: Arc<A>,
    min_delay: Duration,
    state: Arc<watch::Sender<AnalysisState>>,
}

/// Publishes the fallback brief if a cycle task unwinds before reaching `ready`
struct ReadyGuard {
    state: Arc<watch::Sender<AnalysisState>>,
    armed: bool,
}

impl ReadyGuard {
    fn complete(mut self, analysis: AIAnalysis) {
        self.armed = false;
        self.state.send_replace(AnalysisState::Ready(analysis));
    }
}

impl Drop for ReadyGuard {
    fn drop(&mut self) {
        if self.armed {
            error!("Analysis cycle ended abnormally, publishing fallback brief");
            self.state
                .send_replace(AnalysisState::Ready(AIAnalysis::fallback()));
        }
    }
}

impl<A: Analyze + 'static> AnalysisController<A> {
    pub fn new(analyzer: A) -> Self {
        Self::with_min_delay(analyzer, Duration::from_millis(DEFAULT_SCAN_DELAY_MS))
    }

    /// `min_delay` is the shortest time the analyzing state stays visible
    pub fn with_min_delay(analyzer: A, min_delay: Duration) -> Self {
        let (state, _) = watch::channel(AnalysisState::Empty);
        Self {
            analyzer: Arc::new(analyzer),
            min_delay,
            state: Arc::new(state),
        }
    }

    pub fn min_delay(&self) -> Duration {
        self.min_delay
    }

    /// Snapshot of the current state
    pub fn state(&self) -> AnalysisState {
        self.state.borrow().clone()
    }

    /// Render targets subscribe here to receive every transition
    pub fn subscribe(&self) -> watch::Receiver<AnalysisState> {
        self.state.subscribe()
    }

    /// Latest completed analysis, if the controller is ready
    pub fn analysis(&self) -> Option<AIAnalysis> {
        self.state.borrow().analysis().cloned()
    }

    pub fn is_analyzing(&self) -> bool {
        self.state.borrow().is_analyzing()
    }

    /// Whether the trigger control should be enabled for this idea
    pub fn can_trigger(&self, idea: &str) -> bool {
        is_analyzable(idea) && !self.is_analyzing()
    }

    /// Trigger action. Runs a full analysis cycle when allowed and returns once
    /// the state is `ready`; otherwise returns immediately without side effects.
    pub async fn request_analysis(&self, idea: &str) -> TriggerOutcome {
        if !is_analyzable(idea) {
            let length = idea_length(idea);
            debug!(
                "Ignoring analysis trigger: idea has {} chars, need {}",
                length, MIN_IDEA_LENGTH
            );
            return TriggerOutcome::TooShort { length };
        }

        // Check and transition in one step; a previous result is dropped here
        let started = self.state.send_if_modified(|state| {
            if state.is_analyzing() {
                false
            } else {
                *state = AnalysisState::Analyzing;
                true
            }
        });
        if !started {
            debug!("Ignoring analysis trigger: analysis already in progress");
            return TriggerOutcome::AlreadyAnalyzing;
        }

        info!("Analysis started (minimum visible delay {:?})", self.min_delay);

        let guard = ReadyGuard {
            state: self.state.clone(),
            armed: true,
        };
        let analyzer = self.analyzer.clone();
        let min_delay = self.min_delay;
        let idea = idea.to_string();
        let cycle = tokio::spawn(async move {
            let (_, analysis) =
                tokio::join!(tokio::time::sleep(min_delay), analyzer.analyze(&idea));

            info!(
                "Analysis ready{}",
                if analysis.is_fallback() {
                    " (fallback brief)"
                } else {
                    ""
                }
            );
            guard.complete(analysis.clone());
            analysis
        });

        let analysis = match cycle.await {
            Ok(analysis) => analysis,
            Err(e) => {
                error!("Analysis task failed: {}", e);
                AIAnalysis::fallback()
            }
        };

        TriggerOutcome::Completed(analysis)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::analyzer::MockAnalyze;
    use async_trait::async_trait;
    use pretty_assertions::assert_eq;
    use rstest::rstest;
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::sync::Arc;
    use tokio::time::Instant;

    const IDEA: &str = "Build me an e-commerce site for sneakers";
    const DELAY: Duration = Duration::from_millis(1500);

    fn sneaker_brief() -> AIAnalysis {
        AIAnalysis {
            refined_brief: "A headless storefront for limited sneaker drops.".to_string(),
            suggested_stack: vec!["React".to_string(), "Node.js".to_string()],
            estimated_timeline: "2-3 months".to_string(),
        }
    }

    /// Analyzer that takes `latency` to answer and counts its calls
    struct SlowAnalyzer {
        latency: Duration,
        calls: Arc<AtomicUsize>,
        result: AIAnalysis,
    }

    #[async_trait]
    impl Analyze for SlowAnalyzer {
        async fn analyze(&self, _idea: &str) -> AIAnalysis {
            self.calls.fetch_add(1, Ordering::SeqCst);
            tokio::time::sleep(self.latency).await;
            self.result.clone()
        }
    }

    #[rstest]
    #[case("")]
    #[case("hi")]
    #[case("123456789")]
    #[case("café crèm")]
    #[tokio::test]
    async fn test_short_idea_is_a_no_op(#[case] idea: &str) {
        let mut analyzer = MockAnalyze::new();
        analyzer.expect_analyze().times(0);
        let controller = AnalysisController::with_min_delay(analyzer, DELAY);

        let outcome = controller.request_analysis(idea).await;

        assert_eq!(
            outcome,
            TriggerOutcome::TooShort {
                length: idea.chars().count()
            }
        );
        assert_eq!(controller.state(), AnalysisState::Empty);
        assert!(!controller.can_trigger(idea));
    }

    #[tokio::test(start_paused = true)]
    async fn test_scenario_success_reaches_ready_with_model_fields() {
        let mut analyzer = MockAnalyze::new();
        analyzer
            .expect_analyze()
            .withf(|idea| idea == IDEA)
            .times(1)
            .returning(|_| sneaker_brief());
        let controller = AnalysisController::with_min_delay(analyzer, DELAY);
        assert!(controller.can_trigger(IDEA));

        let outcome = controller.request_analysis(IDEA).await;

        assert_eq!(outcome, TriggerOutcome::Completed(sneaker_brief()));
        assert_eq!(controller.state(), AnalysisState::Ready(sneaker_brief()));
        let analysis = controller.analysis().unwrap();
        assert_eq!(analysis.suggested_stack, vec!["React", "Node.js"]);
        assert_eq!(analysis.estimated_timeline, "2-3 months");
    }

    #[tokio::test(start_paused = true)]
    async fn test_fallback_still_reaches_ready() {
        let mut analyzer = MockAnalyze::new();
        analyzer
            .expect_analyze()
            .times(1)
            .returning(|_| AIAnalysis::fallback());
        let controller = AnalysisController::with_min_delay(analyzer, DELAY);

        controller.request_analysis(IDEA).await;

        assert_eq!(controller.state(), AnalysisState::Ready(AIAnalysis::fallback()));
    }

    #[tokio::test(start_paused = true)]
    async fn test_trigger_while_analyzing_is_ignored() {
        let mut analyzer = MockAnalyze::new();
        analyzer
            .expect_analyze()
            .times(1)
            .returning(|_| sneaker_brief());
        let controller = AnalysisController::with_min_delay(analyzer, DELAY);

        let second = async {
            tokio::task::yield_now().await;
            assert!(controller.is_analyzing());
            assert!(!controller.can_trigger(IDEA));
            let outcome = controller.request_analysis(IDEA).await;
            assert_eq!(controller.state(), AnalysisState::Analyzing);
            outcome
        };

        let (first, second) = tokio::join!(controller.request_analysis(IDEA), second);

        assert_eq!(first, TriggerOutcome::Completed(sneaker_brief()));
        assert_eq!(second, TriggerOutcome::AlreadyAnalyzing);
        assert_eq!(controller.state(), AnalysisState::Ready(sneaker_brief()));
    }

    #[tokio::test(start_paused = true)]
    async fn test_minimum_delay_holds_for_instant_analyzer() {
        let mut analyzer = MockAnalyze::new();
        analyzer.expect_analyze().returning(|_| sneaker_brief());
        let controller = AnalysisController::with_min_delay(analyzer, DELAY);

        let started = Instant::now();
        controller.request_analysis(IDEA).await;

        assert!(started.elapsed() >= DELAY);
    }

    #[tokio::test(start_paused = true)]
    async fn test_delay_and_call_run_concurrently() {
        let calls = Arc::new(AtomicUsize::new(0));
        let analyzer = SlowAnalyzer {
            latency: Duration::from_secs(5),
            calls: calls.clone(),
            result: sneaker_brief(),
        };
        let controller = AnalysisController::with_min_delay(analyzer, DELAY);

        let started = Instant::now();
        controller.request_analysis(IDEA).await;
        let elapsed = started.elapsed();

        assert!(elapsed >= Duration::from_secs(5));
        assert!(elapsed < Duration::from_secs(5) + DELAY);
        assert_eq!(calls.load(Ordering::SeqCst), 1);
    }

    #[tokio::test(start_paused = true)]
    async fn test_dropped_trigger_still_reaches_ready() {
        let calls = Arc::new(AtomicUsize::new(0));
        let analyzer = SlowAnalyzer {
            latency: Duration::from_secs(10),
            calls: calls.clone(),
            result: sneaker_brief(),
        };
        let controller = AnalysisController::with_min_delay(analyzer, DELAY);

        let timed_out =
            tokio::time::timeout(Duration::from_secs(1), controller.request_analysis(IDEA)).await;
        assert!(timed_out.is_err());
        assert_eq!(controller.state(), AnalysisState::Analyzing);

        tokio::time::sleep(Duration::from_secs(60)).await;
        assert_eq!(controller.state(), AnalysisState::Ready(sneaker_brief()));

        let outcome = controller.request_analysis(IDEA).await;
        assert_eq!(outcome, TriggerOutcome::Completed(sneaker_brief()));
        assert_eq!(calls.load(Ordering::SeqCst), 2);
    }

    #[tokio::test(start_paused = true)]
    async fn test_panicking_analyzer_publishes_fallback() {
        struct PanickingAnalyzer;

        #[async_trait]
        impl Analyze for PanickingAnalyzer {
            async fn analyze(&self, _idea: &str) -> AIAnalysis {
                panic!("analyzer bug");
            }
        }

        let controller = AnalysisController::with_min_delay(PanickingAnalyzer, DELAY);

        let outcome = controller.request_analysis(IDEA).await;

        assert_eq!(outcome, TriggerOutcome::Completed(AIAnalysis::fallback()));
        assert_eq!(controller.state(), AnalysisState::Ready(AIAnalysis::fallback()));
    }

    #[tokio::test(start_paused = true)]
    async fn test_subscribers_observe_analyzing_then_ready() {
        let mut analyzer = MockAnalyze::new();
        analyzer.expect_analyze().returning(|_| sneaker_brief());
        let controller = AnalysisController::with_min_delay(analyzer, DELAY);
        let mut rx = controller.subscribe();
        assert_eq!(*rx.borrow_and_update(), AnalysisState::Empty);

        let observer = async {
            rx.changed().await.unwrap();
            assert_eq!(*rx.borrow_and_update(), AnalysisState::Analyzing);
            rx.changed().await.unwrap();
            rx.borrow_and_update().clone()
        };

        let (_, last) = tokio::join!(controller.request_analysis(IDEA), observer);
        assert_eq!(last, AnalysisState::Ready(sneaker_brief()));
    }

    #[tokio::test(start_paused = true)]
    async fn test_retrigger_from_ready_replaces_previous_result() {
        let calls = Arc::new(AtomicUsize::new(0));
        let counter = calls.clone();
        let mut analyzer = MockAnalyze::new();
        analyzer.expect_analyze().times(2).returning(move |_| {
            if counter.fetch_add(1, Ordering::SeqCst) == 0 {
                sneaker_brief()
            } else {
                AIAnalysis {
                    refined_brief: "A booking app for barbers.".to_string(),
                    suggested_stack: vec![],
                    estimated_timeline: "6 weeks".to_string(),
                }
            }
        });
        let controller = AnalysisController::with_min_delay(analyzer, DELAY);

        controller.request_analysis(IDEA).await;
        assert_eq!(controller.analysis(), Some(sneaker_brief()));

        let observer = async {
            tokio::task::yield_now().await;
            assert_eq!(controller.state(), AnalysisState::Analyzing);
            assert_eq!(controller.analysis(), None);
        };
        let (outcome, _) = tokio::join!(
            controller.request_analysis("Book haircuts online for barbers"),
            observer
        );

        let expected = AIAnalysis {
            refined_brief: "A booking app for barbers.".to_string(),
            suggested_stack: vec![],
            estimated_timeline: "6 weeks".to_string(),
        };
        assert_eq!(outcome, TriggerOutcome::Completed(expected.clone()));
        assert_eq!(controller.state(), AnalysisState::Ready(expected));
        assert_eq!(calls.load(Ordering::SeqCst), 2);
    }

    #[test]
    fn test_default_min_delay() {
        let controller = AnalysisController::new(MockAnalyze::new());
        assert_eq!(controller.min_delay(), Duration::from_millis(1500));
    }

    #[test]
    fn test_state_serializes_for_render_targets() {
        assert_eq!(
            serde_json::to_value(AnalysisState::Empty).unwrap(),
            serde_json::json!({ "status": "empty" })
        );
        let ready = serde_json::to_value(AnalysisState::Ready(sneaker_brief())).unwrap();
        assert_eq!(ready["status"], "ready");
        assert_eq!(ready["analysis"]["estimatedTimeline"], "2-3 months");
    }
}
