//! Generated candidates waiting to be promoted onto the timeline.

use parking_lot::Mutex;
use std::sync::Arc;
use tokio::task::JoinHandle;
use tracing::{info, warn};

use crate::error::{AssetError, AssetResult};
use crate::generator::AssetGenerator;

#[derive(Debug, Default)]
struct PoolState {
    /// Newest first.
    candidates: Vec<String>,
    generating: bool,
}

/// Shared list of generated image URLs. Clones share state.
#[derive(Debug, Clone, Default)]
pub struct CandidatePool {
    state: Arc<Mutex<PoolState>>,
}

/// Clears the in-flight flag when a generation ends, however it ends.
struct InFlight<'a>(&'a CandidatePool);

impl Drop for InFlight<'_> {
    fn drop(&mut self) {
        self.0.state.lock().generating = false;
    }
}

impl CandidatePool {
    pub fn new() -> Self {
        Self::default()
    }

    /// Candidates, newest first.
    pub fn candidates(&self) -> Vec<String> {
        self.state.lock().candidates.clone()
    }

    pub fn len(&self) -> usize {
        self.state.lock().candidates.len()
    }

    pub fn is_empty(&self) -> bool {
        self.state.lock().candidates.is_empty()
    }

    /// Whether a generation is in flight.
    pub fn is_generating(&self) -> bool {
        self.state.lock().generating
    }

    /// Put `url` at the front of the pool.
    pub fn push(&self, url: String) {
        self.state.lock().candidates.insert(0, url);
    }

    /// Take a candidate out of the pool.
    pub fn remove(&self, url: &str) -> bool {
        let mut state = self.state.lock();
        let before = state.candidates.len();
        state.candidates.retain(|c| c != url);
        state.candidates.len() != before
    }

    /// Run `generator` on `prompt` and keep the result.
    ///
    /// Empty prompts are rejected without calling the generator, as is a
    /// second request while one is in flight. Failures are reported once and
    /// leave the pool unchanged.
    pub async fn generate<G: AssetGenerator>(
        &self,
        generator: &G,
        prompt: &str,
    ) -> AssetResult<String> {
        let prompt = prompt.trim();
        if prompt.is_empty() {
            return Err(AssetError::EmptyPrompt);
        }
        {
            let mut state = self.state.lock();
            if state.generating {
                return Err(AssetError::Busy);
            }
            state.generating = true;
        }
        let _in_flight = InFlight(self);

        match generator.generate(prompt).await {
            Ok(url) => {
                info!(prompt, "Asset generated");
                self.push(url.clone());
                Ok(url)
            }
            Err(e) => {
                warn!(prompt, error = %e, "Asset generation failed");
                Err(e)
            }
        }
    }
}

/// Runs generations on background tasks against one shared pool.
#[derive(Debug)]
pub struct AssetStudio<G> {
    generator: Arc<G>,
    pool: CandidatePool,
}

impl<G> Clone for AssetStudio<G> {
    fn clone(&self) -> Self {
        Self {
            generator: Arc::clone(&self.generator),
            pool: self.pool.clone(),
        }
    }
}

impl<G: AssetGenerator> AssetStudio<G> {
    pub fn new(generator: G) -> Self {
        Self {
            generator: Arc::new(generator),
            pool: CandidatePool::new(),
        }
    }

    pub fn pool(&self) -> &CandidatePool {
        &self.pool
    }

    /// Start a generation on the current tokio runtime.
    pub fn spawn_generate(&self, prompt: impl Into<String>) -> JoinHandle<AssetResult<String>> {
        let studio = self.clone();
        let prompt = prompt.into();
        tokio::spawn(async move { studio.pool.generate(studio.generator.as_ref(), &prompt).await })
    }

    /// Await a spawned generation, folding a dropped task into an error.
    pub async fn join(handle: JoinHandle<AssetResult<String>>) -> AssetResult<String> {
        handle.await.unwrap_or(Err(AssetError::Aborted))
    }

    pub fn generator(&self) -> &G {
        &self.generator
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::time::Duration;

    #[derive(Default)]
    struct Counting {
        calls: AtomicUsize,
    }

    impl AssetGenerator for Counting {
        async fn generate(&self, prompt: &str) -> AssetResult<String> {
            let n = self.calls.fetch_add(1, Ordering::SeqCst);
            if prompt == "fail" {
                return Err(AssetError::Generation("backend down".into()));
            }
            Ok(format!("https://cdn.example/{n}.png"))
        }
    }

    struct Slow;

    impl AssetGenerator for Slow {
        async fn generate(&self, _prompt: &str) -> AssetResult<String> {
            tokio::time::sleep(Duration::from_secs(2)).await;
            Ok("https://cdn.example/slow.png".into())
        }
    }

    #[tokio::test]
    async fn newest_candidate_first() {
        let pool = CandidatePool::new();
        let generator = Counting::default();
        pool.generate(&generator, "a red fox").await.unwrap();
        pool.generate(&generator, "a blue bird").await.unwrap();
        assert_eq!(
            pool.candidates(),
            vec!["https://cdn.example/1.png", "https://cdn.example/0.png"]
        );
    }

    #[tokio::test]
    async fn blank_prompt_never_reaches_generator() {
        let pool = CandidatePool::new();
        let generator = Counting::default();
        assert_eq!(pool.generate(&generator, "   ").await, Err(AssetError::EmptyPrompt));
        assert_eq!(generator.calls.load(Ordering::SeqCst), 0);
        assert!(pool.is_empty());
    }

    #[tokio::test]
    async fn failure_surfaces_once_and_clears_flag() {
        let pool = CandidatePool::new();
        let generator = Counting::default();
        let err = pool.generate(&generator, "fail").await.unwrap_err();
        assert!(matches!(err, AssetError::Generation(_)));
        assert_eq!(generator.calls.load(Ordering::SeqCst), 1);
        assert!(!pool.is_generating());
        assert!(pool.is_empty());
    }

    #[tokio::test(start_paused = true)]
    async fn concurrent_request_is_busy() {
        let studio = AssetStudio::new(Slow);
        let first = studio.spawn_generate("sunset");
        tokio::task::yield_now().await;
        assert!(studio.pool().is_generating());

        let second = studio.spawn_generate("sunrise");
        assert_eq!(AssetStudio::<Slow>::join(second).await, Err(AssetError::Busy));

        let url = AssetStudio::<Slow>::join(first).await.unwrap();
        assert_eq!(studio.pool().candidates(), vec![url]);
        assert!(!studio.pool().is_generating());
    }

    #[test]
    fn remove_candidate() {
        let pool = CandidatePool::new();
        pool.push("a".into());
        pool.push("b".into());
        assert!(pool.remove("a"));
        assert!(!pool.remove("a"));
        assert_eq!(pool.len(), 1);
    }
}
