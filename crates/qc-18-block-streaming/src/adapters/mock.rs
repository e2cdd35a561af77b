use std::sync::atomic::{AtomicUsize, Ordering};

use crate::domain::{ArtifactKind, ArtifactName};
use crate::error::SinkError;
use crate::ports::outbound::ArtifactSink;

/// Controllable failing sink for tests.
///
/// Wraps another sink and rejects writes that match a rule, so tests can
/// simulate an unwritable `_txs` artifact while `_block` still succeeds.
pub struct FaultySink<S> {
    inner: S,
    rules: Vec<FaultRule>,
    attempts: AtomicUsize,
    failures: AtomicUsize,
}

#[derive(Debug, Clone, Copy)]
struct FaultRule {
    height: Option<i64>,
    kind: Option<ArtifactKind>,
}

impl FaultRule {
    fn matches(&self, name: &ArtifactName) -> bool {
        self.height.map_or(true, |h| h == name.height())
            && self.kind.map_or(true, |k| k == name.kind())
    }
}

impl<S: ArtifactSink> FaultySink<S> {
    pub fn new(inner: S) -> Self {
        Self {
            inner,
            rules: Vec::new(),
            attempts: AtomicUsize::new(0),
            failures: AtomicUsize::new(0),
        }
    }

    /// Fail every artifact of `kind` at `height`.
    pub fn fail_at(mut self, height: i64, kind: ArtifactKind) -> Self {
        self.rules.push(FaultRule {
            height: Some(height),
            kind: Some(kind),
        });
        self
    }

    /// Fail every artifact of `kind` at any height.
    pub fn fail_kind(mut self, kind: ArtifactKind) -> Self {
        self.rules.push(FaultRule {
            height: None,
            kind: Some(kind),
        });
        self
    }

    /// Fail every write.
    pub fn fail_all(mut self) -> Self {
        self.rules.push(FaultRule {
            height: None,
            kind: None,
        });
        self
    }

    pub fn inner(&self) -> &S {
        &self.inner
    }

    pub fn attempts(&self) -> usize {
        self.attempts.load(Ordering::Relaxed)
    }

    pub fn failures(&self) -> usize {
        self.failures.load(Ordering::Relaxed)
    }
}

impl<S: ArtifactSink> ArtifactSink for FaultySink<S> {
    fn write(&self, name: &ArtifactName, payload: &[u8]) -> Result<(), SinkError> {
        self.attempts.fetch_add(1, Ordering::Relaxed);

        if self.rules.iter().any(|rule| rule.matches(name)) {
            self.failures.fetch_add(1, Ordering::Relaxed);
            return Err(SinkError::Rejected {
                artifact: name.to_string(),
                reason: "injected fault".to_string(),
            });
        }

        self.inner.write(name, payload)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::adapters::InMemorySink;
    use crate::domain::StreamPrefix;

    #[test]
    fn test_faulty_sink_rules() {
        let sink = FaultySink::new(InMemorySink::new()).fail_at(7, ArtifactKind::Txs);
        let prefix = StreamPrefix::new("P").unwrap();

        assert!(sink.write(&prefix.artifact(7, ArtifactKind::Txs), b"{}").is_err());
        assert!(sink.write(&prefix.artifact(7, ArtifactKind::Block), b"{}").is_ok());
        assert!(sink.write(&prefix.artifact(8, ArtifactKind::Txs), b"{}").is_ok());

        assert_eq!(sink.attempts(), 3);
        assert_eq!(sink.failures(), 1);
        assert_eq!(sink.inner().names(), ["P_7_block", "P_8_txs"]);
    }

    #[test]
    fn test_fail_all() {
        let sink = FaultySink::new(InMemorySink::new()).fail_all();
        let name = StreamPrefix::default().artifact(1, ArtifactKind::Block);

        assert!(matches!(
            sink.write(&name, b"{}"),
            Err(SinkError::Rejected { .. })
        ));
        assert!(sink.inner().is_empty());
    }
}
