//! Subject resolution for datastream statements

use std::fmt;
use std::sync::{Arc, OnceLock};

use crate::error::{ModelError, ModelResult};
use crate::rdf::RdfSubject;

/// Default namespace prepended to repository identifiers
pub const DEFAULT_SUBJECT_NAMESPACE: &str = "info:fedora/";

/// What a custom subject rule gets to look at
#[derive(Debug, Clone, Copy)]
pub struct SubjectContext<'a> {
    pub pid: Option<&'a str>,
    pub dsid: &'a str,
}

/// Custom subject rule installed on a datastream type
pub type SubjectRule = Arc<dyn Fn(&SubjectContext<'_>) -> String + Send + Sync>;

/// Resolves, and caches, the subject of one datastream instance.
///
/// Resolution is deferred until first use because an unsaved object may not
/// have an identifier yet. The cached value is only dropped by `rebind`.
#[derive(Clone)]
pub struct SubjectBinder {
    namespace: String,
    rule: Option<SubjectRule>,
    resolved: OnceLock<RdfSubject>,
}

impl SubjectBinder {
    pub fn new(namespace: impl Into<String>, rule: Option<SubjectRule>) -> Self {
        Self {
            namespace: namespace.into(),
            rule,
            resolved: OnceLock::new(),
        }
    }

    /// Resolve the subject, computing it on first call
    pub fn resolve(&self, pid: Option<&str>, dsid: &str) -> ModelResult<&RdfSubject> {
        if let Some(subject) = self.resolved.get() {
            return Ok(subject);
        }
        let iri = match (&self.rule, pid) {
            (Some(rule), _) => rule(&SubjectContext { pid, dsid }),
            (None, Some(pid)) => format!("{}{}", self.namespace, pid),
            (None, None) => return Err(ModelError::UnboundSubject(dsid.to_string())),
        };
        let subject = RdfSubject::parse(&iri)?;
        Ok(self.resolved.get_or_init(|| subject))
    }

    /// Subject if already resolved
    pub fn current(&self) -> Option<&RdfSubject> {
        self.resolved.get()
    }

    /// Forget the cached subject so the next access recomputes it
    pub fn rebind(&mut self) {
        self.resolved = OnceLock::new();
    }

    pub fn has_custom_rule(&self) -> bool {
        self.rule.is_some()
    }
}

impl fmt::Debug for SubjectBinder {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SubjectBinder")
            .field("namespace", &self.namespace)
            .field("custom_rule", &self.rule.is_some())
            .field("resolved", &self.resolved.get())
            .finish()
    }
}
