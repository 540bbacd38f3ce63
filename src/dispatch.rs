//! Keyword heuristic deciding whether a task should go to an async agent.

use crate::agents::AgentKind;
use crate::config::appsettings::DispatchSettings;

#[derive(Debug, Clone)]
pub struct Classifier {
    keywords: Vec<String>,
}

impl Classifier {
    pub fn new<I, S>(keywords: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        Classifier {
            keywords: keywords
                .into_iter()
                .map(|k| k.as_ref().trim().to_lowercase())
                .filter(|k| !k.is_empty())
                .collect(),
        }
    }

    pub fn from_settings(settings: &DispatchSettings) -> Self {
        Classifier::new(&settings.async_keywords)
    }

    /// First keyword found in `task`, if any.
    pub fn matched_keyword(&self, task: &str) -> Option<&str> {
        let lower = task.to_lowercase();
        self.keywords
            .iter()
            .find(|kw| lower.contains(kw.as_str()))
            .map(|kw| kw.as_str())
    }

    pub fn classify(&self, task: &str) -> AgentKind {
        if self.matched_keyword(task).is_some() {
            AgentKind::Async
        } else {
            AgentKind::Sync
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Route {
    Async { agent: String, repo: String },
    Sync { agent: String },
}

impl Route {
    pub fn agent(&self) -> &str {
        match self {
            Route::Async { agent, .. } | Route::Sync { agent } => agent,
        }
    }
}

/// Async work needs a repo; without one the task goes to the sync agent.
pub fn route(
    classifier: &Classifier,
    task: &str,
    repo: Option<&str>,
    sync_agent: &str,
    async_agent: &str,
) -> Route {
    match (classifier.classify(task), repo) {
        (AgentKind::Async, Some(repo)) => Route::Async {
            agent: async_agent.to_string(),
            repo: repo.to_string(),
        },
        _ => Route::Sync {
            agent: sync_agent.to_string(),
        },
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn default_classifier() -> Classifier {
        Classifier::from_settings(&DispatchSettings::default())
    }

    #[test]
    fn classify_without_keywords_is_sync() {
        assert_eq!(default_classifier().classify("fix this bug"), AgentKind::Sync);
    }

    #[test]
    fn classify_with_keyword_is_async() {
        let c = default_classifier();
        assert_eq!(c.classify("add tests for this feature"), AgentKind::Async);
        assert_eq!(c.matched_keyword("add tests for this feature"), Some("tests"));
    }

    #[test]
    fn classify_ignores_case() {
        let c = default_classifier();
        assert_eq!(c.classify("Write DOCUMENTATION"), AgentKind::Async);
        assert_eq!(c.classify("run in Background"), AgentKind::Async);
    }

    #[test]
    fn classify_matches_substrings() {
        // substring, not word, matching
        let c = default_classifier();
        assert_eq!(c.classify("update to latest"), AgentKind::Sync);
        assert_eq!(c.classify("collateral damage"), AgentKind::Async);
    }

    #[test]
    fn custom_keywords_are_normalized() {
        let c = Classifier::new(["  Refactor ", ""]);
        assert_eq!(c.classify("refactor the parser"), AgentKind::Async);
        assert_eq!(c.classify("add tests"), AgentKind::Sync);
        assert_eq!(Classifier::new(Vec::<String>::new()).classify("tests"), AgentKind::Sync);
    }

    #[test]
    fn async_task_with_repo_routes_async() {
        let r = route(
            &default_classifier(),
            "add tests for this feature",
            Some("owner/repo"),
            "gemini",
            "jules",
        );
        assert_eq!(
            r,
            Route::Async {
                agent: "jules".into(),
                repo: "owner/repo".into()
            }
        );
    }

    #[test]
    fn async_task_without_repo_falls_back_to_sync() {
        let r = route(
            &default_classifier(),
            "add tests for this feature",
            None,
            "gemini",
            "jules",
        );
        assert_eq!(r, Route::Sync { agent: "gemini".into() });
    }

    #[test]
    fn sync_task_ignores_repo() {
        let r = route(
            &default_classifier(),
            "fix this bug",
            Some("owner/repo"),
            "claude",
            "jules",
        );
        assert_eq!(r.agent(), "claude");
    }
}
