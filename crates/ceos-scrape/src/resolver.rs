//! Acronym resolution: cache first, then the lookup service, then the user.

use ceos_core::{
    parse_selection, AcronymMeaning, CacheStore, ScrapeResult, Selection, MAX_CANDIDATES,
};

use crate::clients::AcronymLookup;
use crate::prompt::Prompter;

/// Maps agency acronyms to canonical names, persisting every decision.
pub struct AcronymResolver<L, P> {
    cache: CacheStore,
    lookup: L,
    prompter: P,
}

impl<L: AcronymLookup, P: Prompter> AcronymResolver<L, P> {
    pub fn new(cache: CacheStore, lookup: L, prompter: P) -> Self {
        Self {
            cache,
            lookup,
            prompter,
        }
    }

    /// Canonical agency name for `acronym`.
    ///
    /// A cached acronym returns immediately. Otherwise the service is queried
    /// and the user picks (or types) the meaning, which is cached before
    /// returning. Service failures are not retried.
    pub async fn resolve(&mut self, acronym: &str) -> ScrapeResult<String> {
        if let Some(name) = self.cache.get(acronym)? {
            return Ok(name);
        }

        let meanings = self.lookup.lookup(acronym).await?;
        let name = self.choose(acronym, &meanings)?;

        self.cache.put(acronym, &name)?;
        tracing::info!("resolved {acronym} -> {name}");
        Ok(name)
    }

    fn choose(&mut self, acronym: &str, meanings: &[AcronymMeaning]) -> ScrapeResult<String> {
        self.prompter.clear();

        if meanings.is_empty() {
            return self
                .prompter
                .ask(&format!("No meaning found for {acronym}. Please specify: "));
        }

        let shown = &meanings[..meanings.len().min(MAX_CANDIDATES)];
        for (i, m) in shown.iter().enumerate() {
            self.prompter.say(&format!("{} {}", i + 1, m.meaning));
        }

        let question =
            format!("Select meaning to use for {acronym} [default=1] or type 'S' to specify: ");
        loop {
            let answer = self.prompter.ask(&question)?;
            match parse_selection(&answer, shown.len()) {
                Selection::Selected(i) => {
                    let meaning = shown[i].meaning.clone();
                    self.prompter.say(&format!("selected {meaning}"));
                    return Ok(meaning);
                }
                Selection::FreeText => return self.prompter.ask("Please specify: "),
                Selection::Invalid => self.prompter.say(&format!("Invalid choice: {answer}")),
            }
        }
    }

    pub fn cache(&self) -> &CacheStore {
        &self.cache
    }

    pub fn prompter(&self) -> &P {
        &self.prompter
    }

    pub fn lookup(&self) -> &L {
        &self.lookup
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::prompt::ScriptedPrompter;
    use async_trait::async_trait;
    use ceos_core::ScrapeError;
    use std::sync::atomic::{AtomicUsize, Ordering};

    /// Lookup returning a fixed list and counting calls.
    struct FixedLookup {
        meanings: Vec<AcronymMeaning>,
        calls: AtomicUsize,
    }

    impl FixedLookup {
        fn new(meanings: &[(&str, &str)]) -> Self {
            Self {
                meanings: meanings
                    .iter()
                    .map(|(s, m)| AcronymMeaning::new(*s, *m))
                    .collect(),
                calls: AtomicUsize::new(0),
            }
        }

        fn calls(&self) -> usize {
            self.calls.load(Ordering::SeqCst)
        }
    }

    #[async_trait]
    impl AcronymLookup for FixedLookup {
        async fn lookup(&self, _acronym: &str) -> ScrapeResult<Vec<AcronymMeaning>> {
            self.calls.fetch_add(1, Ordering::SeqCst);
            Ok(self.meanings.clone())
        }
    }

    struct FailingLookup;

    #[async_trait]
    impl AcronymLookup for FailingLookup {
        async fn lookup(&self, acronym: &str) -> ScrapeResult<Vec<AcronymMeaning>> {
            Err(ScrapeError::Lookup {
                acronym: acronym.to_string(),
                status: 503,
            })
        }
    }

    fn three_meanings() -> FixedLookup {
        FixedLookup::new(&[
            ("CSA", "Canadian Space Agency"),
            ("CSA", "Confederate States of America"),
            ("CSA", "Community Supported Agriculture"),
        ])
    }

    fn temp_cache(dir: &tempfile::TempDir) -> CacheStore {
        CacheStore::new(dir.path().join("agency.json"))
    }

    #[tokio::test]
    async fn test_cache_hit_skips_lookup_and_prompt() {
        let dir = tempfile::tempdir().unwrap();
        let cache = temp_cache(&dir);
        cache.put("NASA", "National Aeronautics and Space Administration").unwrap();

        let mut resolver =
            AcronymResolver::new(cache, three_meanings(), ScriptedPrompter::default());

        for _ in 0..2 {
            let name = resolver.resolve("NASA").await.unwrap();
            assert_eq!(name, "National Aeronautics and Space Administration");
        }
        assert_eq!(resolver.lookup().calls(), 0);
        assert_eq!(resolver.prompter().asked(), 0);
        assert_eq!(resolver.prompter().clears, 0);
    }

    #[tokio::test]
    async fn test_numeric_choice_selects_candidate() {
        let dir = tempfile::tempdir().unwrap();
        let mut resolver = AcronymResolver::new(
            temp_cache(&dir),
            three_meanings(),
            ScriptedPrompter::new(["2"]),
        );

        let name = resolver.resolve("CSA").await.unwrap();
        assert_eq!(name, "Confederate States of America");
        assert_eq!(
            resolver.cache().get("CSA").unwrap().as_deref(),
            Some("Confederate States of America")
        );
        let transcript = &resolver.prompter().transcript;
        assert_eq!(transcript[0], "1 Canadian Space Agency");
        assert_eq!(transcript[2], "3 Community Supported Agriculture");
        assert!(transcript.contains(&"selected Confederate States of America".to_string()));
        assert_eq!(resolver.prompter().clears, 1);
    }

    #[tokio::test]
    async fn test_invalid_choices_reprompt() {
        let dir = tempfile::tempdir().unwrap();
        let mut resolver = AcronymResolver::new(
            temp_cache(&dir),
            three_meanings(),
            ScriptedPrompter::new(["5", "abc", "1"]),
        );

        let name = resolver.resolve("CSA").await.unwrap();
        assert_eq!(name, "Canadian Space Agency");

        let p = resolver.prompter();
        assert_eq!(p.asked(), 3);
        assert!(p.transcript.contains(&"Invalid choice: 5".to_string()));
        assert!(p.transcript.contains(&"Invalid choice: abc".to_string()));
    }

    #[tokio::test]
    async fn test_sentinel_switches_to_free_text() {
        let dir = tempfile::tempdir().unwrap();
        let mut resolver = AcronymResolver::new(
            temp_cache(&dir),
            three_meanings(),
            ScriptedPrompter::new(["S", "Canadian Space Agency / Agence spatiale canadienne"]),
        );

        let name = resolver.resolve("CSA").await.unwrap();
        assert_eq!(name, "Canadian Space Agency / Agence spatiale canadienne");
        assert_eq!(resolver.prompter().transcript.last().unwrap(), "? Please specify: ");
    }

    #[tokio::test]
    async fn test_no_candidates_prompts_free_text() {
        let dir = tempfile::tempdir().unwrap();
        let mut resolver = AcronymResolver::new(
            temp_cache(&dir),
            FixedLookup::new(&[]),
            ScriptedPrompter::new(["Example Agency"]),
        );

        let name = resolver.resolve("XYZ").await.unwrap();
        assert_eq!(name, "Example Agency");
        assert_eq!(
            resolver.prompter().transcript,
            vec!["? No meaning found for XYZ. Please specify: "]
        );

        let reopened = CacheStore::new(dir.path().join("agency.json"));
        assert_eq!(reopened.get("XYZ").unwrap().as_deref(), Some("Example Agency"));
    }

    #[tokio::test]
    async fn test_empty_free_text_accepted() {
        let dir = tempfile::tempdir().unwrap();
        let mut resolver = AcronymResolver::new(
            temp_cache(&dir),
            FixedLookup::new(&[]),
            ScriptedPrompter::new([""]),
        );

        assert_eq!(resolver.resolve("XYZ").await.unwrap(), "");
        assert_eq!(resolver.cache().get("XYZ").unwrap().as_deref(), Some(""));
    }

    #[tokio::test]
    async fn test_only_first_ten_candidates_selectable() {
        let many: Vec<(String, String)> = (1..=12)
            .map(|i| ("EO".to_string(), format!("Meaning {i}")))
            .collect();
        let refs: Vec<(&str, &str)> = many.iter().map(|(s, m)| (s.as_str(), m.as_str())).collect();

        let dir = tempfile::tempdir().unwrap();
        let mut resolver = AcronymResolver::new(
            temp_cache(&dir),
            FixedLookup::new(&refs),
            ScriptedPrompter::new(["11", "10"]),
        );

        assert_eq!(resolver.resolve("EO").await.unwrap(), "Meaning 10");
        let p = resolver.prompter();
        assert!(p.transcript.contains(&"Invalid choice: 11".to_string()));
        assert!(!p.transcript.iter().any(|l| l.starts_with("11 ")));
    }

    #[tokio::test]
    async fn test_lookup_failure_propagates_and_caches_nothing() {
        let dir = tempfile::tempdir().unwrap();
        let mut resolver =
            AcronymResolver::new(temp_cache(&dir), FailingLookup, ScriptedPrompter::default());

        let err = resolver.resolve("NASA").await.unwrap_err();
        assert!(matches!(err, ScrapeError::Lookup { status: 503, .. }));
        assert!(resolver.cache().load().unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_closed_console_aborts() {
        let dir = tempfile::tempdir().unwrap();
        let mut resolver = AcronymResolver::new(
            temp_cache(&dir),
            three_meanings(),
            ScriptedPrompter::new(["nope"]),
        );

        let err = resolver.resolve("CSA").await.unwrap_err();
        assert!(matches!(err, ScrapeError::Prompt(_)));
        assert_eq!(resolver.cache().get("CSA").unwrap(), None);
    }
}
