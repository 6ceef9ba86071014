//! Skill catalog and synonym-based skill extraction

use crate::processing::text_normalizer::normalize;
use aho_corasick::AhoCorasick;
use std::collections::HashSet;

/// Canonical skill tags with their synonym substrings.
///
/// Every synonym is kept pre-normalized (lowercase ASCII, `[a-z0-9#+ ]`
/// only) so that substring matching against normalized text is valid
/// without re-normalizing the catalog. Matching is plain containment;
/// a synonym occurring inside a longer token still counts.
const BASE_SKILLS: &[(&str, &[&str])] = &[
    ("python", &["python", "phyton"]),
    ("java", &["java"]),
    ("javascript", &["javascript", "java script", "es6"]),
    ("typescript", &["typescript", "type script"]),
    ("c#", &["c#", "csharp", "c sharp"]),
    ("c++", &["c++", "cpp", "c plus plus"]),
    ("golang", &["golang", "go lang"]),
    ("ruby", &["ruby", "rails"]),
    ("php", &["php", "laravel"]),
    ("scala", &["scala"]),
    ("kotlin", &["kotlin"]),
    ("swift", &["swift"]),
    ("sql", &["sql", "mysql", "postgres", "postgresql", "sql server", "banco de dados"]),
    ("nosql", &["nosql", "mongodb", "cassandra", "dynamodb", "redis"]),
    ("aws", &["aws", "amazon web services"]),
    ("azure", &["azure"]),
    ("gcp", &["gcp", "google cloud"]),
    ("docker", &["docker", "container", "conteiner"]),
    ("kubernetes", &["kubernetes", "k8s"]),
    ("terraform", &["terraform"]),
    ("linux", &["linux", "unix"]),
    ("git", &["git", "github", "gitlab"]),
    ("react", &["react", "reactjs"]),
    ("angular", &["angular"]),
    ("vue", &["vue", "vuejs"]),
    ("nodejs", &["node", "nodejs", "node js"]),
    ("spring", &["spring", "spring boot"]),
    ("django", &["django"]),
    ("flask", &["flask"]),
    ("dotnet", &["dotnet", "net core", "asp net"]),
    ("rest", &["api rest", "apis rest", "restful"]),
    ("machine learning", &[
        "machine learning",
        "aprendizado de maquina",
        "scikit learn",
        "sklearn",
        "tensorflow",
        "pytorch",
    ]),
    ("data science", &["data science", "ciencia de dados", "cientista de dados"]),
    ("power bi", &["power bi", "powerbi"]),
    ("excel", &["excel"]),
    ("spark", &["spark", "pyspark"]),
    ("hadoop", &["hadoop"]),
    ("kafka", &["kafka"]),
    ("airflow", &["airflow"]),
    ("etl", &["etl"]),
    ("devops", &["devops", "ci cd", "cicd", "jenkins"]),
    ("scrum", &["scrum", "agil", "agile", "kanban"]),
];

/// Immutable catalog mapping skill tags to synonym substrings, compiled
/// into a single multi-pattern automaton. Built once at startup and only
/// read afterwards.
pub struct SkillCatalog {
    tags: Vec<String>,
    matcher: AhoCorasick,
    pattern_tags: Vec<usize>,
}

impl SkillCatalog {
    pub fn new() -> Self {
        Self::with_entries(BASE_SKILLS)
    }

    fn with_entries(entries: &[(&str, &[&str])]) -> Self {
        let mut tags = Vec::with_capacity(entries.len());
        let mut patterns = Vec::new();
        let mut pattern_tags = Vec::new();

        for (tag_index, (tag, synonyms)) in entries.iter().enumerate() {
            tags.push((*tag).to_string());
            for synonym in *synonyms {
                patterns.push(*synonym);
                pattern_tags.push(tag_index);
            }
        }

        let matcher = AhoCorasick::new(&patterns).expect("Invalid skill catalog patterns");

        Self {
            tags,
            matcher,
            pattern_tags,
        }
    }

    /// Extract the set of catalog skills whose synonyms occur anywhere in
    /// the text. Input is normalized internally; output order is not
    /// meaningful, callers sort when presenting.
    pub fn extract_skills(&self, text: &str) -> HashSet<String> {
        let normalized = normalize(text);
        let mut found = HashSet::new();

        // Overlapping iteration so every synonym containment is observed,
        // even when one synonym sits inside another (e.g. "java" inside
        // "javascript").
        for mat in self.matcher.find_overlapping_iter(&normalized) {
            let tag_index = self.pattern_tags[mat.pattern().as_usize()];
            found.insert(self.tags[tag_index].clone());
        }

        found
    }

    /// Number of canonical skill tags in the catalog.
    pub fn len(&self) -> usize {
        self.tags.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tags.is_empty()
    }
}

impl Default for SkillCatalog {
    fn default() -> Self {
        Self::new()
    }
}
