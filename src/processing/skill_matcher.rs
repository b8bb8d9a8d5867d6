//! Canonical skill detection over free text

use crate::error::{MatcherError, Result};
use regex::Regex;

/// A canonical skill name and the spellings that count as a mention of it.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SkillDefinition {
    pub name: &'static str,
    pub aliases: &'static [&'static str],
}

const fn skill(name: &'static str, aliases: &'static [&'static str]) -> SkillDefinition {
    SkillDefinition { name, aliases }
}

/// Default vocabulary. Match output follows this order.
pub const SKILL_VOCABULARY: &[SkillDefinition] = &[
    // Programming languages
    skill("javascript", &["javascript", "ecmascript"]),
    skill("typescript", &["typescript"]),
    skill("python", &["python"]),
    skill("java", &["java"]),
    skill("c++", &["c++", "cpp"]),
    skill("c#", &["c#", "csharp"]),
    skill("go", &["golang", "go lang"]),
    skill("ruby", &["ruby"]),
    skill("php", &["php"]),
    skill("swift", &["swift"]),
    skill("kotlin", &["kotlin"]),
    skill("rust", &["rust"]),
    skill("scala", &["scala"]),
    skill("sql", &["sql"]),
    // Frameworks
    skill("react", &["react", "react.js", "reactjs"]),
    skill("angular", &["angular", "angularjs"]),
    skill("vue", &["vue", "vue.js", "vuejs"]),
    skill("node.js", &["node.js", "nodejs", "node"]),
    skill("express", &["express", "express.js"]),
    skill("django", &["django"]),
    skill("flask", &["flask"]),
    skill("spring", &["spring", "spring boot"]),
    skill("rails", &["rails", "ruby on rails"]),
    skill("next.js", &["next.js", "nextjs"]),
    skill(".net", &[".net", "asp.net", "dotnet"]),
    skill("laravel", &["laravel"]),
    // Databases
    skill("mongodb", &["mongodb", "mongo"]),
    skill("postgresql", &["postgresql", "postgres"]),
    skill("mysql", &["mysql"]),
    skill("redis", &["redis"]),
    skill("elasticsearch", &["elasticsearch"]),
    skill("dynamodb", &["dynamodb"]),
    skill("oracle", &["oracle"]),
    skill("sqlite", &["sqlite"]),
    // Cloud and devops
    skill("aws", &["aws", "amazon web services"]),
    skill("azure", &["azure"]),
    skill("gcp", &["gcp", "google cloud"]),
    skill("docker", &["docker"]),
    skill("kubernetes", &["kubernetes", "k8s"]),
    skill("terraform", &["terraform"]),
    skill("jenkins", &["jenkins"]),
    skill("ci/cd", &["ci/cd", "cicd", "continuous integration"]),
    skill("git", &["git"]),
    skill("linux", &["linux"]),
    skill("ansible", &["ansible"]),
    // Testing
    skill("jest", &["jest"]),
    skill("cypress", &["cypress"]),
    skill("selenium", &["selenium"]),
    skill("unit testing", &["unit testing", "unit tests"]),
    skill("tdd", &["tdd", "test-driven development", "test driven development"]),
    skill("pytest", &["pytest"]),
    // Methodologies and architecture
    skill("agile", &["agile"]),
    skill("scrum", &["scrum"]),
    skill("kanban", &["kanban"]),
    skill("devops", &["devops"]),
    skill("microservices", &["microservices", "microservice"]),
    skill("rest api", &["rest api", "rest apis", "restful"]),
    skill("graphql", &["graphql"]),
    // Data and analytics
    skill("machine learning", &["machine learning", "ml"]),
    skill("data analysis", &["data analysis", "data analytics"]),
    skill("tableau", &["tableau"]),
    skill("excel", &["excel"]),
    skill("pandas", &["pandas"]),
    skill("tensorflow", &["tensorflow"]),
    skill("power bi", &["power bi", "powerbi"]),
    skill("statistics", &["statistics", "statistical"]),
    // Soft skills
    skill("leadership", &["leadership", "leading teams"]),
    skill("communication", &["communication"]),
    skill("teamwork", &["teamwork"]),
    skill("problem solving", &["problem solving", "problem-solving"]),
    skill("project management", &["project management"]),
    skill("mentoring", &["mentoring", "mentorship"]),
    skill("collaboration", &["collaboration", "cross-functional"]),
    skill("stakeholder management", &["stakeholder management"]),
    // Web technologies
    skill("html", &["html", "html5"]),
    skill("css", &["css", "css3"]),
    skill("sass", &["sass", "scss"]),
    skill("webpack", &["webpack"]),
    skill("redux", &["redux"]),
    skill("tailwind", &["tailwind", "tailwindcss"]),
    // Mobile
    skill("ios", &["ios"]),
    skill("android", &["android"]),
    skill("react native", &["react native"]),
    skill("flutter", &["flutter"]),
    // Misc
    skill("api", &["api", "apis"]),
    skill("security", &["security"]),
    skill("blockchain", &["blockchain"]),
    skill("ui/ux", &["ui/ux", "ux", "user experience"]),
    skill("figma", &["figma"]),
    skill("jira", &["jira"]),
];

struct CompiledSkill {
    name: &'static str,
    pattern: Regex,
}

/// Detects canonical skills with one case-insensitive pattern per vocabulary entry.
pub struct SkillMatcher {
    skills: Vec<CompiledSkill>,
}

impl SkillMatcher {
    /// Create a matcher over the default vocabulary
    pub fn new() -> Result<Self> {
        Self::with_vocabulary(SKILL_VOCABULARY)
    }

    pub fn with_vocabulary(vocabulary: &[SkillDefinition]) -> Result<Self> {
        let mut skills = Vec::with_capacity(vocabulary.len());

        for definition in vocabulary {
            if definition.aliases.is_empty() {
                return Err(MatcherError::Processing(format!(
                    "Skill '{}' has no aliases",
                    definition.name
                )));
            }

            let alternation = definition
                .aliases
                .iter()
                .map(|alias| regex::escape(alias))
                .collect::<Vec<_>>()
                .join("|");

            // Alphanumerics on either side mean the alias is part of a longer word
            let pattern = Regex::new(&format!(r"(?i)(?:^|[^a-z0-9])(?:{})(?:$|[^a-z0-9])", alternation))
                .map_err(|e| {
                    MatcherError::Processing(format!("Failed to compile skill '{}': {}", definition.name, e))
                })?;

            skills.push(CompiledSkill {
                name: definition.name,
                pattern,
            });
        }

        Ok(Self { skills })
    }

    /// Canonical skills mentioned in `text`, in vocabulary order.
    pub fn find_skills(&self, text: &str) -> Vec<String> {
        if text.trim().is_empty() {
            return Vec::new();
        }

        let mut found: Vec<String> = Vec::new();
        for skill in &self.skills {
            if skill.pattern.is_match(text) && !found.iter().any(|s| s == skill.name) {
                found.push(skill.name.to_string());
            }
        }
        found
    }

    pub fn skill_count(&self) -> usize {
        self.skills.len()
    }
}

impl Default for SkillMatcher {
    fn default() -> Self {
        Self::new().expect("Failed to create default skill matcher")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_skill_matcher_creation() {
        let matcher = SkillMatcher::new().unwrap();
        assert_eq!(matcher.skill_count(), SKILL_VOCABULARY.len());
        assert!(matcher.skill_count() >= 80);
    }

    #[test]
    fn test_vocabulary_order_not_input_order() {
        let matcher = SkillMatcher::new().unwrap();
        let skills = matcher.find_skills("Docker, React and Python on AWS");

        assert_eq!(skills, vec!["python", "react", "aws", "docker"]);
    }

    #[test]
    fn test_word_boundaries() {
        let matcher = SkillMatcher::new().unwrap();

        let skills = matcher.find_skills("Modern JavaScript tooling");
        assert!(skills.contains(&"javascript".to_string()));
        assert!(!skills.contains(&"java".to_string()));

        let skills = matcher.find_skills("Trusted advisor");
        assert!(!skills.contains(&"rust".to_string()));
    }

    #[test]
    fn test_symbols_in_skill_names() {
        let matcher = SkillMatcher::new().unwrap();
        let skills = matcher.find_skills("Wrote C++ and C# services on Node.js with a CI/CD pipeline");

        assert!(skills.contains(&"c++".to_string()));
        assert!(skills.contains(&"c#".to_string()));
        assert!(skills.contains(&"node.js".to_string()));
        assert!(skills.contains(&"ci/cd".to_string()));
        assert!(!skills.contains(&"javascript".to_string()));
    }

    #[test]
    fn test_aliases_map_to_canonical_name() {
        let matcher = SkillMatcher::new().unwrap();
        let skills = matcher.find_skills("Postgres on k8s, mentorship of juniors");

        assert_eq!(skills, vec!["postgresql", "kubernetes", "mentoring"]);
    }

    #[test]
    fn test_case_insensitive_and_deduplicated() {
        let matcher = SkillMatcher::new().unwrap();
        let skills = matcher.find_skills("REACT react ReactJS");

        assert_eq!(skills, vec!["react"]);
    }

    #[test]
    fn test_empty_text() {
        let matcher = SkillMatcher::new().unwrap();
        assert!(matcher.find_skills("").is_empty());
    }

    #[test]
    fn test_custom_vocabulary() {
        let vocabulary = [skill("zig", &["zig", "ziglang"])];
        let matcher = SkillMatcher::with_vocabulary(&vocabulary).unwrap();

        assert_eq!(matcher.find_skills("Ported the parser to Ziglang"), vec!["zig"]);
        assert!(SkillMatcher::with_vocabulary(&[skill("empty", &[])]).is_err());
    }
}
