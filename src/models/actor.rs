use std::{collections::HashMap, fmt::Display, str::FromStr};

use regex::Regex;
use serde::{Deserialize, Serialize};

/// Award categories an actor can hold
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum AwardKind {
    BestPerformance,
    BestDirector,
    PeopleChoiceAward,
    BestSupportingActor,
    BestScreenplay,
}

impl FromStr for AwardKind {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "BEST_PERFORMANCE" => Ok(AwardKind::BestPerformance),
            "BEST_DIRECTOR" => Ok(AwardKind::BestDirector),
            "PEOPLE_CHOICE_AWARD" => Ok(AwardKind::PeopleChoiceAward),
            "BEST_SUPPORTING_ACTOR" => Ok(AwardKind::BestSupportingActor),
            "BEST_SCREENPLAY" => Ok(AwardKind::BestScreenplay),
            other => Err(format!("unknown award kind: {}", other)),
        }
    }
}

impl Display for AwardKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let name = match self {
            AwardKind::BestPerformance => "BEST_PERFORMANCE",
            AwardKind::BestDirector => "BEST_DIRECTOR",
            AwardKind::PeopleChoiceAward => "PEOPLE_CHOICE_AWARD",
            AwardKind::BestSupportingActor => "BEST_SUPPORTING_ACTOR",
            AwardKind::BestScreenplay => "BEST_SCREENPLAY",
        };
        write!(f, "{}", name)
    }
}

/// An actor known to the catalog
#[derive(Debug, Clone, PartialEq)]
pub struct Actor {
    pub name: String,
    pub career_description: String,
    /// Titles the actor appeared in; not all of them exist in the catalog
    pub filmography: Vec<String>,
    pub awards: HashMap<AwardKind, u32>,
    /// Derived from the filmography ratings, refreshed by the catalog before reads
    pub rating: f64,
}

impl Actor {
    pub fn new(
        name: String,
        career_description: String,
        filmography: Vec<String>,
        awards: HashMap<AwardKind, u32>,
    ) -> Self {
        Self {
            name,
            career_description,
            filmography,
            awards,
            rating: 0.0,
        }
    }

    /// Sum of all award counts
    pub fn total_awards(&self) -> u64 {
        self.awards.values().map(|&count| u64::from(count)).sum()
    }

    pub fn has_award(&self, award: AwardKind) -> bool {
        self.awards.contains_key(&award)
    }

    /// True when the actor holds every named award.
    ///
    /// A name that is not a known award kind can never be held.
    pub fn has_all_awards(&self, required: &[String]) -> bool {
        required.iter().all(|name| {
            name.parse::<AwardKind>()
                .map(|award| self.has_award(award))
                .unwrap_or(false)
        })
    }

    /// Whether the career description contains every word of the filter
    pub fn description_matches(&self, filter: &DescriptionFilter) -> bool {
        let description = self.career_description.to_lowercase();
        filter.patterns.iter().all(|re| re.is_match(&description))
    }
}

/// Case-insensitive whole-word patterns, compiled once per query
#[derive(Debug, Clone)]
pub struct DescriptionFilter {
    patterns: Vec<Regex>,
}

impl DescriptionFilter {
    pub fn new(words: &[String]) -> Result<Self, regex::Error> {
        let patterns = words
            .iter()
            .map(|word| Regex::new(&format!(r"\b{}\b", regex::escape(&word.to_lowercase()))))
            .collect::<Result<Vec<_>, _>>()?;
        Ok(Self { patterns })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn actor(description: &str, awards: &[(AwardKind, u32)]) -> Actor {
        Actor::new(
            "Keanu Reeves".to_string(),
            description.to_string(),
            vec!["The Matrix".to_string()],
            awards.iter().copied().collect(),
        )
    }

    #[test]
    fn test_total_awards() {
        let actor = actor(
            "",
            &[(AwardKind::BestDirector, 2), (AwardKind::BestScreenplay, 1)],
        );
        assert_eq!(actor.total_awards(), 3);
    }

    #[test]
    fn test_has_all_awards() {
        let actor = actor("", &[(AwardKind::BestDirector, 1)]);
        assert!(actor.has_all_awards(&["BEST_DIRECTOR".to_string()]));
        assert!(!actor.has_all_awards(&[
            "BEST_DIRECTOR".to_string(),
            "BEST_SCREENPLAY".to_string()
        ]));
        assert!(actor.has_all_awards(&[]));
    }

    #[test]
    fn test_unknown_award_never_matches() {
        let actor = actor("", &[(AwardKind::BestDirector, 1)]);
        assert!(!actor.has_all_awards(&["GOLDEN_RASPBERRY".to_string()]));
    }

    #[test]
    fn test_description_whole_word_case_insensitive() {
        let actor = actor("An American actor, born in Beirut. Known for action films.", &[]);
        let matches = |words: &[&str]| {
            let words: Vec<String> = words.iter().map(|w| w.to_string()).collect();
            actor.description_matches(&DescriptionFilter::new(&words).unwrap())
        };
        assert!(matches(&["american"]));
        assert!(matches(&["Action", "born"]));
        // "act" only appears inside longer words
        assert!(!matches(&["act"]));
        assert!(!matches(&["american", "drama"]));
        assert!(matches(&[]));
    }

    #[test]
    fn test_description_filter_escapes_words() {
        let actor = actor("Starred in C++ tutorials (briefly).", &[]);
        let filter = DescriptionFilter::new(&["(briefly".to_string()]).unwrap();
        assert!(!actor.description_matches(&filter));
        let filter = DescriptionFilter::new(&["tutorials".to_string()]).unwrap();
        assert!(actor.description_matches(&filter));
    }

    #[test]
    fn test_award_kind_serde() {
        let json = serde_json::to_string(&AwardKind::PeopleChoiceAward).unwrap();
        assert_eq!(json, "\"PEOPLE_CHOICE_AWARD\"");
        let parsed: AwardKind = serde_json::from_str("\"BEST_SUPPORTING_ACTOR\"").unwrap();
        assert_eq!(parsed, AwardKind::BestSupportingActor);
        assert_eq!(parsed.to_string(), "BEST_SUPPORTING_ACTOR");
    }
}
