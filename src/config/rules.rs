//! Static rulesets for candidate filtering and person classification.
//!
//! These are English-Wikipedia-specific tables, kept apart from the code that
//! applies them so they can be tuned without touching the classifier.

use once_cell::sync::Lazy;
use regex::Regex;
use std::collections::HashSet;

/// Substrings that mark a title as a meta page or an obvious non-person
/// article. Matched against the lower-cased title.
pub static META_PATTERNS: &[&str] = &[
    // namespace prefixes
    "category:",
    "template:",
    "portal:",
    "help:",
    "wikipedia:",
    "file:",
    "user:",
    "talk:",
    "special:",
    "mediawiki:",
    "draft:",
    "timedtext:",
    "module:",
    // meta-article tokens
    "disambiguation",
    "timeline of",
    "history of",
    "geography of",
    "culture of",
    "economy of",
    "politics of",
    "government of",
    "military of",
    // parenthetical qualifiers for non-person subjects
    "(software)",
    "(operating system)",
    "(programming",
    "(computer",
    "(app)",
    "(company)",
    "(device)",
    "(product)",
    "(video game)",
    "(band)",
    "(film)",
];

/// Category keywords that admit an article as a person.
pub static PERSON_POSITIVE: &[&str] = &[
    "living people",
    "people from",
    "alumni",
    // occupations
    "actors",
    "actresses",
    "singers",
    "musicians",
    "composers",
    "rappers",
    "politicians",
    "diplomats",
    "scientists",
    "physicists",
    "chemists",
    "biologists",
    "mathematicians",
    "economists",
    "historians",
    "philosophers",
    "writers",
    "novelists",
    "poets",
    "journalists",
    "painters",
    "sculptors",
    "architects",
    "inventors",
    "engineers",
    "entrepreneurs",
    "businesspeople",
    "activists",
    "athletes",
    "footballers",
    "boxers",
    "swimmers",
    "film directors",
    "screenwriters",
    "producers",
    "comedians",
    "military personnel",
    "generals",
    "admirals",
    // historical titles
    "emperors",
    "empresses",
    "monarchs",
    "kings",
    "queens",
    "khans",
    "sultans",
    "caliphs",
    "tsars",
    "pharaohs",
    "popes",
    "saints",
];

/// Category keywords that reject an article, unless an exception applies.
/// Restrictive on purpose: large technical hub pages (products, companies,
/// media) would otherwise swamp the forward frontier.
pub static PERSON_NEGATIVE: &[&str] = &[
    "animals",
    "animal breeds",
    "fictional",
    "characters",
    "mythology",
    "deities",
    "organizations",
    "organisations",
    "companies",
    "institutions",
    "albums",
    "songs",
    "singles",
    "films",
    "television series",
    "video games",
    "novels",
    "comics",
    "bands",
    "musical groups",
    "populated places",
    "cities",
    "countries",
    "rivers",
    "mountains",
    "buildings",
    "wars",
    "battles",
    "elections",
    "events",
    "dynasties",
    "empires",
    "kingdoms",
    "software",
    "operating systems",
    "programming languages",
    "websites",
];

/// Keywords that veto the negative gate: categories of people whose names
/// contain an animal/tech substring ("Animal rights activists",
/// "Software engineers").
pub static PERSON_EXCEPTION: &[&str] = &[
    "activist", "trainer", "owner", "engineer", "developer", "founder", "ceo",
];

/// `"1946 births"` / `"1986 deaths"` style categories.
pub static BIRTH_DEATH_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"\d{4} (births|deaths)").expect("Failed to compile birth/death regex"));

/// `"13th-century ..."` style categories; only admits a person when combined
/// with one of [`CENTURY_PERSON_HINTS`].
pub static CENTURY_RE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"\d{1,2}(st|nd|rd|th)-century").expect("Failed to compile century regex")
});

pub static CENTURY_PERSON_HINTS: &[&str] = &["rulers", "people", "monarchs", "leaders"];

/// Well-known hub people, pre-declared human so the classifier never spends
/// an API call on them.
pub static VIP_TITLES: Lazy<HashSet<&'static str>> = Lazy::new(|| {
    HashSet::from([
        "Abraham Lincoln",
        "Adolf Hitler",
        "Albert Einstein",
        "Alexander the Great",
        "Angela Merkel",
        "Aristotle",
        "Augustus",
        "Barack Obama",
        "Beyoncé",
        "Bill Clinton",
        "Bill Gates",
        "Brad Pitt",
        "Catherine the Great",
        "Charlemagne",
        "Charles Darwin",
        "Charlie Chaplin",
        "Cristiano Ronaldo",
        "Diego Maradona",
        "Donald Trump",
        "Dwight D. Eisenhower",
        "Elizabeth I",
        "Elizabeth II",
        "Elon Musk",
        "Elvis Presley",
        "Franklin D. Roosevelt",
        "Frank Sinatra",
        "Genghis Khan",
        "George Washington",
        "George W. Bush",
        "Ho Chi Minh",
        "Isaac Newton",
        "Jawaharlal Nehru",
        "Jeff Bezos",
        "Jesus",
        "Joe Biden",
        "Johann Sebastian Bach",
        "John F. Kennedy",
        "Joseph Stalin",
        "Julius Caesar",
        "Karl Marx",
        "Kevin Bacon",
        "Kublai Khan",
        "LeBron James",
        "Leonardo da Vinci",
        "Leonardo DiCaprio",
        "Lionel Messi",
        "Louis XIV",
        "Ludwig van Beethoven",
        "Madonna",
        "Mahatma Gandhi",
        "Mao Zedong",
        "Margaret Thatcher",
        "Marie Curie",
        "Marilyn Monroe",
        "Mark Zuckerberg",
        "Martin Luther King Jr.",
        "Michael Jackson",
        "Michael Jordan",
        "Muhammad",
        "Muhammad Ali",
        "Napoleon",
        "Nelson Mandela",
        "Nikola Tesla",
        "Oprah Winfrey",
        "Pablo Picasso",
        "Pelé",
        "Peter the Great",
        "Plato",
        "Pope Francis",
        "Queen Victoria",
        "Richard Nixon",
        "Roger Federer",
        "Ronald Reagan",
        "Serena Williams",
        "Stephen Hawking",
        "Steve Jobs",
        "Taylor Swift",
        "Theodore Roosevelt",
        "Thomas Edison",
        "Tom Hanks",
        "Usain Bolt",
        "Vincent van Gogh",
        "Vladimir Lenin",
        "Vladimir Putin",
        "Walt Disney",
        "William Shakespeare",
        "Winston Churchill",
        "Wolfgang Amadeus Mozart",
        "Xi Jinping",
    ])
});

pub fn is_vip(title: &str) -> bool {
    VIP_TITLES.contains(title)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_vip_membership() {
        assert!(is_vip("Genghis Khan"));
        assert!(is_vip("Taylor Swift"));
        assert!(!is_vip("Some Unknown Person"));
        assert!(!is_vip("genghis khan"));
    }

    #[test]
    fn test_birth_death_regex() {
        assert!(BIRTH_DEATH_RE.is_match("1946 births"));
        assert!(BIRTH_DEATH_RE.is_match("category:1986 deaths"));
        assert!(!BIRTH_DEATH_RE.is_match("births in 1946"));
        assert!(!BIRTH_DEATH_RE.is_match("194 births"));
    }

    #[test]
    fn test_century_regex() {
        assert!(CENTURY_RE.is_match("13th-century rulers"));
        assert!(CENTURY_RE.is_match("1st-century people"));
        assert!(CENTURY_RE.is_match("2nd-century monarchs"));
        assert!(!CENTURY_RE.is_match("13th century rulers"));
    }

    #[test]
    fn test_exception_keywords_are_substrings_of_positive_jobs() {
        // "Software engineers" must survive the negative gate via "engineer".
        assert!(PERSON_EXCEPTION.iter().any(|k| "software engineers".contains(k)));
        assert!(PERSON_EXCEPTION.iter().any(|k| "animal rights activists".contains(k)));
    }
}
