//! Built-in pattern lexicon.
//!
//! Weights are positive for signals of fabricated content and negative for
//! signals of genuine reporting. Russian and Kazakh entries match on stems
//! (`\w*` tail) because both languages inflect heavily.

use super::language::LanguageTag;
use super::rules::Category;
use Category::*;
use LanguageTag::{English, Kazakh, Russian};

/// One row of the static rule definition
pub struct LexiconEntry {
    pub id: &'static str,
    pub category: Category,
    pub language: LanguageTag,
    pub pattern: &'static str,
    pub weight: f64,
}

/// Structural marker patterns for one language
pub struct MarkerEntry {
    pub language: LanguageTag,
    /// Recognised citation phrases ("according to", "по данным"...)
    pub citation: &'static str,
    /// Institutional attribution (ministries, universities, agencies...)
    pub attribution: &'static str,
}

pub const RULES: &[LexiconEntry] = &[
    // English
    LexiconEntry {
        id: "en.sensational.headline",
        category: Sensational,
        language: English,
        pattern: r"\b(?:breaking|shocking|unbelievable|bombshell|explosive|jaw-dropping|mind-blowing)\b",
        weight: 1.5,
    },
    LexiconEntry {
        id: "en.sensational.miracle",
        category: Sensational,
        language: English,
        pattern: r"\b(?:miracle|one weird trick|weird trick|secret|exposed|cover-?up)\b",
        weight: 1.5,
    },
    LexiconEntry {
        id: "en.sensational.clickbait",
        category: Sensational,
        language: English,
        pattern: r"\b(?:you won[’']?t believe|will shock you|what happens next|doctors hate|they don[’']?t want you to know|share before it[’']?s deleted)\b",
        weight: 2.0,
    },
    LexiconEntry {
        id: "en.absolute.certainty",
        category: Absolute,
        language: English,
        pattern: r"\b(?:always|never|everyone knows|nobody|no one|guaranteed|undeniabl[ey]|proven fact|completely cured)\b|\b100\s?%",
        weight: 0.75,
    },
    LexiconEntry {
        id: "en.hedge.unverified",
        category: Hedge,
        language: English,
        pattern: r"\b(?:allegedly|reportedly|rumou?r(?:s|ed)?|unconfirmed|sources say|some say|it is believed|insiders claim)\b",
        weight: 0.5,
    },
    LexiconEntry {
        id: "en.emotional.charged",
        category: Emotional,
        language: English,
        pattern: r"\b(?:outrageous|terrifying|horrifying|disgusting|amazing|insane|furious|devastating|panic|scandal(?:ous)?)\b",
        weight: 1.0,
    },
    LexiconEntry {
        id: "en.citation.attribution",
        category: Citation,
        language: English,
        pattern: r"\b(?:according to|as reported by|cited by|in a statement|told reporters)\b",
        weight: -1.5,
    },
    LexiconEntry {
        id: "en.citation.research",
        category: Citation,
        language: English,
        pattern: r"\b(?:published in|peer[- ]reviewed|study|studies|research|survey|data from)\b",
        weight: -1.0,
    },
    LexiconEntry {
        id: "en.official.institution",
        category: Official,
        language: English,
        pattern: r"\b(?:ministry|government|officials?|university|institute|agency|department|committee|spokesperson|parliament|journal)\b",
        weight: -1.0,
    },
    // Russian
    LexiconEntry {
        id: "ru.sensational.urgent",
        category: Sensational,
        language: Russian,
        pattern: r"\b(?:срочн|сенсаци|невероятн|шокир|взрывн)\w*|\bшок\b",
        weight: 1.5,
    },
    LexiconEntry {
        id: "ru.sensational.conspiracy",
        category: Sensational,
        language: Russian,
        pattern: r"\b(?:скрыва|заговор|тайн|засекреч)\w*|\b(?:всю правду|правду об)\b",
        weight: 1.5,
    },
    LexiconEntry {
        id: "ru.absolute.certainty",
        category: Absolute,
        language: Russian,
        pattern: r"\b(?:всегда|никогда|все знают|абсолютно|гарантированно|стопроцентно|доказано)\b|\b100\s?%",
        weight: 0.75,
    },
    LexiconEntry {
        id: "ru.hedge.unverified",
        category: Hedge,
        language: Russian,
        pattern: r"\b(?:якобы|по слухам|говорят|предположительно|ходят слухи)\b|\bнеподтвержд[её]нн\w*",
        weight: 0.5,
    },
    LexiconEntry {
        id: "ru.emotional.charged",
        category: Emotional,
        language: Russian,
        pattern: r"\b(?:ужас|потряс|возмути|возмущ|кошмар|паник|чудовищн)\w*",
        weight: 1.0,
    },
    LexiconEntry {
        id: "ru.citation.attribution",
        category: Citation,
        language: Russian,
        pattern: r"\b(?:по данным|согласно|по словам|по информации)\b|\b(?:сообщил|сообщает|заявил)\w*",
        weight: -1.5,
    },
    LexiconEntry {
        id: "ru.citation.research",
        category: Citation,
        language: Russian,
        pattern: r"\b(?:исследовани|опубликова|рецензируем)\w*",
        weight: -1.0,
    },
    LexiconEntry {
        id: "ru.official.institution",
        category: Official,
        language: Russian,
        pattern: r"\b(?:министерств|правительств|университет|агентств|ведомств|институт|комитет|пресс-служб|минздрав)\w*",
        weight: -1.0,
    },
    // Kazakh
    LexiconEntry {
        id: "kk.sensational.urgent",
        category: Sensational,
        language: Kazakh,
        pattern: r"\b(?:шұғыл|сенсаци|таңғаларлық)\w*|\bшок\b",
        weight: 1.5,
    },
    LexiconEntry {
        id: "kk.sensational.conspiracy",
        category: Sensational,
        language: Kazakh,
        pattern: r"\b(?:жасыр|құпия)\w*",
        weight: 1.5,
    },
    LexiconEntry {
        id: "kk.absolute.certainty",
        category: Absolute,
        language: Kazakh,
        pattern: r"\b(?:әрқашан|ешқашан|барлығы біледі|міндетті түрде|кепілдік)\w*|\b100\s?%",
        weight: 0.75,
    },
    LexiconEntry {
        id: "kk.hedge.unverified",
        category: Hedge,
        language: Kazakh,
        pattern: r"\b(?:сыбыс|болжам|расталмаған)\w*",
        weight: 0.5,
    },
    LexiconEntry {
        id: "kk.emotional.charged",
        category: Emotional,
        language: Kazakh,
        pattern: r"\b(?:сұмдық|қорқынышты|үрейлі|керемет|дүрбелең)\w*",
        weight: 1.0,
    },
    LexiconEntry {
        id: "kk.citation.attribution",
        category: Citation,
        language: Kazakh,
        pattern: r"\b(?:мәліметінше|мәліметі бойынша|деректері бойынша|хабарлауынша|айтуынша|сәйкес|мәлімдеді|хабарлады)\b",
        weight: -1.5,
    },
    LexiconEntry {
        id: "kk.citation.research",
        category: Citation,
        language: Kazakh,
        pattern: r"\b(?:зерттеу|жарияланған|ғылыми журнал)\w*",
        weight: -1.0,
    },
    LexiconEntry {
        id: "kk.official.institution",
        category: Official,
        language: Kazakh,
        pattern: r"\b(?:министрлі|үкімет|университет|агенттік|институт|комитет|әкімдік|баспасөз қызметі)\w*",
        weight: -1.0,
    },
];

pub const MARKERS: &[MarkerEntry] = &[
    MarkerEntry {
        language: English,
        citation: r"\b(?:according to|as reported by|cited by|in a statement|told reporters|published in|peer[- ]reviewed|data from)\b",
        attribution: r"\b(?:ministry|government|officials?|university|institute|agency|department|committee|spokesperson|parliament|journal|researchers|scientists)\b",
    },
    MarkerEntry {
        language: Russian,
        citation: r"\b(?:по данным|согласно|по словам|по информации)\b|\b(?:сообщил|сообщает|заявил|опубликова)\w*",
        attribution: r"\b(?:министерств|правительств|университет|агентств|ведомств|институт|комитет|пресс-служб|журнал)\w*",
    },
    MarkerEntry {
        language: Kazakh,
        citation: r"\b(?:мәліметінше|мәліметі бойынша|деректері бойынша|хабарлауынша|айтуынша|сәйкес)\b",
        attribution: r"\b(?:министрлі|үкімет|университет|агенттік|институт|комитет|әкімдік|баспасөз қызметі|журнал)\w*",
    },
];
