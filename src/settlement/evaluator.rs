use std::fmt;
use std::str::FromStr;

use once_cell::sync::Lazy;
use regex::Regex;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

// `[0-9]` rather than `\d`: the parsers downstream only accept ASCII digits.
static EXACT_SCORE_RE: Lazy<Regex> = Lazy::new(|| Regex::new(r"^[0-9]+[-:][0-9]+$").unwrap());
static OU_PHRASE_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"(over|under)\s*([0-9]+(?:\.[0-9]+)?)").unwrap());
static OU_SHORT_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^([ou])([0-9]+(?:\.[0-9]+)?)$").unwrap());
static NUMBER_RE: Lazy<Regex> = Lazy::new(|| Regex::new(r"[0-9]+(?:\.[0-9]+)?").unwrap());

const HOME_WIN: [&str; 4] = ["home", "home win", "1", "h"];
const AWAY_WIN: [&str; 4] = ["away", "away win", "2", "a"];
const DRAW: [&str; 2] = ["draw", "x"];
const DOUBLE_CHANCE: [&str; 3] = ["1x", "x2", "12"];

/// Bet families a free-text prediction can fall into.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Market {
    ExactScore,
    Outright,
    DoubleChance,
    BothTeamsToScore,
    OverUnder,
}

impl Market {
    pub fn as_str(&self) -> &'static str {
        match self {
            Market::ExactScore => "exact_score",
            Market::Outright => "outright",
            Market::DoubleChance => "double_chance",
            Market::BothTeamsToScore => "both_teams_to_score",
            Market::OverUnder => "over_under",
        }
    }
}

impl fmt::Display for Market {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Final score of a finished match.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Score {
    pub home: u32,
    pub away: u32,
}

impl Score {
    pub fn new(home: u32, away: u32) -> Self {
        Self { home, away }
    }

    pub fn total(&self) -> u64 {
        u64::from(self.home) + u64::from(self.away)
    }
}

/// The prediction strings in the shapes the rules test against.
#[derive(Debug, Clone)]
struct PredictionInput {
    /// Prediction type, lowercased.
    kind: String,
    /// Prediction text, trimmed.
    raw: String,
    /// Prediction text, trimmed and lowercased.
    text: String,
    /// Prediction text, lowercased with all whitespace removed.
    compact: String,
}

impl PredictionInput {
    fn new(prediction_type: &str, prediction: &str) -> Self {
        let raw = prediction.trim().to_string();
        let text = raw.to_lowercase();
        let compact = text.chars().filter(|c| !c.is_whitespace()).collect();
        Self {
            kind: prediction_type.to_lowercase(),
            raw,
            text,
            compact,
        }
    }
}

/// One (predicate, settlement) pair. The first rule whose predicate holds
/// decides the outcome on its own.
struct Rule {
    market: Market,
    applies: fn(&PredictionInput) -> bool,
    settle: fn(&PredictionInput, Score) -> bool,
}

static RULES: [Rule; 5] = [
    Rule {
        market: Market::ExactScore,
        applies: exact_score_applies,
        settle: settle_exact_score,
    },
    Rule {
        market: Market::Outright,
        applies: outright_applies,
        settle: settle_outright,
    },
    Rule {
        market: Market::DoubleChance,
        applies: double_chance_applies,
        settle: settle_double_chance,
    },
    Rule {
        market: Market::BothTeamsToScore,
        applies: btts_applies,
        settle: settle_btts,
    },
    Rule {
        market: Market::OverUnder,
        applies: over_under_applies,
        settle: settle_over_under,
    },
];

fn first_rule(input: &PredictionInput) -> Option<&'static Rule> {
    RULES.iter().find(|rule| (rule.applies)(input))
}

/// Which market a prediction is read as, `None` when no rule recognises it.
pub fn classify_prediction(prediction_type: &str, prediction: &str) -> Option<Market> {
    first_rule(&PredictionInput::new(prediction_type, prediction)).map(|rule| rule.market)
}

/// Whether `prediction` came true for a match that ended `goals_home`-`goals_away`.
///
/// Unknown goals and unrecognised predictions both evaluate to `false`.
pub fn evaluate_prediction(
    prediction_type: &str,
    prediction: &str,
    goals_home: Option<u32>,
    goals_away: Option<u32>,
) -> bool {
    let (Some(home), Some(away)) = (goals_home, goals_away) else {
        return false;
    };

    let input = PredictionInput::new(prediction_type, prediction);
    match first_rule(&input) {
        Some(rule) => (rule.settle)(&input, Score::new(home, away)),
        None => false,
    }
}

// ---------------------------------------------------------------------------
// Exact score: "2-1", "2:1", or anything under a "correct score" type
// ---------------------------------------------------------------------------

fn exact_score_applies(input: &PredictionInput) -> bool {
    input.kind.contains("correct") || EXACT_SCORE_RE.is_match(&input.raw)
}

fn settle_exact_score(input: &PredictionInput, score: Score) -> bool {
    parse_scoreline(&input.raw) == Some(score)
}

fn parse_scoreline(s: &str) -> Option<Score> {
    let (home, away) = s.split_once(['-', ':'])?;
    Some(Score::new(home.trim().parse().ok()?, away.trim().parse().ok()?))
}

// ---------------------------------------------------------------------------
// 1X2
// ---------------------------------------------------------------------------

fn outright_applies(input: &PredictionInput) -> bool {
    let text = input.text.as_str();
    HOME_WIN.contains(&text) || AWAY_WIN.contains(&text) || DRAW.contains(&text)
}

fn settle_outright(input: &PredictionInput, score: Score) -> bool {
    let text = input.text.as_str();
    if HOME_WIN.contains(&text) {
        score.home > score.away
    } else if AWAY_WIN.contains(&text) {
        score.away > score.home
    } else {
        score.home == score.away
    }
}

// ---------------------------------------------------------------------------
// Double chance
// ---------------------------------------------------------------------------

fn double_chance_applies(input: &PredictionInput) -> bool {
    input.kind.contains("double") || DOUBLE_CHANCE.contains(&input.compact.as_str())
}

fn settle_double_chance(input: &PredictionInput, score: Score) -> bool {
    match input.compact.as_str() {
        "1x" => score.home >= score.away,
        "x2" => score.away >= score.home,
        "12" => score.home != score.away,
        _ => false,
    }
}

// ---------------------------------------------------------------------------
// Both teams to score
// ---------------------------------------------------------------------------

fn btts_applies(input: &PredictionInput) -> bool {
    input.kind.contains("btts")
        || input.kind.contains("both teams to score")
        || input.compact.starts_with("btts")
        || matches!(input.compact.as_str(), "gg" | "ng")
        || matches!(input.text.as_str(), "yes" | "no")
}

fn settle_btts(input: &PredictionInput, score: Score) -> bool {
    let both_scored = score.home > 0 && score.away > 0;
    match btts_side(input) {
        Some(true) => both_scored,
        Some(false) => !both_scored,
        None => false,
    }
}

fn btts_side(input: &PredictionInput) -> Option<bool> {
    let compact = input.compact.as_str();
    if matches!(compact, "gg" | "bttsyes" | "yes") || input.kind.contains("btts yes") {
        Some(true)
    } else if matches!(compact, "ng" | "bttsno" | "no") || input.kind.contains("btts no") {
        Some(false)
    } else {
        None
    }
}

// ---------------------------------------------------------------------------
// Over / under total goals
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Line {
    Over,
    Under,
}

impl Line {
    fn parse(s: &str) -> Option<Self> {
        match s {
            "over" | "o" => Some(Line::Over),
            "under" | "u" => Some(Line::Under),
            _ => None,
        }
    }
}

fn over_under_applies(input: &PredictionInput) -> bool {
    input.kind.contains("over")
        || input.kind.contains("under")
        || matches!(input.compact.as_str(), "over" | "under")
        || OU_SHORT_RE.is_match(&input.compact)
        || OU_PHRASE_RE.is_match(&input.text)
}

fn settle_over_under(input: &PredictionInput, score: Score) -> bool {
    let Some((line, threshold)) = over_under_line(input) else {
        return false;
    };

    let total = Decimal::from(score.total());
    match line {
        Line::Over => total > threshold,
        Line::Under => total < threshold,
    }
}

/// Resolve the side and the line, in order:
/// 1. an "over N" / "under N" phrase or the "oN" / "uN" short form in the text;
/// 2. a bare side word in the text ("over", "u", ...), with the line taken from the type;
/// 3. an "over N" / "under N" phrase in the type;
/// 4. the side named by the type, with the first number in the text.
///
/// The side the text names always beats the side the type names.
fn over_under_line(input: &PredictionInput) -> Option<(Line, Decimal)> {
    if let Some(found) = captured_line(&OU_PHRASE_RE, &input.text)
        .or_else(|| captured_line(&OU_SHORT_RE, &input.compact))
    {
        return Some(found);
    }

    if let Some(line) = Line::parse(&input.compact) {
        let threshold = OU_PHRASE_RE
            .captures(&input.kind)
            .and_then(|caps| caps.get(2))
            .or_else(|| NUMBER_RE.find(&input.kind))?;
        return Some((line, Decimal::from_str(threshold.as_str()).ok()?));
    }

    if let Some(found) = captured_line(&OU_PHRASE_RE, &input.kind) {
        return Some(found);
    }

    let line = match (input.kind.contains("over"), input.kind.contains("under")) {
        (true, false) => Line::Over,
        (false, true) => Line::Under,
        _ => return None,
    };
    let number = NUMBER_RE.find(&input.text)?;
    Some((line, Decimal::from_str(number.as_str()).ok()?))
}

fn captured_line(re: &Regex, haystack: &str) -> Option<(Line, Decimal)> {
    let caps = re.captures(haystack)?;
    let line = Line::parse(caps.get(1)?.as_str())?;
    let threshold = Decimal::from_str(caps.get(2)?.as_str()).ok()?;
    Some((line, threshold))
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
