//! The generic batting grammar: one primary action from the first
//! sentence, explicit runner movements from the rest.

use once_cell::sync::Lazy;
use regex::Regex;

use crate::models::{Base, PlayerMap, RunnerAction, TargetBase};

use super::{names, split_sentences, strip_challenge};

/// Recognized batting outcomes, keyed by the phrases the feed uses.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum BattingOutcome {
    Walk,
    IntentionalWalk,
    HitByPitch,
    Single,
    Double,
    Triple,
    HomeRun,
    Reaches,
    ForceOut,
    DoublePlay,
    FieldersChoice,
    GroundOut,
    /// Matched but not actionable on its own ("hits", bare
    /// "intentionally walk"); runners may still move in later sentences.
    Unsupported,
}

/// Where the batter ends up; forced advances are derived from it.
enum Placement {
    OnBase(Base),
    Scores,
    Out,
    None,
}

impl BattingOutcome {
    fn placement(self) -> Placement {
        match self {
            BattingOutcome::Walk
            | BattingOutcome::IntentionalWalk
            | BattingOutcome::HitByPitch
            | BattingOutcome::Single
            | BattingOutcome::Reaches
            | BattingOutcome::ForceOut
            | BattingOutcome::DoublePlay
            | BattingOutcome::FieldersChoice => Placement::OnBase(Base::First),
            BattingOutcome::Double => Placement::OnBase(Base::Second),
            BattingOutcome::Triple => Placement::OnBase(Base::Third),
            BattingOutcome::HomeRun => Placement::Scores,
            BattingOutcome::GroundOut => Placement::Out,
            BattingOutcome::Unsupported => Placement::None,
        }
    }
}

/// Keyword table. Matched longest-first so a short keyword never shadows a
/// longer one ("grounds into" vs "grounds into a double play").
const KEYWORDS: [(&str, BattingOutcome); 17] = [
    ("grounds into a fielder's choice", BattingOutcome::FieldersChoice),
    ("grounds into a double play", BattingOutcome::DoublePlay),
    ("grounds into a force out", BattingOutcome::ForceOut),
    ("intentionally walks", BattingOutcome::IntentionalWalk),
    ("hits a grand slam", BattingOutcome::HomeRun),
    ("hits a home run", BattingOutcome::HomeRun),
    ("hit by pitch", BattingOutcome::HitByPitch),
    ("intentionally walk", BattingOutcome::Unsupported),
    ("grounds out", BattingOutcome::GroundOut),
    ("grounds into", BattingOutcome::GroundOut),
    ("walks", BattingOutcome::Walk),
    ("singles", BattingOutcome::Single),
    ("doubles", BattingOutcome::Double),
    ("triples", BattingOutcome::Triple),
    ("homers", BattingOutcome::HomeRun),
    ("reaches", BattingOutcome::Reaches),
    ("hits", BattingOutcome::Unsupported),
];

fn keyword_pattern() -> String {
    let mut phrases: Vec<&str> = KEYWORDS.iter().map(|(phrase, _)| *phrase).collect();
    phrases.sort_by_key(|phrase| std::cmp::Reverse(phrase.len()));
    phrases
        .iter()
        .map(|phrase| regex::escape(phrase))
        .collect::<Vec<_>>()
        .join("|")
}

fn outcome_for(keyword: &str) -> BattingOutcome {
    let wanted = keyword.to_lowercase();
    KEYWORDS
        .iter()
        .find(|(phrase, _)| *phrase == wanted)
        .map(|(_, outcome)| *outcome)
        .unwrap_or(BattingOutcome::Unsupported)
}

static INTENTIONAL_WALK: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"(?i)^(.*?)\s+intentionally walks\s+(.*?)\.?$").unwrap());

static MAIN_ACTION: Lazy<Regex> = Lazy::new(|| {
    Regex::new(&format!(
        r"(?i)^(.*?)\s+({})(?:\s+\(.*?\))?(?:\s+[^,]*)?(?:,|$)",
        keyword_pattern()
    ))
    .unwrap()
});

static ALT_ACTION: Lazy<Regex> = Lazy::new(|| {
    Regex::new(&format!(r"(?i)^(.*?)\s+({})\s+(.*?)\.?$", keyword_pattern())).unwrap()
});

static MOVE_TO: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"(?i)^(.*?)\s+(?:to|advances to)\s+(1st|2nd|3rd|home)(?:,.*)?$").unwrap());

static MOVE_RESULT: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"(?i)^(.*?)\s+(scores|out at home|out at 1st|out at 2nd|out at 3rd)(?:,.*)?$")
        .unwrap()
});

/// Priority for applying explicit movements: home plate first, then third,
/// second, first, so a base vacated by a lead runner is free before a
/// trailing runner is placed on it.
fn movement_priority(verb: &str) -> u8 {
    match verb {
        "scores" | "home" | "out at home" => 0,
        "3rd" | "out at 3rd" => 1,
        "2nd" | "out at 2nd" => 2,
        "1st" | "out at 1st" => 3,
        _ => 99,
    }
}

fn movement_action(runner: crate::models::PlayerId, verb: &str) -> Option<RunnerAction> {
    match verb {
        "scores" | "home" => Some(RunnerAction::RunnerScores { runner }),
        "out at home" => Some(RunnerAction::RunnerOutAt {
            runner,
            at: TargetBase::Home,
        }),
        "out at 1st" => Some(RunnerAction::RunnerOutAt {
            runner,
            at: TargetBase::First,
        }),
        "out at 2nd" => Some(RunnerAction::RunnerOutAt {
            runner,
            at: TargetBase::Second,
        }),
        "out at 3rd" => Some(RunnerAction::RunnerOutAt {
            runner,
            at: TargetBase::Third,
        }),
        token => super::base_from_token(token).map(|to| RunnerAction::RunnerAdvances { runner, to }),
    }
}

/// Parse explicit runner-movement sentences and order them by priority.
/// An unresolved name drops only that movement.
pub(crate) fn parse_runner_movements(
    sentences: &[String],
    roster: &PlayerMap,
) -> Vec<RunnerAction> {
    let mut movements: Vec<(u8, String, String)> = Vec::new();
    for sentence in sentences {
        let sentence = sentence.trim().trim_end_matches('.');
        if sentence.is_empty() {
            continue;
        }
        let captures = MOVE_TO
            .captures(sentence)
            .or_else(|| MOVE_RESULT.captures(sentence));
        match captures {
            Some(captures) => {
                let verb = captures[2].to_lowercase();
                movements.push((movement_priority(&verb), captures[1].to_string(), verb));
            }
            None => log::debug!("unrecognized runner movement: {sentence:?}"),
        }
    }

    movements.sort_by_key(|(priority, _, _)| *priority);

    let mut actions = Vec::new();
    for (_, raw_name, verb) in movements {
        let Some(runner) = names::resolve(&raw_name, roster) else {
            log::warn!("runner {raw_name:?} not found in roster; movement dropped");
            continue;
        };
        if let Some(action) = movement_action(runner, &verb) {
            actions.push(action);
        }
    }
    actions
}

/// The full batting grammar, used for hit/walk events and as the fallback
/// for event types with no dedicated recognizer.
///
/// Never fails: unparseable input yields no actions and a diagnostic.
pub fn parse_base_update(description: &str, roster: &PlayerMap) -> Vec<RunnerAction> {
    let Some(adjusted) = strip_challenge(description) else {
        return Vec::new();
    };
    let sentences = split_sentences(&adjusted);
    let Some(main_sentence) = sentences.first() else {
        log::debug!("no actionable sentences in {description:?}");
        return Vec::new();
    };

    // Intentional walks name the pitcher before the keyword; everything
    // else names the batter there.
    let (batter_raw, outcome) = if let Some(captures) = INTENTIONAL_WALK.captures(main_sentence) {
        (captures[2].trim().to_string(), BattingOutcome::IntentionalWalk)
    } else if let Some(captures) = MAIN_ACTION.captures(main_sentence) {
        (captures[1].trim().to_string(), outcome_for(&captures[2]))
    } else if let Some(captures) = ALT_ACTION.captures(main_sentence) {
        (captures[3].trim().to_string(), outcome_for(&captures[2]))
    } else {
        log::debug!("no main action in {description:?}");
        return Vec::new();
    };

    let Some(batter) = names::resolve(&batter_raw, roster) else {
        log::warn!("batter {batter_raw:?} not found in roster");
        return Vec::new();
    };

    let mut actions = Vec::new();
    match outcome.placement() {
        Placement::OnBase(base) => actions.push(RunnerAction::BatterReaches { batter, base }),
        Placement::Scores => actions.push(RunnerAction::BatterScores { batter }),
        Placement::Out => actions.push(RunnerAction::BatterOut { batter }),
        Placement::None => log::debug!("batting keyword with no base outcome in {description:?}"),
    }

    actions.extend(parse_runner_movements(&sentences[1..], roster));
    actions
}
