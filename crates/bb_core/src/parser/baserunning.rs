//! Recognizers for non-batting base events: steals, wild pitches, passed
//! balls, balks, caught stealing, and pickoffs.

use crate::models::{
    Base, CaughtStealingPlay, PlayerId, PlayerMap, RunnerAction, TargetBase,
};

use super::{names, split_sentences};

/// `"X steals 2nd base"`, optionally prefixed with a challenge résumé
/// before a colon.
pub fn parse_stolen_base(description: &str, roster: &PlayerMap) -> Vec<RunnerAction> {
    let description = match description.split_once(':') {
        Some((_, rest)) => rest.trim(),
        None => description,
    };
    let Some((name_part, _)) = description.split_once(" steals") else {
        log::debug!("no steal phrase in {description:?}");
        return Vec::new();
    };
    let Some(runner) = names::resolve(name_part, roster) else {
        log::warn!("stealing runner {name_part:?} not found in roster");
        return Vec::new();
    };

    if description.contains("2nd base") {
        vec![RunnerAction::RunnerAdvances {
            runner,
            to: Base::Second,
        }]
    } else if description.contains("3rd base") {
        vec![RunnerAction::RunnerAdvances {
            runner,
            to: Base::Third,
        }]
    } else if description.contains("home") {
        vec![RunnerAction::RunnerScores { runner }]
    } else {
        log::debug!("unrecognized steal destination in {description:?}");
        Vec::new()
    }
}

fn movement_from_to(runner: PlayerId, movement: &str) -> Option<RunnerAction> {
    let movement = movement.to_lowercase();
    if movement.contains("2nd") || movement.contains("second") {
        Some(RunnerAction::RunnerAdvances {
            runner,
            to: Base::Second,
        })
    } else if movement.contains("3rd") || movement.contains("third") {
        Some(RunnerAction::RunnerAdvances {
            runner,
            to: Base::Third,
        })
    } else {
        None
    }
}

/// Runner traffic after a wild pitch. The first sentence names the
/// pitcher; the rest are `"X scores"` / `"X to 3rd"` movements, applied in
/// text order.
pub fn parse_wild_pitch(description: &str, roster: &PlayerMap) -> Vec<RunnerAction> {
    let sentences = split_sentences(description);
    let mut actions = Vec::new();
    for sentence in sentences.iter().skip(1) {
        let sentence = sentence.trim().trim_end_matches('.');
        if sentence.is_empty() {
            continue;
        }
        if sentence.contains("scores") {
            let name = sentence.replace(" scores", "");
            match names::resolve(&name, roster) {
                Some(runner) => actions.push(RunnerAction::RunnerScores { runner }),
                None => log::warn!("scoring runner {name:?} not found in roster"),
            }
        } else if let Some((name, movement)) = sentence.rsplit_once(" to ") {
            let Some(runner) = names::resolve(name, roster) else {
                log::warn!("advancing runner {name:?} not found in roster");
                continue;
            };
            match movement_from_to(runner, movement) {
                Some(action) => actions.push(action),
                None => log::debug!("unrecognized movement {movement:?} for {name:?}"),
            }
        }
    }
    actions
}

/// Runner traffic after a passed ball. Same shapes as a wild pitch, but
/// movements are reordered most-advanced-first before application.
pub fn parse_passed_ball(description: &str, roster: &PlayerMap) -> Vec<RunnerAction> {
    let sentences = split_sentences(description);
    let mut movements: Vec<(u8, String, String)> = Vec::new();
    for sentence in sentences.iter().skip(1) {
        let sentence = sentence.trim().trim_end_matches('.');
        if sentence.contains("scores") {
            let name = sentence.replace(" scores", "");
            movements.push((0, name, "scores".to_string()));
        } else if let Some((name, movement)) = sentence.split_once(" to ") {
            let priority = if movement.contains("3rd") {
                1
            } else if movement.contains("2nd") {
                2
            } else {
                3
            };
            movements.push((priority, name.to_string(), movement.to_string()));
        }
    }
    movements.sort_by_key(|(priority, _, _)| *priority);

    let mut actions = Vec::new();
    for (_, name, movement) in movements {
        let Some(runner) = names::resolve(&name, roster) else {
            log::warn!("runner {name:?} not found in roster");
            continue;
        };
        if movement == "scores" {
            actions.push(RunnerAction::RunnerScores { runner });
        } else {
            match movement_from_to(runner, &movement) {
                Some(action) => actions.push(action),
                None => log::debug!("unrecognized movement {movement:?} for {name:?}"),
            }
        }
    }
    actions
}

/// `"... batting, X advances to 2nd on a balk. Y advances to 3rd on a
/// balk."` The recognizer rejects anything without the balk phrasing.
pub fn parse_balk(description: &str, roster: &PlayerMap) -> Vec<RunnerAction> {
    if !description.contains("on a balk") {
        log::debug!("not a balk description: {description:?}");
        return Vec::new();
    }
    let Some((_, tail)) = description.split_once("batting, ") else {
        log::debug!("malformed balk description: {description:?}");
        return Vec::new();
    };

    let mut actions = Vec::new();
    for runner_info in tail.split(" on a balk. ") {
        let runner_info = runner_info.trim();
        let Some((name, movement)) = runner_info.split_once(" advances to ") else {
            continue;
        };
        let Some(runner) = names::resolve(name, roster) else {
            log::warn!("balk runner {name:?} not found in roster");
            continue;
        };
        if movement.contains("scores") {
            actions.push(RunnerAction::RunnerScores { runner });
        } else {
            match movement_from_to(runner, movement) {
                Some(action) => actions.push(action),
                None => log::debug!("unrecognized balk movement {movement:?} for {name:?}"),
            }
        }
    }
    actions
}

fn steal_target(description_lower: &str, needle_2nd: &str, needle_3rd: &str, needle_home: &str) -> Option<(Base, TargetBase)> {
    if description_lower.contains(needle_2nd) {
        Some((Base::First, TargetBase::Second))
    } else if description_lower.contains(needle_3rd) {
        Some((Base::Second, TargetBase::Third))
    } else if description_lower.contains(needle_home) {
        Some((Base::Third, TargetBase::Home))
    } else {
        None
    }
}

/// `"X caught stealing 2nd base"`, possibly wrapped in challenge phrasing
/// with the résumé after a colon.
pub fn parse_caught_stealing(description: &str, roster: &PlayerMap) -> Option<CaughtStealingPlay> {
    let lower = description.to_lowercase();
    if lower.matches("caught stealing").count() != 1 {
        log::debug!("expected exactly one caught-stealing phrase: {description:?}");
        return None;
    }

    let name_part = if let Some((_, after_colon)) = description.split_once(':') {
        after_colon.split("caught stealing").next().unwrap_or("")
    } else {
        description.split("caught stealing").next().unwrap_or("")
    };
    let runner = names::resolve(name_part, roster).or_else(|| {
        log::warn!("caught-stealing runner {name_part:?} not found in roster");
        None
    })?;

    let (from, target) = steal_target(&lower, "2nd base", "3rd base", "home").or_else(|| {
        log::debug!("no steal target in {description:?}");
        None
    })?;
    Some(CaughtStealingPlay { runner, from, target })
}

/// `"..., X picked off and caught stealing 2nd base"`.
pub fn parse_pickoff_caught_stealing(
    description: &str,
    roster: &PlayerMap,
) -> Option<CaughtStealingPlay> {
    let lower = description.to_lowercase();
    if lower.matches("picked off").count() != 1 {
        log::debug!("expected exactly one pickoff phrase: {description:?}");
        return None;
    }

    let before = description.split("picked off").next().unwrap_or("");
    let name_part = before.rsplit(',').next().unwrap_or("").trim();
    let runner = names::resolve(name_part, roster).or_else(|| {
        log::warn!("pickoff runner {name_part:?} not found in roster");
        None
    })?;

    let (from, target) =
        steal_target(&lower, "stealing 2nd base", "stealing 3rd base", "stealing home").or_else(
            || {
                log::debug!("no pickoff steal target in {description:?}");
                None
            },
        )?;
    Some(CaughtStealingPlay { runner, from, target })
}

/// Runners who scored on an errant pickoff throw. Matched by scanning the
/// roster against the text, since the sentence shapes vary too much for a
/// positional grammar.
pub fn parse_pickoff_error_scorers(description: &str, roster: &PlayerMap) -> Vec<PlayerId> {
    if !description.contains("scores") {
        return Vec::new();
    }
    let lower = description.to_lowercase();
    roster
        .iter()
        .filter(|(_, name)| lower.contains(&names::normalize_name(name)))
        .map(|(id, _)| id)
        .collect()
}
