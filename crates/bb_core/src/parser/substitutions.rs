//! Recognizers for the four substitution forms: offensive (pinch-hit /
//! pinch-run), defensive substitution, defensive position switch, and
//! pitching change (including a mid-lineup entry form).

use once_cell::sync::Lazy;
use regex::Regex;

use crate::models::{FieldPosition, PlayerMap, RosterChange};

use super::names;

static OFFENSIVE_SUB: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"(?i)(?:runner|hitter)\s+(.+?)\s+replaces\s+(.+?)$").unwrap());

static REPLACES: Lazy<Regex> = Lazy::new(|| Regex::new(r"replaces\s+(.*?)(?:,|\s*$)").unwrap());
static PLAYING: Lazy<Regex> = Lazy::new(|| Regex::new(r"playing\s+(.*?)(?:,|\s*$)").unwrap());

static FIELDER_TITLE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(
        r"\b(first baseman|second baseman|shortstop|third baseman|left fielder|right fielder|catcher|center fielder|pitcher)\s+",
    )
    .unwrap()
});

static PITCHING_CHANGE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(
        r"^Pitching Change:\s*(.+?)\s+replaces\s+(.+?)(?:,\s*batting\s+(\d+)(?:th|st|nd|rd))?(?:,\s*replacing.*)?\.?$",
    )
    .unwrap()
});

/// `"Offensive Substitution: Pinch-hitter X replaces Y."`
pub fn parse_offensive_sub(description: &str, roster: &PlayerMap) -> Option<RosterChange> {
    let captures = OFFENSIVE_SUB.captures(description).or_else(|| {
        log::debug!("could not parse offensive substitution: {description:?}");
        None
    })?;

    let incoming = names::resolve(&captures[1], roster);
    let outgoing = names::resolve(&captures[2], roster);
    let (Some(incoming), Some(outgoing)) = (incoming, outgoing) else {
        log::warn!(
            "offensive sub names unresolved: {:?} / {:?}",
            &captures[1],
            &captures[2]
        );
        return None;
    };

    Some(RosterChange::Offensive {
        incoming,
        outgoing,
        pinch_runner: description.contains("Pinch-runner"),
    })
}

/// `"Defensive Substitution: X replaces left fielder Y, batting 8th,
/// playing left field."`
pub fn parse_defensive_sub(description: &str, roster: &PlayerMap) -> Option<RosterChange> {
    let description = description.replace("Defensive Substitution:", "");
    let description = description.trim();

    let incoming_part = description
        .split(',')
        .next()
        .unwrap_or("")
        .split(" replaces ")
        .next()
        .unwrap_or("")
        .trim();
    let incoming = names::resolve(incoming_part, roster).or_else(|| {
        log::warn!("incoming defender {incoming_part:?} not found in roster");
        None
    })?;

    let outgoing = REPLACES.captures(description).and_then(|captures| {
        let cleaned = FIELDER_TITLE.replace_all(&captures[1], "");
        names::resolve(cleaned.trim(), roster)
    });
    if outgoing.is_none() {
        log::debug!("departing defender unresolved in {description:?}");
    }

    let position = PLAYING
        .captures(description)
        .and_then(|captures| FieldPosition::from_long_name(&captures[1]));
    if position.is_none() {
        log::debug!("target position unresolved in {description:?}");
    }

    Some(RosterChange::DefensiveSub {
        incoming,
        outgoing,
        position,
    })
}

/// Two shapes: `"X remains in the game as the first baseman"` and
/// `"Defensive switch from catcher to first base for X"`.
pub fn parse_defensive_switch(description: &str, roster: &PlayerMap) -> Option<RosterChange> {
    let (player_part, to_name, from) = if description.contains("remains in the game as") {
        let player_part = description.split("remains in the game as").next().unwrap_or("");
        let to_name = description
            .split("remains in the game as the ")
            .nth(1)
            .or_else(|| {
                log::debug!("malformed position-switch description: {description:?}");
                None
            })?;
        (player_part.trim(), to_name.trim(), None)
    } else {
        let after_from = description.split("switch from ").nth(1).or_else(|| {
            log::debug!("malformed position-switch description: {description:?}");
            None
        })?;
        let from_name = after_from.split(" to ").next().unwrap_or("");
        let to_name = description
            .split(" to ")
            .nth(1)
            .and_then(|rest| rest.split(" for ").next())
            .unwrap_or("");
        let player_part = description.split("for").nth(1).unwrap_or("").trim();
        (player_part, to_name, FieldPosition::from_long_name(from_name))
    };

    let player = names::resolve(player_part, roster).or_else(|| {
        log::warn!("switching fielder {player_part:?} not found in roster");
        None
    })?;
    let to = FieldPosition::from_long_name(to_name).or_else(|| {
        log::debug!("cannot map position {to_name:?}");
        None
    })?;

    Some(RosterChange::PositionSwitch { player, to, from })
}

/// `"Pitching Change: X replaces Y[, batting 9th]"`, plus the no-DH form
/// where the new pitcher enters the batting order at a stated slot.
pub fn parse_pitching_change(description: &str, roster: &PlayerMap) -> Option<RosterChange> {
    if description.contains("enters the batting order") {
        return parse_lineup_entry(description, roster);
    }

    let captures = PITCHING_CHANGE.captures(description).or_else(|| {
        log::debug!("could not parse pitching change: {description:?}");
        None
    })?;

    let incoming = names::resolve(&captures[1], roster);
    let outgoing = names::resolve(&captures[2], roster);
    let (Some(incoming), Some(outgoing)) = (incoming, outgoing) else {
        log::warn!(
            "pitching change names unresolved: {:?} / {:?}",
            &captures[1],
            &captures[2]
        );
        return None;
    };

    let batting_slot = captures
        .get(3)
        .and_then(|slot| slot.as_str().parse::<usize>().ok());

    Some(RosterChange::PitchingChange {
        incoming,
        outgoing,
        batting_slot,
    })
}

fn parse_lineup_entry(description: &str, roster: &PlayerMap) -> Option<RosterChange> {
    let parts: Vec<&str> = description.split_whitespace().collect();
    if parts.len() < 4 {
        return None;
    }

    let incoming_part = parts[1..3].join(" ");
    let batting_slot = parts.iter().find_map(|part| {
        part.trim_end_matches(|c| "thstndrd,".contains(c)).parse::<usize>().ok()
    })?;
    let leave_index = parts.iter().position(|part| *part == "leaves")?;
    if leave_index < 2 {
        return None;
    }
    let outgoing_part = parts[leave_index - 2..leave_index].join(" ");

    let incoming = names::resolve(&incoming_part, roster);
    let outgoing = names::resolve(&outgoing_part, roster);
    let (Some(incoming), Some(outgoing)) = (incoming, outgoing) else {
        log::warn!(
            "batting-order entry names unresolved: {incoming_part:?} / {outgoing_part:?}"
        );
        return None;
    };

    Some(RosterChange::LineupEntry {
        incoming,
        outgoing,
        batting_slot,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::PlayerId;

    fn roster() -> PlayerMap {
        PlayerMap::from_pairs(vec![
            (PlayerId(1), "Michael Fulmer".to_string()),
            (PlayerId(2), "Mark Leiter Jr.".to_string()),
            (PlayerId(3), "Joc Pederson".to_string()),
            (PlayerId(4), "Tommy Edman".to_string()),
            (PlayerId(5), "Brendan Donovan".to_string()),
        ])
    }

    #[test]
    fn test_pitching_change() {
        let change =
            parse_pitching_change("Pitching Change: Michael Fulmer replaces Mark Leiter Jr.", &roster());
        assert_eq!(
            change,
            Some(RosterChange::PitchingChange {
                incoming: PlayerId(1),
                outgoing: PlayerId(2),
                batting_slot: None,
            })
        );
    }

    #[test]
    fn test_pitching_change_with_batting_slot() {
        let change = parse_pitching_change(
            "Pitching Change: Michael Fulmer replaces Mark Leiter Jr., batting 9th, replacing pitcher Leiter.",
            &roster(),
        );
        assert_eq!(
            change,
            Some(RosterChange::PitchingChange {
                incoming: PlayerId(1),
                outgoing: PlayerId(2),
                batting_slot: Some(9),
            })
        );
    }

    #[test]
    fn test_lineup_entry_form() {
        let change = parse_pitching_change(
            "Pitcher Michael Fulmer enters the batting order in the 9th spot, Joc Pederson leaves the game.",
            &roster(),
        );
        assert_eq!(
            change,
            Some(RosterChange::LineupEntry {
                incoming: PlayerId(1),
                outgoing: PlayerId(3),
                batting_slot: 9,
            })
        );
    }

    #[test]
    fn test_offensive_sub_pinch_runner() {
        let change = parse_offensive_sub(
            "Offensive Substitution: Pinch-runner Tommy Edman replaces Brendan Donovan.",
            &roster(),
        );
        assert_eq!(
            change,
            Some(RosterChange::Offensive {
                incoming: PlayerId(4),
                outgoing: PlayerId(5),
                pinch_runner: true,
            })
        );
    }

    #[test]
    fn test_offensive_sub_pinch_hitter() {
        let change = parse_offensive_sub(
            "Offensive Substitution: Pinch-hitter Joc Pederson replaces Tommy Edman.",
            &roster(),
        );
        assert_eq!(
            change,
            Some(RosterChange::Offensive {
                incoming: PlayerId(3),
                outgoing: PlayerId(4),
                pinch_runner: false,
            })
        );
    }

    #[test]
    fn test_defensive_sub_with_position() {
        let change = parse_defensive_sub(
            "Defensive Substitution: Tommy Edman replaces left fielder Joc Pederson, batting 6th, playing left field.",
            &roster(),
        );
        assert_eq!(
            change,
            Some(RosterChange::DefensiveSub {
                incoming: PlayerId(4),
                outgoing: Some(PlayerId(3)),
                position: Some(FieldPosition::LeftField),
            })
        );
    }

    #[test]
    fn test_defensive_switch_remains_form() {
        let change = parse_defensive_switch(
            "Tommy Edman remains in the game as the second baseman.",
            &roster(),
        );
        assert_eq!(
            change,
            Some(RosterChange::PositionSwitch {
                player: PlayerId(4),
                to: FieldPosition::SecondBase,
                from: None,
            })
        );
    }

    #[test]
    fn test_defensive_switch_from_to_form() {
        let change = parse_defensive_switch(
            "Defensive switch from left field to center field for Tommy Edman.",
            &roster(),
        );
        assert_eq!(
            change,
            Some(RosterChange::PositionSwitch {
                player: PlayerId(4),
                to: FieldPosition::CenterField,
                from: Some(FieldPosition::LeftField),
            })
        );
    }

    #[test]
    fn test_rejects_garbage() {
        assert!(parse_offensive_sub("A strange sentence.", &roster()).is_none());
        assert!(parse_pitching_change("Mound visit.", &roster()).is_none());
        assert!(parse_defensive_switch("Nothing useful here.", &roster()).is_none());
    }
}
