//! Bases, inning halves, and fielding positions.

use std::fmt;

use serde::{Deserialize, Serialize};

/// An occupiable base. Home plate is not a base a runner can hold.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum Base {
    First,
    Second,
    Third,
}

impl Base {
    /// All bases, lead runner first. Forced advances walk this order so a
    /// vacated base can be refilled by the trailing runner in the same pass.
    pub const LEAD_FIRST: [Base; 3] = [Base::Third, Base::Second, Base::First];

    pub fn ordinal(self) -> u8 {
        match self {
            Base::First => 1,
            Base::Second => 2,
            Base::Third => 3,
        }
    }

    pub fn from_ordinal(n: u8) -> Option<Base> {
        match n {
            1 => Some(Base::First),
            2 => Some(Base::Second),
            3 => Some(Base::Third),
            _ => None,
        }
    }

    /// Advance by `count` bases. `None` means the runner crossed home.
    pub fn advanced(self, count: u8) -> Option<Base> {
        Base::from_ordinal(self.ordinal() + count)
    }

    pub fn index(self) -> usize {
        self.ordinal() as usize - 1
    }
}

impl fmt::Display for Base {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Base::First => "1st",
            Base::Second => "2nd",
            Base::Third => "3rd",
        };
        write!(f, "{name}")
    }
}

/// A place a runner can be put out at or thrown out advancing to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TargetBase {
    First,
    Second,
    Third,
    Home,
}

impl TargetBase {
    /// The base a runner must hold before attempting this target.
    pub fn prior_base(self) -> Option<Base> {
        match self {
            TargetBase::First => None,
            TargetBase::Second => Some(Base::First),
            TargetBase::Third => Some(Base::Second),
            TargetBase::Home => Some(Base::Third),
        }
    }
}

impl fmt::Display for TargetBase {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            TargetBase::First => "1st",
            TargetBase::Second => "2nd",
            TargetBase::Third => "3rd",
            TargetBase::Home => "home",
        };
        write!(f, "{name}")
    }
}

/// Half-inning marker. Serialized as `Top` / `Bot` to match the feed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Half {
    #[serde(rename = "Top")]
    Top,
    #[serde(rename = "Bot")]
    Bottom,
}

impl Half {
    pub fn label(self) -> &'static str {
        match self {
            Half::Top => "Top",
            Half::Bottom => "Bot",
        }
    }
}

impl fmt::Display for Half {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// The nine fielding slots tracked per team. The pitcher is tracked
/// separately on the game state, not as a field position.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum FieldPosition {
    DesignatedHitter,
    Catcher,
    FirstBase,
    SecondBase,
    ThirdBase,
    Shortstop,
    LeftField,
    CenterField,
    RightField,
}

impl FieldPosition {
    pub const ALL: [FieldPosition; 9] = [
        FieldPosition::DesignatedHitter,
        FieldPosition::Catcher,
        FieldPosition::FirstBase,
        FieldPosition::SecondBase,
        FieldPosition::ThirdBase,
        FieldPosition::Shortstop,
        FieldPosition::LeftField,
        FieldPosition::CenterField,
        FieldPosition::RightField,
    ];

    /// Short code used by rosters and the output schema.
    pub fn code(self) -> &'static str {
        match self {
            FieldPosition::DesignatedHitter => "DH",
            FieldPosition::Catcher => "C",
            FieldPosition::FirstBase => "1B",
            FieldPosition::SecondBase => "2B",
            FieldPosition::ThirdBase => "3B",
            FieldPosition::Shortstop => "SS",
            FieldPosition::LeftField => "LF",
            FieldPosition::CenterField => "CF",
            FieldPosition::RightField => "RF",
        }
    }

    pub fn from_code(code: &str) -> Option<FieldPosition> {
        FieldPosition::ALL.iter().copied().find(|p| p.code() == code)
    }

    /// Parse the spelled-out forms play descriptions use ("left fielder",
    /// "third base", ...). "pitcher" is deliberately not mapped: pitching
    /// changes go through the pitcher slot, not the position table.
    pub fn from_long_name(name: &str) -> Option<FieldPosition> {
        let cleaned = name.replace('.', "");
        let cleaned = cleaned.trim().to_lowercase();
        match cleaned.as_str() {
            "designated hitter" => Some(FieldPosition::DesignatedHitter),
            "catcher" => Some(FieldPosition::Catcher),
            "first baseman" | "first base" => Some(FieldPosition::FirstBase),
            "second baseman" | "second base" => Some(FieldPosition::SecondBase),
            "third baseman" | "third base" => Some(FieldPosition::ThirdBase),
            "shortstop" => Some(FieldPosition::Shortstop),
            "left fielder" | "left field" => Some(FieldPosition::LeftField),
            "center fielder" | "center field" => Some(FieldPosition::CenterField),
            "right fielder" | "right field" => Some(FieldPosition::RightField),
            _ => None,
        }
    }

    pub fn index(self) -> usize {
        FieldPosition::ALL.iter().position(|p| *p == self).unwrap()
    }
}

impl fmt::Display for FieldPosition {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.code())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_advanced_past_third_scores() {
        assert_eq!(Base::First.advanced(1), Some(Base::Second));
        assert_eq!(Base::Second.advanced(2), None);
        assert_eq!(Base::Third.advanced(1), None);
    }

    #[test]
    fn test_target_prior_base() {
        assert_eq!(TargetBase::Second.prior_base(), Some(Base::First));
        assert_eq!(TargetBase::Home.prior_base(), Some(Base::Third));
        assert_eq!(TargetBase::First.prior_base(), None);
    }

    #[test]
    fn test_position_long_names() {
        assert_eq!(
            FieldPosition::from_long_name("first baseman"),
            Some(FieldPosition::FirstBase)
        );
        assert_eq!(
            FieldPosition::from_long_name("Center Field"),
            Some(FieldPosition::CenterField)
        );
        // Pitcher is handled through the pitcher slot, never the table.
        assert_eq!(FieldPosition::from_long_name("pitcher"), None);
    }
}
