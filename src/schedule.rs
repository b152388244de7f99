//! Turn-dependent search parameters.
//!
//! Early in the game the board is sparse and a shallow, wide search is both
//! affordable and sufficient; later on the tree gets narrower and deeper. The
//! schedule is a table of `from_turn` thresholds, each entry applying until
//! the next one takes over.

use serde::Deserialize;
use thiserror::Error;

use crate::constants::{DEFAULT_MAX_DEPTH, DEFAULT_MAX_MOVE_BREADTH, DEFAULT_MIN_MOVE_BREADTH};
use crate::search::SearchParams;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ScheduleError {
    #[error("schedule has no entries")]
    Empty,
    #[error("schedule must start at turn 0, first entry starts at turn {0}")]
    MissingTurnZero(u32),
    #[error("schedule turns must increase: {next} follows {previous}")]
    NotIncreasing { previous: u32, next: u32 },
    #[error("entry for turn {0} has a zero breadth")]
    ZeroBreadth(u32),
}

/// One row of the schedule.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
pub struct ScheduleEntry {
    pub from_turn: u32,
    pub max_depth: u32,
    pub max_move_breadth: usize,
    pub min_move_breadth: usize,
}

impl ScheduleEntry {
    pub const fn new(from_turn: u32, params: SearchParams) -> Self {
        Self {
            from_turn,
            max_depth: params.max_depth,
            max_move_breadth: params.max_move_breadth,
            min_move_breadth: params.min_move_breadth,
        }
    }

    pub fn params(&self) -> SearchParams {
        SearchParams {
            max_depth: self.max_depth,
            max_move_breadth: self.max_move_breadth,
            min_move_breadth: self.min_move_breadth,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(try_from = "Vec<ScheduleEntry>")]
pub struct Schedule {
    entries: Vec<ScheduleEntry>,
}

impl Default for Schedule {
    fn default() -> Self {
        Self {
            entries: vec![
                ScheduleEntry::new(
                    0,
                    SearchParams::new(
                        DEFAULT_MAX_DEPTH,
                        DEFAULT_MAX_MOVE_BREADTH,
                        DEFAULT_MIN_MOVE_BREADTH,
                    ),
                ),
                ScheduleEntry::new(5, SearchParams::new(5, 27, 64)),
                ScheduleEntry::new(10, SearchParams::new(9, 6, 2)),
                ScheduleEntry::new(15, SearchParams::new(9, 5, 2)),
            ],
        }
    }
}

impl Schedule {
    /// Validate and build a schedule.
    pub fn new(entries: Vec<ScheduleEntry>) -> Result<Self, ScheduleError> {
        let first = entries.first().ok_or(ScheduleError::Empty)?;
        if first.from_turn != 0 {
            return Err(ScheduleError::MissingTurnZero(first.from_turn));
        }
        for pair in entries.windows(2) {
            if pair[1].from_turn <= pair[0].from_turn {
                return Err(ScheduleError::NotIncreasing {
                    previous: pair[0].from_turn,
                    next: pair[1].from_turn,
                });
            }
        }
        if let Some(bad) = entries
            .iter()
            .find(|e| e.max_move_breadth == 0 || e.min_move_breadth == 0)
        {
            return Err(ScheduleError::ZeroBreadth(bad.from_turn));
        }
        Ok(Self { entries })
    }

    /// The same parameters for every turn.
    pub fn fixed(params: SearchParams) -> Result<Self, ScheduleError> {
        Self::new(vec![ScheduleEntry::new(0, params)])
    }

    /// Parameters of the last entry whose `from_turn` is not after `turn`.
    pub fn params_for(&self, turn: u32) -> SearchParams {
        self.entries
            .iter()
            .take_while(|e| e.from_turn <= turn)
            .last()
            .unwrap_or(&self.entries[0])
            .params()
    }
}

impl TryFrom<Vec<ScheduleEntry>> for Schedule {
    type Error = ScheduleError;

    fn try_from(entries: Vec<ScheduleEntry>) -> Result<Self, Self::Error> {
        Self::new(entries)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_schedule() {
        let schedule = Schedule::default();
        assert_eq!(schedule.params_for(1), SearchParams::new(3, 27, 64));
        assert_eq!(schedule.params_for(4), SearchParams::new(3, 27, 64));
        assert_eq!(schedule.params_for(5), SearchParams::new(5, 27, 64));
        assert_eq!(schedule.params_for(9), SearchParams::new(5, 27, 64));
        assert_eq!(schedule.params_for(10), SearchParams::new(9, 6, 2));
        assert_eq!(schedule.params_for(14), SearchParams::new(9, 6, 2));
        assert_eq!(schedule.params_for(15), SearchParams::new(9, 5, 2));
        assert_eq!(schedule.params_for(26), SearchParams::new(9, 5, 2));
    }

    #[test]
    fn test_fixed_schedule() {
        let schedule = Schedule::fixed(SearchParams::new(2, 4, 8)).unwrap();
        assert_eq!(schedule.params_for(0), SearchParams::new(2, 4, 8));
        assert_eq!(schedule.params_for(20), SearchParams::new(2, 4, 8));
    }

    #[test]
    fn test_fixed_schedule_rejects_zero_breadth() {
        assert_eq!(
            Schedule::fixed(SearchParams::new(4, 4, 0)),
            Err(ScheduleError::ZeroBreadth(0))
        );
        assert_eq!(
            Schedule::fixed(SearchParams::new(4, 0, 4)),
            Err(ScheduleError::ZeroBreadth(0))
        );
    }

    #[test]
    fn test_validation() {
        let p = SearchParams::new(1, 1, 1);
        assert_eq!(Schedule::new(vec![]), Err(ScheduleError::Empty));
        assert_eq!(
            Schedule::new(vec![ScheduleEntry::new(2, p)]),
            Err(ScheduleError::MissingTurnZero(2))
        );
        assert_eq!(
            Schedule::new(vec![ScheduleEntry::new(0, p), ScheduleEntry::new(0, p)]),
            Err(ScheduleError::NotIncreasing {
                previous: 0,
                next: 0
            })
        );
        assert_eq!(
            Schedule::new(vec![
                ScheduleEntry::new(0, p),
                ScheduleEntry::new(3, SearchParams::new(2, 0, 5))
            ]),
            Err(ScheduleError::ZeroBreadth(3))
        );
    }

    #[test]
    fn test_deserialize_validates() {
        #[derive(Deserialize)]
        struct Wrapper {
            schedule: Schedule,
        }

        let ok: Wrapper = toml::from_str(
            r#"
            [[schedule]]
            from_turn = 0
            max_depth = 2
            max_move_breadth = 10
            min_move_breadth = 4

            [[schedule]]
            from_turn = 12
            max_depth = 6
            max_move_breadth = 5
            min_move_breadth = 2
            "#,
        )
        .unwrap();
        assert_eq!(ok.schedule.params_for(11), SearchParams::new(2, 10, 4));
        assert_eq!(ok.schedule.params_for(12), SearchParams::new(6, 5, 2));

        let bad = toml::from_str::<Wrapper>(
            r#"
            [[schedule]]
            from_turn = 3
            max_depth = 2
            max_move_breadth = 10
            min_move_breadth = 4
            "#,
        );
        assert!(bad.is_err());
    }
}
