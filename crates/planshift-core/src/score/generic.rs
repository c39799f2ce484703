//! Generic multi-level score.

use std::cmp::Ordering;
use std::fmt;

use crate::error::ScoreError;

use super::value::ScoreValue;
use super::LevelKind;

/// An immutable multi-level score.
///
/// Levels are compared in declared order: the init level first, then every
/// hard level, then every soft level. The first unequal level decides the
/// ordering; this total order is the acceptance criterion every search
/// phase relies on.
///
/// The init level counts planning entities that are still unassigned. It
/// is never positive; `0` means the solution is fully initialized.
///
/// Score flavors are layouts of this one type:
///
/// ```
/// use planshift_core::Score;
///
/// let simple = Score::simple(-42i64);
/// let hard_soft = Score::hard_soft(-1i64, -100);
/// let bendable = Score::bendable(vec![0i64, -1], vec![-10, -20, -30]);
///
/// assert!(simple.is_feasible()); // no hard levels to violate
/// assert!(!hard_soft.is_feasible());
/// assert!(!bendable.is_feasible());
/// ```
#[derive(Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Score<V: ScoreValue> {
    init_score: i32,
    hard: Vec<V>,
    soft: Vec<V>,
}

impl<V: ScoreValue> Score<V> {
    /// Creates a score from an init count and per-level magnitudes.
    ///
    /// # Panics
    /// Panics if `init_score` is positive.
    pub fn of(init_score: i32, hard: Vec<V>, soft: Vec<V>) -> Self {
        assert!(
            init_score <= 0,
            "init score must be non-positive, got {init_score}"
        );
        Score {
            init_score,
            hard,
            soft,
        }
    }

    /// Creates a zero score with the given level layout.
    pub fn zero(hard_levels: usize, soft_levels: usize) -> Self {
        Score {
            init_score: 0,
            hard: vec![V::zero(); hard_levels],
            soft: vec![V::zero(); soft_levels],
        }
    }

    /// Single-level layout: no hard levels, one soft level.
    pub fn simple(value: V) -> Self {
        Score {
            init_score: 0,
            hard: Vec::new(),
            soft: vec![value],
        }
    }

    /// Two-level layout: one hard level, one soft level.
    pub fn hard_soft(hard: V, soft: V) -> Self {
        Score {
            init_score: 0,
            hard: vec![hard],
            soft: vec![soft],
        }
    }

    /// Runtime-configured layout with N hard and M soft levels.
    pub fn bendable(hard: Vec<V>, soft: Vec<V>) -> Self {
        Score {
            init_score: 0,
            hard,
            soft,
        }
    }

    /// Returns this score with a different init count.
    ///
    /// # Panics
    /// Panics if `init_score` is positive.
    pub fn with_init_score(mut self, init_score: i32) -> Self {
        assert!(
            init_score <= 0,
            "init score must be non-positive, got {init_score}"
        );
        self.init_score = init_score;
        self
    }

    /// Returns the init level: `-n` when `n` entities are unassigned.
    #[inline]
    pub fn init_score(&self) -> i32 {
        self.init_score
    }

    /// Returns the number of hard levels.
    pub fn hard_level_count(&self) -> usize {
        self.hard.len()
    }

    /// Returns the number of soft levels.
    pub fn soft_level_count(&self) -> usize {
        self.soft.len()
    }

    /// Returns all hard level magnitudes.
    pub fn hard_levels(&self) -> &[V] {
        &self.hard
    }

    /// Returns all soft level magnitudes.
    pub fn soft_levels(&self) -> &[V] {
        &self.soft
    }

    /// Total number of levels, init excluded.
    pub fn level_count(&self) -> usize {
        self.hard.len() + self.soft.len()
    }

    /// Returns the magnitude at a flat level index (hard levels first).
    pub fn level(&self, index: usize) -> Result<V, ScoreError> {
        if index < self.hard.len() {
            return Ok(self.hard[index]);
        }
        self.soft
            .get(index - self.hard.len())
            .copied()
            .ok_or(ScoreError::LevelIndexOutOfRange {
                index,
                level_count: self.level_count(),
            })
    }

    /// Returns the kind of the level at a flat index.
    pub fn level_kind(&self, index: usize) -> Result<LevelKind, ScoreError> {
        if index < self.hard.len() {
            Ok(LevelKind::Hard)
        } else if index < self.level_count() {
            Ok(LevelKind::Soft)
        } else {
            Err(ScoreError::LevelIndexOutOfRange {
                index,
                level_count: self.level_count(),
            })
        }
    }

    /// Returns true if every hard level is at or above zero.
    ///
    /// Soft levels never affect feasibility.
    pub fn is_feasible(&self) -> bool {
        self.hard.iter().all(|v| *v >= V::zero())
    }

    /// Returns true if no planning entity remains unassigned.
    #[inline]
    pub fn is_solution_initialized(&self) -> bool {
        self.init_score == 0
    }

    fn ensure_same_layout(&self, other: &Self) -> Result<(), ScoreError> {
        if self.hard.len() != other.hard.len() || self.soft.len() != other.soft.len() {
            return Err(ScoreError::IncompatibleLayout {
                expected_hard: self.hard.len(),
                expected_soft: self.soft.len(),
                actual_hard: other.hard.len(),
                actual_soft: other.soft.len(),
            });
        }
        Ok(())
    }

    /// Adds level by level, init included.
    pub fn add(&self, other: &Self) -> Result<Self, ScoreError> {
        self.ensure_same_layout(other)?;
        let init_score = self
            .init_score
            .checked_add(other.init_score)
            .ok_or_else(|| overflow_at("init", 0))?;
        Ok(Score {
            init_score,
            hard: zip_levels(&self.hard, &other.hard, "hard", V::checked_add)?,
            soft: zip_levels(&self.soft, &other.soft, "soft", V::checked_add)?,
        })
    }

    /// Subtracts level by level, init included.
    pub fn subtract(&self, other: &Self) -> Result<Self, ScoreError> {
        self.ensure_same_layout(other)?;
        let init_score = self
            .init_score
            .checked_sub(other.init_score)
            .ok_or_else(|| overflow_at("init", 0))?;
        Ok(Score {
            init_score,
            hard: zip_levels(&self.hard, &other.hard, "hard", V::checked_sub)?,
            soft: zip_levels(&self.soft, &other.soft, "soft", V::checked_sub)?,
        })
    }

    /// Negates every level, init included.
    pub fn negate(&self) -> Result<Self, ScoreError> {
        let init_score = self
            .init_score
            .checked_neg()
            .ok_or_else(|| overflow_at("init", 0))?;
        Ok(Score {
            init_score,
            hard: map_levels(&self.hard, "hard", V::checked_neg)?,
            soft: map_levels(&self.soft, "soft", V::checked_neg)?,
        })
    }

    /// Multiplies every level by a scalar.
    ///
    /// Integer levels round to the nearest value; the init level floors.
    pub fn multiply(&self, multiplicand: f64) -> Result<Self, ScoreError> {
        Ok(Score {
            init_score: (self.init_score as f64 * multiplicand).floor() as i32,
            hard: map_levels(&self.hard, "hard", |v| v.checked_scale(multiplicand))?,
            soft: map_levels(&self.soft, "soft", |v| v.checked_scale(multiplicand))?,
        })
    }

    /// Divides every level by a scalar.
    ///
    /// Integer levels round to the nearest value; the init level floors.
    pub fn divide(&self, divisor: f64) -> Result<Self, ScoreError> {
        Ok(Score {
            init_score: (self.init_score as f64 / divisor).floor() as i32,
            hard: map_levels(&self.hard, "hard", |v| v.checked_div_scalar(divisor))?,
            soft: map_levels(&self.soft, "soft", |v| v.checked_div_scalar(divisor))?,
        })
    }

    /// Lexicographic comparison: init level, then hard levels in order,
    /// then soft levels in order.
    pub fn compare(&self, other: &Self) -> Result<Ordering, ScoreError> {
        self.ensure_same_layout(other)?;
        match self.init_score.cmp(&other.init_score) {
            Ordering::Equal => {}
            ordering => return Ok(ordering),
        }
        for (a, b) in self
            .hard
            .iter()
            .zip(&other.hard)
            .chain(self.soft.iter().zip(&other.soft))
        {
            match a.total_cmp(b) {
                Ordering::Equal => continue,
                ordering => return Ok(ordering),
            }
        }
        Ok(Ordering::Equal)
    }

    /// Returns true if this score beats `other`.
    ///
    /// Returns false for incompatible layouts; use [`compare`](Self::compare)
    /// when the layout mismatch must surface.
    pub fn is_better_than(&self, other: &Self) -> bool {
        self.compare(other).is_ok_and(|o| o.is_gt())
    }

    /// Parses a score from its display form.
    ///
    /// # Format
    /// - simple: `"42"` or `"-7init/42"`
    /// - hard/soft: `"0hard/-100soft"`
    /// - bendable: `"[0/-1]hard/[-10/-20/-30]soft"`
    pub fn parse(s: &str) -> Result<Self, ScoreParseError> {
        let s = s.trim();
        let (init_score, rest) = match s.split_once("init/") {
            Some((init_part, rest)) => {
                let init = init_part.trim().parse::<i32>().map_err(|e| ScoreParseError {
                    message: format!("invalid init score '{}': {}", init_part, e),
                })?;
                if init > 0 {
                    return Err(ScoreParseError {
                        message: format!("init score must be non-positive, got {}", init),
                    });
                }
                (init, rest)
            }
            None => (0, s),
        };

        let (hard, soft) = if rest.starts_with('[') {
            parse_bendable_levels(rest)?
        } else if rest.contains("hard/") {
            parse_hard_soft_levels(rest)?
        } else {
            let value = V::parse_value(rest).ok_or_else(|| ScoreParseError {
                message: format!("invalid score value '{}'", rest),
            })?;
            (Vec::new(), vec![value])
        };

        Ok(Score {
            init_score,
            hard,
            soft,
        })
    }
}

fn overflow_at(kind: &str, index: usize) -> ScoreError {
    ScoreError::ArithmeticOverflow {
        level: format!("{kind}[{index}]"),
    }
}

fn zip_levels<V: ScoreValue>(
    a: &[V],
    b: &[V],
    kind: &str,
    op: impl Fn(V, V) -> Option<V>,
) -> Result<Vec<V>, ScoreError> {
    a.iter()
        .zip(b)
        .enumerate()
        .map(|(i, (x, y))| op(*x, *y).ok_or_else(|| overflow_at(kind, i)))
        .collect()
}

fn map_levels<V: ScoreValue>(
    levels: &[V],
    kind: &str,
    op: impl Fn(V) -> Option<V>,
) -> Result<Vec<V>, ScoreError> {
    levels
        .iter()
        .enumerate()
        .map(|(i, v)| op(*v).ok_or_else(|| overflow_at(kind, i)))
        .collect()
}

fn parse_level_list<V: ScoreValue>(part: &str) -> Result<Vec<V>, ScoreParseError> {
    part.split('/')
        .filter(|s| !s.trim().is_empty())
        .map(|s| {
            V::parse_value(s.trim()).ok_or_else(|| ScoreParseError {
                message: format!("invalid score level '{}'", s),
            })
        })
        .collect()
}

fn parse_bendable_levels<V: ScoreValue>(s: &str) -> Result<(Vec<V>, Vec<V>), ScoreParseError> {
    let invalid = || ScoreParseError {
        message: format!(
            "invalid bendable score '{}': expected '[...]hard/[...]soft'",
            s
        ),
    };
    let body = s.strip_prefix('[').ok_or_else(invalid)?;
    let (hard_part, rest) = body.split_once("]hard/[").ok_or_else(invalid)?;
    let soft_part = rest.strip_suffix("]soft").ok_or_else(invalid)?;
    Ok((parse_level_list(hard_part)?, parse_level_list(soft_part)?))
}

fn parse_hard_soft_levels<V: ScoreValue>(s: &str) -> Result<(Vec<V>, Vec<V>), ScoreParseError> {
    let invalid = || ScoreParseError {
        message: format!("invalid score '{}': expected 'Xhard/Ysoft'", s),
    };
    let (hard_part, rest) = s.split_once("hard/").ok_or_else(invalid)?;
    let soft_part = rest.strip_suffix("soft").ok_or_else(invalid)?;
    let hard = V::parse_value(hard_part.trim()).ok_or_else(|| ScoreParseError {
        message: format!("invalid hard score '{}'", hard_part),
    })?;
    let soft = V::parse_value(soft_part.trim()).ok_or_else(|| ScoreParseError {
        message: format!("invalid soft score '{}'", soft_part),
    })?;
    Ok((vec![hard], vec![soft]))
}

impl<V: ScoreValue> PartialOrd for Score<V> {
    /// `None` when the level layouts differ.
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        self.compare(other).ok()
    }
}

impl<V: ScoreValue> fmt::Display for Score<V> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.init_score != 0 {
            write!(f, "{}init/", self.init_score)?;
        }
        match (self.hard.len(), self.soft.len()) {
            (0, 1) => write!(f, "{}", self.soft[0]),
            (1, 1) => write!(f, "{}hard/{}soft", self.hard[0], self.soft[0]),
            _ => {
                let join = |levels: &[V]| {
                    levels
                        .iter()
                        .map(|v| v.to_string())
                        .collect::<Vec<_>>()
                        .join("/")
                };
                write!(f, "[{}]hard/[{}]soft", join(&self.hard), join(&self.soft))
            }
        }
    }
}

impl<V: ScoreValue> fmt::Debug for Score<V> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Score({})", self)
    }
}

/// Error when parsing a score from string
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ScoreParseError {
    pub message: String,
}

impl fmt::Display for ScoreParseError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Score parse error: {}", self.message)
    }
}

impl std::error::Error for ScoreParseError {}
