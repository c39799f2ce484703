//! Constraint identity types.
//!
//! A constraint match contributes a weight to one score level; the types
//! here name the constraint that fired so the match ledger can report
//! per-constraint totals.

/// Reference to a constraint for identification.
///
/// # Example
///
/// ```
/// use planshift_core::ConstraintRef;
///
/// let cr = ConstraintRef::new("rostering", "NoOverlappingShifts");
/// assert_eq!(cr.full_name(), "rostering/NoOverlappingShifts");
///
/// let bare = ConstraintRef::new("", "Conflict");
/// assert_eq!(bare.full_name(), "Conflict");
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct ConstraintRef {
    /// Package/module containing the constraint.
    pub package: String,
    /// Name of the constraint.
    pub name: String,
}

impl ConstraintRef {
    /// Creates a new constraint reference.
    pub fn new(package: impl Into<String>, name: impl Into<String>) -> Self {
        Self {
            package: package.into(),
            name: name.into(),
        }
    }

    /// Returns the fully qualified name.
    pub fn full_name(&self) -> String {
        if self.package.is_empty() {
            self.name.clone()
        } else {
            format!("{}/{}", self.package, self.name)
        }
    }
}

/// Type of impact a constraint has on the score.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ImpactType {
    /// Penalize (negative weight).
    Penalty,
    /// Reward (positive weight).
    Reward,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_full_name_with_package() {
        let cr = ConstraintRef::new("vehicle.routing", "MaxCapacity");
        assert_eq!(cr.full_name(), "vehicle.routing/MaxCapacity");
    }

    #[test]
    fn test_full_name_without_package() {
        let cr = ConstraintRef::new("", "MaxCapacity");
        assert_eq!(cr.full_name(), "MaxCapacity");
    }

    #[test]
    fn test_impact_type() {
        assert_ne!(ImpactType::Penalty, ImpactType::Reward);
    }
}
