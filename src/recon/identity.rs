use std::collections::{HashMap, HashSet};

use crate::model::employee::EmployeeIdentity;

/// Snapshot of the employee directory, loaded once per run.
#[derive(Debug, Default)]
pub struct Directory {
    by_code: HashMap<String, u64>,
}

impl Directory {
    pub fn from_identities(identities: &[EmployeeIdentity]) -> Self {
        let by_code = identities
            .iter()
            .map(|e| (e.employee_code.clone(), e.employee_id))
            .collect();
        Self { by_code }
    }

    pub fn resolve(&self, employee_code: &str) -> Option<u64> {
        self.by_code.get(employee_code).copied()
    }

    pub fn len(&self) -> usize {
        self.by_code.len()
    }
}

/// Employee codes that had swipes but no directory entry, first-seen order,
/// each reported once.
#[derive(Debug, Default)]
pub struct UnmatchedCodes {
    seen: HashSet<String>,
    ordered: Vec<String>,
}

impl UnmatchedCodes {
    pub fn record(&mut self, employee_code: &str) {
        if self.seen.insert(employee_code.to_string()) {
            self.ordered.push(employee_code.to_string());
        }
    }

    pub fn into_vec(self) -> Vec<String> {
        self.ordered
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn resolves_known_codes_only() {
        let directory = Directory::from_identities(&[
            EmployeeIdentity {
                employee_code: "E1".to_string(),
                employee_id: 123,
            },
            EmployeeIdentity {
                employee_code: "E2".to_string(),
                employee_id: 456,
            },
        ]);
        assert_eq!(directory.len(), 2);
        assert_eq!(directory.resolve("E1"), Some(123));
        assert_eq!(directory.resolve("e1"), None);
        assert_eq!(directory.resolve("E3"), None);
    }

    #[test]
    fn unmatched_codes_are_deduplicated_in_order() {
        let mut unmatched = UnmatchedCodes::default();
        for code in ["X9", "A1", "X9", "B2", "A1"] {
            unmatched.record(code);
        }
        assert_eq!(unmatched.into_vec(), vec!["X9", "A1", "B2"]);
    }
}
