use chrono::NaiveDate;
use std::collections::{HashMap, HashSet};

use crate::model::leave_request::LeaveGrant;
use crate::recon::window::DateWindow;

/// Approved leave expanded to the individual dates it covers, per employee.
#[derive(Debug, Default)]
pub struct LeaveIndex {
    dates: HashMap<u64, HashSet<NaiveDate>>,
}

impl LeaveIndex {
    #[cfg(test)]
    pub fn from_grants(grants: &[LeaveGrant]) -> Self {
        let mut index = Self::default();
        for grant in grants {
            index.insert_range(grant.employee_id, grant.start_date, grant.end_date);
        }
        index
    }

    /// Expand every grant day by day, keeping only dates inside `window`.
    pub fn from_grants_within(grants: &[LeaveGrant], window: DateWindow) -> Self {
        let mut index = Self::default();
        for grant in grants {
            let start = grant.start_date.max(window.start);
            let end = grant.end_date.min(window.end);
            index.insert_range(grant.employee_id, start, end);
        }
        index
    }

    // start > end yields nothing
    fn insert_range(&mut self, employee_id: u64, start: NaiveDate, end: NaiveDate) {
        if start > end {
            return;
        }
        let set = self.dates.entry(employee_id).or_default();
        set.extend(start.iter_days().take_while(|day| *day <= end));
    }

    pub fn is_on_leave(&self, employee_id: u64, date: NaiveDate) -> bool {
        self.dates
            .get(&employee_id)
            .is_some_and(|set| set.contains(&date))
    }

    #[cfg(test)]
    pub fn dates_for(&self, employee_id: u64) -> Option<&HashSet<NaiveDate>> {
        self.dates.get(&employee_id)
    }
}
