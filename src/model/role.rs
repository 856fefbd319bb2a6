#[derive(Debug, Copy, Clone, Eq, PartialEq)]
pub enum Role {
    Admin = 1,
    Hr = 2,
    Employee = 3,
    System = 4,
    ApiUser = 5,
}

impl Role {
    pub fn from_id(id: u8) -> Option<Self> {
        match id {
            1 => Some(Role::Admin),
            2 => Some(Role::Hr),
            3 => Some(Role::Employee),
            4 => Some(Role::System),
            5 => Some(Role::ApiUser),
            _ => None,
        }
    }

    /// Roles allowed to trigger batch jobs that rewrite attendance.
    pub fn can_run_attendance_jobs(&self) -> bool {
        matches!(self, Role::Admin | Role::Hr | Role::System)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn unknown_role_id_is_none() {
        assert_eq!(Role::from_id(0), None);
        assert_eq!(Role::from_id(6), None);
        assert_eq!(Role::from_id(4), Some(Role::System));
    }

    #[test]
    fn only_privileged_roles_run_attendance_jobs() {
        assert!(Role::Admin.can_run_attendance_jobs());
        assert!(Role::Hr.can_run_attendance_jobs());
        assert!(Role::System.can_run_attendance_jobs());
        assert!(!Role::Employee.can_run_attendance_jobs());
        assert!(!Role::ApiUser.can_run_attendance_jobs());
    }
}
