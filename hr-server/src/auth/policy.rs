//! Authorization policy
//!
//! Every privileged operation belongs to a [`Capability`]; the table below is
//! the only place that decides which roles hold it. Routes attach
//! `require_capability(..)` instead of comparing role strings.

use shared::Role;

/// Named class of privileged operations
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Capability {
    /// Create and list tenants
    ManageTenants,
    /// Departments, employees, leave types, onboarding bulk operations
    ManageOrganization,
    /// Approve or reject leave requests
    DecideLeave,
    /// Manually record attendance for someone
    MarkAttendance,
    /// Tenant mail relay settings
    ManageEmailSettings,
    /// Clients, projects and tasks
    ManageBilling,
    /// Approve or reject timesheet weeks
    DecideTimesheets,
    /// Read other users' attendance and timesheets
    ViewTeamData,
}

use Role::*;

const POLICY: &[(Capability, &[Role])] = &[
    (Capability::ManageTenants, &[SuperAdmin]),
    (Capability::ManageOrganization, &[SuperAdmin, Admin, Hr]),
    (Capability::DecideLeave, &[SuperAdmin, Admin, Hr, Manager]),
    (Capability::MarkAttendance, &[SuperAdmin, Admin, Hr, Manager]),
    (Capability::ManageEmailSettings, &[SuperAdmin, Admin]),
    (Capability::ManageBilling, &[SuperAdmin, Admin, Manager]),
    (Capability::DecideTimesheets, &[SuperAdmin, Admin, Hr, Manager]),
    (Capability::ViewTeamData, &[SuperAdmin, Admin, Hr, Manager]),
];

impl Capability {
    pub fn name(&self) -> &'static str {
        match self {
            Self::ManageTenants => "manage_tenants",
            Self::ManageOrganization => "manage_organization",
            Self::DecideLeave => "decide_leave",
            Self::MarkAttendance => "mark_attendance",
            Self::ManageEmailSettings => "manage_email_settings",
            Self::ManageBilling => "manage_billing",
            Self::DecideTimesheets => "decide_timesheets",
            Self::ViewTeamData => "view_team_data",
        }
    }

    /// Roles that hold this capability
    pub fn allowed_roles(&self) -> &'static [Role] {
        POLICY
            .iter()
            .find(|(cap, _)| cap == self)
            .map(|(_, roles)| *roles)
            .unwrap_or(&[])
    }

    pub fn allows(&self, role: Role) -> bool {
        self.allowed_roles().contains(&role)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const ALL_CAPS: [Capability; 8] = [
        Capability::ManageTenants,
        Capability::ManageOrganization,
        Capability::DecideLeave,
        Capability::MarkAttendance,
        Capability::ManageEmailSettings,
        Capability::ManageBilling,
        Capability::DecideTimesheets,
        Capability::ViewTeamData,
    ];

    #[test]
    fn test_every_capability_has_policy() {
        for cap in ALL_CAPS {
            assert!(!cap.allowed_roles().is_empty(), "{} has no roles", cap.name());
            assert!(cap.allows(Role::SuperAdmin));
        }
    }

    #[test]
    fn test_employee_holds_nothing() {
        for cap in ALL_CAPS {
            assert!(!cap.allows(Role::Employee));
        }
    }

    #[test]
    fn test_role_sets() {
        assert!(Capability::ManageOrganization.allows(Role::Hr));
        assert!(!Capability::ManageOrganization.allows(Role::Manager));
        assert!(Capability::DecideLeave.allows(Role::Manager));
        assert!(!Capability::ManageTenants.allows(Role::Admin));
        assert!(!Capability::ManageEmailSettings.allows(Role::Hr));
        assert!(Capability::ManageBilling.allows(Role::Manager));
        assert!(!Capability::ManageBilling.allows(Role::Hr));
    }
}
