//! Onboarding workflow
//!
//! Bulk creation of departments, leave types and employees for a new tenant.
//! Each item is created on its own; one bad item never aborts the batch.

use validator::Validate;

use shared::Role;

use crate::auth::{CurrentUser, generate_temporary_password, hash_password};
use crate::core::ServerState;
use crate::db::id;
use crate::db::models::{
    BulkDepartmentsResult, BulkEmployeesResult, BulkFailure, BulkLeaveTypesResult, Department,
    DepartmentCreate, Employee, EmployeeCreate, EmployeeInvite, IssuedCredential, LeaveType,
    LeaveTypeCreate, OnboardingStatus, User, default_employment_type, default_status,
    normalize_email,
};
use crate::db::repository::{
    DepartmentRepository, EmployeeRepository, LeaveTypeRepository, OnboardingRepository,
    RepoError, UserRepository,
};
use crate::services::notification::{NotificationService, welcome_email};
use crate::utils::AppResult;
use crate::utils::validation::validation_error;

/// Length of generated temporary passwords
pub const TEMP_PASSWORD_LEN: usize = 12;

pub struct OnboardingService {
    state: ServerState,
}

fn failure(index: usize, name: &str, reason: impl ToString) -> BulkFailure {
    BulkFailure {
        index,
        name: name.to_string(),
        reason: reason.to_string(),
    }
}

/// Employee code derived from the email when the invite has none
pub fn employee_code_for(email: &str) -> String {
    let local: String = email
        .split('@')
        .next()
        .unwrap_or_default()
        .chars()
        .filter(|c| c.is_ascii_alphanumeric())
        .take(12)
        .collect::<String>()
        .to_uppercase();
    let key = id::new_key();
    let suffix = &key[key.len() - 4..];
    if local.is_empty() {
        format!("EMP-{}", suffix.to_uppercase())
    } else {
        format!("{local}-{}", suffix.to_uppercase())
    }
}

impl OnboardingService {
    pub fn new(state: ServerState) -> Self {
        Self { state }
    }

    pub async fn status(&self, user: &CurrentUser) -> AppResult<OnboardingStatus> {
        let db = self.state.get_db();
        let tenant = user.tenant();
        let departments = DepartmentRepository::new(db.clone()).count(tenant).await?;
        let leave_types = LeaveTypeRepository::new(db.clone()).count(tenant).await?;
        let employees = EmployeeRepository::new(db.clone()).count(tenant).await?;
        let flag = OnboardingRepository::new(db).find(&user.id).await?;

        Ok(OnboardingStatus {
            departments_created: departments > 0,
            leave_types_created: leave_types > 0,
            employees_invited: employees > 0,
            completed: flag.as_ref().is_some_and(|f| f.completed),
            skipped: flag.as_ref().is_some_and(|f| f.skipped),
        })
    }

    pub async fn create_departments(
        &self,
        user: &CurrentUser,
        items: Vec<DepartmentCreate>,
    ) -> AppResult<BulkDepartmentsResult> {
        let repo = DepartmentRepository::new(self.state.get_db());
        let mut result = BulkDepartmentsResult {
            departments: Vec::new(),
            failed: Vec::new(),
        };

        for (index, item) in items.into_iter().enumerate() {
            if let Err(e) = item.validate() {
                result.failed.push(failure(index, &item.name, validation_error(e).message));
                continue;
            }
            let name = item.name.clone();
            match repo.create(&Department::new(item, user.tenant_id.clone())).await {
                Ok(dept) => result.departments.push(dept),
                Err(e) => {
                    tracing::warn!(index, name = %name, error = %e, "Bulk department failed");
                    result.failed.push(failure(index, &name, e));
                }
            }
        }

        tracing::info!(
            created = result.departments.len(),
            failed = result.failed.len(),
            "Onboarding departments"
        );
        Ok(result)
    }

    pub async fn create_leave_types(
        &self,
        user: &CurrentUser,
        items: Vec<LeaveTypeCreate>,
    ) -> AppResult<BulkLeaveTypesResult> {
        let repo = LeaveTypeRepository::new(self.state.get_db());
        let mut result = BulkLeaveTypesResult {
            leave_types: Vec::new(),
            failed: Vec::new(),
        };

        for (index, item) in items.into_iter().enumerate() {
            if let Err(e) = item.validate() {
                result.failed.push(failure(index, &item.name, validation_error(e).message));
                continue;
            }
            let name = item.name.clone();
            match repo.create(&LeaveType::new(item, user.tenant_id.clone())).await {
                Ok(lt) => result.leave_types.push(lt),
                Err(e) => {
                    tracing::warn!(index, name = %name, error = %e, "Bulk leave type failed");
                    result.failed.push(failure(index, &name, e));
                }
            }
        }
        Ok(result)
    }

    /// Create employees and their login accounts
    ///
    /// Emails already present in the tenant are skipped. A login is created
    /// only when no user owns the email yet; its temporary password goes out
    /// in a welcome email when the tenant has mail settings, otherwise it is
    /// returned in `credentials`.
    pub async fn invite_employees(
        &self,
        user: &CurrentUser,
        invites: Vec<EmployeeInvite>,
    ) -> AppResult<BulkEmployeesResult> {
        let db = self.state.get_db();
        let employees = EmployeeRepository::new(db.clone());
        let users = UserRepository::new(db);
        let notifications = NotificationService::new(self.state.clone());
        let tenant = user.tenant();
        let mail_configured = notifications.settings(tenant).await?.is_some();
        let login_url = notifications.login_url();

        let mut result = BulkEmployeesResult {
            employees: Vec::new(),
            skipped: Vec::new(),
            failed: Vec::new(),
            credentials: Vec::new(),
            emails_queued: 0,
        };

        for (index, invite) in invites.into_iter().enumerate() {
            if let Err(e) = invite.validate() {
                result
                    .failed
                    .push(failure(index, &invite.full_name, validation_error(e).message));
                continue;
            }
            let email = normalize_email(&invite.email);

            if employees.find_by_email(&email, tenant).await?.is_some() {
                result.skipped.push(email);
                continue;
            }

            let role = invite.role.unwrap_or_default();
            if role == Role::SuperAdmin {
                result
                    .failed
                    .push(failure(index, &invite.full_name, "super_admin cannot be invited"));
                continue;
            }

            let full_name = invite.full_name.clone();
            let data = EmployeeCreate {
                employee_id: invite
                    .employee_id
                    .filter(|c| !c.trim().is_empty())
                    .unwrap_or_else(|| employee_code_for(&email)),
                full_name: invite.full_name,
                email: email.clone(),
                phone: None,
                department_id: invite.department_id,
                designation: invite.designation,
                date_of_joining: None,
                reporting_to: None,
                employment_type: default_employment_type(),
                status: default_status(),
            };
            let employee = match employees
                .create(&Employee::new(data, user.tenant_id.clone(), Some(user.id.clone())))
                .await
            {
                Ok(emp) => emp,
                // Lost a race with another invite of the same email
                Err(RepoError::Duplicate(_)) => {
                    result.skipped.push(email);
                    continue;
                }
                Err(e) => {
                    result.failed.push(failure(index, &full_name, e));
                    continue;
                }
            };
            result.employees.push(employee);

            if users.find_by_email(&email).await?.is_some() {
                continue;
            }
            let temporary_password = generate_temporary_password(TEMP_PASSWORD_LEN);
            let hash = match hash_password(&temporary_password) {
                Ok(h) => h,
                Err(e) => {
                    result.failed.push(failure(index, &full_name, e));
                    continue;
                }
            };
            let mut account = User::new(
                email.clone(),
                hash,
                full_name.clone(),
                role,
                user.tenant_id.clone(),
            );
            account.must_change_password = true;
            match users.create(&account).await {
                Ok(_) => {}
                Err(RepoError::Duplicate(_)) => continue,
                Err(e) => {
                    result.failed.push(failure(index, &full_name, e));
                    continue;
                }
            }

            let queued = if mail_configured {
                let message = welcome_email(&email, &full_name, &temporary_password, &login_url);
                match notifications.enqueue(tenant, message).await {
                    Ok(_) => true,
                    Err(e) => {
                        tracing::warn!(email = %email, error = %e, "Failed to queue welcome email");
                        false
                    }
                }
            } else {
                false
            };

            if queued {
                result.emails_queued += 1;
            } else {
                result.credentials.push(IssuedCredential {
                    email,
                    temporary_password,
                });
            }
        }

        tracing::info!(
            created = result.employees.len(),
            skipped = result.skipped.len(),
            failed = result.failed.len(),
            emails_queued = result.emails_queued,
            "Onboarding employees"
        );
        Ok(result)
    }

    /// Idempotent; `skipped` records how the wizard was left
    pub async fn finish(&self, user: &CurrentUser, skipped: bool) -> AppResult<(bool, bool)> {
        let state = OnboardingRepository::new(self.state.get_db())
            .finish(&user.id, user.tenant(), skipped)
            .await?;
        Ok((state.completed, state.skipped))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_employee_code_from_email() {
        let code = employee_code_for("jane.doe@example.com");
        assert!(code.starts_with("JANEDOE-"));
        assert_eq!(code.len(), "JANEDOE-".len() + 4);
    }

    #[test]
    fn test_employee_code_without_local_part() {
        assert!(employee_code_for("@example.com").starts_with("EMP-"));
    }
}
