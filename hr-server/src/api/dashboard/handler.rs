//! Dashboard API Handlers

use axum::{Json, extract::State};
use serde::{Deserialize, Serialize};

use crate::auth::CurrentUser;
use crate::core::ServerState;
use crate::db::repository::{
    AttendanceRepository, DepartmentRepository, EmployeeRepository, LeaveRequestRepository,
};
use crate::utils::AppResult;
use crate::utils::time::{round_to, today};

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct DashboardStats {
    pub total_employees: i64,
    pub total_departments: i64,
    pub pending_leaves: i64,
    pub present_today: i64,
    pub attendance_rate: f64,
}

/// Present share of active employees, one decimal; 0 with no employees
pub fn attendance_rate(present: i64, total: i64) -> f64 {
    if total > 0 {
        round_to(present as f64 / total as f64 * 100.0, 1)
    } else {
        0.0
    }
}

/// GET /api/dashboard/stats
pub async fn stats(
    State(state): State<ServerState>,
    user: CurrentUser,
) -> AppResult<Json<DashboardStats>> {
    let db = state.get_db();
    let tenant = user.tenant();

    let total_employees = EmployeeRepository::new(db.clone()).count_active(tenant).await?;
    let total_departments = DepartmentRepository::new(db.clone()).count(tenant).await?;
    let pending_leaves = LeaveRequestRepository::new(db.clone())
        .count_pending(tenant)
        .await?;
    let present_today = AttendanceRepository::new(db)
        .count_present(tenant, &today())
        .await?;

    Ok(Json(DashboardStats {
        total_employees,
        total_departments,
        pending_leaves,
        present_today,
        attendance_rate: attendance_rate(present_today, total_employees),
    }))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_attendance_rate() {
        assert_eq!(attendance_rate(0, 0), 0.0);
        assert_eq!(attendance_rate(3, 0), 0.0);
        assert_eq!(attendance_rate(1, 3), 33.3);
        assert_eq!(attendance_rate(2, 3), 66.7);
        assert_eq!(attendance_rate(4, 4), 100.0);
    }
}
