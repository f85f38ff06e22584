use serde::{Deserialize, Serialize};

use crate::model::resource::Resource;

/// Aggregate record counts shown on the dashboard (`GET /api/dashboard/stats`).
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DashboardStats {
    pub total_admins: usize,
    pub total_doctors: usize,
    pub total_users: usize,
    pub total_news: usize,
    pub total_blogs: usize,
    pub total_services: usize,
    pub total_insurance: usize,
    pub total_careers: usize,
    pub total_directions: usize,
}

impl DashboardStats {
    /// Collections counted on the dashboard.
    pub const COUNTED: [Resource; 9] = [
        Resource::Admin,
        Resource::Doctor,
        Resource::Zayafka,
        Resource::News,
        Resource::Blog,
        Resource::Services,
        Resource::Insurance,
        Resource::Career,
        Resource::Direction,
    ];

    pub fn record(&mut self, resource: Resource, count: usize) {
        let slot = match resource {
            Resource::Admin => &mut self.total_admins,
            Resource::Doctor => &mut self.total_doctors,
            Resource::Zayafka => &mut self.total_users,
            Resource::News => &mut self.total_news,
            Resource::Blog => &mut self.total_blogs,
            Resource::Services => &mut self.total_services,
            Resource::Insurance => &mut self.total_insurance,
            Resource::Career => &mut self.total_careers,
            Resource::Direction => &mut self.total_directions,
            _ => return,
        };
        *slot = count;
    }
}
