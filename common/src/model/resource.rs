use serde::{Deserialize, Serialize};
use std::fmt;

/// Collections exposed by the clinic backend, addressed by their path segment.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Resource {
    Admin,
    Doctor,
    Direction,
    /// Doctor ↔ direction join records.
    DirectionDoctors,
    /// All join records of one doctor, keyed by the doctor's id.
    DoctorDirectionLinks,
    News,
    Blog,
    Services,
    ServiceDetails,
    Insurance,
    Career,
    /// Appointment requests ("zayafka"), stored by the backend as users.
    Zayafka,
}

impl Resource {
    /// Collections relayed one-to-one by the console's `/api/{resource}` routes.
    pub const COLLECTIONS: [Resource; 11] = [
        Resource::Admin,
        Resource::Doctor,
        Resource::Direction,
        Resource::DirectionDoctors,
        Resource::News,
        Resource::Blog,
        Resource::Services,
        Resource::ServiceDetails,
        Resource::Insurance,
        Resource::Career,
        Resource::Zayafka,
    ];

    pub fn path(self) -> &'static str {
        match self {
            Resource::Admin => "admin",
            Resource::Doctor => "doctor",
            Resource::Direction => "direction",
            Resource::DirectionDoctors => "direction-doctors",
            Resource::DoctorDirectionLinks => "direction-doctors/doctor",
            Resource::News => "news",
            Resource::Blog => "blog",
            Resource::Services => "services",
            Resource::ServiceDetails => "service-details",
            Resource::Insurance => "insurance",
            Resource::Career => "career",
            Resource::Zayafka => "users",
        }
    }

    pub fn from_path(path: &str) -> Option<Resource> {
        let path = path.trim_matches('/');
        Self::COLLECTIONS
            .into_iter()
            .chain(std::iter::once(Resource::DoctorDirectionLinks))
            .find(|r| r.path() == path)
    }
}

impl fmt::Display for Resource {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.path())
    }
}
