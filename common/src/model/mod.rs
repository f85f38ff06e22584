pub mod dashboard;
pub mod direction;
pub mod direction_link;
pub mod doctor;
pub mod resource;

pub(crate) mod de;
