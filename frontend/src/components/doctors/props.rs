use yew::prelude::*;

#[derive(Properties, PartialEq, Clone)]
pub struct DoctorManagementProps {
    /// Rows per page of the doctor table.
    #[prop_or(10)]
    pub per_page: usize,

    /// Where the clinic backend serves uploaded photos from.
    #[prop_or(String::from("http://localhost:3001"))]
    pub backend_url: String,
}
