//! Local filtering and pagination over lists that were already fetched.

use crate::model::doctor::DoctorRecord;

/// Search box plus direction selector of the doctor list.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct DoctorFilter {
    pub query: String,
    /// `None` shows all directions.
    pub direction_id: Option<i64>,
}

impl DoctorFilter {
    pub fn matches(&self, doctor: &DoctorRecord) -> bool {
        self.matches_query(doctor) && self.matches_direction(doctor)
    }

    fn matches_query(&self, doctor: &DoctorRecord) -> bool {
        let query = self.query.trim().to_lowercase();
        if query.is_empty() {
            return true;
        }
        doctor.first_name.to_lowercase().contains(&query)
            || doctor.last_name.to_lowercase().contains(&query)
            || doctor
                .phone_number
                .as_deref()
                .is_some_and(|phone| phone.contains(&query))
    }

    fn matches_direction(&self, doctor: &DoctorRecord) -> bool {
        self.direction_id
            .is_none_or(|id| doctor.direction_ids().contains(&id))
    }

    pub fn apply<'a>(&self, doctors: &'a [DoctorRecord]) -> Vec<&'a DoctorRecord> {
        doctors.iter().filter(|d| self.matches(d)).collect()
    }

    pub fn is_active(&self) -> bool {
        !self.query.trim().is_empty() || self.direction_id.is_some()
    }
}

/// "Showing N of M doctors" line under the filters.
pub fn showing_label(shown: usize, total: usize, noun: &str) -> String {
    format!("Showing {} of {} {}", shown, total, noun)
}

/// One page of a list, 1-based.
#[derive(Debug, PartialEq, Eq)]
pub struct Page<'a, T> {
    pub items: &'a [T],
    pub page: usize,
    pub per_page: usize,
    pub total_pages: usize,
    pub total: usize,
}

impl<T> Page<'_, T> {
    pub fn has_previous(&self) -> bool {
        self.page > 1
    }

    pub fn has_next(&self) -> bool {
        self.page < self.total_pages
    }

    /// `"11-20"` style label of the shown range; `"0-0"` for an empty list.
    pub fn range_label(&self) -> String {
        if self.items.is_empty() {
            return "0-0".to_string();
        }
        let first = (self.page - 1) * self.per_page + 1;
        format!("{}-{}", first, first + self.items.len() - 1)
    }
}

/// Slices `items` into the requested page. Pages below 1 become 1 and pages
/// past the end become the last page; there is always at least one page.
pub fn paginate<T>(items: &[T], page: usize, per_page: usize) -> Page<'_, T> {
    let per_page = per_page.max(1);
    let total = items.len();
    let total_pages = total.div_ceil(per_page).max(1);
    let page = page.clamp(1, total_pages);
    let start = ((page - 1) * per_page).min(total);
    let end = (start + per_page).min(total);
    Page {
        items: &items[start..end],
        page,
        per_page,
        total_pages,
        total,
    }
}
