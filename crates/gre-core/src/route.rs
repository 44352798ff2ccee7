//! Navigation targets of the dashboard.

use std::fmt;

/// A dashboard location. `path()` yields the browser route it corresponds to.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Route {
    Login,
    Dashboard,
    Customers,
    AllCustomers,
    ActiveSessions,
    SalesPeople,
    SalesPerson { slug: String },
    CustomerDetail { sales_person_slug: String, phone: String },
}

impl Route {
    pub fn path(&self) -> String {
        match self {
            Route::Login => "/login".to_string(),
            Route::Dashboard => "/dashboard".to_string(),
            Route::Customers => "/dashboard/customers".to_string(),
            Route::AllCustomers => "/dashboard/all-customers".to_string(),
            Route::ActiveSessions => "/dashboard/active-sessions".to_string(),
            Route::SalesPeople => "/dashboard/sales-people".to_string(),
            Route::SalesPerson { slug } => format!("/dashboard/sales-people/{}", slug),
            Route::CustomerDetail {
                sales_person_slug,
                phone,
            } => format!(
                "/dashboard/sales-people/{}/customers/{}",
                sales_person_slug, phone
            ),
        }
    }

    /// Detail route for a customer; `None` when no sales person is assigned.
    pub fn customer_detail(sales_person: Option<&str>, phone: &str) -> Option<Self> {
        let sales_person = sales_person.filter(|name| !name.trim().is_empty())?;
        Some(Route::CustomerDetail {
            sales_person_slug: slugify(sales_person),
            phone: phone.to_string(),
        })
    }
}

impl fmt::Display for Route {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.path())
    }
}

/// Lower-cases a name and joins its words with `-`.
pub fn slugify(name: &str) -> String {
    name.split_whitespace()
        .map(str::to_lowercase)
        .collect::<Vec<_>>()
        .join("-")
}

/// Reverses [`slugify`] as far as possible: words are title-cased.
pub fn unslugify(slug: &str) -> String {
    slug.split('-')
        .filter(|word| !word.is_empty())
        .map(|word| {
            let mut chars = word.chars();
            match chars.next() {
                Some(first) => first.to_uppercase().chain(chars).collect(),
                None => String::new(),
            }
        })
        .collect::<Vec<_>>()
        .join(" ")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_slug_round_trip() {
        assert_eq!(slugify("Mohini  Jadhav"), "mohini-jadhav");
        assert_eq!(unslugify("mohini-jadhav"), "Mohini Jadhav");
    }

    #[test]
    fn test_customer_detail_requires_sales_person() {
        assert!(Route::customer_detail(None, "9876543210").is_none());
        assert!(Route::customer_detail(Some("  "), "9876543210").is_none());
        let route = Route::customer_detail(Some("Rakhi Sangwan"), "9876543210").unwrap();
        assert_eq!(
            route.path(),
            "/dashboard/sales-people/rakhi-sangwan/customers/9876543210"
        );
    }
}
