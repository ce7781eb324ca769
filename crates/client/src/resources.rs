//! Catalog of the dashboard collections the console lists.

use std::fmt;
use std::str::FromStr;

/// A collection endpoint backing one dashboard list view.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Resource {
    Orders,
    Instances,
    Agreements,
    Tickets,
}

impl Resource {
    pub const ALL: [Resource; 4] = [
        Resource::Orders,
        Resource::Instances,
        Resource::Agreements,
        Resource::Tickets,
    ];

    /// Collection path, always with a trailing slash.
    pub const fn path(&self) -> &'static str {
        match self {
            Resource::Orders => "/api/orders/",
            Resource::Instances => "/api/instances/",
            Resource::Agreements => "/api/agreements/",
            Resource::Tickets => "/api/tickets/",
        }
    }

    /// Path of a single record.
    pub fn detail_path(&self, id: &str) -> String {
        format!("{}{}/", self.path(), id)
    }

    /// Filters the dashboard always applies to this collection.
    pub const fn default_filters(&self) -> &'static [(&'static str, &'static str)] {
        match self {
            Resource::Orders => &[("is_main_invoice", "True")],
            _ => &[],
        }
    }

    /// Hint shown in the search box.
    pub const fn search_placeholder(&self) -> &'static str {
        match self {
            Resource::Orders => "Search by id or app name",
            Resource::Instances => "Search by name",
            Resource::Agreements => "Search by name",
            Resource::Tickets => "Search by subject",
        }
    }

    /// Record fields shown in tabular output, in display order.
    pub const fn columns(&self) -> &'static [&'static str] {
        match self {
            Resource::Orders => &[
                "erpnext_code",
                "app_name",
                "order_status",
                "company_name",
                "date",
            ],
            Resource::Instances => &["id", "name", "status", "url", "created_at"],
            Resource::Agreements => &["id", "name", "version", "created_at"],
            Resource::Tickets => &["id", "subject", "status", "issue_type", "updated_at"],
        }
    }

    pub const fn as_str(&self) -> &'static str {
        match self {
            Resource::Orders => "orders",
            Resource::Instances => "instances",
            Resource::Agreements => "agreements",
            Resource::Tickets => "tickets",
        }
    }
}

impl fmt::Display for Resource {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Resource {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "orders" | "order" => Ok(Resource::Orders),
            "instances" | "instance" | "services" => Ok(Resource::Instances),
            "agreements" | "agreement" => Ok(Resource::Agreements),
            "tickets" | "ticket" | "support" => Ok(Resource::Tickets),
            other => Err(format!("unknown resource '{other}'")),
        }
    }
}
