//! MySQL repository implementations
//!
//! All queries are built at runtime with `sqlx::query`/`QueryBuilder` and
//! read back with `Row::try_get`. Enum columns hold the upper-case names,
//! money columns are `DECIMAL(12,2)`.

mod attachment_repository_impl;
mod lease_repository_impl;
mod maintenance_repository_impl;
mod payment_repository_impl;
mod property_repository_impl;
mod tenant_repository_impl;
mod user_repository_impl;

#[cfg(test)]
mod tests;

pub use attachment_repository_impl::MySqlAttachmentRepository;
pub use lease_repository_impl::MySqlLeaseRepository;
pub use maintenance_repository_impl::MySqlMaintenanceRepository;
pub use payment_repository_impl::MySqlPaymentRepository;
pub use property_repository_impl::MySqlPropertyRepository;
pub use tenant_repository_impl::MySqlTenantRepository;
pub use user_repository_impl::MySqlUserRepository;

use std::str::FromStr;

use sqlx::mysql::{MySql, MySqlRow};
use sqlx::{Decode, Row, Type};

use nbj_core::errors::DomainError;
use nbj_shared::PageRequest;

/// Maps a driver error, turning unique-key violations into conflicts
pub(crate) fn db_error(context: &str, error: sqlx::Error) -> DomainError {
    if let sqlx::Error::Database(db) = &error {
        if db.is_unique_violation() {
            return DomainError::Conflict {
                message: format!("{}: duplicate value", context),
            };
        }
    }
    tracing::error!(error = %error, "{}", context);
    DomainError::Database {
        message: format!("{}: {}", context, error),
    }
}

/// Reads one column
pub(crate) fn column<'r, T>(row: &'r MySqlRow, name: &str) -> Result<T, DomainError>
where
    T: Decode<'r, MySql> + Type<MySql>,
{
    row.try_get(name).map_err(|e| DomainError::Database {
        message: format!("Failed to get {}: {}", name, e),
    })
}

/// Reads a VARCHAR column holding an enum name
pub(crate) fn enum_column<T>(row: &MySqlRow, name: &str) -> Result<T, DomainError>
where
    T: FromStr<Err = String>,
{
    let raw: String = column(row, name)?;
    T::from_str(&raw).map_err(|message| DomainError::Database { message })
}

/// Nullable variant of [`enum_column`]
pub(crate) fn optional_enum_column<T>(row: &MySqlRow, name: &str) -> Result<Option<T>, DomainError>
where
    T: FromStr<Err = String>,
{
    let raw: Option<String> = column(row, name)?;
    raw.map(|value| T::from_str(&value).map_err(|message| DomainError::Database { message }))
        .transpose()
}

/// `ORDER BY ... LIMIT ... OFFSET ...` for a page, with the sort field
/// looked up in `columns`; unknown fields fall back to `default_column`
pub(crate) fn order_and_limit(
    page: &PageRequest,
    columns: &[(&str, &'static str)],
    default_column: &'static str,
) -> String {
    let column = columns
        .iter()
        .find(|(field, _)| *field == page.sort_by)
        .map(|(_, column)| *column)
        .unwrap_or(default_column);
    let dir = page.sort_dir.as_sql();
    format!(
        " ORDER BY {} {}, id {} LIMIT {} OFFSET {}",
        column,
        dir,
        dir,
        page.limit(),
        page.offset()
    )
}
