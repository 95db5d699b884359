//! Domain entities representing core business objects.

/// Implements `as_str`, `Display` and case-insensitive `FromStr` for a
/// fieldless enum stored as its upper-case name.
macro_rules! text_enum {
    ($name:ident { $($variant:ident => $text:literal),+ $(,)? }) => {
        impl $name {
            pub const ALL: &'static [$name] = &[$($name::$variant),+];

            pub fn as_str(&self) -> &'static str {
                match self {
                    $($name::$variant => $text),+
                }
            }
        }

        impl std::fmt::Display for $name {
            fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
                f.write_str(self.as_str())
            }
        }

        impl std::str::FromStr for $name {
            type Err = String;

            fn from_str(s: &str) -> Result<Self, Self::Err> {
                let wanted = s.trim().to_ascii_uppercase();
                $name::ALL
                    .iter()
                    .copied()
                    .find(|v| v.as_str() == wanted)
                    .ok_or_else(|| format!("Unknown {}: {}", stringify!($name), s))
            }
        }
    };
}

pub mod attachment;
pub mod lease;
pub mod maintenance;
pub mod payment;
pub mod property;
pub mod tenant;
pub mod token;
pub mod user;

// Re-export commonly used types
pub use attachment::{AttachmentType, MaintenanceRequestFile};
pub use lease::{LeaseAgreement, LeaseStatus};
pub use maintenance::{
    MaintenanceCategory, MaintenancePriority, MaintenanceRequest, MaintenanceStatus,
    StatusUpdate,
};
pub use payment::{Payment, PaymentMethod, PaymentStatus, PaymentType};
pub use property::Property;
pub use tenant::{Tenant, TenantStatus};
pub use token::{Claims, TokenPair, TokenType, JWT_ISSUER};
pub use user::{Role, User};

#[cfg(test)]
mod tests;
