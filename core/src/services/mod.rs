//! Business services containing domain logic and use cases.

pub mod auth;
pub mod dashboard;
pub mod file;
pub mod lease;
pub mod maintenance;
pub mod password;
pub mod payment;
pub mod property;
pub mod stripe;
pub mod tenant;
pub mod token;

// Re-export commonly used types
pub use auth::{AuthService, RegisterCommand};
pub use dashboard::{AdminDashboard, DashboardService, TenantDashboard};
pub use file::{FileDownload, FileService, FileStorage, MockFileStorage, StoredFile};
pub use lease::{LeaseService, NewLease};
pub use maintenance::{
    MaintenanceDetails, MaintenanceService, NewMaintenanceRequest,
};
pub use password::{validate_password_strength, PasswordHasher};
pub use payment::{NewPayment, PaymentHistoryEntry, PaymentHistoryQuery, PaymentService};
pub use property::{PropertyInput, PropertyService, PropertySummary};
pub use stripe::{
    ConnectAccountGateway, MockConnectAccountGateway, OnboardingLink, StripeService,
};
pub use tenant::{TenantDetails, TenantService, TenantUpdate};
pub use token::{TokenService, TokenServiceConfig};
